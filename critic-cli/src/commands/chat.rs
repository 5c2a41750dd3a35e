//! Chat command - interactive review session in the terminal
//!
//! Paste code, then submit it with an empty line. When nothing is pending, a
//! line of the form `/name` is a command; `//` and `/*` lines are code.

use chrono::Local;
use clap::Args;
use critic_core::view::{self, review_summary, RECENT_REVIEWS};
use critic_core::{ChatMessage, ChatSession, Role};
use critic_db::ReviewRecord;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use super::review::fetch_github_code;
use super::CriticClient;

const HELP: &str = "\
Paste code and press Enter on an empty line to submit it.
Commands:
  /github <url>  review a GitHub file or repository
  /recent        list the most recent reviews
  /open <n>      show recent review number n
  /clear         clear the conversation
  /help          show this help
  /quit          leave";

/// Interactive review session
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Don't list recent reviews on start
    #[arg(long)]
    no_recent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ChatCommand {
    GitHub(String),
    Recent,
    Open(usize),
    Clear,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Option<ChatCommand> {
    let line = line.trim();
    let rest = line.strip_prefix('/')?;
    if !rest.starts_with(|c: char| c.is_ascii_alphabetic() || c == '?') {
        return None;
    }
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let command = match name {
        "github" | "gh" if !arg.is_empty() => ChatCommand::GitHub(arg.to_string()),
        "recent" => ChatCommand::Recent,
        "open" => match arg.parse::<usize>() {
            Ok(n) if n >= 1 => ChatCommand::Open(n),
            _ => ChatCommand::Unknown(line.to_string()),
        },
        "clear" => ChatCommand::Clear,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Unknown(line.to_string()),
    };
    Some(command)
}

impl ChatArgs {
    /// Execute the chat command
    pub async fn execute(&self, client: &CriticClient) -> anyhow::Result<()> {
        let mut session = ChatSession::new();
        let mut recent: Vec<ReviewRecord> = Vec::new();

        println!("Critic chat. Type /help for commands.");
        if !self.no_recent {
            refresh_recent(client, &mut recent).await;
            print_recent(&recent);
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut pending = String::new();

        while let Some(line) = lines.next_line().await? {
            if pending.is_empty() {
                if let Some(command) = parse_command(&line) {
                    match command {
                        ChatCommand::Quit => break,
                        ChatCommand::Help => println!("{}", HELP),
                        ChatCommand::Clear => {
                            session.clear();
                            println!("Conversation cleared.");
                        }
                        ChatCommand::Recent => {
                            refresh_recent(client, &mut recent).await;
                            print_recent(&recent);
                        }
                        ChatCommand::Open(n) => open_recent(&mut session, &recent, n),
                        ChatCommand::GitHub(url) => match fetch_github_code(client, &url).await {
                            Ok(code) => {
                                submit(client, &mut session, code).await;
                                refresh_recent(client, &mut recent).await;
                            }
                            Err(e) => println!("{}", e),
                        },
                        ChatCommand::Unknown(input) => {
                            println!("Unknown command: {} (try /help)", input)
                        }
                    }
                    continue;
                }
            }

            if line.trim().is_empty() {
                if !pending.trim().is_empty() {
                    submit(client, &mut session, std::mem::take(&mut pending)).await;
                    refresh_recent(client, &mut recent).await;
                }
                pending.clear();
                continue;
            }

            pending.push_str(&line);
            pending.push('\n');
        }

        if !pending.trim().is_empty() {
            submit(client, &mut session, pending).await;
        }

        Ok(())
    }
}

/// Run one submit cycle: show the code, wait, show the review or the error
async fn submit(client: &CriticClient, session: &mut ChatSession, code: String) {
    if let Err(e) = session.begin_submit(code.as_str()) {
        println!("{}", e);
        return;
    }

    println!("Analyzing...");
    let reply = match client.analyze(&code).await {
        Ok(response) => session.complete(response),
        Err(e) => {
            warn!(error = %e, "Review request failed");
            session.fail()
        }
    };

    match reply {
        Ok(message) => println!("{}", render_message(message)),
        Err(e) => println!("{}", e),
    }
}

async fn refresh_recent(client: &CriticClient, recent: &mut Vec<ReviewRecord>) {
    match client.history().await {
        Ok(records) => *recent = view::recent(&records, RECENT_REVIEWS).to_vec(),
        Err(e) => warn!(error = %e, "Could not load recent reviews"),
    }
}

fn print_recent(recent: &[ReviewRecord]) {
    if recent.is_empty() {
        println!("No recent reviews.");
        return;
    }

    println!("Recent reviews:");
    for (i, record) in recent.iter().enumerate() {
        println!("  {}. {}", i + 1, review_summary(&record.code));
    }
}

fn open_recent(session: &mut ChatSession, recent: &[ReviewRecord], n: usize) {
    let Some(record) = recent.get(n - 1) else {
        println!("No recent review number {} (try /recent)", n);
        return;
    };

    match session.open_review(record) {
        Ok(()) => {
            for message in session.messages() {
                println!("{}", render_message(message));
            }
            if session.is_single_review(recent) {
                println!("(stored review #{}; type /clear to start over)", record.id);
            }
        }
        Err(e) => println!("{}", e),
    }
}

fn render_message(message: &ChatMessage) -> String {
    let who = match message.role {
        Role::User => "you",
        Role::Ai => "critic",
    };
    let when = message.timestamp.with_timezone(&Local).format("%H:%M");
    format!("[{} {}]\n{}\n", who, when, message.content.trim_end())
}
