//! Embedded single-page web UI.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Serve the web UI; the page picks the chat or history tab from its path.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;
    use critic_core::session::AI_ERROR_MESSAGE;
    use critic_core::view::{RECENT_REVIEWS, SUMMARY_WIDTH};

    #[test]
    fn test_page_matches_shared_presentation_rules() {
        assert!(INDEX_HTML.contains(&format!("const AI_ERROR = \"{}\";", AI_ERROR_MESSAGE)));
        assert!(INDEX_HTML.contains(&format!("const RECENT = {};", RECENT_REVIEWS)));
        assert!(INDEX_HTML.contains(&format!("const SUMMARY = {};", SUMMARY_WIDTH)));
        assert!(INDEX_HTML.contains("pre.textContent = summary(r.code);"));
    }
}
