//! API endpoint URL builders

/// Build the entry collection URL
pub fn entries_url(base_url: &str) -> String {
    format!("{}/api/entries", base(base_url))
}

/// Build a single entry URL
pub fn entry_url(base_url: &str, id: &str) -> String {
    format!("{}/api/entries/{}", base(base_url), id)
}

/// Build the info page URL
pub fn info_url(base_url: &str) -> String {
    format!("{}/info", base(base_url))
}

/// Build the health check URL
pub fn health_url(base_url: &str) -> String {
    format!("{}/health", base(base_url))
}

fn base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_url() {
        assert_eq!(
            entries_url("http://localhost:3001"),
            "http://localhost:3001/api/entries"
        );
    }

    #[test]
    fn test_trailing_slash_is_dropped() {
        assert_eq!(
            entry_url("http://localhost:3001/", "7"),
            "http://localhost:3001/api/entries/7"
        );
        assert_eq!(info_url("http://host/"), "http://host/info");
    }
}
