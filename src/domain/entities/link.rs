//! Link entity representing a short code mapped to a target URL.

use chrono::{DateTime, Utc};

/// A stored short link with its click analytics.
///
/// `code` and `id` never change after creation. The click fields are only
/// mutated by the click tracker; `total_clicks` never decreases.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub total_clicks: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Creates a link that has never been clicked.
    pub fn new(id: i64, code: String, target_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            target_url,
            total_clicks: 0,
            last_clicked_at: None,
            created_at,
            updated_at: created_at,
        }
    }

    /// Returns true if the link has been clicked at least once.
    pub fn was_clicked(&self) -> bool {
        self.last_clicked_at.is_some()
    }
}

/// Input data for creating a new link.
///
/// The store assigns `id` and timestamps and starts the counter at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = Link::new(
            1,
            "abc123".to_string(),
            "https://example.com".to_string(),
            now,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.code, "abc123");
        assert_eq!(link.target_url, "https://example.com");
        assert_eq!(link.total_clicks, 0);
        assert!(link.last_clicked_at.is_none());
        assert_eq!(link.created_at, now);
        assert_eq!(link.updated_at, now);
        assert!(!link.was_clicked());
    }

    #[test]
    fn test_link_was_clicked() {
        let mut link = Link::new(
            1,
            "code12".to_string(),
            "https://example.com".to_string(),
            Utc::now(),
        );
        link.total_clicks = 3;
        link.last_clicked_at = Some(Utc::now());

        assert!(link.was_clicked());
    }

    #[test]
    fn test_new_link_creation() {
        let new_link = NewLink {
            code: "xyz789".to_string(),
            target_url: "https://rust-lang.org".to_string(),
        };

        assert_eq!(new_link.code, "xyz789");
        assert_eq!(new_link.target_url, "https://rust-lang.org");
    }
}
