use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const MAX_PAGE_SIZE: i32 = 100;

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    10
}

/// Client product listing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllProducts {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub page_size: i32,

    #[serde(default)]
    pub search: String,

    /// Category slug.
    pub category: Option<String>,
}

/// Back-office listing shared by every admin table.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllRecords {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub page_size: i32,

    #[serde(default)]
    pub search: String,

    pub status: Option<String>,
}

impl Default for FindAllRecords {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            search: String::new(),
            status: None,
        }
    }
}

/// Plain paging for endpoints without filters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    pub page_size: i32,
}

/// `(limit, offset)` for a 1-based page, clamped to sane bounds.
pub fn limit_offset(page: i32, page_size: i32) -> (i64, i64) {
    let page_size = page_size.clamp(1, MAX_PAGE_SIZE) as i64;
    let page = page.max(1) as i64;
    (page_size, (page - 1) * page_size)
}

/// Trimmed search term, `None` when the search box is empty.
pub fn search_term(search: &str) -> Option<&str> {
    let term = search.trim();
    (!term.is_empty()).then_some(term)
}

/// Status filter, `None` when blank.
pub fn status_filter(status: &Option<String>) -> Option<&str> {
    status.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_zero_based() {
        assert_eq!(limit_offset(1, 10), (10, 0));
        assert_eq!(limit_offset(3, 20), (20, 40));
        assert_eq!(limit_offset(0, 500), (100, 0));
    }

    #[test]
    fn blank_filters_are_dropped() {
        assert_eq!(search_term("   "), None);
        assert_eq!(search_term(" áo "), Some("áo"));
        assert_eq!(status_filter(&Some(" ".into())), None);
        assert_eq!(status_filter(&Some("active".into())), Some("active"));
    }
}
