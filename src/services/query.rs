//! Translation of list query strings into store filters and page windows

use crate::models::{Category, ContentFilter, ListParams};

/// Which list a query string is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Public list: active records only
    Public,
    /// Public list restricted to series categories
    Series,
    /// Admin list: everything, optionally narrowed by `isActive`
    Admin,
}

/// Present, non-blank query value
fn given(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Build the store filter for a list request.
///
/// Unknown enum values are kept as-is and simply match nothing. A year that
/// is not a number makes the whole filter match nothing.
pub fn build_filter(params: &ListParams, scope: ListScope) -> ContentFilter {
    let mut filter = ContentFilter {
        is_active: Some(true),
        ..Default::default()
    };

    if scope == ListScope::Admin {
        filter.is_active = match given(&params.is_active) {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        };
    }

    filter.language = given(&params.language).map(str::to_string);
    filter.genre = given(&params.genre).map(str::to_string);
    filter.search = given(&params.search).map(str::to_string);

    match scope {
        ListScope::Series => {
            filter.categories = Category::SERIES
                .iter()
                .map(|c| c.as_str().to_string())
                .collect();
        }
        _ => {
            if let Some(category) = given(&params.category) {
                filter.categories = vec![category.to_string()];
            }
        }
    }

    if let Some(year) = given(&params.year) {
        match year.parse::<i32>() {
            Ok(y) => filter.year = Some(y),
            Err(_) => filter.match_nothing = true,
        }
    }

    filter.trending_only = params.is_trending.as_deref() == Some("true");
    filter.featured_only = params.is_featured.as_deref() == Some("true");

    filter
}

/// Resolved page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-indexed
    pub page: u64,
    pub limit: u64,
}

impl Page {
    /// Resolve `page`/`limit` query values. Missing or malformed values fall
    /// back to page 1 and the default limit; the limit is capped at `max_limit`.
    pub fn resolve(page: Option<&str>, limit: Option<&str>, default_limit: u32, max_limit: u32) -> Self {
        let max_limit = max_limit.max(1) as u64;

        let limit = limit
            .and_then(|l| l.trim().parse::<i64>().ok())
            .filter(|l| *l > 0)
            .map(|l| l as u64)
            .unwrap_or(default_limit.max(1) as u64)
            .min(max_limit);

        let page = page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p > 0)
            .map(|p| p as u64)
            .unwrap_or(1);

        Page { page, limit }
    }

    pub fn from_params(params: &ListParams, default_limit: u32, max_limit: u32) -> Self {
        Self::resolve(
            params.page.as_deref(),
            params.limit.as_deref(),
            default_limit,
            max_limit,
        )
    }

    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Number of pages for `total` matches
    pub fn pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}
