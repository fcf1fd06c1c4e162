//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};

/// Offset/limit request, 1-indexed pages.
///
/// Values are taken as given: non-positive pages or limits simply select an
/// empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Half-open index window `[start, end)` clamped to a collection of `len`.
    pub fn window(&self, len: usize) -> (usize, usize) {
        let len_i = i64::try_from(len).unwrap_or(i64::MAX);
        let start = self.page.saturating_sub(1).saturating_mul(self.limit);
        let end = self.page.saturating_mul(self.limit);

        let clamp = |i: i64| i.clamp(0, len_i) as usize;
        let (start, end) = (clamp(start), clamp(end));
        if start >= end {
            (0, 0)
        } else {
            (start, end)
        }
    }
}

/// Raw `?page=&limit=` query values.
///
/// Kept as strings so junk input falls back to defaults instead of being
/// rejected.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number, 1-indexed (default 1)
    pub page: Option<String>,
    /// Items per page (default 10)
    pub limit: Option<String>,
}

impl PaginationParams {
    pub fn to_request(&self) -> PageRequest {
        PageRequest {
            page: parse_or(self.page.as_deref(), DEFAULT_PAGE_NUMBER),
            limit: parse_or(self.limit.as_deref(), DEFAULT_PAGE_SIZE),
        }
    }
}

/// Parse a leading integer (`"3"`, `" 12abc"`, `"-2"`); zero or no digits
/// gives `default`.
fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(leading_int)
        .filter(|n| *n != 0)
        .unwrap_or(default)
}

fn leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Paginated response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: u64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: u64,
}

impl PaginationMeta {
    pub fn new(total: u64, page: i64, limit: i64) -> Self {
        let total_pages = if limit > 0 {
            total.div_ceil(limit as u64)
        } else {
            0
        };

        Self {
            total,
            page,
            limit,
            total_pages,
        }
    }
}

impl<T> Paginated<T> {
    /// Create new paginated response
    pub fn new(data: Vec<T>, total: u64, page: i64, limit: i64) -> Self {
        Self {
            success: true,
            data,
            meta: PaginationMeta::new(total, page, limit),
        }
    }
}
