//! Fixed-size pagination for list pages.
//!
//! A missing or non-integer page parameter shows page 1; an integer outside
//! `1..=num_pages` shows the last page. An empty list still has one (empty)
//! page.

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, Select};
use serde::Serialize;

pub const PAGE_SIZE: u64 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually shown.
    pub number: u64,
    pub num_pages: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    /// 1-based index of the first item on this page, 0 when empty.
    pub fn start_index(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            (self.number - 1) * PAGE_SIZE + 1
        }
    }

    pub fn end_index(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            self.start_index() + self.items.len() as u64 - 1
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            total: self.total,
        }
    }
}

pub fn num_pages_for(total: u64) -> u64 {
    total.div_ceil(PAGE_SIZE).max(1)
}

/// Resolve the raw `page` query value against the page count.
pub fn resolve_page(raw: Option<&str>, num_pages: u64) -> u64 {
    match raw.map(str::trim).and_then(|r| r.parse::<i64>().ok()) {
        None => 1,
        Some(n) if n >= 1 && (n as u64) <= num_pages => n as u64,
        Some(_) => num_pages,
    }
}

/// Count, resolve the page and fetch its rows.
pub async fn fetch_page<E, C>(
    db: &C,
    select: Select<E>,
    raw_page: Option<&str>,
) -> Result<Page<E::Model>, DbErr>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    C: ConnectionTrait,
{
    let paginator = select.paginate(db, PAGE_SIZE);
    let total = paginator.num_items().await?;
    let num_pages = num_pages_for(total);
    let number = resolve_page(raw_page, num_pages);
    let items = paginator.fetch_page(number - 1).await?;

    Ok(Page {
        items,
        number,
        num_pages,
        total,
    })
}

/// Re-encode the current query string without `page`, for pagination links
/// that keep the active filters.
pub fn query_without_page(pairs: &[(String, String)]) -> String {
    let kept: Vec<(&str, &str)> = pairs
        .iter()
        .filter(|(k, _)| k != "page")
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    serde_urlencoded::to_string(kept).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_pages_never_zero() {
        assert_eq!(num_pages_for(0), 1);
        assert_eq!(num_pages_for(1), 1);
        assert_eq!(num_pages_for(10), 1);
        assert_eq!(num_pages_for(11), 2);
        assert_eq!(num_pages_for(35), 4);
    }

    #[test]
    fn test_missing_or_garbage_page_falls_back_to_first() {
        assert_eq!(resolve_page(None, 4), 1);
        assert_eq!(resolve_page(Some(""), 4), 1);
        assert_eq!(resolve_page(Some("abc"), 4), 1);
        assert_eq!(resolve_page(Some("2.5"), 4), 1);
    }

    #[test]
    fn test_out_of_range_page_falls_back_to_last() {
        assert_eq!(resolve_page(Some("5"), 4), 4);
        assert_eq!(resolve_page(Some("999"), 4), 4);
        assert_eq!(resolve_page(Some("0"), 4), 4);
        assert_eq!(resolve_page(Some("-3"), 4), 4);
    }

    #[test]
    fn test_valid_page_is_kept() {
        assert_eq!(resolve_page(Some("1"), 4), 1);
        assert_eq!(resolve_page(Some("3"), 4), 3);
        assert_eq!(resolve_page(Some(" 4 "), 4), 4);
    }

    #[test]
    fn test_page_indices() {
        let page = Page {
            items: vec![1, 2, 3],
            number: 3,
            num_pages: 3,
            total: 23,
        };
        assert_eq!(page.start_index(), 21);
        assert_eq!(page.end_index(), 23);
        assert!(page.has_previous());
        assert!(!page.has_next());

        let empty: Page<i32> = Page {
            items: vec![],
            number: 1,
            num_pages: 1,
            total: 0,
        };
        assert_eq!(empty.start_index(), 0);
        assert_eq!(empty.end_index(), 0);
        assert!(!empty.has_previous());
        assert!(!empty.has_next());
    }

    #[test]
    fn test_query_without_page_keeps_filters() {
        let pairs = vec![
            ("q".to_string(), "anita kumar".to_string()),
            ("page".to_string(), "3".to_string()),
            ("mode".to_string(), "online".to_string()),
        ];
        assert_eq!(query_without_page(&pairs), "q=anita+kumar&mode=online");
    }
}
