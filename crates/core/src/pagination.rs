//! Client-side pagination over fetched lists

use serde::Serialize;

/// Pagination metadata for list output
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub limit: usize,
    pub next_page_command: Option<String>,
    pub prev_page_command: Option<String>,
}

/// Calculate pagination bounds for a given page
///
/// Returns (start_index, end_index) for slicing the items array.
/// An empty list has a single empty page.
pub fn calculate_pagination(
    total_items: usize,
    page: usize,
    limit: usize,
) -> Result<(usize, usize), String> {
    if page == 0 {
        return Err("Page numbers start at 1".to_string());
    }
    if limit == 0 {
        return Err("Limit must be greater than 0".to_string());
    }
    if total_items == 0 {
        return if page == 1 {
            Ok((0, 0))
        } else {
            Err(format!("Page {page} is out of range. Only 1 pages available."))
        };
    }

    let start = match (page - 1).checked_mul(limit) {
        Some(start) if start < total_items => start,
        _ => {
            let total_pages = total_items.div_ceil(limit);
            return Err(format!(
                "Page {page} is out of range. Only {total_pages} pages available."
            ));
        }
    };

    let end = start.saturating_add(limit).min(total_items);
    Ok((start, end))
}

/// Build page metadata with navigation commands.
///
/// `command` is the CLI invocation without the `--page` flag.
pub fn page_info(total_items: usize, page: usize, limit: usize, command: &str) -> PageInfo {
    let total_pages = total_items.div_ceil(limit.max(1)).max(1);

    let next_page = if page < total_pages {
        Some(format!("{command} --page {}", page + 1))
    } else {
        None
    };

    let prev_page = if page > 1 {
        Some(format!("{command} --page {}", page - 1))
    } else {
        None
    };

    PageInfo {
        current_page: page,
        total_pages,
        total_items,
        limit,
        next_page_command: next_page,
        prev_page_command: prev_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_pagination_basic() {
        let (start, end) = calculate_pagination(100, 2, 10).unwrap();
        assert_eq!(start, 10);
        assert_eq!(end, 20);
    }

    #[test]
    fn test_calculate_pagination_last_page() {
        let (start, end) = calculate_pagination(95, 10, 10).unwrap();
        assert_eq!(start, 90);
        assert_eq!(end, 95);
    }

    #[test]
    fn test_calculate_pagination_out_of_bounds() {
        let result = calculate_pagination(100, 20, 10);
        assert!(result.unwrap_err().contains("Page 20 is out of range"));
    }

    #[test]
    fn test_calculate_pagination_empty_list() {
        assert_eq!(calculate_pagination(0, 1, 10).unwrap(), (0, 0));
        assert!(calculate_pagination(0, 2, 10).is_err());
    }

    #[test]
    fn test_calculate_pagination_rejects_zero() {
        assert!(calculate_pagination(10, 0, 10).is_err());
        assert!(calculate_pagination(10, 1, 0).is_err());
    }

    #[test]
    fn test_calculate_pagination_huge_values() {
        let err = calculate_pagination(10, usize::MAX, 10).unwrap_err();
        assert!(err.contains("Only 1 pages available"));

        assert!(calculate_pagination(10, 2, usize::MAX).is_err());
        assert_eq!(calculate_pagination(10, 1, usize::MAX).unwrap(), (0, 10));
    }

    #[test]
    fn test_page_info_middle_page() {
        let info = page_info(45, 2, 20, "forumhub topics list");

        assert_eq!(info.total_pages, 3);
        assert_eq!(
            info.next_page_command.as_deref(),
            Some("forumhub topics list --page 3")
        );
        assert_eq!(
            info.prev_page_command.as_deref(),
            Some("forumhub topics list --page 1")
        );
    }

    #[test]
    fn test_page_info_single_page() {
        let info = page_info(0, 1, 20, "forumhub topics list");

        assert_eq!(info.total_pages, 1);
        assert!(info.next_page_command.is_none());
        assert!(info.prev_page_command.is_none());
    }
}
