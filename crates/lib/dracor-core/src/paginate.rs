//! Pagination of full result lists into context-budget-friendly batches.
//!
//! The DraCor API has no server-side paging for the endpoints the paged
//! helper tools wrap, so the full list is fetched and sliced here. Paging is
//! one-based; `page == 0` together with `items_per_page == 0` means "return
//! everything".

use std::{error::Error, fmt};

use serde::Serialize;

/// Descriptor accompanying every paged result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// Error type for invalid page requests.
#[derive(Debug, PartialEq, Eq)]
pub enum PaginateError {
    /// Exactly one of `items_per_page` and `page` was zero. Only the pair
    /// (0, 0) is a valid request for the whole collection.
    InvalidPageRequest { items_per_page: usize, page: usize },
}

impl fmt::Display for PaginateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPageRequest { items_per_page, page } => write!(
                f,
                "invalid page request: items_per_page={items_per_page}, page={page}; \
                 set both to 0 to retrieve everything, or both to positive values"
            ),
        }
    }
}

impl Error for PaginateError {}

/// Slices `items` into the requested page and computes the descriptor.
///
/// With `items_per_page == 0` and `page == 0` the entire collection is
/// returned as a single page. A page past the end yields an empty slice, not
/// an error.
///
/// # Errors
/// Returns `PaginateError::InvalidPageRequest` when exactly one of the two
/// parameters is zero.
pub fn paginate<T: Clone>(
    items: &[T],
    items_per_page: usize,
    page: usize,
) -> Result<(Vec<T>, Pagination), PaginateError> {
    if items_per_page == 0 && page == 0 {
        return Ok((
            items.to_vec(),
            Pagination {
                current_page: 1,
                items_per_page: items.len(),
                total_items: items.len(),
                total_pages: 1,
                has_next_page: false,
                has_previous_page: false,
            },
        ));
    }
    if items_per_page == 0 || page == 0 {
        return Err(PaginateError::InvalidPageRequest { items_per_page, page });
    }

    let total_items = items.len();
    let total_pages = total_items.div_ceil(items_per_page);
    let start = (page - 1).saturating_mul(items_per_page);
    let slice: Vec<T> = items.iter().skip(start).take(items_per_page).cloned().collect();

    Ok((
        slice,
        Pagination {
            current_page: page,
            items_per_page,
            total_items,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_zero_returns_everything() {
        let items: Vec<usize> = (0..7).collect();
        let (slice, pagination) = paginate(&items, 0, 0).unwrap();
        assert_eq!(slice, items);
        assert_eq!(
            pagination,
            Pagination {
                current_page: 1,
                items_per_page: 7,
                total_items: 7,
                total_pages: 1,
                has_next_page: false,
                has_previous_page: false,
            }
        );
    }

    #[test]
    fn pages_reconstruct_the_collection_exactly_once() {
        let items: Vec<usize> = (0..23).collect();
        for per_page in 1..=25 {
            let (_, first) = paginate(&items, per_page, 1).unwrap();
            let mut rebuilt = Vec::new();
            for page in 1..=first.total_pages {
                let (slice, _) = paginate(&items, per_page, page).unwrap();
                rebuilt.extend(slice);
            }
            assert_eq!(rebuilt, items, "items_per_page={per_page}");
        }
    }

    #[test]
    fn descriptor_flags_follow_the_page_position() {
        let items: Vec<usize> = (0..10).collect();
        let (_, first) = paginate(&items, 4, 1).unwrap();
        assert!(first.has_next_page);
        assert!(!first.has_previous_page);

        let (last_slice, last) = paginate(&items, 4, 3).unwrap();
        assert_eq!(last_slice, vec![8, 9]);
        assert_eq!(last.total_pages, 3);
        assert!(!last.has_next_page);
        assert!(last.has_previous_page);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let items: Vec<usize> = (0..3).collect();
        let (slice, pagination) = paginate(&items, 2, 5).unwrap();
        assert!(slice.is_empty());
        assert!(!pagination.has_next_page);
        assert!(pagination.has_previous_page);
    }

    #[test]
    fn single_zero_parameter_is_rejected() {
        let items = [1, 2, 3];
        assert_eq!(
            paginate(&items, 0, 2),
            Err(PaginateError::InvalidPageRequest { items_per_page: 0, page: 2 })
        );
        assert_eq!(
            paginate(&items, 10, 0),
            Err(PaginateError::InvalidPageRequest { items_per_page: 10, page: 0 })
        );
    }

    #[test]
    fn empty_collection_paginates_to_nothing() {
        let items: Vec<usize> = Vec::new();
        let (slice, pagination) = paginate(&items, 5, 1).unwrap();
        assert!(slice.is_empty());
        assert_eq!(pagination.total_pages, 0);
        assert!(!pagination.has_next_page);
    }
}
