use serde::Serialize;

use crate::cases::fields::CaseTuple;
use crate::models::case::CaseRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub from: i64,
    pub to: i64,
    pub number: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageResponse {
    pub data: Vec<CaseTuple>,
    pub pages: PageInfo,
}

/// Resolves a 1-based page number; negatives count from the end (-1 is the last page).
pub fn resolve_page(page_number: i64, total: usize, page_size: usize) -> i64 {
    if page_number < 0 {
        let page_count = total.div_ceil(page_size) as i64;
        page_count.saturating_add(page_number).saturating_add(1)
    } else {
        page_number
    }
}

/// Slices one page out of an already ordered list.
/// Returns the slice and its paging metadata.
pub fn paginate<T>(items: &[T], page_number: i64, page_size: usize) -> (&[T], PageInfo) {
    let total = items.len() as i64;
    let size = page_size as i64;
    let number = resolve_page(page_number, items.len(), page_size);
    // Saturates on absurd page numbers, which then land out of range.
    let offset = number.saturating_sub(1).saturating_mul(size);
    let end = offset.saturating_add(size);

    let slice = if offset < 0 || offset >= total {
        &items[..0]
    } else {
        let start = offset as usize;
        &items[start..end.min(total) as usize]
    };

    let info = PageInfo {
        from: if total > 0 { offset.saturating_add(1) } else { 0 },
        to: if end > total { total } else { end },
        number,
        total,
    };
    (slice, info)
}

/// Builds the JSON page, substituting one placeholder row for an empty slice.
pub fn page_response(records: &[CaseRecord], page_number: i64, page_size: usize) -> PageResponse {
    let (slice, pages) = paginate(records, page_number, page_size);
    let mut data: Vec<CaseTuple> = slice
        .iter()
        .map(|record| CaseTuple::from_record(Some(record)))
        .collect();
    if data.is_empty() {
        data.push(CaseTuple::from_record(None));
    }
    PageResponse { data, pages }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_from_negative() {
        let items: Vec<i32> = (1..=23).collect();
        let (slice, info) = paginate(&items, -1, 10);
        assert_eq!(slice, &[21, 22, 23]);
        assert_eq!(info.from, 21);
        assert_eq!(info.to, 23);
        assert_eq!(info.number, 3);
        assert_eq!(info.total, 23);
    }

    #[test]
    fn test_pages_cover_every_item_once() {
        for total in 0..40 {
            for size in 1..12 {
                let items: Vec<usize> = (0..total).collect();
                let page_count = total.div_ceil(size) as i64;
                let mut seen = Vec::new();
                for page in 1..=page_count {
                    let (slice, _) = paginate(&items, page, size);
                    seen.extend_from_slice(slice);
                }
                assert_eq!(seen, items, "total={total} size={size}");
            }
        }
    }

    #[test]
    fn test_negative_pages_mirror_positive() {
        let items: Vec<u32> = (0..47).collect();
        let page_count = 5;
        for k in 1..=page_count {
            let (neg, neg_info) = paginate(&items, -k, 10);
            let (pos, pos_info) = paginate(&items, page_count - k + 1, 10);
            assert_eq!(neg, pos);
            assert_eq!(neg_info, pos_info);
        }
    }

    #[test]
    fn test_out_of_range_pages_are_empty() {
        let items: Vec<u32> = (0..5).collect();
        assert!(paginate(&items, 0, 10).0.is_empty());
        assert!(paginate(&items, 2, 10).0.is_empty());
        assert!(paginate(&items, -3, 10).0.is_empty());
    }

    #[test]
    fn test_extreme_page_numbers_are_empty() {
        let items: Vec<u32> = (0..5).collect();
        for page in [i64::MAX, i64::MIN, i64::MIN + 1, i64::MAX / 10 + 1] {
            let (slice, info) = paginate(&items, page, 10);
            assert!(slice.is_empty(), "page={page}");
            assert_eq!(info.total, 5);
        }
        let response = page_response(&[], i64::MIN, 10);
        assert_eq!(response.data, vec![CaseTuple::default()]);
    }

    #[test]
    fn test_empty_store_metadata() {
        let items: Vec<u32> = Vec::new();
        let (slice, info) = paginate(&items, 1, 10);
        assert!(slice.is_empty());
        assert_eq!(info.from, 0);
        assert_eq!(info.to, 0);
        assert_eq!(info.total, 0);
    }

    #[test]
    fn test_empty_page_gets_placeholder_row() {
        let response = page_response(&[], 1, 10);
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0], CaseTuple::default());
    }
}
