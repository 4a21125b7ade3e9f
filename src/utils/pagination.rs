//! Pagination helpers

/// Row offset of a 1-based page.
///
/// Widens before multiplying: `page` comes straight from the query string,
/// so the product can exceed `u32`.
pub fn offset(page: u32, per_page: u32) -> i64 {
    (i64::from(page.max(1)) - 1) * i64::from(per_page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(offset(1, 20), 0);
        assert_eq!(offset(0, 20), 0);
    }

    #[test]
    fn later_pages_skip_whole_pages() {
        assert_eq!(offset(3, 20), 40);
        assert_eq!(offset(2, 100), 100);
    }

    #[test]
    #[allow(arithmetic_overflow)]
    fn huge_page_numbers_do_not_overflow() {
        assert_eq!(offset(50_000_000, 100), 4_999_999_900);
        assert_eq!(offset(u32::MAX, u32::MAX), (u32::MAX as i64 - 1) * u32::MAX as i64);
    }
}
