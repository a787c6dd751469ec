//! `YYYY-MM-DD` dates embedded in filenames.

use core::cmp::Ordering;

const DATE_LEN: usize = 10;

/// First `YYYY-MM-DD` substring of `name`, if any.
///
/// Matches the digit/dash shape only; `2024-13-99` is accepted the same way
/// a plain pattern match would accept it.
///
/// ```
/// use zengallery::date::find_date;
///
/// assert_eq!(find_date("assets/photo-2024-03-05.webp"), Some("2024-03-05"));
/// assert_eq!(find_date("photo.gif"), None);
/// ```
pub fn find_date(name: &str) -> Option<&str> {
    let bytes = name.as_bytes();
    if bytes.len() < DATE_LEN {
        return None;
    }
    (0..=bytes.len() - DATE_LEN)
        .find(|&i| is_date(&bytes[i..i + DATE_LEN]))
        // The matched window is ASCII, so these are char boundaries.
        .map(|i| &name[i..i + DATE_LEN])
}

fn is_date(window: &[u8]) -> bool {
    window.iter().enumerate().all(|(i, &b)| match i {
        4 | 7 => b == b'-',
        _ => b.is_ascii_digit(),
    })
}

/// Whether `name` embeds exactly the date `day` (`YYYY-MM-DD`).
pub fn matches_day(name: &str, day: &str) -> bool {
    find_date(name) == Some(day)
}

/// Manifest ordering: by embedded date, then by whole name.
///
/// Names without a date use the whole name as the primary key, so the
/// ordering stays total when dated and undated names are mixed.
pub fn compare_by_date(a: &str, b: &str) -> Ordering {
    let key_a = find_date(a).unwrap_or(a);
    let key_b = find_date(b).unwrap_or(b);
    key_a.cmp(key_b).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn finds_leftmost_date() {
        assert_eq!(find_date("2023-12-31_to_2024-01-01.gif"), Some("2023-12-31"));
        assert_eq!(find_date("x2024-01-01"), Some("2024-01-01"));
        assert_eq!(find_date("2024-01-01"), Some("2024-01-01"));
    }

    #[test]
    fn rejects_near_misses() {
        assert_eq!(find_date("2024-1-01.gif"), None);
        assert_eq!(find_date("2024_01_01.gif"), None);
        assert_eq!(find_date("20240101"), None);
        assert_eq!(find_date(""), None);
    }

    #[test]
    fn handles_multibyte_names() {
        assert_eq!(find_date("été-2024-07-14.webp"), Some("2024-07-14"));
        assert_eq!(find_date("写真"), None);
    }

    #[test]
    fn day_match() {
        assert!(matches_day("photo-2024-03-05.webp", "2024-03-05"));
        assert!(!matches_day("photo-2024-01-01.gif", "2024-03-05"));
        assert!(!matches_day("photo.gif", "2024-03-05"));
    }

    #[test]
    fn sorts_by_embedded_date() {
        let mut names: Vec<&str> = vec![
            "z-2024-03-05.gif",
            "a-2024-03-06.gif",
            "m-2023-12-25.webp",
        ];
        names.sort_by(|a, b| compare_by_date(a, b));
        assert_eq!(
            names,
            ["m-2023-12-25.webp", "z-2024-03-05.gif", "a-2024-03-06.gif"]
        );
    }

    #[test]
    fn undated_names_sort_lexically() {
        let mut names: Vec<&str> = vec!["b.gif", "a.gif", "c.webp"];
        names.sort_by(|a, b| compare_by_date(a, b));
        assert_eq!(names, ["a.gif", "b.gif", "c.webp"]);
    }

    #[test]
    fn dated_names_compare_by_date_against_undated() {
        let mut names: Vec<&str> = vec!["b.gif", "z-2024-01-01.gif", "a.gif"];
        names.sort_by(|a, b| compare_by_date(a, b));
        assert_eq!(names, ["z-2024-01-01.gif", "a.gif", "b.gif"]);
    }

    #[test]
    fn same_date_breaks_ties_by_name() {
        assert_eq!(
            compare_by_date("b-2024-01-01.gif", "a-2024-01-01.gif"),
            Ordering::Greater
        );
    }
}
