//! Colon-delimited path manipulation.
//!
//! A path addresses a value through nested stores: `"db:credentials:user"`
//! names the `user` key inside the `credentials` store inside the `db`
//! store. There is no escape mechanism, so a key name cannot contain a
//! literal `:`.

/// The path segment separator.
pub const SEPARATOR: char = ':';

/// Split a path into its first segment and the remaining suffix.
///
/// The suffix is `""` for a single-segment path, meaning the path is
/// terminal. Both halves borrow from the input.
///
/// # Examples
///
/// ```
/// use canopy_types::path::split_first;
///
/// assert_eq!(split_first("db:host"), ("db", "host"));
/// assert_eq!(split_first("db"), ("db", ""));
/// assert_eq!(split_first(""), ("", ""));
/// ```
pub fn split_first(path: &str) -> (&str, &str) {
    match path.split_once(SEPARATOR) {
        Some((first, rest)) => (first, rest),
        None => (path, ""),
    }
}

/// Recombine a first segment and suffix into a path.
///
/// Inverse of [`split_first`] for paths whose segments contain no separator.
pub fn join(first: &str, rest: &str) -> String {
    if rest.is_empty() {
        first.to_string()
    } else {
        format!("{first}{SEPARATOR}{rest}")
    }
}

/// Iterate over the segments of a path in order.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn split_multi_segment() {
        assert_eq!(split_first("a:b:c"), ("a", "b:c"));
    }

    #[test]
    fn split_single_segment_has_empty_rest() {
        assert_eq!(split_first("alone"), ("alone", ""));
    }

    #[test]
    fn split_empty_path() {
        assert_eq!(split_first(""), ("", ""));
    }

    #[test]
    fn join_with_empty_rest_is_first() {
        assert_eq!(join("a", ""), "a");
    }

    #[test]
    fn join_concatenates_with_separator() {
        assert_eq!(join("a", "b:c"), "a:b:c");
    }

    #[test]
    fn segments_in_order() {
        let segs: Vec<&str> = segments("a:b:c").collect();
        assert_eq!(segs, vec!["a", "b", "c"]);
    }

    proptest! {
        #[test]
        fn join_inverts_split(parts in prop::collection::vec("[a-z0-9_]{1,8}", 1..6)) {
            let path = parts.join(":");
            let (first, rest) = split_first(&path);
            prop_assert_eq!(join(first, rest), path.clone());
            prop_assert_eq!(first, parts[0].as_str());
        }

        #[test]
        fn segment_count_matches(parts in prop::collection::vec("[a-z0-9_]{1,8}", 1..6)) {
            let path = parts.join(":");
            prop_assert_eq!(segments(&path).count(), parts.len());
        }
    }
}
