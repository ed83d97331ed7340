//! Duplicate detection over ordered name lists.

use std::collections::HashSet;
use std::hash::Hash;

/// Return every value that occurs more than once, each reported once.
///
/// Output order is the order in which each value was first seen repeating.
/// Comparison is exact equality with no normalization, so `"Api"` and `"api"`
/// are distinct.
///
/// # Examples
///
/// ```
/// use apimlint_cli::validation::find_duplicates;
///
/// assert_eq!(find_duplicates(["a", "b", "a", "c", "b", "b"]), vec!["a", "b"]);
/// assert!(find_duplicates(["x", "y"]).is_empty());
/// ```
pub fn find_duplicates<T, I>(items: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for item in items {
        if !seen.insert(item.clone()) && reported.insert(item.clone()) {
            duplicates.push(item);
        }
    }

    duplicates
}
