// String list helpers used to match and clean up user-facing options.

use std::collections::HashSet;

/// Index of the first exact match of `needle` in `list`.
pub fn string_in_slice(needle: &str, list: &[String]) -> Option<usize> {
    list.iter().position(|s| s == needle)
}

/// Index of the first match of `needle` in `list`, ignoring case.
pub fn string_in_slice_case_insensitive(needle: &str, list: &[String]) -> Option<usize> {
    let needle = needle.to_lowercase();
    list.iter().position(|s| s.to_lowercase() == needle)
}

/// Whether `substr` appears in `s`, ignoring case.
pub fn case_insensitive_contains(s: &str, substr: &str) -> bool {
    s.to_lowercase().contains(&substr.to_lowercase())
}

/// Remove duplicates and empty strings from `options` in place, keeping the
/// first occurrence of each value. Values in `also_remove` are dropped too.
pub fn remove_duplicates(options: &mut Vec<String>, also_remove: &[&str]) {
    let mut seen: HashSet<String> = also_remove.iter().map(|s| s.to_string()).collect();
    options.retain(|o| !o.is_empty() && seen.insert(o.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn finds_exact_matches_only() {
        let candidates = strings(&["one", "two"]);
        assert_eq!(string_in_slice("one", &candidates), Some(0));
        assert_eq!(string_in_slice("two", &candidates), Some(1));
        assert_eq!(string_in_slice("One", &candidates), None);
    }

    #[test]
    fn finds_matches_regardless_of_case() {
        let candidates = strings(&["Dune", "Hyperion"]);
        assert_eq!(string_in_slice_case_insensitive("hyperion", &candidates), Some(1));
        assert_eq!(string_in_slice_case_insensitive("Foundation", &candidates), None);
    }

    #[test]
    fn contains_ignores_case() {
        assert!(case_insensitive_contains("TestString", "test"));
        assert!(case_insensitive_contains("TestString", "stSt"));
        assert!(!case_insensitive_contains("TestString", "teest"));
    }

    #[test]
    fn remove_duplicates_keeps_first_occurrence() {
        let mut options = strings(&["b", "a", "", "b", "c", "a"]);
        remove_duplicates(&mut options, &[]);
        assert_eq!(options, strings(&["b", "a", "c"]));
    }

    #[test]
    fn remove_duplicates_drops_extra_values() {
        let mut options = strings(&["Unknown", "Asimov", "unknown", "Asimov"]);
        remove_duplicates(&mut options, &["Unknown"]);
        assert_eq!(options, strings(&["Asimov", "unknown"]));
    }
}
