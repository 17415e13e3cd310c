//! Parameter maps and scrubbing.
//!
//! A [`Params`] map mirrors decoded URL query parameters: each key maps to
//! the ordered list of values it was given. The map is untrusted input;
//! [`scrub`] is the single validation gate.

use std::collections::{HashMap, HashSet};

use crate::suffix::{is_valid_suffix, split_key, Suffix};

/// Decoded request parameters: key to ordered list of values.
pub type Params = HashMap<String, Vec<String>>;

/// Removes every key whose suffix is not in the reserved set.
///
/// This mutates the map in place; callers that need the original must copy
/// it first. Scrubbing is idempotent.
pub fn scrub(params: &mut Params) {
    params.retain(|key, _| {
        let (_, suffix) = split_key(key);
        is_valid_suffix(suffix)
    });
}

/// Rewrites the `OFF` parameter from the `LIM` and `PAGE` parameters.
///
/// The limit never drops below 5 and the page never below 1, so the
/// computed offset is always non-negative.
pub fn resolve_page(params: &mut Params) {
    let mut limit = 5;
    let parsed = param_value_int(params, Suffix::Limit.token());
    if parsed > limit {
        limit = parsed;
    }
    let mut page = 1;
    let parsed = param_value_int(params, Suffix::Page.token());
    if parsed > page {
        page = parsed;
    }
    let offset = limit * (page - 1);
    params.insert(Suffix::Offset.token().to_string(), vec![offset.to_string()]);
}

/// Returns the first value for `name`, or the empty string.
pub(crate) fn param_value<'a>(params: &'a Params, name: &str) -> &'a str {
    params
        .get(name)
        .and_then(|values| values.first())
        .map_or("", String::as_str)
}

/// Returns the first value for `name` parsed as an integer, or 0.
///
/// Parse failures deliberately degrade to 0 rather than erroring.
pub(crate) fn param_value_int(params: &Params, name: &str) -> i64 {
    param_value(params, name).parse().unwrap_or(0)
}

/// Deduplicates values, keeping the first occurrence of each.
pub(crate) fn dedup(values: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut deduped = Vec::new();
    for value in values {
        if seen.insert(value.as_str()) {
            deduped.push(value.clone());
        }
    }
    deduped
}

/// Returns a new list with empty strings removed.
pub(crate) fn remove_empty(values: &[String]) -> Vec<String> {
    values.iter().filter(|v| !v.is_empty()).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_scrub_drops_invalid_suffixes() {
        let mut params = Params::new();
        params.insert("SEL".to_string(), strings(&["a"]));
        params.insert("1.COL".to_string(), strings(&["name"]));
        params.insert("bogus".to_string(), strings(&["x"]));
        params.insert("1.DROP".to_string(), strings(&["y"]));

        scrub(&mut params);

        assert_eq!(params.len(), 2);
        assert!(params.contains_key("SEL"));
        assert!(params.contains_key("1.COL"));
    }

    #[test]
    fn test_scrub_keeps_offset_keys() {
        let mut params = Params::new();
        params.insert("OFF".to_string(), strings(&["10"]));
        scrub(&mut params);
        assert!(params.contains_key("OFF"));
    }

    #[test]
    fn test_scrub_is_idempotent() {
        let mut params = Params::new();
        params.insert("SEL".to_string(), strings(&["a"]));
        params.insert("junk".to_string(), strings(&["x"]));

        scrub(&mut params);
        let once = params.clone();
        scrub(&mut params);

        assert_eq!(params, once);
    }

    #[test]
    fn test_dedup_preserves_first_occurrence_order() {
        let deduped = dedup(&strings(&["b", "a", "b", "c", "a"]));
        assert_eq!(deduped, strings(&["b", "a", "c"]));
    }

    #[test]
    fn test_dedup_exact_matches_only() {
        let deduped = dedup(&strings(&["a", "A", "a "]));
        assert_eq!(deduped, strings(&["a", "A", "a "]));
    }

    #[test]
    fn test_remove_empty() {
        let purged = remove_empty(&strings(&["", "a", "", "b"]));
        assert_eq!(purged, strings(&["a", "b"]));
    }

    #[test]
    fn test_param_value_int_lenient() {
        let mut params = Params::new();
        params.insert("LIM".to_string(), strings(&["nope"]));
        assert_eq!(param_value_int(&params, "LIM"), 0);
        assert_eq!(param_value_int(&params, "OFF"), 0);
    }

    #[test]
    fn test_resolve_page_writes_offset() {
        let mut params = Params::new();
        params.insert("LIM".to_string(), strings(&["10"]));
        params.insert("PAGE".to_string(), strings(&["3"]));

        resolve_page(&mut params);

        assert_eq!(params.get("OFF"), Some(&strings(&["20"])));
    }

    #[test]
    fn test_resolve_page_defaults() {
        let mut params = Params::new();
        resolve_page(&mut params);
        assert_eq!(params.get("OFF"), Some(&strings(&["0"])));
    }
}
