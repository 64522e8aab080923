//! Descriptive input-validation errors with nearest-match suggestions.

use thiserror::Error;

/// At most this many options are spelled out in an error message.
const MAX_LISTED: usize = 8;

/// An invalid operator-supplied value.
///
/// Carries the offending value and where it came from; the message includes
/// an edit-distance "Did you mean" suggestion and a bounded listing of the
/// allowed option set. These errors are terminal for the artifact being
/// built and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InputError {
    value: String,
    location: String,
    message: String,
}

impl InputError {
    /// Creates an error for `value` found at `location`, given the allowed set.
    pub fn new(
        value: &str,
        location: &str,
        allowed: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
        let message = build_message(value, location, &allowed);
        Self {
            value: value.to_string(),
            location: location.to_string(),
            message,
        }
    }

    /// The offending value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The source location string.
    pub fn location(&self) -> &str {
        &self.location
    }
}

fn build_message(value: &str, location: &str, allowed: &[String]) -> String {
    let mut message = format!("invalid value `{value}` at {location}.");
    if let Some(suggestion) = closest(value, allowed) {
        message.push_str(&format!(" Did you mean `{suggestion}`?"));
    }
    let total = allowed.len();
    if total > 0 {
        let shown = total.min(MAX_LISTED);
        let listed = allowed[..shown].join(", ");
        if shown == total {
            message.push_str(&format!(" (Showing All {total} Options: {listed})"));
        } else {
            message.push_str(&format!(" (Showing {shown}/{total} Options: {listed})"));
        }
    }
    message
}

/// Returns the allowed option nearest to `value` by edit distance.
///
/// Ties resolve to the earliest option. Returns `None` when the set is empty
/// or nothing comes within half of `value`'s length (a suggestion further
/// away than that reads as noise, not help).
pub fn closest<'a, S: AsRef<str>>(value: &str, options: &'a [S]) -> Option<&'a str> {
    let cutoff = (value.chars().count() / 2).max(2);
    options
        .iter()
        .map(|option| (levenshtein(value, option.as_ref()), option.as_ref()))
        .filter(|(distance, _)| *distance <= cutoff)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, option)| option)
}

/// Classic two-row Levenshtein distance, case-insensitive.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().flat_map(char::to_lowercase).collect();
    let b: Vec<char> = b.chars().flat_map(char::to_lowercase).collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_basics() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("EROSION", "erosion"), 0);
    }

    #[test]
    fn test_closest_picks_nearest() {
        let options = ["EROSION", "DEPOSITION", "CAVE_CARVING"];
        assert_eq!(closest("EROSOIN", &options), Some("EROSION"));
        assert_eq!(closest("erosion", &options), Some("EROSION"));
    }

    #[test]
    fn test_closest_rejects_far_matches() {
        let options = ["EROSION", "DEPOSITION"];
        assert_eq!(closest("zzzzzzzz", &options), None);
    }

    #[test]
    fn test_message_shows_all_when_small() {
        let error = InputError::new(
            "EROSOIN",
            "pack.ron: world.preprocessors[0]",
            ["EROSION", "DEPOSITION", "CAVE_CARVING"],
        );
        let message = error.to_string();
        assert!(message.contains("invalid value `EROSOIN` at pack.ron: world.preprocessors[0]."));
        assert!(message.contains("Did you mean `EROSION`?"));
        assert!(message.contains("Showing All 3 Options: EROSION, DEPOSITION, CAVE_CARVING"));
    }

    #[test]
    fn test_message_bounds_large_sets() {
        let options: Vec<String> = (0..20).map(|i| format!("OPTION_{i}")).collect();
        let error = InputError::new("nope", "pack.ron: world.preprocessors[3]", options);
        let message = error.to_string();
        assert!(message.contains("Showing 8/20 Options:"));
        assert!(!message.contains("OPTION_9"));
    }

    #[test]
    fn test_message_without_suggestion() {
        let error = InputError::new("zzzz", "somewhere", ["EROSION"]);
        let message = error.to_string();
        assert!(!message.contains("Did you mean"));
        assert!(message.contains("Showing All 1 Options: EROSION"));
    }

    #[test]
    fn test_accessors() {
        let error = InputError::new("bad", "here", ["GOOD"]);
        assert_eq!(error.value(), "bad");
        assert_eq!(error.location(), "here");
    }
}
