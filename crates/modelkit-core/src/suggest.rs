use strsim::{damerau_levenshtein, jaro_winkler};

/// Minimum Jaro-Winkler similarity for a candidate to be suggested.
const MIN_SIMILARITY: f64 = 0.8;

/// Return the candidate closest to `input`, if any is close enough to be a
/// plausible typo.
///
/// Candidates are compared case-insensitively. A candidate qualifies when its
/// Jaro-Winkler similarity reaches [`MIN_SIMILARITY`] or its edit distance is at
/// most two; ties are broken by edit distance, then by candidate order.
pub fn closest_match<S: AsRef<str>>(input: &str, candidates: &[S]) -> Option<String> {
    let needle = input.to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let mut best: Option<(f64, usize, &str)> = None;
    for candidate in candidates {
        let candidate = candidate.as_ref();
        let lowered = candidate.to_lowercase();
        if lowered == needle {
            return Some(candidate.to_string());
        }

        let similarity = jaro_winkler(&needle, &lowered);
        let distance = damerau_levenshtein(&needle, &lowered);
        if similarity < MIN_SIMILARITY && distance > 2 {
            continue;
        }

        let better = match best {
            None => true,
            Some((best_similarity, best_distance, _)) => {
                distance < best_distance
                    || (distance == best_distance && similarity > best_similarity)
            }
        };
        if better {
            best = Some((similarity, distance, candidate));
        }
    }

    best.map(|(_, _, candidate)| candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::closest_match;

    #[test]
    fn suggests_transposed_letters() {
        let candidates = ["title", "published_at", "author"];
        assert_eq!(
            closest_match("publihsed_at", &candidates).as_deref(),
            Some("published_at")
        );
    }

    #[test]
    fn ignores_unrelated_names() {
        let candidates = ["title", "published_at", "author"];
        assert_eq!(closest_match("zzzzzz", &candidates), None);
    }

    #[test]
    fn matches_case_insensitively() {
        let candidates = ["Status"];
        assert_eq!(closest_match("status", &candidates).as_deref(), Some("Status"));
    }

    #[test]
    fn empty_input_has_no_suggestion() {
        let candidates = ["a"];
        assert_eq!(closest_match("", &candidates), None);
    }
}
