//! Longest-common-substring text similarity used for match scoring.
//!
//! The algorithm finds the longest common substring between two strings,
//! then recurses on the left and right remainders around the match and
//! sums the matched lengths. The percentage is the matched total over the
//! combined length of both inputs.

/// Number of matching characters between `a` and `b`
pub fn similar_chars(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    sim(&a, &b)
}

/// Similarity of `a` and `b` as a percentage of their combined length.
///
/// Two empty strings are 0% similar, not 100%.
pub fn similarity_percent(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let combined = a.len() + b.len();
    if combined == 0 {
        return 0.0;
    }
    sim(&a, &b) as f64 * 2.0 * 100.0 / combined as f64
}

fn sim(a: &[char], b: &[char]) -> usize {
    let mut best_a = 0;
    let mut best_b = 0;
    let mut best_len = 0;

    // First longest common substring wins ties: outer scan over `a`,
    // inner over `b`.
    for i in 0..a.len() {
        for j in 0..b.len() {
            let mut len = 0;
            while i + len < a.len() && j + len < b.len() && a[i + len] == b[j + len] {
                len += 1;
            }
            if len > best_len {
                best_len = len;
                best_a = i;
                best_b = j;
            }
        }
    }

    if best_len == 0 {
        return 0;
    }

    best_len
        + sim(&a[..best_a], &b[..best_b])
        + sim(&a[best_a + best_len..], &b[best_b + best_len..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_are_fully_similar() {
        assert_eq!(similar_chars("honorarios advocaticios", "honorarios advocaticios"), 23);
        assert!((similarity_percent("abc", "abc") - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn disjoint_strings_share_nothing() {
        assert_eq!(similar_chars("abc", "xyz"), 0);
        assert_eq!(similarity_percent("abc", "xyz"), 0.0);
    }

    #[test]
    fn world_word_matches_four_characters() {
        // "Wor" is the longest common substring, then "d" on the right
        assert_eq!(similar_chars("World", "Word"), 4);
        let percent = similarity_percent("World", "Word");
        assert!((percent - 400.0 / 4.5).abs() < 1e-9, "got {percent}");
    }

    #[test]
    fn empty_inputs_yield_zero() {
        assert_eq!(similar_chars("", "anything"), 0);
        assert_eq!(similarity_percent("", ""), 0.0);
        assert_eq!(similarity_percent("", "abc"), 0.0);
    }

    #[test]
    fn recursion_counts_both_sides_of_the_split() {
        // Longest common substring is "tarifa "; the right remainders
        // still share "banc"
        assert_eq!(similar_chars("tarifa bancaria", "tarifa banco"), 11);
        // "ab" matches first, then "cd" in the right remainders
        assert_eq!(similar_chars("abXcd", "abYcd"), 4);
    }
}
