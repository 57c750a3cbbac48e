//! Name suggestions for undefined tokens

/// Edit distance between two strings, counted in characters.
/// Keeps two rows of the table instead of the full matrix.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return a.len().max(b.len());
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitute = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitute.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Closest candidate within `threshold` edits.
///
/// Ties go to the candidate listed first, so callers pass a sorted list to
/// get a stable answer.
pub fn find_similar_name<'a>(name: &str, candidates: &[&'a str], threshold: usize) -> Option<&'a str> {
    candidates
        .iter()
        .map(|&candidate| (levenshtein_distance(name, candidate), candidate))
        .filter(|(distance, _)| *distance <= threshold)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate)
}

/// Suffix appended to an "undefined" message
pub fn format_suggestion_hint(suggestion: Option<&str>) -> String {
    suggestion
        .map(|name| format!("; did you mean `{name}`?"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein_distance("exch", "exch"), 0);
    }

    #[test]
    fn test_levenshtein_edits() {
        assert_eq!(levenshtein_distance("ad", "add"), 1);
        assert_eq!(levenshtein_distance("exhc", "exch"), 2);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("", "dup"), 3);
        assert_eq!(levenshtein_distance("pop", ""), 3);
    }

    #[test]
    fn test_levenshtein_counts_characters() {
        assert_eq!(levenshtein_distance("é", "e"), 1);
    }

    #[test]
    fn test_find_similar_name() {
        let names = ["add", "dup", "exch", "str_get"];
        assert_eq!(find_similar_name("ad", &names, 2), Some("add"));
        assert_eq!(find_similar_name("str_gte", &names, 2), Some("str_get"));
        assert_eq!(find_similar_name("banana", &names, 2), None);
    }

    #[test]
    fn test_find_similar_name_prefers_closest_then_first() {
        let names = ["mod", "mul", "neg"];
        assert_eq!(find_similar_name("mud", &names, 2), Some("mod"));
        assert_eq!(find_similar_name("mulx", &names, 2), Some("mul"));
    }

    #[test]
    fn test_format_suggestion_hint() {
        assert_eq!(format_suggestion_hint(Some("add")), "; did you mean `add`?");
        assert_eq!(format_suggestion_hint(None), "");
    }
}
