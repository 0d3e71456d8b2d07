/// Derives the normalized form of a vocabulary word.
///
/// The result is lowercased, trimmed and has internal whitespace runs collapsed
/// to a single space. It is used for duplicate detection and as the dictionary
/// cache key, never as an identifier.
pub fn normalize_word(word: &str) -> String {
    word.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(normalize_word("  Hello "), "hello");
        assert_eq!(normalize_word("Ice \t  Cream"), "ice cream");
        assert_eq!(normalize_word("ÉCOLE"), "école");
        assert_eq!(normalize_word(""), "");
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(normalize_word("Take Off"), normalize_word("take   off"));
    }
}
