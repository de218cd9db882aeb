//! Category selection - one representative class symbol per publication

use patnet_domain::Category;

/// Class symbol of a classification code URI
///
/// Takes the last path segment, drops its final character and returns the
/// first remaining one, so `.../G06F0001000000` yields `G`. Segments shorter
/// than two characters yield nothing, and neither does a whitespace symbol,
/// which could not be written as an edge label.
pub fn class_symbol(code: &str) -> Option<char> {
    let segment = code.rsplit('/').next().unwrap_or(code);
    let mut chars = segment.chars();
    chars.next_back();
    chars.next().filter(|symbol| !symbol.is_whitespace())
}

/// Most frequent class symbol among `codes`
///
/// Ties go to the symbol that appeared first. Codes without a symbol are
/// ignored; `None` when no code has one.
pub fn select_category<S: AsRef<str>>(codes: &[S]) -> Option<Category> {
    let mut counts: Vec<(char, usize)> = Vec::new();
    for symbol in codes.iter().filter_map(|code| class_symbol(code.as_ref())) {
        match counts.iter_mut().find(|(seen, _)| *seen == symbol) {
            Some((_, count)) => *count += 1,
            None => counts.push((symbol, 1)),
        }
    }

    let mut best: Option<(char, usize)> = None;
    for (symbol, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((symbol, count));
        }
    }
    best.map(|(symbol, _)| Category::new(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_symbol() {
        assert_eq!(class_symbol("http://data.epo.org/linked-data/def/ipc/G06F0001000000"), Some('G'));
        assert_eq!(class_symbol("A1"), Some('A'));
        assert_eq!(class_symbol("A"), None);
        assert_eq!(class_symbol("http://x/"), None);
    }

    #[test]
    fn test_whitespace_symbol_is_ignored() {
        assert_eq!(class_symbol(" 1"), None);
        assert_eq!(class_symbol("http://x/\t1"), None);
        assert_eq!(select_category(&[" 1", " 2", "A1"]), Some(Category::new('A')));
        assert_eq!(select_category(&[" 1"]), None);
    }

    #[test]
    fn test_mode() {
        assert_eq!(select_category(&["A1", "A2", "B1"]), Some(Category::new('A')));
        assert_eq!(select_category(&["F1", "G2", "G3"]), Some(Category::new('G')));
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        assert_eq!(select_category(&["A1", "B1"]), Some(Category::new('A')));
        assert_eq!(select_category(&["B1", "A1"]), Some(Category::new('B')));
        assert_eq!(select_category(&["B1", "A1", "A2", "B2"]), Some(Category::new('B')));
        for _ in 0..10 {
            assert_eq!(select_category(&["C1", "D1"]), Some(Category::new('C')));
        }
    }

    #[test]
    fn test_empty_and_unusable_codes() {
        let none: [&str; 0] = [];
        assert_eq!(select_category(&none), None);
        assert_eq!(select_category(&["X", "http://y/"]), None);
        assert_eq!(select_category(&["X", "H1"]), Some(Category::new('H')));
    }
}
