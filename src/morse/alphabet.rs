/// A single Morse mark. A dit is one timing unit, a dah is three; the gaps
/// around marks are the timing model's concern, not the mark's.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element {
    Dit,
    Dah,
}

impl Element {
    pub const fn duration_units(self) -> u32 {
        match self {
            Element::Dit => 1,
            Element::Dah => 3,
        }
    }

    pub fn from_mark(mark: char) -> Option<Self> {
        match mark {
            '.' => Some(Element::Dit),
            '-' => Some(Element::Dah),
            _ => None,
        }
    }
}

/// Supported alphabet in display order: the letters in frequency-ish
/// curriculum order would scatter the grid, so the table stays a–z first,
/// punctuation last. The `.` code is the one the curriculum teaches, kept
/// as-is even though it differs from ITU.
pub const MORSE_TABLE: &[(char, &str)] = &[
    ('a', ".-"),
    ('b', "-..."),
    ('c', "-.-."),
    ('d', "-.."),
    ('e', "."),
    ('f', "..-."),
    ('g', "--."),
    ('h', "...."),
    ('i', ".."),
    ('j', ".---"),
    ('k', "-.-"),
    ('l', ".-.."),
    ('m', "--"),
    ('n', "-."),
    ('o', "---"),
    ('p', ".--."),
    ('q', "--.-"),
    ('r', ".-."),
    ('s', "..."),
    ('t', "-"),
    ('u', "..-"),
    ('v', "...-"),
    ('w', ".--"),
    ('x', "-..-"),
    ('y', "-.--"),
    ('z', "--.."),
    ('.', ".--.-."),
    (',', "--..--"),
];

/// Look up the code for a character, ASCII case-insensitively.
pub fn code_for(ch: char) -> Option<&'static str> {
    let ch = ch.to_ascii_lowercase();
    MORSE_TABLE
        .iter()
        .find(|(sym, _)| *sym == ch)
        .map(|(_, code)| *code)
}

pub fn is_supported(ch: char) -> bool {
    code_for(ch).is_some()
}

/// All supported symbols in table order.
pub fn symbols() -> impl Iterator<Item = char> {
    MORSE_TABLE.iter().map(|(sym, _)| *sym)
}

/// The marks of a code string. Anything that is not a `.` or `-` is skipped
/// so a junk code degrades to fewer (or zero) marks instead of an error.
pub fn elements_of(code: &str) -> impl Iterator<Item = Element> + '_ {
    code.chars().filter_map(Element::from_mark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_for_known_symbols() {
        assert_eq!(code_for('e'), Some("."));
        assert_eq!(code_for('t'), Some("-"));
        assert_eq!(code_for('u'), Some("..-"));
        assert_eq!(code_for(','), Some("--..--"));
    }

    #[test]
    fn test_code_for_is_case_insensitive() {
        assert_eq!(code_for('S'), code_for('s'));
        assert_eq!(code_for('Q'), Some("--.-"));
    }

    #[test]
    fn test_unsupported_symbols() {
        assert_eq!(code_for('#'), None);
        assert_eq!(code_for('0'), None);
        assert_eq!(code_for(' '), None);
        assert!(!is_supported('?'));
    }

    #[test]
    fn test_table_covers_letters_and_punctuation() {
        assert_eq!(MORSE_TABLE.len(), 28);
        for ch in 'a'..='z' {
            assert!(is_supported(ch), "missing letter {ch}");
        }
        assert!(is_supported('.'));
        assert!(is_supported(','));
    }

    #[test]
    fn test_elements_of_parses_marks() {
        let marks: Vec<Element> = elements_of("..-").collect();
        assert_eq!(marks, vec![Element::Dit, Element::Dit, Element::Dah]);
    }

    #[test]
    fn test_elements_of_skips_junk_marks() {
        let marks: Vec<Element> = elements_of(".x-").collect();
        assert_eq!(marks, vec![Element::Dit, Element::Dah]);
        assert_eq!(elements_of("abc").count(), 0);
    }

    #[test]
    fn test_duration_units() {
        assert_eq!(Element::Dit.duration_units(), 1);
        assert_eq!(Element::Dah.duration_units(), 3);
    }
}
