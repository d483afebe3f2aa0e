/// One curriculum level: the items drilled at that level and an optional
/// message shown while it is active. Items are either a single symbol or a
/// whole word keyed letter by letter.
#[derive(Clone, Copy, Debug)]
pub struct LevelDefinition {
    pub items: &'static [&'static str],
    pub message: &'static str,
}

/// The reference curriculum. Levels are cumulative — each letter level
/// re-drills everything learned so far plus two new symbols — except the
/// word level near the end. The final level is empty on purpose: reaching
/// it is the win condition.
pub const LEVELS: &[LevelDefinition] = &[
    LevelDefinition { items: &["e", "t"], message: "" },
    LevelDefinition {
        items: &["e", "t", "a", "n"],
        message: "With a few simple letters, you can already start to send messages",
    },
    LevelDefinition { items: &["e", "t", "a", "n", "i", "s"], message: "" },
    LevelDefinition { items: &["e", "t", "a", "n", "i", "s", "o", "h"], message: "" },
    LevelDefinition {
        items: &["e", "t", "a", "n", "i", "s", "o", "h", "r", "d"],
        message: "",
    },
    LevelDefinition {
        items: &["e", "t", "a", "n", "i", "s", "o", "h", "r", "d", "l", "u"],
        message: "",
    },
    LevelDefinition {
        items: &["e", "t", "a", "n", "i", "s", "o", "h", "r", "d", "l", "u", "c", "m"],
        message: "",
    },
    LevelDefinition {
        items: &[
            "e", "t", "a", "n", "i", "s", "o", "h", "r", "d", "l", "u", "c", "m", "f", "w",
        ],
        message: "",
    },
    LevelDefinition {
        items: &[
            "e", "t", "a", "n", "i", "s", "o", "h", "r", "d", "l", "u", "c", "m", "f", "w",
            "y", "g",
        ],
        message: "",
    },
    LevelDefinition {
        items: &[
            "e", "t", "a", "n", "i", "s", "o", "h", "r", "d", "l", "u", "c", "m", "f", "w",
            "y", "g", "p", "b",
        ],
        message: "",
    },
    LevelDefinition {
        items: &[
            "e", "t", "a", "n", "i", "s", "o", "h", "r", "d", "l", "u", "c", "m", "f", "w",
            "y", "g", "p", "b", "v", "k",
        ],
        message: "",
    },
    LevelDefinition {
        items: &[
            "e", "t", "a", "n", "i", "s", "o", "h", "r", "d", "l", "u", "c", "m", "f", "w",
            "y", "g", "p", "b", "v", "k", "q", "j",
        ],
        message: "",
    },
    LevelDefinition {
        items: &[
            "e", "t", "a", "n", "i", "s", "o", "h", "r", "d", "l", "u", "c", "m", "f", "w",
            "y", "g", "p", "b", "v", "k", "q", "j", "x", "z",
        ],
        message: "",
    },
    LevelDefinition {
        items: &[
            "e", "t", "a", "n", "i", "s", "o", "h", "r", "d", "l", "u", "c", "m", "f", "w",
            "y", "g", "p", "b", "v", "k", "q", "j", "x", "z", ".", ",",
        ],
        message: "",
    },
    LevelDefinition {
        items: &["sos", "taco"],
        message: "'Save Our Ship', is a common acronym. It means, 'Help me!'",
    },
    LevelDefinition { items: &[], message: "" },
];

/// What comes after a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelStep {
    Next(usize),
    AllComplete,
}

pub fn level_count() -> usize {
    LEVELS.len()
}

/// Items for a 1-based level number; `None` out of range.
pub fn items_for_level(level: usize) -> Option<&'static [&'static str]> {
    LEVELS.get(level.checked_sub(1)?).map(|def| def.items)
}

pub fn unlock_message(level: usize) -> &'static str {
    level
        .checked_sub(1)
        .and_then(|i| LEVELS.get(i))
        .map(|def| def.message)
        .unwrap_or("")
}

/// A level with nothing to drill is terminal.
pub fn is_terminal(level: usize) -> bool {
    items_for_level(level).is_some_and(|items| items.is_empty())
}

/// Saturates at the last level with a distinct signal instead of walking
/// past the end of the table.
pub fn next_level(level: usize) -> LevelStep {
    if level < level_count() {
        LevelStep::Next(level + 1)
    } else {
        LevelStep::AllComplete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixteen_levels() {
        assert_eq!(level_count(), 16);
    }

    #[test]
    fn test_first_level_teaches_e_and_t() {
        assert_eq!(items_for_level(1), Some(&["e", "t"][..]));
    }

    #[test]
    fn test_levels_are_cumulative_through_fourteen() {
        for level in 2..=14 {
            let prev = items_for_level(level - 1).unwrap();
            let cur = items_for_level(level).unwrap();
            assert_eq!(cur.len(), prev.len() + 2, "level {level}");
            assert_eq!(&cur[..prev.len()], prev, "level {level} prefix");
        }
    }

    #[test]
    fn test_word_level_items() {
        assert_eq!(items_for_level(15), Some(&["sos", "taco"][..]));
    }

    #[test]
    fn test_last_level_is_terminal() {
        assert!(is_terminal(16));
        assert!(!is_terminal(15));
        assert!(!is_terminal(1));
    }

    #[test]
    fn test_out_of_range_levels() {
        assert_eq!(items_for_level(0), None);
        assert_eq!(items_for_level(17), None);
        assert!(!is_terminal(0));
        assert_eq!(unlock_message(99), "");
    }

    #[test]
    fn test_next_level_saturates_with_signal() {
        assert_eq!(next_level(1), LevelStep::Next(2));
        assert_eq!(next_level(15), LevelStep::Next(16));
        assert_eq!(next_level(16), LevelStep::AllComplete);
    }

    #[test]
    fn test_all_items_use_supported_symbols() {
        for def in LEVELS {
            for item in def.items {
                for ch in item.chars() {
                    assert!(
                        crate::morse::alphabet::is_supported(ch),
                        "item {item:?} uses unsupported {ch:?}"
                    );
                }
            }
        }
    }
}
