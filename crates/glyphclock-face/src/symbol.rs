use std::fmt;

/// A displayable character class with its own glyph animation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Symbol {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Colon,
    Space,
    /// The "AM" suffix, drawn as a single glyph.
    Am,
    /// The "PM" suffix, drawn as a single glyph.
    Pm,
}

impl Symbol {
    pub const ALL: [Symbol; 14] = [
        Symbol::Zero,
        Symbol::One,
        Symbol::Two,
        Symbol::Three,
        Symbol::Four,
        Symbol::Five,
        Symbol::Six,
        Symbol::Seven,
        Symbol::Eight,
        Symbol::Nine,
        Symbol::Colon,
        Symbol::Space,
        Symbol::Am,
        Symbol::Pm,
    ];

    /// Maps a clock-string character to its symbol.
    ///
    /// `A` and `P` stand for the AM/PM suffix; every other letter (including
    /// the trailing `M`) has no glyph.
    pub fn from_char(c: char) -> Option<Symbol> {
        let s = match c {
            '0' => Symbol::Zero,
            '1' => Symbol::One,
            '2' => Symbol::Two,
            '3' => Symbol::Three,
            '4' => Symbol::Four,
            '5' => Symbol::Five,
            '6' => Symbol::Six,
            '7' => Symbol::Seven,
            '8' => Symbol::Eight,
            '9' => Symbol::Nine,
            ':' => Symbol::Colon,
            ' ' => Symbol::Space,
            'A' => Symbol::Am,
            'P' => Symbol::Pm,
            _ => return None,
        };
        Some(s)
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::Zero => '0',
            Symbol::One => '1',
            Symbol::Two => '2',
            Symbol::Three => '3',
            Symbol::Four => '4',
            Symbol::Five => '5',
            Symbol::Six => '6',
            Symbol::Seven => '7',
            Symbol::Eight => '8',
            Symbol::Nine => '9',
            Symbol::Colon => ':',
            Symbol::Space => ' ',
            Symbol::Am => 'A',
            Symbol::Pm => 'P',
        }
    }

    /// Directory holding this symbol's frames under a glyph root.
    ///
    /// Colon and space get spelled-out names so the layout works on every
    /// filesystem.
    pub fn folder_name(self) -> &'static str {
        match self {
            Symbol::Zero => "0",
            Symbol::One => "1",
            Symbol::Two => "2",
            Symbol::Three => "3",
            Symbol::Four => "4",
            Symbol::Five => "5",
            Symbol::Six => "6",
            Symbol::Seven => "7",
            Symbol::Eight => "8",
            Symbol::Nine => "9",
            Symbol::Colon => "colon",
            Symbol::Space => "space",
            Symbol::Am => "A",
            Symbol::Pm => "P",
        }
    }

    pub fn from_folder_name(name: &str) -> Option<Symbol> {
        Symbol::ALL.into_iter().find(|s| s.folder_name() == name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.as_char())
    }
}
