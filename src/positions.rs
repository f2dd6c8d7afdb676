// src/positions.rs
// Playing positions in the site's fixed order, in four spellings.

use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    Goalkeeper,
    CentreBack,
    LeftBack,
    RightBack,
    LeftMidfield,
    RightMidfield,
    DefensiveMidfield,
    CentralMidfield,
    AttackingMidfield,
    SecondStriker,
    LeftWinger,
    RightWinger,
    CentreForward,
}

use Position::*;

impl Position {
    pub const ALL: [Position; 13] = [
        Goalkeeper, CentreBack, LeftBack, RightBack, LeftMidfield, RightMidfield,
        DefensiveMidfield, CentralMidfield, AttackingMidfield, SecondStriker,
        LeftWinger, RightWinger, CentreForward,
    ];

    pub fn german(self) -> &'static str {
        match self {
            Goalkeeper => "Torwart",
            CentreBack => "Innenverteidiger",
            LeftBack => "Linker Verteidiger",
            RightBack => "Rechter Verteidiger",
            LeftMidfield => "Linkes Mittelfeld",
            RightMidfield => "Rechtes Mittelfeld",
            DefensiveMidfield => "Defensives Mittelfeld",
            CentralMidfield => "Zentrales Mittelfeld",
            AttackingMidfield => "Offensives Mittelfeld",
            SecondStriker => "Hängende Spitze",
            LeftWinger => "Linksaußen",
            RightWinger => "Rechtsaußen",
            CentreForward => "Mittelstürmer",
        }
    }

    pub fn english(self) -> &'static str {
        match self {
            Goalkeeper => "Goalkeeper",
            CentreBack => "Centre-Back",
            LeftBack => "Left-Back",
            RightBack => "Right-Back",
            LeftMidfield => "Left Midfield",
            RightMidfield => "Right Midfield",
            DefensiveMidfield => "Defensive Midfield",
            CentralMidfield => "Central Midfield",
            AttackingMidfield => "Attacking Midfield",
            SecondStriker => "Second Striker",
            LeftWinger => "Left Winger",
            RightWinger => "Right Winger",
            CentreForward => "Centre-Forward",
        }
    }

    pub fn abbrev_de(self) -> &'static str {
        match self {
            Goalkeeper => "TW",
            CentreBack => "IV",
            LeftBack => "LV",
            RightBack => "RV",
            LeftMidfield => "LM",
            RightMidfield => "RM",
            DefensiveMidfield => "DM",
            CentralMidfield => "ZM",
            AttackingMidfield => "OM",
            SecondStriker => "HS",
            LeftWinger => "LA",
            RightWinger => "RA",
            CentreForward => "ST",
        }
    }

    pub fn abbrev_en(self) -> &'static str {
        match self {
            Goalkeeper => "GK",
            CentreBack => "CB",
            LeftBack => "LB",
            RightBack => "RB",
            LeftMidfield => "LM",
            RightMidfield => "RM",
            DefensiveMidfield => "DM",
            CentralMidfield => "CM",
            AttackingMidfield => "AM",
            SecondStriker => "SS",
            LeftWinger => "LW",
            RightWinger => "RW",
            CentreForward => "ST",
        }
    }

    /// Index in the site's order (0 = Goalkeeper).
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    /// Look up any of the four spellings. Full names match case-insensitively,
    /// abbreviations exactly. "LM", "RM", "DM", "ST" are the same in both languages.
    pub fn from_any(s: &str) -> Option<Position> {
        let s = s.trim();
        Self::ALL.iter().copied().find(|p| {
            p.german().eq_ignore_ascii_case(s)
                || p.english().eq_ignore_ascii_case(s)
                || p.abbrev_de() == s
                || p.abbrev_en() == s
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.english())
    }
}

impl FromStr for Position {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_any(s).ok_or_else(|| format!("Unknown position: {s}"))
    }
}
