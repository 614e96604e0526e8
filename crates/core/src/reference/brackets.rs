use serde::Serialize;

/// Description of one Commander bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BracketInfo {
    pub number: u8,
    pub name: &'static str,
    pub description: &'static str,
    /// Game Changers allowed, `None` when unlimited.
    pub game_changers_allowed: Option<u8>,
    pub combos: &'static str,
    pub mass_land_denial_allowed: bool,
    pub extra_turns: &'static str,
    pub tutors: &'static str,
    pub expected_game_length: &'static str,
    pub theme_focus: &'static str,
}

pub const BRACKETS: [BracketInfo; 5] = [
    BracketInfo {
        number: 1,
        name: "Exhibition",
        description: "Ultra-casual, highly themed decks. Games go long.",
        game_changers_allowed: Some(0),
        combos: "Thematic or non-existent",
        mass_land_denial_allowed: false,
        extra_turns: "Thematic or non-existent",
        tutors: "Occasional theme-based tutors",
        expected_game_length: "10+ turns",
        theme_focus: "Very high; art, lore or jokes may come before mechanics",
    },
    BracketInfo {
        number: 2,
        name: "Core",
        description: "Preconstructed deck power level. Solid gameplay.",
        game_changers_allowed: Some(0),
        combos: "None",
        mass_land_denial_allowed: false,
        extra_turns: "Sparse, not chained",
        tutors: "Allowed, typically not optimized",
        expected_game_length: "8-10 turns",
        theme_focus: "Moderate; theme and mechanics in balance",
    },
    BracketInfo {
        number: 3,
        name: "Upgraded",
        description: "Stronger than precons, carefully built decks.",
        game_changers_allowed: Some(3),
        combos: "No early-game combos (first 6 turns)",
        mass_land_denial_allowed: false,
        extra_turns: "Low quantity, not looped",
        tutors: "Allowed",
        expected_game_length: "6-8 turns",
        theme_focus: "Low; mechanics first with some thematic elements",
    },
    BracketInfo {
        number: 4,
        name: "Optimized",
        description: "High-power decks with strong synergies and combos.",
        game_changers_allowed: None,
        combos: "Allowed",
        mass_land_denial_allowed: true,
        extra_turns: "Allowed",
        tutors: "Heavily used",
        expected_game_length: "4-6 turns",
        theme_focus: "Minimal; built for power and efficiency",
    },
    BracketInfo {
        number: 5,
        name: "cEDH",
        description: "Competitive EDH. Maximum optimization for the metagame.",
        game_changers_allowed: None,
        combos: "Expected",
        mass_land_denial_allowed: true,
        extra_turns: "Allowed",
        tutors: "Maximized",
        expected_game_length: "3-5 turns",
        theme_focus: "None; built solely for competitive performance",
    },
];

/// Look up a bracket by number (1-5).
pub fn bracket_info(number: u8) -> Option<&'static BracketInfo> {
    BRACKETS.iter().find(|b| b.number == number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_info_lookup() {
        assert_eq!(bracket_info(1).map(|b| b.name), Some("Exhibition"));
        assert_eq!(bracket_info(5).map(|b| b.name), Some("cEDH"));
        assert!(bracket_info(0).is_none());
        assert!(bracket_info(6).is_none());
    }
}
