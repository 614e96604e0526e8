use serde::{Deserialize, Serialize};

/// One of the five colors of mana.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    W,
    U,
    B,
    R,
    G,
}

impl Color {
    /// All colors in WUBRG order.
    pub const ALL: [Color; 5] = [Color::W, Color::U, Color::B, Color::R, Color::G];

    /// Parse a single color symbol ("W", "u", ...).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim().to_ascii_uppercase().as_str() {
            "W" => Some(Color::W),
            "U" => Some(Color::U),
            "B" => Some(Color::B),
            "R" => Some(Color::R),
            "G" => Some(Color::G),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Color::W => "W",
            Color::U => "U",
            Color::B => "B",
            Color::R => "R",
            Color::G => "G",
        }
    }
}

/// Printed rarity of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
    Special,
    Bonus,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Mythic => "mythic",
            Rarity::Special => "special",
            Rarity::Bonus => "bonus",
            Rarity::Unknown => "unknown",
        }
    }
}

/// A single face of a multi-faced card.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardFace {
    pub name: String,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub oracle_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
}

/// A resolved card as seen by the detectors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Card {
    /// Canonical name. Double-faced cards use "Front // Back".
    pub name: String,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub oracle_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub mana_value: f64,
    #[serde(default)]
    pub color_identity: Vec<Color>,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub set_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Frame era code ("1993", "1997", "2003", "2015", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faces: Vec<CardFace>,
    /// Number of copies in the deck.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl Card {
    pub fn new(name: impl Into<String>, type_line: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_line: type_line.into(),
            quantity: 1,
            ..Default::default()
        }
    }

    pub fn with_oracle_text(mut self, text: impl Into<String>) -> Self {
        self.oracle_text = text.into();
        self
    }

    pub fn with_mana_value(mut self, mana_value: f64) -> Self {
        self.mana_value = mana_value;
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_colors(mut self, colors: &[Color]) -> Self {
        self.color_identity = colors.to_vec();
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_set(mut self, set_code: impl Into<String>) -> Self {
        self.set_code = set_code.into();
        self
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.frame = Some(frame.into());
        self
    }

    pub fn with_faces(mut self, layout: impl Into<String>, faces: Vec<CardFace>) -> Self {
        self.layout = Some(layout.into());
        self.faces = faces;
        self
    }

    /// Lowercased canonical name, the identity used for lookups.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Name of the front face ("Tergrid, God of Fright" for "Tergrid, God of Fright // Tergrid's Lantern").
    pub fn front_face_name(&self) -> &str {
        match self.name.split_once(" // ") {
            Some((front, _)) => front,
            None => &self.name,
        }
    }

    /// Type line of the front face only.
    pub fn front_type_line(&self) -> &str {
        match self.type_line.split_once(" // ") {
            Some((front, _)) => front,
            None => &self.type_line,
        }
    }

    /// Rules text of the card, falling back to the joined face texts.
    pub fn rules_text(&self) -> String {
        if !self.oracle_text.is_empty() || self.faces.is_empty() {
            return self.oracle_text.clone();
        }
        self.faces
            .iter()
            .map(|f| f.oracle_text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Front face is a land; MDFCs with a land back face are not lands here.
    pub fn is_land(&self) -> bool {
        self.front_type_line().contains("Land")
    }

    pub fn is_basic_land(&self) -> bool {
        self.type_line.contains("Basic") && self.type_line.contains("Land")
    }

    pub fn is_creature(&self) -> bool {
        self.front_type_line().contains("Creature")
    }

    pub fn is_legendary(&self) -> bool {
        self.type_line.contains("Legendary")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tergrid() -> Card {
        Card::new(
            "Tergrid, God of Fright // Tergrid's Lantern",
            "Legendary Creature — God // Legendary Artifact",
        )
        .with_faces(
            "modal_dfc",
            vec![
                CardFace {
                    name: "Tergrid, God of Fright".to_string(),
                    type_line: "Legendary Creature — God".to_string(),
                    oracle_text: "Menace".to_string(),
                    mana_cost: Some("{3}{B}{B}".to_string()),
                },
                CardFace {
                    name: "Tergrid's Lantern".to_string(),
                    type_line: "Legendary Artifact".to_string(),
                    oracle_text: "{T}: Target player loses 3 life.".to_string(),
                    mana_cost: Some("{4}{B}".to_string()),
                },
            ],
        )
    }

    #[test]
    fn test_front_face_name() {
        assert_eq!(tergrid().front_face_name(), "Tergrid, God of Fright");
        assert_eq!(Card::new("Sol Ring", "Artifact").front_face_name(), "Sol Ring");
    }

    #[test]
    fn test_rules_text_falls_back_to_faces() {
        let text = tergrid().rules_text();
        assert!(text.contains("Menace"));
        assert!(text.contains("loses 3 life"));
    }

    #[test]
    fn test_land_predicates() {
        let island = Card::new("Island", "Basic Land — Island");
        assert!(island.is_land());
        assert!(island.is_basic_land());

        let snow = Card::new("Snow-Covered Island", "Basic Snow Land — Island");
        assert!(snow.is_basic_land());

        let dual = Card::new("Tropical Island", "Land — Forest Island");
        assert!(dual.is_land());
        assert!(!dual.is_basic_land());
    }

    #[test]
    fn test_rarity_deserialize_unknown() {
        let rarity: Rarity = serde_json::from_str("\"timeshifted\"").unwrap();
        assert_eq!(rarity, Rarity::Unknown);
        let rarity: Rarity = serde_json::from_str("\"mythic\"").unwrap();
        assert_eq!(rarity, Rarity::Mythic);
    }

    #[test]
    fn test_card_deserialize_defaults() {
        let card: Card = serde_json::from_str(r#"{"name": "Sol Ring"}"#).unwrap();
        assert_eq!(card.quantity, 1);
        assert!(card.oracle_text.is_empty());
        assert_eq!(card.rarity, Rarity::Unknown);
    }
}
