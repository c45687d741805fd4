use serde::{Deserialize, Serialize};

pub const CATALOG_SIZE: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub value: u64,
}

impl Symbol {
    fn new(name: &str, value: u64) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

/// Which flavour of the widget is being run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Festival,
    Arcade,
}

impl Variant {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "festival" => Some(Variant::Festival),
            "arcade" => Some(Variant::Arcade),
            _ => None,
        }
    }

    /// Credits granted by one top-up.
    pub fn top_up(self) -> u64 {
        match self {
            Variant::Festival => 100,
            Variant::Arcade => 10,
        }
    }

    pub fn catalog(self) -> Catalog {
        match self {
            Variant::Festival => Catalog::festival(),
            Variant::Arcade => Catalog::arcade(),
        }
    }
}

/// Ordered, fixed set of symbols. Reels store indices into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    symbols: [Symbol; CATALOG_SIZE],
}

impl Catalog {
    pub fn new(symbols: [Symbol; CATALOG_SIZE]) -> Self {
        Self { symbols }
    }

    pub fn festival() -> Self {
        Self::new([
            Symbol::new("Pitcher", 5),
            Symbol::new("KoolAid", 3),
            Symbol::new("Eyeball", 7),
            Symbol::new("Candle", 4),
            Symbol::new("Book", 6),
            Symbol::new("Mushroom", 8),
            Symbol::new("Triangle", 10),
        ])
    }

    pub fn arcade() -> Self {
        Self::new([
            Symbol::new("Cherry", 2),
            Symbol::new("Lemon", 3),
            Symbol::new("Bell", 5),
            Symbol::new("Seven", 7),
            Symbol::new("Plum", 4),
            Symbol::new("Bar", 6),
            Symbol::new("Diamond", 10),
        ])
    }

    pub fn get(&self, index: u8) -> Option<&Symbol> {
        self.symbols.get(index as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// Index of the most valuable symbol; the first one wins a tie.
    pub fn top_symbol(&self) -> u8 {
        let mut best = 0usize;
        for (i, s) in self.symbols.iter().enumerate() {
            if s.value > self.symbols[best].value {
                best = i;
            }
        }
        best as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn festival_matches_widget_catalog() {
        let c = Catalog::festival();
        assert_eq!(c.get(2).map(|s| s.value), Some(7));
        assert_eq!(c.get(6).map(|s| s.name.as_str()), Some("Triangle"));
        assert_eq!(c.top_symbol(), 6);
        assert!(c.get(7).is_none());
    }

    #[test]
    fn variants() {
        assert_eq!(Variant::Festival.top_up(), 100);
        assert_eq!(Variant::Arcade.top_up(), 10);
        assert_eq!(Variant::from_name("ARCADE"), Some(Variant::Arcade));
        assert_eq!(Variant::from_name("vip"), None);
        assert_eq!(Variant::Arcade.catalog().get(3).map(|s| s.value), Some(7));
    }
}
