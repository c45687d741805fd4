use festslot_shared::ReelView;

use crate::{rng::RandomSource, symbols::CATALOG_SIZE};

pub const REEL_COUNT: usize = 3;
pub const VISIBLE_SLOTS: usize = 3;
/// Two extra slots keep the strip covered while it animates.
pub const REEL_LEN: usize = VISIBLE_SLOTS + 2;
/// Payline row. Fixed for the lifetime of the crate.
pub const CENTER_SLOT: usize = 1;

pub type Strip = [u8; REEL_LEN];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reel {
    pub symbols: Strip,
    pub spinning: bool,
}

impl Reel {
    pub fn random(rng: &mut dyn RandomSource) -> Self {
        Self {
            symbols: sample_strip(rng),
            spinning: false,
        }
    }

    pub fn center(&self) -> u8 {
        self.symbols[CENTER_SLOT]
    }

    pub fn view(&self) -> ReelView {
        ReelView {
            spinning: self.spinning,
            symbols: self.symbols.to_vec(),
        }
    }
}

/// What a reel landed on when its stop timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReelStop {
    pub reel: usize,
    pub symbols: Strip,
}

impl ReelStop {
    pub fn center(&self) -> u8 {
        self.symbols[CENTER_SLOT]
    }
}

/// Each slot is an independent uniform draw over the catalog.
pub fn sample_strip(rng: &mut dyn RandomSource) -> Strip {
    let mut strip = [0u8; REEL_LEN];
    for slot in strip.iter_mut() {
        *slot = rng.below(CATALOG_SIZE as u32) as u8;
    }
    strip
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;

    #[test]
    fn strip_takes_draws_in_slot_order() {
        let mut rng = ScriptedRandom::new(vec![0, 1, 2, 3, 4]);
        let strip = sample_strip(&mut rng);
        assert_eq!(strip, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn center_is_second_slot() {
        let mut rng = ScriptedRandom::new(vec![6, 5, 4, 3, 2]);
        let reel = Reel::random(&mut rng);
        assert_eq!(reel.center(), 5);
        assert!(!reel.spinning);
        assert_eq!(reel.view().symbols.len(), REEL_LEN);
    }

    #[test]
    fn draws_wrap_into_catalog() {
        let mut rng = ScriptedRandom::new(vec![13]);
        let strip = sample_strip(&mut rng);
        assert!(strip.iter().all(|&s| s == 6));
    }
}
