use serde::{Deserialize, Serialize};

use crate::{
    reel::{ReelStop, REEL_COUNT},
    symbols::Catalog,
};

pub const DEFAULT_MULTIPLIER: u64 = 10;

/// Single payline, three of a kind on the center row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paytable {
    pub multiplier: u64,
}

impl Default for Paytable {
    fn default() -> Self {
        Self {
            multiplier: DEFAULT_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Win {
    pub symbol: u8,
    pub payout: u64,
}

impl Paytable {
    pub fn payout_for(&self, catalog: &Catalog, symbol: u8) -> u64 {
        catalog
            .get(symbol)
            .map(|s| s.value * self.multiplier)
            .unwrap_or(0)
    }

    /// Largest payout a single spin can produce.
    pub fn max_payout(&self, catalog: &Catalog) -> u64 {
        self.payout_for(catalog, catalog.top_symbol())
    }

    /// Evaluates the final reels, in reel order. `None` means no win.
    pub fn evaluate(&self, catalog: &Catalog, stops: &[ReelStop; REEL_COUNT]) -> Option<Win> {
        let first = stops[0].center();
        if !stops.iter().all(|s| s.center() == first) {
            return None;
        }
        let payout = self.payout_for(catalog, first);
        (payout > 0).then_some(Win {
            symbol: first,
            payout,
        })
    }
}
