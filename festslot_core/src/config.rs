use serde::{Deserialize, Serialize};

use crate::{
    paytable::Paytable,
    symbols::{Catalog, Variant},
    timing::TimingConfig,
};

pub const SPIN_COST: u64 = 10;
pub const STARTING_BALANCE: u64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineConfig {
    pub variant: Variant,
    pub catalog: Catalog,
    pub paytable: Paytable,
    pub spin_cost: u64,
    pub top_up: u64,
    pub starting_balance: u64,
    pub timing: TimingConfig,
}

impl MachineConfig {
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            catalog: variant.catalog(),
            paytable: Paytable::default(),
            spin_cost: SPIN_COST,
            top_up: variant.top_up(),
            starting_balance: STARTING_BALANCE,
            timing: TimingConfig::default(),
        }
    }

    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_starting_balance(mut self, balance: u64) -> Self {
        self.starting_balance = balance;
        self
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_defaults() {
        let festival = MachineConfig::default();
        assert_eq!(festival.spin_cost, 10);
        assert_eq!(festival.top_up, 100);
        assert_eq!(festival.starting_balance, 100);
        assert_eq!(festival.paytable.multiplier, 10);

        let arcade = MachineConfig::for_variant(Variant::Arcade).with_starting_balance(5);
        assert_eq!(arcade.top_up, 10);
        assert_eq!(arcade.starting_balance, 5);
        assert_eq!(arcade.catalog, Catalog::arcade());
    }
}
