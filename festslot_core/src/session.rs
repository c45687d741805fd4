use festslot_shared::{Phase, SessionView, SpinError, SpinResult};

use crate::{
    paytable::Win,
    reel::{Reel, ReelStop, REEL_COUNT},
};

/// In-memory state of one page view. Only the controller mutates it.
#[derive(Debug, Clone)]
pub struct Session {
    balance: u64,
    phase: Phase,
    reels: [Reel; REEL_COUNT],
    show_win: bool,
    win_amount: u64,
    spins: u64,
}

impl Session {
    pub fn new(balance: u64, reels: [Reel; REEL_COUNT]) -> Self {
        Self {
            balance,
            phase: Phase::Idle,
            reels,
            show_win: false,
            win_amount: 0,
            spins: 0,
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, Phase::Spinning | Phase::Settling)
    }

    pub fn reels(&self) -> &[Reel; REEL_COUNT] {
        &self.reels
    }

    /// Idle -> Spinning. Charges `cost` exactly once.
    pub fn begin_spin(&mut self, cost: u64) -> SpinResult<()> {
        if self.phase != Phase::Idle {
            return Err(SpinError::AlreadySpinning);
        }
        if self.balance < cost {
            return Err(SpinError::InsufficientCredits {
                balance: self.balance,
                cost,
            });
        }
        self.balance -= cost;
        self.show_win = false;
        self.phase = Phase::Spinning;
        self.spins += 1;
        for reel in self.reels.iter_mut() {
            reel.spinning = true;
        }
        Ok(())
    }

    /// Lands one reel. The first landing moves the cycle to Settling.
    pub fn commit_stop(&mut self, stop: &ReelStop) {
        if let Some(reel) = self.reels.get_mut(stop.reel) {
            reel.symbols = stop.symbols;
            reel.spinning = false;
        }
        if self.phase == Phase::Spinning {
            self.phase = Phase::Settling;
        }
    }

    /// Settling -> Evaluated, crediting the win if there is one.
    pub fn evaluate(&mut self, win: Option<Win>) {
        if let Some(win) = win {
            self.balance += win.payout;
            self.win_amount = win.payout;
            self.show_win = true;
        }
        self.phase = Phase::Evaluated;
    }

    pub fn finish(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Drops a cycle that cannot be evaluated. Reels that never landed keep
    /// their previous symbols but stop spinning; the cost is not refunded.
    pub fn abort(&mut self) {
        for reel in self.reels.iter_mut() {
            reel.spinning = false;
        }
        self.show_win = false;
        self.phase = Phase::Idle;
    }

    pub fn add_credits(&mut self, amount: u64) {
        self.balance += amount;
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            balance: self.balance,
            phase: self.phase,
            spinning: self.is_spinning(),
            reels: self.reels.iter().map(Reel::view).collect(),
            show_win: self.show_win,
            win_amount: self.win_amount,
            spins: self.spins,
        }
    }
}
