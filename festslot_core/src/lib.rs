pub mod audio;
pub mod config;
pub mod engine;
pub mod notify;
pub mod paytable;
pub mod reel;
pub mod rng;
pub mod session;
pub mod symbols;
pub mod timing;

pub use crate::audio::{AudioSink, SilentAudio};
pub use crate::config::{MachineConfig, SPIN_COST, STARTING_BALANCE};
pub use crate::engine::{SlotMachine, SpinOutcome, SpinTicket};
pub use crate::notify::{ChannelNotifier, LogNotifier, Notifier};
pub use crate::paytable::{Paytable, Win};
pub use crate::reel::{Reel, ReelStop, CENTER_SLOT, REEL_COUNT, REEL_LEN};
pub use crate::rng::{EntropyRandom, RandomSource, ScriptedRandom, SeededRandom};
pub use crate::session::Session;
pub use crate::symbols::{Catalog, Symbol, Variant};
pub use crate::timing::{TimingConfig, TimingProfile};
