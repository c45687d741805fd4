use std::{sync::Arc, time::Duration};

use festslot_shared::{AudioCue, Notification, SessionView, SpinError, SpinResult};
use parking_lot::Mutex;
use tokio::{sync::watch, task::JoinHandle, task::JoinSet, time::sleep};
use tracing::{debug, info, warn};

use crate::{
    audio::{self, AudioSink, SilentAudio},
    config::MachineConfig,
    notify::{LogNotifier, Notifier},
    paytable::Win,
    reel::{sample_strip, Reel, ReelStop, REEL_COUNT},
    rng::{EntropyRandom, RandomSource},
    session::Session,
};

/// Result of one completed spin cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinOutcome {
    pub stops: [ReelStop; REEL_COUNT],
    pub win: Option<Win>,
    pub balance: u64,
}

impl SpinOutcome {
    pub fn payout(&self) -> u64 {
        self.win.map(|w| w.payout).unwrap_or(0)
    }

    pub fn centers(&self) -> [u8; REEL_COUNT] {
        self.stops.map(|s| s.center())
    }
}

/// Handle on an accepted spin. Dropping it does not stop the cycle.
pub struct SpinTicket {
    handle: JoinHandle<SpinResult<SpinOutcome>>,
}

impl SpinTicket {
    pub async fn settled(self) -> SpinResult<SpinOutcome> {
        self.handle.await.map_err(|_| SpinError::Interrupted)?
    }
}

struct State {
    session: Session,
    rng: Box<dyn RandomSource>,
}

struct Shared {
    config: MachineConfig,
    state: Mutex<State>,
    notifier: Arc<dyn Notifier>,
    audio: Arc<dyn AudioSink>,
    view_tx: watch::Sender<SessionView>,
}

impl Shared {
    fn publish(&self, session: &Session) {
        self.view_tx.send_replace(session.view());
    }

    fn stop_reel(&self, reel: usize) -> ReelStop {
        let mut st = self.state.lock();
        let State { session, rng } = &mut *st;
        let stop = ReelStop {
            reel,
            symbols: sample_strip(rng.as_mut()),
        };
        session.commit_stop(&stop);
        self.publish(session);
        debug!(reel, center = stop.center(), "reel stopped");
        stop
    }

    fn abandon_cycle(&self) {
        let mut st = self.state.lock();
        st.session.abort();
        self.publish(&st.session);
    }
}

/// The reel spin controller.
///
/// Cheap to clone; clones drive the same machine. `spin` spawns onto the
/// current Tokio runtime, so it must be called from within one.
#[derive(Clone)]
pub struct SlotMachine {
    shared: Arc<Shared>,
}

impl SlotMachine {
    pub fn new(
        config: MachineConfig,
        mut rng: Box<dyn RandomSource>,
        notifier: Arc<dyn Notifier>,
        audio: Arc<dyn AudioSink>,
    ) -> Self {
        let reels = std::array::from_fn(|_| Reel::random(rng.as_mut()));
        let session = Session::new(config.starting_balance, reels);
        let (view_tx, _) = watch::channel(session.view());
        Self {
            shared: Arc::new(Shared {
                config,
                state: Mutex::new(State { session, rng }),
                notifier,
                audio,
                view_tx,
            }),
        }
    }

    /// OS randomness, notifications to the log, no sound.
    pub fn with_defaults(config: MachineConfig) -> Self {
        Self::new(
            config,
            Box::new(EntropyRandom::new()),
            Arc::new(LogNotifier),
            Arc::new(SilentAudio),
        )
    }

    pub fn config(&self) -> &MachineConfig {
        &self.shared.config
    }

    pub fn view(&self) -> SessionView {
        self.shared.state.lock().session.view()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.shared.view_tx.subscribe()
    }

    pub fn balance(&self) -> u64 {
        self.shared.state.lock().session.balance()
    }

    pub fn is_spinning(&self) -> bool {
        self.shared.state.lock().session.is_spinning()
    }

    /// Starts a spin cycle.
    ///
    /// Rejected with `AlreadySpinning` (silently) while a cycle is running and
    /// with `InsufficientCredits` (plus a destructive notification) when the
    /// balance cannot cover the cost. A rejected spin changes nothing.
    pub fn spin(&self) -> SpinResult<SpinTicket> {
        let shared = &self.shared;
        let cost = shared.config.spin_cost;
        let accepted = {
            let mut st = shared.state.lock();
            let State { session, rng } = &mut *st;
            session.begin_spin(cost).map(|()| {
                let delays: Vec<Duration> = (0..REEL_COUNT)
                    .map(|reel| shared.config.timing.stop_delay(reel, rng.as_mut()))
                    .collect();
                shared.publish(session);
                (delays, session.balance())
            })
        };
        let (delays, balance) = match accepted {
            Ok(v) => v,
            Err(e) => {
                if let SpinError::InsufficientCredits { balance, .. } = e {
                    info!(balance, cost, "spin rejected: not enough credits");
                    shared
                        .notifier
                        .notify(Notification::insufficient_credits(cost));
                } else {
                    debug!("spin ignored: already spinning");
                }
                return Err(e);
            }
        };

        info!(balance, ?delays, "spin accepted");
        audio::trigger(shared.audio.as_ref(), AudioCue::SpinStart);

        let handle = tokio::spawn(run_cycle(shared.clone(), delays));
        Ok(SpinTicket { handle })
    }

    /// Adds the variant's top-up amount. Always succeeds, even mid-spin.
    pub fn add_credits(&self) -> u64 {
        let shared = &self.shared;
        let amount = shared.config.top_up;
        let balance = {
            let mut st = shared.state.lock();
            st.session.add_credits(amount);
            shared.publish(&st.session);
            st.session.balance()
        };
        info!(amount, balance, "credits added");
        shared.notifier.notify(Notification::credits_added(amount));
        balance
    }
}

async fn run_cycle(shared: Arc<Shared>, delays: Vec<Duration>) -> SpinResult<SpinOutcome> {
    let mut reels = JoinSet::new();
    for (reel, delay) in delays.into_iter().enumerate() {
        let shared = shared.clone();
        reels.spawn(async move {
            sleep(delay).await;
            shared.stop_reel(reel)
        });
    }

    // Evaluate only once every reel has reported, whatever order they land in.
    let mut landed: [Option<ReelStop>; REEL_COUNT] = [None; REEL_COUNT];
    while let Some(res) = reels.join_next().await {
        match res {
            Ok(stop) => landed[stop.reel] = Some(stop),
            Err(e) => warn!(error = %e, "reel stop task failed"),
        }
    }
    let stops = match landed {
        [Some(a), Some(b), Some(c)] => [a, b, c],
        _ => {
            shared.abandon_cycle();
            return Err(SpinError::Interrupted);
        }
    };

    sleep(shared.config.timing.settle()).await;

    let win = shared
        .config
        .paytable
        .evaluate(&shared.config.catalog, &stops);
    let balance = {
        let mut st = shared.state.lock();
        st.session.evaluate(win);
        shared.publish(&st.session);
        st.session.finish();
        shared.publish(&st.session);
        st.session.balance()
    };

    let centers = stops.map(|s| s.center());
    match win {
        Some(w) => {
            info!(?centers, symbol = w.symbol, payout = w.payout, balance, "winner");
            audio::trigger(shared.audio.as_ref(), AudioCue::Win);
            shared.notifier.notify(Notification::winner(w.payout));
        }
        None => debug!(?centers, balance, "no win"),
    }

    Ok(SpinOutcome {
        stops,
        win,
        balance,
    })
}
