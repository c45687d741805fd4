use std::sync::Arc;

use festslot_core::{
    ChannelNotifier, MachineConfig, SeededRandom, SilentAudio, SlotMachine, TimingConfig,
    Variant,
};

#[tokio::main]
async fn main() {
    // Example end-to-end spin with a replayable seed
    let rng = SeededRandom::new("example-seed");
    println!("seed={}", rng.seed());

    let config = MachineConfig::for_variant(Variant::Festival).with_timing(TimingConfig::turbo());
    let (notifier, mut notes) = ChannelNotifier::channel();
    let machine = SlotMachine::new(config, Box::new(rng), Arc::new(notifier), Arc::new(SilentAudio));

    match machine.spin() {
        Ok(ticket) => match ticket.settled().await {
            Ok(outcome) => println!(
                "centers={:?} payout={} balance={}",
                outcome.centers(),
                outcome.payout(),
                outcome.balance
            ),
            Err(e) => println!("spin failed: {e}"),
        },
        Err(e) => println!("spin rejected: {e}"),
    }
    while let Ok(n) = notes.try_recv() {
        println!("[{}] {}", n.title, n.description);
    }
}
