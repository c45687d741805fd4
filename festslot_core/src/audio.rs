use festslot_shared::{AudioCue, AudioError};
use tracing::warn;

/// Fire-and-forget sound output.
pub trait AudioSink: Send + Sync {
    /// Move the cue's playback position back to the start.
    fn rewind(&self, cue: AudioCue);
    fn play(&self, cue: AudioCue) -> Result<(), AudioError>;
}

pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn rewind(&self, _cue: AudioCue) {}

    fn play(&self, _cue: AudioCue) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Rewind then play. Failures are logged and dropped.
pub fn trigger(sink: &dyn AudioSink, cue: AudioCue) {
    sink.rewind(cue);
    if let Err(e) = sink.play(cue) {
        warn!(?cue, error = %e, "error playing sound");
    }
}
