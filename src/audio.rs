use std::io::Write;

use log::{debug, info};

use crate::assets::SoundCue;

const BELL: &[u8] = b"\x07";

/// Fire-and-forget sound effects. Implementations never fail the caller.
pub trait Audio {
    fn play_hit(&mut self);
    fn play_loop(&mut self);
}

/// Plays cues on the terminal: the hit is the bell, the engine loop has no
/// continuous channel and is only marked as started.
pub struct TerminalAudio<W: Write> {
    out: W,
    hit: SoundCue,
    engine: SoundCue,
    looping: bool,
}

impl<W: Write> TerminalAudio<W> {
    pub fn new(out: W, hit: SoundCue, engine: SoundCue) -> Self {
        TerminalAudio { out, hit, engine, looping: false }
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Audio for TerminalAudio<W> {
    fn play_hit(&mut self) {
        if !self.hit.is_present() {
            return;
        }
        if let Err(e) = self.out.write_all(BELL).and_then(|_| self.out.flush()) {
            debug!("Hit sound dropped: {}", e);
        }
    }

    fn play_loop(&mut self) {
        if self.engine.is_present() && !self.looping {
            self.looping = true;
            info!("Engine loop started");
        }
    }
}

/// No audio at all.
pub struct Silence;

impl Audio for Silence {
    fn play_hit(&mut self) {}

    fn play_loop(&mut self) {}
}
