use std::collections::HashMap;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use log::{error, info, warn};

use crate::simulation::HeldKeys;

/// Ticks a key stays held after its last press or repeat. Most terminals
/// never send releases, and OS key repeat refreshes well inside this window.
pub const HOLD_WINDOW: u64 = 6;

/// Polled once per tick; always yields a valid, possibly empty, key set.
pub trait InputSource {
    fn poll(&mut self, tick: u64) -> io::Result<HeldKeys>;
}

/// Asks the terminal to report key releases. Returns true when the flags
/// were pushed; the caller must then pop them with `stop_key_releases`.
pub fn request_key_releases<W: Write>(out: &mut W, supported: bool) -> bool {
    if !supported {
        info!("Terminal cannot report key releases; relying on the hold window.");
        return false;
    }
    match execute!(out, PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)) {
        Ok(()) => {
            info!("Key release reporting enabled.");
            true
        }
        Err(e) => {
            warn!("Failed to enable key release reporting: {}", e);
            false
        }
    }
}

pub fn stop_key_releases<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, PopKeyboardEnhancementFlags)
}

// --- Live keyboard via crossterm ---
#[derive(Default)]
pub struct TerminalInput {
    last_seen: HashMap<KeyCode, u64>,
    quit: bool,
}

impl TerminalInput {
    pub fn new() -> Self {
        TerminalInput::default()
    }

    fn is_held(&self, key: KeyCode, tick: u64) -> bool {
        self.last_seen
            .get(&key)
            .map(|&last| tick.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode], tick: u64) -> bool {
        keys.iter().any(|&key| self.is_held(key, tick))
    }

    pub fn handle_key(&mut self, key: KeyEvent, tick: u64) {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit = true,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit = true,
                    code => {
                        self.last_seen.insert(code, tick);
                    }
                }
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&key.code);
            }
        }
    }

    pub fn held_keys(&self, tick: u64) -> HeldKeys {
        HeldKeys {
            left: self.any_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], tick),
            right: self.any_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], tick),
            quit: self.quit,
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self, tick: u64) -> io::Result<HeldKeys> {
        while event::poll(Duration::ZERO).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
            match event::read().map_err(|e| { error!("Failed to read event: {}", e); e })? {
                Event::Key(key) => self.handle_key(key, tick),
                Event::Resize(width, height) => {
                    info!("Terminal resized to {}x{}; play area stays fixed", width, height);
                }
                _ => {}
            }
        }
        Ok(self.held_keys(tick))
    }
}

// --- SimulatedInput for headless runs ---
/// Scripted key states: each entry takes effect at its tick and holds until
/// the next scripted change.
pub struct SimulatedInput {
    script: HashMap<u64, HeldKeys>,
    current: HeldKeys,
}

impl SimulatedInput {
    pub fn new(script: HashMap<u64, HeldKeys>) -> Self {
        SimulatedInput { script, current: HeldKeys::default() }
    }

    /// Sweep left, then right, then quit at `quit_tick`.
    pub fn demo(quit_tick: u64) -> Self {
        let mut script = HashMap::new();
        script.insert(1, HeldKeys { left: true, ..HeldKeys::default() });
        script.insert(60, HeldKeys { right: true, ..HeldKeys::default() });
        script.insert(180, HeldKeys::default());
        script.insert(quit_tick, HeldKeys { quit: true, ..HeldKeys::default() });
        SimulatedInput::new(script)
    }
}

impl InputSource for SimulatedInput {
    fn poll(&mut self, tick: u64) -> io::Result<HeldKeys> {
        if let Some(keys) = self.script.remove(&tick) {
            self.current = keys;
        }
        Ok(self.current)
    }
}
