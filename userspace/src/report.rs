use crate::keys::{Key, Modifiers};
use crate::macros::{MacroPlan, MacroStep};

/// Keyboard state as sent to the host in a 6KRO boot report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardState {
    pub modifiers: Modifiers,
    pub keycodes: [u8; 6],
}

impl KeyboardState {
    pub const fn new(modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            keycodes: [0; 6],
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.keycodes.contains(&key.usage())
    }

    pub fn press(&mut self, key: Key) {
        self.press_usage(key.usage());
    }

    pub fn release(&mut self, key: Key) {
        self.release_usage(key.usage());
    }

    /// Adds the usage to the first free slot. A full report drops it.
    pub fn press_usage(&mut self, usage: u8) {
        if usage == 0 || self.keycodes.contains(&usage) {
            return;
        }
        if let Some(slot) = self.keycodes.iter_mut().find(|slot| **slot == 0) {
            *slot = usage;
        }
    }

    pub fn release_usage(&mut self, usage: u8) {
        if usage == 0 {
            return;
        }
        for slot in self.keycodes.iter_mut().filter(|slot| **slot == usage) {
            *slot = 0;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackEvent {
    Report(KeyboardState),
    Wait(u16),
}

/// Turns macro steps into the reports the host has to see, starting from the
/// keys already held. Owns its plan so it can wait in a queue while new key
/// events keep arriving.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Playback {
    state: KeyboardState,
    plan: MacroPlan,
    next: usize,
}

impl Playback {
    pub fn new(initial: KeyboardState, plan: MacroPlan) -> Self {
        Self {
            state: initial,
            plan,
            next: 0,
        }
    }

    /// State after the steps consumed so far.
    pub fn state(&self) -> KeyboardState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.plan.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plan.is_empty()
    }
}

impl Iterator for Playback {
    type Item = PlaybackEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let step = *self.plan.get(self.next)?;
        self.next += 1;
        let event = match step {
            MacroStep::Down(key) => {
                self.state.press(key);
                PlaybackEvent::Report(self.state)
            }
            MacroStep::Up(key) => {
                self.state.release(key);
                PlaybackEvent::Report(self.state)
            }
            MacroStep::Delay(ms) => PlaybackEvent::Wait(ms),
        };
        Some(event)
    }
}
