//! Directional combo macros for the game layer.
//!
//! Each macro replays a motion input followed by attack buttons. The motion is
//! built from the direction currently held: `A` is left, `D` is right and `S`
//! is down. Without a held direction the macro key types a plain key instead.

use heapless::Vec;

use crate::keys::Key;

/// Delay after every synthesized key change.
pub const STEP_DELAY_MS: u16 = 18;

/// Pause between the two halves of the hpb motion.
pub const PAUSE_DELAY_MS: u16 = 40;

/// How long a synthesized tap is held.
pub const TAP_MS: u16 = 10;

pub const MAX_STEPS: usize = 48;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MacroStep {
    Down(Key),
    Up(Key),
    Delay(u16),
}

pub type MacroPlan = Vec<MacroStep, MAX_STEPS>;

/// Plan made of the given steps, cut at [`MAX_STEPS`].
pub fn plan_of(steps: &[MacroStep]) -> MacroPlan {
    steps.iter().copied().take(MAX_STEPS).collect()
}

/// Direction keys held on the physical keyboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub down: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameMacro {
    Hpb,
    Giganter,
    Buster,
    Flick,
}

impl GameMacro {
    /// Key sent instead of the macro when no horizontal direction is held.
    pub const fn fallback_key(self) -> Key {
        match self {
            GameMacro::Hpb => Key::Comma,
            GameMacro::Giganter => Key::N,
            GameMacro::Buster => Key::M,
            GameMacro::Flick => Key::U,
        }
    }

    /// Builds the key sequence for the current state, or `None` when the
    /// fallback key applies.
    pub fn plan(self, held: HeldKeys, shift: bool) -> Option<MacroPlan> {
        if !held.left && !held.right {
            return None;
        }
        let mut plan = Builder::default();
        match self {
            GameMacro::Hpb => {
                if held.left {
                    plan.hpb_motion(Key::A);
                }
                if held.right {
                    plan.hpb_motion(Key::D);
                }
                if !shift {
                    plan.tap(Key::J);
                }
                plan.tap(Key::I);
                if shift {
                    plan.tap(Key::K);
                }
            }
            GameMacro::Giganter => {
                plan.turn_motions(held);
                if !shift {
                    plan.tap(Key::J);
                }
                plan.tap(Key::L);
                if shift {
                    plan.tap(Key::K);
                }
                if held.down {
                    plan.push(MacroStep::Down(Key::S));
                }
            }
            GameMacro::Buster => {
                plan.turn_motions(held);
                if !shift {
                    plan.down(Key::J);
                }
                plan.down(Key::K);
                plan.push(MacroStep::Up(Key::J));
                plan.push(MacroStep::Up(Key::K));
                if held.down {
                    plan.push(MacroStep::Down(Key::S));
                }
            }
            GameMacro::Flick => {
                plan.turn_motions(held);
                plan.down(Key::J);
                plan.down(Key::I);
                plan.push(MacroStep::Up(Key::J));
                plan.push(MacroStep::Up(Key::I));
            }
        }
        Some(plan.steps)
    }
}

#[derive(Default)]
struct Builder {
    steps: MacroPlan,
}

impl Builder {
    fn push(&mut self, step: MacroStep) {
        // Longest plan is the hpb with both directions held, well below MAX_STEPS.
        let _ = self.steps.push(step);
    }

    fn down(&mut self, key: Key) {
        self.push(MacroStep::Down(key));
        self.push(MacroStep::Delay(STEP_DELAY_MS));
    }

    fn up(&mut self, key: Key) {
        self.push(MacroStep::Up(key));
        self.push(MacroStep::Delay(STEP_DELAY_MS));
    }

    fn tap(&mut self, key: Key) {
        self.down(key);
        self.push(MacroStep::Up(key));
    }

    /// Half circle back through down, twice, ending with `toward` held.
    fn hpb_motion(&mut self, toward: Key) {
        self.push(MacroStep::Up(toward));
        self.push(MacroStep::Delay(STEP_DELAY_MS));
        self.down(Key::S);
        self.down(toward);
        self.up(Key::S);
        self.push(MacroStep::Up(toward));
        self.push(MacroStep::Delay(PAUSE_DELAY_MS));
        self.down(Key::S);
        self.down(toward);
        self.up(Key::S);
    }

    /// Down, then turn from `toward` to `away` and back, ending with `toward` held.
    fn turn_motion(&mut self, toward: Key, away: Key) {
        self.down(Key::S);
        self.up(toward);
        self.down(away);
        self.up(Key::S);
        self.up(away);
        self.down(toward);
    }

    fn turn_motions(&mut self, held: HeldKeys) {
        if held.left {
            self.turn_motion(Key::A, Key::D);
        }
        if held.right {
            self.turn_motion(Key::D, Key::A);
        }
    }
}
