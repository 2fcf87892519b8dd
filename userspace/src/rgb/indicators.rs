use super::Frame;
use super::color::{
    BLUE, CYAN, DARK_RED, GREEN, OFF, OFF_BLUE, ORANGE, PURPLE, RED, WHITE, YELLOW,
};
use super::led_map::*;
use crate::config::TIMEOUT_THRESHOLD_MAX;
use crate::layer::Layer;
use crate::numlock::HostLeds;

/// Everything the indicators show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorState {
    pub night_mode: bool,
    pub leds: HostLeds,
    pub invert_numlock: bool,
    pub gui_locked: bool,
    pub layer: Layer,
    pub timeout_threshold: u16,
}

/// Paints status over an already rendered frame.
pub fn paint(frame: &mut Frame, state: &IndicatorState) {
    if state.night_mode {
        frame.fill(OFF);
    }

    if state.leds.scroll_lock {
        frame[F11] = RED;
    }

    if state.leds.num_lock != state.invert_numlock {
        frame[N] = ORANGE;
        frame[FN] = ORANGE;
    }

    if state.leds.caps_lock {
        for led in [L6, L7, L8, CAPS] {
            frame[led] = WHITE;
        }
    }

    if state.gui_locked {
        frame[LWIN] = RED;
    }

    match state.layer {
        Layer::Fn1 => paint_fn1(frame, state.timeout_threshold),
        Layer::Fn2 => {
            for led in NUMPAD {
                frame[led] = OFF_BLUE;
            }
            for led in [L5, L6, R5, R6] {
                frame[led] = PURPLE;
            }
        }
        Layer::Fn3 => {
            for led in [L3, L4, R3, R4] {
                frame[led] = ORANGE;
            }
        }
        Layer::Fn4 => {
            for led in [L1, L2, R1, R2] {
                frame[led] = DARK_RED;
            }
        }
        Layer::Base => {}
    }
}

fn paint_fn1(frame: &mut Frame, timeout_threshold: u16) {
    // Media keys
    for led in [F6, F7, F8] {
        frame[led] = RED;
    }
    for led in [F10, F11, F12, PRT] {
        frame[led] = YELLOW;
    }
    frame[FN] = OFF_BLUE;
    frame[LWIN] = RED;
    frame[BSLS] = RED;
    frame[N] = ORANGE;

    // Encoder modifiers
    frame[RALT] = RED;
    frame[RCTL] = GREEN;
    frame[RSFT] = BLUE;

    frame[Z] = PURPLE;
    frame[X] = PURPLE;
    frame[UP] = GREEN;
    frame[DOWN] = GREEN;
    frame[LEFT] = BLUE;
    frame[RIGHT] = BLUE;

    paint_timeout(frame, timeout_threshold);

    for led in [L7, L8, R7, R8] {
        frame[led] = PURPLE;
    }
}

/// Up to 10 minutes light one function key; below the limit the tens are on
/// the function row and the units on the number row; the limit itself lights
/// the last three number row keys.
fn paint_timeout(frame: &mut Frame, threshold: u16) {
    let threshold = usize::from(threshold);
    if threshold <= 10 {
        frame[FUNC_ROW[threshold]] = CYAN;
    } else if threshold < usize::from(TIMEOUT_THRESHOLD_MAX) {
        frame[FUNC_ROW[threshold / 10]] = CYAN;
        frame[NUM_ROW[threshold % 10]] = CYAN;
    } else {
        for led in &NUM_ROW[10..13] {
            frame[*led] = CYAN;
        }
    }
}
