//! LED indices, named after the stock legend of the key above them.
//!
//! Key LEDs run column by column from the left; the side strips (`L1..L8`,
//! `R1..R8`, top to bottom) are interleaved with the rightmost columns.

pub const ESC: usize = 0;
pub const GRV: usize = 1;
pub const TAB: usize = 2;
pub const CAPS: usize = 3;
pub const LSFT: usize = 4;
pub const LCTL: usize = 5;
pub const F1: usize = 6;
pub const K1: usize = 7;
pub const Q: usize = 8;
pub const A: usize = 9;
pub const Z: usize = 10;
pub const LWIN: usize = 11;
pub const F2: usize = 12;
pub const K2: usize = 13;
pub const W: usize = 14;
pub const S: usize = 15;
pub const X: usize = 16;
pub const LALT: usize = 17;
pub const F3: usize = 18;
pub const K3: usize = 19;
pub const E: usize = 20;
pub const D: usize = 21;
pub const C: usize = 22;
pub const F4: usize = 23;
pub const K4: usize = 24;
pub const R: usize = 25;
pub const F: usize = 26;
pub const V: usize = 27;
pub const F5: usize = 28;
pub const K5: usize = 29;
pub const T: usize = 30;
pub const G: usize = 31;
pub const B: usize = 32;
pub const SPC: usize = 33;
pub const F6: usize = 34;
pub const K6: usize = 35;
pub const Y: usize = 36;
pub const H: usize = 37;
pub const N: usize = 38;
pub const F7: usize = 39;
pub const K7: usize = 40;
pub const U: usize = 41;
pub const J: usize = 42;
pub const M: usize = 43;
pub const F8: usize = 44;
pub const K8: usize = 45;
pub const I: usize = 46;
pub const K: usize = 47;
pub const COMM: usize = 48;
pub const RALT: usize = 49;
pub const F9: usize = 50;
pub const K9: usize = 51;
pub const O: usize = 52;
pub const L: usize = 53;
pub const DOT: usize = 54;
pub const FN: usize = 55;
pub const F10: usize = 56;
pub const K0: usize = 57;
pub const P: usize = 58;
pub const SCLN: usize = 59;
pub const SLSH: usize = 60;
pub const F11: usize = 61;
pub const MINS: usize = 62;
pub const LBRC: usize = 63;
pub const QUOT: usize = 64;
pub const RCTL: usize = 65;
pub const F12: usize = 66;
pub const L1: usize = 67;
pub const R1: usize = 68;
/// Top-right key, left of the encoder.
pub const PRT: usize = 69;
pub const L2: usize = 70;
pub const R2: usize = 71;
/// First key of the right column, below the encoder.
pub const DEL: usize = 72;
pub const L3: usize = 73;
pub const R3: usize = 74;
pub const PGUP: usize = 75;
pub const L4: usize = 76;
pub const R4: usize = 77;
pub const EQL: usize = 78;
pub const RIGHT: usize = 79;
pub const L5: usize = 80;
pub const R5: usize = 81;
pub const END: usize = 82;
pub const L6: usize = 83;
pub const R6: usize = 84;
pub const BSPC: usize = 85;
pub const PGDN: usize = 86;
pub const L7: usize = 87;
pub const R7: usize = 88;
pub const RBRC: usize = 89;
pub const RSFT: usize = 90;
pub const L8: usize = 91;
pub const R8: usize = 92;
pub const BSLS: usize = 93;
pub const ENT: usize = 94;
pub const UP: usize = 95;
pub const LEFT: usize = 96;
pub const DOWN: usize = 97;

pub const FUNC_ROW: [usize; 15] = [
    ESC, F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12, PRT, DEL,
];

pub const NUM_ROW: [usize; 14] = [GRV, K1, K2, K3, K4, K5, K6, K7, K8, K9, K0, MINS, EQL, BSPC];

/// Keys that turn into the numpad on `Fn2`.
pub const NUMPAD: [usize; 12] = [K7, K8, K9, U, I, O, J, K, L, M, MINS, EQL];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rgb::LED_COUNT;

    #[test]
    fn side_leds_are_distinct_and_in_range() {
        let side = [L1, L2, L3, L4, L5, L6, L7, L8, R1, R2, R3, R4, R5, R6, R7, R8];
        for (i, a) in side.iter().enumerate() {
            assert!(*a < LED_COUNT);
            assert!(side[i + 1..].iter().all(|b| b != a));
        }
    }

    #[test]
    fn last_led_fills_the_frame() {
        assert_eq!(DOWN + 1, LED_COUNT);
    }
}
