//! Base RGB effect and the status indicators painted over it.

pub mod color;
pub mod indicators;
pub mod led_map;

use core::f32::consts::PI;

use smart_leds::RGB8;
use smart_leds::hsv::{Hsv, hsv2rgb};

use crate::config::{
    RGB_DEFAULT_HUE, RGB_DEFAULT_SAT, RGB_DEFAULT_SPEED, RGB_DEFAULT_VAL, RGB_HUE_STEP,
    RGB_SAT_STEP, RGB_SPEED_STEP, RGB_VAL_STEP,
};
use crate::encoder::Direction;

/// Key LEDs plus both side strips.
pub const LED_COUNT: usize = 98;

pub type Frame = [RGB8; LED_COUNT];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    SolidColor,
    Breathing,
    CycleAll,
}

impl Mode {
    const ALL: [Mode; 3] = [Mode::SolidColor, Mode::Breathing, Mode::CycleAll];

    fn step(self, direction: Direction) -> Self {
        let len = Self::ALL.len();
        let index = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        let index = match direction {
            Direction::Up => (index + 1) % len,
            Direction::Down => (index + len - 1) % len,
        };
        Self::ALL[index]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RgbConfig {
    pub enabled: bool,
    pub mode: Mode,
    pub hue: u8,
    pub sat: u8,
    pub val: u8,
    pub speed: u8,
}

impl Default for RgbConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: Mode::default(),
            hue: RGB_DEFAULT_HUE,
            sat: RGB_DEFAULT_SAT,
            val: RGB_DEFAULT_VAL,
            speed: RGB_DEFAULT_SPEED,
        }
    }
}

fn step_saturating(value: u8, step: u8, direction: Direction) -> u8 {
    match direction {
        Direction::Up => value.saturating_add(step),
        Direction::Down => value.saturating_sub(step),
    }
}

/// Renders the base effect for the whole matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RgbMatrix {
    config: RgbConfig,
}

impl RgbMatrix {
    pub fn new(config: RgbConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> RgbConfig {
        self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn enable(&mut self) {
        self.config.enabled = true;
    }

    pub fn disable(&mut self) {
        self.config.enabled = false;
    }

    pub fn toggle(&mut self) {
        self.config.enabled = !self.config.enabled;
    }

    pub fn step_mode(&mut self, direction: Direction) {
        self.config.mode = self.config.mode.step(direction);
    }

    /// Hue wraps around the color wheel, the other channels saturate.
    pub fn step_hue(&mut self, direction: Direction) {
        self.config.hue = match direction {
            Direction::Up => self.config.hue.wrapping_add(RGB_HUE_STEP),
            Direction::Down => self.config.hue.wrapping_sub(RGB_HUE_STEP),
        };
    }

    pub fn step_sat(&mut self, direction: Direction) {
        self.config.sat = step_saturating(self.config.sat, RGB_SAT_STEP, direction);
    }

    pub fn step_val(&mut self, direction: Direction) {
        self.config.val = step_saturating(self.config.val, RGB_VAL_STEP, direction);
    }

    pub fn step_speed(&mut self, direction: Direction) {
        self.config.speed = step_saturating(self.config.speed, RGB_SPEED_STEP, direction);
    }

    /// Fills the frame for the time `now` in milliseconds. A disabled matrix
    /// renders black.
    pub fn render(&self, frame: &mut Frame, now: u64) {
        let color = if self.config.enabled {
            self.color_at(now)
        } else {
            color::OFF
        };
        frame.fill(color);
    }

    fn color_at(&self, now: u64) -> RGB8 {
        let RgbConfig {
            hue, sat, val, speed, ..
        } = self.config;
        match self.config.mode {
            Mode::SolidColor => hsv2rgb(Hsv { hue, sat, val }),
            Mode::Breathing => {
                // 0.25 Hz at speed 0 up to 2 Hz at full speed.
                let rate = 0.25 + f32::from(speed) / 255.0 * 1.75;
                let seconds = (now % 3_600_000) as f32 / 1000.0;
                let level = (libm::sinf(2.0 * PI * rate * seconds) + 1.0) / 2.0;
                let val = (f32::from(val) * level) as u8;
                hsv2rgb(Hsv { hue, sat, val })
            }
            Mode::CycleAll => {
                let shift = (now.wrapping_mul(u64::from(speed) + 1) >> 12) as u8;
                hsv2rgb(Hsv {
                    hue: hue.wrapping_add(shift),
                    sat,
                    val,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_matrix_is_black() {
        let mut rgb = RgbMatrix::default();
        rgb.disable();
        let mut frame = [color::WHITE; LED_COUNT];
        rgb.render(&mut frame, 1234);
        assert!(frame.iter().all(|led| *led == color::OFF));
    }

    #[test]
    fn solid_color_is_uniform_and_lit() {
        let rgb = RgbMatrix::default();
        let mut frame = [color::OFF; LED_COUNT];
        rgb.render(&mut frame, 0);
        assert_ne!(frame[0], color::OFF);
        assert!(frame.iter().all(|led| *led == frame[0]));
    }

    #[test]
    fn breathing_dims_and_brightens() {
        let mut rgb = RgbMatrix::default();
        rgb.step_mode(Direction::Up);
        assert_eq!(rgb.config().mode, Mode::Breathing);
        let levels: std::vec::Vec<u16> = (0..40)
            .map(|i| {
                let mut frame = [color::OFF; LED_COUNT];
                rgb.render(&mut frame, i * 100);
                let led = frame[0];
                u16::from(led.r) + u16::from(led.g) + u16::from(led.b)
            })
            .collect();
        let max = levels.iter().max().unwrap();
        let min = levels.iter().min().unwrap();
        assert!(max > min);
    }

    #[test]
    fn mode_steps_wrap_both_ways() {
        let mut rgb = RgbMatrix::default();
        rgb.step_mode(Direction::Down);
        assert_eq!(rgb.config().mode, Mode::CycleAll);
        rgb.step_mode(Direction::Up);
        assert_eq!(rgb.config().mode, Mode::SolidColor);
    }

    #[test]
    fn hsv_steps() {
        let mut rgb = RgbMatrix::default();
        rgb.step_hue(Direction::Down);
        assert_eq!(rgb.config().hue, RGB_DEFAULT_HUE.wrapping_sub(RGB_HUE_STEP));
        rgb.step_sat(Direction::Up);
        assert_eq!(rgb.config().sat, 255);
        for _ in 0..20 {
            rgb.step_val(Direction::Down);
        }
        assert_eq!(rgb.config().val, 0);
        rgb.step_speed(Direction::Up);
        assert_eq!(rgb.config().speed, RGB_DEFAULT_SPEED + RGB_SPEED_STEP);
    }
}
