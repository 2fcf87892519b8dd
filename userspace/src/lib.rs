//! Userspace behaviors for the GMMK Pro (rev1, ANSI) firmware.
//!
//! Everything in here is independent of the MCU and of the keyboard framework:
//! the firmware feeds key, layer and host LED events into a [`Session`] and acts
//! on the [`Effect`]s it returns. Rendering goes into a plain [`Frame`] of RGB
//! values which the firmware hands to the LED driver.

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod encoder;
pub mod idle;
pub mod keys;
pub mod layer;
pub mod layout;
pub mod macros;
pub mod numlock;
pub mod report;
pub mod rgb;
pub mod session;

pub use config::UserConfig;
pub use encoder::{Direction, EncoderCommand};
pub use keys::{CustomKey, Key, KeyInput, Modifiers};
pub use layer::Layer;
pub use layout::HiddenKey;
pub use macros::{GameMacro, MacroPlan, MacroStep};
pub use numlock::HostLeds;
pub use report::{KeyboardState, Playback, PlaybackEvent};
pub use rgb::{Frame, LED_COUNT, RgbMatrix};
pub use session::{Effect, Session};
