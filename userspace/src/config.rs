/// Idle timeout used until the user changes it, in minutes.
pub const TIMEOUT_THRESHOLD_DEFAULT: u16 = 4;

/// Upper limit for the idle timeout, in minutes (2 hours and 20 minutes).
///
/// The function row indicator can show up to 139; 140 gets its own marker.
pub const TIMEOUT_THRESHOLD_MAX: u16 = 140;

/// Matrix debounce time in milliseconds. The framework reads it from
/// `keyboard.toml`.
pub const DEBOUNCE_MS: u16 = 8;

pub const RGB_DEFAULT_HUE: u8 = 24;
pub const RGB_DEFAULT_SAT: u8 = 255;
pub const RGB_DEFAULT_VAL: u8 = 127;
pub const RGB_DEFAULT_SPEED: u8 = 127;

pub const RGB_HUE_STEP: u8 = 32;
pub const RGB_SAT_STEP: u8 = 17;
pub const RGB_VAL_STEP: u8 = 17;
pub const RGB_SPEED_STEP: u8 = 16;

/// Per-user switches for the session behaviors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UserConfig {
    /// Force numlock on once the host has reported its LED state, so the
    /// numpad layer always has predictable results.
    pub startup_numlock: bool,
    /// Light the numlock indicator when numlock is *off* instead of on.
    pub invert_numlock_indicator: bool,
    /// Start with night mode active.
    pub startup_night_mode: bool,
    /// Idle timeout in minutes, 0 disables it.
    pub timeout_minutes: u16,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            startup_numlock: true,
            invert_numlock_indicator: false,
            startup_night_mode: false,
            timeout_minutes: TIMEOUT_THRESHOLD_DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_toml_carries_debounce_time() {
        let toml = include_str!("../../keyboard.toml");
        let line = format!("debounce_time = {DEBOUNCE_MS}");
        assert!(toml.lines().any(|l| l.trim() == line), "missing `{line}`");
    }
}
