//! Keycodes the session reads or emits.

/// Basic keys with their HID keyboard usage ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    A,
    D,
    I,
    J,
    K,
    L,
    M,
    N,
    S,
    U,
    Comma,
    NumLock,
}

impl Key {
    pub const fn usage(self) -> u8 {
        match self {
            Key::A => 0x04,
            Key::D => 0x07,
            Key::I => 0x0C,
            Key::J => 0x0D,
            Key::K => 0x0E,
            Key::L => 0x0F,
            Key::M => 0x10,
            Key::N => 0x11,
            Key::S => 0x16,
            Key::U => 0x18,
            Key::Comma => 0x36,
            Key::NumLock => 0x53,
        }
    }
}

/// HID modifier byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const LCTRL: Self = Self(0x01);
    pub const LSHIFT: Self = Self(0x02);
    pub const LALT: Self = Self(0x04);
    pub const LGUI: Self = Self(0x08);
    pub const RCTRL: Self = Self(0x10);
    pub const RSHIFT: Self = Self(0x20);
    pub const RALT: Self = Self(0x40);
    pub const RGUI: Self = Self(0x80);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Either shift key.
    pub const fn shift(self) -> bool {
        self.0 & (Self::LSHIFT.0 | Self::RSHIFT.0) != 0
    }
}

/// Keycodes owned by this firmware. The framework carries them as its user
/// keycodes, `User0` being [`CustomKey::WinLock`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CustomKey {
    WinLock = 0,
    TimeoutUp = 1,
    TimeoutDown = 2,
    NightMode = 3,
    Macro1 = 4,
    Macro2 = 5,
    Macro3 = 6,
    Macro4 = 7,
    RgbToggle = 8,
    RgbModeNext = 9,
    RgbModePrev = 10,
    RgbSpeedUp = 11,
    RgbSpeedDown = 12,
    EncoderCw = 13,
    EncoderCcw = 14,
    ClearSettings = 15,
}

impl CustomKey {
    pub const fn from_index(index: u8) -> Option<Self> {
        Some(match index {
            0 => CustomKey::WinLock,
            1 => CustomKey::TimeoutUp,
            2 => CustomKey::TimeoutDown,
            3 => CustomKey::NightMode,
            4 => CustomKey::Macro1,
            5 => CustomKey::Macro2,
            6 => CustomKey::Macro3,
            7 => CustomKey::Macro4,
            8 => CustomKey::RgbToggle,
            9 => CustomKey::RgbModeNext,
            10 => CustomKey::RgbModePrev,
            11 => CustomKey::RgbSpeedUp,
            12 => CustomKey::RgbSpeedDown,
            13 => CustomKey::EncoderCw,
            14 => CustomKey::EncoderCcw,
            15 => CustomKey::ClearSettings,
            _ => return None,
        })
    }

    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// A resolved key event as the session sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyInput {
    Key(Key),
    Modifier(Modifiers),
    Custom(CustomKey),
    /// Any other keyboard key, as its HID usage id.
    Usage(u8),
    /// An action that sends no keyboard key, like a layer switch.
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_key_index_matches_discriminant() {
        for index in 0..16 {
            let key = CustomKey::from_index(index).unwrap();
            assert_eq!(key.index(), index);
        }
        assert_eq!(CustomKey::from_index(16), None);
    }

    #[test]
    fn shift_detects_either_side() {
        assert!(Modifiers::LSHIFT.shift());
        assert!(Modifiers::RSHIFT.shift());
        assert!(!Modifiers::RCTRL.shift());

        let mut mods = Modifiers::NONE;
        mods.insert(Modifiers::RSHIFT);
        mods.insert(Modifiers::LCTRL);
        assert!(mods.contains(Modifiers::RSHIFT));
        assert!(!mods.contains(Modifiers::LSHIFT));
        mods.remove(Modifiers::RSHIFT);
        assert!(!mods.shift());
        assert_eq!(mods.bits(), 0x01);
    }
}
