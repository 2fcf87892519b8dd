use gmmk_userspace::CustomKey;
use gmmk_userspace::layer::{KEYMAP_LAYERS, WIN_LOCK_LAYER};
use gmmk_userspace::layout::WIN_KEY;
use rmk::types::action::{EncoderAction, KeyAction};
use rmk::types::keycode::KeyCode;
use rmk::types::modifier::ModifierCombination;
use rmk::{a, df, encoder, k, mo, to, wm};

const fn user(key: CustomKey) -> KeyCode {
    match key {
        CustomKey::WinLock => KeyCode::User0,
        CustomKey::TimeoutUp => KeyCode::User1,
        CustomKey::TimeoutDown => KeyCode::User2,
        CustomKey::NightMode => KeyCode::User3,
        CustomKey::Macro1 => KeyCode::User4,
        CustomKey::Macro2 => KeyCode::User5,
        CustomKey::Macro3 => KeyCode::User6,
        CustomKey::Macro4 => KeyCode::User7,
        CustomKey::RgbToggle => KeyCode::User8,
        CustomKey::RgbModeNext => KeyCode::User9,
        CustomKey::RgbModePrev => KeyCode::User10,
        CustomKey::RgbSpeedUp => KeyCode::User11,
        CustomKey::RgbSpeedDown => KeyCode::User12,
        CustomKey::EncoderCw => KeyCode::User13,
        CustomKey::EncoderCcw => KeyCode::User14,
        CustomKey::ClearSettings => KeyCode::User15,
    }
}

/// Reverse of the keycodes handed out above.
pub(crate) fn custom_key(keycode: KeyCode) -> Option<CustomKey> {
    let index = match keycode {
        KeyCode::User0 => 0,
        KeyCode::User1 => 1,
        KeyCode::User2 => 2,
        KeyCode::User3 => 3,
        KeyCode::User4 => 4,
        KeyCode::User5 => 5,
        KeyCode::User6 => 6,
        KeyCode::User7 => 7,
        KeyCode::User8 => 8,
        KeyCode::User9 => 9,
        KeyCode::User10 => 10,
        KeyCode::User11 => 11,
        KeyCode::User12 => 12,
        KeyCode::User13 => 13,
        KeyCode::User14 => 14,
        KeyCode::User15 => 15,
        _ => return None,
    };
    CustomKey::from_index(index)
}

const WIN_LOCK: KeyCode = user(CustomKey::WinLock);
const NIGHT_MODE: KeyCode = user(CustomKey::NightMode);
const MACRO1: KeyCode = user(CustomKey::Macro1);
const MACRO2: KeyCode = user(CustomKey::Macro2);
const MACRO3: KeyCode = user(CustomKey::Macro3);
const MACRO4: KeyCode = user(CustomKey::Macro4);
const RGB_TOG: KeyCode = user(CustomKey::RgbToggle);
const RGB_MOD: KeyCode = user(CustomKey::RgbModeNext);
const RGB_RMOD: KeyCode = user(CustomKey::RgbModePrev);
const RGB_SPI: KeyCode = user(CustomKey::RgbSpeedUp);
const RGB_SPD: KeyCode = user(CustomKey::RgbSpeedDown);
const ENC_CW: KeyCode = user(CustomKey::EncoderCw);
const ENC_CCW: KeyCode = user(CustomKey::EncoderCcw);
const EE_CLR: KeyCode = user(CustomKey::ClearSettings);

// Lock the PC
const GUI: ModifierCombination = ModifierCombination::new().with_left_gui(true);

const _______: KeyAction = a!(Transparent);

pub(crate) const COL: usize = 8;
pub(crate) const ROW: usize = 11;
pub(crate) const NUM_LAYER: usize = KEYMAP_LAYERS;
pub(crate) const NUM_ENCODER: usize = 1;

#[rustfmt::skip]
const BASE: [[KeyAction; COL]; ROW] = gmmk_layout!(
    k!(Escape),   k!(F1),   k!(F2),   k!(F3),   k!(F4),   k!(F5),   k!(F6),   k!(F7),   k!(F8),   k!(F9),      k!(F10),       k!(F11),        k!(F12),       k!(Delete),    k!(AudioMute),
    k!(Grave),    k!(Kc1),  k!(Kc2),  k!(Kc3),  k!(Kc4),  k!(Kc5),  k!(Kc6),  k!(Kc7),  k!(Kc8),  k!(Kc9),     k!(Kc0),       k!(Minus),      k!(Equal),     k!(Backspace), k!(Home),
    k!(Tab),      k!(Q),    k!(W),    k!(E),    k!(R),    k!(T),    k!(Y),    k!(U),    k!(I),    k!(O),       k!(P),         k!(LeftBracket), k!(RightBracket), k!(Backslash), k!(PageUp),
    k!(CapsLock), k!(A),    k!(S),    k!(D),    k!(F),    k!(G),    k!(H),    k!(J),    k!(K),    k!(L),       k!(Semicolon), k!(Quote),      k!(Enter),     k!(PageDown),
    k!(LShift),   k!(Z),    k!(X),    k!(C),    k!(V),    k!(B),    k!(N),    k!(M),    k!(Comma), k!(Dot),    k!(Slash),     k!(RShift),     k!(Up),        k!(End),
    k!(LCtrl),    k!(LGui), k!(LAlt), k!(Space), k!(RAlt), mo!(2), k!(RCtrl), k!(Left), k!(Down), k!(Right)
    ; to!(2), a!(No), df!(0), df!(1)
);

// `df!` only takes literals
const _: () = assert!(WIN_LOCK_LAYER == 1);

/// Base layer with the left Windows key disabled.
const fn win_locked(layer: [[KeyAction; COL]; ROW]) -> [[KeyAction; COL]; ROW] {
    let mut layer = layer;
    layer[WIN_KEY.0 as usize][WIN_KEY.1 as usize] = a!(No);
    layer
}

#[rustfmt::skip]
pub const fn get_default_keymap() -> [[[KeyAction; COL]; ROW]; NUM_LAYER] {
    [
        BASE,
        win_locked(BASE),
        // Fn1: media, RGB and system keys
        gmmk_layout!(
            kc!(EE_CLR), _______, _______, _______, _______, _______, k!(MediaPrevTrack), k!(MediaPlayPause), k!(MediaNextTrack), _______, k!(Pause), k!(ScrollLock), k!(PrintScreen), k!(Insert), k!(SystemSleep),
            _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______,
            _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, k!(Bootloader), _______,
            _______, _______, _______, _______, _______, _______, _______, _______, _______, wm!(L, GUI), _______, _______, _______, _______,
            _______, kc!(NIGHT_MODE), kc!(RGB_TOG), _______, _______, _______, k!(NumLock), _______, _______, _______, _______, _______, kc!(RGB_MOD), _______,
            _______, kc!(WIN_LOCK), _______, _______, _______, _______, _______, kc!(RGB_SPD), kc!(RGB_RMOD), kc!(RGB_SPI)
            ; to!(3), to!(0), _______, _______
        ),
        // Fn2: numpad
        gmmk_layout!(
            _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______,
            _______, _______, _______, _______, _______, _______, _______, k!(Kp7), k!(Kp8), k!(Kp9), _______, k!(KpMinus), k!(KpPlus), _______, _______,
            _______, _______, _______, _______, _______, _______, _______, k!(Kp4), k!(Kp5), k!(Kp6), _______, _______, _______, _______, _______,
            _______, _______, _______, _______, _______, _______, _______, k!(Kp1), k!(Kp2), k!(Kp3), _______, _______, _______, _______,
            _______, _______, _______, _______, _______, _______, _______, k!(Kp0), _______, _______, _______, _______, _______, _______,
            _______, _______, _______, _______, _______, _______, _______, _______, _______, _______
            ; to!(4), to!(2), _______, _______
        ),
        // Fn3
        gmmk_layout!(
            _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______,
            _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______,
            _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______,
            _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, k!(Kc0), _______, _______, _______,
            _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______,
            _______, _______, _______, k!(W), _______, _______, _______, _______, _______, _______
            ; to!(5), to!(3), _______, _______
        ),
        // Fn4: game macros
        gmmk_layout!(
            _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______,
            _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______,
            _______, _______, _______, _______, _______, _______, _______, kc!(MACRO4), _______, _______, _______, _______, _______, _______, _______,
            _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______, _______,
            _______, _______, _______, _______, _______, _______, kc!(MACRO2), kc!(MACRO3), kc!(MACRO1), _______, _______, _______, _______, _______,
            _______, _______, _______, _______, _______, _______, _______, _______, _______, _______
            ; a!(No), to!(4), _______, _______
        ),
    ]
}

/// Every layer turns the encoder into custom keys; what a detent does is
/// decided from the held modifiers and the active layer.
pub const fn get_default_encoder_map() -> [[EncoderAction; NUM_ENCODER]; NUM_LAYER] {
    [[encoder!(kc!(ENC_CW), kc!(ENC_CCW))]; NUM_LAYER]
}

