//! Ties the behaviors together the way the firmware sees them: one call per
//! key event, layer change, host LED report and frame.

use crate::config::UserConfig;
use crate::encoder::{self, Direction, EncoderCommand};
use crate::idle::IdleTimeout;
use crate::keys::{CustomKey, Key, KeyInput, Modifiers};
use crate::layer::Layer;
use crate::macros::{self, GameMacro, HeldKeys, MacroPlan, MacroStep, TAP_MS};
use crate::numlock::{HostLeds, NumlockSync};
use crate::report::{KeyboardState, Playback};
use crate::rgb::indicators::{self, IndicatorState};
use crate::rgb::{Frame, RgbMatrix, color};

/// Work the firmware has to do on behalf of the session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Replay the steps on top of [`Session::report_state`].
    Macro(MacroPlan),
    Register(Key),
    Unregister(Key),
    Tap(Key),
    /// Switch the default layer to the base variant with (`true`) or without
    /// the left Windows key removed.
    GuiLock(bool),
    StepLayer(Direction),
    Volume(Direction),
}

impl Effect {
    /// The keyboard reports this effect sends on top of `held`, or `None` when
    /// it sends none.
    pub fn playback(&self, held: KeyboardState) -> Option<Playback> {
        let plan = match self {
            Effect::Macro(plan) => plan.clone(),
            Effect::Register(key) => macros::plan_of(&[MacroStep::Down(*key)]),
            Effect::Unregister(key) => macros::plan_of(&[MacroStep::Up(*key)]),
            Effect::Tap(key) => macros::plan_of(&[
                MacroStep::Down(*key),
                MacroStep::Delay(TAP_MS),
                MacroStep::Up(*key),
            ]),
            Effect::GuiLock(_) | Effect::StepLayer(_) | Effect::Volume(_) => return None,
        };
        Some(Playback::new(held, plan))
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    config: UserConfig,
    idle: IdleTimeout,
    rgb: RgbMatrix,
    night_mode: bool,
    gui_locked: bool,
    held: HeldKeys,
    /// Every key and modifier known to be down.
    pressed: KeyboardState,
    layer: Layer,
    leds: HostLeds,
    numlock: NumlockSync,
    usb_suspended: bool,
}

impl Session {
    pub fn new(config: UserConfig) -> Self {
        Self {
            config,
            idle: IdleTimeout::new(config.timeout_minutes),
            rgb: RgbMatrix::default(),
            night_mode: config.startup_night_mode,
            gui_locked: false,
            held: HeldKeys::default(),
            pressed: KeyboardState::new(Modifiers::NONE),
            layer: Layer::Base,
            leds: HostLeds::default(),
            numlock: NumlockSync::new(config.startup_numlock),
            usb_suspended: false,
        }
    }

    /// Starts the idle timer. Call once the keyboard is up.
    pub fn start(&mut self, now: u64) {
        self.idle.reset(now);
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn gui_locked(&self) -> bool {
        self.gui_locked
    }

    pub fn night_mode(&self) -> bool {
        self.night_mode
    }

    pub fn rgb(&self) -> &RgbMatrix {
        &self.rgb
    }

    pub fn timeout_threshold(&self) -> u16 {
        self.idle.threshold()
    }

    pub fn host_leds(&self) -> HostLeds {
        self.leds
    }

    /// Keys this session knows to be down, as a report to build macros on.
    pub fn report_state(&self) -> KeyboardState {
        self.pressed
    }

    pub fn indicator_state(&self) -> IndicatorState {
        IndicatorState {
            night_mode: self.night_mode,
            leds: self.leds,
            invert_numlock: self.config.invert_numlock_indicator,
            gui_locked: self.gui_locked,
            layer: self.layer,
            timeout_threshold: self.idle.threshold(),
        }
    }

    pub fn process_key(&mut self, input: KeyInput, pressed: bool, now: u64) -> Option<Effect> {
        match input {
            KeyInput::Key(key) => {
                match key {
                    Key::A => self.held.left = pressed,
                    Key::D => self.held.right = pressed,
                    Key::S => self.held.down = pressed,
                    _ if pressed => self.wake(now),
                    _ => {}
                }
                self.track(key.usage(), pressed);
                None
            }
            KeyInput::Usage(usage) => {
                if pressed {
                    self.wake(now);
                }
                self.track(usage, pressed);
                None
            }
            KeyInput::Custom(key) => self.process_custom(key, pressed, now),
            KeyInput::Modifier(mods) => {
                if pressed {
                    self.pressed.modifiers.insert(mods);
                    self.wake(now);
                } else {
                    self.pressed.modifiers.remove(mods);
                }
                None
            }
            KeyInput::Other => {
                if pressed {
                    self.wake(now);
                }
                None
            }
        }
    }

    fn track(&mut self, usage: u8, pressed: bool) {
        if pressed {
            self.pressed.press_usage(usage);
        } else {
            self.pressed.release_usage(usage);
        }
    }

    fn process_custom(&mut self, key: CustomKey, pressed: bool, now: u64) -> Option<Effect> {
        let game_macro = match key {
            CustomKey::Macro1 => Some(GameMacro::Hpb),
            CustomKey::Macro2 => Some(GameMacro::Giganter),
            CustomKey::Macro3 => Some(GameMacro::Buster),
            CustomKey::Macro4 => Some(GameMacro::Flick),
            _ => None,
        };
        if let Some(game_macro) = game_macro {
            let fallback = game_macro.fallback_key();
            if !pressed {
                return Some(Effect::Unregister(fallback));
            }
            return Some(match game_macro.plan(self.held, self.pressed.modifiers.shift()) {
                Some(plan) => Effect::Macro(plan),
                None => Effect::Register(fallback),
            });
        }

        if !pressed {
            return None;
        }

        match key {
            CustomKey::WinLock => {
                self.gui_locked = !self.gui_locked;
                return Some(Effect::GuiLock(self.gui_locked));
            }
            CustomKey::TimeoutUp => self.idle.update_threshold(true),
            CustomKey::TimeoutDown => self.idle.update_threshold(false),
            CustomKey::NightMode => self.night_mode = !self.night_mode,
            CustomKey::EncoderCw => return self.turn_encoder(true),
            CustomKey::EncoderCcw => return self.turn_encoder(false),
            CustomKey::RgbToggle => {
                self.wake(now);
                self.rgb.toggle();
            }
            CustomKey::RgbModeNext => {
                self.wake(now);
                self.rgb.step_mode(Direction::Up);
            }
            CustomKey::RgbModePrev => {
                self.wake(now);
                self.rgb.step_mode(Direction::Down);
            }
            CustomKey::RgbSpeedUp => {
                self.wake(now);
                self.rgb.step_speed(Direction::Up);
            }
            CustomKey::RgbSpeedDown => {
                self.wake(now);
                self.rgb.step_speed(Direction::Down);
            }
            CustomKey::ClearSettings => {
                self.wake(now);
                self.clear_settings();
            }
            CustomKey::Macro1 | CustomKey::Macro2 | CustomKey::Macro3 | CustomKey::Macro4 => {}
        }
        None
    }

    fn turn_encoder(&mut self, clockwise: bool) -> Option<Effect> {
        match encoder::resolve(self.pressed.modifiers, self.layer, clockwise) {
            EncoderCommand::StepLayer(direction) => {
                let target = match direction {
                    Direction::Up => self.layer.next(),
                    Direction::Down => self.layer.prev(),
                };
                return target.map(|_| Effect::StepLayer(direction));
            }
            EncoderCommand::Saturation(direction) => self.rgb.step_sat(direction),
            EncoderCommand::Hue(direction) => self.rgb.step_hue(direction),
            EncoderCommand::Brightness(direction) => self.rgb.step_val(direction),
            EncoderCommand::Timeout(direction) => self.idle.update_threshold(direction.is_up()),
            EncoderCommand::Volume(direction) => return Some(Effect::Volume(direction)),
        }
        None
    }

    fn wake(&mut self, now: u64) {
        self.rgb.enable();
        self.idle.reset(now);
    }

    /// Back to the defaults. The Windows key lock is left as it is, the
    /// default layer lives in the keymap.
    fn clear_settings(&mut self) {
        self.idle.set_threshold(self.config.timeout_minutes);
        self.night_mode = self.config.startup_night_mode;
        self.rgb = RgbMatrix::default();
    }

    /// `layer` is the highest active keymap layer.
    pub fn on_layer_change(&mut self, layer: u8) -> Option<Effect> {
        self.layer = Layer::from_keymap_index(layer);
        self.numlock
            .on_layer_change(self.layer, self.leds.num_lock)
            .then_some(Effect::Tap(Key::NumLock))
    }

    pub fn on_host_leds(&mut self, leds: HostLeds) -> Option<Effect> {
        self.leds = leds;
        self.numlock
            .on_host_leds(leds.num_lock)
            .then_some(Effect::Tap(Key::NumLock))
    }

    /// Returns `true` when this tick switched the matrix off.
    pub fn tick(&mut self, now: u64) -> bool {
        if self.idle.tick(now) && self.rgb.is_enabled() {
            self.rgb.disable();
            return true;
        }
        false
    }

    /// The matrix stays dark while the host has the bus suspended. Returns
    /// `true` when the state changed.
    pub fn set_usb_suspended(&mut self, suspended: bool) -> bool {
        let changed = self.usb_suspended != suspended;
        self.usb_suspended = suspended;
        changed
    }

    pub fn render(&self, frame: &mut Frame, now: u64) {
        if self.usb_suspended {
            frame.fill(color::OFF);
            return;
        }
        self.rgb.render(frame, now);
        if self.rgb.is_enabled() {
            indicators::paint(frame, &self.indicator_state());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::PlaybackEvent;
    use crate::rgb::led_map;
    use std::vec::Vec;
    use crate::rgb::{LED_COUNT, Mode};

    const MINUTE: u64 = 60_000;

    fn session() -> Session {
        let mut session = Session::new(UserConfig::default());
        session.start(0);
        session
    }

    fn press(session: &mut Session, input: KeyInput, now: u64) -> Option<Effect> {
        session.process_key(input, true, now)
    }

    fn release(session: &mut Session, input: KeyInput, now: u64) -> Option<Effect> {
        session.process_key(input, false, now)
    }

    fn expire(session: &mut Session) -> u64 {
        let mut now = 0;
        for _ in 0..session.timeout_threshold() {
            now += MINUTE;
            session.tick(now);
        }
        assert!(!session.rgb().is_enabled());
        now
    }

    #[test]
    fn idle_timeout_turns_rgb_off_once() {
        let mut s = session();
        assert!(!s.tick(3 * MINUTE));
        let mut switched = 0;
        for minute in 1..=6 {
            if s.tick(minute * MINUTE) {
                switched += 1;
            }
        }
        assert_eq!(switched, 1);
        assert!(!s.rgb().is_enabled());
    }

    #[test]
    fn key_press_wakes_rgb() {
        let mut s = session();
        let now = expire(&mut s);
        assert_eq!(press(&mut s, KeyInput::Other, now), None);
        assert!(s.rgb().is_enabled());
        // The timer restarted from the press.
        assert!(!s.tick(now + 3 * MINUTE));
    }

    #[test]
    fn releases_and_direction_keys_do_not_wake() {
        let mut s = session();
        let now = expire(&mut s);
        release(&mut s, KeyInput::Other, now);
        press(&mut s, KeyInput::Key(Key::A), now);
        press(&mut s, KeyInput::Custom(CustomKey::NightMode), now);
        press(&mut s, KeyInput::Custom(CustomKey::EncoderCw), now);
        assert!(!s.rgb().is_enabled());

        press(&mut s, KeyInput::Modifier(Modifiers::LCTRL), now);
        assert!(s.rgb().is_enabled());
    }

    #[test]
    fn rgb_toggle_after_timeout_wakes_then_toggles() {
        let mut s = session();
        let now = expire(&mut s);
        press(&mut s, KeyInput::Custom(CustomKey::RgbToggle), now);
        assert!(!s.rgb().is_enabled());
        press(&mut s, KeyInput::Custom(CustomKey::RgbToggle), now);
        assert!(!s.rgb().is_enabled());
    }

    #[test]
    fn rgb_keys_adjust_the_matrix() {
        let mut s = session();
        press(&mut s, KeyInput::Custom(CustomKey::RgbModePrev), 0);
        assert_eq!(s.rgb().config().mode, Mode::CycleAll);
        press(&mut s, KeyInput::Custom(CustomKey::RgbModeNext), 0);
        assert_eq!(s.rgb().config().mode, Mode::SolidColor);
        let speed = s.rgb().config().speed;
        press(&mut s, KeyInput::Custom(CustomKey::RgbSpeedDown), 0);
        assert!(s.rgb().config().speed < speed);
    }

    #[test]
    fn win_lock_toggles_default_layer() {
        let mut s = session();
        assert_eq!(
            press(&mut s, KeyInput::Custom(CustomKey::WinLock), 0),
            Some(Effect::GuiLock(true))
        );
        assert_eq!(release(&mut s, KeyInput::Custom(CustomKey::WinLock), 0), None);
        assert!(s.gui_locked());
        assert_eq!(
            press(&mut s, KeyInput::Custom(CustomKey::WinLock), 0),
            Some(Effect::GuiLock(false))
        );
    }

    #[test]
    fn timeout_keys_change_threshold() {
        let mut s = session();
        press(&mut s, KeyInput::Custom(CustomKey::TimeoutUp), 0);
        press(&mut s, KeyInput::Custom(CustomKey::TimeoutUp), 0);
        assert_eq!(s.timeout_threshold(), 6);
        press(&mut s, KeyInput::Custom(CustomKey::TimeoutDown), 0);
        assert_eq!(s.timeout_threshold(), 5);
    }

    #[test]
    fn macro_without_direction_types_fallback() {
        let mut s = session();
        assert_eq!(
            press(&mut s, KeyInput::Custom(CustomKey::Macro2), 0),
            Some(Effect::Register(Key::N))
        );
        assert_eq!(
            release(&mut s, KeyInput::Custom(CustomKey::Macro2), 0),
            Some(Effect::Unregister(Key::N))
        );
    }

    #[test]
    fn macro_with_direction_plays_sequence() {
        let mut s = session();
        press(&mut s, KeyInput::Key(Key::D), 0);
        press(&mut s, KeyInput::Key(Key::S), 0);
        let Some(Effect::Macro(plan)) = press(&mut s, KeyInput::Custom(CustomKey::Macro4), 0)
        else {
            panic!("expected a macro");
        };
        assert_eq!(plan[0], MacroStep::Down(Key::S));

        let state = s.report_state();
        assert!(state.is_pressed(Key::D));
        assert!(state.is_pressed(Key::S));
        assert!(!state.is_pressed(Key::A));

        // Release still clears the fallback key.
        assert_eq!(
            release(&mut s, KeyInput::Custom(CustomKey::Macro4), 0),
            Some(Effect::Unregister(Key::U))
        );
    }

    #[test]
    fn shift_is_passed_to_macros() {
        let mut s = session();
        press(&mut s, KeyInput::Key(Key::A), 0);
        let plain = press(&mut s, KeyInput::Custom(CustomKey::Macro1), 0);
        press(&mut s, KeyInput::Modifier(Modifiers::RSHIFT), 0);
        let shifted = press(&mut s, KeyInput::Custom(CustomKey::Macro1), 0);
        assert_ne!(plain, shifted);
        assert_eq!(s.report_state().modifiers, Modifiers::RSHIFT);
    }

    #[test]
    fn encoder_volume_and_timeout() {
        let mut s = session();
        assert_eq!(
            press(&mut s, KeyInput::Custom(CustomKey::EncoderCcw), 0),
            Some(Effect::Volume(Direction::Down))
        );
        s.on_layer_change(Layer::Fn1.keymap_index());
        assert_eq!(press(&mut s, KeyInput::Custom(CustomKey::EncoderCw), 0), None);
        assert_eq!(s.timeout_threshold(), 5);
    }

    #[test]
    fn encoder_layer_steps_stop_at_the_ends() {
        let mut s = session();
        press(&mut s, KeyInput::Modifier(Modifiers::LSHIFT), 0);
        assert_eq!(press(&mut s, KeyInput::Custom(CustomKey::EncoderCcw), 0), None);
        assert_eq!(
            press(&mut s, KeyInput::Custom(CustomKey::EncoderCw), 0),
            Some(Effect::StepLayer(Direction::Up))
        );
        s.on_layer_change(Layer::Fn4.keymap_index());
        assert_eq!(press(&mut s, KeyInput::Custom(CustomKey::EncoderCw), 0), None);
    }

    #[test]
    fn encoder_adjusts_rgb_with_right_modifiers() {
        let mut s = session();
        press(&mut s, KeyInput::Modifier(Modifiers::RALT), 0);
        press(&mut s, KeyInput::Custom(CustomKey::EncoderCcw), 0);
        let val = s.rgb().config().val;
        assert!(val < RgbMatrix::default().config().val);
        release(&mut s, KeyInput::Modifier(Modifiers::RALT), 0);
        assert_eq!(
            press(&mut s, KeyInput::Custom(CustomKey::EncoderCcw), 0),
            Some(Effect::Volume(Direction::Down))
        );
    }

    #[test]
    fn numpad_layer_syncs_numlock() {
        let mut s = Session::new(UserConfig {
            startup_numlock: false,
            ..UserConfig::default()
        });
        assert_eq!(
            s.on_layer_change(Layer::Fn2.keymap_index()),
            Some(Effect::Tap(Key::NumLock))
        );
        s.on_host_leds(HostLeds {
            num_lock: true,
            ..HostLeds::default()
        });
        assert_eq!(
            s.on_layer_change(Layer::Base.keymap_index()),
            Some(Effect::Tap(Key::NumLock))
        );
        // Win-locked base is still the base layer.
        assert_eq!(s.on_layer_change(1), None);
    }

    #[test]
    fn startup_numlock_waits_for_host_report() {
        let mut s = session();
        assert_eq!(
            s.on_host_leds(HostLeds::default()),
            Some(Effect::Tap(Key::NumLock))
        );
        assert_eq!(s.on_host_leds(HostLeds::default()), None);
    }

    #[test]
    fn clear_settings_restores_defaults() {
        let mut s = session();
        press(&mut s, KeyInput::Custom(CustomKey::TimeoutUp), 0);
        press(&mut s, KeyInput::Custom(CustomKey::NightMode), 0);
        press(&mut s, KeyInput::Custom(CustomKey::RgbModeNext), 0);
        press(&mut s, KeyInput::Custom(CustomKey::WinLock), 0);
        press(&mut s, KeyInput::Custom(CustomKey::ClearSettings), 0);
        assert_eq!(s.timeout_threshold(), 4);
        assert!(!s.night_mode());
        assert_eq!(*s.rgb(), RgbMatrix::default());
        assert!(s.gui_locked());
    }

    #[test]
    fn render_paints_indicators_only_when_enabled() {
        let mut s = session();
        press(&mut s, KeyInput::Custom(CustomKey::NightMode), 0);
        s.on_host_leds(HostLeds {
            num_lock: true,
            caps_lock: true,
            scroll_lock: false,
        });
        let mut frame = [color::WHITE; LED_COUNT];
        s.render(&mut frame, 0);
        assert_eq!(frame[led_map::CAPS], color::WHITE);
        assert_eq!(frame[led_map::N], color::ORANGE);
        assert_eq!(frame[led_map::ESC], color::OFF);

        expire(&mut s);
        let mut frame = [color::WHITE; LED_COUNT];
        s.render(&mut frame, 0);
        assert!(frame.iter().all(|led| *led == color::OFF));
    }

    #[test]
    fn fallback_key_keeps_other_held_keys() {
        let mut s = session();
        press(&mut s, KeyInput::Usage(Key::J.usage()), 0);
        let effect = press(&mut s, KeyInput::Custom(CustomKey::Macro3), 0).unwrap();
        assert_eq!(effect, Effect::Register(Key::M));

        let reports: Vec<_> = effect.playback(s.report_state()).unwrap().collect();
        let [PlaybackEvent::Report(down)] = reports.as_slice() else {
            panic!("expected one report, got {reports:?}");
        };
        assert!(down.is_pressed(Key::J));
        assert!(down.is_pressed(Key::M));

        let effect = release(&mut s, KeyInput::Custom(CustomKey::Macro3), 0).unwrap();
        let up = effect.playback(s.report_state()).unwrap().state();
        assert_eq!(up.keycodes, [Key::J.usage(), 0, 0, 0, 0, 0]);

        release(&mut s, KeyInput::Usage(Key::J.usage()), 0);
        assert_eq!(s.report_state(), KeyboardState::default());
    }

    #[test]
    fn numlock_tap_keeps_held_modifiers() {
        let mut s = Session::new(UserConfig {
            startup_numlock: false,
            ..UserConfig::default()
        });
        press(&mut s, KeyInput::Modifier(Modifiers::LSHIFT), 0);
        press(&mut s, KeyInput::Usage(0x5F), 0);
        let effect = s.on_layer_change(Layer::Fn2.keymap_index()).unwrap();
        let events: Vec<_> = effect.playback(s.report_state()).unwrap().collect();
        let [
            PlaybackEvent::Report(down),
            PlaybackEvent::Wait(TAP_MS),
            PlaybackEvent::Report(up),
        ] = events.as_slice()
        else {
            panic!("unexpected tap {events:?}");
        };
        assert!(down.is_pressed(Key::NumLock));
        assert_eq!(down.modifiers, Modifiers::LSHIFT);
        assert!(!up.is_pressed(Key::NumLock));
        assert_eq!(up.modifiers, Modifiers::LSHIFT);
        assert_eq!(up.keycodes[0], 0x5F);
    }

    #[test]
    fn queued_macro_does_not_hold_back_key_tracking() {
        let mut s = session();
        press(&mut s, KeyInput::Key(Key::D), 0);
        let effect = press(&mut s, KeyInput::Custom(CustomKey::Macro4), 0).unwrap();
        let mut playback = effect.playback(s.report_state()).unwrap();
        assert!(playback.len() > 2);
        playback.next();

        // Releases arriving while the macro plays land in the session.
        release(&mut s, KeyInput::Key(Key::D), 0);
        release(&mut s, KeyInput::Custom(CustomKey::Macro4), 0);
        assert!(!s.report_state().is_pressed(Key::D));

        let last = playback.by_ref().last();
        assert!(matches!(last, Some(PlaybackEvent::Report(_))));
        assert_eq!(
            press(&mut s, KeyInput::Custom(CustomKey::Macro4), 0),
            Some(Effect::Register(Key::U))
        );
    }

    #[test]
    fn non_report_effects_have_no_playback() {
        let state = KeyboardState::default();
        assert_eq!(Effect::GuiLock(true).playback(state), None);
        assert_eq!(Effect::Volume(Direction::Up).playback(state), None);
        assert_eq!(Effect::StepLayer(Direction::Down).playback(state), None);
    }

    #[test]
    fn usb_suspend_darkens_matrix_until_resume() {
        let mut s = session();
        assert!(s.set_usb_suspended(true));
        assert!(!s.set_usb_suspended(true));
        let mut frame = [color::WHITE; LED_COUNT];
        s.render(&mut frame, 0);
        assert!(frame.iter().all(|led| *led == color::OFF));
        assert!(s.rgb().is_enabled());

        assert!(s.set_usb_suspended(false));
        s.render(&mut frame, 0);
        assert!(frame.iter().any(|led| *led != color::OFF));
    }
}
