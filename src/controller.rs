use defmt::{debug, info, unwrap, warn};
use embassy_stm32::pac;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Timer};
use gmmk_userspace::macros::TAP_MS;
use gmmk_userspace::rgb::LED_COUNT;
use gmmk_userspace::{
    Direction, Effect, Frame, HiddenKey, HostLeds, Key, KeyInput, KeyboardState, Modifiers,
    Playback, PlaybackEvent, Session, UserConfig,
};
use rmk::channel::{CONTROLLER_CHANNEL, ControllerSub, EVENT_CHANNEL, KEYBOARD_REPORT_CHANNEL};
use rmk::controller::{Controller, PollingController};
use rmk::event::{ControllerEvent, Event, KeyboardEvent};
use rmk::hid::Report;
use rmk::types::action::{Action, KeyAction};
use rmk::types::keycode::KeyCode;
use smart_leds::{RGB8, SmartLedsWrite};
use usbd_hid::descriptor::{KeyboardReport, MediaKey, MediaKeyboardReport};

use crate::keymap::custom_key;

/// Work that waits on timers, played outside the controller's event loop.
enum Job {
    Reports(Playback),
    Hidden(HiddenKey),
    Volume(Direction),
}

static JOBS: Channel<CriticalSectionRawMutex, Job, 8> = Channel::new();

/// Plays queued reports and taps one after another.
pub async fn run_jobs() {
    loop {
        match JOBS.receive().await {
            Job::Reports(playback) => {
                for event in playback {
                    match event {
                        PlaybackEvent::Report(state) => send_keyboard(state).await,
                        PlaybackEvent::Wait(ms) => Timer::after_millis(u64::from(ms)).await,
                    }
                }
            }
            Job::Hidden(key) => tap_hidden(key).await,
            Job::Volume(direction) => {
                let key = match direction {
                    Direction::Up => MediaKey::VolumeIncrement,
                    Direction::Down => MediaKey::VolumeDecrement,
                };
                send_media(key as u16).await;
                Timer::after_millis(u64::from(TAP_MS)).await;
                send_media(0).await;
            }
        }
    }
}

/// Feeds keyboard events into the userspace [`Session`], carries out what it
/// asks for and drives the RGB matrix.
pub struct UserspaceController<W> {
    leds: W,
    sub: ControllerSub,
    session: Session,
    frame: Frame,
}

impl<W: SmartLedsWrite<Color = RGB8>> UserspaceController<W> {
    pub fn new(leds: W, config: UserConfig) -> Self {
        let mut session = Session::new(config);
        session.start(now());
        Self {
            leds,
            sub: unwrap!(CONTROLLER_CHANNEL.subscriber()),
            session,
            frame: [RGB8::default(); LED_COUNT],
        }
    }

    /// Queues the effect, building reports on the keys held right now.
    fn queue(&mut self, effect: Option<Effect>) {
        let Some(effect) = effect else {
            return;
        };
        let job = match effect {
            Effect::Macro(_) | Effect::Register(_) | Effect::Unregister(_) | Effect::Tap(_) => {
                let Some(playback) = effect.playback(self.session.report_state()) else {
                    return;
                };
                debug!("Queueing {} report steps", playback.len());
                Job::Reports(playback)
            }
            Effect::GuiLock(locked) => {
                info!("Windows key lock: {}", locked);
                Job::Hidden(if locked {
                    HiddenKey::GuiLock
                } else {
                    HiddenKey::GuiUnlock
                })
            }
            Effect::StepLayer(Direction::Up) => Job::Hidden(HiddenKey::LayerNext),
            Effect::StepLayer(Direction::Down) => Job::Hidden(HiddenKey::LayerPrev),
            Effect::Volume(direction) => Job::Volume(direction),
        };
        if JOBS.try_send(job).is_err() {
            warn!("Job queue full, dropping {}", effect);
        }
    }
}

impl<W: SmartLedsWrite<Color = RGB8>> Controller for UserspaceController<W> {
    type Event = ControllerEvent;

    async fn process_event(&mut self, event: Self::Event) {
        match event {
            ControllerEvent::Key(keyboard_event, key_action) => {
                let input = key_input(key_action);
                let effect = self.session.process_key(input, keyboard_event.pressed, now());
                self.queue(effect);
            }
            ControllerEvent::Layer(layer) => {
                info!("Layer: {}", layer);
                let effect = self.session.on_layer_change(layer);
                self.queue(effect);
            }
            ControllerEvent::KeyboardIndicator(indicator) => {
                let leds = HostLeds {
                    num_lock: indicator.num_lock(),
                    caps_lock: indicator.caps_lock(),
                    scroll_lock: indicator.scroll_lock(),
                };
                debug!("Host LEDs: {}", leds);
                let effect = self.session.on_host_leds(leds);
                self.queue(effect);
            }
            _ => {}
        }
    }

    async fn next_message(&mut self) -> Self::Event {
        self.sub.next_message_pure().await
    }
}

impl<W: SmartLedsWrite<Color = RGB8>> PollingController for UserspaceController<W> {
    const INTERVAL: Duration = Duration::from_millis(20);

    async fn update(&mut self) {
        let now = now();
        let suspended = usb_suspended();
        if self.session.set_usb_suspended(suspended) {
            info!("USB suspended: {}", suspended);
        }
        if self.session.tick(now) {
            info!("Idle timeout reached, RGB off");
        }
        self.session.render(&mut self.frame, now);
        let _ = self.leds.write(self.frame.iter().cloned());
    }
}

fn now() -> u64 {
    Instant::now().as_millis()
}

/// The USB driver forces the peripheral into suspend while the bus is idle.
fn usb_suspended() -> bool {
    pac::USB.cntr().read().fsusp()
}

fn key_input(action: KeyAction) -> KeyInput {
    let keycode = match action {
        KeyAction::Single(Action::Key(keycode)) | KeyAction::Tap(Action::Key(keycode)) => keycode,
        _ => return KeyInput::Other,
    };
    if let Some(custom) = custom_key(keycode) {
        return KeyInput::Custom(custom);
    }
    match keycode {
        KeyCode::A => KeyInput::Key(Key::A),
        KeyCode::D => KeyInput::Key(Key::D),
        KeyCode::S => KeyInput::Key(Key::S),
        KeyCode::LCtrl => KeyInput::Modifier(Modifiers::LCTRL),
        KeyCode::LShift => KeyInput::Modifier(Modifiers::LSHIFT),
        KeyCode::LAlt => KeyInput::Modifier(Modifiers::LALT),
        KeyCode::LGui => KeyInput::Modifier(Modifiers::LGUI),
        KeyCode::RCtrl => KeyInput::Modifier(Modifiers::RCTRL),
        KeyCode::RShift => KeyInput::Modifier(Modifiers::RSHIFT),
        KeyCode::RAlt => KeyInput::Modifier(Modifiers::RALT),
        KeyCode::RGui => KeyInput::Modifier(Modifiers::RGUI),
        _ => match keycode as u16 {
            // HID keyboard page, `A` through `ExSel`
            usage @ 0x04..=0xA4 => KeyInput::Usage(usage as u8),
            _ => KeyInput::Other,
        },
    }
}

async fn send_keyboard(state: KeyboardState) {
    KEYBOARD_REPORT_CHANNEL
        .send(Report::KeyboardReport(KeyboardReport {
            modifier: state.modifiers.bits(),
            reserved: 0,
            leds: 0,
            keycodes: state.keycodes,
        }))
        .await;
}

async fn send_media(usage_id: u16) {
    KEYBOARD_REPORT_CHANNEL
        .send(Report::MediaKeyboardReport(MediaKeyboardReport { usage_id }))
        .await;
}

/// Presses and releases a matrix position without a switch so the keymap
/// action placed there runs inside the keyboard.
async fn tap_hidden(key: HiddenKey) {
    let (row, col) = key.position();
    EVENT_CHANNEL
        .send(Event::Key(KeyboardEvent::key(row, col, true)))
        .await;
    Timer::after_millis(u64::from(TAP_MS)).await;
    EVENT_CHANNEL
        .send(Event::Key(KeyboardEvent::key(row, col, false)))
        .await;
}
