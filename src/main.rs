#![no_std]
#![no_main]

mod vial;
#[macro_use]
mod macros;
mod controller;
mod keymap;
mod led;

use controller::UserspaceController;
use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_stm32::flash::Flash;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::peripherals::USB;
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::Hertz;
use embassy_stm32::usb::{self, Driver};
use embassy_stm32::{Config, bind_interrupts};
use embassy_time::{Delay, Timer};
use gmmk_userspace::UserConfig;
use keymap::{COL, ROW};
use led::Aw20216;
use rmk::channel::EVENT_CHANNEL;
use rmk::config::{
    BehaviorConfig, DeviceConfig, PositionalConfig, RmkConfig, StorageConfig, VialConfig,
};
use rmk::controller::PollingController;
use rmk::debounce::default_debouncer::DefaultDebouncer;
use rmk::futures::future::join5;
use rmk::input_device::Runnable;
use rmk::input_device::rotary_encoder::RotaryEncoder;
use rmk::keyboard::Keyboard;
use rmk::storage::async_flash_wrapper;
use rmk::{initialize_encoder_keymap_and_storage, run_devices, run_rmk};
use vial::{VIAL_KEYBOARD_DEF, VIAL_KEYBOARD_ID};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    USB_LP_CAN_RX0 => usb::InterruptHandler<USB>;
});

// Esc + Enter
const UNLOCK_KEYS: &[(u8, u8)] = &[(1, 3), (10, 4)];

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("GMMK Pro RMK start!");
    // 8 MHz crystal, 72 MHz core, 48 MHz USB
    let mut config = Config::default();
    {
        use embassy_stm32::rcc::*;
        config.rcc.hse = Some(Hse {
            freq: Hertz(8_000_000),
            mode: HseMode::Oscillator,
        });
        config.rcc.pll = Some(Pll {
            src: PllSource::HSE,
            prediv: PllPreDiv::DIV1,
            mul: PllMul::MUL9,
        });
        config.rcc.sys = Sysclk::PLL1_P;
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV2;
        config.rcc.apb2_pre = APBPrescaler::DIV1;
        config.rcc.usb_pre = UsbPre::DIV1_5;
    }
    let mut p = embassy_stm32::init(config);

    // Pull D+ low so the host enumerates again after a reset
    {
        let _dp = Output::new(p.PA12.reborrow(), Level::Low, Speed::Low);
        Timer::after_millis(10).await;
    }

    // Initialize usb driver
    let driver = Driver::new(p.USB, Irqs, p.PA12, p.PA11);

    // Initialize flash
    let flash = async_flash_wrapper(Flash::new_blocking(p.FLASH));

    // Keyboard config
    let keyboard_device_config = DeviceConfig {
        vid: 0x320F,
        pid: 0x5044,
        manufacturer: "Glorious",
        product_name: "GMMK Pro RMK",
        serial_number: "vial:f64c2b3c:000001",
    };
    let vial_config = VialConfig::new(VIAL_KEYBOARD_ID, VIAL_KEYBOARD_DEF, UNLOCK_KEYS);
    let storage_config = StorageConfig {
        start_addr: 0x3C000, // Last 16KB of the 256KB flash
        num_sectors: 8,      // Pages are 2KB each on STM32F303
        clear_storage: false,
        clear_layout: false,
    };
    let rmk_config = RmkConfig {
        device_config: keyboard_device_config,
        vial_config,
        storage_config,
        ..Default::default()
    };

    // Initialize the storage and keymap
    let mut default_keymap = keymap::get_default_keymap();
    let mut key_config = PositionalConfig::default();
    let mut behavior_config = BehaviorConfig::default();
    let mut encoder_map = keymap::get_default_encoder_map();
    let (keymap, mut storage) = initialize_encoder_keymap_and_storage(
        &mut default_keymap,
        &mut encoder_map,
        flash,
        &storage_config,
        &mut behavior_config,
        &mut key_config,
    )
    .await;

    // Initialize the matrix and keyboard
    // Row to Column (Diodes pointing from Row to Column)
    //   Rows: B0..B10
    //   Columns: A0, A1, A2, A3, A4, A8, A9, A15
    #[rustfmt::skip]
    let (input_pins, output_pins) = config_matrix_pins_stm32! {
        peripherals: p,
        input: [PA0, PA1, PA2, PA3, PA4, PA8, PA9, PA15], // Columns
        output: [PB0, PB1, PB2, PB3, PB4, PB5, PB6, PB7, PB8, PB9, PB10] // Rows
    };

    // Debounce time comes from keyboard.toml
    let debouncer = DefaultDebouncer::new();
    // Matrix type: <Input, Output, Debouncer, INPUT_PIN_NUM, OUTPUT_PIN_NUM, COL2ROW>
    let mut matrix =
        ::rmk::matrix::Matrix::<_, _, _, COL, ROW, false>::new(input_pins, output_pins, debouncer);
    let mut keyboard = Keyboard::new(&keymap);

    // Initialize the encoder
    // Encoder Pin A: C15, Pin B: C14
    let pin_a = Input::new(p.PC15, Pull::Up);
    let pin_b = Input::new(p.PC14, Pull::Up);
    let mut encoder = RotaryEncoder::with_resolution(pin_a, pin_b, 4, false, 0);

    // Two AW20216 on SPI1, chip selects B13/B14, shared enable C13
    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(8_000_000);
    spi_config.mode = spi::MODE_0;
    let spi = Spi::new_blocking(p.SPI1, p.PA5, p.PA7, p.PA6, spi_config);
    let cs = [
        Output::new(p.PB13, Level::High, Speed::VeryHigh),
        Output::new(p.PB14, Level::High, Speed::VeryHigh),
    ];
    let enable = Output::new(p.PC13, Level::Low, Speed::Low);
    let mut leds = Aw20216::new(spi, cs, enable);
    unwrap!(leds.init(&mut Delay));

    let mut userspace = UserspaceController::new(leds, UserConfig::default());

    join5(
        run_devices! (
            (matrix, encoder) => EVENT_CHANNEL,
        ),
        keyboard.run(), // Keyboard is special
        userspace.polling_loop(),
        controller::run_jobs(),
        run_rmk(&keymap, driver, &mut storage, rmk_config),
    )
    .await;
}
