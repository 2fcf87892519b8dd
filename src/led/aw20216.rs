//! AW20216 matrix LED drivers on a shared SPI bus.
//!
//! Each driver has 12 switch lines by 18 current sinks; one RGB LED uses three
//! adjacent sinks on one switch line.

use defmt::debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use gmmk_userspace::LED_COUNT;
use smart_leds::{RGB8, SmartLedsWrite};

const CHIP_ID: u8 = 0b1010 << 4;
const WRITE: u8 = 0;

const PAGE_FUNCTION: u8 = 0x00 << 1;
const PAGE_PWM: u8 = 0x01 << 1;
const PAGE_SCALING: u8 = 0x02 << 1;

const REG_CONFIGURATION: u8 = 0x00;
const REG_GLOBAL_CURRENT: u8 = 0x01;
const REG_RESET: u8 = 0x2F;
const REG_MIX_FUNCTION: u8 = 0x46;

const RESET_MAGIC: u8 = 0xAE;
const CONFIGURATION_SWSEL_1_12: u8 = 0b1011 << 4;
const CONFIGURATION_CHIPEN: u8 = 0x01;
const MIX_FUNCTION_LPEN: u8 = 0x01 << 1;

const GLOBAL_CURRENT_MAX: u8 = 150;
const SCALING_MAX: u8 = 150;

const CHANNELS: usize = 216;
const SINKS_PER_SWITCH: usize = 18;
const DRIVERS: usize = 2;

/// Key LEDs wired to the first driver; the rest are on the second.
const LEDS_ON_FIRST_DRIVER: usize = 66;

#[derive(Debug, defmt::Format)]
pub enum Error<SpiE, PinE> {
    Spi(SpiE),
    Pin(PinE),
}

#[derive(Clone, Copy)]
struct LedAddress {
    driver: usize,
    /// PWM register of the red channel, green and blue follow.
    red: usize,
}

const fn led_address(index: usize) -> LedAddress {
    let (driver, slot) = if index < LEDS_ON_FIRST_DRIVER {
        (0, index)
    } else {
        (1, index - LEDS_ON_FIRST_DRIVER)
    };
    LedAddress {
        driver,
        red: (slot / 6) * SINKS_PER_SWITCH + (slot % 6) * 3,
    }
}

const LED_ADDRESSES: [LedAddress; LED_COUNT] = {
    let mut table = [LedAddress { driver: 0, red: 0 }; LED_COUNT];
    let mut i = 0;
    while i < LED_COUNT {
        table[i] = led_address(i);
        i += 1;
    }
    table
};

pub struct Aw20216<SPI, CS, EN> {
    spi: SPI,
    cs: [CS; DRIVERS],
    enable: EN,
    pwm: [[u8; CHANNELS]; DRIVERS],
}

impl<SPI, CS, EN, PinE> Aw20216<SPI, CS, EN>
where
    SPI: SpiBus,
    CS: OutputPin<Error = PinE>,
    EN: OutputPin<Error = PinE>,
{
    pub fn new(spi: SPI, cs: [CS; DRIVERS], enable: EN) -> Self {
        Self {
            spi,
            cs,
            enable,
            pwm: [[0; CHANNELS]; DRIVERS],
        }
    }

    /// Powers both drivers up and leaves them dark.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), Error<SPI::Error, PinE>> {
        for cs in self.cs.iter_mut() {
            cs.set_high().map_err(Error::Pin)?;
        }
        self.enable.set_high().map_err(Error::Pin)?;
        delay.delay_ms(10);

        for driver in 0..DRIVERS {
            self.write(driver, PAGE_FUNCTION, REG_RESET, &[RESET_MAGIC])?;
            delay.delay_ms(2);
            self.write(
                driver,
                PAGE_FUNCTION,
                REG_CONFIGURATION,
                &[CONFIGURATION_SWSEL_1_12 | CONFIGURATION_CHIPEN],
            )?;
            self.write(driver, PAGE_FUNCTION, REG_GLOBAL_CURRENT, &[GLOBAL_CURRENT_MAX])?;
            self.write(driver, PAGE_FUNCTION, REG_MIX_FUNCTION, &[MIX_FUNCTION_LPEN])?;
            self.write(driver, PAGE_SCALING, 0, &[SCALING_MAX; CHANNELS])?;
            debug!("AW20216 {} initialized", driver);
        }
        self.flush()
    }

    fn flush(&mut self) -> Result<(), Error<SPI::Error, PinE>> {
        for driver in 0..DRIVERS {
            let pwm = self.pwm[driver];
            self.write(driver, PAGE_PWM, 0, &pwm)?;
        }
        Ok(())
    }

    fn write(
        &mut self,
        driver: usize,
        page: u8,
        register: u8,
        data: &[u8],
    ) -> Result<(), Error<SPI::Error, PinE>> {
        self.cs[driver].set_low().map_err(Error::Pin)?;
        let result = self
            .spi
            .write(&[CHIP_ID | page | WRITE, register])
            .and_then(|_| self.spi.write(data))
            .and_then(|_| self.spi.flush());
        self.cs[driver].set_high().map_err(Error::Pin)?;
        result.map_err(Error::Spi)
    }
}

impl<SPI, CS, EN, PinE> SmartLedsWrite for Aw20216<SPI, CS, EN>
where
    SPI: SpiBus,
    CS: OutputPin<Error = PinE>,
    EN: OutputPin<Error = PinE>,
{
    type Error = Error<SPI::Error, PinE>;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        for (address, color) in LED_ADDRESSES.iter().zip(iterator) {
            let color: RGB8 = color.into();
            let pwm = &mut self.pwm[address.driver];
            pwm[address.red] = color.r;
            pwm[address.red + 1] = color.g;
            pwm[address.red + 2] = color.b;
        }
        self.flush()
    }
}
