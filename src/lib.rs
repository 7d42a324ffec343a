//! # Introduction
//! This is a platform-agnostic Rust driver for the [`TCS34725 RGB Color Sensor`](https://ams.com/tcs34725) using [`embedded-hal`](https://github.com/rust-embedded/embedded-hal) traits,
//! together with the calibration needed to turn its raw channel counts into a displayable colour.
//!
//! ## Supported devices
//! - [TCS34725](https://cdn-shop.adafruit.com/datasheets/TCS34725.pdf) (0x29, ID 0x44)
//! - TCS34727 (ID 0x4D)
//!
//! ## Usage
//! ### Setup
//!
//! Instantiate a new driver instance using a [blocking I²C HAL
//! implementation](https://docs.rs/embedded-hal/0.2.*/embedded_hal/blocking/i2c/index.html).
//! For example, using `linux-embedded-hal`:
//! ```no_run
//! use linux_embedded_hal::I2cdev;
//! use tcs34725;
//!
//! let dev = I2cdev::new("/dev/i2c-1").unwrap();
//! let mut sensor = tcs34725::TCS34725::init(dev);
//! let config = tcs34725::TCS34725Config::default();
//! sensor.start_measurement(&config).unwrap();
//! ```
//!
//! ### Measurements
//!
//! Wait for a completed integration cycle, then read the channels and normalize them:
//! ```no_run
//! # use linux_embedded_hal::I2cdev;
//! use tcs34725::{classify, normalize, CalibrationVariant};
//! # let dev = I2cdev::new("/dev/i2c-1").unwrap();
//! # let mut sensor = tcs34725::TCS34725::init(dev);
//! # sensor.start_measurement(&tcs34725::TCS34725Config::default()).unwrap();
//! while sensor.data_ready().unwrap() != true {}
//!
//! let raw = sensor.read_channels().unwrap();
//! println!("clear {} red {} green {} blue {}", raw.clear, raw.red, raw.green, raw.blue);
//!
//! let color = normalize(&raw, CalibrationVariant::Classify);
//! if let Some(name) = classify(&color) {
//!     println!("looks {}", name);
//! }
//! ```
//!
//! ### Teardown
//!
//! Dropping the driver (or calling [`TCS34725::destroy`]) powers the oscillator
//! down. The other enable bits are left set, so the next power-up resumes
//! conversions immediately.
//!
#![no_std]
#[macro_use]
extern crate num_derive;
use paste::paste;

pub mod color;
mod fields;
mod macros;
mod registers;
mod transport;
mod types;
pub use crate::color::*;
pub use crate::fields::*;
pub use crate::registers::*;
pub use crate::transport::{command_byte, ByteBus, RegisterTransport};
pub use crate::types::{convert_value, Error, RawData};

pub const TCS34725_BASE_ADDRESS: u8 = 0x29;

/// Power-down pattern written on teardown: PON cleared, AEN and WEN left set.
const TEARDOWN_ENABLES: (bool, bool, bool, bool) = (false, true, true, false);

create_struct_with! (TCS34725Config, {
    gain: u16,
    integration_time_ms: f64,
    wait_time_ms: f64,
    wait_long: bool,
    int_thrsh_low: i32,
    int_thrsh_high: i32,
    persistence: u8,
    wait_enable: bool,
    interrupt_enable: bool
});

impl Default for TCS34725Config {
    fn default() -> Self {
        TCS34725Config {
            gain: 4,
            integration_time_ms: 24.0,
            wait_time_ms: 43.2,
            wait_long: false,
            int_thrsh_low: 56,
            int_thrsh_high: 8000,
            persistence: 3,
            wait_enable: true,
            interrupt_enable: false,
        }
    }
}

/// TCS34725 driver.
///
/// The driver keeps no copy of the device configuration: every setter is a
/// plain register write, and the sensor is free to be in any state. It powers
/// the sensor down exactly once, either in [`destroy`](Self::destroy) or when
/// dropped.
pub struct TCS34725<BUS>
where
    BUS: ByteBus,
{
    // Emptied by `destroy` so that `Drop` does not power down a second time.
    transport: Option<RegisterTransport<BUS>>,
}

impl<BUS> TCS34725<BUS>
where
    BUS: ByteBus,
{
    /// Initializes the TCS34725 driver at its default address while consuming the i2c bus
    pub fn init(bus: BUS) -> Self {
        Self::init_with_address(bus, TCS34725_BASE_ADDRESS)
    }

    pub fn init_with_address(bus: BUS, address: u8) -> Self {
        TCS34725 {
            transport: Some(RegisterTransport::new(bus, address)),
        }
    }

    /// Power the sensor down and return the I²C bus instance.
    ///
    /// A failed power-down write is logged and otherwise ignored.
    pub fn destroy(mut self) -> BUS {
        self.teardown();
        if let Some(transport) = self.transport.take() {
            return transport.release();
        }
        // Only `destroy` empties the slot, and it consumes the driver
        unreachable!()
    }

    /// Get the ID register contents: 0x44 for TCS34721/TCS34725, 0x4D for TCS34723/TCS34727.
    pub fn get_device_id(&mut self) -> Result<u8, Error<BUS::Error>> {
        self.read_register(Register::ID)
    }

    /// Writes the ENABLE register in one go.
    pub fn set_enables(
        &mut self,
        power_on: bool,
        adc_enable: bool,
        wait_enable: bool,
        interrupt_enable: bool,
    ) -> Result<(), Error<BUS::Error>> {
        let enables = pack_enables(power_on, adc_enable, wait_enable, interrupt_enable);
        log::debug!("enable register <- {:#07b}", enables);
        self.write_register(Register::ENABLE, enables)
    }

    /// Reads the ENABLE register back.
    pub fn read_enables(&mut self) -> Result<EnableRegister, Error<BUS::Error>> {
        let data = self.read_register(Register::ENABLE)?;
        Ok(data.into())
    }

    /// Sets the analog gain. Valid levels are 1, 4, 16 and 60; any other level selects 1x.
    pub fn set_gain(&mut self, level: u16) -> Result<(), Error<BUS::Error>> {
        let gain = Gain::from_level(level);
        log::debug!("gain {} -> {:?}", level, gain);

        let control_reg = ControlRegister::default().with_gain(gain);
        self.write_register(Register::CONTROL, control_reg.value())
    }

    /// Sets the RGBC integration time (ATIME). The maximum count per channel
    /// is `(256 - ATIME) * 1024`, capped at 65535.
    ///
    /// Only 2.4ms..=614.4ms is representable; see [`timing_step`] for what
    /// happens outside of that.
    pub fn set_integration_time(&mut self, ms: f64) -> Result<(), Error<BUS::Error>> {
        let step = timing_step(ms);
        log::debug!("integration time {}ms -> ATIME {:#04x}", ms, step);
        self.write_register(Register::ATIME, step)
    }

    /// Sets the time between integration cycles (WTIME) and the WLONG bit.
    ///
    /// The step value is always computed with 2.4ms increments, even with
    /// `long_wait` set, where the device counts 28.8ms per step.
    pub fn set_wait_time(&mut self, ms: f64, long_wait: bool) -> Result<(), Error<BUS::Error>> {
        let config_reg = ConfigRegister::default().with_wait_long(long_wait.into());
        self.write_register(Register::CONFIG, config_reg.value())?;

        let step = timing_step(ms);
        log::debug!("wait time {}ms (long: {}) -> WTIME {:#04x}", ms, long_wait, step);
        self.write_register(Register::WTIME, step)
    }

    /// Sets the clear channel interrupt thresholds and persistence.
    ///
    /// Thresholds are clamped to 0..=65535. A persistence level the device
    /// does not support falls back to 0 (interrupt on every cycle outside the
    /// thresholds). All five writes must be done before AIEN is set.
    pub fn set_interrupt_thresholds(
        &mut self,
        low: i32,
        high: i32,
        persistence: u8,
    ) -> Result<(), Error<BUS::Error>> {
        let low = clamp_threshold(low).to_le_bytes();
        let high = clamp_threshold(high).to_le_bytes();

        self.write_register(Register::AILTL, low[0])?;
        self.write_register(Register::AILTH, low[1])?;
        self.write_register(Register::AIHTL, high[0])?;
        self.write_register(Register::AIHTH, high[1])?;

        let pers_reg =
            PersistenceRegister::default().with_persistence(persistence_code(persistence));
        log::debug!("persistence {} -> {:#06b}", persistence, pers_reg.persistence.value);
        self.write_register(Register::PERS, pers_reg.value())
    }

    /// Writes timing, gain and interrupt settings, without touching ENABLE.
    pub fn configure(&mut self, config: &TCS34725Config) -> Result<(), Error<BUS::Error>> {
        self.set_integration_time(config.integration_time_ms)?;
        self.set_wait_time(config.wait_time_ms, config.wait_long)?;
        self.set_gain(config.gain)?;
        self.set_interrupt_thresholds(
            config.int_thrsh_low,
            config.int_thrsh_high,
            config.persistence,
        )
    }

    /// Configures the sensor, then powers it on and enables the ADC.
    pub fn start_measurement(&mut self, config: &TCS34725Config) -> Result<(), Error<BUS::Error>> {
        self.configure(config)?;
        self.set_enables(true, true, config.wait_enable, config.interrupt_enable)
    }

    /// Returns the raw contents of the STATUS register.
    pub fn read_status(&mut self) -> Result<u8, Error<BUS::Error>> {
        self.read_register(Register::STATUS)
    }

    /// Returns the STATUS register split into its fields.
    pub fn get_status(&mut self) -> Result<StatusRegister, Error<BUS::Error>> {
        let data = self.read_status()?;
        Ok(data.into())
    }

    /// Check if an integration cycle has completed since the ADC was enabled.
    pub fn data_ready(&mut self) -> Result<bool, Error<BUS::Error>> {
        let status = self.get_status()?;
        Ok(status.data_valid.value == DataValidity::Valid)
    }

    /// Clears a latched clear-channel interrupt.
    pub fn clear_interrupt(&mut self) -> Result<(), Error<BUS::Error>> {
        self.transport()?
            .read_special(SpecialFunction::CLEAR_INTERRUPT)
            .map(|_| ())
    }

    /// Reads the clear, red, green and blue channels.
    ///
    /// This is eight single-byte reads. See [`RawData`] about readings that
    /// straddle two integration cycles. The first failing read aborts the call.
    pub fn read_channels(&mut self) -> Result<RawData, Error<BUS::Error>> {
        let clear_low = self.read_register(Register::CDATAL)?;
        let clear_high = self.read_register(Register::CDATAH)?;
        let red_low = self.read_register(Register::RDATAL)?;
        let red_high = self.read_register(Register::RDATAH)?;
        let green_low = self.read_register(Register::GDATAL)?;
        let green_high = self.read_register(Register::GDATAH)?;
        let blue_low = self.read_register(Register::BDATAL)?;
        let blue_high = self.read_register(Register::BDATAH)?;

        Ok(RawData {
            clear: convert_value(clear_low, clear_high),
            red: convert_value(red_low, red_high),
            green: convert_value(green_low, green_high),
            blue: convert_value(blue_low, blue_high),
        })
    }

    /// Reads the channels and normalizes them with the given calibration.
    pub fn read_color(
        &mut self,
        variant: CalibrationVariant,
    ) -> Result<NormalizedColor, Error<BUS::Error>> {
        let raw = self.read_channels()?;
        Ok(normalize(&raw, variant))
    }

    fn teardown(&mut self) {
        let address = match &self.transport {
            Some(transport) => transport.address(),
            None => return,
        };

        let (power_on, adc_enable, wait_enable, interrupt_enable) = TEARDOWN_ENABLES;
        if let Err(e) = self.set_enables(power_on, adc_enable, wait_enable, interrupt_enable) {
            log::warn!("TCS34725 at {:#04x}: power-down failed: {:?}", address, e);
        }
    }
}

impl<BUS> TCS34725<BUS>
where
    BUS: ByteBus,
{
    fn transport(&mut self) -> Result<&mut RegisterTransport<BUS>, Error<BUS::Error>> {
        self.transport.as_mut().ok_or(Error::OperationNotAvailable)
    }

    fn write_register(&mut self, register: u8, data: u8) -> Result<(), Error<BUS::Error>> {
        self.transport()?.write(register, data)
    }

    fn read_register(&mut self, register: u8) -> Result<u8, Error<BUS::Error>> {
        self.transport()?.read(register)
    }
}

impl<BUS> Drop for TCS34725<BUS>
where
    BUS: ByteBus,
{
    fn drop(&mut self) {
        self.teardown();
    }
}
