/// All possible errors in this crate
#[derive(Debug)]
pub enum Error<E> {
    /// I²C bus error.
    I2C(E),
    /// The driver no longer owns its bus. Not reachable through the public
    /// API: the bus is only handed back by `TCS34725::destroy`, which consumes
    /// the driver.
    OperationNotAvailable,
}

/// One reading of the four photodiode channels, in raw ADC counts.
///
/// The channels are read one byte at a time. If the device finishes an
/// integration cycle while the eight reads are in flight, the values can come
/// from two different cycles. No software lock can prevent that; poll
/// [`data_ready`](crate::TCS34725::data_ready) and keep the integration time
/// long compared to the bus transfer if it matters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RawData {
    pub clear: u16,
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

/// Joins the low and high data register bytes of one channel.
#[inline]
pub fn convert_value(low: u8, high: u8) -> u16 {
    (u16::from(high) << 8) | u16::from(low)
}
