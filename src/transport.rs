use core::fmt::Debug;

use embedded_hal::blocking::i2c;

use crate::types::Error;
use crate::{CommandRegister, TransferType};

/// Byte-wide access to a device on a two-wire bus, in SMBus "read/write byte
/// data" form: every transaction is addressed by a command byte.
///
/// Implemented for every blocking `embedded-hal` I²C bus.
pub trait ByteBus {
    type Error: Debug;

    fn read_byte(&mut self, address: u8, command: u8) -> Result<u8, Self::Error>;

    fn write_byte(&mut self, address: u8, command: u8, value: u8) -> Result<(), Self::Error>;
}

impl<I2C, E> ByteBus for I2C
where
    I2C: i2c::WriteRead<Error = E> + i2c::Write<Error = E>,
    E: Debug,
{
    type Error = E;

    fn read_byte(&mut self, address: u8, command: u8) -> Result<u8, E> {
        let mut data: [u8; 1] = [0];
        self.write_read(address, &[command], &mut data)
            .and(Ok(data[0]))
    }

    fn write_byte(&mut self, address: u8, command: u8, value: u8) -> Result<(), E> {
        self.write(address, &[command, value])
    }
}

/// Builds the command byte that precedes every register access.
pub fn command_byte(transfer: TransferType, address: u8) -> u8 {
    CommandRegister::default()
        .with_transfer(transfer)
        .with_address(address)
        .value()
}

/// Single-register reads and writes against one device on a [`ByteBus`].
///
/// No retries happen here; a failed transaction is returned as [`Error::I2C`].
#[derive(Debug)]
pub struct RegisterTransport<BUS> {
    bus: BUS,
    address: u8,
}

impl<BUS> RegisterTransport<BUS>
where
    BUS: ByteBus,
{
    pub fn new(bus: BUS, address: u8) -> Self {
        RegisterTransport { bus, address }
    }

    /// 7-bit bus address of the device.
    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn read(&mut self, register: u8) -> Result<u8, Error<BUS::Error>> {
        let command = command_byte(TransferType::AutoIncrement, register);
        let value = self
            .bus
            .read_byte(self.address, command)
            .map_err(Error::I2C)?;
        log::trace!("read  {:#04x} (cmd {:#04x}) -> {:#04x}", register, command, value);
        Ok(value)
    }

    pub fn write(&mut self, register: u8, value: u8) -> Result<(), Error<BUS::Error>> {
        let command = command_byte(TransferType::AutoIncrement, register);
        log::trace!("write {:#04x} (cmd {:#04x}) <- {:#04x}", register, command, value);
        self.bus
            .write_byte(self.address, command, value)
            .map_err(Error::I2C)
    }

    /// Issues a special-function command. The device acts on the command
    /// itself; the byte it returns carries no information.
    pub fn read_special(&mut self, function: u8) -> Result<u8, Error<BUS::Error>> {
        let command = command_byte(TransferType::SpecialFunction, function);
        log::trace!("special function {:#04x} (cmd {:#04x})", function, command);
        self.bus
            .read_byte(self.address, command)
            .map_err(Error::I2C)
    }

    /// Gives the bus back.
    pub fn release(self) -> BUS {
        self.bus
    }
}
