/// Single-bit on/off field used by every flag in the ENABLE register.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Switch {
    #[default]
    Off = 0x00,
    On = 0x01,
}

impl From<bool> for Switch {
    fn from(on: bool) -> Self {
        if on {
            Switch::On
        } else {
            Switch::Off
        }
    }
}

impl From<Switch> for bool {
    fn from(switch: Switch) -> Self {
        switch == Switch::On
    }
}

/// Analog gain applied to all four channels (CONTROL register, bits 0-1).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Gain {
    #[default]
    Gain1x = 0b00,
    Gain4x = 0b01,
    Gain16x = 0b10,
    Gain60x = 0b11,
}

impl Gain {
    /// Maps a gain factor onto its register code. Anything that is not 4, 16
    /// or 60 selects 1x.
    pub fn from_level(level: u16) -> Self {
        match level {
            60 => Gain::Gain60x,
            16 => Gain::Gain16x,
            4 => Gain::Gain4x,
            _ => Gain::Gain1x,
        }
    }
}

/// WLONG bit of the CONFIG register. When set the wait time is 12x longer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum WaitLong {
    #[default]
    Normal = 0x00,
    Long = 0x01,
}

impl From<bool> for WaitLong {
    fn from(long: bool) -> Self {
        if long {
            WaitLong::Long
        } else {
            WaitLong::Normal
        }
    }
}

/// Transaction type selected by bits 5-6 of the command byte.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum TransferType {
    RepeatedByte = 0b00,
    #[default]
    AutoIncrement = 0b01,
    SpecialFunction = 0b11,
}

/// Bit 7 of the command byte must always be set for the device to accept it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum CommandSelect {
    Ignored = 0x00,
    #[default]
    Command = 0x01,
}

/// AVALID: an integration cycle has completed since the ADC was enabled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum DataValidity {
    #[default]
    Invalid = 0x00,
    Valid = 0x01,
}

/// AINT: the clear channel crossed a threshold for the configured persistence.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum IntStatus {
    #[default]
    Inactive = 0x00,
    Active = 0x01,
}

/// Device-side operating state, derived from the ENABLE and STATUS registers.
///
/// This is informational only. The driver never checks it before issuing a
/// write; the sensor accepts any register access in any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    /// PON cleared, oscillator stopped.
    Off,
    /// Powered, ADC disabled.
    Idle,
    /// ADC enabled and integrating.
    Converting,
    /// ADC and wait timer enabled; the device alternates between integrating
    /// and waiting.
    Waiting,
    /// AINT latched with AIEN set. Cleared by the interrupt-clear special
    /// function.
    InterruptPending,
}

impl DeviceState {
    pub fn from_registers(enable: u8, status: u8) -> Self {
        let enable = crate::EnableRegister::from(enable);
        let status = crate::StatusRegister::from(status);

        if enable.power_on.value == Switch::Off {
            DeviceState::Off
        } else if enable.adc_enable.value == Switch::Off {
            DeviceState::Idle
        } else if enable.interrupt_enable.value == Switch::On
            && status.int_status.value == IntStatus::Active
        {
            DeviceState::InterruptPending
        } else if enable.wait_enable.value == Switch::On {
            DeviceState::Waiting
        } else {
            DeviceState::Converting
        }
    }
}
