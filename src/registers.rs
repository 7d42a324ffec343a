extern crate num as num_renamed;
use crate::create_register;
use crate::fields::*;
use num_renamed::FromPrimitive;
use num_renamed::ToPrimitive;
use paste::paste;

pub mod helpers {
    #[inline]
    pub fn get_mask(start_index: u8, width: u8) -> u8 {
        ((1u8 << width) - 1u8) << start_index
    }
}

/// Register addresses. These are the raw 5-bit addresses; the command bit and
/// transfer type are added by the transport when the command byte is built.
pub struct Register;
impl Register {
    pub const ENABLE: u8 = 0x00;
    pub const ATIME: u8 = 0x01;
    pub const WTIME: u8 = 0x03;
    pub const AILTL: u8 = 0x04;
    pub const AILTH: u8 = 0x05;
    pub const AIHTL: u8 = 0x06;
    pub const AIHTH: u8 = 0x07;
    pub const PERS: u8 = 0x0C;
    pub const CONFIG: u8 = 0x0D;
    pub const CONTROL: u8 = 0x0F;
    pub const ID: u8 = 0x12;
    pub const STATUS: u8 = 0x13;
    pub const CDATAL: u8 = 0x14;
    pub const CDATAH: u8 = 0x15;
    pub const RDATAL: u8 = 0x16;
    pub const RDATAH: u8 = 0x17;
    pub const GDATAL: u8 = 0x18;
    pub const GDATAH: u8 = 0x19;
    pub const BDATAL: u8 = 0x1A;
    pub const BDATAH: u8 = 0x1B;
}

/// Special function codes, sent in the address bits of a special-function command.
pub struct SpecialFunction;
impl SpecialFunction {
    pub const CLEAR_INTERRUPT: u8 = 0b00110;
}

// General Field structure used by registers
#[derive(Debug, Clone, Copy)]
pub struct Field<T> {
    pub start_index: u8,
    pub width: u8,
    pub value: T,
}

impl<T> Field<T>
where
    T: ToPrimitive,
{
    pub fn bits(self) -> u8 {
        // First create a mask of N '1' bits to be used to truncate the value
        // The algorithm: ((1 << length) - 1) << pos
        let mask: u8 = self::helpers::get_mask(self.start_index, self.width);

        let val: u8 = self.value.to_u8().unwrap_or(0);
        (val << self.start_index) & mask
    }
}

/// Defines a standard structure for a 8-bit register.
///
/// This macro takes `StructName, {structfield1: type1, structfield2: type2, ...}` as arguments
/// and generates a structure:
///
/// ```compile_fail
/// struct StructName {
///     structfield1: Field<type1>,
///     structfield2: Field<type2>,
///     ...
/// }
/// ```
///
/// The structure will have automatic `with_structfieldX()` factory methods created, as well
/// as a `value()` function that returns the encoded u8 data. Decoding a field value that
/// has no matching variant yields the field type's default.
///
#[macro_export]
macro_rules! create_register {
    ($reg_name:ident, {$($element: ident: $ty: ty),*}) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $reg_name { $(pub $element: Field<$ty>),* }

        paste! {
            impl $reg_name {
                pub fn value(self) -> u8 {
                    let mut temp: u8 = 0x00;
                    $(
                        temp |= self.$element.bits();
                    )*
                    temp
                }

            // Creates with_<variable> methods
            $(
                pub fn [<with_ $element>] (self, paste!{[<new_ $element>]}: $ty) -> Self {
                    let mut tmp = $reg_name{..self};
                    tmp.$element.value = paste!{[<new_ $element>]};
                    tmp
                }
            )*
            }
        }

        paste! {
            // Creates a From<u8> implementation for this register
            impl From<u8> for $reg_name {
                fn from(val: u8) -> Self {
                    let new_reg = $reg_name::default();

                    $(
                        let [<$element _mask>] = self::helpers::get_mask(new_reg.$element.start_index, new_reg.$element.width);
                        let [<$element _val>] = <$ty as FromPrimitive>::from_u8( (val & [<$element _mask>]) >> new_reg.$element.start_index ).unwrap_or_default();
                        let new_reg = new_reg.[<with_ $element>]([<$element _val>]);
                    )*

                    new_reg
                }
            }
        }
    }
}

create_register!(CommandRegister, {address: u8, transfer: TransferType, command: CommandSelect});

impl Default for CommandRegister {
    fn default() -> Self {
        CommandRegister {
            address: Field {
                start_index: 0,
                width: 5,
                value: 0x00,
            },
            transfer: Field {
                start_index: 5,
                width: 2,
                value: TransferType::AutoIncrement,
            },
            command: Field {
                start_index: 7,
                width: 1,
                value: CommandSelect::Command,
            },
        }
    }
}

create_register!(EnableRegister, {
    power_on: Switch,
    adc_enable: Switch,
    wait_enable: Switch,
    interrupt_enable: Switch
});

impl Default for EnableRegister {
    fn default() -> Self {
        EnableRegister {
            power_on: Field {
                start_index: 0,
                width: 1,
                value: Switch::Off,
            },
            adc_enable: Field {
                start_index: 1,
                width: 1,
                value: Switch::Off,
            },
            wait_enable: Field {
                start_index: 3,
                width: 1,
                value: Switch::Off,
            },
            interrupt_enable: Field {
                start_index: 4,
                width: 1,
                value: Switch::Off,
            },
        }
    }
}

create_register!(ConfigRegister, {wait_long: WaitLong});

impl Default for ConfigRegister {
    fn default() -> Self {
        ConfigRegister {
            wait_long: Field {
                start_index: 1,
                width: 1,
                value: WaitLong::Normal,
            },
        }
    }
}

create_register!(ControlRegister, {gain: Gain});

impl Default for ControlRegister {
    fn default() -> Self {
        ControlRegister {
            gain: Field {
                start_index: 0,
                width: 2,
                value: Gain::Gain1x,
            },
        }
    }
}

create_register!(PersistenceRegister, {persistence: u8});

impl Default for PersistenceRegister {
    fn default() -> Self {
        PersistenceRegister {
            persistence: Field {
                start_index: 0,
                width: 4,
                value: 0b0000,
            },
        }
    }
}

create_register!(StatusRegister, {data_valid: DataValidity, int_status: IntStatus});

impl Default for StatusRegister {
    fn default() -> Self {
        StatusRegister {
            data_valid: Field {
                start_index: 0,
                width: 1,
                value: DataValidity::Invalid,
            },
            int_status: Field {
                start_index: 4,
                width: 1,
                value: IntStatus::Inactive,
            },
        }
    }
}

/// Persistence levels the device supports, paired with their PERS register code.
pub const PERSISTENCE_LEVELS: [(u8, u8); 16] = [
    (0, 0b0000),
    (1, 0b0001),
    (2, 0b0010),
    (3, 0b0011),
    (5, 0b0100),
    (10, 0b0101),
    (15, 0b0110),
    (20, 0b0111),
    (25, 0b1000),
    (30, 0b1001),
    (35, 0b1010),
    (40, 0b1011),
    (45, 0b1100),
    (50, 0b1101),
    (55, 0b1110),
    (60, 0b1111),
];

/// Packs the four enable flags into the ENABLE register layout
/// (PON bit 0, AEN bit 1, WEN bit 3, AIEN bit 4).
pub fn pack_enables(
    power_on: bool,
    adc_enable: bool,
    wait_enable: bool,
    interrupt_enable: bool,
) -> u8 {
    EnableRegister::default()
        .with_power_on(power_on.into())
        .with_adc_enable(adc_enable.into())
        .with_wait_enable(wait_enable.into())
        .with_interrupt_enable(interrupt_enable.into())
        .value()
}

/// PERS register code for a persistence level. Levels the device does not
/// support fall back to 0 (interrupt on every out-of-range cycle).
pub fn persistence_code(level: u8) -> u8 {
    PERSISTENCE_LEVELS
        .iter()
        .find(|(supported, _)| *supported == level)
        .map(|(_, code)| *code)
        .unwrap_or(0b0000)
}

/// Register increment of ATIME and WTIME, in milliseconds.
const TIMING_STEP_MS: f64 = 2.4;

/// Converts a duration in milliseconds to an ATIME/WTIME step value:
/// `256 - floor(ms / 2.4)`.
///
/// Only 2.4ms..=614.4ms maps onto the register. Outside of it the result is
/// truncated to 8 bits, so e.g. 0ms wraps to 0x00 (the longest setting).
pub fn timing_step(ms: f64) -> u8 {
    let step = 256.0 - floor_div(ms, TIMING_STEP_MS);
    step as i64 as u8
}

/// Floor of the exact quotient `dividend / divisor` for a positive divisor.
///
/// `floor(dividend / divisor)` floors an already rounded quotient, and comes
/// out one too high when the exact quotient sits just below an integer:
/// `26.4 / 2.4` rounds to 11.0 although the exact quotient of the two doubles
/// is just under 11. Taking the remainder out first avoids that rounding.
fn floor_div(dividend: f64, divisor: f64) -> f64 {
    let remainder = libm::fmod(dividend, divisor);
    let mut quotient = (dividend - remainder) / divisor;
    if remainder < 0.0 {
        quotient -= 1.0;
    }

    // `quotient` is within rounding of an integer; snap to it
    let floor = libm::floor(quotient);
    if quotient - floor > 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Clamps a threshold into the 16-bit range of the AILT/AIHT register pairs.
pub fn clamp_threshold(level: i32) -> u16 {
    level.clamp(0, u16::MAX as i32) as u16
}
