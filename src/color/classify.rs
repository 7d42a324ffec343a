use core::fmt;
use core::ops::RangeInclusive;

use super::NormalizedColor;

/// A named box in 8-bit RGB space. A colour matches when all three of its
/// scaled components fall inside the ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorBox<L> {
    pub label: L,
    pub red: RangeInclusive<u8>,
    pub green: RangeInclusive<u8>,
    pub blue: RangeInclusive<u8>,
}

impl<L> ColorBox<L> {
    pub fn contains(&self, (red, green, blue): (u8, u8, u8)) -> bool {
        self.red.contains(&red) && self.green.contains(&green) && self.blue.contains(&blue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorName {
    Red,
    Orange,
    Yellow,
    Brown,
    LightYellow,
    Purple,
    LightPurple,
    DarkPink,
    LightPink,
    DarkBlue,
    MediumBlue,
    DarkGreen,
    MediumGreen,
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorName::Red => "Red",
            ColorName::Orange => "Orange",
            ColorName::Yellow => "Yellow",
            ColorName::Brown => "Brown",
            ColorName::LightYellow => "Light Yellow",
            ColorName::Purple => "Purple",
            ColorName::LightPurple => "Light Purple",
            ColorName::DarkPink => "Dark Pink",
            ColorName::LightPink => "Light Pink",
            ColorName::DarkBlue => "Dark Blue",
            ColorName::MediumBlue => "Medium Blue",
            ColorName::DarkGreen => "Dark Green",
            ColorName::MediumGreen => "Medium Green",
        };
        f.write_str(name)
    }
}

/// Colour boxes for basic LEGO brick colours, for use with
/// [`CalibrationVariant::Classify`](crate::CalibrationVariant::Classify).
///
/// Some boxes overlap (e.g. Yellow and Brown); the later entry wins.
pub static DEFAULT_COLOR_TABLE: [ColorBox<ColorName>; 13] = [
    ColorBox {
        label: ColorName::Red,
        red: 231..=255,
        green: 0..=50,
        blue: 0..=80,
    },
    ColorBox {
        label: ColorName::Orange,
        red: 231..=255,
        green: 51..=90,
        blue: 0..=80,
    },
    ColorBox {
        label: ColorName::Yellow,
        red: 231..=255,
        green: 101..=255,
        blue: 0..=55,
    },
    ColorBox {
        label: ColorName::Brown,
        red: 231..=255,
        green: 91..=120,
        blue: 41..=80,
    },
    ColorBox {
        label: ColorName::LightYellow,
        red: 176..=230,
        green: 101..=190,
        blue: 0..=55,
    },
    ColorBox {
        label: ColorName::Purple,
        red: 191..=255,
        green: 0..=85,
        blue: 146..=255,
    },
    ColorBox {
        label: ColorName::LightPurple,
        red: 101..=191,
        green: 51..=110,
        blue: 101..=190,
    },
    ColorBox {
        label: ColorName::DarkPink,
        red: 231..=255,
        green: 0..=90,
        blue: 81..=145,
    },
    ColorBox {
        label: ColorName::LightPink,
        red: 181..=230,
        green: 0..=150,
        blue: 101..=150,
    },
    ColorBox {
        label: ColorName::DarkBlue,
        red: 0..=80,
        green: 0..=150,
        blue: 201..=255,
    },
    ColorBox {
        label: ColorName::MediumBlue,
        red: 0..=80,
        green: 101..=200,
        blue: 151..=200,
    },
    ColorBox {
        label: ColorName::DarkGreen,
        red: 0..=100,
        green: 191..=255,
        blue: 0..=75,
    },
    ColorBox {
        label: ColorName::MediumGreen,
        red: 0..=200,
        green: 191..=255,
        blue: 0..=55,
    },
];

/// Names a colour using [`DEFAULT_COLOR_TABLE`].
pub fn classify(color: &NormalizedColor) -> Option<ColorName> {
    classify_with(color, &DEFAULT_COLOR_TABLE)
}

/// Names a colour using a custom table.
///
/// The whole table is scanned and the last matching entry is returned, so
/// overlapping boxes resolve in favour of whichever is listed later.
pub fn classify_with<L: Copy>(color: &NormalizedColor, table: &[ColorBox<L>]) -> Option<L> {
    let rgb = color.to_rgb8();
    table
        .iter()
        .filter(|entry| entry.contains(rgb))
        .last()
        .map(|entry| entry.label)
}
