use crate::types::RawData;

/// A 3x3 transform from channel ratios to RGB, followed by a uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationMatrix {
    /// Row per output component (red, green, blue), column per input ratio.
    pub coefficients: [[f64; 3]; 3],
    pub scale: f64,
}

impl CalibrationMatrix {
    pub fn apply(&self, ratios: (f64, f64, f64)) -> (f64, f64, f64) {
        let (r, g, b) = ratios;
        let row = |n: usize| {
            let [cr, cg, cb] = self.coefficients[n];
            (r * cr + g * cg + b * cb) * self.scale
        };
        (row(0), row(1), row(2))
    }
}

/// Calibration matrices, indexed by [`CalibrationVariant`].
///
/// Derived from the matrix in "Color Sensing Using the TCS230" (C. Poynton),
/// tuned against LEGO bricks under the breakout's on-board LED.
pub const CALIBRATION_MATRICES: [CalibrationMatrix; 4] = [
    // Display
    CalibrationMatrix {
        coefficients: [
            [2.781, -0.2407, -0.4524],
            [-0.4221, 2.577, -0.6920],
            [-0.1366, -0.8522, 2.3492],
        ],
        scale: 0.9,
    },
    // Led
    CalibrationMatrix {
        coefficients: [
            [2.781, 0.2407, -0.8524],
            [-0.4221, 2.377, -0.7920],
            [-0.4366, -1.1522, 2.5492],
        ],
        scale: 0.9,
    },
    // Classify
    CalibrationMatrix {
        coefficients: [
            [2.781, -0.2407, -0.4524],
            [-0.4221, 2.577, -0.6920],
            [-0.1366, -0.8522, 2.3492],
        ],
        scale: 0.9,
    },
    // Passthrough
    CalibrationMatrix {
        coefficients: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        scale: 1.0,
    },
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationVariant {
    /// Tuned for an on-screen swatch.
    #[default]
    Display,
    /// Tuned for driving a common-cathode RGB LED.
    Led,
    /// Tuned for [`classify`](crate::classify). Currently the same
    /// coefficients as `Display`.
    Classify,
    /// Plain channel ratios.
    Passthrough,
}

impl CalibrationVariant {
    /// 0, 1 and 2 select the calibrated variants. Anything else is `Passthrough`.
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => CalibrationVariant::Display,
            1 => CalibrationVariant::Led,
            2 => CalibrationVariant::Classify,
            _ => CalibrationVariant::Passthrough,
        }
    }

    pub fn matrix(self) -> &'static CalibrationMatrix {
        &CALIBRATION_MATRICES[self as usize]
    }
}

/// RGB with each component in `0.0..=1.0`.
///
/// Kept in `f64` from the channel ratios onwards; in `f32` a component close
/// to an 8-bit boundary can truncate into the bucket below.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct NormalizedColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl NormalizedColor {
    /// Components scaled to 0..=255, truncating.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        (
            (self.red * 255.0) as u8,
            (self.green * 255.0) as u8,
            (self.blue * 255.0) as u8,
        )
    }

    /// Components scaled to a 0..=100 PWM duty cycle, truncating.
    pub fn to_duty_percent(&self) -> (u8, u8, u8) {
        (
            (self.red * 100.0) as u8,
            (self.green * 100.0) as u8,
            (self.blue * 100.0) as u8,
        )
    }
}

/// Normalizes a raw reading against its clear channel.
///
/// A reading with a clear count of 0 is black, whatever the colour channels say.
pub fn normalize(raw: &RawData, variant: CalibrationVariant) -> NormalizedColor {
    if raw.clear == 0 {
        return NormalizedColor::default();
    }

    let clear = f64::from(raw.clear);
    let ratios = (
        f64::from(raw.red) / clear,
        f64::from(raw.green) / clear,
        f64::from(raw.blue) / clear,
    );
    normalize_ratios(ratios, variant)
}

/// Applies a calibration to red/clear, green/clear and blue/clear ratios and
/// clamps each component to `0.0..=1.0`.
pub fn normalize_ratios(ratios: (f64, f64, f64), variant: CalibrationVariant) -> NormalizedColor {
    let (red, green, blue) = variant.matrix().apply(ratios);

    NormalizedColor {
        red: clamp_unit(red),
        green: clamp_unit(green),
        blue: clamp_unit(blue),
    }
}

// NaN lands on 0.0
#[inline]
fn clamp_unit(value: f64) -> f64 {
    value.max(0.0).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARIANTS: [CalibrationVariant; 4] = [
        CalibrationVariant::Display,
        CalibrationVariant::Led,
        CalibrationVariant::Classify,
        CalibrationVariant::Passthrough,
    ];

    fn close(a: f64, b: f64) -> bool {
        let diff = a - b;
        diff < 1e-5 && diff > -1e-5
    }

    #[test]
    fn zero_clear_is_black() {
        let raw = RawData {
            clear: 0,
            red: 65535,
            green: 1234,
            blue: 1,
        };
        for variant in VARIANTS {
            assert_eq!(normalize(&raw, variant), NormalizedColor::default());
        }
    }

    #[test]
    fn components_stay_in_unit_range() {
        let extremes = [
            (0.0, 0.0, 0.0),
            (1.0, 1.0, 1.0),
            (-5.0, 3.0, -0.5),
            (65535.0, 0.0, 65535.0),
            (f64::MAX, f64::MIN, 0.5),
            (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY),
            (f64::NAN, 0.2, 0.2),
        ];
        for variant in VARIANTS {
            for ratios in extremes {
                let color = normalize_ratios(ratios, variant);
                for c in [color.red, color.green, color.blue] {
                    assert!((0.0..=1.0).contains(&c), "{:?} {:?} -> {}", variant, ratios, c);
                }
            }
        }
    }

    #[test]
    fn display_matrix() {
        let color = normalize_ratios((0.3, 0.3, 0.3), CalibrationVariant::Display);
        assert!(close(color.red, 0.3 * (2.781 - 0.2407 - 0.4524) * 0.9));
        assert!(close(color.green, 0.3 * (-0.4221 + 2.577 - 0.6920) * 0.9));
        assert!(close(color.blue, 0.3 * (-0.1366 - 0.8522 + 2.3492) * 0.9));
    }

    #[test]
    fn led_matrix_differs_from_display() {
        let ratios = (0.2, 0.3, 0.4);
        let led = normalize_ratios(ratios, CalibrationVariant::Led);
        assert!(close(led.red, (0.2 * 2.781 + 0.3 * 0.2407 - 0.4 * 0.8524) * 0.9));
        assert_ne!(led, normalize_ratios(ratios, CalibrationVariant::Display));
    }

    #[test]
    fn bucket_edge_reading() {
        // Green lands at 200.0000059 before truncation
        let raw = RawData {
            clear: 14104,
            red: 3081,
            green: 7978,
            blue: 10069,
        };
        let color = normalize(&raw, CalibrationVariant::Classify);
        assert_eq!(color.to_rgb8(), (34, 200, 255));
    }

    #[test]
    fn passthrough_is_unscaled() {
        let raw = RawData {
            clear: 1000,
            red: 500,
            green: 250,
            blue: 2000,
        };
        let color = normalize(&raw, CalibrationVariant::Passthrough);
        assert_eq!(
            color,
            NormalizedColor {
                red: 0.5,
                green: 0.25,
                blue: 1.0
            }
        );
    }

    #[test]
    fn unknown_variant_index_is_passthrough() {
        assert_eq!(CalibrationVariant::from_index(0), CalibrationVariant::Display);
        assert_eq!(CalibrationVariant::from_index(2), CalibrationVariant::Classify);
        assert_eq!(CalibrationVariant::from_index(3), CalibrationVariant::Passthrough);
        assert_eq!(CalibrationVariant::from_index(200), CalibrationVariant::Passthrough);
    }

    #[test]
    fn output_scales() {
        let color = NormalizedColor {
            red: 1.0,
            green: 0.5,
            blue: 0.0,
        };
        assert_eq!(color.to_rgb8(), (255, 127, 0));
        assert_eq!(color.to_duty_percent(), (100, 50, 0));
    }
}
