use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rrggbb`.
    pub fn from_hex(hex: &str) -> DashboardResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DashboardError::InvalidData(format!(
                "color `{hex}` must be formatted as #rrggbb"
            )));
        }
        let channel = |range: std::ops::Range<usize>| -> DashboardResult<f64> {
            u8::from_str_radix(&digits[range], 16)
                .map(|value| f64::from(value) / 255.0)
                .map_err(|err| DashboardError::InvalidData(format!("color `{hex}`: {err}")))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Formats as `#rrggbb`, ignoring alpha.
    #[must_use]
    pub fn to_hex(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        )
    }

    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self::rgba(
            mix(self.red, other.red),
            mix(self.green, other.green),
            mix(self.blue, other.blue),
            mix(self.alpha, other.alpha),
        )
    }

    pub fn validate(self) -> DashboardResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(DashboardError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// One anchor of a continuous color scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: Color,
}

/// Sequential color scale mapping a normalized 0..=1 intensity to a color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScale {
    pub name: String,
    pub stops: Vec<ColorStop>,
}

const PLASMA_HEX: [&str; 10] = [
    "#0d0887", "#46039f", "#7201a8", "#9c179e", "#bd3786", "#d8576b", "#ed7953", "#fb9f3a",
    "#fdca26", "#f0f921",
];

impl ColorScale {
    /// Builds a scale with evenly spaced stops.
    pub fn from_hex_stops(name: impl Into<String>, hex_stops: &[&str]) -> DashboardResult<Self> {
        if hex_stops.len() < 2 {
            return Err(DashboardError::InvalidData(
                "color scale needs at least two stops".to_owned(),
            ));
        }
        let last = (hex_stops.len() - 1) as f64;
        let stops = hex_stops
            .iter()
            .enumerate()
            .map(|(index, hex)| {
                Ok(ColorStop {
                    position: index as f64 / last,
                    color: Color::from_hex(hex)?,
                })
            })
            .collect::<DashboardResult<Vec<_>>>()?;
        Ok(Self {
            name: name.into(),
            stops,
        })
    }

    /// Sequential "Plasma" scale, dark blue to yellow.
    #[must_use]
    pub fn plasma() -> Self {
        let last = (PLASMA_HEX.len() - 1) as f64;
        let stops = PLASMA_HEX
            .iter()
            .enumerate()
            .filter_map(|(index, hex)| {
                Color::from_hex(hex).ok().map(|color| ColorStop {
                    position: index as f64 / last,
                    color,
                })
            })
            .collect();
        Self {
            name: "Plasma".to_owned(),
            stops,
        }
    }

    /// Color at normalized intensity `t`, clamped to the scale ends.
    #[must_use]
    pub fn sample(&self, t: f64) -> Option<Color> {
        let first = self.stops.first()?;
        let last = self.stops.last()?;
        if !t.is_finite() || t <= first.position {
            return Some(first.color);
        }
        if t >= last.position {
            return Some(last.color);
        }
        self.stops.windows(2).find_map(|pair| {
            let (lower, upper) = (pair[0], pair[1]);
            if t > upper.position {
                return None;
            }
            let span = upper.position - lower.position;
            let local = if span > 0.0 {
                (t - lower.position) / span
            } else {
                0.0
            };
            Some(lower.color.lerp(upper.color, local))
        })
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.stops.len() < 2 {
            return Err(DashboardError::InvalidData(
                "color scale needs at least two stops".to_owned(),
            ));
        }
        for stop in &self.stops {
            if !stop.position.is_finite() || !(0.0..=1.0).contains(&stop.position) {
                return Err(DashboardError::InvalidData(
                    "color stop position must be finite and in [0, 1]".to_owned(),
                ));
            }
            stop.color.validate()?;
        }
        if self
            .stops
            .windows(2)
            .any(|pair| pair[1].position < pair[0].position)
        {
            return Err(DashboardError::InvalidData(
                "color stops must be sorted by position".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::plasma()
    }
}
