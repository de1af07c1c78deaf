//! Colors used by the step indicator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;
use crate::step::{ColorRole, StepState};

/// A straight-alpha RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let len = hex.len();

        if (len != 6 && len != 8) || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        let a = if len == 8 {
            u8::from_str_radix(&hex[6..8], 16).ok()?
        } else {
            255
        };

        Some(Self { r, g, b, a })
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| ConfigError::InvalidColor(s.to_string()))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Colors keyed by step state.
///
/// Without overrides, uncompleted and current steps use `disabled` and
/// completed steps use `primary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Accent color (completed steps and separators).
    pub primary: Color,
    /// Muted color (uncompleted and current steps).
    pub disabled: Color,
    /// Optional override for the current step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<Color>,
    /// Optional override for uncompleted steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncompleted: Option<Color>,
}

impl Theme {
    /// The light palette.
    pub fn light() -> Self {
        Self {
            primary: Color::rgb(0x00, 0x7A, 0xFF),
            disabled: Color::rgb(0xAD, 0xB5, 0xBD),
            current: None,
            uncompleted: None,
        }
    }

    /// The color of a role.
    pub fn role_color(&self, role: ColorRole) -> Color {
        match role {
            ColorRole::Disabled => self.disabled,
            ColorRole::Primary => self.primary,
        }
    }

    /// The color a step in `state` is drawn with.
    pub fn color_for(&self, state: StepState) -> Color {
        let overridden = match state {
            StepState::Current => self.current,
            StepState::Uncompleted => self.uncompleted,
            StepState::Completed => None,
        };
        overridden.unwrap_or_else(|| self.role_color(state.color_role()))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
