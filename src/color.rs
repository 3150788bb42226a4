use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("empty color")]
    Empty,
    #[error("'{0}' is not a #RGB or #RRGGBB hex color")]
    BadHex(String),
    #[error("unknown color name '{0}'")]
    UnknownName(String),
}

/// An opaque 24-bit color. Serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const PRESETS: &[(&str, Rgb)] = &[
    ("red", Rgb::new(0xff, 0x00, 0x00)),
    ("blue", Rgb::new(0x00, 0x00, 0xff)),
    ("cyan", Rgb::new(0x00, 0xff, 0xff)),
    ("green", Rgb::new(0x00, 0xff, 0x00)),
    ("magenta", Rgb::new(0xff, 0x00, 0xff)),
    ("yellow", Rgb::new(0xff, 0xff, 0x00)),
    ("orange", Rgb::new(0xff, 0xa5, 0x00)),
    ("purple", Rgb::new(0x80, 0x00, 0x80)),
    ("black", Rgb::BLACK),
    ("white", Rgb::WHITE),
];

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness, 0..=255
    pub fn luminance(self) -> f64 {
        luminance(self.r, self.g, self.b)
    }

    pub fn is_dark(self) -> bool {
        self.luminance() < 128.0
    }

    /// White on dark backgrounds, black on light ones
    pub fn contrast(self) -> Rgb {
        if self.is_dark() {
            Rgb::WHITE
        } else {
            Rgb::BLACK
        }
    }

    /// Linear mix towards `other`; `alpha` is the weight of `other`
    pub fn blend(self, other: Rgb, alpha: f64) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |x: u8, y: u8| (x as f64 * (1.0 - a) + y as f64 * a).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }

        let Some(hex) = s.strip_prefix('#') else {
            let name = s.to_ascii_lowercase();
            return PRESETS
                .iter()
                .find(|(preset, _)| *preset == name)
                .map(|(_, rgb)| *rgb)
                .ok_or_else(|| ColorParseError::UnknownName(s.to_string()));
        };

        let bad = || ColorParseError::BadHex(s.to_string());
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let digit = |i: usize, len: usize| u8::from_str_radix(&hex[i..i + len], 16).map_err(|_| bad());
        match hex.len() {
            3 => Ok(Rgb::new(
                digit(0, 1)? * 0x11,
                digit(1, 1)? * 0x11,
                digit(2, 1)? * 0x11,
            )),
            6 => Ok(Rgb::new(digit(0, 2)?, digit(2, 2)?, digit(4, 2)?)),
            _ => Err(bad()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

impl From<Rgb> for ratatui::style::Color {
    fn from(value: Rgb) -> Self {
        ratatui::style::Color::Rgb(value.r, value.g, value.b)
    }
}
