use egui::Color32;
use rand::Rng;

use crate::error::ConfigError;

pub const DEFAULT_PALETTE: [&str; 4] = ["#0075DF", "#FEDC01", "#FF501B", "#8721E1"];

/// Ordered set of brush colors
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color32>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE
                .iter()
                .filter_map(|hex| parse_hex_color(hex).ok())
                .collect(),
        }
    }
}

impl Palette {
    pub fn new(colors: Vec<Color32>) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn from_hex<S: AsRef<str>>(entries: &[S]) -> Result<Self, ConfigError> {
        let colors = entries
            .iter()
            .map(|entry| parse_hex_color(entry.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    pub fn colors(&self) -> &[Color32] {
        &self.colors
    }

    pub fn contains(&self, color: Color32) -> bool {
        self.colors.contains(&color)
    }

    /// Uniform draw over every entry
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Color32 {
        self.colors[rng.random_range(0..self.colors.len())]
    }
}

/// Parses `#RRGGBB` (leading `#` optional)
pub fn parse_hex_color(hex: &str) -> Result<Color32, ConfigError> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidColor(hex.to_owned()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| ConfigError::InvalidColor(hex.to_owned()))
    };
    Ok(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Formats as lowercase `#rrggbb`, dropping alpha
pub fn to_hex_string(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}
