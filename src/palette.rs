use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use crossterm::style::Color;
use serde::{Deserialize, Deserializer};

use crate::config::ConfigError;

/// Color role of a drawn cell. Objects pick roles, never concrete colors;
/// the active palette resolves them at draw time.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Tint {
    /// Live snake chain.
    Primary,
    /// Food, and the snake once it is dead.
    Secondary,
    /// Overlay text.
    Tertiary,
    /// Background fill.
    Empty,
    /// Walls.
    Border,
}

#[derive(Copy, Clone, Debug, Deserialize)]
pub struct ColorPair {
    #[serde(deserialize_with = "color_from_name")]
    pub fg: Color,
    #[serde(deserialize_with = "color_from_name")]
    pub bg: Color,
}

/// A named set of color pairs, one per [`Tint`] role. Loaded from
/// `data/palettes.json`, selected by name through the config.
#[derive(Clone, Debug, Deserialize)]
pub struct Palette {
    pub name: String,
    primary: ColorPair,
    secondary: ColorPair,
    tertiary: ColorPair,
    empty: ColorPair,
    border: ColorPair,
}

impl Palette {
    pub fn resolve(&self, tint: Tint) -> ColorPair {
        match tint {
            Tint::Primary => self.primary,
            Tint::Secondary => self.secondary,
            Tint::Tertiary => self.tertiary,
            Tint::Empty => self.empty,
            Tint::Border => self.border,
        }
    }

    /// Built-in fallback used when no palette file is present.
    pub fn classic() -> Self {
        let on_black = |fg| ColorPair { fg, bg: Color::Black };
        Palette {
            name: "classic".to_string(),
            primary: on_black(Color::Yellow),
            secondary: ColorPair { fg: Color::White, bg: Color::Green },
            tertiary: on_black(Color::Cyan),
            empty: on_black(Color::White),
            border: on_black(Color::White),
        }
    }

    /// Reads every palette in the file, keyed by name. The file holds a JSON
    /// array of palette objects.
    pub fn load_all(path: &Path) -> Result<HashMap<String, Palette>, ConfigError> {
        let file = File::open(path)?;
        let palettes: Vec<Palette> = serde_json::from_reader(file)?;
        Ok(palettes.into_iter().map(|p| (p.name.clone(), p)).collect())
    }
}

fn color_from_name<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    let color = match name.as_str() {
        "black" => Color::Black,
        "white" => Color::White,
        "green" => Color::Green,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "cyan" => Color::Cyan,
        "magenta" => Color::Magenta,
        "yellow" => Color::Yellow,
        other => {
            return Err(serde::de::Error::custom(format!(
                "unknown palette color {other:?}"
            )))
        }
    };
    Ok(color)
}
