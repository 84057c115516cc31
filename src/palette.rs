use std::collections::BTreeMap;

use egui::Color32;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PaintError, PaintResult};

pub const COLOR_BACKGROUND: &str = "colorBackground";
pub const COLOR_PAINT: &str = "colorPaint";

/// Named color resources, looked up by the view at construction time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: BTreeMap<String, Color32>,
}

impl Default for Palette {
    fn default() -> Self {
        let mut palette = Self::empty();
        palette.insert(COLOR_BACKGROUND, Color32::from_rgb(0xFF, 0x55, 0x00));
        palette.insert(COLOR_PAINT, Color32::from_rgb(0xFF, 0xEB, 0x3B));
        palette
    }
}

impl Palette {
    pub fn empty() -> Self {
        Self {
            colors: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, name: &str, color: Color32) {
        self.colors.insert(name.to_owned(), color);
    }

    pub fn get(&self, name: &str) -> Option<Color32> {
        self.colors.get(name).copied()
    }

    pub fn resolve(&self, name: &str) -> PaintResult<Color32> {
        self.get(name).ok_or_else(|| {
            log::warn!("Color resource {name} is not defined");
            PaintError::UnknownColor(name.to_owned())
        })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Reads a palette from config, keeping every default entry it doesn't name
pub(crate) fn merge_with_defaults<'de, D>(deserializer: D) -> Result<Palette, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = BTreeMap::<String, Color32>::deserialize(deserializer)?;
    let mut palette = Palette::default();
    palette.colors.extend(entries);
    Ok(palette)
}
