use serde::{Deserialize, Serialize};

use crate::error::PaintResult;
use crate::palette::{self, Palette};
use crate::style::StrokeStyle;

/// Distance in pixels between the canvas edge and the frame drawn around it
pub const DEFAULT_FRAME_INSET: f32 = 40.0;

/// Movement (in logical points) below which a pointer sample counts as jitter
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;

/// Everything a paint view needs to know before the first event arrives.
///
/// Missing fields fall back to the reference look, so a partial JSON document
/// such as `{"frame_inset": 10}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintConfig {
    #[serde(deserialize_with = "palette::merge_with_defaults")]
    pub palette: Palette,
    pub stroke: StrokeStyle,
    pub frame_inset: f32,
    pub touch_slop: f32,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            stroke: StrokeStyle::default(),
            frame_inset: DEFAULT_FRAME_INSET,
            touch_slop: DEFAULT_TOUCH_SLOP,
        }
    }
}

impl PaintConfig {
    pub fn from_json(json: &str) -> PaintResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.stroke.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> PaintResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaintError;
    use crate::palette::{COLOR_BACKGROUND, COLOR_PAINT};
    use egui::Color32;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PaintConfig::from_json(r#"{ "frame_inset": 10.0 }"#).unwrap();
        assert_eq!(config.frame_inset, 10.0);
        assert_eq!(config.touch_slop, DEFAULT_TOUCH_SLOP);
        assert_eq!(config.stroke, StrokeStyle::default());
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn test_palette_from_json() {
        let config =
            PaintConfig::from_json(r#"{ "palette": { "colorPaint": [0, 0, 0, 255] } }"#).unwrap();
        assert_eq!(config.palette.get(COLOR_PAINT), Some(Color32::BLACK));
        assert_eq!(
            config.palette.get(COLOR_BACKGROUND),
            Palette::default().get(COLOR_BACKGROUND)
        );
        assert_eq!(config.palette.len(), 2);
    }

    #[test]
    fn test_palette_accepts_extra_entries() {
        let config =
            PaintConfig::from_json(r#"{ "palette": { "colorAccent": [0, 0, 255, 255] } }"#)
                .unwrap();
        assert_eq!(config.palette.get("colorAccent"), Some(Color32::BLUE));
        assert_eq!(config.palette.len(), 3);
    }

    #[test]
    fn test_invalid_json() {
        let result = PaintConfig::from_json("{ not json");
        assert!(matches!(result, Err(PaintError::Config(_))));
    }

    #[test]
    fn test_invalid_stroke_width() {
        let result = PaintConfig::from_json(r#"{ "stroke": { "width": -2.0 } }"#);
        assert!(matches!(result, Err(PaintError::InvalidStyle(_))));
    }

    #[test]
    fn test_json_survives_reload() {
        let config = PaintConfig {
            frame_inset: 12.0,
            ..PaintConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(PaintConfig::from_json(&json).unwrap(), config);
    }
}
