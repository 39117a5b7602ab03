//! Dropdown configuration as accepted from code or JSON content.
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::DropdownError;

/// A two-component extent given either as a scalar or a short list.
///
/// A scalar or one-element list expands to a symmetric pair; longer lists use
/// their first two entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extent {
    Scalar(f32),
    List(Vec<f32>),
}

impl Extent {
    pub fn to_pair(&self) -> Vec2 {
        match self {
            Self::Scalar(value) => Vec2::splat(*value),
            Self::List(values) => match values.as_slice() {
                [] => Vec2::ZERO,
                [value] => Vec2::splat(*value),
                [x, y, ..] => Vec2::new(*x, *y),
            },
        }
    }
}

impl From<f32> for Extent {
    fn from(value: f32) -> Self {
        Self::Scalar(value)
    }
}

impl From<(f32, f32)> for Extent {
    fn from((x, y): (f32, f32)) -> Self {
        Self::List(vec![x, y])
    }
}

impl From<[f32; 1]> for Extent {
    fn from(values: [f32; 1]) -> Self {
        Self::List(values.to_vec())
    }
}

impl From<Vec2> for Extent {
    fn from(value: Vec2) -> Self {
        Self::List(vec![value.x, value.y])
    }
}

fn default_text() -> String {
    String::from("Select Option")
}

fn default_options() -> Vec<String> {
    vec![String::from("Option1"), String::from("Option2")]
}

fn default_position() -> Extent {
    Extent::List(vec![0.0, 0.0])
}

fn default_scale() -> Extent {
    Extent::List(vec![4.0, 1.0])
}

const fn default_true() -> bool {
    true
}

const fn default_pixels_per_unit() -> f32 {
    48.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownConfig {
    /// Initial header label.
    #[serde(default = "default_text")]
    pub text: String,
    #[serde(default = "default_options")]
    pub options: Vec<String>,
    #[serde(default = "default_position")]
    pub position: Extent,
    /// Header size in layout units. The header quad keeps a 4:1 aspect, so
    /// `(0.25, 0.0625)` renders it at unit scale.
    #[serde(default = "default_scale")]
    pub scale: Extent,
    /// Accepted for compatibility and ignored. Dropdown colours are fixed.
    #[serde(default)]
    pub color: Option<String>,
    /// Draw a full border around the option list.
    #[serde(default = "default_true")]
    pub border: bool,
    /// Draw only the left and right border. Ignored when `border` is set.
    #[serde(default = "default_true")]
    pub lr_border: bool,
    /// Alternate option row shades.
    #[serde(default = "default_true")]
    pub change_color: bool,
    #[serde(default = "default_pixels_per_unit")]
    pub pixels_per_unit: f32,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            text: default_text(),
            options: default_options(),
            position: default_position(),
            scale: default_scale(),
            color: None,
            border: true,
            lr_border: true,
            change_color: true,
            pixels_per_unit: default_pixels_per_unit(),
        }
    }
}

impl DropdownConfig {
    pub fn new(text: impl Into<String>, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            text: text.into(),
            options: options.into_iter().map(Into::into).collect(),
            ..default()
        }
    }

    pub fn with_position(mut self, position: impl Into<Extent>) -> Self {
        self.position = position.into();
        self
    }

    pub fn with_scale(mut self, scale: impl Into<Extent>) -> Self {
        self.scale = scale.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_borders(mut self, border: bool, lr_border: bool) -> Self {
        self.border = border;
        self.lr_border = lr_border;
        self
    }

    pub fn with_change_color(mut self, change_color: bool) -> Self {
        self.change_color = change_color;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, DropdownError> {
        serde_json::from_str(json)
            .map_err(|error| DropdownError::ConfigParse(format!("invalid dropdown config: {error}")))
    }

    /// Parses a JSON array of dropdown configs.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, DropdownError> {
        serde_json::from_str(json).map_err(|error| {
            DropdownError::ConfigParse(format!("invalid dropdown config list: {error}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_and_single_element_extents_expand_symmetrically() {
        assert_eq!(Extent::from(2.0).to_pair(), Vec2::splat(2.0));
        assert_eq!(Extent::from([3.0]).to_pair(), Vec2::splat(3.0));
        assert_eq!(Extent::from((2.0, 2.0)).to_pair(), Extent::from(2.0).to_pair());
        assert_eq!(Extent::List(vec![]).to_pair(), Vec2::ZERO);
        assert_eq!(Extent::List(vec![1.0, 2.0, 3.0]).to_pair(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = DropdownConfig::from_json(r#"{ "options": ["A", "B", "C"], "scale": 2 }"#)
            .expect("config should parse");

        assert_eq!(config.text, "Select Option");
        assert_eq!(config.options, vec!["A", "B", "C"]);
        assert_eq!(config.scale, Extent::Scalar(2.0));
        assert_eq!(config.position.to_pair(), Vec2::ZERO);
        assert!(config.border && config.lr_border && config.change_color);
        assert!(config.color.is_none());
    }

    #[test]
    fn json_accepts_list_extents() {
        let config =
            DropdownConfig::from_json(r#"{ "position": [3], "scale": [2, 0.5], "border": false }"#)
                .expect("config should parse");

        assert_eq!(config.position.to_pair(), Vec2::splat(3.0));
        assert_eq!(config.scale.to_pair(), Vec2::new(2.0, 0.5));
        assert!(!config.border);
    }

    #[test]
    fn malformed_json_reports_config_parse_error() {
        let error = DropdownConfig::from_json("{ options: ").expect_err("should fail");
        assert!(matches!(error, DropdownError::ConfigParse(_)));
    }

    #[test]
    fn default_options_are_owned_per_instance() {
        let mut first = DropdownConfig::default();
        first.options.push(String::from("Extra"));
        let second = DropdownConfig::default();

        assert_eq!(second.options.len(), 2);
    }
}
