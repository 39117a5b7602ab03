//! Pure layout arithmetic for dropdown surfaces.
//!
//! All geometry is expressed in header-local units: the header quad is
//! `HEADER_SIZE` wide/tall and option rows hang below it one row per unit.
//! The root entity carries the render scale, so nothing here depends on
//! world pixels except `DropdownLayout::root_transform`.
use bevy::prelude::*;
use smallvec::SmallVec;

use super::config::DropdownConfig;

pub const HEADER_SIZE: Vec2 = Vec2::new(4.0, 1.0);
pub const HEADER_FACE_SIZE: Vec2 = Vec2::new(3.9, 0.9);
pub const TOGGLE_SIZE: Vec2 = Vec2::new(1.0, 0.9);
pub const OPTION_SIZE: Vec2 = Vec2::new(4.0, 1.0);

/// Scale used when either configured dimension is zero.
pub const FALLBACK_SCALE: Vec2 = Vec2::new(1.0, 0.25);

/// Vertical gap between the header centre and the first option row centre.
pub const FIRST_ROW_OFFSET: f32 = 1.6;
pub const ROW_HEIGHT: f32 = 1.0;

pub const BORDER_THICKNESS: f32 = 0.1;
/// Borders draw over the option rows they outline.
pub const BORDER_Z: f32 = 0.01;

pub const HEADER_FACE_Z: f32 = 0.001;
pub const HEADER_CONTENT_Z: f32 = 0.002;

/// Height of one unit of label scale.
pub const LABEL_GLYPH_UNITS: f32 = 0.025;
pub const LABEL_SCALE_FACTOR: f32 = 3.75;
pub const LABEL_OFFSET_FACTOR: f32 = 0.4375;
pub const TOGGLE_OFFSET_FACTOR: f32 = 0.37;

/// Button text size per unit of header x scale.
pub const BUTTON_TEXT_SIZE_FACTOR: f32 = 0.375;
/// Height of one unit of button text size.
pub const BUTTON_GLYPH_UNITS: f32 = 0.5;

/// Font size text is rasterised at before being scaled into layout units.
pub const TEXT_RESOLUTION: f32 = 64.0;

pub const CARET_GLYPH: &str = "v";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadLayout {
    pub size: Vec2,
    pub translation: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Center,
    CenterLeft,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelLayout {
    pub translation: Vec3,
    /// Glyph height in layout units.
    pub glyph_height: f32,
    pub anchor: TextAnchor,
}

impl LabelLayout {
    /// Uniform transform scale that maps `TEXT_RESOLUTION` to `glyph_height`.
    pub fn text_scale(&self) -> f32 {
        self.glyph_height / TEXT_RESOLUTION
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderLayout {
    pub background: QuadLayout,
    pub face: QuadLayout,
    pub label: LabelLayout,
    pub toggle: QuadLayout,
    /// Caret text, relative to the toggle button.
    pub caret: LabelLayout,
}

impl HeaderLayout {
    pub fn new(x_scale: f32) -> Self {
        // The header always spans its full quad width regardless of x scale.
        let span = x_scale * (HEADER_SIZE.x / x_scale);

        Self {
            background: QuadLayout {
                size: HEADER_SIZE,
                translation: Vec3::ZERO,
            },
            face: QuadLayout {
                size: HEADER_FACE_SIZE,
                translation: Vec3::new(0.0, 0.0, HEADER_FACE_Z),
            },
            label: LabelLayout {
                translation: Vec3::new(-span * LABEL_OFFSET_FACTOR, 0.0, HEADER_CONTENT_Z),
                glyph_height: span * LABEL_SCALE_FACTOR * LABEL_GLYPH_UNITS,
                anchor: TextAnchor::CenterLeft,
            },
            toggle: QuadLayout {
                size: TOGGLE_SIZE,
                translation: Vec3::new(span * TOGGLE_OFFSET_FACTOR, 0.0, HEADER_CONTENT_Z),
            },
            caret: button_text(x_scale),
        }
    }
}

fn button_text(x_scale: f32) -> LabelLayout {
    LabelLayout {
        translation: Vec3::new(0.0, 0.0, HEADER_FACE_Z),
        glyph_height: x_scale * BUTTON_TEXT_SIZE_FACTOR * BUTTON_GLYPH_UNITS,
        anchor: TextAnchor::Center,
    }
}

/// Row quad for option `index`, relative to the option list container.
pub fn option_quad(index: usize) -> QuadLayout {
    QuadLayout {
        size: OPTION_SIZE,
        translation: Vec3::new(0.0, -(index as f32 * ROW_HEIGHT + FIRST_ROW_OFFSET), 0.0),
    }
}

/// Option text, relative to its row.
pub fn option_text(x_scale: f32) -> LabelLayout {
    button_text(x_scale)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderStyle {
    Full,
    Sides,
    Hidden,
}

impl BorderStyle {
    /// `lr_border` only matters when the full border is off.
    pub const fn from_flags(border: bool, lr_border: bool) -> Self {
        match (border, lr_border) {
            (true, _) => Self::Full,
            (false, true) => Self::Sides,
            (false, false) => Self::Hidden,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderSide {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderSegment {
    pub side: BorderSide,
    pub quad: QuadLayout,
}

impl BorderSegment {
    fn new(side: BorderSide, size: Vec2, x: f32, y: f32) -> Self {
        Self {
            side,
            quad: QuadLayout {
                size,
                translation: Vec3::new(x, y, BORDER_Z),
            },
        }
    }
}

/// Border rectangles framing `option_count` rows.
pub fn border_segments(style: BorderStyle, option_count: usize) -> SmallVec<[BorderSegment; 4]> {
    let count = option_count as f32;
    let half_width = HEADER_SIZE.x / 2.0;
    let side_y = -(count + 0.2) / 2.0 - 1.0;
    let left_x = -half_width - BORDER_THICKNESS / 2.0;

    let mut segments = SmallVec::new();
    match style {
        BorderStyle::Full => {
            let horizontal = Vec2::new(HEADER_SIZE.x, BORDER_THICKNESS);
            let vertical = Vec2::new(BORDER_THICKNESS, count + BORDER_THICKNESS);
            segments.push(BorderSegment::new(BorderSide::Top, horizontal, 0.0, -1.1));
            segments.push(BorderSegment::new(
                BorderSide::Bottom,
                horizontal,
                0.0,
                0.1 - (count + 1.2),
            ));
            segments.push(BorderSegment::new(BorderSide::Left, vertical, left_x, side_y));
            segments.push(BorderSegment::new(BorderSide::Right, vertical, half_width, side_y));
        }
        BorderStyle::Sides => {
            let vertical = Vec2::new(BORDER_THICKNESS, count);
            segments.push(BorderSegment::new(BorderSide::Left, vertical, left_x, side_y));
            segments.push(BorderSegment::new(BorderSide::Right, vertical, half_width, side_y));
        }
        BorderStyle::Hidden => {}
    }
    segments
}

pub fn normalize_scale(scale: Vec2) -> Vec2 {
    if scale.x == 0.0 || scale.y == 0.0 {
        FALLBACK_SCALE
    } else {
        scale
    }
}

/// Scale applied to the root entity. The x axis is divided by the header's
/// 4:1 aspect so a scale of `(4, 1)` renders the header at unit scale.
pub fn render_scale(scale: Vec2) -> Vec2 {
    Vec2::new(scale.x / HEADER_SIZE.x, scale.y)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropdownLayout {
    pub position: Vec2,
    /// Normalized configured scale.
    pub scale: Vec2,
    pub render_scale: Vec2,
    pub pixels_per_unit: f32,
    pub borders: BorderStyle,
    pub alternate_colors: bool,
}

impl DropdownLayout {
    pub fn from_config(config: &DropdownConfig) -> Self {
        let scale = normalize_scale(config.scale.to_pair());
        Self {
            position: config.position.to_pair(),
            scale,
            render_scale: render_scale(scale),
            pixels_per_unit: config.pixels_per_unit,
            borders: BorderStyle::from_flags(config.border, config.lr_border),
            alternate_colors: config.change_color,
        }
    }

    pub fn x_scale(&self) -> f32 {
        self.scale.x
    }

    pub fn header(&self) -> HeaderLayout {
        HeaderLayout::new(self.x_scale())
    }

    pub fn borders(&self, option_count: usize) -> SmallVec<[BorderSegment; 4]> {
        border_segments(self.borders, option_count)
    }

    pub fn root_transform(&self) -> Transform {
        Transform::from_translation((self.position * self.pixels_per_unit).extend(0.0))
            .with_scale((self.render_scale * self.pixels_per_unit).extend(1.0))
    }
}
