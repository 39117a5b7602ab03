//! Fixed palette used by dropdown surfaces.
//!
//! Dropdowns are deliberately not themeable: every swatch is a constant and
//! the palette map is built once on first access.
use bevy::{color::Luminance, prelude::*};
use enum_map::{enum_map, Enum, EnumMap};
use once_cell::sync::Lazy;

pub const HEADER_FRAME_COLOR: Color = Color::Srgba(Srgba::rgb(0x5e as f32 / 255.0, 0x5e as f32 / 255.0, 0x5e as f32 / 255.0));
pub const OPTION_DARK_COLOR: Color = Color::Srgba(Srgba::rgb(0x26 as f32 / 255.0, 0x26 as f32 / 255.0, 0x26 as f32 / 255.0));
pub const OPTION_LIGHT_COLOR: Color = Color::Srgba(Srgba::rgb(0x33 as f32 / 255.0, 0x33 as f32 / 255.0, 0x33 as f32 / 255.0));
pub const BORDER_COLOR: Color = Color::WHITE;
pub const TEXT_COLOR: Color = Color::WHITE;

/// Amount an option is lightened while hovered.
pub const HIGHLIGHT_TINT: f32 = 0.2;

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swatch {
    HeaderFrame,
    HeaderFace,
    Toggle,
    OptionDark,
    OptionLight,
    Border,
    Text,
}

static PALLET: Lazy<EnumMap<Swatch, Color>> = Lazy::new(|| {
    enum_map! {
        Swatch::HeaderFrame => HEADER_FRAME_COLOR,
        Swatch::HeaderFace => OPTION_LIGHT_COLOR,
        Swatch::Toggle => HEADER_FRAME_COLOR,
        Swatch::OptionDark => OPTION_DARK_COLOR,
        Swatch::OptionLight => OPTION_LIGHT_COLOR,
        Swatch::Border => BORDER_COLOR,
        Swatch::Text => TEXT_COLOR,
    }
});

pub fn swatch(swatch: Swatch) -> Color {
    PALLET[swatch]
}

/// Hover colour for a clickable surface.
pub fn highlight(color: Color) -> Color {
    color.lighter(HIGHLIGHT_TINT)
}

/// Parses `#rrggbb`/`rrggbb` style strings.
pub fn parse_hex(hex: &str) -> Option<Color> {
    Srgba::hex(hex).ok().map(Color::Srgba)
}

/// Background colours for `count` option rows.
///
/// The shade starts dark. When `alternate` is set it flips before every row,
/// so row 0 is light, row 1 dark, and so on. Otherwise every row stays dark.
pub fn option_shades(count: usize, alternate: bool) -> Vec<Swatch> {
    let mut shade = Swatch::OptionDark;
    (0..count)
        .map(|index| {
            if alternate {
                shade = match shade {
                    Swatch::OptionLight => Swatch::OptionDark,
                    _ => Swatch::OptionLight,
                };
                debug!("option {index} shade {shade:?}");
            }
            shade
        })
        .collect()
}
