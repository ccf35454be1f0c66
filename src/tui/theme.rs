// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use thiserror::Error;

pub(crate) const PALETTE_ENV: &str = "ONTOLENS_THEME_PALETTE";

/// Styles for every visual state the explorer distinguishes.
///
/// Without a palette the terminal's own ANSI colors are used.
#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<TuiPalette>,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let value = match env::var(PALETTE_ENV) {
            Ok(value) => value,
            Err(env::VarError::NotPresent) => return Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ThemeError::InvalidEnv {
                    name: PALETTE_ENV,
                    reason: "value is not valid unicode".to_owned(),
                });
            }
        };
        Self::from_palette_str(&value)
            .map_err(|reason| ThemeError::InvalidEnv { name: PALETTE_ENV, reason })
    }

    fn from_palette_str(value: &str) -> Result<Self, String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        Ok(Self { palette: Some(trimmed.parse()?) })
    }

    fn color(&self, slot: Slot) -> Color {
        match &self.palette {
            Some(palette) => palette.colors[slot as usize],
            None => slot.fallback(),
        }
    }

    pub(crate) fn base_style(&self) -> Style {
        match &self.palette {
            Some(_) => Style::default().fg(self.color(Slot::Fg)).bg(self.color(Slot::Bg)),
            None => Style::default(),
        }
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(self.color(Slot::Accent))
        } else {
            self.base_style().fg(self.color(Slot::Muted))
        }
    }

    pub(crate) fn cursor_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn highlight_style(&self) -> Style {
        self.base_style()
            .fg(Color::Black)
            .bg(self.color(Slot::Highlight))
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn selected_style(&self) -> Style {
        self.base_style().fg(self.color(Slot::Selected)).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn focus_style(&self) -> Style {
        self.base_style().fg(self.color(Slot::Accent)).add_modifier(Modifier::UNDERLINED)
    }

    pub(crate) fn muted_style(&self) -> Style {
        self.base_style().fg(self.color(Slot::Muted))
    }

    pub(crate) fn error_style(&self) -> Style {
        self.base_style().fg(self.color(Slot::Error))
    }

    pub(crate) fn code_style(&self) -> Style {
        self.base_style().fg(self.color(Slot::Code))
    }

    pub(crate) fn user_style(&self) -> Style {
        self.base_style().fg(self.color(Slot::Accent)).add_modifier(Modifier::BOLD)
    }
}

/// Named colors, in the order they appear in the palette value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Fg,
    Bg,
    Accent,
    Muted,
    Highlight,
    Selected,
    Error,
    Code,
}

impl Slot {
    const COUNT: usize = 8;
    const NAMES: &'static str = "fg,bg,accent,muted,highlight,selected,error,code";

    fn fallback(self) -> Color {
        match self {
            Self::Fg | Self::Bg => Color::Reset,
            Self::Accent => Color::LightGreen,
            Self::Muted => Color::DarkGray,
            Self::Highlight => Color::Yellow,
            Self::Selected => Color::Green,
            Self::Error => Color::Red,
            Self::Code => Color::Cyan,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TuiPalette {
    colors: [Color; Slot::COUNT],
}

impl FromStr for TuiPalette {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts = value.split(',').map(str::trim).collect::<Vec<_>>();
        if parts.len() != Slot::COUNT {
            return Err(format!(
                "expected {} comma-separated colors ({}), got {}",
                Slot::COUNT,
                Slot::NAMES,
                parts.len()
            ));
        }

        let mut colors = [Color::Reset; Slot::COUNT];
        for (slot, part) in colors.iter_mut().zip(parts) {
            *slot = parse_color(part)?;
        }
        Ok(Self { colors })
    }
}

/// Accepts `#RRGGBB`, `0xRRGGBB`, `rgb:RR/GG/BB` and `reset`.
fn parse_color(value: &str) -> Result<Color, String> {
    let lower = value.trim().to_ascii_lowercase();
    if lower.is_empty() {
        return Err("empty color".to_owned());
    }
    if lower == "reset" {
        return Ok(Color::Reset);
    }

    if let Some(rest) = lower.strip_prefix("rgb:") {
        let channels = rest.split('/').map(parse_channel).collect::<Result<Vec<_>, _>>()?;
        return match channels.as_slice() {
            [r, g, b] => Ok(Color::Rgb(*r, *g, *b)),
            _ => Err(format!("invalid rgb: value: {value}")),
        };
    }

    let hex = lower.strip_prefix('#').or_else(|| lower.strip_prefix("0x")).unwrap_or(&lower);
    if hex.len() != 6 {
        return Err(format!("invalid hex color: {value} (expected #RRGGBB)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color: {value}"))?;
    Ok(Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

/// Two hex digits, or four (X11 style) of which the high byte is kept.
fn parse_channel(value: &str) -> Result<u8, String> {
    let value = value.trim();
    let parsed = match value.len() {
        2 | 4 => u16::from_str_radix(value, 16).ok(),
        _ => None,
    };
    match (parsed, value.len()) {
        (Some(channel), 2) => Ok(channel as u8),
        (Some(channel), _) => Ok((channel >> 8) as u8),
        (None, _) => Err(format!("invalid rgb: component {value}")),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ThemeError {
    #[error("invalid env {name}: {reason}")]
    InvalidEnv { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::{parse_color, Slot, TuiPalette, TuiTheme};

    #[test]
    fn palette_parses_all_slots_in_order() {
        let palette: TuiPalette =
            "#111111,#222222,rgb:ff/00/00,0x00ff00,#0000ff,rgb:ffff/8080/0000,reset,#fefefe"
                .parse()
                .expect("palette");

        assert_eq!(palette.colors[Slot::Fg as usize], Color::Rgb(0x11, 0x11, 0x11));
        assert_eq!(palette.colors[Slot::Accent as usize], Color::Rgb(0xff, 0, 0));
        assert_eq!(palette.colors[Slot::Selected as usize], Color::Rgb(0xff, 0x80, 0));
        assert_eq!(palette.colors[Slot::Error as usize], Color::Reset);
        assert_eq!(palette.colors[Slot::Code as usize], Color::Rgb(0xfe, 0xfe, 0xfe));
    }

    #[test]
    fn palette_rejects_wrong_arity_and_bad_colors() {
        let err = "nope".parse::<TuiPalette>().unwrap_err();
        assert!(err.contains("expected 8"));
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("rgb:1/2").is_err());
    }

    #[test]
    fn blank_palette_falls_back_to_terminal_colors() {
        let theme = TuiTheme::from_palette_str("   ").expect("theme");
        assert_eq!(theme.highlight_style().bg, Some(Color::Yellow));
    }
}
