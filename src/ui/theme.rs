use ratatui::style::{Color, Modifier, Style};

pub(super) const UI_MARGIN: u16 = 1;
pub(super) const HEADER_HEIGHT: u16 = 3;
pub(super) const FOOTER_HEIGHT: u16 = 1;
pub(super) const BACKGROUND_RGB: (u8, u8, u8) = (0x0a, 0x0a, 0x0a);
pub(super) const BORDER_RGB: (u8, u8, u8) = (0xe5, 0xe7, 0xeb);
pub(super) const MUTED_RGB: (u8, u8, u8) = (0xd1, 0xd5, 0xdb);
pub(super) const ACCENT_RGB: (u8, u8, u8) = (0x22, 0xd3, 0xee);
pub(super) const GREEN_RGB: (u8, u8, u8) = (0x22, 0xc5, 0x5e);
pub(super) const AMBER_RGB: (u8, u8, u8) = (0xf5, 0x9e, 0x0b);
pub(super) const RED_RGB: (u8, u8, u8) = (0xef, 0x44, 0x44);
pub(super) const HEALTHY_SUCCESS_PCT: f64 = 99.0;
pub(super) const DEGRADED_SUCCESS_PCT: f64 = 90.0;

pub(super) const fn rgb(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub(super) fn style_color(no_color: bool, color: Color) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default().fg(color)
    }
}

pub(super) fn background_style(no_color: bool) -> Style {
    if no_color {
        Style::default()
    } else {
        Style::default().bg(rgb(BACKGROUND_RGB))
    }
}

pub(super) fn border_style(no_color: bool) -> Style {
    style_color(no_color, rgb(BORDER_RGB))
}

pub(super) fn muted_style(no_color: bool) -> Style {
    style_color(no_color, rgb(MUTED_RGB))
}

pub(super) fn highlight_style(no_color: bool) -> Style {
    if no_color {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
            .fg(rgb(BACKGROUND_RGB))
            .bg(rgb(ACCENT_RGB))
            .add_modifier(Modifier::BOLD)
    }
}

/// Green for healthy runs, amber for degraded, red below that.
pub(super) fn success_style(no_color: bool, success_pct: f64) -> Style {
    let color = if success_pct >= HEALTHY_SUCCESS_PCT {
        GREEN_RGB
    } else if success_pct >= DEGRADED_SUCCESS_PCT {
        AMBER_RGB
    } else {
        RED_RGB
    };
    style_color(no_color, rgb(color))
}
