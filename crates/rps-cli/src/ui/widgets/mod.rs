use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Block as BlockWidget,
};
use rps_engine::Theme;

pub use self::{
    camera_display::*, key_binding_display::*, score_display::*, session_display::*,
};

mod camera_display;
mod key_binding_display;
mod score_display;
mod session_display;

mod color {
    use ratatui::style::Color;

    pub const CHARCOAL: Color = Color::Rgb(30, 30, 30);
    pub const SILVER: Color = Color::Rgb(220, 220, 220);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const DARK_GREEN: Color = Color::Rgb(0, 150, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const NAVY: Color = Color::Rgb(0, 0, 150);
    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const TEAL: Color = Color::Rgb(0, 150, 150);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const OLIVE: Color = Color::Rgb(150, 150, 0);
}

/// Colors for one [`Theme`].
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub roi: Color,
    pub accent: Color,
    pub win: Color,
    pub lose: Color,
    pub draw: Color,
}

impl Palette {
    pub const DARK: Self = Self {
        background: color::CHARCOAL,
        text: color::WHITE,
        muted: color::GRAY,
        roi: color::GREEN,
        accent: color::YELLOW,
        win: color::GREEN,
        lose: color::RED,
        draw: color::CYAN,
    };

    pub const LIGHT: Self = Self {
        background: color::SILVER,
        text: color::BLACK,
        muted: color::GRAY,
        roi: color::DARK_GREEN,
        accent: color::OLIVE,
        win: color::DARK_GREEN,
        lose: color::NAVY,
        draw: color::TEAL,
    };

    pub const fn of(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::DARK,
            Theme::Light => Self::LIGHT,
        }
    }

    pub const fn base(&self) -> Style {
        Style::new().fg(self.text).bg(self.background)
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}
