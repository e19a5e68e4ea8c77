use ratatui::style::Color;
use crate::memory::symbol::Symbol;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub symbol_i: Color,
    pub symbol_c: Color,
    pub symbol_f: Color,
    pub symbol_p: Color,
}

impl Theme {
    pub fn symbol(&self, symbol: Symbol) -> Color {
        match symbol {
            Symbol::I => self.symbol_i,
            Symbol::C => self.symbol_c,
            Symbol::F => self.symbol_f,
            Symbol::P => self.symbol_p,
        }
    }
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    symbol_i: Color::Rgb(137, 180, 250),
    symbol_c: Color::Rgb(166, 227, 161),
    symbol_f: Color::Rgb(249, 226, 175),
    symbol_p: Color::Rgb(245, 194, 231),
};
