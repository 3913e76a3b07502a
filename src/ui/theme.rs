use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub error: Color,     // Red
    pub address: Color,
    pub number: Color,
    pub text: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub top_of_stack: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    error: Color::Rgb(243, 139, 168),
    address: Color::Rgb(148, 226, 213),        // Cyan/teal for addresses
    number: Color::Rgb(250, 179, 135),         // Orange for values
    text: Color::Rgb(166, 227, 161),           // Green for the ASCII column
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    top_of_stack: Color::Rgb(245, 194, 231),   // Pink
};
