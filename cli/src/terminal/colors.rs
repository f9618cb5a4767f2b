use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 200, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 190, b: 90 };
pub const SEPARATOR: Color = Color::TrueColor { r: 110, g: 110, b: 110 };
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 220, g: 220, b: 220 };
pub const COMMAND: Color = Color::TrueColor { r: 180, g: 230, b: 160 };
pub const PASSED: Color = Color::TrueColor { r: 90, g: 220, b: 120 };
pub const FAILED: Color = Color::TrueColor { r: 240, g: 90, b: 90 };
