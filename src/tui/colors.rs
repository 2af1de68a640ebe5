//! Color constants for the terminal user interface.

use ratatui::style::Color;

// Bar colors follow the status they count.

/// Used for Pending bars
pub const SOFT_RED: Color = Color::Rgb(255, 153, 153);
/// Used for Completed bars
pub const SKY_BLUE: Color = Color::Rgb(102, 179, 255);

// Button faces

pub const ADD_GREEN: Color = Color::Rgb(76, 175, 80);
pub const COMPLETE_BLUE: Color = Color::Rgb(33, 150, 243);
pub const DELETE_RED: Color = Color::Rgb(244, 67, 54);

/// Used for the header and status bar
pub const SLATE: Color = Color::Rgb(51, 51, 51);
