//! Terminal UI module using ratatui.
//!
//! - `render`: slide carousel, title bar and status bar
//! - `input`: keyboard and mouse handling
//! - `styles`: color scheme and text styling

pub mod input;
pub mod render;
pub mod styles;
