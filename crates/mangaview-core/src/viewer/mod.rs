//! Swipeable vertical slide viewer.
//!
//! - `controller`: `SlideController`, the current index and render frames
//! - `gesture`: touch drag recognition and the 50px commit threshold
//! - `fullscreen`: optional fullscreen button and capability detection

pub mod controller;
pub mod fullscreen;
pub mod gesture;

pub use controller::{translations, RenderFrame, SlideController, ViewerState};
pub use fullscreen::{
    FullscreenCapability, FullscreenGlyph, FullscreenMode, FullscreenPlatform, FullscreenToggle,
};
pub use gesture::{GestureOutcome, GestureState, COMMIT_THRESHOLD_PX};
