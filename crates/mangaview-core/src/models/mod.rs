//! Data models for the manga viewer.
//!
//! - `MangaItem`: one entry of the remote manifest
//! - `SlideRecord`, `SlideDeck`: the immutable slide sequence built from it

pub mod slide;

pub use slide::{MangaItem, SlideDeck, SlideRecord};
