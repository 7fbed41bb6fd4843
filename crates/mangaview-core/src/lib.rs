//! Core library for mangaview.
//!
//! - `api`: the `Network` fetch seam, the live HTTP client, the manifest client
//! - `models`: manifest items and the slide deck
//! - `viewer`: slide controller, swipe gestures, fullscreen toggle
//! - `cache`: cache-first offline interceptor and its storage backends
//! - `config`: user configuration

pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod viewer;
