//! Network access for the manga viewer.
//!
//! This module provides the `Network` fetch seam, the live `HttpNetwork`
//! client behind it, and the `ManifestClient` that turns the remote manga
//! listing into a slide deck.

pub mod client;
pub mod error;
pub mod network;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ManifestClient, DEFAULT_MANIFEST_URL};
pub use error::FetchError;
pub use network::{resolve_url, HttpNetwork, Network, Request, Response};
