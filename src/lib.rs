//! Vavoo live TV addon with an HLS streaming proxy
//!
//! The crate serves a media-addon catalog of live channels taken from the
//! Vavoo origin and relays their HLS playlists and segments, so clients only
//! ever talk to this service.

pub mod addon;
pub mod cache;
pub mod catalog;
pub mod channels;
pub mod config;
pub mod errors;
pub mod logos;
pub mod proxy;
pub mod utils;
pub mod web;
