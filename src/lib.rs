//! Marquee - curated movie lists with cached poster artwork
//!
//! This library crate exposes the core functionality for integration testing.

pub mod cache;
pub mod config;
pub mod lists;
pub mod posters;
pub mod radarr;
pub mod server;
pub mod tvdb;
