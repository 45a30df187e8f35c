//! Flora core library
//!
//! The data and services layer of the Flora houseplant tracker: the
//! SQLite-backed garden store, the plant-catalogue and weather clients,
//! the image cache, configuration, and reminder calendar exchange. The
//! desktop shell sits on top of this crate.

pub mod api;
pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod ics;
pub mod services;
