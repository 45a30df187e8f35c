//! Cache module
//!
//! Provides the hash-keyed local cache for remote plant photos.

pub mod image_cache;

pub use image_cache::ImageCache;
