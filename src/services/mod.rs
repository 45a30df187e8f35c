//! Services module
//!
//! Business logic services that coordinate between the repository and
//! the remote clients.

pub mod catalog;
pub mod reminders;

pub use catalog::CatalogService;
pub use reminders::RemindersService;
