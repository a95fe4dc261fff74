//! Host-platform identity.

pub mod models;

pub use models::HostUser;
