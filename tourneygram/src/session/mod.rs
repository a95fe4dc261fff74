//! View-session state for the lobby client.

pub mod view;

pub use view::{NavToken, Navigation, View};
