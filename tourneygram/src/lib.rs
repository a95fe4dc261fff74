//! # Tourneygram
//!
//! Domain models and view-session state for a tournament lobby mini-app
//! client. The lobby server is an external HTTP collaborator; this library
//! only holds the transient projections of its responses and the navigation
//! state machine the client drives.
//!
//! ## Core Modules
//!
//! - [`tournament`]: wire models for the lobby API (summaries, details,
//!   rosters, join receipts)
//! - [`session`]: list/details navigation with stale-response guarding
//! - [`user`]: host-platform identity and display-name derivation
//!
//! ## Example
//!
//! ```
//! use tourneygram::{Navigation, TournamentId, View};
//!
//! let mut nav = Navigation::new();
//! assert_eq!(nav.view(), View::List);
//!
//! let token = nav.open_details(TournamentId::new("a1b2c3d4"));
//! assert!(nav.is_current(token));
//! ```

/// List/details navigation state machine.
pub mod session;
pub use session::{NavToken, Navigation, View};

/// Wire models for the tournament lobby API.
pub mod tournament;
pub use tournament::{
    JoinReceipt, Player, TournamentDetail, TournamentId, TournamentStatus, TournamentSummary,
};

/// Host-platform identity.
pub mod user;
pub use user::HostUser;
