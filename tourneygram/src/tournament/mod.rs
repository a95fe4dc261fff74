//! Tournament wire models and roster helpers.

pub mod models;

pub use models::{
    JoinReceipt, Player, TournamentDetail, TournamentId, TournamentStatus, TournamentSummary,
};
