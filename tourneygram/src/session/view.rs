//! Navigation state machine for the two lobby screens.
//!
//! Fetches are issued under the [`NavToken`] current at navigation time.
//! Responses can complete out of order and navigation does not cancel
//! in-flight requests, so a completion whose token no longer matches the
//! active navigation is stale and must be discarded instead of rendered.

use std::fmt;

use crate::tournament::TournamentId;

/// Which screen is active. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Details,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => f.write_str("list"),
            Self::Details => f.write_str("details"),
        }
    }
}

/// Token identifying one navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavToken(u64);

/// The active view plus the selected tournament.
///
/// Invariant: a tournament is selected iff the details view is active.
#[derive(Debug)]
pub struct Navigation {
    view: View,
    selected: Option<TournamentId>,
    generation: u64,
}

impl Navigation {
    /// Start on the list view with nothing selected.
    pub fn new() -> Self {
        Self {
            view: View::List,
            selected: None,
            generation: 0,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected(&self) -> Option<&TournamentId> {
        self.selected.as_ref()
    }

    /// Switch to the details view for `id` and return the token its fetch
    /// must carry. Also used for a details self-refresh after a join.
    pub fn open_details(&mut self, id: TournamentId) -> NavToken {
        log::debug!("navigating {} -> details ({id})", self.view);
        self.view = View::Details;
        self.selected = Some(id);
        self.bump()
    }

    /// Return to the list view, dropping the selection. The caller reloads
    /// the list exactly once with the returned token.
    pub fn back_to_list(&mut self) -> NavToken {
        log::debug!("navigating {} -> list", self.view);
        self.view = View::List;
        self.selected = None;
        self.bump()
    }

    /// Re-issue the active view's fetch under a fresh token, invalidating
    /// whatever is still in flight.
    pub fn reload(&mut self) -> NavToken {
        self.bump()
    }

    /// Whether a completion issued under `token` may still render.
    pub fn is_current(&self, token: NavToken) -> bool {
        if token.0 == self.generation {
            true
        } else {
            log::debug!(
                "discarding stale completion (token {} != active {})",
                token.0,
                self.generation
            );
            false
        }
    }

    fn bump(&mut self) -> NavToken {
        self.generation += 1;
        NavToken(self.generation)
    }
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some_id() -> TournamentId {
        TournamentId::new("a1b2c3d4")
    }

    #[test]
    fn test_initial_state_is_list_with_no_selection() {
        let nav = Navigation::new();
        assert_eq!(nav.view(), View::List);
        assert!(nav.selected().is_none());
    }

    #[test]
    fn test_open_details_selects_tournament() {
        let mut nav = Navigation::new();
        nav.open_details(some_id());
        assert_eq!(nav.view(), View::Details);
        assert_eq!(nav.selected(), Some(&some_id()));
    }

    #[test]
    fn test_back_to_list_clears_selection() {
        let mut nav = Navigation::new();
        nav.open_details(some_id());
        nav.back_to_list();
        assert_eq!(nav.view(), View::List);
        assert!(nav.selected().is_none());
    }

    #[test]
    fn test_selection_present_iff_details_active() {
        let mut nav = Navigation::new();
        assert_eq!(nav.selected().is_some(), nav.view() == View::Details);
        nav.open_details(some_id());
        assert_eq!(nav.selected().is_some(), nav.view() == View::Details);
        nav.back_to_list();
        assert_eq!(nav.selected().is_some(), nav.view() == View::Details);
    }

    #[test]
    fn test_latest_token_is_current() {
        let mut nav = Navigation::new();
        let token = nav.open_details(some_id());
        assert!(nav.is_current(token));
    }

    #[test]
    fn test_token_goes_stale_after_navigation() {
        let mut nav = Navigation::new();
        let first = nav.open_details(some_id());
        let second = nav.open_details(TournamentId::new("e5f6a7b8"));
        assert!(!nav.is_current(first));
        assert!(nav.is_current(second));
    }

    #[test]
    fn test_token_goes_stale_after_back_navigation() {
        let mut nav = Navigation::new();
        let detail_token = nav.open_details(some_id());
        let list_token = nav.back_to_list();
        assert!(!nav.is_current(detail_token));
        assert!(nav.is_current(list_token));
    }

    #[test]
    fn test_reload_keeps_view_but_invalidates_previous_token() {
        let mut nav = Navigation::new();
        let stale = nav.open_details(some_id());
        let fresh = nav.reload();
        assert_eq!(nav.view(), View::Details);
        assert_eq!(nav.selected(), Some(&some_id()));
        assert!(!nav.is_current(stale));
        assert!(nav.is_current(fresh));
    }

    #[test]
    fn test_details_self_refresh_keeps_details_active() {
        let mut nav = Navigation::new();
        nav.open_details(some_id());
        let token = nav.open_details(some_id());
        assert_eq!(nav.view(), View::Details);
        assert!(nav.is_current(token));
    }
}
