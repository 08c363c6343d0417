//! Per-screen view state and the rules for applying fetch results to it.

use clap::ValueEnum;
use serde::Deserialize;

use crate::app::FetchError;

/// What a screen currently shows. Exactly one of loading, content or error.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(FetchError),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Idle | ViewState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            ViewState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> From<Result<T, FetchError>> for ViewState<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => ViewState::Ready(value),
            Err(err) => ViewState::Failed(err),
        }
    }
}

/// How results of superseded fetches are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SupersedePolicy {
    /// Every result is applied as it arrives; the last to resolve wins, even
    /// if it belongs to an older request.
    #[default]
    LastResolved,
    /// Only the most recently issued request may update the screen.
    LatestIssued,
}

/// Identifies one fetch cycle of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Owner of one screen's [`ViewState`].
///
/// Each fetch cycle starts with [`ScreenCell::begin`] and ends with
/// [`ScreenCell::settle`]. There is no cancellation; a stale cycle simply
/// settles later.
#[derive(Debug)]
pub struct ScreenCell<T> {
    state: ViewState<T>,
    issued: u64,
    policy: SupersedePolicy,
}

impl<T> ScreenCell<T> {
    pub fn new(policy: SupersedePolicy) -> Self {
        Self {
            state: ViewState::Idle,
            issued: 0,
            policy,
        }
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    /// Enter `Loading` and hand out the ticket for the new cycle.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        self.state = ViewState::Loading;
        Ticket(self.issued)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    /// Apply a finished cycle. Returns whether the screen changed.
    pub fn settle(&mut self, ticket: Ticket, result: Result<T, FetchError>) -> bool {
        if self.policy == SupersedePolicy::LatestIssued && !self.is_latest(ticket) {
            tracing::debug!(
                "Discarding result of request {} (latest is {})",
                ticket.0,
                self.issued
            );
            return false;
        }
        self.state = result.into();
        true
    }

    /// Drop whatever is shown, e.g. when the hostname changes.
    pub fn reset(&mut self) {
        self.state = ViewState::Idle;
    }
}

impl<T> Default for ScreenCell<T> {
    fn default() -> Self {
        Self::new(SupersedePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn err(code: &str) -> FetchError {
        FetchError::new(code, "boom")
    }

    #[test]
    fn test_begin_enters_loading() {
        let mut cell: ScreenCell<u32> = ScreenCell::default();
        assert_eq!(*cell.state(), ViewState::Idle);
        cell.begin();
        assert!(cell.state().is_loading());
        assert!(cell.state().ready().is_none());
        assert!(cell.state().error().is_none());
    }

    #[test]
    fn test_settle_success_and_failure() {
        let mut cell = ScreenCell::new(SupersedePolicy::LastResolved);
        let ticket = cell.begin();
        assert!(cell.settle(ticket, Ok(7)));
        assert_eq!(cell.state().ready(), Some(&7));

        let ticket = cell.begin();
        assert!(cell.settle(ticket, Err(err("500"))));
        assert_eq!(cell.state().error().map(|e| e.code.as_str()), Some("500"));
        assert!(cell.state().ready().is_none());
    }

    #[test]
    fn test_last_resolved_applies_stale_result() {
        let mut cell = ScreenCell::new(SupersedePolicy::LastResolved);
        let first = cell.begin();
        let second = cell.begin();

        assert!(cell.settle(second, Ok("page 2")));
        assert!(cell.settle(first, Ok("page 1")));
        assert_eq!(cell.state().ready(), Some(&"page 1"));
    }

    #[test]
    fn test_latest_issued_discards_stale_result() {
        let mut cell = ScreenCell::new(SupersedePolicy::LatestIssued);
        let first = cell.begin();
        let second = cell.begin();

        assert!(cell.settle(second, Ok("page 2")));
        assert!(!cell.settle(first, Ok("page 1")));
        assert_eq!(cell.state().ready(), Some(&"page 2"));
    }

    #[test]
    fn test_latest_issued_keeps_loading_until_latest_settles() {
        let mut cell: ScreenCell<u32> = ScreenCell::new(SupersedePolicy::LatestIssued);
        let first = cell.begin();
        let _second = cell.begin();

        assert!(!cell.settle(first, Err(err("ETIMEDOUT"))));
        assert!(cell.state().is_loading());
    }

    #[test]
    fn test_tickets_increase() {
        let mut cell: ScreenCell<()> = ScreenCell::default();
        let a = cell.begin();
        let b = cell.begin();
        assert!(b > a);
        assert!(cell.is_latest(b));
        assert!(!cell.is_latest(a));
    }

    #[test]
    fn test_reset() {
        let mut cell: ScreenCell<u32> = ScreenCell::default();
        let ticket = cell.begin();
        cell.settle(ticket, Ok(1));
        cell.reset();
        assert_eq!(*cell.state(), ViewState::Idle);
    }
}
