use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use serde::Deserialize;
use std::time::Duration;

use crate::app::{FetchError, Result};
use crate::content::{HomeSummary, Listing};
use crate::domain::{ContentKind, Filter, SiteInfo, TaxonomyKind};
use crate::presenter::Ticket;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(AppEvent::Key(key));
                }
            }
        }
        Ok(AppEvent::Tick)
    }
}

/// What a key press asks for. Declaration order is binding priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    NextPane,
    PrevPane,
    GoHome,
    GoPosts,
    GoPages,
    ChangeSite,
    Select,
    OpenInBrowser,
    Reload,
    FilterCategory,
    FilterTag,
    ClearFilter,
    None,
}

/// Work the event loop must start on behalf of the app state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Resolve(Ticket),
    Home(Ticket),
    Listing {
        ticket: Ticket,
        kind: ContentKind,
        filter: Filter,
        page: u32,
    },
    Label {
        kind: TaxonomyKind,
        id: u64,
    },
}

/// Result of a finished request, tagged with the site visit it belongs to.
#[derive(Debug, Clone)]
pub struct Message {
    pub visit: u64,
    pub payload: Payload,
}

#[derive(Debug, Clone)]
pub enum Payload {
    Site(Ticket, std::result::Result<SiteInfo, FetchError>),
    Home(Ticket, std::result::Result<HomeSummary, FetchError>),
    Listing(Ticket, std::result::Result<Listing, FetchError>),
    Label(TaxonomyKind, u64, Option<String>),
}
