use ratatui::widgets::ListState;

use crate::app::SiteSession;
use crate::content::{HomeSummary, Listing};
use crate::domain::{listing_base_path, ContentItem, ContentKind, Filter, Screen, SiteInfo};
use crate::presenter::{
    home_title, listing_heading, listing_title, picker_title, ScreenCell, SupersedePolicy,
    ViewState,
};
use crate::tui::event::{Message, Payload, Request};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Nav,
    Items,
    Preview,
}

impl ActivePane {
    pub fn next(self) -> Self {
        match self {
            ActivePane::Nav => ActivePane::Items,
            ActivePane::Items => ActivePane::Preview,
            ActivePane::Preview => ActivePane::Nav,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActivePane::Nav => ActivePane::Preview,
            ActivePane::Items => ActivePane::Nav,
            ActivePane::Preview => ActivePane::Items,
        }
    }
}

/// Entries of the navigation sidebar, in display order.
pub const NAV_ENTRIES: [&str; 3] = ["Home", "Posts", "Pages"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Hostname prompt.
    Picker,
    Site,
}

pub struct TuiApp {
    pub mode: Mode,
    pub input: String,
    pub session: Option<SiteSession>,
    /// Incremented on every site switch; results of earlier visits are dropped.
    pub visit: u64,
    pub policy: SupersedePolicy,
    pub site: ScreenCell<SiteInfo>,
    pub screen: Screen,
    pub home: ScreenCell<HomeSummary>,
    pub listing: ScreenCell<Listing>,
    pub label: Option<String>,
    /// Page count of the last listing that loaded, for page navigation.
    pub known_total_pages: Option<u32>,
    pub active_pane: ActivePane,
    pub nav_index: usize,
    pub item_index: usize,
    pub item_list_state: ListState,
    pub preview_scroll: u16,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new(policy: SupersedePolicy) -> Self {
        let mut item_list_state = ListState::default();
        item_list_state.select(Some(0));

        Self {
            mode: Mode::Picker,
            input: String::new(),
            session: None,
            visit: 0,
            policy,
            site: ScreenCell::new(policy),
            screen: Screen::Home,
            home: ScreenCell::new(policy),
            listing: ScreenCell::new(policy),
            label: None,
            known_total_pages: None,
            active_pane: ActivePane::Nav,
            nav_index: 0,
            item_index: 0,
            item_list_state,
            preview_scroll: 0,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn hostname(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.hostname.as_str())
    }

    pub fn site_info(&self) -> Option<&SiteInfo> {
        self.site.state().ready()
    }

    /// Switch to a new site. Everything from the previous one is discarded.
    pub fn enter_site(&mut self, session: SiteSession, screen: Screen) -> Vec<Request> {
        self.visit += 1;
        self.session = Some(session);
        self.mode = Mode::Site;
        self.site = ScreenCell::new(self.policy);
        self.home = ScreenCell::new(self.policy);
        self.listing = ScreenCell::new(self.policy);
        self.screen = screen;
        self.label = None;
        self.known_total_pages = None;
        self.reset_selection();
        self.sync_nav();
        vec![Request::Resolve(self.site.begin())]
    }

    pub fn show_picker(&mut self) {
        self.mode = Mode::Picker;
        self.input = self.hostname().unwrap_or_default().to_string();
    }

    /// Move to another screen of the current site.
    ///
    /// Nothing is fetched until the site itself has resolved.
    pub fn navigate(&mut self, screen: Screen) -> Vec<Request> {
        let same_listing = matches!(
            (self.screen, screen),
            (Screen::Listing { kind: a, filter: f, .. }, Screen::Listing { kind: b, filter: g, .. })
                if a == b && f == g
        );
        if !same_listing {
            self.known_total_pages = None;
            self.label = None;
        }
        self.screen = screen;
        self.reset_selection();
        self.sync_nav();
        self.request_screen()
    }

    /// Requests needed to (re)load the current screen.
    pub fn request_screen(&mut self) -> Vec<Request> {
        if self.site_info().is_none() {
            return Vec::new();
        }

        match self.screen {
            Screen::Home => vec![Request::Home(self.home.begin())],
            Screen::Listing { kind, filter, page } => {
                let mut requests = vec![Request::Listing {
                    ticket: self.listing.begin(),
                    kind,
                    filter,
                    page,
                }];
                if let Some((tax, id)) = filter.term() {
                    requests.push(Request::Label { kind: tax, id });
                }
                requests
            }
        }
    }

    /// Re-run whatever failed or is shown: the site lookup, or the screen.
    pub fn reload(&mut self) -> Vec<Request> {
        match self.site.state() {
            ViewState::Ready(_) => self.request_screen(),
            _ => vec![Request::Resolve(self.site.begin())],
        }
    }

    /// Apply a finished request. May ask for follow-up work.
    pub fn apply(&mut self, message: Message) -> Vec<Request> {
        if message.visit != self.visit {
            tracing::debug!("Dropping result from an earlier site visit");
            return Vec::new();
        }

        match message.payload {
            Payload::Site(ticket, result) => {
                if let Err(e) = &result {
                    self.set_status(format!("Site lookup failed: {}", e));
                }
                let applied = self.site.settle(ticket, result);
                if applied && self.site_info().is_some() {
                    return self.request_screen();
                }
            }
            Payload::Home(ticket, result) => {
                if self.home.settle(ticket, result) {
                    self.clamp_selection();
                }
            }
            Payload::Listing(ticket, result) => {
                let total = result.as_ref().ok().map(|l| l.paging.total_pages);
                if self.listing.settle(ticket, result) {
                    if total.is_some() {
                        self.known_total_pages = total;
                    }
                    self.clamp_selection();
                }
            }
            Payload::Label(kind, id, name) => {
                if let Screen::Listing { filter, .. } = self.screen {
                    if filter.term() == Some((kind, id)) && name.is_some() {
                        self.label = name;
                    }
                }
            }
        }
        Vec::new()
    }

    pub fn current_page(&self) -> Option<u32> {
        match self.screen {
            Screen::Listing { page, .. } => Some(page),
            Screen::Home => None,
        }
    }

    pub fn next_page(&mut self) -> Vec<Request> {
        let Screen::Listing { kind, filter, page } = self.screen else {
            return Vec::new();
        };
        match self.known_total_pages {
            Some(total) if page < total => self.navigate(Screen::Listing {
                kind,
                filter,
                page: page + 1,
            }),
            _ => Vec::new(),
        }
    }

    pub fn prev_page(&mut self) -> Vec<Request> {
        match self.screen {
            Screen::Listing { kind, filter, page } if page > 1 => self.navigate(Screen::Listing {
                kind,
                filter,
                page: page - 1,
            }),
            _ => Vec::new(),
        }
    }

    pub fn go_listing(&mut self, kind: ContentKind) -> Vec<Request> {
        self.navigate(Screen::Listing {
            kind,
            filter: Filter::None,
            page: 1,
        })
    }

    /// Restrict to the selected item's first category or tag.
    pub fn filter_by_selected(&mut self, category: bool) -> Vec<Request> {
        let Some(item) = self.selected_item() else {
            return Vec::new();
        };
        let filter = if category {
            item.first_category().map(Filter::Category)
        } else {
            item.first_tag().map(Filter::Tag)
        };
        let Some(filter) = filter else {
            self.set_status(format!(
                "Item has no {}",
                if category { "category" } else { "tag" }
            ));
            return Vec::new();
        };
        let kind = match self.screen {
            Screen::Listing { kind, .. } => kind,
            Screen::Home => ContentKind::Posts,
        };
        self.navigate(Screen::Listing {
            kind,
            filter,
            page: 1,
        })
    }

    pub fn clear_filter(&mut self) -> Vec<Request> {
        match self.screen {
            Screen::Listing { kind, filter, .. } if filter != Filter::None => self.go_listing(kind),
            _ => Vec::new(),
        }
    }

    /// Activate the highlighted sidebar entry.
    pub fn select_nav(&mut self) -> Vec<Request> {
        match self.nav_index {
            0 => self.navigate(Screen::Home),
            1 => self.go_listing(ContentKind::Posts),
            _ => self.go_listing(ContentKind::Pages),
        }
    }

    /// Items of the current screen, in display order.
    pub fn visible_items(&self) -> Vec<&ContentItem> {
        match self.screen {
            Screen::Home => self
                .home
                .state()
                .ready()
                .map(|s| s.posts.iter().chain(s.pages.iter()).collect())
                .unwrap_or_default(),
            Screen::Listing { .. } => self
                .listing
                .state()
                .ready()
                .map(|l| l.items.iter().collect())
                .unwrap_or_default(),
        }
    }

    pub fn selected_item(&self) -> Option<&ContentItem> {
        self.visible_items().get(self.item_index).copied()
    }

    /// Link of the selected item, when it has a non-empty one.
    pub fn selected_link(&self) -> Option<&str> {
        self.selected_item()
            .and_then(|item| item.link.as_deref())
            .filter(|link| !link.is_empty())
    }

    pub fn heading(&self) -> String {
        match self.screen {
            Screen::Home => self
                .site_info()
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            Screen::Listing { kind, .. } => listing_heading(kind, self.label.as_deref()),
        }
    }

    /// Base path for pagination links of the current listing.
    pub fn base_path(&self) -> String {
        match (self.screen, self.hostname()) {
            (Screen::Listing { kind, filter, .. }, Some(host)) => {
                listing_base_path(host, kind, filter)
            }
            _ => String::new(),
        }
    }

    pub fn window_title(&self) -> String {
        let unresolved = SiteInfo::default();
        match self.mode {
            Mode::Picker => picker_title(),
            Mode::Site => {
                let site = self.site_info().unwrap_or(&unresolved);
                match self.screen {
                    Screen::Home => home_title(site),
                    Screen::Listing { kind, .. } => listing_title(site, kind),
                }
            }
        }
    }

    pub fn move_up(&mut self) {
        match self.active_pane {
            ActivePane::Nav => {
                self.nav_index = self.nav_index.saturating_sub(1);
            }
            ActivePane::Items => {
                if self.item_index > 0 {
                    self.item_index -= 1;
                    self.item_list_state.select(Some(self.item_index));
                    self.preview_scroll = 0;
                }
            }
            ActivePane::Preview => {
                self.preview_scroll = self.preview_scroll.saturating_sub(1);
            }
        }
    }

    pub fn move_down(&mut self) {
        match self.active_pane {
            ActivePane::Nav => {
                if self.nav_index < NAV_ENTRIES.len() - 1 {
                    self.nav_index += 1;
                }
            }
            ActivePane::Items => {
                let count = self.visible_items().len();
                if count > 0 && self.item_index < count - 1 {
                    self.item_index += 1;
                    self.item_list_state.select(Some(self.item_index));
                    self.preview_scroll = 0;
                }
            }
            ActivePane::Preview => {
                self.preview_scroll = self.preview_scroll.saturating_add(1);
            }
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    fn reset_selection(&mut self) {
        self.item_index = 0;
        self.item_list_state.select(Some(0));
        self.preview_scroll = 0;
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_items().len();
        if self.item_index >= count {
            self.item_index = count.saturating_sub(1);
        }
        self.item_list_state.select(Some(self.item_index));
    }

    fn sync_nav(&mut self) {
        self.nav_index = match self.screen {
            Screen::Home => 0,
            Screen::Listing {
                kind: ContentKind::Posts,
                ..
            } => 1,
            Screen::Listing {
                kind: ContentKind::Pages,
                ..
            } => 2,
        };
    }
}
