//! # Wapp
//!
//! A terminal viewer for any WordPress site, driven entirely by the site's
//! public REST API (`https://{host}/wp-json`).
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Normalizer → Resolver / Content → Presenter → TUI / CLI
//! ```
//!
//! - [`fetcher`]: HTTP client for the WordPress REST API
//! - [`normalizer`]: Turns raw API payloads into domain values
//! - [`resolver`]: Site metadata and taxonomy label lookups
//! - [`content`]: Paginated post/page retrieval
//! - [`presenter`]: Fetch state and render-mode selection
//! - [`tui`]: Terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Site name and description
//! wapp info wordpress.org
//!
//! # Second page of posts tagged 3
//! wapp list wordpress.org posts --tag 3 --page 2
//!
//! # Launch TUI
//! wapp tui wordpress.org
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) holds the configuration and hands out a
/// [`SiteSession`](app::SiteSession) per hostname.
pub mod app;

/// Configuration management.
///
/// Loads from `~/.config/wapp/config.toml`, supporting:
/// - API settings (scheme, timeout, page sizes, supersede policy)
/// - Custom colors (named or hex)
/// - Custom keybindings
pub mod config;

/// Command-line interface using clap.
///
/// - `info <host>` - Site name and description
/// - `home <host>` - Latest posts and pages
/// - `list <host> <posts|pages>` - One listing page, optionally filtered
/// - `open <route>` - Any route, e.g. `example.com/posts/tag/3/2`
/// - `tui [host]` - Launch the TUI
pub mod cli;

/// Paginated post/page retrieval and the home summary.
pub mod content;

/// Core domain models.
///
/// - [`SiteInfo`](domain::SiteInfo): Site metadata
/// - [`ContentItem`](domain::ContentItem): A post or page
/// - [`PageIndexing`](domain::PageIndexing): Pagination state of a listing
/// - [`Route`](domain::Route): Navigational parameters
pub mod domain;

/// WordPress REST API access.
///
/// - [`ContentApi`](fetcher::ContentApi): Async trait the core talks to
/// - [`HttpContentApi`](fetcher::HttpContentApi): reqwest-based implementation
pub mod fetcher;

/// Payload normalization: site info, listings with paging, taxonomy terms.
pub mod normalizer;

/// Render-mode selection shared by the TUI and the CLI.
pub mod presenter;

/// Site metadata resolution and memoized taxonomy label lookups.
pub mod resolver;

/// Terminal user interface.
///
/// Site picker, then a site shell with a navigation sidebar, an item list
/// and a preview pane. Fetches run as background tasks.
pub mod tui;
