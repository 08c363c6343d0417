pub mod commands;

use clap::{Parser, Subcommand};

use crate::domain::ContentKind;
use crate::presenter::SupersedePolicy;

#[derive(Parser)]
#[command(name = "wapp")]
#[command(about = "Browse any WordPress site through its REST API", long_about = None)]
pub struct Cli {
    /// How results of superseded requests are treated (overrides the config file)
    #[arg(long, value_enum, global = true)]
    pub policy: Option<SupersedePolicy>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the name and description reported by a site
    Info {
        /// Hostname of the site, e.g. example.com
        host: String,
    },
    /// Show the latest posts and pages of a site
    Home {
        /// Hostname of the site
        host: String,
    },
    /// List posts or pages, optionally restricted to a category or tag
    List {
        /// Hostname of the site
        host: String,
        /// What to list: posts or pages
        #[arg(value_parser = parse_kind)]
        kind: ContentKind,
        /// Category id to filter by
        #[arg(long, conflicts_with = "tag")]
        category: Option<String>,
        /// Tag id to filter by
        #[arg(long)]
        tag: Option<String>,
        /// Page number (defaults to 1)
        #[arg(long)]
        page: Option<String>,
    },
    /// Open a route such as example.com/posts/category/5/2
    Open {
        route: String,
    },
    /// Launch the TUI
    Tui {
        /// Site to open right away
        host: Option<String>,
    },
}

fn parse_kind(s: &str) -> Result<ContentKind, String> {
    ContentKind::from_slug(&s.to_lowercase())
        .ok_or_else(|| format!("expected `posts` or `pages`, got `{}`", s))
}
