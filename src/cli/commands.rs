use std::io::{self, Write};

use crate::app::{AppContext, Result, SiteSession, WappError};
use crate::content::Listing;
use crate::domain::{
    listing_base_path, parse_id, parse_page, ContentItem, ContentKind, Filter, Route, Screen,
    SiteInfo,
};
use crate::presenter::{
    home_mode, listing_heading, listing_mode, site_failure, HomeMode, ListingMode, SiteFailure,
    ViewState,
};

const SUMMARY_WIDTH: usize = 160;

/// Resolve the site, printing the failure panel when that does not work.
///
/// Content is only ever fetched after this succeeded.
async fn open_site(ctx: &AppContext, host: &str, out: &mut impl Write) -> Result<(SiteSession, SiteInfo)> {
    let resolved = match ctx.session(host) {
        Ok(session) => session.resolver.resolve().await.map(|info| (session, info)),
        Err(e) => Err(e),
    };

    match resolved {
        Ok(resolved) => Ok(resolved),
        Err(e) => {
            write_site_failure(out, &site_failure(&e))?;
            Err(WappError::Fetch(e))
        }
    }
}

pub async fn info(ctx: &AppContext, host: &str) -> Result<()> {
    let mut out = io::stdout();
    let (_, site) = open_site(ctx, host, &mut out).await?;

    writeln!(out, "{}", site.name)?;
    if !site.description.is_empty() {
        writeln!(out, "{}", site.description)?;
    }
    if !site.url.is_empty() {
        writeln!(out, "{}", site.url)?;
    }
    Ok(())
}

pub async fn home(ctx: &AppContext, host: &str) -> Result<()> {
    let mut out = io::stdout();
    let (session, site) = open_site(ctx, host, &mut out).await?;

    let state = ViewState::from(session.content.home().await);
    write_home(&mut out, &site, &home_mode(&state))?;
    Ok(())
}

/// `page`, `category` and `tag` are raw user input and coerced like route
/// parameters.
pub async fn list(
    ctx: &AppContext,
    host: &str,
    kind: ContentKind,
    category: Option<&str>,
    tag: Option<&str>,
    page: Option<&str>,
) -> Result<()> {
    let filter = match (category, tag) {
        (Some(id), _) => Filter::Category(parse_id(Some(id))),
        (None, Some(id)) => Filter::Tag(parse_id(Some(id))),
        (None, None) => Filter::None,
    };
    show_listing(ctx, host, kind, filter, parse_page(page)).await
}

pub async fn open(ctx: &AppContext, route: &str) -> Result<()> {
    let route = Route::parse(route)?;
    match route.screen {
        Screen::Home => home(ctx, &route.hostname).await,
        Screen::Listing { kind, filter, page } => {
            show_listing(ctx, &route.hostname, kind, filter, page).await
        }
    }
}

async fn show_listing(ctx: &AppContext, host: &str, kind: ContentKind, filter: Filter, page: u32) -> Result<()> {
    let mut out = io::stdout();
    let (session, site) = open_site(ctx, host, &mut out).await?;

    let label = async {
        match filter.term() {
            Some((tax, id)) => session.labels.label(tax, id).await,
            None => None,
        }
    };
    let (result, label) = tokio::join!(session.content.fetch(kind, filter, page), label);

    let state: ViewState<Listing> = result.into();
    let base_path = listing_base_path(&session.hostname, kind, filter);
    let mode = listing_mode(&state, kind, &base_path, session.content.listing_page_size() as usize);

    writeln!(out, "{}", site.name)?;
    writeln!(out)?;
    write_listing(&mut out, &listing_heading(kind, label.as_deref()), &mode)?;
    Ok(())
}

pub fn write_site_failure(out: &mut impl Write, panel: &SiteFailure) -> io::Result<()> {
    writeln!(out, "{}", panel.heading)?;
    writeln!(out)?;
    writeln!(out, "{}", panel.summary)?;
    writeln!(out)?;
    writeln!(out, "{}", panel.reasons_intro)?;
    for reason in panel.reasons {
        writeln!(out, "  - {}", reason)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", panel.details_heading)?;
    writeln!(out, "{}", panel.details)
}

pub fn write_home(out: &mut impl Write, site: &SiteInfo, mode: &HomeMode) -> io::Result<()> {
    writeln!(out, "{}", site.name)?;
    if !site.description.is_empty() {
        writeln!(out, "{}", site.description)?;
    }
    writeln!(out)?;

    match mode {
        HomeMode::Loading => writeln!(out, "Loading..."),
        HomeMode::Error(diagnostic) => {
            writeln!(out, "{}", diagnostic.heading())?;
            writeln!(out, "{}", diagnostic.detail)
        }
        HomeMode::Content { sections } => {
            for section in sections {
                write_heading(out, section.title())?;
                for item in section.items {
                    write_card(out, item)?;
                }
            }
            Ok(())
        }
    }
}

pub fn write_listing(out: &mut impl Write, heading: &str, mode: &ListingMode) -> io::Result<()> {
    write_heading(out, heading)?;

    match mode {
        ListingMode::Loading { .. } => writeln!(out, "Loading..."),
        ListingMode::Error(diagnostic) => {
            writeln!(out, "{}", diagnostic.heading())?;
            writeln!(out, "{}", diagnostic.detail)
        }
        ListingMode::Empty => writeln!(out, "Nothing to show."),
        ListingMode::Content { items, pagination } => {
            for item in items.iter() {
                write_card(out, item)?;
            }
            if let Some(pagination) = pagination {
                write!(out, "Page {} of {}", pagination.current, pagination.total)?;
                if let Some(prev) = &pagination.prev {
                    write!(out, "  prev: {}", prev)?;
                }
                if let Some(next) = &pagination.next {
                    write!(out, "  next: {}", next)?;
                }
                writeln!(out)?;
            }
            Ok(())
        }
    }
}

fn write_heading(out: &mut impl Write, heading: &str) -> io::Result<()> {
    writeln!(out, "{}", heading)?;
    writeln!(out, "{}", "=".repeat(heading.chars().count()))
}

fn write_card(out: &mut impl Write, item: &ContentItem) -> io::Result<()> {
    writeln!(out, "[{}] {}", item.id, item.display_title())?;

    let mut meta = Vec::new();
    if let Some(date) = item.date {
        meta.push(date.format("%Y-%m-%d").to_string());
    }
    if let Some(author) = item.author_name() {
        meta.push(format!("by {}", author));
    }
    if !meta.is_empty() {
        writeln!(out, "    {}", meta.join(" | "))?;
    }

    let summary = item.summary();
    if !summary.is_empty() {
        writeln!(out, "    {}", truncate(&summary, SUMMARY_WIDTH))?;
    }
    if let Some(link) = &item.link {
        writeln!(out, "    {}", link)?;
    }
    writeln!(out)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}
