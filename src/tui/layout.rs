use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::content::HOME_PAGE_SIZE;
use crate::domain::{ContentItem, Screen};
use crate::presenter::{
    home_mode, listing_mode, site_mode, Diagnostic, HomeMode, ListingMode, PaginationControls,
    SiteFailure, SiteMode,
};
use crate::tui::app::{ActivePane, Mode, TuiApp, NAV_ENTRIES};

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    if app.mode == Mode::Picker {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(1)])
            .split(frame.area());

        render_picker(frame, app, chunks[0], colors);
        render_status_bar(frame, app, chunks[1], colors);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Site header
            Constraint::Min(5),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(14), Constraint::Min(20)])
        .split(chunks[1]);

    render_header(frame, app, chunks[0], colors);
    render_nav_pane(frame, app, body[0], colors);

    match site_mode(app.site.state()) {
        SiteMode::Resolving => {
            let host = app.hostname().unwrap_or_default().to_string();
            let paragraph = Paragraph::new(format!("Contacting {}...", host))
                .style(Style::default().fg(colors.skeleton))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(paragraph, body[1]);
        }
        SiteMode::Failed(failure) => {
            render_site_failure(frame, &failure, body[1], colors);
        }
        SiteMode::Ready(_) => {
            let main = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(45), Constraint::Min(6)])
                .split(body[1]);

            render_items_pane(frame, app, main[0], colors);
            render_preview_pane(frame, app, main[1], colors);
        }
    }

    render_status_bar(frame, app, chunks[2], colors);
}

fn render_picker(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let lines = vec![
        Line::from(Span::styled(
            "WordPress App Generator",
            Style::default()
                .fg(colors.heading)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Enter the hostname of a WordPress site, e.g. wordpress.org"),
        Line::from(""),
        Line::from(vec![
            Span::raw("> "),
            Span::styled(
                app.input.clone(),
                Style::default().fg(colors.selection_fg_inactive),
            ),
            Span::styled("_", Style::default().fg(colors.active_border)),
        ]),
    ];

    let block = Block::default()
        .title(" Choose a site ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.active_border));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_header(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let host = app.hostname().unwrap_or_default();
    let line = match app.site_info() {
        Some(site) => {
            let mut spans = vec![Span::styled(
                site.name.clone(),
                Style::default()
                    .fg(colors.heading)
                    .add_modifier(Modifier::BOLD),
            )];
            let description = crate::domain::plain_text(&site.description);
            if !description.is_empty() {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    description,
                    Style::default().fg(colors.metadata_date),
                ));
            }
            Line::from(spans)
        }
        None => Line::from(Span::styled(
            host.to_string(),
            Style::default().fg(colors.skeleton),
        )),
    };

    let block = Block::default()
        .title(format!(" {} ", host))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.inactive_border));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_nav_pane(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::Nav;

    let items: Vec<ListItem> = NAV_ENTRIES
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == app.nav_index {
                highlight_style(is_active, colors)
            } else {
                Style::default()
            };
            ListItem::new(format!(" {}", entry)).style(style)
        })
        .collect();

    let block = Block::default()
        .title(" Menu ")
        .borders(Borders::ALL)
        .border_style(border_style(is_active, colors));

    frame.render_widget(List::new(items).block(block), area);
}

fn render_site_failure(frame: &mut Frame, failure: &SiteFailure, area: Rect, colors: &ColorConfig) {
    let mut lines = vec![
        Line::from(Span::styled(
            failure.heading,
            Style::default()
                .fg(colors.error)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(failure.summary),
        Line::from(""),
        Line::from(failure.reasons_intro),
    ];
    for reason in failure.reasons {
        lines.push(Line::from(format!("  - {}", reason)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        failure.details_heading,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        failure.details.clone(),
        Style::default().fg(colors.error),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.error));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// What the items pane shows, detached from the app borrow.
enum ItemsView {
    Message(Text<'static>),
    List {
        items: Vec<ListItem<'static>>,
        footer: Option<Line<'static>>,
    },
}

fn items_view(app: &TuiApp, colors: &ColorConfig) -> ItemsView {
    match app.screen {
        Screen::Home => match home_mode(app.home.state()) {
            HomeMode::Loading => skeleton(HOME_PAGE_SIZE as usize * 2, colors),
            HomeMode::Error(diagnostic) => diagnostic_view(&diagnostic, colors),
            HomeMode::Content { sections } => ItemsView::List {
                items: sections
                    .iter()
                    .flat_map(|section| {
                        section
                            .items
                            .iter()
                            .map(move |item| item_row(Some(section.title()), item, colors))
                    })
                    .collect(),
                footer: None,
            },
        },
        Screen::Listing { kind, .. } => {
            let skeleton_size = app
                .session
                .as_ref()
                .map(|s| s.content.listing_page_size() as usize)
                .unwrap_or_default();
            let base_path = app.base_path();
            match listing_mode(app.listing.state(), kind, &base_path, skeleton_size) {
                ListingMode::Loading { skeleton: n } => skeleton(n, colors),
                ListingMode::Error(diagnostic) => diagnostic_view(&diagnostic, colors),
                ListingMode::Empty => ItemsView::Message(Text::from(format!(
                    "No {} found.",
                    kind.label().to_lowercase()
                ))),
                ListingMode::Content { items, pagination } => ItemsView::List {
                    items: items.iter().map(|item| item_row(None, item, colors)).collect(),
                    footer: pagination.map(|p| pagination_line(&p, colors)),
                },
            }
        }
    }
}

fn skeleton(count: usize, colors: &ColorConfig) -> ItemsView {
    let mut lines = vec![Line::from("Loading...")];
    lines.extend((0..count).map(|i| {
        let width = 18 + (i * 7) % 20;
        Line::from(Span::styled(
            "░".repeat(width),
            Style::default().fg(colors.skeleton),
        ))
    }));
    ItemsView::Message(Text::from(lines))
}

fn diagnostic_view(diagnostic: &Diagnostic, colors: &ColorConfig) -> ItemsView {
    ItemsView::Message(Text::from(vec![
        Line::from(Span::styled(
            diagnostic.heading(),
            Style::default()
                .fg(colors.error)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            diagnostic.detail.clone(),
            Style::default().fg(colors.error),
        )),
    ]))
}

fn item_row(section: Option<&str>, item: &ContentItem, colors: &ColorConfig) -> ListItem<'static> {
    let date = item
        .date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "          ".to_string());

    let mut spans = Vec::new();
    if let Some(section) = section {
        spans.push(Span::styled(
            format!("{:<6}", section),
            Style::default().fg(colors.heading),
        ));
    }
    spans.push(Span::styled(date, Style::default().fg(colors.metadata_date)));
    spans.push(Span::raw(" "));
    spans.push(Span::raw(item.display_title()));

    ListItem::new(Line::from(spans))
}

fn pagination_line(controls: &PaginationControls, colors: &ColorConfig) -> Line<'static> {
    let mut spans = vec![Span::raw(format!(
        "Page {} of {}",
        controls.current, controls.total
    ))];
    if let Some(prev) = &controls.prev {
        spans.push(Span::styled(
            format!("  < {}", prev),
            Style::default().fg(colors.metadata_link),
        ));
    }
    if let Some(next) = &controls.next {
        spans.push(Span::styled(
            format!("  > {}", next),
            Style::default().fg(colors.metadata_link),
        ));
    }
    Line::from(spans)
}

fn render_items_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::Items;
    let count = app.visible_items().len();

    let title = format!(
        " {} [{}/{}] ",
        app.heading(),
        (app.item_index + 1).min(count.max(1)),
        count.max(1)
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_active, colors));

    match items_view(app, colors) {
        ItemsView::Message(text) => {
            let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
            frame.render_widget(paragraph, area);
        }
        ItemsView::List { items, footer } => {
            let block = match footer {
                Some(line) => block.title_bottom(line),
                None => block,
            };
            let list = List::new(items)
                .block(block)
                .highlight_style(highlight_style(is_active, colors))
                .highlight_symbol("> ");

            frame.render_stateful_widget(list, area, &mut app.item_list_state);
        }
    }
}

fn render_preview_pane(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::Preview;

    let (title, content) = if let Some(item) = app.selected_item() {
        let title_text = item.display_title();
        let mut lines = vec![
            Line::from(Span::styled(
                title_text.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        if let Some(author) = item.author_name() {
            lines.push(Line::from(Span::styled(
                format!("By: {}", author),
                Style::default().fg(colors.metadata_author),
            )));
        }
        if let Some(date) = item.date {
            lines.push(Line::from(Span::styled(
                format!("Date: {}", date.format("%Y-%m-%d %H:%M")),
                Style::default().fg(colors.metadata_date),
            )));
        }
        if let Some(link) = item.link.as_deref().filter(|l| !l.is_empty()) {
            lines.push(Line::from(Span::styled(
                format!("Link: {}", link),
                Style::default().fg(colors.metadata_link),
            )));
        }
        if let Some(media) = item.featured_media_url() {
            lines.push(Line::from(Span::styled(
                format!("Image: {}", media),
                Style::default().fg(colors.metadata_link),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from("─".repeat(area.width.saturating_sub(2) as usize)));
        lines.push(Line::from(""));

        let body = crate::domain::plain_text(&item.content);
        let body = if body.is_empty() { item.summary() } else { body };
        lines.extend(body.lines().map(|l| Line::from(l.to_string())));

        (format!(" {} ", title_text), Text::from(lines))
    } else {
        (" Preview ".to_string(), Text::from("No item selected"))
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_active, colors));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.preview_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if app.mode == Mode::Picker {
        "Enter:Open site  Esc:Quit".to_string()
    } else {
        "j/k:Nav  Tab:Pane  Enter:Select  n/p:Page  c/t:Filter  x:Clear  o:Open  R:Reload  S:Site  q:Quit"
            .to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}

fn border_style(is_active: bool, colors: &ColorConfig) -> Style {
    if is_active {
        Style::default().fg(colors.active_border)
    } else {
        Style::default().fg(colors.inactive_border)
    }
}

fn highlight_style(is_active: bool, colors: &ColorConfig) -> Style {
    if is_active {
        Style::default()
            .bg(colors.selection_bg_active)
            .fg(colors.selection_fg_active)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(colors.selection_bg_inactive)
            .fg(colors.selection_fg_inactive)
    }
}
