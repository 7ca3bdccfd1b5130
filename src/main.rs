//! Gazette - a portfolio in your terminal, laid out like a newspaper
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - page navigator and contact form state
//! - Network Layer (Tokio) - async contact deliveries

mod models;
mod storage;
mod ui;
mod config;
mod constants;
mod navigation;
mod contact;
mod messages;
mod app;
mod network;

use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use app::{AppActor, AppState};
use config::Config;
use constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME};
use contact::schema::{BUDGET_OPTIONS, TIMELINE_OPTIONS};
use contact::Field;
use messages::ui_events::key_to_ui_event;
use messages::{InputMode, NetworkCommand, NetworkResponse, RenderState, UiEvent};
use navigation::PageId;
use network::client::{build_flow, create_client};
use network::NetworkActor;
use storage::Storage;
use ui::{
    availability_color, centered_rect, edition_number, format_date, project_status_color,
    render_ribbon, roman_numeral, section_heading, skill_bar, submission_color, today_formatted,
    volume, FADE, INK, PAPER,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = Config::from_env();
    tracing::info!(?config, "Starting {} v{}", APP_NAME, APP_VERSION);
    let storage = Storage::new(config.data_path.clone());
    if let Err(e) = storage.seed_data_file() {
        tracing::warn!(error = %e, "Could not write the portfolio data file");
    }
    let flow = build_flow(&config, create_client());

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(flow, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(AppState::new(storage), config.transition, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.page,
                    current_state.focused_field,
                    current_state.input_mode,
                    current_state.show_help,
                    current_state.nav_pending,
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Masthead
            Constraint::Length(1), // Section ribbon
            Constraint::Min(0),    // Page
            Constraint::Length(1), // Page turner
        ])
        .split(area);

    draw_masthead(f, state, main_chunks[0]);
    f.render_widget(render_ribbon(state.page), main_chunks[1]);

    match state.page {
        PageId::Front => draw_front_page(f, state, main_chunks[2]),
        PageId::About => draw_about_page(f, state, main_chunks[2]),
        PageId::Projects => draw_projects_page(f, state, main_chunks[2]),
        PageId::Experience => draw_experience_page(f, state, main_chunks[2]),
        PageId::Writing => draw_writing_page(f, state, main_chunks[2]),
        PageId::Contact => draw_contact_page(f, state, main_chunks[2]),
    }

    draw_page_turner(f, state, main_chunks[3]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_masthead(f: &mut Frame, state: &RenderState, area: Rect) {
    let today = Local::now().date_naive();
    let dev = &state.portfolio.developer;
    let width = area.width as usize;

    let left = format!("Vol. {}  No. {}", roman_numeral(volume(today)), edition_number(today));
    let right = today_formatted(today);
    let gap = width.saturating_sub(left.chars().count() + right.chars().count());

    let lines = vec![
        Line::from(vec![
            Span::styled(left, Style::default().fg(FADE)),
            Span::raw(" ".repeat(gap)),
            Span::styled(right, Style::default().fg(FADE)),
        ]),
        Line::from(Span::styled("━".repeat(width), Style::default().fg(INK))),
        Line::from(Span::styled(
            format!("✦  {}  ✦", APP_NAME.to_uppercase()),
            Style::default().bold(),
        ))
        .centered(),
        Line::from(Span::styled(
            format!("{} • {} • {}", dev.name, dev.title, dev.location),
            Style::default().fg(FADE).italic(),
        ))
        .centered(),
    ];

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_front_page(f: &mut Frame, state: &RenderState, area: Rect) {
    let data = &state.portfolio;
    let dev = &data.developer;

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    let mut lead = section_heading(PageId::Front, &dev.tagline);
    lead.push(Line::from(""));
    lead.push(Line::from(dev.bio.as_str()));
    lead.push(Line::from(""));
    lead.push(Line::from(Span::styled(
        dev.availability.status_line(),
        Style::default().fg(availability_color(dev.availability)).bold(),
    )));
    lead.push(Line::from(""));
    lead.push(Line::from(Span::styled("FEATURED WORKS", Style::default().fg(FADE).bold())));
    for project in data.featured_projects() {
        lead.push(Line::from(vec![
            Span::styled(format!("▸ {}", project.title), Style::default().bold()),
            Span::raw(format!(" — {}", project.headline)),
        ]));
        if let Some(impact) = &project.impact {
            lead.push(Line::from(Span::styled(
                format!("  {}", impact),
                Style::default().fg(FADE).italic(),
            )));
        }
    }

    f.render_widget(
        Paragraph::new(lead)
            .wrap(Wrap { trim: false })
            .scroll((state.scroll, 0))
            .block(Block::default().borders(Borders::RIGHT).border_style(Style::default().fg(FADE))),
        columns[0],
    );

    let mut side = vec![Line::from(Span::styled("FROM THE DESK", Style::default().fg(FADE).bold()))];
    if let Some(article) = data.featured_article() {
        side.push(Line::from(Span::styled(article.title.as_str(), Style::default().bold())));
        side.push(Line::from(Span::styled(
            format!("{} · {} min read", format_date(&article.published_at), article.reading_time),
            Style::default().fg(FADE),
        )));
        side.push(Line::from(article.excerpt.as_str()));
    } else {
        side.push(Line::from(Span::styled("No columns this week.", Style::default().fg(FADE))));
    }

    f.render_widget(
        Paragraph::new(side).wrap(Wrap { trim: false }).block(Block::default().padding(Padding::horizontal(1))),
        columns[1],
    );
}

fn draw_about_page(f: &mut Frame, state: &RenderState, area: Rect) {
    let dev = &state.portfolio.developer;

    let mut lines = section_heading(PageId::About, &dev.name);
    lines.push(Line::from(Span::styled(
        format!("{} — {}", dev.title, dev.location),
        Style::default().fg(FADE).italic(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(dev.bio.as_str()));
    lines.push(Line::from(""));

    for skill in &state.portfolio.skills {
        lines.push(Line::from(Span::styled(skill.category.to_uppercase(), Style::default().fg(FADE).bold())));
        for item in &skill.items {
            let years = item
                .years_exp
                .map(|y| format!(" ({} yrs)", y))
                .unwrap_or_default();
            lines.push(Line::from(vec![
                Span::raw(format!("{:<16}", item.name)),
                Span::styled(skill_bar(item.level, 20), Style::default().fg(INK)),
                Span::styled(format!(" {}{}", item.level.label(), years), Style::default().fg(FADE)),
            ]));
        }
        lines.push(Line::from(""));
    }

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).scroll((state.scroll, 0)),
        area,
    );
}

fn draw_projects_page(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut lines = section_heading(PageId::Projects, "Selected Works");

    for project in state.portfolio.projects_by_prominence() {
        let star = if project.featured { "★ " } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{}", star, project.title), Style::default().bold()),
            Span::styled(
                format!("  [{}]", project.status.as_str()),
                Style::default().fg(project_status_color(project.status)),
            ),
            Span::styled(
                format!("  {} · {} · {}", project.category.as_str(), project.year, project.role),
                Style::default().fg(FADE),
            ),
        ]));
        lines.push(Line::from(Span::styled(project.headline.as_str(), Style::default().italic())));
        lines.push(Line::from(project.description.as_str()));
        if !project.tech.is_empty() {
            lines.push(Line::from(Span::styled(
                project.tech.join(" · "),
                Style::default().fg(FADE),
            )));
        }
        for url in [&project.live_url, &project.repo_url].into_iter().flatten() {
            lines.push(Line::from(Span::styled(format!("→ {}", url), Style::default().underlined())));
        }
        lines.push(Line::from(""));
    }

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).scroll((state.scroll, 0)),
        area,
    );
}

fn draw_experience_page(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut lines = section_heading(PageId::Experience, "The Record");

    for job in &state.portfolio.experience {
        let marker = if job.current { "●" } else { "○" };
        lines.push(Line::from(vec![
            Span::styled(format!("{} {}", marker, job.role), Style::default().bold()),
            Span::raw(format!(" at {}", job.company)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {} · {}", job.period, job.location),
            Style::default().fg(FADE),
        )));
        lines.push(Line::from(format!("  {}", job.description)));
        for achievement in &job.achievements {
            lines.push(Line::from(format!("   – {}", achievement)));
        }
        if !job.tech.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {}", job.tech.join(" · ")),
                Style::default().fg(FADE),
            )));
        }
        lines.push(Line::from(""));
    }

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).scroll((state.scroll, 0)),
        area,
    );
}

fn draw_writing_page(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut lines = section_heading(PageId::Writing, "Columns & Essays");

    for article in &state.portfolio.articles {
        lines.push(Line::from(Span::styled(article.title.as_str(), Style::default().bold())));
        lines.push(Line::from(Span::styled(
            format!("{} · {} min read", format_date(&article.published_at), article.reading_time),
            Style::default().fg(FADE),
        )));
        lines.push(Line::from(article.excerpt.as_str()));
        if !article.tags.is_empty() {
            let tags: Vec<String> = article.tags.iter().map(|t| format!("#{}", t)).collect();
            lines.push(Line::from(Span::styled(tags.join(" "), Style::default().fg(FADE).italic())));
        }
        lines.push(Line::from(""));
    }

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).scroll((state.scroll, 0)),
        area,
    );
}

fn draw_contact_page(f: &mut Frame, state: &RenderState, area: Rect) {
    let dev = &state.portfolio.developer;

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(34), Constraint::Percentage(66)])
        .split(area);

    // Left: how to reach the correspondent
    let mut info = section_heading(PageId::Contact, "Send a Dispatch");
    info.push(Line::from(
        "Whether you have a project in mind or simply wish to connect, every message is read and answered.",
    ));
    info.push(Line::from(""));
    info.push(Line::from(Span::styled("CURRENT STATUS", Style::default().fg(FADE).bold())));
    info.push(Line::from(Span::styled(
        dev.availability.status_line(),
        Style::default().fg(availability_color(dev.availability)).bold(),
    )));
    info.push(Line::from(""));
    info.push(Line::from(Span::styled("OTHER CHANNELS", Style::default().fg(FADE).bold())));
    for link in &dev.social_links {
        info.push(Line::from(format!("→ {}  {}", link.label, link.url)));
    }
    info.push(Line::from(""));
    info.push(Line::from(Span::styled("RESPONSE TIME", Style::default().fg(FADE).bold())));
    info.push(Line::from("Within 24 hours, Monday – Friday."));

    f.render_widget(
        Paragraph::new(info)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::RIGHT).border_style(Style::default().fg(FADE))),
        columns[0],
    );

    if state.show_sent_panel() {
        draw_sent_panel(f, state, columns[1]);
    } else {
        draw_contact_form(f, state, columns[1]);
    }
}

fn draw_sent_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    // Optimistic panel shows before the real message arrives
    let message = if state.result.is_success() {
        state.result.message.as_str()
    } else {
        "Transmitting..."
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("✦", Style::default().bold())).centered(),
        Line::from(Span::styled("Dispatch Received", Style::default().bold())).centered(),
        Line::from(""),
        Line::from(message).centered(),
        Line::from(""),
        Line::from(Span::styled("[a] Send Another", Style::default().fg(FADE))).centered(),
    ];

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Double)),
        area,
    );
}

fn draw_contact_form(f: &mut Frame, state: &RenderState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Name + Email
            Constraint::Length(4), // Subject
            Constraint::Length(4), // Budget + Timeline
            Constraint::Min(6),    // Message
            Constraint::Length(2), // Generic error + submit hint
        ])
        .split(area.inner(Margin::new(1, 0)));

    let pair = |area: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area)
    };

    let top = pair(rows[0]);
    draw_form_field(f, state, Field::Name, top[0]);
    draw_form_field(f, state, Field::Email, top[1]);
    draw_form_field(f, state, Field::Subject, rows[1]);
    let choices = pair(rows[2]);
    draw_form_field(f, state, Field::Budget, choices[0]);
    draw_form_field(f, state, Field::Timeline, choices[1]);
    draw_form_field(f, state, Field::Message, rows[3]);

    let mut footer = Vec::new();
    if state.result.is_delivery_error() {
        footer.push(Line::from(Span::styled(
            state.result.message.as_str(),
            Style::default().fg(submission_color(state.result.status)),
        )));
    } else if state.result.is_error() {
        footer.push(Line::from(Span::styled(
            state.result.message.as_str(),
            Style::default().fg(submission_color(state.result.status)).italic(),
        )));
    } else {
        footer.push(Line::from(Span::styled("* Required fields", Style::default().fg(FADE))));
    }
    let action = if state.is_submitting {
        Span::styled("Transmitting...", Style::default().fg(FADE))
    } else {
        Span::styled("[s] Send Dispatch →", Style::default().fg(PAPER).bg(INK).bold())
    };
    footer.push(Line::from(action).right_aligned());

    f.render_widget(Paragraph::new(footer), rows[4]);
}

fn draw_form_field(f: &mut Frame, state: &RenderState, field: Field, area: Rect) {
    let focused = state.focused_field == field;
    let editing = focused && state.input_mode == InputMode::Editing;
    let error = state.field_error(field);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(if error.is_some() { 1 } else { 0 })])
        .split(area);

    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else if error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(FADE)
    };

    let (text, hint) = match field {
        Field::Budget | Field::Timeline => {
            let options: &[&str] = if field == Field::Budget { &BUDGET_OPTIONS } else { &TIMELINE_OPTIONS };
            let value = state.draft.value(field).unwrap_or("");
            let shown = if value.is_empty() {
                format!("Select ({} options)", options.len())
            } else {
                value.to_string()
            };
            (shown, " ⏎ cycle ")
        }
        _ => (state.draft.value(field).unwrap_or("").to_string(), ""),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", field.label()))
        .title_bottom(Line::from(hint).right_aligned());

    let inner = block.inner(chunks[0]);
    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }).block(block), chunks[0]);

    if let Some(message) = error {
        f.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(Color::Red).italic())),
            chunks[1],
        );
    }

    if editing && inner.width > 0 {
        let typed = state.draft.value(field).unwrap_or("");
        let before = typed[..state.cursor_position.min(typed.len())].chars().count() as u16;
        let row = (before / inner.width).min(inner.height.saturating_sub(1));
        let col = before % inner.width;
        f.set_cursor_position(Position::new(inner.x + col, inner.y + row));
    }
}

fn draw_page_turner(f: &mut Frame, state: &RenderState, area: Rect) {
    let prev = match state.page.prev() {
        Some(p) if state.has_prev => format!("← {}", p.label()),
        _ => String::new(),
    };
    let next = match state.page.next() {
        Some(p) if state.has_next => format!("{} →", p.label()),
        _ => String::from("— Fin —"),
    };

    let pips: String = PageId::ALL
        .iter()
        .map(|p| if *p == state.page { '▮' } else { '▯' })
        .collect();

    let turner_style = if state.nav_pending {
        Style::default().fg(FADE).dim()
    } else {
        Style::default().fg(INK).bg(PAPER)
    };

    let mut spans = vec![
        Span::styled(format!(" {} ", prev), turner_style),
        Span::raw("  "),
        Span::styled(pips, Style::default().fg(INK)),
        Span::styled(format!(" {} ", state.position), Style::default().fg(FADE).italic()),
        Span::raw("  "),
        Span::styled(format!(" {} ", next), turner_style),
    ];

    if let (true, Some(from)) = (state.nav_pending, state.previous_page) {
        let arrow = match state.direction {
            navigation::Direction::Forward => "→",
            navigation::Direction::Backward => "←",
        };
        spans.push(Span::styled(
            format!("   turning {} {} {}", from.label(), arrow, state.page.label()),
            Style::default().fg(FADE).italic(),
        ));
    }

    if let Some(notice) = &state.notice {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(notice.as_str(), Style::default().fg(Color::Cyan)));
    }
    spans.push(Span::styled("   ?:help  q:quit", Style::default().fg(FADE)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 60, area);
    f.render_widget(Clear, popup);

    let text = r#"Reading the paper:
────────────────────────────
  ← / →  p / n   Turn the page
  1 … 6          Jump to a section
  ↑ / ↓          Scroll
  r              Revalidate this page's data

Sending a dispatch (§VI):
────────────────────────────
  Tab / ↑ ↓      Move between fields
  e / Enter      Edit field (Esc to stop)
  Enter / Space  Cycle budget or timeline
  s              Send
  a              Send another

  ?              Toggle help
  q              Quit
────────────────────────────
Press any key to close"#;

    f.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        popup,
    );
}
