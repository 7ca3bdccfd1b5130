use chrono::{Datelike, NaiveDate};
use ratatui::{prelude::*, widgets::*};

use crate::constants::FIRST_EDITION;
use crate::contact::SubmissionStatus;
use crate::models::{Availability, ProjectStatus, SkillLevel};
use crate::navigation::PageId;

/// Paper and ink
pub const INK: Color = Color::Rgb(26, 18, 8);
pub const PAPER: Color = Color::Rgb(242, 235, 217);
pub const FADE: Color = Color::Rgb(120, 104, 80);

/// Renders the section ribbon (`§I Front Page | §II About | ...`)
pub fn render_ribbon<'a>(current: PageId) -> Tabs<'a> {
    let titles: Vec<Line> = PageId::ALL
        .iter()
        .map(|p| Line::from(format!("§{} {}", p.numeral(), p.label().to_uppercase())))
        .collect();

    Tabs::new(titles)
        .select(current.index())
        .style(Style::default().fg(FADE))
        .highlight_style(Style::default().fg(PAPER).bg(INK).bold())
        .divider("|")
}

/// Weeks since the first edition, zero-padded to four digits
pub fn edition_number(today: NaiveDate) -> String {
    let (y, m, d) = FIRST_EDITION;
    let weeks = NaiveDate::from_ymd_opt(y, m, d)
        .map(|start| (today - start).num_weeks().max(0))
        .unwrap_or(0);
    format!("{:04}", weeks)
}

/// `Saturday, October 17, 2026`
pub fn today_formatted(today: NaiveDate) -> String {
    today.format("%A, %B %-d, %Y").to_string()
}

/// `2024-03-02` -> `March 2, 2024`; unparseable input is returned as is
pub fn format_date(iso: &str) -> String {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|_| iso.to_string())
}

/// Volume number: one per year since the first edition
pub fn volume(today: NaiveDate) -> u32 {
    (today.year() - FIRST_EDITION.0).max(0) as u32 + 1
}

/// `9` -> `IX`; zero renders as an empty string
pub fn roman_numeral(mut n: u32) -> String {
    const NUMERALS: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

/// Text bar filled to the skill level, e.g. `█████████░` for expert
pub fn skill_bar(level: SkillLevel, width: u16) -> String {
    let filled = (width as u32 * level.width_percent() as u32 / 100) as usize;
    let empty = (width as usize).saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Availability color
pub fn availability_color(availability: Availability) -> Color {
    match availability {
        Availability::Available => Color::Green,
        Availability::Busy => Color::Yellow,
        Availability::Unavailable => Color::Red,
    }
}

/// Project status color
pub fn project_status_color(status: ProjectStatus) -> Color {
    match status {
        ProjectStatus::Live => Color::Green,
        ProjectStatus::Wip => Color::Yellow,
        ProjectStatus::Archived => Color::DarkGray,
    }
}

/// Submission status color
pub fn submission_color(status: SubmissionStatus) -> Color {
    match status {
        SubmissionStatus::Idle => FADE,
        SubmissionStatus::Success => Color::Green,
        SubmissionStatus::Error => Color::Red,
    }
}

/// A ruled section heading, e.g. `§ III — Works`
pub fn section_heading<'a>(page: PageId, title: &'a str) -> Vec<Line<'a>> {
    vec![
        Line::from(Span::styled(
            format!("§ {} — {}", page.numeral(), page.label()),
            Style::default().fg(FADE).italic(),
        )),
        Line::from(Span::styled(title, Style::default().bold())),
        Line::from(Span::styled("─".repeat(48), Style::default().fg(FADE))),
    ]
}

/// Centered popup area
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
