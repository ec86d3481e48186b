//! UI rendering

mod armor_view;
mod damage_view;
mod help_view;
mod section_view;
mod weapons_view;

use crate::app::{App, Tab};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status line
            Constraint::Length(3), // Keybindings footer
        ])
        .split(f.area());

    draw_tabs(f, app, chunks[0]);

    match app.current_tab {
        Tab::Sections => section_view::draw(f, app, chunks[1]),
        Tab::Armor => armor_view::draw(f, app, chunks[1]),
        Tab::Weapons => weapons_view::draw(f, app, chunks[1]),
        Tab::Damage => damage_view::draw(f, app, chunks[1]),
        Tab::Help => help_view::draw(f, app, chunks[1]),
    }

    draw_status(f, app, chunks[2]);
    draw_keybindings(f, app, chunks[3]);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let build = app.build();
    let mut spans = vec![
        Span::styled(
            format!(" {} ", build.name()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("│ {} ", app.current_section()),
            Style::default().fg(Color::Cyan),
        ),
    ];
    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!("│ {}", status),
            Style::default().fg(Color::White),
        ));
    }

    let paragraph =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL).title(" Status "));
    f.render_widget(paragraph, area);
}

fn draw_keybindings(f: &mut Frame, app: &App, area: Rect) {
    let common_keys = vec![("Tab", "Next tab"), ("c", "Chassis"), ("d", "Dump"), ("q", "Quit")];

    let tab_keys: Vec<(&str, &str)> = match app.current_tab {
        Tab::Sections => vec![("↑/↓", "Select section"), ("s", "Shield"), ("m", "Armor type")],
        Tab::Armor => vec![("↑/↓", "Select section"), ("←/→", "-/+ armor")],
        Tab::Weapons => vec![
            ("↑/↓", "Select weapon"),
            ("←/→", "Select section"),
            ("Enter", "Mount"),
            ("u", "Remove last"),
        ],
        Tab::Damage => vec![
            ("↑/↓", "Select section"),
            ("←/→", "-/+ amount"),
            ("a", "Damage"),
            ("f", "Field repair"),
            ("r", "Reset"),
        ],
        Tab::Help => vec![],
    };

    let mut spans: Vec<Span> = Vec::new();

    // Add tab-specific keys first
    for (i, (key, desc)) in tab_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::White)));
    }

    if !tab_keys.is_empty() {
        spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
    }

    for (i, (key, desc)) in common_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(format!("[{}]", key), Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::Gray)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(paragraph, area);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let style = if *t == app.current_tab {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(t.name(), style))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Mech Builder "))
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider("|");

    f.render_widget(tabs, area);
}

/// Text bar of `width` cells filled to `current / max`
pub fn hp_bar(current: i32, max: i32, width: usize) -> String {
    let ratio = if max > 0 {
        (current.max(0) as f64 / max as f64).min(1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Green above half, yellow above a quarter, red below
pub fn hp_color(current: i32, max: i32) -> Color {
    if max <= 0 || current <= 0 {
        return Color::Red;
    }
    let ratio = current as f64 / max as f64;
    if ratio > 0.5 {
        Color::Green
    } else if ratio > 0.25 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Highlight prefix and style for list rows
pub fn row_style(selected: bool) -> (&'static str, Style) {
    if selected {
        ("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    } else {
        ("  ", Style::default().fg(Color::White))
    }
}

pub fn section_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("═══ {} ═══", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

pub fn label_line(name: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:18}", name), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hp_bar() {
        assert_eq!(hp_bar(5, 10, 4), "██░░");
        assert_eq!(hp_bar(20, 10, 3), "███");
        assert_eq!(hp_bar(-4, 10, 2), "░░");
        assert_eq!(hp_bar(0, 0, 2), "░░");
    }

    #[test]
    fn test_hp_color() {
        assert_eq!(hp_color(10, 10), Color::Green);
        assert_eq!(hp_color(4, 10), Color::Yellow);
        assert_eq!(hp_color(1, 10), Color::Red);
        assert_eq!(hp_color(0, 0), Color::Red);
    }
}
