//! Sections tab view - per-section overview and tonnage summary

use super::{hp_bar, hp_color, label_line, row_style, section_header};
use crate::app::App;
use mech_core::{LimitWarning, SectionId};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    draw_sections(f, app, chunks[0]);
    draw_summary(f, app, chunks[1]);
}

fn draw_sections(f: &mut Frame, app: &App, area: Rect) {
    let build = app.build();
    let mut lines = vec![Line::from(Span::styled(
        format!(
            "  {:14} {:>6}  {:22} {:>9}  {:11} {:>5}",
            "Section", "Armor", "HP", "", "Hardpoints", "Slots"
        ),
        Style::default().fg(Color::DarkGray),
    ))];

    for (i, id) in SectionId::all().iter().enumerate() {
        let Ok(section) = build.section(*id) else {
            continue;
        };
        let (prefix, style) = row_style(i == app.selected_section);
        let current = section.current_total_hp();
        let max = section.max_total_hp();

        let mut spans = vec![
            Span::styled(prefix, style),
            Span::styled(format!("{:14}", id.name()), style),
            Span::styled(
                format!("{:>6.2}  ", section.armor_tons()),
                Style::default().fg(Color::White),
            ),
            Span::styled(hp_bar(current, max, 20), Style::default().fg(hp_color(current, max))),
            Span::styled(format!(" {:>4}/{:<4}  ", current, max), Style::default().fg(Color::Gray)),
            Span::styled(
                format!(
                    "E{} B{} M{}    ",
                    section.energy_hardpoints(),
                    section.ballistic_hardpoints(),
                    section.missile_hardpoints()
                ),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!("{:>2}/{:<2}", section.used_slots(), section.total_slots()),
                Style::default().fg(Color::White),
            ),
        ];
        if section.is_destroyed() {
            spans.push(Span::styled(
                "  DESTROYED",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    if let Ok(section) = build.section(app.current_section()) {
        for text in section.summary().lines() {
            lines.push(Line::from(Span::styled(
                format!("  {}", text),
                Style::default().fg(Color::Gray),
            )));
        }
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", build.name())),
    );
    f.render_widget(paragraph, area);
}

fn draw_summary(f: &mut Frame, app: &App, area: Rect) {
    let build = app.build();
    let totals = app.session.totals();
    let mut lines = vec![section_header("Chassis")];

    match build.chassis() {
        Some(chassis) => {
            lines.push(Line::from(Span::styled(
                chassis.to_string(),
                Style::default().fg(Color::White),
            )));
            lines.push(label_line("Remaining", format!("{:.2}t", totals.remaining(chassis))));
        }
        None => lines.push(Line::from(Span::styled(
            "Default layout (no chassis limits)",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    lines.push(Line::from(""));
    lines.push(section_header("Tonnage"));
    lines.push(label_line("Weapons", format!("{:.2}t", totals.weapon_tons)));
    lines.push(label_line("Armor", format!("{:.2}t", totals.armor_tons)));
    lines.push(label_line("Total", format!("{:.2}t", totals.total)));

    lines.push(Line::from(""));
    lines.push(section_header("Equipment"));
    lines.push(label_line("Shield", app.shield_label()));
    lines.push(label_line(
        "Armor type",
        build
            .armor_type()
            .map_or_else(|| "Base".to_string(), |a| a.to_string()),
    ));

    lines.push(Line::from(""));
    lines.push(section_header("Warnings"));
    let warnings = app.session.warnings();
    if warnings.is_empty() {
        lines.push(Line::from(Span::styled("None", Style::default().fg(Color::Green))));
    }
    for warning in &warnings {
        lines.push(Line::from(Span::styled(
            warning.to_string(),
            Style::default().fg(warning_color(warning)),
        )));
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Loadout "));
    f.render_widget(paragraph, area);
}

fn warning_color(warning: &LimitWarning) -> Color {
    if warning.is_violation() {
        Color::Red
    } else {
        Color::Yellow
    }
}
