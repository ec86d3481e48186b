//! Armor tab view - allocation against the chassis budget

use super::{label_line, row_style, section_header};
use crate::app::App;
use mech_core::{AllocationStatus, ArmorAllocationPolicy, SectionId};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    draw_allocations(f, app, chunks[0]);
    draw_budget(f, app, chunks[1]);
}

fn draw_allocations(f: &mut Frame, app: &App, area: Rect) {
    let build = app.build();
    let mut lines = vec![Line::from(Span::styled(
        format!("  {:14} {:>7} {:>7} {:>6} {:>8}", "Section", "Tons", "Max", "Share", "Armor HP"),
        Style::default().fg(Color::DarkGray),
    ))];

    for (i, id) in SectionId::all().iter().enumerate() {
        let Ok(section) = build.section(*id) else {
            continue;
        };
        let (prefix, style) = row_style(i == app.selected_section);
        let max = build.max_armor_for(*id);
        let max_text = if max.is_finite() {
            format!("{:.2}", max)
        } else {
            "-".to_string()
        };
        let at_cap = max.is_finite() && section.armor_tons() >= max;

        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(format!("{:14}", id.name()), style),
            Span::styled(
                format!(" {:>7.2}", section.armor_tons()),
                Style::default().fg(if at_cap { Color::Yellow } else { Color::White }),
            ),
            Span::styled(format!(" {:>7}", max_text), Style::default().fg(Color::Gray)),
            Span::styled(
                format!(" {:>5.0}%", ArmorAllocationPolicy::percent_for(*id) * 100.0),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!(" {:>8}", section.armor_hp()),
                Style::default().fg(Color::Cyan),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  [←/→] adjust by {:.2}t", app.armor_step()),
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Armor Allocation "),
    );
    f.render_widget(paragraph, area);
}

fn draw_budget(f: &mut Frame, app: &App, area: Rect) {
    let build = app.build();
    let mut lines = vec![section_header("Budget")];

    match (build.armor_budget(), build.armor_summary()) {
        (Some(budget), Some(summary)) => {
            let (label, color) = match summary.status() {
                AllocationStatus::OverAllocated => ("Over-allocated", Color::Red),
                AllocationStatus::NearlyFull => ("Nearly full", Color::Yellow),
                AllocationStatus::Available => ("Available", Color::Green),
            };
            lines.push(label_line("Chassis max", format!("{:.2}t", budget)));
            lines.push(label_line("Allocated", format!("{:.2}t", summary.total_allocated)));
            lines.push(label_line("Remaining", format!("{:.2}t", summary.remaining)));
            lines.push(Line::from(vec![
                Span::styled(format!("{:18}", "Status"), Style::default().fg(Color::Gray)),
                Span::styled(label, Style::default().fg(color)),
            ]));
        }
        _ => {
            let total: f64 = build.armor_allocations().values().sum();
            lines.push(label_line("Allocated", format!("{:.2}t", total)));
            lines.push(Line::from(Span::styled(
                "No chassis budget",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(section_header("Material"));
    match build.armor_type() {
        Some(armor) => lines.push(Line::from(armor.to_string())),
        None => lines.push(Line::from(Span::styled(
            format!("Base rating: {} HP/Ton", app.factory.constants().armor.hp_per_ton),
            Style::default().fg(Color::Gray),
        ))),
    }

    lines.push(Line::from(""));
    lines.push(section_header("Limits"));
    lines.push(Line::from("Head, arms: 5% each"));
    lines.push(Line::from("Side torsos, legs: 15% each"));
    lines.push(Line::from("Center torso: 25%"));

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Budget "));
    f.render_widget(paragraph, area);
}
