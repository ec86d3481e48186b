//! Damage tab view - damage testing and the damage log

use super::{hp_bar, hp_color, label_line, row_style, section_header};
use crate::app::App;
use mech_core::SectionId;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);

    draw_sections(f, app, columns[0]);
    draw_selected(f, app, right[0]);
    draw_log(f, app, right[1]);
}

fn draw_sections(f: &mut Frame, app: &App, area: Rect) {
    let build = app.build();
    let mut lines = vec![
        label_line("Amount", format!("{} (±{})", app.damage_amount, crate::app::DAMAGE_STEP)),
        Line::from(""),
    ];

    for (i, id) in SectionId::all().iter().enumerate() {
        let Ok(section) = build.section(*id) else {
            continue;
        };
        let (prefix, style) = row_style(i == app.selected_section);
        let status_color = if section.is_destroyed() {
            Color::Red
        } else if section.is_damaged() {
            Color::Yellow
        } else {
            Color::Green
        };
        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(id.name(), style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", section.damage_status()),
            Style::default().fg(status_color),
        )));
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Damage Control "));
    f.render_widget(paragraph, area);
}

fn draw_selected(f: &mut Frame, app: &App, area: Rect) {
    let id = app.current_section();
    let mut lines = vec![section_header(id.name())];

    if let Ok(section) = app.build().section(id) {
        let armor = section.effective_armor_hp();
        let armor_max = section.armor_hp() + section.field_repair_armor();
        lines.push(Line::from(vec![
            Span::styled(format!("{:8}", "Armor"), Style::default().fg(Color::Gray)),
            Span::styled(hp_bar(armor, armor_max, 16), Style::default().fg(hp_color(armor, armor_max))),
            Span::raw(format!(" {}/{}", armor, armor_max)),
        ]));

        let base = section.base_slot_hp();
        for index in 0..section.total_slots() {
            let hp = section.slot_hp_or_zero(index);
            let color = hp_color(hp, base);
            let mut spans = vec![
                Span::styled(format!("Slot {:<3}", index + 1), Style::default().fg(Color::Gray)),
                Span::styled(hp_bar(hp, base, 16), Style::default().fg(color)),
                Span::raw(format!(" {}/{}", hp, base)),
            ];
            if hp <= 0 {
                spans.push(Span::styled(
                    " gone",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Section "));
    f.render_widget(paragraph, area);
}

fn draw_log(f: &mut Frame, app: &App, area: Rect) {
    let entries = app.damage_log.entries();
    // Newest entries that fit, newest last
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = entries
        .iter()
        .skip(entries.len().saturating_sub(visible))
        .map(|entry| {
            let color = if entry.contains("DESTROYED") {
                Color::Red
            } else if entry.contains("field repair") {
                Color::Green
            } else {
                Color::White
            };
            Line::from(Span::styled(entry.clone(), Style::default().fg(color)))
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Damage Log "))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
