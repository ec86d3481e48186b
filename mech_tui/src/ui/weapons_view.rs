//! Weapons tab view - arsenal and mounted weapons

use super::{label_line, row_style, section_header};
use crate::app::App;
use mech_core::{HardpointType, SectionId, Weapon, WeaponType};
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
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
        ])
        .split(area);

    draw_mounts(f, app, chunks[0]);
    draw_arsenal(f, app, chunks[1]);
    draw_details(f, app, chunks[2]);
}

fn draw_mounts(f: &mut Frame, app: &App, area: Rect) {
    let build = app.build();
    let mut lines = Vec::new();

    for (i, id) in SectionId::all().iter().enumerate() {
        let Ok(section) = build.section(*id) else {
            continue;
        };
        let (prefix, style) = row_style(i == app.selected_section);
        let mounted = build.weapons_in(*id);
        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(format!("{:14}", id.name()), style),
            Span::styled(
                format!("{}/{} hardpoints", mounted.len(), section.total_hardpoints()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        for weapon in mounted {
            lines.push(Line::from(Span::styled(
                format!("      {}", weapon.name),
                Style::default().fg(type_color(weapon.weapon_type)),
            )));
        }
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Mounted "));
    f.render_widget(paragraph, area);
}

fn draw_arsenal(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();

    for weapon_type in WeaponType::all() {
        let weapons: Vec<(usize, &Weapon)> = app
            .catalog
            .weapons
            .iter()
            .enumerate()
            .filter(|(_, w)| w.weapon_type == *weapon_type)
            .collect();
        if weapons.is_empty() {
            continue;
        }
        lines.push(Line::from(Span::styled(
            weapon_type.name(),
            Style::default()
                .fg(type_color(*weapon_type))
                .add_modifier(Modifier::BOLD),
        )));
        for (index, weapon) in weapons {
            let (prefix, style) = row_style(index == app.selected_weapon);
            lines.push(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(format!("{:20}", weapon.name), style),
                Span::styled(
                    format!("{:>5.1}t", weapon.tonnage),
                    Style::default().fg(Color::Gray),
                ),
            ]));
        }
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No weapons in catalog",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Arsenal "));
    f.render_widget(paragraph, area);
}

fn draw_details(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![section_header("Weapon")];

    match app.current_weapon() {
        Some(weapon) => {
            lines.push(Line::from(Span::styled(
                weapon.name.clone(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            lines.push(label_line("Mount", mount_name(weapon.weapon_type.hardpoint()).to_string()));
            lines.push(label_line("Tonnage", format!("{:.1}t", weapon.tonnage)));
            lines.push(label_line("Heat", format!("{:.1}", weapon.heat)));
            lines.push(label_line(
                "Damage",
                format!("{} x{} = {}", weapon.damage, weapon.shots_per_salvo, weapon.salvo_damage()),
            ));
            lines.push(label_line(
                "Range",
                format!("{} / {} hexes", weapon.optimal_range, weapon.max_range),
            ));
            lines.push(label_line("Recycle", format!("{:.1}s", weapon.recycle_time)));
            if weapon.accuracy_penalty != 0 {
                lines.push(label_line("Accuracy", format!("-{}", weapon.accuracy_penalty)));
            }
        }
        None => lines.push(Line::from("Nothing selected")),
    }

    lines.push(Line::from(""));
    lines.push(section_header("Target"));
    let section = app.current_section();
    lines.push(Line::from(section.name()));
    if let Ok(target) = app.build().section(section) {
        lines.push(label_line(
            "Slots free",
            format!("{} of {}", target.available_slots(), target.total_slots()),
        ));
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Details "));
    f.render_widget(paragraph, area);
}

fn mount_name(hardpoint: Option<HardpointType>) -> &'static str {
    match hardpoint {
        Some(HardpointType::Energy) => "Energy hardpoint",
        Some(HardpointType::Ballistic) => "Ballistic hardpoint",
        Some(HardpointType::Missile) => "Missile hardpoint",
        None => "Internal slot",
    }
}

fn type_color(weapon_type: WeaponType) -> Color {
    match weapon_type {
        WeaponType::Energy => Color::LightRed,
        WeaponType::Ballistic => Color::LightYellow,
        WeaponType::Missile => Color::LightGreen,
        WeaponType::System => Color::LightBlue,
    }
}
