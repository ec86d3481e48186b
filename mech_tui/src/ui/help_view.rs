//! Help tab view

use super::section_header;
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let armor = &app.factory.constants().armor;
    let lines = vec![
        section_header("Navigation"),
        key_line("1-5", "Jump to tab (Sections/Armor/Weapons/Damage/Help)"),
        key_line("Tab / Shift+Tab", "Next/previous tab"),
        key_line("↑/k  ↓/j", "Select section (weapon on the Weapons tab)"),
        key_line("q / Ctrl+C", "Quit"),
        key_line("?", "Toggle help"),
        Line::from(""),
        section_header("Build"),
        key_line("c", "Next chassis (rebuilds from the catalog)"),
        key_line("s", "Cycle shield generator"),
        key_line("m", "Cycle armor material"),
        key_line("←/→ (Armor)", &format!("Remove/add {:.2}t of armor", armor.step)),
        key_line("Enter (Weapons)", "Mount weapon in the selected section"),
        key_line("u", "Remove the last weapon from the selected section"),
        key_line("d", "Write a JSON snapshot of the build to the log"),
        Line::from(""),
        section_header("Damage"),
        key_line("←/→ (Damage)", "Change the amount"),
        key_line("a / Enter", "Apply damage to the selected section"),
        key_line("f", "Add field repair armor"),
        key_line("r", "Reset damage on every section"),
        Line::from(""),
        section_header("Rules"),
        Line::from("  Damage hits field repair, then armor, then slots from the last slot up."),
        Line::from(format!(
            "  Armor gives {} HP per ton unless an armor material is selected.",
            armor.hp_per_ton
        )),
        Line::from("  Slot HP: arm 24, side torso 32, leg 36, center torso 60, head 30."),
        Line::from("  A section takes one weapon per hardpoint."),
        Line::from(format!(
            "  Builds above {:.0}% of chassis tonnage are flagged.",
            armor.near_limit_ratio * 100.0
        )),
    ];

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Help "));
    f.render_widget(paragraph, area);
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:20}", key), Style::default().fg(Color::Yellow)),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
