//! Integration test: Load catalog -> Pick chassis -> Allocate armor -> Mount weapons -> Take damage
//!
//! This test drives the core the same way the TUI does, through session commands.

use mech_core::{
    default_catalog, BuildEvent, BuildSession, CatalogProvider, Command, EventLog,
    LoadoutAccountant, MechBuild, SectionFactory, SectionId, ARMOR_STEP,
};

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

/// Helper to print every section's damage status
fn print_sections(session: &BuildSession) {
    for (id, section) in session.build().sections() {
        println!("  {:14} {}", id.name(), section.damage_status());
    }
}

#[test]
fn test_full_session_flow() {
    separator("STEP 1: Load catalog and build first chassis");

    let catalog = default_catalog().expect("bundled catalog");
    let factory = SectionFactory::default();
    let first = catalog.chassis.first().expect("catalog has chassis");
    println!("  Chassis: {}", first);

    let build = MechBuild::from_catalog(&catalog, &factory, &first.name).unwrap();
    let mut session = BuildSession::new(build, LoadoutAccountant::default());
    let (log, damage_log) = EventLog::new(50);
    session.add_observer(Box::new(log.damage_only()));
    print_sections(&session);

    separator("STEP 2: Cycle to the Hunchback");

    let hunchback = MechBuild::from_catalog(&catalog, &factory, "Hunchback").unwrap();
    session.replace_build(hunchback);
    assert_eq!(session.build().name(), "Hunchback");
    assert_eq!(session.observer_count(), 1);

    separator("STEP 3: Allocate armor in quarter-ton steps");

    // Center torso share of 25t is 6.25t; 2t + 20 steps would be 7t
    for _ in 0..20 {
        session
            .dispatch(Command::AdjustArmor {
                section: SectionId::CenterTorso,
                delta: ARMOR_STEP,
            })
            .unwrap();
    }
    let ct = session.build().section(SectionId::CenterTorso).unwrap();
    println!("  Center Torso armor: {:.2}t", ct.armor_tons());
    assert!((ct.armor_tons() - 6.25).abs() < f64::EPSILON);
    assert_eq!(ct.armor_hp(), 50);

    separator("STEP 4: Mount weapons");

    let srm = catalog.weapon("SRM 4").unwrap().clone();
    let events = session
        .dispatch(Command::PlaceWeapon {
            section: SectionId::LeftTorso,
            weapon: srm.clone(),
        })
        .unwrap();
    println!("  {}", events[0]);
    assert!(session
        .dispatch(Command::PlaceWeapon {
            section: SectionId::LeftTorso,
            weapon: srm,
        })
        .is_err());

    let totals = session.totals();
    println!(
        "  Tonnage: {:.2}t weapons + {:.2}t armor = {:.2}t",
        totals.weapon_tons, totals.armor_tons, totals.total
    );
    assert!((totals.total - 22.25).abs() < f64::EPSILON);
    assert!(session.warnings().is_empty());

    separator("STEP 5: Damage the center torso");

    session
        .dispatch(Command::FieldRepair {
            section: SectionId::CenterTorso,
            amount: 10,
        })
        .unwrap();
    let events = session
        .dispatch(Command::ApplyDamage {
            section: SectionId::CenterTorso,
            amount: 100,
        })
        .unwrap();
    let BuildEvent::Damaged(report) = &events[0] else {
        panic!("expected a damage event, got {:?}", events[0]);
    };
    println!("  {}", report.summary());
    assert_eq!(report.absorbed_by_field_repair, 10);
    assert_eq!(report.absorbed_by_armor, 50);
    assert_eq!(report.absorbed_by_slots, 40);
    assert_eq!(report.slots_hit, vec![(4, 40)]);
    print_sections(&session);

    separator("STEP 6: Snapshot and reset");

    let json = session
        .build()
        .summary(session.accountant())
        .to_json()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["name"], "Hunchback");
    assert_eq!(value["sections"].as_array().map(|s| s.len()), Some(8));

    session.dispatch(Command::ResetDamage).unwrap();
    assert!(session.build().sections().values().all(|s| !s.is_damaged()));

    let entries = damage_log.entries();
    for entry in &entries {
        println!("  log: {}", entry);
    }
    assert_eq!(entries.len(), 3);
}
