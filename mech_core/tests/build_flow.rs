//! End-to-end flow: catalog -> factory -> armor -> weapons -> damage -> accounting

use mech_core::prelude::*;
use mech_core::{AllocationStatus, ArmorOverflowRule, EventLog};

fn hunchback_session() -> (Catalog, BuildSession) {
    let catalog = default_catalog().expect("bundled catalog");
    let build = MechBuild::from_catalog(&catalog, &SectionFactory::default(), "Hunchback")
        .expect("Hunchback build");
    (catalog, BuildSession::new(build, LoadoutAccountant::default()))
}

#[test]
fn test_full_build_flow() {
    let (catalog, mut session) = hunchback_session();
    let (log, damage_log) = EventLog::new(16);
    session.add_observer(Box::new(log.damage_only()));

    // Max out the center torso and strip the head
    session
        .dispatch(Command::SetArmor {
            section: SectionId::CenterTorso,
            tons: 10.0,
        })
        .unwrap();
    session
        .dispatch(Command::SetArmor {
            section: SectionId::Head,
            tons: 0.0,
        })
        .unwrap();
    let summary = session.build().armor_summary().unwrap();
    assert!((summary.total_allocated - 18.25).abs() < f64::EPSILON);
    assert_eq!(summary.status(), AllocationStatus::Available);

    // Three lasers fill the right torso hardpoints
    let laser = catalog.weapon("Medium Laser").unwrap().clone();
    for _ in 0..3 {
        session
            .dispatch(Command::PlaceWeapon {
                section: SectionId::RightTorso,
                weapon: laser.clone(),
            })
            .unwrap();
    }
    let refused = session.dispatch(Command::PlaceWeapon {
        section: SectionId::RightTorso,
        weapon: laser,
    });
    assert_eq!(
        refused,
        Err(MechError::NoFreeHardpoint {
            section: SectionId::RightTorso
        })
    );
    assert_eq!(
        session.build().section(SectionId::RightTorso).unwrap().used_slots(),
        3
    );

    let totals = session.totals();
    assert!((totals.weapon_tons - 3.0).abs() < f64::EPSILON);
    assert!((totals.total - 21.25).abs() < f64::EPSILON);
    assert!(session.warnings().is_empty());

    // 16 armor HP on the right torso, then 32 HP slots
    session
        .dispatch(Command::ApplyDamage {
            section: SectionId::RightTorso,
            amount: 40,
        })
        .unwrap();
    let torso = session.build().section(SectionId::RightTorso).unwrap();
    assert_eq!(torso.effective_armor_hp(), 0);
    assert_eq!(torso.slot_hp(7).unwrap(), 8);
    assert!(!torso.is_destroyed());

    session.dispatch(Command::ResetDamage).unwrap();
    assert!(session.build().sections().values().all(|s| !s.is_damaged()));
    assert_eq!(damage_log.len(), 2);
}

#[test]
fn test_destroying_a_section_reports_overflow() {
    let (_, mut session) = hunchback_session();
    let max = session
        .build()
        .section(SectionId::LeftArm)
        .unwrap()
        .max_total_hp();

    let events = session
        .dispatch(Command::ApplyDamage {
            section: SectionId::LeftArm,
            amount: max + 25,
        })
        .unwrap();
    match &events[0] {
        BuildEvent::Damaged(report) => {
            assert_eq!(report.overflow, 25);
            assert!(report.destroyed);
            assert_eq!(report.hp_after, 0);
        }
        other => panic!("unexpected event {:?}", other),
    }
    assert!(session.build().is_destroyed(SectionId::LeftArm));
    assert!(session
        .build()
        .section(SectionId::LeftArm)
        .unwrap()
        .damage_status()
        .ends_with("DESTROYED"));
}

#[test]
fn test_overloaded_build_warns() {
    let (catalog, mut session) = hunchback_session();
    let ac = catalog.weapon("AC/20").unwrap().clone();
    let ppc = catalog.weapon("PPC").unwrap().clone();
    session
        .dispatch(Command::PlaceWeapon {
            section: SectionId::RightTorso,
            weapon: ac.clone(),
        })
        .unwrap();
    session
        .dispatch(Command::PlaceWeapon {
            section: SectionId::RightTorso,
            weapon: ac,
        })
        .unwrap();
    let events = session
        .dispatch(Command::PlaceWeapon {
            section: SectionId::LeftArm,
            weapon: ppc,
        })
        .unwrap();

    // 16t armor + 35t weapons on a 50t chassis
    assert!(matches!(events.last(), Some(BuildEvent::LimitsExceeded { .. })));
    let warnings = session.warnings();
    assert_eq!(warnings.len(), 1);
    match warnings[0] {
        LimitWarning::OverTonnage { overage } => assert!((overage - 1.0).abs() < f64::EPSILON),
        other => panic!("unexpected warning {:?}", other),
    }
}

#[test]
fn test_legacy_overflow_rule_through_factory() {
    let constants = BuilderConstants::from_toml("[damage]\narmor_overflow = \"legacy\"\n").unwrap();
    let build = MechBuild::legacy(&SectionFactory::new(constants)).unwrap();
    let mut session = BuildSession::new(build, LoadoutAccountant::default());

    session
        .dispatch(Command::ApplyDamage {
            section: SectionId::LeftArm,
            amount: 30,
        })
        .unwrap();
    let arm = session.build().section(SectionId::LeftArm).unwrap();
    assert_eq!(arm.overflow_rule(), ArmorOverflowRule::Legacy);
    assert_eq!(arm.slot_damage(), &[0, 0, 0, 0, 6, 24]);
}

#[test]
fn test_every_catalog_chassis_builds() {
    let catalog = default_catalog().unwrap();
    let factory = SectionFactory::default();
    for chassis in &catalog.chassis {
        let build = MechBuild::from_catalog(&catalog, &factory, &chassis.name).unwrap();
        assert_eq!(build.sections().len(), 8);
        let hardpoints: u32 = build.sections().values().map(|s| s.total_hardpoints()).sum();
        assert_eq!(hardpoints, chassis.hardpoints.total());
    }
}
