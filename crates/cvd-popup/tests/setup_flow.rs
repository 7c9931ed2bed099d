use cvd_popup::core::dom::{classes, ids, radio_id};
use cvd_popup::{CvdType, PopupPhase, RestoreSnapshot, SetupStep};
use cvd_test_support::fixtures::{TestPopup, started_popup};
use cvd_test_support::mocks::{MemoryStore, PreviewFilter};

fn operating_popup() -> anyhow::Result<TestPopup> {
    let store = MemoryStore::new()
        .with_type("DEUTERANOMALY")
        .with_delta(5.0)
        .with_severity(0.4)
        .with_enable(true)
        .with_site_delta("example.com", 12.0);
    Ok(started_popup(store, "example.com")?)
}

fn assert_operating(popup: &TestPopup) {
    assert_eq!(popup.phase(), PopupPhase::Operating);
    let doc = popup.document();
    assert!(doc.has_class(ids::FLEX_CONTAINER, classes::ACTIVATED));
    for id in [ids::ENABLE, ids::DELTA, ids::SETUP] {
        assert!(!doc.is_disabled(id), "{id} should be enabled");
    }
}

#[test]
fn valid_settings_start_in_operating_phase() -> anyhow::Result<()> {
    let popup = operating_popup()?;
    assert_operating(&popup);
    assert!(popup.restore_snapshot().is_none());
    Ok(())
}

#[test]
fn unset_type_starts_in_first_step() -> anyhow::Result<()> {
    let popup = started_popup(MemoryStore::new(), "example.com")?;
    assert_eq!(popup.phase(), PopupPhase::Setup(SetupStep::ChooseType));
    let doc = popup.document();
    assert!(!doc.has_class(ids::FLEX_CONTAINER, classes::ACTIVATED));
    assert!(doc.has_class(ids::FIRST_STEP, classes::ACTIVE));
    assert!(!doc.has_class(ids::SECOND_STEP, classes::ACTIVE));
    for id in [ids::ENABLE, ids::DELTA, ids::SETUP, ids::SEVERITY, ids::RESET] {
        assert!(doc.is_disabled(id), "{id} should be disabled");
    }
    assert_eq!(popup.background().updates, 0);
    Ok(())
}

#[test]
fn setup_snapshots_settings_and_previews_severity() -> anyhow::Result<()> {
    let mut popup = operating_popup()?;
    popup.on_setup_click()?;

    assert_eq!(popup.phase(), PopupPhase::Setup(SetupStep::AdjustSeverity));
    assert_eq!(
        popup.restore_snapshot(),
        Some(&RestoreSnapshot {
            cvd_type: "DEUTERANOMALY".to_string(),
            severity: 0.4,
        })
    );
    let doc = popup.document();
    assert!(doc.has_class(ids::SECOND_STEP, classes::ACTIVE));
    assert!(doc.is_disabled(ids::SETUP));
    assert!(!doc.is_disabled(ids::SEVERITY));
    assert!(doc.checked(&radio_id(CvdType::Deuteranomaly)));
    assert_eq!(doc.value_of(ids::SEVERITY), "0.4");
    assert_eq!(
        popup.filter().last_injected(),
        Some(PreviewFilter {
            cvd: Some(CvdType::Deuteranomaly),
            severity: 0.4,
        })
    );
    Ok(())
}

#[test]
fn cancel_restores_snapshot() -> anyhow::Result<()> {
    let mut popup = operating_popup()?;
    popup.on_setup_click()?;
    popup.on_type_change(Some(CvdType::Tritanomaly))?;
    assert_eq!(popup.store().default_type, "TRITANOMALY");
    assert_eq!(popup.store().default_severity, 0.0);

    popup.on_cancel_click()?;
    assert_operating(&popup);
    assert!(popup.restore_snapshot().is_none());
    assert_eq!(popup.store().default_type, "DEUTERANOMALY");
    assert_eq!(popup.store().default_severity, 0.4);
    assert_eq!(popup.cvd_type_selection(), Some(CvdType::Deuteranomaly));
    assert_eq!(popup.document().value_of(ids::SEVERITY), "0.4");
    assert_eq!(
        popup.filter().last_injected(),
        Some(PreviewFilter {
            cvd: Some(CvdType::Deuteranomaly),
            severity: 0.4,
        })
    );
    Ok(())
}

#[test]
fn ok_without_type_keeps_setup_open() -> anyhow::Result<()> {
    let mut popup = started_popup(MemoryStore::new(), "example.com")?;

    popup.on_ok_click()?;
    assert_eq!(popup.phase(), PopupPhase::Setup(SetupStep::ChooseType));
    assert_eq!(popup.cvd_type_selection(), None);
    assert!(popup.restore_snapshot().is_some());
    let doc = popup.document();
    assert!(!doc.has_class(ids::FLEX_CONTAINER, classes::ACTIVATED));
    for id in [ids::ENABLE, ids::DELTA, ids::SETUP] {
        assert!(doc.is_disabled(id), "{id} should stay disabled");
    }
    Ok(())
}

#[test]
fn cancel_back_to_unset_type_stays_in_setup() -> anyhow::Result<()> {
    let mut popup = started_popup(MemoryStore::new(), "example.com")?;
    popup.on_type_change(Some(CvdType::Protanomaly))?;
    assert_eq!(popup.phase(), PopupPhase::Setup(SetupStep::AdjustSeverity));

    popup.on_cancel_click()?;
    assert_eq!(popup.phase(), PopupPhase::Setup(SetupStep::ChooseType));
    assert_eq!(popup.store().default_type, "");
    assert_eq!(popup.cvd_type_selection(), None);
    assert!(popup.restore_snapshot().is_some());
    assert_eq!(popup.filter().clears, 1);
    let doc = popup.document();
    assert!(doc.has_class(ids::FIRST_STEP, classes::ACTIVE));
    for id in [ids::ENABLE, ids::DELTA, ids::SETUP, ids::SEVERITY] {
        assert!(doc.is_disabled(id), "{id} should stay disabled");
    }
    assert!(CvdType::ALL.iter().all(|cvd| !doc.checked(&radio_id(*cvd))));
    Ok(())
}

#[test]
fn ok_keeps_new_settings() -> anyhow::Result<()> {
    let mut popup = operating_popup()?;
    popup.on_setup_click()?;
    popup.on_type_change(Some(CvdType::Tritanomaly))?;
    popup.on_severity_change(0.8)?;

    popup.on_ok_click()?;
    assert_operating(&popup);
    assert!(popup.restore_snapshot().is_none());
    assert_eq!(popup.store().default_type, "TRITANOMALY");
    assert_eq!(popup.store().default_severity, 0.8);

    // A later cancel has nothing to restore.
    popup.on_cancel_click()?;
    assert_eq!(popup.store().default_type, "TRITANOMALY");
    Ok(())
}

#[test]
fn reset_button_clears_defaults_and_returns_to_first_step() -> anyhow::Result<()> {
    let mut popup = operating_popup()?;
    popup.on_setup_click()?;

    popup.on_reset_click()?;
    let store = popup.store();
    assert_eq!(store.default_type, "");
    assert_eq!(store.default_severity, 0.0);
    assert!(!store.default_enable);
    assert!(store.site_deltas.is_empty());
    assert_eq!(popup.phase(), PopupPhase::Setup(SetupStep::ChooseType));
    assert_eq!(popup.cvd_type_selection(), None);
    let doc = popup.document();
    assert!(!doc.checked(ids::ENABLE));
    assert_eq!(doc.value_of(ids::SEVERITY), "0");
    assert!(doc.is_disabled(ids::SEVERITY));
    assert!(doc.is_disabled(ids::RESET));
    assert_eq!(popup.filter().clears, 1);
    Ok(())
}
