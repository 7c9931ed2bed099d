use cvd_popup::core::dom::{ids, radio_id};
use cvd_popup::{CvdType, SyncOutcome};
use cvd_test_support::fixtures::{popup, started_popup};
use cvd_test_support::mocks::MemoryStore;

fn example_store() -> MemoryStore {
    MemoryStore::new()
        .with_type("DEUTERANOMALY")
        .with_site_delta("example.com", 12.0)
        .with_delta(5.0)
        .with_severity(0.4)
        .with_enable(true)
}

#[test]
fn site_override_wins_over_default_delta() -> anyhow::Result<()> {
    let mut popup = popup(example_store())?;
    let outcome = popup.start("example.com".to_string())?;
    assert_eq!(outcome, SyncOutcome::Synced);

    let outcome = popup.update()?;
    assert!(outcome.is_synced());
    let doc = popup.document();
    assert_eq!(doc.value_of(ids::DELTA), "12");
    assert_eq!(doc.value_of(ids::SEVERITY), "0.4");
    assert!(doc.checked(ids::ENABLE));
    assert!(doc.checked(&radio_id(CvdType::Deuteranomaly)));
    assert!(!doc.checked(&radio_id(CvdType::Protanomaly)));
    assert!(!doc.checked(&radio_id(CvdType::Tritanomaly)));
    assert_eq!(popup.cvd_type_selection(), Some(CvdType::Deuteranomaly));
    Ok(())
}

#[test]
fn default_delta_applies_without_site() -> anyhow::Result<()> {
    let mut popup = popup(example_store())?;
    assert_eq!(popup.site(), None);

    assert!(popup.update()?.is_synced());
    assert_eq!(popup.document().value_of(ids::DELTA), "5");
    Ok(())
}

#[test]
fn unknown_site_falls_back_to_default_delta() -> anyhow::Result<()> {
    let popup = started_popup(example_store(), "other.test")?;
    assert_eq!(popup.document().value_of(ids::DELTA), "5");
    Ok(())
}

#[test]
fn every_sync_refreshes_tabs() -> anyhow::Result<()> {
    let mut popup = started_popup(example_store(), "example.com")?;
    let before = popup.background().updates;
    assert!(popup.update()?.is_synced());
    assert_eq!(popup.background().updates, before + 1);
    Ok(())
}

#[test]
fn invalid_type_aborts_without_touching_fields() -> anyhow::Result<()> {
    for stored in ["", "deuteranomaly", "MONOCHROMACY"] {
        let store = MemoryStore::new()
            .with_type(stored)
            .with_delta(8.0)
            .with_severity(0.9)
            .with_enable(true);
        let mut popup = popup(store)?;

        assert_eq!(popup.update()?, SyncOutcome::NeedsSetup);
        let doc = popup.document();
        assert_eq!(doc.value_of(ids::DELTA), "0");
        assert_eq!(doc.value_of(ids::SEVERITY), "0");
        assert!(!doc.checked(ids::ENABLE));
        assert!(CvdType::ALL.iter().all(|cvd| !doc.checked(&radio_id(*cvd))));
        assert_eq!(popup.cvd_type_selection(), None);
        assert_eq!(popup.background().updates, 0);
    }
    Ok(())
}

#[test]
fn operating_sync_leaves_radio_selection_alone() -> anyhow::Result<()> {
    let mut popup = started_popup(example_store(), "example.com")?;
    assert!(popup.phase().is_activated());

    popup.set_cvd_type_selection(Some(CvdType::Protanomaly))?;
    assert!(popup.update()?.is_synced());
    assert_eq!(popup.cvd_type_selection(), Some(CvdType::Protanomaly));
    assert!(popup.document().checked(&radio_id(CvdType::Protanomaly)));
    Ok(())
}
