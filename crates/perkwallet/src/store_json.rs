//! JSON snapshot persistence for the in-memory store.
//!
//! The whole `MemoryStore` is serialized as one pretty-printed document in
//! the data directory. Loading runs the legacy category migration over the
//! raw document before it is decoded into the typed model, so retired
//! category names never reach the `Category` enum.

use std::fs;
use std::path::Path;

use color_eyre::eyre::WrapErr;
use perkwallet_core::MemoryStore;
use perkwallet_core::migrate::canonical_category;
use serde_json::Value;

/// Load the store snapshot, or an empty store when none exists yet.
pub fn load(path: &Path) -> color_eyre::Result<MemoryStore> {
    if !path.exists() {
        return Ok(MemoryStore::new());
    }
    let raw = fs::read_to_string(path)
        .wrap_err_with(|| format!("reading store snapshot {}", path.display()))?;
    let mut doc: Value = serde_json::from_str(&raw)
        .wrap_err_with(|| format!("parsing store snapshot {}", path.display()))?;
    let migrated = migrate_categories(&mut doc);
    if migrated > 0 {
        tracing::info!("migrated {migrated} legacy category value(s)");
    }
    let store = serde_json::from_value(doc)
        .wrap_err_with(|| format!("decoding store snapshot {}", path.display()))?;
    Ok(store)
}

/// Write the store snapshot, creating the parent directory if needed.
pub fn save(store: &MemoryStore, path: &Path) -> color_eyre::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(store)?;
    fs::write(path, json).wrap_err_with(|| format!("writing store snapshot {}", path.display()))?;
    Ok(())
}

/// Rewrite every benefit's category through the consolidation mapping.
/// Returns how many values actually changed.
fn migrate_categories(doc: &mut Value) -> usize {
    let Some(benefits) = doc.get_mut("benefits").and_then(Value::as_object_mut) else {
        return 0;
    };
    let mut migrated = 0;
    for benefit in benefits.values_mut() {
        let Some(raw) = benefit.get("category").and_then(Value::as_str) else {
            continue;
        };
        let canonical = canonical_category(raw).label();
        if raw != canonical {
            benefit["category"] = Value::String(canonical.to_string());
            migrated += 1;
        }
    }
    migrated
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::{date, datetime};
    use perkwallet_core::store::{BenefitDraft, PerkStore};
    use perkwallet_core::{BenefitStatus, Cadence, Category};

    fn populated_store() -> MemoryStore {
        let now = datetime(2025, 6, 10, 12, 0, 0, 0);
        let mut store = MemoryStore::new();
        let card_id = store.insert_card("Sapphire Reserve", Some("Chase"), now);
        store
            .insert_benefit(BenefitDraft {
                card_id,
                name: "Dining Credit".to_string(),
                value: 25.0,
                category: Category::Dining,
                status: BenefitStatus::Available,
                period_start: date(2025, 6, 1),
                period_end: date(2025, 6, 30),
                next_reset: date(2025, 7, 1),
                cadence_override: Some(Cadence::Monthly),
                reminder_lead_days: Some(3),
                created_at: now,
            })
            .unwrap();
        store
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = populated_store();
        save(&store, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded.cards(), store.cards());
        assert_eq!(loaded.benefits(), store.benefits());
        assert_eq!(loaded.entries(), store.entries());
    }

    #[test]
    fn test_missing_snapshot_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.cards().is_empty());
    }

    #[test]
    fn test_legacy_categories_migrate_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = populated_store();
        save(&store, &path).unwrap();

        // Regress the file to a retired category name
        let raw = fs::read_to_string(&path)
            .unwrap()
            .replace("\"dining\"", "\"restaurants\"");
        fs::write(&path, raw).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.benefits()[0].category, Category::Dining);
    }

    #[test]
    fn test_unknown_categories_fall_back_to_other() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = populated_store();
        save(&store, &path).unwrap();
        let raw = fs::read_to_string(&path)
            .unwrap()
            .replace("\"dining\"", "\"petcare\"");
        fs::write(&path, raw).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.benefits()[0].category, Category::Other);
    }
}
