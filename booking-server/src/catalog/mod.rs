//! Class Catalog
//!
//! Enumerates the bookable classes, their slots and the capacity
//! policy. The per-slot override table centralizes deployment-time
//! decisions (a slot force-closed to 0, another capped below the
//! uniform constant) that would otherwise end up as scattered
//! conditionals in rendering and submission code.
//!
//! The catalog ships with a built-in default and can be replaced
//! wholesale by a JSON file (`CATALOG_PATH`), including the per-class
//! age bound — the bound is deployment data, not code.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Uniform per-slot capacity used when no override is configured
pub const DEFAULT_SLOT_CAPACITY: u32 = 6;

/// Catalog loading / validation errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

/// Inclusive child-age bound for a class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl AgeRange {
    pub fn contains(&self, age: u8) -> bool {
        age >= self.min && age <= self.max
    }
}

/// A bookable (date, time-range) slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotInfo {
    pub id: String,
    /// Human-readable label shown on the form
    pub label: String,
}

/// A bookable class with its slot enumeration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassInfo {
    pub id: String,
    pub name: String,
    pub age: AgeRange,
    pub slots: Vec<SlotInfo>,
}

impl ClassInfo {
    pub fn slot(&self, slot_id: &str) -> Option<&SlotInfo> {
        self.slots.iter().find(|s| s.id == slot_id)
    }

    pub fn has_slot(&self, slot_id: &str) -> bool {
        self.slot(slot_id).is_some()
    }
}

/// The full catalog: classes, slots and capacity policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCatalog {
    pub classes: Vec<ClassInfo>,
    /// Uniform per-slot capacity
    #[serde(default = "default_capacity")]
    pub default_capacity: u32,
    /// Per-slot capacity overrides (slot_id -> capacity, 0 = closed)
    #[serde(default)]
    pub capacity_overrides: HashMap<String, u32>,
}

fn default_capacity() -> u32 {
    DEFAULT_SLOT_CAPACITY
}

impl ClassCatalog {
    /// Load a catalog from a JSON string and validate it
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: ClassCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Slot ids must be unique across the whole catalog: the tally keys
    /// on slot id alone, so a duplicate would merge two slots' counts.
    fn validate(&self) -> Result<(), CatalogError> {
        if self.default_capacity == 0 {
            return Err(CatalogError::Invalid(
                "default_capacity must be at least 1".into(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for class in &self.classes {
            if class.age.min > class.age.max {
                return Err(CatalogError::Invalid(format!(
                    "class '{}' has an empty age range [{}, {}]",
                    class.id, class.age.min, class.age.max
                )));
            }
            for slot in &class.slots {
                if !seen.insert(slot.id.as_str()) {
                    return Err(CatalogError::Invalid(format!(
                        "duplicate slot id '{}'",
                        slot.id
                    )));
                }
            }
        }
        for slot_id in self.capacity_overrides.keys() {
            if !seen.contains(slot_id.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "capacity override for unknown slot '{}'",
                    slot_id
                )));
            }
        }
        Ok(())
    }

    pub fn class(&self, class_id: &str) -> Option<&ClassInfo> {
        self.classes.iter().find(|c| c.id == class_id)
    }

    /// Effective capacity: the override if one is configured, else the
    /// uniform constant. Consulted by both the remaining-seat
    /// computation and the submission guard.
    pub fn effective_capacity(&self, slot_id: &str) -> u32 {
        self.capacity_overrides
            .get(slot_id)
            .copied()
            .unwrap_or(self.default_capacity)
    }

    /// Iterate every (class, slot) pair in catalog order
    pub fn all_slots(&self) -> impl Iterator<Item = (&ClassInfo, &SlotInfo)> {
        self.classes
            .iter()
            .flat_map(|c| c.slots.iter().map(move |s| (c, s)))
    }
}

impl Default for ClassCatalog {
    /// Built-in catalog matching the deployed kids baking class event
    fn default() -> Self {
        Self {
            classes: vec![
                ClassInfo {
                    id: "chewy-cookie".into(),
                    name: "두바이쫀득쿠키".into(),
                    age: AgeRange { min: 6, max: 13 },
                    slots: vec![
                        SlotInfo {
                            id: "0228-1100".into(),
                            label: "2월 28일 (토) 11:00 - 12:30".into(),
                        },
                        SlotInfo {
                            id: "0301-1100".into(),
                            label: "3월 1일 (일) 11:00 - 12:30".into(),
                        },
                        SlotInfo {
                            id: "0302-1100".into(),
                            label: "3월 2일 (월) 11:00 - 12:30".into(),
                        },
                    ],
                },
                ClassInfo {
                    id: "choco-cake".into(),
                    name: "두바이초콜릿케이크".into(),
                    age: AgeRange { min: 6, max: 13 },
                    slots: vec![
                        SlotInfo {
                            id: "0228-1500".into(),
                            label: "2월 28일 (토) 15:00 - 16:30".into(),
                        },
                        SlotInfo {
                            id: "0301-1500".into(),
                            label: "3월 1일 (일) 15:00 - 16:30".into(),
                        },
                        SlotInfo {
                            id: "0302-1500".into(),
                            label: "3월 2일 (월) 15:00 - 16:30".into(),
                        },
                    ],
                },
            ],
            default_capacity: DEFAULT_SLOT_CAPACITY,
            capacity_overrides: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_valid() {
        let catalog = ClassCatalog::default();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.classes.len(), 2);
        assert_eq!(catalog.all_slots().count(), 6);
    }

    #[test]
    fn effective_capacity_falls_back_to_uniform_constant() {
        let catalog = ClassCatalog::default();
        assert_eq!(catalog.effective_capacity("0228-1100"), 6);
    }

    #[test]
    fn effective_capacity_honors_override() {
        let mut catalog = ClassCatalog::default();
        catalog.capacity_overrides.insert("0228-1100".into(), 2);
        catalog.capacity_overrides.insert("0301-1100".into(), 0);
        assert_eq!(catalog.effective_capacity("0228-1100"), 2);
        assert_eq!(catalog.effective_capacity("0301-1100"), 0);
        assert_eq!(catalog.effective_capacity("0302-1100"), 6);
    }

    #[test]
    fn age_range_is_inclusive() {
        let age = AgeRange { min: 6, max: 13 };
        assert!(age.contains(6));
        assert!(age.contains(13));
        assert!(!age.contains(5));
        assert!(!age.contains(14));
    }

    #[test]
    fn from_json_accepts_age_override() {
        // Deployments disagree on the bound (6-13 vs 5-12); it is data.
        let json = r#"{
            "classes": [{
                "id": "c1",
                "name": "Class One",
                "age": { "min": 5, "max": 12 },
                "slots": [{ "id": "s1", "label": "Sat 11:00" }]
            }],
            "default_capacity": 6,
            "capacity_overrides": { "s1": 2 }
        }"#;
        let catalog = ClassCatalog::from_json(json).unwrap();
        assert_eq!(catalog.class("c1").unwrap().age, AgeRange { min: 5, max: 12 });
        assert_eq!(catalog.effective_capacity("s1"), 2);
    }

    #[test]
    fn from_json_rejects_duplicate_slot_ids() {
        let json = r#"{
            "classes": [
                {
                    "id": "c1", "name": "One",
                    "age": { "min": 6, "max": 13 },
                    "slots": [{ "id": "s1", "label": "a" }]
                },
                {
                    "id": "c2", "name": "Two",
                    "age": { "min": 6, "max": 13 },
                    "slots": [{ "id": "s1", "label": "b" }]
                }
            ]
        }"#;
        assert!(matches!(
            ClassCatalog::from_json(json),
            Err(CatalogError::Invalid(_))
        ));
    }

    #[test]
    fn from_json_rejects_override_for_unknown_slot() {
        let json = r#"{
            "classes": [{
                "id": "c1", "name": "One",
                "age": { "min": 6, "max": 13 },
                "slots": [{ "id": "s1", "label": "a" }]
            }],
            "capacity_overrides": { "nope": 3 }
        }"#;
        assert!(matches!(
            ClassCatalog::from_json(json),
            Err(CatalogError::Invalid(_))
        ));
    }

    #[test]
    fn slot_lookup_is_scoped_to_class() {
        let catalog = ClassCatalog::default();
        let cookie = catalog.class("chewy-cookie").unwrap();
        assert!(cookie.has_slot("0228-1100"));
        assert!(!cookie.has_slot("0228-1500")); // belongs to choco-cake
    }
}
