//! # Project Data Structures
//!
//! The `Project` struct is the root container for a set of section
//! calculations. Projects serialize to `.rcp` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: GlobalSettings (default sample count)
//! └── items: HashMap<Uuid, CalculationItem> (all calculations)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rc_core::project::Project;
//!
//! let project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("25-042"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::interaction::DEFAULT_SAMPLES;
use crate::calculations::{CalculationItem, InteractionInput};

/// Current schema version for .rcp files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Items are stored in a flat UUID-keyed map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Global settings (sweep defaults)
    pub settings: GlobalSettings,

    /// All calculation items, keyed by UUID
    pub items: HashMap<Uuid, CalculationItem>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rc_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a calculation item to the project.
    ///
    /// Returns the UUID assigned to the item.
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a calculation item by UUID.
    ///
    /// Returns the removed item if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    /// Get a calculation item by UUID.
    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Get a mutable reference to a calculation item by UUID.
    ///
    /// Marks the project as modified when the item exists.
    pub fn get_item_mut(&mut self, id: &Uuid) -> Option<&mut CalculationItem> {
        if self.items.contains_key(id) {
            self.meta.modified = Utc::now();
            self.items.get_mut(id)
        } else {
            None
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// All interaction diagram inputs, sorted by label.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rc_core::project::Project;
    ///
    /// let project = Project::new("Engineer", "25-001", "Client");
    /// assert!(project.interaction_items().is_empty());
    /// ```
    pub fn interaction_items(&self) -> Vec<(Uuid, &InteractionInput)> {
        let mut items: Vec<_> = self
            .items
            .iter()
            .filter_map(|(id, item)| match item {
                CalculationItem::Interaction(input) => Some((*id, input)),
                _ => None,
            })
            .collect();
        items.sort_by(|a, b| a.1.label.cmp(&b.1.label));
        items
    }

    /// Copy of `input` with unset sweep fields filled from the project settings.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rc_core::project::Project;
    /// # use rc_core::calculations::InteractionInput;
    /// # let json = r#"{
    /// #   "label": "C-1",
    /// #   "section": { "width_mm": 300.0, "depth_mm": 500.0 },
    /// #   "concrete": { "name": "C30/37", "fck_mpa": 30.0 },
    /// #   "steel": { "name": "B500B", "fyk_mpa": 500.0 }
    /// # }"#;
    /// # let input: InteractionInput = serde_json::from_str(json).unwrap();
    ///
    /// let mut project = Project::default();
    /// project.settings.samples = 40;
    /// assert_eq!(project.with_defaults(&input).samples, Some(40));
    /// ```
    pub fn with_defaults(&self, input: &InteractionInput) -> InteractionInput {
        let mut input = input.clone();
        input.samples = input.samples.or(Some(self.settings.samples));
        input
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

fn default_samples() -> usize {
    DEFAULT_SAMPLES
}

/// Global project settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Neutral axis positions for diagrams that do not set their own
    #[serde(default = "default_samples")]
    pub samples: usize,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            samples: DEFAULT_SAMPLES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{DesignCode, Material};
    use crate::rebar::RebarLayout;
    use crate::section::SectionGeometry;

    fn sample_input(label: &str) -> InteractionInput {
        InteractionInput {
            label: label.to_string(),
            section: SectionGeometry::new(300.0, 500.0, Some(30.0)).unwrap(),
            layout: RebarLayout::builder()
                .add_group(16.0, 4, 50.0)
                .and_then(|b| b.add_group(20.0, 4, 450.0))
                .unwrap()
                .build(),
            concrete: Material::concrete("C30/37", 30.0, DesignCode::Eurocode).unwrap(),
            steel: Material::steel("B500B", 500.0, DesignCode::Eurocode).unwrap(),
            samples: Some(20),
            policy: Default::default(),
            stress_block: Default::default(),
            steel_law: Default::default(),
        }
    }

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.job_id, "25-001");
        assert_eq!(project.meta.client, "Acme Corp");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.settings.samples, 100);
    }

    #[test]
    fn test_project_serialization() {
        let project = Project::new("Jane Engineer", "25-042", "Test Client");
        let json = serde_json::to_string_pretty(&project).unwrap();

        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("25-042"));
        assert!(json.contains("\"samples\": 100"));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.engineer, "Jane Engineer");
    }

    #[test]
    fn test_add_remove_item() {
        let mut project = Project::new("Engineer", "25-001", "Client");

        let id = project.add_item(CalculationItem::Interaction(sample_input("C-1")));
        assert_eq!(project.item_count(), 1);
        assert_eq!(project.get_item(&id).map(|i| i.label()), Some("C-1"));

        let removed = project.remove_item(&id);
        assert!(removed.is_some());
        assert_eq!(project.item_count(), 0);
        assert!(project.remove_item(&id).is_none());
    }

    #[test]
    fn test_interaction_items_sorted() {
        let mut project = Project::default();
        project.add_item(CalculationItem::Interaction(sample_input("C-2")));
        project.add_item(CalculationItem::Interaction(sample_input("C-1")));

        let labels: Vec<_> = project
            .interaction_items()
            .iter()
            .map(|(_, input)| input.label.clone())
            .collect();
        assert_eq!(labels, vec!["C-1", "C-2"]);
    }

    #[test]
    fn test_settings_samples_fill_unset_items() {
        let mut project = Project::default();
        project.settings.samples = 30;

        let mut unset = sample_input("C-1");
        unset.samples = None;
        let filled = project.with_defaults(&unset);
        assert_eq!(filled.samples, Some(30));
        assert_eq!(crate::calculations::calculate(&filled).unwrap().len(), 30);

        // An item's own sample count wins over the setting
        assert_eq!(project.with_defaults(&sample_input("C-2")).samples, Some(20));
    }

    #[test]
    fn test_settings_ignore_legacy_design_code() {
        let settings: GlobalSettings =
            serde_json::from_str(r#"{ "design_code": "EUROCODE", "samples": 60 }"#).unwrap();
        assert_eq!(settings.samples, 60);
    }

    #[test]
    fn test_settings_defaults_when_missing() {
        let settings: GlobalSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, GlobalSettings::default());
    }
}
