//! # Assessment Data Structures
//!
//! The `Assessment` struct is the root container for a set of calculator
//! inputs covering one worksite review. Assessments serialize to
//! human-readable JSON documents.
//!
//! Engine results are deliberately not stored here: each result record is
//! constructed fresh per calculation invocation by the owning engine and
//! discarded when the next calculation runs. The container only carries the
//! inputs, so a saved assessment can be re-run and will reproduce the same
//! results.
//!
//! ## Structure
//!
//! ```text
//! Assessment
//! ├── meta: AssessmentMetadata (version, assessor, site, timestamps)
//! └── items: HashMap<Uuid, AssessmentItem> (all calculator inputs)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use safety_core::assessment::Assessment;
//!
//! let assessment = Assessment::new("Jane Reviewer", "SITE-042", "North Yard");
//!
//! // Serialize to JSON
//! let json = serde_json::to_string_pretty(&assessment).unwrap();
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engines::AssessmentItem;

/// Current schema version for assessment documents
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root assessment container.
///
/// Items are stored in a flat UUID-keyed map for O(1) lookups and stable
/// references when items are reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// Assessment metadata (version, assessor, site info)
    pub meta: AssessmentMetadata,

    /// All calculator inputs, keyed by UUID
    pub items: HashMap<Uuid, AssessmentItem>,
}

impl Assessment {
    /// Create a new empty assessment.
    ///
    /// # Arguments
    ///
    /// * `assessor` - Name of the responsible safety professional
    /// * `reference` - Assessment reference number (e.g., "SITE-042")
    /// * `site` - Worksite name
    ///
    /// # Example
    ///
    /// ```rust
    /// use safety_core::assessment::Assessment;
    ///
    /// let assessment = Assessment::new("John Doe", "SITE-001", "Main Plant");
    /// assert_eq!(assessment.meta.assessor, "John Doe");
    /// ```
    pub fn new(
        assessor: impl Into<String>,
        reference: impl Into<String>,
        site: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Assessment {
            meta: AssessmentMetadata {
                version: SCHEMA_VERSION.to_string(),
                assessor: assessor.into(),
                reference: reference.into(),
                site: site.into(),
                created: now,
                modified: now,
            },
            items: HashMap::new(),
        }
    }

    /// Add a calculator input to the assessment.
    ///
    /// Returns the UUID assigned to the item.
    pub fn add_item(&mut self, item: AssessmentItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove an item by UUID.
    ///
    /// Returns the removed item if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<AssessmentItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    /// Get an item by UUID.
    pub fn get_item(&self, id: &Uuid) -> Option<&AssessmentItem> {
        self.items.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Number of items in the assessment.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl Default for Assessment {
    fn default() -> Self {
        Assessment::new("", "", "")
    }
}

/// Assessment metadata stored in the document header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible safety professional
    pub assessor: String,

    /// Assessment reference number
    pub reference: String,

    /// Worksite name
    pub site: String,

    /// When the assessment was created
    pub created: DateTime<Utc>,

    /// When the assessment was last modified
    pub modified: DateTime<Utc>,
}
