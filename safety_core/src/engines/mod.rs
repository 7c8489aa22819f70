//! # Assessment Engines
//!
//! This module contains all safety assessment engine types. Each engine
//! follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Assessment results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, SafetyError>` - Pure pipeline
//!   running validate, compute, classify and recommend in order
//!
//! Engines are independent leaves over immutable reference tables: no engine
//! calls another, and repeated invocations never interact.
//!
//! ## Available Engines
//!
//! - [`fall_protection`] - Fall clearance, impact force, anchor strength
//! - [`heat_stress`] - WBGT, work-rest scheduling, hydration
//! - [`incident_rate`] - TRIR/DART/LTIFR statistics and benchmarks
//! - [`noise_exposure`] - OSHA noise dose and hearing protection
//! - [`ppe_selection`] - Hazard-driven equipment selection
//! - [`training_needs`] - Regulatory training hours, cost and ROI

pub mod fall_protection;
pub mod heat_stress;
pub mod incident_rate;
pub mod noise_exposure;
pub mod ppe_selection;
pub mod training_needs;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use fall_protection::{FallProtectionInput, FallProtectionResult};
pub use heat_stress::{HeatStressInput, HeatStressResult};
pub use incident_rate::{IncidentRateInput, IncidentRateResult};
pub use noise_exposure::{NoiseExposureInput, NoiseExposureResult};
pub use ppe_selection::{PpeSelectionInput, PpeSelectionResult};
pub use training_needs::{TrainingNeedsInput, TrainingNeedsResult};

/// Enum wrapper for all assessment input types.
///
/// This allows storing heterogeneous assessments in a single collection
/// while maintaining type safety and clean serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AssessmentItem {
    /// Fall protection clearance and impact-force assessment
    FallProtection(FallProtectionInput),
    /// Heat stress exposure assessment
    HeatStress(HeatStressInput),
    /// Injury statistics and benchmark comparison
    IncidentRate(IncidentRateInput),
    /// Noise dose assessment
    NoiseExposure(NoiseExposureInput),
    /// Hazard-driven PPE selection
    PpeSelection(PpeSelectionInput),
    /// Training requirements and ROI analysis
    TrainingNeeds(TrainingNeedsInput),
}

impl AssessmentItem {
    /// Get the engine type as a string
    pub fn engine_type(&self) -> &'static str {
        match self {
            AssessmentItem::FallProtection(_) => "FallProtection",
            AssessmentItem::HeatStress(_) => "HeatStress",
            AssessmentItem::IncidentRate(_) => "IncidentRate",
            AssessmentItem::NoiseExposure(_) => "NoiseExposure",
            AssessmentItem::PpeSelection(_) => "PpeSelection",
            AssessmentItem::TrainingNeeds(_) => "TrainingNeeds",
        }
    }
}
