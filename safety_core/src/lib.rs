//! # safety_core - Workplace Safety Assessment Engine
//!
//! `safety_core` is the computational heart of SiteGuard, providing workplace
//! safety-compliance calculations with a clean, LLM-friendly API. All inputs
//! and outputs are JSON-serializable, making it ideal for integration with AI
//! assistants via MCP or similar protocols.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Immutable Reference Data**: Regulatory tables are compiled in and
//!   never mutated at runtime
//!
//! ## Quick Start
//!
//! ```rust
//! use safety_core::engines::noise_exposure::{NoiseExposureInput, calculate};
//!
//! let input = NoiseExposureInput {
//!     noise_level_db: 95.0,
//!     exposure_duration_hr: 4.0,
//!     work_days_per_week: None,
//!     hearing_protection: false,
//!     protection_rating_db: None,
//! };
//!
//! let result = calculate(&input).unwrap();
//! println!("Daily dose: {:.1}%", result.daily_dose_pct);
//! ```
//!
//! ## Modules
//!
//! - [`assessment`] - Assessment container, metadata, and item registry
//! - [`engines`] - All assessment engine types (fall protection, heat
//!   stress, incident rate, noise exposure, PPE selection, training needs)
//! - [`industries`] - Industry classification and benchmark data
//! - [`compliance`] - Shared compliance report type
//! - [`errors`] - Structured error types

pub mod assessment;
pub mod compliance;
pub mod engines;
pub mod errors;
pub mod industries;

// Re-export commonly used types at crate root for convenience
pub use compliance::ComplianceReport;
pub use errors::{SafetyError, SafetyResult};
pub use assessment::{Assessment, AssessmentMetadata};
pub use industries::Industry;
