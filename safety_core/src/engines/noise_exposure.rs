//! # Noise Exposure Assessment
//!
//! Computes the OSHA noise dose for a work shift and the effect of hearing
//! protection on it.
//!
//! ## Dose model
//!
//! OSHA's permissible exposure time halves for every 3 dB above the 85 dB
//! action level:
//!
//! ```text
//! T = 8 / 2^((L - 85) / 3)        hours
//! dose% = duration / T x 100
//! TWA = 85 + 3 * log2(dose / 100)  dB
//! ```
//!
//! Hearing protection subtracts the protector's rating from the exposure
//! level (floored at 0 dB) and the dose is recomputed at the protected
//! level; protection is "effective" when the protected dose is under 100%.
//!
//! ## Example
//!
//! ```rust
//! use safety_core::engines::noise_exposure::{calculate, NoiseExposureInput};
//!
//! let input = NoiseExposureInput {
//!     noise_level_db: 100.0,
//!     exposure_duration_hr: 2.0,
//!     work_days_per_week: None,
//!     hearing_protection: true,
//!     protection_rating_db: Some(25.0),
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.daily_dose_pct - 800.0).abs() < 1e-9);
//! assert!(result.protection_effective);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{SafetyError, SafetyResult};

/// OSHA action level (dB) at which an 8-hour exposure reaches 100% dose
const ACTION_LEVEL_DB: f64 = 85.0;

/// Exchange rate: dose doubles every 3 dB
const EXCHANGE_RATE_DB: f64 = 3.0;

/// Reference shift length (hours)
const REFERENCE_SHIFT_HR: f64 = 8.0;

/// Standard work week used for the weekly permissible dose
const STANDARD_WORK_DAYS: f64 = 5.0;

/// Reference sound levels for common environments (dB, description).
pub const NOISE_LEVEL_EXAMPLES: [(f64, &str); 7] = [
    (30.0, "Whisper, quiet library"),
    (60.0, "Normal conversation"),
    (85.0, "OSHA Action Level (8 hours)"),
    (90.0, "OSHA PEL (8 hours)"),
    (100.0, "Power tools, lawn mower"),
    (115.0, "Rock concert, chainsaw"),
    (140.0, "Jet engine (pain threshold)"),
];

/// Input parameters for a noise exposure assessment.
///
/// ## JSON Example
///
/// ```json
/// {
///   "noise_level_db": 95.0,
///   "exposure_duration_hr": 4.0,
///   "work_days_per_week": 5,
///   "hearing_protection": true,
///   "protection_rating_db": 25.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseExposureInput {
    /// Measured sound level at the worker's position (dB)
    pub noise_level_db: f64,

    /// Hours exposed per day
    pub exposure_duration_hr: f64,

    /// Work days per week; defaults to 5
    pub work_days_per_week: Option<u32>,

    /// Whether hearing protection is worn
    pub hearing_protection: bool,

    /// Noise reduction rating of the protector (dB); defaults to 0
    pub protection_rating_db: Option<f64>,
}

impl NoiseExposureInput {
    /// Work days with the documented default applied
    pub fn work_days_per_week(&self) -> u32 {
        self.work_days_per_week.unwrap_or(5)
    }

    /// Protection rating with the documented default applied
    pub fn protection_rating_db(&self) -> f64 {
        self.protection_rating_db.unwrap_or(0.0)
    }

    /// Validate input parameters.
    ///
    /// Checks run in declared field order and stop at the first failure.
    pub fn validate(&self) -> SafetyResult<()> {
        if !(50.0..=140.0).contains(&self.noise_level_db) {
            return Err(SafetyError::invalid_input(
                "noise_level_db",
                self.noise_level_db.to_string(),
                "Noise level must be between 50 and 140 dB",
            ));
        }
        if self.exposure_duration_hr <= 0.0 || self.exposure_duration_hr > 24.0 {
            return Err(SafetyError::invalid_input(
                "exposure_duration_hr",
                self.exposure_duration_hr.to_string(),
                "Exposure duration must be between 0.1 and 24 hours",
            ));
        }
        if let Some(days) = self.work_days_per_week {
            if !(1..=7).contains(&days) {
                return Err(SafetyError::invalid_input(
                    "work_days_per_week",
                    days.to_string(),
                    "Work days must be between 1 and 7",
                ));
            }
        }
        if let Some(rating) = self.protection_rating_db {
            if rating < 0.0 {
                return Err(SafetyError::invalid_input(
                    "protection_rating_db",
                    rating.to_string(),
                    "Protection rating cannot be negative",
                ));
            }
        }
        Ok(())
    }
}

/// Administrative response required at each dose band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionRequired {
    None,
    Recommended,
    Required,
}

/// Noise dose risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NoiseRiskLevel {
    Low,
    Moderate,
    High,
}

impl NoiseRiskLevel {
    /// All risk variants, ordered by severity
    pub const ALL: [NoiseRiskLevel; 3] = [
        NoiseRiskLevel::Low,
        NoiseRiskLevel::Moderate,
        NoiseRiskLevel::High,
    ];

    /// Band a daily dose percentage: <=50 Low, <=100 Moderate, over High.
    pub fn from_dose(dose_pct: f64) -> Self {
        if dose_pct <= 50.0 {
            NoiseRiskLevel::Low
        } else if dose_pct <= 100.0 {
            NoiseRiskLevel::Moderate
        } else {
            NoiseRiskLevel::High
        }
    }

    /// Severity rank (1 = lowest)
    pub fn severity(&self) -> u8 {
        match self {
            NoiseRiskLevel::Low => 1,
            NoiseRiskLevel::Moderate => 2,
            NoiseRiskLevel::High => 3,
        }
    }

    /// Administrative action required at this band
    pub fn action_required(&self) -> ActionRequired {
        match self {
            NoiseRiskLevel::Low => ActionRequired::None,
            NoiseRiskLevel::Moderate => ActionRequired::Recommended,
            NoiseRiskLevel::High => ActionRequired::Required,
        }
    }

    /// Fixed recommendation set for this band
    pub fn recommendations(&self) -> Vec<String> {
        let items: &[&str] = match self {
            NoiseRiskLevel::Low => &[
                "Noise levels are acceptable",
                "Continue routine monitoring",
                "Maintain hearing conservation program",
            ],
            NoiseRiskLevel::Moderate => &[
                "Consider implementing engineering controls",
                "Provide hearing protection",
                "Conduct annual audiometric testing",
            ],
            NoiseRiskLevel::High => &[
                "Implement engineering controls immediately",
                "Mandatory hearing protection use",
                "Post warning signs",
                "Conduct quarterly audiometric testing",
                "Implement hearing conservation program",
            ],
        };
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            NoiseRiskLevel::Low => "Low Risk",
            NoiseRiskLevel::Moderate => "Moderate Risk",
            NoiseRiskLevel::High => "High Risk",
        }
    }
}

impl std::fmt::Display for NoiseRiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Results from a noise exposure assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseExposureResult {
    // === Echoed Input ===
    /// Measured sound level (dB)
    pub noise_level_db: f64,
    /// Hours exposed per day
    pub exposure_duration_hr: f64,
    /// Work days per week used, after defaulting
    pub work_days_per_week: u32,
    /// Whether hearing protection is worn
    pub hearing_protection: bool,
    /// Protection rating used, after defaulting (dB)
    pub protection_rating_db: f64,

    // === Derived Metrics ===
    /// Permissible exposure time at the measured level (hours)
    pub permissible_exposure_hr: f64,
    /// Daily noise dose (%)
    pub daily_dose_pct: f64,
    /// Weekly dose relative to a 5-day permissible week (%)
    pub weekly_dose_pct: f64,
    /// Time-weighted average exposure (dB)
    pub twa_db: f64,
    /// Exposure level behind the protector (dB)
    pub protected_level_db: f64,
    /// Daily dose at the protected level (%)
    pub protected_dose_pct: f64,
    /// True when the protected dose is under 100%
    pub protection_effective: bool,

    // === Classification ===
    /// Risk band on the unprotected daily dose
    pub risk_level: NoiseRiskLevel,
    /// Severity rank of the band (1 = lowest)
    pub severity: u8,
    /// Administrative action required
    pub action_required: ActionRequired,

    // === Recommendations ===
    /// Fixed recommendation set for the risk band
    pub recommendations: Vec<String>,
}

/// Permissible exposure time at a sound level, per the OSHA 3 dB
/// doubling-rate formula.
pub fn permissible_exposure_hr(level_db: f64) -> f64 {
    REFERENCE_SHIFT_HR / 2f64.powf((level_db - ACTION_LEVEL_DB) / EXCHANGE_RATE_DB)
}

/// Run a noise exposure assessment.
///
/// Pure function; identical inputs produce identical results.
pub fn calculate(input: &NoiseExposureInput) -> SafetyResult<NoiseExposureResult> {
    input.validate()?;

    let work_days = input.work_days_per_week();
    let rating = input.protection_rating_db();

    let permissible = permissible_exposure_hr(input.noise_level_db);
    let daily_dose = input.exposure_duration_hr / permissible * 100.0;

    let weekly_exposure = input.exposure_duration_hr * work_days as f64;
    let weekly_permissible = permissible * STANDARD_WORK_DAYS;
    let weekly_dose = weekly_exposure / weekly_permissible * 100.0;

    // Protection derating: subtract the rating, floor at 0 dB, re-run the
    // dose model at the protected level
    let (protected_level, protected_dose, protection_effective) =
        if input.hearing_protection && rating > 0.0 {
            let level = (input.noise_level_db - rating).max(0.0);
            let dose = input.exposure_duration_hr / permissible_exposure_hr(level) * 100.0;
            (level, dose, dose < 100.0)
        } else {
            (input.noise_level_db, daily_dose, false)
        };

    let twa = ACTION_LEVEL_DB + EXCHANGE_RATE_DB * (daily_dose / 100.0).log2();

    let risk_level = NoiseRiskLevel::from_dose(daily_dose);

    Ok(NoiseExposureResult {
        noise_level_db: input.noise_level_db,
        exposure_duration_hr: input.exposure_duration_hr,
        work_days_per_week: work_days,
        hearing_protection: input.hearing_protection,
        protection_rating_db: rating,
        permissible_exposure_hr: permissible,
        daily_dose_pct: daily_dose,
        weekly_dose_pct: weekly_dose,
        twa_db: twa,
        protected_level_db: protected_level,
        protected_dose_pct: protected_dose,
        protection_effective,
        risk_level,
        severity: risk_level.severity(),
        action_required: risk_level.action_required(),
        recommendations: risk_level.recommendations(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loud_short_exposure() -> NoiseExposureInput {
        NoiseExposureInput {
            noise_level_db: 100.0,
            exposure_duration_hr: 2.0,
            work_days_per_week: None,
            hearing_protection: false,
            protection_rating_db: None,
        }
    }

    #[test]
    fn test_worked_dose_scenario() {
        let result = calculate(&loud_short_exposure()).unwrap();
        // T = 8 / 2^(15/3) = 0.25 h
        assert!((result.permissible_exposure_hr - 0.25).abs() < 1e-9);
        // dose = 2 / 0.25 * 100 = 800%
        assert!((result.daily_dose_pct - 800.0).abs() < 1e-9);
        assert_eq!(result.risk_level, NoiseRiskLevel::High);
        assert_eq!(result.action_required, ActionRequired::Required);
    }

    #[test]
    fn test_twa() {
        let result = calculate(&loud_short_exposure()).unwrap();
        // TWA = 85 + 3 * log2(8) = 94 dB
        assert!((result.twa_db - 94.0).abs() < 1e-9);
    }

    #[test]
    fn test_action_level_full_shift_is_exactly_100_percent() {
        let input = NoiseExposureInput {
            noise_level_db: 85.0,
            exposure_duration_hr: 8.0,
            work_days_per_week: Some(5),
            hearing_protection: false,
            protection_rating_db: None,
        };
        let result = calculate(&input).unwrap();
        assert!((result.permissible_exposure_hr - 8.0).abs() < 1e-9);
        assert!((result.daily_dose_pct - 100.0).abs() < 1e-9);
        // 100% sits at the top of the Moderate band
        assert_eq!(result.risk_level, NoiseRiskLevel::Moderate);
        assert!((result.twa_db - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_dose_bands() {
        assert_eq!(NoiseRiskLevel::from_dose(50.0), NoiseRiskLevel::Low);
        assert_eq!(NoiseRiskLevel::from_dose(50.01), NoiseRiskLevel::Moderate);
        assert_eq!(NoiseRiskLevel::from_dose(100.0), NoiseRiskLevel::Moderate);
        assert_eq!(NoiseRiskLevel::from_dose(100.01), NoiseRiskLevel::High);
    }

    #[test]
    fn test_weekly_dose_scaling() {
        let mut input = loud_short_exposure();
        input.work_days_per_week = Some(6);
        let result = calculate(&input).unwrap();
        // weekly = (2*6) / (0.25*5) * 100 = 960%
        assert!((result.weekly_dose_pct - 960.0).abs() < 1e-9);
    }

    #[test]
    fn test_hearing_protection_derating() {
        let input = NoiseExposureInput {
            noise_level_db: 100.0,
            exposure_duration_hr: 2.0,
            work_days_per_week: None,
            hearing_protection: true,
            protection_rating_db: Some(25.0),
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.protected_level_db, 75.0);
        // T at 75 dB = 8 / 2^(-10/3) = 80.63 h; dose = 2/80.63*100 = 2.48%
        assert!(result.protected_dose_pct < 100.0);
        assert!(result.protection_effective);
        // Unprotected dose and band are unchanged
        assert!((result.daily_dose_pct - 800.0).abs() < 1e-9);
        assert_eq!(result.risk_level, NoiseRiskLevel::High);
    }

    #[test]
    fn test_protection_ignored_without_rating() {
        let input = NoiseExposureInput {
            noise_level_db: 100.0,
            exposure_duration_hr: 2.0,
            work_days_per_week: None,
            hearing_protection: true,
            protection_rating_db: None,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.protected_level_db, 100.0);
        assert!(!result.protection_effective);
    }

    #[test]
    fn test_protected_level_floored_at_zero() {
        let input = NoiseExposureInput {
            noise_level_db: 50.0,
            exposure_duration_hr: 1.0,
            work_days_per_week: None,
            hearing_protection: true,
            protection_rating_db: Some(80.0),
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.protected_level_db, 0.0);
        assert!(result.protection_effective);
    }

    #[test]
    fn test_band_recommendation_sets() {
        assert_eq!(NoiseRiskLevel::Low.recommendations().len(), 3);
        assert_eq!(NoiseRiskLevel::Moderate.recommendations().len(), 3);
        assert_eq!(NoiseRiskLevel::High.recommendations().len(), 5);
        assert!(NoiseRiskLevel::High.recommendations()[0].contains("engineering controls"));
    }

    #[test]
    fn test_level_out_of_range() {
        let mut input = loud_short_exposure();
        input.noise_level_db = 145.0;
        let err = calculate(&input).unwrap_err();
        assert!(err.to_string().contains("noise_level_db"));

        input.noise_level_db = 45.0;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_duration_out_of_range() {
        let mut input = loud_short_exposure();
        input.exposure_duration_hr = 0.0;
        assert!(calculate(&input).is_err());
        input.exposure_duration_hr = 25.0;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_reference_examples_table() {
        assert_eq!(NOISE_LEVEL_EXAMPLES.len(), 7);
        assert_eq!(NOISE_LEVEL_EXAMPLES[2].0, 85.0);
        assert!(NOISE_LEVEL_EXAMPLES[6].1.contains("Jet engine"));
    }

    #[test]
    fn test_determinism() {
        let input = loud_short_exposure();
        let first = serde_json::to_string(&calculate(&input).unwrap()).unwrap();
        let second = serde_json::to_string(&calculate(&input).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let result = calculate(&loud_short_exposure()).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("daily_dose_pct"));
        assert!(json.contains("action_required"));
        let roundtrip: NoiseExposureResult = serde_json::from_str(&json).unwrap();
        assert!((result.twa_db - roundtrip.twa_db).abs() < 1e-9);
    }
}
