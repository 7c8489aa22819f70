//! # Heat Stress Assessment
//!
//! Evaluates environmental heat exposure using WBGT and the Rothfusz heat
//! index, derives an ACGIH-style work-rest schedule and a hydration plan,
//! and classifies risk with acclimatization adjustments.
//!
//! ## WBGT
//!
//! When a globe-thermometer reading is supplied the indoor form is used:
//!
//! ```text
//! WBGT = 0.7 * wet_bulb + 0.3 * globe
//! ```
//!
//! Without one, the globe temperature is estimated from dry bulb plus a
//! solar-load offset and the outdoor form is used:
//!
//! ```text
//! WBGT = 0.7 * wet_bulb + 0.2 * est_globe + 0.1 * dry_bulb
//! ```
//!
//! ## Work-rest schedule
//!
//! The schedule is an ordered pipeline of named steps, each independently
//! testable: WBGT banding, then the work-intensity adjustment, then the
//! acclimatization adjustment. Work percentage is clamped to [0, 100] after
//! every step.
//!
//! ## Example
//!
//! ```rust
//! use safety_core::engines::heat_stress::{
//!     calculate, Acclimatization, ClothingType, HeatStressInput, SolarLoad,
//!     WorkIntensity,
//! };
//!
//! let input = HeatStressInput {
//!     dry_bulb_c: 32.0,
//!     wet_bulb_c: 26.0,
//!     globe_temp_c: None,
//!     relative_humidity_pct: 60.0,
//!     wind_speed_ms: None,
//!     solar_load: SolarLoad::Medium,
//!     work_intensity: WorkIntensity::Moderate,
//!     clothing: ClothingType::Coveralls,
//!     acclimatization: Acclimatization::Acclimatized,
//! };
//!
//! let result = calculate(&input).unwrap();
//! println!("WBGT: {:.1} C, work {}%", result.wbgt_c, result.work_rest.work_pct);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::compliance::ComplianceReport;
use crate::errors::{SafetyError, SafetyResult};

/// Assumed work shift length (hours)
const SHIFT_HOURS: f64 = 8.0;

/// Recommended fluid intake as a multiple of fluid loss
const INTAKE_MULTIPLIER: f64 = 1.5;

/// Pre-shift hydration volume (liters)
const PRE_SHIFT_INTAKE_L: f64 = 0.5;

// Rothfusz regression coefficients (Celsius form)
const HI_C1: f64 = -8.78469475556;
const HI_C2: f64 = 1.61139411;
const HI_C3: f64 = 2.33854883889;
const HI_C4: f64 = -0.14611605;
const HI_C5: f64 = -0.012308094;
const HI_C6: f64 = -0.0164248277778;
const HI_C7: f64 = 0.002211732;
const HI_C8: f64 = 0.00072546;
const HI_C9: f64 = -0.000003582;

/// Solar load category used to estimate globe temperature outdoors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SolarLoad {
    /// Direct sun: globe estimated 10 C above dry bulb
    High,
    /// Partial sun or haze: +5 C
    Medium,
    /// Shade or overcast: no offset
    #[default]
    None,
}

impl SolarLoad {
    /// All solar load variants for UI selection
    pub const ALL: [SolarLoad; 3] = [SolarLoad::High, SolarLoad::Medium, SolarLoad::None];

    /// Estimated globe-temperature offset above dry bulb (C)
    pub fn globe_offset_c(&self) -> f64 {
        match self {
            SolarLoad::High => 10.0,
            SolarLoad::Medium => 5.0,
            SolarLoad::None => 0.0,
        }
    }
}

/// Metabolic work intensity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WorkIntensity {
    Light,
    #[default]
    Moderate,
    Heavy,
    VeryHeavy,
}

impl WorkIntensity {
    /// All intensity variants for UI selection
    pub const ALL: [WorkIntensity; 4] = [
        WorkIntensity::Light,
        WorkIntensity::Moderate,
        WorkIntensity::Heavy,
        WorkIntensity::VeryHeavy,
    ];

    /// Base sweat rate (L/hr) before the clothing factor.
    ///
    /// Each band has an intercept and a WBGT slope term.
    pub fn base_sweat_rate(&self, wbgt_c: f64) -> f64 {
        match self {
            WorkIntensity::Light => 0.3 + wbgt_c * 0.01,
            WorkIntensity::Moderate => 0.5 + wbgt_c * 0.02,
            WorkIntensity::Heavy => 0.8 + wbgt_c * 0.03,
            WorkIntensity::VeryHeavy => 1.2 + wbgt_c * 0.04,
        }
    }

    /// True for the heavy bands that reduce allowable work time
    pub fn is_heavy(&self) -> bool {
        matches!(self, WorkIntensity::Heavy | WorkIntensity::VeryHeavy)
    }

    /// Contribution to the composite risk score
    pub fn risk_bonus(&self) -> f64 {
        match self {
            WorkIntensity::Heavy => 5.0,
            WorkIntensity::VeryHeavy => 10.0,
            _ => 0.0,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            WorkIntensity::Light => "Light",
            WorkIntensity::Moderate => "Moderate",
            WorkIntensity::Heavy => "Heavy",
            WorkIntensity::VeryHeavy => "Very Heavy",
        }
    }
}

impl std::fmt::Display for WorkIntensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Clothing ensemble worn during work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ClothingType {
    /// Ordinary work clothes, no additional burden
    #[default]
    None,
    Coveralls,
    Impermeable,
    DoubleLayer,
    ChemicalProtective,
}

impl ClothingType {
    /// All clothing variants for UI selection
    pub const ALL: [ClothingType; 5] = [
        ClothingType::None,
        ClothingType::Coveralls,
        ClothingType::Impermeable,
        ClothingType::DoubleLayer,
        ClothingType::ChemicalProtective,
    ];

    /// Sweat-rate multiplier for this ensemble
    pub fn factor(&self) -> f64 {
        match self {
            ClothingType::None => 1.0,
            ClothingType::Coveralls => 1.3,
            ClothingType::Impermeable => 1.5,
            ClothingType::DoubleLayer => 1.8,
            ClothingType::ChemicalProtective => 2.0,
        }
    }
}

/// Worker acclimatization state.
///
/// Defaults to `Unacclimatized`, the conservative assumption for new or
/// returning workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Acclimatization {
    Acclimatized,
    #[default]
    Unacclimatized,
}

/// Input parameters for a heat stress assessment.
///
/// Temperatures in Celsius, humidity in percent.
///
/// ## JSON Example
///
/// ```json
/// {
///   "dry_bulb_c": 35.0,
///   "wet_bulb_c": 28.0,
///   "globe_temp_c": null,
///   "relative_humidity_pct": 55.0,
///   "wind_speed_ms": 1.5,
///   "solar_load": "high",
///   "work_intensity": "heavy",
///   "clothing": "coveralls",
///   "acclimatization": "unacclimatized"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatStressInput {
    /// Dry bulb (air) temperature (C)
    pub dry_bulb_c: f64,

    /// Natural wet bulb temperature (C)
    pub wet_bulb_c: f64,

    /// Globe thermometer reading (C), if measured. When absent the globe
    /// temperature is estimated from dry bulb and solar load.
    pub globe_temp_c: Option<f64>,

    /// Relative humidity (0-100 %)
    pub relative_humidity_pct: f64,

    /// Wind speed (m/s); informational, defaults to 0
    pub wind_speed_ms: Option<f64>,

    /// Solar load category (used only when no globe reading is supplied)
    pub solar_load: SolarLoad,

    /// Metabolic work intensity
    pub work_intensity: WorkIntensity,

    /// Clothing ensemble
    pub clothing: ClothingType,

    /// Worker acclimatization state
    pub acclimatization: Acclimatization,
}

impl HeatStressInput {
    /// Validate input parameters.
    ///
    /// Checks run in declared field order and stop at the first failure.
    pub fn validate(&self) -> SafetyResult<()> {
        if !(-20.0..=60.0).contains(&self.dry_bulb_c) {
            return Err(SafetyError::invalid_input(
                "dry_bulb_c",
                self.dry_bulb_c.to_string(),
                "Dry bulb temperature must be between -20 and 60 C",
            ));
        }
        if !(-20.0..=60.0).contains(&self.wet_bulb_c) {
            return Err(SafetyError::invalid_input(
                "wet_bulb_c",
                self.wet_bulb_c.to_string(),
                "Wet bulb temperature must be between -20 and 60 C",
            ));
        }
        if let Some(globe) = self.globe_temp_c {
            if !(-20.0..=100.0).contains(&globe) {
                return Err(SafetyError::invalid_input(
                    "globe_temp_c",
                    globe.to_string(),
                    "Globe temperature must be between -20 and 100 C",
                ));
            }
        }
        if !(0.0..=100.0).contains(&self.relative_humidity_pct) {
            return Err(SafetyError::invalid_input(
                "relative_humidity_pct",
                self.relative_humidity_pct.to_string(),
                "Relative humidity must be between 0 and 100 %",
            ));
        }
        if let Some(wind) = self.wind_speed_ms {
            if wind < 0.0 {
                return Err(SafetyError::invalid_input(
                    "wind_speed_ms",
                    wind.to_string(),
                    "Wind speed cannot be negative",
                ));
            }
        }
        Ok(())
    }
}

/// Heat risk band on the WBGT scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeatRiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl HeatRiskLevel {
    /// All risk variants, ordered by severity
    pub const ALL: [HeatRiskLevel; 5] = [
        HeatRiskLevel::Low,
        HeatRiskLevel::Moderate,
        HeatRiskLevel::High,
        HeatRiskLevel::VeryHigh,
        HeatRiskLevel::Extreme,
    ];

    /// Band a WBGT value.
    ///
    /// Bands are contiguous and total: <=26 Low, <=28 Moderate, <=30 High,
    /// <=32 Very High, otherwise Extreme. Values below the scale clamp into
    /// Low, values above into Extreme.
    pub fn from_wbgt(wbgt_c: f64) -> Self {
        if wbgt_c <= 26.0 {
            HeatRiskLevel::Low
        } else if wbgt_c <= 28.0 {
            HeatRiskLevel::Moderate
        } else if wbgt_c <= 30.0 {
            HeatRiskLevel::High
        } else if wbgt_c <= 32.0 {
            HeatRiskLevel::VeryHigh
        } else {
            HeatRiskLevel::Extreme
        }
    }

    /// Shift the band for acclimatization.
    ///
    /// Acclimatized workers move one band better (Extreme does not improve);
    /// unacclimatized workers move one band worse, capped at Extreme.
    pub fn adjusted_for(&self, acclimatization: Acclimatization) -> Self {
        match acclimatization {
            Acclimatization::Acclimatized => match self {
                HeatRiskLevel::Extreme => HeatRiskLevel::Extreme,
                HeatRiskLevel::VeryHigh => HeatRiskLevel::High,
                HeatRiskLevel::High => HeatRiskLevel::Moderate,
                HeatRiskLevel::Moderate => HeatRiskLevel::Low,
                HeatRiskLevel::Low => HeatRiskLevel::Low,
            },
            Acclimatization::Unacclimatized => match self {
                HeatRiskLevel::Low => HeatRiskLevel::Moderate,
                HeatRiskLevel::Moderate => HeatRiskLevel::High,
                HeatRiskLevel::High => HeatRiskLevel::VeryHigh,
                HeatRiskLevel::VeryHigh => HeatRiskLevel::Extreme,
                HeatRiskLevel::Extreme => HeatRiskLevel::Extreme,
            },
        }
    }

    /// Severity rank (1 = lowest)
    pub fn severity(&self) -> u8 {
        match self {
            HeatRiskLevel::Low => 1,
            HeatRiskLevel::Moderate => 2,
            HeatRiskLevel::High => 3,
            HeatRiskLevel::VeryHigh => 4,
            HeatRiskLevel::Extreme => 5,
        }
    }

    /// Expected symptoms at this band
    pub fn symptoms(&self) -> &'static str {
        match self {
            HeatRiskLevel::Low => "Normal work, maintain hydration",
            HeatRiskLevel::Moderate => "Increased sweating, thirst, mild discomfort",
            HeatRiskLevel::High => "Heat cramps, fatigue, headache, nausea",
            HeatRiskLevel::VeryHigh => "Heat exhaustion, dizziness, vomiting, confusion",
            HeatRiskLevel::Extreme => "Heat stroke - medical emergency",
        }
    }

    /// Required management action at this band
    pub fn action(&self) -> &'static str {
        match self {
            HeatRiskLevel::Low => "General heat awareness",
            HeatRiskLevel::Moderate => "Implement work-rest schedule, increase hydration",
            HeatRiskLevel::High => "Mandatory work-rest cycles, close supervision",
            HeatRiskLevel::VeryHigh => "Limited work only, medical supervision required",
            HeatRiskLevel::Extreme => "NO WORK ALLOWED - Immediate cooling required",
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            HeatRiskLevel::Low => "Low Risk",
            HeatRiskLevel::Moderate => "Moderate Risk",
            HeatRiskLevel::High => "High Risk",
            HeatRiskLevel::VeryHigh => "Very High Risk",
            HeatRiskLevel::Extreme => "Extreme Risk",
        }
    }
}

impl std::fmt::Display for HeatRiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Heat risk classification with score and rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatRiskAssessment {
    /// Risk band after the acclimatization shift
    pub level: HeatRiskLevel,
    /// Severity rank of the band (1 = lowest)
    pub severity: u8,
    /// Composite score: wbgt + heat_index/10 + intensity bonus
    pub score: f64,
    /// Expected symptoms at this band
    pub symptoms: String,
    /// Required management action
    pub action: String,
}

/// Work-rest schedule derived from WBGT and work parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkRestSchedule {
    /// Percentage of each hour spent working, after all adjustments
    pub work_pct: f64,
    /// Percentage of each hour spent resting
    pub rest_pct: f64,
    /// Cycle description for the unadjusted WBGT band
    pub cycle_time: String,
    /// Maximum work minutes per hour
    pub max_work_min_per_hour: f64,
}

/// Hydration plan for the shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydrationPlan {
    /// Fluid loss while working (L/hr)
    pub hourly_loss_l: f64,
    /// Total fluid loss over the shift (L)
    pub daily_loss_l: f64,
    /// Recommended total intake, 1.5x the loss (L)
    pub recommended_intake_l: f64,
    /// Intake before the shift (L)
    pub pre_shift_l: f64,
    /// Intake spread across the shift (L)
    pub during_work_l: f64,
    /// Hourly intake during work (L)
    pub per_hour_l: f64,
    /// Human-readable drinking schedule
    pub schedule: String,
}

/// Results from a heat stress assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatStressResult {
    // === Echoed Input ===
    /// Dry bulb temperature (C)
    pub dry_bulb_c: f64,
    /// Wet bulb temperature (C)
    pub wet_bulb_c: f64,
    /// Measured globe temperature, if supplied (C)
    pub globe_temp_c: Option<f64>,
    /// Relative humidity (%)
    pub relative_humidity_pct: f64,
    /// Wind speed used, after defaulting (m/s)
    pub wind_speed_ms: f64,
    /// Solar load category
    pub solar_load: SolarLoad,
    /// Work intensity
    pub work_intensity: WorkIntensity,
    /// Clothing ensemble
    pub clothing: ClothingType,
    /// Acclimatization state
    pub acclimatization: Acclimatization,

    // === Derived Metrics ===
    /// Globe temperature estimated from dry bulb and solar load, when no
    /// measured reading was supplied (C)
    pub estimated_globe_c: Option<f64>,
    /// Wet bulb globe temperature (C)
    pub wbgt_c: f64,
    /// Rothfusz heat index (C)
    pub heat_index_c: f64,
    /// Sweat rate including the clothing factor (L/hr)
    pub sweat_rate_l_per_hr: f64,
    /// Work-rest schedule
    pub work_rest: WorkRestSchedule,
    /// Hydration plan
    pub hydration: HydrationPlan,

    // === Classification ===
    /// Risk classification
    pub risk: HeatRiskAssessment,

    // === Compliance ===
    /// Heat regulation findings
    pub compliance: ComplianceReport,

    // === Recommendations ===
    /// Ordered corrective and preventive recommendations
    pub recommendations: Vec<String>,
}

/// Run a heat stress assessment.
///
/// Pure function; identical inputs produce identical results.
pub fn calculate(input: &HeatStressInput) -> SafetyResult<HeatStressResult> {
    input.validate()?;

    let (wbgt, estimated_globe) = compute_wbgt(input);
    let heat_index = heat_index_c(input.dry_bulb_c, input.relative_humidity_pct);

    let sweat_rate = input.work_intensity.base_sweat_rate(wbgt) * input.clothing.factor();

    let work_rest = work_rest_schedule(wbgt, input.work_intensity, input.acclimatization);
    let hydration = hydration_plan(sweat_rate, &work_rest);

    let base_level = HeatRiskLevel::from_wbgt(wbgt);
    let level = base_level.adjusted_for(input.acclimatization);
    let score = wbgt + heat_index / 10.0 + input.work_intensity.risk_bonus();
    let risk = HeatRiskAssessment {
        level,
        severity: level.severity(),
        score,
        symptoms: level.symptoms().to_string(),
        action: level.action().to_string(),
    };

    let compliance = check_heat_compliance(wbgt, level);
    let recommendations = build_recommendations(&risk, &work_rest, &hydration, wbgt);

    Ok(HeatStressResult {
        dry_bulb_c: input.dry_bulb_c,
        wet_bulb_c: input.wet_bulb_c,
        globe_temp_c: input.globe_temp_c,
        relative_humidity_pct: input.relative_humidity_pct,
        wind_speed_ms: input.wind_speed_ms.unwrap_or(0.0),
        solar_load: input.solar_load,
        work_intensity: input.work_intensity,
        clothing: input.clothing,
        acclimatization: input.acclimatization,
        estimated_globe_c: estimated_globe,
        wbgt_c: wbgt,
        heat_index_c: heat_index,
        sweat_rate_l_per_hr: sweat_rate,
        work_rest,
        hydration,
        risk,
        compliance,
        recommendations,
    })
}

/// Compute WBGT, returning the estimated globe temperature when no measured
/// reading was supplied.
fn compute_wbgt(input: &HeatStressInput) -> (f64, Option<f64>) {
    match input.globe_temp_c {
        Some(globe) => {
            // Indoor form: no solar component
            (0.7 * input.wet_bulb_c + 0.3 * globe, None)
        }
        None => {
            let estimated = input.dry_bulb_c + input.solar_load.globe_offset_c();
            let wbgt = 0.7 * input.wet_bulb_c + 0.2 * estimated + 0.1 * input.dry_bulb_c;
            (wbgt, Some(estimated))
        }
    }
}

/// Rothfusz regression heat index (Celsius form).
pub fn heat_index_c(temp_c: f64, humidity_pct: f64) -> f64 {
    let t = temp_c;
    let h = humidity_pct;
    HI_C1
        + HI_C2 * t
        + HI_C3 * h
        + HI_C4 * t * h
        + HI_C5 * t * t
        + HI_C6 * h * h
        + HI_C7 * t * t * h
        + HI_C8 * t * h * h
        + HI_C9 * t * t * h * h
}

/// WBGT band to base work percentage and cycle label.
fn base_work_band(wbgt_c: f64) -> (f64, &'static str) {
    if wbgt_c <= 26.0 {
        (100.0, "Continuous")
    } else if wbgt_c <= 28.0 {
        (75.0, "45 min work / 15 min rest")
    } else if wbgt_c <= 30.0 {
        (50.0, "30 min work / 30 min rest")
    } else if wbgt_c <= 32.0 {
        (25.0, "15 min work / 45 min rest")
    } else {
        (0.0, "No work in heat")
    }
}

/// Work-intensity adjustment step: heavy bands lose 25 work points.
fn apply_intensity_adjustment(work_pct: f64, intensity: WorkIntensity) -> f64 {
    if intensity.is_heavy() {
        (work_pct - 25.0).clamp(0.0, 100.0)
    } else {
        work_pct
    }
}

/// Acclimatization adjustment step: +10 when acclimatized, -15 otherwise.
fn apply_acclimatization_adjustment(work_pct: f64, acclimatization: Acclimatization) -> f64 {
    let adjusted = match acclimatization {
        Acclimatization::Acclimatized => work_pct + 10.0,
        Acclimatization::Unacclimatized => work_pct - 15.0,
    };
    adjusted.clamp(0.0, 100.0)
}

/// Build the work-rest schedule by applying the adjustment steps in order:
/// band, intensity, acclimatization.
fn work_rest_schedule(
    wbgt_c: f64,
    intensity: WorkIntensity,
    acclimatization: Acclimatization,
) -> WorkRestSchedule {
    let (base_pct, cycle) = base_work_band(wbgt_c);
    let after_intensity = apply_intensity_adjustment(base_pct, intensity);
    let work_pct = apply_acclimatization_adjustment(after_intensity, acclimatization);

    WorkRestSchedule {
        work_pct,
        rest_pct: 100.0 - work_pct,
        cycle_time: cycle.to_string(),
        max_work_min_per_hour: work_pct / 100.0 * 60.0,
    }
}

/// Derive the shift hydration plan from the sweat rate and work fraction.
fn hydration_plan(sweat_rate_l_per_hr: f64, work_rest: &WorkRestSchedule) -> HydrationPlan {
    let daily_loss = sweat_rate_l_per_hr * SHIFT_HOURS * (work_rest.work_pct / 100.0);
    let recommended = daily_loss * INTAKE_MULTIPLIER;
    // Remainder after the pre-shift allocation, floored at zero for no-work
    // schedules
    let during_work = (recommended - PRE_SHIFT_INTAKE_L).max(0.0);
    let per_hour = during_work / SHIFT_HOURS;

    HydrationPlan {
        hourly_loss_l: sweat_rate_l_per_hr,
        daily_loss_l: daily_loss,
        recommended_intake_l: recommended,
        pre_shift_l: PRE_SHIFT_INTAKE_L,
        during_work_l: during_work,
        per_hour_l: per_hour,
        schedule: format!("Drink {:.2}L per hour during work", per_hour),
    }
}

/// Evaluate heat-regulation rules against WBGT and the classified risk band.
fn check_heat_compliance(wbgt_c: f64, level: HeatRiskLevel) -> ComplianceReport {
    let mut report = ComplianceReport::new();

    if level == HeatRiskLevel::Extreme || level == HeatRiskLevel::VeryHigh {
        report.violation("OSHA General Duty Clause violation - Serious hazard present");
    }

    if wbgt_c >= 27.0 {
        report.warning("Cal/OSHA requires written heat illness prevention program");
    }

    if wbgt_c >= 30.0 {
        report.violation("Cal/OSHA requires mandatory 10-minute cool-down rest every 2 hours");
    }

    if wbgt_c >= 29.0 {
        report.warning("WA L&I requires additional precautions at 29C WBGT");
    }

    report
}

/// Build the ordered recommendation list.
fn build_recommendations(
    risk: &HeatRiskAssessment,
    work_rest: &WorkRestSchedule,
    hydration: &HydrationPlan,
    wbgt_c: f64,
) -> Vec<String> {
    let mut recs: Vec<String> = vec![
        "Provide cool drinking water (10-15C)".to_string(),
        "Train workers on heat illness recognition".to_string(),
        "Establish buddy system for heat monitoring".to_string(),
    ];

    if matches!(risk.level, HeatRiskLevel::Moderate | HeatRiskLevel::High) {
        recs.push(format!(
            "Implement work-rest schedule: {}",
            work_rest.cycle_time
        ));
        recs.push("Provide shaded or air-conditioned rest areas".to_string());
        recs.push("Monitor workers for heat illness symptoms".to_string());
    }

    if matches!(risk.level, HeatRiskLevel::High | HeatRiskLevel::VeryHigh) {
        recs.push("Assign dedicated heat safety observer".to_string());
        recs.push("Provide cooling vests or other personal cooling".to_string());
        recs.push("Schedule hardest work for cooler parts of day".to_string());
    }

    if risk.level == HeatRiskLevel::Extreme {
        recs.push("STOP ALL WORK IN HEAT".to_string());
        recs.push("Implement emergency response plan".to_string());
        recs.push("Provide immediate cooling facilities".to_string());
    }

    recs.push(format!("Hydration: {}", hydration.schedule));
    recs.push(format!(
        "Drink {:.1}L before shift, {:.2}L during work",
        hydration.pre_shift_l, hydration.during_work_l
    ));

    if wbgt_c > 26.0 {
        recs.push("Implement 7-day acclimatization program for new workers".to_string());
        recs.push("Gradually increase workload over first week".to_string());
    }

    recs.push("Provide light-colored, loose-fitting clothing".to_string());
    recs.push("Allow for removal of unnecessary PPE during breaks".to_string());

    recs
}

// ============================================================================
// Personal Hydration
// ============================================================================

/// Personal activity level for daily hydration planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Heavy,
    VeryHeavy,
}

impl ActivityLevel {
    /// All activity variants for UI selection
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Heavy,
        ActivityLevel::VeryHeavy,
    ];

    /// Intake multiplier for this activity level
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.0,
            ActivityLevel::Light => 1.2,
            ActivityLevel::Moderate => 1.5,
            ActivityLevel::Heavy => 2.0,
            ActivityLevel::VeryHeavy => 2.5,
        }
    }
}

/// Input for a personal daily hydration plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalHydrationInput {
    /// Body weight (kg)
    pub body_weight_kg: f64,
    /// Daily activity level
    pub activity_level: ActivityLevel,
    /// Ambient temperature (C)
    pub ambient_temp_c: f64,
}

impl PersonalHydrationInput {
    /// Validate input parameters.
    pub fn validate(&self) -> SafetyResult<()> {
        if self.body_weight_kg <= 0.0 {
            return Err(SafetyError::invalid_input(
                "body_weight_kg",
                self.body_weight_kg.to_string(),
                "Body weight must be positive",
            ));
        }
        if !(-20.0..=50.0).contains(&self.ambient_temp_c) {
            return Err(SafetyError::invalid_input(
                "ambient_temp_c",
                self.ambient_temp_c.to_string(),
                "Temperature must be between -20 and 50 C",
            ));
        }
        Ok(())
    }
}

/// One band of the urine-color hydration reference guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrineColorBand {
    /// Reference swatch color (hex)
    pub color: String,
    /// Hydration interpretation
    pub description: String,
}

/// Fixed six-band urine-color hydration reference.
pub static URINE_COLOR_GUIDE: Lazy<Vec<UrineColorBand>> = Lazy::new(|| {
    [
        ("#e6f7ff", "Clear: Overhydrated, reduce intake"),
        ("#b3e0ff", "Pale Yellow: Well hydrated"),
        ("#66c2ff", "Yellow: Normal hydration"),
        ("#3399ff", "Dark Yellow: Mild dehydration"),
        ("#0066cc", "Amber: Dehydrated, drink water"),
        ("#004080", "Brown: Severely dehydrated, medical attention"),
    ]
    .into_iter()
    .map(|(color, description)| UrineColorBand {
        color: color.to_string(),
        description: description.to_string(),
    })
    .collect()
});

/// Personal daily hydration plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalHydrationResult {
    /// Daily water requirement (L)
    pub daily_intake_l: f64,
    /// Hourly intake during an 8-hour work day (L)
    pub hourly_during_work_l: f64,
    /// Pre-shift intake (L)
    pub pre_shift_l: f64,
    /// Post-shift intake (L)
    pub post_shift_l: f64,
    /// Urine-color reference guide
    pub urine_guide: Vec<UrineColorBand>,
}

/// Compute a personal daily hydration plan.
///
/// Base intake is 30 mL per kg of body weight, scaled by activity level and
/// by 4% per degree above 25 C, reported in liters.
pub fn calculate_personal_hydration(
    input: &PersonalHydrationInput,
) -> SafetyResult<PersonalHydrationResult> {
    input.validate()?;

    let temp_factor = 1.0 + 0.04 * (input.ambient_temp_c - 25.0).max(0.0);
    let daily_ml = input.body_weight_kg * 30.0 * input.activity_level.multiplier() * temp_factor;
    let daily_l = daily_ml / 1000.0;

    Ok(PersonalHydrationResult {
        daily_intake_l: daily_l,
        hourly_during_work_l: daily_l / SHIFT_HOURS,
        pre_shift_l: 0.5,
        post_shift_l: 0.5,
        urine_guide: URINE_COLOR_GUIDE.clone(),
    })
}
