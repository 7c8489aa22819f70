//! # Fall Protection Assessment
//!
//! Analyzes a fall-arrest or restraint setup against OSHA 1926.502 criteria.
//!
//! ## Formulas (metric units)
//!
//! ```text
//! free_fall  = max(0, fall_height - anchor_height + lanyard + 0.5)
//! total_fall = free_fall + deceleration_distance
//! clearance  = total_fall + 1.0 (margin) + 0.5 (D-ring shift) + surface factor
//! impact     = weight x 9.81 x free_fall / deceleration_distance
//! ```
//!
//! The safety factor compares a heuristic available clearance of 1.5x the
//! fall height against the required clearance. This is a planning assumption,
//! not a measured value or a cited regulatory figure.
//!
//! ## Example
//!
//! ```rust
//! use safety_core::engines::fall_protection::{
//!     calculate, FallProtectionInput, SurfaceType, SystemType,
//! };
//!
//! let input = FallProtectionInput {
//!     fall_height_m: 4.0,
//!     lanyard_length_m: 1.2,
//!     deceleration_distance_m: Some(1.0),
//!     worker_weight_kg: Some(90.0),
//!     anchor_height_m: Some(1.5),
//!     surface_type: SurfaceType::Concrete,
//!     system_type: SystemType::Arrest,
//! };
//!
//! let result = calculate(&input).unwrap();
//! println!("Clearance required: {:.2} m", result.clearance_required_m);
//! println!("Risk: {}", result.risk.level);
//! ```

use serde::{Deserialize, Serialize};

use crate::compliance::ComplianceReport;
use crate::errors::{SafetyError, SafetyResult};

/// Estimated harness stretch under load (m)
const HARNESS_STRETCH_M: f64 = 0.5;

/// Safety margin added to required clearance (m)
const SAFETY_MARGIN_M: f64 = 1.0;

/// D-ring shift distance added to required clearance (m)
const D_RING_SHIFT_M: f64 = 0.5;

/// Standard gravity (m/s2)
const GRAVITY_MS2: f64 = 9.81;

/// OSHA 1926.502 free-fall limit: 1.8 m (6 ft)
const OSHA_FREE_FALL_LIMIT_M: f64 = 1.8;

/// OSHA 1926.502 maximum arresting force: 8 kN (1800 lbf)
const OSHA_IMPACT_LIMIT_N: f64 = 8000.0;

/// Advisory threshold approaching the arresting-force limit
const IMPACT_WARNING_N: f64 = 6000.0;

/// Free-fall limit for personal fall arrest systems: 0.6 m (2 ft)
const PERSONAL_FREE_FALL_LIMIT_M: f64 = 0.6;

/// OSHA anchor capacity requirement: 2268 kg (5000 lb)
pub const OSHA_ANCHOR_CAPACITY_KG: f64 = 2268.0;

/// Surface below the work area, used to pad the required clearance.
///
/// `Other` is the documented fallback entry for unrecognized surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SurfaceType {
    Concrete,
    Steel,
    Ground,
    Water,
    #[default]
    Other,
}

impl SurfaceType {
    /// All surface variants for UI selection
    pub const ALL: [SurfaceType; 5] = [
        SurfaceType::Concrete,
        SurfaceType::Steel,
        SurfaceType::Ground,
        SurfaceType::Water,
        SurfaceType::Other,
    ];

    /// Clearance padding for this surface (m)
    pub fn clearance_factor_m(&self) -> f64 {
        match self {
            SurfaceType::Concrete => 0.3,
            SurfaceType::Steel => 0.5,
            SurfaceType::Ground => 0.8,
            SurfaceType::Water => 2.0,
            SurfaceType::Other => 0.5,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            SurfaceType::Concrete => "Concrete",
            SurfaceType::Steel => "Steel",
            SurfaceType::Ground => "Ground",
            SurfaceType::Water => "Water",
            SurfaceType::Other => "Other",
        }
    }
}

impl std::fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Type of fall protection system in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SystemType {
    /// Fall arrest system (stops a fall in progress)
    #[default]
    Arrest,
    /// Personal fall arrest system with the stricter 0.6 m free-fall limit
    Personal,
    /// Restraint system (prevents reaching the fall edge; no free fall allowed)
    Restraint,
}

impl SystemType {
    /// All system variants for UI selection
    pub const ALL: [SystemType; 3] = [
        SystemType::Arrest,
        SystemType::Personal,
        SystemType::Restraint,
    ];

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            SystemType::Arrest => "Fall Arrest",
            SystemType::Personal => "Personal Fall Arrest",
            SystemType::Restraint => "Fall Restraint",
        }
    }
}

impl std::fmt::Display for SystemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Input parameters for a fall protection assessment.
///
/// Lengths are in meters, weight in kilograms.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fall_height_m": 6.0,
///   "lanyard_length_m": 1.8,
///   "deceleration_distance_m": 1.0,
///   "worker_weight_kg": 100.0,
///   "anchor_height_m": 0.0,
///   "surface_type": "concrete",
///   "system_type": "arrest"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallProtectionInput {
    /// Working height above the lower level (m)
    pub fall_height_m: f64,

    /// Lanyard length (m)
    pub lanyard_length_m: f64,

    /// Deceleration distance of the energy absorber (m); defaults to 1.0
    pub deceleration_distance_m: Option<f64>,

    /// Worker weight including tools (kg); defaults to 100
    pub worker_weight_kg: Option<f64>,

    /// Anchor height above the worker's harness attachment (m); defaults to 0
    pub anchor_height_m: Option<f64>,

    /// Surface below the work area
    pub surface_type: SurfaceType,

    /// Fall protection system type
    pub system_type: SystemType,
}

impl FallProtectionInput {
    /// Deceleration distance with the documented 1.0 m default applied
    pub fn deceleration_distance_m(&self) -> f64 {
        self.deceleration_distance_m.unwrap_or(1.0)
    }

    /// Worker weight with the documented 100 kg default applied
    pub fn worker_weight_kg(&self) -> f64 {
        self.worker_weight_kg.unwrap_or(100.0)
    }

    /// Anchor height with the documented 0 m default applied
    pub fn anchor_height_m(&self) -> f64 {
        self.anchor_height_m.unwrap_or(0.0)
    }

    /// Validate input parameters.
    ///
    /// Checks run in declared field order and stop at the first failure.
    pub fn validate(&self) -> SafetyResult<()> {
        if self.fall_height_m <= 0.0 {
            return Err(SafetyError::invalid_input(
                "fall_height_m",
                self.fall_height_m.to_string(),
                "Fall height must be positive",
            ));
        }
        if self.fall_height_m > 150.0 {
            return Err(SafetyError::invalid_input(
                "fall_height_m",
                self.fall_height_m.to_string(),
                "Fall height exceeds 150 m - verify work location",
            ));
        }
        if self.lanyard_length_m <= 0.0 {
            return Err(SafetyError::invalid_input(
                "lanyard_length_m",
                self.lanyard_length_m.to_string(),
                "Lanyard length must be positive",
            ));
        }
        if self.lanyard_length_m > 30.0 {
            return Err(SafetyError::invalid_input(
                "lanyard_length_m",
                self.lanyard_length_m.to_string(),
                "Lanyard length exceeds 30 m - verify equipment",
            ));
        }
        if let Some(d) = self.deceleration_distance_m {
            if d <= 0.0 {
                return Err(SafetyError::invalid_input(
                    "deceleration_distance_m",
                    d.to_string(),
                    "Deceleration distance must be positive",
                ));
            }
        }
        if let Some(w) = self.worker_weight_kg {
            if w <= 0.0 {
                return Err(SafetyError::invalid_input(
                    "worker_weight_kg",
                    w.to_string(),
                    "Worker weight must be positive",
                ));
            }
        }
        if let Some(a) = self.anchor_height_m {
            if a < 0.0 {
                return Err(SafetyError::invalid_input(
                    "anchor_height_m",
                    a.to_string(),
                    "Anchor height cannot be negative",
                ));
            }
        }
        Ok(())
    }
}

/// Fall risk band derived from the composite risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FallRiskLevel {
    Low,
    Moderate,
    High,
    Extreme,
}

impl FallRiskLevel {
    /// All risk variants, ordered by severity
    pub const ALL: [FallRiskLevel; 4] = [
        FallRiskLevel::Low,
        FallRiskLevel::Moderate,
        FallRiskLevel::High,
        FallRiskLevel::Extreme,
    ];

    /// Classify a risk score into a band.
    ///
    /// Bands are contiguous over the whole real line: <3 Low, <6 Moderate,
    /// <10 High, otherwise Extreme.
    pub fn from_score(score: f64) -> Self {
        if score < 3.0 {
            FallRiskLevel::Low
        } else if score < 6.0 {
            FallRiskLevel::Moderate
        } else if score < 10.0 {
            FallRiskLevel::High
        } else {
            FallRiskLevel::Extreme
        }
    }

    /// Severity rank (1 = lowest)
    pub fn severity(&self) -> u8 {
        match self {
            FallRiskLevel::Low => 1,
            FallRiskLevel::Moderate => 2,
            FallRiskLevel::High => 3,
            FallRiskLevel::Extreme => 4,
        }
    }

    /// Rationale text for this band
    pub fn description(&self) -> &'static str {
        match self {
            FallRiskLevel::Low => "Minimal fall risk with current setup",
            FallRiskLevel::Moderate => "Moderate fall risk - review required",
            FallRiskLevel::High => "High fall risk - immediate action needed",
            FallRiskLevel::Extreme => "Extreme fall risk - STOP WORK",
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            FallRiskLevel::Low => "Low Risk",
            FallRiskLevel::Moderate => "Moderate Risk",
            FallRiskLevel::High => "High Risk",
            FallRiskLevel::Extreme => "Extreme Risk",
        }
    }
}

impl std::fmt::Display for FallRiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Risk classification with score and rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallRiskAssessment {
    /// Risk band
    pub level: FallRiskLevel,
    /// Severity rank of the band (1 = lowest)
    pub severity: u8,
    /// Composite risk score: height/3 + free_fall/2 + impact/2000
    pub score: f64,
    /// Rationale text for the band
    pub description: String,
}

/// Rating of the clearance safety factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyFactorRating {
    /// Factor >= 2.0
    Adequate,
    /// Factor >= 1.5
    Marginal,
    /// Factor < 1.5
    Insufficient,
}

impl SafetyFactorRating {
    /// Classify a safety factor value
    pub fn from_factor(factor: f64) -> Self {
        if factor >= 2.0 {
            SafetyFactorRating::Adequate
        } else if factor >= 1.5 {
            SafetyFactorRating::Marginal
        } else {
            SafetyFactorRating::Insufficient
        }
    }
}

/// Results from a fall protection assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallProtectionResult {
    // === Echoed Input ===
    /// Working height (m)
    pub fall_height_m: f64,
    /// Anchor height used, after defaulting (m)
    pub anchor_height_m: f64,
    /// Lanyard length (m)
    pub lanyard_length_m: f64,
    /// Deceleration distance used, after defaulting (m)
    pub deceleration_distance_m: f64,
    /// Worker weight used, after defaulting (kg)
    pub worker_weight_kg: f64,
    /// Surface below the work area
    pub surface_type: SurfaceType,
    /// Fall protection system type
    pub system_type: SystemType,

    // === Derived Metrics ===
    /// Free fall distance before the system engages (m)
    pub free_fall_distance_m: f64,
    /// Free fall plus deceleration distance (m)
    pub total_fall_distance_m: f64,
    /// Minimum clearance below the working surface (m)
    pub clearance_required_m: f64,
    /// Peak arresting force on the worker (N)
    pub impact_force_n: f64,
    /// Heuristic clearance safety factor (1.5x fall height / required)
    pub safety_factor: f64,
    /// Rating of the safety factor
    pub safety_factor_rating: SafetyFactorRating,

    // === Classification ===
    /// Risk classification
    pub risk: FallRiskAssessment,

    // === Compliance ===
    /// OSHA 1926.502 compliance findings
    pub compliance: ComplianceReport,

    // === Recommendations ===
    /// Ordered corrective and preventive recommendations
    pub recommendations: Vec<String>,
}

/// Run a fall protection assessment.
///
/// This is a pure function: identical inputs always produce identical
/// results, and no state survives between invocations.
///
/// # Errors
///
/// Returns a structured validation error naming the offending field when an
/// input is out of range. No partial results are produced on failure.
pub fn calculate(input: &FallProtectionInput) -> SafetyResult<FallProtectionResult> {
    input.validate()?;

    let deceleration = input.deceleration_distance_m();
    let weight = input.worker_weight_kg();
    let anchor_height = input.anchor_height_m();

    // Free fall distance includes harness stretch and cannot be negative
    let free_fall =
        (input.fall_height_m - anchor_height + input.lanyard_length_m + HARNESS_STRETCH_M).max(0.0);

    let total_fall = free_fall + deceleration;

    let clearance_required = total_fall
        + SAFETY_MARGIN_M
        + D_RING_SHIFT_M
        + input.surface_type.clearance_factor_m();

    // F = m*g*h / d
    let impact_force = weight * GRAVITY_MS2 * free_fall / deceleration;

    // Available clearance assumed as 1.5x fall height (planning heuristic)
    let safety_factor = (input.fall_height_m * 1.5) / clearance_required;
    let safety_factor_rating = SafetyFactorRating::from_factor(safety_factor);

    let compliance = check_osha_compliance(free_fall, impact_force, input.system_type);

    let score = input.fall_height_m / 3.0 + free_fall / 2.0 + impact_force / 2000.0;
    let level = FallRiskLevel::from_score(score);
    let risk = FallRiskAssessment {
        level,
        severity: level.severity(),
        score,
        description: level.description().to_string(),
    };

    let recommendations = build_recommendations(
        input.fall_height_m,
        free_fall,
        impact_force,
        clearance_required,
        &compliance,
        input.system_type,
    );

    Ok(FallProtectionResult {
        fall_height_m: input.fall_height_m,
        anchor_height_m: anchor_height,
        lanyard_length_m: input.lanyard_length_m,
        deceleration_distance_m: deceleration,
        worker_weight_kg: weight,
        surface_type: input.surface_type,
        system_type: input.system_type,
        free_fall_distance_m: free_fall,
        total_fall_distance_m: total_fall,
        clearance_required_m: clearance_required,
        impact_force_n: impact_force,
        safety_factor,
        safety_factor_rating,
        risk,
        compliance,
        recommendations,
    })
}

/// Evaluate OSHA 1926.502 fall protection criteria.
fn check_osha_compliance(
    free_fall_m: f64,
    impact_force_n: f64,
    system_type: SystemType,
) -> ComplianceReport {
    let mut report = ComplianceReport::new();

    if free_fall_m > OSHA_FREE_FALL_LIMIT_M {
        report.violation("Free fall distance exceeds OSHA limit of 1.8m (6ft)");
    } else {
        report.compliant("Free fall distance within OSHA limits");
    }

    if impact_force_n > OSHA_IMPACT_LIMIT_N {
        report.violation("Impact force exceeds OSHA limit of 8kN (1800 lbf)");
    } else if impact_force_n > IMPACT_WARNING_N {
        report.warning("Impact force approaching OSHA limit - consider shock absorber");
    } else {
        report.compliant("Impact force within OSHA limits");
    }

    if system_type == SystemType::Personal && free_fall_m > PERSONAL_FREE_FALL_LIMIT_M {
        report.warning("Personal fall arrest system should limit free fall to 0.6m (2ft)");
    }

    if system_type == SystemType::Restraint && free_fall_m > 0.0 {
        report.violation("Fall restraint system should prevent any free fall");
    }

    report
}

/// Build the ordered recommendation list.
///
/// The three baseline recommendations always come first; conditional rules
/// fire additively in declaration order.
fn build_recommendations(
    fall_height_m: f64,
    free_fall_m: f64,
    impact_force_n: f64,
    clearance_required_m: f64,
    compliance: &ComplianceReport,
    system_type: SystemType,
) -> Vec<String> {
    let mut recs: Vec<String> = vec![
        "Inspect all fall protection equipment before each use".to_string(),
        "Ensure proper training for all workers at heights".to_string(),
        "Develop rescue plan for fallen workers".to_string(),
    ];

    if fall_height_m > 3.0 {
        recs.push("Use guardrails or safety nets for work above 3 meters".to_string());
    }
    if fall_height_m > 6.0 {
        recs.push("Implement 100% tie-off policy for work above 6 meters".to_string());
    }

    if free_fall_m > OSHA_FREE_FALL_LIMIT_M {
        recs.push("Reduce lanyard length to limit free fall distance".to_string());
        recs.push("Consider using self-retracting lifelines".to_string());
    }
    if free_fall_m > PERSONAL_FREE_FALL_LIMIT_M && system_type == SystemType::Personal {
        recs.push("Use shorter lanyard or reposition anchor point".to_string());
    }

    if impact_force_n > IMPACT_WARNING_N {
        recs.push("Use shock-absorbing lanyard to reduce impact force".to_string());
        recs.push("Ensure anchor point can withstand 22kN (5000 lbf)".to_string());
    }

    if clearance_required_m > fall_height_m * 0.8 {
        recs.push("Increase working height to ensure adequate clearance".to_string());
        recs.push("Consider using horizontal lifeline system".to_string());
    }

    if !compliance.violations.is_empty() {
        recs.push("Immediately address OSHA compliance violations".to_string());
    }
    if !compliance.warnings.is_empty() {
        recs.push("Address OSHA warning items promptly".to_string());
    }

    match system_type {
        SystemType::Restraint => {
            recs.push("Ensure restraint system prevents reaching fall edge".to_string());
        }
        SystemType::Arrest | SystemType::Personal => {
            recs.push("Verify clearance below working area is sufficient".to_string());
            recs.push("Test rescue equipment and procedures regularly".to_string());
        }
    }

    recs
}

// ============================================================================
// Anchor Strength
// ============================================================================

/// Anchor point specification.
///
/// Each anchor type carries its own geometry and material fields and has its
/// own base-capacity formula. All capacities are checked against the fixed
/// OSHA 2268 kg (5000 lb) requirement.
///
/// ## JSON Examples
///
/// ```json
/// { "type": "beam-clamp", "material": "steel", "diameter_mm": 20.0 }
/// ```
///
/// ```json
/// {
///   "type": "concrete-anchor",
///   "material": "epoxy",
///   "diameter_mm": 12.0,
///   "embedment_depth_mm": 100.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AnchorSpec {
    /// Clamp onto a structural beam flange
    BeamClamp {
        material: BeamClampMaterial,
        diameter_mm: f64,
    },
    /// Drilled anchor set into concrete
    ConcreteAnchor {
        material: ConcreteAnchorStyle,
        diameter_mm: f64,
        embedment_depth_mm: f64,
    },
    /// Permanent or temporary roof anchor
    RoofAnchor {
        fastening: RoofAnchorFastening,
        diameter_mm: f64,
    },
}

/// Beam clamp body material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BeamClampMaterial {
    Steel,
    Aluminum,
}

/// Concrete anchor installation style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConcreteAnchorStyle {
    Epoxy,
    Wedge,
    Sleeve,
}

/// Roof anchor fastening method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoofAnchorFastening {
    ThroughBolt,
    ScrewDown,
}

/// Result of an anchor strength evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorStrengthResult {
    /// Estimated anchor capacity (kg)
    pub capacity_kg: f64,
    /// True when capacity meets the 2268 kg (5000 lb) requirement
    pub osha_compliant: bool,
    /// Human-readable capacity summary
    pub description: String,
    /// Disposition guidance for this anchor
    pub recommendation: String,
}

/// Evaluate the capacity of an anchor point against the OSHA requirement.
pub fn evaluate_anchor(spec: &AnchorSpec) -> SafetyResult<AnchorStrengthResult> {
    let capacity_kg = match spec {
        AnchorSpec::BeamClamp {
            material,
            diameter_mm,
        } => {
            validate_dimension("diameter_mm", *diameter_mm)?;
            let mut capacity = 1000.0;
            if *material == BeamClampMaterial::Steel {
                capacity *= 2.0;
            }
            if *diameter_mm >= 20.0 {
                capacity *= 1.5;
            }
            capacity
        }
        AnchorSpec::ConcreteAnchor {
            material,
            diameter_mm,
            embedment_depth_mm,
        } => {
            validate_dimension("diameter_mm", *diameter_mm)?;
            validate_dimension("embedment_depth_mm", *embedment_depth_mm)?;
            // Simplified capacity model: 500 kg per mm of diameter per mm of
            // embedment, before installation-style multipliers
            let mut capacity = 500.0 * diameter_mm * embedment_depth_mm;
            match material {
                ConcreteAnchorStyle::Epoxy => capacity *= 1.5,
                ConcreteAnchorStyle::Wedge => capacity *= 1.2,
                ConcreteAnchorStyle::Sleeve => {}
            }
            capacity
        }
        AnchorSpec::RoofAnchor {
            fastening,
            diameter_mm,
        } => {
            validate_dimension("diameter_mm", *diameter_mm)?;
            let mut capacity = 800.0;
            if *fastening == RoofAnchorFastening::ThroughBolt {
                capacity *= 2.0;
            }
            if *diameter_mm >= 12.0 {
                capacity *= 1.3;
            }
            capacity
        }
    };

    let osha_compliant = capacity_kg >= OSHA_ANCHOR_CAPACITY_KG;

    let description = match spec {
        AnchorSpec::BeamClamp { .. } => format!("Beam clamp capacity: {:.0} kg", capacity_kg),
        AnchorSpec::ConcreteAnchor { .. } => {
            format!("Concrete anchor capacity: {:.0} kg", capacity_kg)
        }
        AnchorSpec::RoofAnchor { .. } => format!("Roof anchor capacity: {:.0} kg", capacity_kg),
    };

    let recommendation = if osha_compliant {
        "Meets OSHA 2268 kg (5000 lbs) requirement".to_string()
    } else {
        match spec {
            AnchorSpec::RoofAnchor { .. } => "Only suitable for restraint systems".to_string(),
            _ => "Does not meet OSHA requirements - use stronger anchor".to_string(),
        }
    };

    Ok(AnchorStrengthResult {
        capacity_kg,
        osha_compliant,
        description,
        recommendation,
    })
}

fn validate_dimension(field: &str, value_mm: f64) -> SafetyResult<()> {
    if value_mm <= 0.0 {
        return Err(SafetyError::invalid_input(
            field,
            value_mm.to_string(),
            "Anchor dimension must be positive",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrest_setup() -> FallProtectionInput {
        FallProtectionInput {
            fall_height_m: 6.0,
            lanyard_length_m: 1.8,
            deceleration_distance_m: Some(1.0),
            worker_weight_kg: Some(100.0),
            anchor_height_m: Some(0.0),
            surface_type: SurfaceType::Concrete,
            system_type: SystemType::Arrest,
        }
    }

    #[test]
    fn test_worked_arrest_scenario() {
        let result = calculate(&arrest_setup()).unwrap();

        // free fall = 6 - 0 + 1.8 + 0.5 = 8.3
        assert!((result.free_fall_distance_m - 8.3).abs() < 1e-9);
        // total = 8.3 + 1.0 = 9.3
        assert!((result.total_fall_distance_m - 9.3).abs() < 1e-9);
        // clearance = 9.3 + 1.0 + 0.5 + 0.3 = 11.1
        assert!((result.clearance_required_m - 11.1).abs() < 1e-9);
        // impact = 100 * 9.81 * 8.3 / 1.0 = 8142.3 N, over the 8 kN limit
        assert!((result.impact_force_n - 8142.3).abs() < 0.1);
        assert!(!result.compliance.is_compliant());
        assert!(result
            .compliance
            .violations
            .iter()
            .any(|v| v.contains("Impact force")));
    }

    #[test]
    fn test_clearance_monotonic_in_fall_height() {
        let mut previous = 0.0;
        for height in 1..=30 {
            let mut input = arrest_setup();
            input.fall_height_m = height as f64;
            let result = calculate(&input).unwrap();
            assert!(
                result.clearance_required_m >= previous,
                "clearance decreased at height {}",
                height
            );
            previous = result.clearance_required_m;
        }
    }

    #[test]
    fn test_optional_field_defaults() {
        let input = FallProtectionInput {
            fall_height_m: 2.0,
            lanyard_length_m: 1.0,
            deceleration_distance_m: None,
            worker_weight_kg: None,
            anchor_height_m: None,
            surface_type: SurfaceType::Ground,
            system_type: SystemType::Arrest,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.deceleration_distance_m, 1.0);
        assert_eq!(result.worker_weight_kg, 100.0);
        assert_eq!(result.anchor_height_m, 0.0);
    }

    #[test]
    fn test_free_fall_floored_at_zero() {
        let input = FallProtectionInput {
            fall_height_m: 2.0,
            lanyard_length_m: 1.0,
            deceleration_distance_m: Some(1.0),
            worker_weight_kg: Some(80.0),
            anchor_height_m: Some(10.0),
            surface_type: SurfaceType::Steel,
            system_type: SystemType::Restraint,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.free_fall_distance_m, 0.0);
        assert_eq!(result.impact_force_n, 0.0);
        // Restraint with zero free fall is compliant
        assert!(result.compliance.is_compliant());
    }

    #[test]
    fn test_restraint_with_free_fall_violates() {
        let mut input = arrest_setup();
        input.system_type = SystemType::Restraint;
        let result = calculate(&input).unwrap();
        assert!(result
            .compliance
            .violations
            .iter()
            .any(|v| v.contains("restraint")));
    }

    #[test]
    fn test_personal_system_warning() {
        let input = FallProtectionInput {
            fall_height_m: 1.0,
            lanyard_length_m: 0.5,
            deceleration_distance_m: Some(1.0),
            worker_weight_kg: Some(80.0),
            anchor_height_m: Some(0.2),
            surface_type: SurfaceType::Other,
            system_type: SystemType::Personal,
        };
        let result = calculate(&input).unwrap();
        // free fall = 1.0 - 0.2 + 0.5 + 0.5 = 1.8, within the general limit
        // but above the 0.6 m personal-system threshold
        assert!(result.compliance.is_compliant());
        assert!(result.compliance.has_warnings());
    }

    #[test]
    fn test_risk_bands() {
        assert_eq!(FallRiskLevel::from_score(0.0), FallRiskLevel::Low);
        assert_eq!(FallRiskLevel::from_score(2.99), FallRiskLevel::Low);
        assert_eq!(FallRiskLevel::from_score(3.0), FallRiskLevel::Moderate);
        assert_eq!(FallRiskLevel::from_score(6.0), FallRiskLevel::High);
        assert_eq!(FallRiskLevel::from_score(10.0), FallRiskLevel::Extreme);
        assert_eq!(FallRiskLevel::from_score(-1.0), FallRiskLevel::Low);
    }

    #[test]
    fn test_worked_scenario_is_extreme_risk() {
        let result = calculate(&arrest_setup()).unwrap();
        // score = 6/3 + 8.3/2 + 8142.3/2000 = 10.22
        assert!((result.risk.score - 10.221_15).abs() < 0.001);
        assert_eq!(result.risk.level, FallRiskLevel::Extreme);
        assert_eq!(result.risk.severity, 4);
    }

    #[test]
    fn test_baseline_recommendations_first() {
        let result = calculate(&arrest_setup()).unwrap();
        assert!(result.recommendations[0].contains("Inspect"));
        assert!(result.recommendations[1].contains("training"));
        assert!(result.recommendations[2].contains("rescue plan"));
    }

    #[test]
    fn test_determinism() {
        let input = arrest_setup();
        let first = serde_json::to_string(&calculate(&input).unwrap()).unwrap();
        let second = serde_json::to_string(&calculate(&input).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_fall_height() {
        let mut input = arrest_setup();
        input.fall_height_m = -5.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("fall_height_m"));
    }

    #[test]
    fn test_surface_factors() {
        assert_eq!(SurfaceType::Concrete.clearance_factor_m(), 0.3);
        assert_eq!(SurfaceType::Water.clearance_factor_m(), 2.0);
        assert_eq!(SurfaceType::Other.clearance_factor_m(), 0.5);
    }

    #[test]
    fn test_beam_clamp_capacity() {
        let spec = AnchorSpec::BeamClamp {
            material: BeamClampMaterial::Steel,
            diameter_mm: 20.0,
        };
        let result = evaluate_anchor(&spec).unwrap();
        // 1000 * 2.0 (steel) * 1.5 (>= 20 mm) = 3000 kg
        assert_eq!(result.capacity_kg, 3000.0);
        assert!(result.osha_compliant);
    }

    #[test]
    fn test_aluminum_beam_clamp_fails() {
        let spec = AnchorSpec::BeamClamp {
            material: BeamClampMaterial::Aluminum,
            diameter_mm: 16.0,
        };
        let result = evaluate_anchor(&spec).unwrap();
        assert_eq!(result.capacity_kg, 1000.0);
        assert!(!result.osha_compliant);
        assert!(result.recommendation.contains("stronger anchor"));
    }

    #[test]
    fn test_concrete_anchor_capacity() {
        let spec = AnchorSpec::ConcreteAnchor {
            material: ConcreteAnchorStyle::Epoxy,
            diameter_mm: 12.0,
            embedment_depth_mm: 100.0,
        };
        let result = evaluate_anchor(&spec).unwrap();
        // 500 * 12 * 100 * 1.5 = 900000 kg
        assert_eq!(result.capacity_kg, 900_000.0);
        assert!(result.osha_compliant);
    }

    #[test]
    fn test_roof_anchor_restraint_only() {
        let spec = AnchorSpec::RoofAnchor {
            fastening: RoofAnchorFastening::ScrewDown,
            diameter_mm: 10.0,
        };
        let result = evaluate_anchor(&spec).unwrap();
        assert_eq!(result.capacity_kg, 800.0);
        assert!(!result.osha_compliant);
        assert!(result.recommendation.contains("restraint"));
    }

    #[test]
    fn test_anchor_dimension_validation() {
        let spec = AnchorSpec::RoofAnchor {
            fastening: RoofAnchorFastening::ThroughBolt,
            diameter_mm: 0.0,
        };
        assert!(evaluate_anchor(&spec).is_err());
    }

    #[test]
    fn test_anchor_spec_serialization() {
        let spec = AnchorSpec::ConcreteAnchor {
            material: ConcreteAnchorStyle::Wedge,
            diameter_mm: 16.0,
            embedment_depth_mm: 120.0,
        };
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("concrete-anchor"));
        assert!(json.contains("wedge"));
        let roundtrip: AnchorSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, roundtrip);
    }

    #[test]
    fn test_result_serialization_roundtrip() {
        let result = calculate(&arrest_setup()).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("clearance_required_m"));
        assert!(json.contains("free_fall_distance_m"));
        let roundtrip: FallProtectionResult = serde_json::from_str(&json).unwrap();
        assert!((result.impact_force_n - roundtrip.impact_force_n).abs() < 1e-9);
    }
}
