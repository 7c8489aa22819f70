//! # PPE Selection Assessment
//!
//! Derives a personal protective equipment loadout from the hazards present
//! on a task: scores each hazard, determines which of the eight PPE
//! categories are required, picks a specific item per category from a fixed
//! decision tree, and evaluates combined protection, compliance, comfort and
//! cost.
//!
//! ## Decision tables
//!
//! All tables in this module are immutable reference data. Item selection
//! priority matters: when several hazards co-occur, the first matching
//! branch in each category tree wins (e.g. head protection prefers the
//! electrical-rated hard hat over the chemical or impact variants).
//!
//! Layered protection combines under an independent-layer assumption:
//!
//! ```text
//! overall = 1 - product(1 - factor_i)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use safety_core::engines::ppe_selection::{
//!     calculate, HazardInput, HazardSeverity, HazardType, PpeSelectionInput,
//! };
//! use safety_core::industries::Industry;
//!
//! let input = PpeSelectionInput {
//!     task_description: "Tank cleaning".to_string(),
//!     industry: Industry::Manufacturing,
//!     task_duration_hr: Some(6.0),
//!     hazards: vec![HazardInput {
//!         hazard_type: HazardType::Chemical,
//!         severity: HazardSeverity::High,
//!     }],
//!     ambient_temp_c: None,
//!     humidity_pct: None,
//! };
//!
//! let result = calculate(&input).unwrap();
//! println!("Overall protection: {:.1}%", result.protection.overall * 100.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{SafetyError, SafetyResult};
use crate::industries::Industry;

/// Workplace hazard type driving PPE selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HazardType {
    Chemical,
    Mechanical,
    Thermal,
    Biological,
    Radiological,
    Electrical,
    Fall,
}

/// Declared severity of a hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HazardSeverity {
    High,
    Medium,
    Low,
}

impl HazardType {
    /// All hazard variants
    pub const ALL: [HazardType; 7] = [
        HazardType::Chemical,
        HazardType::Mechanical,
        HazardType::Thermal,
        HazardType::Biological,
        HazardType::Radiological,
        HazardType::Electrical,
        HazardType::Fall,
    ];

    /// Base risk score for a declared severity, before duration scaling.
    pub fn base_score(&self, severity: HazardSeverity) -> f64 {
        use HazardSeverity::*;
        match self {
            HazardType::Chemical => match severity {
                High => 9.0,
                Medium => 6.0,
                Low => 3.0,
            },
            HazardType::Mechanical => match severity {
                High => 8.0,
                Medium => 5.0,
                Low => 2.0,
            },
            HazardType::Thermal => match severity {
                High => 7.0,
                Medium => 4.0,
                Low => 1.0,
            },
            HazardType::Biological => match severity {
                High => 10.0,
                Medium => 7.0,
                Low => 4.0,
            },
            HazardType::Radiological => match severity {
                High => 9.0,
                Medium => 6.0,
                Low => 3.0,
            },
            HazardType::Electrical => match severity {
                High => 8.0,
                Medium => 5.0,
                Low => 2.0,
            },
            HazardType::Fall => match severity {
                High => 9.0,
                Medium => 6.0,
                Low => 3.0,
            },
        }
    }

    /// Rating thresholds for the unscaled score: (high_min, medium_min).
    fn rating_thresholds(&self) -> (f64, f64) {
        match self {
            HazardType::Chemical => (7.0, 4.0),
            HazardType::Mechanical => (6.0, 3.0),
            HazardType::Thermal => (5.0, 2.0),
            HazardType::Biological => (8.0, 5.0),
            HazardType::Radiological => (7.0, 4.0),
            HazardType::Electrical => (6.0, 3.0),
            HazardType::Fall => (7.0, 4.0),
        }
    }

    /// Rating description for this hazard type.
    fn describe(&self, rating: HazardRating) -> &'static str {
        use HazardRating::*;
        match self {
            HazardType::Chemical => match rating {
                High => "Chemical exposure requires highest level protection",
                Medium => "Chemical exposure requires adequate protection",
                Low => "Minimal chemical exposure risk",
            },
            HazardType::Mechanical => match rating {
                High => "High risk of impact/cut hazards",
                Medium => "Moderate mechanical hazard risk",
                Low => "Low mechanical hazard risk",
            },
            HazardType::Thermal => match rating {
                High => "Extreme temperature exposure",
                Medium => "Moderate temperature exposure",
                Low => "Normal temperature conditions",
            },
            HazardType::Biological => match rating {
                High => "Biological hazard requires isolation",
                Medium => "Biological hazard requires protection",
                Low => "Low biological hazard risk",
            },
            HazardType::Radiological => match rating {
                High => "Radiological hazard - specialized PPE required",
                Medium => "Moderate radiological hazard",
                Low => "Low radiological hazard risk",
            },
            HazardType::Electrical => match rating {
                High => "Electrical hazard - arc flash/electrocution risk",
                Medium => "Electrical hazard present",
                Low => "Minimal electrical hazard",
            },
            HazardType::Fall => match rating {
                High => "Fall hazard requires full arrest system",
                Medium => "Fall hazard requires restraint system",
                Low => "Minimal fall hazard",
            },
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            HazardType::Chemical => "Chemical",
            HazardType::Mechanical => "Mechanical",
            HazardType::Thermal => "Thermal",
            HazardType::Biological => "Biological",
            HazardType::Radiological => "Radiological",
            HazardType::Electrical => "Electrical",
            HazardType::Fall => "Fall",
        }
    }
}

impl std::fmt::Display for HazardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One hazard present on the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardInput {
    /// Hazard type
    pub hazard_type: HazardType,
    /// Declared severity
    pub severity: HazardSeverity,
}

/// Assessed rating of a hazard after scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardRating {
    High,
    Medium,
    Low,
}

/// Per-hazard assessment: rating, rationale and duration-scaled score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardAssessment {
    /// Hazard type
    pub hazard_type: HazardType,
    /// Rating from the per-type score thresholds
    pub rating: HazardRating,
    /// Rationale for the rating
    pub description: String,
    /// Score after duration scaling (x1.2 over 4h, x1.5 over 8h)
    pub risk_score: f64,
}

/// Overall task risk rolled up from the scaled hazard scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallRisk {
    High,
    Medium,
    Low,
}

/// PPE category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PpeCategory {
    Head,
    Eye,
    Hearing,
    Respiratory,
    Hand,
    Foot,
    Body,
    Fall,
}

impl PpeCategory {
    /// All categories in selection order
    pub const ALL: [PpeCategory; 8] = [
        PpeCategory::Head,
        PpeCategory::Eye,
        PpeCategory::Hearing,
        PpeCategory::Respiratory,
        PpeCategory::Hand,
        PpeCategory::Foot,
        PpeCategory::Body,
        PpeCategory::Fall,
    ];

    /// Purchase cost range for this category (low, high) in USD.
    pub fn cost_range_usd(&self) -> (f64, f64) {
        match self {
            PpeCategory::Head => (15.0, 50.0),
            PpeCategory::Eye => (5.0, 100.0),
            PpeCategory::Hearing => (2.0, 200.0),
            PpeCategory::Respiratory => (1.0, 1000.0),
            PpeCategory::Hand => (5.0, 50.0),
            PpeCategory::Foot => (50.0, 200.0),
            PpeCategory::Body => (20.0, 300.0),
            PpeCategory::Fall => (100.0, 500.0),
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            PpeCategory::Head => "Head Protection",
            PpeCategory::Eye => "Eye Protection",
            PpeCategory::Hearing => "Hearing Protection",
            PpeCategory::Respiratory => "Respiratory Protection",
            PpeCategory::Hand => "Hand Protection",
            PpeCategory::Foot => "Foot Protection",
            PpeCategory::Body => "Body Protection",
            PpeCategory::Fall => "Fall Protection",
        }
    }
}

impl std::fmt::Display for PpeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Protection level of one PPE item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtectionLevel {
    VeryHigh,
    High,
    Medium,
    Low,
}

impl ProtectionLevel {
    /// Hazard-reduction factor assumed for items at this level
    pub fn factor(&self) -> f64 {
        match self {
            ProtectionLevel::VeryHigh => 0.95,
            ProtectionLevel::High => 0.85,
            ProtectionLevel::Medium => 0.70,
            ProtectionLevel::Low => 0.50,
        }
    }
}

/// A specific equipment item selected for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpeItem {
    /// Item type name (e.g. "Class E Hard Hat")
    pub name: String,
    /// Descriptive text
    pub description: String,
    /// Standard citation (e.g. "ANSI/ISEA Z89.1 Class E")
    pub standard: String,
    /// Protection level of the item
    pub protection_level: ProtectionLevel,
    /// Assigned protection factor, for respirators
    pub protection_factor: Option<f64>,
}

impl PpeItem {
    fn new(
        name: &str,
        description: &str,
        standard: &str,
        protection_level: ProtectionLevel,
    ) -> Self {
        PpeItem {
            name: name.to_string(),
            description: description.to_string(),
            standard: standard.to_string(),
            protection_level,
            protection_factor: None,
        }
    }

    fn with_factor(mut self, factor: f64) -> Self {
        self.protection_factor = Some(factor);
        self
    }

    /// Effective hazard-reduction factor of this item.
    ///
    /// Respirators with an assigned protection factor use `1 - 1/PF`;
    /// everything else uses the level factor.
    pub fn effective_factor(&self) -> f64 {
        match self.protection_factor {
            Some(pf) if pf > 0.0 => 1.0 - 1.0 / pf,
            _ => self.protection_level.factor(),
        }
    }
}

/// One selected category/item pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpeSelection {
    /// PPE category
    pub category: PpeCategory,
    /// Selected item
    pub item: PpeItem,
}

/// Per-category and combined protection factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectionSummary {
    /// Factor per selected category, in selection order
    pub factors: Vec<CategoryFactor>,
    /// Combined factor under the independent-layer assumption
    pub overall: f64,
}

/// Protection factor for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryFactor {
    pub category: PpeCategory,
    pub factor: f64,
}

/// Standards and gap findings for the selected loadout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PpeCompliance {
    /// OSHA/NIOSH standard citations found
    pub osha: Vec<String>,
    /// ANSI standard citations found
    pub ansi: Vec<String>,
    /// NFPA standard citations found
    pub nfpa: Vec<String>,
    /// Required categories with no selected item
    pub missing: Vec<String>,
    /// Advisory findings
    pub warnings: Vec<String>,
}

impl PpeCompliance {
    /// True when no required category is missing
    pub fn is_compliant(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Comfort tier of the combined loadout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComfortLevel {
    Good,
    Moderate,
    Poor,
    Uncomfortable,
}

impl ComfortLevel {
    /// Map a comfort score to a tier
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ComfortLevel::Good
        } else if score >= 60.0 {
            ComfortLevel::Moderate
        } else if score >= 40.0 {
            ComfortLevel::Poor
        } else {
            ComfortLevel::Uncomfortable
        }
    }
}

/// Comfort and usability assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComfortAssessment {
    /// Comfort tier
    pub level: ComfortLevel,
    /// Score out of 100 after deductions
    pub score: f64,
    /// Issues behind the deductions
    pub issues: Vec<String>,
}

/// Cost estimate for the selected loadout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Cost per selected category, in selection order
    pub items: Vec<CategoryCost>,
    /// Total purchase cost (USD)
    pub purchase_usd: f64,
    /// Estimated daily usage cost, 10% of purchase (USD)
    pub daily_usd: f64,
    /// Cost for this task, scaled by duration over an 8-hour day (USD)
    pub task_usd: f64,
}

/// Purchase cost for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCost {
    pub category: PpeCategory,
    pub cost_usd: f64,
}

/// Input parameters for a PPE selection assessment.
///
/// ## JSON Example
///
/// ```json
/// {
///   "task_description": "Grinding in confined space",
///   "industry": "construction",
///   "task_duration_hr": 6.0,
///   "hazards": [
///     { "hazard_type": "mechanical", "severity": "high" },
///     { "hazard_type": "chemical", "severity": "medium" }
///   ],
///   "ambient_temp_c": 28.0,
///   "humidity_pct": 60.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PpeSelectionInput {
    /// Short description of the task
    pub task_description: String,

    /// Industry sector, for industry-specific equipment mandates
    pub industry: Industry,

    /// Task duration (hours); defaults to 8
    pub task_duration_hr: Option<f64>,

    /// Hazards present on the task; at least one, no duplicate types
    pub hazards: Vec<HazardInput>,

    /// Ambient temperature (C); defaults to 20
    pub ambient_temp_c: Option<f64>,

    /// Relative humidity (%); informational, defaults to 50
    pub humidity_pct: Option<f64>,
}

impl PpeSelectionInput {
    /// Task duration with the documented default applied
    pub fn task_duration_hr(&self) -> f64 {
        self.task_duration_hr.unwrap_or(8.0)
    }

    /// Ambient temperature with the documented default applied
    pub fn ambient_temp_c(&self) -> f64 {
        self.ambient_temp_c.unwrap_or(20.0)
    }

    /// True when a hazard of the given type is present
    pub fn has_hazard(&self, hazard_type: HazardType) -> bool {
        self.hazards.iter().any(|h| h.hazard_type == hazard_type)
    }

    /// Severity of a present hazard, if any
    pub fn severity_of(&self, hazard_type: HazardType) -> Option<HazardSeverity> {
        self.hazards
            .iter()
            .find(|h| h.hazard_type == hazard_type)
            .map(|h| h.severity)
    }

    /// Validate input parameters.
    ///
    /// Checks run in declared field order and stop at the first failure.
    pub fn validate(&self) -> SafetyResult<()> {
        if self.task_description.trim().is_empty() {
            return Err(SafetyError::missing_field("task_description"));
        }
        if self.hazards.is_empty() {
            return Err(SafetyError::missing_field("hazards"));
        }
        for (i, hazard) in self.hazards.iter().enumerate() {
            if self.hazards[..i]
                .iter()
                .any(|h| h.hazard_type == hazard.hazard_type)
            {
                return Err(SafetyError::invalid_input(
                    "hazards",
                    format!("{:?}", hazard.hazard_type),
                    "Each hazard type may appear at most once",
                ));
            }
        }
        if let Some(duration) = self.task_duration_hr {
            if duration <= 0.0 || duration > 24.0 {
                return Err(SafetyError::invalid_input(
                    "task_duration_hr",
                    duration.to_string(),
                    "Task duration must be between 0.1 and 24 hours",
                ));
            }
        }
        if let Some(temp) = self.ambient_temp_c {
            if !(-50.0..=60.0).contains(&temp) {
                return Err(SafetyError::invalid_input(
                    "ambient_temp_c",
                    temp.to_string(),
                    "Temperature must be between -50 and 60 C",
                ));
            }
        }
        if let Some(humidity) = self.humidity_pct {
            if !(0.0..=100.0).contains(&humidity) {
                return Err(SafetyError::invalid_input(
                    "humidity_pct",
                    humidity.to_string(),
                    "Relative humidity must be between 0 and 100 %",
                ));
            }
        }
        Ok(())
    }
}

/// Results from a PPE selection assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PpeSelectionResult {
    // === Echoed Input ===
    /// Task description
    pub task_description: String,
    /// Industry sector
    pub industry: Industry,
    /// Task duration used, after defaulting (hours)
    pub task_duration_hr: f64,
    /// Ambient temperature used, after defaulting (C)
    pub ambient_temp_c: f64,
    /// Humidity used, after defaulting (%)
    pub humidity_pct: f64,

    // === Classification ===
    /// Per-hazard assessments, in input order
    pub hazard_assessments: Vec<HazardAssessment>,
    /// Overall task risk
    pub overall_risk: OverallRisk,
    /// Required categories, in fixed category order
    pub required_categories: Vec<PpeCategory>,

    // === Selection ===
    /// Selected item per required category
    pub selections: Vec<PpeSelection>,
    /// Per-category and combined protection factors
    pub protection: ProtectionSummary,

    // === Compliance / Comfort / Cost ===
    /// Standards bucketing and gap findings
    pub compliance: PpeCompliance,
    /// Comfort assessment
    pub comfort: ComfortAssessment,
    /// Cost estimate
    pub cost: CostEstimate,

    // === Recommendations ===
    /// Ordered recommendations
    pub recommendations: Vec<String>,
}

/// Run a PPE selection assessment.
///
/// Pure function; identical inputs produce identical results.
pub fn calculate(input: &PpeSelectionInput) -> SafetyResult<PpeSelectionResult> {
    input.validate()?;

    let duration = input.task_duration_hr();
    let temperature = input.ambient_temp_c();

    let hazard_assessments = assess_hazards(input, duration);
    let overall_risk = overall_risk(&hazard_assessments);
    let required_categories = required_categories(&hazard_assessments);

    let selections: Vec<PpeSelection> = required_categories
        .iter()
        .map(|&category| PpeSelection {
            category,
            item: select_item(category, input, temperature),
        })
        .collect();

    let protection = protection_summary(&selections);
    let compliance = assess_compliance(&required_categories, &selections, input.industry);
    let comfort = assess_comfort(&selections, temperature, duration);
    let cost = estimate_cost(&selections, duration);

    let recommendations = build_recommendations(overall_risk, &compliance, &comfort);

    Ok(PpeSelectionResult {
        task_description: input.task_description.clone(),
        industry: input.industry,
        task_duration_hr: duration,
        ambient_temp_c: temperature,
        humidity_pct: input.humidity_pct.unwrap_or(50.0),
        hazard_assessments,
        overall_risk,
        required_categories,
        selections,
        protection,
        compliance,
        comfort,
        cost,
        recommendations,
    })
}

/// Score and rate each hazard.
///
/// The rating comes from the unscaled score against per-type thresholds;
/// the stored score is then scaled multiplicatively for long tasks
/// (x1.2 over 4 hours, x1.5 over 8 hours, applied in that order).
fn assess_hazards(input: &PpeSelectionInput, duration_hr: f64) -> Vec<HazardAssessment> {
    input
        .hazards
        .iter()
        .map(|hazard| {
            let base = hazard.hazard_type.base_score(hazard.severity);
            let (high_min, medium_min) = hazard.hazard_type.rating_thresholds();
            let rating = if base >= high_min {
                HazardRating::High
            } else if base >= medium_min {
                HazardRating::Medium
            } else {
                HazardRating::Low
            };

            let mut score = base;
            if duration_hr > 4.0 {
                score *= 1.2;
            }
            if duration_hr > 8.0 {
                score *= 1.5;
            }

            HazardAssessment {
                hazard_type: hazard.hazard_type,
                rating,
                description: hazard.hazard_type.describe(rating).to_string(),
                risk_score: score,
            }
        })
        .collect()
}

/// Roll the scaled hazard scores up into an overall risk: any score above 7
/// is High, above 4 Medium, otherwise Low.
fn overall_risk(assessments: &[HazardAssessment]) -> OverallRisk {
    let max_score = assessments
        .iter()
        .map(|a| a.risk_score)
        .fold(0.0_f64, f64::max);
    if max_score > 7.0 {
        OverallRisk::High
    } else if max_score > 4.0 {
        OverallRisk::Medium
    } else {
        OverallRisk::Low
    }
}

fn score_of(assessments: &[HazardAssessment], hazard_type: HazardType) -> Option<f64> {
    assessments
        .iter()
        .find(|a| a.hazard_type == hazard_type)
        .map(|a| a.risk_score)
}

/// Fixed category-requirement rule table over the present hazard types.
fn required_categories(assessments: &[HazardAssessment]) -> Vec<PpeCategory> {
    use HazardType::*;
    let present = |t: HazardType| assessments.iter().any(|a| a.hazard_type == t);

    let mut required = Vec::new();

    if present(Mechanical) || present(Electrical) || present(Fall) {
        required.push(PpeCategory::Head);
    }
    if present(Chemical) || present(Mechanical) || present(Thermal) || present(Radiological) {
        required.push(PpeCategory::Eye);
    }
    if score_of(assessments, Mechanical).is_some_and(|s| s > 5.0) {
        required.push(PpeCategory::Hearing);
    }
    if present(Chemical) || present(Biological) || present(Radiological) {
        required.push(PpeCategory::Respiratory);
    }
    if present(Chemical) || present(Mechanical) || present(Thermal) {
        required.push(PpeCategory::Hand);
    }
    if present(Mechanical) || present(Electrical) || present(Chemical) {
        required.push(PpeCategory::Foot);
    }
    if present(Chemical) || present(Thermal) || present(Radiological) || present(Biological) {
        required.push(PpeCategory::Body);
    }
    if score_of(assessments, Fall).is_some_and(|s| s > 4.0) {
        required.push(PpeCategory::Fall);
    }

    required
}

/// Dispatch to the per-category selection tree.
fn select_item(category: PpeCategory, input: &PpeSelectionInput, temperature_c: f64) -> PpeItem {
    match category {
        PpeCategory::Head => select_head(input),
        PpeCategory::Eye => select_eye(input),
        PpeCategory::Hearing => select_hearing(input),
        PpeCategory::Respiratory => select_respiratory(input),
        PpeCategory::Hand => select_hand(input, temperature_c),
        PpeCategory::Foot => select_foot(input),
        PpeCategory::Body => select_body(input, temperature_c),
        PpeCategory::Fall => select_fall(input),
    }
}

fn select_head(input: &PpeSelectionInput) -> PpeItem {
    if input.has_hazard(HazardType::Electrical) {
        PpeItem::new(
            "Class E Hard Hat",
            "Electrical hazard protection (20,000V)",
            "ANSI/ISEA Z89.1 Class E",
            ProtectionLevel::High,
        )
    } else if input.has_hazard(HazardType::Chemical) {
        PpeItem::new(
            "Bump Cap with Face Shield",
            "Chemical splash protection",
            "ANSI/ISEA Z89.1 Type 1",
            ProtectionLevel::Medium,
        )
    } else if input.has_hazard(HazardType::Mechanical) {
        PpeItem::new(
            "Type II Hard Hat",
            "Lateral impact protection",
            "ANSI/ISEA Z89.1 Type II",
            ProtectionLevel::High,
        )
    } else {
        PpeItem::new(
            "Basic Hard Hat",
            "General head protection",
            "ANSI/ISEA Z89.1 Type I",
            ProtectionLevel::Low,
        )
    }
}

fn select_eye(input: &PpeSelectionInput) -> PpeItem {
    if input.has_hazard(HazardType::Chemical) {
        PpeItem::new(
            "Chemical Splash Goggles",
            "Sealed splash protection",
            "ANSI Z87.1 D3",
            ProtectionLevel::High,
        )
    } else if input.has_hazard(HazardType::Mechanical) {
        PpeItem::new(
            "Safety Glasses with Side Shields",
            "Impact protection",
            "ANSI Z87.1+",
            ProtectionLevel::Medium,
        )
    } else if input.has_hazard(HazardType::Radiological) {
        PpeItem::new(
            "Welding Helmet",
            "UV/IR radiation protection",
            "ANSI Z87.1 & Z49.1",
            ProtectionLevel::High,
        )
    } else {
        PpeItem::new(
            "Basic Safety Glasses",
            "General eye protection",
            "ANSI Z87.1",
            ProtectionLevel::Low,
        )
    }
}

fn select_hearing(input: &PpeSelectionInput) -> PpeItem {
    if input.severity_of(HazardType::Mechanical) == Some(HazardSeverity::High) {
        PpeItem::new(
            "Earmuffs (NRR 30)",
            "High-attenuation over-ear protection",
            "ANSI S3.19",
            ProtectionLevel::High,
        )
    } else {
        PpeItem::new(
            "Foam Earplugs (NRR 29)",
            "Disposable in-ear protection",
            "ANSI S3.19",
            ProtectionLevel::Medium,
        )
    }
}

fn select_respiratory(input: &PpeSelectionInput) -> PpeItem {
    let has_chemical = input.has_hazard(HazardType::Chemical);
    let has_biological = input.has_hazard(HazardType::Biological);
    // First present chemical or biological hazard sets the severity context
    let severity = input
        .hazards
        .iter()
        .find(|h| {
            h.hazard_type == HazardType::Chemical || h.hazard_type == HazardType::Biological
        })
        .map(|h| h.severity)
        .unwrap_or(HazardSeverity::Low);

    if severity == HazardSeverity::High || (has_chemical && has_biological) {
        PpeItem::new(
            "PAPR with Full Facepiece",
            "Powered Air Purifying Respirator",
            "NIOSH 42 CFR 84",
            ProtectionLevel::VeryHigh,
        )
        .with_factor(1000.0)
    } else if severity == HazardSeverity::Medium {
        PpeItem::new(
            "Half Mask Respirator with Cartridges",
            "Chemical/organic vapor protection",
            "NIOSH 42 CFR 84",
            ProtectionLevel::High,
        )
        .with_factor(10.0)
    } else if has_chemical || has_biological {
        PpeItem::new(
            "N95 Respirator",
            "Particulate filtration",
            "NIOSH 42 CFR 84",
            ProtectionLevel::Medium,
        )
        .with_factor(10.0)
    } else {
        PpeItem::new(
            "Disposable Dust Mask",
            "Light dust protection",
            "NIOSH 42 CFR 84",
            ProtectionLevel::Low,
        )
        .with_factor(5.0)
    }
}

fn select_hand(input: &PpeSelectionInput, temperature_c: f64) -> PpeItem {
    if input.has_hazard(HazardType::Chemical) {
        PpeItem::new(
            "Chemical Resistant Gloves",
            "Nitrile or neoprene, 18 mil thickness",
            "ANSI/ISEA 105-2016",
            ProtectionLevel::High,
        )
    } else if input.has_hazard(HazardType::Mechanical) {
        PpeItem::new(
            "Cut Resistant Gloves",
            "Level 5 cut protection",
            "ANSI/ISEA 105-2016 A9",
            ProtectionLevel::High,
        )
    } else if input.has_hazard(HazardType::Thermal) {
        PpeItem::new(
            "Heat Resistant Gloves",
            "Kevlar/leather, 500F rating",
            "ANSI/ISEA 105-2016",
            ProtectionLevel::High,
        )
    } else if temperature_c < 10.0 {
        PpeItem::new(
            "Insulated Gloves",
            "Cold weather protection",
            "ANSI/ISEA 105-2016",
            ProtectionLevel::Medium,
        )
    } else {
        PpeItem::new(
            "General Purpose Gloves",
            "Leather or fabric",
            "ANSI/ISEA 105-2016",
            ProtectionLevel::Low,
        )
    }
}

fn select_foot(input: &PpeSelectionInput) -> PpeItem {
    if input.has_hazard(HazardType::Electrical) {
        PpeItem::new(
            "Electrical Hazard Safety Boots",
            "EH-rated outsole and toe protection",
            "ASTM F2413 EH",
            ProtectionLevel::High,
        )
    } else if input.has_hazard(HazardType::Chemical) {
        PpeItem::new(
            "Chemical Resistant Safety Boots",
            "Sealed construction with toe protection",
            "ASTM F2413",
            ProtectionLevel::High,
        )
    } else if input.has_hazard(HazardType::Mechanical) {
        PpeItem::new(
            "Steel Toe Boots",
            "Impact and compression protection",
            "ASTM F2413 I/75 C/75",
            ProtectionLevel::Medium,
        )
    } else {
        PpeItem::new(
            "General Safety Shoes",
            "Basic foot protection",
            "ASTM F2413",
            ProtectionLevel::Low,
        )
    }
}

fn select_body(input: &PpeSelectionInput, temperature_c: f64) -> PpeItem {
    if input.has_hazard(HazardType::Chemical) || input.has_hazard(HazardType::Biological) {
        PpeItem::new(
            "Chemical Protective Coverall",
            "Type 3/4 with sealed seams",
            "NFPA 1991/1992",
            ProtectionLevel::High,
        )
    } else if input.has_hazard(HazardType::Thermal) {
        PpeItem::new(
            "Flame Resistant Coverall",
            "Arc flash protection",
            "NFPA 70E",
            ProtectionLevel::High,
        )
    } else if temperature_c > 30.0 {
        PpeItem::new(
            "Cooling Vest",
            "Heat stress prevention",
            "General Use",
            ProtectionLevel::Medium,
        )
    } else if temperature_c < 5.0 {
        PpeItem::new(
            "Insulated Jacket",
            "Cold weather protection",
            "General Use",
            ProtectionLevel::Medium,
        )
    } else {
        PpeItem::new(
            "High Visibility Vest",
            "Visibility enhancement",
            "ANSI/ISEA 107-2020",
            ProtectionLevel::Low,
        )
    }
}

fn select_fall(input: &PpeSelectionInput) -> PpeItem {
    if input.severity_of(HazardType::Fall) == Some(HazardSeverity::High) {
        PpeItem::new(
            "Full Body Harness with Self-Retracting Lifeline",
            "Complete fall arrest system",
            "ANSI/ASSP Z359.14",
            ProtectionLevel::High,
        )
    } else {
        PpeItem::new(
            "Full Body Harness with Restraint Lanyard",
            "Work positioning and restraint",
            "ANSI/ASSP Z359.3",
            ProtectionLevel::Medium,
        )
    }
}

/// Combine per-item factors under the independent-layer assumption.
fn protection_summary(selections: &[PpeSelection]) -> ProtectionSummary {
    let mut unprotected = 1.0;
    let factors: Vec<CategoryFactor> = selections
        .iter()
        .map(|selection| {
            let factor = selection.item.effective_factor();
            unprotected *= 1.0 - factor;
            CategoryFactor {
                category: selection.category,
                factor,
            }
        })
        .collect();

    ProtectionSummary {
        factors,
        overall: 1.0 - unprotected,
    }
}

/// Bucket standards by substring and flag missing or mandated categories.
fn assess_compliance(
    required: &[PpeCategory],
    selections: &[PpeSelection],
    industry: Industry,
) -> PpeCompliance {
    let mut compliance = PpeCompliance::default();
    let selected = |category: PpeCategory| selections.iter().any(|s| s.category == category);

    for &category in required {
        if !selected(category) {
            compliance.missing.push(category.display_name().to_string());
        }
    }

    for selection in selections {
        let standard = &selection.item.standard;
        let label = selection.category.display_name();
        if standard.is_empty() {
            compliance
                .warnings
                .push(format!("{}: No standard specified", label));
            continue;
        }
        if standard.contains("ANSI") {
            compliance.ansi.push(format!("{}: {}", label, standard));
        }
        if standard.contains("NFPA") {
            compliance.nfpa.push(format!("{}: {}", label, standard));
        }
        if standard.contains("NIOSH") || standard.contains("OSHA") {
            compliance.osha.push(format!("{}: Compliant", label));
        }
    }

    if industry == Industry::Construction {
        if !selected(PpeCategory::Head) {
            compliance
                .missing
                .push("Head Protection (hard hat required)".to_string());
        }
        if !selected(PpeCategory::Foot) {
            compliance
                .missing
                .push("Foot Protection (safety boots required)".to_string());
        }
    }

    if industry == Industry::Healthcare
        && !selected(PpeCategory::Respiratory)
        && !selected(PpeCategory::Eye)
    {
        compliance
            .warnings
            .push("Consider face shield for droplet protection".to_string());
    }

    compliance
}

/// Score comfort starting from 100 with the fixed deduction set.
fn assess_comfort(
    selections: &[PpeSelection],
    temperature_c: f64,
    duration_hr: f64,
) -> ComfortAssessment {
    let mut score = 100.0;
    let mut issues: Vec<String> = Vec::new();
    let has_body = selections.iter().any(|s| s.category == PpeCategory::Body);

    if temperature_c > 25.0 && has_body {
        score -= 20.0;
        issues.push("Body protection may cause heat stress in warm conditions".to_string());
    }

    if temperature_c < 10.0 && !has_body {
        score -= 15.0;
        issues.push("Consider additional insulation for cold conditions".to_string());
    }

    if duration_hr > 4.0 {
        score -= 10.0;
        issues.push("Extended wear may reduce comfort".to_string());
    }

    if duration_hr > 8.0 {
        score -= 15.0;
        issues.push("Consider PPE rotation for tasks >8 hours".to_string());
    }

    let count = selections.len();
    if count > 4 {
        score -= (count - 4) as f64 * 5.0;
        issues.push("Multiple PPE items may reduce mobility".to_string());
    }

    ComfortAssessment {
        level: ComfortLevel::from_score(score),
        score,
        issues,
    }
}

/// Interpolate item cost within the category range by protection level, with
/// named-item overrides.
fn item_cost_usd(category: PpeCategory, item: &PpeItem) -> f64 {
    let (low, high) = category.cost_range_usd();
    let mut cost = match item.protection_level {
        ProtectionLevel::VeryHigh => high * 0.8,
        ProtectionLevel::High => high * 0.6,
        ProtectionLevel::Medium => (low + high) / 2.0,
        ProtectionLevel::Low => low * 1.2,
    };

    if item.name.contains("PAPR") {
        cost = 800.0;
    }
    if item.name.contains("Welding") {
        cost = 150.0;
    }

    cost
}

fn estimate_cost(selections: &[PpeSelection], duration_hr: f64) -> CostEstimate {
    let items: Vec<CategoryCost> = selections
        .iter()
        .map(|selection| CategoryCost {
            category: selection.category,
            cost_usd: item_cost_usd(selection.category, &selection.item),
        })
        .collect();

    let purchase: f64 = items.iter().map(|i| i.cost_usd).sum();
    let daily = purchase * 0.1;

    CostEstimate {
        items,
        purchase_usd: purchase,
        daily_usd: daily,
        task_usd: daily * duration_hr / 8.0,
    }
}

/// Build the ordered recommendation list.
fn build_recommendations(
    overall_risk: OverallRisk,
    compliance: &PpeCompliance,
    comfort: &ComfortAssessment,
) -> Vec<String> {
    let mut recs: Vec<String> = vec![
        "Conduct PPE fit testing for all items".to_string(),
        "Train workers on proper donning/doffing procedures".to_string(),
        "Establish PPE inspection and maintenance program".to_string(),
    ];

    if overall_risk == OverallRisk::High {
        recs.push("Implement buddy system for high-risk tasks".to_string());
        recs.push("Consider additional engineering controls".to_string());
        recs.push("Establish emergency response procedures".to_string());
    }

    if !compliance.is_compliant() {
        recs.push(format!(
            "Address missing PPE: {}",
            compliance.missing.join(", ")
        ));
    }

    if !compliance.warnings.is_empty() {
        recs.push(format!(
            "Address standards issues: {}",
            compliance.warnings.join(", ")
        ));
    }

    if matches!(comfort.level, ComfortLevel::Poor | ComfortLevel::Uncomfortable) {
        for issue in &comfort.issues {
            recs.push(format!("Address comfort: {}", issue));
        }
        recs.push("Consider PPE with better ergonomics".to_string());
        recs.push("Implement regular comfort breaks".to_string());
    }

    recs.push("Establish PPE replacement schedule based on manufacturer guidelines".to_string());
    recs.push("Store PPE properly to maintain effectiveness".to_string());

    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hazard(hazard_type: HazardType, severity: HazardSeverity) -> HazardInput {
        HazardInput {
            hazard_type,
            severity,
        }
    }

    fn chemical_task() -> PpeSelectionInput {
        PpeSelectionInput {
            task_description: "Solvent transfer and grinding".to_string(),
            industry: Industry::Manufacturing,
            task_duration_hr: Some(8.0),
            hazards: vec![
                hazard(HazardType::Chemical, HazardSeverity::High),
                hazard(HazardType::Mechanical, HazardSeverity::Medium),
            ],
            ambient_temp_c: Some(20.0),
            humidity_pct: Some(50.0),
        }
    }

    #[test]
    fn test_hazard_scoring_and_ratings() {
        let result = calculate(&chemical_task()).unwrap();
        let chem = &result.hazard_assessments[0];
        // Chemical high: base 9, rating High, scaled x1.2 for the 8h task
        assert_eq!(chem.rating, HazardRating::High);
        assert!((chem.risk_score - 10.8).abs() < 1e-9);

        let mech = &result.hazard_assessments[1];
        assert_eq!(mech.rating, HazardRating::Medium);
        assert!((mech.risk_score - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_duration_scaling_applied_in_order() {
        let mut input = chemical_task();
        input.hazards = vec![hazard(HazardType::Chemical, HazardSeverity::Low)];
        input.task_duration_hr = Some(10.0);
        let result = calculate(&input).unwrap();
        // base 3, x1.2 then x1.5 = 5.4
        assert!((result.hazard_assessments[0].risk_score - 5.4).abs() < 1e-9);
        // Rating still reflects the unscaled score
        assert_eq!(result.hazard_assessments[0].rating, HazardRating::Low);
        assert_eq!(result.overall_risk, OverallRisk::Medium);
    }

    #[test]
    fn test_required_categories() {
        let result = calculate(&chemical_task()).unwrap();
        // Chemical + mechanical trigger everything except fall protection;
        // hearing comes in because the scaled mechanical score (6.0) > 5
        assert_eq!(
            result.required_categories,
            vec![
                PpeCategory::Head,
                PpeCategory::Eye,
                PpeCategory::Hearing,
                PpeCategory::Respiratory,
                PpeCategory::Hand,
                PpeCategory::Foot,
                PpeCategory::Body,
            ]
        );
    }

    #[test]
    fn test_hearing_threshold() {
        let mut input = chemical_task();
        input.hazards = vec![hazard(HazardType::Mechanical, HazardSeverity::Low)];
        input.task_duration_hr = Some(2.0);
        let result = calculate(&input).unwrap();
        // Mechanical low scores 2, below the hearing threshold
        assert!(!result.required_categories.contains(&PpeCategory::Hearing));
    }

    #[test]
    fn test_fall_category_threshold() {
        let mut input = chemical_task();
        input.hazards = vec![hazard(HazardType::Fall, HazardSeverity::Low)];
        input.task_duration_hr = Some(2.0);
        let result = calculate(&input).unwrap();
        // Fall low scores 3: head protection is required but not the fall
        // arrest category itself
        assert!(result.required_categories.contains(&PpeCategory::Head));
        assert!(!result.required_categories.contains(&PpeCategory::Fall));

        input.hazards = vec![hazard(HazardType::Fall, HazardSeverity::Medium)];
        let result = calculate(&input).unwrap();
        assert!(result.required_categories.contains(&PpeCategory::Fall));
    }

    #[test]
    fn test_head_selection_priority() {
        // Electrical wins over chemical and mechanical
        let mut input = chemical_task();
        input.hazards = vec![
            hazard(HazardType::Chemical, HazardSeverity::Medium),
            hazard(HazardType::Electrical, HazardSeverity::Medium),
            hazard(HazardType::Mechanical, HazardSeverity::Medium),
        ];
        let result = calculate(&input).unwrap();
        let head = result
            .selections
            .iter()
            .find(|s| s.category == PpeCategory::Head)
            .unwrap();
        assert_eq!(head.item.name, "Class E Hard Hat");
    }

    #[test]
    fn test_respiratory_selection() {
        let result = calculate(&chemical_task()).unwrap();
        let respirator = result
            .selections
            .iter()
            .find(|s| s.category == PpeCategory::Respiratory)
            .unwrap();
        // Chemical severity is high, so the PAPR is selected
        assert_eq!(respirator.item.name, "PAPR with Full Facepiece");
        assert_eq!(respirator.item.protection_factor, Some(1000.0));
        // Respiratory factor overridden to 1 - 1/PF
        assert!((respirator.item.effective_factor() - 0.999).abs() < 1e-9);
    }

    #[test]
    fn test_respiratory_medium_severity() {
        let mut input = chemical_task();
        input.hazards = vec![hazard(HazardType::Chemical, HazardSeverity::Medium)];
        let result = calculate(&input).unwrap();
        let respirator = result
            .selections
            .iter()
            .find(|s| s.category == PpeCategory::Respiratory)
            .unwrap();
        assert_eq!(respirator.item.name, "Half Mask Respirator with Cartridges");
    }

    #[test]
    fn test_combined_chemical_biological_forces_papr() {
        let mut input = chemical_task();
        input.hazards = vec![
            hazard(HazardType::Chemical, HazardSeverity::Low),
            hazard(HazardType::Biological, HazardSeverity::Low),
        ];
        let result = calculate(&input).unwrap();
        let respirator = result
            .selections
            .iter()
            .find(|s| s.category == PpeCategory::Respiratory)
            .unwrap();
        assert_eq!(respirator.item.name, "PAPR with Full Facepiece");
    }

    #[test]
    fn test_body_selection_by_temperature() {
        let mut input = chemical_task();
        input.hazards = vec![hazard(HazardType::Radiological, HazardSeverity::Low)];
        input.ambient_temp_c = Some(35.0);
        let result = calculate(&input).unwrap();
        let body = result
            .selections
            .iter()
            .find(|s| s.category == PpeCategory::Body)
            .unwrap();
        assert_eq!(body.item.name, "Cooling Vest");
    }

    #[test]
    fn test_protection_combination() {
        let selections = vec![
            PpeSelection {
                category: PpeCategory::Head,
                item: PpeItem::new("A", "", "ANSI X", ProtectionLevel::High),
            },
            PpeSelection {
                category: PpeCategory::Eye,
                item: PpeItem::new("B", "", "ANSI Y", ProtectionLevel::Medium),
            },
        ];
        let summary = protection_summary(&selections);
        // 1 - (1-0.85)(1-0.70) = 0.955
        assert!((summary.overall - 0.955).abs() < 1e-9);
        assert_eq!(summary.factors.len(), 2);
    }

    #[test]
    fn test_overall_protection_with_papr() {
        let result = calculate(&chemical_task()).unwrap();
        assert!(result.protection.overall > 0.999);
        assert!(result.protection.overall < 1.0);
    }

    #[test]
    fn test_standards_bucketing() {
        let result = calculate(&chemical_task()).unwrap();
        assert!(result.compliance.ansi.iter().any(|s| s.contains("Z87.1")));
        assert!(result
            .compliance
            .nfpa
            .iter()
            .any(|s| s.contains("NFPA 1991/1992")));
        assert!(result
            .compliance
            .osha
            .iter()
            .any(|s| s.contains("Respiratory")));
        assert!(result.compliance.is_compliant());
    }

    #[test]
    fn test_construction_mandates() {
        let input = PpeSelectionInput {
            task_description: "Torch cutting".to_string(),
            industry: Industry::Construction,
            task_duration_hr: Some(2.0),
            hazards: vec![hazard(HazardType::Thermal, HazardSeverity::Low)],
            ambient_temp_c: Some(20.0),
            humidity_pct: None,
        };
        let result = calculate(&input).unwrap();
        // Thermal alone requires neither head nor foot protection, but
        // construction mandates both
        assert!(!result.compliance.is_compliant());
        assert_eq!(result.compliance.missing.len(), 2);
        assert!(result
            .recommendations
            .iter()
            .any(|r| r.starts_with("Address missing PPE")));
    }

    #[test]
    fn test_healthcare_droplet_warning() {
        let input = PpeSelectionInput {
            task_description: "Patient lifting".to_string(),
            industry: Industry::Healthcare,
            task_duration_hr: Some(2.0),
            hazards: vec![hazard(HazardType::Fall, HazardSeverity::Medium)],
            ambient_temp_c: Some(20.0),
            humidity_pct: None,
        };
        let result = calculate(&input).unwrap();
        assert!(result
            .compliance
            .warnings
            .iter()
            .any(|w| w.contains("droplet")));
    }

    #[test]
    fn test_comfort_deductions() {
        let result = calculate(&chemical_task()).unwrap();
        // 8h task: -10 for extended wear; 7 selections: -15 for count over 4
        assert_eq!(result.comfort.score, 75.0);
        assert_eq!(result.comfort.level, ComfortLevel::Moderate);
        assert_eq!(result.comfort.issues.len(), 2);
    }

    #[test]
    fn test_comfort_tiers() {
        assert_eq!(ComfortLevel::from_score(80.0), ComfortLevel::Good);
        assert_eq!(ComfortLevel::from_score(79.9), ComfortLevel::Moderate);
        assert_eq!(ComfortLevel::from_score(59.9), ComfortLevel::Poor);
        assert_eq!(ComfortLevel::from_score(39.9), ComfortLevel::Uncomfortable);
    }

    #[test]
    fn test_papr_cost_override() {
        let result = calculate(&chemical_task()).unwrap();
        let respiratory_cost = result
            .cost
            .items
            .iter()
            .find(|c| c.category == PpeCategory::Respiratory)
            .unwrap();
        assert_eq!(respiratory_cost.cost_usd, 800.0);
        assert!((result.cost.daily_usd - result.cost.purchase_usd * 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_task_cost_scales_with_duration() {
        let mut input = chemical_task();
        input.task_duration_hr = Some(4.0);
        let result = calculate(&input).unwrap();
        assert!((result.cost.task_usd - result.cost.daily_usd * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_validation_empty_description() {
        let mut input = chemical_task();
        input.task_description = "  ".to_string();
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_validation_no_hazards() {
        let mut input = chemical_task();
        input.hazards.clear();
        let err = calculate(&input).unwrap_err();
        assert!(err.to_string().contains("hazards"));
    }

    #[test]
    fn test_validation_duplicate_hazard() {
        let mut input = chemical_task();
        input
            .hazards
            .push(hazard(HazardType::Chemical, HazardSeverity::Low));
        let err = calculate(&input).unwrap_err();
        assert!(err.to_string().contains("at most once"));
    }

    #[test]
    fn test_determinism() {
        let input = chemical_task();
        let first = serde_json::to_string(&calculate(&input).unwrap()).unwrap();
        let second = serde_json::to_string(&calculate(&input).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let result = calculate(&chemical_task()).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("required_categories"));
        assert!(json.contains("protection"));
        let roundtrip: PpeSelectionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result.selections.len(), roundtrip.selections.len());
    }
}
