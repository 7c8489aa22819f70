//! # Training Needs Assessment
//!
//! Derives a safety training program from workforce and regulatory
//! parameters: which courses are mandatory, how many hours they take, what
//! delivery will cost, how effective the current program is, and what the
//! investment returns over a three-year horizon.
//!
//! The course catalog, hour figures and cost factors are immutable reference
//! data compiled into this module.
//!
//! ## Example
//!
//! ```rust
//! use safety_core::engines::training_needs::{
//!     calculate, CompanySize, ExperienceLevel, Jurisdiction, TrainingFrequency,
//!     TrainingMethod, TrainingNeedsInput,
//! };
//! use safety_core::industries::Industry;
//!
//! let input = TrainingNeedsInput {
//!     company_size: CompanySize::Medium,
//!     industry: Industry::Manufacturing,
//!     location: Jurisdiction::Usa,
//!     total_employees: 80,
//!     new_hires: 5,
//!     turnover_rate: 0.08,
//!     experience_level: ExperienceLevel::Intermediate,
//!     current_training_hours: 30.0,
//!     training_frequency: TrainingFrequency::Quarterly,
//!     training_method: TrainingMethod::Blended,
//!     certification_required: false,
//!     regulations: vec![],
//! };
//!
//! let result = calculate(&input).unwrap();
//! println!("{} mandatory courses", result.needs.mandatory.len());
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::compliance::ComplianceReport;
use crate::errors::{SafetyError, SafetyResult};
use crate::industries::Industry;

/// Default hours for courses without a catalog entry
const DEFAULT_COURSE_HOURS: f64 = 4.0;

/// Flat hours added when certification preparation is required
const CERTIFICATION_HOURS: f64 = 40.0;

/// Training cycle over which totals are annualized (years)
const CYCLE_YEARS: f64 = 3.0;

/// Average loaded wage for productivity cost (USD/hr)
const PRODUCTIVITY_WAGE_USD: f64 = 50.0;

/// Burdened employee rate for annual training time (USD/hr)
const BURDENED_RATE_USD: f64 = 35.0;

/// Content development cost for online/blended delivery (USD/hr)
const DEVELOPMENT_COST_USD: f64 = 150.0;

/// OSHA baseline courses required in every program.
pub const OSHA_BASELINE: [&str; 12] = [
    "Hazard Communication",
    "Emergency Action Plan",
    "Fire Prevention",
    "Personal Protective Equipment",
    "Lockout/Tagout",
    "Electrical Safety",
    "Machine Guarding",
    "Bloodborne Pathogens",
    "Confined Space",
    "Fall Protection",
    "Respiratory Protection",
    "Hearing Conservation",
];

/// Course hours catalog.
static BASE_COURSE_HOURS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("Hazard Communication", 4.0),
        ("Emergency Action Plan", 2.0),
        ("Fire Prevention", 2.0),
        ("Personal Protective Equipment", 4.0),
        ("Lockout/Tagout", 8.0),
        ("Electrical Safety", 8.0),
        ("Machine Guarding", 4.0),
        ("Bloodborne Pathogens", 4.0),
        ("Confined Space", 8.0),
        ("Fall Protection", 8.0),
        ("Respiratory Protection", 8.0),
        ("Hearing Conservation", 2.0),
        ("Scaffold Safety", 8.0),
        ("Excavation Safety", 8.0),
        ("Crane Safety", 16.0),
        ("Steel Erection", 8.0),
        ("Powered Industrial Trucks", 8.0),
        ("Process Safety Management", 16.0),
        ("Machine Safety", 8.0),
        ("Chemical Safety", 8.0),
        ("Noise Control", 4.0),
        ("Ergonomics", 4.0),
        ("Infection Control", 4.0),
        ("Sharps Safety", 2.0),
        ("Patient Handling", 8.0),
        ("Radiation Safety", 16.0),
        ("Laboratory Safety", 8.0),
        ("Process Safety", 16.0),
        ("H2S Safety", 8.0),
        ("Well Control", 40.0),
        ("Offshore Safety", 16.0),
        ("Hot Work", 4.0),
        ("Defensive Driving", 8.0),
        ("Hazardous Materials", 8.0),
        ("Hours of Service", 4.0),
        ("Vehicle Maintenance", 4.0),
        ("Loading/Unloading", 4.0),
        ("OH&S Management System", 16.0),
        ("Risk Assessment Training", 8.0),
        ("Incident Investigation", 8.0),
        ("Hazardous Waste Management", 8.0),
        ("Waste Minimization", 4.0),
        ("Hazardous Materials Transportation", 16.0),
        ("Safety Leadership Training", 16.0),
        ("Behavior-Based Safety", 8.0),
        ("Root Cause Analysis", 8.0),
        ("Audit and Inspection", 8.0),
        ("New Employee Orientation", 8.0),
        ("Mentorship Program", 4.0),
        ("On-the-Job Training", 40.0),
    ])
});

/// Catalog lookup with the documented 4-hour default for unlisted courses.
pub fn course_hours(name: &str) -> f64 {
    BASE_COURSE_HOURS
        .get(name)
        .copied()
        .unwrap_or(DEFAULT_COURSE_HOURS)
}

/// Industry-specific mandatory courses.
fn industry_courses(industry: Industry) -> &'static [&'static str] {
    match industry {
        Industry::Construction => &[
            "Scaffold Safety",
            "Excavation Safety",
            "Crane Safety",
            "Steel Erection",
            "Powered Industrial Trucks",
        ],
        Industry::Manufacturing => &[
            "Process Safety Management",
            "Machine Safety",
            "Chemical Safety",
            "Noise Control",
            "Ergonomics",
        ],
        Industry::Healthcare => &[
            "Infection Control",
            "Sharps Safety",
            "Patient Handling",
            "Radiation Safety",
            "Laboratory Safety",
        ],
        Industry::OilGas => &[
            "Process Safety",
            "H2S Safety",
            "Well Control",
            "Offshore Safety",
            "Hot Work",
        ],
        Industry::Transportation => &[
            "Defensive Driving",
            "Hazardous Materials",
            "Hours of Service",
            "Vehicle Maintenance",
            "Loading/Unloading",
        ],
        _ => &[],
    }
}

/// Organization headcount band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CompanySize {
    Small,
    #[default]
    Medium,
    Large,
    VeryLarge,
}

impl CompanySize {
    /// True for the bands that trigger leadership/program courses
    pub fn is_large(&self) -> bool {
        matches!(self, CompanySize::Large | CompanySize::VeryLarge)
    }
}

/// Average workforce experience level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ExperienceLevel {
    Novice,
    #[default]
    Intermediate,
    Experienced,
    Expert,
}

impl ExperienceLevel {
    /// Hour multiplier for this experience level
    pub fn multiplier(&self) -> f64 {
        match self {
            ExperienceLevel::Novice => 1.5,
            ExperienceLevel::Intermediate => 1.0,
            ExperienceLevel::Experienced => 0.8,
            ExperienceLevel::Expert => 0.6,
        }
    }
}

/// Training delivery method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TrainingMethod {
    #[default]
    InPerson,
    Online,
    Blended,
    OnTheJob,
}

impl TrainingMethod {
    /// Sum of the per-hour delivery cost factors (USD/hr).
    ///
    /// In-person: instructor 100 + materials 25 + facility 50 + travel 75.
    /// Online: platform 50 + development 100 + administration 25 + support 15.
    /// Blended: instructor 50 + platform 25 + materials 20 + facility 25 +
    /// development 50. On-the-job: mentor 75 + materials 10 + lost
    /// productivity 50.
    pub fn cost_per_hour_usd(&self) -> f64 {
        match self {
            TrainingMethod::InPerson => 250.0,
            TrainingMethod::Online => 190.0,
            TrainingMethod::Blended => 170.0,
            TrainingMethod::OnTheJob => 135.0,
        }
    }

    /// Retention effectiveness factor
    pub fn effectiveness_factor(&self) -> f64 {
        match self {
            TrainingMethod::InPerson => 0.85,
            TrainingMethod::Online => 0.75,
            TrainingMethod::Blended => 0.90,
            TrainingMethod::OnTheJob => 0.80,
        }
    }

    /// True for methods with a one-time content development cost
    pub fn has_development_cost(&self) -> bool {
        matches!(self, TrainingMethod::Online | TrainingMethod::Blended)
    }
}

/// How often refresher training is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TrainingFrequency {
    Daily,
    Weekly,
    Monthly,
    #[default]
    Quarterly,
    Yearly,
    AsNeeded,
}

impl TrainingFrequency {
    /// Retention effectiveness factor
    pub fn effectiveness_factor(&self) -> f64 {
        match self {
            TrainingFrequency::Daily => 0.95,
            TrainingFrequency::Weekly => 0.90,
            TrainingFrequency::Monthly => 0.85,
            TrainingFrequency::Quarterly => 0.80,
            TrainingFrequency::Yearly => 0.70,
            TrainingFrequency::AsNeeded => 0.60,
        }
    }
}

/// Jurisdiction for minimum-hours compliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Jurisdiction {
    Usa,
    Eu,
    Canada,
    Australia,
    Uk,
    /// Documented fallback: 8 hours per year
    #[default]
    Other,
}

impl Jurisdiction {
    /// Minimum annual training hours per employee
    pub fn minimum_annual_hours(&self) -> f64 {
        match self {
            Jurisdiction::Usa => 10.0,
            Jurisdiction::Eu => 8.0,
            Jurisdiction::Canada => 12.0,
            Jurisdiction::Australia => 10.0,
            Jurisdiction::Uk => 8.0,
            Jurisdiction::Other => 8.0,
        }
    }
}

/// Regulatory framework the organization is subject to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Regulation {
    Osha,
    Iso45001,
    Rcra,
    Dot,
}

/// Input parameters for a training needs assessment.
///
/// ## JSON Example
///
/// ```json
/// {
///   "company_size": "large",
///   "industry": "construction",
///   "location": "usa",
///   "total_employees": 100,
///   "new_hires": 15,
///   "turnover_rate": 0.1,
///   "experience_level": "intermediate",
///   "current_training_hours": 20.0,
///   "training_frequency": "yearly",
///   "training_method": "in-person",
///   "certification_required": false,
///   "regulations": ["osha"]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingNeedsInput {
    /// Organization size band
    pub company_size: CompanySize,

    /// Industry sector
    pub industry: Industry,

    /// Jurisdiction for minimum-hours rules
    pub location: Jurisdiction,

    /// Employee headcount
    pub total_employees: u32,

    /// New hires this year
    #[serde(default)]
    pub new_hires: u32,

    /// Annual turnover as a fraction in [0, 1]
    #[serde(default)]
    pub turnover_rate: f64,

    /// Average workforce experience
    pub experience_level: ExperienceLevel,

    /// Training hours already delivered per employee over the cycle
    #[serde(default)]
    pub current_training_hours: f64,

    /// Refresher frequency
    pub training_frequency: TrainingFrequency,

    /// Delivery method
    pub training_method: TrainingMethod,

    /// Whether certification preparation is required
    #[serde(default)]
    pub certification_required: bool,

    /// Applicable regulatory frameworks; no duplicates
    #[serde(default)]
    pub regulations: Vec<Regulation>,
}

impl TrainingNeedsInput {
    /// Validate input parameters.
    ///
    /// Checks run in declared field order and stop at the first failure.
    pub fn validate(&self) -> SafetyResult<()> {
        if self.total_employees == 0 {
            return Err(SafetyError::invalid_input(
                "total_employees",
                "0",
                "Employee count must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.turnover_rate) {
            return Err(SafetyError::invalid_input(
                "turnover_rate",
                self.turnover_rate.to_string(),
                "Turnover rate must be a fraction between 0 and 1",
            ));
        }
        if self.current_training_hours < 0.0 {
            return Err(SafetyError::invalid_input(
                "current_training_hours",
                self.current_training_hours.to_string(),
                "Current training hours cannot be negative",
            ));
        }
        for (i, regulation) in self.regulations.iter().enumerate() {
            if self.regulations[..i].contains(regulation) {
                return Err(SafetyError::invalid_input(
                    "regulations",
                    format!("{:?}", regulation),
                    "Each regulation may appear at most once",
                ));
            }
        }
        Ok(())
    }

    fn has_regulation(&self, regulation: Regulation) -> bool {
        self.regulations.contains(&regulation)
    }
}

/// Mandatory and recommended course sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingNeeds {
    /// Mandatory courses: OSHA baseline + industry list + regulation
    /// additions, in that order
    pub mandatory: Vec<String>,
    /// Recommended courses triggered by size and new-hire ratio
    pub recommended: Vec<String>,
}

impl TrainingNeeds {
    /// Total number of courses
    pub fn total_modules(&self) -> usize {
        self.mandatory.len() + self.recommended.len()
    }
}

/// Hour totals after experience and certification adjustments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoursRequired {
    /// Mandatory course hours after the experience multiplier
    pub mandatory_hr: f64,
    /// Recommended course hours after the experience multiplier
    pub recommended_hr: f64,
    /// Flat certification preparation hours
    pub certification_hr: f64,
    /// Total hours over the three-year cycle
    pub total_hr: f64,
    /// Annual hours per employee (total over three years)
    pub annual_per_employee_hr: f64,
    /// Quarterly hours per employee
    pub quarterly_per_employee_hr: f64,
}

/// Program cost breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingCosts {
    /// Delivery costs at the method's per-hour factor sum (USD)
    pub direct_usd: f64,
    /// Lost productivity across the workforce (USD)
    pub productivity_usd: f64,
    /// Burdened cost of annual employee training time (USD)
    pub employee_usd: f64,
    /// One-time content development for online/blended delivery (USD)
    pub development_usd: f64,
    /// Total program cost over the cycle (USD)
    pub total_usd: f64,
    /// Total cost per employee (USD)
    pub per_employee_usd: f64,
    /// Annualized cost (USD/year)
    pub annual_usd: f64,
}

/// Effectiveness tier of the current program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectivenessTier {
    Excellent,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl EffectivenessTier {
    /// Map an effectiveness score to a tier
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            EffectivenessTier::Excellent
        } else if score >= 80.0 {
            EffectivenessTier::Good
        } else if score >= 70.0 {
            EffectivenessTier::Fair
        } else if score >= 60.0 {
            EffectivenessTier::Poor
        } else {
            EffectivenessTier::VeryPoor
        }
    }

    /// Summary of what the tier means
    pub fn description(&self) -> &'static str {
        match self {
            EffectivenessTier::Excellent => "Comprehensive and effective training program",
            EffectivenessTier::Good => "Effective training with room for improvement",
            EffectivenessTier::Fair => "Basic training coverage, needs enhancement",
            EffectivenessTier::Poor => "Inadequate training, significant improvements needed",
            EffectivenessTier::VeryPoor => {
                "Critical training deficiencies - immediate action required"
            }
        }
    }
}

/// Effectiveness of the current program against the requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effectiveness {
    /// Effectiveness tier
    pub tier: EffectivenessTier,
    /// Score: coverage x method factor x frequency factor
    pub score: f64,
    /// Coverage of required hours, capped at 100 (%)
    pub coverage_pct: f64,
    /// Method retention factor used
    pub method_factor: f64,
    /// Frequency retention factor used
    pub frequency_factor: f64,
    /// Tier description
    pub description: String,
}

/// Three-year return on the training investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiAnalysis {
    /// Annual savings from prevented injuries (USD)
    pub injury_savings_usd: f64,
    /// Annual savings from reduced turnover (USD)
    pub turnover_savings_usd: f64,
    /// Annual productivity gains (USD)
    pub productivity_savings_usd: f64,
    /// Total annual benefits (USD)
    pub total_benefits_usd: f64,
    /// Return over the three-year horizon (%)
    pub roi_pct: f64,
    /// Years to recover the program cost
    pub payback_years: f64,
    /// Annual benefits over annualized cost
    pub cost_benefit_ratio: f64,
}

/// Scheduling priority of a plan phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhasePriority {
    High,
    Medium,
    Ongoing,
}

/// One phase of the rollout plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPhase {
    /// Phase name
    pub name: String,
    /// Duration label
    pub duration: String,
    /// Courses delivered in this phase (may be empty)
    pub trainings: Vec<String>,
    /// Hours allocated
    pub hours: f64,
    /// Scheduling priority
    pub priority: PhasePriority,
}

/// Four-phase rollout plan with fixed scaffolding lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
    /// The four sequential phases
    pub phases: Vec<TrainingPhase>,
    /// Rollout timeline checkpoints
    pub timeline: Vec<String>,
    /// Resources needed to deliver the program
    pub resources: Vec<String>,
    /// Evaluation methods
    pub evaluation: Vec<String>,
}

/// Results from a training needs assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingNeedsResult {
    // === Echoed Input ===
    /// Organization size band
    pub company_size: CompanySize,
    /// Industry sector
    pub industry: Industry,
    /// Jurisdiction
    pub location: Jurisdiction,
    /// Employee headcount
    pub total_employees: u32,
    /// New hires this year
    pub new_hires: u32,
    /// Annual turnover fraction
    pub turnover_rate: f64,
    /// Workforce experience level
    pub experience_level: ExperienceLevel,
    /// Delivery method
    pub training_method: TrainingMethod,
    /// Whether certification preparation is included
    pub certification_required: bool,
    /// Applicable regulations
    pub regulations: Vec<Regulation>,

    // === Derived Metrics ===
    /// Course sets
    pub needs: TrainingNeeds,
    /// Hour totals
    pub hours: HoursRequired,
    /// Cost breakdown
    pub costs: TrainingCosts,
    /// Effectiveness of the current program
    pub effectiveness: Effectiveness,
    /// Return on investment
    pub roi: RoiAnalysis,
    /// Rollout plan
    pub plan: TrainingPlan,

    // === Compliance ===
    /// Minimum-hours and regulation findings
    pub compliance: ComplianceReport,
    /// Records that must be kept when regulations apply
    pub documentation_required: Vec<String>,
    /// Jurisdiction minimum annual hours applied
    pub minimum_annual_hours: f64,

    // === Recommendations ===
    /// Ordered program recommendations
    pub recommendations: Vec<String>,
}

/// Run a training needs assessment.
///
/// Pure function; identical inputs produce identical results.
pub fn calculate(input: &TrainingNeedsInput) -> SafetyResult<TrainingNeedsResult> {
    input.validate()?;

    let needs = determine_needs(input);
    let hours = required_hours(&needs, input.experience_level, input.certification_required);
    let costs = training_costs(&hours, input.training_method, input.total_employees);
    let effectiveness = assess_effectiveness(
        input.current_training_hours,
        hours.total_hr,
        input.training_method,
        input.training_frequency,
    );
    let (compliance, documentation_required) = check_compliance(input, &needs, &hours);
    let roi = roi_analysis(
        costs.total_usd,
        input.total_employees,
        input.industry,
        input.turnover_rate,
    );
    let plan = build_plan(&needs, &hours);
    let recommendations =
        build_recommendations(&effectiveness, &compliance, &roi, &costs);

    Ok(TrainingNeedsResult {
        company_size: input.company_size,
        industry: input.industry,
        location: input.location,
        total_employees: input.total_employees,
        new_hires: input.new_hires,
        turnover_rate: input.turnover_rate,
        experience_level: input.experience_level,
        training_method: input.training_method,
        certification_required: input.certification_required,
        regulations: input.regulations.clone(),
        needs,
        hours,
        costs,
        effectiveness,
        roi,
        plan,
        compliance,
        documentation_required,
        minimum_annual_hours: input.location.minimum_annual_hours(),
        recommendations,
    })
}

/// Assemble the mandatory and recommended course sets.
fn determine_needs(input: &TrainingNeedsInput) -> TrainingNeeds {
    let mut mandatory: Vec<String> = OSHA_BASELINE.iter().map(|s| s.to_string()).collect();

    for course in industry_courses(input.industry) {
        mandatory.push(course.to_string());
    }

    if input.has_regulation(Regulation::Iso45001) {
        mandatory.push("OH&S Management System".to_string());
        mandatory.push("Risk Assessment Training".to_string());
        mandatory.push("Incident Investigation".to_string());
    }
    if input.has_regulation(Regulation::Rcra) {
        mandatory.push("Hazardous Waste Management".to_string());
        mandatory.push("Waste Minimization".to_string());
    }
    if input.has_regulation(Regulation::Dot) {
        mandatory.push("Hazardous Materials Transportation".to_string());
    }

    let mut recommended: Vec<String> = Vec::new();
    if input.company_size.is_large() {
        recommended.push("Safety Leadership Training".to_string());
        recommended.push("Behavior-Based Safety".to_string());
        recommended.push("Root Cause Analysis".to_string());
        recommended.push("Audit and Inspection".to_string());
    }
    // More than 10% of the workforce being new triggers onboarding courses
    if input.new_hires as f64 > input.total_employees as f64 * 0.1 {
        recommended.push("New Employee Orientation".to_string());
        recommended.push("Mentorship Program".to_string());
        recommended.push("On-the-Job Training".to_string());
    }

    TrainingNeeds {
        mandatory,
        recommended,
    }
}

/// Sum catalog hours and apply the experience multiplier; certification
/// hours are flat and unmultiplied.
fn required_hours(
    needs: &TrainingNeeds,
    experience: ExperienceLevel,
    certification: bool,
) -> HoursRequired {
    let mandatory_base: f64 = needs.mandatory.iter().map(|c| course_hours(c)).sum();
    let recommended_base: f64 = needs.recommended.iter().map(|c| course_hours(c)).sum();

    let multiplier = experience.multiplier();
    let mandatory_hr = mandatory_base * multiplier;
    let recommended_hr = recommended_base * multiplier;
    let certification_hr = if certification { CERTIFICATION_HOURS } else { 0.0 };

    let total_hr = mandatory_hr + recommended_hr + certification_hr;
    let annual = total_hr / CYCLE_YEARS;

    HoursRequired {
        mandatory_hr,
        recommended_hr,
        certification_hr,
        total_hr,
        annual_per_employee_hr: annual,
        quarterly_per_employee_hr: annual / 4.0,
    }
}

fn training_costs(
    hours: &HoursRequired,
    method: TrainingMethod,
    total_employees: u32,
) -> TrainingCosts {
    let employees = total_employees as f64;

    let direct = method.cost_per_hour_usd() * hours.total_hr;
    let productivity = employees * hours.total_hr * PRODUCTIVITY_WAGE_USD;
    let employee = employees * hours.annual_per_employee_hr * BURDENED_RATE_USD;
    let development = if method.has_development_cost() {
        hours.total_hr * DEVELOPMENT_COST_USD
    } else {
        0.0
    };

    let total = direct + productivity + employee + development;

    TrainingCosts {
        direct_usd: direct,
        productivity_usd: productivity,
        employee_usd: employee,
        development_usd: development,
        total_usd: total,
        per_employee_usd: total / employees,
        annual_usd: total / CYCLE_YEARS,
    }
}

/// Effectiveness = coverage x method factor x frequency factor.
fn assess_effectiveness(
    current_hours: f64,
    required_hours: f64,
    method: TrainingMethod,
    frequency: TrainingFrequency,
) -> Effectiveness {
    let coverage = (current_hours / required_hours * 100.0).min(100.0);
    let method_factor = method.effectiveness_factor();
    let frequency_factor = frequency.effectiveness_factor();
    let score = coverage * method_factor * frequency_factor;
    let tier = EffectivenessTier::from_score(score);

    Effectiveness {
        tier,
        score,
        coverage_pct: coverage,
        method_factor,
        frequency_factor,
        description: tier.description().to_string(),
    }
}

/// Minimum-hours and regulation-specific rule checks.
fn check_compliance(
    input: &TrainingNeedsInput,
    needs: &TrainingNeeds,
    hours: &HoursRequired,
) -> (ComplianceReport, Vec<String>) {
    let mut report = ComplianceReport::new();

    let minimum = input.location.minimum_annual_hours();
    if hours.annual_per_employee_hr < minimum {
        report.violation(format!(
            "Training hours ({:.1}) below {} hour minimum",
            hours.annual_per_employee_hr, minimum
        ));
    } else {
        report.compliant(format!(
            "Meets {} hour annual minimum requirement",
            minimum
        ));
    }

    if needs.mandatory.is_empty() {
        report.warning("No mandatory training identified - review requirements");
    }

    if input.has_regulation(Regulation::Osha) && hours.total_hr < 40.0 {
        report.warning("OSHA recommends minimum 40 hours of safety training");
    }

    if input.has_regulation(Regulation::Iso45001)
        && !needs.mandatory.iter().any(|c| c == "OH&S Management System")
    {
        report.violation("ISO 45001 requires OH&S management system training");
    }

    let documentation = if input.regulations.is_empty() {
        Vec::new()
    } else {
        vec![
            "Training records for all employees".to_string(),
            "Certification documentation".to_string(),
            "Training program evaluation records".to_string(),
        ]
    };

    (report, documentation)
}

/// Annual benefits from injury reduction, turnover reduction and
/// productivity gains, against the program cost over three years.
fn roi_analysis(
    total_cost_usd: f64,
    total_employees: u32,
    industry: Industry,
    turnover_rate: f64,
) -> RoiAnalysis {
    let employees = total_employees as f64;

    // 5% baseline injury rate, 30% reduction from effective training
    let injuries_prevented = employees * 0.05;
    let injury_savings = injuries_prevented * industry.average_injury_cost_usd() * 0.3;

    // $15k replacement cost, 20% turnover reduction
    let turnover_savings = employees * turnover_rate * 15_000.0 * 0.2;

    // 5% productivity improvement on a $50k average salary
    let productivity_savings = employees * 50_000.0 * 0.05;

    let total_benefits = injury_savings + turnover_savings + productivity_savings;

    RoiAnalysis {
        injury_savings_usd: injury_savings,
        turnover_savings_usd: turnover_savings,
        productivity_savings_usd: productivity_savings,
        total_benefits_usd: total_benefits,
        roi_pct: (total_benefits * CYCLE_YEARS - total_cost_usd) / total_cost_usd * 100.0,
        payback_years: total_cost_usd / total_benefits,
        cost_benefit_ratio: total_benefits / (total_cost_usd / CYCLE_YEARS),
    }
}

/// Four fixed sequential phases: mandatory courses split evenly across the
/// first two, recommended courses in the third, refresher at 20% of total
/// hours in the fourth.
fn build_plan(needs: &TrainingNeeds, hours: &HoursRequired) -> TrainingPlan {
    let split = needs.mandatory.len().min(6);
    let phases = vec![
        TrainingPhase {
            name: "Phase 1: Mandatory Compliance".to_string(),
            duration: "Months 1-6".to_string(),
            trainings: needs.mandatory[..split].to_vec(),
            hours: hours.mandatory_hr * 0.5,
            priority: PhasePriority::High,
        },
        TrainingPhase {
            name: "Phase 2: Core Safety Skills".to_string(),
            duration: "Months 7-12".to_string(),
            trainings: needs.mandatory[split..].to_vec(),
            hours: hours.mandatory_hr * 0.5,
            priority: PhasePriority::High,
        },
        TrainingPhase {
            name: "Phase 3: Advanced & Specialized".to_string(),
            duration: "Year 2".to_string(),
            trainings: needs.recommended.clone(),
            hours: hours.recommended_hr,
            priority: PhasePriority::Medium,
        },
        TrainingPhase {
            name: "Phase 4: Refresher & Certification".to_string(),
            duration: "Year 3".to_string(),
            trainings: vec![
                "Annual Refresher Training".to_string(),
                "Certification Renewal".to_string(),
            ],
            hours: hours.total_hr * 0.2,
            priority: PhasePriority::Ongoing,
        },
    ];

    TrainingPlan {
        phases,
        timeline: vec![
            "First 30 days: High-risk training".to_string(),
            "3-6 months: Core compliance training".to_string(),
            "6-12 months: Skill development".to_string(),
            "1-3 years: Advanced and specialized training".to_string(),
        ],
        resources: vec![
            "Qualified instructors or training providers".to_string(),
            "Training facilities or online platform".to_string(),
            "Training materials and equipment".to_string(),
            "Assessment and testing tools".to_string(),
            "Record-keeping system".to_string(),
        ],
        evaluation: vec![
            "Pre- and post-training assessments".to_string(),
            "Skills demonstration".to_string(),
            "On-the-job observation".to_string(),
            "Incident rate monitoring".to_string(),
            "Employee feedback surveys".to_string(),
            "Management review".to_string(),
        ],
    }
}

/// Build the ordered recommendation list.
fn build_recommendations(
    effectiveness: &Effectiveness,
    compliance: &ComplianceReport,
    roi: &RoiAnalysis,
    costs: &TrainingCosts,
) -> Vec<String> {
    let mut recs: Vec<String> = vec![
        "Develop written training program and policies".to_string(),
        "Maintain detailed training records for all employees".to_string(),
        "Conduct regular training needs assessments".to_string(),
    ];

    if matches!(
        effectiveness.tier,
        EffectivenessTier::Poor | EffectivenessTier::VeryPoor
    ) {
        recs.push("Increase training hours to meet minimum requirements".to_string());
        recs.push("Consider blended learning approach for better retention".to_string());
        recs.push("Implement more frequent refresher training".to_string());
    }

    if !compliance.is_compliant() {
        recs.push("Address compliance violations immediately".to_string());
        for violation in &compliance.violations {
            recs.push(format!("Fix: {}", violation));
        }
    }

    if roi.roi_pct > 100.0 {
        recs.push(
            "Training investment shows excellent ROI - consider expanding program".to_string(),
        );
    } else if roi.roi_pct < 50.0 {
        recs.push("Optimize training methods to improve ROI".to_string());
    }

    if costs.total_usd > 100_000.0 {
        recs.push("Consider online training to reduce costs".to_string());
        recs.push("Negotiate volume discounts with training providers".to_string());
        recs.push("Develop in-house training capabilities".to_string());
    }

    recs.push("Implement Kirkpatrick model for training evaluation".to_string());
    recs.push("Use competency-based assessment methods".to_string());
    recs.push("Provide train-the-trainer programs".to_string());

    recs.push("Consider Learning Management System (LMS) for tracking".to_string());
    recs.push("Use mobile learning for remote employees".to_string());
    recs.push("Implement virtual reality for high-risk scenario training".to_string());

    recs
}

// ============================================================================
// Department Needs Assessment
// ============================================================================

/// Department for a targeted needs assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Department {
    Production,
    Maintenance,
    Laboratory,
    Warehouse,
    Office,
    #[default]
    Other,
}

/// Input for a department-level needs assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeedsAssessmentInput {
    /// Department under assessment
    pub department: Department,
    /// Whether the department's work is high risk
    #[serde(default)]
    pub high_risk: bool,
    /// Whether the department has a frequent incident history
    #[serde(default)]
    pub frequent_incidents: bool,
    /// Whether significant skill gaps were identified
    #[serde(default)]
    pub significant_skill_gaps: bool,
}

/// Identify training needs for one department.
///
/// Department base lists come first; risk, incident-history and skill-gap
/// additions follow in that order.
pub fn assess_department_needs(input: &NeedsAssessmentInput) -> Vec<String> {
    let base: &[&str] = match input.department {
        Department::Production => &[
            "Machine Safety",
            "Lockout/Tagout",
            "PPE",
            "Emergency Procedures",
        ],
        Department::Maintenance => &[
            "Confined Space",
            "Electrical Safety",
            "Hot Work",
            "Fall Protection",
        ],
        Department::Laboratory => &[
            "Chemical Safety",
            "Laboratory Safety",
            "Emergency Response",
            "Waste Management",
        ],
        Department::Warehouse => &[
            "Powered Industrial Trucks",
            "Material Handling",
            "Fire Safety",
            "Ergonomics",
        ],
        Department::Office => &[
            "Ergonomics",
            "Emergency Evacuation",
            "First Aid",
            "Workplace Violence",
        ],
        Department::Other => &[
            "General Safety Awareness",
            "Emergency Procedures",
            "PPE",
        ],
    };

    let mut needs: Vec<String> = base.iter().map(|s| s.to_string()).collect();

    if input.high_risk {
        needs.push("Risk Assessment".to_string());
        needs.push("Incident Investigation".to_string());
        needs.push("Safety Leadership".to_string());
    }
    if input.frequent_incidents {
        needs.push("Root Cause Analysis".to_string());
        needs.push("Behavior-Based Safety".to_string());
        needs.push("Safety Observation".to_string());
    }
    if input.significant_skill_gaps {
        needs.push("On-the-Job Training".to_string());
        needs.push("Mentorship Program".to_string());
        needs.push("Skills Assessment".to_string());
    }

    needs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn construction_program() -> TrainingNeedsInput {
        TrainingNeedsInput {
            company_size: CompanySize::Large,
            industry: Industry::Construction,
            location: Jurisdiction::Usa,
            total_employees: 100,
            new_hires: 15,
            turnover_rate: 0.1,
            experience_level: ExperienceLevel::Intermediate,
            current_training_hours: 20.0,
            training_frequency: TrainingFrequency::Yearly,
            training_method: TrainingMethod::InPerson,
            certification_required: false,
            regulations: vec![Regulation::Osha],
        }
    }

    #[test]
    fn test_course_sets() {
        let result = calculate(&construction_program()).unwrap();
        // 12 baseline + 5 construction courses
        assert_eq!(result.needs.mandatory.len(), 17);
        // Large company adds 4, the 15% new-hire ratio adds 3
        assert_eq!(result.needs.recommended.len(), 7);
        assert_eq!(result.needs.total_modules(), 24);
        assert!(result
            .needs
            .mandatory
            .contains(&"Crane Safety".to_string()));
        assert!(result
            .needs
            .recommended
            .contains(&"On-the-Job Training".to_string()));
    }

    #[test]
    fn test_hour_totals() {
        let result = calculate(&construction_program()).unwrap();
        // baseline 62h + construction 48h
        assert!((result.hours.mandatory_hr - 110.0).abs() < 1e-9);
        // leadership set 40h + onboarding set 52h
        assert!((result.hours.recommended_hr - 92.0).abs() < 1e-9);
        assert_eq!(result.hours.certification_hr, 0.0);
        assert!((result.hours.total_hr - 202.0).abs() < 1e-9);
        assert!((result.hours.annual_per_employee_hr - 202.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_experience_multiplier() {
        let mut input = construction_program();
        input.experience_level = ExperienceLevel::Novice;
        let result = calculate(&input).unwrap();
        assert!((result.hours.mandatory_hr - 165.0).abs() < 1e-9);
    }

    #[test]
    fn test_certification_hours_flat() {
        let mut input = construction_program();
        input.certification_required = true;
        input.experience_level = ExperienceLevel::Expert;
        let result = calculate(&input).unwrap();
        // Certification hours are not scaled by the experience multiplier
        assert_eq!(result.hours.certification_hr, 40.0);
        assert!(
            (result.hours.total_hr - (202.0 * 0.6 + 40.0)).abs() < 1e-9
        );
    }

    #[test]
    fn test_regulation_additions() {
        let mut input = construction_program();
        input.regulations = vec![Regulation::Iso45001, Regulation::Rcra, Regulation::Dot];
        let result = calculate(&input).unwrap();
        // 17 + 3 (ISO) + 2 (RCRA) + 1 (DOT)
        assert_eq!(result.needs.mandatory.len(), 23);
        assert!(result
            .needs
            .mandatory
            .contains(&"OH&S Management System".to_string()));
        // ISO topic requirement is satisfied
        assert!(result.compliance.is_compliant());
    }

    #[test]
    fn test_costs() {
        let result = calculate(&construction_program()).unwrap();
        // direct = 250 * 202 = 50,500
        assert!((result.costs.direct_usd - 50_500.0).abs() < 1e-6);
        // productivity = 100 * 202 * 50 = 1,010,000
        assert!((result.costs.productivity_usd - 1_010_000.0).abs() < 1e-6);
        // employee = 100 * (202/3) * 35
        assert!((result.costs.employee_usd - 235_666.666_666).abs() < 1e-3);
        assert_eq!(result.costs.development_usd, 0.0);
        let expected_total = 50_500.0 + 1_010_000.0 + 100.0 * 202.0 / 3.0 * 35.0;
        assert!((result.costs.total_usd - expected_total).abs() < 1e-6);
    }

    #[test]
    fn test_development_cost_for_online() {
        let mut input = construction_program();
        input.training_method = TrainingMethod::Online;
        let result = calculate(&input).unwrap();
        assert!((result.costs.development_usd - 202.0 * 150.0).abs() < 1e-6);
    }

    #[test]
    fn test_effectiveness() {
        let result = calculate(&construction_program()).unwrap();
        // coverage = 20/202*100 = 9.90%; score = 9.90 * 0.85 * 0.70
        assert!((result.effectiveness.coverage_pct - 9.900_990).abs() < 0.001);
        assert!(result.effectiveness.score < 60.0);
        assert_eq!(result.effectiveness.tier, EffectivenessTier::VeryPoor);
    }

    #[test]
    fn test_effectiveness_tiers() {
        assert_eq!(
            EffectivenessTier::from_score(90.0),
            EffectivenessTier::Excellent
        );
        assert_eq!(EffectivenessTier::from_score(85.0), EffectivenessTier::Good);
        assert_eq!(EffectivenessTier::from_score(75.0), EffectivenessTier::Fair);
        assert_eq!(EffectivenessTier::from_score(65.0), EffectivenessTier::Poor);
        assert_eq!(
            EffectivenessTier::from_score(59.9),
            EffectivenessTier::VeryPoor
        );
    }

    #[test]
    fn test_full_coverage_capped() {
        let mut input = construction_program();
        input.current_training_hours = 500.0;
        input.training_method = TrainingMethod::Blended;
        input.training_frequency = TrainingFrequency::Daily;
        let result = calculate(&input).unwrap();
        assert_eq!(result.effectiveness.coverage_pct, 100.0);
        // 100 * 0.90 * 0.95 = 85.5
        assert!((result.effectiveness.score - 85.5).abs() < 1e-9);
        assert_eq!(result.effectiveness.tier, EffectivenessTier::Good);
    }

    #[test]
    fn test_minimum_hours_compliance() {
        let result = calculate(&construction_program()).unwrap();
        // 67.3 annual hours is well over the 10-hour US minimum
        assert!(result.compliance.is_compliant());
        assert_eq!(result.minimum_annual_hours, 10.0);
        assert_eq!(result.documentation_required.len(), 3);
    }

    #[test]
    fn test_osha_forty_hour_warning() {
        let input = TrainingNeedsInput {
            company_size: CompanySize::Small,
            industry: Industry::General,
            location: Jurisdiction::Eu,
            total_employees: 10,
            new_hires: 0,
            turnover_rate: 0.0,
            experience_level: ExperienceLevel::Expert,
            current_training_hours: 0.0,
            training_frequency: TrainingFrequency::Yearly,
            training_method: TrainingMethod::Online,
            certification_required: false,
            regulations: vec![Regulation::Osha],
        };
        let result = calculate(&input).unwrap();
        // Baseline 62h at the 0.6 expert multiplier is 37.2h total
        assert!((result.hours.total_hr - 37.2).abs() < 1e-9);
        assert!(result
            .compliance
            .warnings
            .iter()
            .any(|w| w.contains("40 hours")));
    }

    #[test]
    fn test_roi() {
        let result = calculate(&construction_program()).unwrap();
        // injury: 100*0.05*75000*0.3 = 112,500
        assert!((result.roi.injury_savings_usd - 112_500.0).abs() < 1e-6);
        // turnover: 100*0.1*15000*0.2 = 30,000
        assert!((result.roi.turnover_savings_usd - 30_000.0).abs() < 1e-6);
        // productivity: 100*50000*0.05 = 250,000
        assert!((result.roi.productivity_savings_usd - 250_000.0).abs() < 1e-6);
        assert!((result.roi.total_benefits_usd - 392_500.0).abs() < 1e-6);
        assert!(result.roi.payback_years > 0.0);
    }

    #[test]
    fn test_plan_phases() {
        let result = calculate(&construction_program()).unwrap();
        assert_eq!(result.plan.phases.len(), 4);
        // Mandatory hours split evenly across the first two phases
        assert!((result.plan.phases[0].hours - 55.0).abs() < 1e-9);
        assert!((result.plan.phases[1].hours - 55.0).abs() < 1e-9);
        assert_eq!(result.plan.phases[0].trainings.len(), 6);
        assert_eq!(result.plan.phases[1].trainings.len(), 11);
        // Phase 3 carries the recommended set, phase 4 is 20% of the total
        assert_eq!(result.plan.phases[2].trainings.len(), 7);
        assert!((result.plan.phases[3].hours - 202.0 * 0.2).abs() < 1e-9);
        assert_eq!(result.plan.phases[3].priority, PhasePriority::Ongoing);
    }

    #[test]
    fn test_plan_phase_three_may_be_empty() {
        let mut input = construction_program();
        input.company_size = CompanySize::Small;
        input.new_hires = 0;
        let result = calculate(&input).unwrap();
        assert_eq!(result.plan.phases.len(), 4);
        assert!(result.plan.phases[2].trainings.is_empty());
        assert_eq!(result.plan.phases[2].hours, 0.0);
    }

    #[test]
    fn test_catalog_default_hours() {
        assert_eq!(course_hours("Crane Safety"), 16.0);
        assert_eq!(course_hours("Unlisted Course"), 4.0);
    }

    #[test]
    fn test_department_needs() {
        let input = NeedsAssessmentInput {
            department: Department::Production,
            high_risk: true,
            frequent_incidents: false,
            significant_skill_gaps: false,
        };
        let needs = assess_department_needs(&input);
        assert_eq!(needs.len(), 7);
        assert_eq!(needs[0], "Machine Safety");
        assert!(needs.contains(&"Safety Leadership".to_string()));
    }

    #[test]
    fn test_department_needs_all_additions() {
        let input = NeedsAssessmentInput {
            department: Department::Office,
            high_risk: true,
            frequent_incidents: true,
            significant_skill_gaps: true,
        };
        let needs = assess_department_needs(&input);
        assert_eq!(needs.len(), 13);
    }

    #[test]
    fn test_validation() {
        let mut input = construction_program();
        input.total_employees = 0;
        assert!(calculate(&input).is_err());

        let mut input = construction_program();
        input.turnover_rate = 1.5;
        assert!(calculate(&input).is_err());

        let mut input = construction_program();
        input.regulations = vec![Regulation::Osha, Regulation::Osha];
        let err = calculate(&input).unwrap_err();
        assert!(err.to_string().contains("at most once"));
    }

    #[test]
    fn test_determinism() {
        let input = construction_program();
        let first = serde_json::to_string(&calculate(&input).unwrap()).unwrap();
        let second = serde_json::to_string(&calculate(&input).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let result = calculate(&construction_program()).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("mandatory"));
        assert!(json.contains("roi"));
        let roundtrip: TrainingNeedsResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result.needs.mandatory.len(), roundtrip.needs.mandatory.len());
    }
}
