//! # SiteGuard CLI
//!
//! Terminal interface for workplace safety assessments. Runs a
//! fall-protection assessment from prompted inputs and prints a formatted
//! report plus the JSON result record for API/LLM use.

use std::io::{self, BufRead, Write};

use safety_core::engines::fall_protection::{
    calculate, FallProtectionInput, SurfaceType, SystemType,
};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn main() {
    println!("SiteGuard CLI - Workplace Safety Calculator");
    println!("===========================================");
    println!();
    println!("Running fall protection assessment...");
    println!();

    let fall_height_m = prompt_f64("Enter working height (m) [4.0]: ", 4.0);
    let lanyard_length_m = prompt_f64("Enter lanyard length (m) [1.5]: ", 1.5);
    let anchor_height_m = prompt_f64("Enter anchor height above harness (m) [0.0]: ", 0.0);

    let input = FallProtectionInput {
        fall_height_m,
        lanyard_length_m,
        deceleration_distance_m: None,
        worker_weight_kg: None,
        anchor_height_m: Some(anchor_height_m),
        surface_type: SurfaceType::Concrete,
        system_type: SystemType::Arrest,
    };

    match calculate(&input) {
        Ok(result) => {
            println!();
            println!("═══════════════════════════════════════");
            println!("  FALL PROTECTION RESULTS");
            println!("═══════════════════════════════════════");
            println!();
            println!("Input:");
            println!("  Height:   {:.1} m", result.fall_height_m);
            println!("  Lanyard:  {:.1} m", result.lanyard_length_m);
            println!("  Anchor:   {:.1} m above harness", result.anchor_height_m);
            println!("  Worker:   {:.0} kg", result.worker_weight_kg);
            println!();
            println!("Derived:");
            println!("  Free fall:      {:.2} m", result.free_fall_distance_m);
            println!("  Total fall:     {:.2} m", result.total_fall_distance_m);
            println!("  Clearance req:  {:.2} m", result.clearance_required_m);
            println!("  Impact force:   {:.0} N", result.impact_force_n);
            println!(
                "  Safety factor:  {:.2} ({:?})",
                result.safety_factor, result.safety_factor_rating
            );
            println!();
            println!(
                "Risk: {} (score {:.1})",
                result.risk.level, result.risk.score
            );
            println!();
            println!("Compliance:");
            for violation in &result.compliance.violations {
                println!("  [VIOLATION] {}", violation);
            }
            for warning in &result.compliance.warnings {
                println!("  [WARNING]   {}", warning);
            }
            for item in &result.compliance.compliant {
                println!("  [OK]        {}", item);
            }
            println!();
            println!("═══════════════════════════════════════");
            println!(
                "  RESULT: {}",
                if result.compliance.is_compliant() {
                    "COMPLIANT"
                } else {
                    "NON-COMPLIANT"
                }
            );
            println!("═══════════════════════════════════════");

            println!();
            println!("JSON Output (for LLM/API use):");
            if let Ok(json) = serde_json::to_string_pretty(&result) {
                println!("{}", json);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
    }
}
