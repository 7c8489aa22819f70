//! # Industry Reference Data
//!
//! Industry classification and the benchmark figures keyed on it. Several
//! engines share this table: incident-rate comparisons use the TRIR/DART
//! benchmarks, training ROI uses the average injury cost, and PPE compliance
//! applies industry-specific equipment mandates.
//!
//! Benchmark values are simplified composites of published BLS incident-rate
//! data. They are immutable reference data: loaded once, never mutated.
//!
//! ## Example
//!
//! ```rust
//! use safety_core::industries::Industry;
//!
//! let bench = Industry::Construction.benchmarks();
//! assert_eq!(bench.trir, 3.0);
//! assert_eq!(bench.target, 2.5);
//! ```

use serde::{Deserialize, Serialize};

/// Industry sector for benchmark lookups.
///
/// `General` doubles as the documented fallback entry: any sector without
/// its own figures for a given table uses the general-industry values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Industry {
    Construction,
    Manufacturing,
    Transportation,
    Healthcare,
    OilGas,
    Mining,
    Agriculture,
    Retail,
    Education,
    #[default]
    General,
}

/// Incident-rate benchmark figures for one industry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndustryBenchmarks {
    /// Typical total recordable incident rate
    pub trir: f64,
    /// Typical DART rate
    pub dart: f64,
    /// Improvement target rate
    pub target: f64,
}

impl Industry {
    /// All industry variants for UI selection
    pub const ALL: [Industry; 10] = [
        Industry::Construction,
        Industry::Manufacturing,
        Industry::Transportation,
        Industry::Healthcare,
        Industry::OilGas,
        Industry::Mining,
        Industry::Agriculture,
        Industry::Retail,
        Industry::Education,
        Industry::General,
    ];

    /// TRIR/DART benchmark figures for this industry
    pub fn benchmarks(&self) -> IndustryBenchmarks {
        match self {
            Industry::Construction => IndustryBenchmarks { trir: 3.0, dart: 2.0, target: 2.5 },
            Industry::Manufacturing => IndustryBenchmarks { trir: 2.5, dart: 1.8, target: 2.0 },
            Industry::Transportation => IndustryBenchmarks { trir: 4.0, dart: 2.5, target: 3.0 },
            Industry::Healthcare => IndustryBenchmarks { trir: 4.5, dart: 3.0, target: 3.5 },
            Industry::OilGas => IndustryBenchmarks { trir: 0.8, dart: 0.5, target: 0.6 },
            Industry::Mining => IndustryBenchmarks { trir: 2.0, dart: 1.2, target: 1.5 },
            Industry::Agriculture => IndustryBenchmarks { trir: 5.0, dart: 3.5, target: 4.0 },
            Industry::Retail => IndustryBenchmarks { trir: 3.5, dart: 2.2, target: 2.8 },
            Industry::Education => IndustryBenchmarks { trir: 2.8, dart: 1.9, target: 2.2 },
            Industry::General => IndustryBenchmarks { trir: 3.2, dart: 2.1, target: 2.5 },
        }
    }

    /// Average fully-loaded cost of one injury in this industry (USD).
    ///
    /// Sectors without their own figure fall back to the general value.
    pub fn average_injury_cost_usd(&self) -> f64 {
        match self {
            Industry::Construction => 75_000.0,
            Industry::Manufacturing => 50_000.0,
            Industry::Healthcare => 40_000.0,
            Industry::OilGas => 100_000.0,
            Industry::Transportation => 60_000.0,
            _ => 40_000.0,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Industry::Construction => "Construction",
            Industry::Manufacturing => "Manufacturing",
            Industry::Transportation => "Transportation",
            Industry::Healthcare => "Healthcare",
            Industry::OilGas => "Oil & Gas",
            Industry::Mining => "Mining",
            Industry::Agriculture => "Agriculture",
            Industry::Retail => "Retail",
            Industry::Education => "Education",
            Industry::General => "General Industry",
        }
    }
}

impl std::fmt::Display for Industry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_industry_has_benchmarks() {
        for industry in Industry::ALL {
            let bench = industry.benchmarks();
            assert!(bench.trir > 0.0);
            assert!(bench.dart > 0.0);
            assert!(bench.target > 0.0);
        }
    }

    #[test]
    fn test_specific_benchmark_entries() {
        assert_eq!(Industry::OilGas.benchmarks().trir, 0.8);
        assert_eq!(Industry::Agriculture.benchmarks().trir, 5.0);
        assert_eq!(Industry::General.benchmarks().target, 2.5);
    }

    #[test]
    fn test_injury_cost_fallback() {
        // Mining has no sector-specific figure and uses the general value
        assert_eq!(Industry::Mining.average_injury_cost_usd(), 40_000.0);
        assert_eq!(Industry::OilGas.average_injury_cost_usd(), 100_000.0);
    }

    #[test]
    fn test_kebab_case_serialization() {
        let json = serde_json::to_string(&Industry::OilGas).unwrap();
        assert_eq!(json, "\"oil-gas\"");
        let roundtrip: Industry = serde_json::from_str("\"construction\"").unwrap();
        assert_eq!(roundtrip, Industry::Construction);
    }
}
