//! `sui move coverage summary` report.
//!
//! ```text
//! +-------------------------+
//! | Move Coverage Summary   |
//! +-------------------------+
//! Module 0000…0000::counter
//!      fun create      % coverage: 100.00
//!      fun increment   % coverage: 50.00
//! >>> % Module coverage: 75.00
//! +-------------------------+
//! | % Move Coverage: 75.00  |
//! +-------------------------+
//! ```

use crate::extract::text::{clean_line, is_border, lenient_f64};
use crate::extract::types::ParseStatus;
use crate::normalize::percent_of;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static MODULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Module\s+(\S+)").expect("valid regex"));

static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^fun\s+(\S+)\s+%\s*coverage\s*:\s*(\S+)").expect("valid regex")
});

static MODULE_PERCENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)%\s*module\s+coverage\s*:\s*(\S+)").expect("valid regex")
});

static OVERALL_PERCENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)%\s*move\s+coverage\s*:\s*(\S+)").expect("valid regex")
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionCoverage {
    pub name: String,
    pub percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleCoverage {
    pub name: String,
    pub percent: f64,
    pub functions: Vec<FunctionCoverage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub status: ParseStatus,
    pub modules: Vec<ModuleCoverage>,
    pub overall_percent: f64,
    /// Share of listed functions with full coverage
    pub fully_covered_percent: f64,
    pub raw_output: String,
}

pub fn parse(text: &str) -> CoverageReport {
    let mut report = CoverageReport {
        raw_output: text.to_string(),
        ..Default::default()
    };
    let mut overall: Option<f64> = None;
    // Module percentages seen so far, by index into report.modules
    let mut module_percent_seen: Vec<bool> = Vec::new();

    for raw_line in text.lines() {
        if is_border(raw_line) {
            continue;
        }
        let line = clean_line(raw_line);
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = MODULE_RE.captures(line) {
            report.modules.push(ModuleCoverage {
                name: caps[1].to_string(),
                ..Default::default()
            });
            module_percent_seen.push(false);
            continue;
        }

        if let Some(caps) = FUNCTION_RE.captures(line) {
            if let Some(module) = report.modules.last_mut() {
                module.functions.push(FunctionCoverage {
                    name: caps[1].to_string(),
                    percent: lenient_f64(&caps[2]),
                });
            }
            continue;
        }

        if let Some(caps) = MODULE_PERCENT_RE.captures(line) {
            if let (Some(module), Some(seen)) =
                (report.modules.last_mut(), module_percent_seen.last_mut())
            {
                module.percent = lenient_f64(&caps[1]);
                *seen = true;
            }
            continue;
        }

        if let Some(caps) = OVERALL_PERCENT_RE.captures(line) {
            overall = Some(lenient_f64(&caps[1]));
        }
    }

    for (module, seen) in report.modules.iter_mut().zip(&module_percent_seen) {
        if !seen {
            module.percent = mean(module.functions.iter().map(|f| f.percent));
        }
    }

    report.overall_percent =
        overall.unwrap_or_else(|| mean(report.modules.iter().map(|m| m.percent)));

    let functions = report.modules.iter().flat_map(|m| &m.functions);
    let total = functions.clone().count() as u64;
    let full = functions.filter(|f| f.percent >= 100.0).count() as u64;
    report.fully_covered_percent = percent_of(full, total);

    report.status = ParseStatus::from_found(overall.is_some() || !report.modules.is_empty());
    report
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / f64::from(count) }
}
