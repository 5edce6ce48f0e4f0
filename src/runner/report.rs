//! Run outcome aggregation

use crate::generate::Mode;
use chrono::{DateTime, Utc};

/// One failed case
#[derive(Debug, Clone)]
pub struct CaseFailure {
    /// Operation the case targeted
    pub operation_id: String,
    /// Generation mode of the case
    pub mode: Mode,
    /// One-line case description
    pub case: String,
    /// Why it failed
    pub reason: String,
}

impl std::fmt::Display for CaseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.operation_id, self.case, self.reason)
    }
}

/// Aggregated outcome of a run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Seed the generator ran with (reuse to reproduce)
    pub seed: u64,
    /// Cases executed
    pub executed: usize,
    /// Cases that conformed
    pub passed: usize,
    /// Every failing case
    pub failures: Vec<CaseFailure>,
}

impl RunReport {
    /// Start an empty report
    pub fn new(seed: u64) -> Self {
        Self {
            started_at: Utc::now(),
            seed,
            executed: 0,
            passed: 0,
            failures: Vec::new(),
        }
    }

    /// Record a conforming case
    pub fn record_pass(&mut self) {
        self.executed += 1;
        self.passed += 1;
    }

    /// Record a failing case
    pub fn record_failure(&mut self, failure: CaseFailure) {
        self.executed += 1;
        self.failures.push(failure);
    }

    /// Whether every executed case conformed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = RunReport::new(1);
        report.record_pass();
        report.record_pass();
        report.record_failure(CaseFailure {
            operation_id: "post-user".to_string(),
            mode: Mode::Positive,
            case: "[positive] POST /user".to_string(),
            reason: "undeclared status 500".to_string(),
        });

        assert_eq!(report.executed, 3);
        assert_eq!(report.passed, 2);
        assert!(!report.is_success());
        assert!(report.failures[0].to_string().contains("undeclared status"));
    }
}
