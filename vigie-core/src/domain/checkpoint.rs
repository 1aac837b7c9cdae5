// vigie-core/src/domain/checkpoint.rs

use serde::{Deserialize, Serialize};

use crate::domain::batch::BatchRequest;

/// One (batch, suite) pairing inside a checkpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationBinding {
    pub batch_request: BatchRequest,
    pub expectation_suite_name: String,
}

/// A bound pairing of data batches and expectation suites, executable to
/// produce a validation result per binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub name: String,
    pub validations: Vec<ValidationBinding>,
}

/// Outcome of a single expectation inside a validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectationOutcome {
    pub description: String,
    pub success: bool,
    /// What the warehouse actually reported (count, bound...), for the docs.
    pub observed: String,
}

/// Outcome of one batch+suite validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// `<suite>/<run-stamp>/<asset>` — used to locate the report fragment.
    pub identifier: String,
    pub suite_name: String,
    pub asset: String,
    pub outcomes: Vec<ExpectationOutcome>,
}

impl ValidationResult {
    pub fn success(&self) -> bool {
        self.outcomes.iter().all(|o| o.success)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointResult {
    pub checkpoint_name: String,
    pub run_at: String,
    pub success: bool,
    pub validation_results: Vec<ValidationResult>,
}

impl CheckpointResult {
    /// Identifiers in execution order. The first one is what the docs opener
    /// points the browser at.
    pub fn list_validation_result_identifiers(&self) -> Vec<&str> {
        self.validation_results
            .iter()
            .map(|v| v.identifier.as_str())
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn outcome(success: bool) -> ExpectationOutcome {
        ExpectationOutcome {
            description: "expect row count to be between 1 and 1".into(),
            success,
            observed: "1".into(),
        }
    }

    #[test]
    fn test_identifiers_preserve_order() {
        let result = CheckpointResult {
            checkpoint_name: "my_checkpoint".into(),
            run_at: "2024-03-07T00:00:00Z".into(),
            success: true,
            validation_results: vec![
                ValidationResult {
                    identifier: "20240307_orders/20240307T000000/orders".into(),
                    suite_name: "20240307_orders".into(),
                    asset: "orders".into(),
                    outcomes: vec![outcome(true)],
                },
                ValidationResult {
                    identifier: "20240307_customers/20240307T000000/customers".into(),
                    suite_name: "20240307_customers".into(),
                    asset: "customers".into(),
                    outcomes: vec![outcome(true)],
                },
            ],
        };

        let ids = result.list_validation_result_identifiers();
        assert_eq!(ids.len(), 2);
        assert!(ids[0].starts_with("20240307_orders/"));
    }

    #[test]
    fn test_validation_success_requires_all_outcomes() {
        let validation = ValidationResult {
            identifier: "s/r/a".into(),
            suite_name: "s".into(),
            asset: "a".into(),
            outcomes: vec![outcome(true), outcome(false)],
        };
        assert!(!validation.success());
    }
}
