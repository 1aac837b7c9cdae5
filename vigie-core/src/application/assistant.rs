// vigie-core/src/application/assistant.rs

// Automated expectation inference over one bounded batch. The profiling
// heuristics stay deliberately simple: everything is derived from SQL
// aggregates through the Warehouse port, so any engine can answer.

use chrono::Utc;
use tracing::{debug, info};

use crate::domain::batch::BatchRequest;
use crate::domain::error::DomainError;
use crate::domain::suite::{Expectation, ExpectationSuite};
use crate::error::VigieError;
use crate::ports::warehouse::Warehouse;

pub struct OnboardingAssistant;

impl OnboardingAssistant {
    /// Infer an expectation suite from the batch's sample.
    ///
    /// Per column (minus exclusions): existence always; not-null when the
    /// sample holds zero NULLs; uniqueness when every non-null value is
    /// distinct. Plus a row-count bound pinned to the observed count.
    pub async fn run(
        warehouse: &dyn Warehouse,
        batch: &BatchRequest,
        suite_name: &str,
        exclude_column_names: &[String],
    ) -> Result<ExpectationSuite, VigieError> {
        let table = &batch.data_asset_name;
        let sample = batch.to_query();

        let columns = warehouse
            .fetch_columns(table)
            .await
            .map_err(|e| assistant_err(table, format!("could not fetch schema: {}", e)))?;

        if columns.is_empty() {
            return Err(assistant_err(table, "table has no columns (not found?)".into()));
        }

        let total = warehouse
            .query_scalar(&format!("SELECT count(*) FROM ({}) AS batch", sample))
            .await
            .map_err(|e| assistant_err(table, format!("could not count batch rows: {}", e)))?;

        let mut expectations = vec![Expectation::RowCountBetween {
            min: total,
            max: total,
        }];

        let excluded: Vec<String> = exclude_column_names
            .iter()
            .map(|c| c.to_lowercase())
            .collect();

        for column in &columns {
            if excluded.contains(&column.name.to_lowercase()) {
                debug!(column = %column.name, "Column excluded from inference");
                continue;
            }

            expectations.push(Expectation::ColumnToExist {
                column: column.name.clone(),
            });

            if total == 0 {
                // Nothing observable; existence is all we can claim.
                continue;
            }

            let nulls = warehouse
                .query_scalar(&format!(
                    "SELECT count(*) FROM ({}) AS batch WHERE {} IS NULL",
                    sample, column.name
                ))
                .await
                .map_err(|e| assistant_err(table, format!("null scan on '{}': {}", column.name, e)))?;

            if nulls == 0 {
                expectations.push(Expectation::ColumnValuesNotNull {
                    column: column.name.clone(),
                });
            }

            let distinct = warehouse
                .query_scalar(&format!(
                    "SELECT count(DISTINCT {}) FROM ({}) AS batch",
                    column.name, sample
                ))
                .await
                .map_err(|e| {
                    assistant_err(table, format!("distinct scan on '{}': {}", column.name, e))
                })?;

            // count(DISTINCT) ignores NULLs
            let non_null = total - nulls;
            if non_null > 0 && distinct == non_null {
                expectations.push(Expectation::ColumnValuesUnique {
                    column: column.name.clone(),
                });
            }
        }

        info!(
            table = %table,
            expectations = expectations.len(),
            "Assistant inference complete"
        );

        Ok(ExpectationSuite {
            name: suite_name.to_string(),
            table: table.clone(),
            created_at: Utc::now().to_rfc3339(),
            expectations,
        })
    }
}

fn assistant_err(table: &str, reason: String) -> VigieError {
    VigieError::Domain(DomainError::AssistantError {
        table: table.to_string(),
        reason,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::duckdb::DuckDbWarehouse;
    use anyhow::Result;

    async fn seeded_warehouse() -> Result<DuckDbWarehouse> {
        let warehouse = DuckDbWarehouse::new(":memory:")?;
        warehouse
            .execute(
                "CREATE TABLE orders (id INTEGER, customer VARCHAR, note VARCHAR);
                 INSERT INTO orders VALUES
                   (1, 'alice', NULL),
                   (2, 'bob', 'rush'),
                   (3, 'alice', 'gift')",
            )
            .await?;
        Ok(warehouse)
    }

    #[tokio::test]
    async fn test_assistant_infers_expected_rules() -> Result<()> {
        let warehouse = seeded_warehouse().await?;
        let batch = BatchRequest::new("ds1", "orders", 500);

        let suite =
            OnboardingAssistant::run(&warehouse, &batch, "20240307_orders", &[]).await?;

        assert_eq!(suite.table, "orders");
        assert!(suite
            .expectations
            .contains(&Expectation::RowCountBetween { min: 3, max: 3 }));
        // id: fully distinct, no nulls
        assert!(suite
            .expectations
            .contains(&Expectation::ColumnValuesUnique { column: "id".into() }));
        assert!(suite
            .expectations
            .contains(&Expectation::ColumnValuesNotNull { column: "id".into() }));
        // customer: duplicated value, never unique
        assert!(!suite
            .expectations
            .contains(&Expectation::ColumnValuesUnique {
                column: "customer".into()
            }));
        // note: has a NULL, never not-null
        assert!(!suite
            .expectations
            .contains(&Expectation::ColumnValuesNotNull {
                column: "note".into()
            }));
        assert!(suite
            .expectations
            .contains(&Expectation::ColumnToExist {
                column: "note".into()
            }));
        Ok(())
    }

    #[tokio::test]
    async fn test_assistant_respects_exclusions() -> Result<()> {
        let warehouse = seeded_warehouse().await?;
        let batch = BatchRequest::new("ds1", "orders", 500);

        let suite = OnboardingAssistant::run(
            &warehouse,
            &batch,
            "20240307_orders",
            &["NOTE".into()],
        )
        .await?;

        assert!(!suite.expectations.iter().any(|e| matches!(
            e,
            Expectation::ColumnToExist { column } if column == "note"
        )));
        Ok(())
    }

    #[tokio::test]
    async fn test_assistant_fails_loudly_on_missing_table() -> Result<()> {
        let warehouse = DuckDbWarehouse::new(":memory:")?;
        let batch = BatchRequest::new("ds1", "ghost", 10);

        let err = OnboardingAssistant::run(&warehouse, &batch, "s", &[])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            VigieError::Domain(DomainError::AssistantError { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_assistant_limit_bounds_the_sample() -> Result<()> {
        let warehouse = seeded_warehouse().await?;
        let batch = BatchRequest::new("ds1", "orders", 2);

        let suite = OnboardingAssistant::run(&warehouse, &batch, "s", &[]).await?;
        assert!(suite
            .expectations
            .contains(&Expectation::RowCountBetween { min: 2, max: 2 }));
        Ok(())
    }
}
