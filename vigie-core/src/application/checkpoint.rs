// vigie-core/src/application/checkpoint.rs

use chrono::Utc;
use tracing::info;

use crate::application::docs::DataDocsBuilder;
use crate::domain::checkpoint::{
    Checkpoint, CheckpointResult, ExpectationOutcome, ValidationBinding, ValidationResult,
};
use crate::domain::error::DomainError;
use crate::domain::suite::Expectation;
use crate::error::VigieError;
use crate::infrastructure::store::DataContext;
use crate::ports::warehouse::Warehouse;

/// Execute a checkpoint: validate every (batch, suite) binding against the
/// warehouse, persist the result, then rebuild the data docs.
///
/// Unlike the suite builder, a failing *execution* here aborts the run: a
/// half-validated checkpoint would publish misleading docs. Failing
/// *expectations* are not errors; they land in the result as `success: false`.
pub async fn run_checkpoint(
    ctx: &DataContext,
    warehouse: &dyn Warehouse,
    checkpoint: &Checkpoint,
) -> Result<CheckpointResult, VigieError> {
    let run_at = Utc::now();
    let run_stamp = run_at.format("%Y%m%dT%H%M%S").to_string();

    println!(
        "🚦 Running checkpoint '{}' ({} validation(s))...",
        checkpoint.name,
        checkpoint.validations.len()
    );

    let mut validation_results = Vec::with_capacity(checkpoint.validations.len());
    for binding in &checkpoint.validations {
        let result = validate_binding(ctx, warehouse, binding, &run_stamp)
            .await
            .map_err(|e| match e {
                // Suite lookup failures keep their own diagnostic
                VigieError::Domain(DomainError::SuiteNotFound(n)) => {
                    VigieError::Domain(DomainError::SuiteNotFound(n))
                }
                other => VigieError::Domain(DomainError::CheckpointError(
                    checkpoint.name.clone(),
                    other.to_string(),
                )),
            })?;

        let icon = if result.success() { "✅" } else { "⚠️" };
        println!(
            "   {} {} ({} expectation(s))",
            icon,
            result.identifier,
            result.outcomes.len()
        );
        validation_results.push(result);
    }

    let result = CheckpointResult {
        checkpoint_name: checkpoint.name.clone(),
        run_at: run_at.to_rfc3339(),
        success: validation_results.iter().all(|v| v.success()),
        validation_results,
    };

    ctx.save_checkpoint_result(&result, &run_stamp)?;

    // Trigger documentation build (the docs read everything back from the store)
    DataDocsBuilder::build(ctx)?;

    info!(
        checkpoint = %checkpoint.name,
        success = result.success,
        "Checkpoint finished"
    );
    Ok(result)
}

async fn validate_binding(
    ctx: &DataContext,
    warehouse: &dyn Warehouse,
    binding: &ValidationBinding,
    run_stamp: &str,
) -> Result<ValidationResult, VigieError> {
    let suite = ctx.load_suite(&binding.expectation_suite_name)?;
    let batch = &binding.batch_request;
    let sample = batch.to_query();

    // One schema fetch per asset serves all existence checks
    let columns = warehouse.fetch_columns(&batch.data_asset_name).await?;
    let column_names: Vec<String> = columns.iter().map(|c| c.name.to_lowercase()).collect();

    let mut outcomes = Vec::with_capacity(suite.expectations.len());
    for expectation in &suite.expectations {
        let outcome = match expectation {
            Expectation::ColumnToExist { column } => {
                let found = column_names.contains(&column.to_lowercase());
                ExpectationOutcome {
                    description: expectation.describe(),
                    success: found,
                    observed: if found { "present".into() } else { "absent".into() },
                }
            }
            Expectation::ColumnValuesNotNull { column } => {
                let nulls = warehouse
                    .query_scalar(&format!(
                        "SELECT count(*) FROM ({}) AS batch WHERE {} IS NULL",
                        sample, column
                    ))
                    .await?;
                ExpectationOutcome {
                    description: expectation.describe(),
                    success: nulls == 0,
                    observed: format!("{} null(s)", nulls),
                }
            }
            Expectation::ColumnValuesUnique { column } => {
                let duplicates = warehouse
                    .query_scalar(&format!(
                        "SELECT count(*) FROM (SELECT {} FROM ({}) AS batch WHERE {} IS NOT NULL GROUP BY {} HAVING count(*) > 1) AS dups",
                        column, sample, column, column
                    ))
                    .await?;
                ExpectationOutcome {
                    description: expectation.describe(),
                    success: duplicates == 0,
                    observed: format!("{} duplicated value(s)", duplicates),
                }
            }
            Expectation::RowCountBetween { min, max } => {
                let count = warehouse
                    .query_scalar(&format!("SELECT count(*) FROM ({}) AS batch", sample))
                    .await?;
                ExpectationOutcome {
                    description: expectation.describe(),
                    success: (*min..=*max).contains(&count),
                    observed: count.to_string(),
                }
            }
        };
        outcomes.push(outcome);
    }

    Ok(ValidationResult {
        identifier: format!(
            "{}/{}/{}",
            suite.name, run_stamp, batch.data_asset_name
        ),
        suite_name: suite.name,
        asset: batch.data_asset_name.clone(),
        outcomes,
    })
}
