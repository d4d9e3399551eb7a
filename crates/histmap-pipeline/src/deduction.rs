//! Deduction and evaluation stage drivers

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::report::StageReport;
use histmap_core::DeductionResult;
use histmap_deduce::{DeduceConfig, EvaluationSummary, deduce};
use histmap_storage::Storage;
use rayon::prelude::*;

fn deduce_building(
    storage: &Storage,
    config: &DeduceConfig,
    id: &str,
) -> PipelineResult<DeductionResult> {
    let history = storage.read_history(id)?;
    let result = deduce(&history, config)?;
    storage.write_deduction(id, &result)?;
    Ok(result)
}

/// Deduce a construction interval for every linked building
///
/// Buildings run in parallel. A building whose history is missing,
/// empty, out of order, or malformed is reported and skipped.
pub fn run_deduction(storage: &Storage, config: &PipelineConfig) -> PipelineResult<StageReport> {
    let ids = storage.building_ids()?;
    config.deduce.validate()?;
    storage.prepare_deduction(config.reset)?;

    let outcomes: Vec<(&String, PipelineResult<DeductionResult>)> = ids
        .par_iter()
        .map(|id| (id, deduce_building(storage, &config.deduce, id)))
        .collect();

    let mut report = StageReport::default();
    for (id, outcome) in outcomes {
        match outcome {
            Ok(_) => report.success(),
            Err(e) => report.failure(format!("building {id}"), e),
        }
    }
    tracing::info!(%report, "deduction stage finished");
    Ok(report)
}

/// Compare stored deductions with registry construction years
///
/// Buildings lacking either side are left out.
pub fn run_evaluation(storage: &Storage) -> PipelineResult<EvaluationSummary> {
    let mut summary = EvaluationSummary::default();
    for id in storage.building_ids()? {
        let deduced = storage.read_deduction(&id)?;
        let reference = storage.read_reference(&id)?;
        let (Some(result), Some(year)) = (deduced, reference) else {
            continue;
        };
        summary.add(&result, year);
    }
    tracing::info!(%summary, "evaluation finished");
    Ok(summary)
}
