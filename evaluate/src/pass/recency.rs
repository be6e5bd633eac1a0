use crate::config::EvaluationContext;
use crate::pass::{AnyEvaluationPass, Evaluation};
use crate::tier::Classification;
use chrono::NaiveDate;
use model::parse::{last_modified_date, months_between};
use model::DatasetRecord;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RecencyData {
    pub last_modified: Option<NaiveDate>, // 只保留日期
}

impl From<&DatasetRecord> for RecencyData {
    fn from(record: &DatasetRecord) -> Self {
        let last_modified = record.last_modified.as_deref().and_then(|raw| {
            last_modified_date(raw)
                .map_err(|e| debug!("{}: {}", record.dataset_id, e))
                .ok()
        });
        Self { last_modified }
    }
}

/// Signed calendar months from `last_modified` to `today`; `None` without a date.
pub fn recency_score(today: NaiveDate, last_modified: Option<NaiveDate>) -> Option<i64> {
    last_modified.map(|date| months_between(today, date))
}

pub struct Recency;

impl AnyEvaluationPass for Recency {
    fn apply(&self, ctx: &EvaluationContext, record: &DatasetRecord, evaluation: &mut Evaluation) {
        let data = RecencyData::from(record);
        let score = recency_score(ctx.evaluation_date, data.last_modified);
        evaluation.recency_maintenance_score = score;
        evaluation.recency_maintenance_level = match score {
            Some(months) => {
                Classification::from(ctx.thresholds.recency.classify(months.unsigned_abs() as f64))
            }
            None => Classification::Uncategorized,
        };
    }

    fn name(&self) -> &'static str {
        "recency_maintenance_level"
    }
}
