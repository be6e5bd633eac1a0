use crate::config::EvaluationContext;
use crate::pass::{AnyEvaluationPass, Evaluation};
use crate::tier::Classification;
use model::DatasetRecord;

#[derive(Debug, Clone)]
pub struct PopularityData {
    pub likes: Option<i64>,
    pub downloads: Option<i64>,
}

impl From<&DatasetRecord> for PopularityData {
    fn from(record: &DatasetRecord) -> Self {
        Self {
            likes: record.likes,
            downloads: record.downloads,
        }
    }
}

/// likes + downloads, 缺失按 0 计
pub fn popularity_score(likes: Option<i64>, downloads: Option<i64>) -> i64 {
    likes.unwrap_or(0).saturating_add(downloads.unwrap_or(0))
}

pub struct Popularity;

impl AnyEvaluationPass for Popularity {
    fn apply(&self, ctx: &EvaluationContext, record: &DatasetRecord, evaluation: &mut Evaluation) {
        let data = PopularityData::from(record);
        let score = popularity_score(data.likes, data.downloads);
        evaluation.popularity_score = score;
        evaluation.popularity_level =
            Classification::from(ctx.thresholds.popularity.classify(score as f64));
    }

    fn name(&self) -> &'static str {
        "popularity_level"
    }
}
