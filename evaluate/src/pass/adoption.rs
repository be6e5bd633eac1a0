use crate::config::EvaluationContext;
use crate::pass::{AnyEvaluationPass, Evaluation};
use crate::tier::Classification;
use model::DatasetRecord;

#[derive(Debug, Clone)]
pub struct AdoptionData {
    pub models: Option<i64>,
    pub spaces: Option<i64>,
}

impl From<&DatasetRecord> for AdoptionData {
    fn from(record: &DatasetRecord) -> Self {
        Self {
            models: record.models,
            spaces: record.spaces,
        }
    }
}

pub fn adoption_score(models: Option<i64>, spaces: Option<i64>) -> i64 {
    models.unwrap_or(0).saturating_add(spaces.unwrap_or(0))
}

pub struct Adoption;

impl AnyEvaluationPass for Adoption {
    fn apply(&self, ctx: &EvaluationContext, record: &DatasetRecord, evaluation: &mut Evaluation) {
        let data = AdoptionData::from(record);
        let score = adoption_score(data.models, data.spaces);
        evaluation.adoption_score = score;
        evaluation.adoption_level =
            Classification::from(ctx.thresholds.adoption.classify(score as f64));
    }

    fn name(&self) -> &'static str {
        "adoption_level"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::Tier;

    #[test]
    fn test_adoption_levels() {
        let ctx = EvaluationContext::default();
        let cases = [
            (None, None, 0, Tier::Low),
            (Some(19), None, 19, Tier::Low),
            (Some(10), Some(10), 20, Tier::Medium),
            (Some(49), None, 49, Tier::Medium),
            (Some(30), Some(20), 50, Tier::High),
        ];
        for (models, spaces, score, tier) in cases {
            let mut record = DatasetRecord::new("org/a");
            record.models = models;
            record.spaces = spaces;
            let mut evaluation = Evaluation::default();
            Adoption.apply(&ctx, &record, &mut evaluation);
            assert_eq!(evaluation.adoption_score, score);
            assert_eq!(evaluation.adoption_level, Classification::Classified(tier));
        }
    }

    #[test]
    fn test_adoption_score_saturates() {
        assert_eq!(adoption_score(Some(i64::MAX), Some(5)), i64::MAX);
        assert_eq!(adoption_score(None, Some(i64::MAX)), i64::MAX);
    }
}
