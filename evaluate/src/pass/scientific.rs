use crate::config::EvaluationContext;
use crate::pass::{AnyEvaluationPass, Evaluation};
use crate::tier::Classification;
use model::DatasetRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScientificData {
    pub arxiv_score: i64,
    pub acl_score: i64,
    pub doi_score: i64,
}

impl From<&DatasetRecord> for ScientificData {
    fn from(record: &DatasetRecord) -> Self {
        Self {
            arxiv_score: record.arxiv_link().is_some() as i64,
            acl_score: record.acl_papers.len() as i64,
            doi_score: record.doi().is_some() as i64,
        }
    }
}

impl ScientificData {
    /// ACL 链接按实际数量计分, 不设上限
    pub fn score(&self) -> i64 {
        self.arxiv_score + self.acl_score + self.doi_score
    }
}

pub struct ScientificContribution;

impl AnyEvaluationPass for ScientificContribution {
    fn apply(&self, ctx: &EvaluationContext, record: &DatasetRecord, evaluation: &mut Evaluation) {
        let data = ScientificData::from(record);
        let score = data.score();
        evaluation.arxiv_score = data.arxiv_score;
        evaluation.acl_score = data.acl_score;
        evaluation.doi_score = data.doi_score;
        evaluation.scientific_contribution_score = score;
        evaluation.scientific_contribution_level =
            Classification::from(ctx.thresholds.scientific_contribution.classify(score as f64));
    }

    fn name(&self) -> &'static str {
        "scientific_contribution_level"
    }
}
