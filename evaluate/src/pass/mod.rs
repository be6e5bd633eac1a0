pub mod adoption;
pub mod documentation;
pub mod licensing;
pub mod popularity;
pub mod recency;
pub mod scientific;

use crate::config::EvaluationContext;
use crate::tier::Classification;
use model::DatasetRecord;

/// 派生列, 导出时排在原始列之后
pub const EVALUATION_COLUMNS: [&str; 15] = [
    "documentation_score",
    "annotation_score",
    "documentation_annotation_level",
    "popularity_score",
    "popularity_level",
    "adoption_score",
    "adoption_level",
    "recency_maintenance_score",
    "recency_maintenance_level",
    "licensing_transparency_level",
    "arXiv_score",
    "acl_score",
    "doi_score",
    "scientific_contribution_score",
    "scientific_contribution_level",
];

/// Tier columns reported by default.
pub const LEVEL_COLUMNS: [&str; 6] = [
    "documentation_annotation_level",
    "popularity_level",
    "adoption_level",
    "recency_maintenance_level",
    "licensing_transparency_level",
    "scientific_contribution_level",
];

/// Scores and tiers derived from one record. Never written back into the record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub documentation_score: Option<u32>,
    pub annotation_score: Option<u32>,
    pub documentation_annotation_level: Classification,
    pub popularity_score: i64,
    pub popularity_level: Classification,
    pub adoption_score: i64,
    pub adoption_level: Classification,
    pub recency_maintenance_score: Option<i64>,
    pub recency_maintenance_level: Classification,
    pub licensing_transparency_level: Classification,
    pub arxiv_score: i64,
    pub acl_score: i64,
    pub doi_score: i64,
    pub scientific_contribution_score: i64,
    pub scientific_contribution_level: Classification,
}

impl Evaluation {
    /// Field values in `EVALUATION_COLUMNS` order.
    pub fn to_fields(&self) -> Vec<Option<String>> {
        vec![
            self.documentation_score.map(|v| v.to_string()),
            self.annotation_score.map(|v| v.to_string()),
            Some(self.documentation_annotation_level.to_string()),
            Some(self.popularity_score.to_string()),
            Some(self.popularity_level.to_string()),
            Some(self.adoption_score.to_string()),
            Some(self.adoption_level.to_string()),
            self.recency_maintenance_score.map(|v| v.to_string()),
            Some(self.recency_maintenance_level.to_string()),
            Some(self.licensing_transparency_level.to_string()),
            Some(self.arxiv_score.to_string()),
            Some(self.acl_score.to_string()),
            Some(self.doi_score.to_string()),
            Some(self.scientific_contribution_score.to_string()),
            Some(self.scientific_contribution_level.to_string()),
        ]
    }
}

pub trait AnyEvaluationPass: Send + Sync {
    fn apply(&self, ctx: &EvaluationContext, record: &DatasetRecord, evaluation: &mut Evaluation);
    /// The tier column this pass fills.
    fn name(&self) -> &'static str;
}
