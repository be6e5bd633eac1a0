use crate::config::{EvaluationContext, LicensingCategories};
use crate::pass::{AnyEvaluationPass, Evaluation};
use crate::tier::{Classification, Tier};
use model::DatasetRecord;

/// 精确匹配: "none" 为 Low, "unknown"/"other" 为 Medium, 其他许可证为 High
pub fn classify_licensing(license: Option<&str>, categories: &LicensingCategories) -> Classification {
    match license {
        None => Classification::Uncategorized,
        Some(name) if categories.low.iter().any(|c| c == name) => Tier::Low.into(),
        Some(name) if categories.medium.iter().any(|c| c == name) => Tier::Medium.into(),
        Some(_) => Tier::High.into(),
    }
}

pub struct Licensing;

impl AnyEvaluationPass for Licensing {
    fn apply(&self, ctx: &EvaluationContext, record: &DatasetRecord, evaluation: &mut Evaluation) {
        evaluation.licensing_transparency_level =
            classify_licensing(record.license_name(), &ctx.thresholds.licensing);
    }

    fn name(&self) -> &'static str {
        "licensing_transparency_level"
    }
}
