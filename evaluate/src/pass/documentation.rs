use crate::config::{EvaluationContext, ThresholdConfig};
use crate::pass::{AnyEvaluationPass, Evaluation};
use crate::signal::SignalSet;
use crate::tier::{Classification, Tier};
use model::DatasetRecord;
use serde::Deserialize;
use std::fmt;

/// How documentation and annotation scores are combined into one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DocumentationStrategy {
    /// (doc + annotation) / 2 against the averaged thresholds
    #[default]
    Averaged,
    /// doc + annotation against the totaled thresholds
    Totaled,
}

impl DocumentationStrategy {
    pub fn combine(&self, documentation: u32, annotation: u32) -> f64 {
        let total = (documentation + annotation) as f64;
        match self {
            DocumentationStrategy::Averaged => total / 2.0,
            DocumentationStrategy::Totaled => total,
        }
    }

    pub fn classify(&self, thresholds: &ThresholdConfig, documentation: u32, annotation: u32) -> Tier {
        let combined = self.combine(documentation, annotation);
        match self {
            DocumentationStrategy::Averaged => thresholds.documentation_averaged.classify(combined),
            DocumentationStrategy::Totaled => thresholds.documentation_totaled.classify(combined),
        }
    }
}

impl fmt::Display for DocumentationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentationStrategy::Averaged => f.write_str("averaged"),
            DocumentationStrategy::Totaled => f.write_str("totaled"),
        }
    }
}

pub struct DocumentationAnnotation {
    strategy: DocumentationStrategy,
    documentation: SignalSet,
    annotation: SignalSet,
}

impl DocumentationAnnotation {
    /// 配置中有词表时使用配置词表
    pub fn new(ctx: &EvaluationContext, strategy: DocumentationStrategy) -> Self {
        let documentation = match &ctx.signals.documentation {
            Some(specs) => SignalSet::from_specs(specs),
            None => SignalSet::documentation(),
        };
        let annotation = match &ctx.signals.annotation {
            Some(specs) => SignalSet::from_specs(specs),
            None => SignalSet::annotation(),
        };
        Self::with_signals(strategy, documentation, annotation)
    }

    pub fn with_signals(
        strategy: DocumentationStrategy,
        documentation: SignalSet,
        annotation: SignalSet,
    ) -> Self {
        Self {
            strategy,
            documentation,
            annotation,
        }
    }

    pub fn strategy(&self) -> DocumentationStrategy {
        self.strategy
    }

    pub fn documentation_score(&self, text: &str) -> u32 {
        self.documentation.score(text)
    }

    pub fn annotation_score(&self, text: &str) -> u32 {
        self.annotation.score(text)
    }
}

impl AnyEvaluationPass for DocumentationAnnotation {
    fn apply(&self, ctx: &EvaluationContext, record: &DatasetRecord, evaluation: &mut Evaluation) {
        let Some(text) = record.readme_text() else {
            evaluation.documentation_score = None;
            evaluation.annotation_score = None;
            evaluation.documentation_annotation_level = Classification::Uncategorized;
            return;
        };

        let documentation = self.documentation_score(text);
        let annotation = self.annotation_score(text);
        evaluation.documentation_score = Some(documentation);
        evaluation.annotation_score = Some(annotation);
        evaluation.documentation_annotation_level = Classification::from(self.strategy.classify(
            &ctx.thresholds,
            documentation,
            annotation,
        ));
    }

    fn name(&self) -> &'static str {
        "documentation_annotation_level"
    }
}
