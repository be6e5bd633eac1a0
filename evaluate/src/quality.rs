//! README quality attached to collected records.
//!
//! Uses the same documentation vocabulary as the documentation/annotation
//! pass, so both read a README the same way.

use crate::config::EvaluationContext;
use crate::signal::SignalSet;
use crate::tier::{MinimumThresholds, Tier};
use model::DatasetRecord;

/// 去掉首尾空白后少于该字符数的 README 直接为 Low
pub const MIN_README_CHARS: usize = 20;

pub struct ReadmeQuality {
    signals: SignalSet,
    thresholds: MinimumThresholds,
}

impl ReadmeQuality {
    pub fn new(ctx: &EvaluationContext) -> Self {
        let signals = match &ctx.signals.documentation {
            Some(specs) => SignalSet::from_specs(specs),
            None => SignalSet::documentation(),
        };
        Self::with_signals(signals, ctx.thresholds.readme_quality)
    }

    pub fn with_signals(signals: SignalSet, thresholds: MinimumThresholds) -> Self {
        Self {
            signals,
            thresholds,
        }
    }

    /// Missing README scores 0.
    pub fn score(&self, readme: Option<&str>) -> u32 {
        readme.map_or(0, |text| self.signals.score(text))
    }

    pub fn level(&self, readme: Option<&str>) -> Tier {
        match readme {
            Some(text) if text.trim().chars().count() >= MIN_README_CHARS => {
                self.thresholds.classify(self.score(Some(text)) as f64)
            }
            _ => Tier::Low,
        }
    }

    pub fn annotate(&self, record: &mut DatasetRecord) {
        let readme = record.readme.as_deref();
        let score = self.score(readme);
        let level = self.level(readme);
        record.readme_quality_score = Some(score);
        record.readme_quality_level = Some(level.as_str().to_owned());
    }
}
