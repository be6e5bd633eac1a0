use crate::signal::SignalSpec;
use crate::tier::{MaximumThresholds, MinimumThresholds};
use anyhow::Context;
use chrono::{Local, NaiveDate};
use config::{Config, Environment, File, FileFormat};
use hub_handler::{HubConfig, KeywordSearch};
use serde::Deserialize;

/// 分级阈值配置, 每个维度一组
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ThresholdConfig {
    pub popularity: MinimumThresholds,
    pub adoption: MinimumThresholds,
    pub recency: MaximumThresholds,
    pub scientific_contribution: MinimumThresholds,
    pub documentation_averaged: MinimumThresholds,
    pub documentation_totaled: MinimumThresholds,
    pub readme_quality: MinimumThresholds,
    pub licensing: LicensingCategories,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            popularity: MinimumThresholds::new(200.0, 100.0),
            adoption: MinimumThresholds::new(50.0, 20.0),
            recency: MaximumThresholds::new(6.0, 12.0),
            scientific_contribution: MinimumThresholds::new(3.0, 2.0),
            documentation_averaged: MinimumThresholds::new(4.0, 2.0),
            documentation_totaled: MinimumThresholds::new(8.0, 4.0),
            readme_quality: MinimumThresholds::new(4.0, 2.0),
            licensing: LicensingCategories::default(),
        }
    }
}

/// Exact license values that are not a known license.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LicensingCategories {
    pub low: Vec<String>,
    pub medium: Vec<String>,
}

impl Default for LicensingCategories {
    fn default() -> Self {
        Self {
            low: vec!["none".to_owned()],
            medium: vec!["unknown".to_owned(), "other".to_owned()],
        }
    }
}

/// 可替换的关键字词表, 未配置时使用内置词表
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SignalConfig {
    pub documentation: Option<Vec<SignalSpec>>,
    pub annotation: Option<Vec<SignalSpec>>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TaskCategory {
    pub label: String,
    pub hub_task: String,
    #[serde(default)]
    pub fallback: Option<KeywordSearch>,
}

/// 评价上下文结构体
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EvaluationContext {
    pub thresholds: ThresholdConfig,
    pub signals: SignalConfig,
    pub hub: HubConfig,
    pub tasks: Vec<TaskCategory>,
    #[serde(skip)]
    pub evaluation_date: NaiveDate,
}

impl Default for EvaluationContext {
    fn default() -> Self {
        Self {
            thresholds: ThresholdConfig::default(),
            signals: SignalConfig::default(),
            hub: HubConfig::default(),
            tasks: default_tasks(),
            evaluation_date: Local::now().date_naive(),
        }
    }
}

impl EvaluationContext {
    pub fn load_config(config_path: &str) -> anyhow::Result<Self> {
        Config::builder()
            .add_source(
                File::with_name(config_path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("DSEVAL")
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()
            .with_context(|| anyhow::anyhow!("Failed to load config"))?
            .try_deserialize()
            .with_context(|| anyhow::anyhow!("Failed to deserialize config"))
    }

    pub fn task(&self, label: &str) -> Option<&TaskCategory> {
        self.tasks.iter().find(|t| t.label == label)
    }
}

fn keywords(search_keywords: &[&str]) -> Option<KeywordSearch> {
    Some(KeywordSearch {
        search_keywords: search_keywords.iter().map(|k| k.to_string()).collect(),
        required_modality: "modality:text".to_owned(),
    })
}

fn task(label: &str, hub_task: &str, fallback: Option<KeywordSearch>) -> TaskCategory {
    TaskCategory {
        label: label.to_owned(),
        hub_task: hub_task.to_owned(),
        fallback,
    }
}

pub fn default_tasks() -> Vec<TaskCategory> {
    vec![
        task("Q&A", "question-answering", None),
        task(
            "Reasoning & Multi-step Thinking",
            "reasoning",
            keywords(&["Reasoning", "Multi-step reasoning"]),
        ),
        task("Summarization", "summarization", None),
        task(
            "Cultural Alignment",
            "cultural-aligned",
            keywords(&["cultural", "culture", "cidar"]),
        ),
        task(
            "Dialog/Conversation",
            "conversational",
            keywords(&["Dialog", "Conversation"]),
        ),
        task(
            "Personal Ownership/System Prompt",
            "System Prompt",
            keywords(&["system prompt", "persona"]),
        ),
        task(
            "Robustness & Safety",
            "Safety",
            keywords(&["Robustness", "Safety", "Toxicity", "jailbreak"]),
        ),
        task("Function Call", "function-call", keywords(&["Function Call"])),
        task(
            "Ethics, Bias, and Fairness",
            "bias-and-fairness",
            keywords(&["Ethics", "Bias", "Fairness"]),
        ),
        task("Code Generation", "Code Generation", keywords(&["code generation"])),
        task(
            "Official Documentation",
            "documentation",
            keywords(&["Documentation", "Official Documentation"]),
        ),
        task("Translation", "translation", None),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let t = ThresholdConfig::default();
        assert_eq!(t.popularity, MinimumThresholds::new(200.0, 100.0));
        assert_eq!(t.adoption, MinimumThresholds::new(50.0, 20.0));
        assert_eq!(t.recency, MaximumThresholds::new(6.0, 12.0));
        assert_eq!(t.scientific_contribution, MinimumThresholds::new(3.0, 2.0));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let ctx = EvaluationContext::load_config("does/not/exist/config").unwrap();
        assert_eq!(ctx.thresholds, ThresholdConfig::default());
        assert_eq!(ctx.tasks.len(), 12);
        assert_eq!(ctx.hub.language, "ar");
    }

    #[test]
    fn test_load_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[thresholds.popularity]
high = 500
medium = 250

[[signals.documentation]]
name = "arabic"
keywords = ["arabic"]

[[tasks]]
label = "Poetry"
hub_task = "text-generation"

[tasks.fallback]
search_keywords = ["poetry", "shi'r"]
"#,
        )
        .unwrap();
        let config_path = dir.path().join("config");
        let ctx = EvaluationContext::load_config(config_path.to_str().unwrap()).unwrap();

        assert_eq!(ctx.thresholds.popularity, MinimumThresholds::new(500.0, 250.0));
        assert_eq!(ctx.thresholds.adoption, MinimumThresholds::new(50.0, 20.0));
        assert_eq!(ctx.signals.documentation.as_ref().map(Vec::len), Some(1));
        assert!(ctx.signals.annotation.is_none());
        let poetry = ctx.task("Poetry").unwrap();
        assert_eq!(poetry.hub_task, "text-generation");
        assert_eq!(
            poetry.fallback.as_ref().unwrap().required_modality,
            "modality:text"
        );
    }

    #[test]
    fn test_dialog_has_keyword_fallback() {
        let tasks = default_tasks();
        let dialog = tasks.iter().find(|t| t.label == "Dialog/Conversation").unwrap();
        assert!(dialog.fallback.is_some());
        assert!(tasks.iter().find(|t| t.label == "Q&A").unwrap().fallback.is_none());
    }
}
