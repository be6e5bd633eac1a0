//! Keyword signal detectors used by the documentation and annotation scores.
//!
//! A detector answers one yes/no question about README text ("does it
//! mention usage?"). A [`SignalSet`] counts how many of its detectors fire.

use serde::Deserialize;

pub trait SignalDetector: Send + Sync {
    fn name(&self) -> &str;
    /// `text` is already lower-cased.
    fn detect(&self, text: &str) -> bool;
}

/// Fires when any of its keywords occurs as a substring.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordSignal {
    name: String,
    keywords: Vec<String>,
}

impl KeywordSignal {
    pub fn new<S: AsRef<str>>(name: impl Into<String>, keywords: &[S]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| k.as_ref().to_lowercase()).collect(),
        }
    }
}

impl SignalDetector for KeywordSignal {
    fn name(&self) -> &str {
        &self.name
    }

    fn detect(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}

/// 配置文件中的信号定义
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SignalSpec {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Default)]
pub struct SignalSet {
    detectors: Vec<Box<dyn SignalDetector>>,
}

impl SignalSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, detector: impl SignalDetector + 'static) -> Self {
        self.detectors.push(Box::new(detector));
        self
    }

    pub fn from_specs(specs: &[SignalSpec]) -> Self {
        specs.iter().fold(Self::new(), |set, spec| {
            set.with(KeywordSignal::new(spec.name.clone(), spec.keywords.as_slice()))
        })
    }

    pub fn documentation() -> Self {
        Self::new()
            .with(KeywordSignal::new("usage", &["usage", "how to use"]))
            .with(KeywordSignal::new("license", &["license"]))
            .with(KeywordSignal::new("examples", &["example", "examples"]))
            .with(KeywordSignal::new("citation", &["citation", "how to cite"]))
            .with(KeywordSignal::new("description", &["description", "overview"]))
            .with(KeywordSignal::new("authors", &["author", "maintainer"]))
    }

    pub fn annotation() -> Self {
        Self::new()
            .with(KeywordSignal::new("task", &["task categories", "task_categories"]))
            .with(KeywordSignal::new("language", &["language"]))
            .with(KeywordSignal::new("size", &["size categories", "size_categories"]))
            .with(KeywordSignal::new("license", &["license"]))
            .with(KeywordSignal::new("source", &["dataset source", "source_datasets"]))
            .with(KeywordSignal::new("configs", &["configs", "dataset_info"]))
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Number of detectors that fire on `text`.
    pub fn score(&self, text: &str) -> u32 {
        let text = text.to_lowercase();
        self.detectors.iter().filter(|d| d.detect(&text)).count() as u32
    }

    pub fn matched(&self, text: &str) -> Vec<&str> {
        let text = text.to_lowercase();
        self.detectors
            .iter()
            .filter(|d| d.detect(&text))
            .map(|d| d.name())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CARD: &str = "---\nlicense: cc-by-4.0\nlanguage:\n- ar\ntask_categories:\n- question-answering\n\
        size_categories:\n- 1K<n<10K\nsource_datasets:\n- original\nconfigs:\n- config_name: default\n---\n\
        # Dataset Card\n## Dataset Description\nOverview of the data.\n## Usage\nHow to use it, for example:\n\
        ## Citation\n## Authors\nMaintainer: someone";

    #[test]
    fn test_documentation_signals() {
        let set = SignalSet::documentation();
        assert_eq!(set.len(), 6);
        assert_eq!(set.score(FULL_CARD), 6);
        assert_eq!(set.score("USAGE and LICENSE"), 2);
        assert_eq!(set.score(""), 0);
    }

    #[test]
    fn test_annotation_signals() {
        let set = SignalSet::annotation();
        assert_eq!(set.score(FULL_CARD), 6);
        assert_eq!(set.matched("Task Categories: qa; Language: ar"), vec!["task", "language"]);
    }

    #[test]
    fn test_scores_bounded_by_detector_count() {
        let texts = [FULL_CARD, "", "license license license", "usage usage how to use"];
        for text in texts {
            assert!(SignalSet::documentation().score(text) <= 6);
            assert!(SignalSet::annotation().score(text) <= 6);
        }
    }

    #[test]
    fn test_custom_vocabulary() {
        let set = SignalSet::from_specs(&[
            SignalSpec {
                name: "arabic".to_owned(),
                keywords: vec!["Arabic".to_owned(), "العربية".to_owned()],
            },
            SignalSpec {
                name: "benchmark".to_owned(),
                keywords: vec!["leaderboard".to_owned()],
            },
        ]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.score("An ARABIC corpus"), 1);
        assert_eq!(set.score("مجموعة بيانات العربية with a leaderboard"), 2);
    }
}
