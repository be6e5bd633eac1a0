use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::High => "High",
            Tier::Medium => "Medium",
            Tier::Low => "Low",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 缺少前置字段时为 Uncategorized, 与 Low 区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Classification {
    Classified(Tier),
    #[default]
    Uncategorized,
}

impl Classification {
    pub const UNCATEGORIZED: &'static str = "Uncategorized";

    pub fn tier(&self) -> Option<Tier> {
        match self {
            Classification::Classified(tier) => Some(*tier),
            Classification::Uncategorized => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Classified(tier) => tier.as_str(),
            Classification::Uncategorized => Self::UNCATEGORIZED,
        }
    }
}

impl From<Tier> for Classification {
    fn from(tier: Tier) -> Self {
        Classification::Classified(tier)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Higher scores are better: `score >= high` is High, `score >= medium` is Medium.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct MinimumThresholds {
    pub high: f64,
    pub medium: f64,
}

impl MinimumThresholds {
    pub const fn new(high: f64, medium: f64) -> Self {
        Self { high, medium }
    }

    pub fn classify(&self, score: f64) -> Tier {
        match score {
            s if s >= self.high => Tier::High,
            s if s >= self.medium => Tier::Medium,
            _ => Tier::Low,
        }
    }
}

/// Lower scores are better: `score <= high` is High, `score <= medium` is Medium.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct MaximumThresholds {
    pub high: f64,
    pub medium: f64,
}

impl MaximumThresholds {
    pub const fn new(high: f64, medium: f64) -> Self {
        Self { high, medium }
    }

    pub fn classify(&self, score: f64) -> Tier {
        match score {
            s if s <= self.high => Tier::High,
            s if s <= self.medium => Tier::Medium,
            _ => Tier::Low,
        }
    }
}
