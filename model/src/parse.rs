use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static SIZE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(KB|MB|GB|TB)").expect("valid size pattern"));

static ACL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://aclanthology\.org/\S+").expect("valid acl pattern"));

const LINK_TRAILING: &[char] = &[',', '.', ';', ':', ')', ']', '\'', '"'];

const SIZE_UNITS: [(&str, f64); 4] = [
    ("KB", 1024.0),
    ("MB", 1024.0 * 1024.0),
    ("GB", 1024.0 * 1024.0 * 1024.0),
    ("TB", 1024.0 * 1024.0 * 1024.0 * 1024.0),
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unrecognized size `{0}`")]
    Size(String),
    #[error("unrecognized date `{0}`")]
    Date(String),
}

/// 将 "12.5 MB" 形式的大小转换为字节数, 多个匹配时取最后一个
pub fn size_to_bytes(text: &str) -> Result<f64, ParseError> {
    let (value, unit) = SIZE_PATTERN
        .captures_iter(text)
        .last()
        .map(|caps| (caps[1].to_owned(), caps[2].to_ascii_uppercase()))
        .ok_or_else(|| ParseError::Size(text.to_owned()))?;

    let value: f64 = value
        .parse()
        .map_err(|_| ParseError::Size(text.to_owned()))?;
    let multiplier = SIZE_UNITS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, m)| *m)
        .ok_or_else(|| ParseError::Size(text.to_owned()))?;

    Ok(value * multiplier)
}

/// Human readable size using the same binary units `size_to_bytes` understands.
pub fn format_size(bytes: u64) -> String {
    let bytes = bytes as f64;
    let (unit, multiplier) = SIZE_UNITS
        .iter()
        .rev()
        .find(|(_, m)| bytes >= *m)
        .copied()
        .unwrap_or(SIZE_UNITS[0]);
    let value = bytes / multiplier;
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", text, unit)
}

/// 只保留日期部分, 丢弃时间
pub fn last_modified_date(raw: &str) -> Result<NaiveDate, ParseError> {
    let day = raw
        .trim()
        .split(|c: char| c.is_whitespace() || c == 'T')
        .next()
        .unwrap_or_default();
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| ParseError::Date(raw.to_owned()))
}

/// Calendar month difference, day-of-month ignored.
pub fn months_between(now: NaiveDate, then: NaiveDate) -> i64 {
    (now.year() as i64 - then.year() as i64) * 12 + (now.month() as i64 - then.month() as i64)
}

/// ACL Anthology links in order of first appearance, without duplicates.
pub fn extract_acl_links(readme: &str) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();
    for m in ACL_PATTERN.find_iter(readme) {
        // 句末标点不属于链接
        let link = m.as_str().trim_end_matches(LINK_TRAILING);
        if !link.is_empty() && !links.iter().any(|l| l == link) {
            links.push(link.to_owned());
        }
    }
    links
}

/// Accepts "none", an empty cell, a bracketed list (`['a', 'b']`, `["a"]`, `{'a'}`)
/// or whitespace separated links. Commas inside quoted items are kept.
pub fn parse_link_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Vec::new();
    }

    let bracketed = (trimmed.starts_with('[') && trimmed.ends_with(']'))
        || (trimmed.starts_with('{') && trimmed.ends_with('}'));
    let items: Vec<String> = if bracketed {
        serde_json::from_str::<Vec<String>>(trimmed)
            .unwrap_or_else(|_| split_quoted(&trimmed[1..trimmed.len() - 1]))
    } else {
        trimmed.split_whitespace().map(str::to_owned).collect()
    };

    let mut links: Vec<String> = Vec::new();
    for item in items {
        let link = item.trim();
        if !link.is_empty() && !links.iter().any(|l| l == link) {
            links.push(link.to_owned());
        }
    }
    links
}

/// Splits `'a', "b,c", d` on the commas outside quotes.
fn split_quoted(inner: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) if c == '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            Some(_) => current.push(c),
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == ',' => items.push(std::mem::take(&mut current)),
            None => current.push(c),
        }
    }
    items.push(current);
    items
}

/// Renders links as a JSON array, read back by `parse_link_list`.
pub fn format_link_list(links: &[String]) -> String {
    if links.is_empty() {
        return "none".to_owned();
    }
    serde_json::to_string(links).unwrap_or_else(|_| {
        let quoted: Vec<String> = links.iter().map(|l| format!("{:?}", l)).collect();
        format!("[{}]", quoted.join(", "))
    })
}

/// 计数字段可能是 "12", "12.0", "1,234" 或 "none"
pub fn parse_count(raw: &str) -> Option<i64> {
    let cleaned = raw.trim().replace(',', "");
    if let Ok(n) = cleaned.parse::<i64>() {
        return Some(n);
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i64)
}

pub fn parse_bytes(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
