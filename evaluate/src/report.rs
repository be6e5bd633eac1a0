//! Aggregated evaluation table: frequency counts and CSV export.

use crate::pass::{Evaluation, EVALUATION_COLUMNS, LEVEL_COLUMNS};
use model::{DatasetRecord, RECORD_COLUMNS};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 计数时缺失值的标签
pub const MISSING_LABEL: &str = "<missing>";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Column '{0}' not found in the evaluated table")]
    UnknownColumn(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedRow {
    pub record: DatasetRecord,
    pub evaluation: Evaluation,
}

impl EvaluatedRow {
    pub fn to_fields(&self) -> Vec<Option<String>> {
        let mut fields = self.record.to_fields();
        fields.extend(self.evaluation.to_fields());
        fields
    }
}

/// Raw columns followed by every derived score and tier column.
pub fn output_columns() -> Vec<&'static str> {
    RECORD_COLUMNS
        .iter()
        .chain(EVALUATION_COLUMNS.iter())
        .copied()
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnCounts {
    pub column: String,
    /// 按数量降序, 数量相同按标签排序
    pub counts: Vec<(String, usize)>,
}

impl ColumnCounts {
    pub fn get(&self, label: &str) -> usize {
        self.counts
            .iter()
            .find(|(l, _)| l == label)
            .map_or(0, |(_, n)| *n)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

impl fmt::Display for ColumnCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Counts:", self.column)?;
        let width = self
            .counts
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        for (label, count) in &self.counts {
            writeln!(f, "{:<width$}  {}", label, count, width = width)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct EvaluationReport {
    rows: Vec<EvaluatedRow>,
}

impl EvaluationReport {
    pub fn new(rows: Vec<EvaluatedRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[EvaluatedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(column: &str) -> Result<usize, ReportError> {
        output_columns()
            .iter()
            .position(|c| *c == column)
            .ok_or_else(|| ReportError::UnknownColumn(column.to_owned()))
    }

    /// Frequency of every value in `column`, missing cells counted under `MISSING_LABEL`.
    pub fn value_counts(&self, column: &str) -> Result<ColumnCounts, ReportError> {
        let index = Self::column_index(column)?;
        let mut tally: HashMap<String, usize> = HashMap::new();
        for row in &self.rows {
            let label = row
                .to_fields()
                .swap_remove(index)
                .unwrap_or_else(|| MISSING_LABEL.to_owned());
            *tally.entry(label).or_default() += 1;
        }

        let mut counts: Vec<(String, usize)> = tally.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(ColumnCounts {
            column: column.to_owned(),
            counts,
        })
    }

    /// `None` or "all" (any case) selects every tier column.
    pub fn counts(&self, selection: Option<&str>) -> Result<Vec<ColumnCounts>, ReportError> {
        match selection {
            Some(column) if !column.eq_ignore_ascii_case("all") => {
                Ok(vec![self.value_counts(column)?])
            }
            _ => LEVEL_COLUMNS.iter().map(|c| self.value_counts(c)).collect(),
        }
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let file = std::fs::File::create(path)?;
        self.to_writer(file)
    }

    pub fn to_writer<W: io::Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(output_columns())?;
        for row in &self.rows {
            writer.write_record(row.to_fields().iter().map(|f| f.as_deref().unwrap_or("")))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// `data/Q&A.csv` -> `data/Q&A_evaluated.csv`
pub fn default_export_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "datasets".to_owned());
    input.with_file_name(format!("{}_evaluated.csv", stem))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::{Classification, Tier};

    fn row(id: &str, popularity: Classification, documentation: Classification) -> EvaluatedRow {
        EvaluatedRow {
            record: DatasetRecord::new(id),
            evaluation: Evaluation {
                popularity_level: popularity,
                documentation_annotation_level: documentation,
                ..Default::default()
            },
        }
    }

    fn report() -> EvaluationReport {
        EvaluationReport::new(vec![
            row("org/a", Tier::High.into(), Classification::Uncategorized),
            row("org/b", Tier::Low.into(), Tier::Low.into()),
            row("org/c", Tier::Low.into(), Classification::Uncategorized),
        ])
    }

    #[test]
    fn test_output_columns_order() {
        let columns = output_columns();
        assert_eq!(columns.len(), 32);
        assert_eq!(columns[0], "Task");
        assert_eq!(columns[16], "README file");
        assert_eq!(columns[17], "documentation_score");
        assert_eq!(columns[31], "scientific_contribution_level");
    }

    #[test]
    fn test_value_counts_of_level_column() {
        let counts = report().value_counts("popularity_level").unwrap();
        assert_eq!(
            counts.counts,
            vec![("Low".to_owned(), 2), ("High".to_owned(), 1)]
        );
    }

    #[test]
    fn test_uncategorized_counted_explicitly() {
        let counts = report()
            .value_counts("documentation_annotation_level")
            .unwrap();
        assert_eq!(counts.get("Uncategorized"), 2);
        assert_eq!(counts.get("Low"), 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_missing_raw_values_counted() {
        let counts = report().value_counts("Likes").unwrap();
        assert_eq!(counts.counts, vec![(MISSING_LABEL.to_owned(), 3)]);
    }

    #[test]
    fn test_counts_all_and_default() {
        let report = report();
        let all = report.counts(Some("ALL")).unwrap();
        assert_eq!(all.len(), LEVEL_COLUMNS.len());
        assert_eq!(report.counts(None).unwrap(), all);
        assert_eq!(report.counts(Some("adoption_level")).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_column_leaves_report_untouched() {
        let report = report();
        let before = report.rows().to_vec();
        let err = report.counts(Some("stars_level")).unwrap_err();
        assert!(matches!(err, ReportError::UnknownColumn(ref c) if c == "stars_level"));
        assert_eq!(
            err.to_string(),
            "Column 'stars_level' not found in the evaluated table"
        );
        assert_eq!(report.rows(), before.as_slice());
    }

    #[test]
    fn test_display() {
        let counts = ColumnCounts {
            column: "popularity_level".to_owned(),
            counts: vec![("Medium".to_owned(), 10), ("Low".to_owned(), 2)],
        };
        assert_eq!(
            counts.to_string(),
            "popularity_level Counts:\nMedium  10\nLow     2\n"
        );
    }

    #[test]
    fn test_to_writer_header_and_empty_cells() {
        let mut buf = Vec::new();
        report().to_writer(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), output_columns().join(","));
        let first = lines.next().unwrap();
        assert!(first.starts_with(",org/a,,,"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_default_export_path() {
        assert_eq!(
            default_export_path(Path::new("data/Q&A.csv")),
            PathBuf::from("data/Q&A_evaluated.csv")
        );
        assert_eq!(
            default_export_path(Path::new("Translation.csv")),
            PathBuf::from("Translation_evaluated.csv")
        );
    }
}
