use chrono::NaiveDate;
use evaluate::pass::LEVEL_COLUMNS;
use evaluate::report::output_columns;
use evaluate::{DocumentationStrategy, EvaluationContext, EvaluationManager, EvaluationReport};
use model::{read_records, write_records, DatasetRecord};

fn context() -> EvaluationContext {
    EvaluationContext {
        evaluation_date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        ..Default::default()
    }
}

fn records() -> Vec<DatasetRecord> {
    let mut popular = DatasetRecord::new("org/arabic-squad");
    popular.task = Some("Q&A".to_owned());
    popular.likes = Some(150);
    popular.downloads = Some(12000);
    popular.models = Some(75);
    popular.spaces = Some(4);
    popular.last_modified = Some("2025-05-01T10:00:00.000Z".to_owned());
    popular.license = Some("apache-2.0".to_owned());
    popular.dois = Some("10.57967/hf/1234".to_owned());
    popular.downloaded_size = Some("1.5 MB".to_owned());
    popular.rows = Some(4000);
    popular.arxiv_paper = Some("https://arxiv.org/abs/2305.00001".to_owned());
    popular.acl_papers = vec!["https://aclanthology.org/2023.arabicnlp-1.1".to_owned()];
    popular.readme = Some(
        "---\nlicense: apache-2.0\nlanguage:\n- ar\ntask_categories:\n- question-answering\n---\n\
         ## Usage\nHow to use, with an example.\n## Citation\n## Authors"
            .to_owned(),
    );

    let mut stale = DatasetRecord::new("user/old-corpus");
    stale.task = Some("Q&A".to_owned());
    stale.likes = Some(1);
    stale.downloads = Some(3);
    stale.last_modified = Some("2022-01-20".to_owned());
    stale.license = Some("none".to_owned());
    stale.arxiv_paper = Some("none".to_owned());
    stale.readme = Some("none".to_owned());

    let mut sparse = DatasetRecord::new("user/sparse");
    sparse.task = Some("Q&A".to_owned());
    sparse.license = Some("other".to_owned());

    vec![popular, stale, sparse]
}

fn evaluate(records: Vec<DatasetRecord>) -> EvaluationReport {
    let ctx = context();
    let mut manager = EvaluationManager::new();
    manager.add_default_passes(&ctx, DocumentationStrategy::Averaged);
    manager.run(&ctx, records)
}

#[test]
fn test_collected_csv_evaluates_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let collected = dir.path().join("Q&A.csv");
    write_records(&collected, &records()).unwrap();

    let reloaded = read_records(&collected).unwrap();
    assert_eq!(reloaded.len(), 3);
    assert_eq!(reloaded[0].acl_papers.len(), 1);
    assert_eq!(reloaded[0].downloaded_bytes, Some(1.5 * 1024.0 * 1024.0));

    let direct = evaluate(records());
    let from_disk = evaluate(reloaded);
    for (a, b) in direct.rows().iter().zip(from_disk.rows()) {
        assert_eq!(a.evaluation, b.evaluation, "{}", a.record.dataset_id);
    }
}

#[test]
fn test_exported_table_has_every_column_and_tier() {
    let dir = tempfile::tempdir().unwrap();
    let exported = dir.path().join("Q&A_evaluated.csv");
    evaluate(records()).write_csv(&exported).unwrap();

    let mut reader = csv::Reader::from_path(&exported).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_owned).collect();
    assert_eq!(headers, output_columns());

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 3);
    let cell = |row: usize, column: &str| {
        let index = headers.iter().position(|h| h == column).unwrap();
        rows[row][index].to_owned()
    };

    for row in 0..rows.len() {
        for column in LEVEL_COLUMNS {
            let value = cell(row, column);
            assert!(
                ["High", "Medium", "Low", "Uncategorized"].contains(&value.as_str()),
                "{} = {:?}",
                column,
                value
            );
        }
    }

    assert_eq!(cell(0, "Dataset ID"), "org/arabic-squad");
    assert_eq!(cell(0, "popularity_score"), "12150");
    assert_eq!(cell(0, "popularity_level"), "High");
    assert_eq!(cell(0, "adoption_level"), "High");
    assert_eq!(cell(0, "recency_maintenance_score"), "1");
    assert_eq!(cell(0, "licensing_transparency_level"), "High");
    assert_eq!(cell(0, "scientific_contribution_score"), "3");
    assert_eq!(cell(0, "scientific_contribution_level"), "High");

    assert_eq!(cell(1, "documentation_annotation_level"), "Uncategorized");
    assert_eq!(cell(1, "documentation_score"), "");
    assert_eq!(cell(1, "recency_maintenance_level"), "Low");
    assert_eq!(cell(1, "licensing_transparency_level"), "Low");
    assert_eq!(cell(1, "arXiv_score"), "0");

    assert_eq!(cell(2, "recency_maintenance_level"), "Uncategorized");
    assert_eq!(cell(2, "licensing_transparency_level"), "Medium");
    assert_eq!(cell(2, "popularity_level"), "Low");
}

#[test]
fn test_exported_table_reimports_as_records() {
    let dir = tempfile::tempdir().unwrap();
    let exported = dir.path().join("evaluated.csv");
    let report = evaluate(records());
    report.write_csv(&exported).unwrap();

    let reimported = read_records(&exported).unwrap();
    let again = evaluate(reimported);
    assert_eq!(again.len(), report.len());
    for (a, b) in report.rows().iter().zip(again.rows()) {
        assert_eq!(a.evaluation, b.evaluation);
    }
    assert_eq!(
        again.counts(Some("all")).unwrap(),
        report.counts(None).unwrap()
    );
}

#[test]
fn test_acl_score_stable_across_export() {
    let readme = "Cite https://aclanthology.org/2020.osact-1.2, or see \
                  https://aclanthology.org/2020.osact-1.2 and https://aclanthology.org/a,b";
    let mut record = DatasetRecord::new("org/osact");
    record.readme = Some(readme.to_owned());
    record.acl_papers = model::parse::extract_acl_links(readme);

    let dir = tempfile::tempdir().unwrap();
    let collected = dir.path().join("collected.csv");
    write_records(&collected, &[record.clone()]).unwrap();
    let from_collected = evaluate(read_records(&collected).unwrap());

    let exported = dir.path().join("evaluated.csv");
    let report = evaluate(vec![record]);
    report.write_csv(&exported).unwrap();
    let from_export = evaluate(read_records(&exported).unwrap());

    let acl_score = report.rows()[0].evaluation.acl_score;
    assert_eq!(acl_score, 2);
    assert_eq!(from_collected.rows()[0].evaluation, report.rows()[0].evaluation);
    assert_eq!(from_export.rows()[0].evaluation, report.rows()[0].evaluation);
}
