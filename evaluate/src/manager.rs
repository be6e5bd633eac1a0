use crate::config::EvaluationContext;
use crate::pass::adoption::Adoption;
use crate::pass::documentation::{DocumentationAnnotation, DocumentationStrategy};
use crate::pass::licensing::Licensing;
use crate::pass::popularity::Popularity;
use crate::pass::recency::Recency;
use crate::pass::scientific::ScientificContribution;
use crate::pass::{AnyEvaluationPass, Evaluation};
use crate::report::{EvaluatedRow, EvaluationReport};
use model::DatasetRecord;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Default)]
pub struct EvaluationManager {
    passes: Vec<Arc<dyn AnyEvaluationPass>>,
}

impl EvaluationManager {
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    // 添加默认 Pass, 文档/标注维度按调用方选择的策略分级
    pub fn add_default_passes(&mut self, ctx: &EvaluationContext, strategy: DocumentationStrategy) {
        self.add_pass(Arc::new(DocumentationAnnotation::new(ctx, strategy)));
        self.add_pass(Arc::new(Popularity));
        self.add_pass(Arc::new(Adoption));
        self.add_pass(Arc::new(Recency));
        self.add_pass(Arc::new(Licensing));
        self.add_pass(Arc::new(ScientificContribution));
    }

    pub fn add_pass(&mut self, pass: Arc<dyn AnyEvaluationPass>) {
        self.passes.push(pass);
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    pub fn evaluate_record(&self, ctx: &EvaluationContext, record: &DatasetRecord) -> Evaluation {
        let mut evaluation = Evaluation::default();
        for pass in &self.passes {
            pass.apply(ctx, record, &mut evaluation);
        }
        debug!(
            "Dataset {} evaluated - documentation= {}, popularity= {}, adoption= {}, recency= {}, licensing= {}, scientific= {}",
            record.dataset_id,
            evaluation.documentation_annotation_level,
            evaluation.popularity_level,
            evaluation.adoption_level,
            evaluation.recency_maintenance_level,
            evaluation.licensing_transparency_level,
            evaluation.scientific_contribution_level,
        );
        evaluation
    }

    /// 每条记录相互独立, 并行计算, 输出顺序与输入一致
    pub fn run(&self, ctx: &EvaluationContext, records: Vec<DatasetRecord>) -> EvaluationReport {
        let rows: Vec<EvaluatedRow> = records
            .into_par_iter()
            .map(|record| {
                let evaluation = self.evaluate_record(ctx, &record);
                EvaluatedRow { record, evaluation }
            })
            .collect();
        info!("Evaluation completed for {} datasets", rows.len());
        EvaluationReport::new(rows)
    }
}
