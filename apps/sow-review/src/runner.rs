use crate::args::Args;
use crate::report::{self, ReportFormat, ReportHeader};
use anyhow::{Context, Result};
use llm_advisory::select_advisor;
use review_engine::{AdvisoryPolicy, ReviewConfig, ReviewEngine, Reviewer};
use shared_pdf::load_document;
use shared_types::AnalysisResult;
use std::sync::Arc;
use tracing::info;

/// What a run produced, for the summary printed by `main`
#[derive(Debug)]
pub struct RunOutcome {
    pub result: AnalysisResult,
    pub format: ReportFormat,
}

/// Review configuration from `--config`, with command-line overrides applied
pub fn settings_from_args(args: &Args) -> Result<ReviewConfig> {
    let mut config = match &args.config {
        Some(path) => ReviewConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ReviewConfig::default(),
    };

    if let Some(template) = &args.template {
        config.template = Some(template.clone());
    }
    if let Some(vocabulary) = &args.vocabulary {
        config.vocabulary = Some(vocabulary.clone());
    }
    if args.llm {
        config.llm.enabled = true;
    }
    if let Some(model) = &args.model {
        config.llm.model = model.clone();
    }
    if let Some(max_tokens) = args.max_tokens {
        config.llm.max_tokens = max_tokens;
    }
    if let Some(temperature) = args.temperature {
        config.llm.temperature = temperature;
    }
    Ok(config)
}

/// Extract, review and write the report
pub async fn run(args: &Args) -> Result<RunOutcome> {
    let format = ReportFormat::from_path(&args.output)?;
    let config = settings_from_args(args)?;
    let engine = ReviewEngine::from_config(&config).context("Invalid review configuration")?;

    let document = load_document(&args.input)
        .with_context(|| format!("Failed to extract text from {}", args.input.display()))?;

    let advisor = select_advisor(&config.llm, args.api_key.as_deref());
    let reviewer =
        Reviewer::new(Arc::new(engine), advisor).with_policy(AdvisoryPolicy::from(&config.llm));
    let result = reviewer.review(&document.raw_text).await;

    let header = ReportHeader::new(
        args.input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| args.input.display().to_string()),
    )
    .with_title(document.metadata.title.clone());
    report::write_report(&result, format, &header, &args.output)?;

    info!(
        issues = result.issues.len(),
        risk_score = result.risk_score,
        output = %args.output.display(),
        "Review complete"
    );
    Ok(RunOutcome { result, format })
}
