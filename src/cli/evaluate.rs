//! Evaluate command - scored batch run over a dataset split

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::bail;
use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::dataset::{load_splits, SplitSizes};
use crate::infrastructure::evaluation::{print_summary, write_report, EvaluationHarness};
use crate::infrastructure::logging;

/// Arguments for the evaluate command
#[derive(Args, Clone)]
pub struct EvaluateArgs {
    /// Dataset split to evaluate
    #[arg(long, default_value = "validation", value_parser = ["train", "validation", "test"])]
    pub split: String,

    /// Cap the number of questions evaluated
    #[arg(long)]
    pub limit: Option<usize>,

    /// Report path (defaults to <output_dir>/<split>_results.json)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Questions answered concurrently (overrides config)
    #[arg(long)]
    pub concurrency: Option<usize>,
}

/// Run a scored evaluation and persist the report
pub async fn run(args: EvaluateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let pipeline = Arc::new(crate::create_pipeline(&config)?);

    let sizes = SplitSizes {
        train: config.dataset.train_size,
        validation: config.dataset.validation_size,
        test: config.dataset.test_size,
        seed: config.dataset.seed,
    };
    let splits = load_splits(
        Path::new(&config.dataset.train_path),
        Path::new(&config.dataset.validation_path),
        &sizes,
    )?;

    let mut questions = match args.split.as_str() {
        "train" => splits.train,
        "validation" => splits.validation,
        "test" => splits.test,
        other => bail!("Unknown split '{}'", other),
    };
    if let Some(limit) = args.limit {
        questions.truncate(limit);
    }

    info!(
        "Evaluating {} questions from the {} split",
        questions.len(),
        args.split
    );

    let concurrency = args.concurrency.unwrap_or(config.evaluation.concurrency);
    let harness = EvaluationHarness::new(pipeline).with_concurrency(concurrency);
    let report = harness.evaluate(&args.split, &questions).await;

    print_summary(&report);

    let output = args.output.unwrap_or_else(|| {
        PathBuf::from(&config.evaluation.output_dir)
            .join(format!("{}_results.json", args.split))
    });
    write_report(&report, &output)?;
    println!("Detailed results saved to {}", output.display());

    Ok(())
}
