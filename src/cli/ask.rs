//! Ask command - answer one question from the command line

use clap::Args;

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Arguments for the ask command
#[derive(Args, Clone)]
pub struct AskArgs {
    /// The question to answer
    pub question: String,

    /// Skip retrieval and answer from the model alone
    #[arg(long)]
    pub direct: bool,
}

/// Answer a single question, with or without retrieval
pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    if args.direct {
        let agent = crate::create_direct_agent(&config)?;
        let answer = agent.answer(&args.question).await?;
        println!("{}", answer);
        return Ok(());
    }

    let pipeline = crate::create_pipeline(&config)?;
    let record = pipeline.run(&args.question).await?;

    println!("Answer: {}", record.answer);
    println!();
    println!("Hop 1 query:    {}", record.query_1);
    println!("Hop 1 evidence: {}", record.evidence_summary_1);
    println!("Hop 2 query:    {}", record.query_2);
    println!("Hop 2 evidence: {}", record.evidence_summary_2);

    Ok(())
}
