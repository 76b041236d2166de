use anyhow::Result;
use clap::Parser;
use sow_review::{run, summary_line, Args};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the summary
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if args.llm {
        println!("Running LLM review (this may take a few seconds)...");
    }

    let outcome = run(&args).await?;

    if outcome.result.llm_unavailable {
        println!("LLM review unavailable; report contains rule-based issues only.");
    }
    if args.risk {
        println!("Risk Score: {}", outcome.result.risk_score);
    }
    println!(
        "{} report saved to {}",
        outcome.format.label(),
        args.output.display()
    );
    println!("{}", summary_line(&outcome.result));

    Ok(())
}
