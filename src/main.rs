use anyhow::Result;
use clap::Parser;
use nereval::{classification_report, evaluate, parse_json};
use std::path::PathBuf;

/// Compute the F1 score of NER predictions stored in a JSON result file.
#[derive(Parser, Debug)]
#[command(name = "nereval", version, about)]
struct Cli {
    /// The JSON file containing the classification results
    file_name: PathBuf,

    /// Print a per-tag breakdown instead of only the overall score
    #[arg(long)]
    report: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let instances = parse_json(&cli.file_name)?;
    tracing::info!(
        "loaded {} documents from {}",
        instances.len(),
        cli.file_name.display()
    );

    let mut y_true = Vec::with_capacity(instances.len());
    let mut y_pred = Vec::with_capacity(instances.len());
    for instance in instances {
        y_true.push(instance.truth);
        y_pred.push(instance.predicted);
    }

    if cli.report {
        let reporter = classification_report(&y_true, &y_pred)?;
        print!("{}", reporter);
    } else {
        let score: f64 = evaluate(&y_true, &y_pred)?;
        println!("F1-score: {:.2}", score);
    }
    Ok(())
}
