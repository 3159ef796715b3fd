//! langsift CLI
//!
//! Loads the configured English/Italian model once, then classifies text
//! given on the command line, in a file, or on stdin.

use anyhow::{Context, Result};
use clap::Parser;
use langsift_classifiers::{init_global_registry, PredictionPipeline, Scorer};
use langsift_core::Error;
use langsift_telemetry::{init_tracing, MetricsCollector};
use serde_json::json;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::process::ExitCode;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{info, warn};

mod cli;
mod config;

use cli::{Cli, Commands};
use config::AppConfig;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config, &cli)
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;

    init_tracing(&config.logging, cli.verbose)?;

    info!("Starting langsift");

    // Fail fast: no command runs without a loaded model
    let paths = config.model.artifact_paths();
    let registry = init_global_registry(paths)?;
    let metrics = MetricsCollector::new();
    let pipeline = PredictionPipeline::from_registry(registry)
        .context("Model artifacts failed to load")?
        .with_metrics(metrics.clone());

    let code = match cli.command {
        Commands::Predict { text } => ExitCode::from(predict_one(&pipeline, &text, &mut io::stdout())?),
        Commands::Batch { input, workers } => {
            let workers = workers
                .or_else(|| std::thread::available_parallelism().ok().map(|n| n.get()))
                .unwrap_or(1)
                .max(1);

            match input {
                Some(path) => {
                    let file = tokio::fs::File::open(&path)
                        .await
                        .with_context(|| format!("Failed to open {:?}", path))?;
                    predict_lines(&pipeline, BufReader::new(file), workers, &mut io::stdout()).await?;
                }
                None => {
                    predict_lines(&pipeline, BufReader::new(tokio::io::stdin()), workers, &mut io::stdout())
                        .await?;
                }
            }
            ExitCode::SUCCESS
        }
        Commands::Inspect => inspect(&pipeline, registry.paths().variant)?,
    };

    let snapshot = metrics.snapshot();
    info!(
        "Served {} predictions ({} rejected), avg latency {}us, unknown token rate {:.1}%",
        snapshot.predictions,
        snapshot.rejected,
        snapshot.avg_latency_us(),
        snapshot.unknown_token_rate() * 100.0
    );

    Ok(code)
}

/// Exit status of a rejected single prediction
const EXIT_REJECTED: u8 = 2;

/// Render a prediction outcome the way the host API answers it
fn render(outcome: langsift_core::Result<langsift_core::PredictionResult>) -> Result<serde_json::Value> {
    match outcome {
        Ok(result) => Ok(serde_json::to_value(result)?),
        Err(Error::EmptyInput) => Ok(json!({ "error": Error::EmptyInput.to_string() })),
        Err(e) => Err(e.into()),
    }
}

fn predict_one<W: Write>(pipeline: &PredictionPipeline, text: &str, out: &mut W) -> Result<u8> {
    let outcome = pipeline.predict(text);
    let rejected = matches!(outcome, Err(Error::EmptyInput));

    writeln!(out, "{}", render(outcome)?)?;

    Ok(if rejected { EXIT_REJECTED } else { 0 })
}

/// Predict every line on a bounded set of blocking workers, writing in input order.
///
/// Lines that are not valid UTF-8 are decoded lossily. On a read error the
/// predictions already queued are written before the error is returned.
async fn predict_lines<R, W>(pipeline: &PredictionPipeline, reader: R, workers: usize, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = reader.split(b'\n');
    let mut in_flight = VecDeque::with_capacity(workers);
    let mut line_number = 0usize;

    loop {
        let line = match lines.next_segment().await {
            Ok(Some(bytes)) => {
                line_number += 1;
                decode_line(bytes, line_number)
            }
            Ok(None) => break,
            Err(e) => {
                drain(&mut in_flight, out).await?;
                return Err(anyhow::Error::new(e).context(format!("Failed to read input after line {}", line_number)));
            }
        };

        if in_flight.len() == workers {
            if let Some(handle) = in_flight.pop_front() {
                write_outcome(handle, out).await?;
            }
        }

        let pipeline = pipeline.clone();
        in_flight.push_back(tokio::task::spawn_blocking(move || pipeline.predict(&line)));
    }

    drain(&mut in_flight, out).await
}

fn decode_line(mut bytes: Vec<u8>, line_number: usize) -> String {
    if bytes.last() == Some(&b'\r') {
        bytes.pop();
    }

    match String::from_utf8(bytes) {
        Ok(line) => line,
        Err(e) => {
            warn!("Line {} is not valid UTF-8, decoding lossily", line_number);
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

type PredictionHandle = JoinHandle<langsift_core::Result<langsift_core::PredictionResult>>;

async fn drain<W: Write>(in_flight: &mut VecDeque<PredictionHandle>, out: &mut W) -> Result<()> {
    while let Some(handle) = in_flight.pop_front() {
        write_outcome(handle, out).await?;
    }
    Ok(())
}

async fn write_outcome<W: Write>(handle: PredictionHandle, out: &mut W) -> Result<()> {
    let outcome = handle.await.context("Prediction worker panicked")?;
    writeln!(out, "{}", render(outcome)?)?;
    Ok(())
}

fn inspect(pipeline: &PredictionPipeline, variant: langsift_classifiers::ModelVariant) -> Result<ExitCode> {
    let scorer = pipeline.scorer();
    let labels: serde_json::Map<String, serde_json::Value> = scorer
        .labels()
        .iter()
        .map(|(label, name)| (label.to_string(), json!(name)))
        .collect();

    let description = json!({
        "variant": variant.as_str(),
        "classes": scorer.class_count(),
        "features": pipeline.vocabulary().len(),
        "log_priors": scorer.log_priors(),
        "labels": labels,
    });

    println!("{}", serde_json::to_string_pretty(&description)?);
    Ok(ExitCode::SUCCESS)
}
