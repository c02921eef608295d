use clap::Parser;
use cxrcat_core::cli::{Cli, OutputFormat};
use cxrcat_core::decode::FormatResolver;
use cxrcat_core::model::{Classifier, PrecomputedClassifier};
use cxrcat_core::normalize::{NormalizeConfig, Normalizer};
use cxrcat_core::pipeline::predict_file;
use cxrcat_core::Result;
use log::{error, info};
use std::path::Path;
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    if !cli.file.is_file() {
        eprintln!("Error: {} is not a file", cli.file.display());
        process::exit(1);
    }

    info!("Processing file: {}", cli.file.display());

    let outcome = match &cli.scores {
        Some(scores) => run_report(&cli, scores),
        None => run_inspect(&cli.file),
    };

    if let Err(e) = outcome {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

/// Decodes the image, replays the stored classifier outputs and prints the report
fn run_report(cli: &Cli, scores: &Path) -> Result<()> {
    let classifier = PrecomputedClassifier::from_path(scores)?;
    let predictions = predict_file(&classifier, &cli.file, None)?;
    let output = cli.render(classifier.name(), &predictions)?;

    if matches!(cli.format, OutputFormat::Text) {
        println!();
    }
    println!("{}", output);
    Ok(())
}

/// Prints what the decoder and normalizer make of the image
fn run_inspect(path: &Path) -> Result<()> {
    let decoded = FormatResolver::resolve_path(path)?;
    let (rows, cols) = decoded.array.dim();
    let tensor = Normalizer::new(NormalizeConfig::default()).normalize(decoded.array)?;
    let (lo, hi) = tensor.value_range();

    println!("Decoder:      {}", decoded.kind);
    println!("Input shape:  {}x{}", rows, cols);
    println!("Tensor shape: {:?}", tensor.shape());
    println!("Value range:  {:.2} .. {:.2}", lo, hi);
    Ok(())
}
