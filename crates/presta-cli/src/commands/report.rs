//! Report command - diagnostic CSV for a folder of documents.

use std::path::PathBuf;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use presta_core::extract::ComprobanteParser;
use presta_core::record::{self, REPORT_HEADERS};

use super::{acquire_input, build_ocr, list_documents, load_config};

/// Arguments for the report command.
#[derive(Args)]
pub struct ReportArgs {
    /// Directory with the documents to analyze
    #[arg(required = true)]
    input_dir: PathBuf,

    /// Output CSV file (default: analisis_facturas.csv inside the directory)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: ReportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let files = list_documents(&args.input_dir)?;
    if files.is_empty() {
        anyhow::bail!("no documents found in {}", args.input_dir.display());
    }

    let ocr = build_ocr(&config);
    let parser = ComprobanteParser::new().with_mode(config.extraction.reconcile);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let output_path = args
        .output
        .unwrap_or_else(|| args.input_dir.join("analisis_facturas.csv"));

    let mut writer = csv::Writer::from_path(&output_path)?;
    writer.write_record(REPORT_HEADERS)?;

    let mut ok = 0usize;

    for path in &files {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        pb.set_message(filename.clone());

        let outcome = acquire_input(path, &config, ocr.as_ref())
            .and_then(|document| parser.parse_document(&document).map_err(Into::into));

        let row = match outcome {
            Ok(fields) => {
                let status = record::completion_status(&fields);
                if status == "OK" {
                    ok += 1;
                }
                record::report_row(&filename, Some(&fields), &status)
            }
            Err(e) => {
                warn!(file = %filename, error = %e, "document failed");
                record::report_row(&filename, None, &format!("Error: {}", e))
            }
        };
        writer.write_record(&row)?;

        pb.inc(1);
    }
    pb.finish_and_clear();
    writer.flush()?;

    println!(
        "{} {} of {} documents complete; report: {}",
        style("✓").green(),
        ok,
        files.len(),
        output_path.display()
    );

    Ok(())
}
