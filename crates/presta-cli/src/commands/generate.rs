//! Generate command - build the DS submission file for a folder of
//! documents and a beneficiary roster.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use presta_core::extract::ComprobanteParser;
use presta_core::models::comprobante::Comprobante;
use presta_core::padron::Padron;
use presta_core::record;

use super::{acquire_input, build_ocr, list_documents, load_config};

/// Arguments for the generate command.
#[derive(Args)]
pub struct GenerateArgs {
    /// Directory with the billing documents
    #[arg(required = true)]
    input_dir: PathBuf,

    /// Beneficiary roster spreadsheet (.xlsx)
    #[arg(short, long, required = true)]
    padron: PathBuf,

    /// Six-digit insurer RNOS
    #[arg(short, long, required = true)]
    rnos: String,

    /// Output file (default: <rnos>_ds.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// One successfully extracted document, kept per issuer CUIT.
struct CachedDocument {
    filename: String,
    fields: Comprobante,
}

pub fn run(args: GenerateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let rnos = record::normalize_rnos(&args.rnos);

    // Roster problems are fatal: without it no record can be assembled.
    let padron = Padron::load(&args.padron)?;
    if padron.is_empty() {
        anyhow::bail!("beneficiary roster is empty: {}", args.padron.display());
    }
    info!(rows = padron.len(), "roster loaded");

    let files = list_documents(&args.input_dir)?;
    if files.is_empty() {
        anyhow::bail!("no documents found in {}", args.input_dir.display());
    }

    println!(
        "{} Found {} documents, {} roster rows",
        style("ℹ").blue(),
        files.len(),
        padron.len()
    );

    let ocr = build_ocr(&config);
    let parser = ComprobanteParser::new().with_mode(config.extraction.reconcile);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    // Extracted documents keyed by issuer CUIT. Several documents can name
    // the same issuer; all are kept so the conflict can be reported instead
    // of silently dropping all but the last.
    let mut cache: HashMap<String, Vec<CachedDocument>> = HashMap::new();
    let mut failed = 0usize;

    for path in &files {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        pb.set_message(filename.clone());

        let outcome = acquire_input(path, &config, ocr.as_ref())
            .and_then(|document| parser.parse_document(&document).map_err(Into::into));

        match outcome {
            Ok(fields) => {
                cache
                    .entry(fields.issuer_cuit.clone())
                    .or_default()
                    .push(CachedDocument { filename, fields });
            }
            Err(e) => {
                failed += 1;
                warn!(file = %filename, error = %e, "document failed");
            }
        }

        pb.inc(1);
    }
    pb.finish_and_clear();

    let duplicates: Vec<(&String, &Vec<CachedDocument>)> =
        cache.iter().filter(|(_, docs)| docs.len() > 1).collect();
    for (cuit, docs) in &duplicates {
        let names: Vec<&str> = docs.iter().map(|d| d.filename.as_str()).collect();
        warn!(
            cuit = %cuit,
            files = %names.join(", "),
            "multiple documents for the same issuer, using the most recent"
        );
    }

    // One line per roster row whose CUIL matches an extracted issuer CUIT.
    let mut lines = Vec::new();
    let mut unmatched = 0usize;
    let mut incomplete = 0usize;

    for member in padron.iter() {
        let Some(docs) = cache.get(&member.cuil) else {
            unmatched += 1;
            warn!(cuil = %member.cuil, "no document found for roster row");
            continue;
        };
        let latest = docs.last().expect("cache entries are never empty");

        match record::submission_line(&rnos, member, &latest.fields, &config.output) {
            Ok(line) => lines.push(line),
            Err(e) => {
                incomplete += 1;
                warn!(cuil = %member.cuil, file = %latest.filename, error = %e, "record rejected");
            }
        }
    }

    if lines.is_empty() {
        anyhow::bail!("no submission lines could be generated");
    }

    let output_path = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}_ds.txt", rnos)));
    fs::write(&output_path, lines.join("\n"))?;

    println!(
        "{} Wrote {} lines to {}",
        style("✓").green(),
        lines.len(),
        output_path.display()
    );
    println!(
        "  documents: {} processed, {} failed; roster rows: {} matched, {} unmatched, {} incomplete",
        files.len() - failed,
        failed,
        lines.len(),
        unmatched,
        incomplete
    );
    if !duplicates.is_empty() {
        println!(
            "{} {} issuers had more than one document; see the log for details",
            style("⚠").yellow(),
            duplicates.len()
        );
    }

    Ok(())
}
