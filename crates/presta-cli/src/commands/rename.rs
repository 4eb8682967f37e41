//! Rename command - rename documents after their extracted identity.

use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Args;
use console::style;
use tracing::{info, warn};

use presta_core::extract::ComprobanteParser;
use presta_core::record;

use super::{acquire_input, build_ocr, list_documents, load_config};

/// Arguments for the rename command.
#[derive(Args)]
pub struct RenameArgs {
    /// Directory with the documents to rename
    #[arg(required = true)]
    input_dir: PathBuf,

    /// Show the planned renames without touching any file
    #[arg(long)]
    dry_run: bool,

    /// CSV log path (default: log_renombrado_<timestamp>.csv)
    #[arg(short, long)]
    log: Option<PathBuf>,
}

struct RenameOutcome {
    original: String,
    renamed: String,
    status: &'static str,
    detail: String,
}

pub fn run(args: RenameArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let files = list_documents(&args.input_dir)?;
    if files.is_empty() {
        anyhow::bail!("no documents found in {}", args.input_dir.display());
    }

    let ocr = build_ocr(&config);
    let parser = ComprobanteParser::new().with_mode(config.extraction.reconcile);

    let mut outcomes = Vec::with_capacity(files.len());
    let mut renamed = 0usize;
    let mut skipped = 0usize;
    let mut errors = 0usize;

    for path in &files {
        let original = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if record::is_renamed_filename(&original) {
            skipped += 1;
            outcomes.push(RenameOutcome {
                original,
                renamed: String::new(),
                status: "OMITIDO",
                detail: "ya renombrado".to_string(),
            });
            continue;
        }

        let outcome = acquire_input(path, &config, ocr.as_ref())
            .and_then(|document| parser.parse_document(&document).map_err(Into::into))
            .and_then(|fields| record::renamed_filename(&fields, &config.output).map_err(Into::into));

        let new_name = match outcome {
            Ok(name) => name,
            Err(e) => {
                errors += 1;
                warn!(file = %original, error = %e, "rename failed");
                outcomes.push(RenameOutcome {
                    original,
                    renamed: String::new(),
                    status: "ERROR",
                    detail: e.to_string(),
                });
                continue;
            }
        };

        let target = args.input_dir.join(&new_name);
        if target.exists() && target != *path {
            errors += 1;
            outcomes.push(RenameOutcome {
                original,
                renamed: new_name,
                status: "ERROR",
                detail: "ya existe un archivo con ese nombre".to_string(),
            });
            continue;
        }

        if args.dry_run {
            println!("{} {} -> {}", style("·").dim(), original, new_name);
        } else if let Err(e) = std::fs::rename(path, &target) {
            errors += 1;
            outcomes.push(RenameOutcome {
                original,
                renamed: new_name,
                status: "ERROR",
                detail: e.to_string(),
            });
            continue;
        } else {
            info!(from = %original, to = %new_name, "renamed");
        }

        renamed += 1;
        outcomes.push(RenameOutcome {
            original,
            renamed: new_name,
            status: "OK",
            detail: String::new(),
        });
    }

    let log_path = args.log.unwrap_or_else(|| {
        PathBuf::from(format!(
            "log_renombrado_{}.csv",
            Local::now().format("%Y%m%d_%H%M%S")
        ))
    });
    write_log(&log_path, &outcomes)?;

    println!(
        "{} {} renamed, {} skipped, {} errors ({} files); log: {}",
        if errors == 0 {
            style("✓").green()
        } else {
            style("⚠").yellow()
        },
        renamed,
        skipped,
        errors,
        files.len(),
        log_path.display()
    );
    if args.dry_run {
        println!("{} dry run: no files were touched", style("ℹ").blue());
    }

    Ok(())
}

fn write_log(path: &Path, outcomes: &[RenameOutcome]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["nombre_original", "nombre_nuevo", "estado", "detalle"])?;
    for outcome in outcomes {
        writer.write_record([
            outcome.original.as_str(),
            outcome.renamed.as_str(),
            outcome.status,
            outcome.detail.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
