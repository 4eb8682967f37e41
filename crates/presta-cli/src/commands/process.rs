//! Process command - extract fields from a single document.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use presta_core::extract::ComprobanteParser;
use presta_core::models::comprobante::Comprobante;
use presta_core::pdf::TextOrigin;
use presta_core::record;

use super::{acquire_input, build_ocr, load_config};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or image)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Show how each page's text was acquired
    #[arg(long)]
    show_origin: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let ocr = build_ocr(&config);
    let document = acquire_input(&args.input, &config, ocr.as_ref())?;
    if document.used_ocr() {
        info!("at least one page was OCR-transcribed");
    }

    if args.show_origin {
        for (index, page) in document.pages().iter().enumerate() {
            let origin = match page.origin {
                TextOrigin::Embedded => "text layer",
                TextOrigin::Ocr => "OCR",
            };
            eprintln!(
                "{} page {}: {} ({} chars)",
                style("ℹ").blue(),
                index + 1,
                origin,
                page.text.chars().count()
            );
        }
    }

    let parser = ComprobanteParser::new().with_mode(config.extraction.reconcile);
    let fields = parser.parse_document(&document)?;

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&fields)?,
        OutputFormat::Text => format_text(&fields),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    let status = record::completion_status(&fields);
    if status == "OK" {
        println!("{} {}", style("✓").green(), status);
    } else {
        println!("{} {}", style("⚠").yellow(), status);
    }

    Ok(())
}

fn format_text(fields: &Comprobante) -> String {
    let opt = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    let mut out = String::new();
    out.push_str(&format!("CUIT emisor:     {}\n", fields.issuer_cuit));
    out.push_str(&format!(
        "Comprobante:     {} {} (cod. {})\n",
        fields
            .kind
            .map(|k| k.keyword().to_string())
            .unwrap_or_else(|| "-".to_string()),
        fields
            .letter
            .map(|l| l.as_str().to_string())
            .unwrap_or_else(|| "-".to_string()),
        opt(&fields.doc_code),
    ));
    out.push_str(&format!(
        "Numeración:      {} - {}\n",
        opt(&fields.sales_point),
        opt(&fields.doc_number)
    ));
    out.push_str(&format!("Fecha:           {}\n", fields.issue_date));
    out.push_str(&format!(
        "CAE/CAI:         {} ({})\n",
        opt(&fields.cae),
        fields.emission.map(|e| e.code()).unwrap_or("-"),
    ));
    out.push_str(&format!("Importe:         {}\n", opt(&fields.amount)));
    out.push_str(&format!("Período:         {}\n", fields.period));
    out.push_str(&format!(
        "Actividad:       {} x{} (dep. {})\n",
        fields.activity,
        fields.quantity,
        fields.dependency.code()
    ));
    out
}
