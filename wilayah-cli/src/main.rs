use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;

use wilayah_metrics::ClassifierConfig;
use wilayah_pipeline::aggregator::{aggregate, AggregateSummary};
use wilayah_pipeline::classifier::{classify_profiles, Classifier, ClassifiedItem, Label};
use wilayah_pipeline::ledger::{load_ledger_file, LoadSummary};
use wilayah_pipeline::ranking::top_items_per_region;
use wilayah_pipeline::render::{render_classification_markdown, render_top_markdown};
use wilayah_pipeline::report::{write_profile_csv, write_top_csv};
use wilayah_pipeline::{PipelineError, PipelineResult};

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct RunJson {
    generated_at: String,
    input: String,
    include_retur: bool,
    n_min: u64,
    load_ms: u128,
    pipeline_ms: u128,
    rows: RowsJson,
    items_classified: usize,
    labels: LabelsJson,
    outputs: Vec<String>,
}

#[derive(Serialize)]
struct RowsJson {
    read: usize,
    skipped: usize,
    retur_excluded: usize,
    unknown_region: usize,
    consumed: usize,
}

#[derive(Serialize)]
struct LabelsJson {
    global: usize,
    regional: usize,
    local: usize,
    low_volume: usize,
}

fn label_count(items: &[ClassifiedItem], label: Label) -> usize {
    items.iter().filter(|i| i.label == label).count()
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

fn print_human(
    items: &[ClassifiedItem],
    load: &LoadSummary,
    agg: &AggregateSummary,
    outputs: &[PathBuf],
    load_ms: u128,
    pipeline_ms: u128,
) {
    println!();
    println!("  ================================================================");
    println!("           WILAYAH LENS - Item Distribution Report");
    println!("  ================================================================");
    println!();
    println!(
        "  {} rows read  .  {} skipped  .  {} retur excluded  .  {} unknown wilayah",
        load.rows_read, load.rows_skipped, agg.retur_excluded, agg.unknown_region
    );
    println!("  {} items classified", items.len());
    println!();

    for label in [Label::Global, Label::Regional, Label::Local, Label::LowVolume] {
        println!("    {:12} {:5}", label.to_string(), label_count(items, label));
    }

    for (heading, label) in [("Top Global items", Label::Global), ("Top Local items", Label::Local)] {
        let top: Vec<&ClassifiedItem> =
            items.iter().filter(|i| i.label == label).take(10).collect();
        if top.is_empty() {
            continue;
        }
        println!();
        println!("  {}", heading);
        println!("  {:-<64}", "");
        for item in top {
            let desc = if item.profile.description.chars().count() > 38 {
                let cut: String = item.profile.description.chars().take(36).collect();
                format!("{}..", cut)
            } else {
                item.profile.description.clone()
            };
            println!(
                "    {:<12} {:<38} {:>6}  h={:.3} share={:.3}",
                item.profile.code, desc, item.metrics.total, item.metrics.h_norm,
                item.metrics.max_share,
            );
        }
    }

    println!();
    for path in outputs {
        println!("  Wrote {}", path.display());
    }
    println!();
    println!(
        "  CSV loaded in {}ms . Pipeline ran in {}ms . Total {}ms",
        load_ms,
        pipeline_ms,
        load_ms + pipeline_ms
    );
    println!();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn usage() -> ! {
    eprintln!("Usage: wilayah-lens <ledger.csv> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --include-retur   Include return transactions (default: purchases only)");
    eprintln!("  --output DIR      Output directory (default: hasil)");
    eprintln!("  --n-min N         Minimum transactions to classify (default: 30)");
    eprintln!("  --top N           Items per region in the top list (default: 5)");
    eprintln!("  --markdown        Also write a Markdown report");
    eprintln!("  --json            Print a JSON run summary instead of formatted text");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  wilayah-lens data/transaksi.csv --n-min 20 --markdown");
    process::exit(1);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let ledger_path = &args[1];
    let mut include_retur = false;
    let mut output_dir = PathBuf::from("hasil");
    let mut n_min: u64 = wilayah_metrics::thresholds::DEFAULT_N_MIN;
    let mut top_n: usize = 5;
    let mut markdown = false;
    let mut json_output = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--include-retur" => {
                include_retur = true;
                i += 1;
            }
            "--markdown" => {
                markdown = true;
                i += 1;
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            "--output" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --output requires a directory path");
                    process::exit(1);
                }
                output_dir = PathBuf::from(&args[i + 1]);
                i += 2;
            }
            "--n-min" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --n-min requires a number");
                    process::exit(1);
                }
                n_min = args[i + 1].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --n-min requires a non-negative integer");
                    process::exit(1);
                });
                i += 2;
            }
            "--top" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --top requires a number");
                    process::exit(1);
                }
                top_n = args[i + 1].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --top requires a positive integer");
                    process::exit(1);
                });
                i += 2;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                usage();
            }
        }
    }

    // Configuration errors are fatal before any row is read.
    let config = ClassifierConfig {
        n_min,
        ..Default::default()
    };
    let classifier = match Classifier::new(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let load_start = Instant::now();
    let (records, load_summary) = match load_ledger_file(ledger_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error loading ledger: {}", e);
            process::exit(1);
        }
    };
    let load_ms = load_start.elapsed().as_millis();

    let pipeline_start = Instant::now();
    let aggregation = aggregate(&records, include_retur);
    log::info!(
        "aggregated {} items across {} unique transactions",
        aggregation.profiles.len(),
        aggregation.grand_total
    );
    let agg_summary = aggregation.summary.clone();
    let tops = top_items_per_region(&aggregation.profiles, top_n);
    let items = classify_profiles(aggregation.profiles, &aggregation.baseline, &classifier);
    let pipeline_ms = pipeline_start.elapsed().as_millis();

    if let Err(e) = std::fs::create_dir_all(&output_dir) {
        eprintln!("Error creating '{}': {}", output_dir.display(), e);
        process::exit(1);
    }

    let mut outputs: Vec<PathBuf> = Vec::new();
    let classification_path = output_dir.join("klasifikasi_item.csv");
    if let Err(e) = write_report(&classification_path, |w| write_profile_csv(w, &items)) {
        eprintln!("Error writing '{}': {}", classification_path.display(), e);
        process::exit(1);
    }
    outputs.push(classification_path);

    let top_path = output_dir.join("top_item_per_wilayah.csv");
    if let Err(e) = write_report(&top_path, |w| write_top_csv(w, &tops)) {
        eprintln!("Error writing '{}': {}", top_path.display(), e);
        process::exit(1);
    }
    outputs.push(top_path);

    if markdown {
        let md_path = output_dir.join("laporan.md");
        let mut doc = String::from("# Laporan Distribusi Transaksi per Wilayah\n\n");
        doc.push_str(&render_classification_markdown(&items, 10));
        doc.push('\n');
        doc.push_str(&render_top_markdown(&tops));
        if let Err(e) = std::fs::write(&md_path, doc) {
            eprintln!("Error writing '{}': {}", md_path.display(), e);
            process::exit(1);
        }
        outputs.push(md_path);
    }

    if json_output {
        let run = RunJson {
            generated_at: Utc::now().to_rfc3339(),
            input: ledger_path.clone(),
            include_retur,
            n_min,
            load_ms,
            pipeline_ms,
            rows: RowsJson {
                read: load_summary.rows_read,
                skipped: load_summary.rows_skipped,
                retur_excluded: agg_summary.retur_excluded,
                unknown_region: agg_summary.unknown_region,
                consumed: agg_summary.rows_consumed,
            },
            items_classified: items.len(),
            labels: LabelsJson {
                global: label_count(&items, Label::Global),
                regional: label_count(&items, Label::Regional),
                local: label_count(&items, Label::Local),
                low_volume: label_count(&items, Label::LowVolume),
            },
            outputs: outputs.iter().map(|p| p.display().to_string()).collect(),
        };
        match serde_json::to_string_pretty(&run) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing summary: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_human(
            &items,
            &load_summary,
            &agg_summary,
            &outputs,
            load_ms,
            pipeline_ms,
        );
    }
}

/// Open a file and run a CSV-writing closure against it.
fn write_report<F>(path: &Path, write: F) -> PipelineResult<()>
where
    F: FnOnce(&mut std::fs::File) -> PipelineResult<()>,
{
    let mut file = std::fs::File::create(path).map_err(|source| PipelineError::Write {
        path: path.display().to_string(),
        source,
    })?;
    write(&mut file)
}
