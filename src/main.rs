//! Abiscope CLI - Recover contract interface descriptors from dApp bundles

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use url::Url;

use abiscope::config::{self, AbiscopeConfig};
use abiscope::export::{DescriptorSink, JsonDirExporter};
use abiscope::pipeline::{Extractor, MatchPolicy, ScanStats};
use abiscope::ui::{self, Icons};
use abiscope::web;
use abiscope::Descriptor;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "abiscope")]
#[command(version = "0.0.1")]
#[command(about = "Recover contract interface descriptors from minified dApp bundles")]
#[command(long_about = r#"
Abiscope scans minified JavaScript bundles for embedded contract interface
descriptors and exports them as valid JSON, one file per descriptor, grouped
by origin.

Example usage:
  abiscope scan --url https://dapp.example.org
  abiscope extract --path ./bundles --origin staging
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a dApp page, discover its bundle scripts, and extract
    Scan {
        /// URL of the dApp page to process
        #[arg(short, long)]
        url: String,

        /// Directory to export recovered descriptors into
        #[arg(short, long)]
        exports: Option<PathBuf>,

        /// Process every script on the page, not just index/main bundles
        #[arg(long)]
        all_scripts: bool,

        /// Recover from every qualifying declaration per scope, not just
        /// the first
        #[arg(long)]
        all_matches: bool,
    },

    /// Extract from a local bundle file or a directory of bundles
    Extract {
        /// Path to a .js file, or a directory walked for .js files
        #[arg(short, long)]
        path: PathBuf,

        /// Origin label used to group exported files
        #[arg(short, long, default_value = "local")]
        origin: String,

        /// Directory to export recovered descriptors into
        #[arg(short, long)]
        exports: Option<PathBuf>,

        /// Recover from every qualifying declaration per scope, not just
        /// the first
        #[arg(long)]
        all_matches: bool,
    },

    /// Write a starter abiscope.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let loaded = config::load_config(None)?.unwrap_or_default();

    match cli.command {
        Commands::Scan {
            url,
            exports,
            all_scripts,
            all_matches,
        } => run_scan(&loaded, &url, exports, all_scripts, all_matches),

        Commands::Extract {
            path,
            origin,
            exports,
            all_matches,
        } => run_extract(&loaded, &path, &origin, exports, all_matches),

        Commands::Init { force } => {
            let path = config::default_config_path();
            config::write_config(&path, &AbiscopeConfig::default(), force)?;
            ui::success(&format!("Wrote {}", path.display()));
            Ok(())
        }
    }
}

fn build_extractor(config: &AbiscopeConfig, all_matches: bool) -> Extractor {
    let policy = if all_matches {
        MatchPolicy::AllPerScope
    } else {
        MatchPolicy::FirstPerScope
    };
    Extractor::new()
        .with_delimiter(config.scope_delimiter())
        .with_policy(policy)
}

fn run_scan(
    config: &AbiscopeConfig,
    url: &str,
    exports: Option<PathBuf>,
    all_scripts: bool,
    all_matches: bool,
) -> anyhow::Result<()> {
    let page_url = Url::parse(url)?;
    let exporter = JsonDirExporter::new(exports.unwrap_or_else(|| config.exports_dir()));
    let extractor = build_extractor(config, all_matches);
    let filters = if all_scripts {
        Vec::new()
    } else {
        config.script_filters()
    };

    ui::header(&format!("Scanning {}", page_url));

    let spinner = ui::Spinner::new("Fetching page");
    let html = match web::fetch_text(page_url.as_str()) {
        Ok(html) => {
            spinner.finish_with_message("Page fetched");
            html
        }
        Err(err) => {
            spinner.finish_with_message("Page fetch failed");
            return Err(err.into());
        }
    };
    let scripts = web::discover_script_urls(&page_url, &html, &filters);
    if scripts.is_empty() {
        ui::warn("No candidate bundle scripts found on the page");
        return Ok(());
    }
    ui::status(
        Icons::GLOBE,
        "Scripts",
        &format!("{} candidate bundle(s)", scripts.len()),
    );

    let mut rows: Vec<(Descriptor, PathBuf)> = Vec::new();
    let mut totals = ScanStats::default();
    let bar = ui::script_bar(scripts.len());
    for script_url in &scripts {
        bar.set_message(script_url.to_string());
        match web::fetch_text(script_url.as_str()) {
            Ok(source) => {
                let scan = extractor.scan_module(&source);
                totals.merge(&scan.stats);
                for descriptor in scan.descriptors {
                    let path = exporter.export(&descriptor, script_url.as_str())?;
                    rows.push((descriptor, path));
                }
            }
            Err(err) => {
                tracing::warn!(url = %script_url, error = %err, "skipping script");
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    print_summary(&rows, &totals);
    Ok(())
}

fn run_extract(
    config: &AbiscopeConfig,
    path: &Path,
    origin: &str,
    exports: Option<PathBuf>,
    all_matches: bool,
) -> anyhow::Result<()> {
    let exporter = JsonDirExporter::new(exports.unwrap_or_else(|| config.exports_dir()));
    let extractor = build_extractor(config, all_matches);

    let bundles = collect_bundles(path)?;
    if bundles.is_empty() {
        anyhow::bail!("no .js bundles found under {}", path.display());
    }
    ui::header(&format!(
        "Extracting from {} bundle(s) under {}",
        bundles.len(),
        path.display()
    ));

    let mut rows: Vec<(Descriptor, PathBuf)> = Vec::new();
    let mut totals = ScanStats::default();
    for bundle in &bundles {
        ui::status(Icons::FILE, "Bundle", &bundle.display().to_string());
        let source = std::fs::read_to_string(bundle)?;
        let scan = extractor.scan_module(&source);
        totals.merge(&scan.stats);
        for descriptor in scan.descriptors {
            let destination = exporter.export(&descriptor, origin)?;
            rows.push((descriptor, destination));
        }
    }

    print_summary(&rows, &totals);
    Ok(())
}

fn collect_bundles(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut bundles: Vec<PathBuf> = walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("js"))
        .collect();
    bundles.sort();
    Ok(bundles)
}

fn print_summary(rows: &[(Descriptor, PathBuf)], totals: &ScanStats) {
    ui::section("Summary");
    if rows.is_empty() {
        println!("∅ No descriptors recovered.");
    } else {
        println!("{}", ui::descriptor_table(rows));
        ui::success(&format!("Recovered {} descriptor(s)", totals.recovered()));
    }
    println!("{} Scan statistics:", Icons::STATS);
    println!("{}", totals);
}
