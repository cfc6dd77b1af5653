use std::path::{Path, PathBuf};
use std::process::Command;

use clap::{Parser, Subcommand};

use fts_config_viewer::pipeline::extraction::ReportScanner;
use fts_config_viewer::pipeline::processor::ConfigProcessor;
use fts_config_viewer::session::ViewerSession;

#[derive(Parser, Debug)]
#[command(name = "fts-config-viewer", version, about = "FTS Config Viewer")]
struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge a logger configuration (and optional End Visit Report) and
    /// render the printable PDF.
    Generate {
        /// Logger configuration XML export
        config: PathBuf,
        /// End Visit Report text file
        #[arg(long)]
        report: Option<PathBuf>,
        /// Where to write the artifacts (default: platform cache dir)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Do not open the PDF in the default viewer afterwards
        #[arg(long, default_value_t = false)]
        no_open: bool,
    },
    /// Scan an End Visit Report and print the fields that would be merged.
    Extract {
        /// End Visit Report text file
        report: PathBuf,
    },
}

fn main() {
    fts_config_viewer::init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            config,
            report,
            output_dir,
            no_open,
        } => generate(config, report, output_dir, no_open, cli.json),
        Commands::Extract { report } => extract(&report, cli.json),
    };

    if let Err(message) = result {
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
}

fn generate(
    config: PathBuf,
    report: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    no_open: bool,
    json: bool,
) -> Result<(), String> {
    let processor = ConfigProcessor::bundled().map_err(|e| e.to_string())?;
    let mut session = ViewerSession::new(processor);
    if let Some(dir) = output_dir {
        session.set_output_dir(dir);
    }

    session.load_config(config).map_err(|e| e.to_string())?;
    if let Some(report) = report {
        session.load_report(report).map_err(|e| e.to_string())?;
    }

    let outcome = session.generate().map_err(|e| e.to_string())?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).map_err(|e| e.to_string())?
        );
    } else {
        println!("Merged document: {}", outcome.merged_xml_path.display());
        println!("PDF: {}", outcome.pdf_path.display());
    }

    if !no_open {
        open_in_viewer(&outcome.pdf_path);
    }
    Ok(())
}

fn extract(report: &Path, json: bool) -> Result<(), String> {
    let fields = ReportScanner::new()
        .scan_file(report)
        .map_err(|e| e.to_string())?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&fields).map_err(|e| e.to_string())?
        );
    } else if fields.is_empty() {
        println!("No known fields found in {}", report.display());
    } else {
        for field in fields {
            println!("{} = {}", field.name, field.value);
        }
    }
    Ok(())
}

/// Open the generated PDF in the platform default viewer. Best effort —
/// a failure is logged, not fatal.
fn open_in_viewer(path: &Path) {
    #[cfg(target_os = "windows")]
    let launch = Command::new("cmd").args(["/C", "start", ""]).arg(path).spawn();
    #[cfg(target_os = "macos")]
    let launch = Command::new("open").arg(path).spawn();
    #[cfg(all(unix, not(target_os = "macos")))]
    let launch = Command::new("xdg-open").arg(path).spawn();

    if let Err(e) = launch {
        tracing::warn!(path = %path.display(), error = %e, "Could not open PDF viewer");
    }
}
