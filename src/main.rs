//! QuickPick CLI
//!
//! Runs the mock data endpoint, the interactive picker, or a one-shot
//! dataset dump.

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::HumanDuration;
use parking_lot::Mutex;
use quickpick::{
    format_count, server, tui, Catalog, DataProvider, DataResponse, QuickPickError, Record,
    RemoteCatalog, SelectConfig, SelectionListener, DEFAULT_RECORD_COUNT,
};
use tracing_subscriber::{fmt, EnvFilter};

/// QuickPick - searchable dropdown picker over a synthetic catalog
#[derive(Parser)]
#[command(name = "quickpick")]
#[command(author = "QuickPick Contributors")]
#[command(version)]
#[command(about = "Searchable dropdown picker over a synthetic record catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the catalog as JSON on GET /api/data
    Serve {
        /// Port to bind
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Number of records to synthesize
        #[arg(short, long, default_value_t = DEFAULT_RECORD_COUNT)]
        count: usize,
    },

    /// Run the interactive picker
    Pick {
        /// Endpoint base URL (e.g. http://localhost:3000); omit to use an
        /// in-process catalog
        #[arg(short, long)]
        url: Option<String>,

        /// Records in the in-process catalog (ignored with --url)
        #[arg(short, long, default_value_t = DEFAULT_RECORD_COUNT)]
        count: usize,

        /// Placeholder text for the empty query field
        #[arg(long, default_value = "请选择...")]
        placeholder: String,

        /// Accent theme (blue, green, magenta)
        #[arg(long, default_value = "blue")]
        theme: String,

        /// Do not re-fetch the dataset when the query field gains focus
        #[arg(long)]
        no_refresh_on_focus: bool,
    },

    /// Dump the synthetic dataset as JSON
    Generate {
        /// Number of records to synthesize
        #[arg(short, long, default_value_t = DEFAULT_RECORD_COUNT)]
        count: usize,

        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port, count } => cmd_serve(port, count),

        Commands::Pick {
            url,
            count,
            placeholder,
            theme,
            no_refresh_on_focus,
        } => cmd_pick(url, count, placeholder, &theme, no_refresh_on_focus),

        Commands::Generate { count, output } => cmd_generate(count, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

/// Serve command implementation
fn cmd_serve(port: u16, count: usize) -> quickpick::Result<()> {
    println!(
        "{} Serving a catalog of {} records on port {}",
        style("→").cyan().bold(),
        style(format_count(count)).yellow(),
        style(port).yellow()
    );

    let catalog = Catalog::new(count);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(port, catalog))
}

/// Pick command implementation
fn cmd_pick(
    url: Option<String>,
    count: usize,
    placeholder: String,
    theme: &str,
    no_refresh_on_focus: bool,
) -> quickpick::Result<()> {
    let provider: Arc<dyn DataProvider> = match url {
        Some(ref url) => Arc::new(RemoteCatalog::new(url)),
        None => Arc::new(Catalog::new(count)),
    };

    let config = SelectConfig {
        placeholder,
        refresh_on_focus: !no_refresh_on_focus,
        ..Default::default()
    };

    // The host-side selection slot; the widget reports into it on every
    // select and clear
    let selected: Arc<Mutex<Option<Record>>> = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&selected);
    let listener: SelectionListener = Box::new(move |selection| {
        *slot.lock() = selection;
    });

    let app = tui::App::new(
        provider,
        config,
        tui::Theme::from_name(theme),
        Some(listener),
    );
    tui::run(app)?;

    match selected.lock().take() {
        Some(record) => {
            println!(
                "{} {} [{}] {}",
                style("Selected:").green().bold(),
                record.name,
                style(&record.datasource).yellow(),
                style(&record.pid).dim()
            );
        }
        None => {
            println!("{}", style("No selection.").dim());
        }
    }

    Ok(())
}

/// Generate command implementation
fn cmd_generate(count: usize, output: Option<&str>) -> quickpick::Result<()> {
    let start = Instant::now();

    let catalog = Catalog::new(count);
    let records = catalog.fetch_all()?;
    let payload = DataResponse {
        total: records.len(),
        data: records.as_ref().clone(),
    };

    let json = serde_json::to_string_pretty(&payload)
        .map_err(|e| QuickPickError::Generation(e.to_string()))?;

    match output {
        Some(path) => {
            let mut file = std::fs::File::create(path)?;
            file.write_all(json.as_bytes())?;
            println!(
                "{} Wrote {} records to {} in {}",
                style("\u{2713}").green().bold(),
                style(format_count(records.len())).yellow(),
                style(path).cyan(),
                style(HumanDuration(start.elapsed())).cyan()
            );
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}
