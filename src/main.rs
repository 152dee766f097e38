use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use kot_billing::backend::{load_invoice_file, FileSource, InvoiceSource, KotSource, RestClient};
use kot_billing::collection::{CollectionReport, CollectionView, DateRange, Surface};
use kot_billing::config::{config_dir, init_config_dir, load_config, resolve_output_dir, Config};
use kot_billing::error::{PosError, Result};
use kot_billing::format::parse_date;
use kot_billing::invoice::InvoicePreview;
use kot_billing::pdf::{generate_report_pdf, open_path, TypstPrinter};

#[derive(Parser)]
#[command(name = "kot")]
#[command(version, about = "Restaurant invoice previews and payment collection reports", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config dir or ~/.kot)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config.toml
    Init,

    /// Preview an invoice, optionally printing it
    Invoice {
        /// Invoice number to fetch from the backend
        number: Option<String>,

        /// Read the invoice from a JSON file instead ({"invoice": {...}, "items": [...]})
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the invoice after previewing it
        #[arg(long)]
        print: bool,
    },

    /// Payment collections by method for a date range
    Collection {
        /// First day of the range (YYYY-MM-DD, default: today)
        #[arg(long)]
        from: Option<String>,

        /// Last day of the range, inclusive (YYYY-MM-DD, default: today)
        #[arg(long)]
        to: Option<String>,

        /// Read tickets from a JSON file instead of the backend
        #[arg(long, value_name = "PATH")]
        source_file: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long, conflicts_with = "interactive")]
        json: bool,

        /// Also save the report as PDF
        #[arg(long, conflicts_with = "interactive")]
        pdf: bool,

        /// Open the generated PDF with the system default viewer
        #[arg(long, requires = "pdf")]
        open: bool,

        /// Change dates from stdin ("from <date>", "to <date>", "quit")
        #[arg(short, long)]
        interactive: bool,
    },

    /// Show configuration summary
    Status,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "kot=debug,kot_billing=debug"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Invoice {
            number,
            file,
            print,
        } => cmd_invoice(&cfg_dir, number, file, print),
        Commands::Collection {
            from,
            to,
            source_file,
            json,
            pdf,
            open,
            interactive,
        } => {
            let options = CollectionOptions {
                json,
                pdf,
                open,
                interactive,
            };
            cmd_collection(&cfg_dir, from, to, source_file, options)
        }
        Commands::Status => cmd_status(&cfg_dir),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    init_config_dir(cfg_dir)?;

    println!("Initialized kot config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Set your business details and backend: $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Check today's collections:             kot collection");

    Ok(())
}

/// Preview an invoice from the backend or a file
fn cmd_invoice(
    cfg_dir: &Path,
    number: Option<String>,
    file: Option<PathBuf>,
    print: bool,
) -> Result<()> {
    let config = load_config(cfg_dir)?;

    let doc = match (number, file) {
        (Some(_), Some(_)) => return Err(PosError::AmbiguousInvoiceSource),
        (None, None) => return Err(PosError::NoInvoice),
        (None, Some(path)) => load_invoice_file(&path)?,
        (Some(number), None) => RestClient::from_settings(&config.backend)?.fetch_invoice(&number)?,
    };

    let printer = TypstPrinter::new(
        resolve_output_dir(&config.print.output_dir, cfg_dir),
        config.print.command.clone(),
    );
    let mut preview = InvoicePreview::new(&config.business, &doc, Box::new(printer), || {
        debug!("invoice preview closed")
    });

    println!("{}", preview.view().to_text());

    if print {
        preview.print()?;
        println!();
        println!("Sent {} to printer", preview.view().invoice_number);
    }

    preview.close();
    Ok(())
}

struct CollectionOptions {
    json: bool,
    pdf: bool,
    open: bool,
    interactive: bool,
}

/// Terminal stand-in for the report's loading indicator and alert dialog.
struct TerminalSurface {
    interactive: bool,
}

impl Surface for TerminalSurface {
    fn show_loading(&self) {
        if self.interactive {
            eprintln!("Loading...");
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("!! {message}");
    }
}

/// Run the collection report for a date range
fn cmd_collection(
    cfg_dir: &Path,
    from: Option<String>,
    to: Option<String>,
    source_file: Option<PathBuf>,
    options: CollectionOptions,
) -> Result<()> {
    let config = load_config(cfg_dir)?;

    let today = DateRange::today();
    let start = from.as_deref().map(parse_date).transpose()?.unwrap_or(today.start);
    let end = to.as_deref().map(parse_date).transpose()?.unwrap_or(today.end);

    let source: Box<dyn KotSource> = match source_file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(RestClient::from_settings(&config.backend)?),
    };
    let surface = TerminalSurface {
        interactive: options.interactive,
    };
    let mut view = CollectionView::open(source, Box::new(surface), DateRange::new(start, end));

    if options.interactive {
        return run_interactive(&mut view, &config);
    }

    if let Some(message) = view.last_error() {
        return Err(PosError::CollectionUnavailable(message.to_string()));
    }

    let report = CollectionReport::new(&config.business.name, &view.range(), view.summary());
    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.to_text());
    }

    if options.pdf {
        let output_dir = resolve_output_dir(&config.print.output_dir, cfg_dir);
        std::fs::create_dir_all(&output_dir)?;

        let range = view.range();
        let pdf_path = output_dir.join(format!(
            "COLLECTION-{}-{}.pdf",
            range.start.format("%Y-%m-%d"),
            range.end.format("%Y-%m-%d")
        ));
        generate_report_pdf(&report, &pdf_path)?;
        eprintln!("Saved: {}", pdf_path.display());

        if options.open {
            open_path(&pdf_path)?;
        }
    }

    Ok(())
}

fn print_view(view: &CollectionView, config: &Config) {
    let report = CollectionReport::new(&config.business.name, &view.range(), view.summary());
    println!("{}", report.to_text());
}

/// Read date changes from stdin; every change reloads and re-renders.
fn run_interactive(view: &mut CollectionView, config: &Config) -> Result<()> {
    print_view(view, config);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let mut words = line.split_whitespace();

        match (words.next(), words.next()) {
            (None, _) => {}
            (Some("quit" | "exit" | "q"), _) => break,
            (Some("refresh"), _) => {
                view.refresh();
                print_view(view, config);
            }
            (Some(which @ ("from" | "to")), Some(date)) => match parse_date(date) {
                Ok(date) => {
                    if which == "from" {
                        view.set_start_date(date);
                    } else {
                        view.set_end_date(date);
                    }
                    print_view(view, config);
                }
                Err(e) => eprintln!("Error: {e}"),
            },
            _ => eprintln!("Commands: from <YYYY-MM-DD>, to <YYYY-MM-DD>, refresh, quit"),
        }

        write!(stdout, "> ")?;
        stdout.flush()?;
    }

    Ok(())
}

/// Show configuration summary
fn cmd_status(cfg_dir: &Path) -> Result<()> {
    let config = load_config(cfg_dir)?;

    println!("kot status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("Business:         {}", config.business.name);
    match config.backend.url.as_deref() {
        Some(url) if config.backend.anon_key.is_some() => println!("Backend:          {url}"),
        Some(url) => println!("Backend:          {url} (no anon key)"),
        None => println!("Backend:          not configured"),
    }
    println!("Timeout:          {}s", config.backend.timeout_secs);
    println!(
        "PDF output:       {}",
        resolve_output_dir(&config.print.output_dir, cfg_dir).display()
    );
    println!(
        "Print command:    {}",
        config
            .print
            .command
            .as_ref()
            .map_or_else(|| "system viewer".to_string(), ToString::to_string)
    );

    Ok(())
}
