//! prodtable CLI - searchable product tables
//!
//! Loads a product dataset (XLSX workbook or delimited text) and renders it
//! as an HTML table, JSON, or an interactive filtered text view.

mod logging;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use prodtable::render::{self, JsonFormat};
use prodtable::xlsx::XlsxParser;
use prodtable::{
    CatalogOptions, CatalogPage, DatasetFormat, DatasetVariant, LoadState, QueryParams,
};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Searchable, filterable product tables from XLSX and delimited datasets
#[derive(Parser)]
#[command(
    name = "prodtable",
    author = "iyulab",
    version,
    about = "Render and filter product tables",
    long_about = "prodtable - searchable, filterable product tables.\n\n\
                  Loads an XLSX workbook or delimited text file and renders its products\n\
                  as an HTML table, JSON, or an interactive text view."
)]
struct Cli {
    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the product table as HTML
    Render {
        #[command(flatten)]
        dataset: DatasetArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the filtered products as JSON
    Json {
        #[command(flatten)]
        dataset: DatasetArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Show dataset information
    Info {
        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// Filter interactively: each stdin line is a search or category change
    Browse {
        #[command(flatten)]
        dataset: DatasetArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct DatasetArgs {
    /// Dataset file path (.xlsx or delimited text)
    input: PathBuf,

    /// Record schema (default: from the file extension)
    #[arg(long)]
    variant: Option<VariantArg>,

    /// Field delimiter for delimited text
    #[arg(long, default_value = ",")]
    delimiter: char,
}

impl DatasetArgs {
    fn options(&self) -> CatalogOptions {
        let mut options = CatalogOptions::for_path(&self.input).with_delimiter(self.delimiter);
        if let Some(variant) = self.variant {
            options = options.with_variant(variant.into());
        }
        options
    }
}

#[derive(Args)]
struct FilterArgs {
    /// Page query string, e.g. "?category=Solvent&search=ace"
    #[arg(long)]
    query: Option<String>,

    /// Initial search text (overrides the query string)
    #[arg(short, long)]
    search: Option<String>,

    /// Initial category (overrides the query string)
    #[arg(short, long)]
    category: Option<String>,
}

impl FilterArgs {
    fn params(&self, options: &CatalogOptions) -> QueryParams {
        let from_query = QueryParams::parse_with_limits(
            self.query.as_deref().unwrap_or(""),
            options.max_search_len,
            options.max_category_len,
        );
        from_query.merged_with(QueryParams::from_values_with_limits(
            self.search.as_deref(),
            self.category.as_deref(),
            options.max_search_len,
            options.max_category_len,
        ))
    }
}

/// Record schema
#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    /// Name, CAS No., category, purity
    Chemical,
    /// Name, category, description, price
    Catalog,
}

impl From<VariantArg> for DatasetVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Chemical => DatasetVariant::Chemical,
            VariantArg::Catalog => DatasetVariant::Catalog,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Render {
            dataset,
            filter,
            output,
        } => {
            let page = load_page(&dataset, &filter);
            write_output(output.as_ref(), &page.to_html())?;

            if let Some(path) = output {
                report_written(&page, "HTML", &path);
            }
            fail_on_load_error(&page)?;
        }

        Commands::Json {
            dataset,
            filter,
            output,
            compact,
        } => {
            let page = load_page(&dataset, &filter);
            fail_on_load_error(&page)?;

            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            let json = render::to_json(&page.visible_records(), format)?;
            write_output(output.as_ref(), &json)?;

            if let Some(path) = output {
                report_written(&page, "JSON", &path);
            }
        }

        Commands::Info { dataset } => {
            let pb = create_spinner("Analyzing dataset...");

            let options = dataset.options();
            let data = fs::read(&dataset.input)?;
            let format = prodtable::detect_format_from_bytes(&data)?;
            let records = prodtable::loader::load_bytes(&data, &options)?;

            pb.finish_and_clear();

            println!("{}", "Dataset Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                dataset.input.file_name().unwrap_or_default().to_string_lossy()
            );
            println!("{}: {}", "Format".bold(), format);
            if format == DatasetFormat::Xlsx {
                let parser = XlsxParser::from_bytes(data.clone())?;
                println!(
                    "{}: {} (first read: {})",
                    "Sheets".bold(),
                    parser.sheet_count(),
                    parser.sheet_names().first().copied().unwrap_or("-")
                );
            }
            println!("{}: {}", "Variant".bold(), options.variant);
            println!("{}: {}", "Products".bold(), records.len());

            let categories = render::distinct_categories(&records);
            println!("\n{} ({})", "Categories".cyan().bold(), categories.len());
            println!("{}", "─".repeat(40));
            for category in categories {
                let count = records.iter().filter(|r| r.category() == category).count();
                println!("{}: {}", category.bold(), count);
            }
        }

        Commands::Browse { dataset, filter } => {
            let mut page = load_page(&dataset, &filter);
            fail_on_load_error(&page)?;
            browse(&mut page)?;
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

/// Build the page, load the dataset behind a spinner, and apply the filter args.
fn load_page(dataset: &DatasetArgs, filter: &FilterArgs) -> CatalogPage {
    let options = dataset.options();
    let params = filter.params(&options);
    let mut page = CatalogPage::with_params(options, params);

    let pb = create_spinner("Loading products...");
    page.load();
    pb.finish_and_clear();

    page
}

fn fail_on_load_error(page: &CatalogPage) -> Result<(), Box<dyn std::error::Error>> {
    match page.state() {
        LoadState::Failed => Err(page.options().error_message.clone().into()),
        _ => Ok(()),
    }
}

/// Interactive loop over stdin lines.
///
/// `:category NAME` selects a category, `:all` clears it, `:quit` exits, and
/// any other line replaces the search text.
fn browse(page: &mut CatalogPage) -> Result<(), Box<dyn std::error::Error>> {
    print_view(page)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim_end_matches(['\r', '\n']);

        match line.trim() {
            ":quit" | ":q" => break,
            ":all" => page.change_category(""),
            command if command.starts_with(":category") => {
                let name = command.trim_start_matches(":category").trim();
                page.change_category(name);
            }
            _ => page.input_search(line),
        }

        print_view(page)?;
    }

    Ok(())
}

fn print_view(page: &CatalogPage) -> io::Result<()> {
    let visible = page.visible_records();
    let table = render::to_text(&visible, page.options().variant, &page.options().empty_message);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", table)?;

    let category = match page.selected_category() {
        "" => "all categories".to_string(),
        c => c.to_string(),
    };
    writeln!(
        handle,
        "{} of {} products | search: {:?} | {}",
        visible.len().to_string().green().bold(),
        page.records().len(),
        page.filter().search(),
        category.cyan()
    )?;
    write!(handle, "{} ", ">".blue().bold())?;
    handle.flush()
}

fn report_written(page: &CatalogPage, kind: &str, path: &PathBuf) {
    println!(
        "{} Wrote {} with {} of {} products: {}",
        "✓".green().bold(),
        kind,
        page.visible_records().len(),
        page.records().len(),
        path.display()
    );
}

fn print_version() {
    println!("{} {}", "prodtable".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Searchable, filterable product tables");
    println!();
    println!("Supported formats: XLSX, delimited text");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
