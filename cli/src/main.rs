use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use menu_graph_core::{AnalysisReport, PageSort, validate_report};
use menu_graph_extract::output::{
    DEFAULT_REPORT_FILE, OutputFormat, format_page, format_page_list, format_path_line,
    format_report, load_report, write_report,
};
use menu_graph_extract::{AnalyzerConfig, analyze_directory};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Number of page names suggested when a lookup misses.
const PAGE_SUGGESTIONS: usize = 10;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
            CliOutputFormat::Markdown => Self::Markdown,
            CliOutputFormat::Table => Self::Table,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliPageSort {
    Name,
    Functions,
    Connections,
}

impl From<CliPageSort> for PageSort {
    fn from(sort: CliPageSort) -> Self {
        match sort {
            CliPageSort::Name => Self::Name,
            CliPageSort::Functions => Self::Functions,
            CliPageSort::Connections => Self::Connections,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "menu-graph")]
#[command(about = "Menu navigation graph extraction from page scripts")]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scan a corpus directory and write the navigation report.
    Analyze(AnalyzeArgs),
    /// Search navigation paths by function, source, or target.
    Search(SearchArgs),
    /// Show the details of one page.
    Page(PageArgs),
    /// List every page with its connection counts.
    List(ListArgs),
    /// Check a saved report for structural inconsistencies.
    Validate(ReportArgs),
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    /// Directory containing the page scripts and level markup.
    #[arg(long, default_value = ".")]
    path: PathBuf,
    /// Report output path (default: <PATH>/menu_graph_report.json).
    #[arg(long)]
    output: Option<PathBuf>,
    /// YAML analyzer configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Format printed to stdout.
    #[arg(long, default_value = "table")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ReportArgs {
    /// Report written by `analyze`.
    #[arg(long, default_value = DEFAULT_REPORT_FILE)]
    report: PathBuf,
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Case-insensitive substring to match.
    pattern: String,
    #[command(flatten)]
    report: ReportArgs,
}

#[derive(Debug, Args)]
struct PageArgs {
    /// Page name (case-insensitive).
    name: String,
    #[command(flatten)]
    report: ReportArgs,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Sort order for the listing.
    #[arg(long, default_value = "name")]
    sort: CliPageSort,
    #[command(flatten)]
    report: ReportArgs,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Analyze(args) => run_analyze(args),
        Command::Search(args) => run_search(args),
        Command::Page(args) => run_page(args),
        Command::List(args) => run_list(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_analyze(args: AnalyzeArgs) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => AnalyzerConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    debug!(path = %args.path.display(), ?config, "Starting analysis");

    let report = analyze_directory(&args.path, &config)
        .map_err(|err| format!("Failed to analyze '{}': {err}", args.path.display()))?;

    let output = args
        .output
        .unwrap_or_else(|| args.path.join(DEFAULT_REPORT_FILE));
    write_report(&output, &report)
        .map_err(|err| format!("Failed to write report '{}': {err}", output.display()))?;

    let rendered = format_report(&report, args.format.into())?;
    println!("{rendered}");
    eprintln!("Report written to {}", output.display());
    Ok(())
}

fn run_search(args: SearchArgs) -> Result<(), String> {
    let report = read_report(&args.report.report)?;
    let matches = report.search_paths(&args.pattern);

    println!(
        "Found {} navigation paths matching '{}'",
        matches.len(),
        args.pattern
    );
    for path in matches {
        println!("  {}", format_path_line(path));
        if !path.conditions.is_empty() {
            println!("    conditions: {}", path.conditions.join(", "));
        }
    }
    Ok(())
}

fn run_page(args: PageArgs) -> Result<(), String> {
    let report = read_report(&args.report.report)?;
    let Some(page) = report.find_page(&args.name) else {
        let names: Vec<&str> = report
            .pages
            .iter()
            .take(PAGE_SUGGESTIONS)
            .map(|page| page.name.as_str())
            .collect();
        return Err(format!(
            "Page '{}' not found. Available pages: {}",
            args.name,
            names.join(", ")
        ));
    };

    print!("{}", format_page(page));
    Ok(())
}

fn run_list(args: ListArgs) -> Result<(), String> {
    let report = read_report(&args.report.report)?;
    print!("{}", format_page_list(&report, args.sort.into()));
    Ok(())
}

fn run_validate(args: ReportArgs) -> Result<(), String> {
    let report = read_report(&args.report)?;
    let errors = validate_report(&report);

    if errors.is_empty() {
        println!(
            "Report is consistent: {} pages, {} navigation paths",
            report.pages.len(),
            report.navigation_paths.len()
        );
        return Ok(());
    }

    for err in &errors {
        eprintln!("  {err}");
    }
    Err(format!("{} validation error(s) found", errors.len()))
}

fn read_report(path: &Path) -> Result<AnalysisReport, String> {
    if !path.exists() {
        return Err(format!(
            "Report '{}' not found. Run `menu-graph analyze` first.",
            path.display()
        ));
    }
    load_report(path).map_err(|err| format!("Failed to load report '{}': {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_sort_maps_to_page_sort() {
        assert_eq!(PageSort::from(CliPageSort::Connections), PageSort::Connections);
        assert_eq!(PageSort::from(CliPageSort::Name), PageSort::Name);
    }

    #[test]
    fn test_report_defaults_to_working_directory_file() {
        let cli = Cli::parse_from(["menu-graph", "list"]);
        let Command::List(args) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(args.report.report, PathBuf::from(DEFAULT_REPORT_FILE));
        assert!(matches!(args.sort, CliPageSort::Name));
    }

    #[test]
    fn test_missing_report_mentions_analyze() {
        let err = read_report(Path::new("/nonexistent/menu_graph_report.json")).unwrap_err();
        assert!(err.contains("analyze"));
    }
}
