use std::path::PathBuf;
use std::process;

use clap::Parser;
use resbundle_cli::{
    Mode, Overrides, RunSettings, load_config, logging::init_logging, run_extract_command,
    run_split_command,
};

/// Merge module strings.xml files into one translation catalog, or split a translated catalog back.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Merge the base strings of every module into the aggregation module
    #[arg(long)]
    extract: bool,

    /// Split every translated catalog of the aggregation module back into the modules
    #[arg(long)]
    split: bool,

    /// Project root (defaults to the directory above the aggregation module)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Config file (defaults to ./resbundle.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Name of the aggregation module
    #[arg(long = "aggregation")]
    aggregation: Option<String>,

    /// Only split these languages, e.g. `fr` or `pt-rBR` (repeatable)
    #[arg(long = "lang")]
    lang: Vec<String>,

    /// Keep comments that sit above entries left out of the catalog
    #[arg(long)]
    keep_orphan_comments: bool,

    /// Write a JSON report of the run to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();

    let mode = match Mode::from_flags(args.extract, args.split) {
        Ok(mode) => mode,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(2);
        }
    };

    init_logging(args.verbose, args.quiet);

    if let Err(e) = run(mode, args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(mode: Mode, args: Args) -> Result<(), String> {
    let cwd = std::env::current_dir().map_err(|e| e.to_string())?;
    let config = load_config(args.config.as_deref(), &cwd).map_err(|e| e.to_string())?;
    let overrides = Overrides {
        root: args.root,
        aggregation_module: args.aggregation,
        languages: args.lang,
        keep_orphan_comments: args.keep_orphan_comments,
        report: args.report,
    };
    let settings = RunSettings::resolve(overrides, config, &cwd)?;
    tracing::debug!(
        root = %settings.layout.root.display(),
        aggregation = %settings.layout.aggregation_module,
        "resolved project"
    );

    match mode {
        Mode::Extract => run_extract_command(&settings).map(|_| ()),
        Mode::Split => run_split_command(&settings).map(|_| ()),
    }
}
