//! deckfit CLI - slide layout and pagination tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use deckfit::{validate_structure, Deck, Deckfit, JsonFormat, PageConfig, PaginationStats};

#[derive(Parser)]
#[command(name = "deckfit")]
#[command(version)]
#[command(about = "Lay out and paginate slide decks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out and paginate every slide of a deck
    Paginate {
        /// Input deck JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        page: PageArgs,

        /// Process slides one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Lay out every slide without paginating
    Layout {
        /// Input deck JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Report structural problems; exits with 1 when any are found
    Validate {
        /// Input deck JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print warnings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Paginate and print an outline of the resulting geometry
    Inspect {
        /// Input deck JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Show version information
    Version,
}

/// Page geometry selection. One of the two is required.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct PageArgs {
    /// Page geometry JSON file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Use the 720x405 widescreen page
    #[arg(long)]
    widescreen: bool,
}

impl PageArgs {
    fn load(&self) -> Result<PageConfig, Box<dyn std::error::Error>> {
        match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)?;
                Ok(PageConfig::from_json(&json)?)
            }
            None => Ok(PageConfig::widescreen()),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Paginate {
            input,
            output,
            compact,
            page,
            sequential,
        } => cmd_paginate(&input, output.as_deref(), compact, &page, sequential),
        Commands::Layout {
            input,
            output,
            compact,
            page,
        } => cmd_layout(&input, output.as_deref(), compact, &page),
        Commands::Validate { input, json } => cmd_validate(&input, json),
        Commands::Inspect { input, page } => cmd_inspect(&input, &page),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_deck(input: &Path) -> Result<Deck, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(input)?;
    let deck = Deck::from_json(&json)?;
    log::debug!("read {} slides from {}", deck.slide_count(), input.display());
    Ok(deck)
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_paginate(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    page: &PageArgs,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = if output.is_some() {
        let pb = ProgressBar::new(3);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    pb.set_message("Reading deck...");
    let deck = read_deck(input)?;
    let mut pipeline = Deckfit::new(page.load()?);
    if sequential {
        pipeline = pipeline.sequential();
    }
    pb.inc(1);

    pb.set_message("Paginating...");
    let (deck, stats) = pipeline.paginate_deck_with_stats(deck);
    pb.inc(1);

    pb.set_message("Writing JSON...");
    let json = deckfit::render::to_json(&deck, json_format(compact))?;
    pb.inc(1);
    pb.finish_and_clear();

    write_output(output, &json)?;
    if output.is_some() {
        print_stats(&stats);
    }
    Ok(())
}

fn cmd_layout(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    page: &PageArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut deck = read_deck(input)?;
    let engine = Deckfit::new(page.load()?).layout_engine();
    for slide in &mut deck.slides {
        engine.layout_in_place(slide);
    }

    let json = deckfit::render::to_json(&deck, json_format(compact))?;
    write_output(output, &json)
}

fn cmd_validate(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let deck = read_deck(input)?;
    let warnings: Vec<_> = deck.slides.iter().flat_map(validate_structure).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&warnings)?);
    } else if warnings.is_empty() {
        println!(
            "{} {} slides, no problems found",
            "OK".green().bold(),
            deck.slide_count()
        );
    } else {
        for warning in &warnings {
            println!("{} {}", "warning:".yellow().bold(), warning);
        }
        println!("\n{} warnings", warnings.len());
    }

    if !warnings.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_inspect(input: &Path, page: &PageArgs) -> Result<(), Box<dyn std::error::Error>> {
    let deck = read_deck(input)?;
    let (deck, stats) = Deckfit::new(page.load()?).paginate_deck_with_stats(deck);

    println!("{}", deckfit::render::to_outline(&deck));
    println!();
    print_stats(&stats);
    Ok(())
}

fn print_stats(stats: &PaginationStats) {
    println!("{}", "Pagination Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Slides in".bold(), stats.slides_in);
    println!("{}: {}", "Slides out".bold(), stats.pages_out);
    println!("{}: {}", "Continuations".bold(), stats.continuations);
    println!("{}: {}", "Elements split".bold(), stats.elements_split);
    println!("{}: {}", "Sections deferred".bold(), stats.sections_deferred);
    if stats.forced_placements > 0 {
        println!(
            "{}: {}",
            "Forced placements".yellow().bold(),
            stats.forced_placements
        );
    }
}

fn cmd_version() {
    println!("{} {}", "deckfit".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Slide layout and pagination tool");
    println!();
    println!("License: MIT");
}
