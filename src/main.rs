//! luamin CLI
//!
//! Command-line interface for the Lua script minifier.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use luamin::{minify, Config, Diagnostic, Lexer, Minified, Mode, SizeReport, VERSION};

#[derive(Parser)]
#[command(name = "luamin", version = VERSION)]
#[command(about = "Shrink Lua scripts without changing what they do")]
struct Cli {
    /// Scripts to minify
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// 0 = keep as written, 1 = conservative, 2 = aggressive (overrides the config file)
    #[arg(short, long)]
    mode: Option<i64>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write minified scripts into this directory instead of stdout
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Print the size of each strategy's output
    #[arg(long)]
    stats: bool,

    /// Show the lexical regions of each script instead of minifying
    #[arg(long)]
    regions: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "luamin=debug" } else { "luamin=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            process::exit(2);
        }
    }
}

/// Returns whether every script was minified
fn run(cli: &Cli) -> Result<bool> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(mode) = cli.mode {
        config.format_script = mode;
    }
    let mode = config.mode()?;

    if cli.regions {
        for path in &cli.inputs {
            show_file_regions(path)?;
        }
        return Ok(true);
    }

    match &cli.out_dir {
        Some(dir) => minify_into(dir, &cli.inputs, mode, cli.stats),
        None => {
            let [path] = cli.inputs.as_slice() else {
                bail!("several inputs need --out-dir");
            };
            let source = read_script(path)?;
            let result = minify(&source, mode);
            if cli.stats {
                print_stats(path, &source);
            }
            io::stdout()
                .write_all(result.text.as_bytes())
                .context("Failed to write to stdout")?;
            Ok(report(path, &source, &result))
        }
    }
}

/// Minify every input in parallel and write the results under `dir`
fn minify_into(dir: &Path, inputs: &[PathBuf], mode: Mode, stats: bool) -> Result<bool> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create directory: {:?}", dir))?;

    let outcomes: Vec<Result<bool>> = inputs
        .par_iter()
        .map(|path| {
            let source = read_script(path)?;
            let result = minify(&source, mode);
            let name = path
                .file_name()
                .with_context(|| format!("Not a file: {:?}", path))?;
            let target = dir.join(name);
            fs::write(&target, result.text.as_bytes())
                .with_context(|| format!("Failed to write {:?}", target))?;
            if stats {
                print_stats(path, &source);
            }
            Ok(report(path, &source, &result))
        })
        .collect();

    let mut all_ok = true;
    for outcome in outcomes {
        all_ok &= outcome?;
    }
    Ok(all_ok)
}

fn read_script(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Print the diagnostic for a failed minification, returning whether it succeeded
fn report(path: &Path, source: &str, result: &Minified) -> bool {
    match &result.fault {
        None => true,
        Some(fault) => {
            let fault = fault.clone().with_filename(&path.display().to_string());
            eprint!("{}", Diagnostic::with_source(&fault, source));
            false
        }
    }
}

fn print_stats(path: &Path, source: &str) {
    eprintln!("{}: {}", path.display(), SizeReport::measure(source));
}

/// Show the lexical regions of a file
fn show_file_regions(path: &Path) -> Result<()> {
    let source = read_script(path)?;

    println!("Regions for {:?}:", path);
    println!("{}", "=".repeat(60));

    let mut count = 0;
    for region in Lexer::new(&source) {
        let region = match region {
            Ok(region) => region,
            Err(e) => {
                let e = e.with_filename(&path.display().to_string());
                eprint!("{}", Diagnostic::with_source(&e, &source));
                break;
            }
        };
        println!(
            "{:6}..{:<6} {:20} | {:?}",
            region.start,
            region.end,
            region.kind.to_string(),
            region.text(&source)
        );
        count += 1;
    }

    println!("{}", "=".repeat(60));
    println!("Total regions: {}", count);

    Ok(())
}
