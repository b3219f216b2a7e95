//! PDF Preflight CLI tool
//!
//! A command-line tool that reports print-optimization issues in PDF files.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use glob::glob;
use std::path::PathBuf;
use std::process;

use pdf_preflight::pdf::analyze_file_with;
use pdf_preflight::ThresholdModel;

/// PDF Preflight - Detect print-optimization issues in PDF documents
#[derive(Parser)]
#[command(name = "pdf-preflight")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Check a single PDF
    pdf-preflight check report.pdf

    # Check every PDF in a directory
    pdf-preflight check \"*.pdf\"

    # Fail the build when issues are found
    pdf-preflight check --strict slides.pdf

    # Flag images above 4 million pixels instead of the default 1 million
    pdf-preflight check --image-threshold 4.0 scan.pdf

    # Show the page count of a PDF
    pdf-preflight info report.pdf")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze PDF files for print-optimization issues
    Check {
        /// Input PDF files. Supports glob patterns like "*.pdf"
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Color difference threshold on the 0-255 scale
        #[arg(long, default_value_t = 30)]
        color_threshold: u8,

        /// Background rectangle threshold as a percentage of page area
        #[arg(long, default_value_t = 50.0)]
        background_threshold: f64,

        /// Large image threshold in millions of pixels
        #[arg(long, default_value_t = 1.0)]
        image_threshold: f64,

        /// Exit with a non-zero status when any file has issues
        #[arg(long)]
        strict: bool,
    },

    /// Show basic information about a PDF file
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            inputs,
            color_threshold,
            background_threshold,
            image_threshold,
            strict,
        } => cmd_check(
            inputs,
            ThresholdModel {
                color_delta_threshold: color_threshold,
                background_area_percent_threshold: background_threshold,
                large_image_pixel_threshold: image_threshold,
            },
            strict,
        ),
        Commands::Info { input } => cmd_info(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// Expand glob patterns in input paths
fn expand_globs(patterns: Vec<String>) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        // Check if pattern contains glob characters
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            let mut matched = false;
            for entry in glob(&pattern).with_context(|| format!("invalid pattern: {pattern}"))? {
                match entry {
                    Ok(path) => {
                        paths.push(path);
                        matched = true;
                    }
                    Err(e) => eprintln!("Warning: glob error for {pattern}: {e}"),
                }
            }
            if !matched {
                bail!("No files matched pattern: {pattern}");
            }
        } else {
            // No glob characters, treat as literal path
            paths.push(PathBuf::from(pattern));
        }
    }

    // Sort paths for consistent ordering
    paths.sort();

    Ok(paths)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Analyze one or more PDFs and print a report for each
fn cmd_check(inputs: Vec<String>, thresholds: ThresholdModel, strict: bool) -> anyhow::Result<()> {
    let inputs = expand_globs(inputs)?;

    let mut any_issues = false;

    for (i, path) in inputs.iter().enumerate() {
        let issues = analyze_file_with(path, &thresholds)
            .with_context(|| format!("failed to analyze {}", path.display()))?;

        if i > 0 {
            println!();
        }
        println!("File: {}", path.display());
        println!("Pages: {}", issues.page_count);
        println!("Color content:       {}", yes_no(issues.has_color_content));
        println!(
            "Background elements: {}",
            yes_no(issues.has_background_elements)
        );
        println!("Large images:        {}", yes_no(issues.has_large_images));

        if issues.any() {
            any_issues = true;
            println!("Recommendation: optimize before printing");
        } else {
            println!("Recommendation: ready to print");
        }
    }

    if strict && any_issues {
        eprintln!("Issues found in at least one file");
        process::exit(2);
    }

    Ok(())
}

/// Show page count for a PDF
fn cmd_info(input: PathBuf) -> anyhow::Result<()> {
    if !input.exists() {
        bail!("Input file not found: {}", input.display());
    }

    let bytes = std::fs::read(&input)?;
    let doc = pdf_preflight::pdf::open_document(&bytes)
        .with_context(|| format!("failed to open {}", input.display()))?;
    let page_count = pdf_preflight::pdf::count_pages(&doc)?;

    println!("File: {}", input.display());
    println!("Pages: {page_count}");

    Ok(())
}
