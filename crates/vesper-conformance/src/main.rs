//! Conformance runner for the array flattening primitive
//!
//! Runs the case suite and reports pass/fail per case, exiting non-zero
//! when any case fails.

use anyhow::Result;
use clap::Parser;

use vesper_conformance::cases;

#[derive(Parser)]
#[command(name = "vesper-conformance")]
#[command(about = "Array flattening conformance runner", long_about = None)]
#[command(version)]
struct Cli {
    /// Only run cases whose name contains this pattern
    #[arg(short, long)]
    filter: Option<String>,

    /// List case names without running them
    #[arg(long)]
    list: bool,

    /// Print each case result, not just failures
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let selected: Vec<_> = cases()
        .into_iter()
        .filter(|case| match &cli.filter {
            Some(pattern) => case.name.contains(pattern.as_str()),
            None => true,
        })
        .collect();

    if cli.list {
        for case in &selected {
            println!("{}", case.name);
        }
        return Ok(());
    }

    let mut passed = 0usize;
    let mut failed = 0usize;
    for case in &selected {
        match (case.run)() {
            Ok(()) => {
                passed += 1;
                if cli.verbose {
                    println!("PASS {}", case.name);
                }
            }
            Err(msg) => {
                failed += 1;
                println!("FAIL {}: {msg}", case.name);
            }
        }
    }

    println!("{passed} passed, {failed} failed, {} total", selected.len());
    if failed > 0 {
        anyhow::bail!("{failed} conformance case(s) failed");
    }
    Ok(())
}
