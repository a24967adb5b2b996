use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

use crate::test::CRATES;

/// Landing page once the driver crate is documented.
const INDEX: &str = "target/doc/ess9038pro/index.html";

/// Document the driver crates. Broken intra-doc links fail the build.
pub fn run(open: bool, private: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building driver documentation...".cyan().bold());
    println!();

    let start = Instant::now();

    let output = Command::new("cargo")
        .args(doc_args(open, private))
        .env("RUSTDOCFLAGS", "-D warnings")
        .output()
        .context("Failed to build documentation")?;

    if !output.status.success() {
        eprintln!("{}", "✗ Documentation build failed".red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("Documentation build failed");
    }

    println!(
        "{}",
        format!(
            "✓ Documentation built in {:.2}s",
            start.elapsed().as_secs_f64()
        )
        .green()
    );

    if !open {
        println!();
        if Path::new(INDEX).exists() {
            println!("   {}", format!("Open {INDEX} in your browser").dimmed());
        }
        println!(
            "   {}",
            "Or run 'cargo run -p xtask -- doc --open'".dimmed()
        );
    }

    println!();

    Ok(())
}

/// `cargo` arguments for documenting every driver crate without dependencies.
fn doc_args(open: bool, private: bool) -> Vec<&'static str> {
    let mut args = vec!["doc", "--no-deps"];
    for &krate in CRATES {
        args.extend(["-p", krate]);
    }
    if private {
        args.push("--document-private-items");
    }
    if open {
        args.push("--open");
    }
    args
}
