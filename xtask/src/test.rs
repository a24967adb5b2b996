use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

/// Crates whose tests run on the host.
pub const CRATES: &[&str] = &["platform", "ess9038pro"];

pub fn run(unit_only: bool, integration_only: bool) -> Result<()> {
    println!();
    println!("{}", "🧪 Running tests...".cyan().bold());
    println!();

    let total_start = Instant::now();

    if !integration_only {
        cargo_test("Unit tests", &["--lib"])?;
    }

    if !unit_only {
        cargo_test("Integration tests", &["--tests"])?;
    }

    if !unit_only && !integration_only {
        cargo_test("Doc tests", &["--doc"])?;
    }

    println!(
        "{}",
        format!(
            "✓ All tests completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}

/// Run `cargo test <kind_args>` for every driver crate and report a summary.
fn cargo_test(label: &str, kind_args: &[&str]) -> Result<()> {
    let lower = label.to_lowercase();
    println!("{}", format!("  Running {lower}...").cyan());
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.arg("test").args(kind_args);
    for &krate in CRATES {
        cmd.args(["-p", krate]);
    }

    let output = cmd
        .output()
        .with_context(|| format!("Failed to run {}", label.to_lowercase()))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !output.status.success() {
        eprintln!("{}", format!("  ✗ {label} failed").red().bold());
        eprintln!();
        for line in stdout.lines() {
            eprintln!("  {line}");
        }
        anyhow::bail!("{label} failed");
    }

    println!(
        "{}",
        format!(
            "  ✓ {} passed {} in {:.2}s",
            label,
            extract_test_summary(&stdout),
            start.elapsed().as_secs_f64()
        )
        .green()
    );
    println!();
    Ok(())
}

/// Sum the `test result:` lines cargo prints per test binary.
fn extract_test_summary(output: &str) -> String {
    let mut passed = 0u32;
    let mut failed = 0u32;
    let mut binaries = 0u32;

    for line in output.lines() {
        let Some(result) = line.split("test result:").nth(1) else {
            continue;
        };
        binaries = binaries.saturating_add(1);
        for part in result.split(';') {
            let mut words = part.split_whitespace().rev();
            let (Some(kind), Some(count)) = (words.next(), words.next()) else {
                continue;
            };
            let count: u32 = count.parse().unwrap_or(0);
            match kind {
                "passed" => passed = passed.saturating_add(count),
                "failed" => failed = failed.saturating_add(count),
                _ => {}
            }
        }
    }

    if binaries == 0 {
        "(summary not available)".to_string()
    } else {
        format!("({passed} passed, {failed} failed across {binaries} binaries)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_sums_all_binaries() {
        let output = "\
test result: ok. 5 passed; 0 failed; 0 ignored; 0 measured; 0 filtered out; finished in 0.01s
test result: ok. 12 passed; 0 failed; 1 ignored; 0 measured; 0 filtered out; finished in 0.20s
";
        assert_eq!(
            extract_test_summary(output),
            "(17 passed, 0 failed across 2 binaries)"
        );
    }

    #[test]
    fn summary_without_results() {
        assert_eq!(
            extract_test_summary("error: no tests"),
            "(summary not available)"
        );
    }
}
