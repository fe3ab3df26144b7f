//! Command-line front end for the STL cleaner.
//!
//! ```text
//! stl-cleaner part.stl --o=fixed.stl --min-pos=0,0,0 --warnings
//! ```
//!
//! Exit status is 0 on success and 1 on any error.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use nalgebra::Vector3;
use owo_colors::OwoColorize;
use stl_cleaner::{default_output_path, CleanParams, CleanReport, StlCleaner};
use stl_io::Diagnostics;

/// Validate and repair binary and ASCII STL files.
///
/// Normals are recomputed, facets are wound counterclockwise, holes are
/// closed and the model is moved above a minimum position. The result is
/// written in the encoding of the input.
#[derive(Parser)]
#[command(name = "stl-cleaner")]
#[command(version)]
struct Cli {
    /// STL file to clean
    #[arg(name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file (default: INPUT with `.stl` replaced by `-cleaned.stl`)
    #[arg(long = "o", value_name = "PATH")]
    output: Option<PathBuf>,

    /// Spaces per indentation level in ASCII output
    #[arg(long, default_value_t = 1)]
    indent: usize,

    /// Lowest allowed coordinate per axis, as `x,y,z`
    #[arg(
        long = "min-pos",
        value_name = "X,Y,Z",
        default_value = "0.01,0.01,0.01",
        value_parser = parse_min_position
    )]
    min_pos: Vector3<f64>,

    /// Move the model onto the minimum position even if it is already above it
    #[arg(long = "force-repos")]
    force_repos: bool,

    /// Name the model after the `solid` line only
    #[arg(long = "ignore-endsolid-name")]
    ignore_endsolid_name: bool,

    /// Print every warning with its position
    #[arg(long)]
    warnings: bool,
}

impl Cli {
    fn params(&self) -> CleanParams {
        CleanParams::default()
            .with_indent(self.indent)
            .with_min_position(self.min_pos)
            .with_force_reposition(self.force_repos)
            .with_ignore_endsolid_name(self.ignore_endsolid_name)
            .with_detailed_warnings(self.warnings)
    }
}

fn parse_min_position(value: &str) -> Result<Vector3<f64>, String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid coordinate in '{value}': {e}"))?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(format!(
            "expected three comma-separated values, got {}",
            parts.len()
        )),
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let Some(input) = cli.input.clone() else {
        let _ = Cli::command().print_help();
        println!();
        return ExitCode::SUCCESS;
    };

    match run(&cli, input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "✗".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, input: PathBuf) -> Result<()> {
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&input));

    let mut cleaner = StlCleaner::new(cli.params());
    let result = cleaner.clean_file(&input, &output);

    // Counts are meaningless when the input was never parsed.
    let parsed = !matches!(&result, Err(err) if err.is_before_parsing());
    match &result {
        Ok(report) => print_report(report),
        Err(_) if parsed && cli.warnings => print_warnings(cleaner.diagnostics()),
        Err(_) => {}
    }
    if parsed {
        print_counts(cleaner.diagnostics());
    }

    let report = result.with_context(|| format!("failed to clean {}", input.display()))?;
    println!(
        "{} Cleaned STL successfully stored to {}",
        "✓".green().bold(),
        report.output.display()
    );
    Ok(())
}

fn print_report(report: &CleanReport) {
    println!(
        "{} {} ({} STL)",
        "Cleaning".bold(),
        report.input.display(),
        report.encoding
    );
    println!(
        "{}",
        format!("Minimum coordinates found: {}", report.min_corner).dimmed()
    );
    if report.offset != Vector3::zeros() {
        println!(
            "{}",
            format!(
                "Moved by [{}, {}, {}]",
                report.offset.x, report.offset.y, report.offset.z
            )
            .dimmed()
        );
    }
    println!("{}", report.repair);
    if report.manifold.is_manifold() {
        println!("{}", report.manifold.to_string().green());
    } else {
        println!("{}", report.manifold.to_string().yellow());
    }
    for warning in &report.warnings {
        println!("{}", warning.to_string().yellow());
    }
}

fn print_warnings(diagnostics: &Diagnostics) {
    for warning in diagnostics.warnings() {
        eprintln!("{}", warning.to_string().yellow());
    }
}

fn print_counts(diagnostics: &Diagnostics) {
    let line = format!(
        "Errors: {}, Warnings: {}",
        diagnostics.error_count(),
        diagnostics.warning_count()
    );
    if diagnostics.has_errors() {
        eprintln!("{}", line.red());
    } else if diagnostics.warning_count() > 0 {
        println!("{}", line.yellow());
    } else {
        println!("{}", line.cyan());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn min_position_parses_three_values() {
        assert_eq!(
            parse_min_position("0, -1.5,2e1").unwrap(),
            Vector3::new(0.0, -1.5, 20.0)
        );
        assert!(parse_min_position("1,2").is_err());
        assert!(parse_min_position("1,2,x").is_err());
    }

    #[test]
    fn flags_map_onto_params() {
        let cli = Cli::try_parse_from([
            "stl-cleaner",
            "in.stl",
            "--o=out.stl",
            "--indent=4",
            "--min-pos=0,0,0",
            "--force-repos",
            "--ignore-endsolid-name",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out.stl")));
        let params = cli.params();
        assert_eq!(params.indent, 4);
        assert_eq!(params.reposition.min_position, Vector3::zeros());
        assert!(params.reposition.force);
        assert!(params.read.ignore_endsolid_name);
        assert!(!params.detailed_warnings);
    }

    #[test]
    fn defaults_without_flags() {
        let cli = Cli::try_parse_from(["stl-cleaner"]).unwrap();
        assert!(cli.input.is_none());
        assert_eq!(cli.params().reposition.min_position, Vector3::repeat(0.01));
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
