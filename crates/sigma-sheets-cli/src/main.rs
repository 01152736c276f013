//! Sigma Sheets CLI - uncertainty propagation from the command line

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sigma_sheets::prelude::*;
use sigma_sheets::{derivative_set, synthesize};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sigma")]
#[command(
    author,
    version,
    about = "Uncertainty propagation formula generator for spreadsheets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate per-row value/uncertainty formulas from a JSON request
    Propagate {
        /// Request JSON file (default: stdin)
        input: Option<PathBuf>,

        /// Output file for the response JSON (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the response JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the partial derivative of a formula
    Derive {
        /// Formula over named variables, e.g. "x^2*y"
        formula: String,

        /// Variable to differentiate with respect to
        #[arg(short, long)]
        var: String,
    },

    /// Print the symbolic value and uncertainty formulas
    Symbolic {
        /// Formula over named variables
        formula: String,

        /// Variables carrying an uncertainty (default: all referenced)
        #[arg(short, long, value_delimiter = ',')]
        vars: Vec<String>,
    },

    /// Parse a formula and report the variables it references
    Check {
        /// Formula to validate
        formula: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Propagate {
            input,
            output,
            pretty,
        } => run_propagate(input.as_deref(), output.as_deref(), pretty),
        Commands::Derive { formula, var } => run_derive(&formula, &var),
        Commands::Symbolic { formula, vars } => run_symbolic(&formula, &vars),
        Commands::Check { formula } => run_check(&formula),
    }
}

fn run_propagate(input: Option<&Path>, output: Option<&Path>, pretty: bool) -> Result<()> {
    let text = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read request from stdin")?;
            buffer
        }
    };

    let request: PropagationRequest =
        serde_json::from_str(&text).context("Request is not valid JSON")?;

    let response = handle_request(&request);

    let rendered = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };

    match output {
        Some(path) => fs::write(path, rendered + "\n")
            .with_context(|| format!("Failed to write '{}'", path.display()))?,
        None => println!("{rendered}"),
    }

    Ok(())
}

fn run_derive(formula: &str, var: &str) -> Result<()> {
    let ast = parse_formula(formula).context("Failed to parse formula")?;
    let derivative = differentiate(&ast, var);
    println!("{}", write_expr(&derivative));
    Ok(())
}

fn run_symbolic(formula: &str, vars: &[String]) -> Result<()> {
    let ast = parse_formula(formula).context("Failed to parse formula")?;

    let names: Vec<String> = if vars.is_empty() {
        ast.variables().into_iter().map(String::from).collect()
    } else {
        vars.to_vec()
    };

    // Symbolic output never materializes cell references, so the bindings
    // only carry names and the presence of an uncertainty column
    let placeholder = ColumnRange::new(0, 0, 0);
    let bindings: Vec<VariableBinding> = names
        .iter()
        .map(|name| VariableBinding::new(name.clone(), placeholder, Some(placeholder)))
        .collect::<std::result::Result<_, _>>()
        .context("Invalid variable name")?;

    let derivatives = derivative_set(&ast, &bindings);
    let (value, uncertainty) = synthesize(&ast, &derivatives, &bindings);

    println!("value:       {}", write_expr(&value));
    println!("uncertainty: {}", write_expr(&uncertainty));
    Ok(())
}

fn run_check(formula: &str) -> Result<()> {
    let ast = parse_formula(formula).context("Invalid formula")?;

    let variables: Vec<&str> = ast.variables().into_iter().collect();
    if variables.is_empty() {
        println!("OK (constant formula)");
    } else {
        println!("OK, variables: {}", variables.join(", "));
    }
    Ok(())
}
