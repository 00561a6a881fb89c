//! Command-line interface for the SBML rule library
//!
//! This binary provides a CLI interface to work with SBML documents stored as JSON, including:
//! - Sorting assignment rules by their dependencies
//! - Validating documents against the schema and the consistency rules
//! - Displaying documents and the dependencies between their rules
//!
//! # Usage
//!
//! ```bash
//! # Sort the assignment rules of a document
//! sbml-rules convert --path model.json --output sorted.json
//!
//! # Validate a document
//! sbml-rules validate --path model.json
//!
//! # Show the dependencies of the assignment rules
//! sbml-rules deps --path model.json
//! ```

use std::{fs, path::PathBuf, process::exit};

use clap::{Parser, Subcommand};
use colored::Colorize;
use log::debug;
use sbml_rules::{
    info::{dependency_table, rule_table},
    io::{load_sbmldoc, save_sbmldoc},
    ordering::order::{cycles, order},
    prelude::{
        ConversionError, ConversionProperties, ConverterRegistry, DependencyGraph, SORT_RULES,
    },
    validation::validate_json,
};

/// Main CLI configuration struct
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Sort the assignment rules of a document
    Convert {
        /// Path to the SBML document
        #[arg(short, long)]
        path: PathBuf,

        /// Path to save the converted document to. Prints the rules if omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave the rule order untouched
        #[arg(long, default_value_t = false)]
        no_sort_rules: bool,

        /// Path to a JSON file with conversion properties
        #[arg(long)]
        properties: Option<PathBuf>,
    },
    /// Validate a document against the schema and the consistency rules
    Validate {
        /// Path to the SBML document
        #[arg(short, long)]
        path: PathBuf,
    },
    /// Display the contents of a document
    Info {
        /// Path to the SBML document
        #[arg(short, long)]
        path: PathBuf,
    },
    /// Display the dependencies between assignment rules
    Deps {
        /// Path to the SBML document
        #[arg(short, long)]
        path: PathBuf,
    },
}

/// Main entry point for the CLI application
pub fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Convert {
            path,
            output,
            no_sort_rules,
            properties,
        } => {
            let mut sbmldoc = load_sbmldoc(path).expect("Failed to load SBML document");
            let registry = ConverterRegistry::with_defaults();

            let mut props = match properties {
                Some(path) => {
                    let content =
                        fs::read_to_string(path).expect("Failed to read properties file");
                    serde_json::from_str::<ConversionProperties>(&content)
                        .expect("Failed to parse properties")
                }
                None => ConversionProperties::new(),
            };

            if *no_sort_rules {
                props.set_bool_value(SORT_RULES, false);
            } else if !props.has_option(SORT_RULES) {
                props.add_option(SORT_RULES, true, "sort rules");
            }

            debug!("Converting with {} options", props.len());

            match sbmldoc.convert(&props, &registry) {
                Ok(()) => {}
                Err(ConversionError::SourceValidationFailed(errors)) => {
                    eprintln!("{}", "Document is not consistent".bold().red());
                    for error in errors {
                        eprintln!("{error}");
                    }
                    exit(1);
                }
                Err(error) => {
                    eprintln!("{}", error.to_string().bold().red());
                    exit(1);
                }
            }

            match output {
                Some(output) => save_sbmldoc(output, &sbmldoc).expect("Failed to save SBML document"),
                None => {
                    if let Some(model) = &sbmldoc.model {
                        println!("{}", rule_table(&model.rules));
                    }
                }
            }
        }
        Commands::Validate { path } => {
            let content = fs::read_to_string(path).expect("Failed to read SBML document");
            let report = validate_json(&content).expect("Failed to validate SBML document");

            if !report.valid {
                println!("{}", "Document does not match the schema".bold().red());
                for error in &report.errors {
                    println!("{error}");
                }
                exit(1);
            }

            let mut sbmldoc = load_sbmldoc(path).expect("Failed to load SBML document");
            let num_errors = sbmldoc.check_consistency();

            for result in &sbmldoc.error_log().errors {
                println!("{result}");
            }

            if num_errors > 0 {
                println!("{}", format!("Found {num_errors} errors").bold().red());
                exit(1);
            }

            println!("{}", "Document is valid".bold().green());
        }
        Commands::Info { path } => {
            let sbmldoc = load_sbmldoc(path).expect("Failed to load SBML document");
            println!("{sbmldoc}");
        }
        Commands::Deps { path } => {
            let sbmldoc = load_sbmldoc(path).expect("Failed to load SBML document");
            let Some(model) = &sbmldoc.model else {
                println!("{}", "Document does not contain a model".bold().red());
                exit(1);
            };

            let assignments = model.rules.iter().filter(|rule| rule.is_assignment());
            let graph =
                DependencyGraph::from_rules(assignments).expect("Failed to parse rule math");
            println!("{}", dependency_table(&graph));

            let sorted = order(&graph)
                .into_iter()
                .filter_map(|index| graph.variable(index))
                .collect::<Vec<_>>();
            println!("Evaluation order: {}", sorted.join(" -> "));

            for cycle in cycles(&graph) {
                let members = cycle
                    .iter()
                    .filter_map(|&index| graph.variable(index))
                    .collect::<Vec<_>>();
                println!(
                    "{}",
                    format!("Cyclic dependency: {}", members.join(", ")).yellow()
                );
            }
        }
    }
}
