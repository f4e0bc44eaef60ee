use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;

use visitor_lens::notify::Rb2bPayload;
use visitor_lens::{Engine, VisitorAttributes};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INTERNAL: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a visitor record and print the intelligence report
    Analyze {
        /// JSON visitor record (reads stdin when omitted or "-")
        file: Option<PathBuf>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Full report with summary, recommendations, actions and insights
    Report {
        /// JSON visitor record (reads stdin when omitted or "-")
        file: Option<PathBuf>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the visitor identifier derived from the fingerprint fields
    Id {
        /// JSON visitor record (reads stdin when omitted or "-")
        file: Option<PathBuf>,
    },
    /// Print the owner notification payload as JSON
    Email {
        /// JSON visitor record (reads stdin when omitted or "-")
        file: Option<PathBuf>,
    },
    /// Turn an RB2B webhook body into a notification payload
    Webhook {
        /// JSON webhook body (reads stdin when omitted or "-")
        file: Option<PathBuf>,
        /// Score the location and device fields and send the intelligence email instead
        #[arg(long)]
        analyze: bool,
    },
    /// Write the default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "visitor-lens")]
#[command(about = "Rule-based website visitor scoring", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/visitor-lens/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn read_visitor(file: Option<&PathBuf>) -> Result<VisitorAttributes> {
    let input = read_input(file)?;
    Ok(VisitorAttributes::from_json_str(&input)?)
}

fn input_error(e: anyhow::Error) -> ! {
    eprintln!("Input error: {:#}", e);
    std::process::exit(EXIT_INPUT);
}

/// Print as pretty JSON. A serialization failure is our bug, not bad input.
fn print_json<T: Serialize>(value: &T) {
    match visitor_lens::output::format_json(value) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Internal error: {:#}", e);
            std::process::exit(EXIT_INTERNAL);
        }
    }
}

fn run_init(config_path: Option<PathBuf>, force: bool) -> ! {
    let path = match config_path {
        Some(p) => p,
        None => match visitor_lens::config::get_config_path() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        },
    };
    if let Err(e) = visitor_lens::config::write_default_config(&path, force) {
        eprintln!("Config error: {:#}", e);
        std::process::exit(EXIT_CONFIG);
    }
    println!("Config written to {}", path.display());
    std::process::exit(EXIT_SUCCESS);
}

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.map(PathBuf::from);

    // init must work even when the existing config is broken
    if let Commands::Init { force } = cli.command {
        run_init(config_path, force);
    }

    let config = match visitor_lens::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let level = visitor_lens::telemetry::log_level(cli.verbose, config.log_level.as_deref());
    if let Err(e) = visitor_lens::telemetry::init(&level) {
        eprintln!("Config error: {}", e);
        std::process::exit(EXIT_CONFIG);
    }

    // Validate scoring config at startup
    let engine = match Engine::new(config.effective_scoring()) {
        Ok(engine) => engine,
        Err(visitor_lens::EngineError::InvalidConfig(errors)) => {
            eprintln!("Scoring config errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let use_colors = visitor_lens::output::should_use_colors();

    match cli.command {
        Commands::Analyze { file, json } => {
            let attrs = read_visitor(file.as_ref()).unwrap_or_else(|e| input_error(e));
            let report = engine.evaluate(&attrs);
            tracing::info!(visitor_id = %report.visitor_id, "analyzed visitor");
            if json {
                print_json(&report);
            } else {
                println!("{}", visitor_lens::output::format_report(&report, use_colors));
            }
        }
        Commands::Report { file, json } => {
            let attrs = read_visitor(file.as_ref()).unwrap_or_else(|e| input_error(e));
            let report = engine.generate_report(&attrs);
            tracing::info!(
                visitor_id = %report.intelligence.visitor_id,
                lead_quality = %report.summary.lead_quality,
                "generated report"
            );
            if json {
                print_json(&report);
            } else {
                println!(
                    "{}",
                    visitor_lens::output::format_visitor_report(&report, use_colors)
                );
            }
        }
        Commands::Id { file } => {
            let attrs = read_visitor(file.as_ref()).unwrap_or_else(|e| input_error(e));
            println!("{}", visitor_lens::visitor_id(&attrs));
        }
        Commands::Email { file } => {
            let attrs = read_visitor(file.as_ref()).unwrap_or_else(|e| input_error(e));
            let report = engine.generate_report(&attrs);
            let payload = visitor_lens::notify::build_payload(&attrs, &report);
            tracing::info!(params = payload.params.len(), "built notification");
            print_json(&payload);
        }
        Commands::Webhook { file, analyze } => {
            let webhook = read_input(file.as_ref())
                .and_then(|body| Ok(Rb2bPayload::from_json_str(&body)?))
                .unwrap_or_else(|e| input_error(e));
            tracing::info!(identified = webhook.is_identified(), "received webhook");

            let payload = if analyze {
                let attrs = webhook.to_attributes();
                let report = engine.generate_report(&attrs);
                visitor_lens::notify::build_payload(&attrs, &report)
            } else {
                webhook.email_payload()
            };
            print_json(&payload);
        }
        // Handled before the config was loaded
        Commands::Init { .. } => {}
    }

    std::process::exit(EXIT_SUCCESS);
}
