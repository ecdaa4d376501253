use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gz_runtime::{error_rules, RunConfig, Runner};
use gz_syntax::{keyword_table, GzSyntax, OutputKind};
use gz_transpile::{check_javascript, transpile_for_execution_with, transpile_with, LoopGuard};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gz", about = "GenZLang: JavaScript, but make it bussin'")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transpile a GenZLang file to JavaScript.
    Transpile {
        /// Input .gz file.
        input: PathBuf,
        /// Output file (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Emit the loop-guarded text that `run` executes.
        #[arg(long)]
        guarded: bool,
        /// Loop ceiling for --guarded.
        #[arg(long, requires = "guarded")]
        ceiling: Option<u32>,
    },
    /// Transpile the file and report JavaScript syntax errors by source position.
    Check { input: PathBuf },
    /// Run the file in the sandbox and print its output.
    Run {
        input: PathBuf,
        /// JSON run configuration.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the loop ceiling.
        #[arg(long)]
        ceiling: Option<u32>,
        /// Print the result as JSON instead of a transcript.
        #[arg(long)]
        json: bool,
    },
    /// Dump the scanner segments as JSON.
    Tokens { input: PathBuf },
    /// List slang keywords, or autocomplete a prefix.
    Keywords {
        #[arg(long)]
        prefix: Option<String>,
        /// Maximum number of suggestions for --prefix.
        #[arg(long, default_value_t = 5)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// List the error translation rules.
    Errors {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GZ_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Transpile {
            input,
            output,
            guarded,
            ceiling,
        } => {
            let source = read_source(&input)?;
            let syntax = GzSyntax::default();
            let js = if guarded {
                let guard = ceiling.map(LoopGuard::new).unwrap_or_default();
                transpile_for_execution_with(&source, &syntax, &guard)
            } else {
                transpile_with(&source, &syntax)
            };

            match &output {
                Some(path) => std::fs::write(path, &js)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => print!("{js}"),
            }
        }
        Commands::Check { input } => {
            let source = read_source(&input)?;
            let filename = input.display().to_string();
            // Substitution keeps line breaks, so positions match the slang source.
            let js = transpile_with(&source, &GzSyntax::default());
            if let Err(e) = check_javascript(&js, &filename) {
                eprintln!("{e}");
                return Ok(ExitCode::FAILURE);
            }
            eprintln!("OK: {filename}");
        }
        Commands::Run {
            input,
            config,
            ceiling,
            json,
        } => {
            let source = read_source(&input)?;
            let mut run_config = match &config {
                Some(path) => RunConfig::from_json_file(path)?,
                None => RunConfig::default(),
            };
            if let Some(ceiling) = ceiling {
                run_config.loop_ceiling = ceiling;
            }
            tracing::debug!(?run_config, "running {}", input.display());

            let result = Runner::new(run_config).run_collecting_output(&source)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for line in result.transcript() {
                    match line.kind {
                        OutputKind::Error => eprintln!("{line}"),
                        OutputKind::Log | OutputKind::Info => println!("{line}"),
                    }
                }
            }

            if !result.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Tokens { input } => {
            let source = read_source(&input)?;
            let segments = gz_lexer::scan(&source, &GzSyntax::default());
            println!("{}", serde_json::to_string_pretty(&segments)?);
        }
        Commands::Keywords {
            prefix,
            limit,
            json,
        } => {
            let table = keyword_table();
            let entries: Vec<_> = match &prefix {
                Some(prefix) => table.suggest(prefix, limit),
                None => table.entries().iter().collect(),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for e in entries {
                    println!("{:<10} → {}", e.slang, e.target);
                }
            }
        }
        Commands::Errors { json } => {
            let rules = error_rules().rules();
            if json {
                println!("{}", serde_json::to_string_pretty(rules)?);
            } else {
                for kind in error_rules().kinds() {
                    println!("{kind}");
                    for rule in rules.iter().filter(|r| r.kind == kind) {
                        println!("  when /{}/i\n    {}", rule.pattern, rule.template);
                    }
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
