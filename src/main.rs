//! Refgraph CLI - reference graphs for JavaScript snippets

use clap::{Parser, Subcommand, ValueEnum};
use refgraph::config::{default_config_path, load_config, write_config};
use refgraph::watcher::{WatchOutcome, Watcher};
use refgraph::{ui, Analyzer, ReferenceGraph};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "refgraph")]
#[command(version = "0.1.0")]
#[command(about = "Reference graphs for JavaScript snippets")]
#[command(long_about = r#"
Refgraph parses a JavaScript snippet and emits a directed graph of:
  • Variable references (use -> declaration)
  • Call callees (call -> function)
  • Argument bindings (parameter -> argument)
  • Value assignments (declarator -> initializer)
  • Return arguments (function -> returned expression)

Example usage:
  refgraph analyze snippet.js
  echo 'var a = 1; a' | refgraph analyze - --format table
  refgraph serve --port 7878
  refgraph span identifier-20:21
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Table,
    Stats,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph for a source file ("-" reads stdin)
    Analyze {
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,
    },

    /// Re-analyze a file every time it changes
    Watch {
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,
    },

    /// Serve graphs over HTTP
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the source span encoded in an element id
    Span { id: String },

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze { input, format } => {
            let source = read_input(&input)?;
            let mut analyzer = Analyzer::from_config(&config)?;
            let graph = analyzer.analyze(&source)?;
            tracing::info!(
                "Analyzed {}: {} nodes, {} edges",
                input.display(),
                graph.nodes().len(),
                graph.edges().len()
            );
            print_graph(&graph, format)?;
        }

        Commands::Watch { path, format } => {
            let analyzer = Analyzer::from_config(&config)?;
            let mut watcher = Watcher::new(path.clone(), analyzer);
            ui::watching(&path.display().to_string());

            watcher.run(|changed, outcome| match outcome {
                WatchOutcome::Updated(graph) => {
                    ui::changed(&changed.display().to_string());
                    if let Err(e) = print_graph(graph, format) {
                        ui::error(&e.to_string());
                    }
                }
                WatchOutcome::Failed(e) => {
                    ui::warn(&format!("{} (keeping previous graph)", e));
                }
                WatchOutcome::Unchanged => {}
            })?;
        }

        Commands::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(refgraph::server::start_server(port, config))?;
        }

        Commands::Span { id } => {
            let span = refgraph::span_of(&id)?;
            println!("{} {}", span.start, span.end);
        }

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(default_config_path);
            write_config(&path, &config, force)?;
            ui::success(&format!("Wrote {}", path.display()));
        }
    }

    Ok(())
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        return Ok(source);
    }
    Ok(std::fs::read_to_string(input)?)
}

fn print_graph(graph: &ReferenceGraph, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Json => println!("{}", graph.to_data().to_json()?),
        Format::Table => {
            if graph.edges().is_empty() {
                ui::info("Edges", "none");
            } else {
                println!("{}", ui::edge_table(graph, ui::theme()));
            }
        }
        Format::Stats => {
            ui::section("Reference Graph");
            println!("{}", ui::stats_table(&graph.stats()));
        }
    }
    Ok(())
}
