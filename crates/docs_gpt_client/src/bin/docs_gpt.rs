//! docs-gpt: terminal host for the documentation Q&A component.
//! Reads config, sends a question to the answer service, prints the rendered
//! answer and its source. `--interactive` keeps the component running on stdin.

use clap::Parser;
use docs_gpt_client::config::{self, Config};
use docs_gpt_client::{Client, QueryComponent, RenderFormat, RequestState, Session};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Ask the documentation assistant a question.
#[derive(Parser, Debug)]
#[command(name = "docs-gpt", version)]
struct Args {
    /// Question to ask. Read from the first line of stdin when omitted.
    question: Option<String>,

    /// Path to the YAML config file.
    #[arg(long, env = "DOCS_GPT_CONFIG")]
    config: Option<PathBuf>,

    /// Answer service endpoint; overrides the config file.
    #[arg(long)]
    endpoint: Option<String>,

    /// Print HTML markup instead of plain text.
    #[arg(long)]
    html: bool,

    /// Treat every stdin line as a question until stdin closes.
    #[arg(short, long, conflicts_with_all = ["question", "health"])]
    interactive: bool,

    /// Probe the service's health endpoint and exit.
    #[arg(long)]
    health: bool,

    /// Log debug output to stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env("DOCS_GPT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// 1. `--config` / `DOCS_GPT_CONFIG` (must exist) 2. default path (may be absent).
fn load_config(explicit: Option<PathBuf>) -> Result<Config, String> {
    if let Some(path) = explicit {
        return config::load(&path)
            .map_err(|e| format!("failed to load config from {}: {}", path.display(), e));
    }
    match config::default_config_path() {
        Some(path) => config::load_or_default(&path).map_err(|e| e.to_string()),
        None => Ok(Config::default()),
    }
}

fn read_question(positional: Option<String>) -> Option<String> {
    if let Some(q) = positional {
        return Some(q);
    }
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).ok()?;
    let line = line.trim_end_matches(['\r', '\n']).to_string();
    Some(line)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.quiet, args.verbose);

    let cfg = match load_config(args.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let endpoint = args
        .endpoint
        .clone()
        .unwrap_or_else(|| cfg.endpoint().to_string());
    let client = match Client::new(&endpoint) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let format = if args.html {
        RenderFormat::Html
    } else {
        RenderFormat::Text
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.health {
        return rt.block_on(async {
            match client.health().await {
                Ok(status) if status.is_ok() => {
                    println!("OK (model version {})", status.model_version);
                    ExitCode::SUCCESS
                }
                Ok(status) => {
                    eprintln!("Error: service reports {}", status.health_check);
                    ExitCode::FAILURE
                }
                Err(e) => {
                    eprintln!("Error: health check failed: {}", e);
                    ExitCode::FAILURE
                }
            }
        });
    }

    let component = QueryComponent::new(cfg.ui());

    if args.interactive {
        return rt.block_on(async {
            let mut session = Session::new(component, client, format);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = io::stdout();
            if let Err(e) = session.run(stdin, &mut stdout).await {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            exit_status(session.component())
        });
    }

    let question = read_question(args.question).unwrap_or_default();
    if question.is_empty() {
        eprintln!("Error: no question provided (pass it as an argument or on stdin)");
        return ExitCode::FAILURE;
    }

    rt.block_on(async {
        let mut component = component;
        component.handle_input(question);
        if let Err(e) = component.dispatch(&client).await {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }

        let view = component.view();
        let rendered = match (format, &view.response) {
            (RenderFormat::Html, _) => view.to_html(),
            (RenderFormat::Text, Some(block)) => block.to_text(),
            (RenderFormat::Text, None) => String::new(),
        };
        let mut out = io::stdout().lock();
        let _ = write!(out, "{}", rendered);
        let _ = out.flush();

        exit_status(&component)
    })
}

/// A failed request leaves the component pending or showing a notice.
fn exit_status(component: &QueryComponent) -> ExitCode {
    if component.state() == RequestState::Pending || component.failure().is_some() {
        eprintln!("Error: no answer received");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
