//! Folio application binary - composition root.
//!
//! 1. Parse the command line and load configuration from TOML
//! 2. Install the tracing subscriber
//! 3. Run one of: the interactive chat client, a single question, or the
//!    chat API server

mod cli;
mod render;

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use folio_chat::{ConversationController, HttpTransport, Origin, TurnOutcome};
use folio_core::config::FolioConfig;
use folio_core::locale::Locale;

use cli::{ClientArgs, CliArgs, Command};
use render::TerminalRenderer;

/// Line that ends an interactive session.
const QUIT_COMMAND: &str = "/quit";

/// Shown while a turn is in flight, once it has taken this long.
const TYPING_INDICATOR: &str = "...";
const TYPING_DELAY: Duration = Duration::from_millis(250);

/// Build a controller over the HTTP transport, applying client overrides.
fn build_controller(
    config: &FolioConfig,
    client: &ClientArgs,
) -> Result<ConversationController<HttpTransport>, Box<dyn std::error::Error>> {
    let mut chat = config.chat.clone();
    client.apply_to(&mut chat);
    let locale = Locale::new(client.resolve_language(&config.general.language));

    let transport = HttpTransport::new(&chat)?;
    tracing::info!(
        candidates = ?transport.candidates(),
        language = %locale,
        "Chat transport ready"
    );
    Ok(ConversationController::new(transport, locale))
}

/// Print every agent message appended since `from`.
fn print_agent_messages(
    controller: &ConversationController<HttpTransport>,
    renderer: &TerminalRenderer,
    from: usize,
) {
    for message in &controller.log().messages()[from..] {
        if message.origin() == Origin::Agent {
            println!("{}\n", renderer.render(message.body()));
        }
    }
}

/// Expand a bare number into the matching pre-set prompt.
fn expand_prompt<'a>(line: &'a str, prompts: &[&'a str]) -> &'a str {
    match line.parse::<usize>() {
        Ok(n) if (1..=prompts.len()).contains(&n) => prompts[n - 1],
        _ => line,
    }
}

/// Submit one turn, showing the typing indicator while the controller is busy.
async fn submit_with_indicator(
    controller: &mut ConversationController<HttpTransport>,
    text: &str,
) -> Result<TurnOutcome, std::io::Error> {
    let signal = controller.busy_signal();
    let turn = controller.submit(text);
    tokio::pin!(turn);

    let mut shown = false;
    let outcome = loop {
        tokio::select! {
            outcome = &mut turn => break outcome,
            _ = tokio::time::sleep(TYPING_DELAY), if !shown => {
                if signal.is_busy() {
                    print!("{TYPING_INDICATOR}");
                    std::io::stdout().flush()?;
                    shown = true;
                }
            }
        }
    };

    if shown {
        print!("\r{:width$}\r", "", width = TYPING_INDICATOR.len());
        std::io::stdout().flush()?;
    }
    Ok(outcome)
}

async fn run_chat(config: &FolioConfig, client: &ClientArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = build_controller(config, client)?;
    let renderer = TerminalRenderer::new();
    let strings = controller.strings();

    println!("{}\n", strings.title);
    println!("{}\n", strings.welcome);
    println!("{}", strings.pre_questions_label);
    for (i, prompt) in controller.pre_questions().iter().enumerate() {
        println!("  {}. {}", i + 1, prompt);
    }
    println!("\n({}  {} to exit)", controller.placeholder(), QUIT_COMMAND);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line == QUIT_COMMAND {
            break;
        }

        let text = expand_prompt(line, controller.pre_questions());
        let before = controller.log().len();
        let outcome = submit_with_indicator(&mut controller, text).await?;
        tracing::debug!(?outcome, "Turn finished");
        if outcome == TurnOutcome::Ignored {
            continue;
        }
        print_agent_messages(&controller, &renderer, before);
    }

    Ok(())
}

async fn run_ask(
    config: &FolioConfig,
    client: &ClientArgs,
    message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = build_controller(config, client)?;
    let outcome = controller.submit(message).await;
    tracing::debug!(?outcome, "Turn finished");

    if let Some(reply) = controller
        .log()
        .last()
        .filter(|m| m.origin() == Origin::Agent)
    {
        println!("{}", TerminalRenderer::new().render(reply.body()));
    }
    Ok(())
}

async fn run_serve(config: &FolioConfig, port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut server = config.server.clone();
    server.port = cli::resolve_port(port, server.port);
    folio_api::start_server(&server).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config = FolioConfig::load_or_default(&config_file);

    // Tracing. --log-level > RUST_LOG > config file.
    let filter = match args.resolve_log_level() {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Folio v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    match args.command {
        Command::Chat(client) => run_chat(&config, &client).await,
        Command::Ask { message, client } => run_ask(&config, &client, &message.join(" ")).await,
        Command::Serve { port } => run_serve(&config, port).await,
    }
}
