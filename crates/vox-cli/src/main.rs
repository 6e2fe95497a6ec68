//! vox - voice-driven email assistant CLI

mod config;
mod gmail;
mod speech;
mod tools;
mod utils;

use clap::Parser;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::broadcast;
use vox_agent::{Agent, AgentEvent, ProviderModel};
use vox_ai::Model;

use gmail::GmailClient;
use speech::SpeechBoundary;

/// Corrected inputs that end the session
const EXIT_PHRASES: [&str; 4] = ["exit", "quit", "stop", "goodbye"];
const FAREWELL: &str = "Goodbye!";

/// Whether a corrected input asks to end the session. Exact match only,
/// case-insensitive.
fn is_exit_phrase(corrected: &str) -> bool {
    EXIT_PHRASES.contains(&corrected.to_lowercase().as_str())
}

/// vox - voice-driven email assistant
#[derive(Parser, Debug)]
#[command(name = "vox")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Model to use (default: gemini-1.5-flash)
    #[arg(short, long)]
    model: Option<String>,

    /// Provider (google, openai)
    #[arg(short, long)]
    provider: Option<String>,

    /// Always read typed commands, never prompt for voice
    #[arg(short, long)]
    text: bool,

    /// Run a single command non-interactively and exit
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

fn get_model(provider: &str, model_id: &str) -> Model {
    match provider {
        "openai" => Model::openai(model_id),
        _ => Model::gemini(model_id),
    }
}

fn default_model_id(provider: &str) -> &'static str {
    match provider {
        "openai" => "gpt-4o-mini",
        _ => "gemini-1.5-flash",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Setup tracing
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("vox=debug,vox_agent=debug,vox_ai=debug")
            .init();
    }

    // Initialize config and exit
    if args.init_config {
        match config::Config::init() {
            Ok(path) => {
                println!("Config file created at: {}", path.display());
                println!("\nExample config:\n{}", config::example_config());
            }
            Err(e) => {
                eprintln!("Error creating config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    // Load config file
    let cfg = config::Config::load();

    // Merge config with CLI args (CLI takes precedence)
    let provider = args
        .provider
        .or(cfg.provider.clone())
        .unwrap_or_else(|| "google".to_string());

    let model_id = args
        .model
        .or(cfg.model.clone())
        .unwrap_or_else(|| default_model_id(&provider).to_string());

    let model = get_model(&provider, &model_id);

    // Check for API key (config or env)
    let Some(api_key) = cfg.get_api_key(&provider) else {
        let api_key_var = match provider.as_str() {
            "openai" => "OPENAI_API_KEY",
            _ => "GOOGLE_API_KEY",
        };
        eprintln!("Error: No API key found for {}", provider);
        eprintln!("Set your API key with: export {}=your-key", api_key_var);
        eprintln!("Or add it to config file: vox --init-config");
        std::process::exit(1);
    };

    // Check for Gmail access
    let Some(access_token) = cfg.gmail_access_token() else {
        eprintln!("Error: No Gmail access token found");
        eprintln!("Set it with: export GMAIL_ACCESS_TOKEN=your-token");
        eprintln!("Or add it to config file: vox --init-config");
        std::process::exit(1);
    };

    let handle = Arc::new(ProviderModel::new(model, api_key));
    let gmail = Arc::new(GmailClient::new(access_token));
    let agent = Agent::new(handle, tools::email_registry(gmail));

    let speech = SpeechBoundary::new(&cfg.speech);
    let text_only = args.text || cfg.text_only.unwrap_or(false);

    // Non-interactive mode
    if let Some(command) = args.command {
        return run_command(&agent, &command).await;
    }

    run_interactive(&agent, &speech, text_only).await
}

async fn run_command(agent: &Agent, command: &str) -> anyhow::Result<()> {
    println!("vox> {}", command);
    println!();

    let printer = spawn_event_printer(agent.subscribe());
    match agent.run_cycle(command).await {
        Ok(cycle) => {
            let _ = printer.await;
            println!("\n{}", cycle.final_response);
            Ok(())
        }
        Err(e) => {
            // A failed cycle never reaches its terminal event.
            printer.abort();
            Err(e.into())
        }
    }
}

async fn run_interactive(
    agent: &Agent,
    speech: &SpeechBoundary,
    text_only: bool,
) -> anyhow::Result<()> {
    println!("Plan-and-execute email assistant is running!");
    println!("{}", "=".repeat(50));

    loop {
        let Some(input) = read_input(speech, text_only).await? else {
            // EOF
            break;
        };

        let printer = spawn_event_printer(agent.subscribe());
        let cycle = match agent.run_cycle(&input).await {
            Ok(cycle) => {
                let _ = printer.await;
                cycle
            }
            Err(e) => {
                // A failed cycle never reaches its terminal event.
                printer.abort();
                eprintln!("Error: {}", e);
                continue;
            }
        };

        println!("\n{}", cycle.final_response);
        speech.speak(&cycle.final_response).await;

        if is_exit_phrase(&cycle.corrected_input) {
            println!("{}", FAREWELL);
            speech.speak(FAREWELL).await;
            break;
        }

        println!();
    }

    Ok(())
}

/// Read one command, prompting for voice or text per the session settings.
async fn read_input(speech: &SpeechBoundary, text_only: bool) -> io::Result<Option<String>> {
    if text_only || !speech.can_transcribe() {
        return read_line("Please type your command: ");
    }

    let Some(choice) = read_line("Choose input method:\n[1] Voice Command\n[2] Text Command\n> ")?
    else {
        return Ok(None);
    };

    if choice == "2" {
        return read_line("Please type your command: ");
    }

    println!("\nSay something!");
    Ok(Some(speech.transcribe().await))
}

fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

/// Print cycle progress until the terminal event arrives.
fn spawn_event_printer(mut receiver: broadcast::Receiver<AgentEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Ok(event) = receiver.recv().await {
            if event.is_terminal() {
                break;
            }
            match event {
                AgentEvent::InputCorrected { text } => {
                    if !text.is_empty() {
                        println!("Heard: {}", text);
                    }
                }
                AgentEvent::PlanCreated { steps } => {
                    println!("Plan created:");
                    for (i, step) in steps.iter().enumerate() {
                        println!(
                            "  {}. {}({})",
                            i + 1,
                            step.tool_name,
                            serde_json::Value::Object(step.tool_kwargs.clone())
                        );
                    }
                }
                AgentEvent::StepStart { tool_name, .. } => {
                    println!("[Running {}...]", tool_name);
                }
                AgentEvent::StepEnd {
                    tool_name,
                    result,
                    is_error,
                } => {
                    if is_error {
                        println!("[{} failed: {}]", tool_name, result);
                    } else {
                        let preview = crate::utils::truncate_chars(&result, 200);
                        println!("[{}: {}]", tool_name, preview);
                    }
                }
                AgentEvent::Error { message } => {
                    eprintln!("Error: {}", message);
                }
                _ => {}
            }
        }
    })
}
