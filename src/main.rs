use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use toolgen::{chat, generator, pysrc, schema};

#[derive(Parser)]
#[command(name = "toolgen")]
#[command(
    version,
    about = "Generate tool-use JSON schemas from Python function definitions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct GenerateArgs {
    /// Path to the Python source file
    path: PathBuf,
    /// Function to generate a schema for (defaults to the first definition)
    function: Option<String>,
    /// Write the schema to a file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Check the generated schema and exit non-zero if the check fails
    #[arg(long)]
    validate: bool,
    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

#[derive(Args, Clone)]
struct ChatArgs {
    /// Model to use
    #[arg(long, default_value = chat::DEFAULT_MODEL)]
    model: String,
    /// Maximum tokens in each response
    #[arg(long, default_value_t = chat::DEFAULT_MAX_TOKENS)]
    max_tokens: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a tool schema from a function in a Python file
    Generate(GenerateArgs),
    /// List function definitions found in a Python file
    List {
        /// Path to the Python source file
        path: PathBuf,
    },
    /// Start an interactive chat session
    Chat(ChatArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::List { path } => run_list(path),
        Commands::Chat(args) => run_chat(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let source = fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;

    let tool_schema = match &args.function {
        Some(name) => {
            eprintln!("Generating schema for {name}...");
            generator::generate_for_function(&source, name)?
        }
        None => generator::generate_from_source(&source)?,
    };

    if args.validate {
        let value = serde_json::to_value(&tool_schema)?;
        let ok = schema::validate(&value);
        eprintln!("Schema validation: {}", if ok { "PASSED" } else { "FAILED" });
        if !ok {
            process::exit(1);
        }
    }

    let rendered = if args.compact {
        serde_json::to_string(&tool_schema)?
    } else {
        serde_json::to_string_pretty(&tool_schema)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Schema written to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn run_list(path: PathBuf) -> Result<()> {
    let source = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let defs = pysrc::parse_module(&source);
    if defs.is_empty() {
        anyhow::bail!("no function definitions found in {}", path.display());
    }

    println!("Functions in {}:", path.display());
    for def in defs {
        println!("  - {}", def.name);
    }
    Ok(())
}

fn run_chat(args: ChatArgs) -> Result<()> {
    let api_key = std::env::var("ANTHROPIC_API_KEY")
        .context("ANTHROPIC_API_KEY not found in environment variables")?;
    let client = chat::ChatClient::new(api_key);
    let mut messages: Vec<chat::Message> = Vec::new();

    println!("Interactive chat ({})", args.model);
    println!("Type 'quit', 'exit', or 'bye' to end the conversation");
    println!("Type 'history' to see the transcript, 'clear' to start over");

    let stdin = io::stdin();
    loop {
        print!("You: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        match input {
            "quit" | "exit" | "bye" => break,
            "history" => {
                for message in &messages {
                    println!("{}: {}", message.role.as_str(), message.content);
                }
                continue;
            }
            "clear" => {
                messages.clear();
                println!("Conversation cleared.");
                continue;
            }
            _ => {}
        }

        chat::push_user(&mut messages, input);
        match client.send(&args.model, args.max_tokens, &messages) {
            Ok(reply) => {
                println!("Assistant: {reply}");
                chat::push_assistant(&mut messages, reply);
            }
            Err(err) => {
                eprintln!("chat error: {err}");
                // Drop the failed turn so the transcript stays consistent.
                messages.pop();
            }
        }
    }
    Ok(())
}
