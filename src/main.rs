use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use sayform::command::{CommandExtractor, KeywordRegistry};
use sayform::config::Config;
use sayform::dispatch::DispatchTable;
use sayform::recognize::{best_transcript, RecognizeClient};

#[derive(Parser)]
#[command(name = "sayform", about = "Voice command extraction for forms")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, default_value = "sayform.toml")]
    config: PathBuf,

    /// Extra slot name (repeatable), merged with slot_names from config
    #[arg(long = "slot")]
    slots: Vec<String>,

    /// Log classification decisions to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract a command structure from a transcript
    Parse {
        /// The transcript words
        transcript: Vec<String>,
    },
    /// Read transcripts from stdin, one per line, and dispatch them
    Repl,
    /// Send an audio file to the recognition service, then extract
    Recognize {
        /// Raw LINEAR16 audio file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("reading config {:?}", cli.config))?;

    let mut slot_names = config.slot_names.clone();
    slot_names.extend(cli.slots.iter().cloned());

    let registry = KeywordRegistry::builder().slot_names(slot_names).build();
    let extractor = CommandExtractor::new(registry).with_verbose(cli.verbose);

    match cli.command {
        Command::Parse { transcript } => {
            let transcript = transcript.join(" ");
            match extractor.extract(&transcript) {
                Ok(cmd) => println!("{}", cmd),
                Err(rejection) => {
                    eprintln!("rejected: {}", rejection);
                    std::process::exit(1);
                }
            }
        }
        Command::Repl => run_repl(&extractor)?,
        Command::Recognize { file } => {
            let Some(api_key) = config.api_key() else {
                bail!("an API key is required; set api_key in the config or SAYFORM_API_KEY");
            };
            let audio = std::fs::read(&file).with_context(|| format!("reading {:?}", file))?;
            let client = RecognizeClient::new(&api_key)
                .with_language(&config.language_code)
                .with_sample_rate(config.sample_rate_hz);
            let alternatives = client.recognize(&audio)?;
            if cli.verbose {
                for alt in &alternatives {
                    eprintln!("[STT] {:.2} \"{}\"", alt.confidence, alt.transcript);
                }
            }
            let transcript = best_transcript(&alternatives)
                .context("recognition returned no transcript")?;
            println!("transcript: {}", transcript);
            match extractor.extract(transcript) {
                Ok(cmd) => println!("{}", cmd),
                Err(rejection) => {
                    eprintln!("rejected: {}", rejection);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Interactive loop with a demo dispatch table that prints what a form
/// application would do with each command
fn run_repl(extractor: &CommandExtractor) -> Result<()> {
    let mut table = DispatchTable::new();
    table.register("focus", |slot, _| {
        println!("-> focus input \"{}\"", slot);
    });
    table.register("fill", |slot, payload| {
        println!("-> fill input \"{}\" with \"{}\"", slot, payload.unwrap_or(""));
    });
    table.register("clear", |slot, _| {
        println!("-> clear input \"{}\"", slot);
    });

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("> ");
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            match extractor.extract(line) {
                Ok(cmd) => {
                    println!("{}", cmd);
                    if let Err(e) = table.dispatch(&cmd) {
                        eprintln!("{}", e);
                    }
                }
                Err(rejection) => eprintln!("rejected: {}", rejection),
            }
        }
        print!("> ");
        stdout.flush()?;
    }
    Ok(())
}
