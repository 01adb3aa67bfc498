//! HEALIX: offline-first symptom triage CLI
//!
//! Talks to the configured hosted models when it can and falls back to the
//! built-in rule engine when it cannot. Emergency phrases are caught before
//! anything leaves the machine.
//!
//! Usage:
//!   healix chat I have had a fever since yesterday
//!   healix --offline repl
//!   healix interactions --current Warfarin Lisinopril --new Ibuprofen
//!   healix scan I have chest pain
//!   healix symptom headache
//!   healix analyze-report lab-results.txt
//!   healix tone This is probably a common cold

use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use healix_config::{HealixConfig, RevealStyle};
use healix_contracts::{
    error::HealixResult,
    message::{Notification, NotificationKind},
    result::{AnalysisResult, ChatResult, InteractionResult},
};
use healix_core::{
    traits::{ChatBackend, EmergencyDetector},
    Consultation,
};
use healix_llm::ChatCompletionsClient;
use healix_triage::{classify_tone, quick_check, EmergencyScanner, RevealMode, TriageEngine};

// ── CLI definition ────────────────────────────────────────────────────────────

/// HEALIX: symptom triage with an offline fallback.
#[derive(Parser, Debug)]
#[command(
    name = "healix",
    about = "HEALIX symptom triage assistant",
    long_about = "Answers symptom questions through hosted chat models when available\n\
                  and through the built-in rule engine otherwise."
)]
struct Cli {
    /// TOML configuration file. Built-in defaults apply when omitted.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Never contact a hosted model.
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask one question and print the reply.
    Chat {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Interactive consultation. `/export <path>` saves the transcript, `/quit` exits.
    Repl,
    /// Check a new medication against the ones already taken.
    Interactions {
        #[arg(long, num_args = 1.., value_name = "MED")]
        current: Vec<String>,
        #[arg(long, value_name = "MED")]
        new: String,
    },
    /// Check text for emergency phrases without asking anything.
    Scan {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Look one symptom up in the offline dictionary.
    Symptom { key: String },
    /// Analyze the text of a medical report.
    AnalyzeReport { file: PathBuf },
    /// Classify the tone of a reply.
    Tone {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("healix: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> HealixResult<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Chat { text } => {
            let mut session = build_session(&config, cli.offline);
            chat_turn(&mut session, &text.join(" "), &mut io::stdout())?;
            print_notifications(session.take_notifications());
            Ok(())
        }
        Command::Repl => repl(build_session(&config, cli.offline)),
        Command::Interactions { current, new } => {
            let mut session = build_session(&config, cli.offline);
            let result = session.check_interactions(&current, &new);
            print_notifications(session.take_notifications());
            match result? {
                InteractionResult::Remote { content, model } => {
                    println!("{}", content);
                    info!(model = %model, "interaction check answered remotely");
                }
                InteractionResult::Offline { report } => println!("{}", report.summary),
            }
            Ok(())
        }
        Command::Scan { text } => {
            let scanner = scanner_for(&config);
            match scanner.scan(&text.join(" ")) {
                Some(alert) => {
                    println!("EMERGENCY ({:?}): {}", alert.level, alert.message);
                    if let Some(number) = alert.dial_number() {
                        println!("Call {} now. Auto-dial in {}s.", number, alert.countdown);
                    }
                }
                None => println!("No emergency phrases detected."),
            }
            Ok(())
        }
        Command::Symptom { key } => {
            let check = quick_check(&key);
            println!("{}", check.key);
            for condition in &check.conditions {
                println!(
                    "  - {} ({} confidence, ~{}%, {})",
                    condition.name, condition.confidence, condition.probability, condition.severity
                );
            }
            println!("Advice: {}", check.advice);
            if !check.emergency_flags.is_empty() {
                println!("Seek urgent care for: {}", check.emergency_flags.join(", "));
            }
            Ok(())
        }
        Command::AnalyzeReport { file } => {
            let text = std::fs::read_to_string(&file)?;
            let mut session = build_session(&config, cli.offline);
            let result = session.analyze_report(&text);
            print_notifications(session.take_notifications());
            match result? {
                AnalysisResult::Remote { summary, .. } => println!("{}", summary),
                AnalysisResult::Offline { analysis } => {
                    let generated = Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
                    println!("{}", analysis.render(&generated));
                }
            }
            Ok(())
        }
        Command::Tone { text } => {
            println!("{}", classify_tone(&text.join(" ")));
            Ok(())
        }
    }
}

// ── Wiring ────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> HealixResult<HealixConfig> {
    match path {
        Some(path) => HealixConfig::from_file(path),
        None => Ok(HealixConfig::default()),
    }
}

fn scanner_for(config: &HealixConfig) -> EmergencyScanner {
    EmergencyScanner::new(config.emergency.number.clone(), config.emergency.countdown_secs)
}

fn engine_for(config: &HealixConfig) -> TriageEngine {
    let mode = match config.reveal.mode {
        RevealStyle::Words => RevealMode::Words,
        RevealStyle::Chars => RevealMode::Chars(config.reveal.chars_per_frame),
    };
    TriageEngine::new(config.emergency.number.clone())
        .with_reveal(mode, Duration::from_millis(config.reveal.frame_delay_ms))
}

/// Build the backend list. Providers without a usable key are skipped so
/// a missing key degrades to offline answers rather than an error.
fn backends_for(config: &HealixConfig, offline: bool) -> Vec<Box<dyn ChatBackend>> {
    if offline {
        return Vec::new();
    }

    let mut backends: Vec<Box<dyn ChatBackend>> = Vec::new();
    for provider in &config.providers {
        match ChatCompletionsClient::from_provider(provider) {
            Ok(client) => backends.push(Box::new(client)),
            Err(e) => warn!(provider = %provider.name, error = %e, "skipping provider"),
        }
    }
    backends
}

fn build_session(config: &HealixConfig, offline: bool) -> Consultation {
    Consultation::new(
        backends_for(config, offline),
        Box::new(engine_for(config)),
        Box::new(scanner_for(config)),
    )
}

// ── Chat ──────────────────────────────────────────────────────────────────────

/// Writes streamed frames to `out`, printing only what is new.
///
/// Frames are accumulated prefixes. A frame that does not extend what was
/// already printed (a backend failed midway and the fallback took over)
/// starts on a fresh line.
struct StreamPrinter<W: Write> {
    out: W,
    printed: String,
}

impl<W: Write> StreamPrinter<W> {
    fn new(out: W) -> Self {
        Self { out, printed: String::new() }
    }

    fn update(&mut self, frame: &str) {
        let written = match frame.strip_prefix(self.printed.as_str()) {
            Some(rest) => write!(self.out, "{}", rest),
            None => write!(self.out, "\n{}", frame),
        };
        if written.and_then(|()| self.out.flush()).is_ok() {
            self.printed = frame.to_string();
        }
    }
}

fn chat_turn<W: Write>(session: &mut Consultation, text: &str, out: W) -> HealixResult<ChatResult> {
    let mut printer = StreamPrinter::new(out);
    let result = session.send(text, &mut |frame: &str| printer.update(frame))?;

    match &result {
        ChatResult::Emergency { message, alert } => {
            printer.update(&message.content);
            if let Some(number) = alert.dial_number() {
                printer.update(&format!(
                    "{}\nCall {} now. Auto-dial in {}s.",
                    message.content, number, alert.countdown
                ));
            }
        }
        ChatResult::Remote { message, .. } | ChatResult::Fallback { message, .. } => {
            printer.update(&message.content);
        }
    }
    writeln!(printer.out)?;

    if let ChatResult::Fallback { reason, .. } = &result {
        info!(reason = %reason, "answered offline");
    }
    Ok(result)
}

fn repl(mut session: Consultation) -> HealixResult<()> {
    println!("HEALIX consultation. Describe your symptoms; /export <path> saves, /quit exits.");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let input = line.trim();

        match input {
            "" => continue,
            "/quit" | "/exit" => break,
            "/clear" => {
                session.clear();
                println!("Conversation cleared.");
            }
            _ if input.starts_with("/export") => {
                let path = input.trim_start_matches("/export").trim();
                if path.is_empty() {
                    println!("usage: /export <path>");
                    continue;
                }
                std::fs::write(path, session.export_transcript())?;
                println!("Transcript saved to {}", path);
            }
            _ => {
                if let Err(e) = chat_turn(&mut session, input, io::stdout()) {
                    eprintln!("healix: {}", e);
                }
                print_notifications(session.take_notifications());
            }
        }
    }
    Ok(())
}

fn print_notifications(notifications: Vec<Notification>) {
    for n in notifications {
        let tag = match n.kind {
            NotificationKind::Info => "info",
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
        };
        eprintln!("[{}] {}", tag, n.message);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
