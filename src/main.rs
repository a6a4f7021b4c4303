//! Practice CLI
//!
//! Usage:
//!   practice --list                              # Practice catalog
//!   practice --practice breathing                # Guided session in the terminal
//!   practice --practice meditation --autostart   # Start the timer right away
//!   practice --practice breathing --at 25        # Display state 25s in
//!   practice --serve                             # HTTP API server
//!   practice --practice grounding --at 0 --json  # JSON output

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use practice_engine::config::PracticeConfig;
use practice_engine::core::{run_server, PracticeSession, SessionRunner};
use practice_engine::types::{
    Command, CompletionRecord, DisplaySnapshot, PracticeType, SessionEvent,
};
use practice_engine::{GROUNDING_STEP_COUNT, VERSION};

/// Upper bound for `--at` (one hour, well past every timed program)
const MAX_AT_SECS: u32 = 3600;

#[derive(Parser, Debug)]
#[command(
    name = "practice",
    version = VERSION,
    about = "Guided wellness practices - breathing, meditation, muscle relaxation, grounding",
    long_about = "Runs timer-driven guided practices in the terminal or behind an HTTP API.\n\n\
                  Practices:\n  \
                  breathing          - 4-7-8 breathing, 4 cycles (84s)\n  \
                  meditation         - 5-minute meditation with rotating tips\n  \
                  muscle-relaxation  - progressive muscle relaxation, 9 groups (135s)\n  \
                  grounding          - 5-4-3-2-1 grounding, at your own pace\n\n\
                  Interactive commands:\n  \
                  start | pause | reset | next | prev | sound | quit"
)]
struct Args {
    /// Practice to run (breathing, meditation, muscle-relaxation, grounding)
    #[arg(short, long)]
    practice: Option<PracticeType>,

    /// Print the display state after this many seconds instead of running live
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=MAX_AT_SECS as i64))]
    at: Option<u32>,

    /// Grounding step to show with --at (0-based)
    #[arg(long, default_value_t = 0)]
    step: usize,

    /// Start the timer immediately
    #[arg(long)]
    autostart: bool,

    /// List available practices
    #[arg(short, long)]
    list: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (overrides config)
    #[arg(long)]
    addr: Option<String>,

    /// Tick period in milliseconds (overrides config)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(2);
        }
    };
    init_logging(&config.log_filter);

    if args.no_color {
        colored::control::set_override(false);
    }

    if args.list {
        print_catalog(&args);
    } else if args.serve {
        run_serve(config).await;
    } else if let Some(practice) = args.practice {
        match args.at {
            Some(seconds) => run_single(practice, seconds, &args, &config),
            None => run_interactive(practice, &args, &config).await,
        }
    } else {
        print_catalog(&args);
        println!();
        println!("Pick one with --practice <name>");
    }
}

fn load_config(args: &Args) -> practice_engine::Result<PracticeConfig> {
    let mut config = PracticeConfig::load(args.config.as_deref())?;
    if let Some(addr) = &args.addr {
        config.addr = addr.clone();
    }
    if let Some(tick_ms) = args.tick_ms {
        config.tick_interval_ms = tick_ms;
    }
    config.validate()?;
    Ok(config)
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print the catalog
fn print_catalog(args: &Args) {
    let catalog = PracticeType::catalog();
    if args.json {
        match serde_json::to_string_pretty(&catalog) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
        }
        return;
    }

    for entry in catalog {
        let length = entry
            .total_duration_secs
            .map(|secs| format!("{}m {}s", secs / 60, secs % 60))
            .unwrap_or_else(|| "your pace".to_string());
        println!(
            "{} {:<32} {:<18} {}",
            entry.icon,
            entry.title.bold(),
            entry.practice_type.as_str().cyan(),
            length.dimmed()
        );
        println!("   {}", entry.description.dimmed());
    }
}

/// Display state at a fixed point, driven through the controller
fn run_single(practice: PracticeType, seconds: u32, args: &Args, config: &PracticeConfig) {
    let snapshot = snapshot_at(practice, seconds, args.step, config.sound_enabled);
    print_snapshot(&snapshot, args);
}

/// Start, tick `seconds` times (stopping early on completion), walk grounding
/// forward `step` steps, then pause if still running
fn snapshot_at(
    practice: PracticeType,
    seconds: u32,
    step: usize,
    sound_enabled: bool,
) -> DisplaySnapshot {
    let mut session = PracticeSession::with_sound(practice, sound_enabled);
    session.start();
    for _ in 0..seconds {
        if !session.is_active() {
            break;
        }
        let epoch = session.run_epoch();
        session.tick(epoch);
    }
    if !practice.is_timer_driven() {
        for _ in 0..step.min(GROUNDING_STEP_COUNT - 1) {
            session.advance();
        }
    }
    if session.is_active() {
        session.pause();
    }
    session.snapshot().clone()
}

/// Guided session in the terminal
async fn run_interactive(practice: PracticeType, args: &Args, config: &PracticeConfig) {
    print_header(practice);

    let session = PracticeSession::with_sound(practice, config.sound_enabled);
    let mut runner = SessionRunner::with_options(
        "terminal",
        session,
        config.tick_interval(),
        config.event_buffer,
    );
    let mut rx = runner.subscribe();
    print_snapshot(&runner.snapshot().await, args);

    if args.autostart {
        runner.start().await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        if !stdin_open && !runner.is_ticking() {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
                        break;
                    }
                    if line.is_empty() {
                        continue;
                    }
                    match line.parse::<Command>() {
                        Ok(command) => {
                            let (reason, _) = runner.command(command).await;
                            if !reason.is_applied() {
                                println!("  {}", reason.description().yellow());
                            }
                        }
                        Err(message) => println!("  {}", message.yellow()),
                    }
                }
                Ok(None) | Err(_) => stdin_open = false,
            },
            event = rx.recv() => match event {
                Ok(event) => print_event(&event, args),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            },
        }
    }

    while let Ok(event) = rx.try_recv() {
        print_event(&event, args);
    }

    let (time_spent, updates) = {
        let session = runner.session();
        let session = session.lock().await;
        (session.snapshot().time_spent.clone(), session.update_count())
    };
    println!();
    println!("Session ended. Time spent: {} ({} updates)", time_spent, updates);
    runner.close();
}

fn print_header(practice: PracticeType) {
    println!("{}", "========================================".bold());
    println!(
        "  {} {} - practice v{}",
        practice.icon(),
        practice.heading().bold(),
        VERSION
    );
    println!("{}", "========================================".bold());
    if practice.is_timer_driven() {
        println!("Commands: start, pause, reset, sound, quit");
    } else {
        println!("Commands: next, prev, start (track time), reset, quit");
    }
    println!();
}

fn print_event(event: &SessionEvent, args: &Args) {
    match event {
        SessionEvent::Snapshot { snapshot } => print_snapshot(snapshot, args),
        SessionEvent::Completed { record } => print_completion(record, args),
    }
}

fn print_snapshot(snapshot: &DisplaySnapshot, args: &Args) {
    if args.json {
        match serde_json::to_string(snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
        }
    } else if args.no_color {
        println!("{}", snapshot.to_parseable_string());
    } else {
        println!("{}", snapshot.to_terminal_string());
    }
}

fn print_completion(record: &CompletionRecord, args: &Args) {
    if args.json {
        if let Ok(json) = serde_json::to_string(record) {
            println!("{}", json);
        }
        return;
    }
    println!();
    println!("  {}", "✓ Practice Complete!".green().bold());
    println!(
        "  Great job! You've completed the {}.",
        record.practice.title().to_lowercase()
    );
    println!(
        "  Time spent: {}m {}s",
        record.elapsed_seconds / 60,
        record.elapsed_seconds % 60
    );
    println!("  Type 'reset' to practice again.");
}

/// Run HTTP API server
async fn run_serve(config: PracticeConfig) {
    println!();
    println!("{}", "Practice API Server".bold());
    println!("Version: {}", VERSION);
    println!();

    if let Err(e) = run_server(config).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
