use std::fmt;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::AggregateStats;
use services::{AppServices, QuestionSource};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Parser)]
#[command(version, about = "Multiple-choice quiz trainer", long_about = None)]
struct Cli {
    /// SQLite database holding per-question results.
    #[arg(
        long = "db",
        env = "QUIZ_DB_URL",
        default_value = "sqlite://quiz.sqlite3",
        global = true
    )]
    db_url: String,

    /// Question list to start with: a file path or an http(s) URL.
    #[arg(
        long,
        env = "QUIZ_QUESTIONS",
        default_value = "questions.json",
        global = true
    )]
    questions: QuestionSource,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Command {
    /// Open the quiz window (default).
    Ui,
    /// Print accuracy statistics and exit.
    Stats,
    /// Delete every saved result and exit.
    Reset,
}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "app=info,ui=info,services=info,storage=info,quiz_core=info".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn print_stats(stats: &AggregateStats) {
    if stats.is_empty() {
        println!("No statistics yet.");
        return;
    }

    println!(
        "Questions: {}  Attempts: {}  Correct: {}  Incorrect: {}  Accuracy: {}%",
        stats.total_questions,
        stats.total_attempts,
        stats.total_correct,
        stats.total_incorrect,
        stats.accuracy
    );
    for question in &stats.questions {
        println!(
            "  Question {:>4}  {:>3} correct  {:>3} incorrect  {}% ({})",
            question.question_index.ordinal(),
            question.correct_count,
            question.incorrect_count,
            question.accuracy,
            question.tier().as_str()
        );
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Ui);

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    let db_url = normalize_sqlite_url(&cli.db_url);
    prepare_sqlite_file(&db_url)?;
    tracing::info!(%db_url, questions = %cli.questions, ?command, "starting");
    let services = AppServices::new_sqlite(&db_url, Some(cli.questions)).await?;

    match command {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(services);
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Quiz")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Stats => {
            let stats = services.stats().load_stats().await?;
            print_stats(&stats);
            Ok(())
        }
        Command::Reset => {
            services.stats().clear_all().await?;
            println!("All saved results were cleared.");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
