use std::fmt;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{PracticeCard, PracticeService, PracticeStats, SessionId, TableSource};
use storage::Storage;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_FILE: &str = "Chinese practice homework_250503.xlsx";
const FILE_ENV: &str = "PRACTICE_FILE";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidCount { raw: String },
    EmptyFile,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidCount { raw } => write!(f, "invalid --count value: {raw}"),
            ArgsError::EmptyFile => write!(f, "--file must not be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    practice_service: Arc<PracticeService>,
    file: PathBuf,
    session: SessionId,
}

impl UiApp for DesktopApp {
    fn practice_service(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice_service)
    }

    fn default_source(&self) -> TableSource {
        TableSource::path(self.file.clone())
    }

    fn session_id(&self) -> SessionId {
        self.session
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    file: PathBuf,
    count: usize,
    json: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui   [--file <xlsx>]");
    eprintln!("  cargo run -p app -- info [--file <xlsx>]");
    eprintln!("  cargo run -p app -- draw [--file <xlsx>] [--count <n>] [--json]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --file \"{DEFAULT_FILE}\"");
    eprintln!("  --count 1");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {FILE_ENV}, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Info,
    Draw,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "info" => Some(Self::Info),
            "draw" => Some(Self::Draw),
            _ => None,
        }
    }
}

impl Args {
    /// `env_file` is the value of `PRACTICE_FILE`, if set.
    fn parse(
        cmd: Command,
        args: &mut impl Iterator<Item = String>,
        env_file: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut file = env_file
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_FILE), PathBuf::from);
        let mut count = 1;
        let mut json = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--file" => {
                    let value = require_value(args, "--file")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::EmptyFile);
                    }
                    file = PathBuf::from(value);
                }
                "--count" if cmd == Command::Draw => {
                    let value = require_value(args, "--count")?;
                    count = value
                        .parse::<usize>()
                        .ok()
                        .filter(|count| *count > 0)
                        .ok_or(ArgsError::InvalidCount { raw: value })?;
                }
                "--json" if cmd == Command::Draw => json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { file, count, json })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr so `draw` output stays clean on stdout.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn render_card(card: &PracticeCard) -> String {
    let mut out = String::new();
    for field in &card.fields {
        let _ = writeln!(out, "{}: {}", field.column, field.value);
    }
    let _ = writeln!(out, "{}", card.position_label());
    out
}

fn render_stats(stats: &PracticeStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total Practices: {}", stats.practice_count);
    let _ = writeln!(out, "Coverage: {:.1}%", stats.coverage_percent());
    let _ = writeln!(
        out,
        "You've practiced {} out of {} unique sentences",
        stats.seen, stats.total
    );
    out
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter, std::env::var(FILE_ENV).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    let storage = Storage::spreadsheets();
    let service = Arc::new(PracticeService::from_storage(&storage));
    let source = TableSource::path(parsed.file.clone());
    tracing::debug!(event = "startup", command = ?cmd, file = %parsed.file.display());

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                practice_service: service,
                file: parsed.file,
                session: SessionId::new(),
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Chinese Practice")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Info => {
            let loaded = service.load_table(&source)?;
            let info = service.table_info(&loaded);
            println!("Source: {}", info.source);
            println!("Total rows: {}", info.total_rows);
            println!("Columns: {}", info.columns_label());
            Ok(())
        }
        Command::Draw => {
            let loaded = service.load_table(&source)?;
            let session = SessionId::new();
            for _ in 0..parsed.count {
                let card = service.draw(session, &loaded).await?;
                if parsed.json {
                    println!("{}", serde_json::to_string(&card)?);
                } else {
                    println!("{}", render_card(&card));
                }
            }
            let stats = service.stats(session, &loaded).await?;
            if parsed.json {
                println!("{}", serde_json::to_string(&stats)?);
            } else {
                print!("{}", render_stats(&stats));
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
