use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use prakriti_core::model::{
    AnswerSheet, FollowUpDraft, Gender, QuestionBank, Registration,
};
use services::{
    AccountService, AdminService, AppServices, AssessmentService, Clock, ExportService,
    FollowUpService, Session, SettingsService,
};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
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
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn accounts(&self) -> Arc<AccountService> {
        self.services.accounts()
    }

    fn assessments(&self) -> Arc<AssessmentService> {
        self.services.assessments()
    }

    fn follow_ups(&self) -> Arc<FollowUpService> {
        self.services.follow_ups()
    }

    fn admin(&self) -> Arc<AdminService> {
        self.services.admin()
    }

    fn settings(&self) -> Arc<SettingsService> {
        self.services.settings()
    }

    fn export(&self) -> Arc<ExportService> {
        self.services.export()
    }
}

struct Args {
    db_url: String,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui   [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- seed [--db <sqlite_url>]  # demo users and results");
    eprintln!();
    eprintln!("Defaults for ui:");
    eprintln!("  --db sqlite:wellness.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PRAKRITI_DB_URL");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("PRAKRITI_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://wellness.sqlite3".into(), normalize_sqlite_url);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
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

    if matches!(cmd, Command::Ui | Command::Seed) && !argv.is_empty() && !argv[0].starts_with("--")
    {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so
    // core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(&parsed.db_url, Clock::default()).await?;

    match cmd {
        Command::Ui => {
            let app = DesktopApp { services };
            let context = build_app_context(&(Arc::new(app) as Arc<dyn UiApp>));

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("AyurVeda Wellness")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Seed => seed_demo_data(&services).await,
    }
}

/// Insert a handful of demo users with results and follow-ups so the
/// admin dashboard has something to show.
async fn seed_demo_data(services: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let accounts = services.accounts();
    let assessments = services.assessments();
    let follow_ups = services.follow_ups();

    let demo = [
        ("Asha Nair", "asha@example.com", 34, Gender::Female, "Teacher", "Pune", 0),
        ("Arjun Mehta", "arjun@example.com", 41, Gender::Male, "Chef", "Jaipur", 1),
        ("Lata Deshpande", "lata@example.com", 29, Gender::Female, "Writer", "Indore", 2),
    ];

    let bank = QuestionBank::builtin();
    for (name, email, age, gender, occupation, location, choice) in demo {
        let session = match accounts
            .register(Registration {
                name: name.into(),
                email: email.into(),
                credential: "wellness123".into(),
                age,
                gender,
                occupation: occupation.into(),
                location: location.into(),
            })
            .await
        {
            Ok(session) => session,
            Err(services::AccountError::EmailTaken) => {
                eprintln!("seed: {email} already exists, skipping");
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        let Session::User(user) = session else {
            continue;
        };

        let mut answers = AnswerSheet::new();
        for question in bank.questions() {
            answers.select(question.id(), choice);
        }
        assessments.complete(user.id(), &answers).await?;

        follow_ups
            .submit(
                user.id(),
                FollowUpDraft {
                    improvements: vec!["settling into the routine".into()],
                    energy: 6,
                    sleep: 6,
                    digestion: 7,
                    notes: "first week on the plan".into(),
                    ..FollowUpDraft::default()
                },
            )
            .await?;

        eprintln!("seed: created {email}");
    }

    eprintln!("seed: done (sign in with any demo email / wellness123)");
    Ok(())
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

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
