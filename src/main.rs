//! Masjid Admin CLI
//!
//! Drives the dashboard backend from a terminal using the same client and
//! session layer as the dashboard pages.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use masjid_admin::config::{self, Config};
use masjid_admin::records::{
    Agenda, Announcement, Article, ContentSlide, Expenditure, GalleryItem, Pengurus, Quote,
    RecordId, RunningText, SpecialEvent, User, ZisEntry,
};
use masjid_admin::resources::PeriodFilter;
use masjid_admin::{
    monthly_report, ApiError, FileStorage, MasjidApi, MemoryNavigator, Resource, RoutePolicy,
    Session, Toggle,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Location reported to the client. Outside the gated prefix, so a 401
/// clears the session without a redirect.
const CLI_PATH: &str = "/cli";

#[derive(Parser, Debug)]
#[command(name = "masjid-admin")]
#[command(about = "Manage mosque dashboard content from the command line")]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Backend origin (overrides config and MASJID_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Session file (overrides config)
    #[arg(long)]
    session_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in and store the token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        name: String,
    },
    /// Forget the stored token
    Logout,
    /// Show the signed-in user
    Whoami {
        /// Ask the backend instead of the cached copy
        #[arg(long)]
        refresh: bool,
    },
    /// List records
    List {
        kind: ResourceKind,
        /// List filter as JSON, e.g. '{"active_only": true}'
        #[arg(long)]
        filter: Option<String>,
    },
    /// Create a record from a JSON form
    Create {
        kind: ResourceKind,
        #[arg(long)]
        data: String,
    },
    /// Partially update a record; only the given fields change
    Update {
        kind: ResourceKind,
        id: String,
        #[arg(long)]
        data: String,
    },
    /// Delete a record
    Delete { kind: ResourceKind, id: String },
    /// Set the active/published flag
    Toggle {
        kind: ResourceKind,
        id: String,
        #[arg(long, action = clap::ArgAction::Set)]
        active: bool,
    },
    /// Upload a file and print its URL
    Upload { path: PathBuf },
    /// Show a settings record
    Get { setting: SettingKind },
    /// Patch a settings record with JSON fields
    Set {
        setting: SettingKind,
        #[arg(long)]
        data: String,
    },
    /// Push finance data to Google Sheets
    Sync,
    /// Dashboard counters
    Stats,
    /// ZIS totals per type for a month
    ZisSummary {
        #[arg(long)]
        month: u32,
        #[arg(long)]
        year: i32,
    },
    /// Monthly ZIS income against expenditure
    Report {
        #[arg(long)]
        month: u32,
        #[arg(long)]
        year: i32,
    },
    /// Prayer schedule for a day, or a whole month with --month/--year
    PrayerTimes {
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
        #[arg(long, requires = "year")]
        month: Option<u32>,
        #[arg(long, requires = "month")]
        year: Option<i32>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ResourceKind {
    Agenda,
    Announcements,
    Articles,
    Gallery,
    Pengurus,
    Quotes,
    RunningText,
    SpecialEvents,
    Content,
    Zis,
    Expenditures,
    Users,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SettingKind {
    Identity,
    Prayer,
    Layout,
    Qris,
    Sheets,
}

/// Run `$body` with `$ty` bound to the record type behind `$kind`.
macro_rules! with_resource {
    ($kind:expr, $ty:ident => $body:expr) => {
        match $kind {
            ResourceKind::Agenda => { type $ty = Agenda; $body }
            ResourceKind::Announcements => { type $ty = Announcement; $body }
            ResourceKind::Articles => { type $ty = Article; $body }
            ResourceKind::Gallery => { type $ty = GalleryItem; $body }
            ResourceKind::Pengurus => { type $ty = Pengurus; $body }
            ResourceKind::Quotes => { type $ty = Quote; $body }
            ResourceKind::RunningText => { type $ty = RunningText; $body }
            ResourceKind::SpecialEvents => { type $ty = SpecialEvent; $body }
            ResourceKind::Content => { type $ty = ContentSlide; $body }
            ResourceKind::Zis => { type $ty = ZisEntry; $body }
            ResourceKind::Expenditures => { type $ty = Expenditure; $body }
            ResourceKind::Users => { type $ty = User; $body }
        }
    };
}

/// Like `with_resource!`, restricted to records with an active flag.
macro_rules! with_toggle {
    ($kind:expr, $ty:ident => $body:expr) => {
        match $kind {
            ResourceKind::Agenda => { type $ty = Agenda; $body }
            ResourceKind::Announcements => { type $ty = Announcement; $body }
            ResourceKind::Articles => { type $ty = Article; $body }
            ResourceKind::Gallery => { type $ty = GalleryItem; $body }
            ResourceKind::Pengurus => { type $ty = Pengurus; $body }
            ResourceKind::Quotes => { type $ty = Quote; $body }
            ResourceKind::RunningText => { type $ty = RunningText; $body }
            ResourceKind::SpecialEvents => { type $ty = SpecialEvent; $body }
            ResourceKind::Content => { type $ty = ContentSlide; $body }
            ResourceKind::Users => { type $ty = User; $body }
            other @ (ResourceKind::Zis | ResourceKind::Expenditures) => {
                Err(anyhow!("{:?} records have no active flag", other))
            }
        }
    };
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "masjid_admin=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(Args::parse()).await {
        match e.downcast_ref::<ApiError>() {
            Some(api_error) => eprintln!("{}", api_error.user_message()),
            None => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = config::load_config().context("Failed to load configuration")?;
    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
    }
    if let Some(session_file) = args.session_file {
        config.session_file = Some(session_file);
    }
    tracing::debug!(?config, "Configuration loaded");

    let api = connect(&config)?;

    match args.command {
        Commands::Login { username, password } => {
            let user = api.auth().login(&username, &password).await?;
            print_json(&user)
        }
        Commands::Register {
            username,
            password,
            name,
        } => {
            let user = api.auth().register(&username, &password, &name).await?;
            print_json(&user)
        }
        Commands::Logout => {
            api.auth().logout();
            Ok(())
        }
        Commands::Whoami { refresh } => {
            let user = if refresh {
                Some(api.auth().me().await?)
            } else {
                api.session().user()
            };
            match user {
                Some(user) => print_json(&user),
                None => Err(anyhow!("Not logged in")),
            }
        }
        Commands::List { kind, filter } => {
            with_resource!(kind, R => list::<R>(&api, filter.as_deref()).await)
        }
        Commands::Create { kind, data } => {
            with_resource!(kind, R => create::<R>(&api, &data).await)
        }
        Commands::Update { kind, id, data } => {
            with_resource!(kind, R => update::<R>(&api, &RecordId::from(id), &data).await)
        }
        Commands::Delete { kind, id } => {
            with_resource!(kind, R => delete::<R>(&api, &RecordId::from(id)).await)
        }
        Commands::Toggle { kind, id, active } => {
            let id = RecordId::from(id);
            with_toggle!(kind, R => toggle::<R>(&api, &id, active).await)
        }
        Commands::Upload { path } => {
            let uploaded = api.uploads().upload_path(&path).await?;
            println!("{}", uploaded.url);
            Ok(())
        }
        Commands::Get { setting } => match setting {
            SettingKind::Identity => print_json(&api.identity().get().await?),
            SettingKind::Prayer => print_json(&api.prayer_settings().get().await?),
            SettingKind::Layout => print_json(&api.layout_settings().get().await?),
            SettingKind::Qris => print_json(&api.qris().get().await?),
            SettingKind::Sheets => print_json(&api.sheets().config().get().await?),
        },
        Commands::Set { setting, data } => {
            let fields: serde_json::Value =
                serde_json::from_str(&data).context("--data is not valid JSON")?;
            match setting {
                SettingKind::Identity => print_json(&api.identity().patch(&fields).await?),
                SettingKind::Prayer => print_json(&api.prayer_settings().patch(&fields).await?),
                SettingKind::Layout => print_json(&api.layout_settings().patch(&fields).await?),
                SettingKind::Qris => print_json(&api.qris().patch(&fields).await?),
                SettingKind::Sheets => print_json(&api.sheets().config().patch(&fields).await?),
            }
        }
        Commands::Sync => print_json(&api.sheets().sync().await?),
        Commands::Stats => print_json(&api.stats().dashboard().await?),
        Commands::ZisSummary { month, year } => print_json(
            &api.stats()
                .zis_summary(&PeriodFilter::month(month, year))
                .await?,
        ),
        Commands::Report { month, year } => print_json(&monthly_report(&api, month, year).await?),
        Commands::PrayerTimes { date, month, year } => match (month, year) {
            (Some(month), Some(year)) => {
                print_json(&api.prayer_times().monthly(month, year).await?)
            }
            _ => print_json(&api.prayer_times().daily(date).await?),
        },
    }
}

fn connect(config: &Config) -> Result<MasjidApi> {
    let session = Session::new(Arc::new(FileStorage::new(config.session_path())));
    let navigator = Arc::new(MemoryNavigator::new(CLI_PATH));
    let routes = RoutePolicy::from(config.routes.clone());
    Ok(MasjidApi::connect(&config.api_url, session, navigator, routes)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn list<R: Resource>(api: &MasjidApi, filter: Option<&str>) -> Result<()> {
    let filter: R::Filter = match filter {
        Some(raw) => serde_json::from_str(raw).context("--filter is not valid JSON")?,
        None => R::Filter::default(),
    };
    print_json(&api.resource::<R>().list(&filter).await?)
}

async fn create<R: Resource>(api: &MasjidApi, data: &str) -> Result<()> {
    let draft: R::Draft = serde_json::from_str(data).context("--data is not a valid form")?;
    masjid_admin::Validate::validate(&draft, false)?;
    print_json(&api.resource::<R>().create(&draft).await?)
}

async fn update<R: Resource>(api: &MasjidApi, id: &RecordId, data: &str) -> Result<()> {
    let patch: R::Patch = serde_json::from_str(data).context("--data is not a valid patch")?;
    print_json(&api.resource::<R>().update(id, &patch).await?)
}

async fn delete<R: Resource>(api: &MasjidApi, id: &RecordId) -> Result<()> {
    let client = api.resource::<R>();
    let protected = client
        .list(&R::Filter::default())
        .await?
        .iter()
        .any(|r| r.id() == id && r.is_protected());
    if protected {
        return Err(anyhow!("{} {} cannot be deleted", R::LABEL, id));
    }
    client.delete(id).await?;
    println!("{} {} deleted", R::LABEL, id);
    Ok(())
}

async fn toggle<R: Toggle>(api: &MasjidApi, id: &RecordId, active: bool) -> Result<()> {
    print_json(&api.resource::<R>().set_active(id, active).await?)
}
