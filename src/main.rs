use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use school_admin_console::{
    config::{self, console::ConsoleConfig, session},
    core::{
        fetch::fetch_record_sets,
        payments::{StatusFilter, filter_payments_by, payment_breakdown},
        platforms::SchoolFilter,
        schools::{school_headcounts, school_status_counts},
    },
    errors::Result,
    records::RecordSets,
    view::{DashboardView, ListView, PlatformsView, Screen, ViewState, render},
};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "school-admin-console")]
#[command(about = "Super-admin console for the school management platform", long_about = None)]
struct Cli {
    /// Path to console.toml (defaults to $CONSOLE_CONFIG, then ./console.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the console's tables in a local store
    InitDb,
    /// Summary statistics (the default)
    Dashboard,
    /// List schools
    Schools {
        #[arg(long, default_value = "")]
        query: String,
    },
    /// List students
    Students {
        #[arg(long, default_value = "")]
        query: String,
        /// Open the detail view of this student id
        #[arg(long)]
        select: Option<String>,
    },
    /// List parents with their wards
    Parents {
        #[arg(long, default_value = "")]
        query: String,
        /// Open the detail view of this parent id
        #[arg(long)]
        select: Option<String>,
    },
    /// List teachers
    Teachers {
        #[arg(long, default_value = "")]
        query: String,
        /// Open the detail view of this teacher id
        #[arg(long)]
        select: Option<String>,
    },
    /// List payments
    Payments {
        #[arg(long, default_value = "")]
        query: String,
        /// `all`, `pending`, `completed`, `failed` or `refunded`
        #[arg(long, default_value = "all")]
        status: String,
    },
    /// List platform integrations
    Platforms {
        /// Only integrations of this school id
        #[arg(long)]
        school: Option<String>,
    },
}

impl Commands {
    const fn screen(&self) -> Screen {
        match self {
            Self::InitDb | Self::Dashboard => Screen::Dashboard,
            Self::Schools { .. } => Screen::Schools,
            Self::Students { .. } => Screen::Students,
            Self::Parents { .. } => Screen::Parents,
            Self::Teachers { .. } => Screen::Teachers,
            Self::Payments { .. } => Screen::Payments,
            Self::Platforms { .. } => Screen::Platforms,
        }
    }
}

fn render_screen(
    command: &Commands,
    records: &RecordSets,
    config: &ConsoleConfig,
) -> Result<String> {
    let display = &config.display;
    let text = match command {
        Commands::InitDb | Commands::Dashboard => {
            let view = DashboardView::build(records, &display.currency_symbol);
            render::render_dashboard(&view)
        }
        Commands::Schools { query } => render::render_schools(
            &ListView::build(&records.schools, query),
            &school_status_counts(&records.schools),
            &school_headcounts(records),
            display,
        ),
        Commands::Students { query, select } => {
            let mut view = ListView::build(&records.students, query);
            if let Some(id) = select {
                view = view.select(id);
            }
            render::render_students(&view, display)
        }
        Commands::Parents { query, select } => {
            let mut view = ListView::build(&records.parents, query);
            if let Some(id) = select {
                view = view.select(id);
            }
            render::render_parents(&view, display)
        }
        Commands::Teachers { query, select } => {
            let mut view = ListView::build(&records.teachers, query);
            if let Some(id) = select {
                view = view.select(id);
            }
            render::render_teachers(&view, display)
        }
        Commands::Payments { query, status } => {
            let status: StatusFilter = status.parse()?;
            let rows = filter_payments_by(&records.payments, query, status);
            render::render_payments(
                &ListView::from_rows(rows, query),
                &payment_breakdown(&records.payments),
                display,
            )
        }
        Commands::Platforms { school } => {
            let filter = SchoolFilter::from_arg(school.as_deref());
            render::render_platforms(&PlatformsView::build(&records.platforms, &filter), display)
        }
    };
    Ok(text)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; variables may also come from the environment
    dotenv().ok();
    info!("Attempted to load .env file.");

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Dashboard);

    // 3. Display configuration
    let console_config = match &cli.config {
        Some(path) => config::console::load_config(path),
        None => config::console::load_default_config(),
    }
    .inspect_err(|e| error!("Critical error loading console configuration: {}", e))?;

    // 4. Session gate
    let session = session::current_session();
    Screen::require(session.as_ref(), command.screen()).inspect_err(|e| {
        warn!("Refusing {}: {}", command.screen(), e);
        println!("{}", render::LOGIN_MESSAGE);
    })?;

    // 5. Store connection
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Connected to store."))
        .inspect_err(|e| error!("Failed to connect to store: {}", e))?;

    if matches!(command, Commands::InitDb) {
        config::database::create_tables(&db)
            .await
            .inspect(|_| info!("Tables created."))
            .inspect_err(|e| error!("Failed to create tables: {}", e))?;
        println!("Schema ready.");
        return Ok(());
    }

    // 6. Fetch, then render
    println!("{}", render::render_state(&ViewState::Loading));
    let records = fetch_record_sets(&db).await;
    let text = render_screen(&command, &records, &console_config)
        .inspect_err(|e| error!("Failed to render {}: {}", command.screen(), e))?;
    println!("{}", render::render_state(&ViewState::Ready(text)));

    Ok(())
}
