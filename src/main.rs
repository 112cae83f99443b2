use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lodgebook::cli::{
    handle_booking_command, handle_export_command, handle_import_command, handle_report_command,
    BookingCommands, ExportCommands, ImportCommands, ReportCommands,
};
use lodgebook::config::{LodgePaths, Settings};
use lodgebook::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "lodge",
    version,
    about = "Guest history import and occupancy analytics for lodges",
    long_about = "Lodgebook imports guest-history spreadsheets, recognises returning \
                  guests, and keeps a monthly table of bookings, revenue and referral \
                  sources for the analytics dashboard."
)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default configuration
    Init,

    /// Show current configuration and paths
    Config,

    /// Import guest history from CSV
    #[command(subcommand)]
    Import(ImportCommands),

    /// Bookings and guest history
    #[command(subcommand, alias = "bk")]
    Booking(BookingCommands),

    /// Monthly table and dashboard
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data to CSV, JSON or YAML
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn init_tracing(settings: &Settings, verbose: bool) {
    let fallback = if verbose {
        "lodgebook=debug".to_string()
    } else {
        format!("lodgebook={}", settings.log_level)
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = LodgePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings, cli.verbose);

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing Lodgebook at: {}", paths.base_dir().display());
            if initialize_storage(&paths)? {
                println!("Created default configuration.");
            } else {
                println!("Existing configuration kept.");
            }
            println!();
            println!("Run 'lodge import preview <file.csv>' to load guest history.");
        }
        Some(Commands::Config) => {
            println!("Lodgebook Configuration");
            println!("=======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Hotel:         {} ({})", settings.hotel.name, settings.hotel.hotel_id);
            println!("  Currency:      {}", settings.hotel.currency_symbol);
            println!(
                "  Nightly rate:  {}",
                settings
                    .import
                    .nightly_rate
                    .format_with_symbol(&settings.hotel.currency_symbol)
            );
            println!("  Default country: {}", settings.import.country);
            println!("  Log level:     {}", settings.log_level);
            println!(
                "  Import pending: {}",
                if storage.previews.is_pending() { "yes" } else { "no" }
            );
        }
        Some(Commands::Import(cmd)) => handle_import_command(&storage, &settings, cmd)?,
        Some(Commands::Booking(cmd)) => handle_booking_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, &settings, cmd)?,
        Some(Commands::Audit { limit }) => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("Audit log is empty.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        None => {
            println!("Lodgebook - guest history and occupancy analytics");
            println!();
            println!("Run 'lodge --help' for usage information.");
        }
    }

    Ok(())
}
