//! CLI commands for guest-history import
//!
//! `preview` reads a file and stores the classified batch; `confirm` and
//! `cancel` act on that stored batch in a later invocation.

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_preview, format_summary};
use crate::error::{LodgeError, LodgeResult};
use crate::import::ConfirmPolicy;
use crate::services::ImportService;
use crate::storage::Storage;

/// Import subcommands
#[derive(Subcommand, Debug)]
pub enum ImportCommands {
    /// Read a CSV export and show what would be imported
    Preview {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// Show the pending preview again
    Show,

    /// Save the pending preview
    Confirm {
        /// Skip stays by guests who are already on record
        #[arg(long)]
        new_only: bool,
    },

    /// Discard the pending preview
    Cancel,
}

pub fn handle_import_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ImportCommands,
) -> LodgeResult<()> {
    let service = ImportService::new(storage, settings);
    let symbol = settings.hotel.currency_symbol.as_str();

    match cmd {
        ImportCommands::Preview { file } => {
            if !file.exists() {
                return Err(LodgeError::Import(format!(
                    "File not found: {}",
                    file.display()
                )));
            }
            let preview = service.preview_file(&file)?;
            print!("{}", format_preview(&preview, symbol));
        }
        ImportCommands::Show => match service.pending_preview()? {
            Some(preview) => print!("{}", format_preview(&preview, symbol)),
            None => println!("No import is pending. Run `lodge import preview <file>` first."),
        },
        ImportCommands::Confirm { new_only } => {
            let policy = if new_only {
                ConfirmPolicy::NewOnly
            } else {
                ConfirmPolicy::IncludeDuplicates
            };
            let summary = service.confirm(policy)?;
            print!("{}", format_summary(&summary));
        }
        ImportCommands::Cancel => {
            let preview = service.cancel()?;
            println!(
                "Discarded preview of {} row(s). Nothing was saved.",
                preview.stats.total
            );
        }
    }

    Ok(())
}
