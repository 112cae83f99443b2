//! CLI commands for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{LodgeError, LodgeResult};
use crate::export::{export_bookings_csv, export_full_json, export_full_yaml, export_monthly_csv};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// All bookings as CSV (re-importable)
    Bookings {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// The monthly table as CSV
    Monthly {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Everything as JSON
    Json {
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compact output instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Everything as YAML
    Yaml {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> LodgeResult<()> {
    let output = match &cmd {
        ExportCommands::Bookings { output }
        | ExportCommands::Monthly { output }
        | ExportCommands::Json { output, .. }
        | ExportCommands::Yaml { output } => output.clone(),
    };
    let mut writer = open_output(output.as_ref())?;

    match cmd {
        ExportCommands::Bookings { .. } => export_bookings_csv(storage, &mut writer)?,
        ExportCommands::Monthly { .. } => export_monthly_csv(storage, &mut writer)?,
        ExportCommands::Json { compact, .. } => {
            export_full_json(storage, &settings.hotel, &mut writer, !compact)?;
            writeln!(writer).map_err(|e| LodgeError::Export(e.to_string()))?;
        }
        ExportCommands::Yaml { .. } => export_full_yaml(storage, &settings.hotel, &mut writer)?,
    }

    writer
        .flush()
        .map_err(|e| LodgeError::Export(e.to_string()))?;

    if let Some(path) = output {
        eprintln!("Exported to {}", path.display());
    }
    Ok(())
}

fn open_output(path: Option<&PathBuf>) -> LodgeResult<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                LodgeError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}
