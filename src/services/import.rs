//! Guest-history import service
//!
//! Reads CSV exports into raw rows and drives the import session against
//! persisted state: a preview is written to `import_preview.json` and stays
//! there until it is confirmed or cancelled.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, info};

use crate::audit::{AuditEntry, EntityType};
use crate::config::Settings;
use crate::error::{LodgeError, LodgeResult};
use crate::import::{ConfirmPolicy, ImportPreview, ImportSession, ImportSummary, RawRow};
use crate::storage::Storage;

/// Service for importing guest history
pub struct ImportService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Tokenize CSV into header -> value rows
    ///
    /// Header cells are trimmed; values are kept as-is and trimmed later by
    /// the column lookup. Short rows simply lack the trailing columns, and
    /// invalid UTF-8 is decoded lossily rather than rejecting the batch.
    pub fn read_rows<R: Read>(reader: R) -> LodgeResult<Vec<RawRow>> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::Headers)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).trim().to_string())
            .collect();
        let mut rows = Vec::new();

        // Legacy exports are often Latin-1; undecodable bytes become U+FFFD
        // so the row still reaches the mapper.
        for (idx, record) in csv_reader.byte_records().enumerate() {
            let record = record.map_err(|e| {
                LodgeError::Import(format!("Failed to read CSV row {}: {}", idx + 1, e))
            })?;

            let row: RawRow = headers
                .iter()
                .zip(record.iter())
                .filter(|(header, _)| !header.is_empty())
                .map(|(header, value)| (header.clone(), String::from_utf8_lossy(value).into_owned()))
                .collect();
            rows.push(row);
        }

        debug!(rows = rows.len(), columns = headers.len(), "read CSV rows");
        Ok(rows)
    }

    pub fn read_rows_from_path(path: &Path) -> LodgeResult<Vec<RawRow>> {
        let file = File::open(path).map_err(|e| {
            LodgeError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        Self::read_rows(file)
    }

    fn session(&self) -> LodgeResult<ImportSession> {
        Ok(match self.storage.previews.load()? {
            Some(preview) => ImportSession::resume(preview, self.settings),
            None => ImportSession::from_settings(self.settings),
        })
    }

    /// Classify a batch and store it as the pending preview
    ///
    /// Fails with `InvalidTransition` while another preview is pending.
    pub fn preview(&self, rows: &[RawRow], source: Option<String>) -> LodgeResult<ImportPreview> {
        let existing = self.storage.bookings.get_all()?;
        let mut session = self.session()?;

        let mut preview = session.load(rows, &existing)?.clone();
        preview.source = source;
        self.storage.previews.save(&preview)?;

        Ok(preview)
    }

    /// Read a CSV file and store its preview
    pub fn preview_file(&self, path: &Path) -> LodgeResult<ImportPreview> {
        let rows = Self::read_rows_from_path(path)?;
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        self.preview(&rows, source)
    }

    pub fn pending_preview(&self) -> LodgeResult<Option<ImportPreview>> {
        self.storage.previews.load()
    }

    /// Discard the pending preview without touching any data
    pub fn cancel(&self) -> LodgeResult<ImportPreview> {
        let mut session = self.session()?;
        let preview = session.cancel()?;
        self.storage.previews.clear()?;
        Ok(preview)
    }

    /// Commit the pending preview
    ///
    /// Bookings and the monthly table are saved before the preview is
    /// removed, so a failed save leaves the preview available to retry.
    pub fn confirm(&self, policy: ConfirmPolicy) -> LodgeResult<ImportSummary> {
        let mut session = self.session()?;
        let source = session.preview().and_then(|p| p.source.clone());

        let existing_bookings = self.storage.bookings.get_all()?;
        let existing_monthly = self.storage.monthly.get_all()?;
        let merged = session.confirm(&existing_bookings, &existing_monthly, policy)?;

        let committed: Vec<_> = merged.bookings[existing_bookings.len()..].to_vec();

        self.storage.bookings.replace_all(merged.bookings)?;
        self.storage.monthly.replace_all(merged.monthly)?;
        self.storage.save_all()?;
        self.storage.previews.clear()?;

        let summary = merged.summary;
        let batch_id = format!("import-{}", summary.completed_at.format("%Y%m%d%H%M%S"));
        let mut entries = vec![AuditEntry::imported(
            EntityType::ImportBatch,
            batch_id,
            source,
            &summary,
        )
        .with_summary(format!(
            "{} rows: {} new, {} duplicate, {} skipped; {} committed",
            summary.stats.total,
            summary.stats.new,
            summary.stats.duplicates,
            summary.stats.skipped,
            summary.committed()
        ))];
        entries.extend(committed.iter().map(|booking| {
            AuditEntry::imported(
                EntityType::Booking,
                booking.id.as_str(),
                Some(booking.guest_name.clone()),
                booking,
            )
        }));
        self.storage.audit().log_batch(&entries)?;

        info!(
            committed = summary.committed(),
            total_bookings = existing_bookings.len() + committed.len(),
            "import committed"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::LodgePaths;
    use crate::models::{Money, Month};
    use tempfile::TempDir;

    const SAMPLE: &str = "\
FULL NAME, DATE OF ARRIVAL ,DATE OF DEPARTURE,COUNTRY OF RESIDENCE,ID NUMBER,AMOUNT,HOW DID YOU HEAR ABOUT US
Anna Smit,05/01/2025,07/01/2025,RSA,AB123,R1 800,Google
Piet Pompies,12/01/2025,13/01/2025,UK,,,Friend
,14/01/2025,15/01/2025,UK,X1,100,Google
Jan de Wit,03/02/2025,,Netherlands,NL9,900
";

    fn setup() -> (TempDir, Storage, Settings) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LodgePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage, Settings::default())
    }

    #[test]
    fn test_read_rows_trims_headers_and_tolerates_short_rows() {
        let rows = ImportService::read_rows(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].get("DATE OF ARRIVAL").map(String::as_str), Some("05/01/2025"));
        assert!(rows[3].get("HOW DID YOU HEAR ABOUT US").is_none());
    }

    #[test]
    fn test_read_rows_tolerates_latin1_bytes() {
        let data: &[u8] =
            b"FULL NAME,DATE OF ARRIVAL\nAnna,05/01/2025\nBj\xF6rk,06/01/2025\nPiet,07/01/2025\n";
        let rows = ImportService::read_rows(data).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].get("FULL NAME").map(String::as_str), Some("Bj\u{FFFD}rk"));
        assert_eq!(rows[2].get("FULL NAME").map(String::as_str), Some("Piet"));

        let (_temp, storage, settings) = setup();
        let preview = ImportService::new(&storage, &settings)
            .preview(&rows, None)
            .unwrap();
        assert_eq!(preview.stats.total, 3);
        assert_eq!(preview.stats.new, 3);
    }

    #[test]
    fn test_preview_is_persisted_and_blocks_second_preview() {
        let (_temp, storage, settings) = setup();
        let service = ImportService::new(&storage, &settings);
        let rows = ImportService::read_rows(SAMPLE.as_bytes()).unwrap();

        let preview = service.preview(&rows, Some("guests.csv".into())).unwrap();
        assert_eq!(preview.stats.total, 4);
        assert_eq!(preview.stats.new, 3);
        assert_eq!(preview.stats.skipped, 1);
        assert_eq!(service.pending_preview().unwrap(), Some(preview));

        let err = service.preview(&rows, None).unwrap_err();
        assert!(matches!(err, LodgeError::InvalidTransition { .. }));
    }

    #[test]
    fn test_confirm_writes_bookings_monthly_and_audit() {
        let (_temp, storage, settings) = setup();
        let service = ImportService::new(&storage, &settings);
        let rows = ImportService::read_rows(SAMPLE.as_bytes()).unwrap();
        service.preview(&rows, Some("guests.csv".into())).unwrap();

        let summary = service.confirm(ConfirmPolicy::default()).unwrap();
        assert_eq!(summary.committed(), 3);
        assert!(service.pending_preview().unwrap().is_none());

        assert_eq!(storage.bookings.count().unwrap(), 3);
        let jan = storage.monthly.get(Month::Jan, 2025).unwrap().unwrap();
        assert_eq!(jan.bookings, 2);
        // R1 800 plus one estimated night at R2 500
        assert_eq!(jan.revenue, Money::from_units(4300));
        assert!(storage.monthly.get(Month::Feb, 2025).unwrap().is_some());

        let audit = storage.audit().read_all().unwrap();
        assert_eq!(audit.len(), 4);
        assert_eq!(audit[0].entity_type, EntityType::ImportBatch);
        assert_eq!(audit[0].entity_name.as_deref(), Some("guests.csv"));
        assert!(audit.iter().all(|e| e.operation == Operation::Import));
    }

    #[test]
    fn test_second_import_detects_repeat_guests() {
        let (_temp, storage, settings) = setup();
        let service = ImportService::new(&storage, &settings);
        let rows = ImportService::read_rows(SAMPLE.as_bytes()).unwrap();
        service.preview(&rows, None).unwrap();
        service.confirm(ConfirmPolicy::default()).unwrap();

        let again = "FULL NAME,DATE OF ARRIVAL,COUNTRY OF RESIDENCE,ID NUMBER\n\
                     Anna S,01/03/2025,South Africa,ab123\n\
                     piet pompies,02/03/2025,United Kingdom,\n";
        let rows = ImportService::read_rows(again.as_bytes()).unwrap();
        let preview = service.preview(&rows, None).unwrap();
        assert_eq!(preview.stats.duplicates, 2);

        service.confirm(ConfirmPolicy::NewOnly).unwrap();
        assert_eq!(storage.bookings.count().unwrap(), 3);
    }

    #[test]
    fn test_cancel_leaves_data_untouched() {
        let (_temp, storage, settings) = setup();
        let service = ImportService::new(&storage, &settings);
        let rows = ImportService::read_rows(SAMPLE.as_bytes()).unwrap();
        service.preview(&rows, None).unwrap();

        let discarded = service.cancel().unwrap();
        assert_eq!(discarded.stats.total, 4);
        assert_eq!(storage.bookings.count().unwrap(), 0);
        assert!(service.pending_preview().unwrap().is_none());
        assert!(storage.audit().read_all().unwrap().is_empty());
    }

    #[test]
    fn test_confirm_without_preview_fails() {
        let (_temp, storage, settings) = setup();
        let service = ImportService::new(&storage, &settings);
        assert!(matches!(
            service.confirm(ConfirmPolicy::default()),
            Err(LodgeError::InvalidTransition { .. })
        ));
        assert!(service.cancel().is_err());
    }
}
