//! Import preview and the upload -> preview -> complete state machine
//!
//! A preview is built in one pass over the whole batch before anything is
//! visible to the caller. Confirming consumes it: accepted bookings are
//! appended to the existing list and folded into the monthly table, and new
//! collections are returned for the caller to persist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ImportDefaults, OccupancyRules, Settings};
use crate::error::{LodgeError, LodgeResult};
use crate::models::{Booking, BookingId, MonthlyData};

use super::aggregate::merge_monthly_with;
use super::columns::RawRow;
use super::mapper::{map_row_with_defaults, FieldWarning};
use super::matcher::MatchTier;

/// Row counts of one batch
///
/// `total == new + duplicates + skipped` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub total: usize,
    pub new: usize,
    pub duplicates: usize,
    pub skipped: usize,
}

impl ImportStats {
    pub fn accepted(&self) -> usize {
        self.new + self.duplicates
    }
}

/// Link between an imported stay and the earlier stay of the same guest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateMatch {
    pub booking_id: BookingId,
    pub matched_booking_id: BookingId,
    pub matched_guest_name: String,
    pub tier: MatchTier,
}

/// Warnings raised while mapping one row (1-based data row number)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowWarnings {
    pub row: usize,
    pub warnings: Vec<FieldWarning>,
}

/// A classified batch awaiting confirmation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportPreview {
    /// Stays by guests not seen before
    pub new_bookings: Vec<Booking>,
    /// New stays by previously seen guests
    pub duplicate_bookings: Vec<Booking>,
    #[serde(default)]
    pub duplicate_matches: Vec<DuplicateMatch>,
    pub stats: ImportStats,
    #[serde(default)]
    pub warnings: Vec<RowWarnings>,
    /// File the rows were read from, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ImportPreview {
    /// Classify every row of a batch against the existing bookings
    ///
    /// Rows are matched against `existing` only, never against earlier rows
    /// of the same batch.
    pub fn build(rows: &[RawRow], existing: &[Booking], defaults: &ImportDefaults) -> Self {
        let mut preview = Self {
            new_bookings: Vec::new(),
            duplicate_bookings: Vec::new(),
            duplicate_matches: Vec::new(),
            stats: ImportStats {
                total: rows.len(),
                ..Default::default()
            },
            warnings: Vec::new(),
            source: None,
            created_at: Utc::now(),
        };

        for (idx, row) in rows.iter().enumerate() {
            let row_number = idx + 1;
            let mapped = map_row_with_defaults(row, existing, defaults);

            let Some(booking) = mapped.booking else {
                preview.stats.skipped += 1;
                if let Some(reason) = &mapped.skip_reason {
                    debug!(row = row_number, %reason, "skipping import row");
                }
                continue;
            };

            if !mapped.warnings.is_empty() {
                preview.warnings.push(RowWarnings {
                    row: row_number,
                    warnings: mapped.warnings,
                });
            }

            match (mapped.matched_guest, mapped.match_tier) {
                (Some(guest), Some(tier)) if mapped.is_duplicate => {
                    preview.stats.duplicates += 1;
                    preview.duplicate_matches.push(DuplicateMatch {
                        booking_id: booking.id.clone(),
                        matched_booking_id: guest.id,
                        matched_guest_name: guest.guest_name,
                        tier,
                    });
                    preview.duplicate_bookings.push(booking);
                }
                _ => {
                    preview.stats.new += 1;
                    preview.new_bookings.push(booking);
                }
            }
        }

        info!(
            total = preview.stats.total,
            new = preview.stats.new,
            duplicates = preview.stats.duplicates,
            skipped = preview.stats.skipped,
            "import preview built"
        );

        preview
    }

    /// Bookings that `policy` would commit, in file order within each group
    pub fn accepted_bookings(&self, policy: ConfirmPolicy) -> Vec<Booking> {
        let mut accepted = self.new_bookings.clone();
        if policy == ConfirmPolicy::IncludeDuplicates {
            accepted.extend(self.duplicate_bookings.iter().cloned());
        }
        accepted
    }

    /// The earlier stay a duplicate was matched to
    pub fn match_for(&self, booking_id: &BookingId) -> Option<&DuplicateMatch> {
        self.duplicate_matches
            .iter()
            .find(|m| &m.booking_id == booking_id)
    }
}

/// Which part of a preview is committed on confirm
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmPolicy {
    /// Repeat guests' stays are new stays and are committed too
    #[default]
    IncludeDuplicates,
    /// Only stays by first-time guests are committed
    NewOnly,
}

/// Collections to write back after a confirmed import
#[derive(Debug, Clone, PartialEq)]
pub struct MergedData {
    pub bookings: Vec<Booking>,
    pub monthly: Vec<MonthlyData>,
    pub summary: ImportSummary,
}

/// Outcome of a confirmed import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub stats: ImportStats,
    pub policy: ConfirmPolicy,
    pub committed_ids: Vec<BookingId>,
    pub completed_at: DateTime<Utc>,
}

impl ImportSummary {
    pub fn committed(&self) -> usize {
        self.committed_ids.len()
    }
}

/// Apply a preview to existing data without mutating either input
pub fn commit_preview(
    preview: &ImportPreview,
    existing_bookings: &[Booking],
    existing_monthly: &[MonthlyData],
    policy: ConfirmPolicy,
    defaults: &ImportDefaults,
    rules: &OccupancyRules,
) -> MergedData {
    let accepted = preview.accepted_bookings(policy);
    let monthly = merge_monthly_with(existing_monthly, &accepted, defaults.nightly_rate, rules);

    let summary = ImportSummary {
        stats: preview.stats,
        policy,
        committed_ids: accepted.iter().map(|b| b.id.clone()).collect(),
        completed_at: Utc::now(),
    };

    let mut bookings = Vec::with_capacity(existing_bookings.len() + accepted.len());
    bookings.extend_from_slice(existing_bookings);
    bookings.extend(accepted);

    MergedData {
        bookings,
        monthly,
        summary,
    }
}

/// State of an import
#[derive(Debug, Clone, PartialEq)]
pub enum ImportState {
    /// Waiting for a file
    Upload,
    /// Batch classified, waiting for the operator
    Preview(ImportPreview),
    /// Batch merged; the preview is gone
    Complete(ImportSummary),
}

impl ImportState {
    pub fn name(&self) -> &'static str {
        match self {
            ImportState::Upload => "upload",
            ImportState::Preview(_) => "preview",
            ImportState::Complete(_) => "complete",
        }
    }
}

/// Drives one import through upload, preview and complete
#[derive(Debug, Clone)]
pub struct ImportSession {
    state: ImportState,
    defaults: ImportDefaults,
    rules: OccupancyRules,
}

impl ImportSession {
    pub fn new(defaults: ImportDefaults, rules: OccupancyRules) -> Self {
        Self {
            state: ImportState::Upload,
            defaults,
            rules,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.import.clone(), settings.occupancy)
    }

    /// Resume a session whose preview was saved earlier
    pub fn resume(preview: ImportPreview, settings: &Settings) -> Self {
        let mut session = Self::from_settings(settings);
        session.state = ImportState::Preview(preview);
        session
    }

    pub fn state(&self) -> &ImportState {
        &self.state
    }

    pub fn preview(&self) -> Option<&ImportPreview> {
        match &self.state {
            ImportState::Preview(preview) => Some(preview),
            _ => None,
        }
    }

    /// Upload -> Preview
    pub fn load(&mut self, rows: &[RawRow], existing: &[Booking]) -> LodgeResult<&ImportPreview> {
        if !matches!(self.state, ImportState::Upload) {
            return Err(self.invalid("load a file"));
        }
        self.state = ImportState::Preview(ImportPreview::build(rows, existing, &self.defaults));
        self.preview().ok_or_else(|| self.invalid("load a file"))
    }

    /// Preview -> Upload, discarding the batch
    pub fn cancel(&mut self) -> LodgeResult<ImportPreview> {
        match std::mem::replace(&mut self.state, ImportState::Upload) {
            ImportState::Preview(preview) => {
                info!(rows = preview.stats.total, "import preview discarded");
                Ok(preview)
            }
            other => {
                self.state = other;
                Err(self.invalid("cancel"))
            }
        }
    }

    /// Preview -> Complete, returning the merged collections
    pub fn confirm(
        &mut self,
        existing_bookings: &[Booking],
        existing_monthly: &[MonthlyData],
        policy: ConfirmPolicy,
    ) -> LodgeResult<MergedData> {
        let preview = match std::mem::replace(&mut self.state, ImportState::Upload) {
            ImportState::Preview(preview) => preview,
            other => {
                self.state = other;
                return Err(self.invalid("confirm"));
            }
        };

        let merged = commit_preview(
            &preview,
            existing_bookings,
            existing_monthly,
            policy,
            &self.defaults,
            &self.rules,
        );
        info!(
            committed = merged.summary.committed(),
            policy = ?policy,
            "import confirmed"
        );
        self.state = ImportState::Complete(merged.summary.clone());
        Ok(merged)
    }

    /// Complete -> Upload, ready for the next file
    pub fn reset(&mut self) -> LodgeResult<()> {
        if !matches!(self.state, ImportState::Complete(_)) {
            return Err(self.invalid("start a new import"));
        }
        self.state = ImportState::Upload;
        Ok(())
    }

    fn invalid(&self, action: &'static str) -> LodgeError {
        LodgeError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}

impl Default for ImportSession {
    fn default() -> Self {
        Self::new(ImportDefaults::default(), OccupancyRules::default())
    }
}
