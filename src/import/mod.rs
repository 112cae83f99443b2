//! Guest-history import pipeline
//!
//! Raw rows (header -> cell) flow through the [`mapper`], which normalizes
//! fields and asks the [`matcher`] whether the guest stayed before. The
//! [`session`] classifies a whole batch into a preview, and confirming it
//! folds the accepted stays into the monthly table via [`aggregate`].
//!
//! Everything here is pure: reading files and persisting results is left to
//! `services::import`.

pub mod aggregate;
pub mod columns;
pub mod dates;
pub mod mapper;
pub mod matcher;
pub mod normalize;
pub mod session;

pub use aggregate::{merge_monthly_data, merge_monthly_with};
pub use columns::{Column, RawRow};
pub use dates::{parse_date, parse_timestamp};
pub use mapper::{map_row_to_booking, map_row_with_defaults, FieldWarning, RowMapping, SkipReason};
pub use matcher::{find_matching_guest, find_matching_guest_with_tier, GuestCandidate, MatchTier};
pub use normalize::{normalize_country, normalize_guest_id, normalize_guest_name};
pub use session::{
    commit_preview, ConfirmPolicy, DuplicateMatch, ImportPreview, ImportSession, ImportState,
    ImportStats, ImportSummary, MergedData, RowWarnings,
};
