//! Import preview and summary formatting

use crate::import::{FieldWarning, ImportPreview, ImportSummary, MatchTier};

use super::booking::format_booking_list;

/// How many per-row warnings are printed before the rest are summarized
const WARNING_LIMIT: usize = 20;

/// Format a pending preview for review before confirming
pub fn format_preview(preview: &ImportPreview, currency_symbol: &str) -> String {
    let mut output = String::new();
    let stats = &preview.stats;

    if let Some(source) = &preview.source {
        output.push_str(&format!("Import preview: {}\n", source));
    } else {
        output.push_str("Import preview\n");
    }
    output.push_str(&format!(
        "  Rows: {}   New: {}   Returning guests: {}   Skipped: {}\n",
        stats.total, stats.new, stats.duplicates, stats.skipped
    ));

    if !preview.new_bookings.is_empty() {
        output.push_str("\nNew guests\n");
        output.push_str(&format_booking_list(&preview.new_bookings, currency_symbol));
    }

    if !preview.duplicate_bookings.is_empty() {
        output.push_str("\nReturning guests\n");
        for booking in &preview.duplicate_bookings {
            let matched = preview
                .match_for(&booking.id)
                .map(|m| {
                    let how = match m.tier {
                        MatchTier::GuestId => "same ID",
                        MatchTier::NameAndCountry => "same name and country",
                    };
                    format!("matches {} ({})", m.matched_guest_name, how)
                })
                .unwrap_or_default();
            output.push_str(&format!(
                "  {}  {:<30} {}\n",
                booking.check_in_date, booking.guest_name, matched
            ));
        }
    }

    let warning_count: usize = preview.warnings.iter().map(|w| w.warnings.len()).sum();
    if warning_count > 0 {
        output.push_str(&format!("\nWarnings ({})\n", warning_count));
        let mut shown = 0;
        for row in &preview.warnings {
            for warning in &row.warnings {
                if shown == WARNING_LIMIT {
                    break;
                }
                output.push_str(&format!("  row {}: {}\n", row.row, describe(warning)));
                shown += 1;
            }
        }
        if warning_count > shown {
            output.push_str(&format!("  ... and {} more\n", warning_count - shown));
        }
    }

    output.push_str("\nRun `lodge import confirm` to save, or `lodge import cancel` to discard.\n");
    output
}

/// Format the outcome of a confirmed import
pub fn format_summary(summary: &ImportSummary) -> String {
    format!(
        "Imported {} booking(s) from {} row(s): {} new, {} returning, {} skipped.\n",
        summary.committed(),
        summary.stats.total,
        summary.stats.new,
        summary.stats.duplicates,
        summary.stats.skipped
    )
}

fn describe(warning: &FieldWarning) -> String {
    match warning {
        FieldWarning::Defaulted { field, value } => format!("{} missing, used {}", field, value),
        FieldWarning::UnparseableDeparture { value } => {
            format!("departure '{}' unreadable, used arrival date", value)
        }
        FieldWarning::PlaceholderGuestId => "no ID/passport, placeholder assigned".to_string(),
        FieldWarning::GuestCountMismatch {
            guests,
            adults,
            kids,
        } => format!(
            "{} guests recorded but {} adult(s) + {} child(ren)",
            guests, adults, kids
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImportDefaults;
    use crate::import::{ConfirmPolicy, ImportStats, RawRow};
    use crate::models::Booking;
    use chrono::{NaiveDate, Utc};

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_preview_lists_matches_and_warnings() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut existing = Booking::new("Anna Smit", "South Africa", d, d.succ_opt().unwrap());
        existing.passport_or_id = "AB1".into();

        let rows = vec![
            row(&[("Name", "Anna S"), ("Check-In", "2025-01-02"), ("Passport", "ab1")]),
            row(&[("Name", "Bob"), ("Check-In", "2025-01-03")]),
        ];
        let mut preview = ImportPreview::build(&rows, &[existing], &ImportDefaults::default());
        preview.source = Some("guests.csv".into());

        let output = format_preview(&preview, "R");
        assert!(output.contains("Import preview: guests.csv"));
        assert!(output.contains("Returning guests: 1"));
        assert!(output.contains("matches Anna Smit (same ID)"));
        assert!(output.contains("no ID/passport, placeholder assigned"));
    }

    #[test]
    fn test_summary() {
        let summary = ImportSummary {
            stats: ImportStats {
                total: 5,
                new: 3,
                duplicates: 1,
                skipped: 1,
            },
            policy: ConfirmPolicy::IncludeDuplicates,
            committed_ids: Vec::new(),
            completed_at: Utc::now(),
        };
        assert!(format_summary(&summary).contains("3 new, 1 returning, 1 skipped"));
    }
}
