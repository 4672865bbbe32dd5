//! Display formatting for timer records.

use crate::record::Record;

/// Column header matching the layout of [`format_record`].
pub const LIST_HEADER: &str = "Record#\tStart Time\tEnd Time\tChannel\n";

/// Render one record as a listing line.
///
/// The line is `"{position}\t{HH:MM}\t{HH:MM}\t{channel}\n"`.
#[must_use]
pub fn format_record(record: &Record, position: usize) -> String {
    format!(
        "{position}\t{}\t{}\t{}\n",
        record.start, record.end, record.channel
    )
}
