use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::protocols::jsf::registry;
use crate::{DEFAULT_GENERATED_AT, DecodeReport, DecodeSummary, TypeCount, make_stub_report};

use super::walker::DecodedSequence;

/// Summarize a finished walk into a report.
///
/// `generated_at` is taken from the latest record timestamp so that the same
/// input always yields the same report.
pub fn build_report(
    path: &str,
    bytes: u64,
    sequence: &DecodedSequence,
    include_messages: bool,
) -> DecodeReport {
    let mut report = make_stub_report(path, bytes);

    let (first, last) = time_bounds(sequence);
    let summary = DecodeSummary {
        frames_total: sequence.messages.len() as u64,
        unknown: sequence.unknown_count() as u64,
        malformed: sequence.malformed_count() as u64,
        time_start: unix_to_rfc3339(first),
        time_end: unix_to_rfc3339(last),
        types: sequence
            .count_by_type()
            .into_iter()
            .map(|(msg_type, count)| TypeCount {
                msg_type,
                name: registry::message_name(msg_type).map(str::to_string),
                count,
            })
            .collect(),
    };
    report.generated_at = summary
        .time_end
        .clone()
        .or_else(|| summary.time_start.clone())
        .unwrap_or_else(|| DEFAULT_GENERATED_AT.to_string());
    report.summary = summary;
    report.termination = sequence.termination.clone();
    report.warnings = sequence.warnings.clone();
    if include_messages {
        report.messages = Some(sequence.messages.clone());
    }
    report
}

fn time_bounds(sequence: &DecodedSequence) -> (Option<i64>, Option<i64>) {
    let mut first: Option<i64> = None;
    let mut last: Option<i64> = None;
    // zero is the "not set" value in most JSF time fields
    for secs in sequence
        .messages
        .iter()
        .filter_map(|msg| msg.unix_time())
        .filter(|secs| *secs > 0)
    {
        first = Some(first.map_or(secs, |f| f.min(secs)));
        last = Some(last.map_or(secs, |l| l.max(secs)));
    }
    (first, last)
}

fn unix_to_rfc3339(secs: Option<i64>) -> Option<String> {
    let secs = secs?;
    OffsetDateTime::from_unix_timestamp(secs)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
}
