//! History table of logged benchmarks.

use crate::timing_log::TimingRecord;

/// Records sorted by digit count; equal counts keep their log order.
#[must_use]
pub fn sorted(mut records: Vec<TimingRecord>) -> Vec<TimingRecord> {
    records.sort_by_key(|r| r.digits);
    records
}

/// Serial time over parallel time, when defined.
#[must_use]
pub fn speedup(record: &TimingRecord) -> Option<f64> {
    (record.parallel_ms > 0.0).then(|| record.serial_ms / record.parallel_ms)
}

/// Text table of `records`, sorted by digit count.
#[must_use]
pub fn render_history(title: &str, records: Vec<TimingRecord>) -> String {
    if records.is_empty() {
        return format!("{title}: no data\n");
    }

    let mut out = format!("{title}\n");
    out.push_str(&format!(
        "{:>8}  {:>14}  {:>14}  {:>8}\n",
        "digits", "serial (ms)", "parallel (ms)", "speedup"
    ));
    out.push_str(&format!("{:-<50}\n", ""));
    for record in sorted(records) {
        let speedup = speedup(&record).map_or_else(|| "-".to_string(), |s| format!("{s:.2}x"));
        out.push_str(&format!(
            "{:>8}  {:>14.3}  {:>14.3}  {:>8}\n",
            record.digits, record.serial_ms, record.parallel_ms, speedup
        ));
    }
    out
}
