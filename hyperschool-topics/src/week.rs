use chrono::Datelike;

/// Formats the ISO-8601 week of `date`, e.g. `"Week number: 1."`.
pub fn week_number<D: Datelike>(date: &D) -> String {
    format!("Week number: {}.", date.iso_week().week())
}
