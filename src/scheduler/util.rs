use super::types::DateKey;
use chrono::{DateTime, Datelike, TimeDelta, Timelike, Utc};

/// `None` si le résultat sort de la plage représentable.
pub(super) fn add_days(date: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    TimeDelta::try_days(days).and_then(|delta| date.checked_add_signed(delta))
}

/// Tronque au jour et à l'heure ; minutes et secondes sont ignorées.
pub(crate) fn day_and_hour_for_date(date: DateTime<Utc>) -> DateKey {
    DateKey {
        year: date.year(),
        month: date.month(),
        day: date.day(),
        hour: date.hour(),
    }
}
