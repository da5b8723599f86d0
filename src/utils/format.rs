use chrono::{DateTime, Utc};

/// Formátuje čas jako ISO-8601 s milisekundami a literálem `Z`
/// Příklad: "2024-01-01T00:00:00.000Z"
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Název denního indexu: prefix + UTC datum
/// Příklad: "monitoring-test" -> "monitoring-test2024.01.01"
pub fn daily_index_name(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{}{}", prefix, now.format("%Y.%m.%d"))
}
