//! Event log migrations - embedded SQL files
//!
//! Each migration is a (name, sql) pair compiled in with `include_str!`,
//! applied in the order listed.

/// Add new files as NNN_description.sql and append them here.
pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    ("001_event_log.sql", include_str!("001_event_log.sql")),
];
