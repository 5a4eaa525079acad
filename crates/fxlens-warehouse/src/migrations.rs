use ::duckdb::{params, Connection};

struct Migration {
    version: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "0001_conversions_and_favorites",
        sql: r#"
CREATE SEQUENCE IF NOT EXISTS conversion_seq START 1;
CREATE SEQUENCE IF NOT EXISTS favorite_seq START 1;

CREATE TABLE IF NOT EXISTS conversions (
    id TEXT PRIMARY KEY,
    seq BIGINT NOT NULL DEFAULT nextval('conversion_seq'),
    user_id TEXT NOT NULL,
    from_currency TEXT NOT NULL,
    to_currency TEXT NOT NULL,
    amount DOUBLE NOT NULL,
    result DOUBLE NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS favorites (
    id TEXT PRIMARY KEY,
    seq BIGINT NOT NULL DEFAULT nextval('favorite_seq'),
    user_id TEXT NOT NULL,
    base_currency TEXT NOT NULL,
    target_currency TEXT NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    UNIQUE(user_id, base_currency, target_currency)
);
"#,
    },
    Migration {
        version: "0002_user_indexes",
        sql: r#"
CREATE INDEX IF NOT EXISTS idx_conversions_user_seq ON conversions(user_id, seq);
CREATE INDEX IF NOT EXISTS idx_favorites_user ON favorites(user_id);
"#,
    },
];

pub fn apply_migrations(connection: &Connection) -> Result<(), ::duckdb::Error> {
    connection.execute_batch(
        r#"
CREATE TABLE IF NOT EXISTS schema_migrations (
    version TEXT PRIMARY KEY,
    applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#,
    )?;

    for migration in MIGRATIONS {
        let applied_count: i64 = connection.query_row(
            "SELECT COUNT(*) FROM schema_migrations WHERE version = ?",
            params![migration.version],
            |row| row.get(0),
        )?;

        if applied_count == 0 {
            connection.execute_batch(migration.sql)?;
            connection.execute(
                "INSERT INTO schema_migrations (version) VALUES (?)",
                params![migration.version],
            )?;
        }
    }

    Ok(())
}
