use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    /// Postgres DSN. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub run_migrations: bool,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub otel_endpoint: Option<String>,
    pub dev_mode: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .context("Missing environment variable: PORT")?
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let run_migrations = match lookup("RUN_MIGRATIONS").as_deref() {
            None | Some("true") => true,
            Some("false") => false,
            Some(other) => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let db_min_conn = match lookup("DB_MIN_CONN") {
            Some(v) => v
                .parse::<u32>()
                .context("DB_MIN_CONN must be a valid u32 integer")?,
            None => 1,
        };

        let db_max_conn = match lookup("DB_MAX_CONN") {
            Some(v) => v
                .parse::<u32>()
                .context("DB_MAX_CONN must be a valid u32 integer")?,
            None => 10,
        };

        if db_max_conn == 0 || db_min_conn > db_max_conn {
            return Err(anyhow!(
                "DB_MIN_CONN ({}) must not exceed DB_MAX_CONN ({}), and DB_MAX_CONN must be positive",
                db_min_conn,
                db_max_conn
            ));
        }

        let otel_endpoint = lookup("OTEL_ENDPOINT").filter(|v| !v.trim().is_empty());

        let dev_mode = lookup("DEV_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let enable_file_log = lookup("ENABLE_FILE_LOG")
            .map(|v| v == "true")
            .unwrap_or(false);

        Ok(Self {
            port,
            database_url,
            run_migrations,
            db_min_conn,
            db_max_conn,
            otel_endpoint,
            dev_mode,
            enable_file_log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn only_port_is_required() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "8080")])).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, None);
        assert!(config.run_migrations);
        assert_eq!((config.db_min_conn, config.db_max_conn), (1, 10));
        assert_eq!(config.otel_endpoint, None);
        assert!(!config.dev_mode);
        assert!(!config.enable_file_log);
    }

    #[test]
    fn missing_or_bad_port_fails() {
        assert!(Config::from_lookup(lookup_from(&[])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("PORT", "http")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("PORT", "70000")])).is_err());
    }

    #[test]
    fn full_environment_is_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "5000"),
            ("DATABASE_URL", "postgres://catalog@db/catalog"),
            ("RUN_MIGRATIONS", "false"),
            ("DB_MIN_CONN", "2"),
            ("DB_MAX_CONN", "20"),
            ("OTEL_ENDPOINT", "http://otel-collector:4317"),
            ("DEV_MODE", "1"),
            ("ENABLE_FILE_LOG", "true"),
        ]))
        .unwrap();

        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://catalog@db/catalog")
        );
        assert!(!config.run_migrations);
        assert_eq!((config.db_min_conn, config.db_max_conn), (2, 20));
        assert_eq!(
            config.otel_endpoint.as_deref(),
            Some("http://otel-collector:4317")
        );
        assert!(config.dev_mode);
        assert!(config.enable_file_log);
    }

    #[test]
    fn run_migrations_must_be_a_boolean() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "1"), ("RUN_MIGRATIONS", "yes")]))
            .unwrap_err();
        assert!(err.to_string().contains("RUN_MIGRATIONS"));
    }

    #[test]
    fn pool_bounds_are_checked() {
        assert!(
            Config::from_lookup(lookup_from(&[
                ("PORT", "1"),
                ("DB_MIN_CONN", "5"),
                ("DB_MAX_CONN", "2"),
            ]))
            .is_err()
        );
        assert!(
            Config::from_lookup(lookup_from(&[("PORT", "1"), ("DB_MAX_CONN", "0")])).is_err()
        );
    }

    #[test]
    fn blank_database_url_means_in_memory() {
        let config =
            Config::from_lookup(lookup_from(&[("PORT", "1"), ("DATABASE_URL", "  ")])).unwrap();
        assert_eq!(config.database_url, None);
    }
}
