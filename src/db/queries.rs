use crate::datasources::Selector;
use crate::db::{Database, StateStore};
use crate::error::Result;
use crate::models::GddState;
use chrono::Utc;
use rusqlite::params;
use std::time::Duration;
use tracing::warn;

// GDD State Queries

impl Database {
    pub fn get_gdd_state(&self, instance: &str) -> Result<Option<GddState>> {
        let data: Option<String> = self.with_conn(|conn| {
            conn.query_row(
                "SELECT data FROM gdd_state WHERE instance = ?1",
                [instance],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
        })?;

        match data {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Upsert the state, bounded to the stored buffer limits.
    pub fn save_gdd_state(&self, instance: &str, state: &GddState) -> Result<()> {
        let json = serde_json::to_string(&state.for_storage())?;

        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO gdd_state (instance, data, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(instance) DO UPDATE SET
                    data = excluded.data,
                    updated_at = excluded.updated_at
                "#,
                params![instance, json, Utc::now().to_rfc3339()],
            )?;
            Ok(())
        })
    }
}

// Settings Queries

impl Database {
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
            Ok(())
        })
    }
}

// Owner Lease Queries

impl Database {
    /// Insert, refresh or take over a stale lease in one statement.
    pub fn acquire_lease(&self, instance: &str, owner: &str, ttl: Duration) -> Result<bool> {
        let now = Utc::now().timestamp();
        let stale_before = now - ttl.as_secs() as i64;

        self.with_conn(|conn| {
            let changed = conn.execute(
                r#"
                INSERT INTO owner_leases (instance, owner, heartbeat_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(instance) DO UPDATE SET
                    owner = excluded.owner,
                    heartbeat_at = excluded.heartbeat_at
                WHERE owner_leases.owner = excluded.owner
                   OR owner_leases.heartbeat_at < ?4
                "#,
                params![instance, owner, now, stale_before],
            )?;
            Ok(changed == 1)
        })
    }

    pub fn release_lease(&self, instance: &str, owner: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "DELETE FROM owner_leases WHERE instance = ?1 AND owner = ?2",
                params![instance, owner],
            )?;
            Ok(())
        })
    }
}

fn base_temperature_key(instance: &str) -> String {
    format!("{}.base_temperature", instance)
}

fn selection_key(instance: &str, selector: Selector) -> String {
    format!("{}.{}", instance, selector.as_str())
}

impl StateStore for Database {
    fn load_state(&self, instance: &str) -> Result<Option<GddState>> {
        self.get_gdd_state(instance)
    }

    fn save_state(&self, instance: &str, state: &GddState) -> Result<()> {
        self.save_gdd_state(instance, state)
    }

    fn load_base_temperature(&self, instance: &str) -> Result<Option<f64>> {
        let Some(value) = self.get_setting(&base_temperature_key(instance))? else {
            return Ok(None);
        };

        match value.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => {
                warn!(instance, value = %value, "Ignoring invalid stored base temperature");
                Ok(None)
            }
        }
    }

    fn save_base_temperature(&self, instance: &str, base_temp: f64) -> Result<()> {
        self.set_setting(&base_temperature_key(instance), &base_temp.to_string())
    }

    fn load_selection(&self, instance: &str, selector: Selector) -> Result<Option<String>> {
        self.get_setting(&selection_key(instance, selector))
    }

    fn save_selection(&self, instance: &str, selector: Selector, value: &str) -> Result<()> {
        self.set_setting(&selection_key(instance, selector), value)
    }

    fn acquire_lease(&self, instance: &str, owner: &str, ttl: Duration) -> Result<bool> {
        Database::acquire_lease(self, instance, owner, ttl)
    }

    fn release_lease(&self, instance: &str, owner: &str) -> Result<()> {
        Database::release_lease(self, instance, owner)
    }
}

trait OptionalExt<T> {
    fn optional(self) -> rusqlite::Result<Option<T>>;
}

impl<T> OptionalExt<T> for rusqlite::Result<T> {
    fn optional(self) -> rusqlite::Result<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
