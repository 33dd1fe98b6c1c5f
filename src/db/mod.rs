mod connection;
mod migrations;
mod queries;

pub use connection::Database;

use crate::datasources::Selector;
use crate::error::Result;
use crate::models::GddState;
use std::time::Duration;

/// Persistence used by the coordinator, keyed by instance name.
pub trait StateStore {
    fn load_state(&self, instance: &str) -> Result<Option<GddState>>;

    fn save_state(&self, instance: &str, state: &GddState) -> Result<()>;

    fn load_base_temperature(&self, _instance: &str) -> Result<Option<f64>> {
        Ok(None)
    }

    fn save_base_temperature(&self, _instance: &str, _base_temp: f64) -> Result<()> {
        Ok(())
    }

    /// Last selector value the owner resolved.
    fn load_selection(&self, _instance: &str, _selector: Selector) -> Result<Option<String>> {
        Ok(None)
    }

    fn save_selection(&self, _instance: &str, _selector: Selector, _value: &str) -> Result<()> {
        Ok(())
    }

    /// Take or refresh the instance's owner lease. Returns `false` while a
    /// different owner holds a lease younger than `ttl`.
    fn acquire_lease(&self, _instance: &str, _owner: &str, _ttl: Duration) -> Result<bool> {
        Ok(true)
    }

    fn release_lease(&self, _instance: &str, _owner: &str) -> Result<()> {
        Ok(())
    }
}
