//! # fxlens Warehouse
//!
//! DuckDB-backed store for conversion history and favorite currency pairs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fxlens_warehouse::{Warehouse, WarehouseConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let warehouse = Warehouse::open(WarehouseConfig::default())?;
//!     warehouse.add_conversion("alice", "USD", "EUR", 100.0, 92.0)?;
//!
//!     for record in warehouse.conversion_history("alice", 10)? {
//!         println!("{} {} -> {} {}", record.amount, record.from_currency, record.result, record.to_currency);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! All caller-supplied values are bound as statement parameters.
//!
//! ## Tables
//!
//! | Table | Description |
//! |-------|-------------|
//! | `conversions` | Recorded conversions, newest has the highest `seq` |
//! | `favorites` | Saved currency pairs per user |
//! | `schema_migrations` | Applied migration versions |

pub mod duckdb;
pub mod migrations;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use ::duckdb::{params, Row, ToSql};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub use duckdb::{DuckDbConnectionManager, PooledConnection};

pub const HOME_ENV: &str = "FXLENS_HOME";
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Errors that can occur during warehouse operations.
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// `DuckDB` database error.
    #[error(transparent)]
    DuckDb(#[from] ::duckdb::Error),

    /// I/O error while preparing the data directory.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Input was refused before reaching the database.
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// Configuration for the warehouse database.
#[derive(Debug, Clone)]
pub struct WarehouseConfig {
    /// Root directory for fxlens data.
    pub fxlens_home: PathBuf,
    /// Path to the `DuckDB` database file.
    pub db_path: PathBuf,
    /// Maximum number of idle connections kept in the pool.
    pub max_pool_size: usize,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self::in_home(resolve_fxlens_home())
    }
}

impl WarehouseConfig {
    /// Config rooted at `fxlens_home` with the database at `<home>/fxlens.duckdb`.
    pub fn in_home(fxlens_home: impl Into<PathBuf>) -> Self {
        let fxlens_home = fxlens_home.into();
        let db_path = fxlens_home.join("fxlens.duckdb");
        Self {
            fxlens_home,
            db_path,
            max_pool_size: 4,
        }
    }
}

/// A recorded currency conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionRecord {
    pub id: String,
    pub user_id: String,
    pub from_currency: String,
    pub to_currency: String,
    pub amount: f64,
    pub result: f64,
    pub created_at: String,
}

/// A saved currency pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoritePair {
    pub id: String,
    pub user_id: String,
    pub base_currency: String,
    pub target_currency: String,
    pub created_at: String,
}

pub struct Warehouse {
    config: WarehouseConfig,
    manager: DuckDbConnectionManager,
}

impl Warehouse {
    pub fn open_default() -> Result<Self, WarehouseError> {
        Self::open(WarehouseConfig::default())
    }

    pub fn open(config: WarehouseConfig) -> Result<Self, WarehouseError> {
        if let Some(parent) = config.db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let manager = DuckDbConnectionManager::open(config.db_path.clone(), config.max_pool_size)?;
        let warehouse = Self { config, manager };
        warehouse.initialize()?;
        Ok(warehouse)
    }

    pub fn initialize(&self) -> Result<(), WarehouseError> {
        let connection = self.manager.acquire()?;
        migrations::apply_migrations(&connection)?;
        Ok(())
    }

    pub fn config(&self) -> &WarehouseConfig {
        &self.config
    }

    pub fn db_path(&self) -> &Path {
        self.manager.db_path()
    }

    /// Record a conversion and return its id.
    pub fn add_conversion(
        &self,
        user_id: &str,
        from_currency: &str,
        to_currency: &str,
        amount: f64,
        result: f64,
    ) -> Result<String, WarehouseError> {
        let user_id = require_user(user_id)?;
        if !amount.is_finite() || !result.is_finite() {
            return Err(WarehouseError::Rejected(String::from(
                "amount and result must be finite",
            )));
        }

        let id = Uuid::new_v4().to_string();
        let connection = self.manager.acquire()?;
        let params: [&dyn ToSql; 6] = [&id, &user_id, &from_currency, &to_currency, &amount, &result];
        connection.execute(
            "INSERT INTO conversions (id, user_id, from_currency, to_currency, amount, result) \
             VALUES (?, ?, ?, ?, ?, ?)",
            params.as_slice(),
        )?;
        Ok(id)
    }

    /// Most recent conversions of a user, newest first.
    pub fn conversion_history(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ConversionRecord>, WarehouseError> {
        let user_id = require_user(user_id)?;
        if limit == 0 {
            return Err(WarehouseError::Rejected(String::from(
                "limit must be greater than zero",
            )));
        }

        let connection = self.manager.acquire()?;
        let sql = format!(
            "SELECT id, user_id, from_currency, to_currency, amount, result, \
             CAST(created_at AS VARCHAR) \
             FROM conversions WHERE user_id = ? ORDER BY seq DESC LIMIT {limit}"
        );
        let mut statement = connection.prepare(sql.as_str())?;
        let rows = statement.query_map(params![user_id], read_conversion)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Save a pair for a user. Saving an existing pair returns the stored entry.
    pub fn add_favorite(
        &self,
        user_id: &str,
        base_currency: &str,
        target_currency: &str,
    ) -> Result<FavoritePair, WarehouseError> {
        let user_id = require_user(user_id)?;
        if base_currency.eq_ignore_ascii_case(target_currency) {
            return Err(WarehouseError::Rejected(format!(
                "favorite pair needs two different currencies, got '{base_currency}' twice"
            )));
        }

        let connection = self.manager.acquire()?;
        let id = Uuid::new_v4().to_string();
        let params: [&dyn ToSql; 4] = [&id, &user_id, &base_currency, &target_currency];
        connection.execute(
            "INSERT INTO favorites (id, user_id, base_currency, target_currency) \
             VALUES (?, ?, ?, ?) ON CONFLICT DO NOTHING",
            params.as_slice(),
        )?;

        let params: [&dyn ToSql; 3] = [&user_id, &base_currency, &target_currency];
        let favorite = connection.query_row(
            "SELECT id, user_id, base_currency, target_currency, CAST(created_at AS VARCHAR) \
             FROM favorites WHERE user_id = ? AND base_currency = ? AND target_currency = ?",
            params.as_slice(),
            read_favorite,
        )?;
        Ok(favorite)
    }

    /// Favorites of a user in the order they were saved.
    pub fn favorites(&self, user_id: &str) -> Result<Vec<FavoritePair>, WarehouseError> {
        let user_id = require_user(user_id)?;
        let connection = self.manager.acquire()?;
        let mut statement = connection.prepare(
            "SELECT id, user_id, base_currency, target_currency, CAST(created_at AS VARCHAR) \
             FROM favorites WHERE user_id = ? ORDER BY seq ASC",
        )?;
        let rows = statement.query_map(params![user_id], read_favorite)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Delete one of the user's favorites. Returns whether a row was removed.
    pub fn remove_favorite(&self, user_id: &str, favorite_id: &str) -> Result<bool, WarehouseError> {
        let user_id = require_user(user_id)?;
        let connection = self.manager.acquire()?;
        let params: [&dyn ToSql; 2] = [&favorite_id, &user_id];
        let removed = connection.execute(
            "DELETE FROM favorites WHERE id = ? AND user_id = ?",
            params.as_slice(),
        )?;
        Ok(removed > 0)
    }
}

fn require_user(user_id: &str) -> Result<&str, WarehouseError> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(WarehouseError::Rejected(String::from(
            "user id cannot be empty",
        )));
    }
    Ok(trimmed)
}

fn read_conversion(row: &Row<'_>) -> Result<ConversionRecord, ::duckdb::Error> {
    Ok(ConversionRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        from_currency: row.get(2)?,
        to_currency: row.get(3)?,
        amount: row.get(4)?,
        result: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn read_favorite(row: &Row<'_>) -> Result<FavoritePair, ::duckdb::Error> {
    Ok(FavoritePair {
        id: row.get(0)?,
        user_id: row.get(1)?,
        base_currency: row.get(2)?,
        target_currency: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn resolve_fxlens_home() -> PathBuf {
    if let Some(path) = env::var_os(HOME_ENV) {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".fxlens");
    }

    PathBuf::from(".fxlens")
}
