//! Growth Reference Store
//!
//! Loads WHO LMS reference tables from a SQLite dataset into an immutable
//! in-memory map and serves them through the domain's
//! [`ReferenceSource`] trait.
//!
//! # Architecture
//!
//! - SQLite holds the dataset (`dataset_meta` and `lms_reference` tables)
//! - Every row is read once at load time; the connection is then dropped
//! - Lookups are plain map reads, so one store is shared across threads
//!
//! # Examples
//!
//! ```
//! use growth_domain::{MeasurementType, ReferenceSource, Sex};
//! use growth_store::ReferenceStore;
//!
//! let store = ReferenceStore::bundled().unwrap();
//! let table = store.get_table(Sex::Female, MeasurementType::Weight).unwrap();
//! assert_eq!(table.min_age(), 0);
//! ```

#![warn(missing_docs)]

use growth_domain::{
    GrowthError, MeasurementType, ReferenceRow, ReferenceSource, ReferenceTable, Sex,
};
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Version reported when a dataset carries no `dataset_meta.version` row
pub const UNVERSIONED: &str = "unversioned";

const SCHEMA: &str = include_str!("schema.sql");
const BUNDLED_SEED: &str = include_str!("who_reference.sql");

static SHARED: OnceLock<Arc<ReferenceStore>> = OnceLock::new();

/// Errors that can occur while loading reference data
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Row contents the store cannot interpret
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Rows that do not form a valid reference table
    #[error("Invalid reference data: {0}")]
    Reference(#[from] GrowthError),
}

/// Result alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

type TableMap = BTreeMap<Sex, BTreeMap<MeasurementType, ReferenceTable>>;

/// Immutable set of reference tables keyed by sex, then measurement type
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    version: String,
    tables: TableMap,
}

impl ReferenceStore {
    /// Load the dataset compiled into this crate
    pub fn bundled() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        conn.execute_batch(BUNDLED_SEED)?;
        Self::load(&conn)
    }

    /// Load an external SQLite dataset with the same schema
    ///
    /// The file is opened read-only and must already exist.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use growth_store::ReferenceStore;
    ///
    /// let store = ReferenceStore::open("who_full.db").unwrap();
    /// println!("{}", store.dataset_version());
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Self::load(&conn)
    }

    /// Process-wide bundled store, loaded on first use
    pub fn shared() -> Result<Arc<Self>> {
        if let Some(store) = SHARED.get() {
            return Ok(Arc::clone(store));
        }
        let store = Arc::new(Self::bundled()?);
        Ok(Arc::clone(SHARED.get_or_init(|| store)))
    }

    /// Build a store from tables already in memory
    ///
    /// Two tables for the same sex and measurement type are rejected.
    pub fn from_tables<I>(version: impl Into<String>, tables: I) -> Result<Self>
    where
        I: IntoIterator<Item = ReferenceTable>,
    {
        let mut map = TableMap::new();
        for table in tables {
            let (sex, measurement_type) = (table.sex(), table.measurement_type());
            let by_type = map.entry(sex).or_default();
            if by_type.insert(measurement_type, table).is_some() {
                return Err(StoreError::InvalidData(format!(
                    "Duplicate table for {} ({})",
                    measurement_type, sex
                )));
            }
        }

        Ok(Self {
            version: version.into(),
            tables: map,
        })
    }

    /// Version string recorded in the dataset
    pub fn dataset_version(&self) -> &str {
        &self.version
    }

    /// All tables, ordered by sex then measurement type
    pub fn tables(&self) -> impl Iterator<Item = &ReferenceTable> {
        self.tables.values().flat_map(|by_type| by_type.values())
    }

    /// Number of tables held
    pub fn len(&self) -> usize {
        self.tables.values().map(BTreeMap::len).sum()
    }

    /// Whether the dataset had no rows at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn load(conn: &Connection) -> Result<Self> {
        let version: Option<String> = conn
            .query_row(
                "SELECT value FROM dataset_meta WHERE key = 'version'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        let version = version.unwrap_or_else(|| UNVERSIONED.to_string());

        let mut stmt = conn.prepare(
            "SELECT sex, measurement, age_days, l, m, s
             FROM lms_reference
             ORDER BY sex, measurement, age_days",
        )?;
        let raw_rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, f64>(5)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut grouped: BTreeMap<(Sex, MeasurementType), Vec<ReferenceRow>> = BTreeMap::new();
        for (sex, measurement, age_days, l, m, s) in raw_rows {
            let sex = Sex::parse(&sex)
                .ok_or_else(|| StoreError::InvalidData(format!("Unknown sex: {}", sex)))?;
            let measurement_type = MeasurementType::parse(&measurement).ok_or_else(|| {
                StoreError::InvalidData(format!("Unknown measurement: {}", measurement))
            })?;
            let age_in_days = u32::try_from(age_days).map_err(|_| {
                StoreError::InvalidData(format!("Age out of range: {} days", age_days))
            })?;

            grouped
                .entry((sex, measurement_type))
                .or_default()
                .push(ReferenceRow::new(age_in_days, l, m, s));
        }

        let tables = grouped
            .into_iter()
            .map(|((sex, measurement_type), rows)| ReferenceTable::new(sex, measurement_type, rows))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let store = Self::from_tables(version, tables)?;
        tracing::info!(
            version = store.dataset_version(),
            tables = store.len(),
            "Loaded reference dataset"
        );
        Ok(store)
    }
}

impl ReferenceSource for ReferenceStore {
    fn find_table(&self, sex: Sex, measurement_type: MeasurementType) -> Option<&ReferenceTable> {
        self.tables
            .get(&sex)
            .and_then(|by_type| by_type.get(&measurement_type))
    }
}
