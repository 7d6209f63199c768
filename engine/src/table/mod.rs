//! Time-series flattening of a council's history
//!
//! External collaborators (dashboard, plotting, persistence) consume a
//! plain columnar table instead of walking the nested month records.
//! Columns are `month`, `pool_balance`, `annual_funding_added`, then
//! `dist_to_<id>` and `alloc_to_<id>` for every grantee, one row per
//! simulated month.

use crate::models::MonthRecord;
use serde::{Deserialize, Serialize};

/// Columnar view of a simulation run's history
///
/// # Example
/// ```
/// use council_simulator_core_rs::{run_simulation, SimulationConfig};
///
/// let config = SimulationConfig {
///     num_members: 3,
///     num_grantees: 2,
///     duration_months: 4,
///     ..SimulationConfig::default()
/// };
/// let run = run_simulation(&config).unwrap();
///
/// assert_eq!(run.table.num_rows(), 4);
/// assert!(run.table.column("dist_to_g1").is_some());
/// assert!(run.table.column("pool_balance").is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeriesTable {
    /// Column names, in column order
    columns: Vec<String>,

    /// Row-major data; `rows[month][column]`
    rows: Vec<Vec<f64>>,
}

impl TimeSeriesTable {
    /// Flatten month records into a table
    ///
    /// `grantee_ids` fixes the per-grantee column order (the council's
    /// grantee order). Empty history yields an empty table with no
    /// columns.
    pub fn from_history(history: &[MonthRecord], grantee_ids: &[String]) -> Self {
        if history.is_empty() {
            return Self {
                columns: Vec::new(),
                rows: Vec::new(),
            };
        }

        let mut columns = vec![
            "month".to_string(),
            "pool_balance".to_string(),
            "annual_funding_added".to_string(),
        ];
        for id in grantee_ids {
            columns.push(format!("dist_to_{}", id));
        }
        for id in grantee_ids {
            columns.push(format!("alloc_to_{}", id));
        }

        let rows = history
            .iter()
            .map(|record| {
                let mut row = Vec::with_capacity(columns.len());
                row.push(record.month as f64);
                row.push(record.pool_balance);
                row.push(record.annual_funding_added);
                for id in grantee_ids {
                    row.push(record.distribution.get(id).copied().unwrap_or(0.0));
                }
                for id in grantee_ids {
                    row.push(record.allocations.get(id).copied().unwrap_or(0) as f64);
                }
                row
            })
            .collect();

        Self { columns, rows }
    }

    /// Column names, in column order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows (simulated months)
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds any rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One row (month) of values, in column order
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Extract a full column by name
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }

    /// Single cell lookup by row index and column name
    pub fn value(&self, row: usize, column: &str) -> Option<f64> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).map(|r| r[idx])
    }

    /// Serialize the table to JSON for external collaborators
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
