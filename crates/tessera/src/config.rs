//! Configuration types for the Tessera engine.
//!
//! This module provides configuration structures that control grid
//! behavior. All types implement [`serde::Deserialize`] for flexible
//! loading from external sources.
//!
//! # Example
//!
//! ```
//! # use tessera_engine::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.grid().row_capacity(), 4);
//! ```

use serde::Deserialize;

/// Top-level application configuration for the engine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Grid configuration section.
    #[serde(default)]
    grid: GridConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified grid configuration.
    pub fn new(grid: GridConfig) -> Self {
        Self { grid }
    }

    /// Returns the grid configuration.
    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }
}

/// Grid behavior configuration.
///
/// The row capacity matches what the hosting UI offers as drop zones; the
/// builder ships with four columns per row.
#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    /// Maximum number of columns a row may hold.
    #[serde(default = "GridConfig::default_row_capacity")]
    row_capacity: usize,
}

impl GridConfig {
    /// Creates a new [`GridConfig`] with the given row capacity.
    pub fn new(row_capacity: usize) -> Self {
        Self { row_capacity }
    }

    /// Returns the maximum number of columns a row may hold.
    pub fn row_capacity(&self) -> usize {
        self.row_capacity
    }

    fn default_row_capacity() -> usize {
        4
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_capacity: Self::default_row_capacity(),
        }
    }
}
