/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::goal::Goal;
use crate::selection::SelectionMode;
use crate::world::Grid;
use crate::AgentError;

/// Largest starting budget a config may ask for. Cleaning keeps adding points, so the budget
/// needs headroom below `i32::MAX`.
pub const MAX_INITIAL_POINTS: i32 = 1_000_000;

/// Errors from loading or validating a simulation config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {reason}")]
    Invalid { reason: String },

    #[error("invalid world: {0}")]
    World(#[from] AgentError),
}

/// Layout and initial contents of the grid. Randomized placement is not supported; dust and
/// items go exactly where listed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cells: usize,
    pub width: usize,
    pub excluded: Vec<usize>,
    pub dust: Vec<usize>,
    pub items: Vec<usize>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cells: 15,
            width: 5,
            excluded: vec![3, 4, 13, 14],
            dust: vec![],
            items: vec![],
        }
    }
}

impl GridConfig {
    /// Build the grid this config describes.
    pub fn build(&self) -> Result<Grid, AgentError> {
        let mut grid = Grid::new(self.cells)
            .with_width(self.width)
            .with_excluded(self.excluded.iter().copied())?;
        for &index in &self.dust {
            grid.place_dust(index)?;
        }
        for &index in &self.items {
            grid.place_item(index)?;
        }
        Ok(grid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub agent_name: String,
    pub initial_points: i32,
    pub goal: Goal,
    pub selection: SelectionMode,
    pub grid: GridConfig,
    pub max_cycles: u32,

    /// How long aspirating or grabbing blocks for. 0 skips the wait entirely.
    pub actuation_delay_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            agent_name: "vacuum".to_string(),
            initial_points: 10,
            goal: Goal::default(),
            selection: SelectionMode::default(),
            grid: GridConfig::default(),
            max_cycles: 100,
            actuation_delay_ms: 0,
        }
    }
}

impl SimulationConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: SimulationConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn actuation_delay(&self) -> Duration {
        Duration::from_millis(self.actuation_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_points <= 0 || self.initial_points > MAX_INITIAL_POINTS {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "initial_points must be in 1..={}, got {}",
                    MAX_INITIAL_POINTS, self.initial_points
                ),
            });
        }
        let grid = self.grid.build()?;
        grid.patrol_path().map_err(|_| ConfigError::Invalid {
            reason: "every cell of the grid is excluded".to_string(),
        })?;
        Ok(())
    }
}
