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

//! A goal-based, utility-driven vacuum agent.
//!
//! The agent patrols a cyclic path through a grid of cells that may hold dust and items. Every
//! decision cycle it senses its cell, scores each of its four actions against the active goal
//! using a fixed utility table, and performs the best one. Moving costs points, cleaning earns
//! them, and the agent dies when its points run out.
//!
//! See:
//! -  Chapter 2: Intelligent Agents, goal-based and utility-based agents

// PEAS - Performance, Environment, Action, Sensing

pub mod action;
pub mod agent;
pub mod config;
pub mod delay;
pub mod error;
pub mod goal;
pub mod selection;
pub mod simulation;
pub mod state;
pub mod utility;
pub mod world;

pub use action::Action;
pub use agent::{AgentStatus, UtilityVacuumAgent};
pub use config::{ConfigError, SimulationConfig};
pub use error::AgentError;
pub use goal::Goal;
pub use selection::SelectionMode;
pub use simulation::{Simulation, SimulationReport};
pub use state::{EnvironmentState, StateCode};
pub use world::{Cell, Grid, Path};

/// A Sensor reports what occupies a cell. Reads are pure and always reflect the latest
/// actuation. Asking about a cell the world does not have is an error.
pub trait Sensor {
    fn has_dust(&self, cell: usize) -> Result<bool, AgentError>;
    fn has_item(&self, cell: usize) -> Result<bool, AgentError>;
}

/// An Actuator changes what occupies a cell. Clearing a flag that is already clear does nothing;
/// writing to a cell the world does not have is an error.
pub trait Actuator {
    fn clear_dust(&mut self, cell: usize) -> Result<(), AgentError>;
    fn clear_item(&mut self, cell: usize) -> Result<(), AgentError>;

    /// Mark whether the agent is standing on a cell. Only the agent's own movement calls this.
    fn set_agent_presence(&mut self, cell: usize, present: bool) -> Result<(), AgentError>;
}

/// An Environment is a world the agent can both sense and act on, with a performance measure.
///
/// Notice that the Environment is not aware of the agent beyond its presence flag.
pub trait Environment: Sensor + Actuator {
    type Score: num_traits::NumAssign + Copy;

    /// Returns the score of the Environment. This is not cumulative or stateful. This is the score
    /// of the Environment at the current state.
    fn score(&self) -> Self::Score;
}

impl Environment for Grid {
    type Score = usize;

    fn score(&self) -> Self::Score {
        self.clean_cells()
    }
}
