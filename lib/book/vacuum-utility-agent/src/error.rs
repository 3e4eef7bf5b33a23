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

/// Errors surfaced by the decision engine and the world it acts on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    /// The agent's position does not index into its path.
    #[error("position {index} is outside of a path of length {len}")]
    InvalidPosition { index: usize, len: usize },

    /// An action was requested from an agent whose points are exhausted.
    #[error("agent {name} is dead ({points} points), refusing to act")]
    DeadAgent { name: String, points: i32 },

    /// An agent cannot patrol a path with no cells in it.
    #[error("path must contain at least one cell")]
    EmptyPath,

    /// A path named a cell that the grid does not own, or that is excluded.
    #[error("cell {index} is not part of a grid of {len} cells")]
    UnknownCell { index: usize, len: usize },

    /// Gaining more points would overflow the agent's budget.
    #[error("agent {name} cannot gain {gain} points on top of {points}")]
    PointsOverflow { name: String, points: i32, gain: i32 },

    /// Every action was pruned for this state, so there is nothing to select.
    #[error("no action available in state {state}")]
    NoActionAvailable { state: u8 },

    /// Environment state codes only range over 0..=3.
    #[error("invalid environment state code: {0}")]
    InvalidStateCode(u8),
}
