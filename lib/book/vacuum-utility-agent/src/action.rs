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

use serde::{Deserialize, Serialize};

use crate::agent::UtilityVacuumAgent;
use crate::state::StateCode;
use crate::{Actuator, AgentError, Sensor};

/// Action is one of the four things the agent can do in a decision cycle. Actions carry no
/// state; the agent they act on is passed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Vacuum the current cell, clearing both dust and any item on it.
    Aspirate,

    /// Advance to the next cell of the path.
    MoveRobot,

    /// Pick up the item on the current cell, leaving any dust.
    Grab,

    /// Stay put.
    DoNothing,
}

impl Action {
    /// Enumeration order. Ties during selection go to whichever comes first here.
    pub const ALL: [Action; 4] = [
        Action::Aspirate,
        Action::MoveRobot,
        Action::Grab,
        Action::DoNothing,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Action::Aspirate => "Aspirate",
            Action::MoveRobot => "MoveRobot",
            Action::Grab => "Grab",
            Action::DoNothing => "DoNothing",
        }
    }

    /// Apply this action's effect to the agent and the cell it stands on.
    pub fn act<W>(self, agent: &mut UtilityVacuumAgent, world: &mut W) -> Result<(), AgentError>
    where
        W: Sensor + Actuator,
    {
        agent.execute(self, world)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Get every action the agent may undertake in the given state.
///
/// All four actions are currently possible in every state. The state is taken so that pruning
/// impossible actions has a place to live.
pub fn enumerate_actions(_state: StateCode) -> Vec<Action> {
    Action::ALL.to_vec()
}
