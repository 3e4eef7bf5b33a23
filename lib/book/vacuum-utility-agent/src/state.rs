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

use crate::AgentError;

/// StateCode is the 2-bit encoding of what the agent's current cell holds. It is derived fresh
/// every decision cycle and never stored, since cleaning invalidates it immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateCode {
    /// Neither dust nor an item.
    Empty,

    /// Dust only.
    Dust,

    /// An item only.
    Item,

    /// Both dust and an item.
    DustAndItem,
}

impl StateCode {
    /// Every state code, in code order.
    pub const ALL: [StateCode; 4] = [
        StateCode::Empty,
        StateCode::Dust,
        StateCode::Item,
        StateCode::DustAndItem,
    ];

    pub fn from_flags(has_dust: bool, has_item: bool) -> Self {
        match (has_dust, has_item) {
            (false, false) => StateCode::Empty,
            (true, false) => StateCode::Dust,
            (false, true) => StateCode::Item,
            (true, true) => StateCode::DustAndItem,
        }
    }

    /// The numeric code: 0 = neither, 1 = dust only, 2 = item only, 3 = both.
    pub fn code(self) -> u8 {
        match self {
            StateCode::Empty => 0,
            StateCode::Dust => 1,
            StateCode::Item => 2,
            StateCode::DustAndItem => 3,
        }
    }
}

impl TryFrom<u8> for StateCode {
    type Error = AgentError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(StateCode::Empty),
            1 => Ok(StateCode::Dust),
            2 => Ok(StateCode::Item),
            3 => Ok(StateCode::DustAndItem),
            _ => Err(AgentError::InvalidStateCode(code)),
        }
    }
}

impl std::fmt::Display for StateCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// EnvironmentState is what the agent perceives at the start of a decision cycle: its position
/// in the path and the state of the cell there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnvironmentState {
    /// Index into the agent's path.
    pub position: usize,

    /// Occupancy of the cell at that position.
    pub state: StateCode,
}

impl EnvironmentState {
    /// The `[position, code]` pair form of the percept.
    pub fn as_pair(&self) -> (usize, u8) {
        (self.position, self.state.code())
    }
}
