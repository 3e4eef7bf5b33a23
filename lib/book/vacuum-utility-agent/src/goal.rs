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

/// Goal is the objective the agent is currently optimizing. It is chosen by whoever drives the
/// agent and is never derived from what the agent senses.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Clean dust and collect items.
    #[default]
    MaximizeCollection,

    /// Get through the path as fast as possible.
    MinimizeTime,

    /// Spend as little energy as possible.
    MinimizeEnergy,
}

impl Goal {
    pub const ALL: [Goal; 3] = [
        Goal::MaximizeCollection,
        Goal::MinimizeTime,
        Goal::MinimizeEnergy,
    ];
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Goal::MaximizeCollection => write!(f, "maximize_collection"),
            Goal::MinimizeTime => write!(f, "minimize_time"),
            Goal::MinimizeEnergy => write!(f, "minimize_energy"),
        }
    }
}

/// Goal name was not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown goal: {0}")]
pub struct ParseGoalError(String);

impl std::str::FromStr for Goal {
    type Err = ParseGoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Goal::ALL
            .into_iter()
            .find(|goal| goal.to_string() == s)
            .ok_or_else(|| ParseGoalError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_names_parse_back() {
        for goal in Goal::ALL {
            assert_eq!(goal.to_string().parse::<Goal>(), Ok(goal));
        }
    }

    #[test]
    fn test_unknown_goal_name() {
        assert_eq!(
            "tidy".parse::<Goal>(),
            Err(ParseGoalError("tidy".to_string()))
        );
    }

    #[test]
    fn test_goal_deserializes_from_snake_case() {
        let goal: Goal = serde_json::from_str("\"minimize_energy\"").expect("parse failed");
        assert_eq!(goal, Goal::MinimizeEnergy);
    }
}
