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

//! Goal-conditioned utility table.
//!
//! Each (state, action) pair carries one hand-authored score per goal, from 0 to 5, higher is
//! more desirable. The numbers are a fixed heuristic and are not derived from anything.

use crate::action::Action;
use crate::goal::Goal;
use crate::state::StateCode;

/// Utility score. Higher is better.
pub type Utility = i32;

/// The three per-goal scores of a single table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scores {
    pub collection: Utility,
    pub energy: Utility,
    pub time: Utility,
}

impl Scores {
    const fn new(collection: Utility, energy: Utility, time: Utility) -> Self {
        Self {
            collection,
            energy,
            time,
        }
    }

    pub fn for_goal(&self, goal: Goal) -> Utility {
        match goal {
            Goal::MaximizeCollection => self.collection,
            Goal::MinimizeEnergy => self.energy,
            Goal::MinimizeTime => self.time,
        }
    }
}

// Rows by state code, columns Aspirate, MoveRobot, Grab, DoNothing. Each entry is
// (collection, energy, time).
const TABLE: [[Scores; 4]; 4] = [
    [
        Scores::new(0, 0, 0),
        Scores::new(3, 0, 3),
        Scores::new(0, 0, 0),
        Scores::new(0, 5, 0),
    ],
    [
        Scores::new(0, 1, 3),
        Scores::new(0, 0, 0),
        Scores::new(5, 1, 3),
        Scores::new(0, 5, 0),
    ],
    [
        Scores::new(0, 1, 5),
        Scores::new(0, 0, 0),
        Scores::new(5, 0, 1),
        Scores::new(0, 5, 0),
    ],
    [
        Scores::new(5, 1, 5),
        Scores::new(0, 0, 0),
        Scores::new(1, 1, 3),
        Scores::new(0, 5, 0),
    ],
];

fn column(action: Action) -> usize {
    match action {
        Action::Aspirate => 0,
        Action::MoveRobot => 1,
        Action::Grab => 2,
        Action::DoNothing => 3,
    }
}

/// Get all three goal scores for an action in a state.
pub fn scores(action: Action, state: StateCode) -> Scores {
    TABLE[state.code() as usize][column(action)]
}

/// Score an action in a state against the active goal.
pub fn utility(action: Action, goal: Goal, state: StateCode) -> Utility {
    scores(action, state).for_goal(goal)
}
