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

use crate::action::{enumerate_actions, Action};
use crate::goal::Goal;
use crate::state::StateCode;
use crate::utility::{utility, Utility};

/// How the winning action is picked out of the scored candidates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// The candidate with the highest utility. Ties go to the first candidate in enumeration
    /// order.
    #[default]
    Maximum,

    /// Compatibility mode reproducing the older scoring loop, which reset its best score to -1
    /// before every comparison. The effect is that the last candidate with a utility of at least
    /// 0 wins, whatever the other scores are. Only useful for parity runs.
    LegacyLastQualifying,
}

/// Below every score in the utility table. The legacy loop compared against this on every
/// iteration.
const LEGACY_SENTINEL: Utility = -1;

/// Pick one of `candidates` for the given state and goal. Returns None only when there are no
/// candidates (or, in legacy mode, none scoring above the sentinel).
pub fn select_from(
    candidates: &[Action],
    state: StateCode,
    goal: Goal,
    mode: SelectionMode,
) -> Option<Action> {
    match mode {
        SelectionMode::Maximum => {
            let mut best: Option<(Action, Utility)> = None;
            for &action in candidates {
                let score = utility(action, goal, state);
                match best {
                    Some((_, best_score)) if score <= best_score => {}
                    _ => best = Some((action, score)),
                }
            }
            best.map(|(action, _)| action)
        }
        SelectionMode::LegacyLastQualifying => candidates
            .iter()
            .rev()
            .find(|&&action| utility(action, goal, state) > LEGACY_SENTINEL)
            .copied(),
    }
}

/// Select the action to perform for the given state and goal, out of every action enumerated
/// for that state. None when enumeration leaves nothing to pick from.
pub fn select_action(state: StateCode, goal: Goal, mode: SelectionMode) -> Option<Action> {
    let candidates = enumerate_actions(state);
    select_from(&candidates, state, goal, mode)
}
