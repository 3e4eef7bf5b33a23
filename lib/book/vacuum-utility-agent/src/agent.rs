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

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::action::Action;
use crate::delay::{Delay, NoDelay};
use crate::goal::Goal;
use crate::selection::{select_action, SelectionMode};
use crate::state::{EnvironmentState, StateCode};
use crate::utility::utility;
use crate::world::Path;
use crate::{Actuator, AgentError, Sensor};

/// Points spent by every move to the next cell.
pub const MOVE_COST: i32 = 1;

/// Points gained by aspirating a cell.
pub const ASPIRATE_GAIN: i32 = 1;

/// Points gained by grabbing an item.
pub const GRAB_GAIN: i32 = 3;

/// How long the hardware takes to aspirate or grab.
pub const DEFAULT_ACTUATION_TIME: Duration = Duration::from_millis(500);

/// Whether the agent can still act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentStatus {
    /// Points are above zero.
    Alive,

    /// Points ran out. Nothing happens from here on.
    Dead,
}

/// UtilityVacuumAgent patrols a cyclic path and, once per decision cycle, senses its cell,
/// scores every action against its current goal and performs the best one.
///
/// Points are its energy budget. Moving costs a point; cleaning earns points back. Note that the
/// signs are asymmetric on purpose: aspirating and grabbing gain points rather than spending
/// them. The agent dies when its points drop to 0.
#[derive(Debug)]
pub struct UtilityVacuumAgent {
    name: String,
    points: i32,
    path: Path,
    position: usize,
    selection_mode: SelectionMode,
    delay: Box<dyn Delay>,
    actuation_time: Duration,
}

impl UtilityVacuumAgent {
    /// Create an agent at the start of its path.
    pub fn new(name: impl Into<String>, points: i32, path: Path) -> Self {
        Self {
            name: name.into(),
            points,
            path,
            position: 0,
            selection_mode: SelectionMode::default(),
            delay: Box::new(NoDelay),
            actuation_time: DEFAULT_ACTUATION_TIME,
        }
    }

    /// Create an agent over a path given as raw cell indices.
    pub fn from_cells(
        name: impl Into<String>,
        points: i32,
        cells: Vec<usize>,
    ) -> Result<Self, AgentError> {
        Ok(Self::new(name, points, Path::new(cells)?))
    }

    pub fn with_selection_mode(mut self, selection_mode: SelectionMode) -> Self {
        self.selection_mode = selection_mode;
        self
    }

    /// Wait on `delay` for `actuation_time` whenever the agent aspirates or grabs.
    pub fn with_delay(mut self, delay: Box<dyn Delay>, actuation_time: Duration) -> Self {
        self.delay = delay;
        self.actuation_time = actuation_time;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> i32 {
        self.points
    }

    /// Current index into the path.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    pub fn is_alive(&self) -> bool {
        self.points > 0
    }

    pub fn status(&self) -> AgentStatus {
        if self.is_alive() {
            AgentStatus::Alive
        } else {
            AgentStatus::Dead
        }
    }

    /// The cell the agent is standing on.
    pub fn current_cell(&self) -> Result<usize, AgentError> {
        self.path.get(self.position)
    }

    /// Mark the agent as present on its current cell.
    pub fn enter<A: Actuator>(&self, world: &mut A) -> Result<(), AgentError> {
        world.set_agent_presence(self.current_cell()?, true)
    }

    /// Jump to any position in the path. Positions outside the path are an error, never clamped.
    pub fn relocate<A: Actuator>(
        &mut self,
        position: usize,
        world: &mut A,
    ) -> Result<(), AgentError> {
        let to = self.path.get(position)?;
        self.shift_presence(self.current_cell()?, to, world)?;
        self.position = position;
        Ok(())
    }

    /// Sense the cell at the current position. Always reads the sensor, nothing is cached.
    pub fn environment_state<S: Sensor>(
        &self,
        sensor: &S,
    ) -> Result<EnvironmentState, AgentError> {
        let cell = self.current_cell()?;
        let state = StateCode::from_flags(sensor.has_dust(cell)?, sensor.has_item(cell)?);
        debug!(
            agent = %self.name,
            position = self.position,
            cell,
            state = state.code(),
            "sensed"
        );
        Ok(EnvironmentState {
            position: self.position,
            state,
        })
    }

    /// Sense, then pick the best action for the goal without performing it.
    pub fn decide<S: Sensor>(&self, sensor: &S, goal: Goal) -> Result<Action, AgentError> {
        let percept = self.environment_state(sensor)?;
        let action = select_action(percept.state, goal, self.selection_mode).ok_or(
            AgentError::NoActionAvailable {
                state: percept.state.code(),
            },
        )?;
        debug!(
            agent = %self.name,
            %goal,
            %action,
            utility = utility(action, goal, percept.state),
            "selected"
        );
        Ok(action)
    }

    /// Run one full decision cycle: sense, score every action against `goal`, perform the winner
    /// and return it.
    pub fn decide_and_act<W>(&mut self, world: &mut W, goal: Goal) -> Result<Action, AgentError>
    where
        W: Sensor + Actuator,
    {
        self.ensure_alive()?;
        let action = self.decide(&*world, goal)?;
        self.execute(action, world)?;
        Ok(action)
    }

    /// Perform an action chosen by the caller.
    pub fn execute<W>(&mut self, action: Action, world: &mut W) -> Result<(), AgentError>
    where
        W: Sensor + Actuator,
    {
        self.ensure_alive()?;
        let cell = self.current_cell()?;
        match action {
            Action::MoveRobot => {
                let next = self.path.next(self.position);
                let to = self.path.get(next)?;
                self.shift_presence(cell, to, world)?;
                self.position = next;
                self.points -= MOVE_COST;
                info!(
                    agent = %self.name,
                    from = cell,
                    to,
                    points = self.points,
                    "moved to next cell"
                );
            }
            Action::Aspirate => {
                let points = self.gain(ASPIRATE_GAIN)?;
                self.delay.wait(self.actuation_time);
                world.clear_dust(cell)?;
                world.clear_item(cell)?;
                self.points = points;
                info!(agent = %self.name, cell, points = self.points, "aspirated");
            }
            Action::Grab => {
                let points = self.gain(GRAB_GAIN)?;
                self.delay.wait(self.actuation_time);
                world.clear_item(cell)?;
                self.points = points;
                info!(agent = %self.name, cell, points = self.points, "grabbed item");
            }
            Action::DoNothing => {
                debug!(agent = %self.name, cell, "idle");
            }
        }

        if !self.is_alive() {
            info!(agent = %self.name, points = self.points, "out of points");
        }
        Ok(())
    }

    // Points after gaining `gain`, without applying them yet.
    fn gain(&self, gain: i32) -> Result<i32, AgentError> {
        self.points
            .checked_add(gain)
            .ok_or_else(|| AgentError::PointsOverflow {
                name: self.name.clone(),
                points: self.points,
                gain,
            })
    }

    // Move the presence flag from one cell to another. If the destination rejects it, the flag
    // goes back where it was.
    fn shift_presence<A: Actuator>(
        &self,
        from: usize,
        to: usize,
        world: &mut A,
    ) -> Result<(), AgentError> {
        world.set_agent_presence(from, false)?;
        if let Err(e) = world.set_agent_presence(to, true) {
            world.set_agent_presence(from, true)?;
            return Err(e);
        }
        Ok(())
    }

    fn ensure_alive(&self) -> Result<(), AgentError> {
        if self.is_alive() {
            return Ok(());
        }
        warn!(agent = %self.name, points = self.points, "dead agent asked to act");
        Err(AgentError::DeadAgent {
            name: self.name.clone(),
            points: self.points,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use proptest::prelude::*;

    use super::*;
    use crate::world::Grid;

    #[derive(Debug, Default, Clone)]
    struct RecordingDelay(Rc<RefCell<Vec<Duration>>>);

    impl Delay for RecordingDelay {
        fn wait(&self, duration: Duration) {
            self.0.borrow_mut().push(duration);
        }
    }

    fn agent_on(grid: &mut Grid, points: i32) -> UtilityVacuumAgent {
        let path = grid.patrol_path().expect("path failed");
        let agent = UtilityVacuumAgent::new("robot", points, path);
        agent.enter(grid).expect("enter failed");
        agent
    }

    #[test]
    fn test_empty_path_fails_construction() {
        assert_eq!(
            UtilityVacuumAgent::from_cells("robot", 5, vec![]).unwrap_err(),
            AgentError::EmptyPath
        );
    }

    #[test]
    fn test_three_moves_around_a_three_cell_path() {
        let mut grid = Grid::new(3);
        let mut agent = agent_on(&mut grid, 5);

        let mut positions = vec![agent.position()];
        for _ in 0..3 {
            agent
                .execute(Action::MoveRobot, &mut grid)
                .expect("move failed");
            positions.push(agent.position());
        }

        assert_eq!(positions, vec![0, 1, 2, 0]);
        assert_eq!(agent.points(), 2);
        assert_eq!(grid.agent_cell(), Some(0));
    }

    #[test]
    fn test_move_carries_presence_flag() {
        let mut grid = Grid::new(2);
        let mut agent = agent_on(&mut grid, 5);
        assert!(grid.cell(0).unwrap().has_agent);

        agent
            .execute(Action::MoveRobot, &mut grid)
            .expect("move failed");
        assert!(!grid.cell(0).unwrap().has_agent);
        assert!(grid.cell(1).unwrap().has_agent);
    }

    #[test]
    fn test_last_point_spent_on_move_kills_agent() {
        let mut grid = Grid::new(2);
        let mut agent = agent_on(&mut grid, 1);

        agent
            .execute(Action::MoveRobot, &mut grid)
            .expect("move failed");
        assert_eq!(agent.points(), 0);
        assert!(!agent.is_alive());
        assert_eq!(agent.status(), AgentStatus::Dead);

        for action in Action::ALL {
            assert_eq!(
                agent.execute(action, &mut grid),
                Err(AgentError::DeadAgent {
                    name: "robot".to_string(),
                    points: 0
                })
            );
        }
        assert_eq!(agent.position(), 1);
        assert_eq!(agent.points(), 0);
    }

    #[test]
    fn test_dead_agent_does_not_sense_or_act() {
        let mut grid = Grid::new(1);
        grid.place_dust(0).expect("place failed");
        let mut agent = agent_on(&mut grid, 0);

        assert!(agent
            .decide_and_act(&mut grid, Goal::MaximizeCollection)
            .is_err());
        assert_eq!(grid.has_dust(0), Ok(true));
    }

    #[test]
    fn test_aspirate_clears_dust_and_item_and_gains_a_point() {
        let mut grid = Grid::new(1);
        grid.place_dust(0).expect("place failed");
        grid.place_item(0).expect("place failed");
        let mut agent = agent_on(&mut grid, 5);

        agent
            .execute(Action::Aspirate, &mut grid)
            .expect("aspirate failed");
        assert!(grid.cell(0).unwrap().is_clean());
        assert_eq!(agent.points(), 6);
    }

    #[test]
    fn test_grab_leaves_dust_and_gains_three_points() {
        let mut grid = Grid::new(1);
        grid.place_dust(0).expect("place failed");
        grid.place_item(0).expect("place failed");
        let mut agent = agent_on(&mut grid, 5);

        agent.execute(Action::Grab, &mut grid).expect("grab failed");
        assert_eq!(grid.has_dust(0), Ok(true));
        assert_eq!(grid.has_item(0), Ok(false));
        assert_eq!(agent.points(), 8);
    }

    #[test]
    fn test_do_nothing_changes_nothing() {
        let mut grid = Grid::new(1);
        grid.place_dust(0).expect("place failed");
        let mut agent = agent_on(&mut grid, 5);
        let before = grid.clone();

        agent
            .execute(Action::DoNothing, &mut grid)
            .expect("do nothing failed");
        assert_eq!(grid, before);
        assert_eq!(agent.points(), 5);
        assert_eq!(agent.position(), 0);
    }

    #[test]
    fn test_only_cleaning_waits_on_hardware() {
        let delay = RecordingDelay::default();
        let waits = Rc::clone(&delay.0);
        let mut grid = Grid::new(2);
        let mut agent =
            agent_on(&mut grid, 5).with_delay(Box::new(delay), Duration::from_millis(500));

        for action in Action::ALL {
            agent.execute(action, &mut grid).expect("execute failed");
        }
        assert_eq!(
            *waits.borrow(),
            vec![Duration::from_millis(500), Duration::from_millis(500)]
        );
    }

    #[test]
    fn test_dusty_cell_for_collection_grabs() {
        let mut grid = Grid::new(3);
        grid.place_dust(1).expect("place failed");
        let mut agent = agent_on(&mut grid, 5);
        agent.relocate(1, &mut grid).expect("relocate failed");

        let percept = agent.environment_state(&grid).expect("sense failed");
        assert_eq!(percept.as_pair(), (1, 1));

        let action = agent
            .decide_and_act(&mut grid, Goal::MaximizeCollection)
            .expect("cycle failed");
        assert_eq!(action, Action::Grab);
        assert_eq!(agent.points(), 8);
    }

    #[test]
    fn test_empty_cell_for_energy_stays_put() {
        let mut grid = Grid::new(3);
        let mut agent = agent_on(&mut grid, 5);

        let action = agent
            .decide_and_act(&mut grid, Goal::MinimizeEnergy)
            .expect("cycle failed");
        assert_eq!(action, Action::DoNothing);
        assert_eq!(agent.points(), 5);
        assert_eq!(agent.position(), 0);
    }

    #[test]
    fn test_state_is_sensed_fresh_after_cleaning() {
        let mut grid = Grid::new(2);
        grid.place_dust(0).expect("place failed");
        grid.place_item(0).expect("place failed");
        let mut agent = agent_on(&mut grid, 5);

        let action = agent
            .decide_and_act(&mut grid, Goal::MinimizeTime)
            .expect("cycle failed");
        assert_eq!(action, Action::Aspirate);
        assert_eq!(
            agent.environment_state(&grid).expect("sense failed").state,
            StateCode::Empty
        );

        let action = agent
            .decide_and_act(&mut grid, Goal::MinimizeTime)
            .expect("cycle failed");
        assert_eq!(action, Action::MoveRobot);
        assert_eq!(agent.position(), 1);
    }

    #[test]
    fn test_legacy_agent_always_does_nothing() {
        let mut grid = Grid::new(2);
        grid.place_dust(0).expect("place failed");
        let mut agent =
            agent_on(&mut grid, 5).with_selection_mode(SelectionMode::LegacyLastQualifying);

        for goal in Goal::ALL {
            let action = agent.decide_and_act(&mut grid, goal).expect("cycle failed");
            assert_eq!(action, Action::DoNothing);
        }
        assert_eq!(grid.has_dust(0), Ok(true));
    }

    #[test]
    fn test_relocate_out_of_path_is_an_error() {
        let mut grid = Grid::new(3);
        let mut agent = agent_on(&mut grid, 5);
        assert_eq!(
            agent.relocate(3, &mut grid),
            Err(AgentError::InvalidPosition { index: 3, len: 3 })
        );
        assert_eq!(agent.position(), 0);
        assert_eq!(grid.agent_cell(), Some(0));
    }

    #[test]
    fn test_moving_onto_unknown_cell_is_an_error() {
        let mut grid = Grid::new(3);
        let mut agent =
            UtilityVacuumAgent::from_cells("robot", 5, vec![0, 99]).expect("agent failed");
        agent.enter(&mut grid).expect("enter failed");

        assert_eq!(
            agent.execute(Action::MoveRobot, &mut grid),
            Err(AgentError::UnknownCell { index: 99, len: 3 })
        );
        assert_eq!(agent.position(), 0);
        assert_eq!(agent.points(), 5);
        assert_eq!(grid.agent_cell(), Some(0));
    }

    #[test]
    fn test_sensing_unknown_cell_is_an_error() {
        let mut grid = Grid::new(3);
        let agent = UtilityVacuumAgent::from_cells("robot", 5, vec![7]).expect("agent failed");

        assert_eq!(
            agent.enter(&mut grid),
            Err(AgentError::UnknownCell { index: 7, len: 3 })
        );
        assert_eq!(
            agent.environment_state(&grid),
            Err(AgentError::UnknownCell { index: 7, len: 3 })
        );
    }

    #[test]
    fn test_points_overflow_is_an_error_and_leaves_cell_alone() {
        let mut grid = Grid::new(1);
        grid.place_item(0).expect("place failed");
        let mut agent = agent_on(&mut grid, i32::MAX);

        for action in [Action::Grab, Action::Aspirate] {
            assert!(matches!(
                agent.execute(action, &mut grid),
                Err(AgentError::PointsOverflow {
                    points: i32::MAX,
                    ..
                })
            ));
        }
        assert_eq!(agent.points(), i32::MAX);
        assert_eq!(grid.has_item(0), Ok(true));
    }

    #[test]
    fn test_action_act_dispatches_to_agent() {
        let mut grid = Grid::new(2);
        let mut agent = agent_on(&mut grid, 5);
        Action::MoveRobot
            .act(&mut agent, &mut grid)
            .expect("act failed");
        assert_eq!(agent.position(), 1);
        assert_eq!(agent.points(), 4);
    }

    proptest! {
        #[test]
        fn test_full_lap_returns_to_start(
            len in 1..20usize,
            start in 0..20usize,
            extra_points in 1..10i32,
        ) {
            let start = start % len;
            let mut grid = Grid::new(len);
            let mut agent = agent_on(&mut grid, len as i32 + extra_points);
            agent.relocate(start, &mut grid).expect("relocate failed");
            let points = agent.points();

            for _ in 0..len {
                agent.execute(Action::MoveRobot, &mut grid).expect("move failed");
            }

            prop_assert_eq!(agent.position(), start);
            prop_assert_eq!(agent.points(), points - len as i32);
            prop_assert_eq!(grid.agent_cell(), Some(start));
        }
    }
}
