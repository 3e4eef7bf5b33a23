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

use num_traits::Zero;
use tracing::info;

use crate::action::Action;
use crate::agent::{AgentStatus, UtilityVacuumAgent};
use crate::config::{ConfigError, SimulationConfig};
use crate::delay::{Delay, NoDelay, ThreadSleep};
use crate::goal::Goal;
use crate::world::Grid;
use crate::{AgentError, Environment};

/// What happened over a whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport<Score> {
    /// Decision cycles actually run.
    pub cycles: u32,

    /// The action taken in each cycle, in order.
    pub actions: Vec<Action>,

    pub final_points: i32,
    pub status: AgentStatus,

    /// Sum of the environment's score after every cycle, the running performance measure.
    pub score: Score,

    /// The environment's score after the last cycle. For a Grid, its clean cells.
    pub final_score: Score,
}

/// A Simulation drives one agent through decision cycles in an Environment, keeping the
/// performance score up to date. It is the scheduler: the agent itself never loops.
///
/// A dead agent is never driven. The run ends as soon as the agent's points run out, or after
/// `max_cycles` cycles, whichever comes first.
pub struct Simulation<_Environment>
where
    _Environment: Environment,
{
    environment: _Environment,
    agent: UtilityVacuumAgent,
    goal: Goal,
    max_cycles: u32,
    cycles: u32,
    actions: Vec<Action>,
    score: _Environment::Score,
}

impl<_Environment> Simulation<_Environment>
where
    _Environment: Environment,
{
    /// Place the agent in the environment, ready to run.
    pub fn new(
        mut environment: _Environment,
        agent: UtilityVacuumAgent,
        goal: Goal,
        max_cycles: u32,
    ) -> Result<Self, AgentError> {
        agent.enter(&mut environment)?;
        Ok(Self {
            environment,
            agent,
            goal,
            max_cycles,
            cycles: 0,
            actions: Vec::new(),
            score: _Environment::Score::zero(),
        })
    }

    /// Switch goals between cycles.
    pub fn set_goal(&mut self, goal: Goal) {
        self.goal = goal;
    }

    /// Run a single decision cycle. Returns None, without touching the agent, once it is dead.
    pub fn step(&mut self) -> Result<Option<Action>, AgentError> {
        if !self.agent.is_alive() {
            return Ok(None);
        }
        let action = self.agent.decide_and_act(&mut self.environment, self.goal)?;
        self.cycles += 1;
        self.actions.push(action);
        self.score += self.environment.score();
        Ok(Some(action))
    }

    /// Run cycles until the agent dies or the cycle budget is spent.
    pub fn run(&mut self) -> Result<SimulationReport<_Environment::Score>, AgentError> {
        while self.cycles < self.max_cycles {
            if self.step()?.is_none() {
                break;
            }
        }
        info!(
            agent = %self.agent.name(),
            cycles = self.cycles,
            points = self.agent.points(),
            alive = self.agent.is_alive(),
            "simulation finished"
        );
        Ok(self.report())
    }

    pub fn report(&self) -> SimulationReport<_Environment::Score> {
        SimulationReport {
            cycles: self.cycles,
            actions: self.actions.clone(),
            final_points: self.agent.points(),
            status: self.agent.status(),
            score: self.score,
            final_score: self.environment.score(),
        }
    }

    /// Cumulative performance: the environment's score summed over every cycle run so far.
    pub fn score(&self) -> _Environment::Score {
        self.score
    }

    pub fn environment(&self) -> &_Environment {
        &self.environment
    }

    pub fn agent(&self) -> &UtilityVacuumAgent {
        &self.agent
    }
}

impl Simulation<Grid> {
    /// Build the grid and agent a config describes.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.grid.build()?;
        let path = grid.patrol_path()?;
        let delay: Box<dyn Delay> = if config.actuation_delay_ms == 0 {
            Box::new(NoDelay)
        } else {
            Box::new(ThreadSleep)
        };
        let agent = UtilityVacuumAgent::new(&config.agent_name, config.initial_points, path)
            .with_selection_mode(config.selection)
            .with_delay(delay, config.actuation_delay());
        Ok(Simulation::new(grid, agent, config.goal, config.max_cycles)?)
    }
}
