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

//! Chapter 2, run a utility-based vacuum agent.

use tracing::info;
use tracing_subscriber::EnvFilter;
use vacuum_utility_agent::{Goal, Simulation, SimulationConfig};

// Usage: ch02-run-utility-agent [CONFIG_JSON] [GOAL]
//
// Without a config the classic 3x5 board is used, with a little dust and a few items seeded so
// there is something to do. GOAL overrides the config's goal and is one of maximize_collection,
// minimize_time or minimize_energy.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let mut config = match args.next() {
        Some(path) => SimulationConfig::from_path(&path)?,
        None => {
            let mut config = SimulationConfig::default();
            config.grid.dust = vec![1, 6, 8, 12];
            config.grid.items = vec![2, 8, 10];
            config
        }
    };
    if let Some(goal) = args.next() {
        config.goal = goal.parse::<Goal>()?;
    }
    info!(
        goal = %config.goal,
        points = config.initial_points,
        max_cycles = config.max_cycles,
        "configuration loaded"
    );

    let mut simulation = Simulation::from_config(&config)?;
    println!("{}", simulation.environment());

    let report = simulation.run()?;
    println!("{}", simulation.environment());
    println!(
        "cycles: {}, points: {}, status: {:?}, score: {}, clean cells: {}",
        report.cycles, report.final_points, report.status, report.score, report.final_score
    );
    Ok(())
}
