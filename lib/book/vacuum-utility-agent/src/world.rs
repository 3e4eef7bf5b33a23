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

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Actuator, AgentError, Sensor};

/// Cell is a single grid location and what currently occupies it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub index: usize,
    pub has_dust: bool,
    pub has_item: bool,
    pub has_agent: bool,
}

impl Cell {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    pub fn is_clean(&self) -> bool {
        !self.has_dust && !self.has_item
    }
}

/// Path is the fixed, cyclic sequence of cells an agent patrols. After the last cell the agent
/// returns to the first one.
///
/// A path only refers to cells by index. It never owns them; the grid does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    cells: Vec<usize>,
}

impl Path {
    /// Create a path over the given cell indices, in patrol order.
    pub fn new(cells: Vec<usize>) -> Result<Self, AgentError> {
        if cells.is_empty() {
            return Err(AgentError::EmptyPath);
        }
        Ok(Self { cells })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false, a path has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get the cell index at a position in the path.
    pub fn get(&self, position: usize) -> Result<usize, AgentError> {
        self.cells
            .get(position)
            .copied()
            .ok_or(AgentError::InvalidPosition {
                index: position,
                len: self.cells.len(),
            })
    }

    /// The position after `position`, wrapping back to 0 at the end.
    pub fn next(&self, position: usize) -> usize {
        (position + 1) % self.cells.len()
    }

    pub fn cells(&self) -> &[usize] {
        &self.cells
    }
}

/// Grid is the in-memory world: it owns every cell, and is both the agent's sensor and its
/// actuator.
///
/// Some cells can be excluded from the environment. The classic board is 3 rows of 5 cells
/// with the two top-right and two bottom-right cells walled off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: usize,
    excluded: HashSet<usize>,
}

impl Grid {
    /// Create a single-row grid of `len` clean cells.
    pub fn new(len: usize) -> Self {
        Self {
            cells: (0..len).map(Cell::new).collect(),
            width: len.max(1),
            excluded: HashSet::new(),
        }
    }

    /// The classic 3 by 5 board with cells 3, 4, 13 and 14 excluded.
    pub fn classic() -> Self {
        let mut grid = Grid::new(15).with_width(5);
        grid.excluded = [3, 4, 13, 14].into_iter().collect();
        grid
    }

    /// Lay the cells out in rows of `width` when printing.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    /// Exclude cells from the environment. They can never be seeded or patrolled.
    pub fn with_excluded<I>(mut self, excluded: I) -> Result<Self, AgentError>
    where
        I: IntoIterator<Item = usize>,
    {
        for index in excluded {
            if index >= self.cells.len() {
                return Err(self.unknown(index));
            }
            self.excluded.insert(index);
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_excluded(&self, index: usize) -> bool {
        self.excluded.contains(&index)
    }

    /// Get a cell, if it is part of the environment.
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        if self.is_excluded(index) {
            return None;
        }
        self.cells.get(index)
    }

    fn cell_mut(&mut self, index: usize) -> Result<&mut Cell, AgentError> {
        let len = self.cells.len();
        if self.excluded.contains(&index) {
            return Err(AgentError::UnknownCell { index, len });
        }
        self.cells
            .get_mut(index)
            .ok_or(AgentError::UnknownCell { index, len })
    }

    fn unknown(&self, index: usize) -> AgentError {
        AgentError::UnknownCell {
            index,
            len: self.cells.len(),
        }
    }

    pub fn place_dust(&mut self, index: usize) -> Result<(), AgentError> {
        self.cell_mut(index)?.has_dust = true;
        Ok(())
    }

    pub fn place_item(&mut self, index: usize) -> Result<(), AgentError> {
        self.cell_mut(index)?.has_item = true;
        Ok(())
    }

    /// Build a path from externally supplied cell indices, checking every one of them is part of
    /// the environment.
    pub fn path(&self, indices: Vec<usize>) -> Result<Path, AgentError> {
        if let Some(&bad) = indices.iter().find(|&&i| self.cell(i).is_none()) {
            return Err(self.unknown(bad));
        }
        Path::new(indices)
    }

    /// The path over every cell that is not excluded, in index order.
    pub fn patrol_path(&self) -> Result<Path, AgentError> {
        Path::new(self.environment().map(|cell| cell.index).collect())
    }

    fn environment(&self) -> impl Iterator<Item = &Cell> {
        self.cells
            .iter()
            .filter(move |cell| !self.excluded.contains(&cell.index))
    }

    pub fn dusty_cells(&self) -> usize {
        self.environment().filter(|c| c.has_dust).count()
    }

    pub fn item_cells(&self) -> usize {
        self.environment().filter(|c| c.has_item).count()
    }

    pub fn clean_cells(&self) -> usize {
        self.environment().filter(|c| c.is_clean()).count()
    }

    /// Index of the cell the agent is on, if it has been placed.
    pub fn agent_cell(&self) -> Option<usize> {
        self.environment().find(|c| c.has_agent).map(|c| c.index)
    }
}

// Excluded and out-of-range cells are not part of the environment, so reads and writes on them
// surface UnknownCell.
impl Sensor for Grid {
    fn has_dust(&self, cell: usize) -> Result<bool, AgentError> {
        self.cell(cell)
            .map(|c| c.has_dust)
            .ok_or_else(|| self.unknown(cell))
    }

    fn has_item(&self, cell: usize) -> Result<bool, AgentError> {
        self.cell(cell)
            .map(|c| c.has_item)
            .ok_or_else(|| self.unknown(cell))
    }
}

impl Actuator for Grid {
    fn clear_dust(&mut self, cell: usize) -> Result<(), AgentError> {
        self.cell_mut(cell)?.has_dust = false;
        Ok(())
    }

    fn clear_item(&mut self, cell: usize) -> Result<(), AgentError> {
        self.cell_mut(cell)?.has_item = false;
        Ok(())
    }

    fn set_agent_presence(&mut self, cell: usize, present: bool) -> Result<(), AgentError> {
        self.cell_mut(cell)?.has_agent = present;
        Ok(())
    }
}

// one character per cell: '.' clean, 'd' dust, 'i' item, 'b' both, 'A' agent, '#' excluded.
impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = String::with_capacity(self.cells.len() * 2);
        for (i, cell) in self.cells.iter().enumerate() {
            let c = if self.is_excluded(cell.index) {
                '#'
            } else if cell.has_agent {
                'A'
            } else {
                match (cell.has_dust, cell.has_item) {
                    (false, false) => '.',
                    (true, false) => 'd',
                    (false, true) => 'i',
                    (true, true) => 'b',
                }
            };
            s.push(c);
            if i + 1 == self.cells.len() {
                break;
            }
            if (i + 1) % self.width == 0 {
                s.push('\n');
            } else {
                s.push(' ');
            }
        }
        write!(f, "{}", s)
    }
}
