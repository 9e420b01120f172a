//! Read-only views of the current generation
//!
//! A [`Snapshot`] borrows the engine, so it cannot outlive the next
//! `advance()` / `tick()` call: the buffer it points at becomes the write
//! target on the following tick.

use bytemuck::{Pod, Zeroable};

use super::color::ColorRule;
use super::grid::{Cell, Grid};
use super::rule::Rule;

/// Instance data for one visible cell, laid out for direct GPU upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CellInstance {
    /// Interior grid position [x, y, z]
    pub position: [f32; 3],
    /// Color [r, g, b]
    pub color: [f32; 3],
}

/// Borrowed view of the currently active buffer
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    grid: &'a Grid,
    rule: &'a Rule,
    generation: u64,
}

impl<'a> Snapshot<'a> {
    pub(crate) fn new(grid: &'a Grid, rule: &'a Rule, generation: u64) -> Self {
        Self {
            grid,
            rule,
            generation,
        }
    }

    /// Interior side length
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Rule the snapshot was produced under
    pub fn rule(&self) -> &'a Rule {
        self.rule
    }

    /// Number of ticks since the last restart
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cell at interior coordinates, `None` outside the volume
    pub fn cell(&self, x: usize, y: usize, z: usize) -> Option<Cell> {
        self.grid.get(x, y, z)
    }

    /// Every interior cell with its coordinates
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize, usize), Cell)> + 'a {
        self.grid.iter()
    }

    /// Non-dead cells (alive or decaying), the set a renderer draws
    pub fn visible(&self) -> impl Iterator<Item = ((usize, usize, usize), Cell)> + 'a {
        self.grid.iter().filter(|(_, cell)| cell.state != 0)
    }

    /// Number of fully alive cells
    pub fn population(&self) -> usize {
        let alive = self.rule.max_age();
        self.grid
            .cells
            .iter()
            .filter(|cell| cell.state == alive)
            .count()
    }

    /// Raw padded buffer, border included
    pub fn raw(&self) -> &'a [Cell] {
        &self.grid.cells
    }

    /// Instance records for every visible cell, coloured by `color_rule`
    pub fn instances(&self, color_rule: &ColorRule) -> Vec<CellInstance> {
        let size = self.size();
        let max_age = self.rule.max_age();
        self.visible()
            .map(|(pos, cell)| {
                let color = color_rule.color(cell, pos, size, max_age);
                CellInstance {
                    position: [pos.0 as f32, pos.1 as f32, pos.2 as f32],
                    color: color.into(),
                }
            })
            .collect()
    }

    /// Same as [`Snapshot::instances`], cast to bytes
    pub fn instance_bytes(&self, color_rule: &ColorRule) -> Vec<u8> {
        bytemuck::cast_slice(&self.instances(color_rule)).to_vec()
    }
}
