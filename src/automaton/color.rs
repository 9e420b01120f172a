//! Per-cell colour rules for drawing a snapshot

use cgmath::{Vector3, VectorSpace};

use super::grid::Cell;
use super::rule::MAX_NEIGHBOURS;

/// How a renderer should colour each visible cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorRule {
    /// Alive cells use `alive`; dying cells fade from `dying` towards `alive` with age
    StateGradient {
        alive: Vector3<f32>,
        dying: Vector3<f32>,
    },
    /// Interpolate by how crowded the cell was on its last tick
    NeighbourDensity {
        sparse: Vector3<f32>,
        dense: Vector3<f32>,
    },
    /// Map the normalised grid position straight to RGB
    Position,
}

impl Default for ColorRule {
    fn default() -> Self {
        ColorRule::StateGradient {
            alive: Vector3::new(1.0, 0.85, 0.3),
            dying: Vector3::new(0.25, 0.05, 0.4),
        }
    }
}

impl ColorRule {
    /// Colour for `cell` at interior position `pos` in a grid of side `size`
    pub fn color(&self, cell: Cell, pos: (usize, usize, usize), size: usize, max_age: u8) -> Vector3<f32> {
        match *self {
            ColorRule::StateGradient { alive, dying } => {
                if cell.state >= max_age {
                    return alive;
                }
                let t = cell.state as f32 / max_age.max(1) as f32;
                dying.lerp(alive, t)
            }
            ColorRule::NeighbourDensity { sparse, dense } => {
                let t = cell.neighbours.min(MAX_NEIGHBOURS) as f32 / MAX_NEIGHBOURS as f32;
                sparse.lerp(dense, t)
            }
            ColorRule::Position => {
                let scale = size.saturating_sub(1).max(1) as f32;
                Vector3::new(
                    pos.0 as f32 / scale,
                    pos.1 as f32 / scale,
                    pos.2 as f32 / scale,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(state: u8, neighbours: u8) -> Cell {
        Cell { state, neighbours }
    }

    #[test]
    fn test_state_gradient_endpoints() {
        let rule = ColorRule::default();
        let (alive, dying) = match rule {
            ColorRule::StateGradient { alive, dying } => (alive, dying),
            _ => unreachable!(),
        };
        assert_eq!(rule.color(cell(4, 0), (0, 0, 0), 8, 4), alive);
        assert_eq!(rule.color(cell(0, 0), (0, 0, 0), 8, 4), dying);
    }

    #[test]
    fn test_state_gradient_midpoint() {
        let rule = ColorRule::StateGradient {
            alive: Vector3::new(1.0, 1.0, 1.0),
            dying: Vector3::new(0.0, 0.0, 0.0),
        };
        let c = rule.color(cell(2, 0), (0, 0, 0), 8, 4);
        assert!((c.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_neighbour_density() {
        let rule = ColorRule::NeighbourDensity {
            sparse: Vector3::new(0.0, 0.0, 1.0),
            dense: Vector3::new(1.0, 0.0, 0.0),
        };
        assert_eq!(rule.color(cell(1, 0), (0, 0, 0), 4, 1), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(rule.color(cell(1, 26), (0, 0, 0), 4, 1), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_position_colour() {
        let rule = ColorRule::Position;
        assert_eq!(rule.color(cell(1, 0), (0, 4, 2), 5, 1), Vector3::new(0.0, 1.0, 0.5));
        // Single-cell grids must not divide by zero
        assert_eq!(rule.color(cell(1, 0), (0, 0, 0), 1, 1), Vector3::new(0.0, 0.0, 0.0));
    }
}
