use log::{debug, warn};
use rand::Rng;

use crate::config::GridSize;
use crate::input::Direction;
use crate::snake::Position;

/// Smallest coordinate an obstacle corner may take on either axis.
const MIN_OBSTACLE_ORIGIN: i32 = 4;

/// Cells kept clear between an obstacle and the far border.
const OBSTACLE_FAR_MARGIN: i32 = 2;

/// Contents of one grid cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Cell {
    Empty,
    Wall,
    Apple,
}

/// Inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CellRect {
    pub min: Position,
    pub max: Position,
}

impl CellRect {
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        (self.min.x..=self.max.x).contains(&position.x)
            && (self.min.y..=self.max.y).contains(&position.y)
    }

    /// Returns true when every cell of `other` lies inside this rectangle.
    #[must_use]
    pub fn covers(self, other: CellRect) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }
}

/// One side of the board border.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// The edge a snake heading in `direction` leaves the board through.
    #[must_use]
    pub fn exited_by(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::Top,
            Direction::Down => Self::Bottom,
            Direction::Left => Self::Left,
            Direction::Right => Self::Right,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Range of legal obstacle corners for a grid, or `None` if no obstacle fits.
#[must_use]
pub fn obstacle_origin_range(size: GridSize, obstacle_size: u16) -> Option<CellRect> {
    let span = i32::from(obstacle_size) + OBSTACLE_FAR_MARGIN;
    let max = Position {
        x: i32::from(size.width) - span,
        y: i32::from(size.height) - span,
    };
    if max.x < MIN_OBSTACLE_ORIGIN || max.y < MIN_OBSTACLE_ORIGIN {
        return None;
    }

    Some(CellRect {
        min: Position {
            x: MIN_OBSTACLE_ORIGIN,
            y: MIN_OBSTACLE_ORIGIN,
        },
        max,
    })
}

/// Static playfield: walled border with four portal gaps and square obstacles.
///
/// Built once per session and read-only afterwards.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Board {
    size: GridSize,
    cells: Vec<Cell>,
    obstacles: Vec<Position>,
}

impl Board {
    /// Builds a board and scatters `obstacle_count` square obstacles on it.
    ///
    /// Each obstacle's top-left corner is redrawn until it lies outside
    /// `forbidden_zone`. Obstacles are not checked against each other and may
    /// overlap.
    #[must_use]
    pub fn generate<R: Rng + ?Sized>(
        size: GridSize,
        obstacle_count: usize,
        obstacle_size: u16,
        forbidden_zone: CellRect,
        rng: &mut R,
    ) -> Self {
        let mut origins = Vec::with_capacity(obstacle_count);

        match obstacle_origin_range(size, obstacle_size) {
            Some(range) if obstacle_count > 0 => {
                debug_assert!(
                    !forbidden_zone.covers(range),
                    "forbidden zone leaves no room for obstacles"
                );

                for _ in 0..obstacle_count {
                    let origin = loop {
                        let candidate = Position {
                            x: rng.gen_range(range.min.x..=range.max.x),
                            y: rng.gen_range(range.min.y..=range.max.y),
                        };
                        if !forbidden_zone.contains(candidate) {
                            break candidate;
                        }
                    };
                    debug!("obstacle placed at ({}, {})", origin.x, origin.y);
                    origins.push(origin);
                }
            }
            Some(_) => {}
            None => {
                if obstacle_count > 0 {
                    warn!(
                        "{}x{} board has no room for {obstacle_size}x{obstacle_size} obstacles",
                        size.width, size.height
                    );
                }
            }
        }

        Self::from_obstacles(size, obstacle_size, origins)
    }

    /// Builds a board with obstacles at the given top-left corners.
    #[must_use]
    pub fn from_obstacles(size: GridSize, obstacle_size: u16, origins: Vec<Position>) -> Self {
        let mut board = Self {
            size,
            cells: vec![Cell::Empty; size.total_cells()],
            obstacles: Vec::new(),
        };

        let width = i32::from(size.width);
        let height = i32::from(size.height);
        for x in 1..=width {
            board.set(Position { x, y: 1 }, Cell::Wall);
            board.set(Position { x, y: height }, Cell::Wall);
        }
        for y in 1..=height {
            board.set(Position { x: 1, y }, Cell::Wall);
            board.set(Position { x: width, y }, Cell::Wall);
        }
        for edge in Edge::ALL {
            let portal = board.portal(edge);
            board.set(portal, Cell::Empty);
        }

        let side = i32::from(obstacle_size);
        for origin in &origins {
            for dy in 0..side {
                for dx in 0..side {
                    board.set(
                        Position {
                            x: origin.x + dx,
                            y: origin.y + dy,
                        },
                        Cell::Wall,
                    );
                }
            }
        }
        board.obstacles = origins;

        board
    }

    /// Returns the cell at `position`. Anything off the grid reads as a wall.
    #[must_use]
    pub fn cell_at(&self, position: Position) -> Cell {
        self.index(position)
            .map_or(Cell::Wall, |index| self.cells[index])
    }

    #[must_use]
    pub fn is_wall(&self, position: Position) -> bool {
        self.cell_at(position) == Cell::Wall
    }

    /// Returns true when `position` lies on the grid, border included.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    /// Returns the portal gap in the middle of `edge`.
    #[must_use]
    pub fn portal(&self, edge: Edge) -> Position {
        let width = i32::from(self.size.width);
        let height = i32::from(self.size.height);
        match edge {
            Edge::Top => Position { x: width / 2, y: 1 },
            Edge::Bottom => Position {
                x: width / 2,
                y: height,
            },
            Edge::Left => Position { x: 1, y: height / 2 },
            Edge::Right => Position {
                x: width,
                y: height / 2,
            },
        }
    }

    /// Returns the edge whose portal sits at `position`, if any.
    #[must_use]
    pub fn portal_edge(&self, position: Position) -> Option<Edge> {
        Edge::ALL
            .into_iter()
            .find(|edge| self.portal(*edge) == position)
    }

    #[must_use]
    pub fn is_portal(&self, position: Position) -> bool {
        self.portal_edge(position).is_some()
    }

    /// Top-left corners of the obstacles, in placement order.
    #[must_use]
    pub fn obstacles(&self) -> &[Position] {
        &self.obstacles
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Iterates every cell row by row, top-left first.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        let width = usize::from(self.size.width);
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let position = Position {
                x: (index % width) as i32 + 1,
                y: (index / width) as i32 + 1,
            };
            (position, *cell)
        })
    }

    fn set(&mut self, position: Position, cell: Cell) {
        if let Some(index) = self.index(position) {
            self.cells[index] = cell;
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        let width = i32::from(self.size.width);
        let height = i32::from(self.size.height);
        if position.x < 1 || position.y < 1 || position.x > width || position.y > height {
            return None;
        }

        Some(((position.y - 1) * width + (position.x - 1)) as usize)
    }
}
