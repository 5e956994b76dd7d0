//! Rectangular tile grid with 8-way adjacency.
//!
//! Pathfinding is deliberately absent: the AI core only ever asks for single
//! adjacent steps, and anything longer is the embedding application's
//! routing problem.

use windward_core::{ColonyId, TileId};

// ── Direction ─────────────────────────────────────────────────────────────────

/// One of the eight compass directions between adjacent tiles.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// (dx, dy) offset of this direction on the grid.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::N => (0, -1),
            Direction::NE => (1, -1),
            Direction::E => (1, 0),
            Direction::SE => (1, 1),
            Direction::S => (0, 1),
            Direction::SW => (-1, 1),
            Direction::W => (-1, 0),
            Direction::NW => (-1, -1),
        }
    }
}

// ── Tile ──────────────────────────────────────────────────────────────────────

/// One map cell.
#[derive(Copy, Clone, Debug, Default)]
pub struct Tile {
    /// `false` means water.
    pub land: bool,
    /// The colony occupying this tile, if any.
    pub colony: Option<ColonyId>,
}

// ── WorldMap ──────────────────────────────────────────────────────────────────

/// Row-major tile grid.  `TileId(y * width + x)`.
pub struct WorldMap {
    pub width: u32,
    pub height: u32,
    tiles: Vec<Tile>,
}

impl WorldMap {
    /// All-water map of the given dimensions.
    pub fn water(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::default(); (width * height) as usize],
        }
    }

    /// All-land map of the given dimensions.
    pub fn land(width: u32, height: u32) -> Self {
        let mut map = Self::water(width, height);
        for tile in &mut map.tiles {
            tile.land = true;
        }
        map
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id.index())
    }

    pub fn at(&self, x: u32, y: u32) -> TileId {
        TileId(y * self.width + x)
    }

    /// The tile one step in `dir` from `from`, or `None` at the map edge.
    pub fn neighbor(&self, from: TileId, dir: Direction) -> Option<TileId> {
        let (dx, dy) = dir.offset();
        let x = (from.0 % self.width) as i32 + dx;
        let y = (from.0 / self.width) as i32 + dy;
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.at(x as u32, y as u32))
    }

    /// All in-bounds neighbors of `from`, in [`Direction::ALL`] order.
    pub fn neighbors(&self, from: TileId) -> impl Iterator<Item = TileId> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.neighbor(from, d))
    }

    /// `true` if `a` and `b` are distinct and one step apart.
    pub fn adjacent(&self, a: TileId, b: TileId) -> bool {
        a != b && Direction::ALL.iter().any(|&d| self.neighbor(a, d) == Some(b))
    }

    /// The direction from `a` to an adjacent tile `b`, if any.
    pub fn direction_to(&self, a: TileId, b: TileId) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.neighbor(a, d) == Some(b))
    }

    /// Greedy single-step heading from `a` toward `b`.  Ignores terrain and
    /// is not pathfinding; callers treat a blocked step as a transient
    /// failure.  `None` when already there.
    pub fn direction_toward(&self, a: TileId, b: TileId) -> Option<Direction> {
        if a == b {
            return None;
        }
        let (ax, ay) = ((a.0 % self.width) as i32, (a.0 / self.width) as i32);
        let (bx, by) = ((b.0 % self.width) as i32, (b.0 / self.width) as i32);
        let dx = (bx - ax).signum();
        let dy = (by - ay).signum();
        Direction::ALL.into_iter().find(|d| d.offset() == (dx, dy))
    }

    /// The high-seas entry tile: the first water tile on the eastern edge,
    /// scanning north to south.  `None` on a map with no eastern water.
    pub fn entry_tile(&self) -> Option<TileId> {
        let x = self.width.checked_sub(1)?;
        (0..self.height)
            .map(|y| self.at(x, y))
            .find(|&t| self.is_water(t))
    }

    pub fn is_land(&self, id: TileId) -> bool {
        self.tile(id).map(|t| t.land).unwrap_or(false)
    }

    pub fn is_water(&self, id: TileId) -> bool {
        self.tile(id).map(|t| !t.land).unwrap_or(false)
    }
}
