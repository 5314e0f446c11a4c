//! Rhombic hex board with axial coordinates

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HexError, Result};
use crate::game::Player;

/// Smallest supported board side
pub const MIN_BOARD_SIZE: u8 = 2;

/// Largest supported board side
pub const MAX_BOARD_SIZE: u8 = 26;

/// Axial cell coordinates (column, row)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub col: u8,
    pub row: u8,
}

impl Coord {
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Step in direction (dc, dr), None if it leaves a board of `size`
    pub fn offset(&self, dc: i8, dr: i8, size: u8) -> Option<Coord> {
        let col = self.col as i16 + dc as i16;
        let row = self.row as i16 + dr as i16;
        let limit = size as i16;
        if (0..limit).contains(&col) && (0..limit).contains(&row) {
            Some(Coord::new(col as u8, row as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// A move is the coordinate of the empty cell being claimed
pub type Move = Coord;

/// Direction vectors in axial coordinates (dcol, drow)
/// Index: 0=N, 1=NE, 2=E, 3=S, 4=SW, 5=W
pub const DIRECTIONS: [(i8, i8); 6] = [
    (0, -1),  // N
    (1, -1),  // NE
    (1, 0),   // E
    (0, 1),   // S
    (-1, 1),  // SW
    (-1, 0),  // W
];

/// Square grid of cell ownership (clone to branch)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: u8,
    /// Row-major: index = row * size + col
    cells: Vec<Option<Player>>,
    stones: usize,
}

impl Board {
    /// Create an empty board of side `size`
    pub fn new(size: u8) -> Result<Self> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(HexError::InvalidBoardSize(size));
        }
        Ok(Self {
            size,
            cells: vec![None; size as usize * size as usize],
            stones: 0,
        })
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    /// Check if the coordinate lies on the board
    pub fn contains(&self, coord: Coord) -> bool {
        coord.col < self.size && coord.row < self.size
    }

    fn index(&self, coord: Coord) -> usize {
        coord.row as usize * self.size as usize + coord.col as usize
    }

    fn check_bounds(&self, coord: Coord) -> Result<()> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(HexError::OutOfBounds { coord, size: self.size })
        }
    }

    /// Owner of the cell, None if empty
    pub fn get(&self, coord: Coord) -> Result<Option<Player>> {
        self.check_bounds(coord)?;
        Ok(self.cells[self.index(coord)])
    }

    /// Unchecked lookup for coordinates produced by the board itself
    pub(crate) fn owner(&self, coord: Coord) -> Option<Player> {
        self.cells[self.index(coord)]
    }

    /// Claim an empty cell for `player`
    pub fn set(&mut self, player: Player, coord: Coord) -> Result<()> {
        self.check_bounds(coord)?;
        let idx = self.index(coord);
        if self.cells[idx].is_some() {
            return Err(HexError::IllegalMove(coord));
        }
        self.cells[idx] = Some(player);
        self.stones += 1;
        Ok(())
    }

    /// Place a stone on a cell taken from `legal_moves`
    pub(crate) fn place(&mut self, player: Player, coord: Coord) {
        let idx = self.index(coord);
        debug_assert!(self.cells[idx].is_none(), "place on occupied cell {}", coord);
        self.cells[idx] = Some(player);
        self.stones += 1;
    }

    /// Copy of this board with one more stone
    pub fn with_move(&self, player: Player, coord: Coord) -> Result<Self> {
        let mut next = self.clone();
        next.set(player, coord)?;
        Ok(next)
    }

    /// In-bounds neighbors of `coord` in `DIRECTIONS` order
    pub fn neighbors(&self, coord: Coord) -> Result<Vec<Coord>> {
        self.check_bounds(coord)?;
        Ok(self.adjacent(coord).collect())
    }

    pub(crate) fn adjacent(&self, coord: Coord) -> impl Iterator<Item = Coord> {
        let size = self.size;
        DIRECTIONS
            .iter()
            .filter_map(move |&(dc, dr)| coord.offset(dc, dr, size))
    }

    /// Empty cells, column by column (column outer, row inner)
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.cells.len() - self.stones);
        for col in 0..self.size {
            for row in 0..self.size {
                let coord = Coord::new(col, row);
                if self.owner(coord).is_none() {
                    moves.push(coord);
                }
            }
        }
        moves
    }

    /// Cells owned by `player`, in the same scan order as `legal_moves`
    pub fn stones(&self, player: Player) -> Vec<Coord> {
        let mut out = Vec::new();
        for col in 0..self.size {
            for row in 0..self.size {
                let coord = Coord::new(col, row);
                if self.owner(coord) == Some(player) {
                    out.push(coord);
                }
            }
        }
        out
    }

    /// Number of stones placed so far
    pub fn stone_count(&self) -> usize {
        self.stones
    }

    pub fn is_empty(&self) -> bool {
        self.stones == 0
    }

    pub fn is_full(&self) -> bool {
        self.stones == self.cells.len()
    }

    /// Center cell (N/2, N/2)
    pub fn center(&self) -> Coord {
        Coord::new(self.size / 2, self.size / 2)
    }

    /// Ownership as 0 (empty) / 1 / 2, row by row, for renderers
    pub fn cell_values(&self) -> Vec<Vec<u8>> {
        (0..self.size)
            .map(|row| {
                (0..self.size)
                    .map(|col| self.owner(Coord::new(col, row)).map_or(0, Player::number))
                    .collect()
            })
            .collect()
    }
}
