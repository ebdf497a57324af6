use std::fmt;

use log::warn;

use crate::error::GameError;
use crate::pieces::Piece;
use crate::types::{BoardSnapshot, CellSnapshot, PlayerId, Position};

/// Pixel edge of one cell as drawn by the presentation layer.
pub const CELL_SIZE: u32 = 50;
pub const LIGHT_CELL: &str = "light";
pub const DARK_CELL: &str = "dark";

/// One board square. Cells never move; only `occupant` changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub position: Position,
    pub size: u32,
    pub color: String,
    occupant: Option<Piece>,
}

impl GridCell {
    pub fn new(
        position: Position,
        size: u32,
        color: impl Into<String>,
        occupant: Option<Piece>,
    ) -> Self {
        Self {
            position,
            size,
            color: color.into(),
            occupant,
        }
    }

    pub fn occupant(&self) -> Option<&Piece> {
        self.occupant.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    fn snapshot(&self) -> CellSnapshot {
        CellSnapshot {
            x: self.position.x,
            y: self.position.y,
            size: self.size,
            color: self.color.clone(),
            occupant: self.occupant.as_ref().map(Piece::snapshot),
        }
    }
}

/// Fixed `size * size` arena of cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<GridCell>,
}

impl Board {
    /// Creates an empty checkered board.
    pub fn new(size: usize) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                let color = if (x + y) % 2 == 0 { LIGHT_CELL } else { DARK_CELL };
                cells.push(GridCell::new(
                    Position::new(x as i32, y as i32),
                    CELL_SIZE,
                    color,
                    None,
                ));
            }
        }
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Installs `cell` into the slot for its position, replacing what was there.
    /// Out-of-range cells are refused.
    pub fn add_item(&mut self, mut cell: GridCell) -> Result<(), GameError> {
        if !cell.position.in_bounds(self.size) {
            warn!(
                "refusing grid item {} out of range 0..{}",
                cell.position, self.size
            );
            return Err(GameError::OutOfBounds {
                position: cell.position,
                size: self.size,
            });
        }
        if let Some(piece) = cell.occupant.as_mut() {
            piece.position = cell.position;
        }
        let idx = self.index_of_location(cell.position)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Storage index of the cell at `position`.
    pub fn index_of_location(&self, position: Position) -> Result<usize, GameError> {
        if !position.in_bounds(self.size) {
            return Err(GameError::NotFound { position });
        }
        let idx = position.y as usize * self.size + position.x as usize;
        debug_assert_eq!(self.cells[idx].position, position);
        Ok(idx)
    }

    pub fn cell(&self, position: Position) -> Result<&GridCell, GameError> {
        let idx = self.index_of_location(position)?;
        Ok(&self.cells[idx])
    }

    pub fn piece_at_location(&self, position: Position) -> Result<Option<&Piece>, GameError> {
        Ok(self.cell(position)?.occupant())
    }

    /// Puts a fresh piece on an empty in-bounds cell.
    pub fn place_piece(&mut self, mut piece: Piece, position: Position) -> Result<(), GameError> {
        if !position.in_bounds(self.size) {
            return Err(GameError::OutOfBounds {
                position,
                size: self.size,
            });
        }
        let idx = self.index_of_location(position)?;
        let cell = &mut self.cells[idx];
        if cell.occupant.is_some() {
            return Err(GameError::Occupied { position });
        }
        piece.position = position;
        cell.occupant = Some(piece);
        Ok(())
    }

    pub(crate) fn take_piece(&mut self, position: Position) -> Result<Option<Piece>, GameError> {
        let idx = self.index_of_location(position)?;
        Ok(self.cells[idx].occupant.take())
    }

    pub(crate) fn piece_at_location_mut(
        &mut self,
        position: Position,
    ) -> Result<Option<&mut Piece>, GameError> {
        let idx = self.index_of_location(position)?;
        Ok(self.cells[idx].occupant.as_mut())
    }

    pub(crate) fn set_piece(&mut self, position: Position, piece: Piece) -> Result<(), GameError> {
        let idx = self.index_of_location(position)?;
        self.cells[idx].occupant = Some(piece);
        Ok(())
    }

    /// Read-only walk over every cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter()
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().filter_map(GridCell::occupant)
    }

    pub fn pieces_of(&self, owner: PlayerId) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |p| p.owner() == Some(owner))
    }

    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    /// Advances every occupant's cooldown clock.
    pub fn tick(&mut self, elapsed_ms: u32) {
        for piece in self.cells.iter_mut().filter_map(|c| c.occupant.as_mut()) {
            piece.tick(elapsed_ms);
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            size: self.size,
            cells: self.cells.iter().map(GridCell::snapshot).collect(),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.size).rev() {
            write!(f, "{:>2} ", y)?;
            for x in 0..self.size {
                let glyph = self.cells[y * self.size + x]
                    .occupant()
                    .map_or('.', Piece::glyph);
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for x in 0..self.size {
            write!(f, "{}", x % 10)?;
        }
        Ok(())
    }
}
