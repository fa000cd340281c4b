//! Character grid the map is rasterized into
//!
//! Each cell carries its glyph plus a paint class so the UI layer can
//! color map, airport, aircraft and label cells differently without the
//! render core knowing about terminal styling.

/// What a cell represents, for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Blank,
    Map,
    Airport,
    Aircraft,
    Label,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub paint: Paint,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        paint: Paint::Blank,
    };

    pub fn is_blank(&self) -> bool {
        self.paint == Paint::Blank
    }
}

/// Row-major cell grid, `(0, 0)` top-left. Cloning is a deep copy, which
/// the compositor relies on to keep the cached static layer pristine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-blank grid. Dimensions are clamped to at least 1x1.
    pub fn blank(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, col: i64, row: i64) -> bool {
        col >= 0 && (col as usize) < self.width && row >= 0 && (row as usize) < self.height
    }

    pub fn get(&self, col: usize, row: usize) -> Cell {
        self.cells[row * self.width + col]
    }

    /// Write a cell. Out-of-bounds coordinates are ignored so callers can
    /// feed unclipped projector output straight in.
    pub fn set(&mut self, col: i64, row: i64, cell: Cell) {
        if self.in_bounds(col, row) {
            self.cells[row as usize * self.width + col as usize] = cell;
        }
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    /// Flatten into the final text block: rows joined by newlines, cells
    /// concatenated with no separator.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in 0..self.height {
            for cell in self.row(row) {
                out.push(cell.glyph);
            }
            if row + 1 < self.height {
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_grid_dimensions() {
        let grid = Grid::blank(8, 3);
        assert_eq!(grid.width(), 8);
        assert_eq!(grid.height(), 3);
        assert!(grid.get(7, 2).is_blank());
    }

    #[test]
    fn test_non_positive_dimensions_clamp_to_one() {
        let grid = Grid::blank(0, 0);
        assert_eq!(grid.width(), 1);
        assert_eq!(grid.height(), 1);
    }

    #[test]
    fn test_out_of_bounds_set_is_ignored() {
        let mut grid = Grid::blank(4, 4);
        let marker = Cell {
            glyph: 'x',
            paint: Paint::Map,
        };
        grid.set(-1, 0, marker);
        grid.set(0, -1, marker);
        grid.set(4, 0, marker);
        grid.set(0, 4, marker);
        for row in 0..4 {
            for col in 0..4 {
                assert!(grid.get(col, row).is_blank());
            }
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = Grid::blank(3, 3);
        original.set(
            1,
            1,
            Cell {
                glyph: '.',
                paint: Paint::Map,
            },
        );
        let mut copy = original.clone();
        copy.set(
            1,
            1,
            Cell {
                glyph: '#',
                paint: Paint::Label,
            },
        );
        assert_eq!(original.get(1, 1).glyph, '.');
        assert_eq!(copy.get(1, 1).glyph, '#');
    }

    #[test]
    fn test_to_text_layout() {
        let mut grid = Grid::blank(3, 2);
        grid.set(
            0,
            0,
            Cell {
                glyph: 'a',
                paint: Paint::Map,
            },
        );
        grid.set(
            2,
            1,
            Cell {
                glyph: 'b',
                paint: Paint::Map,
            },
        );
        assert_eq!(grid.to_text(), "a  \n  b");
    }
}
