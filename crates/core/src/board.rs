//! board representation - a single u64, bit index = y * 8 + x
//! rows and columns clear in place, nothing falls

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

/// Relative cell offset `(dx, dy)` from a piece anchor.
pub type Cell = (i8, i8);

/// Row masks, `ROW_MASKS[y]` covers bits `y*8 .. y*8+8`.
const ROW_MASKS: [u64; Board::SIZE] = {
    let mut masks = [0u64; Board::SIZE];
    let mut y = 0;
    while y < Board::SIZE {
        masks[y] = 0xFFu64 << (y * Board::SIZE);
        y += 1;
    }
    masks
};

/// Column masks, `COL_MASKS[x]` covers bit `x` of every row.
const COL_MASKS: [u64; Board::SIZE] = {
    let mut masks = [0u64; Board::SIZE];
    let mut x = 0;
    while x < Board::SIZE {
        masks[x] = 0x0101_0101_0101_0101u64 << x;
        x += 1;
    }
    masks
};

/// Complete rows and columns, either predicted or just removed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineClear {
    pub rows: SmallVec<[u8; 8]>,
    pub cols: SmallVec<[u8; 8]>,
}

impl LineClear {
    /// Lines, not cells: an intersection cell counts once per line.
    #[inline]
    pub fn total(&self) -> usize {
        self.rows.len() + self.cols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cols.is_empty()
    }

    /// Union of every listed line as a board mask.
    pub fn mask(&self) -> u64 {
        let rows = self
            .rows
            .iter()
            .fold(0u64, |acc, &y| acc | ROW_MASKS[y as usize]);
        self.cols
            .iter()
            .fold(rows, |acc, &x| acc | COL_MASKS[x as usize])
    }
}

/// 8x8 occupancy bitboard.
/// Row 0 is the top row, column 0 the left column.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub struct Board {
    bits: u64,
}

impl Board {
    pub const SIZE: usize = 8;
    pub const CELLS: usize = Self::SIZE * Self::SIZE;

    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// Build from row bytes, bit `x` of `rows[y]` is cell `(x, y)`.
    pub fn from_rows(rows: [u8; Self::SIZE]) -> Self {
        let bits = rows
            .iter()
            .enumerate()
            .fold(0u64, |acc, (y, &row)| acc | (row as u64) << (y * Self::SIZE));
        Self { bits }
    }

    #[inline(always)]
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Bit for an absolute cell, `None` when off the grid.
    #[inline(always)]
    fn bit(x: i32, y: i32) -> Option<u64> {
        let size = Self::SIZE as i32;
        if x < 0 || x >= size || y < 0 || y >= size {
            return None;
        }
        Some(1u64 << (y * size + x))
    }

    /// Off-grid coordinates count as occupied.
    #[inline]
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        match Self::bit(x as i32, y as i32) {
            Some(bit) => self.bits & bit != 0,
            None => true,
        }
    }

    /// Off-grid coordinates are ignored.
    pub fn set(&mut self, x: usize, y: usize, filled: bool) {
        if x >= Self::SIZE || y >= Self::SIZE {
            return;
        }
        let bit = 1u64 << (y * Self::SIZE + x);
        if filled {
            self.bits |= bit;
        } else {
            self.bits &= !bit;
        }
    }

    /// Mask of `cells` anchored at `(x, y)`, `None` if any cell leaves the grid.
    #[inline]
    pub fn footprint(cells: &[Cell], x: i8, y: i8) -> Option<u64> {
        let mut mask = 0u64;
        for &(dx, dy) in cells {
            mask |= Self::bit(x as i32 + dx as i32, y as i32 + dy as i32)?;
        }
        Some(mask)
    }

    pub fn can_place(&self, cells: &[Cell], x: i8, y: i8) -> bool {
        match Self::footprint(cells, x, y) {
            Some(mask) => self.bits & mask == 0,
            None => false,
        }
    }

    /// Sets the cells without checking; callers run `can_place` first.
    /// Off-grid cells are dropped.
    pub fn place(&mut self, cells: &[Cell], x: i8, y: i8) {
        for &(dx, dy) in cells {
            if let Some(bit) = Self::bit(x as i32 + dx as i32, y as i32 + dy as i32) {
                self.bits |= bit;
            }
        }
    }

    /// Lines a hypothetical placement would complete. Does not mutate.
    pub fn clearing_lines(&self, cells: &[Cell], x: i8, y: i8) -> LineClear {
        let mut next = *self;
        next.place(cells, x, y);
        full_lines(next.bits)
    }

    /// Removes every complete row and column found in one snapshot.
    pub fn clear_lines(&mut self) -> LineClear {
        let lines = full_lines(self.bits);
        if !lines.is_empty() {
            self.bits &= !lines.mask();
        }
        lines
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    #[inline]
    pub fn count_occupied(&self) -> u32 {
        self.bits.count_ones()
    }

    pub fn fill_ratio(&self) -> f64 {
        self.count_occupied() as f64 / Self::CELLS as f64
    }

    pub fn reset(&mut self) {
        self.bits = 0;
    }

    pub fn can_place_anywhere(&self, cells: &[Cell]) -> bool {
        let size = Self::SIZE as i8;
        (0..size).any(|y| (0..size).any(|x| self.can_place(cells, x, y)))
    }

    /// Row `y` as a byte, bit `x` set when occupied.
    #[inline]
    pub fn row(&self, y: usize) -> u8 {
        (self.bits >> (y * Self::SIZE)) as u8
    }

    pub fn rows(&self) -> [u8; Self::SIZE] {
        let mut rows = [0u8; Self::SIZE];
        for (y, row) in rows.iter_mut().enumerate() {
            *row = self.row(y);
        }
        rows
    }
}

fn full_lines(bits: u64) -> LineClear {
    let mut lines = LineClear::default();
    for (y, &mask) in ROW_MASKS.iter().enumerate() {
        if bits & mask == mask {
            lines.rows.push(y as u8);
        }
    }
    for (x, &mask) in COL_MASKS.iter().enumerate() {
        if bits & mask == mask {
            lines.cols.push(x as u8);
        }
    }
    lines
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.rows().as_slice().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let vec: Vec<u8> = Vec::deserialize(deserializer)?;
        let rows: [u8; Board::SIZE] = vec
            .try_into()
            .map_err(|_| serde::de::Error::custom("expected 8 rows"))?;
        Ok(Board::from_rows(rows))
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..Self::SIZE as i8 {
            for x in 0..Self::SIZE as i8 {
                write!(f, "{}", if self.is_occupied(x, y) { '█' } else { '·' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H3: [Cell; 3] = [(0, 0), (1, 0), (2, 0)];

    fn fill_row(board: &mut Board, y: usize) {
        for x in 0..Board::SIZE {
            board.set(x, y, true);
        }
    }

    #[test]
    fn test_out_of_range_is_occupied() {
        let b = Board::new();
        assert!(b.is_occupied(-1, 3));
        assert!(b.is_occupied(8, 3));
        assert!(b.is_occupied(3, -1));
        assert!(b.is_occupied(3, 8));
        assert!(!b.is_occupied(3, 3));
    }

    #[test]
    fn test_bit_layout_row_major() {
        let mut b = Board::new();
        b.set(1, 2, true);
        assert_eq!(b.bits(), 1u64 << 17);
        assert_eq!(b.row(2), 0b10);
    }

    #[test]
    fn test_set_ignores_off_grid() {
        let mut b = Board::new();
        b.set(8, 0, true);
        b.set(0, 8, true);
        b.set(usize::MAX, 3, true);
        assert!(b.is_empty());
        b.set(7, 7, true);
        b.set(8, 7, false);
        assert_eq!(b.bits(), 1u64 << 63);
    }

    #[test]
    fn test_can_place_bounds_and_overlap() {
        let mut b = Board::new();
        assert!(b.can_place(&H3, 5, 0));
        assert!(!b.can_place(&H3, 6, 0));
        assert!(!b.can_place(&H3, -1, 0));
        b.set(6, 0, true);
        assert!(!b.can_place(&H3, 4, 0));
        assert!(b.can_place(&H3, 4, 1));
    }

    #[test]
    fn test_clear_single_row_leaves_rest() {
        let mut b = Board::new();
        fill_row(&mut b, 3);
        b.set(2, 5, true);
        b.set(7, 0, true);
        let lines = b.clear_lines();
        assert_eq!(lines.rows.as_slice(), &[3]);
        assert!(lines.cols.is_empty());
        assert_eq!(lines.total(), 1);
        assert_eq!(b.row(3), 0);
        assert!(b.is_occupied(2, 5));
        assert!(b.is_occupied(7, 0));
        assert_eq!(b.count_occupied(), 2);
    }

    #[test]
    fn test_row_and_column_clear_from_one_snapshot() {
        let mut b = Board::new();
        fill_row(&mut b, 0);
        for y in 0..Board::SIZE {
            b.set(4, y, true);
        }
        let lines = b.clear_lines();
        assert_eq!(lines.rows.as_slice(), &[0]);
        assert_eq!(lines.cols.as_slice(), &[4]);
        assert_eq!(lines.total(), 2);
        assert!(b.is_empty());
    }

    #[test]
    fn test_clearing_lines_is_pure() {
        let mut b = Board::new();
        for x in 3..Board::SIZE {
            b.set(x, 7, true);
        }
        let before = b;
        let lines = b.clearing_lines(&H3, 0, 7);
        assert_eq!(lines.rows.as_slice(), &[7]);
        assert_eq!(b, before);
    }

    #[test]
    fn test_can_place_anywhere_on_full_board() {
        let mut b = Board::from_bits(!0);
        assert!(!b.can_place_anywhere(&[(0, 0), (1, 0)]));
        b.set(3, 3, false);
        b.set(4, 3, false);
        assert!(b.can_place_anywhere(&[(0, 0), (1, 0)]));
        assert!(!b.can_place_anywhere(&[(0, 0), (0, 1)]));
    }

    #[test]
    fn test_serde_rows() {
        let mut b = Board::new();
        b.set(0, 0, true);
        b.set(7, 7, true);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, "[1,0,0,0,0,0,0,128]");
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
        assert!(serde_json::from_str::<Board>("[1,2,3]").is_err());
    }

    #[test]
    fn test_display() {
        let mut b = Board::new();
        b.set(0, 0, true);
        let text = b.to_string();
        assert!(text.starts_with("█·······\n"));
        assert_eq!(text.lines().count(), 8);
    }
}
