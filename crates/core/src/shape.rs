//! Shape catalog - static polyomino offsets and difficulty pools.
//!
//! Offsets are `(dx, dy)` from the top-left corner of the bounding box, so
//! every offset is non-negative and both axes touch zero.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::board::Cell;

/// Bounding box of a cell set, max offset + 1 in each axis.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub width: u8,
    pub height: u8,
}

pub fn bounds(cells: &[Cell]) -> Bounds {
    let (max_x, max_y) = cells
        .iter()
        .fold((0i8, 0i8), |(mx, my), &(dx, dy)| (mx.max(dx), my.max(dy)));
    Bounds {
        width: max_x as u8 + 1,
        height: max_y as u8 + 1,
    }
}

macro_rules! shape_table {
    ($($variant:ident => $name:literal [$(($dx:expr, $dy:expr)),+ $(,)?];)+) => {
        #[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
        pub enum Shape {
            $($variant,)+
        }

        impl Shape {
            /// Every catalogued shape, the degenerate `Dot` included.
            pub const CATALOG: &'static [Shape] = &[$(Shape::$variant,)+];

            pub fn name(self) -> &'static str {
                match self {
                    $(Shape::$variant => $name,)+
                }
            }

            pub fn cells(self) -> &'static [Cell] {
                match self {
                    $(Shape::$variant => &[$(($dx, $dy)),+],)+
                }
            }
        }
    };
}

shape_table! {
    H2 => "H2" [(0, 0), (1, 0)];
    V2 => "V2" [(0, 0), (0, 1)];

    H3 => "H3" [(0, 0), (1, 0), (2, 0)];
    V3 => "V3" [(0, 0), (0, 1), (0, 2)];
    L3a => "L3_1" [(0, 0), (1, 0), (0, 1)];
    L3b => "L3_2" [(0, 0), (1, 0), (1, 1)];
    L3c => "L3_3" [(0, 0), (0, 1), (1, 1)];
    L3d => "L3_4" [(1, 0), (0, 1), (1, 1)];

    H4 => "H4" [(0, 0), (1, 0), (2, 0), (3, 0)];
    V4 => "V4" [(0, 0), (0, 1), (0, 2), (0, 3)];
    Square => "SQUARE" [(0, 0), (1, 0), (0, 1), (1, 1)];
    T => "T" [(0, 0), (1, 0), (2, 0), (1, 1)];
    TUp => "T_UP" [(1, 0), (0, 1), (1, 1), (2, 1)];
    TLeft => "T_LEFT" [(0, 0), (0, 1), (1, 1), (0, 2)];
    TRight => "T_RIGHT" [(1, 0), (0, 1), (1, 1), (1, 2)];
    S => "S" [(1, 0), (2, 0), (0, 1), (1, 1)];
    Z => "Z" [(0, 0), (1, 0), (1, 1), (2, 1)];
    SVert => "S_V" [(0, 0), (0, 1), (1, 1), (1, 2)];
    ZVert => "Z_V" [(1, 0), (0, 1), (1, 1), (0, 2)];
    L4a => "L4_1" [(0, 0), (0, 1), (0, 2), (1, 2)];
    L4b => "L4_2" [(1, 0), (1, 1), (0, 2), (1, 2)];
    L4c => "L4_3" [(0, 0), (1, 0), (1, 1), (1, 2)];
    L4d => "L4_4" [(0, 0), (1, 0), (0, 1), (0, 2)];
    L4e => "L4_5" [(0, 0), (0, 1), (1, 0), (2, 0)];
    L4f => "L4_6" [(0, 0), (1, 0), (2, 0), (2, 1)];
    L4g => "L4_7" [(0, 1), (1, 1), (2, 1), (2, 0)];
    L4h => "L4_8" [(0, 0), (0, 1), (1, 1), (2, 1)];

    H5 => "H5" [(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)];
    V5 => "V5" [(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)];
    Plus => "PLUS" [(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)];
    L5a => "L5_1" [(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)];
    L5b => "L5_2" [(2, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
    L5c => "L5_3" [(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)];
    L5d => "L5_4" [(0, 0), (1, 0), (2, 0), (0, 1), (0, 2)];

    Square3 => "SQUARE3" [
        (0, 0), (1, 0), (2, 0),
        (0, 1), (1, 1), (2, 1),
        (0, 2), (1, 2), (2, 2),
    ];
    BigL => "BIG_L" [(0, 0), (0, 1), (0, 2), (1, 2), (2, 2)];
    BigT => "BIG_T" [(0, 0), (1, 0), (2, 0), (1, 1), (1, 2)];
    Rect3x2 => "RECT_3x2" [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)];
    Rect2x3 => "RECT_2x3" [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)];

    Dot => "DOT" [(0, 0)];
}

const PLAYABLE_LEN: usize = Shape::CATALOG.len() - 1;

impl Shape {
    /// Catalog minus the degenerate single cell, in catalog order.
    pub const PLAYABLE: [Shape; PLAYABLE_LEN] = {
        let mut out = [Shape::H2; PLAYABLE_LEN];
        let mut i = 0;
        let mut j = 0;
        while i < Shape::CATALOG.len() {
            if !matches!(Shape::CATALOG[i], Shape::Dot) {
                out[j] = Shape::CATALOG[i];
                j += 1;
            }
            i += 1;
        }
        out
    };

    pub fn from_name(name: &str) -> Option<Shape> {
        Self::CATALOG.iter().copied().find(|s| s.name() == name)
    }

    /// Shape actually dealt for a request; the single cell becomes `H2`.
    #[inline]
    pub fn playable(self) -> Shape {
        match self {
            Shape::Dot => Shape::H2,
            other => other,
        }
    }

    #[inline]
    pub fn is_degenerate(self) -> bool {
        self.cells().len() < 2
    }

    #[inline]
    pub fn cell_count(self) -> usize {
        self.cells().len()
    }

    pub fn bounds(self) -> Bounds {
        bounds(self.cells())
    }
}

/// Offsets for a shape name; unknown and degenerate names fall back to `H2`.
pub fn shape_cells(name: &str) -> &'static [Cell] {
    Shape::from_name(name)
        .map(Shape::playable)
        .unwrap_or(Shape::H2)
        .cells()
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Shape::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown shape {name}")))
    }
}

/// Difficulty tier for weighted shape selection.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Pool {
    Easy,
    Medium,
    Hard,
}

const EASY_POOL: [Shape; 14] = [
    Shape::H2,
    Shape::V2,
    Shape::H3,
    Shape::V3,
    Shape::L3a,
    Shape::L3b,
    Shape::L3c,
    Shape::L3d,
    Shape::Square,
    Shape::Rect3x2,
    Shape::Rect2x3,
    Shape::Square3,
    Shape::BigL,
    Shape::BigT,
];

const MEDIUM_POOL: [Shape; 28] = [
    Shape::H3,
    Shape::V3,
    Shape::L3a,
    Shape::L3b,
    Shape::L3c,
    Shape::L3d,
    Shape::Square,
    Shape::H4,
    Shape::V4,
    Shape::T,
    Shape::TUp,
    Shape::TLeft,
    Shape::TRight,
    Shape::S,
    Shape::Z,
    Shape::SVert,
    Shape::ZVert,
    Shape::L4a,
    Shape::L4b,
    Shape::L4c,
    Shape::L4d,
    Shape::L4e,
    Shape::L4f,
    Shape::L4g,
    Shape::L4h,
    Shape::Rect3x2,
    Shape::Rect2x3,
    Shape::Square3,
];

const HARD_POOL: [Shape; 10] = [
    Shape::H4,
    Shape::V4,
    Shape::H5,
    Shape::V5,
    Shape::Plus,
    Shape::Square3,
    Shape::BigL,
    Shape::BigT,
    Shape::Rect3x2,
    Shape::Rect2x3,
];

impl Pool {
    pub const ALL: [Pool; 3] = [Pool::Easy, Pool::Medium, Pool::Hard];

    pub fn shapes(self) -> &'static [Shape] {
        match self {
            Pool::Easy => &EASY_POOL,
            Pool::Medium => &MEDIUM_POOL,
            Pool::Hard => &HARD_POOL,
        }
    }

    pub fn contains(self, shape: Shape) -> bool {
        self.shapes().contains(&shape)
    }
}
