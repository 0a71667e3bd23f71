use serde::{Deserialize, Serialize};

/// 六個軸向鄰居方向 (axial)
pub const HEX_DIRECTIONS: [(i32, i32); 6] = [(1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1), (1, -1)];

/// Axial hex coordinate. Ordered by `q` then `r`, which is what every
/// deterministic tie-break in the layout relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const ORIGIN: HexCoord = HexCoord { q: 0, r: 0 };

    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Nearest integer hex to a continuous point.
    pub fn from_point(x: f64, y: f64) -> Self {
        Self::new(x.round() as i32, y.round() as i32)
    }

    pub fn neighbors(self) -> impl Iterator<Item = HexCoord> {
        HEX_DIRECTIONS
            .iter()
            .map(move |(dq, dr)| HexCoord::new(self.q + dq, self.r + dr))
    }

    /// Hex-grid distance: cube-coordinate Manhattan distance divided by two.
    pub fn distance(self, other: HexCoord) -> u32 {
        let dx = (self.q - other.q).abs();
        let dz = (self.r - other.r).abs();
        let dy = ((-self.q - self.r) - (-other.q - other.r)).abs();
        ((dx + dy + dz) / 2) as u32
    }

    pub fn squared_distance_to(self, x: f64, y: f64) -> f64 {
        let dq = self.q as f64 - x;
        let dr = self.r as f64 - y;
        dq * dq + dr * dr
    }
}
