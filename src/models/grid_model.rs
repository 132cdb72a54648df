// src/models/grid_model.rs
//
// The tile addressing model: row-letter + column-number addresses,
// travel directions, and the neighbor step used by the relay.

use regex::Regex;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    UpRight,
    UpLeft,
    DownRight,
    DownLeft,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::UpRight
    }
}

impl Direction {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "up-right" => Some(Direction::UpRight),
            "up-left" => Some(Direction::UpLeft),
            "down-right" => Some(Direction::DownRight),
            "down-left" => Some(Direction::DownLeft),
            _ => None,
        }
    }

    // Attribute-style lookup: unrecognized or missing values fall back
    // to the default direction.
    pub fn from_attr(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::UpRight => "up-right",
            Direction::UpLeft => "up-left",
            Direction::DownRight => "down-right",
            Direction::DownLeft => "down-left",
        }
    }

    // Screen-space travel unit, y up. Scaled by the tile size when
    // building a travel path.
    pub fn unit(&self) -> (f32, f32) {
        match self {
            Direction::UpRight => (1.0, 1.0),
            Direction::UpLeft => (-1.0, 1.0),
            Direction::DownRight => (1.0, -1.0),
            Direction::DownLeft => (-1.0, -1.0),
        }
    }

    // (row delta, col delta) in address space. Rows grow downward,
    // so "up" is a negative row delta.
    pub fn deltas(&self) -> (i32, i32) {
        match self {
            Direction::UpRight => (-1, 1),
            Direction::UpLeft => (-1, -1),
            Direction::DownRight => (1, 1),
            Direction::DownLeft => (1, -1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tile slot address: one row letter plus a column number, e.g. "a0".
/// The row is always stored lowercase; parsing accepts either case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileAddress {
    pub row: char,
    pub col: u32,
}

impl TileAddress {
    pub fn new(row: char, col: u32) -> Option<Self> {
        let row = row.to_ascii_lowercase();
        if row.is_ascii_lowercase() {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let re = Regex::new(r"(?i)^([a-z])(\d+)$").ok()?;
        let caps = re.captures(s.trim())?;
        let row = caps[1].chars().next()?.to_ascii_lowercase();
        let col = caps[2].parse().ok()?;
        Some(Self { row, col })
    }

    /// The neighboring address one diagonal step away, or None when the
    /// step leaves the addressable range (row outside a..=z, or a
    /// negative column). Never mutates self.
    pub fn step(&self, direction: Direction) -> Option<TileAddress> {
        let (row_delta, col_delta) = direction.deltas();

        let row = if row_delta < 0 {
            if self.row == 'a' {
                return None;
            }
            (self.row as u8 - 1) as char
        } else {
            if self.row == 'z' {
                return None;
            }
            (self.row as u8 + 1) as char
        };

        let col = if col_delta < 0 {
            self.col.checked_sub(1)?
        } else {
            self.col + 1
        };

        Some(TileAddress { row, col })
    }

    pub fn row_index(&self) -> u32 {
        (self.row as u8 - b'a') as u32
    }
}

impl fmt::Display for TileAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.row, self.col)
    }
}
