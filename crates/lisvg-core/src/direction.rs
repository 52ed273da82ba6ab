//! Layout direction strategies.
//!
//! A [`Direction`] decides three things for the layout engine:
//!
//! - which [`Axis`] levels progress along (the *primary* axis),
//! - whether level offsets grow forward from zero or backward from the total
//!   extent,
//! - which side of a node an edge leaves from and enters into.
//!
//! Each variant is plain data answering those questions, so the engine has a
//! single code path for all four directions.
//!
//! Layout space is y-up: a larger `y` is visually higher once rendered.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::{Point, Size};

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Returns the other axis.
    pub fn cross(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Returns the extent of `size` along this axis.
    pub fn extent(self, size: Size) -> f64 {
        match self {
            Axis::Horizontal => size.width(),
            Axis::Vertical => size.height(),
        }
    }

    /// Builds a point from a coordinate on this axis and one on the cross axis.
    pub fn point(self, along: f64, across: f64) -> Point {
        match self {
            Axis::Horizontal => Point::new(along, across),
            Axis::Vertical => Point::new(across, along),
        }
    }

    /// Returns `point` moved by `delta` along this axis.
    pub fn shift(self, point: Point, delta: f64) -> Point {
        match self {
            Axis::Horizontal => point.with_x(point.x() + delta),
            Axis::Vertical => point.with_y(point.y() + delta),
        }
    }
}

/// The direction in which successive layout levels are placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Level 0 at the visual top.
    #[default]
    TopToBottom,
    /// Level 0 at the visual bottom.
    BottomToTop,
    /// Level 0 at the left.
    LeftToRight,
    /// Level 0 at the right.
    RightToLeft,
}

impl Direction {
    /// All directions, in declaration order.
    pub const ALL: [Direction; 4] = [
        Direction::TopToBottom,
        Direction::BottomToTop,
        Direction::LeftToRight,
        Direction::RightToLeft,
    ];

    /// The axis along which level index increases.
    pub fn primary_axis(self) -> Axis {
        match self {
            Direction::TopToBottom | Direction::BottomToTop => Axis::Vertical,
            Direction::LeftToRight | Direction::RightToLeft => Axis::Horizontal,
        }
    }

    /// The axis along which nodes of one level are spread.
    pub fn cross_axis(self) -> Axis {
        self.primary_axis().cross()
    }

    /// `1.0` if higher levels sit at larger coordinates, `-1.0` otherwise.
    pub fn advance_sign(self) -> f64 {
        match self {
            Direction::BottomToTop | Direction::LeftToRight => 1.0,
            Direction::TopToBottom | Direction::RightToLeft => -1.0,
        }
    }

    /// Offset of a level's near edge along the primary axis.
    ///
    /// Forward directions start at zero; backward ones start at the total
    /// extent of `level_count` levels and count down, so level 0 always ends
    /// up on the side the direction is named after.
    pub fn level_offset(self, level: usize, level_count: usize, step: f64) -> f64 {
        if self.advance_sign() > 0.0 {
            level as f64 * step
        } else {
            let total = level_count.saturating_sub(1) as f64 * step;
            total - level as f64 * step
        }
    }

    /// Point where an edge leaves a node centered at `center`.
    pub fn exit_point(self, center: Point, size: Size) -> Point {
        let axis = self.primary_axis();
        axis.shift(center, self.advance_sign() * axis.extent(size) / 2.0)
    }

    /// Point where an edge enters a node centered at `center`.
    pub fn entry_point(self, center: Point, size: Size) -> Point {
        let axis = self.primary_axis();
        axis.shift(center, -self.advance_sign() * axis.extent(size) / 2.0)
    }

    /// The name used in source files and configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::TopToBottom => "top-to-bottom",
            Direction::BottomToTop => "bottom-to-top",
            Direction::LeftToRight => "left-to-right",
            Direction::RightToLeft => "right-to-left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known [`Direction`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unknown direction `{0}`; expected one of `top-to-bottom`, `bottom-to-top`, `left-to-right`, `right-to-left`"
)]
pub struct UnknownDirection(pub String);

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.as_str() == s)
            .ok_or_else(|| UnknownDirection(s.to_string()))
    }
}
