//! Floating-point geometry used by the pager.
//!
//! Pager offsets are continuous values that are interpolated by the rendering
//! layer, so the types here carry `f32` components instead of whole pixels.
//!
//! # Key Types
//!
//! - [`Position`] - a 2D point or translation (x, y)
//! - [`Size`] - a 2D extent (width, height)
//! - [`PagerAxis`] - the axis pages are laid out and dragged along

use std::ops::{Add, Sub};

/// A 2D position, or a translation between two positions.
///
/// # Examples
///
/// ```
/// use tessera_pager::geometry::Position;
///
/// let start = Position::new(10.0, 4.0);
/// let end = Position::new(40.0, 4.0);
/// assert_eq!(end - start, Position::new(30.0, 0.0));
/// assert_eq!((end - start).angle_degrees(), Some(0.0));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Position {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new position.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Angle of this vector in degrees, in `[0, 360)`.
    ///
    /// Returns `None` for the zero vector, which has no direction.
    pub fn angle_degrees(self) -> Option<f32> {
        if self.x == 0.0 && self.y == 0.0 {
            return None;
        }
        let degrees = self.y.atan2(self.x).to_degrees();
        Some(if degrees < 0.0 { degrees + 360.0 } else { degrees })
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A 2D size.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// The width.
    pub width: f32,
    /// The height.
    pub height: f32,
}

impl Size {
    /// A zero-by-zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns `true` when either dimension is zero or negative.
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// The axis along which pages are laid out and swiped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PagerAxis {
    /// Pages advance from left to right.
    #[default]
    Horizontal,
    /// Pages advance from top to bottom.
    Vertical,
}

impl PagerAxis {
    /// Extent of `size` along this axis.
    pub fn main(self, size: Size) -> f32 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Component of `position` along this axis.
    pub fn main_of(self, position: Position) -> f32 {
        match self {
            Self::Horizontal => position.x,
            Self::Vertical => position.y,
        }
    }

    /// Component of `position` across this axis.
    pub fn cross_of(self, position: Position) -> f32 {
        match self {
            Self::Horizontal => position.y,
            Self::Vertical => position.x,
        }
    }

    /// Whether `delta` points along this axis, within `margin` degrees either
    /// way.
    ///
    /// A zero vector carries no direction and is accepted.
    pub fn is_along(self, delta: Position, margin: f32) -> bool {
        let Some(angle) = delta.angle_degrees() else {
            return true;
        };
        let margin = margin.clamp(0.0, 90.0);
        let degrees = angle.round().rem_euclid(360.0);
        let near = |center: f32| (degrees - center).abs() <= margin;
        match self {
            Self::Horizontal => near(0.0) || near(180.0) || near(360.0),
            Self::Vertical => near(90.0) || near(270.0),
        }
    }
}
