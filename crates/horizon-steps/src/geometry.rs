//! Affine transforms and the sliding-marker skew effect.
//!
//! [`compute_transform`] is the pure geometry: it maps an offset, the
//! progress of the slide and a direction to a translation plus horizontal
//! shear. [`OffsetEffect`] feeds it from per-frame samples and infers the
//! direction from the previous offset sample.

/// A 2D affine transformation matrix.
///
/// Stored as a 3x2 matrix in column-major order:
/// ```text
/// | m00 m10 m20 |   | scale_x  shear_x  translate_x |
/// | m01 m11 m21 | = | shear_y  scale_y  translate_y |
/// ```
///
/// # Example
///
/// ```
/// use horizon_steps::geometry::AffineTransform;
///
/// let t = AffineTransform::translate(10.0, 0.0).then(&AffineTransform::shear_x(0.5));
/// // shear first, then translate
/// assert_eq!(t.transform_point(2.0, 4.0), (14.0, 4.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    m: [f32; 6],
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    /// The identity transform (no transformation).
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    /// Create a transform from raw matrix elements.
    ///
    /// Elements are in the order: m00, m01, m10, m11, m20, m21
    #[inline]
    pub const fn from_matrix(m00: f32, m01: f32, m10: f32, m11: f32, m20: f32, m21: f32) -> Self {
        Self {
            m: [m00, m01, m10, m11, m20, m21],
        }
    }

    /// Create a translation transform.
    #[inline]
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 1.0, tx, ty],
        }
    }

    /// Create a non-uniform scaling transform.
    #[inline]
    pub const fn scale_xy(sx: f32, sy: f32) -> Self {
        Self {
            m: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Create a horizontal shear: `x' = x + shear * y`.
    #[inline]
    pub const fn shear_x(shear: f32) -> Self {
        Self {
            m: [1.0, 0.0, shear, 1.0, 0.0, 0.0],
        }
    }

    /// Horizontal scale about a fixed x coordinate.
    pub fn scale_x_around(sx: f32, anchor_x: f32) -> Self {
        Self::translate(anchor_x, 0.0)
            .then(&Self::scale_xy(sx, 1.0))
            .then(&Self::translate(-anchor_x, 0.0))
    }

    /// Compose two transforms: `self.then(other)` applies `other` first.
    #[inline]
    pub fn then(&self, other: &Self) -> Self {
        let a = &self.m;
        let b = &other.m;
        Self {
            m: [
                a[0] * b[0] + a[2] * b[1],
                a[1] * b[0] + a[3] * b[1],
                a[0] * b[2] + a[2] * b[3],
                a[1] * b[2] + a[3] * b[3],
                a[0] * b[4] + a[2] * b[5] + a[4],
                a[1] * b[4] + a[3] * b[5] + a[5],
            ],
        }
    }

    /// Apply the transform to a point.
    #[inline]
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        let m = &self.m;
        (m[0] * x + m[2] * y + m[4], m[1] * x + m[3] * y + m[5])
    }

    /// Horizontal translation component.
    #[inline]
    pub fn translate_x(&self) -> f32 {
        self.m[4]
    }

    /// Horizontal shear component.
    #[inline]
    pub fn shear_x_component(&self) -> f32 {
        self.m[2]
    }

    /// Horizontal scale component.
    #[inline]
    pub fn scale_x(&self) -> f32 {
        self.m[0]
    }

    /// The raw matrix elements: m00, m01, m10, m11, m20, m21.
    #[inline]
    pub fn to_array(&self) -> [f32; 6] {
        self.m
    }

    /// Check if this is the identity transform.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// Default skew factor of the sliding marker.
pub const DEFAULT_SKEW_FACTOR: f32 = 0.1;

/// Which way the marker is sliding, inferred from consecutive offset samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// The offset grew since the previous sample. Skews with sign `-1`.
    Increasing,
    /// The offset shrank or stayed put. Skews with sign `+1`.
    #[default]
    NotIncreasing,
}

impl Direction {
    /// Infer the direction from the previous and the current offset sample.
    pub fn from_samples(previous: f32, current: f32) -> Self {
        if current > previous {
            Self::Increasing
        } else {
            Self::NotIncreasing
        }
    }

    /// The sign applied to the skew.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Self::Increasing => -1.0,
            Self::NotIncreasing => 1.0,
        }
    }
}

/// Skew magnitude before direction and factor are applied.
///
/// Ramps 0 -> 1 over the first fifth of the slide, holds at 1, and ramps
/// back to 0 over the last fifth.
pub fn skew_envelope(progress: f32) -> f32 {
    if progress < 0.2 {
        progress * 5.0
    } else if progress > 0.8 {
        (1.0 - progress) * 5.0
    } else {
        1.0
    }
}

/// Compute the marker transform for one frame.
///
/// The result translates by `offset` and shears horizontally by
/// `skew_envelope(progress) * direction.sign() * factor`.
///
/// ```
/// use horizon_steps::geometry::{compute_transform, Direction};
///
/// let t = compute_transform(40.0, 0.5, Direction::NotIncreasing, 0.1);
/// assert_eq!(t.translate_x(), 40.0);
/// assert_eq!(t.shear_x_component(), 0.1);
/// ```
pub fn compute_transform(
    offset: f32,
    progress: f32,
    direction: Direction,
    factor: f32,
) -> AffineTransform {
    let skew = skew_envelope(progress) * direction.sign() * factor;
    AffineTransform::from_matrix(1.0, 0.0, skew, 1.0, offset, 0.0)
}

/// Per-frame sampler for the sliding marker effect.
///
/// Holds the latest `(offset, progress)` sample and exactly one piece of
/// history: the direction implied by the previous offset sample. Feeding the
/// same sample twice yields [`Direction::NotIncreasing`].
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetEffect {
    offset: f32,
    progress: f32,
    factor: f32,
    direction: Direction,
}

impl OffsetEffect {
    /// Create an effect at rest at `offset`.
    pub fn new(offset: f32, progress: f32, factor: f32) -> Self {
        Self {
            offset,
            progress,
            factor,
            direction: Direction::NotIncreasing,
        }
    }

    /// Feed the next interpolated sample.
    pub fn set_sample(&mut self, offset: f32, progress: f32) {
        self.direction = Direction::from_samples(self.offset, offset);
        self.offset = offset;
        self.progress = progress;
    }

    /// The latest offset sample.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// The latest progress sample.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// The direction inferred from the last two offset samples.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The skew factor.
    #[inline]
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// The transform for the latest sample.
    pub fn transform(&self) -> AffineTransform {
        compute_transform(self.offset, self.progress, self.direction, self.factor)
    }
}

impl Default for OffsetEffect {
    fn default() -> Self {
        Self::new(0.0, 0.0, DEFAULT_SKEW_FACTOR)
    }
}
