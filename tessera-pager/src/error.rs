//! Configuration errors.

use thiserror::Error;

/// A pager setting that lies outside its documented domain.
///
/// Returned by [`PagerSettings::validate`](crate::settings::PagerSettings::validate).
/// The pager itself never fails on bad configuration; it runs on
/// [`PagerSettings::sanitized`](crate::settings::PagerSettings::sanitized)
/// values instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    /// A numeric field is NaN or infinite.
    #[error("`{field}` must be a finite number")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A length field is negative.
    #[error("`{field}` must not be negative, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// The custom sensitivity is not a fraction of a page.
    #[error("sensitivity must be within (0, 1], got {0}")]
    Sensitivity(f32),
    /// The interactive scale is not within `(0, 1]`.
    #[error("interactive scale must be within (0, 1], got {0}")]
    InteractiveScale(f32),
    /// The forward drag limit is not a positive number of pages.
    #[error("page ratio must be positive, got {0}")]
    PageRatio(f32),
    /// The aspect ratio is zero or negative.
    #[error("item aspect ratio must be positive, got {0}")]
    AspectRatio(f32),
    /// The axis margin does not describe an angle between 0 and 90 degrees.
    #[error("axis margin must be within [0, 90] degrees, got {0}")]
    AxisMargin(f32),
}
