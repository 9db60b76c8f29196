//! Pager configuration.
//!
//! [`PagerSettings`] is assembled by the embedding application before (or
//! between) gestures and read continuously by every other module. Fields are
//! set with the generated builder-style setters:
//!
//! ```
//! use tessera_pager::settings::{Alignment, PagerSettings, Sensitivity};
//!
//! let settings = PagerSettings::default()
//!     .is_infinite_pager(true)
//!     .interitem_spacing(12.0)
//!     .preferred_item_width(280.0)
//!     .alignment(Alignment::Justified(16.0))
//!     .sensitivity(Sensitivity::High);
//!
//! assert!(settings.validate().is_ok());
//! ```
use std::time::Duration;

use derive_setters::Setters;
use tracing::warn;

use crate::{error::SettingsError, geometry::PagerAxis};

/// Default looping padding on each side of the displayed sequence.
pub const DEFAULT_LOOPING_PADDING_COUNT: usize = 2;
/// Default distance a pointer must travel before a drag is recognized.
pub const DEFAULT_GESTURE_MINIMUM_DISTANCE: f32 = 10.0;
/// Default angular tolerance, in degrees, for a drag to count as on-axis.
pub const DEFAULT_AXIS_MARGIN_DEGREES: f32 = 30.0;
/// Default velocity that turns a short drag into a page change.
pub const DEFAULT_DRAG_VELOCITY_THRESHOLD: f32 = 500.0;
/// Default delay between two auto-scroll ticks.
pub const DEFAULT_AUTO_SCROLL_INTERVAL: Duration = Duration::from_secs(2);

/// Interpolation curve of an [`Animation`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Starts slow.
    EaseIn,
    /// Ends slow.
    EaseOut,
    /// Starts and ends slow.
    #[default]
    EaseInOut,
}

/// Describes how the rendering layer should interpolate a transition.
///
/// The pager never runs animations itself; it only attaches a descriptor to
/// each [`Transition`](crate::pager::Transition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Animation {
    /// Interpolation curve.
    pub easing: Easing,
    /// Total duration.
    pub duration: Duration,
}

impl Animation {
    /// General purpose animation, used for taps and while dragging.
    pub const DEFAULT: Self = Self::new(Easing::EaseInOut, Duration::from_millis(350));
    /// Animation used when a page settles after a swipe.
    pub const DEFAULT_PAGING: Self = Self::ease_out(Duration::from_millis(350));

    /// Creates a new animation descriptor.
    pub const fn new(easing: Easing, duration: Duration) -> Self {
        Self { easing, duration }
    }

    /// Ease-out animation of the given duration.
    pub const fn ease_out(duration: Duration) -> Self {
        Self::new(Easing::EaseOut, duration)
    }

    /// Linear animation of the given duration.
    pub const fn linear(duration: Duration) -> Self {
        Self::new(Easing::Linear, duration)
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How far a drag must travel, relative to one page, to change page.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sensitivity {
    /// The drag must cover at least 75% of a page.
    Low,
    /// The drag must cover at least 50% of a page.
    #[default]
    Medium,
    /// The drag must cover at least 25% of a page.
    High,
    /// The drag must cover at least the given fraction of a page.
    Custom(f32),
}

impl Sensitivity {
    /// Sensitivity used when none is configured.
    pub const DEFAULT: Self = Self::Medium;

    /// Fraction of a page the drag must cover.
    pub fn value(self) -> f32 {
        match self {
            Self::Low => 0.75,
            Self::Medium => 0.5,
            Self::High => 0.25,
            Self::Custom(value) => value,
        }
    }
}

/// Where the focused page sits inside the container.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// The focused page is centered.
    #[default]
    Center,
    /// Centered, except the first and last pages, which snap to the leading
    /// and trailing edges with the given inset.
    Justified(f32),
    /// Every page snaps to the leading edge with the given inset.
    Start(f32),
    /// Every page snaps to the trailing edge with the given inset.
    End(f32),
}

impl Alignment {
    /// The alignment inset, zero for [`Alignment::Center`].
    pub fn insets(self) -> f32 {
        match self {
            Self::Center => 0.0,
            Self::Justified(insets) | Self::Start(insets) | Self::End(insets) => insets,
        }
    }

    fn with_insets(self, insets: f32) -> Self {
        match self {
            Self::Center => Self::Center,
            Self::Justified(_) => Self::Justified(insets),
            Self::Start(_) => Self::Start(insets),
            Self::End(_) => Self::End(insets),
        }
    }
}

/// How the host toolkit should attach the drag recognizer.
///
/// The pager does not recognize gestures itself; this is forwarded to the
/// gesture plumbing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GesturePriority {
    /// Takes precedence over gestures of enclosing views.
    High,
    /// Recognized together with other gestures.
    Simultaneous,
    /// Regular priority.
    #[default]
    Normal,
}

/// Configuration shared by every pager component.
#[derive(Debug, Clone, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PagerSettings {
    /// Axis pages are laid out and dragged along.
    pub axis: PagerAxis,
    /// Whether the pager loops endlessly.
    pub is_infinite_pager: bool,
    /// Number of pages duplicated on both sides of the data to fake looping.
    pub items_looping_padding_count: usize,
    /// Preferred page width, capped by the container.
    #[setters(strip_option)]
    pub preferred_item_width: Option<f32>,
    /// Preferred page height, capped by the container.
    #[setters(strip_option)]
    pub preferred_item_height: Option<f32>,
    /// Fixed container height, for pagers embedded in scrolling content.
    #[setters(strip_option)]
    pub container_height: Option<f32>,
    /// Horizontal space between a page and the container edges.
    #[setters(strip_option)]
    pub item_horizontal_insets: Option<f32>,
    /// Vertical space between a page and the container edges.
    #[setters(strip_option)]
    pub item_vertical_insets: Option<f32>,
    /// Page aspect ratio, expressed as width / height.
    #[setters(strip_option)]
    pub item_aspect_ratio: Option<f32>,
    /// Space between two pages.
    pub interitem_spacing: f32,
    /// Distance the pointer travels before a drag is recognized.
    pub gesture_minimum_distance: f32,
    /// Angular tolerance, in degrees, for a drag sample to count as on-axis.
    pub axis_margin_degrees: f32,
    /// Animation used while the page follows the pointer, reported in
    /// [`PagerFrame::animation`](crate::pager::PagerFrame::animation).
    pub dragging_animation: Option<Animation>,
    /// Animation used when settling on a page.
    pub default_paging_animation: Option<Animation>,
    /// Animation used by auto-scroll ticks, `default_paging_animation` when
    /// unset.
    pub auto_scroll_animation: Option<Animation>,
    /// Delay between two auto-scroll ticks.
    pub auto_scroll_interval: Duration,
    /// Whether the pager reacts to drags at all.
    pub allows_dragging: bool,
    /// Priority the host should give to the drag recognizer.
    pub gesture_priority: GesturePriority,
    /// Scales drag increments: `page_distance * multiplier / container`,
    /// never above 1.
    pub page_drag_normalization_multiplier: f32,
    /// When `false` the page follows the pointer 1:1.
    pub is_drag_offset_normalized: bool,
    /// Whether the first and last pages may be overscrolled.
    pub bounces: bool,
    /// Shrink ratio of unfocused pages; only affects spacing.
    pub interactive_scale: f32,
    /// Largest forward drag, in pages, before the offset stops growing.
    /// Must be positive.
    pub page_ratio: f32,
    /// Drag velocity that changes page even when the drag was too short.
    pub drag_velocity_threshold: f32,
    /// Fraction of a page a drag must cover to change page.
    pub sensitivity: Sensitivity,
    /// Position of the focused page in the container.
    pub alignment: Alignment,
}

impl Default for PagerSettings {
    fn default() -> Self {
        Self {
            axis: PagerAxis::Horizontal,
            is_infinite_pager: false,
            items_looping_padding_count: DEFAULT_LOOPING_PADDING_COUNT,
            preferred_item_width: None,
            preferred_item_height: None,
            container_height: None,
            item_horizontal_insets: None,
            item_vertical_insets: None,
            item_aspect_ratio: None,
            interitem_spacing: 0.0,
            gesture_minimum_distance: DEFAULT_GESTURE_MINIMUM_DISTANCE,
            axis_margin_degrees: DEFAULT_AXIS_MARGIN_DEGREES,
            dragging_animation: Some(Animation::DEFAULT),
            default_paging_animation: Some(Animation::DEFAULT_PAGING),
            auto_scroll_animation: None,
            auto_scroll_interval: DEFAULT_AUTO_SCROLL_INTERVAL,
            allows_dragging: true,
            gesture_priority: GesturePriority::High,
            page_drag_normalization_multiplier: 1.0,
            is_drag_offset_normalized: true,
            bounces: true,
            interactive_scale: 1.0,
            page_ratio: 1.0,
            drag_velocity_threshold: DEFAULT_DRAG_VELOCITY_THRESHOLD,
            sensitivity: Sensitivity::DEFAULT,
            alignment: Alignment::Center,
        }
    }
}

impl PagerSettings {
    /// `1 - interactive_scale`: how much an unfocused page shrinks.
    pub fn scale_increment(&self) -> f32 {
        1.0 - self.interactive_scale
    }

    /// Animation for an auto-scroll tick.
    pub fn auto_scroll_animation_or_default(&self) -> Option<Animation> {
        self.auto_scroll_animation.or(self.default_paging_animation)
    }

    /// Checks every field against its documented domain.
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let lengths = [
            ("preferred_item_width", self.preferred_item_width),
            ("preferred_item_height", self.preferred_item_height),
            ("container_height", self.container_height),
            ("item_horizontal_insets", self.item_horizontal_insets),
            ("item_vertical_insets", self.item_vertical_insets),
            ("interitem_spacing", Some(self.interitem_spacing)),
            ("gesture_minimum_distance", Some(self.gesture_minimum_distance)),
            ("drag_velocity_threshold", Some(self.drag_velocity_threshold)),
            ("alignment", Some(self.alignment.insets())),
        ];
        for (field, value) in lengths {
            let Some(value) = value else { continue };
            if !value.is_finite() {
                return Err(SettingsError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(SettingsError::Negative { field, value });
            }
        }
        if !(self.page_ratio.is_finite() && self.page_ratio > 0.0) {
            return Err(SettingsError::PageRatio(self.page_ratio));
        }
        if !self.page_drag_normalization_multiplier.is_finite() {
            return Err(SettingsError::NonFinite {
                field: "page_drag_normalization_multiplier",
            });
        }
        if let Some(ratio) = self.item_aspect_ratio
            && !(ratio.is_finite() && ratio > 0.0)
        {
            return Err(SettingsError::AspectRatio(ratio));
        }
        let sensitivity = self.sensitivity.value();
        if !(sensitivity > 0.0 && sensitivity <= 1.0) {
            return Err(SettingsError::Sensitivity(sensitivity));
        }
        if !(self.interactive_scale > 0.0 && self.interactive_scale <= 1.0) {
            return Err(SettingsError::InteractiveScale(self.interactive_scale));
        }
        if !(0.0..=90.0).contains(&self.axis_margin_degrees) {
            return Err(SettingsError::AxisMargin(self.axis_margin_degrees));
        }
        Ok(())
    }

    /// Returns a copy with every out-of-domain value replaced by the nearest
    /// valid one.
    pub fn sanitized(&self) -> Self {
        let mut settings = self.clone();

        settings.preferred_item_width = self
            .preferred_item_width
            .map(|v| length("preferred_item_width", v));
        settings.preferred_item_height = self
            .preferred_item_height
            .map(|v| length("preferred_item_height", v));
        settings.container_height = self
            .container_height
            .map(|v| length("container_height", v));
        settings.item_horizontal_insets = self
            .item_horizontal_insets
            .map(|v| length("item_horizontal_insets", v));
        settings.item_vertical_insets = self
            .item_vertical_insets
            .map(|v| length("item_vertical_insets", v));
        settings.interitem_spacing = length("interitem_spacing", self.interitem_spacing);
        settings.gesture_minimum_distance =
            length("gesture_minimum_distance", self.gesture_minimum_distance);
        if !(self.page_ratio.is_finite() && self.page_ratio > 0.0) {
            warn!(ratio = self.page_ratio, "page ratio replaced by 1");
            settings.page_ratio = 1.0;
        }
        settings.drag_velocity_threshold =
            length("drag_velocity_threshold", self.drag_velocity_threshold);
        settings.alignment = self
            .alignment
            .with_insets(length("alignment", self.alignment.insets()));

        let multiplier = self.page_drag_normalization_multiplier;
        settings.page_drag_normalization_multiplier = if multiplier.is_finite() {
            multiplier.abs()
        } else {
            warn!(
                field = "page_drag_normalization_multiplier",
                "non-finite value replaced by 1"
            );
            1.0
        };

        settings.item_aspect_ratio = self.item_aspect_ratio.filter(|ratio| {
            let valid = ratio.is_finite() && *ratio > 0.0;
            if !valid {
                warn!(ratio, "ignoring invalid item aspect ratio");
            }
            valid
        });

        let sensitivity = self.sensitivity.value();
        if !(sensitivity > 0.0 && sensitivity <= 1.0) {
            let clamped = if sensitivity.is_nan() {
                Sensitivity::DEFAULT.value()
            } else {
                sensitivity.clamp(f32::EPSILON, 1.0)
            };
            warn!(sensitivity, clamped, "sensitivity clamped into (0, 1]");
            settings.sensitivity = Sensitivity::Custom(clamped);
        }

        if !(self.interactive_scale > 0.0 && self.interactive_scale <= 1.0) {
            let clamped = if self.interactive_scale.is_nan() {
                1.0
            } else {
                self.interactive_scale.clamp(f32::EPSILON, 1.0)
            };
            warn!(
                scale = self.interactive_scale,
                clamped, "interactive scale clamped into (0, 1]"
            );
            settings.interactive_scale = clamped;
        }

        if !(0.0..=90.0).contains(&self.axis_margin_degrees) {
            let clamped = if self.axis_margin_degrees.is_nan() {
                DEFAULT_AXIS_MARGIN_DEGREES
            } else {
                self.axis_margin_degrees.clamp(0.0, 90.0)
            };
            warn!(
                margin = self.axis_margin_degrees,
                clamped, "axis margin clamped into [0, 90]"
            );
            settings.axis_margin_degrees = clamped;
        }

        settings
    }
}

fn length(field: &'static str, value: f32) -> f32 {
    if !value.is_finite() {
        warn!(field, "non-finite length replaced by 0");
        0.0
    } else if value < 0.0 {
        warn!(field, value, "negative length clamped to 0");
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = PagerSettings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.sanitized(), settings);
        assert_eq!(settings.items_looping_padding_count, 2);
        assert_eq!(settings.sensitivity.value(), 0.5);
    }

    #[test]
    fn test_sensitivity_values() {
        assert_eq!(Sensitivity::Low.value(), 0.75);
        assert_eq!(Sensitivity::Medium.value(), 0.5);
        assert_eq!(Sensitivity::High.value(), 0.25);
        assert_eq!(Sensitivity::Custom(0.1).value(), 0.1);
    }

    #[test]
    fn test_alignment_insets() {
        assert_eq!(Alignment::Center.insets(), 0.0);
        assert_eq!(Alignment::Start(8.0).insets(), 8.0);
        assert_eq!(Alignment::End(4.0).insets(), 4.0);
    }

    #[test]
    fn test_validate_reports_first_violation() {
        let settings = PagerSettings::default().interitem_spacing(-4.0);
        assert_eq!(
            settings.validate(),
            Err(SettingsError::Negative {
                field: "interitem_spacing",
                value: -4.0
            })
        );

        let settings = PagerSettings::default().sensitivity(Sensitivity::Custom(1.5));
        assert_eq!(settings.validate(), Err(SettingsError::Sensitivity(1.5)));

        let settings = PagerSettings::default().item_aspect_ratio(0.0);
        assert_eq!(settings.validate(), Err(SettingsError::AspectRatio(0.0)));

        let settings = PagerSettings::default().page_ratio(0.0);
        assert_eq!(settings.validate(), Err(SettingsError::PageRatio(0.0)));
    }

    #[test]
    fn test_sanitized_clamps_to_nearest_valid_value() {
        let settings = PagerSettings::default()
            .interitem_spacing(-4.0)
            .preferred_item_width(f32::NAN)
            .page_drag_normalization_multiplier(-2.0)
            .sensitivity(Sensitivity::Custom(3.0))
            .interactive_scale(0.0)
            .item_aspect_ratio(-1.0)
            .alignment(Alignment::Start(-10.0));
        let sanitized = settings.sanitized();

        assert_eq!(sanitized.interitem_spacing, 0.0);
        assert_eq!(sanitized.preferred_item_width, Some(0.0));
        assert_eq!(sanitized.page_drag_normalization_multiplier, 2.0);
        assert_eq!(sanitized.sensitivity.value(), 1.0);
        assert_eq!(sanitized.interactive_scale, f32::EPSILON);
        assert_eq!(sanitized.item_aspect_ratio, None);
        assert_eq!(sanitized.alignment, Alignment::Start(0.0));
        assert_eq!(sanitized.validate(), Ok(()));
    }

    #[test]
    fn test_unusable_page_ratio_falls_back_to_one_page() {
        for ratio in [f32::NAN, f32::INFINITY, -0.5, 0.0] {
            let sanitized = PagerSettings::default().page_ratio(ratio).sanitized();
            assert_eq!(sanitized.page_ratio, 1.0);
            assert_eq!(sanitized.validate(), Ok(()));
        }
        let kept = PagerSettings::default().page_ratio(0.5).sanitized();
        assert_eq!(kept.page_ratio, 0.5);
    }

    #[test]
    fn test_auto_scroll_animation_falls_back_to_paging_animation() {
        let settings = PagerSettings::default();
        assert_eq!(
            settings.auto_scroll_animation_or_default(),
            Some(Animation::DEFAULT_PAGING)
        );
        let linear = Animation::linear(Duration::from_millis(100));
        let settings = settings.auto_scroll_animation(Some(linear));
        assert_eq!(settings.auto_scroll_animation_or_default(), Some(linear));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: PagerSettings = serde_json::from_str(
            r#"{ "is_infinite_pager": true, "interitem_spacing": 8.0, "sensitivity": "High" }"#,
        )
        .expect("settings should deserialize");
        assert!(settings.is_infinite_pager);
        assert_eq!(settings.interitem_spacing, 8.0);
        assert_eq!(settings.sensitivity, Sensitivity::High);
        assert_eq!(settings.items_looping_padding_count, 2);
    }
}
