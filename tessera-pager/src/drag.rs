//! Drag gesture tracking.
//!
//! [`DragController`] turns the raw pointer samples of one gesture into a
//! drag offset along the primary axis, and measures the drag velocity used
//! when the gesture ends.
//!
//! # State Machine
//!
//! ```text
//! Idle --(sample past minimum distance)--> Sampling
//! Sampling --(off-axis sample)--> AxisRejected
//! Sampling --(on-axis sample)--> Active
//! Active --(off-axis sample at zero offset)--> AxisRejected
//! any --(end)--> Idle
//! ```
//!
//! A rejected gesture ignores every further sample so another recognizer can
//! claim it. Once the pages have moved, off-axis samples only refresh the
//! sample cache; a gesture brought back to exactly zero offset can be
//! rejected again.
use std::time::Instant;

use tracing::trace;

use crate::{geometry::Position, settings::PagerSettings};

/// One pointer sample of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    /// Current pointer location.
    pub location: Position,
    /// Total translation since the pointer went down.
    pub translation: Position,
    /// Time the sample was taken.
    pub time: Instant,
}

impl DragSample {
    /// Creates a sample.
    pub fn new(location: Position, translation: Position, time: Instant) -> Self {
        Self {
            location,
            translation,
            time,
        }
    }
}

/// Phase of the current gesture.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A gesture started but has not moved the pages yet.
    Sampling,
    /// The gesture does not run along the primary axis and is ignored.
    AxisRejected,
    /// The gesture moves the pages.
    Active,
}

/// Layout facts a drag sample is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragContext {
    /// Distance between two neighbouring pages.
    pub page_distance: f32,
    /// Container extent along the primary axis.
    pub container_main: f32,
    /// Currently focused internal index.
    pub internal_index: Option<usize>,
    /// Length of the displayed sequence.
    pub displayed: usize,
}

/// What a sample did to the drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// The pointer has not travelled far enough for a drag to begin.
    BelowThreshold,
    /// The sample was cached without moving the pages.
    Cached,
    /// The gesture was rejected as not running along the primary axis.
    Rejected,
    /// The gesture was rejected earlier; the sample is ignored.
    Ignored,
    /// The loop boundary guard refused the increment.
    Blocked,
    /// The pages moved to the given drag offset.
    Moved {
        /// New drag offset.
        offset: f32,
    },
}

/// Final state of a gesture, handed to the snap resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOutcome {
    /// Accumulated drag offset.
    pub offset: f32,
    /// Last measured velocity, in offset units per second.
    pub velocity: f32,
    /// Phase the gesture ended in.
    pub phase: DragPhase,
}

/// Accumulates the drag offset of one gesture at a time.
#[derive(Debug, Default, Clone)]
pub struct DragController {
    phase: DragPhase,
    offset: f32,
    velocity: f32,
    last_sample: Option<DragSample>,
}

impl DragController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gesture phase.
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Current drag offset, zero when idle.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Last measured velocity.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Whether a gesture is in progress and has not been rejected.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Sampling | DragPhase::Active)
    }

    /// Feeds one sample of the current gesture.
    pub fn drag_changed(
        &mut self,
        sample: DragSample,
        settings: &PagerSettings,
        context: &DragContext,
    ) -> DragUpdate {
        let axis = settings.axis;

        let last = match (self.phase, self.last_sample) {
            (DragPhase::AxisRejected, _) => return DragUpdate::Ignored,
            (DragPhase::Idle, _) => {
                let travelled = sample.translation.x.hypot(sample.translation.y);
                if travelled < settings.gesture_minimum_distance {
                    return DragUpdate::BelowThreshold;
                }
                trace!(location = ?sample.location, "drag recognized");
                self.phase = DragPhase::Sampling;
                self.last_sample = Some(sample);
                return DragUpdate::Cached;
            }
            (_, None) => {
                self.last_sample = Some(sample);
                return DragUpdate::Cached;
            }
            (_, Some(last)) => last,
        };

        let delta = sample.location - last.location;
        let is_unmoved = self.offset == 0.0;

        if !axis.is_along(delta, settings.axis_margin_degrees) {
            if is_unmoved {
                self.reject();
                return DragUpdate::Rejected;
            }
            self.last_sample = Some(sample);
            return DragUpdate::Cached;
        }

        let translation_main = axis.main_of(sample.translation).abs();
        let translation_cross = axis.cross_of(sample.translation).abs();
        if is_unmoved && translation_main <= translation_cross {
            self.reject();
            return DragUpdate::Rejected;
        }

        if context.page_distance <= f32::EPSILON || context.container_main <= f32::EPSILON {
            self.last_sample = Some(sample);
            return DragUpdate::Cached;
        }

        let ratio = if settings.is_drag_offset_normalized {
            let multiplier = settings.page_drag_normalization_multiplier.abs();
            (context.page_distance * multiplier / context.container_main).min(1.0)
        } else {
            1.0
        };
        let increment = axis.main_of(delta) * ratio;

        if !is_swipe_allowed(increment, settings, context) {
            trace!(increment, "drag increment blocked at loop boundary");
            return DragUpdate::Blocked;
        }

        let elapsed = sample
            .time
            .saturating_duration_since(last.time)
            .as_secs_f32();
        if elapsed > 0.0 {
            self.velocity = increment / elapsed;
        }

        // A single gesture advances at most `page_ratio` pages forward.
        let forward_limit = settings.page_ratio * -context.page_distance;
        self.offset = (self.offset + increment).max(forward_limit);
        self.last_sample = Some(sample);
        if self.offset != 0.0 {
            self.phase = DragPhase::Active;
        }

        DragUpdate::Moved {
            offset: self.offset,
        }
    }

    /// Ends the current gesture and resets the controller to idle.
    pub fn end(&mut self) -> DragOutcome {
        let outcome = DragOutcome {
            offset: self.offset,
            velocity: self.velocity,
            phase: self.phase,
        };
        *self = Self::default();
        outcome
    }

    fn reject(&mut self) {
        trace!("drag rejected: not along the primary axis");
        self.phase = DragPhase::AxisRejected;
        self.last_sample = None;
    }
}

/// Loop boundary guard.
///
/// In infinite mode the pages next to the padded edges cannot be dragged
/// further out until the pending jump back into the canonical range has
/// happened; otherwise empty space would show.
pub fn is_swipe_allowed(increment: f32, settings: &PagerSettings, context: &DragContext) -> bool {
    if !settings.is_infinite_pager {
        return true;
    }
    let Some(internal) = context.internal_index else {
        return true;
    };

    if internal <= 1 && increment > 0.0 {
        return false;
    }
    if internal + 2 >= context.displayed && increment < 0.0 {
        return false;
    }
    true
}
