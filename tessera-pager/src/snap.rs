//! Gesture-end page resolution.
//!
//! [`SnapResolver`] decides where a released drag settles, and
//! [`SelectionPlan`] describes how to reach a page of the padded region
//! without a visible jump.
use crate::{index::IndexMapper, settings::PagerSettings};

/// Page a gesture settles on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapResult {
    /// Internal index to settle on.
    pub page: usize,
    /// Whether `page` differs from the page the gesture started on.
    pub did_change: bool,
}

/// Rounds to the integer farther from zero.
///
/// ```
/// use tessera_pager::snap::round_away_from_zero;
///
/// assert_eq!(round_away_from_zero(0.2), 1.0);
/// assert_eq!(round_away_from_zero(-0.2), -1.0);
/// assert_eq!(round_away_from_zero(2.0), 2.0);
/// ```
pub fn round_away_from_zero(value: f32) -> f32 {
    if value >= 0.0 {
        value.ceil()
    } else {
        value.floor()
    }
}

/// Resolves the page a released drag settles on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResolver {
    page_distance: f32,
    mapper: IndexMapper,
    sensitivity: f32,
    velocity_threshold: f32,
}

impl SnapResolver {
    /// Creates a resolver for the pages of `mapper`, spaced `page_distance`
    /// apart.
    pub fn new(settings: &PagerSettings, page_distance: f32, mapper: IndexMapper) -> Self {
        Self {
            page_distance,
            mapper,
            sensitivity: settings.sensitivity.value(),
            velocity_threshold: settings.drag_velocity_threshold,
        }
    }

    /// Number of pages the drag offset alone moves by.
    ///
    /// Positive values move towards the first page. Whole pages always count;
    /// the fractional remainder counts as one more page once it reaches the
    /// sensitivity.
    pub fn pages_to_move(&self, drag_offset: f32) -> isize {
        if self.page_distance <= f32::EPSILON {
            return 0;
        }
        let normalized = drag_offset / self.page_distance;
        if !normalized.is_finite() {
            return 0;
        }
        let whole = normalized.trunc();
        let remainder = normalized - whole;
        let extra = if remainder.abs() < self.sensitivity {
            0.0
        } else {
            round_away_from_zero(remainder)
        };
        (whole + extra) as isize
    }

    /// Resolves the settling page for a drag that started on `current`.
    pub fn resolve(&self, current: usize, drag_offset: f32, velocity: f32) -> SnapResult {
        let Some(last) = self.mapper.displayed_len().checked_sub(1) else {
            return SnapResult {
                page: 0,
                did_change: false,
            };
        };
        let current = current.min(last);
        if self.page_distance <= f32::EPSILON {
            return SnapResult {
                page: current,
                did_change: false,
            };
        }

        let origin = current as isize;
        let mut page = self.settle(origin.saturating_sub(self.pages_to_move(drag_offset)));

        if page == current && velocity != 0.0 && velocity.abs() > self.velocity_threshold {
            let step = if velocity < 0.0 { 1 } else { -1 };
            page = self.settle(origin + step);
        }

        SnapResult {
            page,
            did_change: page != current,
        }
    }

    /// Brings `candidate` back into the displayed range.
    ///
    /// A looping pager wraps by whole collections, landing on the main page
    /// that shows what `candidate` would have shown; a finite pager clamps.
    fn settle(&self, candidate: isize) -> usize {
        let last = self.mapper.displayed_len() as isize - 1;
        if !self.mapper.is_infinite() || (0..=last).contains(&candidate) {
            return candidate.clamp(0, last) as usize;
        }
        let offset = self.mapper.effective_padding() as isize;
        let count = self.mapper.count() as isize;
        (offset + (candidate - offset).rem_euclid(count)) as usize
    }
}

/// Steps needed to select an internal index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPlan {
    /// Index to jump to without animation before animating.
    pub jump_from: Option<usize>,
    /// Index the animated transition ends on.
    pub target: usize,
}

impl SelectionPlan {
    /// Plans the selection of `target` while `current` is focused.
    ///
    /// A target inside the padded region is replaced by its canonical copy.
    /// The pager first jumps, unanimated, to the page that sits as far from
    /// the canonical copy as `current` sits from `target`, so the following
    /// animation shows the same pages moving the same distance.
    pub fn new(mapper: &IndexMapper, current: usize, target: usize) -> Self {
        let displayed = mapper.displayed_len();
        if !mapper.is_in_padding(target) || displayed == 0 {
            return Self {
                jump_from: None,
                target,
            };
        }

        let count = mapper.count() as isize;
        let distance = current.abs_diff(target) as isize;
        let padded = target as isize;
        let (canonical, jump_from) = if target < mapper.effective_padding() {
            let canonical = padded + count;
            (canonical, canonical + distance)
        } else {
            let canonical = padded - count;
            (canonical, canonical - distance)
        };

        let last = displayed as isize - 1;
        Self {
            jump_from: Some(jump_from.clamp(0, last) as usize),
            target: canonical.clamp(0, last) as usize,
        }
    }
}
