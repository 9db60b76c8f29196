//! The observable pager state.
//!
//! [`PagerModel`] owns the selected real index and the page count, applies
//! [`Update`] requests and publishes every committed change on its
//! [`EventBus`].
use tracing::debug;

use crate::{
    auto_scroll::AutoScroller,
    event::{ChangeOrigin, EventBus, PagerEvent, SubscriptionId},
    settings::{Animation, PagerSettings},
};

/// A change to apply to the selected index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Update {
    /// Selects the next page, wrapping to the first one in infinite mode.
    Next,
    /// Selects the previous page, wrapping to the last one in infinite mode.
    Previous,
    /// Selects the first page.
    MoveToFirst,
    /// Selects the last page.
    MoveToLast,
    /// Moves the selection by the given number of pages.
    Move(isize),
    /// Selects the given page.
    New(usize),
}

/// Selected page, page count and auto-scroll state of a pager.
#[derive(Debug)]
pub struct PagerModel {
    settings: PagerSettings,
    selected_index: usize,
    pages_count: usize,
    auto_scroller: AutoScroller,
    events: EventBus,
}

impl PagerModel {
    /// Creates a model for `pages_count` pages with the first page selected.
    ///
    /// `settings` are sanitized before use.
    pub fn new(settings: PagerSettings, pages_count: usize) -> Self {
        let settings = settings.sanitized();
        let events = EventBus::new();
        let auto_scroller = AutoScroller::new(settings.auto_scroll_interval, events.clone());
        Self {
            settings,
            selected_index: 0,
            pages_count,
            auto_scroller,
            events,
        }
    }

    /// Current settings.
    pub fn settings(&self) -> &PagerSettings {
        &self.settings
    }

    /// Replaces the settings. They are sanitized before use.
    pub fn set_settings(&mut self, settings: PagerSettings) {
        self.settings = settings.sanitized();
        self.auto_scroller.set_interval(self.settings.auto_scroll_interval);
    }

    /// Selected real index.
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Number of pages.
    pub fn pages_count(&self) -> usize {
        self.pages_count
    }

    /// Event bus the model and its auto-scroller publish on.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Registers an observer of the model's events.
    pub fn subscribe(
        &self,
        listener: impl Fn(&PagerEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    /// The auto-scroll state machine.
    pub fn auto_scroller(&self) -> &AutoScroller {
        &self.auto_scroller
    }

    /// Mutable access to the auto-scroll state machine.
    pub fn auto_scroller_mut(&mut self) -> &mut AutoScroller {
        &mut self.auto_scroller
    }

    /// Index `update` would select, without applying it.
    ///
    /// `Next` and `Previous` wrap only in infinite mode. Every result is then
    /// reduced modulo the page count, with negative values becoming zero; an
    /// empty pager always yields zero.
    pub fn target_index(&self, update: Update) -> usize {
        let count = self.pages_count as isize;
        let current = self.selected_index as isize;
        let infinite = self.settings.is_infinite_pager;

        let candidate = match update {
            Update::Next if infinite && current + 1 >= count => 0,
            Update::Next => (current + 1).min(count - 1),
            Update::Previous if infinite && current < 1 => count - 1,
            Update::Previous => current - 1,
            Update::MoveToFirst => 0,
            Update::MoveToLast => count - 1,
            Update::Move(increment) => current.saturating_add(increment),
            Update::New(index) => isize::try_from(index).unwrap_or(isize::MAX),
        };

        if count == 0 {
            0
        } else {
            (candidate % count).max(0) as usize
        }
    }

    /// Applies `update` and returns the newly selected index, or `None` if
    /// the selection did not change.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn update(&mut self, update: Update, animation: Option<Animation>) -> Option<usize> {
        let index = self.target_index(update);
        self.commit(index, animation, ChangeOrigin::Update)
    }

    /// Selects `index`, clamped into the page range.
    ///
    /// Returns the new index, or `None` if the selection did not change.
    pub fn update_selected_index(
        &mut self,
        index: usize,
        animation: Option<Animation>,
    ) -> Option<usize> {
        let index = self.clamp(index);
        self.commit(index, animation, ChangeOrigin::Update)
    }

    /// Records the page the content settled on after a gesture or a tap.
    pub fn set_selected_from_content(&mut self, index: usize) -> Option<usize> {
        let index = self.clamp(index);
        self.commit(index, None, ChangeOrigin::Content)
    }

    /// Changes the page count and re-clamps the selection.
    pub fn set_pages_count(&mut self, count: usize) {
        if self.pages_count == count {
            return;
        }
        debug!(from = self.pages_count, to = count, "page count changed");
        self.pages_count = count;
        self.update_selected_index(self.selected_index, None);
    }

    /// Handles a tick of the auto-scroll timer.
    ///
    /// Returns the newly selected index when the tick advanced the pager.
    pub fn auto_scroll_tick(&mut self) -> Option<usize> {
        if !self.auto_scroller.accepts_tick() || self.pages_count == 0 {
            return None;
        }
        let animation = self.settings.auto_scroll_animation_or_default();
        self.update(Update::Next, animation)
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.pages_count.saturating_sub(1))
    }

    fn commit(
        &mut self,
        index: usize,
        animation: Option<Animation>,
        origin: ChangeOrigin,
    ) -> Option<usize> {
        if self.selected_index == index {
            return None;
        }
        debug!(from = self.selected_index, to = index, ?origin, "selection changed");
        self.selected_index = index;
        self.events.emit(PagerEvent::SelectionChanged {
            index,
            animation,
            origin,
        });
        Some(index)
    }
}

impl Default for PagerModel {
    fn default() -> Self {
        Self::new(PagerSettings::default(), 0)
    }
}
