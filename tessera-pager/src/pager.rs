//! The pager engine.
//!
//! [`Pager`] owns the page collection, the [`PagerModel`] and the live drag
//! state, and keeps the *internal* index (the focused page of the displayed
//! sequence) in sync with the model's *real* index.
//!
//! The host drives it with three kinds of input, all on one thread:
//!
//! - layout and data changes: [`Pager::layout`], [`Pager::set_data`],
//!   [`Pager::set_settings`];
//! - pointer input: [`Pager::drag_changed`], [`Pager::drag_ended`],
//!   [`Pager::tap`];
//! - timer ticks: [`Pager::auto_scroll_tick`].
//!
//! Each frame the renderer reads [`Pager::frame`] and drains
//! [`Pager::take_transitions`]. Every [`Transition`] must be acknowledged with
//! [`Pager::transition_completed`] once its animation has finished; this is
//! how the pager knows when to silently move a looping pager from a padded
//! duplicate back onto the canonical page.
//!
//! # Example
//!
//! ```
//! use tessera_pager::{geometry::Size, model::Update, pager::Pager, settings::PagerSettings};
//!
//! let settings = PagerSettings::default().is_infinite_pager(true);
//! let mut pager = Pager::new(vec!["a", "b", "c"], |page: &&str| *page, settings);
//! pager.layout(Size::new(320.0, 200.0));
//!
//! pager.update(Update::Previous, None);
//! assert_eq!(pager.selected_index(), 2);
//! assert_eq!(pager.frame().pages.len(), 7);
//! ```
use std::hash::Hash;

use tracing::{debug, trace};

use crate::{
    auto_scroll::{AutoScroller, ScrollTimer},
    displayed::{PageWrapper, displayed_pages},
    drag::{DragContext, DragController, DragPhase, DragSample, DragUpdate},
    event::{PagerEvent, SubscriptionId},
    geometry::Size,
    index::IndexMapper,
    model::{PagerModel, Update},
    offset::OffsetCalculator,
    settings::{Animation, PagerSettings},
    snap::{SelectionPlan, SnapResolver, SnapResult},
};

/// Identifier of an animated [`Transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(u64);

/// A request to animate the page strip between two offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Identifier to pass to [`Pager::transition_completed`].
    pub id: TransitionId,
    /// Internal index focused before the transition.
    pub from_index: Option<usize>,
    /// Internal index focused after the transition.
    pub to_index: usize,
    /// Strip offset the animation starts from.
    pub from_offset: f32,
    /// Strip offset the animation ends on.
    pub to_offset: f32,
    /// How to interpolate between the two offsets.
    pub animation: Animation,
}

/// Everything the renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PagerFrame<'a, T, Id> {
    /// The displayed sequence, padding included.
    pub pages: Vec<PageWrapper<'a, T, Id>>,
    /// Offset of the page strip along the primary axis.
    pub offset: f32,
    /// Size of every page.
    pub page_size: Size,
    /// Space between two pages.
    pub item_spacing: f32,
    /// Focused internal index.
    pub focused: Option<usize>,
    /// Animation to apply to offset changes while the pages follow the
    /// pointer, `None` outside of a moving drag.
    pub animation: Option<Animation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingJump {
    transition: TransitionId,
    index: usize,
}

type IdAccessor<T, Id> = Box<dyn Fn(&T) -> Id + Send + Sync>;

/// Paging engine over a collection of `T`, identified by `Id`.
pub struct Pager<T, Id> {
    model: PagerModel,
    data: Vec<T>,
    id_of: IdAccessor<T, Id>,
    container: Size,
    internal_index: Option<usize>,
    drag: DragController,
    pending: Option<PendingJump>,
    next_transition_id: u64,
    transitions: Vec<Transition>,
}

impl<T, Id> Pager<T, Id>
where
    Id: Clone + Eq + Hash,
{
    /// Creates a pager over `data`, identifying pages with `id_of`.
    ///
    /// The pager stays uninitialized until the first [`layout`](Self::layout)
    /// with a non-empty container.
    pub fn new(
        data: Vec<T>,
        id_of: impl Fn(&T) -> Id + Send + Sync + 'static,
        settings: PagerSettings,
    ) -> Self {
        let model = PagerModel::new(settings, data.len());
        Self {
            model,
            data,
            id_of: Box::new(id_of),
            container: Size::ZERO,
            internal_index: None,
            drag: DragController::new(),
            pending: None,
            next_transition_id: 0,
            transitions: Vec::new(),
        }
    }

    /// The page collection.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Current settings.
    pub fn settings(&self) -> &PagerSettings {
        self.model.settings()
    }

    /// The observable pager state.
    pub fn model(&self) -> &PagerModel {
        &self.model
    }

    /// Selected real index.
    pub fn selected_index(&self) -> usize {
        self.model.selected_index()
    }

    /// Focused internal index, `None` until initialized.
    pub fn internal_index(&self) -> Option<usize> {
        self.internal_index
    }

    /// Internal index the pager will settle on once the running transition
    /// completes.
    pub fn pending_index(&self) -> Option<usize> {
        self.pending.map(|pending| pending.index)
    }

    /// Current container size.
    pub fn container(&self) -> Size {
        self.container
    }

    /// Live drag offset.
    pub fn drag_offset(&self) -> f32 {
        self.drag.offset()
    }

    /// Phase of the current gesture.
    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    /// Index mapping for the current data and settings.
    pub fn mapper(&self) -> IndexMapper {
        let settings = self.model.settings();
        IndexMapper::new(
            self.data.len(),
            settings.items_looping_padding_count,
            settings.is_infinite_pager,
        )
    }

    /// Page geometry for the current container and settings.
    pub fn calculator(&self) -> OffsetCalculator<'_> {
        OffsetCalculator::new(self.model.settings(), self.container)
    }

    /// The displayed sequence, recomputed on every call.
    pub fn displayed_pages(&self) -> Vec<PageWrapper<'_, T, Id>> {
        displayed_pages(&self.data, &self.id_of, &self.mapper())
    }

    /// Distance between two neighbouring pages.
    pub fn page_distance(&self) -> f32 {
        self.calculator().page_distance()
    }

    /// Current offset of the page strip, drag included.
    pub fn visual_offset(&self) -> f32 {
        self.calculator().visual_offset(
            self.internal_index,
            self.mapper().displayed_len(),
            self.drag.offset(),
        )
    }

    /// Snapshot for the renderer.
    pub fn frame(&self) -> PagerFrame<'_, T, Id> {
        let calculator = self.calculator();
        PagerFrame {
            pages: self.displayed_pages(),
            offset: self.visual_offset(),
            page_size: calculator.page_size(),
            item_spacing: calculator.interactive_item_spacing(),
            focused: self.internal_index,
            animation: match self.drag.phase() {
                DragPhase::Active => self.model.settings().dragging_animation,
                _ => None,
            },
        }
    }

    /// Drains the transitions requested since the last call.
    pub fn take_transitions(&mut self) -> Vec<Transition> {
        std::mem::take(&mut self.transitions)
    }

    /// Registers an observer of selection and auto-scroll changes.
    pub fn subscribe(
        &self,
        listener: impl Fn(&PagerEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.model.subscribe(listener)
    }

    /// Updates the container size. The first non-empty layout initializes
    /// the internal index.
    pub fn layout(&mut self, container: Size) {
        if self.container == container {
            return;
        }
        trace!(?container, "pager laid out");
        self.container = container;
        if self.internal_index.is_none() {
            self.resync();
        }
    }

    /// Replaces the page collection.
    ///
    /// The selection is re-clamped to the new page count.
    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
        self.model.set_pages_count(self.data.len());
        self.resync();
    }

    /// Replaces the settings. They are sanitized before use.
    pub fn set_settings(&mut self, settings: PagerSettings) {
        self.model.set_settings(settings);
        self.resync();
    }

    /// Applies `update` to the selection and moves the pages accordingly.
    ///
    /// Returns the new selected index, or `None` if nothing changed.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn update(&mut self, update: Update, animation: Option<Animation>) -> Option<usize> {
        let index = self.model.update(update, animation)?;
        self.handle_selected_index_update(index, animation);
        Some(index)
    }

    /// Selects the first page equal to `element`.
    pub fn select_element(&mut self, element: &T, animation: Option<Animation>) -> Option<usize>
    where
        T: PartialEq,
    {
        let position = self.data.iter().position(|candidate| candidate == element)?;
        self.update(Update::New(position), animation)
    }

    /// Focuses the displayed page at `displayed_index`, as a tap on it does.
    ///
    /// Ignored while a drag is in progress or when the index is out of range.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn tap(&mut self, displayed_index: usize) -> bool {
        if self.drag.is_dragging() || displayed_index >= self.mapper().displayed_len() {
            return false;
        }
        self.select(displayed_index, Some(Animation::DEFAULT));
        true
    }

    /// Focuses the internal index `index`, clamped into the displayed range.
    ///
    /// In a looping pager a padded duplicate is reached through its canonical
    /// page: the pager jumps without animation to an equivalent starting
    /// position and animates from there.
    pub fn select(&mut self, index: usize, animation: Option<Animation>) {
        self.pending = None;
        let mapper = self.mapper();
        let Some(last) = mapper.displayed_len().checked_sub(1) else {
            return;
        };
        let index = index.min(last);

        let Some(current) = self.internal_index else {
            self.commit_internal(index, None, 0.0);
            return;
        };

        let plan = SelectionPlan::new(&mapper, current, index);
        let mut from_offset = self.visual_offset();
        if let Some(jump_from) = plan.jump_from
            && jump_from != plan.target
        {
            trace!(jump_from, target = plan.target, "jumping before looping transition");
            self.commit_internal(jump_from, None, from_offset);
            from_offset = self.visual_offset();
        }
        self.commit_internal(plan.target, animation, from_offset);
    }

    /// Feeds a pointer sample of the current drag gesture.
    ///
    /// The first recognized sample disables auto-scroll on behalf of the user
    /// and settles any transition still waiting for its completion.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn drag_changed(&mut self, sample: DragSample) -> DragUpdate {
        if !self.model.settings().allows_dragging {
            return DragUpdate::Ignored;
        }

        let was_idle = self.drag.phase() == DragPhase::Idle;
        let context = self.drag_context();
        let update = self.drag.drag_changed(sample, self.model.settings(), &context);

        if was_idle && self.drag.phase() != DragPhase::Idle {
            self.gesture_started();
        }
        update
    }

    /// Ends the current drag gesture and settles on a page.
    ///
    /// Returns `None` when the gesture never moved the pages.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn drag_ended(&mut self) -> Option<SnapResult> {
        let released_offset = self.visual_offset();
        let outcome = self.drag.end();
        if outcome.phase != DragPhase::Active {
            return None;
        }
        let current = self.internal_index?;

        let mapper = self.mapper();
        let settings = self.model.settings();
        let animation = settings.default_paging_animation;
        let result = SnapResolver::new(settings, self.page_distance(), mapper)
            .resolve(current, outcome.offset, outcome.velocity);
        debug!(
            from = current,
            to = result.page,
            offset = outcome.offset,
            velocity = outcome.velocity,
            "drag settled"
        );

        if mapper.is_in_padding(result.page) {
            match self.commit_internal(result.page, animation, released_offset) {
                Some(transition) => {
                    self.pending = Some(PendingJump {
                        transition,
                        index: result.page,
                    });
                }
                None => self.select(result.page, None),
            }
        } else {
            self.commit_internal(result.page, animation, released_offset);
        }
        Some(result)
    }

    /// Acknowledges the end of a transition's animation.
    ///
    /// Returns `true` when a pending jump was applied. Unknown and stale
    /// identifiers are ignored.
    pub fn transition_completed(&mut self, id: TransitionId) -> bool {
        match self.pending {
            Some(pending) if pending.transition == id => {
                debug!(index = pending.index, "applying pending jump");
                self.select(pending.index, None);
                true
            }
            _ => false,
        }
    }

    /// Handles a tick of the host timer.
    pub fn auto_scroll_tick(&mut self) -> Option<usize> {
        if self.drag.is_dragging() {
            return None;
        }
        let index = self.model.auto_scroll_tick()?;
        let animation = self.model.settings().auto_scroll_animation_or_default();
        self.handle_selected_index_update(index, animation);
        Some(index)
    }

    /// The auto-scroll state machine.
    pub fn auto_scroller(&self) -> &AutoScroller {
        self.model.auto_scroller()
    }

    /// Installs the host timer driving auto-scroll.
    pub fn set_scroll_timer(&mut self, timer: impl ScrollTimer + 'static) {
        self.model.auto_scroller_mut().set_timer(Box::new(timer));
    }

    /// Enables or disables auto-scroll. Disabling stops the timer.
    pub fn set_auto_scroll_enabled(&mut self, enabled: bool) {
        self.model.auto_scroller_mut().set_enabled(enabled);
    }

    /// Starts auto-scrolling, if enabled.
    pub fn start_auto_scroll(&mut self) {
        self.model.auto_scroller_mut().start();
    }

    /// Stops auto-scrolling.
    pub fn stop_auto_scroll(&mut self) {
        self.model.auto_scroller_mut().stop();
    }

    fn drag_context(&self) -> DragContext {
        let calculator = self.calculator();
        DragContext {
            page_distance: calculator.page_distance(),
            container_main: calculator.container_main(),
            internal_index: self.internal_index,
            displayed: self.mapper().displayed_len(),
        }
    }

    fn gesture_started(&mut self) {
        self.model.auto_scroller_mut().disable_manually();
        if let Some(pending) = self.pending.take() {
            debug!(index = pending.index, "gesture interrupted a transition");
            self.select(pending.index, None);
        }
    }

    fn handle_selected_index_update(&mut self, real: usize, animation: Option<Animation>) {
        let Some(current) = self.internal_index else {
            self.resync();
            return;
        };
        let target = self.mapper().to_internal(real, Some(current));
        if target != current {
            self.select(target, animation);
        }
    }

    /// Re-derives the internal index from the selection when the displayed
    /// sequence changed under it.
    fn resync(&mut self) {
        let mapper = self.mapper();
        let displayed = mapper.displayed_len();
        if displayed == 0 {
            self.internal_index = None;
            self.pending = None;
            return;
        }
        if self.container.is_empty() {
            return;
        }

        let selected = self.model.selected_index();
        if let Some(current) = self.internal_index
            && current < displayed
            && mapper.to_real(current) == selected
        {
            return;
        }

        let index = mapper.to_internal(selected, None);
        debug!(index, selected, "internal index resynchronized");
        self.pending = None;
        self.internal_index = Some(index);
    }

    /// Focuses `index` and requests an animated transition when `animation`
    /// is set and the strip actually moves.
    fn commit_internal(
        &mut self,
        index: usize,
        animation: Option<Animation>,
        from_offset: f32,
    ) -> Option<TransitionId> {
        let previous = self.internal_index.replace(index);
        let real = self.mapper().to_real(index);
        self.model.set_selected_from_content(real);

        let animation = animation?;
        let to_offset = self.visual_offset();
        if previous == Some(index) && (to_offset - from_offset).abs() <= f32::EPSILON {
            return None;
        }

        let id = TransitionId(self.next_transition_id);
        self.next_transition_id += 1;
        trace!(?id, ?previous, index, from_offset, to_offset, "transition requested");
        self.transitions.push(Transition {
            id,
            from_index: previous,
            to_index: index,
            from_offset,
            to_offset,
            animation,
        });
        Some(id)
    }
}

impl<T: std::fmt::Debug, Id> std::fmt::Debug for Pager<T, Id> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("model", &self.model)
            .field("data", &self.data)
            .field("container", &self.container)
            .field("internal_index", &self.internal_index)
            .field("drag", &self.drag)
            .field("pending", &self.pending)
            .field("transitions", &self.transitions)
            .finish_non_exhaustive()
    }
}
