//! Paging and carousel interaction engine.
//!
//! `tessera-pager` turns an ordered collection into swipeable pages. It keeps
//! track of the selected page, converts pointer drags into page offsets,
//! decides where a released drag settles, and fakes endless looping by padding
//! the displayed sequence with copies of the edge pages.
//!
//! Rendering is left to the host: each frame it reads a [`PagerFrame`] and
//! animates the [`Transition`]s the pager requests.
//!
//! # Usage
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use tessera_pager::{DragSample, Pager, PagerSettings, Position, Size};
//!
//! let settings = PagerSettings::default().interitem_spacing(8.0);
//! let mut pager = Pager::new(vec![10, 20, 30], |page: &i32| *page, settings);
//! pager.layout(Size::new(360.0, 240.0));
//!
//! // Swipe towards the leading edge.
//! let start = Instant::now();
//! for (dx, millis) in [(-12.0, 0), (-240.0, 200)] {
//!     let translation = Position::new(dx, 0.0);
//!     pager.drag_changed(DragSample::new(
//!         Position::new(300.0, 120.0) + translation,
//!         translation,
//!         start + Duration::from_millis(millis),
//!     ));
//! }
//! pager.drag_ended();
//! assert_eq!(pager.selected_index(), 1);
//!
//! for transition in pager.take_transitions() {
//!     // Animate `transition.from_offset` to `transition.to_offset`, then:
//!     pager.transition_completed(transition.id);
//! }
//! ```
//!
//! # Modules
//!
//! - [`index`] maps real page indices to indices of the padded sequence
//! - [`displayed`] builds the padded sequence
//! - [`offset`] computes page sizes and strip offsets
//! - [`drag`] tracks a drag gesture
//! - [`snap`] resolves where a gesture settles
//! - [`model`] holds the observable selection state
//! - [`auto_scroll`] drives timer based paging
//! - [`pager`] ties everything together
#![deny(missing_docs, clippy::unwrap_used)]

pub mod auto_scroll;
pub mod displayed;
pub mod drag;
pub mod error;
pub mod event;
pub mod geometry;
pub mod index;
pub mod model;
pub mod offset;
pub mod pager;
pub mod settings;
pub mod snap;

pub use auto_scroll::{AutoScroller, ScrollTimer};
pub use displayed::{BatchGroup, PageKey, PageWrapper};
pub use drag::{DragPhase, DragSample, DragUpdate};
pub use error::SettingsError;
pub use event::{ChangeOrigin, EventBus, PagerEvent, SubscriptionId};
pub use geometry::{PagerAxis, Position, Size};
pub use index::IndexMapper;
pub use model::{PagerModel, Update};
pub use pager::{Pager, PagerFrame, Transition, TransitionId};
pub use settings::{Alignment, Animation, Easing, GesturePriority, PagerSettings, Sensitivity};
pub use snap::SnapResult;
