//! Vitrine Core Runtime
//!
//! Foundational primitives shared by every Vitrine crate:
//!
//! - **Event Subscriptions**: typed handlers registered against a source and
//!   event type, able to unregister themselves after running
//! - **State Machines**: small typed state machines for animated widgets
//! - **Keyed State**: per-widget state addressed by key instead of globals
//! - **Geometry**: rectangles for layout bounds and viewport math
//!
//! # Example
//!
//! ```rust
//! use vitrine_core::events::{event_types, Event, EventDispatcher, EventTarget, Subscription};
//!
//! let mut dispatcher: EventDispatcher<u32> = EventDispatcher::new();
//! dispatcher.subscribe(EventTarget::Window, event_types::SCROLL, |count, _event| {
//!     *count += 1;
//!     Subscription::Unsubscribe
//! });
//!
//! let mut count = 0;
//! let mut event = Event::new(event_types::SCROLL, EventTarget::Window);
//! dispatcher.dispatch(&mut count, &mut event);
//! dispatcher.dispatch(&mut count, &mut event);
//! assert_eq!(count, 1);
//! ```

pub mod error;
pub mod events;
pub mod fsm;
pub mod geometry;
pub mod store;

pub use error::{Error, Result};
pub use events::{
    ElementId, Event, EventData, EventDispatcher, EventTarget, EventType, KeyCode,
    Subscription, SubscriptionId, WidgetId,
};
pub use fsm::{StateMachine, Transition};
pub use geometry::{Point, Rect, Size};
pub use store::{StateKey, StateStore};
