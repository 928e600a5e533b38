//! Event dispatch system
//!
//! Components subscribe typed handlers against an event source and event type.
//! A handler returns [`Subscription::Unsubscribe`] to remove itself once it has
//! nothing left to do (one-shot visibility reveals, for instance).

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to an element in a page document
    pub struct ElementId;
    /// Handle to a widget registered with a visibility trigger
    pub struct WidgetId;
    /// Handle returned by [`EventDispatcher::subscribe`]
    pub struct SubscriptionId;
}

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const CLICK: EventType = 1;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const KEY_DOWN: EventType = 20;
    pub const SCROLL: EventType = 30;
    pub const RESIZE: EventType = 40;

    // Page lifecycle events
    pub const DOM_READY: EventType = 60;
    pub const LOAD: EventType = 61;

    // Form events
    pub const SUBMIT: EventType = 70;

    /// A watched widget crossed its visibility threshold
    pub const VISIBLE: EventType = 80;
}

/// Where an event is delivered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// The window / document as a whole (scroll, resize, keys, load)
    Window,
    /// A single element
    Element(ElementId),
    /// A widget registered with a visibility trigger
    Widget(WidgetId),
}

/// A page event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: EventTarget,
    pub data: EventData,
    /// Virtual clock time in milliseconds
    pub timestamp: u64,
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer { x: f32, y: f32 },
    Key { key: KeyCode },
    Scroll { y: f32 },
    Resize { width: f32, height: f32 },
    Visibility { ratio: f32, element: ElementId },
    None,
}

/// Virtual key codes (platform-agnostic, DOM `keyCode` values)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const A: KeyCode = KeyCode(0x41);
    pub const B: KeyCode = KeyCode(0x42);

    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);

    // Arrow keys
    pub const LEFT: KeyCode = KeyCode(0x25);
    pub const UP: KeyCode = KeyCode(0x26);
    pub const RIGHT: KeyCode = KeyCode(0x27);
    pub const DOWN: KeyCode = KeyCode(0x28);

    pub const UNKNOWN: KeyCode = KeyCode(0);

    /// Parse a key name as written in session scripts ("up", "b", "enter", ...)
    pub fn from_name(name: &str) -> Option<KeyCode> {
        let lower = name.trim().to_ascii_lowercase();
        let key = match lower.as_str() {
            "up" | "arrowup" => Self::UP,
            "down" | "arrowdown" => Self::DOWN,
            "left" | "arrowleft" => Self::LEFT,
            "right" | "arrowright" => Self::RIGHT,
            "enter" => Self::ENTER,
            "escape" | "esc" => Self::ESCAPE,
            "space" => Self::SPACE,
            single if single.len() == 1 => {
                let c = single.chars().next()?;
                if c.is_ascii_alphanumeric() {
                    KeyCode(c.to_ascii_uppercase() as u32)
                } else {
                    return None;
                }
            }
            _ => return None,
        };
        Some(key)
    }
}

impl Event {
    pub fn new(event_type: EventType, target: EventTarget) -> Self {
        Self {
            event_type,
            target,
            data: EventData::None,
            timestamp: 0,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn with_data(mut self, data: EventData) -> Self {
        self.data = data;
        self
    }

    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// What a handler wants after it ran
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subscription {
    Keep,
    Unsubscribe,
}

/// Event handler function type, run against a mutable context `C`
pub type EventHandler<C> = Box<dyn FnMut(&mut C, &mut Event) -> Subscription>;

struct Registered<C> {
    route: (EventTarget, EventType),
    handler: EventHandler<C>,
}

/// Dispatches events to registered handlers
///
/// Handlers for the same route run in registration order.
pub struct EventDispatcher<C> {
    handlers: SlotMap<SubscriptionId, Registered<C>>,
    routes: FxHashMap<(EventTarget, EventType), SmallVec<[SubscriptionId; 2]>>,
}

impl<C> EventDispatcher<C> {
    pub fn new() -> Self {
        Self {
            handlers: SlotMap::with_key(),
            routes: FxHashMap::default(),
        }
    }

    /// Register an event handler for a target and event type
    pub fn subscribe<F>(
        &mut self,
        target: EventTarget,
        event_type: EventType,
        handler: F,
    ) -> SubscriptionId
    where
        F: FnMut(&mut C, &mut Event) -> Subscription + 'static,
    {
        let route = (target, event_type);
        let id = self.handlers.insert(Registered {
            route,
            handler: Box::new(handler),
        });
        self.routes.entry(route).or_default().push(id);
        id
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let Some(registered) = self.handlers.remove(id) else {
            return false;
        };
        if let Some(ids) = self.routes.get_mut(&registered.route) {
            ids.retain(|existing| *existing != id);
            if ids.is_empty() {
                self.routes.remove(&registered.route);
            }
        }
        true
    }

    /// Dispatch an event to all handlers of its route.
    ///
    /// Returns the number of handlers that ran.
    pub fn dispatch(&mut self, ctx: &mut C, event: &mut Event) -> usize {
        let route = (event.target, event.event_type);
        let Some(ids) = self.routes.get(&route).cloned() else {
            return 0;
        };

        let mut ran = 0;
        for id in ids {
            if event.propagation_stopped {
                break;
            }
            let Some(registered) = self.handlers.get_mut(id) else {
                continue;
            };
            ran += 1;
            if (registered.handler)(ctx, event) == Subscription::Unsubscribe {
                tracing::trace!(?route, "handler unsubscribed");
                self.unsubscribe(id);
            }
        }
        ran
    }

    /// Check whether anything listens on a route
    pub fn has_subscribers(&self, target: EventTarget, event_type: EventType) -> bool {
        self.routes
            .get(&(target, event_type))
            .is_some_and(|ids| !ids.is_empty())
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<C> Default for EventDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handlers_run_in_registration_order() {
        let mut dispatcher: EventDispatcher<Vec<&'static str>> = EventDispatcher::new();
        dispatcher.subscribe(EventTarget::Window, event_types::SCROLL, |log, _| {
            log.push("first");
            Subscription::Keep
        });
        dispatcher.subscribe(EventTarget::Window, event_types::SCROLL, |log, _| {
            log.push("second");
            Subscription::Keep
        });

        let mut log = Vec::new();
        let mut event = Event::new(event_types::SCROLL, EventTarget::Window);
        assert_eq!(dispatcher.dispatch(&mut log, &mut event), 2);
        assert_eq!(log, vec!["first", "second"]);
    }

    #[test]
    fn test_self_unsubscribe() {
        let mut dispatcher: EventDispatcher<u32> = EventDispatcher::new();
        dispatcher.subscribe(EventTarget::Window, event_types::LOAD, |count, _| {
            *count += 1;
            Subscription::Unsubscribe
        });

        let mut count = 0;
        let mut event = Event::new(event_types::LOAD, EventTarget::Window);
        dispatcher.dispatch(&mut count, &mut event);
        dispatcher.dispatch(&mut count, &mut event);

        assert_eq!(count, 1);
        assert!(dispatcher.is_empty());
        assert!(!dispatcher.has_subscribers(EventTarget::Window, event_types::LOAD));
    }

    #[test]
    fn test_routes_are_isolated() {
        let mut dispatcher: EventDispatcher<u32> = EventDispatcher::new();
        dispatcher.subscribe(EventTarget::Window, event_types::CLICK, |count, _| {
            *count += 1;
            Subscription::Keep
        });

        let mut count = 0;
        let mut event = Event::new(event_types::SCROLL, EventTarget::Window);
        assert_eq!(dispatcher.dispatch(&mut count, &mut event), 0);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_explicit_unsubscribe() {
        let mut dispatcher: EventDispatcher<u32> = EventDispatcher::new();
        let id = dispatcher.subscribe(EventTarget::Window, event_types::CLICK, |count, _| {
            *count += 1;
            Subscription::Keep
        });

        assert!(dispatcher.unsubscribe(id));
        assert!(!dispatcher.unsubscribe(id));

        let mut count = 0;
        let mut event = Event::new(event_types::CLICK, EventTarget::Window);
        dispatcher.dispatch(&mut count, &mut event);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_stop_propagation() {
        let mut dispatcher: EventDispatcher<u32> = EventDispatcher::new();
        dispatcher.subscribe(EventTarget::Window, event_types::KEY_DOWN, |count, event| {
            *count += 1;
            event.stop_propagation();
            Subscription::Keep
        });
        dispatcher.subscribe(EventTarget::Window, event_types::KEY_DOWN, |count, _| {
            *count += 10;
            Subscription::Keep
        });

        let mut count = 0;
        let mut event = Event::new(event_types::KEY_DOWN, EventTarget::Window);
        dispatcher.dispatch(&mut count, &mut event);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(KeyCode::from_name("ArrowUp"), Some(KeyCode::UP));
        assert_eq!(KeyCode::from_name("b"), Some(KeyCode::B));
        assert_eq!(KeyCode::from_name("A"), Some(KeyCode::A));
        assert_eq!(KeyCode::from_name("?"), None);
        assert_eq!(KeyCode::from_name("hyper"), None);
    }
}
