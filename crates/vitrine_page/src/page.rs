//! The page runtime
//!
//! [`Page`] owns the document, the timer queue and the event dispatcher.
//! Every host input (scroll, click, key press, clock advance) goes through a
//! `Page` method, which dispatches the matching event, runs due timers, and
//! then re-checks visibility triggers. Nothing runs concurrently.
//!
//! Components never hold references into the page. Handlers capture element
//! handles and receive `&mut PageState` when they run; deferred work is a
//! [`Task`] payload on the shared scheduler.

use rand::rngs::StdRng;
use rand::SeedableRng;
use slotmap::SlotMap;
use vitrine_animation::{
    AnimationScheduler, CounterAnimation, Timeline, TimerId, TypingCycler, TypingTimings,
    COUNTER_TICK_MS,
};
use vitrine_core::events::event_types;
use vitrine_core::{
    ElementId, Event, EventData, EventDispatcher, EventTarget, KeyCode, Result, StateStore,
    WidgetId,
};

use crate::components;
use crate::config::PageConfig;
use crate::document::{Document, Element};
use crate::markup::PageSpec;
use crate::overlay::{NotificationKind, OverlayId, OverlayManager, OverlayTimings};
use crate::tasks::{CounterKey, Mutation, Task, TimelineKey};
use crate::tech_info;
use crate::visibility::VisibilityTrigger;

struct TimelineRun {
    started_at: u64,
    timeline: Timeline<Mutation>,
    timer: Option<TimerId>,
}

struct CounterRun {
    element: ElementId,
    animation: CounterAnimation,
    timer: TimerId,
}

struct TypingRun {
    element: ElementId,
    cycler: TypingCycler,
}

/// Everything a handler may touch
pub struct PageState {
    pub doc: Document,
    pub timers: AnimationScheduler<Task>,
    pub visibility: VisibilityTrigger,
    pub overlays: OverlayManager,
    pub store: StateStore,
    config: PageConfig,
    timelines: SlotMap<TimelineKey, TimelineRun>,
    counters: SlotMap<CounterKey, CounterRun>,
    typing: Option<TypingRun>,
    rng: StdRng,
    scroll_pending: bool,
}

impl PageState {
    pub fn new(doc: Document, config: PageConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let overlays = OverlayManager::new(OverlayTimings {
            notification_ms: config.timing.notification_ms,
            ..OverlayTimings::default()
        });
        Self {
            doc,
            timers: AnimationScheduler::new(),
            visibility: VisibilityTrigger::new(),
            overlays,
            store: StateStore::new(),
            config,
            timelines: SlotMap::with_key(),
            counters: SlotMap::with_key(),
            typing: None,
            rng,
            scroll_pending: false,
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Current virtual time
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    /// Generator for decorative randomness
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Scroll the viewport. A scroll event follows if the position changed.
    pub fn scroll_to(&mut self, y: f32) {
        let before = self.doc.scroll_y();
        if self.doc.set_scroll(y) != before {
            self.scroll_pending = true;
        }
    }

    /// Watch an element for visibility
    pub fn watch(
        &mut self,
        element: ElementId,
        threshold: f32,
        root_margin_bottom: f32,
    ) -> Result<WidgetId> {
        self.visibility
            .register_with_margin(&self.doc, element, threshold, root_margin_bottom)
    }

    // ------------------------------------------------------------------
    // Timelines
    // ------------------------------------------------------------------

    /// Start playing a timeline from now. Empty timelines are dropped.
    pub fn play(&mut self, timeline: Timeline<Mutation>) -> Option<TimelineKey> {
        let first = timeline.next_offset()?;
        let key = self.timelines.insert(TimelineRun {
            started_at: self.timers.now(),
            timeline,
            timer: None,
        });
        let timer = self.timers.set_timeout(first, Task::Timeline(key));
        self.timelines[key].timer = Some(timer);
        Some(key)
    }

    /// Cancel every entry of a timeline that has not played yet
    pub fn cancel_timeline(&mut self, key: TimelineKey) -> bool {
        let Some(run) = self.timelines.remove(key) else {
            return false;
        };
        if let Some(timer) = run.timer {
            self.timers.clear(timer);
        }
        tracing::trace!(?key, pending = run.timeline.len(), "timeline cancelled");
        true
    }

    pub fn is_playing(&self, key: TimelineKey) -> bool {
        self.timelines.contains_key(key)
    }

    fn play_due(&mut self, key: TimelineKey) {
        let now = self.timers.now();
        let Some(run) = self.timelines.get_mut(key) else {
            return;
        };
        for mutation in run.timeline.advance_to(now - run.started_at) {
            mutation.apply(&mut self.doc);
        }
        match run.timeline.next_offset() {
            Some(offset) => {
                let at = run.started_at + offset;
                run.timer = Some(
                    self.timers
                        .set_timeout(at.saturating_sub(now), Task::Timeline(key)),
                );
            }
            None => {
                self.timelines.remove(key);
            }
        }
    }

    // ------------------------------------------------------------------
    // Counters
    // ------------------------------------------------------------------

    /// Count `element`'s text up from 0 to `target`
    pub fn animate_counter(&mut self, element: ElementId, target: u64) -> CounterKey {
        let key = self.counters.insert(CounterRun {
            element,
            animation: CounterAnimation::new(target),
            timer: TimerId::default(),
        });
        let timer = self
            .timers
            .set_interval(COUNTER_TICK_MS, Task::CounterTick(key));
        self.counters[key].timer = timer;
        tracing::debug!(?element, target, "counter started");
        key
    }

    /// Counters still running
    pub fn active_counters(&self) -> usize {
        self.counters.len()
    }

    fn tick_counter(&mut self, key: CounterKey) {
        let Some(run) = self.counters.get_mut(key) else {
            return;
        };
        if !self.doc.contains(run.element) {
            tracing::debug!(element = ?run.element, "counter element removed, stopping");
            self.timers.clear(run.timer);
            self.counters.remove(key);
            return;
        }
        let frame = run.animation.tick();
        self.doc.set_text(run.element, frame.value.to_string());
        if frame.finished {
            self.timers.clear(run.timer);
            tracing::trace!(element = ?run.element, value = frame.value, "counter finished");
            self.counters.remove(key);
        }
    }

    // ------------------------------------------------------------------
    // Typing text
    // ------------------------------------------------------------------

    /// Start cycling `texts` in `element`. Returns false for an empty list.
    pub fn start_typing(
        &mut self,
        element: ElementId,
        texts: Vec<String>,
        timings: TypingTimings,
    ) -> bool {
        let Some(cycler) = TypingCycler::new(texts, timings) else {
            return false;
        };
        self.typing = Some(TypingRun { element, cycler });
        self.timers
            .set_timeout(timings.start_delay_ms, Task::TypingStep);
        true
    }

    pub fn typing(&self) -> Option<&TypingCycler> {
        self.typing.as_ref().map(|run| &run.cycler)
    }

    fn step_typing(&mut self) {
        let Some(run) = self.typing.as_mut() else {
            return;
        };
        if !self.doc.contains(run.element) {
            tracing::debug!("typing element removed, stopping");
            self.typing = None;
            return;
        }
        let step = run.cycler.step();
        self.doc.set_text(run.element, step.text);
        // A zero delay would re-fire at the same instant forever
        self.timers.set_timeout(step.delay_ms.max(1), Task::TypingStep);
    }

    // ------------------------------------------------------------------
    // Overlays
    // ------------------------------------------------------------------

    pub fn show_notification(&mut self, message: &str, kind: NotificationKind) -> OverlayId {
        self.overlays
            .show_notification(&mut self.doc, &mut self.timers, message, kind)
    }

    /// Announce a technology with an info notification
    pub fn show_tech_info(&mut self, name: &str) -> OverlayId {
        self.show_notification(&tech_info::announcement(name), NotificationKind::Info)
    }

    pub fn show_tooltip(&mut self, anchor: ElementId, label: &str) -> Option<OverlayId> {
        self.overlays
            .show_tooltip(&mut self.doc, &mut self.timers, anchor, label)
    }

    pub fn hide_tooltip(&mut self) -> bool {
        self.overlays.hide_tooltip(&mut self.doc)
    }

    pub fn dismiss(&mut self, id: OverlayId) -> bool {
        self.overlays.dismiss(&mut self.doc, &mut self.timers, id)
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    fn run_task(&mut self, task: Task) {
        match task {
            Task::Timeline(key) => self.play_due(key),
            Task::CounterTick(key) => self.tick_counter(key),
            Task::TypingStep => self.step_typing(),
            Task::Overlay(step) => self.overlays.handle(&mut self.doc, &mut self.timers, step),
            Task::FormComplete {
                form,
                button,
                label,
            } => components::contact::complete(self, form, button, label),
            Task::ClearStyle { element, property } => self.doc.set_style(element, property, ""),
            Task::Preloader(step) => components::preloader::run(self, step),
        }
    }
}

/// A loaded page and its event wiring
pub struct Page {
    state: PageState,
    events: EventDispatcher<PageState>,
    loaded: bool,
}

impl Page {
    pub fn new(doc: Document, config: PageConfig) -> Self {
        Self {
            state: PageState::new(doc, config),
            events: EventDispatcher::new(),
            loaded: false,
        }
    }

    /// Build a page from its description
    pub fn from_spec(spec: &PageSpec, config: PageConfig) -> Self {
        Self::new(spec.build(), config)
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PageState {
        &mut self.state
    }

    pub fn document(&self) -> &Document {
        &self.state.doc
    }

    pub fn overlays(&self) -> &OverlayManager {
        &self.state.overlays
    }

    pub fn now(&self) -> u64 {
        self.state.now()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Attach every component, then fire `DOMContentLoaded` and `load`.
    ///
    /// Loading twice is a no-op.
    pub fn load(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        components::install(&mut self.state, &mut self.events);
        tracing::info!(
            elements = self.state.doc.len(),
            subscriptions = self.events.len(),
            watched = self.state.visibility.len(),
            "page loaded"
        );

        self.dispatch(Event::new(event_types::DOM_READY, EventTarget::Window));
        self.dispatch(Event::new(event_types::LOAD, EventTarget::Window));
        self.flush();
    }

    /// Scroll the viewport to `y`
    pub fn scroll_to(&mut self, y: f32) {
        self.state.scroll_to(y);
        self.flush();
    }

    /// Resize the viewport. A taller viewport can clamp the scroll offset,
    /// which is reported like any other scroll.
    pub fn resize(&mut self, width: f32, height: f32) {
        let before = self.state.doc.scroll_y();
        self.state.doc.resize(width, height);
        if self.state.doc.scroll_y() != before {
            self.state.scroll_pending = true;
        }
        self.dispatch(
            Event::new(event_types::RESIZE, EventTarget::Window)
                .with_data(EventData::Resize { width, height }),
        );
        self.flush();
    }

    /// Click an element. The event bubbles to every ancestor.
    ///
    /// Returns false if the element is missing or disabled.
    pub fn click(&mut self, element: ElementId) -> bool {
        if !self.state.doc.contains(element) || self.state.doc.is_disabled(element) {
            return false;
        }

        let path = self.propagation_path(element);
        if let Some(overlay) = path
            .iter()
            .find_map(|node| self.state.overlays.close_target(*node))
        {
            self.state.dismiss(overlay);
        }

        let bounds = self.state.doc.bounds(element).unwrap_or_default();
        let mut event = Event::new(event_types::CLICK, EventTarget::Element(element))
            .with_data(EventData::Pointer {
                x: bounds.x() + bounds.width() / 2.0,
                y: bounds.y() + bounds.height() / 2.0,
            })
            .at(self.state.now());
        for node in path {
            if event.propagation_stopped {
                break;
            }
            event.target = EventTarget::Element(node);
            self.events.dispatch(&mut self.state, &mut event);
        }

        if !event.default_prevented {
            if let Some(form) = self.submitted_form(element) {
                self.submit(form);
            }
        }
        self.flush();
        true
    }

    pub fn pointer_enter(&mut self, element: ElementId) {
        self.dispatch(Event::new(
            event_types::POINTER_ENTER,
            EventTarget::Element(element),
        ));
        self.flush();
    }

    pub fn pointer_leave(&mut self, element: ElementId) {
        self.dispatch(Event::new(
            event_types::POINTER_LEAVE,
            EventTarget::Element(element),
        ));
        self.flush();
    }

    pub fn key_down(&mut self, key: KeyCode) {
        self.dispatch(
            Event::new(event_types::KEY_DOWN, EventTarget::Window)
                .with_data(EventData::Key { key }),
        );
        self.flush();
    }

    /// Submit a form. Returns true if a handler prevented navigation.
    pub fn submit(&mut self, form: ElementId) -> bool {
        let mut event = Event::new(event_types::SUBMIT, EventTarget::Element(form))
            .at(self.state.now());
        self.events.dispatch(&mut self.state, &mut event);
        self.flush();
        event.default_prevented
    }

    /// Type into a field, replacing its value
    pub fn input(&mut self, element: ElementId, value: &str) {
        self.state.doc.set_attr(element, "value", value);
    }

    /// Advance the clock by `ms`, firing every timer that comes due
    pub fn advance(&mut self, ms: u64) {
        self.advance_to(self.now() + ms);
    }

    /// Advance the clock to `until`. Times in the past are ignored.
    pub fn advance_to(&mut self, until: u64) {
        while let Some(fired) = self.state.timers.pop_due(until) {
            self.state.run_task(fired.payload);
            self.flush();
        }
        self.state.timers.advance_to(until);
    }

    fn dispatch(&mut self, event: Event) -> usize {
        let mut event = event.at(self.state.now());
        self.events.dispatch(&mut self.state, &mut event)
    }

    /// Deliver pending scroll events and visibility sightings
    fn flush(&mut self) {
        loop {
            if std::mem::take(&mut self.state.scroll_pending) {
                let y = self.state.doc.scroll_y();
                self.dispatch(
                    Event::new(event_types::SCROLL, EventTarget::Window)
                        .with_data(EventData::Scroll { y }),
                );
            }

            let sightings = self.state.visibility.observe(&self.state.doc);
            for sighting in &sightings {
                tracing::trace!(widget = ?sighting.widget, ratio = sighting.ratio, "widget visible");
                self.dispatch(
                    Event::new(event_types::VISIBLE, EventTarget::Widget(sighting.widget))
                        .with_data(EventData::Visibility {
                            ratio: sighting.ratio,
                            element: sighting.element,
                        }),
                );
            }

            if sightings.is_empty() && !self.state.scroll_pending {
                break;
            }
        }
    }

    /// `element` followed by its ancestors
    fn propagation_path(&self, element: ElementId) -> Vec<ElementId> {
        let mut path = vec![element];
        let mut current = self.state.doc.parent(element);
        while let Some(node) = current {
            path.push(node);
            current = self.state.doc.parent(node);
        }
        path
    }

    /// The form a click on a submit button submits
    fn submitted_form(&self, element: ElementId) -> Option<ElementId> {
        let doc = &self.state.doc;
        if !doc.get(element).is_some_and(Element::is_submit_button) {
            return None;
        }
        self.propagation_path(element)
            .into_iter()
            .skip(1)
            .find(|node| doc.get(*node).is_some_and(|e| e.tag.eq_ignore_ascii_case("form")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::Rect;

    fn bare_page() -> Page {
        let mut doc = Document::new(1280.0, 800.0);
        let filler = doc.create_child(doc.body(), "div");
        doc.set_bounds(filler, Rect::new(0.0, 0.0, 1280.0, 4000.0));
        let config = PageConfig {
            seed: Some(1),
            ..PageConfig::default()
        };
        Page::new(doc, config)
    }

    #[test]
    fn test_timeline_applies_in_offset_order() {
        let mut page = bare_page();
        page.load();
        let el = page.state.doc.create_child(page.state.doc.body(), "div");

        let mut timeline = Timeline::new();
        timeline.stagger(
            100,
            50,
            ["a", "b", "c"].map(|v| Mutation::new(el).style("transform", v)),
        );
        let key = page.state.play(timeline).unwrap();

        page.advance(99);
        assert_eq!(page.document().style(el, "transform"), None);
        page.advance(1);
        assert_eq!(page.document().style(el, "transform"), Some("a"));
        page.advance(100);
        assert_eq!(page.document().style(el, "transform"), Some("c"));
        assert!(!page.state.is_playing(key));
    }

    #[test]
    fn test_cancelled_timeline_never_applies() {
        let mut page = bare_page();
        page.load();
        let el = page.state.doc.create_child(page.state.doc.body(), "div");

        let mut timeline = Timeline::new();
        timeline.add(0, Mutation::new(el).style("opacity", "0.5"));
        timeline.add(200, Mutation::new(el).style("opacity", "1"));
        let key = page.state.play(timeline).unwrap();

        page.advance(10);
        assert_eq!(page.document().style(el, "opacity"), Some("0.5"));
        assert!(page.state.cancel_timeline(key));
        page.advance(500);
        assert_eq!(page.document().style(el, "opacity"), Some("0.5"));
    }

    #[test]
    fn test_counter_stops_when_element_removed() {
        let mut page = bare_page();
        page.load();
        let el = page.state.doc.create_child(page.state.doc.body(), "span");
        page.state.animate_counter(el, 100);

        page.advance(400);
        assert_eq!(page.state.active_counters(), 1);
        page.state.doc.remove(el);
        page.advance(40);
        assert_eq!(page.state.active_counters(), 0);
        page.advance(4000);
    }

    #[test]
    fn test_scroll_event_only_on_change() {
        let mut page = bare_page();
        let seen = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = seen.clone();
        page.events
            .subscribe(EventTarget::Window, event_types::SCROLL, move |_, _| {
                counter.set(counter.get() + 1);
                vitrine_core::Subscription::Keep
            });

        page.scroll_to(100.0);
        page.scroll_to(100.0);
        page.scroll_to(-20.0);
        assert_eq!(seen.get(), 2);
        assert_eq!(page.document().scroll_y(), 0.0);
    }

    #[test]
    fn test_disabled_element_ignores_clicks() {
        let mut page = bare_page();
        let button = page.state.doc.create_child(page.state.doc.body(), "button");
        page.state.doc.set_disabled(button, true);
        assert!(!page.click(button));
    }

    #[test]
    fn test_timeline_on_removed_element_is_dropped() {
        let mut page = bare_page();
        page.load();
        let el = page.state.doc.create_child(page.state.doc.body(), "div");

        let mut timeline = Timeline::new();
        timeline.add(100, Mutation::new(el).style("opacity", "1").style("transform", "none"));
        let key = page.state.play(timeline).unwrap();

        page.advance(50);
        assert!(page.state.doc.remove(el));
        page.advance(150);

        assert!(!page.state.is_playing(key));
        assert!(!page.document().contains(el));
        assert_eq!(page.document().style(el, "opacity"), None);
    }

    #[test]
    fn test_zero_typing_delays_still_advance_time() {
        let mut page = bare_page();
        let el = page.state.doc.create_child(page.state.doc.body(), "span");
        let timings = TypingTimings {
            start_delay_ms: 0,
            type_ms: 0,
            delete_ms: 0,
            hold_full_ms: 0,
            hold_empty_ms: 0,
        };
        assert!(page.state.start_typing(el, vec!["ab".to_string()], timings));

        page.advance(10);
        assert_eq!(page.now(), 10);
        assert!(page.document().text_content(el).len() <= 2);
    }

    #[test]
    fn test_resize_that_clamps_scroll_emits_scroll() {
        let mut page = bare_page();
        let seen = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = seen.clone();
        page.events
            .subscribe(EventTarget::Window, event_types::SCROLL, move |_, _| {
                counter.set(counter.get() + 1);
                vitrine_core::Subscription::Keep
            });

        page.scroll_to(3200.0);
        assert_eq!(seen.get(), 1);

        page.resize(1280.0, 900.0);
        assert_eq!(page.document().scroll_y(), 3100.0);
        assert_eq!(seen.get(), 2);

        // Shrinking keeps the offset, so nothing to report
        page.resize(1280.0, 700.0);
        assert_eq!(seen.get(), 2);
    }
}
