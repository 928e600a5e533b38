//! Visibility triggers
//!
//! One-shot "became visible" detection over the document viewport. A widget
//! fires the first time its visible fraction reaches its threshold and is never
//! observed again.

use slotmap::SlotMap;
use vitrine_core::{ElementId, Error, Result, WidgetId};

use crate::document::Document;

/// Threshold for generic fade/slide/scale reveals
pub const REVEAL_THRESHOLD: f32 = 0.1;
/// Root margin pulling the viewport bottom up for generic reveals
pub const REVEAL_ROOT_MARGIN: f32 = 50.0;
/// Threshold for counters and skill bars
pub const HALF_VISIBLE: f32 = 0.5;
/// Threshold for the tech showcase
pub const SHOWCASE_THRESHOLD: f32 = 0.3;

/// An element watched by a trigger
#[derive(Clone, Copy, Debug, PartialEq)]
struct AnimatedWidget {
    element: ElementId,
    threshold: f32,
    root_margin_bottom: f32,
    fired: bool,
}

/// A widget that just became visible
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sighting {
    pub widget: WidgetId,
    pub element: ElementId,
    pub ratio: f32,
}

/// Registry of watched widgets
#[derive(Default)]
pub struct VisibilityTrigger {
    widgets: SlotMap<WidgetId, AnimatedWidget>,
}

impl VisibilityTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch `element` until it is at least `threshold` visible
    pub fn register(&mut self, doc: &Document, element: ElementId, threshold: f32) -> Result<WidgetId> {
        self.register_with_margin(doc, element, threshold, 0.0)
    }

    /// Like [`register`](Self::register), with the viewport bottom pulled in by
    /// `root_margin_bottom` pixels
    pub fn register_with_margin(
        &mut self,
        doc: &Document,
        element: ElementId,
        threshold: f32,
        root_margin_bottom: f32,
    ) -> Result<WidgetId> {
        if !doc.supports_intersection() {
            return Err(Error::MissingCapability("viewport intersection"));
        }
        Ok(self.widgets.insert(AnimatedWidget {
            element,
            threshold: threshold.clamp(0.0, 1.0),
            root_margin_bottom,
            fired: false,
        }))
    }

    /// Check every pending widget against the current viewport.
    ///
    /// Returns widgets that crossed their threshold, in registration order.
    /// They are marked fired and dropped from observation. Widgets whose
    /// element was removed are dropped silently.
    pub fn observe(&mut self, doc: &Document) -> Vec<Sighting> {
        let mut sightings = Vec::new();
        let mut gone = Vec::new();

        for (widget, state) in self.widgets.iter_mut() {
            if state.fired {
                continue;
            }
            let Some(ratio) = doc.intersection_ratio(state.element, state.root_margin_bottom) else {
                if !doc.contains(state.element) {
                    gone.push(widget);
                }
                continue;
            };
            let crossed = if state.threshold <= 0.0 {
                ratio > 0.0
            } else {
                ratio >= state.threshold
            };
            if crossed {
                state.fired = true;
                sightings.push(Sighting {
                    widget,
                    element: state.element,
                    ratio,
                });
            }
        }

        for widget in gone {
            tracing::debug!(?widget, "watched element removed, unobserving");
            self.widgets.remove(widget);
        }
        sightings
    }

    pub fn is_fired(&self, widget: WidgetId) -> bool {
        self.widgets.get(widget).is_some_and(|w| w.fired)
    }

    /// Widgets still waiting to fire
    pub fn pending(&self) -> usize {
        self.widgets.values().filter(|w| !w.fired).count()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::Rect;

    fn doc_with_section(y: f32) -> (Document, ElementId) {
        let mut doc = Document::new(1000.0, 800.0);
        let section = doc.create_child(doc.body(), "section");
        doc.set_bounds(section, Rect::new(0.0, y, 1000.0, 400.0));
        let footer = doc.create_child(doc.body(), "footer");
        doc.set_bounds(footer, Rect::new(0.0, 3000.0, 1000.0, 100.0));
        (doc, section)
    }

    #[test]
    fn test_fires_once_when_threshold_reached() {
        let (mut doc, section) = doc_with_section(1000.0);
        let mut trigger = VisibilityTrigger::new();
        let widget = trigger.register(&doc, section, HALF_VISIBLE).unwrap();

        assert!(trigger.observe(&doc).is_empty());

        // 100 of 400 px visible: below threshold
        doc.set_scroll(300.0);
        assert!(trigger.observe(&doc).is_empty());

        doc.set_scroll(500.0);
        let sightings = trigger.observe(&doc);
        assert_eq!(sightings.len(), 1);
        assert_eq!(sightings[0].widget, widget);
        assert_eq!(sightings[0].ratio, 0.75);
        assert!(trigger.is_fired(widget));

        doc.set_scroll(0.0);
        doc.set_scroll(600.0);
        assert!(trigger.observe(&doc).is_empty());
        assert_eq!(trigger.pending(), 0);
    }

    #[test]
    fn test_missing_capability() {
        let (mut doc, section) = doc_with_section(0.0);
        doc.set_intersection_supported(false);
        let mut trigger = VisibilityTrigger::new();
        assert!(matches!(
            trigger.register(&doc, section, REVEAL_THRESHOLD),
            Err(Error::MissingCapability(_))
        ));
    }

    #[test]
    fn test_removed_element_is_dropped() {
        let (mut doc, section) = doc_with_section(2000.0);
        let mut trigger = VisibilityTrigger::new();
        trigger.register(&doc, section, REVEAL_THRESHOLD).unwrap();

        doc.remove(section);
        assert!(trigger.observe(&doc).is_empty());
        assert!(trigger.is_empty());
    }

    #[test]
    fn test_zero_threshold_needs_some_overlap() {
        let (mut doc, section) = doc_with_section(800.0);
        let mut trigger = VisibilityTrigger::new();
        trigger.register(&doc, section, 0.0).unwrap();

        assert!(trigger.observe(&doc).is_empty());
        doc.set_scroll(1.0);
        assert_eq!(trigger.observe(&doc).len(), 1);
    }
}
