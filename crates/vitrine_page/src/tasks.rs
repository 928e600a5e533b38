//! Deferred work scheduled on the page clock

use slotmap::new_key_type;
use smallvec::SmallVec;
use vitrine_core::ElementId;

use crate::document::Document;
use crate::overlay::OverlayId;

new_key_type! {
    /// A timeline of mutations being played
    pub struct TimelineKey;
    /// A running counter animation
    pub struct CounterKey;
}

/// A batch of inline-style writes on one element
#[derive(Clone, Debug, PartialEq)]
pub struct Mutation {
    pub element: ElementId,
    pub styles: SmallVec<[(&'static str, String); 2]>,
}

impl Mutation {
    pub fn new(element: ElementId) -> Self {
        Self {
            element,
            styles: SmallVec::new(),
        }
    }

    pub fn style(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.styles.push((property, value.into()));
        self
    }

    /// Write the styles. A no-op if the element is gone.
    pub fn apply(&self, doc: &mut Document) {
        if !doc.contains(self.element) {
            tracing::debug!(element = ?self.element, "mutation target removed, skipping");
            return;
        }
        for (property, value) in &self.styles {
            doc.set_style(self.element, property, value.clone());
        }
    }
}

/// Overlay lifecycle steps
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayTask {
    /// Tooltip opacity 0 -> 1
    FadeIn(OverlayId),
    /// Notification slides into view
    SlideIn(OverlayId),
    /// Notification display time elapsed
    AutoDismiss(OverlayId),
    /// Exit animation finished; drop the node
    Remove(OverlayId),
}

/// Preloader lifecycle steps
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreloaderStep {
    Fade,
    Remove,
}

/// Payload of every page timer
#[derive(Clone, Debug, PartialEq)]
pub enum Task {
    /// Play due entries of a mutation timeline
    Timeline(TimelineKey),
    /// Advance a counter by one tick
    CounterTick(CounterKey),
    /// Type or delete one character
    TypingStep,
    Overlay(OverlayTask),
    /// Simulated submission finished
    FormComplete {
        form: ElementId,
        button: Option<ElementId>,
        label: String,
    },
    /// Clear a temporary inline style
    ClearStyle {
        element: ElementId,
        property: &'static str,
    },
    Preloader(PreloaderStep),
}
