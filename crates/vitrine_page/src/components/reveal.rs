//! Fade, slide and scale reveals
//!
//! Sections get their reveal class at load; every element carrying one is
//! shown (`visible`) the first time a tenth of it enters the viewport.

use vitrine_core::events::event_types;
use vitrine_core::{EventTarget, Subscription};

use super::{css_number, PageEvents};
use crate::page::PageState;
use crate::visibility::{REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD};

pub const REVEAL_CLASSES: [&str; 4] = ["fade-in", "slide-in-left", "slide-in-right", "scale-in"];

pub fn install(state: &mut PageState, events: &mut PageEvents) {
    assign_reveal_classes(state);

    let targets = state
        .doc
        .query(|e| REVEAL_CLASSES.iter().any(|class| e.has_class(class)));

    for element in targets {
        let widget = match state.watch(element, REVEAL_THRESHOLD, REVEAL_ROOT_MARGIN) {
            Ok(widget) => widget,
            Err(err) => {
                tracing::warn!(%err, "reveal animations disabled");
                return;
            }
        };
        events.subscribe(EventTarget::Widget(widget), event_types::VISIBLE, move |state, _| {
            state.doc.add_class(element, "visible");
            Subscription::Unsubscribe
        });
    }
}

fn assign_reveal_classes(state: &mut PageState) {
    let doc = &mut state.doc;

    for card in doc.query_class("about-card") {
        doc.add_class(card, "fade-in");
    }
    for (index, category) in doc.query_class("skill-category").into_iter().enumerate() {
        doc.add_class(category, "scale-in");
        doc.set_style(category, "animation-delay", stagger_delay(index));
    }
    for (index, item) in doc.query_class("timeline-item").into_iter().enumerate() {
        let class = if index % 2 == 0 {
            "slide-in-left"
        } else {
            "slide-in-right"
        };
        doc.add_class(item, class);
    }
    for (index, card) in doc.query_class("project-card").into_iter().enumerate() {
        doc.add_class(card, "fade-in");
        doc.set_style(card, "animation-delay", stagger_delay(index));
    }
}

fn stagger_delay(index: usize) -> String {
    format!("{}s", css_number(index as f32 * 0.2))
}
