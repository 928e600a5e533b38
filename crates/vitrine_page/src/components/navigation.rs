//! Mobile menu toggle and in-page anchor scrolling

use vitrine_core::events::event_types;
use vitrine_core::{EventTarget, Subscription};

use super::PageEvents;
use crate::page::PageState;

/// Height of the fixed navbar anchors scroll clear of
pub const NAVBAR_HEIGHT: f32 = 70.0;

pub fn install(state: &mut PageState, events: &mut PageEvents) {
    let doc = &state.doc;
    let hamburger = doc.element_by_id("hamburger");
    let menu = doc.element_by_id("nav-menu");

    match (hamburger, menu) {
        (Some(hamburger), Some(menu)) => {
            events.subscribe(
                EventTarget::Element(hamburger),
                event_types::CLICK,
                move |state, _| {
                    state.doc.toggle_class(hamburger, "active");
                    state.doc.toggle_class(menu, "active");
                    Subscription::Keep
                },
            );
        }
        _ => tracing::debug!("no hamburger menu, skipping toggle"),
    }

    for link in doc.query_class("nav-link") {
        events.subscribe(EventTarget::Element(link), event_types::CLICK, move |state, _| {
            for element in [hamburger, menu].into_iter().flatten() {
                state.doc.remove_class(element, "active");
            }
            Subscription::Keep
        });
    }

    let anchors = doc.query(|e| {
        e.tag.eq_ignore_ascii_case("a") && e.attr("href").is_some_and(|h| h.starts_with('#'))
    });
    for anchor in anchors {
        events.subscribe(EventTarget::Element(anchor), event_types::CLICK, move |state, event| {
            event.prevent_default();
            let href = state.doc.attr(anchor, "href").unwrap_or_default().to_string();
            let target = state.doc.select(&href).into_iter().next();
            match target.and_then(|t| state.doc.bounds(t)) {
                Some(bounds) => state.scroll_to((bounds.y() - NAVBAR_HEIGHT).max(0.0)),
                None => tracing::debug!(%href, "anchor target missing"),
            }
            Subscription::Keep
        });
    }
}
