//! Navbar shading, back-to-top button and parallax

use vitrine_core::events::event_types;
use vitrine_core::{EventData, EventTarget, Subscription};

use super::{css_number, PageEvents};
use crate::document::Document;
use crate::page::PageState;

/// Scroll offset past which the navbar gets `scrolled`
pub const NAVBAR_SCROLLED_AT: f32 = 50.0;
/// Scroll offset past which the back-to-top button shows
pub const BACK_TO_TOP_AT: f32 = 300.0;
/// Viewports this wide or narrower hide the floating icons
pub const MOBILE_BREAKPOINT: f32 = 768.0;

pub fn install(state: &mut PageState, events: &mut PageEvents) {
    let navbar = state.doc.element_by_id("navbar");
    let back_to_top = state.doc.element_by_id("back-to-top");

    events.subscribe(EventTarget::Window, event_types::SCROLL, move |state, event| {
        let y = match event.data {
            EventData::Scroll { y } => y,
            _ => state.doc.scroll_y(),
        };
        if let Some(navbar) = navbar {
            state.doc.set_class(navbar, "scrolled", y > NAVBAR_SCROLLED_AT);
        }
        if let Some(button) = back_to_top {
            state.doc.set_class(button, "visible", y > BACK_TO_TOP_AT);
        }
        parallax(&mut state.doc, y);
        Subscription::Keep
    });

    if let Some(button) = back_to_top {
        events.subscribe(EventTarget::Element(button), event_types::CLICK, |state, _| {
            state.scroll_to(0.0);
            Subscription::Keep
        });
    }

    events.subscribe(EventTarget::Window, event_types::RESIZE, |state, event| {
        let width = match event.data {
            EventData::Resize { width, .. } => width,
            _ => state.doc.viewport().width,
        };
        let display = if width <= MOBILE_BREAKPOINT { "none" } else { "block" };
        for icon in state.doc.query_class("tech-icon") {
            state.doc.set_style(icon, "display", display);
        }
        Subscription::Keep
    });
}

fn parallax(doc: &mut Document, y: f32) {
    for (index, icon) in doc.query_class("tech-icon").into_iter().enumerate() {
        let speed = 0.5 + index as f32 * 0.1;
        let rotation = y * 0.1 + index as f32 * 30.0;
        doc.set_style(
            icon,
            "transform",
            format!(
                "translateY({}px) rotate({}deg)",
                css_number(-(y * speed)),
                css_number(rotation)
            ),
        );
    }

    if let Some(showcase) = doc.first_by_class("tech-showcase") {
        doc.set_style(
            showcase,
            "background-position",
            format!("center {}px", css_number(y * -0.5)),
        );
    }
}
