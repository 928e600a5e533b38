//! Floating tech icons: tooltip on hover, info on click

use vitrine_core::events::event_types;
use vitrine_core::{EventTarget, Subscription};

use super::{tech_name, PageEvents};
use crate::page::PageState;

pub fn install(state: &mut PageState, events: &mut PageEvents) {
    for icon in state.doc.query_class("tech-icon") {
        events.subscribe(EventTarget::Element(icon), event_types::POINTER_ENTER, move |state, _| {
            let name = tech_name(&state.doc, icon);
            state.show_tooltip(icon, &name);
            Subscription::Keep
        });
        events.subscribe(EventTarget::Element(icon), event_types::POINTER_LEAVE, |state, _| {
            state.hide_tooltip();
            Subscription::Keep
        });
        events.subscribe(EventTarget::Element(icon), event_types::CLICK, move |state, _| {
            let name = tech_name(&state.doc, icon);
            state.show_tech_info(&name);
            Subscription::Keep
        });
    }
}
