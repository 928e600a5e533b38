//! Deferred image loading (opt-in)

use vitrine_core::events::event_types;
use vitrine_core::{EventTarget, Subscription};

use super::PageEvents;
use crate::page::PageState;

pub fn install(state: &mut PageState, events: &mut PageEvents) {
    if !state.config().features.lazy_images {
        return;
    }

    let images = state
        .doc
        .query(|e| e.tag.eq_ignore_ascii_case("img") && e.attr("data-src").is_some());
    for image in images {
        let widget = match state.watch(image, 0.0, 0.0) {
            Ok(widget) => widget,
            Err(err) => {
                tracing::warn!(%err, "lazy image loading disabled");
                return;
            }
        };
        events.subscribe(EventTarget::Widget(widget), event_types::VISIBLE, move |state, _| {
            if let Some(src) = state.doc.attr(image, "data-src").map(str::to_string) {
                state.doc.set_attr(image, "src", src);
            }
            state.doc.remove_class(image, "lazy");
            Subscription::Unsubscribe
        });
    }
}
