//! Skill bars fill to their `data-width` once their category is half visible

use vitrine_animation::Timeline;
use vitrine_core::events::event_types;
use vitrine_core::{EventTarget, Subscription};

use super::PageEvents;
use crate::page::PageState;
use crate::tasks::Mutation;
use crate::visibility::HALF_VISIBLE;

/// Delay between a category showing up and its bars filling
pub const SKILL_FILL_DELAY_MS: u64 = 500;

pub fn install(state: &mut PageState, events: &mut PageEvents) {
    for category in state.doc.query_class("skill-category") {
        let widget = match state.watch(category, HALF_VISIBLE, 0.0) {
            Ok(widget) => widget,
            Err(err) => {
                tracing::warn!(%err, "skill bar animations disabled");
                return;
            }
        };
        events.subscribe(EventTarget::Widget(widget), event_types::VISIBLE, move |state, _| {
            let mut timeline = Timeline::new();
            for bar in state.doc.query_class_within(category, "skill-progress") {
                match state.doc.attr(bar, "data-width") {
                    Some(width) => {
                        let width = format!("{}%", width.trim());
                        timeline.add(SKILL_FILL_DELAY_MS, Mutation::new(bar).style("width", width));
                    }
                    None => tracing::debug!(?bar, "skill bar without data-width"),
                }
            }
            state.play(timeline);
            Subscription::Unsubscribe
        });
    }
}
