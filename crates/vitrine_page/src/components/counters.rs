//! Stat counters count up once their grid is half visible

use vitrine_core::events::event_types;
use vitrine_core::{Error, EventTarget, Result, Subscription};

use super::PageEvents;
use crate::page::PageState;
use crate::visibility::HALF_VISIBLE;

pub fn install(state: &mut PageState, events: &mut PageEvents) {
    for grid in state.doc.query_class("stats-grid") {
        let widget = match state.watch(grid, HALF_VISIBLE, 0.0) {
            Ok(widget) => widget,
            Err(err) => {
                tracing::warn!(%err, "stat counters disabled");
                return;
            }
        };
        events.subscribe(EventTarget::Widget(widget), event_types::VISIBLE, move |state, _| {
            for counter in state.doc.query_class_within(grid, "stat-number") {
                let raw = state.doc.attr(counter, "data-count").unwrap_or_default();
                match parse_count(raw) {
                    Ok(target) => {
                        state.animate_counter(counter, target);
                    }
                    Err(err) => tracing::debug!(%err, "counter skipped"),
                }
            }
            Subscription::Unsubscribe
        });
    }
}

/// Parse a counter target the way `parseInt` reads it: leading digits after
/// optional whitespace, trailing text ignored (`"150+"` is 150)
pub fn parse_count(value: &str) -> Result<u64> {
    let trimmed = value.trim_start();
    let digits = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed, |end| &trimmed[..end]);
    digits.parse().map_err(|_| Error::InvalidAttribute {
        name: "data-count".to_string(),
        value: value.to_string(),
    })
}
