//! Tech showcase: staggered slide-in, progress fill, click and hover feedback

use vitrine_animation::Timeline;
use vitrine_core::events::event_types;
use vitrine_core::{ElementId, EventTarget, Subscription};

use super::{tech_name, PageEvents};
use crate::page::PageState;
use crate::tasks::{Mutation, Task, TimelineKey};
use crate::visibility::SHOWCASE_THRESHOLD;

pub const ITEM_STAGGER_MS: u64 = 150;
pub const PROGRESS_BASE_MS: u64 = 500;
pub const PROGRESS_STAGGER_MS: u64 = 200;
pub const NUDGE_STAGGER_MS: u64 = 50;
/// How long a clicked item stays pressed
pub const PRESS_MS: u64 = 150;

const NUDGE_TRANSFORM: &str = "translateX(10px) scale(1.02)";

pub fn install(state: &mut PageState, events: &mut PageEvents) {
    for item in state.doc.query_class("tech-item") {
        state.doc.set_styles(
            item,
            [
                ("transform", "translateX(-50px)".to_string()),
                ("opacity", "0".to_string()),
                ("transition", "all 0.6s ease-out".to_string()),
            ],
        );
    }

    let categories = state.doc.query_class("tech-category-showcase");
    for category in &categories {
        let category = *category;
        match state.watch(category, SHOWCASE_THRESHOLD, 0.0) {
            Ok(widget) => {
                events.subscribe(EventTarget::Widget(widget), event_types::VISIBLE, move |state, _| {
                    reveal_category(state, category);
                    Subscription::Unsubscribe
                });
            }
            Err(err) => {
                tracing::warn!(%err, "tech showcase reveal disabled");
                break;
            }
        }
    }

    for item in state.doc.query_class("tech-item") {
        events.subscribe(EventTarget::Element(item), event_types::CLICK, move |state, _| {
            let name = tech_name(&state.doc, item);
            state.show_tech_info(&name);
            state.doc.set_style(item, "transform", "scale(0.95)");
            state.timers.set_timeout(
                PRESS_MS,
                Task::ClearStyle {
                    element: item,
                    property: "transform",
                },
            );
            Subscription::Keep
        });
    }

    for (index, category) in categories.into_iter().enumerate() {
        let key = format!("tech-nudge/{index}");
        let leave_key = key.clone();
        events.subscribe(
            EventTarget::Element(category),
            event_types::POINTER_ENTER,
            move |state, _| {
                cancel_nudge(state, &key);
                let items = state.doc.query_class_within(category, "tech-item");
                let mut timeline = Timeline::new();
                timeline.stagger(
                    0,
                    NUDGE_STAGGER_MS,
                    items
                        .into_iter()
                        .map(|item| Mutation::new(item).style("transform", NUDGE_TRANSFORM)),
                );
                if let Some(playing) = state.play(timeline) {
                    state.store.insert(&key, playing);
                }
                Subscription::Keep
            },
        );
        events.subscribe(
            EventTarget::Element(category),
            event_types::POINTER_LEAVE,
            move |state, _| {
                cancel_nudge(state, &leave_key);
                for item in state.doc.query_class_within(category, "tech-item") {
                    state.doc.set_style(item, "transform", "");
                }
                Subscription::Keep
            },
        );
    }
}

fn reveal_category(state: &mut PageState, category: ElementId) {
    let mut timeline = Timeline::new();

    let items = state.doc.query_class_within(category, "tech-item");
    timeline.stagger(
        0,
        ITEM_STAGGER_MS,
        items.into_iter().map(|item| {
            Mutation::new(item)
                .style("transform", "translateX(0)")
                .style("opacity", "1")
        }),
    );

    for (index, bar) in state
        .doc
        .query_class_within(category, "tech-progress")
        .into_iter()
        .enumerate()
    {
        let Some(level) = state.doc.attr(bar, "data-level") else {
            tracing::debug!(?bar, "progress bar without data-level");
            continue;
        };
        let level = level.trim();
        timeline.add(
            PROGRESS_BASE_MS + index as u64 * PROGRESS_STAGGER_MS,
            Mutation::new(bar)
                .style("--progress-width", format!("{level}%"))
                .style(
                    "background",
                    format!(
                        "linear-gradient(90deg, var(--accent-color) 0%, \
                         var(--secondary-color) {level}%, rgba(255, 255, 255, 0.2) {level}%)"
                    ),
                ),
        );
    }

    state.play(timeline);
}

fn cancel_nudge(state: &mut PageState, key: &str) {
    if let Some(pending) = state.store.remove::<TimelineKey>(key) {
        state.cancel_timeline(pending);
    }
}
