//! Full-page preloader (opt-in)

use vitrine_core::events::event_types;
use vitrine_core::{EventTarget, Subscription};

use super::PageEvents;
use crate::page::PageState;
use crate::tasks::{PreloaderStep, Task};

/// Time the preloader stays after window load
pub const PRELOADER_HOLD_MS: u64 = 1000;
/// Fade-out duration
pub const PRELOADER_FADE_MS: u64 = 500;

const PRELOADER_ID: &str = "preloader";

pub fn install(state: &mut PageState, events: &mut PageEvents) {
    if !state.config().features.preloader {
        return;
    }

    let doc = &mut state.doc;
    let preloader = doc.create_child(doc.body(), "div");
    doc.set_element_id(preloader, PRELOADER_ID);
    let content = doc.create_child(preloader, "div");
    doc.add_class(content, "preloader-content");

    let logo = doc.create_child(content, "div");
    doc.add_class(logo, "preloader-logo");
    let text = doc.create_child(logo, "span");
    doc.add_class(text, "logo-text");
    doc.set_text(text, "DevOps");
    let accent = doc.create_child(logo, "span");
    doc.add_class(accent, "logo-accent");
    doc.set_text(accent, "Pro");

    let spinner = doc.create_child(content, "div");
    doc.add_class(spinner, "preloader-spinner");
    let circle = doc.create_child(spinner, "div");
    doc.add_class(circle, "spinner-circle");
    let message = doc.create_child(content, "p");
    doc.set_text(message, "Loading amazing content...");

    doc.set_styles(
        preloader,
        [
            ("position", "fixed".to_string()),
            ("top", "0".to_string()),
            ("left", "0".to_string()),
            ("width", "100%".to_string()),
            ("height", "100%".to_string()),
            (
                "background",
                "linear-gradient(135deg, #667eea 0%, #764ba2 100%)".to_string(),
            ),
            ("display", "flex".to_string()),
            ("align-items", "center".to_string()),
            ("justify-content", "center".to_string()),
            ("z-index", "10000".to_string()),
            ("color", "white".to_string()),
            ("text-align", "center".to_string()),
        ],
    );

    events.subscribe(EventTarget::Window, event_types::LOAD, |state, _| {
        state
            .timers
            .set_timeout(PRELOADER_HOLD_MS, Task::Preloader(PreloaderStep::Fade));
        Subscription::Unsubscribe
    });
}

pub(crate) fn run(state: &mut PageState, step: PreloaderStep) {
    let Some(preloader) = state.doc.element_by_id(PRELOADER_ID) else {
        return;
    };
    match step {
        PreloaderStep::Fade => {
            state.doc.set_style(preloader, "opacity", "0");
            state.doc.set_style(preloader, "transition", "opacity 0.5s ease");
            state
                .timers
                .set_timeout(PRELOADER_FADE_MS, Task::Preloader(PreloaderStep::Remove));
        }
        PreloaderStep::Remove => {
            state.doc.remove(preloader);
            tracing::debug!("preloader removed");
        }
    }
}
