//! Konami code easter egg

use vitrine_core::events::event_types;
use vitrine_core::{EventData, EventTarget, KeyCode, Subscription};

use super::PageEvents;
use crate::overlay::NotificationKind;
use crate::page::PageState;
use crate::tasks::Task;

/// Up Up Down Down Left Right Left Right B A
pub const KONAMI_CODE: [KeyCode; 10] = [
    KeyCode::UP,
    KeyCode::UP,
    KeyCode::DOWN,
    KeyCode::DOWN,
    KeyCode::LEFT,
    KeyCode::RIGHT,
    KeyCode::LEFT,
    KeyCode::RIGHT,
    KeyCode::B,
    KeyCode::A,
];

pub const KONAMI_MESSAGE: &str = "🎉 Konami Code activated! You found the easter egg!";
pub const RAINBOW_ANIMATION: &str = "rainbow 2s linear infinite";
/// How long the body keeps cycling colors
pub const RAINBOW_MS: u64 = 5000;

/// Store key of the sequence progress
pub const PROGRESS_KEY: &str = "konami/progress";

const RAINBOW_KEYFRAMES: &str = "\
@keyframes rainbow {
    0% { filter: hue-rotate(0deg); }
    100% { filter: hue-rotate(360deg); }
}";

pub fn install(state: &mut PageState, events: &mut PageEvents) {
    state.doc.add_head_style(RAINBOW_KEYFRAMES);

    events.subscribe(EventTarget::Window, event_types::KEY_DOWN, |state, event| {
        let EventData::Key { key } = event.data else {
            return Subscription::Keep;
        };
        if advance(state, key) {
            activate(state);
        }
        Subscription::Keep
    });
}

/// Feed one key press. A wrong key starts over from the beginning.
fn advance(state: &mut PageState, key: KeyCode) -> bool {
    let progress = state.store.use_state_keyed(PROGRESS_KEY, || 0usize);
    if key != KONAMI_CODE[*progress] {
        *progress = 0;
        return false;
    }
    *progress += 1;
    if *progress == KONAMI_CODE.len() {
        *progress = 0;
        return true;
    }
    false
}

fn activate(state: &mut PageState) {
    tracing::info!("konami code entered");
    state.show_notification(KONAMI_MESSAGE, NotificationKind::Success);
    let body = state.doc.body();
    state.doc.set_style(body, "animation", RAINBOW_ANIMATION);
    state.timers.set_timeout(
        RAINBOW_MS,
        Task::ClearStyle {
            element: body,
            property: "animation",
        },
    );
}
