//! Hero typing text

use super::PageEvents;
use crate::page::PageState;

pub fn install(state: &mut PageState, _events: &mut PageEvents) {
    let Some(element) = state.doc.first_by_class("typing-animation") else {
        tracing::debug!("no typing element, skipping");
        return;
    };
    let typing = &state.config().typing;
    let (texts, timings) = (typing.texts.clone(), typing.timings());
    if !state.start_typing(element, texts, timings) {
        tracing::debug!("typing text list is empty, skipping");
    }
}
