//! Simulated contact form submission
//!
//! Nothing leaves the page: a submit disables the button, waits, then reports
//! success and resets the form.

use vitrine_core::events::event_types;
use vitrine_core::{ElementId, EventTarget, Subscription};

use super::PageEvents;
use crate::document::{Document, Element};
use crate::overlay::NotificationKind;
use crate::page::PageState;
use crate::tasks::Task;

pub const SENDING_LABEL: &str = "Sending...";
/// Classes of the icon shown in the button while a submission is pending
pub const SPINNER_CLASSES: [&str; 3] = ["fas", "fa-spinner", "fa-spin"];
pub const SUCCESS_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";

const PENDING_KEY: &str = "contact-form/pending";

pub fn install(state: &mut PageState, events: &mut PageEvents) {
    let Some(form) = state.doc.element_by_id("contact-form") else {
        tracing::debug!("no contact form, skipping");
        return;
    };

    events.subscribe(EventTarget::Element(form), event_types::SUBMIT, move |state, event| {
        event.prevent_default();

        let pending = state.store.use_state_keyed(PENDING_KEY, || false);
        if *pending {
            tracing::debug!("submission already in flight, ignoring");
            return Subscription::Keep;
        }
        *pending = true;

        let fields = form_fields(&state.doc, form);
        tracing::info!(fields = fields.len(), "contact form submitted");

        let button = submit_button(&state.doc, form);
        let label = button
            .and_then(|b| state.doc.text(b))
            .unwrap_or_default()
            .to_string();
        if let Some(button) = button {
            let spinner = state.doc.create_child(button, "i");
            for class in SPINNER_CLASSES {
                state.doc.add_class(spinner, class);
            }
            state.doc.set_text(button, SENDING_LABEL);
            state.doc.set_disabled(button, true);
        }

        let delay = state.config().timing.form_delay_ms;
        state
            .timers
            .set_timeout(delay, Task::FormComplete { form, button, label });
        Subscription::Keep
    });
}

/// Finish a submission: notify, reset the fields, restore the button
pub(crate) fn complete(
    state: &mut PageState,
    form: ElementId,
    button: Option<ElementId>,
    label: String,
) {
    state.show_notification(SUCCESS_MESSAGE, NotificationKind::Success);

    for field in form_fields(&state.doc, form) {
        state.doc.remove_attr(field, "value");
    }
    if let Some(button) = button {
        for spinner in state.doc.query_class_within(button, "fa-spinner") {
            state.doc.remove(spinner);
        }
        state.doc.set_text(button, label);
        state.doc.set_disabled(button, false);
    }
    state.store.insert(PENDING_KEY, false);
}

fn form_fields(doc: &Document, form: ElementId) -> Vec<ElementId> {
    doc.query_within(form, |e| {
        ["input", "textarea", "select"]
            .iter()
            .any(|tag| e.tag.eq_ignore_ascii_case(tag))
    })
}

fn submit_button(doc: &Document, form: ElementId) -> Option<ElementId> {
    doc.query_within(form, Element::is_submit_button)
        .into_iter()
        .next()
}
