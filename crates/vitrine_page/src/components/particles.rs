//! Decorative floating particles
//!
//! The hero gets plain dots once the window has loaded; the tech showcase gets
//! drifting symbols right away. Sizes, positions and timings are random, drawn
//! from the page's seedable generator.

use rand::Rng;
use vitrine_core::events::event_types;
use vitrine_core::{ElementId, EventTarget, Subscription};

use super::{css_number, PageEvents};
use crate::page::PageState;

pub const TECH_SYMBOLS: [&str; 8] = ["⚡", "🚀", "⚙️", "🔧", "💻", "☁️", "🐳", "🔥"];

const FLOAT_KEYFRAMES: &str = "\
@keyframes float-particle {
    0% { top: 100vh; opacity: 0; }
    10% { opacity: 1; }
    90% { opacity: 1; }
    100% { top: -10px; opacity: 0; }
}";

pub fn install(state: &mut PageState, events: &mut PageEvents) {
    state.doc.add_head_style(FLOAT_KEYFRAMES);

    let features = &state.config().features;
    if !features.particles {
        tracing::debug!("particles disabled");
        return;
    }
    let (hero_count, tech_count) = (features.hero_particles, features.tech_particles);

    spawn_tech_particles(state, tech_count);

    events.subscribe(EventTarget::Window, event_types::LOAD, move |state, _| {
        spawn_hero_particles(state, hero_count);
        Subscription::Unsubscribe
    });
}

fn container(state: &mut PageState, parent: ElementId, class: &str) -> ElementId {
    let container = state.doc.create_child(parent, "div");
    state.doc.add_class(container, class);
    state.doc.set_styles(
        container,
        [
            ("position", "absolute".to_string()),
            ("top", "0".to_string()),
            ("left", "0".to_string()),
            ("width", "100%".to_string()),
            ("height", "100%".to_string()),
            ("pointer-events", "none".to_string()),
            ("z-index", "1".to_string()),
        ],
    );
    container
}

fn spawn_hero_particles(state: &mut PageState, count: usize) {
    let Some(hero) = state.doc.first_by_class("hero") else {
        tracing::debug!("no hero section, skipping particles");
        return;
    };
    let parent = container(state, hero, "particles");
    let width = state.doc.viewport().width.max(1.0);

    for _ in 0..count {
        let rng = state.rng();
        let size: f32 = rng.gen_range(2.0..6.0);
        let left: f32 = rng.gen_range(0.0..width);
        let duration: f32 = rng.gen_range(10.0..30.0);
        let delay: f32 = rng.gen_range(0.0..5.0);

        let particle = state.doc.create_child(parent, "div");
        state.doc.add_class(particle, "particle");
        state.doc.set_styles(
            particle,
            [
                ("position", "absolute".to_string()),
                ("width", format!("{}px", css_number(size))),
                ("height", format!("{}px", css_number(size))),
                ("background", "rgba(255, 255, 255, 0.1)".to_string()),
                ("border-radius", "50%".to_string()),
                ("left", format!("{}px", css_number(left))),
                (
                    "animation",
                    format!(
                        "float-particle {}s linear {}s infinite",
                        css_number(duration),
                        css_number(delay)
                    ),
                ),
            ],
        );
    }
    tracing::debug!(count, "hero particles created");
}

fn spawn_tech_particles(state: &mut PageState, count: usize) {
    let Some(showcase) = state.doc.first_by_class("tech-showcase") else {
        tracing::debug!("no tech showcase, skipping particles");
        return;
    };
    let parent = container(state, showcase, "tech-particles");
    let width = state.doc.viewport().width.max(1.0);

    for _ in 0..count {
        let rng = state.rng();
        let symbol = TECH_SYMBOLS[rng.gen_range(0..TECH_SYMBOLS.len())];
        let size: f32 = rng.gen_range(10.0..30.0);
        let left: f32 = rng.gen_range(0.0..width);
        let duration: f32 = rng.gen_range(10.0..25.0);
        let delay: f32 = rng.gen_range(0.0..5.0);

        let particle = state.doc.create_child(parent, "div");
        state.doc.add_class(particle, "tech-particle");
        state.doc.set_text(particle, symbol);
        state.doc.set_styles(
            particle,
            [
                ("position", "absolute".to_string()),
                ("font-size", format!("{}px", css_number(size))),
                ("left", format!("{}px", css_number(left))),
                ("opacity", "0.3".to_string()),
                (
                    "animation",
                    format!(
                        "float-tech-particle {}s linear {}s infinite",
                        css_number(duration),
                        css_number(delay)
                    ),
                ),
                ("pointer-events", "none".to_string()),
                ("color", "rgba(245, 158, 11, 0.6)".to_string()),
            ],
        );
    }
    tracing::debug!(count, "tech particles created");
}
