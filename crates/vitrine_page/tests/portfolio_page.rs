//! End-to-end behavior of the sample portfolio page

use vitrine_core::{ElementId, KeyCode};
use vitrine_page::components::contact::{SENDING_LABEL, SPINNER_CLASSES, SUCCESS_MESSAGE};
use vitrine_page::components::easter_egg::{KONAMI_CODE, RAINBOW_ANIMATION};
use vitrine_page::{Page, PageConfig, PageSpec};

const PORTFOLIO: &str = include_str!("../../../demos/portfolio.toml");

fn config() -> PageConfig {
    PageConfig {
        seed: Some(7),
        ..PageConfig::default()
    }
}

fn portfolio_with(config: PageConfig) -> Page {
    let spec = PageSpec::from_toml_str(PORTFOLIO).unwrap();
    let mut page = Page::from_spec(&spec, config);
    page.load();
    page
}

fn portfolio() -> Page {
    portfolio_with(config())
}

fn by_id(page: &Page, id: &str) -> ElementId {
    page.document().element_by_id(id).unwrap()
}

fn nth(page: &Page, selector: &str, index: usize) -> ElementId {
    page.document().select(selector)[index]
}

fn text(page: &Page, element: ElementId) -> String {
    page.document().text_content(element)
}

#[test]
fn back_to_top_shows_past_300px() {
    let mut page = portfolio();
    let button = by_id(&page, "back-to-top");
    let navbar = by_id(&page, "navbar");

    page.scroll_to(300.0);
    assert!(!page.document().has_class(button, "visible"));
    assert!(page.document().has_class(navbar, "scrolled"));

    page.scroll_to(301.0);
    assert!(page.document().has_class(button, "visible"));

    page.click(button);
    assert_eq!(page.document().scroll_y(), 0.0);
    assert!(!page.document().has_class(button, "visible"));
    assert!(!page.document().has_class(navbar, "scrolled"));
}

#[test]
fn counters_count_up_once_visible() {
    let mut page = portfolio();
    let counters: Vec<_> = page.document().query_class("stat-number");

    page.advance(3000);
    assert_eq!(text(&page, counters[2]), "0");

    page.scroll_to(900.0);
    page.advance(1000);
    let halfway: u64 = text(&page, counters[2]).parse().unwrap();
    assert!(halfway > 0 && halfway < 120, "halfway at {halfway}");

    page.advance(1000);
    assert_eq!(text(&page, counters[0]), "6");
    assert_eq!(text(&page, counters[1]), "50");
    assert_eq!(text(&page, counters[2]), "120");
    assert_eq!(page.state().active_counters(), 0);
}

#[test]
fn reveal_fires_once() {
    let mut page = portfolio();
    let card = nth(&page, ".about-card", 0);
    assert!(page.document().has_class(card, "fade-in"));
    assert!(!page.document().has_class(card, "visible"));

    page.scroll_to(400.0);
    assert!(page.document().has_class(card, "visible"));

    page.state_mut().doc.remove_class(card, "visible");
    page.scroll_to(4000.0);
    page.scroll_to(400.0);
    assert!(!page.document().has_class(card, "visible"));
}

#[test]
fn project_cards_get_staggered_delays() {
    let page = portfolio();
    let delays: Vec<_> = page
        .document()
        .query_class("project-card")
        .into_iter()
        .map(|card| page.document().style(card, "animation-delay").unwrap().to_string())
        .collect();
    assert_eq!(delays, ["0s", "0.2s", "0.4s"]);

    let timeline = page.document().query_class("timeline-item");
    assert!(page.document().has_class(timeline[0], "slide-in-left"));
    assert!(page.document().has_class(timeline[1], "slide-in-right"));
}

#[test]
fn typing_text_types_the_first_string() {
    let mut page = portfolio();
    let typing = nth(&page, ".typing-animation", 0);

    page.advance(999);
    assert_eq!(text(&page, typing), "");
    page.advance(1);
    assert_eq!(text(&page, typing), "H");
    page.advance(400);
    assert_eq!(text(&page, typing), "Hi, I");
    assert_eq!(page.state().typing().unwrap().displayed(), "Hi, I");
}

#[test]
fn notification_slides_out_after_five_seconds() {
    let mut page = portfolio();
    let icon = nth(&page, ".tech-icon", 1);
    let shown_at = page.now();

    page.click(icon);
    let notification = nth(&page, ".notification", 0);
    assert!(page.document().has_class(notification, "notification-info"));
    assert!(text(&page, notification).contains("Kubernetes: Container orchestration"));

    page.advance_to(shown_at + 5299);
    assert!(page.document().contains(notification));
    page.advance_to(shown_at + 5300);
    assert!(!page.document().contains(notification));
    assert!(page.overlays().is_empty());
}

#[test]
fn close_button_dismisses_early() {
    let mut page = portfolio();
    page.click(nth(&page, ".tech-item", 0));
    let close = nth(&page, ".notification-close", 0);

    page.advance(100);
    page.click(close);
    page.advance(300);
    assert!(page.document().query_class("notification").is_empty());
}

#[test]
fn tooltip_follows_hover() {
    let mut page = portfolio();
    let docker = nth(&page, ".tech-icon", 0);
    let terraform = nth(&page, ".tech-icon", 2);

    page.pointer_enter(docker);
    page.pointer_enter(terraform);
    let tooltips = page.document().query_class("tech-tooltip");
    assert_eq!(tooltips.len(), 1);
    assert_eq!(text(&page, tooltips[0]), "Terraform");

    page.pointer_leave(terraform);
    assert!(page.document().query_class("tech-tooltip").is_empty());
}

#[test]
fn showcase_reveals_items_and_progress() {
    let mut page = portfolio();
    let items = page.document().query_class("tech-item");
    assert_eq!(page.document().style(items[0], "opacity"), Some("0"));

    page.scroll_to(2300.0);
    page.advance(300);
    for item in &items[..3] {
        assert_eq!(page.document().style(*item, "opacity"), Some("1"));
        assert_eq!(page.document().style(*item, "transform"), Some("translateX(0)"));
    }

    page.advance(600);
    let bar = nth(&page, ".tech-progress", 2);
    assert_eq!(page.document().style(bar, "--progress-width"), Some("88%"));
}

#[test]
fn leaving_a_category_cancels_its_nudge() {
    let mut page = portfolio();
    let category = nth(&page, ".tech-category-showcase", 0);
    let items = page.document().query_class_within(category, "tech-item");

    page.pointer_enter(category);
    page.advance(10);
    assert_eq!(
        page.document().style(items[0], "transform"),
        Some("translateX(10px) scale(1.02)")
    );
    assert_eq!(page.document().style(items[2], "transform"), Some("translateX(-50px)"));

    page.pointer_leave(category);
    page.advance(500);
    for item in items {
        assert_eq!(page.document().style(item, "transform"), None);
    }
}

#[test]
fn contact_form_submission_round_trip() {
    let mut page = portfolio();
    let form = by_id(&page, "contact-form");
    let send = by_id(&page, "send");
    let name = nth(&page, "input", 0);
    page.input(name, "Ada");

    page.click(send);
    assert_eq!(text(&page, send), SENDING_LABEL);
    assert!(page.document().is_disabled(send));
    let spinner = page.document().query_class_within(send, "fa-spinner");
    assert_eq!(spinner.len(), 1);
    for class in SPINNER_CLASSES {
        assert!(page.document().has_class(spinner[0], class));
    }
    assert!(!page.click(send));
    assert!(page.submit(form));

    page.advance(1999);
    assert!(page.document().query_class("notification").is_empty());
    page.advance(1);

    let notifications = page.document().query_class("notification-success");
    assert_eq!(notifications.len(), 1);
    assert!(text(&page, notifications[0]).contains(SUCCESS_MESSAGE));
    assert_eq!(page.document().attr(name, "value"), None);
    assert_eq!(text(&page, send), "Send Message");
    assert!(!page.document().is_disabled(send));
    assert!(page.document().query_class_within(send, "fa-spinner").is_empty());
    assert!(!page.document().contains(spinner[0]));
}

#[test]
fn button_without_type_submits_the_form() {
    let spec = PageSpec::from_toml_str(
        r#"
        [[element]]
        tag = "form"
        id = "contact-form"
        bounds = [0, 0, 800, 400]

          [[element.children]]
          tag = "input"
          attrs = { name = "name" }

          [[element.children]]
          tag = "button"
          text = "Send"

          [[element.children]]
          tag = "button"
          attrs = { type = "button" }
          text = "Clear"
        "#,
    )
    .unwrap();
    let mut page = Page::from_spec(&spec, config());
    page.load();
    let send = nth(&page, "button", 0);
    let clear = nth(&page, "button", 1);

    page.click(clear);
    assert!(!page.document().is_disabled(clear));
    assert_eq!(text(&page, clear), "Clear");

    page.click(send);
    assert_eq!(text(&page, send), SENDING_LABEL);
    assert!(page.document().is_disabled(send));
    assert!(!page.document().is_disabled(clear));

    page.advance(2000);
    assert_eq!(text(&page, send), "Send");
    assert!(!page.document().is_disabled(send));
}

#[test]
fn konami_code_needs_an_unbroken_sequence() {
    let mut page = portfolio();
    let body = page.document().body();

    for key in [KeyCode::UP, KeyCode::UP, KeyCode::UP] {
        page.key_down(key);
    }
    for key in &KONAMI_CODE[2..] {
        page.key_down(*key);
    }
    assert_eq!(page.document().style(body, "animation"), None);

    for key in KONAMI_CODE {
        page.key_down(key);
    }
    assert_eq!(page.document().style(body, "animation"), Some(RAINBOW_ANIMATION));
    assert_eq!(page.document().query_class("notification-success").len(), 1);

    page.advance(5000);
    assert_eq!(page.document().style(body, "animation"), None);
}

#[test]
fn anchor_links_scroll_below_the_navbar() {
    let mut page = portfolio();
    let hamburger = by_id(&page, "hamburger");
    let menu = by_id(&page, "nav-menu");

    page.click(hamburger);
    assert!(page.document().has_class(menu, "active"));

    page.click(nth(&page, ".nav-link", 2));
    assert_eq!(page.document().scroll_y(), 2230.0);
    assert!(!page.document().has_class(menu, "active"));
    assert!(!page.document().has_class(hamburger, "active"));
}

#[test]
fn taller_viewport_pulls_scroll_back_and_hides_back_to_top() {
    let mut page = portfolio();
    let button = by_id(&page, "back-to-top");

    page.scroll_to(5000.0);
    assert!(page.document().has_class(button, "visible"));

    page.resize(1280.0, 5750.0);
    assert!(page.document().scroll_y() <= 300.0);
    assert!(!page.document().has_class(button, "visible"));
}

#[test]
fn narrow_viewports_hide_floating_icons() {
    let mut page = portfolio();
    let icon = nth(&page, ".tech-icon", 0);

    page.resize(768.0, 1024.0);
    assert_eq!(page.document().style(icon, "display"), Some("none"));
    page.resize(1024.0, 768.0);
    assert_eq!(page.document().style(icon, "display"), Some("block"));
}

#[test]
fn removed_elements_are_ignored() {
    let mut page = portfolio();
    let counters = page.document().query_class("stat-number");

    page.scroll_to(900.0);
    page.advance(200);
    page.state_mut().doc.remove(counters[2]);
    page.advance(3000);

    assert_eq!(text(&page, counters[0]), "6");
    assert!(!page.document().contains(counters[2]));
    assert_eq!(page.state().active_counters(), 0);
    assert!(!page.click(counters[2]));
}

#[test]
fn missing_intersection_keeps_the_rest_working() {
    let source = PORTFOLIO.replacen("height = 800", "height = 800\nintersection = false", 1);
    let spec = PageSpec::from_toml_str(&source).unwrap();
    let mut page = Page::from_spec(&spec, config());
    page.load();
    assert_eq!(page.state().visibility.len(), 0);

    page.scroll_to(900.0);
    page.advance(3000);
    assert_eq!(text(&page, nth(&page, ".stat-number", 2)), "0");
    assert!(page.document().has_class(by_id(&page, "back-to-top"), "visible"));
    assert!(!text(&page, nth(&page, ".typing-animation", 0)).is_empty());
}

#[test]
fn particles_follow_settings() {
    let page = portfolio();
    assert_eq!(page.document().query_class("particle").len(), 50);
    assert_eq!(page.document().query_class("tech-particle").len(), 20);

    let mut config = config();
    config.features.particles = false;
    let page = portfolio_with(config);
    assert!(page.document().query_class("particle").is_empty());
    assert!(page.document().query_class("tech-particle").is_empty());
}

#[test]
fn preloader_fades_then_leaves() {
    let mut config = config();
    config.features.preloader = true;
    let mut page = portfolio_with(config);
    let preloader = by_id(&page, "preloader");

    page.advance(1000);
    assert_eq!(page.document().style(preloader, "opacity"), Some("0"));
    page.advance(499);
    assert!(page.document().contains(preloader));
    page.advance(1);
    assert!(!page.document().contains(preloader));
}

#[test]
fn lazy_images_load_when_scrolled_into_view() {
    let spec = PageSpec::from_toml_str(
        r#"
        [[element]]
        tag = "section"
        bounds = [0, 0, 1280, 3000]

        [[element]]
        tag = "img"
        class = ["lazy"]
        attrs = { "data-src" = "cluster.png" }
        bounds = [0, 2000, 400, 300]
        "#,
    )
    .unwrap();
    let mut config = config();
    config.features.lazy_images = true;
    let mut page = Page::from_spec(&spec, config);
    page.load();
    let image = nth(&page, "img", 0);
    assert_eq!(page.document().attr(image, "src"), None);

    page.scroll_to(1500.0);
    assert_eq!(page.document().attr(image, "src"), Some("cluster.png"));
    assert!(!page.document().has_class(image, "lazy"));
}
