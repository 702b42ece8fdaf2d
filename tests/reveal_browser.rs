#![cfg(target_arch = "wasm32")]

use card_reveal::{
    attach, attached_count, current_index, is_open, phase, reset, Phase,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{window, Document, Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

const INSTANT: &str = r#"{
    "overlay": {"fadeDuration": 0, "fadeOutDuration": 0, "scrollDuration": 0},
    "card": {"fadeDuration": 0, "resizeDuration": 0, "scrollDuration": 0}
}"#;

const FIXTURE: &str = r##"
<ul class="vCards">
  <li class="vcard" id="card-a"><a class="fn" href="#">Ada</a></li>
  <li class="vcard" id="card-b"><a class="fn" href="#">Brian</a></li>
  <li class="vcard" id="card-c"><a class="fn" href="#">Chloe</a></li>
</ul>
<div class="vcard" id="card-solo"><span class="org">Solo Ltd</span></div>
<button id="show-all">all</button>
<select id="picker"><option>one</option></select>
"##;

fn document() -> Document {
    window()
        .and_then(|win| win.document())
        .expect("document available")
}

fn mount_fixture(markup: &str) -> Element {
    reset();
    let document = document();
    if let Some(old) = document.get_element_by_id("fixture") {
        old.remove();
    }
    let fixture = document.create_element("div").expect("create fixture");
    fixture.set_id("fixture");
    fixture.set_inner_html(markup);
    document
        .body()
        .expect("body available")
        .append_child(&fixture)
        .expect("append fixture");
    fixture
}

fn options(raw: &str) -> JsValue {
    js_sys::JSON::parse(raw).expect("valid options json")
}

fn el(selector: &str) -> HtmlElement {
    document()
        .query_selector(selector)
        .expect("valid selector")
        .unwrap_or_else(|| panic!("missing {selector}"))
        .dyn_into::<HtmlElement>()
        .expect("html element")
}

fn displayed(selector: &str) -> bool {
    el(selector).style().get_property_value("display").unwrap_or_default() != "none"
}

fn shown_text() -> String {
    el("#reveal .content").text_content().unwrap_or_default()
}

#[wasm_bindgen_test]
fn walks_three_cards_and_dismisses() {
    mount_fixture(FIXTURE);
    let bound = attach("#fixture .vCards", options(INSTANT)).expect("attach");
    assert_eq!(bound, 1);

    el("#fixture .vCards").click();
    assert_eq!(phase("reveal"), Some(Phase::CardVisible(0)));
    assert!(shown_text().contains("Ada"));
    assert!(displayed("#overlay"));
    assert!(displayed("#reveal"));
    assert!(displayed("#reveal .navigation"));
    assert!(!displayed("#reveal .previous"));
    assert!(displayed("#reveal .next"));

    el("#reveal .next").click();
    assert_eq!(current_index("reveal"), Some(1));
    assert!(shown_text().contains("Brian"));
    assert!(displayed("#reveal .previous"));
    assert!(displayed("#reveal .next"));

    el("#reveal .next").click();
    assert_eq!(current_index("reveal"), Some(2));
    assert!(displayed("#reveal .previous"));
    assert!(!displayed("#reveal .next"));

    el("#reveal .previous").click();
    assert_eq!(current_index("reveal"), Some(1));
    assert!(shown_text().contains("Brian"));

    el("#overlay").click();
    assert!(!is_open("reveal"));
    assert_eq!(shown_text(), "");
    assert!(!displayed("#overlay"));
    assert!(!displayed("#reveal"));

    el("#fixture .vCards").click();
    assert_eq!(current_index("reveal"), Some(0));
    assert!(shown_text().contains("Ada"));
}

#[wasm_bindgen_test]
fn single_card_has_no_navigation() {
    mount_fixture(FIXTURE);
    attach("#card-solo", options(INSTANT)).expect("attach");

    el("#card-solo").click();
    assert_eq!(phase("reveal"), Some(Phase::CardVisible(0)));
    assert!(shown_text().contains("Solo Ltd"));
    assert!(!displayed("#reveal .navigation"));
    assert!(!displayed("#reveal .previous"));
    assert!(!displayed("#reveal .next"));
}

#[wasm_bindgen_test]
fn trigger_without_cards_reveals_every_card_on_the_page() {
    mount_fixture(FIXTURE);
    attach("#show-all", options(INSTANT)).expect("attach");

    el("#show-all").click();
    assert!(shown_text().contains("Ada"));
    for _ in 0..3 {
        el("#reveal .next").click();
    }
    assert_eq!(current_index("reveal"), Some(3));
    assert!(shown_text().contains("Solo Ltd"));
    assert!(!displayed("#reveal .next"));
}

#[wasm_bindgen_test]
fn shown_card_is_an_id_less_copy() {
    mount_fixture(FIXTURE);
    attach("#card-solo", options(INSTANT)).expect("attach");
    el("#card-solo").click();

    let copy = el("#reveal .content .vcard");
    assert!(copy.get_attribute("id").is_none());
    copy.set_text_content(Some("changed"));

    assert_eq!(el("#card-solo").text_content().unwrap_or_default(), "Solo Ltd");
    assert_eq!(
        document()
            .query_selector_all("#card-solo")
            .expect("valid selector")
            .length(),
        1
    );
}

#[wasm_bindgen_test]
fn page_without_cards_stays_hidden() {
    mount_fixture(r#"<button id="empty">nothing</button>"#);
    attach("#empty", options(INSTANT)).expect("attach");

    el("#empty").click();
    assert_eq!(phase("reveal"), Some(Phase::Hidden));
    assert!(!displayed("#overlay"));
}

#[wasm_bindgen_test]
fn obstructions_are_hidden_for_the_session_only() {
    mount_fixture(FIXTURE);
    attach("#card-solo", options(INSTANT)).expect("attach");

    el("#card-solo").click();
    assert!(!displayed("#picker"));

    el("#overlay").click();
    assert!(displayed("#picker"));
}

#[wasm_bindgen_test]
fn reattaching_keeps_one_stylesheet_and_earlier_triggers() {
    mount_fixture(FIXTURE);
    attach("#card-solo", options(INSTANT)).expect("first attach");
    attach("#show-all", options(INSTANT)).expect("second attach");

    assert_eq!(attached_count(), 1);
    assert_eq!(
        document()
            .query_selector_all("#reveal-style")
            .expect("valid selector")
            .length(),
        1
    );
    assert_eq!(
        document()
            .query_selector_all("#reveal")
            .expect("valid selector")
            .length(),
        1
    );

    el("#card-solo").click();
    assert!(shown_text().contains("Solo Ltd"));
}

#[wasm_bindgen_test]
fn add_style_false_injects_nothing() {
    mount_fixture(FIXTURE);
    let raw = r#"{"card": {"addStyle": false, "fadeDuration": 0}, "overlay": {"fadeDuration": 0}}"#;
    attach("#card-solo", options(raw)).expect("attach");
    assert!(document().get_element_by_id("reveal-style").is_none());
}

#[wasm_bindgen_test]
fn custom_ids_and_titles_are_used() {
    mount_fixture(FIXTURE);
    let raw = r#"{
        "overlay": {"id": "dim", "fadeDuration": 0},
        "hcard": {"id": "viewer", "nextCardTitle": "Forward", "previousCardTitle": "Back", "fadeDuration": 0}
    }"#;
    attach("#fixture .vCards", options(raw)).expect("attach");

    assert_eq!(el("#viewer .next").text_content().unwrap_or_default(), "Forward");
    assert_eq!(el("#viewer .previous").get_attribute("title").as_deref(), Some("Back"));
    el("#fixture .vCards").click();
    assert!(is_open("viewer"));
    assert!(displayed("#dim"));
}

#[wasm_bindgen_test]
fn invalid_options_are_rejected() {
    mount_fixture(FIXTURE);
    let err = attach("#card-solo", options(r#"{"card": {"width": "wide"}}"#)).unwrap_err();
    let message = err
        .dyn_ref::<js_sys::Error>()
        .and_then(|err| err.message().as_string())
        .unwrap_or_default();
    assert!(message.contains("card.width"), "{message}");
    assert_eq!(attached_count(), 0);
}

#[wasm_bindgen_test]
fn failed_reattach_leaves_the_mounted_viewer_working() {
    mount_fixture(FIXTURE);
    attach("#card-solo", options(INSTANT)).expect("first attach");

    let document = document();
    let root = document.document_element().expect("root element");
    let body = document.body().expect("body available");
    root.remove_child(&body).expect("detach body");
    let result = attach("#card-solo", options(INSTANT));
    root.append_child(&body).expect("restore body");

    assert!(result.is_err());
    assert_eq!(attached_count(), 1);
    el("#card-solo").click();
    assert!(is_open("reveal"));
    assert!(shown_text().contains("Solo Ltd"));
}

#[wasm_bindgen_test]
fn replacing_a_viewer_under_a_new_card_id_drops_its_stylesheet() {
    mount_fixture(FIXTURE);
    attach("#card-solo", options(INSTANT)).expect("first attach");
    assert!(document().get_element_by_id("reveal-style").is_some());

    let raw = r#"{"overlay": {"fadeDuration": 0}, "card": {"id": "viewer", "fadeDuration": 0}}"#;
    attach("#show-all", options(raw)).expect("second attach");

    assert_eq!(attached_count(), 1);
    assert!(document().get_element_by_id("reveal-style").is_none());
    assert!(document().get_element_by_id("reveal").is_none());
    assert!(document().get_element_by_id("viewer-style").is_some());

    el("#card-solo").click();
    assert!(is_open("viewer"));
}
