#![cfg(target_arch = "wasm32")]

use script_hub_terminal::dom;
use script_hub_terminal::form::read_form;
use script_hub_terminal::{add_terminal_line, clear_terminal, LineSink, Terminal};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Document, HtmlFormElement};

wasm_bindgen_test_configure!(run_in_browser);

fn mount(html: &str) -> Document {
    let document = dom::document().unwrap();
    let host = document.create_element("div").unwrap();
    host.set_inner_html(html);
    document.body().unwrap().append_child(&host).unwrap();
    document
}

fn rendered(terminal: &Terminal) -> Vec<String> {
    let rows = terminal.element().children();
    (0..rows.length())
        .filter_map(|index| rows.item(index))
        .map(|row| {
            let part = |selector: &str| {
                row.query_selector(selector)
                    .unwrap()
                    .and_then(|span| span.text_content())
                    .unwrap_or_default()
            };
            format!("{} {}", part(".line-no"), part(".line-content"))
        })
        .collect()
}

#[wasm_bindgen_test]
fn appended_lines_are_numbered_and_literal() {
    let document = mount(r#"<div id="term-literal"></div>"#);
    let mut terminal = Terminal::from_id(&document, "term-literal").unwrap();

    terminal.append_line("first").unwrap();
    terminal.append_line("<b>not bold</b>").unwrap();
    assert_eq!(terminal.append_line("hello").unwrap(), 3);

    assert_eq!(
        rendered(&terminal),
        vec!["1: first", "2: <b>not bold</b>", "3: hello"]
    );
    let second = terminal.element().children().item(1).unwrap();
    assert_eq!(second.class_name(), "line");
    let content = second.query_selector(".line-content").unwrap().unwrap();
    assert_eq!(content.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn exported_helpers_clear_and_renumber() {
    let document = mount(r#"<div id="term-exports"></div>"#);

    assert_eq!(add_terminal_line("term-exports", "a").unwrap(), 1);
    assert_eq!(add_terminal_line("term-exports", "b").unwrap(), 2);
    clear_terminal("term-exports").unwrap();
    clear_terminal("term-exports").unwrap();
    assert_eq!(add_terminal_line("term-exports", "c").unwrap(), 1);

    let terminal = Terminal::from_id(&document, "term-exports").unwrap();
    assert_eq!(rendered(&terminal), vec!["1: c"]);
}

#[wasm_bindgen_test]
fn missing_region_is_an_error() {
    assert!(add_terminal_line("term-does-not-exist", "x").is_err());
}

#[wasm_bindgen_test]
fn form_controls_become_query_parameters() {
    let document = mount(
        r#"<form id="form-controls">
            <input name="name" value="alice">
            <input name="age" value="">
            <input type="checkbox" name="resume" checked>
            <input type="checkbox" name="generate_index">
            <input type="radio" name="shape" value="box">
            <input type="radio" name="shape" value="line" checked>
            <select name="kind"><option value="a">a</option><option value="b" selected>b</option></select>
            <textarea name="note">two words</textarea>
            <input value="unnamed">
            <input name="locked" value="x" disabled>
            <input type="submit" name="go" value="Run">
            <button type="submit" name="also">Run</button>
        </form>"#,
    );
    let form = dom::element_by_id::<HtmlFormElement>(&document, "form-controls", "form").unwrap();

    let fields = read_form(&form);
    assert_eq!(
        fields.to_query_string(),
        "name=alice&resume=true&generate_index=false&shape=line&kind=b&note=two%20words"
    );
}
