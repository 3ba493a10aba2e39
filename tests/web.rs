// Browser smoke test: `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn mount_canvas() {
    let doc = web_sys::window().unwrap().document().unwrap();
    if doc.get_element_by_id("gameCanvas").is_some() {
        return;
    }
    let canvas: HtmlCanvasElement = doc.create_element("canvas").unwrap().dyn_into().unwrap();
    canvas.set_id("gameCanvas");
    canvas.set_width(800);
    canvas.set_height(600);
    doc.body().unwrap().append_child(&canvas).unwrap();
}

#[wasm_bindgen_test]
fn starts_and_toggles_pause() {
    mount_canvas();
    grumble_chase::configure_game(r#"{"confirm_on_game_over": false}"#).unwrap();
    grumble_chase::start_game().unwrap();

    let snap: serde_json::Value =
        serde_json::from_str(&grumble_chase::snapshot_json().unwrap()).unwrap();
    assert_eq!(snap["phase"], "running");
    assert_eq!(snap["elapsed_secs"], 0);

    grumble_chase::toggle_pause();
    let snap: serde_json::Value =
        serde_json::from_str(&grumble_chase::snapshot_json().unwrap()).unwrap();
    assert_eq!(snap["phase"], "paused");

    grumble_chase::restart_game();
    let snap: serde_json::Value =
        serde_json::from_str(&grumble_chase::snapshot_json().unwrap()).unwrap();
    assert_eq!(snap["phase"], "running");
}
