//! Browser tests, run with `wasm-pack test --headless --firefox`

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_test::*;
use wayline_core::Platform;
use wayline_wasm::{BrowserPlatform, Navigation, WasmNavigation, WasmRoutes};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_push_updates_location() {
    let navigation = Navigation::new(BrowserPlatform::new().unwrap());
    let count = Rc::new(Cell::new(0));
    let seen = Rc::clone(&count);
    let _subscription = navigation.subscribe(move || seen.set(seen.get() + 1));

    assert!(navigation.push("/users/1234?tab=friends").unwrap());
    let url = navigation.snapshot().unwrap();
    assert_eq!(url.pathname(), "/users/1234");
    assert_eq!(url.search().get("tab"), Some("friends"));
    assert_eq!(count.get(), 1);

    assert!(navigation.replace("/").unwrap());
    assert!(navigation.snapshot().unwrap().path().is_empty());
    assert_eq!(count.get(), 2);
}

#[wasm_bindgen_test]
fn test_current_location_is_absolute() {
    let platform = BrowserPlatform::new().unwrap();
    assert!(platform.current_location().starts_with("http"));
}

#[wasm_bindgen_test]
fn test_routes_binding() {
    let routes = WasmRoutes::new(
        vec!["Home".to_string(), "User".to_string(), "UserRoot".to_string()],
        vec![
            "/".to_string(),
            "/users/:userId/*".to_string(),
            "/users/:userId".to_string(),
        ],
    )
    .ok()
    .expect("valid templates");

    let url = routes
        .url("UserRoot", vec!["userId".to_string()], vec!["1234".to_string()])
        .ok();
    assert_eq!(url.as_deref(), Some("/users/1234"));

    assert!(routes
        .url("User", vec!["userId".to_string()], vec!["1234".to_string()])
        .is_err());

    let found = routes
        .recognize("/users/1234/friends")
        .ok()
        .expect("decodable path");
    assert!(found.found);
    assert_eq!(found.name(), "User");
    assert_eq!(
        found.params(),
        vec!["userId", "1234", "rest", "/friends"]
    );
    assert!(!routes.recognize("/posts").ok().expect("decodable path").found);
}

#[wasm_bindgen_test]
fn test_routes_binding_decodes_segments() {
    let routes = WasmRoutes::new(vec!["File".to_string()], vec!["/files/:name".to_string()])
        .ok()
        .expect("valid templates");

    let found = routes
        .recognize("/files/hello%20world")
        .ok()
        .expect("decodable path");
    assert_eq!(found.params(), vec!["name", "hello world"]);

    assert!(routes.recognize("/files/%FF").is_err());
}

#[wasm_bindgen_test]
fn test_throwing_js_listener_does_not_break_navigation() {
    let navigation = WasmNavigation::new().ok().expect("browser window");
    let throwing = js_sys::Function::new_no_args("throw new Error('listener failed')");
    let mut subscription = navigation.subscribe(throwing);

    assert!(navigation.push("/after-throw").ok().expect("push"));
    assert_eq!(navigation.pathname().ok().as_deref(), Some("/after-throw"));
    subscription.unsubscribe();
}
