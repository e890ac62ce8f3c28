//! Echo API Example
//!
//! Registers a small API, prints its exported configuration, and walks
//! a few dispatches through the completion contract.
//!
//! Run with: cargo run --example echo_api -p apibuilder-rust

use apibuilder_rust::prelude::*;
use apibuilder_rust::ApiConfigExt;
use apibuilder_rust::testing::block_on;
use serde_json::json;

/// Handler for GET /echo
fn echo(req: &ApiRequest) -> HandlerOutcome {
    HandlerOutcome::value(json!({
        "path": req.path(),
        "query": req.query_string.clone(),
    }))
}

/// Handler for POST /items
fn create_item(req: &ApiRequest) -> HandlerOutcome {
    match req.extra.get("body") {
        Some(body) => HandlerOutcome::value(json!({ "created": body })),
        None => HandlerOutcome::error("missing body"),
    }
}

/// Handler for GET /slow — settles asynchronously.
fn slow(_req: &ApiRequest) -> HandlerOutcome {
    HandlerOutcome::pending(async { Ok(Some(json!({ "took": "a while" }))) })
}

fn main() {
    println!("Echo API - dispatch walkthrough\n");

    let api = ApiBuilder::new()
        .get("/echo", echo)
        .post("/items", create_item)
        .get("/slow", slow);

    // === Exported configuration ===
    println!("1. Exported config:");
    println!("   {}", api.config_json().expect("config serializes"));

    // === Successful synchronous dispatch ===
    println!("\n2. GET /echo?a=b:");
    let request = ApiRequest::new(Method::GET, "/echo").with_query("a", "b");
    let result = block_on(api.dispatch(&request, |error, value| {
        println!("   completion: error={error:?} value={value:?}");
    }));
    assert!(result.is_ok());

    // === Synchronous handler failure ===
    println!("\n3. POST /items without a body:");
    let request = ApiRequest::new(Method::POST, "/items");
    let result = block_on(api.dispatch(&request, |error, _value| {
        println!("   completion error: {}", error.expect("handler failed"));
    }));
    assert!(result.is_err());

    // === Unregistered route ===
    println!("\n4. GET /missing:");
    let request = ApiRequest::new(Method::GET, "/missing");
    let result = block_on(api.dispatch(&request, |error, _value| {
        println!("   completion error: {}", error.expect("no handler"));
    }));
    assert!(result.is_err());

    // === Pending result ===
    println!("\n5. GET /slow:");
    let request = ApiRequest::new(Method::GET, "/slow");
    let result = block_on(api.dispatch(&request, |_error, value| {
        println!("   completion value: {value:?}");
    }));
    assert_eq!(result, Ok(Some(json!({ "took": "a while" }))));

    println!("\nAll dispatches completed exactly once.");
}
