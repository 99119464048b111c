//! Basic usage example for service-locator.
//!
//! Demonstrates:
//! - Registering primitives, strings, and custom structs
//! - Retrieving values with `get()` (returns `Arc<T>`) and `maybe_get()`
//! - Retrieving cloned values with `get_cloned()` (returns `T`)
//! - Checking registration status with `contains()`
//! - Removing entries with `unregister()`
//!
//! Run with: `cargo run --example basic_usage`

use service_locator::Locator;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
struct AppConfig {
    name: String,
    version: u32,
    debug_mode: bool,
}

fn main() {
    println!("=== service-locator: Basic Usage ===\n");

    let locator = Locator::new();

    // -------------------------------------------------------------------------
    // 1. Register values
    // -------------------------------------------------------------------------
    println!("1. Registering values...");

    locator.register(42i32);
    locator.register("Hello, service-locator!".to_string());
    locator.register(AppConfig {
        name: "MyApp".to_string(),
        version: 1,
        debug_mode: true,
    });

    println!("   Registered: i32, String, AppConfig");

    // -------------------------------------------------------------------------
    // 2. Check registration status
    // -------------------------------------------------------------------------
    println!("\n2. Checking registration status with contains()...");

    println!("   contains::<i32>()       = {}", locator.contains::<i32>());
    println!("   contains::<AppConfig>() = {}", locator.contains::<AppConfig>());
    println!("   contains::<Vec<u8>>()   = {}", locator.contains::<Vec<u8>>());

    // -------------------------------------------------------------------------
    // 3. Retrieve values
    // -------------------------------------------------------------------------
    println!("\n3. Retrieving values...");

    let number: Arc<i32> = locator.get().expect("i32 registered above");
    let message: Arc<String> = locator.get().expect("String registered above");
    let cfg_owned: AppConfig = locator.get_cloned().expect("AppConfig registered above");

    println!("   i32:               {}", *number);
    println!("   String:            {}", *message);
    println!("   AppConfig (owned): {:?}", cfg_owned);

    // -------------------------------------------------------------------------
    // 4. Handle missing types
    // -------------------------------------------------------------------------
    println!("\n4. Handling missing types...");

    match locator.get::<Vec<u8>>() {
        Ok(value) => println!("   Found Vec<u8>: {:?}", value),
        Err(e) => println!("   Error (expected): {}", e),
    }
    println!("   maybe_get::<Vec<u8>>() = {:?}", locator.maybe_get::<Vec<u8>>());

    // -------------------------------------------------------------------------
    // 5. Unregister
    // -------------------------------------------------------------------------
    println!("\n5. Unregistering AppConfig...");

    locator.unregister::<AppConfig>();
    println!("   contains::<AppConfig>() = {}", locator.contains::<AppConfig>());

    println!("\n=== Example Complete ===");
    println!("{:?}", locator);
}
