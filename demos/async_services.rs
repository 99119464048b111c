//! Async services example for service-locator.
//!
//! Demonstrates:
//! - Registering an eager `ApiService` next to a lazily-connected `DatabaseService`
//! - First `get_async()` runs the factory, later calls return the cached instance
//! - Factories that depend on other services through the same locator
//! - Watching operations through `tracing`
//!
//! Run with: `RUST_LOG=service_locator=trace cargo run --example async_services`

use service_locator::{BoxError, Locator, LocatorError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

struct ApiService {
    base_url: String,
}

struct DatabaseService {
    url: String,
}

impl DatabaseService {
    async fn connect(url: &str) -> Result<Self, BoxError> {
        // Simulated handshake
        tokio::time::sleep(Duration::from_millis(300)).await;
        Ok(DatabaseService {
            url: url.to_string(),
        })
    }
}

struct UserRepository {
    db: Arc<DatabaseService>,
}

#[tokio::main]
async fn main() -> Result<(), LocatorError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== service-locator: Async Services ===\n");

    let locator = Arc::new(Locator::new());

    // -------------------------------------------------------------------------
    // 1. Register services
    // -------------------------------------------------------------------------
    println!("1. Registering services...");

    locator.register(ApiService {
        base_url: "https://api.example.com".to_string(),
    });
    locator.register_async(|| DatabaseService::connect("postgres://localhost/app"));
    locator.register_async({
        let locator = Arc::clone(&locator);
        move || {
            let locator = Arc::clone(&locator);
            async move {
                let db = locator.get_async::<DatabaseService>().await?;
                Ok::<_, LocatorError>(UserRepository { db })
            }
        }
    });

    println!("   ApiService (eager), DatabaseService (async), UserRepository (async)");

    // -------------------------------------------------------------------------
    // 2. Eager lookup
    // -------------------------------------------------------------------------
    let api: Arc<ApiService> = locator.get()?;
    println!("\n2. ApiService base URL: {}", api.base_url);

    // -------------------------------------------------------------------------
    // 3. Lazy lookup, then cached lookup
    // -------------------------------------------------------------------------
    println!("\n3. Resolving UserRepository (connects the database on the way)...");

    let started = Instant::now();
    let repo: Arc<UserRepository> = locator.get_async().await?;
    println!("   resolved in {:?}, db = {}", started.elapsed(), repo.db.url);

    let started = Instant::now();
    let again: Arc<UserRepository> = locator.get_async().await?;
    println!(
        "   cached lookup in {:?}, same instance: {}",
        started.elapsed(),
        Arc::ptr_eq(&repo, &again)
    );

    // -------------------------------------------------------------------------
    // 4. Missing entries
    // -------------------------------------------------------------------------
    println!("\n4. Looking up an unregistered service...");

    match locator.get_async::<String>().await {
        Ok(value) => println!("   Found String: {}", value),
        Err(e) => println!("   Error (expected): {}", e),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
