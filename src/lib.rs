//! # Service Locator
//!
//! A registry mapping each type to a single instance of that type. Instances are
//! either registered eagerly or produced on first demand by an async factory,
//! after which they are cached like any eager instance.
//!
//! ## Quick Start
//!
//! ```rust
//! use service_locator::Locator;
//! use std::sync::Arc;
//!
//! struct ApiService {
//!     base_url: String,
//! }
//!
//! struct DatabaseService {
//!     url: String,
//! }
//!
//! # futures::executor::block_on(async {
//! let locator = Locator::new();
//!
//! locator.register(ApiService {
//!     base_url: "https://api.example.com".to_string(),
//! });
//! locator.register_async(|| async {
//!     // connect, migrate, ...
//!     Ok::<_, std::io::Error>(DatabaseService {
//!         url: "postgres://localhost/app".to_string(),
//!     })
//! });
//!
//! let api: Arc<ApiService> = locator.get().unwrap();
//! assert_eq!(api.base_url, "https://api.example.com");
//!
//! // First call runs the factory, later calls hit the cache.
//! let db: Arc<DatabaseService> = locator.get_async().await.unwrap();
//! assert_eq!(db.url, "postgres://localhost/app");
//! assert!(Arc::ptr_eq(&db, &locator.get::<DatabaseService>().unwrap()));
//! # });
//! ```
//!
//! ## Main Operations
//!
//! - [`Locator::register`] / [`Locator::register_arc`] - store an instance
//! - [`Locator::register_async`] - store a lazily-run async factory
//! - [`Locator::get`] / [`Locator::maybe_get`] - look up an instance, never runs factories
//! - [`Locator::get_async`] / [`Locator::maybe_get_async`] - look up, resolving a factory if needed
//! - [`Locator::unregister`] - drop the instance and factory of a type
//! - [`Locator::set_trace_callback`] - observe every operation as a [`LocatorEvent`]
//!
//! Every operation is also logged through `tracing` (target `service_locator::locator`).

mod locator;
mod locator_error;
mod locator_event;
mod type_key;

pub use locator::{Locator, TraceCallback};
pub use locator_error::{BoxError, LocatorError};
pub use locator_event::LocatorEvent;
pub use type_key::TypeKey;
