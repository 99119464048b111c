//! The locator: one instance per type, eager or lazily produced by an async factory.
//!
//! Two maps share the same [`TypeKey`] space:
//!
//! - `instances` holds constructed values. `get` and friends only ever read here.
//! - `factories` holds async producers. `get_async` runs one when `instances` has
//!   no entry for the key, then caches the result in `instances`.
//!
//! A synchronous registration always wins over a factory for the same key. The
//! factory record survives resolution and is only dropped by `unregister`/`clear`.
//!
//! Lock order: `factories` before `instances` whenever both are held.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt};

use crate::{BoxError, LocatorError, LocatorEvent, TypeKey};

type Instance = Arc<dyn Any + Send + Sync>;

type AsyncFactory = Arc<dyn Fn() -> BoxFuture<'static, Result<Instance, BoxError>> + Send + Sync>;

/// Observer invoked with every [`LocatorEvent`].
pub type TraceCallback = dyn Fn(&LocatorEvent) + Send + Sync + 'static;

/// Recovers from poisoning; no critical section leaves a map half-updated.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn downcast<T: Send + Sync + 'static>(instance: Instance) -> Result<Arc<T>, LocatorError> {
    instance
        .downcast::<T>()
        .map_err(|_| LocatorError::TypeMismatch {
            type_name: std::any::type_name::<T>(),
        })
}

/// A registry holding at most one instance of each type.
///
/// Locators are plain values: create as many as needed and pass them around
/// (usually behind an `Arc`). Nothing is shared between two locators.
///
/// # Examples
///
/// ```rust
/// use service_locator::Locator;
/// use std::sync::Arc;
///
/// struct ApiService {
///     base_url: String,
/// }
///
/// let locator = Locator::new();
/// locator.register(ApiService {
///     base_url: "https://api.example.com".to_string(),
/// });
///
/// let api: Arc<ApiService> = locator.get().unwrap();
/// assert_eq!(api.base_url, "https://api.example.com");
/// ```
#[derive(Default)]
pub struct Locator {
    instances: Mutex<HashMap<TypeKey, Instance>>,
    factories: Mutex<HashMap<TypeKey, AsyncFactory>>,
    trace: Mutex<Option<Arc<TraceCallback>>>,
}

impl Locator {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a callback invoked for every operation on this locator.
    ///
    /// Replaces any previous callback. The callback runs after the locator's
    /// internal locks are released, so it may call back into the same locator.
    pub fn set_trace_callback(&self, callback: impl Fn(&LocatorEvent) + Send + Sync + 'static) {
        *lock(&self.trace) = Some(Arc::new(callback));
    }

    /// Remove the trace callback. `tracing` output is unaffected.
    pub fn clear_trace_callback(&self) {
        *lock(&self.trace) = None;
    }

    fn emit_event(&self, event: LocatorEvent) {
        match &event {
            LocatorEvent::Resolve { type_name, success } => {
                tracing::debug!(type_name, success, "async factory finished");
            }
            _ => tracing::trace!(type_name = event.type_name(), %event, "locator event"),
        }

        let callback = lock(&self.trace).clone();
        if let Some(callback) = callback {
            callback(&event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------------------------------

    /// Register an instance of `T`, replacing any instance already stored for `T`.
    ///
    /// A factory registered for `T` is left in place but will no longer run,
    /// since lookups find the instance first.
    pub fn register<T: Send + Sync + 'static>(&self, value: T) {
        self.register_arc(Arc::new(value));
    }

    /// Register an `Arc`-wrapped instance.
    ///
    /// The locator keeps a clone of the given `Arc`, so later lookups return
    /// the very same allocation.
    pub fn register_arc<T: Send + Sync + 'static>(&self, value: Arc<T>) {
        let key = TypeKey::of::<T>();
        lock(&self.instances).insert(key, value);

        self.emit_event(LocatorEvent::Register {
            type_name: key.type_name(),
        });
    }

    /// Register an async factory producing `T` on first demand.
    ///
    /// The factory runs the first time `get_async::<T>()` (or
    /// `maybe_get_async::<T>()`) finds no instance of `T`. Its result is then
    /// cached, so it runs again only after a failure or after `unregister`.
    ///
    /// Replaces any factory already stored for `T`. Instances are untouched.
    ///
    /// ```rust
    /// use service_locator::Locator;
    ///
    /// struct Pool(u32);
    ///
    /// let locator = Locator::new();
    /// locator.register_async(|| async { Ok::<_, std::io::Error>(Pool(8)) });
    ///
    /// // Not resolved yet: synchronous lookups do not run factories.
    /// assert!(locator.maybe_get::<Pool>().is_none());
    /// assert!(locator.contains_async::<Pool>());
    /// ```
    pub fn register_async<T, F, Fut, E>(&self, factory: F)
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        let key = TypeKey::of::<T>();
        let factory: AsyncFactory = Arc::new(move || -> BoxFuture<'static, Result<Instance, BoxError>> {
            let produce = factory();
            async move {
                produce
                    .await
                    .map(|value| Arc::new(value) as Instance)
                    .map_err(Into::<BoxError>::into)
            }
            .boxed()
        });
        lock(&self.factories).insert(key, factory);

        self.emit_event(LocatorEvent::RegisterAsync {
            type_name: key.type_name(),
        });
    }

    /// Remove both the instance and the factory stored for `T`.
    ///
    /// Does nothing for types that were never registered.
    pub fn unregister<T: Send + Sync + 'static>(&self) {
        let key = TypeKey::of::<T>();
        {
            let mut factories = lock(&self.factories);
            factories.remove(&key);
            lock(&self.instances).remove(&key);
        }

        self.emit_event(LocatorEvent::Unregister {
            type_name: key.type_name(),
        });
    }

    /// Remove every instance and every factory.
    ///
    /// `Arc`s already handed out stay valid. The trace callback is kept.
    pub fn clear(&self) {
        {
            let mut factories = lock(&self.factories);
            factories.clear();
            lock(&self.instances).clear();
        }

        self.emit_event(LocatorEvent::Clear {});
    }

    // -------------------------------------------------------------------------------------------------
    // Synchronous lookup
    // -------------------------------------------------------------------------------------------------

    fn lookup<T: Send + Sync + 'static>(&self) -> Result<Option<Arc<T>>, LocatorError> {
        let key = TypeKey::of::<T>();
        let instance = lock(&self.instances).get(&key).cloned();

        self.emit_event(LocatorEvent::Get {
            type_name: key.type_name(),
            found: instance.is_some(),
        });

        instance.map(downcast::<T>).transpose()
    }

    /// Retrieve the instance of `T`.
    ///
    /// Never runs an async factory, even if one is registered for `T`.
    ///
    /// # Errors
    ///
    /// - [`LocatorError::NotRegistered`] if no instance of `T` is stored
    pub fn get<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, LocatorError> {
        self.lookup::<T>()?.ok_or(LocatorError::NotRegistered {
            type_name: std::any::type_name::<T>(),
        })
    }

    /// Retrieve the instance of `T`, or `None` if it is not stored.
    pub fn maybe_get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.lookup::<T>().ok().flatten()
    }

    /// Retrieve a clone of the instance of `T`.
    ///
    /// Useful for trait-object handles: with `Arc<dyn Trait>` registered,
    /// `get_cloned::<Arc<dyn Trait>>()` yields the handle itself.
    pub fn get_cloned<T: Send + Sync + Clone + 'static>(&self) -> Result<T, LocatorError> {
        let arc = self.get::<T>()?;
        Ok((*arc).clone())
    }

    /// Whether an instance of `T` is stored. Pending factories do not count.
    pub fn contains<T: Send + Sync + 'static>(&self) -> bool {
        let key = TypeKey::of::<T>();
        let found = lock(&self.instances).contains_key(&key);

        self.emit_event(LocatorEvent::Contains {
            type_name: key.type_name(),
            found,
        });

        found
    }

    /// Whether `get_async::<T>()` can produce a value: an instance is stored or
    /// a factory is registered.
    pub fn contains_async<T: Send + Sync + 'static>(&self) -> bool {
        let key = TypeKey::of::<T>();
        let found = {
            let factories = lock(&self.factories);
            factories.contains_key(&key) || lock(&self.instances).contains_key(&key)
        };

        self.emit_event(LocatorEvent::Contains {
            type_name: key.type_name(),
            found,
        });

        found
    }

    // -------------------------------------------------------------------------------------------------
    // Asynchronous resolution
    // -------------------------------------------------------------------------------------------------

    async fn resolve<T: Send + Sync + 'static>(&self) -> Result<Option<Arc<T>>, LocatorError> {
        let key = TypeKey::of::<T>();

        let cached = lock(&self.instances).get(&key).cloned();
        if let Some(instance) = cached {
            self.emit_event(LocatorEvent::GetAsync {
                type_name: key.type_name(),
                found: true,
            });
            return downcast::<T>(instance).map(Some);
        }

        let factory = lock(&self.factories).get(&key).cloned();
        self.emit_event(LocatorEvent::GetAsync {
            type_name: key.type_name(),
            found: factory.is_some(),
        });
        let Some(factory) = factory else {
            return Ok(None);
        };

        // No lock is held here; concurrent callers may run the factory too.
        let produced = factory().await;
        self.emit_event(LocatorEvent::Resolve {
            type_name: key.type_name(),
            success: produced.is_ok(),
        });
        let produced = produced.map_err(|source| LocatorError::Factory {
            type_name: key.type_name(),
            source,
        })?;

        // `factories` stays locked until the cache write so a concurrent
        // `unregister` cannot slip in between the check and the insert.
        let instance = {
            let factories = lock(&self.factories);
            let still_registered = factories
                .get(&key)
                .is_some_and(|current| Arc::ptr_eq(current, &factory));
            let mut instances = lock(&self.instances);
            match instances.get(&key) {
                // Registered or resolved by someone else while we were waiting.
                Some(existing) => existing.clone(),
                None if still_registered => {
                    instances.insert(key, produced.clone());
                    produced
                }
                // Unregistered or replaced mid-flight: hand out, don't cache.
                None => produced,
            }
        };

        downcast::<T>(instance).map(Some)
    }

    /// Retrieve the instance of `T`, running its async factory on first use.
    ///
    /// 1. A stored instance is returned without suspending.
    /// 2. Otherwise the registered factory is awaited and its result cached.
    ///
    /// # Errors
    ///
    /// - [`LocatorError::AsyncNotRegistered`] if neither an instance nor a factory exists
    /// - [`LocatorError::Factory`] if the factory fails; nothing is cached and a
    ///   later call runs the factory again
    pub async fn get_async<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, LocatorError> {
        self.resolve::<T>()
            .await?
            .ok_or(LocatorError::AsyncNotRegistered {
                type_name: std::any::type_name::<T>(),
            })
    }

    /// Like [`get_async`](Self::get_async), but `Ok(None)` when nothing is
    /// registered for `T`. Factory failures are still returned as errors.
    pub async fn maybe_get_async<T: Send + Sync + 'static>(
        &self,
    ) -> Result<Option<Arc<T>>, LocatorError> {
        self.resolve::<T>().await
    }
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instances: Vec<&'static str> = lock(&self.instances)
            .keys()
            .map(TypeKey::type_name)
            .collect();
        let factories: Vec<&'static str> = lock(&self.factories)
            .keys()
            .map(TypeKey::type_name)
            .collect();

        f.debug_struct("Locator")
            .field("instances", &instances)
            .field("factories", &factories)
            .finish_non_exhaustive()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
