//! Trait contracts example for service-locator.
//!
//! A checkout flow depends on a `PaymentGateway` contract. The gateway needs a
//! network handshake, so it is registered as an async factory and built the
//! first time checkout asks for it. Tests (or a staging setup) override the
//! contract with a synchronous stub, which wins over the factory.
//!
//! Run with: `cargo run --example trait_contracts`

use service_locator::{BoxError, Locator, LocatorError};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

trait PaymentGateway: Send + Sync {
    fn charge(&self, cents: u64) -> String;
}

struct StripeGateway {
    session: u32,
}

impl PaymentGateway for StripeGateway {
    fn charge(&self, cents: u64) -> String {
        format!("stripe session #{} charged {cents}c", self.session)
    }
}

struct StubGateway;

impl PaymentGateway for StubGateway {
    fn charge(&self, cents: u64) -> String {
        format!("stub accepted {cents}c")
    }
}

type Gateway = Arc<dyn PaymentGateway>;

/// Resolves the gateway on demand; the caller never sees which implementation it got.
async fn checkout(locator: &Locator, cents: u64) -> Result<String, LocatorError> {
    let gateway = locator.get_async::<Gateway>().await?;
    Ok(gateway.charge(cents))
}

#[tokio::main]
async fn main() -> Result<(), LocatorError> {
    let locator = Locator::new();
    let handshakes = Arc::new(AtomicU32::new(0));

    let counter = Arc::clone(&handshakes);
    locator.register_async(move || {
        let session = counter.fetch_add(1, Ordering::SeqCst) + 1;
        async move {
            tokio::time::sleep(Duration::from_millis(150)).await;
            Ok::<_, BoxError>(Arc::new(StripeGateway { session }) as Gateway)
        }
    });
    println!("gateway pending: {}", !locator.contains::<Gateway>());

    for cents in [1299, 450] {
        println!("{}", checkout(&locator, cents).await?);
    }
    println!("handshakes so far: {}", handshakes.load(Ordering::SeqCst));

    // Override with a stub; the factory stays registered but is shadowed.
    locator.register(Arc::new(StubGateway) as Gateway);
    println!("{}", checkout(&locator, 999).await?);

    // Dropping the override and the factory leaves nothing to resolve.
    locator.unregister::<Gateway>();
    match checkout(&locator, 1).await {
        Ok(receipt) => println!("unexpected: {receipt}"),
        Err(e) => println!("after unregister: {e}"),
    }

    println!("total handshakes: {}", handshakes.load(Ordering::SeqCst));
    Ok(())
}
