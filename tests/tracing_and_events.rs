//! Integration tests for tracing and event monitoring.
//!
//! Operations are observable two ways: as `tracing` records for whatever
//! subscriber the host installs, and as `LocatorEvent`s passed to a callback.

use service_locator::{BoxError, Locator, LocatorEvent};
use std::sync::{Arc, Mutex};

fn record_events(locator: &Locator) -> Arc<Mutex<Vec<LocatorEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();
    locator.set_trace_callback(move |event| {
        events_clone.lock().unwrap().push(event.clone());
    });
    events
}

#[test]
fn test_basic_tracing() {
    let locator = Locator::new();
    let events = record_events(&locator);

    locator.register(42i32);
    let _ = locator.get::<i32>();
    let _ = locator.contains::<i32>();

    let captured = events.lock().unwrap();
    assert_eq!(
        *captured,
        vec![
            LocatorEvent::Register { type_name: "i32" },
            LocatorEvent::Get {
                type_name: "i32",
                found: true
            },
            LocatorEvent::Contains {
                type_name: "i32",
                found: true
            },
        ]
    );
}

#[test]
fn test_trace_get_found_and_not_found() {
    let locator = Locator::new();
    let events = record_events(&locator);

    locator.register(123i64);
    let _ = locator.get::<i64>();
    let _ = locator.get::<f32>();

    let captured: Vec<String> = events.lock().unwrap().iter().map(|e| e.to_string()).collect();
    assert_eq!(captured.len(), 3);
    assert!(captured[1].contains("found: true"));
    assert!(captured[2].contains("found: false"));
}

#[tokio::test]
async fn test_trace_async_resolution() {
    let locator = Locator::new();
    let events = record_events(&locator);

    locator.register_async(|| async { Err::<u8, _>(BoxError::from("offline")) });
    let _ = locator.get_async::<u8>().await;
    let _ = locator.maybe_get_async::<u16>().await;

    let captured = events.lock().unwrap();
    assert_eq!(
        *captured,
        vec![
            LocatorEvent::RegisterAsync { type_name: "u8" },
            LocatorEvent::GetAsync {
                type_name: "u8",
                found: true
            },
            LocatorEvent::Resolve {
                type_name: "u8",
                success: false
            },
            LocatorEvent::GetAsync {
                type_name: "u16",
                found: false
            },
        ]
    );
}

#[test]
fn test_trace_unregister_and_clear() {
    let locator = Locator::new();
    let events = record_events(&locator);

    locator.unregister::<String>();
    locator.clear();

    let captured: Vec<String> = events.lock().unwrap().iter().map(|e| e.to_string()).collect();
    assert_eq!(
        captured,
        vec![
            "unregister { type_name: alloc::string::String }",
            "Clearing the Locator",
        ]
    );
}

#[test]
fn test_trace_callback_replacement() {
    let locator = Locator::new();
    let first = record_events(&locator);
    locator.register(100usize);

    let second = record_events(&locator);
    locator.register(200usize);

    assert_eq!(first.lock().unwrap().len(), 1);
    assert_eq!(second.lock().unwrap().len(), 1);
}

#[test]
fn test_callback_can_use_different_locator() {
    let main_locator = Locator::new();
    let log_locator = Arc::new(Locator::new());

    let log_clone = log_locator.clone();
    main_locator.set_trace_callback(move |event| {
        log_clone.register(format!("Last event: {}", event));
    });

    main_locator.register(42i32);
    let _ = main_locator.get::<i32>();

    let last_log: Arc<String> = log_locator.get().unwrap();
    assert_eq!(&**last_log, "Last event: get { type_name: i32, found: true }");
}

#[tokio::test]
async fn test_operations_emit_tracing_records() {
    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let locator = Locator::new();
    locator.register_async(|| async { Ok::<_, BoxError>(5u32) });
    let _ = locator.get_async::<u32>().await;

    let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("register_async { type_name: u32 }"));
    assert!(output.contains("async factory finished"));
    assert!(output.contains("success=true"));
}
