//! Integration tests for tracing and event monitoring.
//!
//! The trace callback is process-wide, so every test here runs serially and filters the
//! captured events down to its own base trait.

use factory_registry::{
    clear_trace_callback, impl_upcast, set_trace_callback, Construct, Factory, FactoryRegistry,
    RegistryEvent,
};
use serial_test::serial;
use std::sync::{Arc, Mutex};

fn capture(base: &'static str) -> Arc<Mutex<Vec<String>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    set_trace_callback(move |event| {
        let mine = match event {
            RegistryEvent::Register { base: b, .. }
            | RegistryEvent::Contains { base: b, .. }
            | RegistryEvent::Create { base: b, .. } => b.ends_with(base),
            RegistryEvent::Init { .. } => false,
        };
        if mine {
            sink.lock().unwrap().push(event.to_string());
        }
    });
    events
}

pub trait Probe {}

struct Sensor;

impl Probe for Sensor {}

impl Construct<(u16,)> for Sensor {
    fn construct(_: (u16,)) -> Self {
        Sensor
    }
}

impl_upcast!(dyn Probe => Sensor);

#[test]
#[serial]
fn test_operations_emit_events_in_order() {
    let events = capture("Probe");

    let registry = FactoryRegistry::<u32, dyn Probe, (u16,)>::instance();
    registry.register::<Sensor>(7).unwrap();
    let _ = Factory::<u32, dyn Probe>::is_registered(&7u32, (0u16,));
    let _ = Factory::<u32, dyn Probe>::create(&7u32, (1u16,)).unwrap();
    let _ = Factory::<u32, dyn Probe>::create(&8u32, (1u16,));
    let _ = registry.register::<Sensor>(7);

    clear_trace_callback();

    let captured = events.lock().unwrap();
    assert_eq!(captured.len(), 5);
    assert!(captured[0].starts_with("register { key: 7,"));
    assert!(captured[0].ends_with("args: (u16,), accepted: true }"));
    assert!(captured[1].starts_with("contains { key: 7,"));
    assert!(captured[1].ends_with("found: true }"));
    assert!(captured[2].starts_with("create { key: 7,"));
    assert!(captured[2].ends_with("found: true }"));
    assert!(captured[3].starts_with("create { key: 8,"));
    assert!(captured[3].ends_with("found: false }"));
    assert!(captured[4].ends_with("accepted: false }"));
}

pub trait Quiet {}

struct Silent;

impl Quiet for Silent {}

impl Construct<()> for Silent {
    fn construct(_: ()) -> Self {
        Silent
    }
}

impl_upcast!(dyn Quiet => Silent);

#[test]
#[serial]
fn test_cleared_callback_sees_nothing() {
    let events = capture("Quiet");
    clear_trace_callback();

    FactoryRegistry::<u32, dyn Quiet, ()>::instance()
        .register::<Silent>(1)
        .unwrap();
    let _ = Factory::<u32, dyn Quiet>::create(&1u32, ());

    assert!(events.lock().unwrap().is_empty());
}

#[test]
#[serial]
fn test_callback_replacement() {
    let first = capture("Probe");
    let second = capture("Probe");

    let _ = Factory::<u32, dyn Probe>::is_registered(&99u32, (0u16,));
    clear_trace_callback();

    assert!(first.lock().unwrap().is_empty());
    assert_eq!(second.lock().unwrap().len(), 1);
}

#[test]
#[serial]
fn test_lookups_log_through_tracing_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("factory_registry=trace"))
        .with_test_writer()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let err = Factory::<u32, dyn Quiet>::create(&404u32, ()).err().unwrap();
        assert!(err.to_string().contains("key 404"));
    });
}
