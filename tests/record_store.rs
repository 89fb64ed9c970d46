//! Integration tests for keyed singleton stores declared with `define_record_store!`.

use factory_registry::{define_record_store, ErrorKind, Named, RecordStore};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::thread;

#[derive(Default)]
pub struct Metric {
    pub total: AtomicU64,
}

#[derive(Default)]
pub struct Route {
    pub handlers: Mutex<Vec<&'static str>>,
}

define_record_store!(pub metrics, Metric);
define_record_store!(pub routes, Route);

struct Requests;
impl Named for Requests {
    const NAME: &'static str = "requests";
}

// Shares its record with `Requests`.
struct RequestsAlias;
impl Named for RequestsAlias {
    const NAME: &'static str = "requests";
}

struct Index;
impl Named for Index {
    const NAME: &'static str = "/";
}

#[test]
fn test_set_returns_one_record_per_name() {
    let first = metrics::set::<Requests>();
    let again = metrics::set::<Requests>();
    let alias = metrics::set::<RequestsAlias>();

    assert!(std::ptr::eq(first, again));
    assert!(std::ptr::eq(first, alias));

    first.total.fetch_add(1, Ordering::SeqCst);
    alias.total.fetch_add(1, Ordering::SeqCst);
    assert!(metrics::get("requests").unwrap().total.load(Ordering::SeqCst) >= 2);
}

#[test]
fn test_get_never_creates() {
    let err = metrics::get("latency").err().unwrap();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.location().line, line!() - 2);
    assert!(err.to_string().contains("no record named `latency` in metrics"));
    assert!(!metrics::contains("latency"));
}

#[test]
fn test_stores_do_not_share_names() {
    routes::set::<Index>().handlers.lock().unwrap().push("home");

    assert!(routes::contains("/"));
    assert!(!metrics::contains("/"));
    assert_eq!(*routes::get("/").unwrap().handlers.lock().unwrap(), ["home"]);
}

#[test]
fn test_trait_access_matches_free_functions() {
    routes::entry("/health");

    assert!(routes::STORE.contains("/health"));
    assert!(routes::names().contains(&"/health"));
    assert!(std::ptr::eq(
        routes::STORE.get("/health").unwrap(),
        routes::get("/health").unwrap()
    ));
    assert_eq!(<routes::Store as RecordStore>::STORE, "routes");
}

#[test]
fn test_concurrent_first_use_creates_one_record() {
    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(|| metrics::entry("burst") as *const Metric as usize))
        .collect();

    let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
}
