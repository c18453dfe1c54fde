//! Integration tests for session persistence: the cart survives a page
//! reload through the session store, and degrades to empty when the
//! store cannot help.

use jiff::Timestamp;
use testresult::TestResult;

use vitrine::{
    cart::Cart,
    controller::Storefront,
    courses::CourseId,
    fixtures,
    history::StackHistory,
    store::{MemoryStore, SessionStore, StoreError},
};

fn now() -> Timestamp {
    Timestamp::UNIX_EPOCH
}

#[test]
fn cart_survives_a_reload_through_the_store() -> TestResult {
    let mut storefront = Storefront::new(MemoryStore::new(), StackHistory::new());
    storefront.init_from_location("", false, now());

    for entry in fixtures::catalogue().into_iter().take(3) {
        storefront.add_course(entry)?;
    }
    storefront.remove_course(&CourseId::new("c2"));
    let expected = storefront.cart().clone();

    // A reload constructs a fresh storefront over the same session store.
    let reloaded = Storefront::new(storefront.store().clone(), StackHistory::new());

    assert_eq!(reloaded.cart(), &expected);
    assert_eq!(reloaded.cart().len(), 2);

    Ok(())
}

#[test]
fn checkout_clears_the_persisted_cart_too() -> TestResult {
    let mut storefront = Storefront::new(MemoryStore::new(), StackHistory::new());
    storefront.init_from_location("", false, now());

    for entry in fixtures::catalogue().into_iter().take(2) {
        storefront.add_course(entry)?;
    }
    storefront.begin_checkout("Asha Rao", "asha@example.com")?;
    assert!(storefront.complete_checkout(now()).is_some());

    let reloaded = Storefront::new(storefront.store().clone(), StackHistory::new());

    assert!(reloaded.cart().is_empty());

    Ok(())
}

/// Store that refuses everything, as a locked-down browser profile would.
#[derive(Debug, Clone)]
struct RejectingStore;

impl SessionStore for RejectingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError("storage disabled".to_owned()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError("storage disabled".to_owned()))
    }
}

#[test]
fn a_failing_store_never_surfaces_to_the_visitor() -> TestResult {
    let mut storefront = Storefront::new(RejectingStore, StackHistory::new());
    storefront.init_from_location("", false, now());

    // Mutations still succeed in memory; the failed writes are swallowed.
    for entry in fixtures::catalogue().into_iter().take(2) {
        storefront.add_course(entry)?;
    }

    assert_eq!(storefront.cart().len(), 2);
    assert_eq!(storefront.cart_view().count, 2);

    Ok(())
}

#[test]
fn corrupt_store_payload_restores_an_empty_cart() -> TestResult {
    let mut store = MemoryStore::new();
    store.set(vitrine::store::CART_KEY, "\"half a payload")?;

    let storefront = Storefront::new(store, StackHistory::new());

    assert!(storefront.cart().is_empty());

    Ok(())
}

#[test]
fn restore_round_trips_any_mutation_sequence() -> TestResult {
    let mut store = MemoryStore::new();
    let mut cart = Cart::new();

    for entry in fixtures::catalogue() {
        cart.add(entry)?;
        cart.persist(&mut store);
    }
    cart.remove(&CourseId::new("c1"));
    cart.remove(&CourseId::new("c4"));
    cart.persist(&mut store);

    assert_eq!(Cart::restore(&store), cart);

    Ok(())
}
