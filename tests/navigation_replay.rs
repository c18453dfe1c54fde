//! Integration tests for back/forward replay and deep-link
//! initialization: the stack entry and the rendered view must agree at
//! every step, and replay must never push.

use jiff::Timestamp;
use serde_json::json;
use testresult::TestResult;

use vitrine::{
    contact::ContactForm,
    controller::Storefront,
    fixtures,
    history::StackHistory,
    store::MemoryStore,
    view::ViewState,
};

fn now() -> Timestamp {
    Timestamp::UNIX_EPOCH
}

fn storefront() -> Storefront<MemoryStore, StackHistory> {
    let mut storefront = Storefront::new(MemoryStore::new(), StackHistory::new());
    storefront.init_from_location("", false, now());
    storefront
}

#[test]
fn back_and_forward_around_an_order_replay_the_same_reference() -> TestResult {
    let mut storefront = storefront();
    for entry in fixtures::catalogue().into_iter().take(2) {
        storefront.add_course(entry)?;
    }
    storefront.begin_checkout("Asha Rao", "asha@example.com")?;
    let Some(order) = storefront.complete_checkout(now()) else {
        panic!("expected an order record");
    };
    let depth = storefront.history().len();

    let payload = storefront.history_mut().back();
    assert!(payload.is_some(), "there is an entry to go back to");
    storefront.handle_replay(payload, now());

    assert_eq!(storefront.view(), &ViewState::Browsing);

    let payload = storefront.history_mut().forward();
    assert!(payload.is_some(), "there is an entry to go forward to");
    storefront.handle_replay(payload, now());

    let ViewState::OrderConfirmed(replayed) = storefront.view() else {
        panic!("expected the order confirmation view, got {:?}", storefront.view());
    };
    assert_eq!(replayed.order_id, order.order_id, "same order, not a new one");
    assert!(
        replayed.line_items.is_empty(),
        "full detail is not reconstructable from the stack entry"
    );
    assert!(storefront.cart().is_empty(), "checkout never re-runs");
    assert_eq!(storefront.history().len(), depth, "replay never pushes");

    Ok(())
}

#[test]
fn contact_confirmation_replays_redacted() -> TestResult {
    let mut storefront = storefront();
    let form = ContactForm {
        name: "Asha Rao".to_owned(),
        email: "asha@example.com".to_owned(),
        mobile: "98765 43210".to_owned(),
        message: "Please share the course syllabus.".to_owned(),
    };

    storefront.begin_contact(&form)?;
    assert!(storefront.complete_contact(now()).is_some());

    let ViewState::ContactConfirmed(card) = storefront.view() else {
        panic!("expected the contact confirmation view");
    };
    assert_eq!(card.message.as_deref(), Some("Please share the course syllabus."));

    let payload = storefront.history_mut().back();
    storefront.handle_replay(payload, now());
    let payload = storefront.history_mut().forward();
    storefront.handle_replay(payload, now());

    let ViewState::ContactConfirmed(card) = storefront.view() else {
        panic!("expected the contact confirmation view after replay");
    };
    assert_eq!(card.name, "Asha Rao");
    assert_eq!(card.email, "asha@example.com");
    assert_eq!(card.message, None, "the stack entry is redacted to name and email");

    Ok(())
}

#[test]
fn return_home_pushes_a_browsing_entry() -> TestResult {
    let mut storefront = storefront();
    let form = ContactForm {
        name: "Asha Rao".to_owned(),
        email: "asha@example.com".to_owned(),
        mobile: String::new(),
        message: "Hello".to_owned(),
    };
    storefront.begin_contact(&form)?;
    storefront.complete_contact(now());
    let depth = storefront.history().len();

    storefront.return_home(now());

    assert_eq!(storefront.view(), &ViewState::Browsing);
    assert_eq!(storefront.history().len(), depth + 1, "explicit return pushes");

    Ok(())
}

#[test]
fn deep_linked_order_initializes_the_degraded_confirmation() {
    let mut storefront = Storefront::new(MemoryStore::new(), StackHistory::new());

    storefront.init_from_location("view=order&order=SI-A1B2C3D", false, now());

    let ViewState::OrderConfirmed(order) = storefront.view() else {
        panic!("expected the order confirmation view");
    };
    assert_eq!(order.order_id, "SI-A1B2C3D");
    assert_eq!(order.buyer_name, "Valued customer");
    assert!(order.line_items.is_empty());
    assert_eq!(storefront.history().len(), 1, "deep links replace, never push");
}

#[test]
fn deep_linked_contact_initializes_the_redacted_confirmation() {
    let mut storefront = Storefront::new(MemoryStore::new(), StackHistory::new());

    storefront.init_from_location("view=contact&name=Asha&email=asha%40example.com", false, now());

    let ViewState::ContactConfirmed(card) = storefront.view() else {
        panic!("expected the contact confirmation view");
    };
    assert_eq!(card.name, "Asha");
    assert_eq!(card.message, None);
}

#[test]
fn malformed_replay_payload_degrades_to_browsing() {
    let mut storefront = storefront();

    storefront.handle_replay(Some(json!({"view": "refund", "amount": 12})), now());
    assert_eq!(storefront.view(), &ViewState::Browsing);

    storefront.handle_replay(None, now());
    assert_eq!(storefront.view(), &ViewState::Browsing);
}
