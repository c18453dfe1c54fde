//! Storefront controller

use std::time::Duration;

use jiff::Timestamp;
use serde_json::Value;

use crate::{
    cart::{Cart, CartError},
    checkout::{self, BuyerDetails, CheckoutError, OrderRecord},
    contact::{ContactError, ContactForm, ContactRequest, ContactSubmission},
    courses::{CourseEntry, CourseId},
    history::NavigationStack,
    projection::{CartView, CheckoutPrompt},
    store::SessionStore,
    transcript::{self, TranscriptFile},
    view::{self, NavDirective, ViewEvent, ViewState},
};

/// Tunable storefront behavior.
#[derive(Debug, Clone)]
pub struct StorefrontOptions {
    /// Simulated processing window for a checkout.
    pub checkout_latency: Duration,

    /// Simulated send window for a contact submission.
    pub contact_latency: Duration,
}

impl Default for StorefrontOptions {
    fn default() -> Self {
        StorefrontOptions {
            checkout_latency: Duration::from_millis(700),
            contact_latency: Duration::from_millis(450),
        }
    }
}

/// The page's single stateful controller.
///
/// Owns the cart, the view state, the submission log and both in-flight
/// latches; constructed once per page session. Every cart mutation is
/// written through to the session store and every view transition is
/// mirrored to the navigation stack before the caller regains control.
///
/// The shell owns timers: `begin_checkout` / `begin_contact` arm a
/// one-shot latch and return the window to wait out, after which the
/// shell calls the matching `complete_*`. While a latch is armed the
/// triggering control is expected to be disabled; a repeated `begin_*`
/// is refused and a stale `complete_*` is a no-op, so duplicate
/// activations collapse either way.
#[derive(Debug)]
pub struct Storefront<S, N> {
    options: StorefrontOptions,
    store: S,
    history: N,
    cart: Cart,
    view: ViewState,
    submissions: Vec<ContactSubmission>,
    pending_checkout: Option<BuyerDetails>,
    pending_contact: Option<ContactRequest>,
}

impl<S: SessionStore, N: NavigationStack> Storefront<S, N> {
    /// Create a storefront with default options, restoring any cart
    /// persisted earlier in the browsing session.
    pub fn new(store: S, history: N) -> Self {
        Storefront::with_options(store, history, StorefrontOptions::default())
    }

    /// Create a storefront with the given options.
    pub fn with_options(store: S, history: N, options: StorefrontOptions) -> Self {
        let cart = Cart::restore(&store);

        Storefront {
            options,
            store,
            history,
            cart,
            view: ViewState::Browsing,
            submissions: Vec::new(),
            pending_checkout: None,
            pending_contact: None,
        }
    }

    /// Resolve the initial view from the page address (deep links).
    pub fn init_from_location(&mut self, query: &str, has_fragment: bool, now: Timestamp) {
        let (state, directive) = view::initial_state(query, has_fragment, now);

        if let Some(directive) = directive {
            self.apply_directive(directive);
        }
        self.view = state;
    }

    /// The active view state.
    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Submissions collected in this page lifetime, oldest first.
    #[must_use]
    pub fn submissions(&self) -> &[ContactSubmission] {
        &self.submissions
    }

    /// The session store backing cart persistence.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The navigation stack.
    #[must_use]
    pub fn history(&self) -> &N {
        &self.history
    }

    /// Mutable access to the navigation stack, for shells that navigate
    /// programmatically.
    pub fn history_mut(&mut self) -> &mut N {
        &mut self.history
    }

    /// Add a course to the cart and write the cart through.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::DuplicateEntry`] (a non-fatal notice) if the
    /// course is already in the cart; nothing is mutated or persisted.
    pub fn add_course(&mut self, entry: CourseEntry) -> Result<(), CartError> {
        self.cart.add(entry)?;
        self.cart.persist(&mut self.store);

        Ok(())
    }

    /// Remove a course from the cart and write the cart through.
    ///
    /// Removing an absent id is a no-op.
    pub fn remove_course(&mut self, id: &CourseId) {
        self.cart.remove(id);
        self.cart.persist(&mut self.store);
    }

    /// Project the cart for rendering.
    #[must_use]
    pub fn cart_view(&self) -> CartView {
        CartView::project(&self.cart)
    }

    /// Open the checkout dialog.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there is nothing to buy.
    pub fn open_checkout(&self) -> Result<CheckoutPrompt, CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(CheckoutPrompt::project(&self.cart))
    }

    /// Validate buyer details and arm the checkout latch.
    ///
    /// Returns the processing window the shell should wait out before
    /// calling [`Storefront::complete_checkout`].
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::AlreadyProcessing`]: a checkout is in flight.
    /// - [`CheckoutError::EmptyCart`]: nothing to buy.
    /// - [`CheckoutError::MissingBuyerDetails`] /
    ///   [`CheckoutError::InvalidEmail`]: buyer validation failed.
    pub fn begin_checkout(&mut self, name: &str, email: &str) -> Result<Duration, CheckoutError> {
        if self.pending_checkout.is_some() {
            return Err(CheckoutError::AlreadyProcessing);
        }

        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let buyer = BuyerDetails::parse(name, email)?;
        self.pending_checkout = Some(buyer);

        Ok(self.options.checkout_latency)
    }

    /// Complete an armed checkout: generate the order, clear and persist
    /// the cart, and show the order confirmation.
    ///
    /// Returns `None` (and does nothing) when no checkout is armed.
    pub fn complete_checkout(&mut self, now: Timestamp) -> Option<OrderRecord> {
        let buyer = self.pending_checkout.take()?;

        let order_id = checkout::reference(&mut rand::thread_rng());
        let order = OrderRecord::from_cart(order_id, now, &buyer, &self.cart);
        tracing::info!(order = %order.order_id, total = %order.total, "order placed");

        self.cart.clear();
        self.cart.persist(&mut self.store);
        self.transition(ViewEvent::OrderPlaced(order.clone()), now);

        Some(order)
    }

    /// Validate the contact form and arm the send latch.
    ///
    /// Returns the send window the shell should wait out before calling
    /// [`Storefront::complete_contact`].
    ///
    /// # Errors
    ///
    /// - [`ContactError::AlreadySending`]: a submission is in flight.
    /// - [`ContactError::MissingFields`] / [`ContactError::InvalidEmail`] /
    ///   [`ContactError::InvalidMobile`]: form validation failed.
    pub fn begin_contact(&mut self, form: &ContactForm) -> Result<Duration, ContactError> {
        if self.pending_contact.is_some() {
            return Err(ContactError::AlreadySending);
        }

        let request = form.validate()?;
        self.pending_contact = Some(request);

        Ok(self.options.contact_latency)
    }

    /// Complete an armed contact submission: log it, show the contact
    /// confirmation, and hand back the refreshed transcript file for the
    /// shell to download.
    ///
    /// Returns `None` (and does nothing) when no submission is armed.
    pub fn complete_contact(&mut self, now: Timestamp) -> Option<TranscriptFile> {
        let request = self.pending_contact.take()?;

        let card = request.card();
        self.submissions.push(request.into_submission(now));

        let file = transcript::render(&self.submissions, now);
        self.transition(ViewEvent::ContactAccepted(card), now);

        file
    }

    /// Leave a confirmation view and return to browsing.
    pub fn return_home(&mut self, now: Timestamp) {
        self.transition(ViewEvent::ReturnToBrowsing, now);
    }

    /// React to a back/forward navigation delivering `payload`.
    pub fn handle_replay(&mut self, payload: Option<Value>, now: Timestamp) {
        self.transition(ViewEvent::Replay(payload), now);
    }

    fn transition(&mut self, event: ViewEvent, now: Timestamp) {
        let (state, directive) = self.view.clone().apply(event, now);

        // Stack effect lands before the new view becomes current.
        self.apply_directive(directive);
        self.view = state;
    }

    fn apply_directive(&mut self, directive: NavDirective) {
        match directive {
            NavDirective::Push(entry) => self.history.push(&entry),
            NavDirective::Replace(entry) => self.history.replace(&entry),
        }
    }
}
