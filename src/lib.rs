//! Vitrine
//!
//! Vitrine is the client-side engine behind a course storefront page: the cart model and its
//! session-scoped persistence, the view/history state machine that keeps the browser's
//! back/forward stack consistent with on-screen state, checkout and contact-form sequencing,
//! and the presentation projections the rendering shell consumes.

pub mod cart;
pub mod checkout;
pub mod contact;
pub mod controller;
pub mod courses;
pub mod email;
pub mod fixtures;
pub mod history;
pub mod projection;
pub mod store;
pub mod transcript;
pub mod view;
