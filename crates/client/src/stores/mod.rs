//! Client-side state stores.
//!
//! Each store is a plain owned object: constructed with its storage
//! backing, mutated through `&mut self`, readable at any time. All
//! mutations persist synchronously before updating in-memory state, so a
//! reader never observes a half-applied transition.

pub mod cart;
pub mod menu;
pub mod session;

pub use cart::{CartError, CartLine, CartLineModifier, CartStore};
pub use menu::{FetchTicket, MenuSnapshot, MenuStore};
pub use session::{SessionMode, SessionStore};
