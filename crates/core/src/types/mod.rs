//! Core types for TableTap.
//!
//! This module provides type-safe wrappers for common domain concepts and
//! the wire DTOs exchanged between the server and the ordering client.

pub mod customer;
pub mod email;
pub mod id;
pub mod menu;
pub mod price;
pub mod status;
pub mod table;

pub use customer::{AuthResponse, Customer, ProfilePatch};
pub use email::{Email, EmailError};
pub use id::*;
pub use menu::{
    MenuCategory, MenuItem, MenuPayload, MenuResponse, ModifierGroup, ModifierOption, Pagination,
};
pub use price::{Price, PriceError};
pub use status::*;
pub use table::{QrCodeData, Table, TableContext};
