//! Core invoice record, builder, errors and shared helpers.
//!
//! Both extractors produce a [`NormalizedInvoice`] through the
//! [`NormalizedInvoiceBuilder`], which starts from the defaults of the
//! record's [`Origin`].

pub mod amount;
mod builder;
pub mod date;
mod error;
mod types;

pub use builder::*;
pub use error::*;
pub use types::*;
