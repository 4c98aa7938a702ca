//! Storage sinks for normalized invoices.
//!
//! Extraction and reporting never reach for a global database handle; the
//! sink is passed in as an [`InvoiceStore`]. [`MemoryStore`] is always
//! available, `SqliteStore` is behind the `sqlite` feature.

mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

use serde::{Deserialize, Serialize};

use crate::core::{FacturaError, NormalizedInvoice};

/// An invoice together with the surrogate key its store assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredInvoice {
    pub id: i64,
    #[serde(flatten)]
    pub invoice: NormalizedInvoice,
}

/// Insert/query interface of an invoice sink.
///
/// No uniqueness is enforced: inserting the same record twice stores it
/// twice under two ids.
pub trait InvoiceStore {
    /// Persist `invoice` and return its new id.
    fn insert(&mut self, invoice: &NormalizedInvoice) -> Result<i64, FacturaError>;

    /// All stored invoices in insertion order.
    fn list(&self) -> Result<Vec<StoredInvoice>, FacturaError>;

    /// Delete every invoice, returning how many were removed.
    fn clear(&mut self) -> Result<usize, FacturaError>;

    /// Just the records, without ids.
    fn invoices(&self) -> Result<Vec<NormalizedInvoice>, FacturaError> {
        Ok(self.list()?.into_iter().map(|s| s.invoice).collect())
    }
}
