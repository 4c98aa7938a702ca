use super::{InvoiceStore, StoredInvoice};
use crate::core::{FacturaError, NormalizedInvoice};

/// Vec-backed store. Ids start at 1 and are never reused, even after
/// [`clear`](InvoiceStore::clear).
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Vec<StoredInvoice>,
    last_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl InvoiceStore for MemoryStore {
    fn insert(&mut self, invoice: &NormalizedInvoice) -> Result<i64, FacturaError> {
        self.last_id += 1;
        self.rows.push(StoredInvoice {
            id: self.last_id,
            invoice: invoice.clone(),
        });
        Ok(self.last_id)
    }

    fn list(&self) -> Result<Vec<StoredInvoice>, FacturaError> {
        Ok(self.rows.clone())
    }

    fn clear(&mut self) -> Result<usize, FacturaError> {
        let removed = self.rows.len();
        self.rows.clear();
        Ok(removed)
    }
}
