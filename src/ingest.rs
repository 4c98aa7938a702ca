//! Batch ingestion: detect the format of each file, extract, and hand the
//! record to the store.
//!
//! Every file yields an [`IngestOutcome`]; one bad file never stops a batch.
//!
//! ```
//! use facturas::config::Config;
//! use facturas::ingest::{IngestStatus, Ingestor};
//! use facturas::store::MemoryStore;
//!
//! let mut store = MemoryStore::new();
//! let mut ingestor = Ingestor::new(&mut store, Config::default());
//! let outcome = ingestor.ingest_bytes("a.xml", br#"<Comprobante Total="10"/>"#);
//! assert_eq!(outcome.status, IngestStatus::Stored { id: 1 });
//!
//! let outcome = ingestor.ingest_bytes("notes.txt", b"hello");
//! assert_eq!(outcome.status, IngestStatus::Failed);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cfdi;
use crate::config::Config;
use crate::core::{FacturaError, NormalizedInvoice};
use crate::pdf;
use crate::store::InvoiceStore;

/// Input format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    #[serde(rename = "XML")]
    Xml,
    #[serde(rename = "PDF")]
    Pdf,
}

impl SourceKind {
    /// `.xml` / `.pdf`, case-insensitive.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xml" => Some(Self::Xml),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn parse(&self, bytes: &[u8]) -> Result<NormalizedInvoice, FacturaError> {
        match self {
            Self::Xml => cfdi::from_cfdi_xml(bytes),
            Self::Pdf => pdf::from_pdf_bytes(bytes),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IngestStatus {
    Stored { id: i64 },
    Failed,
}

/// Result of ingesting one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOutcome {
    /// File name as given by the caller.
    pub file: String,
    /// `None` when the extension was not recognized.
    pub kind: Option<SourceKind>,
    pub status: IngestStatus,
    pub message: String,
}

impl IngestOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self.status, IngestStatus::Stored { .. })
    }
}

/// Feeds files through the extractors into a store.
pub struct Ingestor<'s, S: InvoiceStore> {
    store: &'s mut S,
    config: Config,
}

impl<'s, S: InvoiceStore> Ingestor<'s, S> {
    pub fn new(store: &'s mut S, config: Config) -> Self {
        Self { store, config }
    }

    /// Read and ingest a file from disk.
    pub fn ingest_file(&mut self, path: impl AsRef<Path>) -> IngestOutcome {
        let path = path.as_ref();
        let file = path.display().to_string();
        let kind = SourceKind::from_path(path);
        let result = self.read_limited(path).and_then(|bytes| self.store_bytes(path, &bytes));
        self.outcome(file, kind, result)
    }

    /// Ingest in-memory content; `name` decides the format.
    pub fn ingest_bytes(&mut self, name: &str, bytes: &[u8]) -> IngestOutcome {
        let kind = SourceKind::from_path(name);
        let result = self
            .check_size(bytes.len() as u64)
            .and_then(|()| self.store_bytes(Path::new(name), bytes));
        self.outcome(name.to_string(), kind, result)
    }

    /// Ingest every path in order.
    pub fn ingest_batch<P: AsRef<Path>>(
        &mut self,
        paths: impl IntoIterator<Item = P>,
    ) -> Vec<IngestOutcome> {
        let outcomes: Vec<_> = paths.into_iter().map(|p| self.ingest_file(p)).collect();
        let stored = outcomes.iter().filter(|o| o.is_stored()).count();
        info!(
            files = outcomes.len(),
            stored,
            failed = outcomes.len() - stored,
            "batch ingested"
        );
        outcomes
    }

    fn check_size(&self, size: u64) -> Result<(), FacturaError> {
        if size > self.config.max_file_bytes {
            return Err(FacturaError::InputTooLarge {
                size,
                limit: self.config.max_file_bytes,
            });
        }
        Ok(())
    }

    fn read_limited(&self, path: &Path) -> Result<Vec<u8>, FacturaError> {
        self.check_size(std::fs::metadata(path)?.len())?;
        Ok(std::fs::read(path)?)
    }

    fn store_bytes(&mut self, path: &Path, bytes: &[u8]) -> Result<i64, FacturaError> {
        let kind = SourceKind::from_path(path)
            .ok_or_else(|| FacturaError::UnsupportedFormat(path.display().to_string()))?;
        let invoice = kind.parse(bytes)?;
        self.store.insert(&invoice)
    }

    fn outcome(
        &self,
        file: String,
        kind: Option<SourceKind>,
        result: Result<i64, FacturaError>,
    ) -> IngestOutcome {
        match result {
            Ok(id) => {
                info!(file = %file, id, "invoice stored");
                IngestOutcome {
                    file,
                    kind,
                    status: IngestStatus::Stored { id },
                    message: "invoice stored".to_string(),
                }
            }
            Err(e) => {
                warn!(file = %file, error = %e, "invoice not ingested");
                IngestOutcome {
                    file,
                    kind,
                    status: IngestStatus::Failed,
                    message: e.to_string(),
                }
            }
        }
    }
}
