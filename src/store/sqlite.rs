use std::path::Path;
use std::str::FromStr;

use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;
use tracing::info;

use super::{InvoiceStore, StoredInvoice};
use crate::config::Config;
use crate::core::{FacturaError, NormalizedInvoice, Origin};

fn storage_err(e: rusqlite::Error) -> FacturaError {
    FacturaError::Storage(e.to_string())
}

/// Single-table SQLite sink.
///
/// Amounts are stored as decimal text so they read back exactly.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FacturaError> {
        let conn = Connection::open(path.as_ref()).map_err(storage_err)?;
        info!(path = %path.as_ref().display(), "opened invoice database");
        Self::with_connection(conn)
    }

    /// Open the database named by [`Config::db_path`].
    pub fn from_config(config: &Config) -> Result<Self, FacturaError> {
        Self::open(&config.db_path)
    }

    /// A private in-memory database.
    pub fn open_in_memory() -> Result<Self, FacturaError> {
        Self::with_connection(Connection::open_in_memory().map_err(storage_err)?)
    }

    fn with_connection(conn: Connection) -> Result<Self, FacturaError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS facturas (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                uuid TEXT NOT NULL,
                origen TEXT NOT NULL,
                fecha TEXT NOT NULL,
                rfc_emisor TEXT NOT NULL,
                nombre_emisor TEXT NOT NULL,
                rfc_receptor TEXT NOT NULL,
                nombre_receptor TEXT NOT NULL,
                uso_cfdi TEXT NOT NULL,
                moneda TEXT NOT NULL,
                subtotal TEXT NOT NULL,
                impuestos TEXT NOT NULL,
                total TEXT NOT NULL,
                tipo_comprobante TEXT NOT NULL,
                version_cfdi TEXT NOT NULL,
                concepto_principal TEXT NOT NULL
            )",
            [],
        )
        .map_err(storage_err)?;
        Ok(Self { conn })
    }
}

fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn origin_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Origin> {
    let text: String = row.get(idx)?;
    Origin::from_str(&text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<StoredInvoice> {
    Ok(StoredInvoice {
        id: row.get(0)?,
        invoice: NormalizedInvoice {
            external_id: row.get(1)?,
            origin: origin_column(row, 2)?,
            issue_date: row.get(3)?,
            issuer_tax_id: row.get(4)?,
            issuer_name: row.get(5)?,
            recipient_tax_id: row.get(6)?,
            recipient_name: row.get(7)?,
            usage_code: row.get(8)?,
            currency: row.get(9)?,
            subtotal: decimal_column(row, 10)?,
            tax_amount: decimal_column(row, 11)?,
            total: decimal_column(row, 12)?,
            document_type: row.get(13)?,
            schema_version: row.get(14)?,
            primary_line_item_description: row.get(15)?,
        },
    })
}

impl InvoiceStore for SqliteStore {
    fn insert(&mut self, invoice: &NormalizedInvoice) -> Result<i64, FacturaError> {
        self.conn
            .execute(
                "INSERT INTO facturas
                (uuid, origen, fecha, rfc_emisor, nombre_emisor,
                 rfc_receptor, nombre_receptor, uso_cfdi, moneda,
                 subtotal, impuestos, total, tipo_comprobante,
                 version_cfdi, concepto_principal)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
                params![
                    invoice.external_id,
                    invoice.origin.as_str(),
                    invoice.issue_date,
                    invoice.issuer_tax_id,
                    invoice.issuer_name,
                    invoice.recipient_tax_id,
                    invoice.recipient_name,
                    invoice.usage_code,
                    invoice.currency,
                    invoice.subtotal.to_string(),
                    invoice.tax_amount.to_string(),
                    invoice.total.to_string(),
                    invoice.document_type,
                    invoice.schema_version,
                    invoice.primary_line_item_description,
                ],
            )
            .map_err(storage_err)?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list(&self) -> Result<Vec<StoredInvoice>, FacturaError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, uuid, origen, fecha, rfc_emisor, nombre_emisor,
                        rfc_receptor, nombre_receptor, uso_cfdi, moneda,
                        subtotal, impuestos, total, tipo_comprobante,
                        version_cfdi, concepto_principal
                 FROM facturas ORDER BY id",
            )
            .map_err(storage_err)?;
        let rows = stmt.query_map([], read_row).map_err(storage_err)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage_err)
    }

    fn clear(&mut self) -> Result<usize, FacturaError> {
        self.conn
            .execute("DELETE FROM facturas", [])
            .map_err(storage_err)
    }
}
