//! PDF invoice extraction.
//!
//! PDFs carry no reliable structure, so extraction is best-effort: text is
//! pulled from every page, a fixed set of labelled patterns is searched,
//! and every field that is not found falls back to a generic default. A
//! document is only rejected when neither a company name nor a non-zero
//! total turns up.
//!
//! | Label | Field |
//! |-------|-------|
//! | `Empresa:` | issuer name (rest of the line) |
//! | `RFC:` | issuer RFC (12–13 alphanumerics) |
//! | `Fecha:` | issue date, `YYYY-MM-DD` or `DD/MM/YYYY` |
//! | `Total:` | total, `,` thousands separators allowed |

mod fields;
mod parse;
mod text;

pub use fields::{PdfFields, extract_fields};
pub use parse::{from_pdf_bytes, from_pdf_file, from_pdf_text, from_pdf_text_at};
pub use text::extract_text;
