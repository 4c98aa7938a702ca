#![cfg(all(feature = "ingest", feature = "report"))]

use std::path::{Path, PathBuf};

use facturas::config::{Config, ConfigBuilder};
use facturas::ingest::{IngestStatus, Ingestor, SourceKind};
use facturas::report;
use facturas::store::{InvoiceStore, MemoryStore};
use rust_decimal_macros::dec;

const XML_MARCH: &str = r#"<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4"
    Version="4.0" Folio="1" Fecha="2024-03-10T10:00:00" SubTotal="100" Total="116">
  <cfdi:Emisor Rfc="AAA010101AAA" Nombre="ACME"/>
  <cfdi:Impuestos><cfdi:Traslados><cfdi:Traslado Importe="16"/></cfdi:Traslados></cfdi:Impuestos>
</cfdi:Comprobante>"#;

const XML_APRIL: &str = r#"<Comprobante Version="4.0" Folio="2" Fecha="2024-04-02" SubTotal="50" Total="58">
  <Emisor Rfc="BBB010101BBB" Nombre="Beta"/>
  <Impuestos><Traslados><Traslado Importe="8"/></Traslados></Impuestos>
</Comprobante>"#;

fn text_pdf(lines: &[&str]) -> Vec<u8> {
    use lopdf::{Document, Object, Stream, dictionary};

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => Object::Reference(font_id),
        },
    });
    let mut content = String::new();
    for (i, line) in lines.iter().enumerate() {
        let y = 780 - 20 * i as i64;
        content.push_str(&format!("BT /F1 12 Tf 50 {y} Td ({line}) Tj ET\n"));
    }
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => Object::Reference(pages_id),
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        "Contents" => Object::Reference(content_id),
        "Resources" => Object::Reference(resources_id),
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut output = Vec::new();
    doc.save_to(&mut output).expect("save test PDF");
    output
}

fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn mixed_batch_continues_past_failures() {
    let dir = tempfile::tempdir().unwrap();
    let paths = vec![
        write(dir.path(), "marzo.xml", XML_MARCH.as_bytes()),
        write(dir.path(), "roto.xml", b"<Comprobante SubTotal=\"abc\"/>"),
        write(dir.path(), "abril.XML", XML_APRIL.as_bytes()),
        write(
            dir.path(),
            "ticket.pdf",
            &text_pdf(&["Empresa: Papeleria", "RFC: CCC010101CCC", "Fecha: 05/04/2024", "Total: 1,000.00"]),
        ),
        write(dir.path(), "vacio.pdf", &text_pdf(&["Sin datos"])),
        write(dir.path(), "notas.txt", b"hola"),
        dir.path().join("no-existe.xml"),
    ];

    let mut store = MemoryStore::new();
    let outcomes = Ingestor::new(&mut store, Config::default()).ingest_batch(&paths);

    let statuses: Vec<_> = outcomes.iter().map(|o| o.status).collect();
    assert_eq!(
        statuses,
        vec![
            IngestStatus::Stored { id: 1 },
            IngestStatus::Failed,
            IngestStatus::Stored { id: 2 },
            IngestStatus::Stored { id: 3 },
            IngestStatus::Failed,
            IngestStatus::Failed,
            IngestStatus::Failed,
        ]
    );

    assert_eq!(outcomes[1].message, "invalid amount in SubTotal: 'abc'");
    assert_eq!(outcomes[4].message, "no recognizable data found in PDF");
    assert_eq!(outcomes[5].kind, None);
    assert!(outcomes[5].message.starts_with("unsupported file format"));
    assert_eq!(outcomes[6].kind, Some(SourceKind::Xml));
    assert!(outcomes[6].message.starts_with("I/O error"));

    let invoices = store.invoices().unwrap();
    assert_eq!(invoices.len(), 3);
    assert_eq!(invoices[2].issuer_name, "Papeleria");
    assert_eq!(invoices[2].issue_date, "2024-04-05");

    let rep = report::build_report(&invoices);
    assert_eq!(rep.summary.invoice_count, 3);
    assert_eq!(rep.summary.total_amount, dec!(1174));
    assert_eq!(rep.summary.total_tax, dec!(24));
    assert_eq!(rep.summary.distinct_issuers, 3);
    assert_eq!(rep.by_year[&2024], dec!(1174));

    let months: Vec<String> = rep.by_month.keys().map(|m| m.to_string()).collect();
    assert_eq!(months, vec!["2024-03", "2024-04"]);
    assert_eq!(rep.by_issuer["CCC010101CCC"], dec!(1000));
}

#[test]
fn oversize_file_is_not_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "grande.xml", XML_MARCH.as_bytes());

    let mut store = MemoryStore::new();
    let config = ConfigBuilder::new().max_file_bytes(16).build();
    let outcome = Ingestor::new(&mut store, config).ingest_file(&path);

    assert_eq!(outcome.status, IngestStatus::Failed);
    assert!(outcome.message.contains("exceeds the limit of 16 bytes"));
    assert!(store.is_empty());
}

#[test]
fn same_file_twice_is_stored_twice() {
    let mut store = MemoryStore::new();
    let mut ingestor = Ingestor::new(&mut store, Config::default());
    let a = ingestor.ingest_bytes("a.xml", XML_MARCH.as_bytes());
    let b = ingestor.ingest_bytes("a.xml", XML_MARCH.as_bytes());

    assert_eq!(a.status, IngestStatus::Stored { id: 1 });
    assert_eq!(b.status, IngestStatus::Stored { id: 2 });
    assert_eq!(store.len(), 2);
}

#[test]
fn hostile_inputs_fail_per_file() {
    let depth = 200_000;
    let deep = format!("<Comprobante>{}{}</Comprobante>", "<a>".repeat(depth), "</a>".repeat(depth));
    let overflow = r#"<Comprobante><Impuestos><Traslados>
        <Traslado Importe="79228162514264337593543950335"/>
        <Traslado Importe="79228162514264337593543950335"/>
    </Traslados></Impuestos></Comprobante>"#;

    let mut store = MemoryStore::new();
    let mut ingestor = Ingestor::new(&mut store, Config::default());
    let outcomes = [
        ingestor.ingest_bytes("profundo.xml", deep.as_bytes()),
        ingestor.ingest_bytes("impuestos.xml", overflow.as_bytes()),
        ingestor.ingest_bytes("ticket.pdf", &text_pdf(&["Empresa: Foo", "Total: 1,250.50."])),
        ingestor.ingest_bytes("marzo.xml", XML_MARCH.as_bytes()),
    ];

    assert_eq!(outcomes[0].message, "invalid XML: nesting too deep");
    assert_eq!(outcomes[1].message, "invalid amount in Importe: '79228162514264337593543950335'");
    assert_eq!(outcomes[2].message, "invalid amount in Total: '1,250.50.'");
    assert_eq!(outcomes[3].status, IngestStatus::Stored { id: 1 });
    assert_eq!(store.len(), 1);
}
