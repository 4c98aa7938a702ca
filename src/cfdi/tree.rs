use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};

use crate::core::FacturaError;

/// An XML element with its namespace resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Element {
    /// Resolved namespace URI, `None` when the element is in no namespace.
    pub namespace: Option<String>,
    pub local_name: String,
    /// Attributes by local name. Namespace declarations are not kept.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn open(namespace: Option<String>, start: &BytesStart<'_>) -> Result<Self, FacturaError> {
        let local_name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| FacturaError::Xml(format!("bad attribute: {e}")))?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| FacturaError::Xml(format!("bad value for attribute {key}: {e}")))?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            namespace,
            local_name,
            attributes,
            children: Vec::new(),
        })
    }
}

fn resolved_namespace(ns: ResolveResult<'_>) -> Result<Option<String>, FacturaError> {
    match ns {
        ResolveResult::Bound(Namespace(uri)) => Ok(Some(String::from_utf8_lossy(uri).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(FacturaError::Xml(format!(
            "unbound namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

/// Deepest element nesting accepted. Bounds the recursion of building and
/// dropping an [`Element`] tree.
pub(crate) const MAX_DEPTH: usize = 256;

/// Parse a complete document into its root element.
///
/// Fails on syntax errors, mismatched or unclosed tags, unbound prefixes,
/// nesting deeper than [`MAX_DEPTH`], a missing root, or a second
/// top-level element.
pub(crate) fn parse_document(xml: &[u8]) -> Result<Element, FacturaError> {
    let mut reader = NsReader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader
            .read_resolved_event_into(&mut buf)
            .map_err(|e| FacturaError::Xml(e.to_string()))?
        {
            (ns, Event::Start(e)) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(FacturaError::Xml("nesting too deep".into()));
                }
                let element = Element::open(resolved_namespace(ns)?, &e)?;
                if stack.is_empty() && root.is_some() {
                    return Err(FacturaError::Xml(format!(
                        "unexpected element <{}> after the document root",
                        element.local_name
                    )));
                }
                stack.push(element);
            }
            (ns, Event::Empty(e)) => {
                let element = Element::open(resolved_namespace(ns)?, &e)?;
                attach(&mut stack, &mut root, element)?;
            }
            (_, Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| FacturaError::Xml("unexpected closing tag".into()))?;
                attach(&mut stack, &mut root, element)?;
            }
            (_, Event::Eof) => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(FacturaError::Xml(format!(
            "unexpected end of document: <{}> is not closed",
            open.local_name
        )));
    }
    root.ok_or_else(|| FacturaError::Xml("no root element found".into()))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), FacturaError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(FacturaError::Xml(format!(
                "unexpected element <{}> after the document root",
                element.local_name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_prefixed_and_default_namespaces() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4" Total="1">
  <cfdi:Emisor Rfc="AAA010101AAA"/>
  <Otro xmlns="urn:otro"><Hijo/></Otro>
</cfdi:Comprobante>"#;
        let root = parse_document(xml).unwrap();

        assert_eq!(root.local_name, "Comprobante");
        assert_eq!(root.namespace.as_deref(), Some("http://www.sat.gob.mx/cfd/4"));
        assert_eq!(root.attr("Total"), Some("1"));
        assert_eq!(root.attributes.len(), 1, "xmlns declarations are dropped");

        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].attr("Rfc"), Some("AAA010101AAA"));
        assert_eq!(root.children[1].namespace.as_deref(), Some("urn:otro"));
        assert_eq!(root.children[1].children[0].namespace.as_deref(), Some("urn:otro"));
    }

    #[test]
    fn unescapes_attribute_values() {
        let root = parse_document(br#"<a Nombre="Foo &amp; Bar"/>"#).unwrap();
        assert_eq!(root.attr("Nombre"), Some("Foo & Bar"));
        assert!(root.namespace.is_none());
    }

    #[test]
    fn nesting_limit() {
        let nested = |depth: usize| {
            let mut xml = "<a>".repeat(depth);
            xml.push_str(&"</a>".repeat(depth));
            xml
        };

        assert!(parse_document(nested(MAX_DEPTH).as_bytes()).is_ok());

        let err = parse_document(nested(MAX_DEPTH + 1).as_bytes()).unwrap_err();
        assert!(matches!(err, FacturaError::Xml(ref m) if m == "nesting too deep"));

        let err = parse_document(nested(200_000).as_bytes()).unwrap_err();
        assert!(matches!(err, FacturaError::Xml(_)));
    }

    #[test]
    fn rejects_malformed_documents() {
        for xml in [
            &b""[..],
            b"<a><b></a>",
            b"<a>",
            b"<a/><b/>",
            b"<x:a/>",
            b"not xml at all",
        ] {
            let err = parse_document(xml).unwrap_err();
            assert!(
                matches!(err, FacturaError::Xml(_)),
                "expected XML error for {:?}, got {err:?}",
                String::from_utf8_lossy(xml)
            );
        }
    }
}
