use super::tree::Element;
use super::{CFDI_V3_NS, CFDI_V4_NS, ROOT_ELEMENT};

/// One way of matching a child element by local name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lookup {
    /// Local name in the given namespace.
    Qualified(&'static str),
    /// Local name with no namespace at all.
    Unqualified,
    /// Local name in any namespace, or none.
    AnyNamespace,
}

impl Lookup {
    fn matches(self, element: &Element, local_name: &str) -> bool {
        if element.local_name != local_name {
            return false;
        }
        match self {
            Self::Qualified(ns) => element.namespace.as_deref() == Some(ns),
            Self::Unqualified => element.namespace.is_none(),
            Self::AnyNamespace => true,
        }
    }
}

const QUALIFIED_FIRST: &[Lookup] = &[
    Lookup::Qualified(CFDI_V4_NS),
    Lookup::Qualified(CFDI_V3_NS),
    Lookup::Unqualified,
];

const UNQUALIFIED_ONLY: &[Lookup] = &[Lookup::Unqualified];

/// Ordered lookup strategies; the first strategy that finds a child wins.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LookupChain {
    strategies: &'static [Lookup],
}

impl LookupChain {
    /// Namespace-qualified lookups first when the root is a `Comprobante`,
    /// unqualified lookups only otherwise.
    pub fn for_root(root: &Element) -> Self {
        let strategies = if root.local_name == ROOT_ELEMENT {
            QUALIFIED_FIRST
        } else {
            UNQUALIFIED_ONLY
        };
        Self { strategies }
    }

    #[cfg(test)]
    pub fn strategies(&self) -> &'static [Lookup] {
        self.strategies
    }

    pub fn child<'e>(&self, parent: &'e Element, local_name: &str) -> Option<&'e Element> {
        self.strategies.iter().find_map(|strategy| {
            parent
                .children
                .iter()
                .find(|c| strategy.matches(c, local_name))
        })
    }

    /// Follow `path` one step at a time, applying the chain at every step.
    pub fn path<'e>(&self, parent: &'e Element, path: &[&str]) -> Option<&'e Element> {
        path.iter()
            .try_fold(parent, |node, name| self.child(node, name))
    }
}

/// Find a direct child by local name regardless of namespace.
pub(crate) fn any_child<'e>(parent: &'e Element, local_name: &str) -> Option<&'e Element> {
    parent
        .children
        .iter()
        .find(|c| Lookup::AnyNamespace.matches(c, local_name))
}
