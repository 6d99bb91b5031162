use crate::caip::{is_caip_chain_id, is_caip_namespace};

/// The components of a scope string.
///
/// A chain id yields both `namespace` and `reference`, a bare namespace only `namespace`, and
/// anything else neither.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParsedScope<'a> {
    pub namespace: Option<&'a str>,
    pub reference: Option<&'a str>,
}

impl<'a> ParsedScope<'a> {
    pub fn is_namespace(&self) -> bool {
        self.namespace.is_some() && self.reference.is_none()
    }

    pub fn is_chain_id(&self) -> bool {
        self.namespace.is_some() && self.reference.is_some()
    }

    /// Neither a namespace nor a chain id.
    pub fn is_empty(&self) -> bool {
        self.namespace.is_none()
    }
}

/// Parses a scope string into its namespace and reference.
///
/// Never fails: invalid input yields an empty [`ParsedScope`].
pub fn parse_scope_string(scope: &str) -> ParsedScope<'_> {
    if is_caip_namespace(scope) {
        return ParsedScope { namespace: Some(scope), reference: None };
    }
    if is_caip_chain_id(scope) {
        if let Some((namespace, reference)) = scope.split_once(':') {
            return ParsedScope { namespace: Some(namespace), reference: Some(reference) };
        }
    }
    ParsedScope::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_namespace() {
        let parsed = parse_scope_string("eip155");
        assert_eq!(parsed, ParsedScope { namespace: Some("eip155"), reference: None });
        assert!(parsed.is_namespace());
    }

    #[test]
    fn parses_chain_id() {
        let parsed = parse_scope_string("eip155:1");
        assert_eq!(parsed, ParsedScope { namespace: Some("eip155"), reference: Some("1") });
        assert!(parsed.is_chain_id());

        let parsed = parse_scope_string("wallet:eip155");
        assert_eq!(parsed.namespace, Some("wallet"));
        assert_eq!(parsed.reference, Some("eip155"));
    }

    #[test]
    fn rejects_everything_else() {
        for scope in ["", "a", "eip155:", ":1", "eip155:1:0xdead", "EIP155", "eip 155"] {
            assert!(parse_scope_string(scope).is_empty(), "{scope}");
        }
    }

    proptest! {
        #[test]
        fn classification_is_total(scope in ".{0,48}") {
            let parsed = parse_scope_string(&scope);
            // a reference never appears without a namespace
            prop_assert!(!(parsed.namespace.is_none() && parsed.reference.is_some()));
            let kinds = [parsed.is_namespace(), parsed.is_chain_id(), parsed.is_empty()];
            prop_assert_eq!(kinds.iter().filter(|k| **k).count(), 1);
        }

        #[test]
        fn chain_ids_round_trip(ns in "[-a-z0-9]{3,8}", reference in "[-_a-zA-Z0-9]{1,32}") {
            let scope = format!("{ns}:{reference}");
            let parsed = parse_scope_string(&scope);
            prop_assert_eq!(parsed.namespace, Some(ns.as_str()));
            prop_assert_eq!(parsed.reference, Some(reference.as_str()));
        }
    }
}
