//! Domain normalization
//!
//! Reduces a full address (`user@example.com`), a bare domain, or an
//! `@`-prefixed domain to its canonical lowercase form. The empty string is
//! the "no domain" sentinel; it is never stored in any list.

/// Something that already knows its domain, such as a parsed address type.
pub trait DomainProvider {
    /// The domain part, if any
    fn domain(&self) -> Option<&str>;
}

/// Input accepted by resolver queries
#[derive(Clone, Copy)]
pub enum DomainInput<'a> {
    /// Raw text: an address, a bare domain or `@domain`
    Raw(&'a str),
    /// A value exposing its own domain
    Provider(&'a dyn DomainProvider),
}

impl std::fmt::Debug for DomainInput<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raw(s) => f.debug_tuple("Raw").field(s).finish(),
            Self::Provider(p) => f.debug_tuple("Provider").field(&p.domain()).finish(),
        }
    }
}

impl<'a> From<&'a str> for DomainInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Raw(value)
    }
}

impl<'a> From<&'a String> for DomainInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Raw(value.as_str())
    }
}

impl<'a, P: DomainProvider> From<&'a P> for DomainInput<'a> {
    fn from(value: &'a P) -> Self {
        Self::Provider(value)
    }
}

impl DomainInput<'_> {
    /// Resolve to a normalized domain, `None` when there is no domain
    pub fn resolve(self) -> Option<String> {
        let domain = match self {
            Self::Raw(raw) => normalize(raw),
            Self::Provider(provider) => provider.domain()?.trim().to_lowercase(),
        };

        if domain.is_empty() {
            None
        } else {
            Some(domain)
        }
    }
}

/// Normalize an address or domain
///
/// Trims, lowercases, drops a single leading `@`, then keeps whatever follows
/// the last remaining `@`, trimmed again. Returns an empty string when
/// nothing is left.
pub fn normalize(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let stripped = lowered.strip_prefix('@').unwrap_or(&lowered);

    let domain = match stripped.rsplit_once('@') {
        Some((_, domain)) => domain,
        None => stripped,
    };
    domain.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Address {
        domain: Option<String>,
    }

    impl DomainProvider for Address {
        fn domain(&self) -> Option<&str> {
            self.domain.as_deref()
        }
    }

    #[test]
    fn test_normalize_forms() {
        assert_eq!(normalize("user@TempMail.com"), "tempmail.com");
        assert_eq!(normalize("  TempMail.COM  "), "tempmail.com");
        assert_eq!(normalize("@tempmail.com"), "tempmail.com");
        assert_eq!(normalize("a@b@tempmail.com"), "tempmail.com");
        assert_eq!(normalize("user@ bad.com"), "bad.com");
        assert_eq!(normalize("@ Bad.com\t"), "bad.com");
        assert_eq!(normalize("user@   "), "");
    }

    #[test]
    fn test_normalize_empty_sentinel() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("user@"), "");
        assert_eq!(normalize("@"), "");
    }

    #[test]
    fn test_resolve_raw() {
        assert_eq!(
            DomainInput::from("User@Example.org").resolve(),
            Some("example.org".to_string())
        );
        assert_eq!(DomainInput::from("user@").resolve(), None);
        assert_eq!(DomainInput::from("").resolve(), None);
    }

    #[test]
    fn test_resolve_provider() {
        let address = Address {
            domain: Some("Example.ORG".to_string()),
        };
        assert_eq!(DomainInput::from(&address).resolve(), Some("example.org".to_string()));

        let padded = Address {
            domain: Some(" TempMail.com ".to_string()),
        };
        assert_eq!(DomainInput::from(&padded).resolve(), Some("tempmail.com".to_string()));

        let blank = Address {
            domain: Some("   ".to_string()),
        };
        assert_eq!(DomainInput::from(&blank).resolve(), None);

        let empty = Address {
            domain: Some(String::new()),
        };
        assert_eq!(DomainInput::Provider(&empty).resolve(), None);

        let missing = Address { domain: None };
        assert_eq!(DomainInput::Provider(&missing).resolve(), None);
    }

    proptest! {
        #[test]
        fn prop_normalized_has_no_at_or_uppercase(input in "[ -~]{0,40}") {
            let domain = normalize(&input);
            prop_assert!(!domain.contains('@'));
            prop_assert_eq!(domain.trim(), domain.as_str());
            prop_assert_eq!(domain.clone(), domain.to_lowercase());
        }

        #[test]
        fn prop_case_invariant(local in "[a-zA-Z0-9]{1,10}", host in "[a-zA-Z]{1,10}\\.[a-zA-Z]{2,4}") {
            let upper = format!("{}@{}", local.to_uppercase(), host.to_uppercase());
            let lower = format!("{}@{}", local.to_lowercase(), host.to_lowercase());
            prop_assert_eq!(normalize(&upper), normalize(&lower));
        }

        #[test]
        fn prop_address_matches_bare_domain(local in "[a-z0-9.]{1,10}", host in "[a-z]{1,10}\\.[a-z]{2,4}") {
            prop_assert_eq!(normalize(&format!("{}@{}", local, host)), normalize(&host));
        }
    }
}
