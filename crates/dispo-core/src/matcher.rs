//! Subdomain matching
//!
//! A listed domain also covers all of its subdomains, so `a.b.tempmail.com`
//! matches a stored `tempmail.com`. The walk stops at the last two labels:
//! a bare top-level label such as `com` is never looked up on its own.

use crate::store::DomainSet;

/// Check whether `domain` or one of its parent domains is in `set`
///
/// Suffixes are tested from most to least specific. A domain without a dot
/// never matches.
pub fn domain_in_list(domain: &str, set: &DomainSet) -> bool {
    let labels = domain.split('.').count();
    if labels < 2 {
        return false;
    }

    // Each step drops the leftmost label; `labels - 1` suffixes in total.
    let mut current = domain;
    for _ in 0..labels - 1 {
        if set.contains(current) {
            return true;
        }
        match current.find('.') {
            Some(pos) => current = &current[pos + 1..],
            None => break,
        }
    }

    false
}
