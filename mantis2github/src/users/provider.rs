//! Sources of substitute logins.

use crate::mantis::User;
use std::collections::{BTreeMap, HashMap};

/// Supplies the GitHub login that stands in for a Mantis user.
///
/// Implemented by batch mappings keyed by Mantis user id, and by interactive
/// front-ends that ask an operator.
pub trait SubstituteProvider {
    /// Returns the login for `user`, or `None` to leave it unsubstituted.
    fn substitute(&mut self, user: &User) -> Option<String>;
}

impl SubstituteProvider for HashMap<u64, String> {
    fn substitute(&mut self, user: &User) -> Option<String> {
        self.get(&user.id).cloned()
    }
}

impl SubstituteProvider for BTreeMap<u64, String> {
    fn substitute(&mut self, user: &User) -> Option<String> {
        self.get(&user.id).cloned()
    }
}
