//! User extraction and substitution.
//!
//! Users are never fetched on their own: they are collected from issue
//! reporters, handlers and note authors, then each one is given the GitHub
//! login that stands in for it.

mod provider;

pub use provider::SubstituteProvider;

use crate::mantis::{IssueCollection, User};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Users referenced by a set of issues, keyed by Mantis user id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSet {
    users: BTreeMap<u64, User>,
}

impl UserSet {
    /// Inserts a user, replacing any previous record with the same id.
    pub fn insert(&mut self, user: User) {
        self.users.insert(user.id, user);
    }

    /// Looks up a user by id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&User> {
        self.users.get(&id)
    }

    /// Returns the substitute login for a user id, if one is attached.
    #[must_use]
    pub fn substitute_for(&self, id: u64) -> Option<&str> {
        self.get(id).and_then(User::substitute)
    }

    /// Returns the number of users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns true if there are no users.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Returns the number of users with a substitute attached.
    #[must_use]
    pub fn substituted_count(&self) -> usize {
        self.iter().filter(|user| user.substitute().is_some()).count()
    }

    /// Iterates users in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }
}

impl FromIterator<User> for UserSet {
    fn from_iter<T: IntoIterator<Item = User>>(iter: T) -> Self {
        let mut set = Self::default();
        for user in iter {
            set.insert(user);
        }
        set
    }
}

/// Collects every user referenced by `issues`.
///
/// Visits the reporter, the handler and every note author of each issue.
/// Repeated ids collapse to one record (last one wins).
#[must_use]
pub fn extract_users(issues: &IssueCollection) -> UserSet {
    let users: UserSet = issues
        .issues
        .iter()
        .flat_map(|issue| {
            std::iter::once(&issue.reporter)
                .chain(issue.handler.as_ref())
                .chain(issue.notes.iter().map(|note| &note.reporter))
        })
        .cloned()
        .collect();

    info!(count = users.len(), "Extracted users");
    users
}

/// Attaches a substitute login to every user.
///
/// Users the provider has no answer for keep an empty substitute.
pub fn resolve_substitutes<P>(users: UserSet, provider: &mut P) -> UserSet
where
    P: SubstituteProvider + ?Sized,
{
    let resolved: UserSet = users
        .users
        .into_values()
        .map(|mut user| {
            user.substitute = provider
                .substitute(&user)
                .map(|login| login.trim().to_string())
                .filter(|login| !login.is_empty());
            debug!(
                user_id = user.id,
                user = %user.name,
                substitute = user.substitute.as_deref().unwrap_or(""),
                "Resolved substitute"
            );
            user
        })
        .collect();

    info!(
        count = resolved.len(),
        substituted = resolved.substituted_count(),
        "Resolved user substitutes"
    );
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mantis::{CodeRef, Issue, Note, Project};
    use std::collections::HashMap;

    fn user(id: u64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            real_name: format!("{name} real"),
            email: format!("{name}@example.com"),
            substitute: None,
        }
    }

    fn issue(id: u64, reporter: User, handler: Option<User>, note_authors: Vec<User>) -> Issue {
        Issue {
            id,
            summary: format!("issue {id}"),
            description: String::new(),
            steps_to_reproduce: None,
            additional_information: None,
            status: CodeRef {
                id: 10,
                name: String::new(),
            },
            resolution: None,
            reporter,
            handler,
            project: Project {
                id: 1,
                name: "Core".to_string(),
            },
            notes: note_authors
                .into_iter()
                .map(|reporter| Note {
                    id: 0,
                    text: "note".to_string(),
                    reporter,
                })
                .collect(),
        }
    }

    fn sample() -> IssueCollection {
        IssueCollection {
            issues: vec![
                issue(1, user(1, "alice"), Some(user(2, "bob")), vec![user(3, "carol")]),
                issue(2, user(2, "bob"), None, vec![user(1, "alice"), user(2, "bob")]),
            ],
        }
    }

    #[test]
    fn extracts_unique_users() {
        let users = extract_users(&sample());

        let ids: Vec<u64> = users.iter().map(|user| user.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(users.get(3).unwrap().name, "carol");
    }

    #[test]
    fn extracted_count_never_exceeds_references() {
        let issues = sample();
        let references: usize = issues
            .issues
            .iter()
            .map(|issue| 1 + usize::from(issue.handler.is_some()) + issue.notes.len())
            .sum();

        assert!(extract_users(&issues).len() <= references);
    }

    #[test]
    fn empty_collection_has_no_users() {
        assert!(extract_users(&IssueCollection::default()).is_empty());
    }

    #[test]
    fn resolves_substitutes_from_map() {
        let mut answers: HashMap<u64, String> =
            HashMap::from([(1, "octocat".to_string()), (3, "  ".to_string())]);

        let users = resolve_substitutes(extract_users(&sample()), &mut answers);

        assert_eq!(users.substitute_for(1), Some("octocat"));
        assert_eq!(users.substitute_for(2), None);
        assert_eq!(users.substitute_for(3), None);
        assert_eq!(users.substituted_count(), 1);
        assert_eq!(users.len(), 3);
    }
}
