use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

/// Resolves `[name]` links that are not declared in the document.
///
/// The returned spec uses the declaration syntax (`url` or `url "title"`).
/// Returning `None` leaves the brackets as plain text. Implementations are
/// called any number of times per parse and must answer consistently.
pub trait LinkResolver {
    fn resolve(&self, name: &str) -> Option<String>;
}

impl<F> LinkResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, name: &str) -> Option<String> {
        self(name)
    }
}

impl<S: BuildHasher> LinkResolver for HashMap<String, String, S> {
    fn resolve(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl LinkResolver for BTreeMap<String, String> {
    fn resolve(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLinks;

impl LinkResolver for NoLinks {
    fn resolve(&self, _name: &str) -> Option<String> {
        None
    }
}
