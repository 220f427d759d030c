//! Per-run scratch space shared by the steps of one pipeline.
//!
//! Every call to [`attempt`](crate::attempt) or
//! [`Pipeline::run`](crate::Pipeline::run) creates a fresh [`Scope`], lends it
//! to each step in turn, and drops it when the run ends. Nothing is installed
//! on caller-owned objects, so runs never observe each other's values.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use crate::Outcome;

/// Named intermediate values recorded by pipeline steps.
///
/// Values are stored by name and read back with their concrete type:
///
/// ```
/// use unexceptional::{Outcome, Pipeline, Scope};
///
/// let total: Outcome<i32, String> = Pipeline::start(|scope: &mut Scope| scope.set("a", Outcome::ok(2)))
///     .then_in_scope(|scope| {
///         let a = scope.get::<i32>("a").copied().unwrap_or_default();
///         scope.set("b", Outcome::ok(a * 3))
///     })
///     .then_in_scope(|scope| Outcome::ok(scope.get::<i32>("b").copied().unwrap_or_default() * 4))
///     .run();
///
/// assert_eq!(total, Outcome::ok(24));
/// ```
pub struct Scope {
    values: HashMap<String, Box<dyn Any>>,
}

impl Scope {
    pub(crate) fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Record the value of an `Ok` outcome under `name` and return the outcome.
    ///
    /// An `Err` outcome records nothing. Either way the outcome comes back
    /// unchanged, so a step can end with `scope.set("name", outcome)`.
    /// Recording a name twice replaces the earlier value.
    pub fn set<V, E>(&mut self, name: &str, outcome: Outcome<V, E>) -> Outcome<V, E>
    where
        V: Clone + 'static,
    {
        if let Some(value) = outcome.value() {
            self.values.insert(name.to_owned(), Box::new(value.clone()));
        }
        outcome
    }

    /// Borrow the value recorded under `name`.
    ///
    /// Returns `None` if nothing was recorded or the value is not a `V`.
    #[must_use]
    pub fn get<V>(&self, name: &str) -> Option<&V>
    where
        V: 'static,
    {
        self.values
            .get(name)
            .and_then(|value| value.downcast_ref::<V>())
    }

    /// Return `true` if a value is recorded under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of recorded names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Scope")
            .field("names", &names)
            .finish_non_exhaustive()
    }
}
