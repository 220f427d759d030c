//! Mapping collections through fallible functions.

use tracing::debug;

use crate::Outcome;

/// Map `items` through `f`, stopping at the first `Err`.
///
/// Items are visited left to right. If every call returns `Ok`, the values
/// are collected in input order. Otherwise the first `Err` is returned and
/// `f` is never called on the items after it.
///
/// ```
/// use unexceptional::{Outcome, map_while};
///
/// let doubled: Outcome<Vec<i32>, String> = map_while([1, 2, 3, 4], |n| Outcome::ok(n * 2));
/// assert_eq!(doubled, Outcome::ok(vec![2, 4, 6, 8]));
///
/// let halted: Outcome<Vec<i32>, String> = map_while([1, 2, 3], |n| {
///     Outcome::check(n != 2, format!("{n} is invalid")).map(|()| n * 2)
/// });
/// assert_eq!(halted, Outcome::err("2 is invalid".to_owned()));
/// ```
pub fn map_while<I, U, E, F>(items: I, mut f: F) -> Outcome<Vec<U>, E>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Outcome<U, E>,
{
    let mut mapped = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        match f(item) {
            Outcome::Ok(value) => mapped.push(value),
            Outcome::Err(error) => {
                debug!(index, "map_while aborted");
                return Outcome::Err(error);
            }
        }
    }
    Outcome::Ok(mapped)
}

impl<U, E> Outcome<Vec<U>, E> {
    /// Associated form of [`map_while`].
    pub fn map_while<I, F>(items: I, f: F) -> Self
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Outcome<U, E>,
    {
        map_while(items, f)
    }
}
