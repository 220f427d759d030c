//! The `Outcome` container and its single-value combinators.
//!
//! An [`Outcome`] is either `Ok(value)` or `Err(error)`. Combinators consume
//! the outcome and return a new one, so an outcome is never changed in place.
//! The multi-step combinators live in their own modules and are re-exported
//! here as associated functions for call sites that prefer
//! `Outcome::map_while(..)` over the free function.

use std::fmt;

use crate::error::ContractViolation;

/// An explicit success-or-failure value.
///
/// # Examples
///
/// ```
/// use unexceptional::Outcome;
///
/// let parsed: Outcome<u8, &str> = Outcome::ok(7);
/// let doubled = parsed.map(|value| value * 2);
///
/// assert!(doubled.is_ok());
/// assert_eq!(doubled.unwrap(), 14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[must_use = "this `Outcome` may be an `Err`, which should be handled"]
pub enum Outcome<T, E> {
    /// Success, carrying the value.
    Ok(T),
    /// Failure, carrying the domain error.
    Err(E),
}

impl<E> Outcome<(), E> {
    /// Build a successful outcome that carries no value.
    pub const fn unit() -> Self {
        Self::Ok(())
    }

    /// Return [`Outcome::unit`] when `condition` holds, otherwise wrap `error`.
    ///
    /// ```
    /// use unexceptional::Outcome;
    ///
    /// assert_eq!(Outcome::check(true, "too short"), Outcome::unit());
    /// assert_eq!(Outcome::check(false, "too short"), Outcome::err("too short"));
    /// ```
    pub fn check(condition: bool, error: E) -> Self {
        if condition {
            Self::Ok(())
        } else {
            Self::Err(error)
        }
    }
}

impl<T, E> Outcome<T, E> {
    /// Build a successful outcome.
    pub const fn ok(value: T) -> Self {
        Self::Ok(value)
    }

    /// Build a failed outcome.
    pub const fn err(error: E) -> Self {
        Self::Err(error)
    }

    /// Return `true` if this outcome is `Ok`.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Return `true` if this outcome is `Err`.
    #[must_use]
    pub const fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    /// Borrow the success value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Err(_) => None,
        }
    }

    /// Borrow the error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&E> {
        match self {
            Self::Ok(_) => None,
            Self::Err(error) => Some(error),
        }
    }

    /// Return the success value.
    ///
    /// Only call this after checking [`Outcome::is_ok`]; reaching it with an
    /// `Err` is a bug in the caller.
    ///
    /// # Panics
    ///
    /// Panics with [`ContractViolation::UnwrapOnErr`] if the outcome is
    /// `Err`. The panic message includes the `Debug` form of the error.
    #[track_caller]
    pub fn unwrap(self) -> T
    where
        E: fmt::Debug,
    {
        match self {
            Self::Ok(value) => value,
            Self::Err(error) => ContractViolation::UnwrapOnErr {
                error: format!("{error:?}"),
            }
            .raise(),
        }
    }

    /// Return the error.
    ///
    /// # Panics
    ///
    /// Panics with [`ContractViolation::UnwrapErrOnOk`] if the outcome is
    /// `Ok`. The panic message includes the `Debug` form of the value.
    #[track_caller]
    pub fn unwrap_err(self) -> E
    where
        T: fmt::Debug,
    {
        match self {
            Self::Ok(value) => ContractViolation::UnwrapErrOnOk {
                value: format!("{value:?}"),
            }
            .raise(),
            Self::Err(error) => error,
        }
    }

    /// Run `f` on the value when `Ok`, then hand back the outcome untouched.
    pub fn on_ok(self, f: impl FnOnce(&T)) -> Self {
        if let Self::Ok(value) = &self {
            f(value);
        }
        self
    }

    /// Run `f` on the error when `Err`, then hand back the outcome untouched.
    pub fn on_err(self, f: impl FnOnce(&E)) -> Self {
        if let Self::Err(error) = &self {
            f(error);
        }
        self
    }

    /// Continue with `next` when `Ok`; pass an `Err` through.
    ///
    /// The current value is dropped. `next` captures whatever state it needs.
    /// Use [`Outcome::and_then_with`] to receive the value instead.
    ///
    /// ```
    /// use unexceptional::Outcome;
    ///
    /// let failed: Outcome<u8, &str> = Outcome::err("uh-oh");
    /// let chained = failed.and_then(|| -> Outcome<u8, &str> {
    ///     unreachable!("never runs after an err")
    /// });
    /// assert_eq!(chained, Outcome::err("uh-oh"));
    /// ```
    pub fn and_then<U>(self, next: impl FnOnce() -> Outcome<U, E>) -> Outcome<U, E> {
        match self {
            Self::Ok(_) => next(),
            Self::Err(error) => Outcome::Err(error),
        }
    }

    /// Replace an `Ok` outcome with `next`; pass an `Err` through.
    pub fn and<U>(self, next: Outcome<U, E>) -> Outcome<U, E> {
        match self {
            Self::Ok(_) => next,
            Self::Err(error) => Outcome::Err(error),
        }
    }

    /// Discard an `Ok` value, leaving [`Outcome::unit`]; pass an `Err` through.
    pub fn and_ok(self) -> Outcome<(), E> {
        self.and(Outcome::unit())
    }

    /// Continue with `next`, feeding it the current value, when `Ok`.
    pub fn and_then_with<U>(self, next: impl FnOnce(T) -> Outcome<U, E>) -> Outcome<U, E> {
        match self {
            Self::Ok(value) => next(value),
            Self::Err(error) => Outcome::Err(error),
        }
    }

    /// Transform the success value, leaving an `Err` untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U, E> {
        match self {
            Self::Ok(value) => Outcome::Ok(f(value)),
            Self::Err(error) => Outcome::Err(error),
        }
    }

    /// Transform the error, leaving an `Ok` untouched.
    pub fn map_err<F>(self, f: impl FnOnce(E) -> F) -> Outcome<T, F> {
        match self {
            Self::Ok(value) => Outcome::Ok(value),
            Self::Err(error) => Outcome::Err(f(error)),
        }
    }

    /// Convert into a standard [`Result`] for use with `?`.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Err(error) => Err(error),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(error) => Self::Err(error),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.into_result()
    }
}
