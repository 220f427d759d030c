//! Error types for the unexceptional crate.
//!
//! Domain failures travel by value inside
//! [`Outcome::Err`](crate::Outcome::Err). This module holds the two kinds of
//! failure that sit outside the domain, following the project's error
//! handling conventions with `thiserror`:
//!
//! - [`ContractViolation`] describes misuse by the calling code. These are
//!   raised as panics and are never turned back into an `Outcome`.
//! - [`TransactionError`] reports that the external transaction facility
//!   itself failed to begin, commit, or roll back. A failed rollback hands
//!   back the step's domain error alongside the facility's.

use std::fmt;

use thiserror::Error;
use tracing::error;

/// Programmer errors detected by the combinators.
///
/// Every variant is fatal. The combinators log the violation at `error`
/// level and then panic with its `Display` message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// `unwrap` was called on an `Err` outcome.
    #[error("called `unwrap` on an err outcome: {error}")]
    UnwrapOnErr {
        /// Debug rendering of the wrapped error.
        error: String,
    },

    /// `unwrap_err` was called on an `Ok` outcome.
    #[error("called `unwrap_err` on an ok outcome: {value}")]
    UnwrapErrOnOk {
        /// Debug rendering of the wrapped value.
        value: String,
    },

    /// A pipeline was run without any steps.
    #[error("a pipeline needs at least one step")]
    EmptyPipeline,

    /// The first step of a pipeline expects an input value, but nothing
    /// precedes it.
    #[error("the first pipeline step cannot take an input value")]
    FirstStepNeedsInput,

    /// A transaction was requested from a facility that is not available.
    #[error("no transaction facility is available")]
    NoTransactionFacility,
}

impl ContractViolation {
    /// Log the violation and panic with its message.
    #[track_caller]
    pub(crate) fn raise(self) -> ! {
        error!(violation = %self, "contract violation");
        panic!("{self}");
    }
}

/// Failures reported by a [`TransactionFacility`](crate::TransactionFacility).
///
/// `E` is the facility's own error and `D` is the domain error type of the
/// step. These describe the transaction boundary only: a domain `Err` is
/// carried through untouched when the rollback that follows it fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError<E, D>
where
    E: std::error::Error + 'static,
    D: fmt::Debug,
{
    /// The transaction could not be started.
    #[error("failed to begin transaction")]
    Begin(#[source] E),

    /// The transaction could not be committed after an `Ok` outcome.
    #[error("failed to commit transaction")]
    Commit(#[source] E),

    /// The transaction could not be rolled back after an `Err` outcome.
    #[error("failed to roll back transaction")]
    Rollback {
        /// The error returned by the step, unchanged.
        domain_error: D,
        /// Why the rollback failed.
        #[source]
        source: E,
    },
}

impl<E, D> TransactionError<E, D>
where
    E: std::error::Error + 'static,
    D: fmt::Debug,
{
    /// Return the step's domain error if the failure happened during
    /// rollback.
    #[must_use]
    pub fn into_domain_error(self) -> Option<D> {
        match self {
            Self::Rollback { domain_error, .. } => Some(domain_error),
            Self::Begin(_) | Self::Commit(_) => None,
        }
    }
}
