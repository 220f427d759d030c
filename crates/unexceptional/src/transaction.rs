//! Running a step inside an externally supplied transaction.
//!
//! The crate owns no storage. A [`TransactionFacility`] adapter wraps
//! whatever connection or session provides atomic writes, in the same way a
//! Diesel connection exposes `transaction(|conn| ..)`. [`transaction`] opens
//! the boundary, hands the facility to the step so it can write through it,
//! and commits or rolls back depending on the step's [`Outcome`].

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error};

use crate::Outcome;
use crate::error::{ContractViolation, TransactionError};

/// Port for the transaction boundary used by [`transaction`].
///
/// Implementations must undo every write made since `begin` when
/// `rollback` is called, and must not touch values returned by the step.
pub trait TransactionFacility {
    /// Error raised when the boundary itself fails.
    type Error: std::error::Error + 'static;

    /// Return `false` if the facility cannot open transactions at all, for
    /// example because it was never connected.
    fn is_available(&self) -> bool {
        true
    }

    /// Open a transaction.
    ///
    /// # Errors
    ///
    /// Returns the facility's error if the transaction cannot be opened.
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Make every write since `begin` permanent.
    ///
    /// # Errors
    ///
    /// Returns the facility's error if the commit fails.
    fn commit(&mut self) -> Result<(), Self::Error>;

    /// Discard every write since `begin`.
    ///
    /// # Errors
    ///
    /// Returns the facility's error if the rollback fails.
    fn rollback(&mut self) -> Result<(), Self::Error>;
}

/// Run `step` inside a transaction on `facility`.
///
/// An `Ok` outcome commits. An `Err` outcome rolls back every write the
/// step made, and the same `Err` is still returned to the caller. If the
/// step panics, the transaction is rolled back before the panic resumes.
///
/// # Errors
///
/// Returns [`TransactionError`] when the facility fails to begin, commit,
/// or roll back. A failed rollback returns
/// [`TransactionError::Rollback`] holding the step's error unchanged.
///
/// # Panics
///
/// Panics with [`ContractViolation::NoTransactionFacility`] if
/// `facility.is_available()` is `false`. The step is not invoked.
#[track_caller]
pub fn transaction<X, T, E, F>(
    facility: &mut X,
    step: F,
) -> Result<Outcome<T, E>, TransactionError<X::Error, E>>
where
    X: TransactionFacility + ?Sized,
    E: fmt::Debug,
    F: FnOnce(&mut X) -> Outcome<T, E>,
{
    if !facility.is_available() {
        ContractViolation::NoTransactionFacility.raise();
    }

    facility.begin().map_err(TransactionError::Begin)?;
    debug!("transaction started");

    let outcome = match panic::catch_unwind(AssertUnwindSafe(|| step(&mut *facility))) {
        Ok(outcome) => outcome,
        Err(payload) => {
            if let Err(error) = facility.rollback() {
                error!(%error, "rollback after panic failed");
            }
            panic::resume_unwind(payload);
        }
    };

    match outcome {
        Outcome::Ok(value) => {
            facility.commit().map_err(TransactionError::Commit)?;
            debug!("transaction committed");
            Ok(Outcome::Ok(value))
        }
        Outcome::Err(domain_error) => match facility.rollback() {
            Ok(()) => {
                debug!("transaction rolled back");
                Ok(Outcome::Err(domain_error))
            }
            Err(source) => {
                error!(error = %source, "rollback failed");
                Err(TransactionError::Rollback {
                    domain_error,
                    source,
                })
            }
        },
    }
}

impl<T, E> Outcome<T, E> {
    /// Associated form of [`transaction`].
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError`] under the same conditions as
    /// [`transaction`].
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`transaction`].
    #[track_caller]
    pub fn transaction<X, F>(
        facility: &mut X,
        step: F,
    ) -> Result<Self, TransactionError<X::Error, E>>
    where
        X: TransactionFacility + ?Sized,
        E: fmt::Debug,
        F: FnOnce(&mut X) -> Self,
    {
        transaction(facility, step)
    }
}
