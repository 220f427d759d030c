//! Explicit, exception-free error propagation.
//!
//! Domain failures are values. An [`Outcome`] is either `Ok(value)` or
//! `Err(error)`, and a handful of combinators compose outcomes without ever
//! unwinding:
//!
//! - [`attempt`] and [`Pipeline`] run steps in order, feeding each `Ok`
//!   value to the next step and stopping at the first `Err`.
//! - [`map_while`] maps a collection and stops at the first `Err`.
//! - [`Outcome::and_then`] chains a single follow-up step.
//! - [`transaction`] runs a step inside a [`TransactionFacility`] and rolls
//!   back when the step fails.
//!
//! Misuse of the API, such as unwrapping an `Err` or running an empty
//! pipeline, is a bug rather than a runtime condition. Those cases panic
//! with a [`ContractViolation`] message.
//!
//! # Example
//!
//! ```
//! use unexceptional::{Outcome, Step, attempt};
//!
//! #[derive(Debug, PartialEq)]
//! enum SignupError {
//!     NameTaken,
//! }
//!
//! let result: Outcome<u32, SignupError> = attempt([
//!     Step::nullary(|_| Outcome::ok(2)),
//!     Step::unary(|id, _| Outcome::check(id != 2, SignupError::NameTaken).map(|()| id)),
//!     Step::unary(|_, _| unreachable!("the pipeline stops after the first err")),
//! ]);
//!
//! assert_eq!(result, Outcome::err(SignupError::NameTaken));
//! ```
//!
//! # Logging
//!
//! The combinators emit `tracing` events at `debug` level when a pipeline
//! finishes or aborts and when a transaction commits or rolls back. Every
//! contract violation is logged at `error` level before the panic. Install
//! a subscriber in the host to see them.

mod collection;
mod error;
mod outcome;
mod pipeline;
mod scope;
mod transaction;

pub use collection::map_while;
pub use error::{ContractViolation, TransactionError};
pub use outcome::Outcome;
pub use pipeline::{Pipeline, Step, attempt};
pub use scope::Scope;
pub use transaction::{TransactionFacility, transaction};
