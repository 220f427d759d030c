//! Sequential pipelines that stop at the first failure.
//!
//! Two entry points share the same semantics:
//!
//! - [`attempt`] runs a list of [`Step`]s that all produce the same value
//!   type. Each step is either nullary or unary, so the runner never needs
//!   to inspect a closure to decide whether to pass the previous value.
//! - [`Pipeline`] is a typed builder whose steps may change the value type
//!   from one step to the next. It cannot be empty by construction.
//!
//! Both lend a fresh [`Scope`] to every step and drop it when the run ends.
//! Steps that want to pass several values forward can return a tuple and
//! destructure it in the next closure's parameters.

use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::error::ContractViolation;
use crate::{Outcome, Scope};

type NullaryFn<'a, T, E> = Box<dyn FnOnce(&mut Scope) -> Outcome<T, E> + 'a>;
type UnaryFn<'a, T, E> = Box<dyn FnOnce(T, &mut Scope) -> Outcome<T, E> + 'a>;

/// One step of an [`attempt`] run.
pub enum Step<'a, T, E> {
    /// A step that ignores the previous value.
    Nullary(NullaryFn<'a, T, E>),
    /// A step that receives the previous step's `Ok` value.
    Unary(UnaryFn<'a, T, E>),
}

impl<'a, T, E> Step<'a, T, E> {
    /// Wrap a closure that ignores the previous value.
    #[must_use]
    pub fn nullary(step: impl FnOnce(&mut Scope) -> Outcome<T, E> + 'a) -> Self {
        Self::Nullary(Box::new(step))
    }

    /// Wrap a closure that receives the previous value.
    #[must_use]
    pub fn unary(step: impl FnOnce(T, &mut Scope) -> Outcome<T, E> + 'a) -> Self {
        Self::Unary(Box::new(step))
    }
}

impl<T, E> fmt::Debug for Step<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nullary(_) => f.write_str("Step::Nullary"),
            Self::Unary(_) => f.write_str("Step::Unary"),
        }
    }
}

/// Run `steps` in order, threading each `Ok` value into the next step.
///
/// The first step is invoked without input. Every later step is invoked
/// only if the previous one returned `Ok`: a [`Step::Unary`] step receives
/// that value, a [`Step::Nullary`] step does not. The first `Err` ends the
/// run and is returned as-is; the remaining steps are dropped unrun.
///
/// ```
/// use unexceptional::{Outcome, Step, attempt};
///
/// let result: Outcome<i32, &str> = attempt([
///     Step::nullary(|_| Outcome::ok(2)),
///     Step::unary(|value, _| Outcome::ok(value * 3)),
///     Step::unary(|value, _| Outcome::ok(value - 1)),
/// ]);
///
/// assert_eq!(result, Outcome::ok(5));
/// ```
///
/// # Panics
///
/// Panics with [`ContractViolation::EmptyPipeline`] if `steps` is empty, and
/// with [`ContractViolation::FirstStepNeedsInput`] if the first step is
/// unary. Neither case invokes any step.
#[track_caller]
pub fn attempt<'a, T, E>(steps: impl IntoIterator<Item = Step<'a, T, E>>) -> Outcome<T, E> {
    let mut remaining = steps.into_iter();
    let Some(first) = remaining.next() else {
        ContractViolation::EmptyPipeline.raise()
    };
    let Step::Nullary(first_step) = first else {
        ContractViolation::FirstStepNeedsInput.raise()
    };

    let mut scope = Scope::new();
    let outcome = run_steps(first_step, remaining, &mut scope);
    debug!(ok = outcome.is_ok(), scoped_values = scope.len(), "pipeline finished");
    outcome
}

fn run_steps<'a, T, E>(
    first: NullaryFn<'a, T, E>,
    remaining: impl Iterator<Item = Step<'a, T, E>>,
    scope: &mut Scope,
) -> Outcome<T, E> {
    let mut current = first(scope);
    record_step(0, &current);

    for (index, step) in (1_usize..).zip(remaining) {
        let value = match current {
            Outcome::Ok(value) => value,
            Outcome::Err(error) => return Outcome::Err(error),
        };
        current = match step {
            Step::Nullary(run) => run(scope),
            Step::Unary(run) => run(value, scope),
        };
        record_step(index, &current);
    }
    current
}

/// Log the outcome of the step at `index`, and the abort if it failed.
fn record_step<T, E>(index: usize, outcome: &Outcome<T, E>) {
    debug!(step = index, ok = outcome.is_ok(), "pipeline step finished");
    if outcome.is_err() {
        debug!(step = index, "pipeline aborted");
    }
}

/// A typed pipeline whose value type may change between steps.
///
/// ```
/// use unexceptional::{Outcome, Pipeline};
///
/// let sum: Outcome<i32, String> = Pipeline::start(|_| Outcome::ok((1, 2)))
///     .then(|(a, b), _| Outcome::ok(a + b))
///     .run();
///
/// assert_eq!(sum, Outcome::ok(3));
/// ```
#[must_use = "a pipeline does nothing until `run` is called"]
pub struct Pipeline<F, T, E> {
    run: F,
    steps: usize,
    output: PhantomData<fn() -> Outcome<T, E>>,
}

impl<F, T, E> Pipeline<F, T, E>
where
    F: FnOnce(&mut Scope) -> Outcome<T, E>,
{
    const fn assemble(run: F, steps: usize) -> Self {
        Self {
            run,
            steps,
            output: PhantomData,
        }
    }

    /// Begin a pipeline with a step that takes no input.
    pub fn start(first: F) -> Pipeline<impl FnOnce(&mut Scope) -> Outcome<T, E>, T, E> {
        Pipeline::assemble(
            move |scope: &mut Scope| {
                let outcome = first(scope);
                record_step(0, &outcome);
                outcome
            },
            1,
        )
    }

    /// Append a step that receives the previous `Ok` value.
    pub fn then<U, G>(self, next: G) -> Pipeline<impl FnOnce(&mut Scope) -> Outcome<U, E>, U, E>
    where
        G: FnOnce(T, &mut Scope) -> Outcome<U, E>,
    {
        let previous = self.run;
        let index = self.steps;
        Pipeline::assemble(
            move |scope: &mut Scope| match previous(scope) {
                Outcome::Ok(value) => {
                    let outcome = next(value, scope);
                    record_step(index, &outcome);
                    outcome
                }
                Outcome::Err(error) => Outcome::Err(error),
            },
            index + 1,
        )
    }

    /// Append a step that ignores the previous value and reads the scope.
    pub fn then_in_scope<U, G>(
        self,
        next: G,
    ) -> Pipeline<impl FnOnce(&mut Scope) -> Outcome<U, E>, U, E>
    where
        G: FnOnce(&mut Scope) -> Outcome<U, E>,
    {
        self.then(move |_, scope| next(scope))
    }

    /// Run every step with a fresh scope and return the final outcome.
    pub fn run(self) -> Outcome<T, E> {
        let mut scope = Scope::new();
        let outcome = (self.run)(&mut scope);
        debug!(ok = outcome.is_ok(), scoped_values = scope.len(), "pipeline finished");
        outcome
    }
}

impl<F, T, E> fmt::Debug for Pipeline<F, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

impl<T, E> Outcome<T, E> {
    /// Associated form of [`attempt`].
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`attempt`].
    #[track_caller]
    pub fn attempt<'a>(steps: impl IntoIterator<Item = Step<'a, T, E>>) -> Self {
        attempt(steps)
    }
}
