//! Checks the `tracing` events emitted by pipelines and transactions.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

mod support;

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use support::MemoryStore;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use unexceptional::{Outcome, Pipeline, Step, TransactionFacility, attempt, map_while, transaction};

/// Shared buffer that collects formatted log lines.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer lock").clone();
        String::from_utf8(bytes).expect("logs are UTF-8")
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture(run: impl FnOnce()) -> String {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("unexceptional=debug"))
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, run);
    logs.contents()
}

#[test]
fn pipeline_abort_is_logged_with_the_failing_step() {
    let output = capture(|| {
        let _result: Outcome<i32, &str> = attempt([
            Step::nullary(|_| Outcome::ok(1)),
            Step::unary(|_, _| Outcome::err("stop")),
            Step::unary(|value, _| Outcome::ok(value)),
        ]);
    });

    assert!(output.contains("pipeline aborted step=1"), "logs: {output}");
    assert!(
        output.contains("pipeline step finished step=0 ok=true"),
        "logs: {output}"
    );
}

#[test]
fn failing_last_step_is_logged_as_an_abort() {
    let output = capture(|| {
        let _result: Outcome<i32, &str> = attempt([
            Step::nullary(|_| Outcome::ok(1)),
            Step::unary(|value, _| Outcome::ok(value + 1)),
            Step::unary(|_, _| Outcome::err("last")),
        ]);
    });

    assert!(output.contains("pipeline aborted step=2"), "logs: {output}");
}

#[test]
fn typed_pipeline_logs_the_same_events_as_attempt() {
    let output = capture(|| {
        let _result: Outcome<i32, &str> = Pipeline::start(|_| Outcome::ok(1))
            .then(|_, _| Outcome::<i32, &str>::err("stop"))
            .then(|value, _| Outcome::ok(value))
            .run();
    });

    assert!(
        output.contains("pipeline step finished step=0 ok=true"),
        "logs: {output}"
    );
    assert!(
        output.contains("pipeline step finished step=1 ok=false"),
        "logs: {output}"
    );
    assert!(output.contains("pipeline aborted step=1"), "logs: {output}");
    assert!(!output.contains("step=2"), "logs: {output}");
    assert!(output.contains("pipeline finished"), "logs: {output}");
}

#[test]
fn map_while_abort_is_logged_with_the_item_index() {
    let output = capture(|| {
        let _result: Outcome<Vec<i32>, i32> =
            map_while([4, 5, -6], |n| Outcome::check(n > 0, n).map(|()| n));
    });

    assert!(output.contains("map_while aborted index=2"), "logs: {output}");
}

#[test]
fn transaction_rollback_is_logged() {
    let output = capture(|| {
        let mut store = MemoryStore::default();
        let _result = transaction(&mut store, |_| Outcome::<(), &str>::err("Uh-oh"));
    });

    assert!(output.contains("transaction started"), "logs: {output}");
    assert!(output.contains("transaction rolled back"), "logs: {output}");
}

#[test]
fn contract_violations_are_logged_before_panicking() {
    let output = capture(|| {
        let unwound = panic::catch_unwind(AssertUnwindSafe(|| {
            Outcome::<i32, &str>::err("boom").unwrap()
        }));
        assert!(unwound.is_err());
    });

    assert!(output.contains("contract violation"), "logs: {output}");
    assert!(output.contains("ERROR"), "logs: {output}");
}

#[test]
fn failed_rollback_after_a_panic_is_logged_as_an_error() {
    let output = capture(|| {
        let mut store = MemoryStore::default();
        let unwound = panic::catch_unwind(AssertUnwindSafe(|| {
            transaction(&mut store, |tx| -> Outcome<(), &str> {
                tx.rollback().expect("inner rollback succeeds");
                panic!("step exploded after closing the transaction");
            })
        }));
        assert!(unwound.is_err());
    });

    assert!(output.contains("ERROR"), "logs: {output}");
    assert!(output.contains("rollback after panic failed"), "logs: {output}");
}
