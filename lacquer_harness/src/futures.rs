// Copyright 2026 the Lacquer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Executor-free helpers for read-back futures.

use core::future::Future;
use core::pin::{Pin, pin};
use core::task::{Context, Poll, Waker};

use crate::ManualDriver;

/// Polls `future` once with a no-op waker.
///
/// Returns `Some` when the future is ready. The write path is
/// single-threaded and driven by frame pumps, so nothing ever needs a real
/// waker: pump the driver, poll again.
pub fn poll_once<F: Future + ?Sized>(future: Pin<&mut F>) -> Option<F::Output> {
    let mut cx = Context::from_waker(Waker::noop());
    match future.poll(&mut cx) {
        Poll::Ready(value) => Some(value),
        Poll::Pending => None,
    }
}

/// Drives `future` to completion, pumping `driver` whenever it parks.
///
/// # Panics
///
/// Panics if the future stays pending while no flush request is
/// outstanding — nothing would ever wake it.
pub fn drive<F: Future>(driver: &ManualDriver, future: F) -> F::Output {
    let mut future = pin!(future);
    loop {
        if let Some(value) = poll_once(future.as_mut()) {
            return value;
        }
        assert!(
            driver.run_frame(),
            "future is pending but no flush was requested"
        );
    }
}
