// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Observable fetch state.
//!
//! One logical fetch runs through the sequence `Loading` then exactly one of
//! `Success` or `Failed`. [`spawn_fetch`] drives a fetch future on a
//! background task and publishes that sequence over a watch channel;
//! [`FetchTask`] is the observer-side handle. Re-invoking a fetch operation
//! starts a fresh, independent sequence.

use std::future::Future;

use log::debug;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::either::FetchResult;
use crate::failure::Failure;

/// Observable progress of one logical fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    /// Fetch in progress.
    Loading,
    /// Terminal: the fetch produced a value.
    Success(T),
    /// Terminal: the fetch failed.
    Failed(Failure),
}

impl<T> FetchState<T> {
    /// Whether this state ends the fetch sequence.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, FetchState::Loading)
    }
}

/// Handle to a fetch running in a background task.
///
/// The handle observes the state sequence and can cancel the fetch. A
/// cancelled fetch emits no terminal state; its subscribers observe the
/// channel closing instead. Dropping the handle cancels the fetch.
pub struct FetchTask<T> {
    state_rx: watch::Receiver<FetchState<T>>,
    cancel_token: CancellationToken,
}

impl<T> std::fmt::Debug for FetchTask<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchTask")
            .field("cancel_token", &self.cancel_token)
            .finish_non_exhaustive()
    }
}

impl<T: Clone> FetchTask<T> {
    /// Snapshot of the most recently emitted state.
    #[must_use]
    pub fn state(&self) -> FetchState<T> {
        self.state_rx.borrow().clone()
    }

    /// Wait for the next emission.
    ///
    /// Returns `false` once no further emission can arrive (the fetch
    /// completed and its state was already observed, or it was cancelled).
    pub async fn changed(&mut self) -> bool {
        self.state_rx.changed().await.is_ok()
    }

    /// An independent receiver for this fetch's state sequence.
    ///
    /// A subscriber that attaches late observes the last emitted state and
    /// everything after it; there is no replay of earlier emissions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state_rx.clone()
    }

    /// Cancel the fetch.
    ///
    /// No terminal state is emitted for a fetch cancelled before
    /// completion; cancellation is not a domain failure.
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    /// Consume the handle and wait for the terminal state.
    ///
    /// Returns `None` if the fetch was cancelled before completion.
    pub async fn wait_terminal(mut self) -> Option<FetchState<T>> {
        loop {
            {
                let state = self.state_rx.borrow_and_update();
                if state.is_terminal() {
                    return Some(state.clone());
                }
            }

            if self.state_rx.changed().await.is_err() {
                return None;
            }
        }
    }
}

impl<T> Drop for FetchTask<T> {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

/// Spawn a fetch future and publish its state sequence.
///
/// `Loading` is emitted when the fetch starts (it is the channel's first
/// value), and the future's [`FetchResult`] is folded into exactly one
/// terminal emission. Must be called from within a Tokio runtime.
pub fn spawn_fetch<T, F>(future: F) -> FetchTask<T>
where
    T: Clone + Send + Sync + 'static,
    F: Future<Output = FetchResult<T>> + Send + 'static,
{
    let (state_tx, state_rx) = watch::channel(FetchState::Loading);
    let cancel_token = CancellationToken::new();

    let task_cancel = cancel_token.clone();

    tokio::spawn(async move {
        tokio::select! {
            () = task_cancel.cancelled() => {
                debug!("Fetch cancelled before completion");
            }
            result = future => {
                let state = result.fold(FetchState::Failed, FetchState::Success);
                let _ = state_tx.send(state);
            }
        }
    });

    FetchTask {
        state_rx,
        cancel_token,
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::oneshot;
    use tokio::time::{timeout, Duration};

    use super::*;
    use crate::either::Either;

    // Holds the fetch future open until the test releases it, so the
    // Loading state can be observed without racing the spawned task.
    fn gated_fetch(value: u32) -> (oneshot::Sender<()>, FetchTask<u32>) {
        let (gate_tx, gate_rx) = oneshot::channel();
        let task = spawn_fetch(async move {
            let _ = gate_rx.await;
            Either::right(value)
        });
        (gate_tx, task)
    }

    #[tokio::test]
    async fn test_fetch_emits_loading_then_success() {
        let (gate, mut task) = gated_fetch(7);

        assert_eq!(task.state(), FetchState::Loading);

        gate.send(()).unwrap();
        assert!(task.changed().await);
        assert_eq!(task.state(), FetchState::Success(7));

        // The sequence has ended; no further emission arrives.
        assert!(!task.changed().await);
    }

    #[tokio::test]
    async fn test_fetch_emits_loading_then_failed() {
        let mut task =
            spawn_fetch(async { Either::<Failure, u32>::left(Failure::NetworkConnection) });

        // The initial value is Loading even if the task already finished;
        // changed() then surfaces the terminal state.
        if task.state() == FetchState::Loading {
            assert!(task.changed().await);
        }
        assert_eq!(task.state(), FetchState::Failed(Failure::NetworkConnection));
    }

    #[tokio::test]
    async fn test_refetch_sequences_are_independent() {
        let (first_gate, first) = gated_fetch(1);
        let (second_gate, second) = gated_fetch(2);

        first_gate.send(()).unwrap();
        second_gate.send(()).unwrap();

        let first_terminal = first.wait_terminal().await;
        let second_terminal = second.wait_terminal().await;

        assert_eq!(first_terminal, Some(FetchState::Success(1)));
        assert_eq!(second_terminal, Some(FetchState::Success(2)));
    }

    #[tokio::test]
    async fn test_cancel_emits_no_terminal() {
        let (_gate, mut task) = gated_fetch(7);

        task.cancel();

        // The channel closes without a terminal emission.
        assert!(!task.changed().await);
        assert_eq!(task.state(), FetchState::Loading);
    }

    #[tokio::test]
    async fn test_wait_terminal_returns_none_when_cancelled() {
        let (_gate, task) = gated_fetch(7);

        task.cancel();

        let terminal = timeout(Duration::from_secs(1), task.wait_terminal())
            .await
            .expect("wait_terminal must resolve after cancellation");
        assert_eq!(terminal, None);
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_last_state() {
        let (gate, task) = gated_fetch(7);

        gate.send(()).unwrap();

        let mut subscriber = task.subscribe();
        // Wait until the terminal value is visible to the subscriber.
        while !subscriber.borrow_and_update().is_terminal() {
            if subscriber.changed().await.is_err() {
                break;
            }
        }

        assert_eq!(*subscriber.borrow(), FetchState::Success(7));
    }
}
