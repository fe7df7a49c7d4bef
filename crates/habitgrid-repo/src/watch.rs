// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reactive query plumbing.
//!
//! A watched query is a spawned task that holds the write side of a
//! `tokio::sync::watch` channel, runs the query once up front, and re-runs
//! it whenever the store's change bus announces a mutation to one of the
//! tables the query depends on. Dropping the receiver is the unsubscribe:
//! the task notices `tx.closed()` and exits.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::{broadcast, watch};
use tracing::warn;

use habitgrid_core::{HabitStore, HabitgridError, StoreTable};

/// Spawn a query task bound to `tables` and hand back its watch receiver.
///
/// The receiver starts at `T::default()` and is updated with the first
/// query result as soon as the task runs. A lagged broadcast receiver
/// re-runs the query unconditionally since the missed events may have
/// included a relevant table.
pub(crate) fn watch_query<T, F>(
    store: Arc<dyn HabitStore>,
    tables: &'static [StoreTable],
    query: F,
) -> watch::Receiver<T>
where
    T: Default + Send + Sync + 'static,
    F: Fn(Arc<dyn HabitStore>) -> BoxFuture<'static, Result<T, HabitgridError>>
        + Send
        + Sync
        + 'static,
{
    let (tx, rx) = watch::channel(T::default());
    let mut changes = store.subscribe();

    tokio::spawn(async move {
        match query(store.clone()).await {
            Ok(value) => {
                let _ = tx.send(value);
            }
            Err(e) => warn!(error = %e, "initial watched query failed"),
        }

        loop {
            tokio::select! {
                _ = tx.closed() => break,
                event = changes.recv() => {
                    let rerun = match event {
                        Ok(table) => tables.contains(&table),
                        Err(broadcast::error::RecvError::Lagged(missed)) => {
                            warn!(missed, "change bus lagged, re-running watched query");
                            true
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    };
                    if rerun {
                        match query(store.clone()).await {
                            Ok(value) => {
                                let _ = tx.send(value);
                            }
                            Err(e) => warn!(error = %e, "watched query refresh failed"),
                        }
                    }
                }
            }
        }
    });

    rx
}
