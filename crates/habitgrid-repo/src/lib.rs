// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain repositories for Habitgrid.
//!
//! Repositories add the semantics the store does not provide: timestamp
//! bookkeeping on every mutation, blank-name validation, the
//! upsert-by-`(habit_id, date)` write path for checks, and reactive query
//! façades delivered over `tokio::sync::watch` channels.

pub mod checks;
pub mod habits;
pub mod lists;
mod watch;

pub use checks::HabitCheckRepository;
pub use habits::HabitRepository;
pub use lists::HabitListRepository;
