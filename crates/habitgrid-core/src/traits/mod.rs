// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the Habitgrid persistence seam.
//!
//! Traits here use `#[async_trait]` so implementations can be held behind
//! `Arc<dyn …>` by repositories and the auth service.

pub mod storage;

pub use storage::HabitStore;
