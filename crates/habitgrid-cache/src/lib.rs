// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Windowed in-memory check cache.
//!
//! Calendar screens swipe between adjacent weeks far more often than they
//! jump. [`CheckWindow`] exploits that by keeping a 5-week window of check
//! data per habit resident in memory and only going back to the store when
//! the window no longer covers the desired range.

pub mod window;

pub use window::CheckWindow;
