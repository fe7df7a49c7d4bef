// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for CRUD operations on the habit entities.

pub mod checks;
pub mod habits;
pub mod lists;
pub mod users;
