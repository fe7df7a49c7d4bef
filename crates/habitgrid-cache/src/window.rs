// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The windowed check cache.

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use habitgrid_core::date::DAYS_PER_WEEK;
use habitgrid_core::{HabitCheck, HabitStore, HabitgridError};

/// Weeks of buffer kept on each side of the display week.
const BUFFER_WEEKS: i64 = 2;

/// In-memory check cache for one habit list's calendar view.
///
/// Keeps a rolling 5-week window of checks per habit (two weeks on either
/// side of the display week) so that nearby calendar swipes are served
/// without touching the store. The window only reloads when the desired
/// range escapes the loaded one; moving the display week within the loaded
/// range just shifts the focus.
///
/// One instance belongs to one screen session. It is not shared.
pub struct CheckWindow {
    store: Arc<dyn HabitStore>,
    list_id: i64,
    loaded_range: Option<RangeInclusive<i64>>,
    focus_week_start: Option<i64>,
    checks_by_habit: HashMap<i64, Vec<HabitCheck>>,
}

impl CheckWindow {
    pub fn new(store: Arc<dyn HabitStore>, list_id: i64) -> Self {
        Self {
            store,
            list_id,
            loaded_range: None,
            focus_week_start: None,
            checks_by_habit: HashMap::new(),
        }
    }

    /// The date interval currently resident, if any load has completed.
    pub fn loaded_range(&self) -> Option<&RangeInclusive<i64>> {
        self.loaded_range.as_ref()
    }

    /// Week start the calendar is currently focused on.
    pub fn focus_week_start(&self) -> Option<i64> {
        self.focus_week_start
    }

    /// Cached checks for one habit. `None` means "not yet loaded", an empty
    /// slice means "loaded, no checks in range".
    pub fn checks_for(&self, habit_id: i64) -> Option<&[HabitCheck]> {
        self.checks_by_habit.get(&habit_id).map(Vec::as_slice)
    }

    /// Snapshot of the whole per-habit map.
    pub fn checks_by_habit(&self) -> &HashMap<i64, Vec<HabitCheck>> {
        &self.checks_by_habit
    }

    /// React to the visible calendar week moving to `display_week_start`
    /// (an epoch day, expected to be a week boundary).
    ///
    /// Fetches a 5-week window around the display week, one store query per
    /// habit, run concurrently. A habit whose fetch fails gets an explicit
    /// empty entry so the rest of the window still loads. When the desired
    /// window is already resident only the focus moves and no I/O happens;
    /// when the focus is also unchanged the call is a complete no-op.
    pub async fn load_week(&mut self, display_week_start: i64) -> Result<(), HabitgridError> {
        let desired_start = display_week_start - BUFFER_WEEKS * DAYS_PER_WEEK;
        let desired_end =
            display_week_start + BUFFER_WEEKS * DAYS_PER_WEEK + (DAYS_PER_WEEK - 1);

        let needs_reload = match &self.loaded_range {
            Some(range) => desired_start < *range.start() || desired_end > *range.end(),
            None => true,
        };
        if !needs_reload && self.focus_week_start == Some(display_week_start) {
            return Ok(());
        }

        self.focus_week_start = Some(display_week_start);
        if !needs_reload {
            return Ok(());
        }

        let habits = self.store.habits_in_list(self.list_id).await?;
        if habits.is_empty() {
            // Record the range anyway so an empty list does not reload forever.
            self.checks_by_habit = HashMap::new();
            self.loaded_range = Some(desired_start..=desired_end);
            return Ok(());
        }

        let fetches = habits.iter().map(|habit| {
            let store = self.store.clone();
            let habit_id = habit.id;
            async move {
                match store
                    .checks_by_date_range(habit_id, desired_start, desired_end)
                    .await
                {
                    Ok(checks) => (habit_id, checks),
                    Err(e) => {
                        warn!(habit_id, error = %e, "check fetch failed, caching empty entry");
                        (habit_id, Vec::new())
                    }
                }
            }
        });
        self.checks_by_habit = join_all(fetches).await.into_iter().collect();
        self.loaded_range = Some(desired_start..=desired_end);
        debug!(
            list_id = self.list_id,
            start = desired_start,
            end = desired_end,
            "check window reloaded"
        );
        Ok(())
    }

    /// Narrow refresh after a single check mutation: re-fetch only the
    /// focused week for the affected habit and replace its entry, leaving
    /// other habits and `loaded_range` alone.
    ///
    /// A mutation outside the focused week but inside the loaded window
    /// leaves that entry stale until the next full reload. Known gap,
    /// kept as-is.
    pub async fn refresh_habit(&mut self, habit_id: i64) -> Result<(), HabitgridError> {
        let Some(focus) = self.focus_week_start else {
            return Ok(());
        };
        let checks = self
            .store
            .checks_by_date_range(habit_id, focus, focus + DAYS_PER_WEEK - 1)
            .await?;
        self.checks_by_habit.insert(habit_id, checks);
        Ok(())
    }

    /// Drop one habit's cached checks after its history was cleared. No
    /// fetch; the store state is known to be empty.
    pub fn note_history_cleared(&mut self, habit_id: i64) {
        self.checks_by_habit.insert(habit_id, Vec::new());
    }
}
