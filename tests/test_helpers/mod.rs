//! Shared clock, environment, and fixture helpers for integration tests.

use std::env;
use std::ffi::OsString;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use taskgate::task::{
    adapters::memory::InMemoryTaskRepository, domain::TaskDate, services::TaskLifecycleService,
};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Service type backed by the in-memory store and a controllable clock.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, ManualClock>;

/// Clock that only moves when a test advances it.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock reading mid-morning UTC on `year-month-day`.
    ///
    /// # Panics
    ///
    /// Panics when the parts do not form a valid date.
    #[must_use]
    pub fn at(year: i32, month: u32, day: u32) -> Self {
        let now = Utc
            .with_ymd_and_hms(year, month, day, 9, 0, 0)
            .single()
            .expect("valid clock start");
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock forward by whole days.
    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += Duration::days(days);
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builds a service over an empty in-memory store with a clock at
/// 2024-01-05.
#[must_use]
pub fn service_at_jan_fifth() -> (TestTaskService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::at(2024, 1, 5));
    let service = TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::clone(&clock),
    );
    (service, clock)
}

/// Builds a [`TaskDate`] from calendar parts.
///
/// # Panics
///
/// Panics when the parts do not form a valid date.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> TaskDate {
    TaskDate::from_naive(NaiveDate::from_ymd_opt(year, month, day).expect("valid date"))
}

/// Guard that applies scoped environment variable changes.
///
/// A `None` value removes the variable. Previous values come back on drop.
pub struct EnvVarGuard {
    previous: Vec<(OsString, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Applies `changes` while holding the process-wide environment lock.
    pub fn set_many(changes: &[(OsString, Option<OsString>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut previous = Vec::with_capacity(changes.len());

        for (key, value) in changes {
            previous.push((key.clone(), env::var_os(key)));
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(new_value) => env::set_var(key, new_value),
                    None => env::remove_var(key),
                }
            }
        }

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(previous) => env::set_var(&key, &previous),
                    None => env::remove_var(&key),
                }
            }
        }
    }
}
