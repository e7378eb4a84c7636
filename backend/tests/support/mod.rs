#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use serde_json::{json, Value};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// One scheduled session as sent by the planning frontend.
pub fn term(name: &str, start: &str, finish: &str, rooms: &str) -> Value {
    json!({
        "name": name,
        "id": format!("{}-{}", name, start),
        "start": start,
        "finish": finish,
        "rooms": rooms,
    })
}

/// One break period.
pub fn year_plan_term(id: &str, start: &str, finish: &str) -> Value {
    json!({ "id": id, "start": start, "finish": finish })
}

/// A two-week winter block with a break spanning the first weekend.
pub fn semester_request() -> Value {
    json!({
        "terms": [
            term("Mathematik", "2024-01-08T08:00:00.000Z", "2024-01-08T09:30:00.000Z", "B204"),
            term("Physik", "2024-01-09T10:00:00.000Z", "2024-01-09T12:00:00.000Z", "B205"),
            term("Elektrotechnik", "2024-01-17T13:00:00.000Z", "2024-01-17T16:15:00.000Z", "Labor 3"),
            term("Englisch", "2024-01-20T08:00:00.000Z", "2024-01-20T08:45:00.000Z", ""),
        ],
        "course": {
            "name": "HF ET 23F",
            "start": "2024-01-08T00:00:00.000Z",
            "finish": "2024-01-20T00:00:00.000Z",
            "className": "Klasse A",
        },
        "yearPlanTerms": [
            year_plan_term("Sportwoche", "2024-01-12T00:00:00.000Z", "2024-01-15T00:00:00.000Z"),
        ],
    })
}
