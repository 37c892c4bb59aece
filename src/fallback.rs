use std::fmt::Debug;

use tracing::{debug, trace};

/// One source in a priority chain. The closure is only run when every
/// earlier source came up empty.
pub struct Attempt<'a, T> {
    source: &'static str,
    run: &'a dyn Fn() -> Option<T>,
}

impl<'a, T> Attempt<'a, T> {
    pub fn new(source: &'static str, run: &'a dyn Fn() -> Option<T>) -> Self {
        Self { source, run }
    }
}

/// Runs `attempts` in order and returns the first value produced.
pub fn first_of<T: Debug>(subject: &str, attempts: &[Attempt<'_, T>]) -> Option<T> {
    for attempt in attempts {
        match (attempt.run)() {
            Some(value) => {
                debug!(subject, source = attempt.source, ?value, "resolved");
                return Some(value);
            }
            None => trace!(subject, source = attempt.source, "source unavailable"),
        }
    }
    debug!(subject, "no source produced a value");
    None
}
