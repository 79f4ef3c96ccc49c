//! Timestamp-derived identifiers

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Hands out `<prefix>-<unix millis>` ids.
///
/// Values never repeat within a process: a second request in the same
/// millisecond (or after the clock steps back) takes the next value.
#[derive(Debug)]
pub struct IdGenerator {
    prefix: &'static str,
    last: AtomicI64,
}

impl IdGenerator {
    pub const fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            last: AtomicI64::new(0),
        }
    }

    /// Next unique id
    pub fn next_id(&self) -> String {
        format!("{}-{}", self.prefix, self.next_millis())
    }

    fn next_millis(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}
