//! Various missing batteries for Rust

use std::{fmt, ops::Deref, str::FromStr};

/// Struct that runs the specified closure in its [`Drop`](Drop) impl
struct Guard<F: FnOnce()>(Option<F>);

impl<F: FnOnce()> Drop for Guard<F> {
    fn drop(&mut self) {
        if let Some(f) = self.0.take() {
            f()
        }
    }
}

/// Returns a struct which runs the specified closure in its [`Drop`](Drop) impl
pub fn on_drop<F: FnOnce()>(f: F) -> impl Drop {
    Guard(Some(f))
}

/// Returns a struct which prints execution time info in its [`Drop`](Drop) impl.
///  It logs the inital call as well.
pub fn debug_time_it(label: &'static str) -> impl Drop {
    time_it(log::Level::Debug, label)
}

/// Same as [`debug_time_it`], but with a custom log level
pub fn time_it(level: log::Level, label: &'static str) -> impl Drop {
    let start = std::time::Instant::now();
    log::log!(level, "{}: started", label);
    on_drop(move || log::log!(level, "{}: {:?}", label, start.elapsed()))
}

/// String that contains at least one non-whitespace character.
/// Meant to be used as a cli argument type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonHollowString(String);

impl NonHollowString {
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for NonHollowString {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or_else(|| "the value must contain non-whitespace characters".to_owned())
    }
}

impl Deref for NonHollowString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonHollowString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
