//! Magic variables (`{{TOKEN}}`).
//!
//! The vocabulary is fixed. Date and time values come from a [`Clock`], the
//! site name from a [`SiteEnvironment`]; both are injected so rendering never
//! reads ambient global state directly.

use chrono::{Local, NaiveDateTime};
use memchr::memmem;

use crate::verbatim::PLACEHOLDER;

/// Source of the current date and time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Source of the serving site's name.
pub trait SiteEnvironment: Send + Sync {
    fn site_name(&self) -> Option<String>;
}

/// Reads the host name from `HTTP_HOST`, falling back to `HOSTNAME`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostEnvironment;

impl SiteEnvironment for HostEnvironment {
    fn site_name(&self) -> Option<String> {
        std::env::var("HTTP_HOST")
            .or_else(|_| std::env::var("HOSTNAME"))
            .ok()
    }
}

/// A fixed site name.
#[derive(Debug, Clone, Default)]
pub struct StaticSite(pub String);

impl SiteEnvironment for StaticSite {
    fn site_name(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Resolve one variable token. Unknown tokens resolve to the empty string.
pub fn resolve(token: &str, title: &str, clock: &dyn Clock, site: &dyn SiteEnvironment) -> String {
    let now = || clock.now();
    match token {
        "CURRENTMONTH" => now().format("%m").to_string(),
        "CURRENTMONTHNAME" | "CURRENTMONTHNAMEGEN" => now().format("%B").to_string(),
        "CURRENTDAY" => now().format("%d").to_string(),
        "CURRENTDAYNAME" => now().format("%A").to_string(),
        "CURRENTYEAR" => now().format("%Y").to_string(),
        "CURRENTTIME" => now().format("%H:%M").to_string(),
        "NUMBEROFARTICLES" => "0".to_string(),
        "PAGENAME" => title.to_string(),
        "NAMESPACE" => "None".to_string(),
        "SITENAME" => site.site_name().unwrap_or_default(),
        _ => String::new(),
    }
}

/// Substitute every `{{TOKEN}}` in `line`.
///
/// The token runs to the first `}`, which must be doubled; surrounding
/// whitespace inside the braces is ignored. Braces around a verbatim
/// placeholder stay as written.
pub fn apply(line: &str, title: &str, clock: &dyn Clock, site: &dyn SiteEnvironment) -> String {
    let bytes = line.as_bytes();
    let mut out = String::with_capacity(line.len());
    let mut copied = 0;
    let mut pos = 0;

    while let Some(found) = memmem::find(&bytes[pos..], b"{{") {
        let open = pos + found;
        let body_start = open + 2;
        let Some(close) = memchr::memchr(b'}', &bytes[body_start..]).map(|c| body_start + c)
        else {
            break;
        };
        if bytes.get(close + 1) != Some(&b'}') {
            pos = open + 1;
            continue;
        }
        let body = &line[body_start..close];
        if body.contains(PLACEHOLDER) {
            // Verbatim text is never a token name; keep the braces as text.
            pos = close + 2;
            continue;
        }
        out.push_str(&line[copied..open]);
        out.push_str(&resolve(body.trim(), title, clock, site));
        copied = close + 2;
        pos = copied;
    }

    out.push_str(&line[copied..]);
    out
}
