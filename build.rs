//! Stamps the `anima --version` string with the build date and time.
//!
//! `ANIMA_BUILD_DATE` / `ANIMA_BUILD_TIME` in the environment take
//! precedence, which keeps release builds reproducible.

use time::{format_description, OffsetDateTime};

const DATE_ENV: &str = "ANIMA_BUILD_DATE";
const TIME_ENV: &str = "ANIMA_BUILD_TIME";
const DATE_FORMAT: &str = "[year]-[month]-[day]";
const TIME_FORMAT: &str = "[hour]:[minute]:[second] UTC";

fn stamp(env: &str, format: &str, now: OffsetDateTime) -> String {
    if let Ok(value) = std::env::var(env) {
        return value;
    }
    format_description::parse(format)
        .ok()
        .and_then(|desc| now.format(&desc).ok())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    let now = OffsetDateTime::now_utc();

    for (env, format) in [(DATE_ENV, DATE_FORMAT), (TIME_ENV, TIME_FORMAT)] {
        println!("cargo:rerun-if-env-changed={}", env);
        println!("cargo:rustc-env={}={}", env, stamp(env, format, now));
    }
}
