use chrono::{DateTime, Utc};

pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    //
    // For more details see
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// JS hands us `Date.now()` values. `undefined` arrives as NaN and falls back to the current time.
pub(crate) fn timestamp_from_ms(timestamp_ms: f64) -> DateTime<Utc> {
    if !timestamp_ms.is_finite() {
        log::warn!("Got non-finite timestamp {timestamp_ms}, using the current time");
        return Utc::now();
    }
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms as i64).unwrap_or_else(Utc::now)
}

/// Whole seconds between two instants, rounded to nearest. A clock that went backwards counts as 0.
pub(crate) fn elapsed_seconds(started_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = (now - started_at).num_milliseconds().max(0);
    (millis as f64 / 1000.0).round() as u64
}

/// `125` -> `"2m 5s"`
#[cfg_attr(target_arch = "wasm32", wasm_bindgen::prelude::wasm_bindgen)]
pub fn format_time_spent(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}
