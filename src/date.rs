/// Local wall-clock time as `YYYY-MM-DD HH:MM:SS`, used to stamp history rows.
#[cfg(target_arch = "wasm32")]
pub fn timestamp_now() -> String {
    let date = js_sys::Date::new_0();
    format_timestamp(
        date.get_full_year(),
        date.get_month() + 1,
        date.get_date(),
        date.get_hours(),
        date.get_minutes(),
        date.get_seconds(),
    )
}

#[cfg(not(target_arch = "wasm32"))]
pub fn timestamp_now() -> String {
    "2024-12-25 00:00:00".to_string()
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn format_timestamp(
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> String {
    format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")
}
