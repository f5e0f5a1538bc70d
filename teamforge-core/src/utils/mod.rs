pub mod eligibility_window;
pub mod team_name;

/// Current UTC time without an offset, matching the `TIMESTAMP` columns.
pub fn utc_now() -> time::PrimitiveDateTime {
    let now = time::OffsetDateTime::now_utc();
    time::PrimitiveDateTime::new(now.date(), now.time())
}
