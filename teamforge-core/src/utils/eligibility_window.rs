/// The time band a tick considers for registration deadlines.
///
/// Both ends are inclusive: a deadline exactly one interval ago is still
/// selected, as is a deadline equal to `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityWindow {
    pub start: time::PrimitiveDateTime,
    pub end: time::PrimitiveDateTime,
}

impl EligibilityWindow {
    /// Window covering the tick interval that ends at `now`.
    pub fn ending_at(now: time::PrimitiveDateTime, interval: std::time::Duration) -> Self {
        let interval = time::Duration::try_from(interval).unwrap_or(time::Duration::MAX);
        let start = now.checked_sub(interval).unwrap_or(time::PrimitiveDateTime::MIN);
        Self { start, end: now }
    }

    pub fn contains(&self, instant: time::PrimitiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}
