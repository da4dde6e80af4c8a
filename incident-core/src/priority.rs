use crate::model::{Level, Priority};

/// Priority implied by an urgency/impact pair; unset when either is unset.
pub fn derive_priority(urgency: Option<Level>, impact: Option<Level>) -> Option<Priority> {
    let (u, i) = (urgency?.code(), impact?.code());
    let priority = match (u, i) {
        (1, 1) => Priority::Critical,
        _ if u + i <= 4 => Priority::High,
        _ if u + i == 5 => Priority::Medium,
        _ => Priority::Low,
    };
    Some(priority)
}

/// Raw form of [`derive_priority`]: codes in `1..=3`, anything else is unset.
/// Returns `""` or one of `"1"`..`"4"`.
pub fn priority_code(urgency: u8, impact: u8) -> &'static str {
    let urgency = Level::from_code(u64::from(urgency));
    let impact = Level::from_code(u64::from(impact));
    derive_priority(urgency, impact)
        .as_ref()
        .map_or("", Priority::as_code)
}
