use crate::typing_policy::CharStatus;

/// Characters per word in the usual typing-test convention.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Length of the scored prefix (up to the first unmatched position) and the
/// number of incorrect characters inside it.
pub fn scanned_prefix(status: &[CharStatus]) -> (usize, usize) {
    status
        .iter()
        .take_while(|s| **s != CharStatus::Unmatched)
        .fold((0, 0), |(scanned, errors), s| {
            (scanned + 1, errors + usize::from(*s == CharStatus::Incorrect))
        })
}

/// Net words per minute over `seconds`.
///
/// Every incorrect character cancels one typed character. Returns 0 for an
/// empty prefix or a non-positive duration.
pub fn compute_wpm(status: &[CharStatus], seconds: f64) -> f64 {
    let (scanned, errors) = scanned_prefix(status);
    if scanned == 0 || seconds <= 0.0 {
        return 0.0;
    }

    (scanned - errors) as f64 / CHARS_PER_WORD * (60.0 / seconds)
}
