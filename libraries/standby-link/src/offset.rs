//! Start offset parsing (`t=` / `start=` values)

use regex::Regex;
use std::sync::OnceLock;

fn component_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)([hms])").expect("static pattern is valid"))
}

/// Parse a start offset into whole seconds
///
/// Purely numeric text is taken as seconds. Anything else is scanned for
/// `<N>h`, `<N>m` and `<N>s` components, which are summed in whatever order
/// they appear; characters outside a component are ignored. Saturates at
/// `u32::MAX`.
///
/// ```rust
/// use standby_link::parse_offset;
///
/// assert_eq!(parse_offset("90"), 90);
/// assert_eq!(parse_offset("1h2m3s"), 3723);
/// assert_eq!(parse_offset("3s1m"), 63);
/// assert_eq!(parse_offset("abc"), 0);
/// ```
pub fn parse_offset(text: &str) -> u32 {
    if text.is_empty() {
        return 0;
    }

    if text.bytes().all(|b| b.is_ascii_digit()) {
        return saturate(parse_count(text));
    }

    let total = component_pattern()
        .captures_iter(text)
        .fold(0u64, |total, caps| {
            let count = parse_count(&caps[1]);
            let unit = match &caps[2] {
                "h" => 3600,
                "m" => 60,
                _ => 1,
            };
            total.saturating_add(count.saturating_mul(unit))
        });

    saturate(total)
}

/// Digits to a count, saturating instead of overflowing
fn parse_count(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

fn saturate(seconds: u64) -> u32 {
    u32::try_from(seconds).unwrap_or(u32::MAX)
}
