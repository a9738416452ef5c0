use chrono::Timelike;

use crate::Symbol;

/// Maps wall-clock time to the symbols shown on the face.
///
/// The face reads `HH:MM` followed by a space and the AM/PM glyph; the `M`
/// of the suffix is part of that glyph and has no position of its own.
#[derive(Debug, Copy, Clone, Default)]
pub struct ClockSampler;

impl ClockSampler {
    /// Number of glyph positions on the face.
    pub const POSITIONS: usize = 7;

    /// 12-hour `HH:MM AM|PM` with a zero-padded hour in `01..=12`.
    pub fn format(time: &impl Timelike) -> String {
        let (pm, hour) = time.hour12();
        let suffix = if pm { "PM" } else { "AM" };
        format!("{hour:02}:{:02} {suffix}", time.minute())
    }

    /// Symbols for `time`, left to right.
    pub fn sample(time: &impl Timelike) -> Vec<Symbol> {
        let text = Self::format(time);
        let symbols: Vec<Symbol> = text
            .chars()
            .take(Self::POSITIONS)
            .filter_map(Symbol::from_char)
            .collect();

        debug_assert_eq!(symbols.len(), Self::POSITIONS, "unmapped character in {text:?}");
        symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn chars(symbols: &[Symbol]) -> String {
        symbols.iter().map(|s| s.as_char()).collect()
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn formats_twelve_hour_clock() {
        assert_eq!(ClockSampler::format(&at(1, 5)), "01:05 AM");
        assert_eq!(ClockSampler::format(&at(13, 45)), "01:45 PM");
        assert_eq!(ClockSampler::format(&at(23, 59)), "11:59 PM");
    }

    #[test]
    fn noon_and_midnight() {
        assert_eq!(ClockSampler::format(&at(12, 0)), "12:00 PM");
        assert_eq!(ClockSampler::format(&at(0, 0)), "12:00 AM");
    }

    // ── sample ────────────────────────────────────────────────────────────

    #[test]
    fn early_morning_maps_to_seven_positions() {
        let symbols = ClockSampler::sample(&at(1, 5));
        assert_eq!(
            symbols,
            vec![
                Symbol::Zero,
                Symbol::One,
                Symbol::Colon,
                Symbol::Zero,
                Symbol::Five,
                Symbol::Space,
                Symbol::Am,
            ]
        );
    }

    #[test]
    fn afternoon_ends_with_pm_glyph() {
        let symbols = ClockSampler::sample(&at(16, 20));
        assert_eq!(symbols.len(), ClockSampler::POSITIONS);
        assert_eq!(symbols.last(), Some(&Symbol::Pm));
        assert_eq!(chars(&symbols[..5]), "04:20");
    }

    #[test]
    fn same_time_samples_identically() {
        let t = NaiveTime::from_hms_opt(9, 41, 17).unwrap();
        assert_eq!(ClockSampler::sample(&t), ClockSampler::sample(&t));
    }

    #[test]
    fn seconds_do_not_change_the_face() {
        let a = NaiveTime::from_hms_opt(9, 41, 0).unwrap();
        let b = NaiveTime::from_hms_opt(9, 41, 59).unwrap();
        assert_eq!(ClockSampler::sample(&a), ClockSampler::sample(&b));
    }
}
