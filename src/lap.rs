use crate::format::format_split;
use serde::Serialize;

/// A recorded split, kept as the fixed-point text shown to the user and the
/// numeric value of that text.
#[derive(Debug, Clone, PartialEq)]
pub struct Lap {
    text: String,
    seconds: f64,
}

impl Lap {
    pub fn new(seconds: f64) -> Self {
        let text = format_split(seconds);
        let seconds = text.parse().unwrap_or(seconds);

        Self { text, seconds }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    Slowest,
    Fastest,
    Plain,
}

/// The slowest and fastest laps among all but the newest one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extremes<'a> {
    pub slowest: Option<&'a Lap>,
    pub fastest: Option<&'a Lap>,
}

impl Extremes<'_> {
    /// Matches by value, so the newest lap is tagged too when it ties an
    /// extreme. Slowest wins when a lap matches both.
    pub fn classify(&self, lap: &Lap) -> Highlight {
        let matches = |extreme: Option<&Lap>| extreme.is_some_and(|e| e.seconds == lap.seconds);

        if matches(self.slowest) {
            Highlight::Slowest
        } else if matches(self.fastest) {
            Highlight::Fastest
        } else {
            Highlight::Plain
        }
    }
}

pub fn find_extreme_laps(laps: &[Lap]) -> Extremes<'_> {
    let Some((_, candidates)) = laps.split_last() else {
        return Extremes::default();
    };

    let mut candidates = candidates.iter();
    let Some(first) = candidates.next() else {
        return Extremes::default();
    };

    let mut slowest = first;
    let mut fastest = first;

    for lap in candidates {
        if lap.seconds > slowest.seconds {
            slowest = lap;
        }
        if lap.seconds < fastest.seconds {
            fastest = lap;
        }
    }

    Extremes {
        slowest: Some(slowest),
        fastest: Some(fastest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laps(values: &[f64]) -> Vec<Lap> {
        values.iter().copied().map(Lap::new).collect()
    }

    #[test]
    fn test_lap_text() {
        let lap = Lap::new(1.25);
        assert_eq!(lap.text(), "1.2");
        assert_eq!(lap.seconds(), 1.2);

        let lap = Lap::new(-0.6999999999999998);
        assert_eq!(lap.text(), "-0.7");
        assert_eq!(lap.seconds(), -0.7);
    }

    #[test]
    fn test_extremes_with_negative_splits() {
        let laps = laps(&[1.5, -0.5, -0.7, -0.9]);
        let extremes = find_extreme_laps(&laps);

        assert!(std::ptr::eq(extremes.slowest.unwrap(), &laps[0]));
        assert!(std::ptr::eq(extremes.fastest.unwrap(), &laps[2]));

        let highlights: Vec<Highlight> = laps.iter().map(|l| extremes.classify(l)).collect();
        assert_eq!(
            highlights,
            [
                Highlight::Slowest,
                Highlight::Plain,
                Highlight::Fastest,
                Highlight::Plain
            ]
        );
    }

    #[test]
    fn test_extremes_skip_newest() {
        let laps = laps(&[1.0, 5.0, 3.0]);
        let extremes = find_extreme_laps(&laps);

        assert_eq!(extremes.slowest.map(Lap::seconds), Some(5.0));
        assert_eq!(extremes.fastest.map(Lap::seconds), Some(1.0));
        assert!(std::ptr::eq(extremes.slowest.unwrap(), &laps[1]));
        assert!(std::ptr::eq(extremes.fastest.unwrap(), &laps[0]));
    }

    #[test]
    fn test_extremes_too_few_laps() {
        assert_eq!(find_extreme_laps(&[]), Extremes::default());
        assert_eq!(find_extreme_laps(&laps(&[4.0])), Extremes::default());
    }

    #[test]
    fn test_extremes_compare_numerically() {
        // "10.0" < "9.0" as text.
        let laps = laps(&[9.0, 10.0, 2.0]);
        let extremes = find_extreme_laps(&laps);

        assert_eq!(extremes.slowest.map(Lap::seconds), Some(10.0));
        assert_eq!(extremes.fastest.map(Lap::seconds), Some(9.0));
    }

    #[test]
    fn test_extremes_all_equal() {
        let laps = laps(&[2.0, 2.0, 2.0]);
        let extremes = find_extreme_laps(&laps);

        assert!(std::ptr::eq(extremes.slowest.unwrap(), &laps[0]));
        assert!(std::ptr::eq(extremes.fastest.unwrap(), &laps[0]));
        assert_eq!(extremes.classify(&laps[2]), Highlight::Slowest);
    }

    #[test]
    fn test_classify() {
        let laps = laps(&[1.0, 5.0, 3.0, 5.0]);
        let extremes = find_extreme_laps(&laps);

        assert_eq!(extremes.classify(&laps[0]), Highlight::Fastest);
        assert_eq!(extremes.classify(&laps[1]), Highlight::Slowest);
        assert_eq!(extremes.classify(&laps[2]), Highlight::Plain);
        assert_eq!(extremes.classify(&laps[3]), Highlight::Slowest);
        assert_eq!(Extremes::default().classify(&laps[0]), Highlight::Plain);
    }
}
