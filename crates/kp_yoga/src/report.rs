//! Stateless aggregations over finished interval lists.

use crate::condition::ConditionCategory;
use crate::tracker::ConditionInterval;

/// Interval counts per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

/// Count finished intervals by category.
pub fn counts_by_category(intervals: &[ConditionInterval]) -> CategoryCounts {
    let mut counts = CategoryCounts::default();
    for iv in intervals {
        match iv.category {
            ConditionCategory::Positive => counts.positive += 1,
            ConditionCategory::Negative => counts.negative += 1,
            ConditionCategory::Neutral => counts.neutral += 1,
        }
    }
    counts
}

/// Fixed start-hour bands of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeBand {
    /// 00:00-06:00
    Night,
    /// 06:00-12:00
    Morning,
    /// 12:00-18:00
    Afternoon,
    /// 18:00-24:00
    Evening,
}

/// All four bands in day order.
pub const ALL_TIME_BANDS: [TimeBand; 4] = [
    TimeBand::Night,
    TimeBand::Morning,
    TimeBand::Afternoon,
    TimeBand::Evening,
];

impl TimeBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Night => "Night (12 AM - 6 AM)",
            Self::Morning => "Morning (6 AM - 12 PM)",
            Self::Afternoon => "Afternoon (12 PM - 6 PM)",
            Self::Evening => "Evening (6 PM - 12 AM)",
        }
    }

    /// Band containing an hour of day (0-23).
    pub const fn for_hour(hour: u32) -> Self {
        match hour {
            0..=5 => Self::Night,
            6..=11 => Self::Morning,
            12..=17 => Self::Afternoon,
            _ => Self::Evening,
        }
    }
}

/// Group intervals by the band of their start hour.
pub fn group_by_time_band(
    intervals: &[ConditionInterval],
) -> [(TimeBand, Vec<&ConditionInterval>); 4] {
    let mut groups = [
        (TimeBand::Night, Vec::new()),
        (TimeBand::Morning, Vec::new()),
        (TimeBand::Afternoon, Vec::new()),
        (TimeBand::Evening, Vec::new()),
    ];
    for iv in intervals {
        let slot = match TimeBand::for_hour(iv.start.hour) {
            TimeBand::Night => 0,
            TimeBand::Morning => 1,
            TimeBand::Afternoon => 2,
            TimeBand::Evening => 3,
        };
        groups[slot].1.push(iv);
    }
    groups
}

/// The top-N intervals by significance: `duration_hours * strength`,
/// descending, ties broken by original order. Intervals without a
/// closed end are skipped.
pub fn top_by_significance(intervals: &[ConditionInterval], n: usize) -> Vec<&ConditionInterval> {
    let mut scored: Vec<(f64, &ConditionInterval)> = intervals
        .iter()
        .filter_map(|iv| iv.duration_hours().map(|d| (d * iv.strength, iv)))
        .collect();
    // Stable sort keeps original order on equal scores
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().take(n).map(|(_, iv)| iv).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kp_time::Moment;

    fn interval(
        name: &str,
        category: ConditionCategory,
        start_hour: u32,
        hours: f64,
        strength: f64,
    ) -> ConditionInterval {
        let start = Moment::utc(2024, 1, 15, start_hour, 0, 0.0);
        ConditionInterval {
            name: name.to_string(),
            category,
            start,
            end: Some(start.add_minutes(hours * 60.0)),
            participants: Vec::new(),
            strength,
        }
    }

    #[test]
    fn counts_partition() {
        let ivs = vec![
            interval("a", ConditionCategory::Positive, 6, 1.0, 1.0),
            interval("b", ConditionCategory::Positive, 7, 1.0, 1.0),
            interval("c", ConditionCategory::Negative, 8, 1.0, 1.0),
            interval("d", ConditionCategory::Neutral, 9, 1.0, 1.0),
        ];
        let counts = counts_by_category(&ivs);
        assert_eq!(counts.positive, 2);
        assert_eq!(counts.negative, 1);
        assert_eq!(counts.neutral, 1);
    }

    #[test]
    fn hour_bands() {
        assert_eq!(TimeBand::for_hour(0), TimeBand::Night);
        assert_eq!(TimeBand::for_hour(5), TimeBand::Night);
        assert_eq!(TimeBand::for_hour(6), TimeBand::Morning);
        assert_eq!(TimeBand::for_hour(11), TimeBand::Morning);
        assert_eq!(TimeBand::for_hour(12), TimeBand::Afternoon);
        assert_eq!(TimeBand::for_hour(17), TimeBand::Afternoon);
        assert_eq!(TimeBand::for_hour(18), TimeBand::Evening);
        assert_eq!(TimeBand::for_hour(23), TimeBand::Evening);
    }

    #[test]
    fn grouping_by_start_hour() {
        let ivs = vec![
            interval("night", ConditionCategory::Neutral, 2, 1.0, 1.0),
            interval("morning", ConditionCategory::Neutral, 9, 1.0, 1.0),
            interval("evening", ConditionCategory::Neutral, 21, 1.0, 1.0),
        ];
        let groups = group_by_time_band(&ivs);
        assert_eq!(groups[0].1.len(), 1);
        assert_eq!(groups[1].1.len(), 1);
        assert_eq!(groups[2].1.len(), 0);
        assert_eq!(groups[3].1.len(), 1);
        assert_eq!(groups[1].1[0].name, "morning");
    }

    #[test]
    fn significance_ranking() {
        let ivs = vec![
            interval("short-strong", ConditionCategory::Positive, 6, 1.0, 1.0),
            interval("long-weak", ConditionCategory::Positive, 7, 4.0, 0.5),
            interval("long-strong", ConditionCategory::Positive, 8, 3.0, 1.0),
        ];
        let top = top_by_significance(&ivs, 2);
        assert_eq!(top[0].name, "long-strong"); // 3.0
        assert_eq!(top[1].name, "long-weak"); // 2.0
    }

    #[test]
    fn significance_ties_keep_original_order() {
        let ivs = vec![
            interval("first", ConditionCategory::Neutral, 6, 2.0, 0.5),
            interval("second", ConditionCategory::Neutral, 7, 1.0, 1.0),
        ];
        let top = top_by_significance(&ivs, 2);
        assert_eq!(top[0].name, "first");
        assert_eq!(top[1].name, "second");
    }

    #[test]
    fn open_intervals_skipped() {
        let mut open = interval("open", ConditionCategory::Neutral, 6, 1.0, 1.0);
        open.end = None;
        let ivs = vec![open, interval("closed", ConditionCategory::Neutral, 7, 0.5, 1.0)];
        let top = top_by_significance(&ivs, 5);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "closed");
    }

    #[test]
    fn band_labels_nonempty() {
        for b in ALL_TIME_BANDS {
            assert!(!b.label().is_empty());
        }
    }
}
