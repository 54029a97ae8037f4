use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CLASSES: usize = 5;

/// Upper bounds of the color classes for one set of region counts.
///
/// An empty `bins` means there was nothing positive to color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapScale {
    pub bins: Vec<usize>,
    pub min: usize,
    pub max: usize,
    pub classes: usize,
}

impl HeatmapScale {
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn color_index(&self, value: usize) -> Option<usize> {
        if value == 0 || self.bins.is_empty() || self.classes == 0 {
            return None;
        }

        let last = self.classes - 1;
        if self.min == self.max {
            return Some(last);
        }

        let index = self
            .bins
            .iter()
            .position(|upper| *upper >= value)
            .unwrap_or(last);

        Some(index.min(last))
    }

    /// Color class of every region with a positive count.
    pub fn classify(&self, region_counts: &BTreeMap<i64, usize>) -> BTreeMap<i64, usize> {
        region_counts
            .iter()
            .filter_map(|(id, count)| self.color_index(*count).map(|class| (*id, class)))
            .collect()
    }
}

pub struct HeatmapBinner;

impl HeatmapBinner {
    pub fn compute_bins<I>(values: I, classes: usize) -> HeatmapScale
    where
        I: IntoIterator<Item = usize>,
    {
        let classes = classes.max(1);
        let positive: Vec<usize> = values.into_iter().filter(|v| *v > 0).collect();

        let (Some(min), Some(max)) = (
            positive.iter().min().copied(),
            positive.iter().max().copied(),
        ) else {
            return HeatmapScale {
                classes,
                ..Default::default()
            };
        };

        if min == max {
            return HeatmapScale {
                bins: vec![min],
                min,
                max,
                classes,
            };
        }

        let step = (max - min).div_ceil(classes).max(1);
        let mut bins: Vec<usize> = (1..=classes)
            .map(|i| (min + step * i).min(max))
            .collect();

        if let Some(last) = bins.last_mut() {
            *last = max;
        }

        tracing::debug!(min, max, step, classes, "heatmap bins computed");

        HeatmapScale {
            bins,
            min,
            max,
            classes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value_is_degenerate() {
        let scale = HeatmapBinner::compute_bins([5], DEFAULT_CLASSES);

        assert_eq!(scale.bins, vec![5]);
        assert_eq!(scale.min, 5);
        assert_eq!(scale.max, 5);
        assert_eq!(scale.color_index(5), Some(4));
        assert_eq!(scale.color_index(1), Some(4));
    }

    #[test]
    fn test_non_positive_values_are_ignored() {
        let scale = HeatmapBinner::compute_bins([0, 0, 3, 7], DEFAULT_CLASSES);

        assert_eq!(scale.min, 3);
        assert_eq!(scale.max, 7);
        assert_eq!(scale.color_index(0), None);

        let empty = HeatmapBinner::compute_bins([0, 0], DEFAULT_CLASSES);
        assert!(empty.is_empty());
        assert_eq!(empty.color_index(3), None);
    }

    #[test]
    fn test_bins_cover_range() {
        let scale = HeatmapBinner::compute_bins([1, 10, 100], DEFAULT_CLASSES);

        // step = ceil(99 / 5) = 20
        assert_eq!(scale.bins, vec![21, 41, 61, 81, 100]);
        assert_eq!(scale.color_index(1), Some(0));
        assert_eq!(scale.color_index(21), Some(0));
        assert_eq!(scale.color_index(22), Some(1));
        assert_eq!(scale.color_index(100), Some(4));
        assert_eq!(scale.color_index(500), Some(4));
    }

    #[test]
    fn test_narrow_range_saturates_at_max() {
        let scale = HeatmapBinner::compute_bins([2, 4], DEFAULT_CLASSES);

        // step = max(1, ceil(2 / 5)) = 1
        assert_eq!(scale.bins, vec![3, 4, 4, 4, 4]);
        assert_eq!(scale.color_index(2), Some(0));
        assert_eq!(scale.color_index(3), Some(0));
        assert_eq!(scale.color_index(4), Some(1));
    }

    #[test]
    fn test_color_index_is_monotonic() {
        for values in [vec![1, 2], vec![3, 17, 40], vec![1, 1000], vec![7, 8, 9, 10, 11, 12]] {
            let scale = HeatmapBinner::compute_bins(values.clone(), DEFAULT_CLASSES);
            let max = *values.iter().max().unwrap();

            let mut previous = 0;
            for value in 1..=max + 5 {
                let class = scale.color_index(value).unwrap();
                assert!(class >= previous, "{value} dropped from {previous} to {class}");
                assert!(class < DEFAULT_CLASSES);
                previous = class;
            }
        }
    }

    #[test]
    fn test_classify_skips_zero_regions() {
        let counts = BTreeMap::from([(1, 0), (2, 1), (3, 100)]);
        let scale = HeatmapBinner::compute_bins(counts.values().copied(), DEFAULT_CLASSES);

        assert_eq!(scale.classify(&counts), BTreeMap::from([(2, 0), (3, 4)]));
    }

    #[test]
    fn test_custom_class_count() {
        let scale = HeatmapBinner::compute_bins([1, 9], 2);

        assert_eq!(scale.bins, vec![5, 9]);
        assert_eq!(scale.color_index(5), Some(0));
        assert_eq!(scale.color_index(6), Some(1));
    }
}
