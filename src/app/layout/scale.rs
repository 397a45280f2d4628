use eframe::egui::Color32;

pub(in crate::app) const MIN_RELATED_RADIUS: f32 = 8.0;
pub(in crate::app) const MAX_RELATED_RADIUS: f32 = 40.0;
pub(in crate::app) const CENTER_RADIUS: f32 = 40.0;
pub(in crate::app) const COLLISION_PADDING: f32 = 2.0;
pub(in crate::app) const CENTER_COLLISION_PADDING: f32 = 10.0;

pub(in crate::app) const HIGH_VOLUME_THRESHOLD: f64 = 1.0;
pub(in crate::app) const MEDIUM_VOLUME_THRESHOLD: f64 = 0.1;

pub(in crate::app) const CENTER_COLOR: Color32 = Color32::from_rgb(0x8B, 0x5C, 0xF6);

/// Square-root scale from `[0, max(observed, 1)]` onto the related-node radius range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct RadiusScale {
    domain_max: f64,
}

impl RadiusScale {
    pub(in crate::app) fn from_weights(weights: impl IntoIterator<Item = f64>) -> Self {
        let observed_max = weights
            .into_iter()
            .filter(|weight| weight.is_finite())
            .fold(0.0_f64, f64::max);
        Self {
            domain_max: observed_max.max(1.0),
        }
    }

    pub(in crate::app) fn radius(self, weight: f64) -> f32 {
        let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
        let t = (weight / self.domain_max).sqrt().clamp(0.0, 1.0) as f32;
        MIN_RELATED_RADIUS + t * (MAX_RELATED_RADIUS - MIN_RELATED_RADIUS)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum VolumeBucket {
    High,
    Medium,
    Low,
    Zero,
}

impl VolumeBucket {
    pub(in crate::app) const ALL: [Self; 4] = [Self::High, Self::Medium, Self::Low, Self::Zero];

    pub(in crate::app) fn from_weight(weight: f64) -> Self {
        if weight >= HIGH_VOLUME_THRESHOLD {
            Self::High
        } else if weight >= MEDIUM_VOLUME_THRESHOLD {
            Self::Medium
        } else if weight > 0.0 {
            Self::Low
        } else {
            Self::Zero
        }
    }

    pub(in crate::app) fn color(self) -> Color32 {
        match self {
            Self::High => Color32::from_rgb(0x10, 0xB9, 0x81),
            Self::Medium => Color32::from_rgb(0xF5, 0x9E, 0x0B),
            Self::Low => Color32::from_rgb(0x06, 0xB6, 0xD4),
            Self::Zero => Color32::from_rgb(0x6B, 0x72, 0x80),
        }
    }

    pub(in crate::app) fn legend(self) -> &'static str {
        match self {
            Self::High => "High (≥1 SOL)",
            Self::Medium => "Medium (≥0.1 SOL)",
            Self::Low => "Low (>0 SOL)",
            Self::Zero => "Zero",
        }
    }
}

pub(in crate::app) fn shows_label(weight: f64, is_center: bool) -> bool {
    is_center || weight > MEDIUM_VOLUME_THRESHOLD
}

pub(in crate::app) fn collision_radius(radius: f32, is_center: bool) -> f32 {
    if is_center {
        radius + CENTER_COLLISION_PADDING
    } else {
        radius + COLLISION_PADDING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_is_monotonic_and_bounded() {
        let scale = RadiusScale::from_weights([0.001, 0.5, 7.0]);
        let samples = [0.0, 0.001, 0.01, 0.1, 0.5, 1.0, 2.0, 7.0, 50.0];
        let mut previous = f32::MIN;
        for weight in samples {
            let radius = scale.radius(weight);
            assert!(radius >= previous, "radius decreased at {weight}");
            assert!((MIN_RELATED_RADIUS..=MAX_RELATED_RADIUS).contains(&radius));
            previous = radius;
        }
        assert_eq!(scale.radius(7.0), MAX_RELATED_RADIUS);
        assert_eq!(scale.radius(0.0), MIN_RELATED_RADIUS);
    }

    #[test]
    fn domain_never_shrinks_below_one() {
        let scale = RadiusScale::from_weights([0.01, 0.04]);
        assert_eq!(scale.radius(1.0), MAX_RELATED_RADIUS);
        assert!(scale.radius(0.04) < MAX_RELATED_RADIUS);

        let empty = RadiusScale::from_weights(std::iter::empty());
        assert_eq!(empty.radius(0.25), MIN_RELATED_RADIUS + 0.5 * 32.0);
    }

    #[test]
    fn degenerate_weights_map_to_minimum_radius() {
        let scale = RadiusScale::from_weights([2.0]);
        assert_eq!(scale.radius(f64::NAN), MIN_RELATED_RADIUS);
        assert_eq!(scale.radius(-3.0), MIN_RELATED_RADIUS);
    }

    #[test]
    fn buckets_partition_thresholds() {
        assert_eq!(VolumeBucket::from_weight(2.5), VolumeBucket::High);
        assert_eq!(VolumeBucket::from_weight(1.0), VolumeBucket::High);
        assert_eq!(VolumeBucket::from_weight(0.999), VolumeBucket::Medium);
        assert_eq!(VolumeBucket::from_weight(0.1), VolumeBucket::Medium);
        assert_eq!(VolumeBucket::from_weight(0.099), VolumeBucket::Low);
        assert_eq!(VolumeBucket::from_weight(0.001), VolumeBucket::Low);
        assert_eq!(VolumeBucket::from_weight(0.0), VolumeBucket::Zero);
    }

    #[test]
    fn bucket_colors_are_distinct() {
        for (index, bucket) in VolumeBucket::ALL.iter().enumerate() {
            assert_ne!(bucket.color(), CENTER_COLOR);
            for other in &VolumeBucket::ALL[index + 1..] {
                assert_ne!(bucket.color(), other.color());
            }
        }
    }

    #[test]
    fn labels_only_for_center_and_medium_or_larger() {
        assert!(shows_label(0.0, true));
        assert!(shows_label(2.5, false));
        assert!(!shows_label(0.1, false));
        assert!(!shows_label(0.001, false));
    }

    #[test]
    fn center_gets_extra_collision_padding() {
        assert_eq!(collision_radius(CENTER_RADIUS, true), 50.0);
        assert_eq!(collision_radius(8.0, false), 10.0);
    }
}
