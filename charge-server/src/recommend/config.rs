//! Configuration for the recommendation pipeline.

use std::time::Duration;

use crate::geo::LongitudeScale;

/// Configuration parameters for station recommendation.
#[derive(Debug, Clone, Default)]
pub struct RecommendConfig {
    /// How candidate bounding boxes convert km into degrees of longitude.
    pub longitude_scale: LongitudeScale,

    /// Upper bound on time spent refining distances for one request.
    /// Refinements obtained before the deadline are kept.
    pub enrich_deadline: Option<Duration>,
}

impl RecommendConfig {
    /// Use a fixed km-per-degree longitude calibration.
    pub fn with_fixed_longitude_scale(mut self, km_per_degree: f64) -> Self {
        self.longitude_scale = LongitudeScale::Fixed(km_per_degree);
        self
    }

    /// Bound the enrichment phase of each request.
    pub fn with_enrich_deadline(mut self, deadline: Duration) -> Self {
        self.enrich_deadline = Some(deadline);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RecommendConfig::default();

        assert_eq!(config.longitude_scale, LongitudeScale::Cosine);
        assert_eq!(config.enrich_deadline, None);
    }

    #[test]
    fn custom_config() {
        let config = RecommendConfig::default()
            .with_fixed_longitude_scale(85.0)
            .with_enrich_deadline(Duration::from_secs(8));

        assert_eq!(config.longitude_scale, LongitudeScale::Fixed(85.0));
        assert_eq!(config.enrich_deadline, Some(Duration::from_secs(8)));
    }
}
