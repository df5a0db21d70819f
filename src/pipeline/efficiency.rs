use crate::config::{
    BASE_EFFICIENCY, GRAVITY_COEFFICIENT, NOMINAL_GRAVITY, NOMINAL_TEMPERATURE_C, PipelineConfig,
};
use crate::model::{EfficiencyResult, EnvironmentConditions};

/// Extraction efficiency for the given conditions, clamped to `[0, 1]`.
///
/// Waste volume does not enter the formula; it is accepted so callers can
/// pass the full environment input through unchanged.
pub fn calculate_efficiency(
    _waste_volume: f64,
    environment: &EnvironmentConditions,
    config: &PipelineConfig,
) -> EfficiencyResult {
    let temperature_factor = (1.0
        - (NOMINAL_TEMPERATURE_C - environment.temperature).abs() * config.temperature_coefficient)
        .max(0.0);
    let gravity_factor =
        (1.0 - (NOMINAL_GRAVITY - environment.gravity).abs() * GRAVITY_COEFFICIENT).max(0.0);

    let efficiency = (BASE_EFFICIENCY * temperature_factor * gravity_factor).clamp(0.0, 1.0);
    EfficiencyResult { efficiency }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn efficiency(temperature: f64, gravity: f64) -> f64 {
        calculate_efficiency(
            500.0,
            &EnvironmentConditions {
                temperature,
                gravity,
            },
            &PipelineConfig::default(),
        )
        .efficiency
    }

    #[test]
    fn nominal_conditions_yield_base_efficiency() {
        assert_eq!(efficiency(25.0, 1.0), 0.85);
    }

    #[test]
    fn deviations_reduce_efficiency() {
        assert!((efficiency(35.0, 1.0) - 0.85 * 0.9).abs() < 1e-12);
        assert!((efficiency(15.0, 1.0) - 0.85 * 0.9).abs() < 1e-12);
        assert!((efficiency(25.0, 3.0) - 0.85 * 0.9).abs() < 1e-12);
    }

    #[test]
    fn efficiency_stays_in_unit_interval_at_extremes() {
        for (t, g) in [
            (1000.0, 1.0),
            (-1000.0, 1.0),
            (25.0, 1000.0),
            (25.0, -50.0),
            (1000.0, 1000.0),
            (24.9, 1.01),
        ] {
            let value = efficiency(t, g);
            assert!((0.0..=1.0).contains(&value), "efficiency({t}, {g}) = {value}");
        }
        assert_eq!(efficiency(1000.0, 1.0), 0.0);
    }

    #[test]
    fn temperature_coefficient_is_configurable() {
        let config = PipelineConfig {
            temperature_coefficient: 0.02,
            ..PipelineConfig::default()
        };
        let result = calculate_efficiency(
            0.0,
            &EnvironmentConditions {
                temperature: 35.0,
                gravity: 1.0,
            },
            &config,
        );
        assert!((result.efficiency - 0.85 * 0.8).abs() < 1e-12);
    }
}
