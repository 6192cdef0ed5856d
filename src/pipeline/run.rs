// Pipeline orchestration
// Runs smoothing and detection as one unit over an ingested series

use thiserror::Error;

use crate::events::{detect, DetectError, DetectorConfig, EventSet};
use crate::profiles::DatasetProfile;
use crate::series::{smooth, SeriesData, SmoothError, SmootherConfig};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Smoothing failed: {0}")]
    Smooth(#[from] SmoothError),

    #[error("Detection failed: {0}")]
    Detect(#[from] DetectError),
}

/// Configuration for one pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Smoothing parameters
    pub smoother: SmootherConfig,

    /// Detection parameters; None derives them from the dataset profile
    pub detector: Option<DetectorConfig>,
}

/// Output of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Velocity after smoothing, parallel to the input time column
    pub smoothed: Vec<f64>,

    /// Detected events, possibly empty
    pub events: EventSet,

    /// Detector configuration the run actually used
    pub detector: DetectorConfig,
}

/// Smooth the series and detect events in it
pub fn run_detection(
    series: &SeriesData,
    profile: &DatasetProfile,
    config: &PipelineConfig,
) -> Result<PipelineOutcome, PipelineError> {
    log::info!(
        "Running {} detection over {} samples spanning {:.1} s",
        profile.variant.as_str(),
        series.len(),
        series.span_secs()
    );

    let smoothed = smooth(&series.velocity, &config.smoother)?;

    let detector = config
        .detector
        .clone()
        .unwrap_or_else(|| profile.detector_config());
    let events = detect(&series.time, &smoothed, &detector)?;

    if events.is_empty() {
        log::info!("No event detected");
    } else {
        log::info!("Detected event with {} point(s)", events.len());
    }

    Ok(PipelineOutcome {
        smoothed,
        events,
        detector,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles;

    /// A three-sample window interpolates, so smoothing is the identity up
    /// to float noise and detector scenarios stay predictable
    fn passthrough_smoother() -> SmootherConfig {
        SmootherConfig {
            window: 2,
            order: 2,
        }
    }

    fn pulse_series() -> SeriesData {
        SeriesData {
            time: (0..10).map(|i| i as f64).collect(),
            velocity: vec![0.0, 0.0, 0.0, 0.0, 0.0, 8.0, 9.0, 0.0, 0.0, 0.0],
        }
    }

    #[test]
    fn test_pipeline_detects_pulse() {
        let series = pulse_series();
        let config = PipelineConfig {
            smoother: passthrough_smoother(),
            detector: None,
        };

        let outcome = run_detection(&series, &profiles::mars(), &config).unwrap();

        assert_eq!(outcome.smoothed.len(), series.len());
        assert_eq!(outcome.detector.radius, 1.0);
        assert_eq!(outcome.events.len(), 2);

        let anchor = outcome.events.anchor().unwrap();
        assert!((anchor.velocity - 8.0).abs() < 1e-9);
        assert_eq!(anchor.time, 5.0);

        let neighbor = outcome.events.points()[1];
        assert!((neighbor.velocity - 9.0).abs() < 1e-9);
        assert_eq!(neighbor.time, 6.0);
    }

    #[test]
    fn test_pipeline_detector_override() {
        let series = pulse_series();
        let config = PipelineConfig {
            smoother: passthrough_smoother(),
            detector: Some(DetectorConfig {
                radius: 0.5,
                ..DetectorConfig::default()
            }),
        };

        let outcome = run_detection(&series, &profiles::mars(), &config).unwrap();

        // The neighbor one second away falls outside the tightened radius
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.detector.radius, 0.5);
    }

    #[test]
    fn test_pipeline_shallow_ramp_has_no_event() {
        // A millisecond-spaced ramp has slope 1.0 but velocities two orders
        // of magnitude below it, so no candidate can anchor
        let series = SeriesData {
            time: (0..20).map(|i| i as f64 * 0.001).collect(),
            velocity: (0..20).map(|i| i as f64 * 0.001).collect(),
        };
        let config = PipelineConfig::default();

        let outcome = run_detection(&series, &profiles::mars(), &config).unwrap();

        assert!(outcome.events.is_empty());
    }

    #[test]
    fn test_pipeline_propagates_invalid_window() {
        let series = SeriesData {
            time: vec![0.0, 1.0, 2.0],
            velocity: vec![1.0, 2.0, 3.0],
        };
        let config = PipelineConfig::default();

        let err = run_detection(&series, &profiles::mars(), &config).unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Smooth(SmoothError::InvalidWindow { .. })
        ));
    }
}
