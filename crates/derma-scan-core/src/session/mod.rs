//! Dashboard state machine for a screening session.
//!
//! One authoritative state value and a single transition function replace
//! the scattered loading/result flags of earlier iterations. A generation
//! counter stamps every analysis run so completions that arrive after the
//! user has picked a new image are discarded instead of overwriting the
//! newer selection.

use crate::domain::ClassificationResult;

/// Message shown when prediction fails.
pub const PREDICTION_FAILED: &str = "Prediction failed.";

/// The single authoritative UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardState {
    /// No image selected yet.
    Idle,
    /// An image is selected and ready to analyze.
    ImageSelected {
        /// Path of the selected image.
        path: String,
    },
    /// An analysis run is in flight.
    Analyzing {
        /// Path of the image being analyzed.
        path: String,
    },
    /// Classification and advice are ready, as one unit.
    ResultReady {
        /// Path of the analyzed image.
        path: String,
        /// Classification result.
        result: ClassificationResult,
        /// Advice text (possibly the fixed fallback).
        advice: String,
    },
    /// Prediction failed; no advice was looked up.
    Failed {
        /// Path of the image that failed.
        path: String,
        /// Failure message shown to the user.
        message: String,
    },
}

/// Events driving the dashboard reducer.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// The model finished loading and is usable.
    ModelReady,
    /// The user picked a (new) image.
    ImagePicked {
        /// Path of the picked image.
        path: String,
    },
    /// The user triggered the analyze action.
    AnalyzeRequested,
    /// An analysis run completed successfully.
    AnalysisSucceeded {
        /// Generation stamp of the run that completed.
        generation: u64,
        /// Classification result.
        result: ClassificationResult,
        /// Advice text for the result.
        advice: String,
    },
    /// An analysis run failed during decode or inference.
    AnalysisFailed {
        /// Generation stamp of the run that failed.
        generation: u64,
    },
}

/// Dashboard controller: state, generation counter, and model readiness.
#[derive(Debug, Clone)]
pub struct Dashboard {
    state: DashboardState,
    generation: u64,
    model_ready: bool,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    /// Creates a dashboard in the `Idle` state with the model not ready.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DashboardState::Idle,
            generation: 0,
            model_ready: false,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Returns the generation stamp of the current selection.
    ///
    /// Completion events must carry this value to be accepted.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true when the analyze action is enabled: model ready, an
    /// image selected, and no analysis in flight.
    #[must_use]
    pub const fn can_analyze(&self) -> bool {
        self.model_ready
            && matches!(
                self.state,
                DashboardState::ImageSelected { .. }
                    | DashboardState::ResultReady { .. }
                    | DashboardState::Failed { .. }
            )
    }

    /// Applies an event, transitioning to the next state.
    ///
    /// Events that are not valid in the current state are ignored, as are
    /// completion events carrying a stale generation.
    pub fn apply(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::ModelReady => {
                self.model_ready = true;
            }
            DashboardEvent::ImagePicked { path } => {
                // A new selection discards any prior result and advice
                // immediately and invalidates in-flight completions.
                self.generation += 1;
                self.state = DashboardState::ImageSelected { path };
            }
            DashboardEvent::AnalyzeRequested => {
                if !self.can_analyze() {
                    return;
                }
                let path = match &self.state {
                    DashboardState::ImageSelected { path }
                    | DashboardState::ResultReady { path, .. }
                    | DashboardState::Failed { path, .. } => path.clone(),
                    DashboardState::Idle | DashboardState::Analyzing { .. } => return,
                };
                self.state = DashboardState::Analyzing { path };
            }
            DashboardEvent::AnalysisSucceeded {
                generation,
                result,
                advice,
            } => {
                if generation != self.generation {
                    return;
                }
                if let DashboardState::Analyzing { path } = &self.state {
                    self.state = DashboardState::ResultReady {
                        path: path.clone(),
                        result,
                        advice,
                    };
                }
            }
            DashboardEvent::AnalysisFailed { generation } => {
                if generation != self.generation {
                    return;
                }
                if let DashboardState::Analyzing { path } = &self.state {
                    self.state = DashboardState::Failed {
                        path: path.clone(),
                        message: PREDICTION_FAILED.to_string(),
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::FALLBACK_ADVICE;
    use crate::domain::interpret;

    fn ready_with_image(path: &str) -> Dashboard {
        let mut dash = Dashboard::new();
        dash.apply(DashboardEvent::ModelReady);
        dash.apply(DashboardEvent::ImagePicked { path: path.into() });
        dash
    }

    #[test]
    fn test_analyze_disabled_until_model_ready() {
        let mut dash = Dashboard::new();
        dash.apply(DashboardEvent::ImagePicked {
            path: "lesion.jpg".into(),
        });
        assert!(!dash.can_analyze());

        dash.apply(DashboardEvent::AnalyzeRequested);
        assert!(matches!(dash.state(), DashboardState::ImageSelected { .. }));

        dash.apply(DashboardEvent::ModelReady);
        assert!(dash.can_analyze());
    }

    #[test]
    fn test_analyze_disabled_without_image() {
        let mut dash = Dashboard::new();
        dash.apply(DashboardEvent::ModelReady);
        assert!(!dash.can_analyze());

        dash.apply(DashboardEvent::AnalyzeRequested);
        assert_eq!(dash.state(), &DashboardState::Idle);
    }

    #[test]
    fn test_successful_run_reaches_result_ready() {
        let mut dash = ready_with_image("lesion.jpg");
        dash.apply(DashboardEvent::AnalyzeRequested);
        assert!(matches!(dash.state(), DashboardState::Analyzing { .. }));
        assert!(!dash.can_analyze(), "no parallel analyses");

        dash.apply(DashboardEvent::AnalysisSucceeded {
            generation: dash.generation(),
            result: interpret(0.9),
            advice: "see a dermatologist".into(),
        });

        match dash.state() {
            DashboardState::ResultReady { result, advice, .. } => {
                assert_eq!(result.confidence_percent, "90.00");
                assert_eq!(advice, "see a dermatologist");
            }
            other => panic!("expected ResultReady, got {other:?}"),
        }
    }

    #[test]
    fn test_fallback_advice_still_counts_as_success() {
        let mut dash = ready_with_image("lesion.jpg");
        dash.apply(DashboardEvent::AnalyzeRequested);
        dash.apply(DashboardEvent::AnalysisSucceeded {
            generation: dash.generation(),
            result: interpret(0.3),
            advice: FALLBACK_ADVICE.into(),
        });
        assert!(matches!(dash.state(), DashboardState::ResultReady { .. }));
    }

    #[test]
    fn test_failure_shows_prediction_failed() {
        let mut dash = ready_with_image("lesion.jpg");
        dash.apply(DashboardEvent::AnalyzeRequested);
        dash.apply(DashboardEvent::AnalysisFailed {
            generation: dash.generation(),
        });

        match dash.state() {
            DashboardState::Failed { message, .. } => {
                assert_eq!(message, PREDICTION_FAILED);
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_new_image_clears_displayed_result() {
        let mut dash = ready_with_image("first.jpg");
        dash.apply(DashboardEvent::AnalyzeRequested);
        dash.apply(DashboardEvent::AnalysisSucceeded {
            generation: dash.generation(),
            result: interpret(0.8),
            advice: "advice".into(),
        });
        assert!(matches!(dash.state(), DashboardState::ResultReady { .. }));

        // Picking a new image clears result and advice before any
        // analysis starts.
        dash.apply(DashboardEvent::ImagePicked {
            path: "second.jpg".into(),
        });
        assert_eq!(
            dash.state(),
            &DashboardState::ImageSelected {
                path: "second.jpg".into()
            }
        );
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut dash = ready_with_image("first.jpg");
        dash.apply(DashboardEvent::AnalyzeRequested);
        let stale = dash.generation();

        // The user picks a new image while the first run is in flight.
        dash.apply(DashboardEvent::ImagePicked {
            path: "second.jpg".into(),
        });

        // The first run completes; its generation no longer matches.
        dash.apply(DashboardEvent::AnalysisSucceeded {
            generation: stale,
            result: interpret(0.99),
            advice: "stale".into(),
        });

        assert_eq!(
            dash.state(),
            &DashboardState::ImageSelected {
                path: "second.jpg".into()
            }
        );
    }

    #[test]
    fn test_reanalyze_from_result_ready() {
        let mut dash = ready_with_image("lesion.jpg");
        dash.apply(DashboardEvent::AnalyzeRequested);
        dash.apply(DashboardEvent::AnalysisSucceeded {
            generation: dash.generation(),
            result: interpret(0.2),
            advice: "advice".into(),
        });

        assert!(dash.can_analyze());
        dash.apply(DashboardEvent::AnalyzeRequested);
        assert!(matches!(dash.state(), DashboardState::Analyzing { .. }));
    }
}
