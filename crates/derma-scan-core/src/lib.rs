//! `DermaScan` Core - Domain logic and screening pipeline
//!
//! This crate contains the core domain types, the lesion classifier and its
//! preprocessing, the advice policy, and the dashboard state machine that
//! sequences a screening run.

pub mod advice;
pub mod domain;
pub mod inference;
pub mod ports;
pub mod session;

pub use advice::{advise_for_result, prompt_for, AdviceError, KeywordAdvice, FALLBACK_ADVICE};
pub use domain::{interpret, ClassificationResult, Label, LesionImage, ScreeningRecord};
pub use ports::{AdviceProvider, ImageSource, ProgressEvent, ProgressSink, ResultOutput};
pub use session::{Dashboard, DashboardEvent, DashboardState};
