//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use derma_scan_core::domain::{ClassificationResult, LesionImage, ScreeningRecord};
use derma_scan_core::ports::{AdviceProvider, ImageSource, ResultOutput};

/// Mock implementation of `ImageSource` for testing.
///
/// Yields pre-built images and tracks iteration for assertions.
pub struct MockImageSource {
    images: Vec<LesionImage>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockImageSource {
    /// Creates a new mock source with the given images.
    #[must_use]
    pub fn new(images: Vec<LesionImage>) -> Self {
        Self {
            images,
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ImageSource for MockImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = (String, anyhow::Result<LesionImage>)> + Send + '_> {
        let count = Arc::clone(&self.iteration_count);
        if let Ok(mut c) = count.lock() {
            *c += 1;
        }
        Box::new(
            self.images
                .iter()
                .cloned()
                .map(|img| (img.path.clone(), Ok(img))),
        )
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.images.len())
    }
}

/// Mock source whose every item is a load error.
pub struct FailingImageSource {
    count: usize,
}

impl FailingImageSource {
    /// Creates a source yielding `count` failed loads, named
    /// `broken-0.png` through `broken-{count-1}.png`.
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self { count }
    }
}

impl ImageSource for FailingImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = (String, anyhow::Result<LesionImage>)> + Send + '_> {
        Box::new((0..self.count).map(|i| {
            (
                format!("broken-{i}.png"),
                Err(anyhow::anyhow!("Failed to open image: broken-{i}.png")),
            )
        }))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.count)
    }
}

/// Mock implementation of `AdviceProvider` for testing.
///
/// Returns a canned response and records every request.
pub struct MockAdviceProvider {
    response: String,
    requests: Arc<Mutex<Vec<ClassificationResult>>>,
}

impl MockAdviceProvider {
    /// Creates a provider that always answers with `response`.
    #[must_use]
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a provider that behaves like a failed remote fetch,
    /// answering with the fixed fallback text.
    #[must_use]
    pub fn failing() -> Self {
        Self::new(derma_scan_core::FALLBACK_ADVICE)
    }

    /// Returns all classification results advice was requested for.
    #[must_use]
    pub fn requests(&self) -> Vec<ClassificationResult> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AdviceProvider for MockAdviceProvider {
    fn advise(&self, result: &ClassificationResult) -> String {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(result.clone());
        self.response.clone()
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures records for later assertions.
pub struct MockResultOutput {
    records: Arc<Mutex<Vec<ScreeningRecord>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured records.
    #[must_use]
    pub fn records(&self) -> Vec<ScreeningRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, record: &ScreeningRecord) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}
