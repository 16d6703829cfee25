//! In-memory collaborators for unit tests.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use image::{Rgba, RgbaImage};
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::error::{Error, Result};
use crate::geometry::Region;
use crate::identifiers::ElementId;
use crate::protocol::{FramedBody, MatchData};
use crate::screenshot::{Screenshot, ScreenshotProvider};
use crate::transport::{Comparator, RunningSession};

/// Installs a test log subscriber honoring `RUST_LOG`.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// MockProvider
// ============================================================================

/// Capture calls recorded by [`MockProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Capture {
    Viewport,
    FullPage,
    Stitched(ElementId),
}

/// Provider returning solid images of a fixed size.
pub(crate) struct MockProvider {
    width: u32,
    height: u32,
    title: String,
    elements: HashMap<ElementId, Region>,
    captures: Mutex<Vec<Capture>>,
}

impl MockProvider {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            title: "Test Page".to_string(),
            elements: HashMap::new(),
            captures: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_element(mut self, element: ElementId, bounds: Region) -> Self {
        self.elements.insert(element, bounds);
        self
    }

    pub(crate) fn screenshot(&self) -> Screenshot {
        solid(self.width, self.height)
    }

    pub(crate) fn captures(&self) -> Vec<Capture> {
        self.captures.lock().clone()
    }

    fn bounds(&self, element: &ElementId) -> Result<Region> {
        self.elements
            .get(element)
            .copied()
            .ok_or_else(|| Error::driver(format!("no such element: {element}")))
    }
}

fn solid(width: u32, height: u32) -> Screenshot {
    Screenshot::new(RgbaImage::from_pixel(width, height, Rgba([200, 200, 200, 255])))
}

#[async_trait]
impl ScreenshotProvider for MockProvider {
    async fn title(&self) -> Result<String> {
        Ok(self.title.clone())
    }

    async fn capture_viewport(&self) -> Result<Screenshot> {
        self.captures.lock().push(Capture::Viewport);
        Ok(self.screenshot())
    }

    async fn capture_full_page(&self, _wait: Duration) -> Result<Screenshot> {
        self.captures.lock().push(Capture::FullPage);
        Ok(self.screenshot())
    }

    async fn capture_stitched_element(
        &self,
        element: &ElementId,
        _wait: Duration,
    ) -> Result<Screenshot> {
        self.captures.lock().push(Capture::Stitched(element.clone()));
        let bounds = self.bounds(element)?;
        Ok(solid(bounds.width as u32, bounds.height as u32))
    }

    async fn element_bounds(&self, element: &ElementId) -> Result<Region> {
        self.bounds(element)
    }
}

// ============================================================================
// MockComparator
// ============================================================================

/// Comparator replaying scripted answers and recording every body.
pub(crate) struct MockComparator {
    answers: Mutex<VecDeque<bool>>,
    fallback: bool,
    fail_at: Option<usize>,
    bodies: Mutex<Vec<Vec<u8>>>,
    times: Mutex<Vec<Instant>>,
}

impl MockComparator {
    /// Always answers `as_expected`.
    pub(crate) fn always(as_expected: bool) -> Self {
        Self::sequence(Vec::new(), as_expected)
    }

    /// Answers from `answers`, then `fallback`.
    pub(crate) fn sequence(answers: Vec<bool>, fallback: bool) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            fallback,
            fail_at: None,
            bodies: Mutex::new(Vec::new()),
            times: Mutex::new(Vec::new()),
        }
    }

    /// Fails the call with the given zero-based index.
    pub(crate) fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.bodies.lock().len()
    }

    pub(crate) fn times(&self) -> Vec<Instant> {
        self.times.lock().clone()
    }

    pub(crate) fn body(&self, index: usize) -> Vec<u8> {
        self.bodies.lock()[index].clone()
    }

    pub(crate) fn match_data(&self, index: usize) -> MatchData {
        let body = self.body(index);
        FramedBody::parse(&body)
            .and_then(|framed| framed.match_data())
            .expect("valid match request body")
    }
}

#[async_trait]
impl Comparator for MockComparator {
    async fn match_window(&self, _session: &RunningSession, body: Vec<u8>) -> Result<bool> {
        let index = {
            let mut bodies = self.bodies.lock();
            bodies.push(body);
            bodies.len() - 1
        };
        self.times.lock().push(Instant::now());

        if self.fail_at == Some(index) {
            return Err(Error::comparator("connection reset"));
        }
        Ok(self.answers.lock().pop_front().unwrap_or(self.fallback))
    }
}
