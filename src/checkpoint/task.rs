//! Match-retry engine.
//!
//! [`MatchWindowTask`] drives one checkpoint to completion: capture,
//! package, submit, and retry until the comparator reports a match or the
//! retry timeout elapses.
//!
//! # Retry Flow
//!
//! ```text
//! INIT ──► validate timeout
//!   │
//!   ├─ run once / timeout 0 ──► sleep(timeout) ──► hard attempt ──► DONE
//!   │
//!   └─ soft attempt ──► match? ──► DONE
//!         │
//!         └─ loop while elapsed < timeout:
//!               sleep(interval) ──► soft attempt ──► match? ──► DONE
//!            then hard attempt ──► DONE
//! ```
//!
//! Soft attempts are sent with `IgnoreMismatch = true`; only the final hard
//! attempt is authoritative for the comparator.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, Span, debug, info, info_span, warn};

use crate::error::Result;
use crate::frames::FrameChainHandle;
use crate::geometry::Region;
use crate::identifiers::ElementId;
use crate::options::MatchOptions;
use crate::protocol::{AppOutput, MatchData, MatchRequest, UserInput};
use crate::screenshot::{Screenshot, ScreenshotProvider};
use crate::transport::{Comparator, RunningSession};

use super::capture::{CaptureContext, CaptureStrategy, ElementCapture, RegionCapture, WindowCapture};
use super::regions::resolve_dynamic_regions;
use super::target::Target;
use super::timing::{RetryTimeout, millis, sleep_cancellable};

// ============================================================================
// MatchContext
// ============================================================================

/// Collaborators shared by every checkpoint of a session.
///
/// The span replaces a process-wide logger: each checkpoint runs inside a
/// child of it.
#[derive(Clone)]
pub struct MatchContext {
    provider: Arc<dyn ScreenshotProvider>,
    comparator: Arc<dyn Comparator>,
    session: RunningSession,
    frames: FrameChainHandle,
    span: Span,
    cancel: CancellationToken,
}

impl MatchContext {
    /// Creates a context with an empty frame chain and the current span.
    #[must_use]
    pub fn new(
        provider: Arc<dyn ScreenshotProvider>,
        comparator: Arc<dyn Comparator>,
        session: RunningSession,
    ) -> Self {
        Self {
            provider,
            comparator,
            session,
            frames: FrameChainHandle::new(),
            span: Span::current(),
            cancel: CancellationToken::new(),
        }
    }

    /// Shares the live frame chain maintained by the driver layer.
    #[must_use]
    pub fn with_frames(mut self, frames: FrameChainHandle) -> Self {
        self.frames = frames;
        self
    }

    /// Sets the parent span for checkpoint logs.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Sets the token that aborts waits.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns the running session.
    #[inline]
    #[must_use]
    pub fn session(&self) -> &RunningSession {
        &self.session
    }

    /// Returns the live frame chain.
    #[inline]
    #[must_use]
    pub fn frames(&self) -> &FrameChainHandle {
        &self.frames
    }
}

impl std::fmt::Debug for MatchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchContext")
            .field("session", &self.session)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Checkpoint
// ============================================================================

/// One visual check request.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    tag: String,
    retry_timeout: RetryTimeout,
    user_inputs: Vec<UserInput>,
    target: Target,
    run_once_after_wait: bool,
}

impl Checkpoint {
    /// Creates a checkpoint using the default retry timeout.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            retry_timeout: RetryTimeout::Default,
            user_inputs: Vec::new(),
            target: Target::default(),
            run_once_after_wait: false,
        }
    }

    /// Sets the retry timeout.
    #[must_use]
    pub fn with_retry_timeout(mut self, timeout: impl Into<RetryTimeout>) -> Self {
        self.retry_timeout = timeout.into();
        self
    }

    /// Sets the user inputs preceding this checkpoint.
    #[must_use]
    pub fn with_user_inputs(mut self, user_inputs: Vec<UserInput>) -> Self {
        self.user_inputs = user_inputs;
        self
    }

    /// Sets ignore and floating regions.
    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Waits the whole timeout, then makes a single attempt.
    #[must_use]
    pub fn run_once_after_wait(mut self) -> Self {
        self.run_once_after_wait = true;
        self
    }

    /// Returns the tag.
    #[inline]
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the retry timeout.
    #[inline]
    #[must_use]
    pub fn retry_timeout(&self) -> RetryTimeout {
        self.retry_timeout
    }

    /// Returns the target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> &Target {
        &self.target
    }
}

// ============================================================================
// MatchResult
// ============================================================================

/// Outcome of a checkpoint.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Whether the comparator matched the baseline.
    pub as_expected: bool,
    /// The screenshot submitted by the deciding attempt.
    pub screenshot: Screenshot,
}

// ============================================================================
// MatchWindowTask
// ============================================================================

/// Runs checkpoints against a comparator session.
#[derive(Debug)]
pub struct MatchWindowTask {
    context: MatchContext,
    options: MatchOptions,
}

impl MatchWindowTask {
    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if `options` are invalid.
    pub fn new(context: MatchContext, options: MatchOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { context, options })
    }

    /// Returns the context.
    #[inline]
    #[must_use]
    pub fn context(&self) -> &MatchContext {
        &self.context
    }

    /// Returns the options.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Matches the window (or the full page when forced).
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub async fn match_window(&self, checkpoint: &Checkpoint) -> Result<MatchResult> {
        self.run(&WindowCapture, checkpoint).await
    }

    /// Matches a region of the active frame's content.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub async fn match_region(
        &self,
        region: Region,
        checkpoint: &Checkpoint,
    ) -> Result<MatchResult> {
        self.run(&RegionCapture { region }, checkpoint).await
    }

    /// Matches an element, stitching it when `stitch_content` is set.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub async fn match_element(
        &self,
        element: ElementId,
        stitch_content: bool,
        checkpoint: &Checkpoint,
    ) -> Result<MatchResult> {
        let strategy = ElementCapture {
            element,
            stitch_content,
        };
        self.run(&strategy, checkpoint).await
    }

    /// Runs a checkpoint with any capture strategy.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`](crate::Error::Config) for a timeout in (0, 60ms),
    ///   before anything is captured
    /// - [`Error::Cancelled`](crate::Error::Cancelled) if the context token fires
    /// - Provider, comparator and transport errors, unretried
    pub async fn run(
        &self,
        strategy: &dyn CaptureStrategy,
        checkpoint: &Checkpoint,
    ) -> Result<MatchResult> {
        let span = info_span!(
            parent: &self.context.span,
            "checkpoint",
            tag = %checkpoint.tag,
            kind = strategy.kind(),
            session_id = %self.context.session.id,
        );
        self.run_with_intervals(strategy, checkpoint).instrument(span).await
    }
}

// ============================================================================
// MatchWindowTask - Retry Loop
// ============================================================================

impl MatchWindowTask {
    async fn run_with_intervals(
        &self,
        strategy: &dyn CaptureStrategy,
        checkpoint: &Checkpoint,
    ) -> Result<MatchResult> {
        let retry_timeout = checkpoint
            .retry_timeout
            .resolve(self.options.default_retry_timeout)?;
        debug!(
            requested = %checkpoint.retry_timeout,
            retry_timeout_ms = millis(retry_timeout),
            "Retry timeout selected"
        );

        let started = Instant::now();
        let result = if checkpoint.run_once_after_wait || retry_timeout.is_zero() {
            self.run_once(strategy, checkpoint, retry_timeout).await?
        } else {
            self.poll(strategy, checkpoint, retry_timeout).await?
        };

        info!(
            as_expected = result.as_expected,
            elapsed_ms = millis(started.elapsed()),
            "Checkpoint completed"
        );
        Ok(result)
    }

    async fn run_once(
        &self,
        strategy: &dyn CaptureStrategy,
        checkpoint: &Checkpoint,
        wait: Duration,
    ) -> Result<MatchResult> {
        debug!(wait_ms = millis(wait), "Waiting before single attempt");
        sleep_cancellable(wait, &self.context.cancel).await?;
        self.attempt(strategy, checkpoint, 1, false).await
    }

    async fn poll(
        &self,
        strategy: &dyn CaptureStrategy,
        checkpoint: &Checkpoint,
        retry_timeout: Duration,
    ) -> Result<MatchResult> {
        let mut attempt = 1;
        let result = self.attempt(strategy, checkpoint, attempt, true).await?;
        let started = Instant::now();
        if result.as_expected {
            return Ok(result);
        }

        let mut elapsed = started.elapsed();
        while elapsed < retry_timeout {
            sleep_cancellable(self.options.match_interval, &self.context.cancel).await?;

            attempt += 1;
            let result = self.attempt(strategy, checkpoint, attempt, true).await?;
            if result.as_expected {
                return Ok(result);
            }

            elapsed = started.elapsed();
            debug!(attempt, elapsed_ms = millis(elapsed), "Still mismatching");
        }

        debug!(attempt = attempt + 1, "Retry timeout reached, final attempt");
        self.attempt(strategy, checkpoint, attempt + 1, false).await
    }

    /// Captures, packages and submits once.
    async fn attempt(
        &self,
        strategy: &dyn CaptureStrategy,
        checkpoint: &Checkpoint,
        attempt: u32,
        ignore_mismatch: bool,
    ) -> Result<MatchResult> {
        let screenshot = strategy.capture(&self.capture_context()).await?;
        self.save_debug_screenshot(&screenshot, strategy.kind(), attempt);

        let title = self.context.provider.title().await?;
        let provider = self.context.provider.as_ref();
        let regions = resolve_dynamic_regions(&checkpoint.target, provider, &screenshot).await?;

        let ignore_caret = checkpoint.target.ignores_caret();
        let data = MatchData::new(checkpoint.tag.as_str(), AppOutput::new(title), ignore_mismatch)
            .with_user_inputs(checkpoint.user_inputs.clone())
            .with_match_settings(&self.options.default_match_settings, ignore_caret)
            .with_regions(regions.ignore, regions.floating);
        let body = MatchRequest::new(data, screenshot.to_png_bytes()?).encode()?;

        debug!(attempt, ignore_mismatch, bytes = body.len(), "Submitting match request");
        let as_expected = self
            .context
            .comparator
            .match_window(&self.context.session, body)
            .await?;
        debug!(attempt, as_expected, "Match result");

        Ok(MatchResult {
            as_expected,
            screenshot,
        })
    }

    fn capture_context(&self) -> CaptureContext<'_> {
        CaptureContext {
            provider: self.context.provider.as_ref(),
            frames: &self.context.frames,
            cancel: &self.context.cancel,
            force_full_page: self.options.force_full_page_screenshot,
            wait_before_screenshots: self.options.wait_before_screenshots,
        }
    }

    fn save_debug_screenshot(&self, screenshot: &Screenshot, kind: &str, attempt: u32) {
        let Some(debug) = &self.options.debug_screenshots else {
            return;
        };
        if let Err(e) = debug.save(screenshot, &format!("{kind}_{attempt}")) {
            warn!(error = %e, "Failed to save debug screenshot");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
