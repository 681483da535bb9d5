use std::time::{Duration, Instant};

use thiserror::Error;

use crate::table::OverlayTarget;

/// How long the copy control shows its acknowledgment
pub const COPY_ACK_DURATION: Duration = Duration::from_secs(2);

pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";

/// A clipboard write failed
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ClipboardError(pub String);

/// Somewhere the overlay content can be copied to
pub trait ClipboardSink {
    /// Short name used in log and error messages
    fn name(&self) -> &'static str;

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("nothing to copy, the detail overlay is closed")]
    NotOpen,

    #[error("copy failed: {primary}; fallback also failed: {fallback}")]
    Clipboard {
        primary: ClipboardError,
        fallback: ClipboardError,
    },
}

/// Which sink accepted the copy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Primary,
    Fallback,
}

/// Single-instance viewer for one field's full content
///
/// Opening while already open overwrites the previous title and content.
#[derive(Debug, Default)]
pub struct DetailOverlay {
    is_open: bool,
    title: String,
    /// Unescaped field value, shown as literal text and used for copying
    full_content: String,
    /// Vertical scroll inside the overlay body
    scroll: u16,
    /// Wrapped row count and visible height from the last draw
    viewport: Option<(usize, u16)>,
    copy_ack_until: Option<Instant>,
}

impl DetailOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.is_open = true;
        self.title = title.into();
        self.full_content = content.into();
        self.scroll = 0;
        self.viewport = None;
        self.copy_ack_until = None;
    }

    pub fn open_target(&mut self, target: &OverlayTarget) {
        self.open(target.title, target.content.as_str());
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.copy_ack_until = None;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.full_content
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_up(&mut self, n: u16) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    /// Scroll down, stopping once the last wrapped row is at the bottom
    pub fn scroll_down(&mut self, n: u16) {
        self.scroll = self.scroll.saturating_add(n).min(self.max_scroll());
    }

    /// Record the body geometry of the last draw and re-clamp the scroll
    pub fn set_viewport(&mut self, rows: usize, visible: u16) {
        self.viewport = Some((rows, visible));
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn max_scroll(&self) -> u16 {
        let max = match self.viewport {
            Some((rows, visible)) => rows.saturating_sub(usize::from(visible)),
            // not drawn yet; no content wraps to more rows than it has chars
            None => self.full_content.chars().count().saturating_sub(1),
        };
        u16::try_from(max).unwrap_or(u16::MAX)
    }

    /// Copy the stored content, falling back to the second sink on failure
    ///
    /// A successful copy (re)starts the acknowledgment window.
    pub fn copy_current_content(
        &mut self,
        primary: &mut dyn ClipboardSink,
        fallback: &mut dyn ClipboardSink,
        now: Instant,
    ) -> Result<CopyOutcome, OverlayError> {
        if !self.is_open {
            return Err(OverlayError::NotOpen);
        }

        let outcome = match primary.set_text(&self.full_content) {
            Ok(()) => CopyOutcome::Primary,
            Err(primary_err) => {
                tracing::warn!(sink = primary.name(), error = %primary_err, "clipboard copy failed, trying fallback");
                match fallback.set_text(&self.full_content) {
                    Ok(()) => CopyOutcome::Fallback,
                    Err(fallback_err) => {
                        return Err(OverlayError::Clipboard {
                            primary: primary_err,
                            fallback: fallback_err,
                        });
                    }
                }
            }
        };

        self.copy_ack_until = Some(now + COPY_ACK_DURATION);
        Ok(outcome)
    }

    pub fn is_acknowledging(&self, now: Instant) -> bool {
        self.copy_ack_until.is_some_and(|until| now < until)
    }

    /// Label of the copy control at `now`
    pub fn copy_label(&self, now: Instant) -> &'static str {
        if self.is_acknowledging(now) {
            COPIED_LABEL
        } else {
            COPY_LABEL
        }
    }

    /// Drop an elapsed acknowledgment; returns true if the label changed
    pub fn expire_ack(&mut self, now: Instant) -> bool {
        match self.copy_ack_until {
            Some(until) if now >= until => {
                self.copy_ack_until = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockSink {
        fail: bool,
        copied: Vec<String>,
    }

    impl MockSink {
        fn failing() -> Self {
            Self {
                fail: true,
                copied: Vec::new(),
            }
        }
    }

    impl ClipboardSink for MockSink {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError("unavailable".to_string()));
            }
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_open_close_lifecycle() {
        let mut overlay = DetailOverlay::new();
        assert!(!overlay.is_open());

        overlay.open("Message", "<script>alert(1)</script>");
        assert!(overlay.is_open());
        assert_eq!(overlay.title(), "Message");
        assert_eq!(overlay.content(), "<script>alert(1)</script>");

        overlay.close();
        assert!(!overlay.is_open());
    }

    #[test]
    fn test_reopen_overwrites() {
        let mut overlay = DetailOverlay::new();
        overlay.open("Message", "first\nsecond\nthird");
        overlay.scroll_down(2);
        overlay.open("Request ID", "req-1");
        assert_eq!(overlay.title(), "Request ID");
        assert_eq!(overlay.content(), "req-1");
        assert_eq!(overlay.scroll(), 0);
    }

    #[test]
    fn test_scroll_clamped_to_wrapped_rows() {
        let mut overlay = DetailOverlay::new();
        overlay.open("Message", "a\nb\nc");
        overlay.set_viewport(3, 10);
        overlay.scroll_down(10);
        assert_eq!(overlay.scroll(), 0);

        // one long line wrapped to 40 rows, 10 visible
        overlay.open("Message", "x".repeat(400));
        overlay.set_viewport(40, 10);
        overlay.scroll_down(500);
        assert_eq!(overlay.scroll(), 30);
        overlay.scroll_up(5);
        assert_eq!(overlay.scroll(), 25);
    }

    #[test]
    fn test_scroll_before_first_draw_not_stuck_on_single_line() {
        let mut overlay = DetailOverlay::new();
        overlay.open("Message", "x".repeat(3000));
        overlay.scroll_down(20);
        assert_eq!(overlay.scroll(), 20);

        // a taller viewport pulls the scroll back in range
        overlay.set_viewport(60, 50);
        assert_eq!(overlay.scroll(), 10);
    }

    #[test]
    fn test_copy_uses_primary() {
        let mut overlay = DetailOverlay::new();
        overlay.open("Message", "full text");
        let (mut primary, mut fallback) = (MockSink::default(), MockSink::default());

        let outcome = overlay
            .copy_current_content(&mut primary, &mut fallback, Instant::now())
            .unwrap();
        assert_eq!(outcome, CopyOutcome::Primary);
        assert_eq!(primary.copied, vec!["full text".to_string()]);
        assert!(fallback.copied.is_empty());
    }

    #[test]
    fn test_copy_falls_back() {
        let mut overlay = DetailOverlay::new();
        overlay.open("Message", "full text");
        let (mut primary, mut fallback) = (MockSink::failing(), MockSink::default());

        let outcome = overlay
            .copy_current_content(&mut primary, &mut fallback, Instant::now())
            .unwrap();
        assert_eq!(outcome, CopyOutcome::Fallback);
        assert_eq!(fallback.copied, vec!["full text".to_string()]);
    }

    #[test]
    fn test_double_failure_surfaces_error_without_ack() {
        let mut overlay = DetailOverlay::new();
        overlay.open("Message", "full text");
        let now = Instant::now();
        let result = overlay.copy_current_content(&mut MockSink::failing(), &mut MockSink::failing(), now);
        assert!(matches!(result, Err(OverlayError::Clipboard { .. })));
        assert_eq!(overlay.copy_label(now), COPY_LABEL);
    }

    #[test]
    fn test_copy_when_closed_is_rejected() {
        let mut overlay = DetailOverlay::new();
        let result = overlay.copy_current_content(
            &mut MockSink::default(),
            &mut MockSink::default(),
            Instant::now(),
        );
        assert!(matches!(result, Err(OverlayError::NotOpen)));
    }

    #[test]
    fn test_ack_window_restarts_per_copy() {
        let mut overlay = DetailOverlay::new();
        overlay.open("Message", "x");
        let (mut primary, mut fallback) = (MockSink::default(), MockSink::default());
        let start = Instant::now();

        overlay.copy_current_content(&mut primary, &mut fallback, start).unwrap();
        assert_eq!(overlay.copy_label(start + Duration::from_millis(1500)), COPIED_LABEL);

        // second copy before the first window elapses
        let second = start + Duration::from_millis(1500);
        overlay.copy_current_content(&mut primary, &mut fallback, second).unwrap();

        let after_first_window = start + Duration::from_millis(2500);
        assert_eq!(overlay.copy_label(after_first_window), COPIED_LABEL);
        assert!(!overlay.expire_ack(after_first_window));

        let after_second_window = second + COPY_ACK_DURATION;
        assert_eq!(overlay.copy_label(after_second_window), COPY_LABEL);
        assert!(overlay.expire_ack(after_second_window));
    }
}
