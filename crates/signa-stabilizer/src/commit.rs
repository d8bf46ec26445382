//! Commit state machine - debounced text commits from stable predictions
//!
//! A different symbol may commit as soon as the base gap has elapsed; a
//! repeated symbol must wait the full double gap. Holding a static gesture
//! therefore fires once, while intentional double letters still work after
//! a pause.

use std::time::Duration;

use signa_core::{FrameTime, Label};

use crate::{PredictionWindow, DEFAULT_WINDOW_SIZE};

/// Stabilizer tuning
#[derive(Debug, Clone)]
pub struct StabilizerConfig {
    /// Number of recent predictions considered
    pub window_size: usize,

    /// Minimum fraction of the window agreeing before a commit is considered
    pub stability_threshold: f32,

    /// Base gap between commits
    pub commit_gap: Duration,

    /// Shorter gap for the delete gesture, so held deletes repeat faster
    pub delete_gap: Duration,

    /// Whether stable predictions commit automatically
    pub auto_commit: bool,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            stability_threshold: 0.7,
            commit_gap: Duration::from_millis(900),
            delete_gap: Duration::from_millis(450),
            auto_commit: true,
        }
    }
}

/// Semantic text edit selected by a committed label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    Append(String),
    AppendSpace,
    DeleteLast,
}

impl TextEdit {
    /// Map a label to the edit it commits
    pub fn for_label(label: &Label) -> TextEdit {
        if label.is_space() {
            TextEdit::AppendSpace
        } else if label.is_delete() {
            TextEdit::DeleteLast
        } else {
            TextEdit::Append(label.as_str().to_string())
        }
    }
}

/// A debounced commit emitted by the stabilizer
#[derive(Debug, Clone)]
pub struct CommitEvent {
    pub label: Label,
    pub edit: TextEdit,
    pub at: FrameTime,
}

/// Turns the per-frame prediction stream into discrete commit events.
///
/// The machine's state is the window contents plus the last commit; it
/// cycles between idle (empty window) and tracking (window has entries).
#[derive(Debug)]
pub struct Stabilizer {
    config: StabilizerConfig,
    window: PredictionWindow,
    last_committed: Option<Label>,
    last_commit_at: FrameTime,
}

impl Stabilizer {
    pub fn new(config: StabilizerConfig) -> Self {
        let window = PredictionWindow::new(config.window_size);
        Stabilizer {
            config,
            window,
            last_committed: None,
            last_commit_at: FrameTime::ZERO,
        }
    }

    /// Feed one frame's predicted label (or absence) into the machine.
    ///
    /// Absence - no hand in frame, or an empty dataset - clears the window
    /// and never commits. At most one commit is emitted per observation.
    pub fn observe(&mut self, label: Option<&Label>, now: FrameTime) -> Option<CommitEvent> {
        let Some(label) = label else {
            self.window.clear();
            return None;
        };

        self.window.push(label.clone());

        if !self.config.auto_commit {
            return None;
        }

        let (majority, _) = self.window.majority()?;
        if self.window.stability() < self.config.stability_threshold {
            return None;
        }

        let gap = if majority.is_delete() {
            self.config.delete_gap
        } else {
            self.config.commit_gap
        };
        let elapsed = now - self.last_commit_at;

        let repeat = self.last_committed.as_ref() == Some(&majority);
        if elapsed > gap && (!repeat || elapsed > gap * 2) {
            let event = CommitEvent {
                edit: TextEdit::for_label(&majority),
                label: majority.clone(),
                at: now,
            };
            self.last_committed = Some(majority);
            self.last_commit_at = now;
            return Some(event);
        }

        None
    }

    pub fn window(&self) -> &PredictionWindow {
        &self.window
    }

    pub fn last_committed(&self) -> Option<&Label> {
        self.last_committed.as_ref()
    }

    pub fn config(&self) -> &StabilizerConfig {
        &self.config
    }
}

impl Default for Stabilizer {
    fn default() -> Self {
        Stabilizer::new(StabilizerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> Label {
        Label::new(s).unwrap()
    }

    fn at(ms: i64) -> FrameTime {
        FrameTime::from_millis(ms)
    }

    /// Feed the same label until the window is saturated, committing at most
    /// once; returns the commit if one fired.
    fn saturate(s: &mut Stabilizer, l: &Label, now: FrameTime) -> Option<CommitEvent> {
        let mut committed = None;
        for _ in 0..DEFAULT_WINDOW_SIZE {
            if let Some(ev) = s.observe(Some(l), now) {
                committed = Some(ev);
            }
        }
        committed
    }

    #[test]
    fn test_absence_clears_window() {
        let mut s = Stabilizer::default();
        let a = label("A");

        s.observe(Some(&a), at(1000));
        s.observe(Some(&a), at(1033));
        assert_eq!(s.window().len(), 2);

        assert!(s.observe(None, at(1066)).is_none());
        assert!(s.window().is_empty());

        // Next prediction starts a fresh window
        s.observe(Some(&a), at(1100));
        assert_eq!(s.window().len(), 1);
    }

    #[test]
    fn test_no_commit_below_stability_threshold() {
        let mut s = Stabilizer::default();
        let a = label("A");
        let b = label("B");

        // Alternating labels never reach 0.7 stability
        for i in 0..16 {
            let l = if i % 2 == 0 { &a } else { &b };
            assert!(s.observe(Some(l), at(2000 + i * 33)).is_none());
        }
    }

    #[test]
    fn test_first_commit_fires_once_stable() {
        let mut s = Stabilizer::default();
        let a = label("A");

        let ev = saturate(&mut s, &a, at(2000)).expect("stable label should commit");
        assert_eq!(ev.label.as_str(), "A");
        assert_eq!(ev.edit, TextEdit::Append("A".to_string()));
        assert_eq!(ev.at, at(2000));
        assert_eq!(s.last_committed().unwrap().as_str(), "A");
    }

    #[test]
    fn test_repeated_label_blocked_until_double_gap() {
        let mut s = Stabilizer::default();
        let a = label("A");

        assert!(saturate(&mut s, &a, at(2000)).is_some());

        // 500ms later: elapsed < gap, blocked
        assert!(saturate(&mut s, &a, at(2500)).is_none());

        // 1000ms later: elapsed > gap but same label and <= 2*gap, blocked
        assert!(saturate(&mut s, &a, at(3000)).is_none());

        // 1801ms later: elapsed > 2*gap, repeat fires
        assert!(saturate(&mut s, &a, at(3801)).is_some());
    }

    #[test]
    fn test_different_label_allowed_after_single_gap() {
        let mut s = Stabilizer::default();
        let a = label("A");
        let b = label("B");

        assert!(saturate(&mut s, &a, at(2000)).is_some());

        // Different label, 901ms later: base gap elapsed, fires
        let ev = saturate(&mut s, &b, at(2901)).expect("different label after gap");
        assert_eq!(ev.label.as_str(), "B");
    }

    #[test]
    fn test_different_label_still_blocked_inside_gap() {
        let mut s = Stabilizer::default();
        let a = label("A");
        let b = label("B");

        assert!(saturate(&mut s, &a, at(2000)).is_some());
        assert!(saturate(&mut s, &b, at(2500)).is_none());
    }

    #[test]
    fn test_delete_uses_shorter_gap() {
        let mut s = Stabilizer::default();
        let a = label("A");
        let del = Label::delete();

        assert!(saturate(&mut s, &a, at(2000)).is_some());

        // Delete's gap is 450ms: fires at +451ms where a letter would not
        let ev = saturate(&mut s, &del, at(2451)).expect("delete after short gap");
        assert_eq!(ev.edit, TextEdit::DeleteLast);

        // Held delete repeats on the double of its own gap
        assert!(saturate(&mut s, &del, at(2902)).is_none());
        assert!(saturate(&mut s, &del, at(3353)).is_some());
    }

    #[test]
    fn test_auto_commit_disabled_never_commits() {
        let mut s = Stabilizer::new(StabilizerConfig {
            auto_commit: false,
            ..StabilizerConfig::default()
        });
        let a = label("A");

        assert!(saturate(&mut s, &a, at(5000)).is_none());
        // Window still tracks
        assert_eq!(s.window().len(), DEFAULT_WINDOW_SIZE);
    }

    #[test]
    fn test_space_label_maps_to_space_edit() {
        let mut s = Stabilizer::default();
        let ev = saturate(&mut s, &Label::space(), at(2000)).unwrap();
        assert_eq!(ev.edit, TextEdit::AppendSpace);
    }
}
