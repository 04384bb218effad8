//! Radar timeline state machine.
//!
//! A closed window of evenly spaced frame timestamps: the upstream radar
//! provider only retains a fixed recent history, so the timeline is not a
//! stream. Step operations clamp at the bounds (controls stay enabled
//! without per-button state), and autoplay stops at the live edge instead
//! of looping.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use thiserror::Error;

/// Frames in the window (2 hours of history).
pub const FRAME_COUNT: usize = 24;
/// Spacing between frames.
pub const FRAME_STEP_MINUTES: i64 = 5;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    #[default]
    Paused,
    Playing,
}

/// Radar controller errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RadarError {
    /// Contract violation on `scrub_to`: the slider owns range clamping.
    #[error("frame index {index} outside window 0..{len}")]
    OutOfRange { index: usize, len: usize },
}

/// Fixed window of radar frame timestamps with a cursor and play state.
///
/// Frame 0 is the oldest; the last frame is "now" rounded down to the step
/// boundary at construction time. The cursor stays within the window for
/// every operation.
#[derive(Debug, Clone)]
pub struct RadarTimeline {
    frames: Vec<DateTime<Utc>>,
    cursor: usize,
    state: PlayState,
}

impl RadarTimeline {
    /// Build the window anchored at `now`, cursor on the live edge.
    pub fn new(now: DateTime<Utc>) -> Self {
        let step = TimeDelta::minutes(FRAME_STEP_MINUTES);
        let anchor = now.duration_trunc(step).unwrap_or(now);

        let frames = (0..FRAME_COUNT as i64)
            .map(|i| anchor - step * (FRAME_COUNT as i32 - 1 - i as i32))
            .collect();

        Self {
            frames,
            cursor: FRAME_COUNT - 1,
            state: PlayState::Paused,
        }
    }

    /// Number of frames in the window.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Current frame index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    /// Timestamp at the cursor: the sole time parameter for tile requests.
    pub fn current_timestamp(&self) -> DateTime<Utc> {
        self.frames[self.cursor]
    }

    /// Current timestamp as an ISO-8601 UTC string with seconds precision.
    pub fn time_param(&self) -> String {
        self.current_timestamp().format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// Advance one frame; no-op at the live edge.
    pub fn step_forward(&mut self) {
        self.cursor = (self.cursor + 1).min(self.frames.len() - 1);
    }

    /// Go back one frame; no-op at the oldest frame.
    pub fn step_backward(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Jump directly to `index` (slider drags skip frames).
    pub fn scrub_to(&mut self, index: usize) -> Result<(), RadarError> {
        if index >= self.frames.len() {
            return Err(RadarError::OutOfRange { index, len: self.frames.len() });
        }
        self.cursor = index;
        Ok(())
    }

    /// Start autoplay; no-op while already playing.
    pub fn play(&mut self) {
        self.state = PlayState::Playing;
    }

    /// Stop autoplay; no-op while already paused.
    pub fn pause(&mut self) {
        self.state = PlayState::Paused;
    }

    /// One autoplay advance. Only has effect while playing: advances the
    /// cursor, pausing when playback reaches (or already sits at) the live
    /// edge. The cursor never moves past the newest frame.
    pub fn tick(&mut self) {
        if self.state != PlayState::Playing {
            return;
        }
        if self.cursor >= self.frames.len() - 1 {
            self.state = PlayState::Paused;
            return;
        }
        self.cursor += 1;
        if self.cursor == self.frames.len() - 1 {
            self.state = PlayState::Paused;
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::TimeZone;

    fn timeline() -> RadarTimeline {
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 14, 3, 27).unwrap();
        RadarTimeline::new(now)
    }

    #[test]
    fn new_anchors_to_step_boundary() {
        let t = timeline();
        let last = t.frames[FRAME_COUNT - 1];
        assert_eq!(last, Utc.with_ymd_and_hms(2026, 8, 5, 14, 0, 0).unwrap());
    }

    #[test]
    fn new_starts_paused_at_live_edge() {
        let t = timeline();
        assert_eq!(t.state(), PlayState::Paused);
        assert_eq!(t.cursor(), FRAME_COUNT - 1);
    }

    #[test]
    fn frames_are_evenly_spaced_and_increasing() {
        let t = timeline();
        let step = TimeDelta::minutes(FRAME_STEP_MINUTES);
        for pair in t.frames.windows(2) {
            assert_eq!(pair[1] - pair[0], step);
        }
    }

    #[test]
    fn window_spans_two_hours() {
        let t = timeline();
        let span = t.frames[FRAME_COUNT - 1] - t.frames[0];
        assert_eq!(span, TimeDelta::minutes((FRAME_COUNT as i64 - 1) * FRAME_STEP_MINUTES));
    }

    #[test]
    fn step_forward_clamps_at_live_edge() {
        let mut t = timeline();
        t.step_forward();
        assert_eq!(t.cursor(), FRAME_COUNT - 1);
    }

    #[test]
    fn step_backward_clamps_at_oldest_frame() {
        let mut t = timeline();
        t.scrub_to(0).unwrap();
        t.step_backward();
        assert_eq!(t.cursor(), 0);
    }

    #[test]
    fn step_navigation_moves_one_frame() {
        let mut t = timeline();
        t.step_backward();
        assert_eq!(t.cursor(), FRAME_COUNT - 2);
        t.step_forward();
        assert_eq!(t.cursor(), FRAME_COUNT - 1);
    }

    #[test]
    fn scrub_jumps_multiple_frames() {
        let mut t = timeline();
        t.scrub_to(3).unwrap();
        assert_eq!(t.cursor(), 3);
        t.scrub_to(20).unwrap();
        assert_eq!(t.cursor(), 20);
    }

    #[test]
    fn scrub_out_of_range_fails_and_leaves_state_unchanged() {
        let mut t = timeline();
        t.scrub_to(5).unwrap();
        t.play();

        let err = t.scrub_to(FRAME_COUNT).unwrap_err();
        assert_eq!(err, RadarError::OutOfRange { index: FRAME_COUNT, len: FRAME_COUNT });
        assert_eq!(t.cursor(), 5);
        assert!(t.is_playing());
    }

    #[test]
    fn play_and_pause_are_idempotent() {
        let mut t = timeline();
        t.play();
        t.play();
        assert!(t.is_playing());
        t.pause();
        t.pause();
        assert!(!t.is_playing());
    }

    #[test]
    fn tick_is_inert_while_paused() {
        let mut t = timeline();
        t.scrub_to(0).unwrap();
        t.tick();
        assert_eq!(t.cursor(), 0);
        assert_eq!(t.state(), PlayState::Paused);
    }

    #[test]
    fn tick_at_live_edge_auto_pauses_without_moving() {
        let mut t = timeline();
        t.play();
        t.tick();
        assert_eq!(t.state(), PlayState::Paused);
        assert_eq!(t.cursor(), FRAME_COUNT - 1);
    }

    #[test]
    fn playback_from_start_stops_at_live_edge() {
        let mut t = timeline();
        t.scrub_to(0).unwrap();
        t.play();
        for i in 0..FRAME_COUNT - 1 {
            assert!(t.is_playing(), "stopped early after {} ticks", i);
            t.tick();
        }
        // Arriving at the live edge auto-stops instead of looping.
        assert_eq!(t.cursor(), FRAME_COUNT - 1);
        assert_eq!(t.state(), PlayState::Paused);
    }

    #[test]
    fn time_param_is_iso8601_seconds_utc() {
        let t = timeline();
        assert_eq!(t.time_param(), "2026-08-05T14:00:00Z");
    }

    #[test]
    fn current_timestamp_follows_cursor() {
        let mut t = timeline();
        t.scrub_to(0).unwrap();
        let oldest = t.current_timestamp();
        t.step_forward();
        assert_eq!(t.current_timestamp() - oldest, TimeDelta::minutes(FRAME_STEP_MINUTES));
    }
}
