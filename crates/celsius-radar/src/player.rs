//! Autoplay driver for the radar timeline.
//!
//! While the timeline is playing, a fixed-period task invokes `tick()` and
//! publishes the resulting frame timestamp on a watch channel for the tile
//! layer to consume. Pausing, reaching the live edge, or tearing the player
//! down all stop the loop before any further tick can fire.

use crate::timeline::{RadarError, RadarTimeline};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Autoplay period.
pub const TICK_INTERVAL: Duration = Duration::from_millis(500);

/// Owns a [`RadarTimeline`] and its autoplay task.
///
/// All cursor mutations go through the player so that every change is
/// published exactly once. Dropping the player cancels the task; no tick
/// outlives the owning view.
pub struct RadarPlayer {
    timeline: Arc<Mutex<RadarTimeline>>,
    frame_tx: watch::Sender<DateTime<Utc>>,
    shutdown: CancellationToken,
    run: Mutex<Option<CancellationToken>>,
}

impl RadarPlayer {
    pub fn new(timeline: RadarTimeline) -> Self {
        let (frame_tx, _) = watch::channel(timeline.current_timestamp());
        Self {
            timeline: Arc::new(Mutex::new(timeline)),
            frame_tx,
            shutdown: CancellationToken::new(),
            run: Mutex::new(None),
        }
    }

    /// Subscribe to frame timestamps for tile refresh.
    pub fn subscribe(&self) -> watch::Receiver<DateTime<Utc>> {
        self.frame_tx.subscribe()
    }

    pub fn cursor(&self) -> usize {
        self.timeline.lock().cursor()
    }

    pub fn frame_count(&self) -> usize {
        self.timeline.lock().len()
    }

    pub fn is_playing(&self) -> bool {
        self.timeline.lock().is_playing()
    }

    pub fn current_timestamp(&self) -> DateTime<Utc> {
        self.timeline.lock().current_timestamp()
    }

    /// Current frame as the tile request time parameter.
    pub fn time_param(&self) -> String {
        self.timeline.lock().time_param()
    }

    pub fn step_forward(&self) {
        let timestamp = {
            let mut timeline = self.timeline.lock();
            timeline.step_forward();
            timeline.current_timestamp()
        };
        self.frame_tx.send_replace(timestamp);
    }

    pub fn step_backward(&self) {
        let timestamp = {
            let mut timeline = self.timeline.lock();
            timeline.step_backward();
            timeline.current_timestamp()
        };
        self.frame_tx.send_replace(timestamp);
    }

    /// Jump to an arbitrary frame (slider input).
    pub fn scrub_to(&self, index: usize) -> Result<(), RadarError> {
        let timestamp = {
            let mut timeline = self.timeline.lock();
            timeline.scrub_to(index)?;
            timeline.current_timestamp()
        };
        self.frame_tx.send_replace(timestamp);
        Ok(())
    }

    /// Start autoplay. No-op when already playing.
    pub fn play(&self) {
        {
            let mut timeline = self.timeline.lock();
            if timeline.is_playing() {
                return;
            }
            timeline.play();
        }

        let token = self.shutdown.child_token();
        *self.run.lock() = Some(token.clone());

        let timeline = Arc::clone(&self.timeline);
        let frame_tx = self.frame_tx.clone();
        tokio::spawn(async move {
            // First tick lands one full period after play, not immediately.
            let start = tokio::time::Instant::now() + TICK_INTERVAL;
            let mut interval = tokio::time::interval_at(start, TICK_INTERVAL);

            loop {
                tokio::select! {
                    // Cancellation wins over a simultaneously ready tick, so
                    // no tick fires after pause() or teardown returns.
                    biased;
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let (timestamp, playing) = {
                            let mut timeline = timeline.lock();
                            timeline.tick();
                            (timeline.current_timestamp(), timeline.is_playing())
                        };
                        frame_tx.send_replace(timestamp);
                        if !playing {
                            tracing::debug!("Autoplay reached the live edge");
                            break;
                        }
                    }
                }
            }
        });
    }

    /// Stop autoplay. No further tick fires once this returns.
    pub fn pause(&self) {
        self.timeline.lock().pause();
        if let Some(token) = self.run.lock().take() {
            token.cancel();
        }
    }

    /// Cancel the autoplay task and release the timeline.
    pub fn shutdown(&self) {
        self.timeline.lock().pause();
        self.shutdown.cancel();
    }
}

impl Drop for RadarPlayer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::timeline::{PlayState, FRAME_COUNT};
    use chrono::TimeZone;

    fn player_at(cursor: usize) -> RadarPlayer {
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 14, 3, 27).unwrap();
        let player = RadarPlayer::new(RadarTimeline::new(now));
        player.scrub_to(cursor).unwrap();
        player
    }

    /// Let the autoplay task start, then move time one period forward.
    async fn advance_one_tick() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        tokio::time::advance(TICK_INTERVAL).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_advances_one_frame_per_period() {
        let player = player_at(0);
        player.play();

        advance_one_tick().await;
        assert_eq!(player.cursor(), 1);

        advance_one_tick().await;
        assert_eq!(player.cursor(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_stops_at_live_edge() {
        let player = player_at(0);
        player.play();

        for _ in 0..FRAME_COUNT - 1 {
            advance_one_tick().await;
        }
        assert_eq!(player.cursor(), FRAME_COUNT - 1);
        assert!(!player.is_playing());

        // Further periods change nothing: the loop has exited.
        advance_one_tick().await;
        advance_one_tick().await;
        assert_eq!(player.cursor(), FRAME_COUNT - 1);
    }

    #[tokio::test(start_paused = true)]
    async fn no_tick_fires_after_pause() {
        let player = player_at(0);
        player.play();

        advance_one_tick().await;
        advance_one_tick().await;
        assert_eq!(player.cursor(), 2);

        player.pause();
        for _ in 0..5 {
            advance_one_tick().await;
        }
        assert_eq!(player.cursor(), 2);
        assert!(!player.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn play_after_pause_resumes() {
        let player = player_at(0);
        player.play();
        advance_one_tick().await;
        player.pause();

        player.play();
        advance_one_tick().await;
        assert_eq!(player.cursor(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_pending_timer() {
        let player = player_at(0);
        player.play();
        advance_one_tick().await;

        player.shutdown();
        for _ in 0..5 {
            advance_one_tick().await;
        }
        assert_eq!(player.cursor(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn subscriber_sees_frame_changes() {
        let player = player_at(0);
        let rx = player.subscribe();
        let initial = *rx.borrow();

        player.step_forward();
        let after_step = *rx.borrow();
        assert_ne!(initial, after_step);

        player.play();
        advance_one_tick().await;
        assert_ne!(after_step, *rx.borrow());
    }

    #[tokio::test(start_paused = true)]
    async fn scrub_while_playing_keeps_playing() {
        let player = player_at(0);
        player.play();
        advance_one_tick().await;

        player.scrub_to(10).unwrap();
        assert!(player.is_playing());
        advance_one_tick().await;
        assert_eq!(player.cursor(), 11);
    }

    #[tokio::test(start_paused = true)]
    async fn scrub_out_of_range_is_rejected() {
        let player = player_at(0);
        let result = player.scrub_to(FRAME_COUNT);
        assert!(matches!(result, Err(RadarError::OutOfRange { .. })));
        assert_eq!(player.cursor(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn double_play_spawns_single_run() {
        let player = player_at(0);
        player.play();
        player.play();

        advance_one_tick().await;
        // A second task would advance the cursor twice per period.
        assert_eq!(player.cursor(), 1);
        assert_eq!(player.timeline.lock().state(), PlayState::Playing);
    }
}
