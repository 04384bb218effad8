//! Debounced, sequence-guarded search session.
//!
//! Input changes coalesce over a quiet period before any lookup runs, and
//! every dispatched lookup carries a sequence number so a stale response can
//! never overwrite a fresher one. All work interleaves on one logical
//! thread; there is no locking here.

use std::sync::Arc;

use celsius_gazetteer::{Gazetteer, RequestSequencer, Suggestion};
use celsius_weather::{WeatherBundle, WeatherProvider};
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};

/// Quiet period before a pending input value dispatches a search.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Input events fed into the session.
enum SessionInput {
    InputChanged(String),
    Select(String),
}

/// Observable results, already filtered through the sequencing guard.
#[derive(Debug)]
pub enum SessionEvent {
    /// Suggestions for the most recently settled query.
    Suggestions(Vec<Suggestion>),
    /// Weather for the most recently selected place.
    Weather {
        city: String,
        bundle: Box<WeatherBundle>,
    },
    /// User-facing failure message for the most recent selection.
    SearchFailed { city: String, message: &'static str },
}

/// Handle to the session task. Dropping it tears the task down.
pub struct SearchSession {
    input_tx: mpsc::UnboundedSender<SessionInput>,
}

impl SearchSession {
    /// Spawn the session loop over the given gazetteer and provider.
    ///
    /// Returns the input handle and the stream of observable results.
    pub fn spawn(
        gazetteer: Arc<Gazetteer>,
        provider: WeatherProvider,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        tokio::spawn(run(input_rx, events_tx, gazetteer, provider));

        (Self { input_tx }, events_rx)
    }

    /// Report a changed input value; restarts the quiet period.
    pub fn input_changed(&self, text: impl Into<String>) {
        let _ = self.input_tx.send(SessionInput::InputChanged(text.into()));
    }

    /// Request weather for a selected place.
    pub fn select(&self, city: impl Into<String>) {
        let _ = self.input_tx.send(SessionInput::Select(city.into()));
    }
}

async fn run(
    mut input_rx: mpsc::UnboundedReceiver<SessionInput>,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    gazetteer: Arc<Gazetteer>,
    provider: WeatherProvider,
) {
    let mut suggestion_seq = RequestSequencer::new();
    let mut weather_seq = RequestSequencer::new();

    // Pending input value and its quiet-period deadline.
    let mut pending: Option<(String, Instant)> = None;

    // Completed weather fetches come back tagged with their sequence number.
    type FetchResult = (u64, String, Result<WeatherBundle, celsius_weather::WeatherError>);
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<FetchResult>();

    loop {
        let deadline = pending.as_ref().map(|(_, at)| *at);

        tokio::select! {
            maybe_input = input_rx.recv() => {
                match maybe_input {
                    // Handle closed: the hosting view is gone.
                    None => break,
                    Some(SessionInput::InputChanged(text)) => {
                        pending = Some((text, Instant::now() + DEBOUNCE));
                    }
                    Some(SessionInput::Select(city)) => {
                        let seq = weather_seq.begin();
                        let provider = provider.clone();
                        let fetch_tx = fetch_tx.clone();
                        tokio::spawn(async move {
                            let result = provider.fetch_by_city(&city).await;
                            let _ = fetch_tx.send((seq, city, result));
                        });
                    }
                }
            }

            _ = sleep_until_some(deadline), if deadline.is_some() => {
                if let Some((text, _)) = pending.take() {
                    let seq = suggestion_seq.begin();
                    let results = gazetteer.search(&text);
                    if suggestion_seq.accept(seq) {
                        let _ = events_tx.send(SessionEvent::Suggestions(results));
                    }
                }
            }

            Some((seq, city, result)) = fetch_rx.recv() => {
                if !weather_seq.accept(seq) {
                    tracing::debug!("Discarding superseded weather response for {}", city);
                    continue;
                }
                let event = match result {
                    Ok(bundle) => SessionEvent::Weather { city, bundle: Box::new(bundle) },
                    Err(e) => {
                        tracing::warn!("Weather lookup for {} failed: {}", city, e);
                        SessionEvent::SearchFailed { city, message: e.user_message() }
                    }
                };
                let _ = events_tx.send(event);
            }
        }
    }
}

async fn sleep_until_some(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        // Guarded out by the `if` on the select arm.
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use celsius_gazetteer::GazetteerEntry;

    fn entry(name: &str, country: &str) -> GazetteerEntry {
        GazetteerEntry {
            name: name.to_string(),
            country: country.to_string(),
            lat: 0.0,
            lon: 0.0,
        }
    }

    fn test_session() -> (SearchSession, mpsc::UnboundedReceiver<SessionEvent>) {
        let gazetteer = Arc::new(Gazetteer::new(vec![
            entry("London", "GB"),
            entry("Londonderry", "GB"),
            entry("Paris", "FR"),
        ]));
        // Never reached by these tests: nothing is selected.
        let provider = WeatherProvider::new("test-key", "http://127.0.0.1:9").unwrap();
        SearchSession::spawn(gazetteer, provider)
    }

    /// Let the session task observe queued inputs, then move time forward.
    async fn advance(duration: Duration) {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        tokio::time::advance(duration).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_input_coalesces_to_one_search() {
        let (session, mut events) = test_session();
        session.input_changed("lo");
        session.input_changed("lon");
        session.input_changed("lond");

        advance(DEBOUNCE).await;

        let event = events.recv().await.unwrap();
        let SessionEvent::Suggestions(results) = event else {
            panic!("expected suggestions");
        };
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "London");

        // Exactly one event: the earlier inputs never dispatched.
        advance(DEBOUNCE).await;
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn input_change_restarts_quiet_period() {
        let (session, mut events) = test_session();
        session.input_changed("par");
        advance(Duration::from_millis(200)).await;
        session.input_changed("lon");
        advance(Duration::from_millis(200)).await;

        // 400ms total, but only 200ms since the last change: nothing yet.
        assert!(events.try_recv().is_err());

        advance(Duration::from_millis(100)).await;
        let event = events.recv().await.unwrap();
        let SessionEvent::Suggestions(results) = event else {
            panic!("expected suggestions");
        };
        assert_eq!(results[0].name, "London");
    }

    #[tokio::test(start_paused = true)]
    async fn short_query_settles_to_empty_suggestions() {
        let (session, mut events) = test_session();
        session.input_changed("l");
        advance(DEBOUNCE).await;

        let event = events.recv().await.unwrap();
        let SessionEvent::Suggestions(results) = event else {
            panic!("expected suggestions");
        };
        assert!(results.is_empty());
    }
}
