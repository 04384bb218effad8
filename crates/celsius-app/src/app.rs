//! Application state and the interactive front-end loop.

use anyhow::{Context, Result};
use std::sync::Arc;

use celsius_core::Config;
use celsius_gazetteer::{dataset, Gazetteer, HistoryStore, RecentSearches, Suggestion};
use celsius_radar::{layers::WMS_BASE_URL, RadarPlayer, RadarTimeline, CLOUD_LAYER, RAIN_LAYER};
use celsius_weather::WeatherProvider;
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;
use crate::session::{SearchSession, SessionEvent};

/// Main application state
pub struct App {
    gazetteer: Arc<Gazetteer>,
    provider: WeatherProvider,
    history: Option<HistoryStore>,
    recent: RecentSearches,
    last_location: Option<(f64, f64)>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: &Config) -> Result<Self> {
        let entries = match dataset::load_entries(&config.cities_path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "Gazetteer dataset unavailable ({}): search will return no matches",
                    e
                );
                Vec::new()
            }
        };
        let gazetteer = Arc::new(Gazetteer::new(entries));

        let provider = WeatherProvider::new(config.api_key.clone(), config.base_url.clone())
            .context("Failed to create weather provider")?;

        // History is a convenience, not a startup dependency: degrade to an
        // empty ring when the store is unusable.
        let history = match std::fs::create_dir_all(&config.data_dir)
            .map_err(anyhow::Error::from)
            .and_then(|()| HistoryStore::new(config.history_db_path()).map_err(Into::into))
        {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!("Search history unavailable: {}", e);
                None
            }
        };
        let recent = match history.as_ref().map(|s| s.load_recent()) {
            Some(Ok(ring)) => ring,
            Some(Err(e)) => {
                tracing::warn!("Failed to load recent searches: {}", e);
                RecentSearches::new()
            }
            None => RecentSearches::new(),
        };

        Ok(Self {
            gazetteer,
            provider,
            history,
            recent,
            last_location: None,
        })
    }

    /// Run the interactive loop until stdin closes or the user quits.
    pub async fn run(mut self) -> Result<()> {
        let (session, mut events) =
            SearchSession::spawn(self.gazetteer.clone(), self.provider.clone());

        println!("Celsius - weather lookup");
        println!("Type part of a city name for suggestions, a number to select one,");
        println!("'radar' for the precipitation animation, 'quit' to exit.");
        self.print_recent();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut suggestions: Vec<Suggestion> = Vec::new();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    let input = line.trim();

                    match input {
                        "" => self.print_recent(),
                        "quit" | "exit" => break,
                        "radar" => self.run_radar().await,
                        _ => {
                            if let Ok(n) = input.parse::<usize>() {
                                match suggestions.get(n.wrapping_sub(1)) {
                                    Some(choice) => {
                                        let city = choice.full.clone();
                                        self.remember(&city);
                                        println!("Fetching weather for {}...", city);
                                        session.select(city);
                                    }
                                    None => println!("No suggestion #{}", n),
                                }
                            } else {
                                session.input_changed(input);
                            }
                        }
                    }
                }

                Some(event) = events.recv() => match event {
                    SessionEvent::Suggestions(results) => {
                        suggestions = results;
                        if suggestions.is_empty() {
                            println!("No matches.");
                        } else {
                            for (i, s) in suggestions.iter().enumerate() {
                                println!("  {}. {} ({})", i + 1, s.name, s.country);
                            }
                        }
                    }
                    SessionEvent::Weather { city, bundle } => {
                        self.last_location = Some((bundle.current.lat, bundle.current.lon));
                        tracing::info!("Weather updated for {}", city);
                        println!("{}", render::full_report(&bundle));
                    }
                    SessionEvent::SearchFailed { city, message } => {
                        println!("{}: {}", city, message);
                    }
                },
            }
        }

        Ok(())
    }

    fn print_recent(&self) {
        if self.recent.is_empty() {
            return;
        }
        println!("Recent searches:");
        for item in self.recent.items() {
            println!("  {}", item);
        }
    }

    /// Record a successful selection, most recent first, and persist.
    fn remember(&mut self, value: &str) {
        self.recent.insert(value);
        if let Some(store) = &self.history {
            if let Err(e) = store.save_recent(&self.recent) {
                tracing::warn!("Failed to persist recent searches: {}", e);
            }
        }
    }

    /// Replay the radar window from the oldest frame to the live edge,
    /// printing the tile time parameter for every frame.
    async fn run_radar(&self) {
        let player = RadarPlayer::new(RadarTimeline::new(Utc::now()));
        let mut frames = player.subscribe();

        if let Some((lat, lon)) = self.last_location {
            println!("Radar centered at ({:.4}, {:.4})", lat, lon);
        }
        println!(
            "Radar: {} frames, 5-minute steps, live edge {}",
            player.frame_count(),
            player.time_param()
        );
        println!(
            "Overlays: {} (rain), {} (clouds)",
            RAIN_LAYER.layers, CLOUD_LAYER.layers
        );

        if player.scrub_to(0).is_err() {
            // Empty window cannot happen with a fixed frame count.
            return;
        }
        player.play();

        while frames.changed().await.is_ok() {
            let query = RAIN_LAYER
                .request_params(&player.time_param())
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("&");
            println!(
                "  frame {:>2}/{}  {}?{}",
                player.cursor() + 1,
                player.frame_count(),
                WMS_BASE_URL,
                query
            );
            if !player.is_playing() {
                break;
            }
        }

        println!("Reached the live edge.");
        player.shutdown();
    }
}
