//! Search workflow: geocode a place, fetch its forecast, publish the view.
//!
//! Every trigger takes a new generation number. A search may only touch the
//! view while its generation is still the latest, so when searches overlap the
//! most recently started one wins and older results are dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use skycast_core::{AppError, WeatherConfig, WeatherError};
use skycast_weather::{Geocoder, WeatherProvider};

use crate::error_mapping::to_app_error;
use crate::models::{build_weather_view, SearchPhase, ViewState, WeatherView};
use crate::sink::ViewSink;

/// Orchestrator knobs, usually taken from `WeatherConfig`
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub default_place: String,
    pub startup_delay: Duration,
    pub error_dismiss: Duration,
    pub icon_base_url: String,
}

impl From<&WeatherConfig> for SearchSettings {
    fn from(config: &WeatherConfig) -> Self {
        Self {
            default_place: config.default_place.clone(),
            startup_delay: Duration::from_millis(config.startup_delay_ms),
            error_dismiss: Duration::from_secs(config.error_dismiss_secs),
            icon_base_url: config.icon_base_url.clone(),
        }
    }
}

/// What happened to a search that ran to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The result was rendered
    Applied,
    /// A newer search started first; the result was dropped
    Superseded,
}

struct Inner {
    view: ViewState,
    /// Generation whose error message is currently on screen
    error_generation: Option<u64>,
}

pub struct SearchOrchestrator {
    geocoder: Geocoder,
    provider: WeatherProvider,
    settings: SearchSettings,
    sink: Arc<dyn ViewSink>,
    generation: AtomicU64,
    state: Mutex<Inner>,
}

impl SearchOrchestrator {
    pub fn new(
        geocoder: Geocoder,
        provider: WeatherProvider,
        settings: SearchSettings,
        sink: Arc<dyn ViewSink>,
    ) -> Arc<Self> {
        Arc::new(Self {
            geocoder,
            provider,
            settings,
            sink,
            generation: AtomicU64::new(0),
            state: Mutex::new(Inner {
                view: ViewState::default(),
                error_generation: None,
            }),
        })
    }

    /// Build the geocoder and forecast clients from configuration.
    pub fn from_config(
        config: &WeatherConfig,
        sink: Arc<dyn ViewSink>,
    ) -> Result<Arc<Self>, AppError> {
        let geocoder = Geocoder::new(config.geocoding_url.clone()).map_err(to_app_error)?;
        let provider = WeatherProvider::new(config.forecast_url.clone()).map_err(to_app_error)?;
        Ok(Self::new(geocoder, provider, SearchSettings::from(config), sink))
    }

    /// Snapshot of the current view
    pub fn view(&self) -> ViewState {
        self.state.lock().view.clone()
    }

    /// Run a search now, in the caller's task.
    ///
    /// Errors are rendered and also returned. A superseded search still
    /// returns its own error, but leaves the view alone.
    pub async fn search(self: &Arc<Self>, query: &str) -> Result<SearchOutcome, AppError> {
        let query = query.trim();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if query.is_empty() {
            let err = AppError::Weather(WeatherError::EmptyQuery);
            self.fail(generation, &err);
            return Err(err);
        }

        tracing::info!("Searching weather for {:?} (generation {})", query, generation);
        self.apply(generation, |inner| {
            inner.view.phase = SearchPhase::Searching;
            inner.view.loading = true;
            inner.view.error_message = None;
            inner.error_generation = None;
        });

        match self.lookup(query).await {
            Ok(weather) => {
                let city = weather.city_label.clone();
                let applied = self.apply(generation, |inner| {
                    inner.view.phase = SearchPhase::Success;
                    inner.view.loading = false;
                    inner.view.error_message = None;
                    inner.view.show_empty_state = false;
                    inner.view.weather = Some(weather);
                    inner.error_generation = None;
                });

                if applied {
                    tracing::info!("Rendered weather for {}", city);
                    Ok(SearchOutcome::Applied)
                } else {
                    tracing::debug!(
                        "Dropping result for {:?}: generation {} superseded",
                        query,
                        generation
                    );
                    Ok(SearchOutcome::Superseded)
                }
            }
            Err(err) => {
                tracing::warn!("Weather search for {:?} failed: {}", query, err);
                self.fail(generation, &err);
                Err(err)
            }
        }
    }

    /// Start a search in the background. Used for explicit search actions.
    pub fn trigger(
        self: &Arc<Self>,
        query: impl Into<String>,
    ) -> JoinHandle<Result<SearchOutcome, AppError>> {
        let this = Arc::clone(self);
        let query = query.into();
        tokio::spawn(async move { this.search(&query).await })
    }

    /// The Enter key was pressed with `input` in the search box.
    pub fn on_enter_key(self: &Arc<Self>, input: &str) -> JoinHandle<Result<SearchOutcome, AppError>> {
        self.trigger(input)
    }

    /// Search for the default place once the startup delay has passed.
    pub fn schedule_startup_search(self: &Arc<Self>) -> JoinHandle<Result<SearchOutcome, AppError>> {
        let this = Arc::clone(self);
        let delay = self.settings.startup_delay;
        let place = self.settings.default_place.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            this.search(&place).await
        })
    }

    async fn lookup(&self, query: &str) -> Result<WeatherView, AppError> {
        let place = self.geocoder.geocode(query).await.map_err(to_app_error)?;
        let payload = self
            .provider
            .fetch_weather(place.latitude, place.longitude, &place.timezone_id)
            .await
            .map_err(to_app_error)?;
        Ok(build_weather_view(&place, &payload, &self.settings.icon_base_url))
    }

    /// Mutate and render the view, but only for the latest generation.
    fn apply(&self, generation: u64, update: impl FnOnce(&mut Inner)) -> bool {
        let mut inner = self.state.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        update(&mut inner);
        self.sink.render(&inner.view);
        true
    }

    /// Show an error; the previously rendered weather stays as it was.
    fn fail(self: &Arc<Self>, generation: u64, err: &AppError) {
        let message = err.user_message().to_string();
        let applied = self.apply(generation, |inner| {
            inner.view.phase = SearchPhase::Failed;
            inner.view.loading = false;
            inner.view.error_message = Some(message);
            inner.error_generation = Some(generation);
        });

        if applied {
            self.schedule_dismiss(generation);
        }
    }

    fn schedule_dismiss(self: &Arc<Self>, generation: u64) {
        let weak: Weak<Self> = Arc::downgrade(self);
        let delay = self.settings.error_dismiss;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(this) = weak.upgrade() {
                this.dismiss_error(generation);
            }
        });
    }

    fn dismiss_error(&self, generation: u64) {
        let mut inner = self.state.lock();
        if inner.error_generation != Some(generation) {
            return;
        }
        inner.error_generation = None;
        inner.view.error_message = None;
        self.sink.render(&inner.view);
    }
}
