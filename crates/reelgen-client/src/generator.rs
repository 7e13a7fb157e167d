//! Generation orchestration: submit, poll, resolve.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::RwLock;
use tracing::{debug, info};

use reelgen_models::{ErrorDetail, Prediction, PredictionStatus, TuningOptions, VideoModel};

use crate::error::{ClientError, ClientResult};
use crate::job::JobState;

/// Configuration for the generation client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the gateway relay prefix
    pub base_url: String,
    /// Fixed delay between polls
    pub poll_interval: Duration,
    /// Poll cap; `None` polls until a terminal status
    pub max_polls: Option<u32>,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8787/api/upstream".to_string(),
            poll_interval: Duration::from_secs(2),
            max_polls: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("REELGEN_API_BASE")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://127.0.0.1:8787/api/upstream".to_string()),
            poll_interval: Duration::from_millis(
                std::env::var("REELGEN_POLL_INTERVAL_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2000),
            ),
            max_polls: std::env::var("REELGEN_MAX_POLLS")
                .ok()
                .and_then(|s| s.parse().ok()),
            request_timeout: Duration::from_secs(
                std::env::var("REELGEN_REQUEST_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }
}

/// Terminal result of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// Upstream-assigned prediction id
    pub prediction_id: String,
    /// Resolved media URL
    pub media_url: String,
}

/// Drives one generation job at a time against the gateway.
///
/// A generation counter protects the shared job state from stale loops:
/// every `generate` call takes a new generation, and a loop may only write
/// state while its generation is still the current one. A superseded loop
/// abandons with [`ClientError::Superseded`] and never overwrites the newer
/// job's state.
pub struct Generator {
    http: Client,
    config: ClientConfig,
    state: Arc<RwLock<JobState>>,
    generation: AtomicU64,
}

impl Generator {
    /// Create a new generator.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            http,
            config,
            state: Arc::new(RwLock::new(JobState::default())),
            generation: AtomicU64::new(0),
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Snapshot of the active job's state.
    pub async fn status(&self) -> JobState {
        self.state.read().await.clone()
    }

    /// Run one generation to its terminal outcome.
    ///
    /// Validates the prompt before any network call, submits the payload to
    /// the model's predictions endpoint, then polls at the configured
    /// interval until the prediction reaches a terminal status. Polls are
    /// strictly sequential; the next one is issued only after the previous
    /// response has been processed.
    pub async fn generate(
        &self,
        prompt: &str,
        model: VideoModel,
        options: TuningOptions,
    ) -> ClientResult<GenerationOutcome> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ClientError::EmptyPrompt);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.update(generation, |state| state.begin()).await;

        info!(model = %model, "Submitting generation request");

        let payload = model.build_payload(prompt, &options);
        let url = format!("{}{}", self.config.base_url, model.submit_path());

        let response = match self.http.post(&url).json(&payload).send().await {
            Ok(response) => response,
            Err(e) => return self.fail_with(generation, ClientError::Network(e)).await,
        };

        if !response.status().is_success() {
            let err = Self::rejection(response).await;
            return self.fail_with(generation, err).await;
        }

        let mut prediction: Prediction = match response.json().await {
            Ok(prediction) => prediction,
            Err(e) => return self.fail_with(generation, ClientError::Network(e)).await,
        };

        info!(id = %prediction.id, status = %prediction.status, "Prediction accepted");

        let prediction_id = prediction.id.clone();
        if !self
            .update(generation, |state| {
                state.submitted(prediction_id.as_str(), prediction.status)
            })
            .await
        {
            return Err(ClientError::Superseded);
        }

        let mut polls: u32 = 0;

        while !prediction.status.is_terminal() {
            if let Some(max) = self.config.max_polls {
                if polls >= max {
                    return self.fail_with(generation, ClientError::PollTimeout(max)).await;
                }
            }

            tokio::time::sleep(self.config.poll_interval).await;

            if self.generation.load(Ordering::SeqCst) != generation {
                debug!(id = %prediction_id, "Poll loop superseded, abandoning");
                return Err(ClientError::Superseded);
            }

            prediction = match self.fetch_prediction(&prediction_id).await {
                Ok(prediction) => prediction,
                Err(e) => return self.fail_with(generation, e).await,
            };
            polls += 1;

            debug!(id = %prediction_id, status = %prediction.status, "Polled prediction");

            if !self
                .update(generation, |state| state.observed(prediction.status))
                .await
            {
                return Err(ClientError::Superseded);
            }
        }

        match prediction.status {
            PredictionStatus::Succeeded => match prediction.media_url() {
                Some(url) => {
                    let media_url = url.to_string();
                    if !self
                        .update(generation, |state| state.succeed(media_url.as_str()))
                        .await
                    {
                        return Err(ClientError::Superseded);
                    }
                    info!(id = %prediction_id, url = %media_url, "Generation succeeded");
                    Ok(GenerationOutcome {
                        prediction_id,
                        media_url,
                    })
                }
                None => self.fail_with(generation, ClientError::MalformedResult).await,
            },
            status => {
                let reason = prediction
                    .error
                    .clone()
                    .unwrap_or_else(|| status.to_string());
                self.fail_with(generation, ClientError::generation_failed(reason))
                    .await
            }
        }
    }

    /// Save the resolved media to a local file.
    pub async fn download_to(
        &self,
        url: &str,
        path: impl AsRef<std::path::Path>,
    ) -> ClientResult<u64> {
        crate::download::download_to(&self.http, url, path.as_ref()).await
    }

    /// Fetch the current state of a prediction.
    async fn fetch_prediction(&self, id: &str) -> ClientResult<Prediction> {
        let url = format!("{}/predictions/{}", self.config.base_url, id);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        Ok(response.json().await?)
    }

    /// Apply a state change, unless this generation has been superseded.
    ///
    /// The check runs under the write lock, so a stale loop can never
    /// interleave a write after a newer generation's.
    async fn update(&self, generation: u64, apply: impl FnOnce(&mut JobState)) -> bool {
        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        apply(&mut state);
        true
    }

    /// Record a failure on the job state and propagate the error.
    async fn fail_with<T>(&self, generation: u64, err: ClientError) -> ClientResult<T> {
        self.update(generation, |state| state.fail(err.to_string()))
            .await;
        Err(err)
    }

    /// Turn a non-success upstream response into an error, preferring the
    /// upstream `detail` message when the body carries one.
    async fn rejection(response: reqwest::Response) -> ClientError {
        let status = response.status();
        match response.json::<ErrorDetail>().await {
            Ok(body) if !body.detail.is_empty() => ClientError::rejection(body.detail),
            _ => ClientError::rejection(format!("upstream returned {}", status)),
        }
    }
}
