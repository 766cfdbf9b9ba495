//! Wiring of the LLM provider, score store and flows.

use crate::config::{Config, LlmSettings};
use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use veracity_analyzer::{AnalysisFlow, QuizFlow};
use veracity_llm::{GeminiProvider, LlmError};
use veracity_store::{ScoreStore, SqliteStorage};

/// Everything a command needs, built once per process.
pub struct AppContext {
    /// Credibility analysis flow
    pub analysis: AnalysisFlow<GeminiProvider>,
    /// Literacy quiz flow
    pub quiz: QuizFlow<GeminiProvider, SqliteStorage>,
    /// Shared resilience score store
    pub scores: Arc<ScoreStore<SqliteStorage>>,
}

impl AppContext {
    /// Build the context described by `config`.
    ///
    /// A missing API key is not an error: the flows are built without a
    /// provider and report the service as unavailable when used.
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = build_provider(config)?.map(Arc::new);

        let db_path = config.storage_path()?;
        debug!("Opening score database at {}", db_path.display());
        let scores = Arc::new(ScoreStore::open(SqliteStorage::new(&db_path)?)?);

        Ok(Self {
            analysis: AnalysisFlow::with_provider(provider.clone(), config.analyzer.clone()),
            quiz: QuizFlow::with_provider(provider, Arc::clone(&scores), config.analyzer.clone()),
            scores,
        })
    }

    /// Persist the score before exiting.
    pub fn shutdown(&self) -> Result<()> {
        self.scores.flush()?;
        Ok(())
    }
}

fn build_provider(config: &Config) -> Result<Option<GeminiProvider>> {
    let settings: &LlmSettings = &config.llm;

    let provider = match GeminiProvider::from_env(&config.api_key_vars(), settings.model.clone()) {
        Ok(provider) => provider,
        Err(e @ LlmError::MissingCredential(_)) => {
            warn!("{}; analysis and quiz are unavailable", e);
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let provider = provider.with_endpoint(settings.endpoint.clone());
    let provider = if settings.timeout_secs > 0 {
        provider.with_timeout(Duration::from_secs(settings.timeout_secs))?
    } else {
        provider
    };

    Ok(Some(provider))
}
