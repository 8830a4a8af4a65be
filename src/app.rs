//! Application object: test methods plus the networked `run` entry point

use once_cell::sync::OnceCell;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::config::Config;
use crate::error::Result;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::methods;
use crate::record::TestRecord;

static INSTANCE: OnceCell<App> = OnceCell::new();

/// Envelope returned by [`App::run`]
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Success { data: Value },
    Failure { message: String },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success { .. })
    }
}

impl Serialize for RunOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RunOutcome", 2)?;
        match self {
            RunOutcome::Success { data } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            RunOutcome::Failure { message } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("message", message)?;
            }
        }
        state.end()
    }
}

pub struct App {
    config: Config,
    fetcher: Arc<dyn Fetcher>,
    last_response: Mutex<Option<Value>>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.api)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            config,
            fetcher,
            last_response: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn test_method(&self, n: u32, param1: &str, param2: f64) -> Result<TestRecord> {
        methods::test_method(n, param1, param2)
    }

    /// Fetch the configured endpoint once; failures are reported in the envelope, never raised.
    pub async fn run(&self, mode: &str) -> RunOutcome {
        info!("Running in {} mode", mode);
        match self.fetcher.fetch(mode).await {
            Ok(data) => {
                info!("Response received: {}", data);
                *self.last_response.lock().await = Some(data.clone());
                RunOutcome::Success { data }
            }
            Err(e) => {
                error!("Run failed: {}", e);
                RunOutcome::Failure {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Payload stored by the most recent successful `run`
    pub async fn last_response(&self) -> Option<Value> {
        self.last_response.lock().await.clone()
    }
}

/// Process-wide instance, built from `Config::load` on first use
pub fn init() -> Result<&'static App> {
    match INSTANCE.get() {
        Some(app) => Ok(app),
        None => init_with(Config::load()?),
    }
}

/// Like [`init`], but with an already loaded config; ignored once the instance exists
pub fn init_with(config: Config) -> Result<&'static App> {
    INSTANCE.get_or_try_init(|| App::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FixtureError;
    use async_trait::async_trait;
    use serde_json::json;

    struct StaticFetcher(Value);

    #[async_trait]
    impl Fetcher for StaticFetcher {
        async fn fetch(&self, _mode: &str) -> Result<Value> {
            Ok(self.0.clone())
        }
    }

    struct RejectingFetcher;

    #[async_trait]
    impl Fetcher for RejectingFetcher {
        async fn fetch(&self, _mode: &str) -> Result<Value> {
            Err(FixtureError::Http {
                message: "connection refused".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn run_success_stores_response() {
        let app = App::with_fetcher(
            Config::default(),
            Arc::new(StaticFetcher(json!({"items": [1, 2]}))),
        );
        assert!(app.last_response().await.is_none());

        let outcome = app.run("test").await;
        assert_eq!(
            outcome,
            RunOutcome::Success {
                data: json!({"items": [1, 2]})
            }
        );
        assert_eq!(app.last_response().await, Some(json!({"items": [1, 2]})));
    }

    #[tokio::test]
    async fn run_failure_reports_message() {
        let app = App::with_fetcher(Config::default(), Arc::new(RejectingFetcher));
        let outcome = app.run("test").await;
        assert!(!outcome.is_success());
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "HTTP error: connection refused");
        assert!(app.last_response().await.is_none());
    }

    #[test]
    fn test_methods_are_reachable_through_the_app() {
        let app = App::with_fetcher(Config::default(), Arc::new(RejectingFetcher));
        assert_eq!(app.config().api.retries, 0);
        let record = app.test_method(12, "via app", 2.0).unwrap();
        assert_eq!(record.value, 24.0);
        assert!(app.test_method(2001, "via app", 2.0).is_err());
    }

    #[test]
    fn success_envelope_keeps_null_data() {
        let json = serde_json::to_value(RunOutcome::Success { data: Value::Null }).unwrap();
        assert_eq!(json, json!({"success": true, "data": null}));
    }
}
