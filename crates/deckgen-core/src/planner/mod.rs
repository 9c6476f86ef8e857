//! Outline planning.
//!
//! [`Planner::plan`] sends the input text to the completion service and
//! turns the reply into a validated [`DeckOutline`]. An unusable reply is
//! never fatal: the planner falls back to [`fallback_outline`]. Failures of
//! the completion service itself are returned to the caller.

pub mod prompt;

use crate::completion::{CompletionClient, CompletionError, CompletionRequest};
use crate::config::DeckConfig;
use crate::outline::{DeckOutline, fallback_outline, outline_from_reply};

pub use prompt::{build_system_prompt, build_user_prompt};

/// Where a planned outline came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    /// The model's reply was parsed and normalized.
    Model,
    /// The reply was unusable and the deterministic splitter was used.
    Fallback,
}

/// A planned outline and its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedDeck {
    pub outline: DeckOutline,
    pub source: PlanSource,
}

/// Plans decks with a completion client.
pub struct Planner {
    config: DeckConfig,
    client: Box<dyn CompletionClient>,
}

impl Planner {
    pub fn new(config: DeckConfig, client: Box<dyn CompletionClient>) -> Self {
        Self { config, client }
    }

    /// Plan a deck for `input`.
    pub async fn plan(&self, input: &str) -> Result<PlannedDeck, CompletionError> {
        let request = CompletionRequest {
            model: self.config.llm.model.clone(),
            temperature: self.config.llm.temperature,
            system: build_system_prompt(&self.config),
            user: build_user_prompt(input),
        };

        tracing::info!(
            client = self.client.name(),
            model = %request.model,
            input_chars = input.chars().count(),
            "requesting outline"
        );
        let reply = self.client.complete(&request).await?;
        Ok(self.plan_from_reply(input, &reply))
    }

    /// Turn a completion reply into an outline, falling back on `input` when
    /// the reply is unusable.
    pub fn plan_from_reply(&self, input: &str, reply: &str) -> PlannedDeck {
        match outline_from_reply(reply, &self.config) {
            Ok(outline) => {
                tracing::info!(slides = outline.slides.len(), title = %outline.title, "outline planned");
                PlannedDeck {
                    outline,
                    source: PlanSource::Model,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, reply = %reply, "unusable model reply, using fallback outline");
                PlannedDeck {
                    outline: fallback_outline(input, &self.config),
                    source: PlanSource::Fallback,
                }
            }
        }
    }
}

impl std::fmt::Debug for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planner")
            .field("client", &self.client.name())
            .field("model", &self.config.llm.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::outline::Layout;

    /// Returns a fixed reply and records the request it saw.
    struct CannedClient {
        reply: Result<String, u16>,
        seen: Arc<Mutex<Option<CompletionRequest>>>,
    }

    #[async_trait]
    impl CompletionClient for CannedClient {
        fn name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
            *self.seen.lock().unwrap() = Some(request.clone());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(CompletionError::Status {
                    status: *status,
                    body: "boom".to_owned(),
                }),
            }
        }
    }

    fn planner(reply: Result<&str, u16>) -> (Planner, Arc<Mutex<Option<CompletionRequest>>>) {
        let seen = Arc::new(Mutex::new(None));
        let client = CannedClient {
            reply: reply.map(str::to_owned),
            seen: Arc::clone(&seen),
        };
        (Planner::new(DeckConfig::default(), Box::new(client)), seen)
    }

    #[tokio::test]
    async fn model_reply_is_used_when_valid() {
        let (planner, seen) = planner(Ok(
            r#"{"title": "T", "slides": [{"title": "正文", "layout": "two_column"}]}"#,
        ));
        let planned = planner.plan("输入").await.unwrap();

        assert_eq!(planned.source, PlanSource::Model);
        assert_eq!(planned.outline.slides[0].layout, Layout::Title);
        assert_eq!(planned.outline.slides[1].layout, Layout::TwoColumn);

        let request = seen.lock().unwrap().clone().expect("request recorded");
        assert_eq!(request.model, "gpt-4o-mini");
        assert!(request.user.contains("输入"));
        assert!(request.system.contains("可用的布局类型"));
    }

    #[tokio::test]
    async fn garbage_reply_falls_back() {
        let (planner, _) = planner(Ok("I cannot help with that."));
        let planned = planner.plan("第一段\n第二段").await.unwrap();

        assert_eq!(planned.source, PlanSource::Fallback);
        assert_eq!(planned.outline.title, "演示文稿");
        assert!(planned.outline.slides.len() >= 2);
    }

    #[tokio::test]
    async fn service_failure_is_propagated() {
        let (planner, _) = planner(Err(503));
        let err = planner.plan("text").await.unwrap_err();
        assert!(matches!(err, CompletionError::Status { status: 503, .. }), "got: {err}");
    }

    #[test]
    fn debug_hides_client_internals() {
        let (planner, _) = planner(Ok("{}"));
        let debug = format!("{planner:?}");
        assert!(debug.contains("canned") && debug.contains("gpt-4o-mini"), "{debug}");
    }
}
