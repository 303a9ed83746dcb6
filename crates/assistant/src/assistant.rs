//! The stateless question-answering turn.

use parkguide_config::AssistantConfig;
use parkguide_core::error::{AssistantError, ProviderError};
use parkguide_core::{ChatHistory, Message, ParkInfo, Provider, ProviderRequest};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::prompt::compose_prompt;

/// Appended in place of an answer whenever the completion call fails.
pub const APOLOGY_MESSAGE: &str = "Sorry, I couldn't get an answer right now. Please try again in a moment, or check the official Shanghai Disney Resort app.";

/// The history after a turn, plus the raw error text when the turn failed.
#[derive(Debug, Clone, Serialize)]
pub struct AskOutcome {
    pub history: ChatHistory,
    pub diagnostic: Option<String>,
}

/// Answers one question at a time against a completion [`Provider`].
pub struct Assistant {
    provider: Arc<dyn Provider>,

    /// The model to use
    model: String,

    temperature: f32,

    /// Max tokens per reply
    max_tokens: Option<u32>,

    /// Upper bound on one completion call
    timeout: Duration,
}

impl Assistant {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.7,
            max_tokens: None,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn from_config(provider: Arc<dyn Provider>, config: &AssistantConfig) -> Self {
        Self::new(provider, &config.model)
            .with_temperature(config.temperature)
            .with_max_tokens(config.max_tokens)
            .with_timeout(Duration::from_secs(config.timeout_secs))
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Send the grounded prompt for `question` and return the reply text.
    pub async fn answer(&self, question: &str, info: &ParkInfo) -> Result<String, ProviderError> {
        let mut request = ProviderRequest::single_prompt(&self.model, compose_prompt(info, question));
        request.temperature = self.temperature;
        request.max_tokens = self.max_tokens;

        debug!(model = %self.model, provider = self.provider.name(), "Sending grounded prompt");

        let response = tokio::time::timeout(self.timeout, self.provider.complete(request))
            .await
            .map_err(|_| ProviderError::Timeout(self.timeout.as_secs()))??;

        let text = response.message.content;
        if text.trim().is_empty() {
            return Err(ProviderError::MalformedResponse("empty reply".into()));
        }
        Ok(text)
    }

    /// The assistant message for `question`: the answer, or the apology
    /// together with the error text.
    pub async fn reply(&self, question: &str, info: &ParkInfo) -> (Message, Option<String>) {
        match self.answer(question, info).await {
            Ok(text) => {
                info!(model = %self.model, chars = text.len(), "Assistant answered");
                (Message::assistant(text), None)
            }
            Err(e) => {
                warn!(model = %self.model, error = %e, "Assistant call failed, replying with apology");
                (Message::assistant(APOLOGY_MESSAGE), Some(e.to_string()))
            }
        }
    }

    /// Run one turn over an owned history.
    ///
    /// On success the returned history is `history` plus the trimmed question
    /// and a reply. A completion failure is not an error here: the reply is
    /// [`APOLOGY_MESSAGE`] and the failure text is in `diagnostic`.
    pub async fn ask(
        &self,
        mut history: ChatHistory,
        question: &str,
        info: &ParkInfo,
    ) -> Result<AskOutcome, AssistantError> {
        let question = normalize_question(question)?;
        history.push(Message::user(question));

        let (reply, diagnostic) = self.reply(question, info).await;
        history.push(reply);

        Ok(AskOutcome {
            history,
            diagnostic,
        })
    }
}

/// Trim `question`, rejecting blank input.
pub fn normalize_question(question: &str) -> Result<&str, AssistantError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AssistantError::EmptyQuestion);
    }
    Ok(question)
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use parkguide_core::error::ProviderError;
    use parkguide_core::{Message, Provider, ProviderRequest, ProviderResponse};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records every prompt it receives and answers from a script.
    pub struct ScriptedProvider {
        pub prompts: Mutex<Vec<String>>,
        reply: Result<String, ProviderError>,
        delay: Duration,
    }

    impl ScriptedProvider {
        pub fn replying(text: &str) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                reply: Ok(text.into()),
                delay: Duration::ZERO,
            }
        }

        pub fn failing(err: ProviderError) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                reply: Err(err),
                delay: Duration::ZERO,
            }
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }

        pub fn last_prompt(&self) -> Option<String> {
            self.prompts.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
            assert_eq!(request.messages.len(), 1, "prior history must not be sent");
            self.prompts
                .lock()
                .unwrap()
                .push(request.messages[0].content.clone());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let text = self.reply.clone()?;
            Ok(ProviderResponse {
                message: Message::assistant(text),
                usage: None,
                model: request.model,
            })
        }
    }
}
