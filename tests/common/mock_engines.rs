/*!
 * Mock engine implementations for testing
 *
 * This module provides a mock translation engine so tests never talk to a
 * real inference runner. The mock tracks every generation call and can be
 * configured with language/vocabulary tables and failure behavior.
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use lingohub::engines::{Engine, EngineInput, EngineOutput, TokenId};
use lingohub::errors::EngineError;

/// Tracks generation calls to ensure no unexpected engine traffic
#[derive(Debug, Default)]
pub struct EngineCallTracker {
    /// Count of generate calls made
    pub generate_calls: usize,
    /// Last input received
    pub last_input: Option<EngineInput>,
    /// Should the next call fail
    pub should_fail: bool,
}

/// Mock translation engine with configurable tables and canned output
#[derive(Debug)]
pub struct MockEngine {
    tracker: Arc<Mutex<EngineCallTracker>>,
    lang_tokens: HashMap<String, TokenId>,
    vocab: HashMap<String, TokenId>,
    response_text: String,
}

impl MockEngine {
    /// Create a mock that answers every generation with the given text
    pub fn new(response_text: impl Into<String>) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(EngineCallTracker::default())),
            lang_tokens: HashMap::new(),
            vocab: HashMap::new(),
            response_text: response_text.into(),
        }
    }

    /// Add an entry to the language-code table
    pub fn lang_token(mut self, code: impl Into<String>, id: TokenId) -> Self {
        self.lang_tokens.insert(code.into(), id);
        self
    }

    /// Add an entry to the vocabulary table
    pub fn vocab_entry(mut self, token: impl Into<String>, id: TokenId) -> Self {
        self.vocab.insert(token.into(), id);
        self
    }

    /// Get the call tracker
    pub fn tracker(&self) -> Arc<Mutex<EngineCallTracker>> {
        self.tracker.clone()
    }

    /// Configure the mock to fail on the next generation call
    pub fn fail_next_call(&self) {
        let mut tracker = self.tracker.lock().unwrap();
        tracker.should_fail = true;
    }
}

#[async_trait]
impl Engine for MockEngine {
    async fn generate(&self, input: &EngineInput) -> Result<EngineOutput, EngineError> {
        let mut tracker = self.tracker.lock().unwrap();
        tracker.generate_calls += 1;
        tracker.last_input = Some(input.clone());

        if tracker.should_fail {
            tracker.should_fail = false; // Reset for next call
            return Err(EngineError::ConnectionError("Connection refused".into()));
        }

        Ok(EngineOutput {
            text: self.response_text.clone(),
        })
    }

    fn lang_token(&self, lang: &str) -> Option<TokenId> {
        self.lang_tokens.get(lang).copied()
    }

    fn vocab_token(&self, token: &str) -> Option<TokenId> {
        self.vocab.get(token).copied()
    }
}
