//! Scripted `LlmBackend` for agent and route tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{LlmBackend, LlmError};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub system_instruction: Option<String>,
    pub json_mode: bool,
}

/// Replays queued replies in order and records every prompt it receives.
/// Running out of replies is reported as a transport failure.
#[derive(Default)]
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedLlm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, status: u16) -> Self {
        self.replies.lock().unwrap().push_back(Err(LlmError::Api {
            status,
            message: "scripted failure".to_string(),
        }));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmBackend for ScriptedLlm {
    async fn invoke(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
        json_mode: bool,
    ) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            system_instruction: system_instruction.map(str::to_string),
            json_mode,
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}
