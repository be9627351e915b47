use std::collections::VecDeque;
use std::sync::Mutex;

use psyreport_bedrock::error::GenerationError;
use psyreport_bedrock::service::{
    BoxFuture, GenerationOutput, GenerationRequest, GenerationService,
};

/// A generation service that replays queued answers and records requests.
pub struct CannedGenerator {
    answers: Mutex<VecDeque<Result<serde_json::Value, GenerationError>>>,
    pub requests: Mutex<Vec<GenerationRequest>>,
}

impl CannedGenerator {
    pub fn new(answers: Vec<Result<serde_json::Value, GenerationError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(json: serde_json::Value) -> Self {
        Self::new(vec![Ok(json)])
    }

    pub fn failing(error: GenerationError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn last_request(&self) -> GenerationRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl GenerationService for CannedGenerator {
    fn model_id(&self) -> &str {
        "canned-model"
    }

    fn generate(
        &self,
        request: GenerationRequest,
    ) -> BoxFuture<'_, Result<GenerationOutput, GenerationError>> {
        self.requests.lock().unwrap().push(request);
        let answer = self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::Invocation("no canned answer left".into())));
        Box::pin(async move { answer.map(|json| GenerationOutput { json, usage: None }) })
    }
}
