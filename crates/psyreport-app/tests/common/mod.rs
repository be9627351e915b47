#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use tokio::sync::Notify;

use psyreport_app::state::IntakeState;
use psyreport_bedrock::error::GenerationError;
use psyreport_bedrock::service::{
    BoxFuture, GenerationOutput, GenerationRequest, GenerationService,
};

/// A generation service that replays queued answers and records requests.
///
/// A gated generator holds every answer until the gate is notified, which
/// lets a test act while a request is in flight.
pub struct CannedGenerator {
    answers: Mutex<VecDeque<Result<Value, GenerationError>>>,
    gate: Option<Arc<Notify>>,
    pub requests: Mutex<Vec<GenerationRequest>>,
}

impl CannedGenerator {
    pub fn new(answers: Vec<Result<Value, GenerationError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            gate: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn gated(gate: Arc<Notify>, answers: Vec<Result<Value, GenerationError>>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(answers)
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
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
        let gate = self.gate.clone();
        Box::pin(async move {
            if let Some(gate) = gate {
                gate.notified().await;
            }
            answer.map(|json| GenerationOutput { json, usage: None })
        })
    }
}

pub fn state_with(generator: Arc<CannedGenerator>) -> IntakeState {
    IntakeState::new(generator)
}

pub fn jane_doe_extraction() -> Value {
    json!({
        "subjectName": "Jane Doe",
        "subjectAge": "34",
        "subjectGender": "Female",
        "assessmentType": "MMPI-3",
        "results": "T=65",
        "observations": "Cooperative, euthymic"
    })
}

pub fn jane_doe_synthesis() -> Value {
    json!({
        "suggestedTitle": "Psychodiagnostic Evaluation Report",
        "summary": "Elevated scale scores warrant clinical follow-up."
    })
}
