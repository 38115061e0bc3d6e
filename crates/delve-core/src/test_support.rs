//! Scripted collaborator doubles for tests
//!
//! Both doubles record every call and answer from a FIFO script. When the
//! script runs dry they fall back to a default answer.

use crate::traits::{
    ClassificationRequest, Classifier, CollaboratorError, CollaboratorResult, Researcher,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

type Script = Arc<Mutex<VecDeque<CollaboratorResult<String>>>>;

fn next_answer(script: &Script, default: &str) -> CollaboratorResult<String> {
    script
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Ok(default.to_string()))
}

/// Research double
#[derive(Clone, Default)]
pub struct MockResearcher {
    script: Script,
    default_response: String,
    topics: Arc<Mutex<Vec<String>>>,
}

impl MockResearcher {
    /// Researcher that answers `""` unless scripted
    pub fn new() -> Self {
        Self::default()
    }

    /// Researcher whose fallback answer is `response`
    pub fn with_default(response: &str) -> Self {
        Self {
            default_response: response.to_string(),
            ..Self::default()
        }
    }

    /// Queue a successful answer
    pub fn push_response(&self, response: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(response.to_string()));
    }

    /// Queue a failure
    pub fn push_failure(&self, message: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(CollaboratorError::Http(message.to_string())));
    }

    /// Topics researched so far
    pub fn topics(&self) -> Vec<String> {
        self.topics.lock().unwrap().clone()
    }
}

#[async_trait]
impl Researcher for MockResearcher {
    async fn research(&self, topic: &str) -> CollaboratorResult<String> {
        self.topics.lock().unwrap().push(topic.to_string());
        next_answer(&self.script, &self.default_response)
    }

    fn name(&self) -> &str {
        "mock-researcher"
    }
}

/// Classification double
#[derive(Clone, Default)]
pub struct MockClassifier {
    script: Script,
    default_response: String,
    calls: Arc<Mutex<Vec<ClassificationRequest>>>,
}

impl MockClassifier {
    /// Classifier that answers `""` unless scripted
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifier whose fallback answer is `response`
    pub fn with_default(response: &str) -> Self {
        Self {
            default_response: response.to_string(),
            ..Self::default()
        }
    }

    /// Queue a successful answer
    pub fn push_response(&self, response: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(response.to_string()));
    }

    /// Queue a failure
    pub fn push_failure(&self, message: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(CollaboratorError::Http(message.to_string())));
    }

    /// Requests received so far
    pub fn calls(&self) -> Vec<ClassificationRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, request: ClassificationRequest) -> CollaboratorResult<String> {
        self.calls.lock().unwrap().push(request);
        next_answer(&self.script, &self.default_response)
    }

    fn name(&self) -> &str {
        "mock-classifier"
    }
}
