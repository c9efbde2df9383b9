#![allow(dead_code)]

use async_trait::async_trait;
use authdns_application::ports::UpstreamForwarder;
use authdns_domain::{DomainError, Header};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
enum Behaviour {
    /// Reply with the request itself, QR set and the given answer bytes appended.
    Echo(Vec<u8>),
    /// Reply with fixed bytes regardless of the request.
    Fixed(Vec<u8>),
    Fail(DomainError),
}

/// Records every forwarded request.
#[derive(Clone)]
pub struct MockForwarder {
    requests: Arc<Mutex<Vec<Vec<u8>>>>,
    behaviour: Behaviour,
}

impl MockForwarder {
    pub fn echo() -> Self {
        Self::with(Behaviour::Echo(Vec::new()))
    }

    pub fn echo_with_answer(answer: Vec<u8>) -> Self {
        Self::with(Behaviour::Echo(answer))
    }

    pub fn fixed(reply: Vec<u8>) -> Self {
        Self::with(Behaviour::Fixed(reply))
    }

    pub fn failing(error: DomainError) -> Self {
        Self::with(Behaviour::Fail(error))
    }

    fn with(behaviour: Behaviour) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            behaviour,
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<Vec<u8>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamForwarder for MockForwarder {
    async fn forward(&self, request: &[u8]) -> Result<Vec<u8>, DomainError> {
        self.requests.lock().unwrap().push(request.to_vec());

        match &self.behaviour {
            Behaviour::Echo(answer) => {
                let mut header = Header::decode(request)?;
                header.qr = true;
                header.ra = true;
                if !answer.is_empty() {
                    header.ancount = 1;
                }
                let mut reply = header.encode().to_vec();
                reply.extend_from_slice(&request[12..]);
                reply.extend_from_slice(answer);
                Ok(reply)
            }
            Behaviour::Fixed(reply) => Ok(reply.clone()),
            Behaviour::Fail(error) => Err(error.clone()),
        }
    }
}
