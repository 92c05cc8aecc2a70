//! Message Port Trait
//!
//! This module provides the MessagePort trait for posting messages to a
//! parent execution context. Implementations can post to a real embedding
//! frontend, write to stdout (CLI), or buffer for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::protocol::extract_type;

/// Wildcard target origin: deliver to whatever parent is listening.
pub const ANY_ORIGIN: &str = "*";

/// Outbound port to the parent execution context.
#[async_trait]
pub trait MessagePort: Send + Sync {
    /// Post a message upward to the parent context.
    ///
    /// Pages without a parent succeed silently; posting is best-effort
    /// and callers are expected to tolerate failure.
    async fn post_message(&self, payload: &Value, target_origin: &str) -> Result<()>;
}

/// Port for a top-level page: there is no parent, every post is a no-op.
#[derive(Debug, Default, Clone)]
pub struct NoOpMessagePort;

#[async_trait]
impl MessagePort for NoOpMessagePort {
    async fn post_message(&self, _payload: &Value, _target_origin: &str) -> Result<()> {
        Ok(())
    }
}

/// Stdout port for CLI mode - prints posted messages to the console.
#[derive(Debug, Default, Clone)]
pub struct StdoutMessagePort {
    /// Whether to print in JSON format
    pub json_output: bool,
}

impl StdoutMessagePort {
    pub fn new(json_output: bool) -> Self {
        Self { json_output }
    }
}

#[async_trait]
impl MessagePort for StdoutMessagePort {
    async fn post_message(&self, payload: &Value, target_origin: &str) -> Result<()> {
        if self.json_output {
            println!("{}", serde_json::to_string(payload)?);
        } else {
            let tag = extract_type(payload).unwrap_or("-");
            println!("-> {tag} (origin {target_origin})");
        }
        Ok(())
    }
}

/// Buffering port that records every post for inspection.
#[derive(Debug, Default, Clone)]
pub struct BufferedMessagePort {
    sent: Arc<Mutex<Vec<(Value, String)>>>,
}

impl BufferedMessagePort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages posted so far, in order, with their target origins.
    pub fn sent(&self) -> Vec<(Value, String)> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl MessagePort for BufferedMessagePort {
    async fn post_message(&self, payload: &Value, target_origin: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((payload.clone(), target_origin.to_string()));
        Ok(())
    }
}
