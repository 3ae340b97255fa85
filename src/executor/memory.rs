// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use redis::{ErrorKind, RedisError, Value};

use super::traits::{CommandExecutor, Result};

/// A command as it would have been sent to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub command: String,
    pub args: Vec<String>,
}

/// In-process executor that records every command and answers from a queue
/// of scripted replies. Once the queue is drained it answers `OK`.
pub struct ScriptedExecutor {
    replies: Mutex<VecDeque<std::result::Result<Value, RedisError>>>,
    sent: Mutex<Vec<RecordedCommand>>,
}

impl ScriptedExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Queue a reply for the next unanswered command.
    pub fn push_reply(&self, reply: Value) {
        self.replies.lock().push_back(Ok(reply));
    }

    /// Queue an engine error (`-ERR ...`) for the next unanswered command.
    pub fn push_error(&self, message: &'static str) {
        let err = RedisError::from((ErrorKind::ResponseError, "engine error", message.to_string()));
        self.replies.lock().push_back(Err(err));
    }

    /// Everything sent so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> Vec<RecordedCommand> {
        self.sent.lock().clone()
    }

    #[must_use]
    pub fn last_sent(&self) -> Option<RecordedCommand> {
        self.sent.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.replies.lock().clear();
        self.sent.lock().clear();
    }
}

impl Default for ScriptedExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn execute(&self, command: &str, args: &[String]) -> Result<Value> {
        self.sent.lock().push(RecordedCommand {
            command: command.to_string(),
            args: args.to_vec(),
        });

        match self.replies.lock().pop_front() {
            Some(Ok(value)) => Ok(value),
            Some(Err(e)) => Err(e.into()),
            None => Ok(Value::Okay),
        }
    }
}
