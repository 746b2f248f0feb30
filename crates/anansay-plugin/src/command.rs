// SPDX-FileCopyrightText: 2026 anansay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `安安说` command matcher.
//!
//! Matching only extracts the text to draw. Drawing is done by a
//! [`SketchbookRenderer`] the host framework provides.

use std::sync::LazyLock;

use anansay_core::AnanSayError;
use regex::Regex;

/// Command trigger word.
pub const TRIGGER: &str = "安安说";

static SAY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*安安说\s*(?P<content>.*?)\s*$").unwrap());

/// Text extracted from a matching message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SayRequest {
    pub text: String,
}

/// Draws text onto the sketchbook image.
pub trait SketchbookRenderer: Send + Sync {
    /// Encoded image bytes for `text`.
    fn render(&self, text: &str) -> Result<Vec<u8>, AnanSayError>;
}

/// Matches `安安说 <content>` messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct SayCommand;

impl SayCommand {
    pub fn trigger(&self) -> &'static str {
        TRIGGER
    }

    /// Extract the content of a matching message. Messages with nothing after
    /// the trigger do not match.
    pub fn match_message(&self, message: &str) -> Option<SayRequest> {
        let caps = SAY_PATTERN.captures(message)?;
        let text = caps.name("content")?.as_str();
        if text.is_empty() {
            return None;
        }
        Some(SayRequest {
            text: text.to_string(),
        })
    }

    /// Match and render in one step. `Ok(None)` when the message does not match.
    pub fn handle(
        &self,
        message: &str,
        renderer: &dyn SketchbookRenderer,
    ) -> Result<Option<Vec<u8>>, AnanSayError> {
        let Some(request) = self.match_message(message) else {
            return Ok(None);
        };
        tracing::debug!(chars = request.text.chars().count(), "rendering sketchbook");
        renderer.render(&request.text).map(Some)
    }
}
