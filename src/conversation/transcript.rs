//! What the user sees: the ordered list of chat bubbles
//!
//! The transcript is display state only. It is rebuilt from the stored
//! messages when a session opens and is never persisted itself.

use crate::message::{Message, Role};

/// Who a bubble is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleKind {
    /// Text the user submitted
    User,
    /// Text shown on the assistant's side (replies, greeting, apology)
    Assistant,
}

/// One entry of the chat window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    /// Side the bubble is drawn on
    pub kind: BubbleKind,
    /// Displayed text
    pub text: String,
}

/// Ordered chat window contents
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    bubbles: Vec<Bubble>,
}

impl Transcript {
    /// Rebuild the visible history from stored messages
    ///
    /// System messages are never shown.
    pub fn restore(messages: &[Message]) -> Self {
        let bubbles = messages
            .iter()
            .filter_map(|m| match m.role {
                Role::User => Some(Bubble {
                    kind: BubbleKind::User,
                    text: m.content.clone(),
                }),
                Role::Assistant => Some(Bubble {
                    kind: BubbleKind::Assistant,
                    text: m.content.clone(),
                }),
                Role::System => None,
            })
            .collect();
        Self { bubbles }
    }

    /// Append a bubble
    pub fn push(&mut self, kind: BubbleKind, text: impl Into<String>) {
        self.bubbles.push(Bubble {
            kind,
            text: text.into(),
        });
    }

    /// All bubbles in display order
    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    /// Most recent bubble
    pub fn last(&self) -> Option<&Bubble> {
        self.bubbles.last()
    }

    /// Number of bubbles
    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    /// Whether the window is empty
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }
}
