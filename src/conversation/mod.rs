//! Conversation management for the advisor client
//!
//! A [`ChatSession`] owns the message list, the user profile and the chat
//! window for one user. It is initialised from durable storage, mutated once
//! per submitted message, and persists after every change.
//!
//! # Window
//!
//! - On load the list holds at most [`LOAD_WINDOW`] messages, the first of
//!   which is a freshly built system prompt.
//! - After a reply, once the list grows past [`TRIM_TRIGGER`], it is rebuilt
//!   as one system message plus the last [`TRIM_KEEP`] non-system messages.
//! - At most one system message exists, always at index 0.
//!
//! # Persistence
//!
//! Storage is best-effort. Read failures fall back to defaults and write
//! failures are logged and otherwise ignored.

pub mod client;
pub mod profile;
pub mod transcript;

pub use client::{HttpRelayClient, RelayClient, FALLBACK_REPLY};
pub use profile::{extract_name, Profile};
pub use transcript::{Bubble, BubbleKind, Transcript};

use crate::message::Message;
use crate::prompts::build_system_prompt;
use crate::storage::{KeyValueStore, MESSAGES_KEY, PROFILE_KEY};

/// Maximum number of messages kept when a stored conversation is loaded
pub const LOAD_WINDOW: usize = 20;

/// Message count above which the conversation is trimmed
pub const TRIM_TRIGGER: usize = 25;

/// Non-system messages retained by a trim
pub const TRIM_KEEP: usize = 20;

/// Shown when a fresh conversation opens
pub const GREETING: &str = "👋 Hi! Ask me about L’Oréal products or routines.";

/// Shown when the relay round-trip fails
pub const APOLOGY: &str = "⚠️ Sorry—couldn’t reach the assistant. Please try again.";

/// Result of submitting one line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was blank; nothing happened
    Ignored,
    /// The assistant replied with this text
    Replied(String),
    /// The relay call failed and the apology was shown
    Failed,
}

/// Banner echoing the question currently being answered
pub fn latest_question_banner(question: &str) -> String {
    format!("Latest question: {}", question.trim())
}

/// Read the profile, falling back to an empty one on any failure
pub fn load_profile(store: &dyn KeyValueStore) -> Profile {
    match store.get(PROFILE_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Stored profile is malformed; starting fresh");
            Profile::default()
        }),
        Ok(None) => Profile::default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read profile");
            Profile::default()
        }
    }
}

/// Read the stored conversation, or seed one holding only the system prompt
///
/// Stored system messages are discarded and replaced by a prompt built
/// from `profile`, so prompt changes apply to old conversations too. The
/// result is capped at [`LOAD_WINDOW`] messages, system prompt included.
pub fn load_messages_or_seed(store: &dyn KeyValueStore, profile: &Profile) -> Vec<Message> {
    let system = Message::system(build_system_prompt(profile));

    let stored = match store.get(MESSAGES_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<Message>>(&raw) {
            Ok(messages) => Some(messages),
            Err(e) => {
                tracing::warn!(error = %e, "Stored conversation is malformed; reseeding");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read conversation");
            None
        }
    };

    let Some(stored) = stored else {
        return vec![system];
    };

    let rest: Vec<Message> = stored.into_iter().filter(|m| !m.is_system()).collect();
    let skip = rest.len().saturating_sub(LOAD_WINDOW - 1);

    std::iter::once(system)
        .chain(rest.into_iter().skip(skip))
        .collect()
}

/// Rebuild `messages` as one system message plus the last [`TRIM_KEEP`]
/// non-system messages
///
/// The first existing system message is kept; `default_system` is used
/// only when there is none.
pub fn trim_conversation(messages: &[Message], default_system: &str) -> Vec<Message> {
    let system = messages
        .iter()
        .find(|m| m.is_system())
        .cloned()
        .unwrap_or_else(|| Message::system(default_system));

    let rest: Vec<&Message> = messages.iter().filter(|m| !m.is_system()).collect();
    let skip = rest.len().saturating_sub(TRIM_KEEP);

    std::iter::once(system)
        .chain(rest.into_iter().skip(skip).cloned())
        .collect()
}

/// One user's conversation with the advisor
pub struct ChatSession<S: KeyValueStore> {
    store: S,
    profile: Profile,
    messages: Vec<Message>,
    transcript: Transcript,
    latest_question: Option<String>,
}

impl<S: KeyValueStore> ChatSession<S> {
    /// Open a session from whatever `store` holds
    ///
    /// Never fails: unreadable state is replaced by defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use advisor_chat::conversation::{ChatSession, GREETING};
    /// use advisor_chat::storage::MemoryStore;
    ///
    /// let session = ChatSession::open(MemoryStore::new());
    /// assert_eq!(session.messages().len(), 1);
    /// assert_eq!(session.transcript().bubbles()[0].text, GREETING);
    /// ```
    pub fn open(store: S) -> Self {
        let profile = load_profile(&store);
        let messages = load_messages_or_seed(&store, &profile);

        let mut transcript = Transcript::default();
        if messages.len() <= 1 {
            transcript.push(BubbleKind::Assistant, GREETING);
        }
        let restored = Transcript::restore(&messages);
        for bubble in restored.bubbles() {
            transcript.push(bubble.kind, bubble.text.clone());
        }

        tracing::debug!(
            messages = messages.len(),
            has_name = profile.has_name(),
            "Opened chat session"
        );

        Self {
            store,
            profile,
            messages,
            transcript,
            latest_question: None,
        }
    }

    /// The current system prompt for this session's profile
    pub fn system_prompt(&self) -> String {
        build_system_prompt(&self.profile)
    }

    /// Current conversation, system prompt first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The user's profile
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// The chat window
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The most recently submitted question, if any
    pub fn latest_question(&self) -> Option<&str> {
        self.latest_question.as_deref()
    }

    /// The backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist the profile, ignoring storage failures
    pub fn save_profile(&self) {
        let result = serde_json::to_string(&self.profile)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.store.set(PROFILE_KEY, &json));
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to save profile");
        }
    }

    /// Persist the conversation, ignoring storage failures
    pub fn persist_messages(&self) {
        let result = serde_json::to_string(&self.messages)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.store.set(MESSAGES_KEY, &json));
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to persist conversation");
        }
    }

    /// Messages sent to the relay: a fresh system prompt, then the
    /// non-system history
    pub fn request_payload(&self) -> Vec<Message> {
        std::iter::once(Message::system(self.system_prompt()))
            .chain(self.messages.iter().filter(|m| !m.is_system()).cloned())
            .collect()
    }

    /// Submit one line of user input and wait for the assistant
    ///
    /// The user message is recorded and persisted before the relay is
    /// called, so it survives a failed round-trip. A failure shows
    /// [`APOLOGY`] once and adds no assistant message. There is no retry.
    pub async fn submit<R>(&mut self, text: &str, relay: &R) -> SubmitOutcome
    where
        R: RelayClient + ?Sized,
    {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }

        self.latest_question = Some(text.to_string());
        self.transcript.push(BubbleKind::User, text);

        if !self.profile.has_name() {
            if let Some(name) = extract_name(text) {
                tracing::info!("Learned the user's name");
                self.profile.adopt_name(&name);
                self.save_profile();
                self.refresh_system_prompt();
            }
        }

        self.messages.push(Message::user(text));
        self.persist_messages();

        let payload = self.request_payload();
        match relay.complete(&payload).await {
            Ok(reply) => {
                self.transcript.push(BubbleKind::Assistant, reply.clone());
                self.messages.push(Message::assistant(reply.clone()));
                if self.messages.len() > TRIM_TRIGGER {
                    self.messages = trim_conversation(&self.messages, &self.system_prompt());
                    tracing::debug!(messages = self.messages.len(), "Trimmed conversation");
                }
                self.persist_messages();
                SubmitOutcome::Replied(reply)
            }
            Err(e) => {
                tracing::error!(error = %e, "Relay request failed");
                self.transcript.push(BubbleKind::Assistant, APOLOGY);
                SubmitOutcome::Failed
            }
        }
    }

    fn refresh_system_prompt(&mut self) {
        let system = Message::system(self.system_prompt());
        let rest = self.messages.drain(..).filter(|m| !m.is_system());
        self.messages = std::iter::once(system).chain(rest).collect();
    }
}
