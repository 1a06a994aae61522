//! System prompt for the beauty advisor
//!
//! The prompt fixes the assistant's persona, scope, refusal behaviour and
//! style. It is rebuilt from the profile every time it is needed, so a
//! profile change or a prompt edit takes effect on the next request.

pub mod advisor_prompt;

use crate::conversation::Profile;

/// Builds the system prompt for the given profile
///
/// Pure in the profile's name: the same profile always yields a
/// byte-identical prompt.
///
/// # Examples
///
/// ```
/// use advisor_chat::conversation::Profile;
/// use advisor_chat::prompts::build_system_prompt;
///
/// let prompt = build_system_prompt(&Profile::named("Ana"));
/// assert!(prompt.contains(r#"The user's name is "Ana"."#));
/// ```
pub fn build_system_prompt(profile: &Profile) -> String {
    advisor_prompt::generate_advisor_prompt(profile.name())
}
