//! Request assembly.

use crate::conversation::Message;

/// The persona and scope of the bot. It is sent first in every request and
/// is never stored in the transcript or shown to the user.
pub const SYSTEM_INSTRUCTION: &str = "\
You are Code Chuckles, a friendly chatbot that ONLY tells programming-related \
jokes, puns, one-liners, and light-hearted humorous takes on code, debugging, \
languages, tools, version control, AI, regex, and dev life. Keep jokes \
safe-for-work and non-offensive. Be witty and kind.

Guidelines:
- Keep responses concise (1–3 sentences) unless asked for more.
- If the request is vague, ask for a topic or language preference.
- Tailor jokes to the user's prompt when possible.
- Avoid providing non-joke factual content unless it enhances the humor.";

/// Builds the ordered message list for one completion request:
/// the system instruction, then `history`, then `user_message`.
///
/// `history` is the transcript before the new turn.
pub fn assemble(history: &[Message], user_message: &Message) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Message::system(SYSTEM_INSTRUCTION));
    messages.extend_from_slice(history);
    messages.push(user_message.clone());
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{Role, Transcript};

    #[test]
    fn test_assemble_empty_history() {
        let messages = assemble(&[], &Message::user("Git mishaps"));
        assert_eq!(
            messages,
            [Message::system(SYSTEM_INSTRUCTION), Message::user("Git mishaps")]
        );
    }

    #[test]
    fn test_assemble_keeps_history_in_between() {
        let mut transcript = Transcript::default();
        transcript.append_turn(
            Message::user("Python"),
            Message::assistant("It's all fun until the indentation."),
        );
        transcript.append_turn(
            Message::user("CSS"),
            Message::assistant("!important"),
        );
        let user_message = Message::user("Regex");
        let messages = assemble(transcript.all(), &user_message);

        assert_eq!(messages.len(), transcript.len() + 2);
        assert_eq!(messages[0].role(), Role::System);
        assert_eq!(messages[0].content(), SYSTEM_INSTRUCTION);
        assert_eq!(&messages[1..messages.len() - 1], transcript.all());
        assert_eq!(messages.last(), Some(&user_message));

        // The transcript itself is left untouched.
        assert_eq!(transcript.len(), 4);
    }

    #[test]
    fn test_instruction_mentions_scope_and_length() {
        assert!(SYSTEM_INSTRUCTION.contains("ONLY tells programming-related"));
        assert!(SYSTEM_INSTRUCTION.contains("1–3 sentences"));
        assert!(SYSTEM_INSTRUCTION.contains("ask for a topic"));
    }
}
