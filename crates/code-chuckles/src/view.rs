//! Screen rendering.
//!
//! Rendering is stateless: every redraw produces the whole screen from
//! the transcript and the settings, nothing is diffed against what was
//! drawn before.

use std::fmt::Write as _;

use code_chuckles_core::conversation::{Message, Role};
use code_chuckles_core::settings::{Model, SessionSettings, Temperature};
use owo_colors::{OwoColorize, Style};

use crate::command::USAGE;
use crate::markdown;

/// Moves the cursor home and clears the terminal.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub(crate) const TITLE: &str = "Code Chuckles 🤖💡";
pub(crate) const CAPTION: &str =
    "A friendly chatbot that tells programming jokes.";
pub(crate) const MODEL_HELP: &str =
    "Choose the OpenAI model for joke generation.";
pub(crate) const TEMPERATURE_HELP: &str =
    "Higher = more playful and surprising jokes.";
pub(crate) const TIP: &str =
    "Tip: Ask for jokes about specific languages, tools, or bugs!";
/// The hint shown next to the input prompt.
pub const PLACEHOLDER: &str =
    "Ask for a programming joke (e.g., 'JavaScript closures', 'Git mishaps')";

const BAR_CHAR: &str = "▎";
const RULE: &str = "────────────────────────────────────────────────────";

/// Renders the whole screen: header, settings panel and transcript.
pub fn render_screen(
    transcript: &[Message],
    settings: &SessionSettings,
) -> String {
    let mut out = String::new();
    out.push_str(CLEAR_SCREEN);
    writeln!(out, "{}", TITLE.bold()).ok();
    writeln!(out, "{}", CAPTION.dimmed()).ok();
    writeln!(out).ok();
    out.push_str(&render_settings(settings));
    writeln!(out, "{}", RULE.dimmed()).ok();
    writeln!(out).ok();
    out.push_str(&render_transcript(transcript));
    out
}

/// Renders the settings panel.
pub fn render_settings(settings: &SessionSettings) -> String {
    let mut out = String::new();
    writeln!(out, "{}", "Settings".bold().underline()).ok();

    let models = Model::ALL
        .iter()
        .map(|model| {
            if *model == settings.model {
                format!("{}", format!("(•) {model}").bright_white().bold())
            } else {
                format!("{}", format!("( ) {model}").dimmed())
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "  Model             {models}").ok();
    writeln!(out, "                    {}", MODEL_HELP.dimmed()).ok();

    writeln!(
        out,
        "  Humor Randomness  {}",
        render_slider(settings.temperature)
    )
    .ok();
    writeln!(out, "                    {}", TEMPERATURE_HELP.dimmed()).ok();
    writeln!(out).ok();
    writeln!(out, "  {}", TIP.italic()).ok();
    writeln!(
        out,
        "  {}",
        "/model · /temperature · /clear · /help · /quit".dimmed()
    )
    .ok();
    out
}

/// Renders the temperature slider, e.g. `0.2 [──────●────] 1.2  0.8`.
pub fn render_slider(temperature: Temperature) -> String {
    let track: String = (0..Temperature::positions())
        .map(|pos| if pos == temperature.position() { '●' } else { '─' })
        .collect();
    format!(
        "{} [{}] {}  {}",
        Temperature::MIN,
        track,
        Temperature::MAX,
        temperature.bright_white().bold()
    )
}

/// Renders all messages in order.
pub fn render_transcript(messages: &[Message]) -> String {
    messages.iter().map(render_message).collect()
}

/// Renders one chat bubble, with the markdown in the content styled.
pub fn render_message(msg: &Message) -> String {
    let (icon, bar, base) = match msg.role() {
        Role::User => {
            ("🧑", BAR_CHAR.bright_green().to_string(), Style::new())
        }
        Role::Assistant => (
            "🤖",
            BAR_CHAR.bright_cyan().to_string(),
            Style::new().bright_white(),
        ),
        // Never part of a transcript.
        Role::System => return String::new(),
    };

    let mut out = String::new();
    let lines = markdown::render_lines(msg.content(), base);
    let mut lines = lines.iter();
    let first = lines.next().map(String::as_str).unwrap_or_default();
    writeln!(out, "{bar}{icon} {first}").ok();
    for line in lines {
        writeln!(out, "{bar}   {line}").ok();
    }
    writeln!(out).ok();
    out
}

/// Renders what a redraw prints: the screen, then `footer` (a notice or
/// the help) and the input placeholder last, right above the prompt.
pub fn render_frame(
    transcript: &[Message],
    settings: &SessionSettings,
    footer: Option<&str>,
) -> String {
    let mut out = render_screen(transcript, settings);
    if let Some(footer) = footer {
        out.push_str(footer);
    }
    writeln!(out, "{}", PLACEHOLDER.dimmed()).ok();
    out
}

/// Renders the command list.
pub fn render_help() -> String {
    let mut out = String::new();
    for (usage, description) in USAGE {
        writeln!(out, "  {:<32} {}", usage.bright_white(), description).ok();
    }
    writeln!(out, "  {}", TIP.italic()).ok();
    out
}

/// Renders a one-line notice, e.g. a rejected command.
pub fn render_notice(notice: &str) -> String {
    format!("{}⚠️  {}\n", BAR_CHAR.bright_yellow(), notice)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(user: &str, assistant: &str) -> [Message; 2] {
        [Message::user(user), Message::assistant(assistant)]
    }

    #[test]
    fn test_screen_shows_header_and_panel() {
        let screen = render_screen(&[], &SessionSettings::default());
        assert!(screen.starts_with(CLEAR_SCREEN));
        for text in [
            "Code Chuckles",
            CAPTION,
            "Settings",
            "gpt-4",
            "gpt-3.5-turbo",
            MODEL_HELP,
            "Humor Randomness",
            TEMPERATURE_HELP,
            TIP,
        ] {
            assert!(screen.contains(text), "missing {text:?}");
        }
    }

    #[test]
    fn test_screen_shows_messages_in_order() {
        let mut messages = Vec::new();
        messages.extend(turn("Recursion", "See: Recursion."));
        messages.extend(turn("CSS", "Nothing is important."));
        let screen = render_screen(&messages, &SessionSettings::default());

        let expected =
            ["Recursion", "See: Recursion.", "CSS", "Nothing is important."];
        let positions: Vec<_> = expected
            .iter()
            .map(|text| screen.find(text).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_redraw_keeps_prior_turns() {
        let mut messages = Vec::new();
        messages.extend(turn("Java", "It's a Bean counter."));
        let before = render_transcript(&messages);

        messages.extend(turn("Git mishaps", "I forced it. Now it's gone."));
        let after = render_transcript(&messages);

        assert!(after.starts_with(&before));
        assert!(after[before.len()..].contains("Git mishaps"));
        assert_eq!(render_transcript(&messages), after);
    }

    #[test]
    fn test_multiline_message() {
        let msg = Message::assistant("Knock knock.\nRace condition.");
        let rendered = render_message(&msg);
        assert_eq!(rendered.matches(BAR_CHAR).count(), 2);
        assert!(rendered.contains("Knock knock."));
        assert!(rendered.contains("Race condition."));
    }

    #[test]
    fn test_markdown_reply() {
        let msg = Message::assistant(
            "Why did the **dev** quit?\n\n```\ngit push --force\n```",
        );
        let rendered = render_message(&msg);
        assert!(!rendered.contains("**"));
        assert!(!rendered.contains("```"));
        assert!(rendered.contains("dev"));
        assert!(rendered.contains("git push --force"));
        // Question, blank separator and the code line.
        assert_eq!(rendered.matches(BAR_CHAR).count(), 3);
    }

    #[test]
    fn test_frame_ends_with_placeholder() {
        let messages = turn("Regex", "Now you have two problems.");
        let settings = SessionSettings::default();
        let notice = render_notice("Cancelled.");
        let frame = render_frame(&messages, &settings, Some(&notice));

        assert!(frame.starts_with(&render_screen(&messages, &settings)));
        assert_eq!(frame.matches(PLACEHOLDER).count(), 1);
        let notice_at = frame.find("Cancelled.").unwrap();
        assert!(notice_at < frame.find(PLACEHOLDER).unwrap());

        let frame = render_frame(&messages, &settings, None);
        assert_eq!(frame.matches(PLACEHOLDER).count(), 1);
    }

    #[test]
    fn test_system_message_is_hidden() {
        assert!(render_message(&Message::system("secret")).is_empty());
    }

    #[test]
    fn test_slider() {
        let slider = render_slider(Temperature::MIN);
        assert!(slider.contains("[●──────────]"));
        let slider = render_slider(Temperature::MAX);
        assert!(slider.contains("[──────────●]"));
        let slider = render_slider(Temperature::default());
        assert!(slider.contains("[──────●────]"));
        assert!(slider.contains("0.8"));
    }

    #[test]
    fn test_help_lists_commands() {
        let help = render_help();
        for command in ["/model", "/temperature", "/clear", "/help", "/quit"] {
            assert!(help.contains(command));
        }
    }
}
