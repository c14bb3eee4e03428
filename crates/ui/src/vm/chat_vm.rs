use prep_core::model::{ChatAuthor, ChatTranscript};

use super::markdown_vm::markdown_to_html;
use super::time_fmt::format_clock;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatLineVm {
    pub from_user: bool,
    pub html: String,
    pub time: String,
}

/// Mentor replies are rendered as markdown; the visitor's own text is escaped.
#[must_use]
pub fn map_chat_lines(transcript: &ChatTranscript) -> Vec<ChatLineVm> {
    transcript
        .messages()
        .iter()
        .map(|message| {
            let from_user = message.author == ChatAuthor::User;
            let html = if from_user {
                escape(&message.text)
            } else {
                markdown_to_html(&message.text)
            };
            ChatLineVm {
                from_user,
                html,
                time: format_clock(message.sent_at),
            }
        })
        .collect()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("<br>"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::time::fixed_now;

    #[test]
    fn user_text_is_escaped_and_mentor_text_rendered() {
        let mut transcript = ChatTranscript::new();
        transcript.push(ChatAuthor::User, "is <b> O(n)?", fixed_now());
        transcript.push(ChatAuthor::Mentor, "Yes, **linear**.", fixed_now());

        let lines = map_chat_lines(&transcript);
        assert!(lines[0].from_user);
        assert_eq!(lines[0].html, "is &lt;b&gt; O(n)?");
        assert!(lines[1].html.contains("<strong>linear</strong>"));
        assert_eq!(lines[1].time, "22:13");
    }
}
