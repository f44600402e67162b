//! Message formatting utilities for client display.

use codesync_shared::protocol::ClientInfo;

use crate::{buffer::CodeBuffer, room::Notice};

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the member list, marking the current user with "(me)"
    pub fn format_participants(participants: &[ClientInfo], self_id: Option<&str>) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\nParticipants:\n", RULE));

        if participants.is_empty() {
            output.push_str("(No participants)\n");
        } else {
            for participant in participants {
                let is_me = Some(participant.socket_id.as_str()) == self_id;
                let me_suffix = if is_me { " (me)" } else { "" };
                output.push_str(&format!("{}{}\n", participant.username, me_suffix));
            }
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// Format the buffer with line numbers
    pub fn format_buffer(buffer: &CodeBuffer) -> String {
        if buffer.is_empty() {
            return format!("\n{}\n(empty buffer)\n{}\n", THIN_RULE, THIN_RULE);
        }
        let mut output = format!("\n{}\n", THIN_RULE);
        for (index, line) in buffer.as_str().lines().enumerate() {
            output.push_str(&format!("{:>4} | {}\n", index + 1, line));
        }
        output.push_str(THIN_RULE);
        output.push('\n');
        output
    }

    /// Format the result of a remote run
    pub fn format_execution_output(output: &str) -> String {
        let body = if output.is_empty() { "(no output)" } else { output };
        let newline = if body.ends_with('\n') { "" } else { "\n" };
        format!("\nOutput:\n{}{}{}\n", body, newline, THIN_RULE)
    }

    pub fn format_error(message: &str) -> String {
        format!("\n! {}\n", message)
    }

    /// Format a state change for the user, `None` when nothing is worth showing
    pub fn format_notice(
        notice: &Notice,
        buffer: &CodeBuffer,
        self_id: Option<&str>,
    ) -> Option<String> {
        match notice {
            Notice::Connected { .. } => None,
            Notice::EnteredRoom { members } => Some(Self::format_participants(members, self_id)),
            Notice::ParticipantJoined { username } => {
                Some(format!("\n+ {} joined the room.\n", username))
            }
            Notice::ParticipantLeft { username } => {
                Some(format!("\n- {} left the room.\n", username))
            }
            Notice::BufferReplaced { from_sync: true } => Some(format!(
                "\n← Received room buffer ({} lines)\n",
                buffer.line_count()
            )),
            Notice::BufferReplaced { from_sync: false } => Some(format!(
                "\n← Buffer updated ({} lines)\n",
                buffer.line_count()
            )),
            Notice::Rejected { message } => Some(Self::format_error(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(socket_id: &str, username: &str) -> ClientInfo {
        ClientInfo {
            socket_id: socket_id.to_string(),
            username: username.to_string(),
        }
    }

    #[test]
    fn test_format_participants_with_empty_list() {
        // テスト項目: 参加者が空の場合、適切なメッセージが表示される
        // given (前提条件):
        let participants = vec![];

        // when (操作):
        let result = MessageFormatter::format_participants(&participants, None);

        // then (期待する結果):
        assert!(result.contains("Participants:"));
        assert!(result.contains("(No participants)"));
    }

    #[test]
    fn test_format_participants_marks_me() {
        // テスト項目: 複数参加者の場合、全員が表示され自分にはマークが付く
        // given (前提条件):
        let participants = vec![info("a", "alice"), info("b", "bob")];

        // when (操作):
        let result = MessageFormatter::format_participants(&participants, Some("a"));

        // then (期待する結果):
        assert!(result.contains("alice (me)"));
        assert!(result.contains("bob\n"));
        assert!(!result.contains("bob (me)"));
    }

    #[test]
    fn test_format_join_and_leave_notices() {
        // テスト項目: 参加・退出通知が決まった文言でフォーマットされる
        // given (前提条件):
        let buffer = CodeBuffer::new();
        let joined = Notice::ParticipantJoined {
            username: "bob".to_string(),
        };
        let left = Notice::ParticipantLeft {
            username: "bob".to_string(),
        };

        // when (操作):
        let joined = MessageFormatter::format_notice(&joined, &buffer, None);
        let left = MessageFormatter::format_notice(&left, &buffer, None);

        // then (期待する結果):
        assert_eq!(joined.as_deref(), Some("\n+ bob joined the room.\n"));
        assert_eq!(left.as_deref(), Some("\n- bob left the room.\n"));
    }

    #[test]
    fn test_format_buffer_numbers_lines() {
        // テスト項目: バッファが行番号付きで表示される
        // given (前提条件):
        let mut buffer = CodeBuffer::new();
        buffer.append_line("a = 1");
        buffer.append_line("print(a)");

        // when (操作):
        let result = MessageFormatter::format_buffer(&buffer);

        // then (期待する結果):
        assert!(result.contains("   1 | a = 1\n"));
        assert!(result.contains("   2 | print(a)\n"));
    }

    #[test]
    fn test_format_execution_output() {
        // テスト項目: 実行結果が表示され、空の場合はその旨が表示される
        // given (前提条件):
        let output = "1\n";

        // when (操作):
        let result = MessageFormatter::format_execution_output(output);
        let empty = MessageFormatter::format_execution_output("");

        // then (期待する結果):
        assert!(result.contains("Output:\n1\n"));
        assert!(empty.contains("(no output)"));
    }
}
