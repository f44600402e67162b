//! UI utilities for the client.

use std::io::Write;

/// Prompt shown by the line editor
pub fn prompt(username: &str, room_id: &str) -> String {
    format!("{}@{}> ", username, room_id)
}

/// Print `text` and redisplay the prompt after it
pub fn print_with_prompt(text: &str, prompt: &str) {
    print!("{}{}", text, prompt);
    std::io::stdout().flush().ok();
}
