use crossterm::event::KeyCode;
use zeroize::Zeroize;

/// Single-line text buffer with a char-indexed cursor.
#[derive(Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
    masked: bool,
}

impl TextInput {
    pub fn masked() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            masked: true,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Convert the char-index cursor to a byte offset.
    fn byte_pos(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Apply an editing key. Returns true if the text changed.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(c) => {
                let pos = self.byte_pos();
                self.value.insert(pos, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let pos = self.byte_pos();
                    self.value.remove(pos);
                    return true;
                }
                false
            }
            KeyCode::Delete => {
                if self.cursor < self.value.chars().count() {
                    let pos = self.byte_pos();
                    self.value.remove(pos);
                    return true;
                }
                false
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.value.chars().count());
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.move_to_end();
                false
            }
            _ => false,
        }
    }

    /// Text to draw: masked if secret, with a block cursor when focused.
    pub fn display(&self, focused: bool) -> String {
        let mut shown = if self.masked {
            "\u{25cf}".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        };
        if focused {
            let pos = shown
                .char_indices()
                .nth(self.cursor)
                .map(|(i, _)| i)
                .unwrap_or(shown.len());
            shown.insert(pos, '\u{2588}');
        }
        shown
    }
}

impl Drop for TextInput {
    fn drop(&mut self) {
        if self.masked {
            self.value.zeroize();
        }
    }
}
