/// Single-line editor for the file path.
pub struct InputState {
    pub buffer: String,
    cursor_position: usize,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor_position: 0,
        }
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor_position
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn handle_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.buffer.insert(idx, c);
        self.cursor_position += 1;
    }

    /// Pasted text keeps only its first line; terminals append a newline when
    /// a file is dropped onto them.
    pub fn insert_str(&mut self, text: &str) {
        let line = text.lines().next().unwrap_or_default();
        for c in line.chars() {
            self.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        self.cursor_position -= 1;
        let idx = self.byte_index();
        self.buffer.remove(idx);
    }

    pub fn handle_delete(&mut self) {
        if self.cursor_position < self.buffer.chars().count() {
            let idx = self.byte_index();
            self.buffer.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor_position = (self.cursor_position + 1).min(self.buffer.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_position = self.buffer.chars().count();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor_position = 0;
    }

    pub fn take(&mut self) -> String {
        self.cursor_position = 0;
        std::mem::take(&mut self.buffer)
    }

    fn byte_index(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }
}
