use super::*;

const DEFAULT_PAGE_SCROLL: i32 = 10;

impl App {
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_event(key),
            Event::Paste(text) => {
                if !self.show_help && !self.show_error_details {
                    self.input.insert_str(&text);
                }
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<bool> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return Ok(true);
        }

        if key.code == KeyCode::F(1) || (key.code == KeyCode::Char('?') && self.input.is_empty())
        {
            self.show_help = !self.show_help;
            return Ok(false);
        }

        if self.show_help {
            if key.code == KeyCode::Esc {
                self.show_help = false;
            }
            return Ok(false);
        }

        if self.show_error_details {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.show_error_details = false,
                KeyCode::Char('e') if ctrl => self.show_error_details = false,
                _ => {}
            }
            return Ok(false);
        }

        if ctrl {
            match key.code {
                KeyCode::Char('a') => {
                    self.submit_analysis();
                }
                KeyCode::Char('d') => {
                    self.request_pdf();
                }
                KeyCode::Char('e') => {
                    if self.last_error.is_some() {
                        self.show_error_details = true;
                    }
                }
                KeyCode::Char('u') => self.input.clear(),
                _ => {}
            }
            return Ok(false);
        }

        match key.code {
            KeyCode::Enter => {
                if self.input.is_empty() {
                    if self.selected_file.is_some() {
                        self.submit_analysis();
                    }
                } else if self.is_busy() {
                    self.status = messages::SELECTION_WHILE_BUSY.to_string();
                } else {
                    let path = self.input.take();
                    self.select_path(&path);
                }
            }
            KeyCode::Esc => self.input.clear(),
            KeyCode::Backspace => self.input.handle_backspace(),
            KeyCode::Delete => self.input.handle_delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Up => self.scroll_result(-1),
            KeyCode::Down => self.scroll_result(1),
            KeyCode::PageUp => self.scroll_result(-self.page_scroll()),
            KeyCode::PageDown => self.scroll_result(self.page_scroll()),
            KeyCode::Char(c) => self.input.handle_char(c),
            _ => {}
        }

        Ok(false)
    }

    /// One page is the visible height of the result panel.
    fn page_scroll(&self) -> i32 {
        self.layout
            .get_result_rect()
            .map(|r| r.height.saturating_sub(2).max(1) as i32)
            .unwrap_or(DEFAULT_PAGE_SCROLL)
    }
}
