use super::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

const BRAND: &str = "LebenslaufLicht";
const SLOGAN: &str = "Ihre Qualifikationen im Rampenlicht, Ihre Privatsphäre im Schatten";

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        self.layout.calculate_layout(area);
        let panels = self.layout.get_panels().to_vec();

        for panel in panels {
            match panel.panel_type {
                PanelType::Topbar => self.render_topbar(frame, panel.rect),
                PanelType::Upload => self.render_upload_panel(frame, panel.rect),
                PanelType::Result => self.render_result_panel(frame, panel.rect),
                PanelType::InputBar => self.render_input_bar(frame, panel.rect),
            }
        }

        if self.show_help {
            self.render_help(frame, area);
        }

        if self.show_error_details {
            self.render_error_details(frame, area);
        }
    }

    fn connectivity_indicator(&self) -> (String, Color) {
        match self.connectivity {
            ConnectivityStatus::Connected => ("✓ System Bereit".to_string(), Color::Green),
            ConnectivityStatus::Checking => ("⟳ Verbinde...".to_string(), Color::Yellow),
            ConnectivityStatus::Error => ("✕ Nicht Verbunden (Serverfehler)".to_string(), Color::Red),
            ConnectivityStatus::Disconnected => ("✕ Nicht Verbunden".to_string(), Color::Red),
        }
    }

    fn render_topbar(&self, frame: &mut Frame, area: Rect) {
        let (indicator, color) = self.connectivity_indicator();
        let checked = self
            .last_health_check
            .map(|t| format!(" ({})", t.with_timezone(&chrono::Local).format("%H:%M:%S")))
            .unwrap_or_default();

        let line = Line::from(vec![
            Span::styled(
                format!(" {BRAND} "),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(indicator, Style::default().fg(color)),
            Span::raw(checked),
            Span::raw(if self.last_error.is_some() {
                "   ⚠ Fehler [Ctrl+E]"
            } else {
                ""
            }),
            Span::raw("   [F1] Hilfe"),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_upload_panel(&self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::new();

        let file_line = match self.selected_file {
            Some(ref file) => format!("📄 {}", file.name),
            None => "📄 Lebenslauf (PDF) auswählen: Pfad unten eingeben".to_string(),
        };
        lines.push(Line::from(file_line));

        let action_line = match self.workflow_state() {
            WorkflowState::Analyzing => "⚡ Verarbeite... Transformiere Ihren Lebenslauf",
            WorkflowState::CreatingPdf => "📄 Erstelle PDF...",
            WorkflowState::FileSelected => "✨ [Ctrl+A] Lebenslauf Analysieren",
            WorkflowState::Analyzed => "📄 [Ctrl+D] Als PDF Herunterladen",
            WorkflowState::Idle => "",
        };
        lines.push(Line::from(action_line));

        if !self.status.is_empty() {
            lines.push(Line::styled(
                self.status.clone(),
                Style::default().fg(Color::Cyan),
            ));
        }
        if let Some(ref error) = self.last_error {
            lines.push(Line::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            ));
        }
        if let Some(ref path) = self.last_download {
            lines.push(Line::from(format!("Gespeichert unter: {}", path.display())));
        }

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" Upload ")),
            area,
        );
    }

    fn render_result_panel(&self, frame: &mut Frame, area: Rect) {
        let (text, title) = match self.analyzed {
            Some(ref result) => (
                result.text.clone(),
                " ✨ Ihre Anonymisierten Daten [↑/↓] ".to_string(),
            ),
            None => (SLOGAN.to_string(), " Ergebnis ".to_string()),
        };

        frame.render_widget(
            Paragraph::new(text)
                .wrap(Wrap { trim: false })
                .scroll((self.result_scroll, 0))
                .block(Block::default().borders(Borders::ALL).title(title)),
            area,
        );
    }

    fn render_input_bar(&self, frame: &mut Frame, area: Rect) {
        let busy = if self.is_busy() { "   [läuft...]" } else { "" };
        let text = format!("PDF > {}{}", self.input.buffer, busy);

        frame.render_widget(
            Paragraph::new(text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            ),
            area,
        );

        if !self.show_help && !self.show_error_details {
            let x = area.x + 1 + "PDF > ".chars().count() as u16 + self.input.cursor() as u16;
            frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let popup_area = self.centered_rect(60, 70, area);

        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(self.keybinds.help_text()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Hilfe - F1 oder Esc zum Schließen "),
            ),
            popup_area,
        );
    }

    fn render_error_details(&self, frame: &mut Frame, area: Rect) {
        let popup_area = self.centered_rect(60, 30, area);
        let details = match (&self.last_error, &self.error_details) {
            (Some(message), Some(details)) => format!("{message}\n\n{details}"),
            (Some(message), None) => message.clone(),
            _ => "Keine Fehlerdetails verfügbar.".to_string(),
        };
        let content_width = popup_area.width.saturating_sub(2) as usize;
        let content_lines = popup_area.height.saturating_sub(4) as usize;
        let wrapped_details = Self::wrap_and_truncate_text(&details, content_width, content_lines);
        let text = format!("{}\n\n[Esc] oder [Enter] zum Schließen", wrapped_details);

        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Fehlerdetails "),
            ),
            popup_area,
        );
    }

    fn wrap_and_truncate_text(input: &str, width: usize, max_lines: usize) -> String {
        if width == 0 || max_lines == 0 {
            return "... (gekürzt)".to_string();
        }

        let mut out: Vec<String> = Vec::new();
        let mut truncated = false;

        'lines: for raw_line in input.lines() {
            let mut current = String::new();
            for word in raw_line.split_whitespace() {
                let mut word = word.to_string();
                while word.chars().count() > width {
                    let head: String = word.chars().take(width).collect();
                    word = word.chars().skip(width).collect();
                    if !current.is_empty() {
                        out.push(std::mem::take(&mut current));
                    }
                    out.push(head);
                }

                let candidate = if current.is_empty() {
                    word
                } else {
                    format!("{current} {word}")
                };
                if candidate.chars().count() <= width {
                    current = candidate;
                } else {
                    out.push(std::mem::take(&mut current));
                    current = candidate
                        .rsplit(' ')
                        .next()
                        .unwrap_or_default()
                        .to_string();
                }

                if out.len() > max_lines {
                    truncated = true;
                    break 'lines;
                }
            }
            out.push(current);
            if out.len() > max_lines {
                truncated = true;
                break;
            }
        }

        if truncated || out.len() > max_lines {
            out.truncate(max_lines.saturating_sub(1));
            out.push("... (gekürzt)".to_string());
        }

        out.join("\n")
    }

    fn centered_rect(&self, percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = ratatui::layout::Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([
                ratatui::layout::Constraint::Percentage((100 - percent_y) / 2),
                ratatui::layout::Constraint::Percentage(percent_y),
                ratatui::layout::Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        ratatui::layout::Layout::default()
            .direction(ratatui::layout::Direction::Horizontal)
            .constraints([
                ratatui::layout::Constraint::Percentage((100 - percent_x) / 2),
                ratatui::layout::Constraint::Percentage(percent_x),
                ratatui::layout::Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}
