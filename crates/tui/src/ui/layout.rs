use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::panel::{Panel, PanelType};

const TOPBAR_HEIGHT: u16 = 1;
const UPLOAD_HEIGHT: u16 = 7;
const INPUT_HEIGHT: u16 = 3;

#[derive(Default)]
pub struct LayoutState {
    cached_panels: Vec<Panel>,
}

impl LayoutState {
    pub fn calculate_layout(&mut self, area: Rect) -> &[Panel] {
        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TOPBAR_HEIGHT),
                Constraint::Length(UPLOAD_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(INPUT_HEIGHT),
            ])
            .split(area);

        self.cached_panels = vec![
            Panel {
                panel_type: PanelType::Topbar,
                rect: main_layout[0],
            },
            Panel {
                panel_type: PanelType::Upload,
                rect: main_layout[1],
            },
            Panel {
                panel_type: PanelType::Result,
                rect: main_layout[2],
            },
            Panel {
                panel_type: PanelType::InputBar,
                rect: main_layout[3],
            },
        ];

        &self.cached_panels
    }

    pub fn get_panels(&self) -> &[Panel] {
        &self.cached_panels
    }

    pub fn get_result_rect(&self) -> Option<Rect> {
        self.cached_panels
            .iter()
            .find(|p| matches!(p.panel_type, PanelType::Result))
            .map(|p| p.rect)
    }
}
