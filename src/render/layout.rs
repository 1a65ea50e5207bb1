use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::theme::LayoutKind;

/// Areas the preview pane is split into for a given layout kind. The
/// header always spans the full width; below it the body flows in one or
/// two columns, or a cue pane plus notes pane for Cornell.
pub struct PageChunks {
    pub header_area: Rect,
    pub column_areas: Vec<Rect>,
}

pub fn calculate_page_chunks(area: Rect, layout: LayoutKind, header_height: u16) -> PageChunks {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header_height), Constraint::Min(1)])
        .split(area);

    let header_area = vertical[0];
    let body_area = vertical[1];

    let column_areas = match layout {
        LayoutKind::Standard => vec![body_area],
        LayoutKind::TwoColumn => Layout::default()
            .direction(Direction::Horizontal)
            .spacing(2)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(body_area)
            .to_vec(),
        LayoutKind::Cornell => Layout::default()
            .direction(Direction::Horizontal)
            .spacing(1)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(body_area)
            .to_vec(),
    };

    PageChunks {
        header_area,
        column_areas,
    }
}
