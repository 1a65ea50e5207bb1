use ratatui::{
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::render::{balance_columns, calculate_page_chunks, PageView};
use crate::theme::{HeaderStyle, LayoutKind, Theme};
use crate::utils::{max_scroll, wrapped_height};

/// Draw the rendered page into the preview pane. The page itself is a pure
/// value; this only places its line blocks into areas and applies scroll.
pub fn draw_preview(f: &mut Frame, area: Rect, page: &PageView, theme: &Theme, scroll: &mut u16) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Preview · {} ", theme.name));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let header_height = page.header.len() as u16;
    let chunks = calculate_page_chunks(inner, page.layout, header_height);

    let alignment = match theme.header {
        HeaderStyle::Centered => Alignment::Center,
        HeaderStyle::Masthead | HeaderStyle::BrandBar => Alignment::Left,
    };
    let header = Paragraph::new(page.header.clone()).alignment(alignment);
    f.render_widget(header, chunks.header_area);

    match page.layout {
        LayoutKind::Standard => {
            let flow = flowing_lines(page);
            let area = chunks.column_areas[0];
            bound_scroll(&flow, area, scroll);
            let body = Paragraph::new(flow)
                .wrap(Wrap { trim: false })
                .scroll((*scroll, 0));
            f.render_widget(body, area);
        }
        LayoutKind::TwoColumn => {
            let flow = flowing_lines(page);
            bound_scroll(&flow, chunks.column_areas[0], scroll);
            let columns = balance_columns(flow, chunks.column_areas.len());
            for (lines, area) in columns.into_iter().zip(chunks.column_areas.iter()) {
                let column = Paragraph::new(lines)
                    .wrap(Wrap { trim: false })
                    .scroll((*scroll, 0));
                f.render_widget(column, *area);
            }
        }
        LayoutKind::Cornell => {
            let cue_lines = page.cue_pane.clone().unwrap_or_default();
            let cue = Paragraph::new(cue_lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::RIGHT));
            f.render_widget(cue, chunks.column_areas[0]);

            let mut notes = page.body.clone();
            if let Some(quiz) = &page.quiz {
                notes.push(Line::from(""));
                notes.extend(quiz.clone());
            }
            let area = chunks.column_areas[1];
            bound_scroll(&notes, area, scroll);
            let notes = Paragraph::new(notes)
                .wrap(Wrap { trim: false })
                .scroll((*scroll, 0));
            f.render_widget(notes, area);
        }
    }
}

/// Banner, body and quiz joined into one flowing stream, as rendered in the
/// non-Cornell layouts.
fn flowing_lines(page: &PageView) -> Vec<Line<'static>> {
    let mut flow = Vec::new();
    if let Some(banner) = &page.summary_banner {
        flow.extend(banner.clone());
    }
    flow.extend(page.body.clone());
    if let Some(quiz) = &page.quiz {
        flow.push(Line::from(""));
        flow.extend(quiz.clone());
    }
    flow
}

fn bound_scroll(lines: &[Line], area: Rect, scroll: &mut u16) {
    let content_height = wrapped_height(lines, area.width.max(1) as usize);
    let limit = max_scroll(content_height, area.height as usize);
    *scroll = (*scroll).min(limit);
}
