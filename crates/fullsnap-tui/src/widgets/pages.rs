use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};

use crate::app::Panel;
use crate::theme::Theme;

/// Stack of full-height panels, offset by the viewport's scroll position
pub struct SnapPagesWidget;

impl SnapPagesWidget {
    pub fn render(frame: &mut Frame, area: Rect, panels: &[Panel], scroll_y: f64, theme: &Theme) {
        render_pages(frame.buffer_mut(), area, panels, scroll_y, theme);
    }
}

/// Draw each panel `i` at row `i * area.height - scroll_y`, clipped to `area`
pub fn render_pages(buf: &mut Buffer, area: Rect, panels: &[Panel], scroll_y: f64, theme: &Theme) {
    let background = Style::default().bg(theme.bg0);
    buf.set_style(area, background);

    if area.width == 0 || area.height == 0 || panels.is_empty() {
        return;
    }

    let page_height = area.height as i64;
    let offset = if scroll_y.is_finite() {
        scroll_y.round() as i64
    } else {
        0
    };

    for (index, panel) in panels.iter().enumerate() {
        let top = index as i64 * page_height - offset;
        if top + page_height <= 0 || top >= page_height {
            continue;
        }

        let page_area = Rect::new(0, 0, area.width, area.height);
        let mut page = Buffer::empty(page_area);
        draw_panel(&mut page, page_area, panel, index, panels.len(), theme);

        for row in 0..area.height {
            let y = top + row as i64;
            if !(0..page_height).contains(&y) {
                continue;
            }
            for x in 0..area.width {
                if let (Some(src), Some(dst)) = (
                    page.cell((x, row)).cloned(),
                    buf.cell_mut((area.x + x, area.y + y as u16)),
                ) {
                    *dst = src;
                }
            }
        }
    }
}

fn draw_panel(
    buf: &mut Buffer,
    area: Rect,
    panel: &Panel,
    index: usize,
    total: usize,
    theme: &Theme,
) {
    let accent = theme.page_accent(index);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(theme.bg1))
        .title(Span::styled(
            format!(" {}/{} {} ", index + 1, total, panel.title),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    block.render(area, buf);

    let lines: Vec<Line> = panel
        .body
        .lines()
        .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(theme.fg0))))
        .collect();
    let body_height = (lines.len() as u16).min(inner.height);
    let body_area = Rect::new(
        inner.x,
        inner.y + inner.height.saturating_sub(body_height) / 2,
        inner.width,
        body_height,
    );

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(body_area, buf);
}
