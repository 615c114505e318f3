use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::Theme;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        current: usize,
        page_count: usize,
        animating: bool,
        message: Option<&str>,
        theme: &Theme,
    ) {
        let text = status_text(current, page_count, animating, message);
        let help_hint = " q:quit \u{2191}/\u{2193}:page wheel/drag:snap ";
        let padding_len = area
            .width
            .saturating_sub(text.chars().count() as u16 + help_hint.chars().count() as u16)
            as usize;

        let fg = if animating { theme.warning } else { theme.fg0 };
        let line = Line::from(vec![
            Span::styled(text, Style::default().fg(fg).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Left-hand status text: page position, transition state, last hook message
pub fn status_text(
    current: usize,
    page_count: usize,
    animating: bool,
    message: Option<&str>,
) -> String {
    let position = if page_count == 0 {
        "no pages".to_string()
    } else {
        format!("Page {}/{}", current + 1, page_count)
    };
    let state = if animating { " | SNAPPING" } else { "" };
    match message {
        Some(msg) => format!(" {}{} | {}", position, state, msg),
        None => format!(" {}{}", position, state),
    }
}
