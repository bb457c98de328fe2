use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::fmt::cedis;
use crate::state::Dialog;

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const AMOUNT_STYLE: Style = Style::new().fg(Color::Rgb(80, 220, 100));
pub const ERROR_STYLE: Style = Style::new().fg(Color::Rgb(255, 59, 48));
pub const ACCENT_STYLE: Style = Style::new().fg(Color::Rgb(0, 122, 255));

pub const SELECTED_STYLE: Style = Style::new()
    .bg(Color::Rgb(40, 40, 60))
    .add_modifier(Modifier::BOLD);

/// Format an amount in cedis as a green Span.
pub fn amount_span(amount: f64) -> Span<'static> {
    Span::styled(cedis(amount), AMOUNT_STYLE)
}

/// Wrap text to a given width. Returns (wrapped_string, line_count).
pub fn wrap_text(text: &str, width: usize) -> (String, u16) {
    if width == 0 {
        return (text.to_string(), 1);
    }
    let wrapped = textwrap::fill(text, width);
    let lines = wrapped.lines().count().max(1) as u16;
    (wrapped, lines)
}

/// A rect of at most `width` x `height` centered in `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

/// "● ● ○" style step dots for the sign-up wizard.
pub fn progress_line(current: usize, total: usize) -> Line<'static> {
    let spans: Vec<Span> = (1..=total)
        .map(|step| {
            if step <= current {
                Span::styled("\u{25cf} ", ACCENT_STYLE)
            } else {
                Span::styled("\u{25cb} ", FOOTER_STYLE)
            }
        })
        .collect();
    Line::from(spans).alignment(Alignment::Center)
}

/// Draw a modal message box over whatever is on screen.
pub fn render_dialog(frame: &mut Frame, dialog: &Dialog) {
    let text_lines = dialog.message.lines().count() as u16;
    let popup = centered(frame.area(), 54, text_lines + 5);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {} ", dialog.title), HEADER_STYLE));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let [body, _gap, hint] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);
    frame.render_widget(
        Paragraph::new(dialog.message.as_str()).wrap(Wrap { trim: false }),
        body,
    );
    frame.render_widget(
        Paragraph::new("[ OK ]  Enter")
            .style(FOOTER_STYLE)
            .alignment(Alignment::Center),
        hint,
    );
}
