use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{Notice, NoticeLevel, PullPrompt};
use crate::theme::Theme;
use crate::view::{centered_rect, word_wrapped_rows};

const NOTICE_WIDTH: u16 = 60;
/// Borders, two spacer lines and the dismiss hint.
const NOTICE_CHROME: u16 = 5;

/// Popup height that fits `message` wrapped inside a notice of `width` columns.
fn notice_height(message: &str, width: u16, max_height: u16) -> u16 {
    let inner = usize::from(width.saturating_sub(2));
    let rows = word_wrapped_rows(&format!("  {}", message), inner);
    u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .saturating_add(NOTICE_CHROME)
        .min(max_height)
}

/// Render a notice (info, warning or error) as a centered popup.
pub fn render(f: &mut Frame, theme: &Theme, notice: &Notice) {
    let color = match notice.level {
        NoticeLevel::Info => theme.active,
        NoticeLevel::Warning => theme.warning,
        NoticeLevel::Error => theme.error,
    };
    let area = f.area();
    let width = NOTICE_WIDTH.min(area.width);
    let popup = centered_rect(width, notice_height(&notice.message, width, area.height), area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", notice.message),
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "  Enter",
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(": dismiss", Style::default().fg(theme.dim)),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .style(theme.base_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {} ", notice.title)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

/// Render the offer to download a missing model.
pub fn render_pull_prompt(f: &mut Frame, theme: &Theme, prompt: &PullPrompt) {
    let height = if prompt.warning.is_some() { 9 } else { 7 };
    let popup = centered_rect(64, height, f.area());

    let mut lines = vec![Line::from("")];
    if let Some(warning) = &prompt.warning {
        lines.push(Line::from(Span::styled(
            format!("  Could not list installed models: {}", warning),
            Style::default().fg(theme.warning),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        format!(
            "  Model '{}' is not installed. Download it now?",
            prompt.model.id()
        ),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            "  y",
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(": download   ", Style::default().fg(theme.dim)),
        Span::styled(
            "n/Esc",
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(": skip", Style::default().fg(theme.dim)),
    ]));

    let paragraph = Paragraph::new(lines)
        .style(theme.base_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.warning))
                .title(" Model Not Found "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
