use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use pdf_summarizer_core::export::EXPORT_EXTENSION;

use crate::app::App;
use crate::view::{centered_rect, truncate};

/// State for the export path dialog.
#[derive(Debug, Clone, Default)]
pub struct ExportState {
    pub active: bool,
    /// Destination as typed; `.txt` is appended on save when missing.
    pub buffer: String,
}

/// Render the export modal overlay.
pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let export = &app.export_state;
    let popup = centered_rect(56, 8, f.area());

    let shown = truncate(&export.buffer, 40);
    let suffix = if export.buffer.ends_with(EXPORT_EXTENSION) {
        ""
    } else {
        EXPORT_EXTENSION
    };

    let lines = vec![
        Line::from(Span::styled(
            " Save Summary ",
            theme.header_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  File: ", Style::default().fg(theme.text)),
            Span::styled(
                format!("{}\u{2588}", shown),
                theme.input_style().add_modifier(Modifier::BOLD),
            ),
            Span::styled(suffix, Style::default().fg(theme.dim)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Type filename, Enter:save, Esc:cancel",
            Style::default().fg(theme.dim),
        )),
    ];

    let paragraph = Paragraph::new(lines).style(theme.base_style()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.active))
            .title(" Export "),
    );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
