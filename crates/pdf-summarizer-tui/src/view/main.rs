use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::{App, InputMode};
use crate::model::session::Phase;
use crate::theme::Theme;
use crate::view::{spinner_char, truncate, wrapped_rows};

/// Render the main window: controls, settings, status and the display area.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Length(1), // controls
        Constraint::Length(1), // sentences + model
        Constraint::Length(1), // status
        Constraint::Min(3),    // display
        Constraint::Length(1), // footer
    ])
    .split(area);

    render_header(f, app, chunks[0]);
    render_controls(f, app, chunks[1]);
    render_settings(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
    render_display(f, app, chunks[4]);

    let footer = Line::from(Span::styled(footer_text(app), app.theme.footer_style()));
    f.render_widget(Paragraph::new(footer), chunks[5]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let doc_name = app
        .session
        .document
        .as_ref()
        .map(|d| d.display_name())
        .unwrap_or_else(|| "Load a PDF to summarize".to_string());
    let width = (area.width as usize).saturating_sub(20);
    let header = Line::from(vec![
        Span::styled(" PDF Summarizer ", theme.header_style()),
        Span::styled(
            format!("  {}", truncate(&doc_name, width)),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(header), area);
}

fn button<'a>(key: &'a str, label: &'a str, enabled: bool, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::styled(format!(" {} ", key), theme.button_style(enabled)),
        Span::styled(format!("{} ", label), theme.button_style(enabled)),
        Span::raw(" "),
    ]
}

fn render_controls(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let session = &app.session;
    let theme_label = format!("Theme: {}", app.theme_mode.name());

    let mut spans = vec![Span::raw(" ")];
    spans.extend(button("o", "Load PDF", session.can_load(), theme));
    spans.extend(button("s", "Summarize", session.can_summarize(), theme));
    spans.extend(button("e", "Export", session.can_export(), theme));
    spans.extend(button("t", &theme_label, true, theme));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_settings(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let editing = app.input_mode == InputMode::LengthInput;

    let length_display = if editing {
        format!(" {}\u{2588} ", app.length_input)
    } else if app.length_input.is_empty() {
        " e.g., 5 ".to_string()
    } else {
        format!(" {} ", app.length_input)
    };
    let length_style = if editing {
        theme.input_style().add_modifier(Modifier::BOLD)
    } else if app.length_input.is_empty() {
        theme.input_style().fg(theme.dim)
    } else {
        theme.input_style()
    };

    let mut spans = vec![
        Span::styled(" Summary length (sentences): ", Style::default().fg(theme.text)),
        Span::styled(length_display, length_style),
        Span::styled("   Model: ", Style::default().fg(theme.text)),
        Span::styled(
            app.model.label(),
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(model) = app.pulling {
        spans.push(Span::styled(
            format!("  {} pulling {}...", spinner_char(app.tick), model.id()),
            Style::default().fg(theme.spinner),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = if app.phase() == Phase::Summarizing {
        Line::from(Span::styled(
            format!(
                " {} Summarizing... Please wait ({:.1}s)",
                spinner_char(app.tick),
                app.session.elapsed().as_secs_f64()
            ),
            Style::default()
                .fg(theme.spinner)
                .add_modifier(Modifier::BOLD),
        ))
    } else if let Some(status) = &app.status {
        Line::from(Span::styled(
            format!(" {}", status),
            Style::default().fg(theme.success),
        ))
    } else {
        Line::from("")
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_display(f: &mut Frame, app: &mut App, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;
    app.visible_rows = inner_height;
    app.display_rows = wrapped_rows(&app.session.display, inner_width);

    let max_scroll = app.display_rows.saturating_sub(inner_height);
    let max_scroll = u16::try_from(max_scroll).unwrap_or(u16::MAX);
    if app.scroll > max_scroll {
        app.scroll = max_scroll;
    }

    let theme = &app.theme;
    let title = if app.session.has_summary {
        " Summary "
    } else {
        " Document "
    };
    let paragraph = Paragraph::new(app.session.display.as_str())
        .style(theme.input_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(title),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    f.render_widget(paragraph, area);
}

fn footer_text(app: &App) -> &'static str {
    match app.input_mode {
        InputMode::LengthInput => " Type a number  Enter:done  Esc:cancel",
        _ => " o:load  l:length  m:model  s:summarize  e:export  t:theme  j/k:scroll  ?:help  q:quit",
    }
}
