use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, InputMode, MAX_CHARS};
use crate::catalog::{RewriteStyle, Tone};
use crate::theme::{colors, spinner_frame, styles};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let bg_block = Block::default().style(Style::default().bg(colors::BG_DARK));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),    // Main area
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
        .split(chunks[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(1)])
        .split(columns[0]);

    draw_input(frame, app, left[0]);
    draw_controls(frame, app, left[1]);
    draw_results(frame, app, columns[1]);
    draw_status_bar(frame, app, chunks[1]);
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let mode = app.input_mode();

    let (mode_text, mode_style, border_style) = match mode {
        InputMode::Normal => (
            " NORMAL ",
            styles::mode_normal(),
            Style::default().fg(colors::TEXT_MUTED),
        ),
        InputMode::Insert => (
            " INSERT ",
            styles::mode_insert(),
            Style::default().fg(colors::GREEN),
        ),
    };

    let count = app.char_count();
    let counter_style = if count * 10 >= MAX_CHARS * 9 {
        Style::default().fg(colors::YELLOW)
    } else {
        Style::default().fg(colors::TEXT_MUTED)
    };
    let counter = Line::from(Span::styled(format!(" {count} / {MAX_CHARS} "), counter_style))
        .alignment(Alignment::Right);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Line::from(vec![Span::styled(mode_text, mode_style)]))
        .title_bottom(counter)
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);

    let text_style = if app.draft_text().is_empty() {
        Style::default().fg(colors::TEXT_MUTED)
    } else {
        Style::default().fg(colors::TEXT_PRIMARY)
    };
    let content = if app.draft_text().is_empty() && mode == InputMode::Normal {
        "Press i and type the text to rewrite...".to_string()
    } else {
        app.draft_text().to_string()
    };

    let input = Paragraph::new(content)
        .style(text_style)
        .wrap(Wrap { trim: false })
        .block(block);

    frame.render_widget(input, area);

    if mode == InputMode::Insert {
        let before_cursor: String = app.draft_text().chars().take(app.draft_cursor()).collect();
        let (row, col) = cursor_position(&before_cursor, inner.width.max(1));
        frame.set_cursor_position((inner.x + col, inner.y + row));
    }
}

/// Cursor cell for a wrapped paragraph: walk the text before the cursor the
/// same way `Wrap { trim: false }` lays it out.
fn cursor_position(before_cursor: &str, width: u16) -> (u16, u16) {
    let width = usize::from(width);
    let mut row = 0u16;
    let mut col = 0usize;

    for line in before_cursor.split('\n') {
        let line_width = line.width();
        row += (line_width / width) as u16;
        col = line_width % width;
        row += 1;
    }
    row = row.saturating_sub(1);

    (row, col as u16)
}

fn draw_controls(frame: &mut Frame, app: &App, area: Rect) {
    let hints = vec![
        Span::styled("Tab", styles::key_highlight()),
        Span::styled(" style  ", styles::key_hint()),
        Span::styled("t", styles::key_highlight()),
        Span::styled(" tone  ", styles::key_hint()),
        Span::styled("Enter", styles::key_highlight()),
        Span::styled(" rewrite ", styles::key_hint()),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::TEXT_MUTED))
        .title(Line::from(Span::styled(
            " Style ",
            Style::default()
                .fg(colors::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )))
        .title_bottom(Line::from(hints).alignment(Alignment::Right))
        .padding(Padding::horizontal(1));

    let mut lines: Vec<Line> = Vec::new();

    for style in RewriteStyle::all() {
        let is_selected = app.style() == *style;
        let (marker, label_style) = if is_selected {
            ("▸ ", styles::selected_item())
        } else {
            ("  ", Style::default().fg(colors::TEXT_SECONDARY))
        };
        lines.push(Line::from(vec![
            Span::styled(marker, styles::selected_item()),
            Span::styled(style.label(), label_style),
        ]));
        if is_selected {
            lines.push(Line::from(Span::styled(
                format!("    {}", style.description()),
                Style::default().fg(colors::TEXT_MUTED),
            )));
        }
    }

    if app.style().needs_tone() {
        lines.push(Line::from(""));
        let mut tone_spans = vec![Span::styled(
            "  Tone: ",
            Style::default().fg(colors::TEXT_SECONDARY),
        )];
        for tone in Tone::all() {
            let style = if app.tone() == *tone {
                styles::selected_item()
            } else {
                Style::default().fg(colors::TEXT_MUTED)
            };
            tone_spans.push(Span::styled(tone.label(), style));
            tone_spans.push(Span::raw("  "));
        }
        lines.push(Line::from(tone_spans));
    }

    let controls = Paragraph::new(lines).block(block);
    frame.render_widget(controls, area);
}

fn draw_results(frame: &mut Frame, app: &App, area: Rect) {
    let results = app.results();

    let border_style = if app.error().is_some() {
        Style::default().fg(colors::RED)
    } else {
        Style::default().fg(colors::TEXT_MUTED)
    };

    let count_label = match results.len() {
        0 => String::new(),
        1 => " 1 suggestion ".to_string(),
        n => format!(" {n} suggestions "),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Line::from(Span::styled(
            " Results ",
            Style::default()
                .fg(colors::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )))
        .title_bottom(
            Line::from(Span::styled(
                count_label,
                Style::default().fg(colors::TEXT_MUTED),
            ))
            .alignment(Alignment::Right),
        )
        .padding(Padding::horizontal(1));

    let mut lines: Vec<Line> = Vec::new();

    if let Some(message) = app.error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " ✗ Rephrase failed",
            Style::default()
                .fg(colors::RED)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(colors::TEXT_SECONDARY),
        )));
    } else if app.is_loading() {
        let spinner = spinner_frame(app.tick_count());
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw(" "),
            Span::styled(spinner, Style::default().fg(colors::PRIMARY)),
            Span::styled(" Rewriting...", Style::default().fg(colors::TEXT_MUTED)),
        ]));
    } else if results.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " No results yet",
            Style::default().fg(colors::TEXT_SECONDARY),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Enter your text on the left and pick a style to",
            Style::default().fg(colors::TEXT_MUTED),
        )));
        lines.push(Line::from(Span::styled(
            " generate alternative phrasings here.",
            Style::default().fg(colors::TEXT_MUTED),
        )));
    } else {
        let selected = app.selected_result();
        for (idx, result) in results.iter().enumerate() {
            if idx > 0 {
                lines.push(Line::from(""));
            }

            let is_selected = selected == Some(idx);
            let marker_style = if is_selected {
                styles::selected_item()
            } else {
                Style::default().fg(colors::TEXT_MUTED)
            };
            let mut header = vec![Span::styled(
                format!("{} {}.", if is_selected { "▸" } else { " " }, idx + 1),
                marker_style,
            )];
            if app.copied_index() == Some(idx) {
                header.push(Span::styled(
                    "  ✓ copied",
                    Style::default().fg(colors::GREEN),
                ));
            }
            lines.push(Line::from(header));

            lines.push(Line::from(Span::styled(
                format!("   {result}"),
                Style::default().fg(colors::TEXT_PRIMARY),
            )));
        }
    }

    let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(panel, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (status_text, status_style) = if let Some(msg) = app.status_message() {
        (msg.to_string(), Style::default().fg(colors::YELLOW))
    } else if app.is_loading() {
        let spinner = spinner_frame(app.tick_count());
        (
            format!("{spinner} Processing request..."),
            Style::default().fg(colors::PRIMARY),
        )
    } else if app.has_api_key() {
        let selection = if app.style().needs_tone() {
            format!("{} │ {}", app.style(), app.tone())
        } else {
            app.style().to_string()
        };
        (format!("● {selection}"), Style::default().fg(colors::GREEN))
    } else {
        (
            format!("○ No API key │ Set {}", crate::config::API_KEY_ENV),
            Style::default().fg(colors::RED),
        )
    };

    let hints = "j/k select  y copy  q quit";
    let hints_width = hints.len() as u16 + 2;
    let status_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width.saturating_sub(hints_width),
        height: area.height,
    };
    let hints_area = Rect {
        x: area.x + area.width.saturating_sub(hints_width),
        y: area.y,
        width: hints_width,
        height: area.height,
    };

    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(status_text, status_style),
    ]));
    frame.render_widget(status, status_area);

    let hints_widget = Paragraph::new(Line::from(vec![
        Span::styled(hints, styles::key_hint()),
        Span::raw(" "),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(hints_widget, hints_area);
}
