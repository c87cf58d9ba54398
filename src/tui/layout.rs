use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{InputMode, TuiApp};
use crate::tui::sink::ViewElement;
use crate::tui::theme::Palette;

pub fn render(frame: &mut Frame, app: &TuiApp) {
    let palette = Palette::for_theme(app.theme);

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Masthead
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // News area
            Constraint::Length(1), // Progress gauge
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_masthead(frame, app, &palette, chunks[0]);
    render_search_bar(frame, app, &palette, chunks[1]);
    render_news_area(frame, app, &palette, chunks[2]);
    render_gauge(frame, app, &palette, chunks[3]);
    render_status_bar(frame, app, &palette, chunks[4]);
}

fn render_masthead(frame: &mut Frame, app: &TuiApp, palette: &Palette, area: Rect) {
    let date = Local::now().format("%A, %B %d, %Y").to_string();
    let masthead = Paragraph::new(vec![
        Line::from(Span::styled(
            "Gazette",
            Style::default()
                .fg(palette.title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{}  ·  language: {}", date, app.language),
            Style::default().fg(palette.text),
        )),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(masthead, area);
}

fn render_search_bar(frame: &mut Frame, app: &TuiApp, palette: &Palette, area: Rect) {
    let is_editing = app.input_mode == InputMode::Search;
    let border_style = if is_editing {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.border)
    };

    let content = if is_editing {
        format!("{}\u{2588}", app.search_input)
    } else {
        app.search_input.clone()
    };

    let block = Block::default()
        .title(" Search (/) ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let paragraph = Paragraph::new(content)
        .style(Style::default().fg(palette.text))
        .block(block);

    frame.render_widget(paragraph, area);
}

fn render_news_area(frame: &mut Frame, app: &TuiApp, palette: &Palette, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    for element in app.sink.elements() {
        match element {
            ViewElement::Text { text, style } => {
                let style = palette.text_style(*style);
                for part in text.lines() {
                    lines.push(Line::from(Span::styled(part.to_string(), style)));
                }
                lines.push(Line::from(""));
            }
            ViewElement::Image { lines: cells } => {
                lines.extend(cells.iter().cloned());
                lines.push(Line::from(""));
            }
            ViewElement::Notice(text) => {
                lines.push(Line::from(Span::styled(
                    format!("! {}", text),
                    palette.notice_style(),
                )));
                lines.push(Line::from(""));
            }
        }
    }

    if lines.is_empty() {
        let hint = if app.is_loading {
            "Fetching news, please wait..."
        } else {
            "Press f to fetch news"
        };
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(palette.border),
        )));
    }

    let block = Block::default()
        .title(" News ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_gauge(frame: &mut Frame, app: &TuiApp, palette: &Palette, area: Rect) {
    let label = if app.is_loading {
        format!("{} processed", app.processed)
    } else {
        String::new()
    };

    let gauge = Gauge::default()
        .ratio(app.progress_ratio())
        .label(label)
        .gauge_style(Style::default().fg(palette.accent).bg(palette.background));

    frame.render_widget(gauge, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, palette: &Palette, area: Rect) {
    let status = if app.input_mode == InputMode::Search {
        "Enter:Search  Esc:Cancel".to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else {
        "f:Fetch  /:Search  l:Language  t:Theme  j/k:Scroll  q:Quit".to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(palette.status_fg).bg(palette.status_bg));

    frame.render_widget(paragraph, area);
}
