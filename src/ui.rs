use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Clear, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, InputMode, Screen};
use crate::chapter::SurahContent;

const PLACEHOLDER: &str = "e.g. 'I'm feeling sad and need comfort', 'I need guidance', 'I'm anxious'";

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    match app.screen {
        Screen::Chapters => render_chapters_screen(app, frame, body_area),
        Screen::Search => render_search_screen(app, frame, body_area),
    }

    render_footer(app, frame, footer_area);

    // Popups, modal first so help can sit on top
    if app.selection.is_open() {
        render_modal(app, frame, body_area);
    }
    if app.show_help {
        render_help(frame, area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled(" Surah Finder ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    if let Some(error) = &app.chapters_error {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{} (showing offline list, r to retry)", error),
            Style::default().fg(Color::LightRed),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    let mode_text = match app.screen {
        Screen::Chapters => " CHAPTERS ",
        Screen::Search => " FIND ",
    };

    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);
    let hint = |key: &'static str, label: &'static str| {
        [Span::styled(key, key_style), Span::styled(label, label_style)]
    };

    let hints: Vec<Span> = if app.selection.is_open() {
        [hint(" j/k ", " scroll "), hint(" Esc ", " close "), hint(" ? ", " help ")].concat()
    } else {
        match (app.screen, app.input_mode) {
            (_, InputMode::Editing) => {
                [hint(" Enter ", " recommend "), hint(" Esc ", " done ")].concat()
            }
            (Screen::Chapters, InputMode::Normal) => [
                hint(" j/k ", " nav "),
                hint(" Enter ", " read "),
                hint(" r ", " reload "),
                hint(" Tab ", " find "),
                hint(" ? ", " help "),
                hint(" q ", " quit "),
            ]
            .concat(),
            (Screen::Search, InputMode::Normal) => [
                hint(" j/k ", " nav "),
                hint(" Enter ", " read "),
                hint(" / ", " edit "),
                hint(" Esc ", " new search "),
                hint(" Tab ", " chapters "),
                hint(" q ", " quit "),
            ]
            .concat(),
        }
    };

    let mut spans = vec![Span::styled(mode_text, mode_style), Span::raw(" ")];
    spans.extend(hints);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_chapters_screen(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Quran Chapters (Surahs) [{}] ", app.chapters.len()));

    if app.chapters_loading && app.chapters.is_empty() {
        let loading = Paragraph::new(format!("Loading Quran chapters{}", app.ellipsis()))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    let items: Vec<ListItem> = app
        .chapters
        .iter()
        .map(|chapter| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>4}  ", chapter.id), Style::default().fg(Color::Yellow)),
                Span::styled(format!("{:<18}", chapter.name_simple), Style::default().bold()),
                Span::styled(format!("{:<14}", chapter.name_arabic), Style::default().fg(Color::Green)),
                Span::raw(format!("{:<26}", chapter.translated_name.name)),
                Span::styled(
                    format!("{:>4} verses  {}", chapter.verses_count, chapter.revelation_label()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.chapter_state);
}

fn render_search_screen(app: &mut App, frame: &mut Frame, area: Rect) {
    let [input_area, message_area, cards_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Min(0),
    ])
    .areas(area);

    let editing = app.input_mode == InputMode::Editing;
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editing { Color::Yellow } else { Color::DarkGray }))
        .title(" How are you feeling? ");

    let (input_scroll, cursor_col) = input_view(
        &app.search_input,
        app.search_cursor,
        input_area.width.saturating_sub(2),
    );
    let input = if app.search_input.is_empty() && !editing {
        Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(app.search_input.as_str())
            .style(Style::default().fg(Color::Cyan))
            .scroll((0, input_scroll))
    };
    frame.render_widget(input.block(input_block), input_area);

    if editing {
        frame.set_cursor_position((input_area.x + 1 + cursor_col, input_area.y + 1));
    }

    let message: Text = if app.searching {
        Text::from(Line::from(Span::styled(
            format!("Analyzing your emotions and finding the perfect Surahs{}", app.ellipsis()),
            Style::default().fg(Color::Yellow).italic(),
        )))
    } else if app.has_searched {
        let mut lines = vec![Line::from(&app.advisor_message[..])];
        if let Some(emotion) = app.emotion {
            lines.push(Line::from(vec![
                Span::styled("Detected: ", Style::default().fg(Color::DarkGray)),
                Span::styled(emotion.label(), Style::default().fg(Color::Magenta).bold()),
            ]));
        }
        Text::from(lines)
    } else {
        Text::from("Tell me how you're feeling, and I'll recommend the perfect Surah for you.")
    };

    let message_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Advisor ");
    frame.render_widget(
        Paragraph::new(message).wrap(Wrap { trim: true }).block(message_block),
        message_area,
    );

    let cards_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editing { Color::DarkGray } else { Color::Cyan }))
        .title(" Recommendations ");

    if app.has_searched && app.recommendations.is_empty() {
        let empty = Paragraph::new(
            "I couldn't find specific recommendations for your request. Try describing your emotions or needs differently.",
        )
        .wrap(Wrap { trim: true })
        .block(cards_block);
        frame.render_widget(empty, cards_area);
        return;
    }

    let items: Vec<ListItem> = app
        .recommendations
        .iter()
        .map(|rec| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(rec.name, Style::default().bold()),
                    Span::styled(format!("  #{}", rec.id), Style::default().fg(Color::Yellow)),
                    Span::raw("  "),
                    Span::styled(rec.name_arabic, Style::default().fg(Color::Green)),
                ]),
                Line::from(Span::styled(rec.translation, Style::default().italic())),
                Line::from(vec![
                    Span::styled("Why this Surah: ", Style::default().fg(Color::Cyan).bold()),
                    Span::raw(rec.reason),
                ]),
                Line::default(),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(cards_block)
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, cards_area, &mut app.recommendation_state);
}

/// Horizontal scroll and cursor column that keep the cursor inside an input
/// box `width` cells wide. Columns are display cells, not chars.
fn input_view(input: &str, cursor: usize, width: u16) -> (u16, u16) {
    let byte = input.char_indices().nth(cursor).map_or(input.len(), |(i, _)| i);
    let before = u16::try_from(input[..byte].width()).unwrap_or(u16::MAX);
    let scroll = before.saturating_sub(width.saturating_sub(1));
    (scroll, before - scroll)
}

/// Center a popup taking the given percentages of `area`.
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}

fn modal_lines(content: &SurahContent) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    for verse in &content.verses {
        lines.push(Line::from(Span::styled(
            format!("Verse {}", verse.verse_number),
            Style::default().fg(Color::Yellow).bold(),
        )));
        lines.push(Line::from(verse.translation_text()));
        lines.push(Line::default());
    }

    if let Some(note) = content.partial_note() {
        lines.push(Line::from(Span::styled(note, Style::default().fg(Color::DarkGray).italic())));
    }
    lines
}

fn render_modal(app: &mut App, frame: &mut Frame, area: Rect) {
    let popup_area = centered(area, 85, 90);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Esc to close ");
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let Some(content) = app.selection.content() else {
        let loading = Paragraph::new(format!("Loading surah content{}", app.ellipsis()))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, inner);
        return;
    };

    let [title_area, verses_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(0),
    ])
    .areas(inner);

    let header = &content.header;
    let place_color = if header.revelation_place == "makkah" { Color::LightYellow } else { Color::LightGreen };
    let title = Text::from(vec![
        Line::from(Span::styled(header.name.clone(), Style::default().fg(Color::Cyan).bold())),
        Line::from(Span::styled(header.name_arabic.clone(), Style::default().fg(Color::Green))),
        Line::from(Span::styled(header.translation.clone(), Style::default().italic())),
        Line::from(vec![
            Span::raw(format!("{} verses  ", header.verses_count)),
            Span::styled(header.revelation_label(), Style::default().fg(place_color)),
        ]),
    ]);
    frame.render_widget(Paragraph::new(title), title_area);

    // Long translations wrap, so the scroll range is measured in rendered rows
    let paragraph = Paragraph::new(modal_lines(content)).wrap(Wrap { trim: true });
    let total_lines = u16::try_from(paragraph.line_count(verses_area.width)).unwrap_or(u16::MAX);

    app.modal_height = verses_area.height;
    app.modal_lines = total_lines;
    app.modal_scroll = app.modal_scroll.min(app.max_modal_scroll());

    frame.render_widget(paragraph.scroll((app.modal_scroll, 0)), verses_area);

    if total_lines > verses_area.height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("^"))
            .end_symbol(Some("v"));

        let mut scrollbar_state = ScrollbarState::new(total_lines as usize)
            .position(app.modal_scroll as usize);

        frame.render_stateful_widget(scrollbar, verses_area, &mut scrollbar_state);
    }
}

fn render_help(frame: &mut Frame, area: Rect) {
    let popup_area = centered(area, 50, 60);
    frame.render_widget(Clear, popup_area);

    let key_style = Style::default().fg(Color::Yellow).bold();
    let rows = [
        ("Tab", "switch between chapters and finder"),
        ("j / k", "move or scroll"),
        ("g / G", "first / last"),
        ("Enter", "open the chapter (again to close)"),
        ("/ or i", "describe how you feel"),
        ("Esc", "close popup / new search"),
        ("r", "reload chapter list"),
        ("Ctrl-d / Ctrl-u", "half page in a chapter"),
        ("q", "quit"),
    ];

    let lines: Vec<Line> = rows
        .iter()
        .map(|(key, label)| {
            Line::from(vec![
                Span::styled(format!("{:>16}  ", key), key_style),
                Span::raw(*label),
            ])
        })
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Keys (any key to close) "),
    );
    frame.render_widget(help, popup_area);
}
