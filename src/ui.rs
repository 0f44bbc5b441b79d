use crate::{
    app::{App, Dialog, Row, Tab},
    category::ALL,
    state::MAX_STARS,
};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, List, ListItem, ListState, Padding, Paragraph, Row as TableRow, Table},
};
use std::{io, time::Duration};

#[derive(Clone)]
struct Theme {
    accent: Color,
    border: Color,
    text: Color,
    muted: Color,
    success: Color,
    warning: Color,
    header_bg: Color,
}

impl Theme {
    fn new() -> Self {
        Self {
            accent: Color::Rgb(255, 170, 190),
            border: Color::Rgb(90, 75, 85),
            text: Color::Rgb(235, 228, 230),
            muted: Color::Rgb(140, 130, 135),
            success: Color::Rgb(130, 215, 150),
            warning: Color::Rgb(235, 205, 125),
            header_bg: Color::Rgb(32, 24, 30),
        }
    }

    fn block(&self, title: &str) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.border))
            .title(Span::styled(
                title.to_string(),
                Style::default().fg(self.accent).add_modifier(Modifier::BOLD),
            ))
    }

    fn panel(&self, title: &str) -> Block<'static> {
        self.block(title).padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        })
    }
}

pub fn run(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Terminal<impl Backend>, app: &mut App) -> Result<()> {
    let theme = Theme::new();
    loop {
        app.tick();
        app.clamp_selection();
        terminal.draw(|frame| draw(frame, app, &theme))?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                handle_key(app, key)?;
            }
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if app.dialog.is_some() {
        return handle_dialog_key(app, key);
    }
    if app.picker.is_some() {
        handle_picker_key(app, key);
        return Ok(());
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab | KeyCode::Right => {
            app.active_tab = app.active_tab.next();
            app.selected = 0;
        }
        KeyCode::BackTab | KeyCode::Left => {
            app.active_tab = app.active_tab.prev();
            app.selected = 0;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.selected = app.selected.saturating_add(1);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.selected = app.selected.saturating_sub(1);
        }
        KeyCode::Char(c @ '1'..='5') => {
            let stars = c as u8 - b'0';
            let outcome = app.rate_selected(stars);
            report(app, outcome);
        }
        KeyCode::Char('0') | KeyCode::Char('x') => {
            let outcome = app.rate_selected(0);
            report(app, outcome);
        }
        KeyCode::Char('a') => app.toggle_available_only(),
        KeyCode::Char('h') => {
            let outcome = app.toggle_hide_collected();
            report(app, outcome);
        }
        KeyCode::Char('l') => app.toggle_level_sort(),
        KeyCode::Char('o') => app.open_location_picker(),
        KeyCode::Char('c') => app.request_clear_category(),
        _ => {}
    }
    Ok(())
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) -> Result<()> {
    let Some(dialog) = app.dialog.take() else {
        return Ok(());
    };
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => match dialog {
            Dialog::ClearCategory(category) => {
                let outcome = app.clear_category(category);
                report(app, outcome);
            }
        },
        KeyCode::Char('n') | KeyCode::Esc => {
            app.status = "Cancelled".to_string();
        }
        _ => {
            app.dialog = Some(dialog);
        }
    }
    Ok(())
}

fn handle_picker_key(app: &mut App, key: KeyEvent) {
    let Some(mut picker) = app.picker.take() else {
        return;
    };
    match key.code {
        KeyCode::Esc => {}
        KeyCode::Down | KeyCode::Char('j') => {
            if picker.selected + 1 < picker.options.len() {
                picker.selected += 1;
            }
            app.picker = Some(picker);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            picker.selected = picker.selected.saturating_sub(1);
            app.picker = Some(picker);
        }
        KeyCode::Enter => {
            if let Some(option) = picker.options.get(picker.selected) {
                app.select_location(picker.category, option.selection.clone());
            }
        }
        _ => {
            app.picker = Some(picker);
        }
    }
}

fn report(app: &mut App, outcome: Result<()>) {
    if let Err(err) = outcome {
        app.status = format!("Action failed: {err}");
    }
}

fn draw(frame: &mut Frame, app: &App, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.size());

    draw_header(frame, app, theme, chunks[0]);
    draw_tabs(frame, app, theme, chunks[1]);
    match app.active_tab.category() {
        Some(category) => {
            let rows = app.visible_rows(category);
            draw_list(
                frame,
                app,
                theme,
                chunks[2],
                category.display_name(),
                &rows,
                Some(app.selected),
            );
        }
        None => draw_all(frame, app, theme, chunks[2]),
    }
    draw_footer(frame, app, theme, chunks[3]);

    if app.picker.is_some() {
        draw_picker(frame, app, theme);
    }
    if app.dialog.is_some() {
        draw_dialog(frame, app, theme);
    }
}

fn draw_header(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let (completed, total) = app.overall_progress();
    let line = Line::from(vec![
        Span::styled(
            " Heartsmith ",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", app.clock_label()),
            Style::default().fg(theme.warning),
        ),
        Span::styled(
            format!(" {completed}/{total} collected "),
            Style::default().fg(theme.muted),
        ),
    ]);
    let paragraph = Paragraph::new(line).style(Style::default().bg(theme.header_bg));
    frame.render_widget(paragraph, area);
}

fn draw_tabs(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let mut spans = Vec::new();
    for tab in [Tab::Fish, Tab::Bugs, Tab::Birds, Tab::All] {
        let style = if tab == app.active_tab {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        };
        spans.push(Span::styled(format!("  {}  ", tab.title()), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_all(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);
    for (category, column) in ALL.into_iter().zip(columns.iter()) {
        let rows = app.visible_rows(category);
        let (completed, total) = app.progress(category);
        let title = format!("{} {completed}/{total}", category.display_name());
        draw_list(frame, app, theme, *column, &title, &rows, None);
    }
}

fn draw_list(
    frame: &mut Frame,
    app: &App,
    theme: &Theme,
    area: Rect,
    title: &str,
    rows: &[Row],
    selected: Option<usize>,
) {
    let mut label = title.to_string();
    if let Some(category) = app.active_tab.category() {
        let config = app.sort_config(category);
        if let Some(filter) = &config.location_filter {
            label.push_str(&format!(" @ {filter}"));
        }
        if config.level_active() {
            label.push_str(" [level]");
        }
    }
    if app.show_available_only {
        label.push_str(" [available]");
    }

    let table_rows: Vec<TableRow> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let mut style = Style::default().fg(theme.text);
            if row.complete {
                style = Style::default().fg(theme.success);
            } else if !row.available {
                style = Style::default().fg(theme.muted);
            }
            if selected == Some(index) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            TableRow::new(vec![
                Cell::from(star_string(row.stars)),
                Cell::from(row.name.clone()),
                Cell::from(row.meta.clone()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        table_rows,
        [
            Constraint::Length(u16::from(MAX_STARS) + 1),
            Constraint::Length(24),
            Constraint::Min(10),
        ],
    )
    .block(theme.panel(&label));
    frame.render_widget(table, area);
}

fn star_string(stars: u8) -> String {
    let mut out = String::new();
    for i in 1..=MAX_STARS {
        out.push(if i <= stars { '★' } else { '☆' });
    }
    out
}

fn draw_footer(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let help = "q quit  tab switch  j/k move  1-5 rate  0 clear  a available  h hide done  l level  o location  c reset";
    let line = if app.status.is_empty() {
        Line::from(Span::styled(help, Style::default().fg(theme.muted)))
    } else {
        Line::from(vec![
            Span::styled(
                format!("{} ", app.status),
                Style::default().fg(theme.warning),
            ),
            Span::styled(help, Style::default().fg(theme.muted)),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_picker(frame: &mut Frame, app: &App, theme: &Theme) {
    let Some(picker) = &app.picker else {
        return;
    };
    let area = centered_rect(frame.size(), 40, 14);
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = picker
        .options
        .iter()
        .map(|option| ListItem::new(option.label.clone()))
        .collect();
    let mut state = ListState::default();
    state.select(Some(picker.selected));

    let title = format!("{} locations", picker.category.display_name());
    let list = List::new(items)
        .block(theme.panel(&title))
        .style(Style::default().fg(theme.text))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_dialog(frame: &mut Frame, app: &App, theme: &Theme) {
    let Some(Dialog::ClearCategory(category)) = &app.dialog else {
        return;
    };
    let area = centered_rect(frame.size(), 46, 5);
    frame.render_widget(Clear, area);
    let message = format!(
        "Reset all {} progress? (y/n)",
        category.display_name()
    );
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(theme.text))
        .block(theme.panel("Confirm"));
    frame.render_widget(paragraph, area);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
