use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use tasklist_core::{clock::Clock, location::History, tasks::Task};
use tasklist_view::EditState;

use super::app::{App, Focus};

pub fn draw<H: History, C: Clock>(frame: &mut Frame, app: &App<H, C>) {
    let editing_id = app.vm.state().editing_id();
    let edit_height = if editing_id.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(edit_height),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(Line::from(Span::styled(
        "Todo List",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .centered();
    frame.render_widget(header, chunks[0]);

    let state = app.vm.state();
    render_input(
        frame,
        chunks[1],
        "Search tasks",
        &state.search_text,
        app.focus == Focus::Search,
    );
    render_input(
        frame,
        chunks[2],
        "New task",
        &state.draft_text,
        app.focus == Focus::NewTask,
    );
    if let (Some(id), EditState::Editing { draft_text, .. }) = (editing_id, &state.editing) {
        render_input(
            frame,
            chunks[3],
            &format!("Edit Task #{id}"),
            draft_text,
            app.focus == Focus::Edit,
        );
    }

    let tasks = app.vm.filtered_tasks();
    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| task_item(idx + 1, task))
        .collect();
    let list = List::new(items)
        .block(focused_block("Tasks", app.focus == Focus::List))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");
    let mut list_state =
        ListState::default().with_selected((!tasks.is_empty()).then_some(app.selected));
    frame.render_stateful_widget(list, chunks[4], &mut list_state);

    let footer = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::Cyan)),
            Span::raw(" focus  "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" toggle  "),
            Span::styled("e", Style::default().fg(Color::Cyan)),
            Span::raw(" edit  "),
            Span::styled("d", Style::default().fg(Color::Cyan)),
            Span::raw(" delete  "),
            Span::styled("q/Esc", Style::default().fg(Color::Cyan)),
            Span::raw(" quit"),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(app.vm.history().location().to_string()),
    );
    frame.render_widget(footer, chunks[5]);
}

fn render_input(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let mut line = vec![Span::raw(value.to_string())];
    if focused {
        line.push(Span::styled("_", Style::default().fg(Color::Cyan)));
    }
    let input = Paragraph::new(Line::from(line)).block(focused_block(title, focused));
    frame.render_widget(input, area);
}

fn focused_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .title(title.to_string())
}

fn task_item(position: usize, task: &Task) -> ListItem<'static> {
    let (mark, text_style) = if task.done {
        (
            "[x]",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        ("[ ]", Style::default().add_modifier(Modifier::BOLD))
    };
    ListItem::new(Text::from(vec![
        Line::from(vec![
            Span::raw(format!("{position}. {mark} ")),
            Span::styled(task.text.clone(), text_style),
        ]),
        Line::from(Span::raw(format!("     {}", task.description))),
        Line::from(Span::styled(
            format!("     {}", task.timestamp),
            Style::default().fg(Color::Gray),
        )),
    ]))
}
