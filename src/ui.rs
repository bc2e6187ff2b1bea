use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::border,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, PopupState};
use crate::constants::{FOOTER_HEIGHT, HEADER_HEIGHT};
use crate::widgets::graph::DagGraphWidget;

/// Render the entire application UI
pub fn render(app: &App, frame: &mut Frame) {
    let size = frame.area();

    let chunks = Layout::default()
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(size);

    render_header(app, frame, chunks[0]);
    render_graph(app, frame, chunks[1]);
    render_footer(app, frame, chunks[2]);

    match &app.popup_state {
        PopupState::BlockInput(input) => render_block_input(frame, size, input),
        PopupState::Message(message) => render_message_popup(frame, size, message),
        PopupState::None => {}
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let header_block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(header_block.clone(), area);

    if area.height <= 2 {
        return;
    }

    let title = Line::from(vec![
        "[".into(),
        "lazy".green().bold(),
        "dag".blue().bold(),
        "]".into(),
    ]);

    let title_paragraph = Paragraph::new(title).alignment(Alignment::Left);
    let title_area = Rect::new(
        area.x + 2,
        area.y + 1,
        12.min(area.width.saturating_sub(2)),
        1,
    );
    frame.render_widget(title_paragraph, title_area);

    let block_text = match app.block_number {
        Some(number) => format!("Block: {number}"),
        None => "Block: head".to_string(),
    };
    let block_label = Paragraph::new(block_text)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    let block_area = Rect::new(area.x + 1, area.y + 1, area.width.saturating_sub(2), 1);
    frame.render_widget(block_label, block_area);

    if area.width > 50 {
        let analyzer_text = match &app.analyzer_state {
            Some(state) => format!(
                "chain {} | analyzed {}/{}",
                state.chain_id, state.latest_analyzed_block, state.latest_block
            ),
            None => "analyzer: n/a".to_string(),
        };
        let width = (analyzer_text.len() as u16).min(area.width.saturating_sub(4));
        let analyzer_label = Paragraph::new(analyzer_text)
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Right);
        let analyzer_area = Rect::new(area.right().saturating_sub(width + 2), area.y + 1, width, 1);
        frame.render_widget(analyzer_label, analyzer_area);
    }
}

fn render_graph(app: &App, frame: &mut Frame, area: Rect) {
    let graph_block = Block::default()
        .borders(Borders::ALL)
        .title(" Transaction DAG ")
        .title_style(Style::default().add_modifier(Modifier::BOLD))
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(graph_block.clone(), area);
    let inner_area = graph_block.inner(area);

    if app.loading {
        let loading = Paragraph::new("Loading transaction DAG...")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        frame.render_widget(loading, inner_area);
        return;
    }

    match app.session.engine() {
        Some(engine) => frame.render_widget(DagGraphWidget::new(engine), inner_area),
        None => {
            let no_data_message = Paragraph::new("No graph data")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            frame.render_widget(no_data_message, inner_area);
        }
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let footer_block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(footer_block.clone(), area);
    let inner_area = footer_block.inner(area);

    let text = match &app.status {
        Some(status) => Line::from(status.clone()).style(Style::default().fg(Color::Red)),
        None => Line::from("q:Quit  r:Refresh  g:Go to block  L:Latest  ←/→:Prev/Next")
            .style(Style::default().fg(Color::Gray)),
    };
    let footer = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(footer, inner_area);
}

/// Render the block-number entry popup
fn render_block_input(frame: &mut Frame, area: Rect, input: &str) {
    let popup_area = centered_popup_area(area, 30, 5);

    let popup_block = Block::default()
        .title(" Go to Block ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup_block.clone(), popup_area);

    let inner_area = popup_block.inner(popup_area);
    let prompt = Paragraph::new(format!("> {input}_"))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Left);
    frame.render_widget(prompt, inner_area);
}

/// Render a transient message popup
fn render_message_popup(frame: &mut Frame, area: Rect, message: &str) {
    let popup_area = centered_popup_area(area, 50, 7);

    let popup_block = Block::default()
        .title(" Message ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup_block.clone(), popup_area);

    let inner_area = popup_block.inner(popup_area);
    let content = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .wrap(ratatui::widgets::Wrap { trim: true });
    frame.render_widget(content, inner_area);
}

/// Helper function to create a centered popup area
fn centered_popup_area(parent: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(parent.width.saturating_sub(4));
    let popup_height = height.min(parent.height.saturating_sub(4));

    let popup_x = parent.x + (parent.width.saturating_sub(popup_width)) / 2;
    let popup_y = parent.y + (parent.height.saturating_sub(popup_height)) / 2;

    Rect::new(popup_x, popup_y, popup_width, popup_height)
}
