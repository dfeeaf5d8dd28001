//! Login screen

use super::components::{render_button, BUTTON_HEIGHT};
use super::forms::draw_field;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const CARD_WIDTH: u16 = 50;
const CARD_HEIGHT: u16 = 15;

/// Draw the roll number / name card
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let [card] = Layout::horizontal([Constraint::Length(CARD_WIDTH)])
        .flex(Flex::Center)
        .areas(area);
    let [card] = Layout::vertical([Constraint::Length(CARD_HEIGHT)])
        .flex(Flex::Center)
        .areas(card);

    let block = Block::default()
        .title(" Student Login ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Intro
            Constraint::Length(3),             // Roll number
            Constraint::Length(3),             // Name
            Constraint::Length(1),             // Spacer
            Constraint::Length(BUTTON_HEIGHT), // Login button
            Constraint::Min(0),
        ])
        .horizontal_margin(1)
        .split(inner);

    let intro = Paragraph::new(Line::from(Span::styled(
        "Enter your details to open your application form",
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
    )));
    frame.render_widget(intro, chunks[0]);

    let form = &app.state.login_form;
    for (idx, area) in [chunks[1], chunks[2]].into_iter().enumerate() {
        if let Some(field) = form.get_field(idx) {
            draw_field(frame, area, field, form.active_field_index == idx);
        }
    }

    let [button] = Layout::horizontal([Constraint::Length(11)])
        .flex(Flex::End)
        .areas(chunks[4]);
    render_button(frame, button, "Login", form.is_button_active());
}
