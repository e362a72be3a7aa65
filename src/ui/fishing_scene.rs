//! Fishing scene rendering.
//!
//! Draws the water, bobber, and reel gauge for a `SessionState` snapshot.

use crate::fishing::FishRarity;
use crate::session::{SessionPhase, SessionState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Braille spinner frames.
const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Spinner frame for a session clock reading, advancing every 100ms.
pub fn spinner_char(clock_ms: u64) -> char {
    SPINNER[((clock_ms / 100) % SPINNER.len() as u64) as usize]
}

pub fn rarity_color(rarity: FishRarity) -> Color {
    match rarity {
        FishRarity::Common => Color::White,
        FishRarity::Uncommon => Color::Green,
        FishRarity::Rare => Color::Blue,
        FishRarity::Legendary => Color::Magenta,
    }
}

/// Renders the fishing scene.
///
/// # Layout
/// ```text
/// +---------------------------------------+
/// |     ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~         |
/// |       ~~~~~~ O ~~~~~~                 |
/// |     ~ ~ ~ ~ ~|~ ~ ~ ~ ~ ~ ~           |
/// +---------------------------------------+
/// | Reel ██████████░░░░░░░░ 52%           |
/// +---------------------------------------+
/// | FISH ON! [Rare] Salmon                |
/// +---------------------------------------+
/// ```
pub fn render_fishing_scene(frame: &mut Frame, area: Rect, state: &SessionState, clock_ms: u64) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Water
            Constraint::Length(3), // Reel gauge
            Constraint::Length(4), // Phase status
        ])
        .split(area);

    draw_water(frame, chunks[0], state);
    draw_reel_gauge(frame, chunks[1], state);
    draw_status(frame, chunks[2], state, clock_ms);
}

fn draw_water(frame: &mut Frame, area: Rect, state: &SessionState) {
    let water = Style::default().fg(Color::Blue);
    let line = Style::default().fg(Color::DarkGray);

    let lines = match state.phase {
        SessionPhase::Waiting => vec![
            Line::from(Span::styled("~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~", water)),
            Line::from(vec![
                Span::styled("~~~~~~", water),
                Span::styled(
                    " O ",
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("~~~~~~", water),
            ]),
            Line::from(vec![
                Span::styled("~ ~ ~ ~ ~", water),
                Span::styled("|", line),
                Span::styled("~ ~ ~ ~ ~", water),
            ]),
        ],
        SessionPhase::Hooked => vec![
            Line::from(Span::styled("~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~", water)),
            Line::from(vec![
                Span::styled("~~~", water),
                Span::styled("~", Style::default().fg(Color::LightBlue)),
                Span::styled("~~", water),
                Span::styled(
                    " O ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled("~~", water),
                Span::styled("~", Style::default().fg(Color::LightBlue)),
                Span::styled("~~~", water),
            ]),
            Line::from(vec![
                Span::styled("~ ~ ~ ~", water),
                Span::styled(" |", line),
                Span::styled(" ~ ~ ~ ~ ~", water),
            ]),
            Line::from(Span::styled("><>", Style::default().fg(Color::Yellow))),
        ],
        _ => vec![
            Line::from(Span::styled("~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~", water)),
            Line::from(Span::styled("~~~~~~~~~~~~~~~~~~~~~~~~~", water)),
            Line::from(Span::styled("~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~ ~", water)),
        ],
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Water "))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_reel_gauge(frame: &mut Frame, area: Rect, state: &SessionState) {
    let ratio = (state.reel_progress / 100.0).clamp(0.0, 1.0);
    let color = if ratio < 0.25 {
        Color::Red
    } else if ratio < 0.75 {
        Color::Yellow
    } else {
        Color::Green
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Reel "))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio)
        .label(format!("{:.0}%", state.reel_progress));
    frame.render_widget(gauge, area);
}

fn draw_status(frame: &mut Frame, area: Rect, state: &SessionState, clock_ms: u64) {
    let spinner = spinner_char(clock_ms);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let lines = match state.phase {
        SessionPhase::Idle => vec![Line::from(Span::styled(
            "Press N to start a match",
            bold.fg(Color::Cyan),
        ))],
        SessionPhase::Ready => vec![Line::from(Span::styled(
            "Press SPACE to cast",
            bold.fg(Color::White),
        ))],
        SessionPhase::Waiting => vec![Line::from(Span::styled(
            format!("{} Waiting for a bite...", spinner),
            bold.fg(Color::Cyan),
        ))],
        SessionPhase::Hooked => {
            let mut lines = vec![Line::from(Span::styled(
                "FISH ON! Tap SPACE to reel!",
                bold.fg(Color::Yellow),
            ))];
            if let Some(fish) = &state.current_fish {
                lines.push(Line::from(Span::styled(
                    format!("[{}] {}", fish.rarity.name(), fish.species),
                    Style::default().fg(rarity_color(fish.rarity)),
                )));
            }
            lines
        }
        SessionPhase::Celebrate => {
            let mut lines = vec![Line::from(Span::styled("Caught!", bold.fg(Color::Green)))];
            if let Some(fish) = &state.last_catch {
                lines.push(Line::from(Span::styled(
                    format!(
                        "[{}] {} - {:.1} in",
                        fish.rarity.name(),
                        fish.species,
                        fish.size_inches
                    ),
                    Style::default().fg(rarity_color(fish.rarity)),
                )));
            }
            lines
        }
        SessionPhase::Ended => vec![
            Line::from(Span::styled("Time's up!", bold.fg(Color::Magenta))),
            Line::from(format!(
                "Final score {} with {} fish. Press N to play again.",
                state.score, state.total_catches
            )),
        ],
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Status "))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
