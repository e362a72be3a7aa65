use crate::progression::{xp_to_next_level, PlayerProfile};
use crate::session::SessionState;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draws the match header: time left, score, and streak.
pub fn draw_header(frame: &mut Frame, area: Rect, state: &SessionState) {
    let time_color = if state.time_left_seconds <= 10 {
        Color::Red
    } else {
        Color::Green
    };

    let header_text = vec![Line::from(vec![
        Span::styled(
            format!("Time: {}s", state.time_left_seconds),
            Style::default().fg(time_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("Score: {}", state.score),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("Catches: {}", state.total_catches),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("Streak: {} (best {})", state.streak, state.longest_streak),
            Style::default().fg(Color::Magenta),
        ),
    ])];

    let header = Paragraph::new(header_text)
        .block(Block::default().borders(Borders::ALL).title(" Match "))
        .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

/// Draws the player panel: level, XP, coins, spot, and inventory size.
pub fn draw_profile_panel(frame: &mut Frame, area: Rect, profile: &PlayerProfile) {
    let xp_line = match xp_to_next_level(profile.xp()) {
        Some(remaining) => format!("XP: {} ({} to next level)", profile.xp(), remaining),
        None => format!("XP: {} (max level)", profile.xp()),
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("{} - Level {}", profile.display_name, profile.level()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(xp_line, Style::default().fg(Color::Yellow))),
        Line::from(format!("Coins: {}", profile.currency)),
        Line::from(format!("Spot: {}", profile.current_environment)),
        Line::from(format!("Fish in bag: {}", profile.inventory.len())),
        Line::from(format!("Achievements: {}", profile.achievements.len())),
        Line::from(format!("Best score: {}", profile.best_score)),
    ];

    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Angler "));
    frame.render_widget(panel, area);
}

/// Draws the controls footer with the latest status message.
pub fn draw_footer(frame: &mut Frame, area: Rect, status: Option<&str>) {
    let mut spans = vec![
        Span::styled("Controls: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            "SPACE",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" = Cast/Reel | "),
        Span::styled(
            "N",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" = New match | "),
        Span::styled(
            "Q",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" = Quit"),
    ];
    if let Some(status) = status {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            status.to_string(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let footer = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
