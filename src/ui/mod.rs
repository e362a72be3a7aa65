pub mod fishing_scene;
mod stats_panel;

use crate::progression::PlayerProfile;
use crate::session::SessionState;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// Main UI drawing function.
pub fn draw_ui(
    frame: &mut Frame,
    state: &SessionState,
    profile: &PlayerProfile,
    status: Option<&str>,
    clock_ms: u64,
) {
    let size = frame.size();

    // Split vertically: match header, main content, footer
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Match header
            Constraint::Min(0),    // Scene + profile
            Constraint::Length(3), // Footer
        ])
        .split(size);

    stats_panel::draw_header(frame, v_chunks[0], state);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(65), // Fishing scene
            Constraint::Percentage(35), // Profile
        ])
        .split(v_chunks[1]);

    fishing_scene::render_fishing_scene(frame, chunks[0], state, clock_ms);
    stats_panel::draw_profile_panel(frame, chunks[1], profile);
    stats_panel::draw_footer(frame, v_chunks[2], status);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionPhase;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_draw_every_phase() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let profile = PlayerProfile::default();
        for phase in [
            SessionPhase::Idle,
            SessionPhase::Ready,
            SessionPhase::Waiting,
            SessionPhase::Hooked,
            SessionPhase::Celebrate,
            SessionPhase::Ended,
        ] {
            let state = SessionState {
                phase,
                reel_progress: 55.0,
                ..SessionState::default()
            };
            terminal
                .draw(|frame| draw_ui(frame, &state, &profile, Some("Bought river"), 1_234))
                .unwrap();
        }
    }

    #[test]
    fn test_draw_tiny_terminal() {
        let mut terminal = Terminal::new(TestBackend::new(10, 5)).unwrap();
        let state = SessionState::default();
        let profile = PlayerProfile::default();
        terminal
            .draw(|frame| draw_ui(frame, &state, &profile, None, 0))
            .unwrap();
    }
}
