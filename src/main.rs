use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use reelcast::build_info;
use reelcast::core::constants::{CONFIG_FILE, LOG_FILE, UI_FRAME_MS};
use reelcast::core::{GameConfig, GameData};
use reelcast::session::{GameSession, SessionEvent, SessionPhase};
use reelcast::shop::ShopItemKind;
use reelcast::storage::{
    json::data_dir, BackgroundLeaderboard, BackgroundSaver, JsonStore, LeaderboardEntry, LeaderboardStore, MemoryStore,
    ProfileStore,
};
use reelcast::ui;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

type SharedProfileStore = Box<dyn ProfileStore + Send + Sync>;
type SharedLeaderboard = Box<dyn LeaderboardStore + Send + Sync>;

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if let Some(flag) = args.get(1) {
        match flag.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                return Ok(());
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            _ => {}
        }
    }

    let dir = match data_dir() {
        Ok(dir) => Some(dir),
        Err(e) => {
            eprintln!("Warning: {}. Progress will not be saved.", e);
            None
        }
    };
    if let Some(dir) = &dir {
        init_logging(dir);
    }

    let config = load_config(dir.as_deref());
    let leaderboard_size = config.leaderboard_size;
    let data = Arc::new(GameData::new(config));
    let (profile_store, leaderboard) = open_stores(dir.as_deref(), leaderboard_size);

    match args.get(1).map(String::as_str) {
        None => run_game(data, profile_store, leaderboard),
        Some(command) => run_command(command, &args[2..], data, profile_store, leaderboard),
    }
}

fn print_help() {
    println!("Reelcast - terminal fishing\n");
    println!("Usage: reelcast [command]\n");
    println!("Commands:");
    println!("  (none)        Play a match");
    println!("  shop          List fishing spots and gear");
    println!("  buy <id>      Buy a shop item");
    println!("  sell-all      Sell every fish in your bag");
    println!("  env <id>      Switch to an owned fishing spot");
    println!("  profile       Show your profile");
    println!("  leaderboard   Show the top scores");
    println!("  --version     Show version information");
    println!("  --help        Show this help message");
}

/// Logs go to `~/.reelcast/reelcast.log`; the terminal belongs to the UI.
fn init_logging(dir: &Path) {
    let file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: could not open log file: {}", e);
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

fn load_config(dir: Option<&Path>) -> GameConfig {
    let Some(dir) = dir else {
        return GameConfig::default();
    };
    let path = dir.join(CONFIG_FILE);
    match GameConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            eprintln!("Warning: ignoring {}: {}", path.display(), e);
            GameConfig::default()
        }
    }
}

fn open_stores(
    dir: Option<&Path>,
    leaderboard_size: usize,
) -> (SharedProfileStore, SharedLeaderboard) {
    match dir {
        Some(dir) => {
            let profiles: SharedProfileStore =
                Box::new(JsonStore::with_dir(dir).with_leaderboard_size(leaderboard_size));
            let leaderboard: SharedLeaderboard =
                Box::new(JsonStore::with_dir(dir).with_leaderboard_size(leaderboard_size));
            (profiles, leaderboard)
        }
        None => {
            let memory = MemoryStore::new().with_leaderboard_size(leaderboard_size);
            let profiles: SharedProfileStore = Box::new(memory.clone());
            let leaderboard: SharedLeaderboard = Box::new(memory);
            (profiles, leaderboard)
        }
    }
}

fn run_command(
    command: &str,
    rest: &[String],
    data: Arc<GameData>,
    profile_store: SharedProfileStore,
    leaderboard: SharedLeaderboard,
) -> io::Result<()> {
    let mut session = GameSession::load(data, profile_store, None);

    match (command, rest.first()) {
        ("shop", _) => print_shop(&session),
        ("buy", Some(id)) => println!("{}", session.purchase(id).message()),
        ("sell-all", _) => println!("{}", session.sell_all().message()),
        ("env", Some(id)) => println!("{}", session.change_environment(id).message()),
        ("profile", _) => print_profile(&session),
        ("leaderboard", _) => {
            let subscription = leaderboard.subscribe(Box::new(print_leaderboard));
            subscription.unsubscribe();
        }
        ("buy", None) | ("env", None) => {
            eprintln!("Usage: reelcast {} <id>", command);
            std::process::exit(1);
        }
        (other, _) => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Run 'reelcast --help' for usage.");
            std::process::exit(1);
        }
    }
    for warning in session.take_warnings() {
        eprintln!("Warning: {}", warning);
    }
    Ok(())
}

fn print_shop(session: &GameSession) {
    let profile = session.profile();
    println!("Coins: {}  Level: {}\n", profile.currency, profile.level());
    for (heading, kind) in [
        ("Fishing spots", ShopItemKind::Environment),
        ("Gear", ShopItemKind::Upgrade),
    ] {
        println!("{}:", heading);
        for item in session.data().shop.items().iter().filter(|i| i.kind == kind) {
            let owned = match kind {
                ShopItemKind::Environment => profile.owns_environment(item.id),
                ShopItemKind::Upgrade => profile.owns_upgrade(item.id),
            };
            let marker = if owned { "owned" } else { "" };
            println!(
                "  {:<18} {:>5} coins  Lv.{:<3} {:<6} {}",
                item.id, item.price, item.required_level, marker, item.description
            );
        }
        println!();
    }
}

fn print_profile(session: &GameSession) {
    let profile = session.profile();
    println!("{} - Level {} ({} XP)", profile.display_name, profile.level(), profile.xp());
    println!("Coins: {}", profile.currency);
    println!("Spot: {}", profile.current_environment);
    println!("Fish in bag: {}", profile.inventory.len());
    println!("Total catches: {}", profile.total_catches);
    println!("Fish sold: {}", profile.total_fish_sold);
    println!("Matches played: {}", profile.games_played);
    println!("Play time: {}s", profile.total_play_time);
    println!("Best score: {}", profile.best_score);
    println!("Longest streak: {}", profile.longest_streak);
    println!("Achievements: {}", profile.achievements.len());
}

fn print_leaderboard(entries: &[LeaderboardEntry]) {
    if entries.is_empty() {
        println!("No scores yet.");
        return;
    }
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "{:>2}. {:<16} {:>6} pts  {:>3} fish  streak {:<3} Lv.{}",
            i + 1,
            entry.player_name,
            entry.score,
            entry.total_catches,
            entry.longest_streak,
            entry.level
        );
    }
}

fn run_game(
    data: Arc<GameData>,
    profile_store: SharedProfileStore,
    leaderboard: SharedLeaderboard,
) -> io::Result<()> {
    let saver = BackgroundSaver::new(profile_store)?;
    let submitter = BackgroundLeaderboard::new(leaderboard)?;
    let mut session =
        GameSession::load(data, Box::new(saver), None).with_leaderboard(Box::new(submitter));
    info!(level = session.profile().level(), "reelcast started");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = game_loop(&mut terminal, &mut session);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    // Dropping the session flushes queued saves
    drop(session);
    println!("Goodbye!");
    result
}

fn game_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut GameSession,
) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut status: Option<String> = None;
    let mut last_frame = Instant::now();

    loop {
        let snapshot = session.snapshot();
        terminal.draw(|frame| {
            ui::draw_ui(
                frame,
                &snapshot,
                session.profile(),
                status.as_deref(),
                session.clock_ms(),
            );
        })?;

        let mut events = Vec::new();
        if event::poll(Duration::from_millis(UI_FRAME_MS))? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    match key_event.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            session.end_game();
                            return Ok(());
                        }
                        KeyCode::Char(' ') | KeyCode::Enter => match session.state().phase {
                            SessionPhase::Ready => events.extend(session.cast(&mut rng)),
                            SessionPhase::Hooked => events.extend(session.reel()),
                            _ => {}
                        },
                        KeyCode::Char('n') | KeyCode::Char('N') => {
                            events.extend(session.start_game());
                        }
                        _ => {}
                    }
                }
            }
        }

        let elapsed = last_frame.elapsed().as_millis() as u64;
        last_frame = Instant::now();
        events.extend(session.advance(elapsed, &mut rng));

        for event in &events {
            if let Some(message) = event_message(event) {
                status = Some(message);
            }
        }
    }
}

fn event_message(event: &SessionEvent) -> Option<String> {
    match event {
        SessionEvent::GameStarted => Some("Match started. Good luck!".to_string()),
        SessionEvent::Caught { outcome, .. } => {
            let mut message = format!(
                "Caught a {} (+{} pts, +{} XP)",
                outcome.fish.species, outcome.score_delta, outcome.xp_gained
            );
            if outcome.leveled_up {
                message.push_str(&format!(" Level {}!", outcome.new_level));
            }
            if !outcome.achievements_unlocked.is_empty() {
                message.push_str(&format!(
                    " {} achievement(s), +{} coins",
                    outcome.achievements_unlocked.len(),
                    outcome.achievement_coins
                ));
            }
            Some(message)
        }
        SessionEvent::Escaped { fish } => Some(format!("The {} got away.", fish.species)),
        SessionEvent::MatchEnded { result, rank } => Some(match rank {
            Some(rank) => format!("Match over: {} pts, rank #{}", result.score, rank),
            None => format!("Match over: {} pts", result.score),
        }),
        SessionEvent::Ranked {
            rank: Some(rank), ..
        } => Some(format!("Leaderboard rank #{}", rank)),
        SessionEvent::PersistenceWarning(message) => Some(message.clone()),
        SessionEvent::Cast { .. }
        | SessionEvent::Bite { .. }
        | SessionEvent::Reeled { .. }
        | SessionEvent::Ranked { rank: None, .. }
        | SessionEvent::BackToReady => None,
    }
}
