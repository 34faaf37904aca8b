use std::fs::File;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pacman_arcade::catalog::LevelCatalog;
use pacman_arcade::config::Config;
use pacman_arcade::error::LevelLoadError;
use pacman_arcade::input::{direction_for, InputLatch};
use pacman_arcade::state::GameStateMachine;
use pacman_arcade::strategy::Direction;
use pacman_arcade::terminal::TerminalCanvas;

const INPUT_HOLD_MS: u64 = 160;
const DOUBLE_CLICK_MS: u64 = 400;

fn main() -> io::Result<()> {
    let config = Config::from_env();
    init_tracing(&config)?;
    info!(?config, "starting");

    let machine = GameStateMachine::new(LevelCatalog::builtin(), config.clone())
        .map_err(load_failed)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, machine, &config);

    stdout.execute(Show)?;
    stdout.execute(DisableMouseCapture)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    if let Err(err) = &result {
        error!(error = %err, "game stopped");
    }
    result
}

// Logs go to `PACMAN_LOG` when set; the terminal itself is taken by the game.
fn init_tracing(config: &Config) -> io::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn load_failed(err: LevelLoadError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}

fn run(stdout: &mut Stdout, mut machine: GameStateMachine, config: &Config) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let (width, height) = machine.screen_size();
    let mut canvas = TerminalCanvas::new(width, height);
    let mut latch = InputLatch::new(height);
    let mut last_seen: [Option<Instant>; 4] = [None, None, None, None];
    let mut last_pressed: Option<Direction> = None;
    let mut last_click: Option<Instant> = None;
    let frame_time = Duration::from_micros(1_000_000 / u64::from(config.frame_rate.max(1)));

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    let ctrl_c = key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL);
                    if key.code == KeyCode::Char('q') || ctrl_c {
                        return Ok(());
                    }
                    if let Some(dir) = direction_for(key.code) {
                        last_seen[idx_for_dir(dir)] = Some(Instant::now());
                        last_pressed = Some(dir);
                    }
                    latch.press(key.code);
                }
                Event::Mouse(mouse) => {
                    let at = canvas.to_world(mouse.column, mouse.row);
                    if at.is_some() {
                        latch.pointer = at;
                    }
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        let now = Instant::now();
                        let double = last_click.map_or(false, |t| {
                            now.duration_since(t) <= Duration::from_millis(DOUBLE_CLICK_MS)
                        });
                        if double {
                            latch.double_click(at);
                            last_click = None;
                        } else {
                            latch.click(at);
                            last_click = Some(now);
                        }
                    }
                }
                _ => {}
            }
        }

        latch.held = active_dir_recent(&last_seen, last_pressed);
        let (width, height) = machine.screen_size();
        canvas.resize(width, height);
        latch.screen_height = height;
        machine
            .tick(&mut latch, &mut canvas, &mut rng)
            .map_err(load_failed)?;
        canvas.present(stdout, terminal::size()?)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// Direction key pressed recently enough to count as still held. Terminals
// report repeats rather than releases, so "held" means "seen lately".
fn active_dir_recent(
    last_seen: &[Option<Instant>; 4],
    last_pressed: Option<Direction>,
) -> Option<Direction> {
    let now = Instant::now();
    if let Some(dir) = last_pressed {
        if let Some(t) = last_seen[idx_for_dir(dir)] {
            if now.duration_since(t) <= Duration::from_millis(INPUT_HOLD_MS) {
                return Some(dir);
            }
        }
    }
    let mut best: Option<(Direction, Instant)> = None;
    for (idx, dir) in [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
        .iter()
        .enumerate()
    {
        if let Some(t) = last_seen[idx] {
            if now.duration_since(t) <= Duration::from_millis(INPUT_HOLD_MS) {
                match best {
                    None => best = Some((*dir, t)),
                    Some((_, bt)) if t > bt => best = Some((*dir, t)),
                    _ => {}
                }
            }
        }
    }
    best.map(|(dir, _)| dir)
}

fn idx_for_dir(dir: Direction) -> usize {
    match dir {
        Direction::Up => 0,
        Direction::Down => 1,
        Direction::Left => 2,
        Direction::Right => 3,
    }
}
