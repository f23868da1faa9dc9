mod render;

use std::error::Error;
use std::fs::File;
use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;

use valentine_pacman::config::Settings;
use valentine_pacman::{Dir, FrameClock, Game};

use render::Renderer;

enum Command {
    Turn(Dir),
    Reset,
    Quit,
}

fn main() -> Result<(), Box<dyn Error>> {
    let settings = Settings::from_env()?;
    init_logging(&settings)?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &settings);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result?;
    Ok(())
}

fn init_logging(settings: &Settings) -> io::Result<()> {
    let Some(path) = &settings.log_path else {
        return Ok(());
    };
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(stdout: &mut Stdout, settings: &Settings) -> io::Result<()> {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let epoch = Instant::now();
    let mut clock = FrameClock::new();
    let mut game = Game::new(0.0);
    let mut renderer = Renderer::new(game.maze.width(), game.maze.height());
    let frame_time = Duration::from_micros(1_000_000 / settings.fps.max(1));
    log::info!("starting at {} fps, seed {:?}", settings.fps, settings.seed);

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => match command_for(key.code) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::Reset) => {
                        game.reset(epoch.elapsed().as_secs_f64());
                        renderer.invalidate();
                    }
                    Some(Command::Turn(dir)) => game.set_intent(dir),
                    None => {}
                },
                Event::Resize(..) => renderer.invalidate(),
                _ => {}
            }
        }

        let now = epoch.elapsed().as_secs_f64();
        let dt = clock.tick(now);
        if !game.is_over() {
            game.step(now, dt, &mut rng);
        }
        renderer.draw(stdout, &game, now)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn command_for(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Command::Turn(Dir::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Command::Turn(Dir::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Command::Turn(Dir::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Command::Turn(Dir::Down),
        KeyCode::Char('r') => Command::Reset,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(command)
}
