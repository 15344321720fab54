//! Terminal rendering of a `Figure`

use crate::cli::Args;
use crate::figure::{Figure, title_line};
use anyhow::{Context, Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use image::DynamicImage;
use std::io::{self, IsTerminal, Write};
use viuer::{Config as ViuerConfig, print};

/// Pixel size of one grid cell before viuer scales the row to the terminal
const TILE_PX: u32 = 256;

const FALLBACK_TERMINAL_WIDTH: u32 = 80;

/// Where display mode sends the assembled figure
pub trait Renderer {
    /// # Errors
    ///
    /// Fails when the figure cannot be drawn.
    fn render(&mut self, figure: Figure) -> Result<()>;
}

/// Draws figures inline with viuer (kitty, iTerm, sixel or half blocks)
#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    width: Option<u32>,
    height: Option<u32>,
}

impl TerminalRenderer {
    #[must_use]
    pub fn new(args: &Args) -> Self {
        Self { width: args.width, height: args.height }
    }

    fn figure_width(&self) -> u32 {
        self.width.unwrap_or_else(|| {
            terminal::size().map_or(FALLBACK_TERMINAL_WIDTH, |(cols, _)| u32::from(cols))
        })
    }

    fn draw(&self, figure: &Figure, focus: Option<usize>) -> Result<()> {
        let is_tty = io::stdout().is_terminal();
        let (grid_rows, grid_cols) = figure.shape();
        let grid_cols = u32::try_from(grid_cols.max(1)).context("Too many columns")?;
        let grid_rows = u32::try_from(grid_rows.max(1)).context("Too many rows")?;

        let width = self.figure_width().max(grid_cols);
        let cell_width = (width / grid_cols) as usize;

        let config = ViuerConfig {
            width: Some(width),
            height: self.height.map(|h| (h / grid_rows).max(1)),
            absolute_offset: false,
            use_kitty: is_tty,
            use_iterm: is_tty,
            use_sixel: is_tty,
            ..Default::default()
        };

        let mut stdout = io::stdout();
        for row in figure.render_rows(TILE_PX)? {
            writeln!(stdout, "{}", title_line(&row.titles, cell_width))?;
            stdout.flush().map_err(|e| anyhow!("Failed to flush stdout: {e}"))?;

            print(&DynamicImage::ImageRgb8(row.image), &config)
                .map_err(|e| anyhow!("Failed to display image: {e}"))?;
        }

        if let Some(panel) = focus.and_then(|i| figure.panels().get(i)) {
            writeln!(
                stdout,
                "Slice {}/{} of {}  (arrows/hjkl: slice, Home/End, Tab: next volume, q: quit)",
                panel.slice() + 1,
                panel.slice_count(),
                panel.name
            )?;
        }
        stdout.flush()?;

        Ok(())
    }

    fn interactive(&self, mut figure: Figure) -> Result<()> {
        let volumes = figure.volume_indices();
        let mut focus = 0;

        loop {
            execute!(io::stdout(), terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
            self.draw(&figure, volumes.get(focus).copied())?;

            let Some(action) = next_action()? else { continue };
            let Some(panel) = figure.panel_mut(volumes[focus]) else {
                return Ok(());
            };
            let moved = match action {
                Action::Quit => return Ok(()),
                Action::Step(delta) => panel.step(delta),
                Action::First => panel.set_slice(0),
                Action::Last => panel.set_slice(usize::MAX),
                Action::NextVolume => {
                    focus = (focus + 1) % volumes.len();
                    false
                }
            };
            if moved {
                log::debug!("{}: slice {}/{}", panel.name, panel.slice() + 1, panel.slice_count());
            }
        }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, figure: Figure) -> Result<()> {
        if figure.is_empty() {
            log::warn!("Nothing to display");
            return Ok(());
        }

        let attached = io::stdin().is_terminal() && io::stdout().is_terminal();

        if attached && !figure.volume_indices().is_empty() {
            self.interactive(figure)
        } else {
            self.draw(&figure, None)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Step(isize),
    First,
    Last,
    NextVolume,
    Quit,
}

fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Right | KeyCode::Up | KeyCode::Char('l' | 'k') => Some(Action::Step(1)),
        KeyCode::Left | KeyCode::Down | KeyCode::Char('h' | 'j') => Some(Action::Step(-1)),
        KeyCode::Home => Some(Action::First),
        KeyCode::End => Some(Action::Last),
        KeyCode::Tab => Some(Action::NextVolume),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Restores cooked mode even when reading the key fails
struct RawMode;

impl RawMode {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Block until a mapped key is pressed
fn next_action() -> Result<Option<Action>> {
    let _raw = RawMode::enable()?;
    loop {
        match event::read().context("Failed to read terminal event")? {
            Event::Key(key) => {
                if let Some(action) = action_for(key) {
                    return Ok(Some(action));
                }
            }
            Event::Resize(..) => return Ok(None),
            _ => {}
        }
    }
}
