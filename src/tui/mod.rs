//! Interactive terminal form.

mod form;
mod input;
mod screen;

use std::io;
use std::path::Path;

use copypasta::{ClipboardContext, ClipboardProvider};
use crossterm::event::{Event, KeyEventKind, read};
use crossterm::terminal;
use rand::rngs::OsRng;
use tracing::{info, warn};

use crate::config::Config;
use crate::settings::Settings;
use crate::settings::geometry::Geometry;
use crate::terminal::ScreenGuard;

use form::{Command, Form};
use screen::MIN_WIDTH;

/// Run the form until the user quits. Settings and panel geometry are
/// loaded on entry and saved on a normal quit.
pub fn run(dir: &Path, config: &Config) -> io::Result<()> {
    let mut settings = Settings::load_from_dir(dir, config.default_classes);
    let mut form = Form::new(&mut settings);

    let (mut cols, mut rows) = terminal::size().unwrap_or((80, 24));
    let mut geometry = Geometry::load(dir)
        .unwrap_or_else(|| screen::default_geometry(cols, rows))
        .fit(cols, rows, MIN_WIDTH);
    let mut clipboard: Option<ClipboardContext> = None;

    let guard = ScreenGuard::enter()?;
    info!("interactive session started");

    let save = loop {
        let lines = screen::render(&form, &settings, geometry.width, rows);
        geometry.height = lines.len().min(u16::MAX as usize) as u16;
        geometry = geometry.fit(cols, rows, MIN_WIDTH);
        screen::draw(&lines, geometry)?;

        let key = match read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            Event::Resize(c, r) => {
                (cols, rows) = (c, r);
                geometry = geometry.fit(cols, rows, MIN_WIDTH);
                continue;
            }
            _ => continue,
        };

        match form.handle_key(key, &mut settings, &mut OsRng) {
            Command::Redraw => {}
            Command::Copy => match clipboard_for(&mut clipboard) {
                Some(ctx) => form.copy(ctx),
                None => form.set_message("Clipboard unavailable"),
            },
            Command::Resize(delta) => {
                geometry.width = geometry.width.saturating_add_signed(delta);
                geometry = geometry.fit(cols, rows, MIN_WIDTH);
            }
            Command::Move(dx, dy) => {
                geometry.x = geometry.x.saturating_add_signed(dx);
                geometry.y = geometry.y.saturating_add_signed(dy);
                geometry = geometry.fit(cols, rows, MIN_WIDTH);
            }
            Command::Quit => break true,
            Command::Abort => break false,
        }
    };

    drop(guard);
    form.detach(&mut settings);

    if save {
        save_state(&settings, geometry, dir);
    }
    Ok(())
}

fn clipboard_for(slot: &mut Option<ClipboardContext>) -> Option<&mut ClipboardContext> {
    if slot.is_none() {
        match ClipboardContext::new() {
            Ok(ctx) => *slot = Some(ctx),
            Err(e) => {
                warn!("clipboard unavailable: {e}");
                return None;
            }
        }
    }
    slot.as_mut()
}

fn save_state(settings: &Settings, geometry: Geometry, dir: &Path) {
    if let Err(e) = settings.save_to_dir(dir) {
        warn!("failed to save settings: {e}");
    }
    if let Err(e) = geometry.save(dir) {
        warn!("failed to save panel geometry: {e}");
    }
}
