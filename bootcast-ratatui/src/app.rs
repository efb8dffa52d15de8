// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The main application logic.
//!
//! This is where the menu loop runs, where the countdown and the keyboard are waited on, and where the chosen entry
//! is read behind a boot screen and loaded.

use alloc::{format, vec::Vec};

use bootcast_core::{
    config::Config,
    error::BootcastError,
    menu::{Menu, Step},
    screen::{
        BootScreen, GfxBootScreen, ProgressUpdate, TextBootScreen, configure_from_env,
    },
    system::{
        fs::UefiFileSystem,
        gop::GopSurface,
        helper::{create_timer, locate_protocol},
        time::stall,
    },
    term::TextTerminal,
    viewer::{MenuViewer, TextMenuViewer},
};
use log::{error, warn};
use thiserror::Error;
use uefi::{
    CStr16, Event, Handle,
    boot::{self, LoadImageSource, ScopedProtocol, TimerTrigger},
    proto::console::text::{Input, Key, ScanCode},
};

use crate::{MainError, ui::buffer_terminal::BufferTerminal};

/// The error delay in microseconds.
const ERROR_DELAY: usize = 5_000_000; // 5 seconds

/// The timeout timer interval in 100 nanosecond units.
const TIMER_INTERVAL: u64 = 10_000_000; // 1 second

/// The largest image that is read into memory.
const MAX_IMAGE_SIZE: usize = 512 * 1024 * 1024;

/// An `Error` that may result from running or initializing the [`App`].
#[derive(Error, Debug)]
pub enum AppError {
    /// The [`Input`] protocol was closed for any reason.
    #[error("Keyboard Input protocol was closed")]
    InputClosed,

    /// There are no entries in the menu.
    #[error("No menu entries found")]
    NoEntries,
}

/// The current status of the [`App`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// The app is currently booting an image.
    Booting,

    /// The app is currently running in its main loop.
    Running,

    /// The app is currently exiting.
    Exiting,
}

/// What ended a wait.
enum Wake {
    /// A key was pressed.
    Key(Key),

    /// The countdown timer fired.
    Tick,

    /// Nothing that needs handling.
    Spurious,
}

/// The keyboard and the countdown timer.
struct Keyboard {
    /// The storage for the `wait_for_key` event and the timer event.
    events: Option<[Event; 2]>,

    /// The [`Input`] of the terminal.
    input: ScopedProtocol<Input>,
}

impl Keyboard {
    /// Opens the [`Input`] and creates the events.
    ///
    /// # Errors
    ///
    /// May return an `Error` if there is no [`Input`], or the events could not be created.
    fn new() -> Result<Self, MainError> {
        let mut keyboard = Self {
            events: None,
            input: locate_protocol::<Input>()?,
        };
        keyboard.create_events()?;
        Ok(keyboard)
    }

    /// Create the key and timer events.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the input is closed, or the timer event could not be opened.
    fn create_events(&mut self) -> Result<(), MainError> {
        self.events = Some([
            self.input
                .wait_for_key_event()
                .ok_or(AppError::InputClosed)?,
            create_timer(TimerTrigger::Periodic(TIMER_INTERVAL))?,
        ]);
        Ok(())
    }

    /// Waits for a key press or the timer.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the events could not be created again after a failed wait, or the [`Input`]
    /// reports a device error.
    fn wait(&mut self) -> Result<Wake, MainError> {
        let Some(events) = &mut self.events else {
            self.create_events()?;
            return Ok(Wake::Spurious);
        };

        match boot::wait_for_event(events) {
            Ok(0) => match self.input.read_key().map_err(BootcastError::Uefi)? {
                Some(key) => Ok(Wake::Key(key)),
                None => Ok(Wake::Spurious),
            },
            Ok(_) => Ok(Wake::Tick),
            Err(e) => {
                error!("{e}");
                self.events.take();
                self.create_events()?;
                Ok(Wake::Spurious)
            }
        }
    }
}

/// One showing of the menu, from the first paint until an entry is picked or the user leaves.
struct MenuSession<'a> {
    /// The menu being shown.
    menu: &'a Menu,

    /// The viewer drawing it.
    viewer: TextMenuViewer<'a>,

    /// The highlighted entry.
    selected: usize,

    /// Seconds left before the highlighted entry is booted.
    timeout: Option<u32>,
}

impl<'a> MenuSession<'a> {
    /// Draws the menu and the countdown.
    fn new(
        term: &mut BufferTerminal,
        config: &'a Config,
        selected: usize,
        timeout: Option<u32>,
    ) -> Self {
        let mut viewer = TextMenuViewer::new(term, &config.menu, &config.env, selected, false);
        if let Some(seconds) = timeout {
            viewer.print_timeout(term, seconds);
        }
        Self {
            menu: &config.menu,
            viewer,
            selected,
            timeout,
        }
    }

    /// Counts the countdown down by a second.
    fn tick(&mut self, term: &mut BufferTerminal) {
        if let Some(seconds) = &mut self.timeout {
            *seconds = seconds.saturating_sub(1);
            self.viewer.print_timeout(term, *seconds);
        }
    }

    /// Handles a key press. Any key stops the countdown.
    ///
    /// The arrow keys, home, end and the page keys move the highlight, return boots the highlighted entry, a
    /// hotkey boots its entry, and escape leaves the menu.
    fn handle_key(&mut self, term: &mut BufferTerminal, key: Key) -> AppState {
        if self.timeout.take().is_some() {
            self.viewer.clear_timeout(term);
        }

        let page = usize::from(self.viewer.layout().geometry.num_entries);
        let step = match key {
            Key::Special(ScanCode::UP) => Step::Previous,
            Key::Special(ScanCode::DOWN) => Step::Next,
            Key::Special(ScanCode::HOME) => Step::First,
            Key::Special(ScanCode::END) => Step::Last,
            Key::Special(ScanCode::PAGE_UP) => Step::PageUp(page),
            Key::Special(ScanCode::PAGE_DOWN) => Step::PageDown(page),
            Key::Special(ScanCode::ESCAPE) => return AppState::Exiting,
            Key::Printable(key) => {
                let key = char::from(key);
                if key == '\r' {
                    return AppState::Booting; // return key
                }
                return match self.menu.find_hotkey(key) {
                    Some(entry) => {
                        self.select(term, entry);
                        AppState::Booting
                    }
                    None => AppState::Running,
                };
            }
            Key::Special(_) => return AppState::Running,
        };

        let entry = self.menu.step(self.selected, step);
        self.select(term, entry);
        AppState::Running
    }

    /// Moves the highlight.
    fn select(&mut self, term: &mut BufferTerminal, entry: usize) {
        if entry != self.selected {
            self.selected = entry;
            self.viewer.set_chosen_entry(term, entry);
        }
    }
}

/// The main application logic of the boot stage.
pub struct App {
    /// The configuration and the menu.
    config: Config,

    /// The keyboard and the countdown timer.
    keyboard: Keyboard,

    /// The highlighted entry, kept across menu sessions.
    selected: usize,

    /// The countdown. Gone for good once the user touched a key or a boot failed.
    timeout: Option<u32>,
}

impl App {
    /// Initializes the state of the [`App`].
    ///
    /// This parses configuration, and finds a [`Handle`] for [`Input`].
    ///
    /// # Errors
    ///
    /// May return an `Error` if the configuration filesystem could not be opened, the menu has no entries, or
    /// there is no [`Handle`] supporting [`Input`].
    pub fn new() -> Result<Self, MainError> {
        let config = Config::new()?;

        if config.menu.is_empty() {
            return Err(AppError::NoEntries.into());
        }

        let selected = config.menu.default_entry();
        let timeout = config.menu.timeout;
        let keyboard = Keyboard::new()?;

        Ok(Self {
            config,
            keyboard,
            selected,
            timeout,
        })
    }

    /// Provides the main loop for the [`App`].
    ///
    /// The menu is shown until an entry is picked, then the entry is loaded. When loading fails the error is shown
    /// and the menu comes back without a countdown. Returns a [`Handle`] to the loaded image, or [`None`] if the
    /// user left the menu.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the input was closed or failed.
    pub fn run(&mut self, terminal: &mut BufferTerminal) -> Result<Option<Handle>, MainError> {
        loop {
            match self.choose(terminal)? {
                AppState::Exiting => return Ok(None),
                AppState::Booting => {
                    if let Some(handle) = self.maybe_boot(terminal) {
                        return Ok(Some(handle));
                    }
                }
                AppState::Running => (),
            }
        }
    }

    /// Shows the menu until the user picks an entry, leaves, or the countdown runs out.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the input was closed or failed.
    fn choose(&mut self, terminal: &mut BufferTerminal) -> Result<AppState, MainError> {
        let mut session = MenuSession::new(terminal, &self.config, self.selected, self.timeout);

        let state = loop {
            if session.timeout == Some(0) {
                break AppState::Booting; // if timeout is 0, dont wait and boot immediately
            }

            let state = match self.keyboard.wait()? {
                Wake::Key(key) => session.handle_key(terminal, key),
                Wake::Tick => {
                    session.tick(terminal);
                    AppState::Running
                }
                Wake::Spurious => AppState::Running,
            };
            if state != AppState::Running {
                break state;
            }
        };

        session.viewer.finalize(terminal);
        self.selected = session.selected;
        self.timeout = session.timeout;
        Ok(state)
    }

    /// Tries to load the highlighted entry, showing the error if that fails.
    fn maybe_boot(&mut self, terminal: &mut BufferTerminal) -> Option<Handle> {
        match self.load(terminal) {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!("Failed to load image: {e}");
                let title = self
                    .config
                    .menu
                    .entries
                    .get(self.selected)
                    .map_or("", |entry| entry.title.as_str());
                TextBootScreen::new(&mut *terminal)
                    .message_box(&["Failed to load image", title], None);
                boot::stall(ERROR_DELAY); // wait for 5 seconds so the error is visible
                self.timeout = None;
                terminal.clear(); // clear screen so the menu starts on a clean console
                None
            }
        }
    }

    /// Reads the highlighted entry behind the configured boot screen, then loads it.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the entry has no valid path, the image could not be read, or the firmware refused
    /// to load it.
    fn load(&self, terminal: &mut BufferTerminal) -> Result<Handle, MainError> {
        let entry = self
            .config
            .menu
            .entries
            .get(self.selected)
            .ok_or(AppError::NoEntries)?;
        let path = entry.image_path()?;
        let mut fs = UefiFileSystem::from_image_fs()?;
        let descr = format!("Loading {}...", entry.title);

        let gfx = if self.config.env.get("screen") == Some("gfx") {
            GopSurface::new()
                .inspect_err(|e| warn!("Using the text screen, no graphics output: {e}"))
                .ok()
        } else {
            None
        };

        let image = match gfx {
            Some(surface) => {
                self.read_image(&mut GfxBootScreen::new(surface), &mut fs, &path, &descr)?
            }
            None => self.read_image(
                &mut TextBootScreen::new(&mut *terminal),
                &mut fs,
                &path,
                &descr,
            )?,
        };

        let handle = boot::load_image(
            boot::image_handle(),
            LoadImageSource::FromBuffer {
                buffer: &image,
                file_path: None,
            },
        )
        .map_err(BootcastError::Uefi)?;
        Ok(handle)
    }

    /// Reads an image while a boot screen shows the progress, then plays the finish animation.
    ///
    /// # Errors
    ///
    /// May return an `Error` if the image could not be read.
    fn read_image(
        &self,
        screen: &mut dyn BootScreen,
        fs: &mut UefiFileSystem,
        path: &CStr16,
        descr: &str,
    ) -> Result<Vec<u8>, MainError> {
        screen.reset();
        screen.set_property("activity_descr", Some(descr));
        configure_from_env(screen, &self.config.env);
        screen.set_property("activity", Some(""));
        screen.redraw();

        let image = fs.read_with_progress(path, MAX_IMAGE_SIZE, &mut |current, max| {
            screen.set_progress(ProgressUpdate::Value { current, max });
            screen.set_progress(ProgressUpdate::Advance);
        });

        match image {
            Ok(image) => {
                screen.finish(&mut stall);
                Ok(image)
            }
            Err(e) => {
                screen.reset();
                Err(BootcastError::from(e).into())
            }
        }
    }
}
