//! Application shell: owns the controller, the three screens and the event loop.
//!
//! Screens report what happened as [`ScreenAction`]s. Controller-bound
//! actions become [`ControllerEvent`]s; every applied screen change comes back
//! through a controller subscription and drives the screens' `on_exit` /
//! `on_enter` hooks.

use crate::components::{Footer, Header, HelpOverlay};
use crate::config::Config;
use crate::keymap::Action;
use crate::screens::{
    resolve_video, EditorScreen, ProcessingScreen, RenderContext, Screen, ScreenAction,
    ScreenContext, UploadScreen,
};
use crate::services::{SidecarTranscriber, Transcriber};
use crate::state::{ControllerEvent, ScreenController, ScreenId, Transition};
use crate::styles::{init_theme, theme, ThemeType};
use crate::tui::Tui;
use crate::utils::{create_standard_layout, format_path_for_display};
use crate::widgets::{Toast, ToastManager, ToastVariant};
use anyhow::{Context, Result};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::widgets::Block;
use ratatui::Frame;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, error, info};

const HEADER_HEIGHT: u16 = 5;
const FOOTER_HEIGHT: u16 = 2;
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One instance of every screen, addressed by [`ScreenId`].
struct Screens {
    upload: UploadScreen,
    processing: ProcessingScreen,
    editor: EditorScreen,
}

impl Screens {
    fn get_mut(&mut self, id: ScreenId) -> &mut dyn Screen {
        match id {
            ScreenId::Upload => &mut self.upload,
            ScreenId::Processing => &mut self.processing,
            ScreenId::Editor => &mut self.editor,
        }
    }

    fn get(&self, id: ScreenId) -> &dyn Screen {
        match id {
            ScreenId::Upload => &self.upload,
            ScreenId::Processing => &self.processing,
            ScreenId::Editor => &self.editor,
        }
    }
}

/// Main application state
pub struct App {
    config: Config,
    config_path: PathBuf,
    working_dir: PathBuf,
    controller: ScreenController,
    /// Screen changes reported by the controller subscription, not yet
    /// forwarded to the screens.
    pending_moves: Rc<RefCell<Vec<Transition>>>,
    screens: Screens,
    toasts: ToastManager,
    show_help: bool,
    should_quit: bool,
    /// Worker pool for processing jobs; screens only hold its handle
    #[allow(dead_code)]
    runtime: Runtime,
}

impl App {
    /// Load the configuration and build the app with the sidecar transcriber.
    pub fn new(no_colors: bool) -> Result<Self> {
        let config_path = crate::utils::get_config_path();
        let config = Config::load_or_create(&config_path)?;

        let theme_type = if no_colors || std::env::var_os("NO_COLOR").is_some() {
            ThemeType::NoColor
        } else {
            config.theme.parse().unwrap_or_default()
        };
        init_theme(theme_type);

        let working_dir = std::env::current_dir().context("Failed to read current directory")?;
        let transcriber = Arc::new(SidecarTranscriber::new(Duration::from_millis(
            config.processing_step_delay_ms,
        )));
        Self::with_config(config, config_path, working_dir, transcriber)
    }

    /// Build the app from explicit parts. No terminal is touched.
    pub fn with_config(
        config: Config,
        config_path: PathBuf,
        working_dir: PathBuf,
        transcriber: Arc<dyn Transcriber>,
    ) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;

        let mut controller = ScreenController::new();
        let pending_moves = Rc::new(RefCell::new(Vec::new()));
        let queue = Rc::clone(&pending_moves);
        controller.subscribe(move |_, transition| {
            if matches!(transition, Transition::Moved { .. }) {
                queue.borrow_mut().push(transition);
            }
        });
        controller.subscribe(|controller, transition| {
            debug!(
                screen = ?controller.screen(),
                session = controller.session(),
                ?transition,
                "Controller changed"
            );
        });

        let screens = Screens {
            upload: UploadScreen::new(),
            processing: ProcessingScreen::new(runtime.handle().clone(), transcriber),
            editor: EditorScreen::new(),
        };

        let mut app = Self {
            config,
            config_path,
            working_dir,
            controller,
            pending_moves,
            screens,
            toasts: ToastManager::new(),
            show_help: false,
            should_quit: false,
            runtime,
        };
        app.enter_screen(ScreenId::Upload);
        Ok(app)
    }

    pub fn controller(&self) -> &ScreenController {
        &self.controller
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_help_visible(&self) -> bool {
        self.show_help
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toasts.current()
    }

    pub fn upload_screen(&self) -> &UploadScreen {
        &self.screens.upload
    }

    pub fn editor_screen(&self) -> &EditorScreen {
        &self.screens.editor
    }

    /// Upload a video as if it had been typed into the upload screen.
    pub fn upload_path(&mut self, path: &Path) {
        match resolve_video(&path.to_string_lossy(), &self.config, &self.working_dir) {
            Ok(video) => self.apply(ScreenAction::VideoUploaded(video)),
            Err(e) => {
                error!("Initial upload rejected: {:#}", e);
                self.toasts.error(format!("{:#}", e));
            }
        }
    }

    /// Run the event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        info!("podclip started");

        let result = self.event_loop(&mut tui);

        tui.exit()?;
        info!("podclip stopped");
        result
    }

    fn event_loop(&mut self, tui: &mut Tui) -> Result<()> {
        loop {
            tui.terminal_mut().draw(|frame| {
                if let Err(e) = self.render(frame) {
                    error!("Render failed: {:#}", e);
                }
            })?;

            if self.should_quit {
                return Ok(());
            }

            if let Some(event) = tui.poll_event(POLL_INTERVAL)? {
                self.handle_event(event);
            }
            self.tick();
        }
    }

    /// Draw the header, the active screen, the footer and any overlays.
    pub fn render(&mut self, frame: &mut Frame) -> Result<()> {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme().background_style()), area);

        let (header_area, content_area, footer_area) =
            create_standard_layout(area, HEADER_HEIGHT, FOOTER_HEIGHT);

        let screen_id = self.controller.screen();
        let reset_key = self
            .controller
            .shows_reset_control()
            .then(|| self.config.keymap.key_for(Action::NewUpload));
        Header::render(
            frame,
            header_area,
            screen_id.title(),
            screen_id.description(),
            reset_key.as_deref(),
        )?;

        let ctx = RenderContext::new(&self.config, &self.controller);
        let screen = self.screens.get_mut(screen_id);
        screen.render(frame, content_area, &ctx)?;
        Footer::render(frame, footer_area, &screen.footer_text(&ctx))?;

        if self.show_help {
            HelpOverlay::render(
                frame,
                area,
                &self.config.keymap,
                &format_path_for_display(&self.config_path),
            )?;
        }
        self.toasts.render(frame, area);

        Ok(())
    }

    /// Route one terminal event.
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = &event {
            if key.kind != KeyEventKind::Press {
                return;
            }
            if self.show_help {
                self.show_help = false;
                return;
            }
            if self.handle_global_key(key.code, key.modifiers) {
                return;
            }
        }

        let screen_id = self.controller.screen();
        let ctx = ScreenContext::new(&self.config, &self.controller, &self.working_dir);
        let result = self.screens.get_mut(screen_id).handle_event(event, &ctx);
        match result {
            Ok(action) => self.apply(action),
            Err(e) => {
                error!("Error handling event on {:?}: {:#}", screen_id, e);
                self.toasts.error(format!("{:#}", e));
            }
        }
    }

    /// Quit, help and "New Upload" work on every screen. While a text input
    /// has focus, plain characters belong to the input.
    fn handle_global_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let Some(action) = self.config.keymap.get_action(code, modifiers) else {
            return false;
        };

        if self.screens.get(self.controller.screen()).is_input_focused() {
            let plain_char = matches!(code, KeyCode::Char(_))
                && !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
            if plain_char || !action.works_while_typing() {
                return false;
            }
        }

        match action {
            Action::Quit => {
                info!("Quit requested");
                self.should_quit = true;
                true
            }
            Action::Help => {
                self.show_help = true;
                true
            }
            Action::NewUpload if self.controller.shows_reset_control() => {
                self.apply(ScreenAction::NewUpload);
                true
            }
            _ => false,
        }
    }

    /// Advance timers and collect background results for the active screen.
    pub fn tick(&mut self) {
        self.toasts.tick();

        let screen_id = self.controller.screen();
        let ctx = ScreenContext::new(&self.config, &self.controller, &self.working_dir);
        match self.screens.get_mut(screen_id).tick(&ctx) {
            Ok(actions) => {
                for action in actions {
                    self.apply(action);
                }
            }
            Err(e) => {
                error!("Tick failed on {:?}: {:#}", screen_id, e);
                self.toasts.error(format!("{:#}", e));
            }
        }
    }

    /// Carry out a screen action.
    pub fn apply(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::None => {}
            ScreenAction::VideoUploaded(video) => {
                self.dispatch(ControllerEvent::VideoUploaded(video));
            }
            ScreenAction::StatusUpdate(text) => {
                self.dispatch(ControllerEvent::StatusUpdated(text));
            }
            ScreenAction::TranscriptionComplete(data) => {
                self.dispatch(ControllerEvent::TranscriptionComplete(data));
            }
            ScreenAction::NewUpload => self.dispatch(ControllerEvent::BackToUpload),
            ScreenAction::ShowToast { message, variant } => match variant {
                ToastVariant::Error => self.toasts.error(message),
                _ => self.toasts.push(Toast::new(message, variant)),
            },
        }
    }

    fn dispatch(&mut self, event: ControllerEvent) {
        self.controller.dispatch(event);

        let moves = std::mem::take(&mut *self.pending_moves.borrow_mut());
        for transition in moves {
            if let Transition::Moved { from, to } = transition {
                self.exit_screen(from);
                self.enter_screen(to);
            }
        }
    }

    fn enter_screen(&mut self, id: ScreenId) {
        let ctx = ScreenContext::new(&self.config, &self.controller, &self.working_dir);
        if let Err(e) = self.screens.get_mut(id).on_enter(&ctx) {
            error!("Failed to enter {:?}: {:#}", id, e);
            self.toasts.error(format!("{:#}", e));
        }
    }

    fn exit_screen(&mut self, id: ScreenId) {
        let ctx = ScreenContext::new(&self.config, &self.controller, &self.working_dir);
        if let Err(e) = self.screens.get_mut(id).on_exit(&ctx) {
            error!("Failed to leave {:?}: {:#}", id, e);
        }
    }
}
