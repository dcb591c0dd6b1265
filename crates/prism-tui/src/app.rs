// ABOUTME: Central application state and event loop.
// ABOUTME: Holds all UI state and coordinates between components.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use image::RgbaImage;
use prism_core::circles::{self, DecorativeCircle};
use prism_core::{
    Clipboard, ClipboardError, Completion, ExtractionError, ExtractionJob, ImagePreview,
    PaletteExtractor, PaletteState, Session, UploadRequest,
};
use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_stream::StreamExt;
use tui_textarea::TextArea;

use crate::app_event::{AppEvent, LoadedImage};
use crate::error::Result;
use crate::state::config::Config;
use crate::theme::{get_theme, Theme};
use crate::tui::event::TuiEvent;
use crate::tui::Tui;
use crate::widgets::backdrop::Backdrop;
use crate::widgets::image_view::{self, ImageView};
use crate::widgets::notice::Notice;
use crate::widgets::palette_grid::{self, PaletteGrid, SWATCH_HEIGHT};
use crate::widgets::status_bar::{Level, StatusBar, StatusInfo};
use crate::widgets::welcome::{self, Welcome};
use crate::widgets::{centered_fixed, upload};

const CARD_WIDTH: u16 = 76;
const DOUBLE_TAP: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Uploader,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Upload,
    Palette,
}

/// Actions that need async handling (returned from handle_key)
#[derive(Debug)]
pub enum Action {
    Quit,
    Upload(UploadRequest),
    Extract(ExtractionJob),
}

/// Clickable regions from the last frame.
#[derive(Debug, Default)]
struct HitAreas {
    start_button: Option<Rect>,
    input: Option<Rect>,
    extract_button: Option<Rect>,
    swatches: Vec<Rect>,
}

pub struct App {
    session: Session,
    extractor: PaletteExtractor,
    thumbnail: Option<RgbaImage>,
    circles: Vec<DecorativeCircle>,
    animate: bool,
    started: Instant,
    screen: Screen,
    focus: Focus,
    input: TextArea<'static>,
    /// Highlighted swatch in the palette grid
    selected: usize,
    grid_columns: usize,
    /// Copy acknowledgment; blocks input until dismissed
    notice: Option<String>,
    status: Option<(String, Level)>,
    clipboard: Box<dyn Clipboard>,
    theme: &'static Theme,
    hits: HitAreas,
    event_tx: UnboundedSender<AppEvent>,
    event_rx: UnboundedReceiver<AppEvent>,
    should_quit: bool,
    /// Timestamp of last Ctrl+C press for double-tap quit
    last_ctrl_c: Option<Instant>,
}

/// Decode a preview into the thumbnail the preview pane draws.
fn make_thumbnail(preview: &ImagePreview) -> Option<RgbaImage> {
    match preview.render() {
        Ok(surface) => Some(image_view::thumbnail(&surface)),
        Err(e) => {
            tracing::warn!("Preview decode failed: {}", e);
            None
        }
    }
}

impl App {
    pub fn new(config: &Config, clipboard: Box<dyn Clipboard>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        Self {
            session: Session::new(),
            extractor: PaletteExtractor::from_config(&config.palette),
            thumbnail: None,
            circles: circles::generate_session(config.appearance.circles),
            animate: config.appearance.animate,
            started: Instant::now(),
            screen: Screen::Welcome,
            focus: Focus::Upload,
            input: upload::new_input(),
            selected: 0,
            grid_columns: 3,
            notice: None,
            status: None,
            clipboard,
            theme: get_theme(&config.appearance.theme),
            hits: HitAreas::default(),
            event_tx,
            event_rx,
            should_quit: false,
            last_ctrl_c: None,
        }
    }

    /// Skip the welcome screen and start loading `path`.
    pub fn open(&mut self, path: PathBuf) -> Option<Action> {
        self.start();
        upload::set_text(&mut self.input, &path.display().to_string());
        self.submit_path()
    }

    pub async fn run(&mut self, tui: &mut Tui, initial: Option<Action>) -> Result<()> {
        if let Some(action) = initial {
            self.dispatch(action);
        }

        let mut tui_events = tui.event_stream();

        loop {
            tui.terminal_mut().draw(|frame| self.render(frame))?;

            tokio::select! {
                Some(event) = self.event_rx.recv() => {
                    self.handle_app_event(event);
                }
                Some(event) = tui_events.next() => {
                    if let Some(action) = self.handle_tui_event(event) {
                        self.dispatch(action);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Run an action's side effects. Reads and extractions report back as
    /// [`AppEvent`]s.
    fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Upload(request) => {
                let tx = self.event_tx.clone();
                tokio::spawn(async move {
                    let result = match ImagePreview::read(&request.path).await {
                        Ok(preview) => {
                            let for_thumbnail = preview.clone();
                            let thumbnail = tokio::task::spawn_blocking(move || {
                                make_thumbnail(&for_thumbnail)
                            })
                            .await
                            .ok()
                            .flatten();
                            Ok(LoadedImage { preview, thumbnail })
                        }
                        Err(e) => Err(e),
                    };
                    let _ = tx.send(AppEvent::UploadFinished {
                        ticket: request.ticket,
                        result,
                    });
                });
            }
            Action::Extract(job) => {
                let tx = self.event_tx.clone();
                let extractor = self.extractor.clone();
                let ticket = job.ticket;
                tokio::spawn(async move {
                    let result =
                        tokio::task::spawn_blocking(move || extractor.extract(&job.preview))
                            .await
                            .unwrap_or_else(|e| {
                                Err(ExtractionError::Quantizer(format!(
                                    "extraction task failed: {}",
                                    e
                                )))
                            });
                    let _ = tx.send(AppEvent::ExtractionFinished { ticket, result });
                });
            }
        }
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::UploadFinished { ticket, result } => match result {
                Ok(loaded) => {
                    if self.session.complete_upload(ticket, Ok(loaded.preview))
                        == Completion::Applied
                    {
                        self.thumbnail = loaded.thumbnail;
                        self.selected = 0;
                        self.focus = Focus::Upload;
                        self.set_status("Image loaded. Press Ctrl+E to extract colors", Level::Info);
                    }
                }
                Err(e) => {
                    if self.session.complete_upload(ticket, Err(e)) == Completion::Applied {
                        self.status = None;
                    }
                }
            },
            AppEvent::ExtractionFinished { ticket, result } => {
                let applied = self.session.complete_extraction(ticket, result);
                if applied == Completion::Applied {
                    if let Some(palette) = self.session.palette() {
                        let hint = format!(
                            "Click a swatch or press 1-{} to copy its code",
                            palette.len().min(9)
                        );
                        self.focus = Focus::Palette;
                        self.selected = 0;
                        self.set_status(&hint, Level::Info);
                    }
                }
            }
        }
    }

    fn handle_tui_event(&mut self, event: TuiEvent) -> Option<Action> {
        match event {
            TuiEvent::Key(key) => self.handle_key(key),
            TuiEvent::Mouse(mouse) => self.handle_mouse(mouse),
            TuiEvent::Paste(text) => {
                self.handle_paste(&text);
                None
            }
            TuiEvent::Resize | TuiEvent::Tick => None,
        }
    }

    /// Handle a key event, returning an action if needed
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') if ctrl => return Some(Action::Quit),
            KeyCode::Char('c') if ctrl => return self.handle_ctrl_c(),
            _ => {}
        }

        // Any key dismisses the copy acknowledgment
        if self.notice.take().is_some() {
            return None;
        }

        match self.screen {
            Screen::Welcome => self.handle_welcome_key(key),
            Screen::Uploader => self.handle_uploader_key(key),
        }
    }

    fn handle_ctrl_c(&mut self) -> Option<Action> {
        if let Some(last) = self.last_ctrl_c {
            if last.elapsed() < DOUBLE_TAP {
                return Some(Action::Quit);
            }
        }
        self.last_ctrl_c = Some(Instant::now());
        self.notice = None;
        if self.screen == Screen::Uploader && self.focus == Focus::Upload {
            upload::set_text(&mut self.input, "");
        }
        self.set_status("Press Ctrl+C again to quit", Level::Info);
        None
    }

    fn handle_welcome_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('g') => {
                self.start();
                None
            }
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }

    fn handle_uploader_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return self.request_extraction();
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_focus();
                return None;
            }
            KeyCode::Esc => {
                if self.status.is_some() || self.session.read_error().is_some() {
                    self.status = None;
                    self.session.clear_read_error();
                } else {
                    self.focus = Focus::Upload;
                }
                return None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Upload => self.handle_upload_key(key),
            Focus::Palette => self.handle_palette_key(key),
        }
    }

    fn handle_upload_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.code == KeyCode::Enter {
            return self.submit_path();
        }
        self.input.input(key);
        None
    }

    fn handle_palette_key(&mut self, key: KeyEvent) -> Option<Action> {
        let len = self.session.palette().map_or(0, |p| p.len());
        let cols = self.grid_columns.max(1);
        match key.code {
            KeyCode::Left => self.selected = self.selected.saturating_sub(1),
            KeyCode::Right if self.selected + 1 < len => self.selected += 1,
            KeyCode::Up if self.selected >= cols => self.selected -= cols,
            KeyCode::Down if self.selected + cols < len => self.selected += cols,
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('c') => self.copy(self.selected),
            KeyCode::Char(c @ '1'..='9') => self.copy(c as usize - '1' as usize),
            KeyCode::Char('e') => return self.request_extraction(),
            _ => {}
        }
        None
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Action> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        if self.notice.take().is_some() {
            return None;
        }

        let pos = Position::new(mouse.column, mouse.row);
        let hit = |area: Option<Rect>| area.is_some_and(|r| r.contains(pos));
        match self.screen {
            Screen::Welcome => {
                if hit(self.hits.start_button) {
                    self.start();
                }
                None
            }
            Screen::Uploader => {
                if hit(self.hits.extract_button) {
                    return self.request_extraction();
                }
                if hit(self.hits.input) {
                    self.focus = Focus::Upload;
                    return None;
                }
                if let Some(index) = self.hits.swatches.iter().position(|r| r.contains(pos)) {
                    self.focus = Focus::Palette;
                    self.copy(index);
                }
                None
            }
        }
    }

    /// Pasted text (including paths of files dropped on the terminal) goes
    /// into the upload field.
    fn handle_paste(&mut self, text: &str) {
        if self.notice.is_some() {
            return;
        }
        self.start();
        let line: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        self.input.insert_str(line);
    }

    fn start(&mut self) {
        self.screen = Screen::Uploader;
        self.focus = Focus::Upload;
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Upload if self.session.palette().is_some() => Focus::Palette,
            _ => Focus::Upload,
        };
    }

    /// Start loading whatever path is in the upload field.
    fn submit_path(&mut self) -> Option<Action> {
        let text = self.input.lines().join("");
        let files: Vec<PathBuf> = upload::parse_path(&text).into_iter().collect();
        let request = self.session.select_files(&files)?;
        self.status = None;
        Some(Action::Upload(request))
    }

    fn request_extraction(&mut self) -> Option<Action> {
        match self.session.begin_extraction() {
            Ok(job) => Some(Action::Extract(job)),
            Err(e) => {
                self.set_status(&e.to_string(), Level::Error);
                None
            }
        }
    }

    fn copy(&mut self, index: usize) {
        match self.session.copy_swatch(index, self.clipboard.as_mut()) {
            Ok(code) => {
                tracing::debug!(index, code = %code, "Copied swatch");
                self.selected = index;
                self.notice = Some(format!("Copied {}", code));
            }
            Err(ClipboardError::NoSwatch(_)) => {}
            Err(e) => {
                tracing::warn!("Copy failed: {}", e);
                self.set_status(&format!("Copy failed: {}", e), Level::Error);
            }
        }
    }

    fn set_status(&mut self, text: &str, level: Level) {
        self.session.clear_read_error();
        self.status = Some((text.to_string(), level));
    }

    fn status_message(&self) -> Option<(String, Level)> {
        if let Some(e) = self.session.read_error() {
            return Some((format!("Could not read image: {}", e), Level::Error));
        }
        self.status.clone()
    }

    pub(crate) fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let theme = self.theme;
        self.hits = HitAreas::default();

        if self.circles.is_empty() {
            frame.render_widget(Block::default().style(Style::default().bg(theme.background)), area);
        } else {
            let elapsed = self.animate.then(|| self.started.elapsed().as_secs_f32());
            frame.render_widget(
                Backdrop {
                    circles: &self.circles,
                    elapsed,
                    theme,
                },
                area,
            );
        }

        let [body, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        match self.screen {
            Screen::Welcome => {
                frame.render_widget(Welcome { theme }, body);
                self.hits.start_button = Some(welcome::button_area(body));
            }
            Screen::Uploader => self.render_uploader(frame, body),
        }

        let message = self.status_message();
        let info = StatusInfo {
            screen: self.screen,
            focus: self.focus,
            phase: self.session.phase(),
            busy: self.session.is_uploading() || self.session.is_extracting(),
            message: message.as_ref().map(|(text, level)| (text.as_str(), *level)),
        };
        StatusBar::render(status_area, frame.buffer_mut(), theme, &info);

        if let Some(message) = &self.notice {
            frame.render_widget(Notice { message, theme }, area);
        }
    }

    fn render_uploader(&mut self, frame: &mut Frame, body: Rect) {
        let theme = self.theme;
        let card = centered_fixed(CARD_WIDTH, body.height.saturating_sub(2), body);
        frame.render_widget(Clear, card);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.surface))
            .title(Line::from(" Upload an Image ").bold().centered());
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let extracting = self.session.is_extracting();
        let show_palette =
            extracting || !matches!(self.session.palette_state(), PaletteState::Empty);
        let palette_height = if show_palette {
            let rows = palette_grid::rows_for(self.extractor.count(), inner.width) as u16;
            1 + rows * SWATCH_HEIGHT
        } else {
            0
        };

        let [input_area, preview_area, button_row, palette_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(palette_height),
        ])
        .areas(inner);

        upload::style_input(&mut self.input, self.focus == Focus::Upload, theme);
        frame.render_widget(&self.input, input_area);
        self.hits.input = Some(input_area);

        frame.render_widget(
            ImageView {
                image: self.thumbnail.as_ref(),
                loading: self.session.is_uploading(),
                has_preview: self.session.preview().is_some(),
                theme,
            },
            preview_area,
        );

        if self.session.preview().is_some() {
            let label = if extracting {
                "  Extracting…  "
            } else {
                "  Extract Colors  "
            };
            let width = (label.chars().count() as u16).min(button_row.width);
            let button = Rect {
                x: button_row.x + (button_row.width - width) / 2,
                width,
                ..button_row
            };
            frame.buffer_mut().set_string(
                button.x,
                button.y,
                label,
                Style::default()
                    .fg(theme.text_inverse)
                    .bg(theme.button)
                    .bold(),
            );
            self.hits.extract_button = Some(button);
        }

        if show_palette {
            let grid_inner = PaletteGrid::inner(palette_area);
            self.grid_columns = palette_grid::columns_for(grid_inner.width);
            if !extracting {
                if let Some(palette) = self.session.palette() {
                    self.hits.swatches = palette_grid::swatch_areas(grid_inner, palette.len());
                }
            }
            frame.render_widget(
                PaletteGrid {
                    state: self.session.palette_state(),
                    extracting,
                    selected: (self.focus == Focus::Palette).then_some(self.selected),
                    theme,
                },
                palette_area,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use prism_core::{Phase, ReadError};
    use ratatui::backend::TestBackend;
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::path::Path;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedClipboard(Rc<RefCell<Option<String>>>);

    impl Clipboard for SharedClipboard {
        fn set_text(&mut self, text: &str) -> std::result::Result<(), ClipboardError> {
            *self.0.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    impl SharedClipboard {
        fn contents(&self) -> Option<String> {
            self.0.borrow().clone()
        }
    }

    fn test_config() -> Config {
        let mut config = Config::default();
        config.appearance.circles = 0;
        config
    }

    fn test_app() -> (App, SharedClipboard) {
        let clipboard = SharedClipboard::default();
        let app = App::new(&test_config(), Box::new(clipboard.clone()));
        (app, clipboard)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn write_png(dir: &Path, name: &str, rgba: [u8; 4]) -> PathBuf {
        let image = RgbaImage::from_pixel(2, 2, Rgba(rgba));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    /// Perform an upload the way `dispatch` does, without spawning.
    async fn finish_upload(app: &mut App, request: UploadRequest) {
        let result = ImagePreview::read(&request.path)
            .await
            .map(|preview| LoadedImage {
                thumbnail: make_thumbnail(&preview),
                preview,
            });
        app.handle_app_event(AppEvent::UploadFinished {
            ticket: request.ticket,
            result,
        });
    }

    fn finish_extraction(app: &mut App, job: ExtractionJob) {
        let result = app.extractor.extract(&job.preview);
        app.handle_app_event(AppEvent::ExtractionFinished {
            ticket: job.ticket,
            result,
        });
    }

    fn render_text(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    async fn app_with_palette(rgba: [u8; 4]) -> (App, SharedClipboard, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "img.png", rgba);
        let (mut app, clipboard) = test_app();
        let Some(Action::Upload(request)) = app.open(path) else {
            panic!("expected upload");
        };
        finish_upload(&mut app, request).await;
        let Some(Action::Extract(job)) = app.handle_key(ctrl('e')) else {
            panic!("expected extraction");
        };
        finish_extraction(&mut app, job);
        (app, clipboard, dir)
    }

    #[test]
    fn test_starts_on_welcome_screen() {
        let (mut app, _) = test_app();
        assert_eq!(app.screen, Screen::Welcome);
        let text = render_text(&mut app, 80, 24);
        assert!(text.contains("Magic Color Palette"));
        assert!(text.contains("Get Started"));
    }

    #[test]
    fn test_enter_opens_uploader() {
        let (mut app, _) = test_app();
        assert!(app.handle_key(key(KeyCode::Enter)).is_none());
        assert_eq!(app.screen, Screen::Uploader);
        let text = render_text(&mut app, 80, 24);
        assert!(text.contains("Upload an Image"));
    }

    #[test]
    fn test_welcome_escape_quits() {
        let (mut app, _) = test_app();
        assert!(matches!(
            app.handle_key(key(KeyCode::Esc)),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn test_ctrl_q_quits() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Enter));
        assert!(matches!(app.handle_key(ctrl('q')), Some(Action::Quit)));
    }

    #[test]
    fn test_double_ctrl_c_quits() {
        let (mut app, _) = test_app();
        assert!(app.handle_key(ctrl('c')).is_none());
        assert!(matches!(app.handle_key(ctrl('c')), Some(Action::Quit)));
    }

    #[test]
    fn test_empty_path_is_ignored() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Enter));
        assert!(app.handle_key(key(KeyCode::Enter)).is_none());
        assert!(!app.session.is_uploading());
        assert_eq!(app.session.phase(), Phase::Idle);
    }

    #[test]
    fn test_typed_path_starts_upload() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "/tmp/cat.png");
        match app.handle_key(key(KeyCode::Enter)) {
            Some(Action::Upload(request)) => {
                assert_eq!(request.path, PathBuf::from("/tmp/cat.png"));
            }
            other => panic!("expected upload, got {:?}", other),
        }
        assert!(app.session.is_uploading());
    }

    #[test]
    fn test_paste_fills_upload_field() {
        let (mut app, _) = test_app();
        app.handle_paste("'/tmp/dropped file.png'\n");
        assert_eq!(app.screen, Screen::Uploader);
        match app.handle_key(key(KeyCode::Enter)) {
            Some(Action::Upload(request)) => {
                assert_eq!(request.path, PathBuf::from("/tmp/dropped file.png"));
            }
            other => panic!("expected upload, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_without_preview_reports_error() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Enter));
        assert!(app.handle_key(ctrl('e')).is_none());
        let (_, level) = app.status_message().unwrap();
        assert_eq!(level, Level::Error);
    }

    #[tokio::test]
    async fn test_upload_then_extract_solid_red() {
        let (mut app, _, _dir) = app_with_palette([255, 0, 0, 255]).await;

        assert_eq!(app.session.phase(), Phase::HasPalette);
        assert_eq!(app.focus, Focus::Palette);
        let palette = app.session.palette().unwrap();
        assert_eq!(palette.len(), 6);
        assert!(palette.iter().all(|c| c.as_str() == "#ff0000"));

        let text = render_text(&mut app, 100, 40);
        assert!(text.contains("Extracted Palette"));
        assert!(text.contains("#ff0000"));
        assert!(text.contains("Extract Colors"));
    }

    #[tokio::test]
    async fn test_number_key_copies_and_blocks_until_dismissed() {
        let (mut app, clipboard, _dir) = app_with_palette([0, 0, 255, 255]).await;

        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(clipboard.contents().as_deref(), Some("#0000ff"));
        assert_eq!(app.selected, 1);
        assert_eq!(app.notice.as_deref(), Some("Copied #0000ff"));
        assert!(render_text(&mut app, 100, 40).contains("Copied #0000ff"));

        // The dismissing key does nothing else
        assert!(app.handle_key(key(KeyCode::Char('e'))).is_none());
        assert!(app.notice.is_none());
    }

    #[tokio::test]
    async fn test_arrow_keys_move_selection() {
        let (mut app, _, _dir) = app_with_palette([0, 128, 0, 255]).await;
        render_text(&mut app, 100, 40);

        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected, 1 + app.grid_columns);
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected, 1 + app.grid_columns);
        app.handle_key(key(KeyCode::Up));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.selected, 0);
    }

    #[tokio::test]
    async fn test_click_on_swatch_copies() {
        let (mut app, clipboard, _dir) = app_with_palette([10, 20, 30, 255]).await;
        render_text(&mut app, 100, 40);
        let swatch = app.hits.swatches[4];

        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: swatch.x + 1,
            row: swatch.y + 1,
            modifiers: KeyModifiers::NONE,
        });

        assert_eq!(clipboard.contents().as_deref(), Some("#0a141e"));
        assert_eq!(app.selected, 4);
    }

    #[tokio::test]
    async fn test_reupload_clears_palette_and_focus() {
        let (mut app, _, dir) = app_with_palette([255, 0, 0, 255]).await;
        let green = write_png(dir.path(), "green.png", [0, 255, 0, 255]);

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Upload);
        let Some(Action::Upload(request)) = app.open(green) else {
            panic!("expected upload");
        };
        finish_upload(&mut app, request).await;

        assert_eq!(app.session.phase(), Phase::HasPreview);
        assert_eq!(app.focus, Focus::Upload);
        assert!(!render_text(&mut app, 100, 40).contains("Extracted Palette"));
    }

    #[tokio::test]
    async fn test_superseded_upload_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let red = write_png(dir.path(), "red.png", [255, 0, 0, 255]);
        let blue = write_png(dir.path(), "blue.png", [0, 0, 255, 255]);
        let (mut app, _) = test_app();

        let Some(Action::Upload(slow)) = app.open(red) else {
            panic!("expected upload");
        };
        let Some(Action::Upload(fast)) = app.open(blue.clone()) else {
            panic!("expected upload");
        };
        finish_upload(&mut app, fast).await;
        finish_upload(&mut app, slow).await;

        let expected = ImagePreview::read(&blue).await.unwrap();
        assert_eq!(app.session.preview(), Some(&expected));
    }

    #[test]
    fn test_resize_and_tick_leave_state_alone() {
        let (mut app, _) = test_app();
        app.handle_key(key(KeyCode::Enter));
        assert!(app.handle_tui_event(TuiEvent::Resize).is_none());
        assert!(app.handle_tui_event(TuiEvent::Tick).is_none());
        assert_eq!(app.screen, Screen::Uploader);
        assert!(app.status_message().is_none());
    }

    #[tokio::test]
    async fn test_undecodable_image_shows_unavailable_preview() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        // A PNG signature with nothing after it sniffs as an image but won't decode
        std::fs::write(&path, b"\x89PNG\r\n\x1a\n").unwrap();

        let (mut app, _) = test_app();
        let Some(Action::Upload(request)) = app.open(path) else {
            panic!("expected upload");
        };
        finish_upload(&mut app, request).await;

        assert_eq!(app.session.phase(), Phase::HasPreview);
        assert!(app.thumbnail.is_none());
        let text = render_text(&mut app, 100, 40);
        assert!(text.contains("Preview unavailable"));
        assert!(!text.contains("No image yet"));
    }

    #[tokio::test]
    async fn test_read_failure_shows_in_status_bar() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = test_app();
        let Some(Action::Upload(request)) = app.open(dir.path().join("missing.png")) else {
            panic!("expected upload");
        };
        finish_upload(&mut app, request).await;

        assert!(matches!(
            app.session.read_error(),
            Some(ReadError::Io { .. })
        ));
        assert!(render_text(&mut app, 120, 30).contains("Could not read image"));

        app.handle_key(key(KeyCode::Esc));
        assert!(app.status_message().is_none());
    }
}
