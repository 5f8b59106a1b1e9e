use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::catalog::{RewriteStyle, Tone};
use crate::client::{self, ApiConfig, RephraseFailed};
use crate::config::{API_KEY_ENV, QuillConfig};

/// Upper bound on the input text, in characters. Edits that would exceed it
/// are rejected outright, never truncated.
pub const MAX_CHARS: usize = 400;

/// How long the per-result "copied" indicator stays visible.
const COPY_FLASH: Duration = Duration::from_secs(2);

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Insert,
}

#[derive(Debug, Default)]
struct DraftInput {
    text: String,
    cursor: usize,
}

impl DraftInput {
    fn text(&self) -> &str {
        &self.text
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor.saturating_add(1);
        self.cursor = self.clamp_cursor(cursor_moved_right);
    }

    fn enter_char(&mut self, new_char: char) {
        let index = self.byte_index();
        self.text.insert(index, new_char);
        self.move_cursor_right();
    }

    fn enter_text(&mut self, new_text: &str) {
        let index = self.byte_index();
        self.text.insert_str(index, new_text);
        self.cursor = self.clamp_cursor(self.cursor + new_text.chars().count());
    }

    fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }

        let current_index = self.cursor;
        let from_left_to_current_index = current_index - 1;

        let before_char_to_delete = self.text.chars().take(from_left_to_current_index);
        let after_char_to_delete = self.text.chars().skip(current_index);

        self.text = before_char_to_delete.chain(after_char_to_delete).collect();
        self.move_cursor_left();
    }

    fn delete_char_forward(&mut self) {
        let current_index = self.cursor;
        if current_index >= self.text.chars().count() {
            return;
        }

        let before_char = self.text.chars().take(current_index);
        let after_char = self.text.chars().skip(current_index + 1);

        self.text = before_char.chain(after_char).collect();
    }

    fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    fn move_cursor_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn delete_word_backwards(&mut self) {
        while self.cursor > 0 {
            let idx = self.cursor - 1;
            let ch = self.text.chars().nth(idx);
            if ch.is_some_and(|c| c.is_whitespace()) {
                self.delete_char();
            } else {
                break;
            }
        }

        while self.cursor > 0 {
            let idx = self.cursor - 1;
            let ch = self.text.chars().nth(idx);
            if ch.is_some_and(|c| !c.is_whitespace()) {
                self.delete_char();
            } else {
                break;
            }
        }
    }

    fn byte_index(&self) -> usize {
        self.text
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor)
            .unwrap_or(self.text.len())
    }

    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.text.chars().count())
    }
}

#[derive(Debug)]
enum InputState {
    Normal(DraftInput),
    Insert(DraftInput),
}

impl Default for InputState {
    fn default() -> Self {
        Self::Normal(DraftInput::default())
    }
}

impl InputState {
    fn mode(&self) -> InputMode {
        match self {
            InputState::Normal(_) => InputMode::Normal,
            InputState::Insert(_) => InputMode::Insert,
        }
    }

    fn draft(&self) -> &DraftInput {
        match self {
            InputState::Normal(draft) | InputState::Insert(draft) => draft,
        }
    }

    fn draft_mut(&mut self) -> &mut DraftInput {
        match self {
            InputState::Normal(draft) | InputState::Insert(draft) => draft,
        }
    }

    fn into_normal(self) -> InputState {
        match self {
            InputState::Normal(draft) | InputState::Insert(draft) => InputState::Normal(draft),
        }
    }

    fn into_insert(self) -> InputState {
        match self {
            InputState::Normal(draft) | InputState::Insert(draft) => InputState::Insert(draft),
        }
    }
}

/// A rephrase request that has been issued but not yet resolved.
///
/// The spawned task resolves exactly once through the channel; dropping the
/// sender without resolving counts as a failure.
#[derive(Debug)]
struct PendingRephrase {
    rx: mpsc::UnboundedReceiver<Result<Vec<String>, RephraseFailed>>,
}

/// Lifecycle of the current/most-recent rephrase request.
///
/// A real sum type: the result list exists only in `Succeeded` and the error
/// message only in `Failed`, so "results and error at the same time" is not
/// representable.
#[derive(Debug, Default)]
enum RequestState {
    #[default]
    Idle,
    Loading(PendingRephrase),
    Succeeded(Vec<String>),
    Failed(String),
}

#[derive(Debug, Clone, Copy)]
struct CopyFlash {
    index: usize,
    at: Instant,
}

/// Proof that the app is in insert mode; required to obtain an editing view.
#[derive(Debug)]
pub struct InsertToken(());

pub struct InsertMode<'a> {
    app: &'a mut App,
}

/// Application state
pub struct App {
    input: InputState,
    style: RewriteStyle,
    tone: Tone,
    state: RequestState,
    selected: usize,
    copied: Option<CopyFlash>,
    status_message: Option<String>,
    should_quit: bool,
    tick: usize,
    api: Option<ApiConfig>,
}

impl App {
    pub fn new() -> Self {
        let config = QuillConfig::load().unwrap_or_default();
        Self::with_api(config.resolve_api())
    }

    /// Build an app with an explicit request configuration (or none).
    ///
    /// This is the constructor tests use to point the client at a local
    /// mock server.
    pub fn with_api(api: Option<ApiConfig>) -> Self {
        Self {
            input: InputState::default(),
            style: RewriteStyle::default(),
            tone: Tone::default(),
            state: RequestState::Idle,
            selected: 0,
            copied: None,
            status_message: None,
            should_quit: false,
            tick: 0,
            api,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn tick_count(&self) -> usize {
        self.tick
    }

    pub fn has_api_key(&self) -> bool {
        self.api.is_some()
    }

    pub fn style(&self) -> RewriteStyle {
        self.style
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    /// Change the rewrite style. Valid in any request state; results and
    /// errors are left untouched.
    pub fn set_style(&mut self, style: RewriteStyle) {
        self.style = style;
    }

    pub fn set_tone(&mut self, tone: Tone) {
        self.tone = tone;
    }

    pub fn next_style(&mut self) {
        self.style = self.style.next();
    }

    pub fn prev_style(&mut self) {
        self.style = self.style.prev();
    }

    pub fn next_tone(&mut self) {
        self.tone = self.tone.next();
    }

    pub fn prev_tone(&mut self) {
        self.tone = self.tone.prev();
    }

    /// Whether a request is currently in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading(_))
    }

    /// Alternative phrasings from the most recent successful request.
    pub fn results(&self) -> &[String] {
        match &self.state {
            RequestState::Succeeded(results) => results,
            _ => &[],
        }
    }

    /// Message from the most recent failed request.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn selected_result(&self) -> Option<usize> {
        if self.results().is_empty() {
            None
        } else {
            Some(self.selected.min(self.results().len() - 1))
        }
    }

    pub fn select_next_result(&mut self) {
        let len = self.results().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev_result(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Index of the result currently showing its "copied" flash, if any.
    pub fn copied_index(&self) -> Option<usize> {
        self.copied.map(|flash| flash.index)
    }

    /// Copy the selected result to the system clipboard and raise the
    /// transient per-item indicator.
    pub fn copy_selected(&mut self) {
        let Some(index) = self.selected_result() else {
            return;
        };
        let text = self.results()[index].clone();

        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => {
                self.copied = Some(CopyFlash {
                    index,
                    at: Instant::now(),
                });
            }
            Err(e) => {
                tracing::warn!("clipboard unavailable: {e}");
                self.set_status(format!("Clipboard unavailable: {e}"));
            }
        }
    }

    pub fn input_mode(&self) -> InputMode {
        self.input.mode()
    }

    pub fn draft_text(&self) -> &str {
        self.input.draft().text()
    }

    pub fn draft_cursor(&self) -> usize {
        self.input.draft().cursor()
    }

    pub fn char_count(&self) -> usize {
        self.input.draft().char_count()
    }

    pub fn insert_token(&self) -> Option<InsertToken> {
        matches!(&self.input, InputState::Insert(_)).then_some(InsertToken(()))
    }

    pub fn insert_mode(&mut self, _token: InsertToken) -> InsertMode<'_> {
        InsertMode { app: self }
    }

    pub fn enter_normal_mode(&mut self) {
        self.input = std::mem::take(&mut self.input).into_normal();
    }

    pub fn enter_insert_mode(&mut self) {
        self.input = std::mem::take(&mut self.input).into_insert();
    }

    pub(crate) fn enter_insert_mode_at_end(&mut self) {
        self.input.draft_mut().move_cursor_end();
        self.enter_insert_mode();
    }

    pub(crate) fn enter_insert_mode_with_clear(&mut self) {
        self.input.draft_mut().clear();
        self.enter_insert_mode();
    }

    /// Issue a rephrase request for the current input.
    ///
    /// No-op while a request is already in flight or when the trimmed input
    /// is empty. Clears any previous results or error before the call goes
    /// out, so nothing stale survives alongside the new request.
    pub fn submit(&mut self) {
        if self.is_loading() {
            self.set_status("Still waiting on the previous request");
            return;
        }
        if self.draft_text().trim().is_empty() {
            return;
        }
        let Some(config) = self.api.clone() else {
            self.set_status(format!(
                "No API key configured. Set {API_KEY_ENV} environment variable."
            ));
            return;
        };

        // Captured now; later edits do not reach the in-flight request.
        let text = self.draft_text().to_string();
        let style = self.style;
        let tone = self.tone;

        let (tx, rx) = mpsc::unbounded_channel();
        self.state = RequestState::Loading(PendingRephrase { rx });
        self.selected = 0;
        self.copied = None;
        self.clear_status();

        tokio::spawn(async move {
            let outcome = client::rephrase(&config, &text, style, tone).await;
            let _ = tx.send(outcome);
        });
    }

    /// Apply the resolution of the in-flight request, if it has arrived.
    pub fn process_request_events(&mut self) {
        let outcome = {
            let RequestState::Loading(pending) = &mut self.state else {
                return;
            };

            match pending.rx.try_recv() {
                Ok(outcome) => outcome,
                Err(mpsc::error::TryRecvError::Empty) => return,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    tracing::warn!("rephrase task dropped its channel before resolving");
                    self.state =
                        RequestState::Failed("The rephrase request was interrupted".to_string());
                    return;
                }
            }
        };

        match outcome {
            Ok(results) => {
                self.selected = 0;
                self.state = RequestState::Succeeded(results);
            }
            Err(failure) => {
                self.state = RequestState::Failed(failure.message().to_string());
            }
        }
    }

    /// Increment the animation tick and expire the copy flash.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if let Some(flash) = self.copied
            && flash.at.elapsed() >= COPY_FLASH
        {
            self.copied = None;
        }
    }

    /// A lingering error panel disappears as soon as the user edits the
    /// input again. Results stay visible across edits.
    fn dismiss_error(&mut self) {
        if matches!(self.state, RequestState::Failed(_)) {
            self.state = RequestState::Idle;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> InsertMode<'a> {
    fn draft_mut(&mut self) -> &mut DraftInput {
        self.app.input.draft_mut()
    }

    pub fn move_cursor_left(&mut self) {
        self.draft_mut().move_cursor_left();
    }

    pub fn move_cursor_right(&mut self) {
        self.draft_mut().move_cursor_right();
    }

    /// Insert a character, unless it would push the input past [`MAX_CHARS`].
    pub fn enter_char(&mut self, new_char: char) {
        if self.app.input.draft().char_count() >= MAX_CHARS {
            return;
        }
        self.draft_mut().enter_char(new_char);
        self.app.dismiss_error();
    }

    /// Bulk insert (paste). All-or-nothing: if the whole text does not fit
    /// under [`MAX_CHARS`], none of it is applied.
    pub fn enter_text(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let incoming = text.chars().count();
        if incoming == 0 {
            return;
        }
        if self.app.input.draft().char_count() + incoming > MAX_CHARS {
            self.app
                .set_status(format!("Paste rejected: input is limited to {MAX_CHARS} characters"));
            return;
        }
        self.draft_mut().enter_text(&text);
        self.app.dismiss_error();
    }

    pub fn delete_char(&mut self) {
        self.draft_mut().delete_char();
        self.app.dismiss_error();
    }

    pub fn delete_char_forward(&mut self) {
        self.draft_mut().delete_char_forward();
        self.app.dismiss_error();
    }

    pub fn delete_word_backwards(&mut self) {
        self.draft_mut().delete_word_backwards();
        self.app.dismiss_error();
    }

    pub fn reset_cursor(&mut self) {
        self.draft_mut().reset_cursor();
    }

    pub fn move_cursor_end(&mut self) {
        self.draft_mut().move_cursor_end();
    }

    pub fn clear_line(&mut self) {
        self.draft_mut().clear();
        self.app.dismiss_error();
    }
}
