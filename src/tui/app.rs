use crate::coordinator::UiMessage;
use crate::domain::Language;
use crate::tui::sink::PresentationSink;
use crate::tui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// The search bar has focus and printable keys edit the term.
    Search,
}

/// All view state, owned by the UI task. Messages from worker tasks arrive
/// through `apply`, which enforces the generation-discard rule: anything not
/// belonging to the newest announced cycle is dropped before it can render.
pub struct TuiApp {
    pub sink: PresentationSink,
    pub theme: Theme,
    pub language: Language,
    pub input_mode: InputMode,
    pub search_input: String,
    pub scroll: u16,
    pub processed: u64,
    pub expected: usize,
    pub is_loading: bool,
    pub current_generation: u64,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new(theme: Theme, language: Language) -> Self {
        Self {
            sink: PresentationSink::new(),
            theme,
            language,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            scroll: 0,
            processed: 0,
            expected: 0,
            is_loading: false,
            current_generation: 0,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn apply(&mut self, msg: UiMessage) {
        match msg {
            UiMessage::CycleStarted {
                generation,
                expected,
            } => {
                if generation > self.current_generation {
                    self.current_generation = generation;
                    self.sink.reset();
                    self.scroll = 0;
                    self.processed = 0;
                    self.expected = expected;
                    self.is_loading = true;
                    self.status_message = None;
                }
            }
            UiMessage::Render { generation, event } => {
                if generation == self.current_generation {
                    self.sink.accept(event);
                }
            }
            UiMessage::Progress {
                generation,
                processed,
            } => {
                if generation == self.current_generation {
                    self.processed = processed;
                }
            }
            UiMessage::CycleFinished { generation } => {
                if generation == self.current_generation {
                    self.is_loading = false;
                    self.status_message = Some(format!("Done: {} entries", self.processed));
                }
            }
        }
    }

    /// Fraction of expected entries processed, for the progress gauge.
    pub fn progress_ratio(&self) -> f64 {
        if self.expected == 0 {
            if self.is_loading {
                0.0
            } else {
                1.0
            }
        } else {
            (self.processed as f64 / self.expected as f64).min(1.0)
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn cycle_language(&mut self) {
        self.language = self.language.next();
    }
}
