//! Application state and key handling

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyModifiers};
use phonebook_core::{
    Contact, KeyValueStorage, Notification, Notifier, Phonebook, RecordingNotifier,
};

/// How long a notification stays in the status bar
const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

/// Which section has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Name input of the contact editor
    Name,
    /// Number input of the contact editor
    Number,
    /// Filter input
    Filter,
    /// Contacts list
    List,
}

impl Focus {
    /// Move to the next section (wrapping)
    pub fn next(self) -> Self {
        match self {
            Focus::Name => Focus::Number,
            Focus::Number => Focus::Filter,
            Focus::Filter => Focus::List,
            Focus::List => Focus::Name,
        }
    }

    /// Move to the previous section (wrapping)
    pub fn prev(self) -> Self {
        match self {
            Focus::Name => Focus::List,
            Focus::Number => Focus::Name,
            Focus::Filter => Focus::Number,
            Focus::List => Focus::Filter,
        }
    }
}

/// Work the event loop must do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    /// Fetch sample contacts (async)
    Randomize,
}

/// Application state
pub struct App<S> {
    pub phonebook: Phonebook<S, RecordingNotifier>,
    /// Which section has focus
    pub focus: Focus,
    /// Contact editor: name field
    pub name_input: String,
    /// Contact editor: number field
    pub number_input: String,
    /// Selected row in the visible contacts
    pub selected: usize,
    /// Latest notification
    pub status: Option<Notification>,
    /// Notifications that arrived together with `status`
    pub status_extra: usize,
    /// When the status was set (for auto-dismiss)
    pub status_time: Option<Instant>,
    /// Whether a sample fetch is in flight
    pub is_loading: bool,
    /// Whether help overlay is visible
    pub show_help: bool,
}

impl<S: KeyValueStorage> App<S> {
    pub fn new(phonebook: Phonebook<S, RecordingNotifier>) -> Self {
        let mut app = Self {
            phonebook,
            focus: Focus::Name,
            name_input: String::new(),
            number_input: String::new(),
            selected: 0,
            status: None,
            status_extra: 0,
            status_time: None,
            is_loading: false,
            show_help: false,
        };
        // Surface a failed startup read
        app.collect_notifications();
        app
    }

    /// Contacts matching the current filter
    pub fn visible_contacts(&self) -> Vec<&Contact> {
        self.phonebook.visible_contacts()
    }

    /// Handle one key press
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Action {
        if self.show_help {
            self.show_help = false;
            return Action::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c') => Action::Quit,
                KeyCode::Char('r') => Action::Randomize,
                _ => Action::None,
            };
        }

        match code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return Action::None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return Action::None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Name | Focus::Number => self.handle_editor_key(code),
            Focus::Filter => self.handle_filter_key(code),
            Focus::List => return self.handle_list_key(code),
        }

        Action::None
    }

    fn handle_editor_key(&mut self, code: KeyCode) {
        let field = match self.focus {
            Focus::Name => &mut self.name_input,
            _ => &mut self.number_input,
        };

        match code {
            KeyCode::Char(c) => field.push(c),
            KeyCode::Backspace => {
                field.pop();
            }
            KeyCode::Enter if self.focus == Focus::Name => self.focus = Focus::Number,
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => self.focus = Focus::List,
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => {
                let mut filter = self.phonebook.filter().to_string();
                filter.push(c);
                self.set_filter(filter);
            }
            KeyCode::Backspace => {
                let mut filter = self.phonebook.filter().to_string();
                filter.pop();
                self.set_filter(filter);
            }
            KeyCode::Esc => {
                self.phonebook.reset_filter();
                self.selected = 0;
            }
            KeyCode::Enter => self.focus = Focus::List,
            _ => {}
        }
    }

    fn handle_list_key(&mut self, code: KeyCode) -> Action {
        match code {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('a') => self.focus = Focus::Name,
            KeyCode::Char('/') => self.focus = Focus::Filter,
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
        Action::None
    }

    /// Submit the contact editor
    ///
    /// The form is cleared only when the contact was added.
    pub fn submit(&mut self) {
        if self
            .phonebook
            .submit_contact(&self.name_input, &self.number_input)
        {
            self.name_input.clear();
            self.number_input.clear();
            self.focus = Focus::Name;
        }
        self.collect_notifications();
    }

    /// Delete the selected contact
    pub fn delete_selected(&mut self) {
        let Some(id) = self
            .visible_contacts()
            .get(self.selected)
            .map(|c| c.id.clone())
        else {
            return;
        };

        self.phonebook.delete_contact(&id);
        self.clamp_selection();
        self.collect_notifications();
    }

    fn set_filter(&mut self, filter: String) {
        self.phonebook.set_filter(filter);
        self.selected = 0;
    }

    fn select_next(&mut self) {
        let len = self.visible_contacts().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the selection inside the visible list
    pub fn clamp_selection(&mut self) {
        let len = self.visible_contacts().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Report a failure that happened outside the phonebook
    pub fn notify_failure(&mut self, message: &str) {
        self.phonebook.notifier().notify_failure(message);
        self.collect_notifications();
    }

    /// Move queued notifications into the status bar
    pub fn collect_notifications(&mut self) {
        let mut pending = self.phonebook.notifier().drain();
        if let Some(latest) = pending.pop() {
            self.status_extra = pending.len();
            self.status = Some(latest);
            self.status_time = Some(Instant::now());
        }
    }

    /// Clear the status after the timeout
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_time {
            if time.elapsed() >= STATUS_TIMEOUT {
                self.status = None;
                self.status_extra = 0;
                self.status_time = None;
            }
        }
    }
}
