//! The question input field.
//!
//! A multi-line text buffer with the widget's key handling: plain Enter
//! submits the current text, Enter with a held modifier inserts a line
//! break. Picking an example question fills the field but does not submit.

use crate::config::ExamplesConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// What the caller should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Submit this text (the field's content at the time of the press).
    Submit(String),
    Edited,
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct QuestionInput {
    text: String,
    disabled: bool,
}

impl QuestionInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Disable while a request is pending; a disabled field ignores keys.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }

    pub fn handle_key(&mut self, event: KeyEvent) -> InputAction {
        if self.disabled {
            return InputAction::Ignored;
        }
        match event.key {
            Key::Enter if event.modifiers.any() => {
                self.text.push('\n');
                InputAction::Edited
            }
            Key::Enter => InputAction::Submit(self.text.clone()),
            Key::Char(c) => {
                self.text.push(c);
                InputAction::Edited
            }
            Key::Backspace => {
                if self.text.pop().is_some() {
                    InputAction::Edited
                } else {
                    InputAction::Ignored
                }
            }
        }
    }

    /// Type a run of characters.
    pub fn type_str(&mut self, s: &str) {
        for c in s.chars() {
            self.handle_key(KeyEvent::plain(Key::Char(c)));
        }
    }

    /// Replace the field with an example question. Never submits.
    pub fn select_example(&mut self, question: &str) {
        if self.disabled {
            return;
        }
        self.text = question.to_string();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

/// Preset questions offered as shortcuts.
#[derive(Debug, Clone)]
pub struct ExampleQuestions {
    questions: Vec<String>,
}

impl ExampleQuestions {
    pub fn new(questions: Vec<String>) -> Self {
        Self { questions }
    }

    pub fn from_config(config: &ExamplesConfig) -> Self {
        Self::new(config.questions.clone())
    }

    /// 1-based lookup, as shown to the user.
    pub fn get(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.questions.get(i))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
