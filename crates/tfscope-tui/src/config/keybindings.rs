use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use tfscope_logs::{Column, EntryFilter};

use crate::app::Action;

/// A key combination
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn shift(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::SHIFT,
        }
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Context for keybindings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Global,
    LogViewer,
    SearchInput,
    UploadInput,
    Overlay,
}

/// Keybinding configuration
pub struct KeyBindings {
    bindings: HashMap<KeyContext, HashMap<KeyBinding, Action>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut bindings = HashMap::new();

        // Global bindings
        let mut global = HashMap::new();
        global.insert(KeyBinding::new(KeyCode::Char('?')), Action::ToggleHelp);
        global.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        global.insert(KeyBinding::new(KeyCode::Char('q')), Action::Quit);
        global.insert(KeyBinding::new(KeyCode::Char('x')), Action::DismissMessage);
        bindings.insert(KeyContext::Global, global);

        let mut log_viewer = HashMap::new();
        // Row navigation
        log_viewer.insert(KeyBinding::new(KeyCode::Char('j')), Action::ScrollDown(1));
        log_viewer.insert(KeyBinding::new(KeyCode::Down), Action::ScrollDown(1));
        log_viewer.insert(KeyBinding::new(KeyCode::Char('k')), Action::ScrollUp(1));
        log_viewer.insert(KeyBinding::new(KeyCode::Up), Action::ScrollUp(1));
        log_viewer.insert(KeyBinding::ctrl(KeyCode::Char('d')), Action::PageDown);
        log_viewer.insert(KeyBinding::ctrl(KeyCode::Char('u')), Action::PageUp);
        log_viewer.insert(KeyBinding::new(KeyCode::PageDown), Action::PageDown);
        log_viewer.insert(KeyBinding::new(KeyCode::PageUp), Action::PageUp);
        log_viewer.insert(KeyBinding::new(KeyCode::Char('g')), Action::ScrollToTop);
        log_viewer.insert(KeyBinding::shift(KeyCode::Char('G')), Action::ScrollToBottom);
        log_viewer.insert(KeyBinding::new(KeyCode::Home), Action::ScrollToTop);
        log_viewer.insert(KeyBinding::new(KeyCode::End), Action::ScrollToBottom);
        // Filter buttons
        for (key, filter) in ('0'..='6').zip(EntryFilter::buttons()) {
            log_viewer.insert(KeyBinding::new(KeyCode::Char(key)), Action::SetFilter(filter));
        }
        log_viewer.insert(KeyBinding::new(KeyCode::Char('/')), Action::OpenSearch);
        log_viewer.insert(KeyBinding::new(KeyCode::Char('n')), Action::SearchClear);
        // Cell activation
        log_viewer.insert(KeyBinding::new(KeyCode::Enter), Action::OpenCell(Column::Message));
        log_viewer.insert(KeyBinding::new(KeyCode::Char('m')), Action::OpenCell(Column::Message));
        log_viewer.insert(KeyBinding::new(KeyCode::Char('t')), Action::OpenCell(Column::Timestamp));
        log_viewer.insert(KeyBinding::new(KeyCode::Char('r')), Action::OpenCell(Column::RequestId));
        // Display and actions
        log_viewer.insert(KeyBinding::new(KeyCode::Char('s')), Action::ToggleStats);
        log_viewer.insert(KeyBinding::shift(KeyCode::Char('T')), Action::ToggleLocalTime);
        log_viewer.insert(KeyBinding::new(KeyCode::Char('u')), Action::OpenUploadPrompt);
        log_viewer.insert(KeyBinding::new(KeyCode::Char('d')), Action::FetchDetails);
        log_viewer.insert(KeyBinding::new(KeyCode::Char('e')), Action::ExportReport);
        bindings.insert(KeyContext::LogViewer, log_viewer);

        // Detail overlay; shadows the global quit
        let mut overlay = HashMap::new();
        overlay.insert(KeyBinding::new(KeyCode::Esc), Action::CloseOverlay);
        overlay.insert(KeyBinding::new(KeyCode::Enter), Action::CloseOverlay);
        overlay.insert(KeyBinding::new(KeyCode::Char('q')), Action::CloseOverlay);
        overlay.insert(KeyBinding::new(KeyCode::Char('y')), Action::CopyOverlay);
        overlay.insert(KeyBinding::new(KeyCode::Char('c')), Action::CopyOverlay);
        overlay.insert(KeyBinding::new(KeyCode::Char('j')), Action::OverlayScrollDown(1));
        overlay.insert(KeyBinding::new(KeyCode::Down), Action::OverlayScrollDown(1));
        overlay.insert(KeyBinding::new(KeyCode::Char('k')), Action::OverlayScrollUp(1));
        overlay.insert(KeyBinding::new(KeyCode::Up), Action::OverlayScrollUp(1));
        overlay.insert(KeyBinding::new(KeyCode::PageDown), Action::OverlayScrollDown(10));
        overlay.insert(KeyBinding::new(KeyCode::PageUp), Action::OverlayScrollUp(10));
        bindings.insert(KeyContext::Overlay, overlay);

        // Search input (live narrowing)
        let mut search_input = HashMap::new();
        search_input.insert(KeyBinding::new(KeyCode::Enter), Action::ApplySearch);
        search_input.insert(KeyBinding::new(KeyCode::Esc), Action::CloseSearch);
        search_input.insert(KeyBinding::new(KeyCode::Backspace), Action::SearchBackspace);
        search_input.insert(KeyBinding::ctrl(KeyCode::Char('u')), Action::SearchClear);
        search_input.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::CloseSearch);
        bindings.insert(KeyContext::SearchInput, search_input);

        // Upload path prompt
        let mut upload_input = HashMap::new();
        upload_input.insert(KeyBinding::new(KeyCode::Enter), Action::SubmitUpload);
        upload_input.insert(KeyBinding::new(KeyCode::Esc), Action::CloseUploadPrompt);
        upload_input.insert(KeyBinding::new(KeyCode::Backspace), Action::UploadBackspace);
        upload_input.insert(KeyBinding::ctrl(KeyCode::Char('u')), Action::UploadClear);
        upload_input.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::CloseUploadPrompt);
        bindings.insert(KeyContext::UploadInput, upload_input);

        Self { bindings }
    }

    /// Look up action for key event in given context
    pub fn get_action(&self, context: KeyContext, key: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(key);

        // First check context-specific bindings
        if let Some(action) = self
            .bindings
            .get(&context)
            .and_then(|context_bindings| context_bindings.get(&binding))
        {
            return Some(action.clone());
        }

        // Fall back to global bindings
        self.bindings
            .get(&KeyContext::Global)?
            .get(&binding)
            .cloned()
    }

    /// Handle key event in a text-input context
    /// Returns Some(Action) for special keys and plain characters, None otherwise
    pub fn get_input_action(&self, context: KeyContext, key: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(key);

        if let Some(action) = self
            .bindings
            .get(&context)
            .and_then(|input_bindings| input_bindings.get(&binding))
        {
            return Some(action.clone());
        }

        if let KeyCode::Char(c) = key.code
            && (key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT)
        {
            return match context {
                KeyContext::SearchInput => Some(Action::SearchInput(c)),
                KeyContext::UploadInput => Some(Action::UploadInput(c)),
                _ => None,
            };
        }

        None
    }

    /// Help overlay swallows everything except its own toggles and quit
    pub fn get_help_action(&self, key: &KeyEvent) -> Option<Action> {
        match KeyBinding::from_event(key) {
            b if b == KeyBinding::new(KeyCode::Esc) || b == KeyBinding::new(KeyCode::Char('?')) => {
                Some(Action::ToggleHelp)
            }
            b if b == KeyBinding::ctrl(KeyCode::Char('c')) => Some(Action::Quit),
            _ => None,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tfscope_logs::LogLevel;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[rstest]
    #[case('0', EntryFilter::All)]
    #[case('1', EntryFilter::Level(LogLevel::Trace))]
    #[case('4', EntryFilter::Level(LogLevel::Warning))]
    #[case('5', EntryFilter::Level(LogLevel::Error))]
    #[case('6', EntryFilter::WithResource)]
    fn test_filter_buttons(#[case] c: char, #[case] expected: EntryFilter) {
        let bindings = KeyBindings::new();
        let action = bindings.get_action(KeyContext::LogViewer, &key(KeyCode::Char(c)));
        assert!(matches!(action, Some(Action::SetFilter(f)) if f == expected));
    }

    #[test]
    fn test_overlay_shadows_quit() {
        let bindings = KeyBindings::new();
        let action = bindings.get_action(KeyContext::Overlay, &key(KeyCode::Char('q')));
        assert!(matches!(action, Some(Action::CloseOverlay)));
        let action = bindings.get_action(KeyContext::LogViewer, &key(KeyCode::Char('q')));
        assert!(matches!(action, Some(Action::Quit)));
    }

    #[test]
    fn test_search_input_passes_characters() {
        let bindings = KeyBindings::new();
        let action = bindings.get_input_action(KeyContext::SearchInput, &key(KeyCode::Char('q')));
        assert!(matches!(action, Some(Action::SearchInput('q'))));
        let action = bindings.get_input_action(KeyContext::UploadInput, &key(KeyCode::Char('/')));
        assert!(matches!(action, Some(Action::UploadInput('/'))));
        let action = bindings.get_input_action(KeyContext::SearchInput, &key(KeyCode::Esc));
        assert!(matches!(action, Some(Action::CloseSearch)));
    }

    #[test]
    fn test_help_swallows_other_keys() {
        let bindings = KeyBindings::new();
        assert!(bindings.get_help_action(&key(KeyCode::Char('q'))).is_none());
        assert!(matches!(
            bindings.get_help_action(&key(KeyCode::Esc)),
            Some(Action::ToggleHelp)
        ));
    }
}
