use std::fmt::Display;

/// Key code the host reports for F1
const F1_KEY_CODE: u32 = 112;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKey {
    F1,
    Other(u32),
}

impl HostKey {
    pub fn from_key_code(code: u32) -> Self {
        match code {
            F1_KEY_CODE => HostKey::F1,
            other => HostKey::Other(other),
        }
    }
}

/// What the host should do in response to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    ToggleFullscreen,
}

struct KeyAction {
    key: HostKey,
    description: &'static str,
    action: HostAction,
}

impl Display for KeyAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description)
    }
}

pub struct Keyboard {
    actions: Vec<KeyAction>,
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new().with_actions()
    }
}

impl Keyboard {
    pub fn new() -> Self {
        Self {
            actions: Default::default(),
        }
    }

    pub fn with_actions(mut self) -> Self {
        self.add_action(HostKey::F1, "F1: Fullscreen", HostAction::ToggleFullscreen);
        self
    }

    fn add_action(&mut self, key: HostKey, description: &'static str, action: HostAction) {
        self.actions.push(KeyAction {
            key,
            description,
            action,
        });
    }

    pub fn action_for(&self, key: HostKey) -> Option<HostAction> {
        self.actions
            .iter()
            .find(|key_action| key_action.key == key)
            .map(|key_action| key_action.action)
    }

    pub fn legend(&self) -> String {
        self.actions
            .iter()
            .map(|action| action.to_string())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
