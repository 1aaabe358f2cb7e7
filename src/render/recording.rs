use std::collections::BTreeMap;

use crate::render::{DrawCommand, Renderer};

/// Keeps every command it is handed. Used headless and in tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
    fullscreen: bool,
}

impl RecordingRenderer {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Hand over the commands recorded so far and start a fresh frame
    pub fn take_frame(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn count_by_kind(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for command in &self.commands {
            *counts.entry(command.kind()).or_default() += 1;
        }
        counts
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}
