//! Mock engine for state machine tests.

use super::{Engine, PlayerId};

#[derive(Debug, Default)]
pub struct MockEngine {
    pub global_interval: Option<f32>,
    pub local_player: Option<PlayerId>,
    pub sent_commands: Vec<(PlayerId, String)>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_local_player(id: u32) -> Self {
        Self {
            local_player: Some(PlayerId(id)),
            ..Self::default()
        }
    }

    pub fn reload_count(&self) -> usize {
        self.sent_commands
            .iter()
            .filter(|(_, cmd)| cmd == "reload")
            .count()
    }
}

impl Engine for MockEngine {
    fn set_global_interval(&mut self, interval: f32) {
        self.global_interval = Some(interval);
    }

    fn local_player(&self) -> Option<PlayerId> {
        self.local_player
    }

    fn send_client_command(&mut self, player: PlayerId, command: &str) {
        self.sent_commands.push((player, command.to_string()));
    }
}
