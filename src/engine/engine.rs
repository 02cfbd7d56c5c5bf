use std::sync::mpsc::{Receiver, Sender};

use log::debug;

use crate::engine::content::ContentProvider;
use crate::engine::protocol::{EngineCommand, EngineResponse};

/// Runs all blocking content fetches on a dedicated thread so the UI
/// loop never waits on the network. Exits when the command channel
/// closes.
pub struct Engine {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    provider: ContentProvider,
}

impl Engine {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        provider: ContentProvider,
    ) -> Self {
        Self { rx, tx, provider }
    }

    pub fn run(&mut self) {
        debug!("engine ready (remote content: {})", self.provider.is_remote());
        while let Ok(cmd) = self.rx.recv() {
            let resp = match cmd {
                EngineCommand::FetchLevel { token, level_index } => {
                    debug!("fetching level {level_index} (token {token})");
                    EngineResponse::LevelReady {
                        token,
                        level: self.provider.level(level_index),
                    }
                }
                EngineCommand::FetchMentor {
                    token,
                    player,
                    last_choice,
                } => EngineResponse::MentorReady {
                    token,
                    feedback: self.provider.mentor(&player, &last_choice),
                },
            };

            if self.tx.send(resp).is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn worker_answers_fetches_with_matching_tokens() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = std::thread::spawn(move || {
            Engine::new(cmd_rx, resp_tx, ContentProvider::offline()).run();
        });

        cmd_tx
            .send(EngineCommand::FetchLevel {
                token: 3,
                level_index: 1,
            })
            .unwrap();
        match resp_rx.recv().unwrap() {
            EngineResponse::LevelReady { token, level } => {
                assert_eq!(token, 3);
                assert_eq!(level.id, 2);
            }
            _ => panic!("expected a level"),
        }

        drop(cmd_tx);
        handle.join().unwrap();
    }
}
