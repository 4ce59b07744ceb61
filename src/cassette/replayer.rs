//! Serves recorded interactions back in order.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};
use crate::error::{Error, Result};

/// Per-(port, method) queues of recorded interactions.
///
/// Calls to different ports may interleave differently on replay than on
/// record; only the order within one (port, method) pair matters.
#[derive(Debug, Default)]
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Indexes a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Takes the next recorded interaction for `port::method`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cassette`] if nothing (more) was recorded for it.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<Interaction> {
        let key = (port.to_string(), method.to_string());
        let Some(queue) = self.queues.get_mut(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            return Err(Error::Cassette(format!(
                "no interactions recorded for {port}::{method}; available: [{}]",
                available.join(", ")
            )));
        };
        queue.pop_front().ok_or_else(|| {
            Error::Cassette(format!("all recorded {port}::{method} interactions were consumed"))
        })
    }

    /// Interactions not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }
}
