//! Begrenztes Protokoll ausgeführter Commands.

use super::AppCommand;
use crate::shared::COMMAND_LOG_CAPACITY;
use std::collections::VecDeque;

/// Speichert ausgeführte Commands in Reihenfolge.
#[derive(Debug)]
pub struct CommandLog {
    entries: VecDeque<AppCommand>,
    capacity: usize,
}

impl Default for CommandLog {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandLog {
    /// Erstellt ein leeres Command-Log mit Standardgröße.
    pub fn new() -> Self {
        Self::with_capacity(COMMAND_LOG_CAPACITY)
    }

    /// Erstellt ein leeres Command-Log (mindestens ein Eintrag).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Fügt einen ausgeführten Command hinzu.
    /// Bei voller Kapazität fällt der älteste Eintrag heraus.
    pub fn record(&mut self, command: &AppCommand) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(command.clone());
    }

    /// Gibt die Anzahl der geloggten Commands zurück.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Commands vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Ältester bis neuester Eintrag.
    pub fn entries(&self) -> impl Iterator<Item = &AppCommand> {
        self.entries.iter()
    }

    /// Ändert die Kapazität; überzählige alte Einträge werden verworfen.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }
}
