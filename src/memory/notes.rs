//! Ordered, agent-keyed log of hand-off notes

use crate::error::PipelineError;
use crate::models::{AgentName, Note};
use crate::Result;

/// Notes in append order, looked up by author rather than position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteLog {
    notes: Vec<Note>,
}

impl NoteLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a note. Each agent may contribute exactly one.
    pub fn append(&mut self, note: Note) -> Result<()> {
        if self.get(note.from).is_some() {
            return Err(PipelineError::AggregationFailure(format!(
                "{} already posted a note",
                note.from
            )));
        }
        self.notes.push(note);
        Ok(())
    }

    pub fn get(&self, agent: AgentName) -> Option<&Note> {
        self.notes.iter().find(|note| note.from == agent)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn into_vec(self) -> Vec<Note> {
        self.notes
    }
}
