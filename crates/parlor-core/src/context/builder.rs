//! Contextual query assembly.

use std::collections::VecDeque;

use crate::message::Message;

const INSTRUCTIONS_LABEL: &str = "[Project Instructions]\n";
const MEMORIES_LABEL: &str = "[User Memories]\n";
const HISTORY_LABEL: &str = "[Conversation History]\n";
const CURRENT_LABEL: &str = "\n\n[Current Message]\n";

/// Default character budget for rendered history.
pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 6000;

/// Lines of history that survive eviction regardless of the budget.
pub const DEFAULT_MIN_CONTEXT_LINES: usize = 2;

/// Character budget applied to rendered conversation history.
///
/// Oldest lines are evicted while the joined history is longer than
/// `max_chars` and more than `min_lines` lines remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextBudget {
    pub max_chars: usize,
    pub min_lines: usize,
}

impl Default for ContextBudget {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CONTEXT_CHARS,
            min_lines: DEFAULT_MIN_CONTEXT_LINES,
        }
    }
}

impl ContextBudget {
    /// Builds the outbound query for `current` from prior turns, project
    /// instructions and user memories.
    ///
    /// Instructions are included verbatim when they are non-blank; memories
    /// are listed in the given order.
    pub fn build_query(
        &self,
        current: &str,
        history: &[Message],
        project_instructions: Option<&str>,
        memories: &[String],
    ) -> String {
        let mut query = String::new();

        if let Some(instructions) = project_instructions.filter(|i| !i.trim().is_empty()) {
            query.push_str(INSTRUCTIONS_LABEL);
            query.push_str(instructions);
            query.push_str("\n\n");
        }

        if !memories.is_empty() {
            query.push_str(MEMORIES_LABEL);
            let items: Vec<String> = memories.iter().map(|m| format!("- {}", m)).collect();
            query.push_str(&items.join("\n"));
            query.push_str("\n\n");
        }

        if history.is_empty() {
            query.push_str(current);
            return query;
        }

        query.push_str(HISTORY_LABEL);
        query.push_str(&self.render_history(history));
        query.push_str(CURRENT_LABEL);
        query.push_str(current);
        query
    }

    /// Renders history as `Role: content` lines and applies the budget.
    pub fn render_history(&self, history: &[Message]) -> String {
        let mut lines: VecDeque<String> = history
            .iter()
            .map(|m| format!("{}: {}", m.role.label(), m.content))
            .collect();

        // Joined length: every line plus one separator between each pair.
        let mut joined_len = lines.iter().map(|l| l.chars().count()).sum::<usize>()
            + lines.len().saturating_sub(1);

        while joined_len > self.max_chars && lines.len() > self.min_lines {
            if let Some(oldest) = lines.pop_front() {
                joined_len -= oldest.chars().count() + 1;
            }
        }

        Vec::from(lines).join("\n")
    }
}

/// Builds a query with the default budget.
pub fn build_query(
    current: &str,
    history: &[Message],
    project_instructions: Option<&str>,
    memories: &[String],
) -> String {
    ContextBudget::default().build_query(current, history, project_instructions, memories)
}
