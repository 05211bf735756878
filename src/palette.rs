//! Sender registry and palette color assignment.
//!
//! Every distinct sender gets a stable color from a fixed, configurable
//! palette. Colors are handed out in first-appearance order over the whole
//! message sequence, and the list of senders only ever grows during a parse
//! pass.
//!
//! `"Me"` is pre-seeded at index 0 before any message is read. Threema
//! labels self-authored messages exactly `Me`, and pre-seeding pins the
//! palette's first color to them whether or not the chat contains any.

/// Ordered set of sender identifiers in first-appearance order.
#[derive(Debug, Clone)]
pub struct SenderRegistry {
    senders: Vec<String>,
}

impl SenderRegistry {
    /// Creates a registry with `"Me"` pre-seeded at index 0.
    pub fn new() -> Self {
        Self {
            senders: vec!["Me".to_string()],
        }
    }

    /// Records a sender if it has not been seen yet.
    pub fn register(&mut self, sender: &str) {
        if !self.senders.iter().any(|s| s == sender) {
            self.senders.push(sender.to_string());
        }
    }

    /// Returns the appearance index of a sender, if registered.
    pub fn index_of(&self, sender: &str) -> Option<usize> {
        self.senders.iter().position(|s| s == sender)
    }

    /// Iterates senders in appearance order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.senders.iter().map(String::as_str)
    }

    /// Returns the number of registered senders (always at least 1).
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    /// Never true: `"Me"` is always present.
    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}

impl Default for SenderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Assigns a palette color to every registered sender.
///
/// The sender at appearance index `i` gets `palette[i]`, clamped to the
/// last palette entry once the palette runs out. No wraparound, no error.
/// Returns `(sender, color)` pairs in appearance order; empty when the
/// palette itself is empty.
pub fn assign_colors<'a>(
    registry: &'a SenderRegistry,
    palette: &'a [String],
) -> Vec<(&'a str, &'a str)> {
    let Some(last) = palette.last() else {
        return Vec::new();
    };

    registry
        .iter()
        .enumerate()
        .map(|(i, sender)| {
            let color = palette.get(i).unwrap_or(last);
            (sender, color.as_str())
        })
        .collect()
}
