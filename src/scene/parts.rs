use std::collections::HashMap;

use super::ModelParts;

/// In-memory table of named model parts and their visibility.
#[derive(Debug, Clone, Default)]
pub struct PartTable {
    parts: HashMap<String, bool>,
}

impl PartTable {
    /// Creates a table where every listed part is visible.
    #[must_use]
    pub fn with_parts<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: names.into_iter().map(|n| (n.into(), true)).collect(),
        }
    }

    /// Returns the visibility of a part, or `None` if it does not exist.
    #[must_use]
    pub fn is_visible(&self, name: &str) -> Option<bool> {
        self.parts.get(name).copied()
    }
}

impl ModelParts for PartTable {
    fn set_part_visibility(&mut self, name: &str, visible: bool) -> usize {
        match self.parts.get_mut(name) {
            Some(flag) => {
                *flag = visible;
                1
            }
            None => 0,
        }
    }
}
