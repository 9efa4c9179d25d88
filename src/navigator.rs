use crate::dataset::{Creature, Dex};
use crate::error::DexError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Current selection plus the ordered list of names the picker is showing.
///
/// The cursor is always derived from `current` and `visible`; it is `None`
/// when nothing is selected or the selected name is filtered out.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    visible: Vec<String>,
    current: Option<String>,
    cursor: Option<usize>,
}

impl Navigator {
    pub fn new(visible: Vec<String>) -> Self {
        Self {
            visible,
            current: None,
            cursor: None,
        }
    }

    pub fn visible(&self) -> &[String] {
        &self.visible
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn set_visible(&mut self, visible: Vec<String>) {
        self.visible = visible;
        self.cursor = self.position_of_current();
    }

    pub fn select<'d>(&mut self, dex: &'d Dex, key: &str) -> Result<&'d Creature, DexError> {
        let record = dex.lookup(key)?;
        self.current = Some(record.name.clone());
        self.cursor = self.position_of_current();
        Ok(record)
    }

    /// Moves one entry through the visible list. Stepping past either end
    /// keeps the current selection.
    pub fn step<'d>(&mut self, dex: &'d Dex, direction: Direction) -> Option<&'d Creature> {
        let target = match (self.cursor, direction) {
            (Some(idx), Direction::Forward) => idx.checked_add(1),
            (Some(idx), Direction::Backward) => idx.checked_sub(1),
            (None, Direction::Forward) => Some(0),
            (None, Direction::Backward) => None,
        };
        if let Some(idx) = target.filter(|idx| *idx < self.visible.len()) {
            let name = self.visible[idx].clone();
            if let Ok(record) = self.select(dex, &name) {
                return Some(record);
            }
        }
        self.current(dex).ok()
    }

    pub fn current<'d>(&self, dex: &'d Dex) -> Result<&'d Creature, DexError> {
        let name = self.current.as_deref().ok_or(DexError::NoSelection)?;
        dex.lookup(name)
    }

    fn position_of_current(&self) -> Option<usize> {
        let current = self.current.as_deref()?;
        self.visible.iter().position(|name| name == current)
    }
}
