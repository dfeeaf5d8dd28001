//! Section index of the wizard

/// Current section position, always within `[0, section_count - 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardState {
    index: usize,
    section_count: usize,
}

impl WizardState {
    /// Start at the first section. `section_count` must be at least one.
    pub fn new(section_count: usize) -> Self {
        Self {
            index: 0,
            section_count: section_count.max(1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn section_count(&self) -> usize {
        self.section_count
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.section_count
    }

    /// Step forward one section. Returns false on the last section.
    pub(crate) fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Step back one section. Returns false on the first section.
    pub(crate) fn retreat(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.index -= 1;
        true
    }
}
