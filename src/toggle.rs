use std::collections::HashMap;

use crate::page::{FontWeight, Page, TextDecoration, Visibility};

/// Suffix appended to a section id to name its link.
pub const LINK_SUFFIX: &str = "link";

pub fn link_id(section_id: &str) -> String {
    format!("{}{}", section_id, LINK_SUFFIX)
}

/// Collapsible page sections, each paired with a link that is emphasised
/// while its section is shown.
#[derive(Debug, Clone, Default)]
pub struct SectionToggle {
    sections: HashMap<String, Visibility>,
}

impl SectionToggle {
    pub fn new() -> SectionToggle {
        SectionToggle::default()
    }

    /// Registers every id as hidden.
    pub fn hidden<I, S>(ids: I) -> SectionToggle
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sections = ids
            .into_iter()
            .map(|id| (id.into(), Visibility::Hidden))
            .collect();
        SectionToggle { sections }
    }

    pub fn register(&mut self, section_id: impl Into<String>, initial: Visibility) {
        self.sections.insert(section_id.into(), initial);
    }

    /// Unregistered sections count as hidden.
    pub fn visibility(&self, section_id: &str) -> Visibility {
        self.sections
            .get(section_id)
            .copied()
            .unwrap_or(Visibility::Hidden)
    }

    pub fn toggle(&mut self, section_id: &str) -> Visibility {
        let state = self
            .sections
            .entry(section_id.to_string())
            .or_insert(Visibility::Hidden);
        *state = state.flipped();
        *state
    }

    pub fn link_style(&self, section_id: &str) -> (FontWeight, TextDecoration) {
        match self.visibility(section_id) {
            Visibility::Shown => (FontWeight::Bold, TextDecoration::Underline),
            Visibility::Hidden => (FontWeight::Normal, TextDecoration::Plain),
        }
    }

    /// Writes the section's visibility and its link's style onto `page`.
    pub fn apply(&self, section_id: &str, page: &mut Page) {
        page.element_mut(section_id).visibility = self.visibility(section_id);

        let (weight, decoration) = self.link_style(section_id);
        let link = page.element_mut(&link_id(section_id));
        link.font_weight = weight;
        link.text_decoration = decoration;
    }

    pub fn apply_all(&self, page: &mut Page) {
        for id in self.sections.keys() {
            self.apply(id, page);
        }
    }
}
