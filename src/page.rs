//! A DOM-free model of the elements the form guards and section toggles
//! touch. Each element is addressed by id and carries only the properties
//! the guards read or write. The HTML templates in `routes` render from it.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Shown,
    Hidden,
}

impl Visibility {
    pub fn flipped(self) -> Visibility {
        match self {
            Visibility::Shown => Visibility::Hidden,
            Visibility::Hidden => Visibility::Shown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
}

impl Color {
    fn as_css(&self) -> &'static str {
        match self {
            Color::Red => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDecoration {
    #[default]
    Plain,
    Underline,
}

/// Inner content of an element. Text is escaped on render, markup is not.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Content {
    #[default]
    Empty,
    Text(String),
    Markup(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub value: String,
    pub content: Content,
    pub visibility: Visibility,
    pub color: Option<Color>,
    pub font_weight: FontWeight,
    pub text_decoration: TextDecoration,
}

impl Element {
    pub fn is_hidden(&self) -> bool {
        self.visibility == Visibility::Hidden
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = Content::Text(text.into());
    }

    pub fn set_markup(&mut self, markup: impl Into<String>) {
        self.content = Content::Markup(markup.into());
    }

    /// Value of the `style` attribute for this element's state. Properties
    /// left at their defaults are omitted.
    pub fn style_attribute(&self) -> String {
        let mut rules = Vec::new();
        if self.is_hidden() {
            rules.push("display: none".to_string());
        }
        if let Some(color) = self.color {
            rules.push(format!("color: {}", color.as_css()));
        }
        if self.font_weight == FontWeight::Bold {
            rules.push("font-weight: bold".to_string());
        }
        if self.text_decoration == TextDecoration::Underline {
            rules.push("text-decoration: underline".to_string());
        }
        rules.join("; ")
    }

    pub fn inner_html(&self) -> String {
        match &self.content {
            Content::Empty => String::new(),
            Content::Text(text) => htmlescape::encode_minimal(text),
            Content::Markup(markup) => markup.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    elements: HashMap<String, Element>,
}

impl Page {
    pub fn new() -> Page {
        Page::default()
    }

    /// Sets the `value` of an input element, creating it if needed.
    pub fn with_value(mut self, id: &str, value: impl Into<String>) -> Page {
        self.element_mut(id).value = value.into();
        self
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Returns the element with `id`, inserting a default one when the page
    /// does not have it yet.
    pub fn element_mut(&mut self, id: &str) -> &mut Element {
        self.elements.entry(id.to_string()).or_default()
    }

    /// Current input value; a missing element reads as empty.
    pub fn value(&self, id: &str) -> &str {
        self.elements
            .get(id)
            .map(|e| e.value.as_str())
            .unwrap_or_default()
    }

    pub fn style_attribute(&self, id: &str) -> String {
        self.elements
            .get(id)
            .map(Element::style_attribute)
            .unwrap_or_default()
    }

    pub fn inner_html(&self, id: &str) -> String {
        self.elements
            .get(id)
            .map(Element::inner_html)
            .unwrap_or_default()
    }
}
