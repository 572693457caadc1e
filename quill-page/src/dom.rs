use std::collections::HashMap;

/// Access the controller needs to the rendered page.
///
/// The page itself is an external collaborator: a host embeds the controller
/// by adapting its document behind this trait. Writes to an element that is
/// not present are silent no-ops, mirroring how lenient DOM bridges treat
/// unexpected document state; reads return `None`.
pub trait Document {
    /// All element identifiers present, in document order.
    fn element_ids(&self) -> Vec<String>;

    fn contains(&self, id: &str) -> bool;

    /// Plain text content of an element.
    fn text(&self, id: &str) -> Option<String>;
    fn set_text(&mut self, id: &str, text: &str);

    /// Inner markup of an element.
    fn markup(&self, id: &str) -> Option<String>;
    fn set_markup(&mut self, id: &str, markup: &str);

    /// Attribute access, used to rebind the shared submit control's `name`.
    fn attr(&self, id: &str, name: &str) -> Option<String>;
    fn set_attr(&mut self, id: &str, name: &str, value: &str);

    /// Draft value of an input element.
    fn value(&self, id: &str) -> Option<String>;
    fn set_value(&mut self, id: &str, value: &str);

    fn is_visible(&self, id: &str) -> bool;
    fn set_visible(&mut self, id: &str, visible: bool);
}

#[derive(Debug, Clone)]
struct MemoryElement {
    text: String,
    markup: String,
    value: String,
    attrs: HashMap<String, String>,
    visible: bool,
}

impl Default for MemoryElement {
    fn default() -> Self {
        Self {
            text: String::new(),
            markup: String::new(),
            value: String::new(),
            attrs: HashMap::new(),
            visible: true,
        }
    }
}

/// Id-indexed in-memory document.
///
/// Backs the test suite, and fits hosts that assemble a page model before
/// flushing it to a real DOM. Text and markup are stored independently;
/// `insert_text` seeds both with the same string, which is what a freshly
/// templated element looks like.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    order: Vec<String>,
    elements: HashMap<String, MemoryElement>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty, visible element.
    pub fn insert(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.elements.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.elements.insert(id, MemoryElement::default());
    }

    /// Add a visible element seeded with the given content.
    pub fn insert_text(&mut self, id: impl Into<String>, content: &str) {
        let id = id.into();
        self.insert(id.clone());
        let element = self.elements.get_mut(&id).unwrap();
        element.text = content.to_string();
        element.markup = content.to_string();
    }
}

impl Document for MemoryDocument {
    fn element_ids(&self) -> Vec<String> {
        self.order.clone()
    }

    fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn text(&self, id: &str) -> Option<String> {
        self.elements.get(id).map(|e| e.text.clone())
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.text = text.to_string();
        }
    }

    fn markup(&self, id: &str) -> Option<String> {
        self.elements.get(id).map(|e| e.markup.clone())
    }

    fn set_markup(&mut self, id: &str, markup: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.markup = markup.to_string();
        }
    }

    fn attr(&self, id: &str, name: &str) -> Option<String> {
        self.elements.get(id).and_then(|e| e.attrs.get(name).cloned())
    }

    fn set_attr(&mut self, id: &str, name: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.attrs.insert(name.to_string(), value.to_string());
        }
    }

    fn value(&self, id: &str) -> Option<String> {
        self.elements.get(id).map(|e| e.value.clone())
    }

    fn set_value(&mut self, id: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.value = value.to_string();
        }
    }

    fn is_visible(&self, id: &str) -> bool {
        self.elements.get(id).map(|e| e.visible).unwrap_or(false)
    }

    fn set_visible(&mut self, id: &str, visible: bool) {
        if let Some(element) = self.elements.get_mut(id) {
            element.visible = visible;
        }
    }
}
