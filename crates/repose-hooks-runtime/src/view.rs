use std::fmt;

use smallvec::SmallVec;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ViewKind {
    #[default]
    Empty,
    Text(String),
    Column,
}

/// Output of a render: a small tree of text nodes and containers that tests
/// and callers can query by id or class.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct View {
    pub id: Option<String>,
    pub classes: SmallVec<[String; 2]>,
    pub kind: ViewKind,
    pub children: Vec<View>,
}

impl View {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn text(text: impl fmt::Display) -> Self {
        Self {
            kind: ViewKind::Text(text.to_string()),
            ..Self::default()
        }
    }

    pub fn column(children: impl IntoIterator<Item = View>) -> Self {
        Self {
            kind: ViewKind::Column,
            children: children.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Depth-first search by id; `"#name"` and `"name"` are equivalent.
    pub fn find(&self, id: &str) -> Option<&View> {
        let id = id.strip_prefix('#').unwrap_or(id);
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Every node carrying `class`, in document order.
    pub fn find_all_by_class(&self, class: &str) -> Vec<&View> {
        let class = class.strip_prefix('.').unwrap_or(class);
        let mut out = Vec::new();
        self.collect_class(class, &mut out);
        out
    }

    fn collect_class<'a>(&'a self, class: &str, out: &mut Vec<&'a View>) {
        if self.has_class(class) {
            out.push(self);
        }
        for c in &self.children {
            c.collect_class(class, out);
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut s = String::new();
        self.push_text(&mut s);
        s
    }

    fn push_text(&self, out: &mut String) {
        if let ViewKind::Text(t) = &self.kind {
            out.push_str(t);
        }
        for c in &self.children {
            c.push_text(out);
        }
    }
}
