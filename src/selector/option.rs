#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
    pub parent_id: Option<String>,
}

impl SelectOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        let parent_id = parent_id.into();
        self.parent_id = (!parent_id.is_empty()).then_some(parent_id);
        self
    }
}

/// Case-insensitive substring match on the label. An empty query keeps every
/// option, in order.
pub fn filter_options<'a>(all: &'a [SelectOption], filter_text: &str) -> Vec<&'a SelectOption> {
    if filter_text.is_empty() {
        return all.iter().collect();
    }
    let q = filter_text.to_lowercase();
    all.iter()
        .filter(|o| o.label.to_lowercase().contains(&q))
        .collect()
}
