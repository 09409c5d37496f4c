//! Mutually exclusive option highlighting (last click wins).

/// Change to apply to one option element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionMark {
    pub id: String,
    pub active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct OptionGroup {
    ids: Vec<String>,
    active: Option<usize>,
}

impl OptionGroup {
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids, active: None }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.ids[i].as_str())
    }

    /// Select `id`. Returns the marks to apply: every option cleared, then
    /// `id` marked. Unknown ids select nothing and return no marks.
    pub fn select(&mut self, id: &str) -> Vec<OptionMark> {
        let Some(idx) = self.ids.iter().position(|o| o == id) else {
            return Vec::new();
        };
        self.active = Some(idx);
        self.ids
            .iter()
            .map(|o| OptionMark {
                id: o.clone(),
                active: false,
            })
            .chain(std::iter::once(OptionMark {
                id: id.to_string(),
                active: true,
            }))
            .collect()
    }
}
