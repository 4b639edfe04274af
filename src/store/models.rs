use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::error::StoreError;

/// One selectable choice within a SubPoll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: String,
    pub text: String,
}

impl PollOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A single voting question with its own option set and open/closed flag.
///
/// Fields are private so that the only runtime writes go through
/// [`PollStore`](super::PollStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubPoll {
    id: String,
    title: String,
    description: String,
    voted: Option<String>,
    is_open: bool,
    options: BTreeMap<String, PollOption>,
}

impl SubPoll {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        is_open: bool,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            voted: None,
            is_open,
            options: BTreeMap::new(),
        }
    }

    /// Adds an option while the poll is being built. Option ids are scoped to
    /// this SubPoll and must not repeat.
    pub fn add_option(
        &mut self,
        id: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<&PollOption, StoreError> {
        let option = PollOption::new(id, text);
        if self.options.contains_key(&option.id) {
            return Err(StoreError::DuplicateOption {
                subpoll_id: self.id.clone(),
                option_id: option.id,
            });
        }

        let key = option.id.clone();
        Ok(self.options.entry(key).or_insert(option))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The option id recorded for this SubPoll, if any. May name an option
    /// that does not exist when the store runs unchecked.
    pub fn voted(&self) -> Option<&str> {
        self.voted.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn options(&self) -> &BTreeMap<String, PollOption> {
        &self.options
    }

    pub fn option(&self, option_id: &str) -> Option<&PollOption> {
        self.options.get(option_id)
    }

    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.contains_key(option_id)
    }

    pub(crate) fn set_voted(&mut self, option_id: String) -> Option<String> {
        self.voted.replace(option_id)
    }

    pub(crate) fn flip_open(&mut self) -> bool {
        self.is_open = !self.is_open;
        self.is_open
    }
}
