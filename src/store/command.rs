use serde::{Deserialize, Serialize};

/// A state change request against the store. These are the only two
/// mutations the store accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Command {
    #[serde(rename = "vote")]
    Vote {
        #[serde(rename = "subpollId")]
        subpoll_id: String,
        #[serde(rename = "optionId")]
        option_id: String,
    },
    #[serde(rename = "toggle_open")]
    ToggleOpen {
        #[serde(rename = "subpollId")]
        subpoll_id: String,
    },
}

impl Command {
    pub fn vote(subpoll_id: impl Into<String>, option_id: impl Into<String>) -> Self {
        Command::Vote {
            subpoll_id: subpoll_id.into(),
            option_id: option_id.into(),
        }
    }

    pub fn toggle_open(subpoll_id: impl Into<String>) -> Self {
        Command::ToggleOpen {
            subpoll_id: subpoll_id.into(),
        }
    }

    pub fn subpoll_id(&self) -> &str {
        match self {
            Command::Vote { subpoll_id, .. } => subpoll_id,
            Command::ToggleOpen { subpoll_id } => subpoll_id,
        }
    }
}

/// What changed as the result of a successfully applied [`Command`].
/// Consumers bound to the named field re-render from this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    Voted {
        #[serde(rename = "subpollId")]
        subpoll_id: String,
        #[serde(rename = "optionId")]
        option_id: String,
        previous: Option<String>,
    },
    OpenToggled {
        #[serde(rename = "subpollId")]
        subpoll_id: String,
        #[serde(rename = "isOpen")]
        is_open: bool,
    },
}

impl StoreEvent {
    pub fn subpoll_id(&self) -> &str {
        match self {
            StoreEvent::Voted { subpoll_id, .. } => subpoll_id,
            StoreEvent::OpenToggled { subpoll_id, .. } => subpoll_id,
        }
    }
}
