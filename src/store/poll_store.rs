use std::collections::BTreeMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::StoreError;
use super::command::{Command, StoreEvent};
use super::models::SubPoll;

const SEED_OPTION_COUNT: usize = 4;

/// Whether `vote` checks that the option id exists in the target SubPoll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionCheck {
    /// Any option id is recorded, including ones the SubPoll does not have.
    #[default]
    Unchecked,
    /// Votes for an option the SubPoll does not have fail with
    /// [`StoreError::UnknownOption`].
    Strict,
}

/// In-memory container for every SubPoll. The set of SubPolls and their
/// options is fixed at construction; only `voted` and `isOpen` change
/// afterwards, through [`PollStore::vote`] and [`PollStore::toggle_open`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollStore {
    subpolls: BTreeMap<String, SubPoll>,
    #[serde(skip)]
    option_check: OptionCheck,
}

impl PollStore {
    /// Builds a store from fully constructed SubPolls. SubPoll ids must be
    /// unique.
    pub fn from_subpolls(
        subpolls: impl IntoIterator<Item = SubPoll>,
    ) -> Result<Self, StoreError> {
        let mut map = BTreeMap::new();
        for subpoll in subpolls {
            if map.contains_key(subpoll.id()) {
                return Err(StoreError::DuplicateSubPoll(subpoll.id().to_string()));
            }
            map.insert(subpoll.id().to_string(), subpoll);
        }

        Ok(Self {
            subpolls: map,
            option_check: OptionCheck::default(),
        })
    }

    /// The startup state: SubPoll "1" (open) and SubPoll "2" (closed), each
    /// with options "1" to "4" and no vote cast.
    pub fn seeded() -> Self {
        let seed = [("1", true), ("2", false)].into_iter().map(|(id, is_open)| {
            let mut subpoll = SubPoll::new(
                id,
                format!("SubPoll {}", id),
                format!("Description {}", id),
                is_open,
            );
            for n in 1..=SEED_OPTION_COUNT {
                // Seed option ids are distinct, so this cannot collide
                let _ = subpoll.add_option(n.to_string(), format!("Option{}", n));
            }
            (id.to_string(), subpoll)
        });

        Self {
            subpolls: seed.collect(),
            option_check: OptionCheck::default(),
        }
    }

    pub fn with_option_check(mut self, option_check: OptionCheck) -> Self {
        self.option_check = option_check;
        self
    }

    pub fn option_check(&self) -> OptionCheck {
        self.option_check
    }

    pub fn subpolls(&self) -> &BTreeMap<String, SubPoll> {
        &self.subpolls
    }

    pub fn subpoll(&self, subpoll_id: &str) -> Result<&SubPoll, StoreError> {
        self.subpolls
            .get(subpoll_id)
            .ok_or_else(|| StoreError::UnknownSubPoll(subpoll_id.to_string()))
    }

    fn subpoll_mut(&mut self, subpoll_id: &str) -> Result<&mut SubPoll, StoreError> {
        self.subpolls
            .get_mut(subpoll_id)
            .ok_or_else(|| StoreError::UnknownSubPoll(subpoll_id.to_string()))
    }

    /// Records `option_id` as the vote for `subpoll_id`, replacing any earlier
    /// vote. `isOpen` is not consulted here.
    pub fn vote(&mut self, subpoll_id: &str, option_id: &str) -> Result<StoreEvent, StoreError> {
        let option_check = self.option_check;
        let subpoll = self.subpoll_mut(subpoll_id)?;

        if !subpoll.has_option(option_id) {
            match option_check {
                OptionCheck::Strict => {
                    return Err(StoreError::UnknownOption {
                        subpoll_id: subpoll_id.to_string(),
                        option_id: option_id.to_string(),
                    });
                }
                OptionCheck::Unchecked => {
                    warn!("Recording vote for unknown option {} on subpoll {}", option_id, subpoll_id);
                }
            }
        }

        let previous = subpoll.set_voted(option_id.to_string());
        debug!("Subpoll {} voted {} (previous: {:?})", subpoll_id, option_id, previous);

        Ok(StoreEvent::Voted {
            subpoll_id: subpoll_id.to_string(),
            option_id: option_id.to_string(),
            previous,
        })
    }

    /// Flips `isOpen` on `subpoll_id`. Applying it twice restores the
    /// original value.
    pub fn toggle_open(&mut self, subpoll_id: &str) -> Result<StoreEvent, StoreError> {
        let is_open = self.subpoll_mut(subpoll_id)?.flip_open();
        debug!("Subpoll {} is now {}", subpoll_id, if is_open { "open" } else { "closed" });

        Ok(StoreEvent::OpenToggled {
            subpoll_id: subpoll_id.to_string(),
            is_open,
        })
    }

    pub fn apply(&mut self, command: &Command) -> Result<StoreEvent, StoreError> {
        match command {
            Command::Vote { subpoll_id, option_id } => self.vote(subpoll_id, option_id),
            Command::ToggleOpen { subpoll_id } => self.toggle_open(subpoll_id),
        }
    }
}

impl Default for PollStore {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn option_ids(store: &PollStore, subpoll_id: &str) -> BTreeSet<String> {
        store.subpoll(subpoll_id).unwrap().options().keys().cloned().collect()
    }

    #[test]
    fn test_seeded_initial_state() {
        let store = PollStore::seeded();
        assert_eq!(store.subpolls().len(), 2);

        let first = store.subpoll("1").unwrap();
        assert_eq!(first.title(), "SubPoll 1");
        assert_eq!(first.description(), "Description 1");
        assert_eq!(first.voted(), None);
        assert!(first.is_open());

        let second = store.subpoll("2").unwrap();
        assert_eq!(second.voted(), None);
        assert!(!second.is_open());

        let expected: BTreeSet<String> = ["1", "2", "3", "4"].iter().map(|s| s.to_string()).collect();
        assert_eq!(option_ids(&store, "1"), expected);
        assert_eq!(option_ids(&store, "2"), expected);
        assert_eq!(first.option("3").unwrap().text, "Option3");
        assert_eq!(store.option_check(), OptionCheck::Unchecked);
    }

    #[test_log::test]
    fn test_vote_sets_only_target_field() {
        let mut store = PollStore::seeded();
        let before = store.clone();

        let event = store.vote("1", "3").unwrap();
        assert_eq!(
            event,
            StoreEvent::Voted {
                subpoll_id: "1".to_string(),
                option_id: "3".to_string(),
                previous: None,
            }
        );

        assert_eq!(store.subpoll("1").unwrap().voted(), Some("3"));
        assert_eq!(store.subpoll("2").unwrap().voted(), None);

        // Everything but `voted` on subpoll 1 is untouched
        let mut expected = before;
        expected.subpolls.get_mut("1").unwrap().set_voted("3".to_string());
        assert_eq!(store, expected);
    }

    #[test]
    fn test_vote_overwrites_previous_vote() {
        let mut store = PollStore::seeded();
        store.vote("1", "1").unwrap();

        let event = store.vote("1", "4").unwrap();
        assert!(matches!(
            event,
            StoreEvent::Voted { ref previous, .. } if previous.as_deref() == Some("1")
        ));
        assert_eq!(store.subpoll("1").unwrap().voted(), Some("4"));
    }

    #[test]
    fn test_vote_ignores_open_flag() {
        let mut store = PollStore::seeded();
        assert!(!store.subpoll("2").unwrap().is_open());

        store.vote("2", "2").unwrap();
        assert_eq!(store.subpoll("2").unwrap().voted(), Some("2"));
    }

    #[test_log::test]
    fn test_vote_unknown_option_recorded_when_unchecked() {
        let mut store = PollStore::seeded();

        store.vote("1", "99").unwrap();
        assert_eq!(store.subpoll("1").unwrap().voted(), Some("99"));
        assert!(!store.subpoll("1").unwrap().has_option("99"));
    }

    #[test]
    fn test_vote_unknown_option_rejected_when_strict() {
        let mut store = PollStore::seeded().with_option_check(OptionCheck::Strict);
        let before = store.clone();

        let err = store.vote("1", "99").unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnknownOption { ref subpoll_id, ref option_id }
                if subpoll_id == "1" && option_id == "99"
        ));
        assert_eq!(store, before);

        // Known options still go through
        assert!(store.vote("1", "2").is_ok());
    }

    #[test]
    fn test_toggle_open_is_its_own_inverse() {
        let mut store = PollStore::seeded();

        for id in ["1", "2"] {
            let original = store.subpoll(id).unwrap().is_open();

            let event = store.toggle_open(id).unwrap();
            assert_eq!(
                event,
                StoreEvent::OpenToggled { subpoll_id: id.to_string(), is_open: !original }
            );
            assert_eq!(store.subpoll(id).unwrap().is_open(), !original);

            store.toggle_open(id).unwrap();
            assert_eq!(store.subpoll(id).unwrap().is_open(), original);
        }
    }

    #[test]
    fn test_toggle_closed_subpoll_twice() {
        let mut store = PollStore::seeded();

        store.toggle_open("2").unwrap();
        assert!(store.subpoll("2").unwrap().is_open());

        store.toggle_open("2").unwrap();
        assert!(!store.subpoll("2").unwrap().is_open());
    }

    #[test]
    fn test_unknown_subpoll_fails_without_mutation() {
        let mut store = PollStore::seeded();
        let before = store.clone();

        let err = store.vote("42", "1").unwrap_err();
        assert!(matches!(err, StoreError::UnknownSubPoll(ref id) if id == "42"));

        let err = store.toggle_open("42").unwrap_err();
        assert!(matches!(err, StoreError::UnknownSubPoll(ref id) if id == "42"));

        assert_eq!(store, before);
    }

    #[test]
    fn test_apply_dispatches_commands() {
        let mut store = PollStore::seeded();

        let event = store.apply(&Command::vote("2", "1")).unwrap();
        assert_eq!(event.subpoll_id(), "2");
        assert_eq!(store.subpoll("2").unwrap().voted(), Some("1"));

        let event = store.apply(&Command::toggle_open("1")).unwrap();
        assert_eq!(event.subpoll_id(), "1");
        assert!(!store.subpoll("1").unwrap().is_open());

        assert!(store.apply(&Command::toggle_open("3")).is_err());
    }

    #[test]
    fn test_from_subpolls_rejects_duplicate_ids() {
        let a = SubPoll::new("x", "A", "", true);
        let b = SubPoll::new("x", "B", "", false);

        let err = PollStore::from_subpolls(vec![a, b]).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSubPoll(ref id) if id == "x"));
    }

    #[test]
    fn test_from_subpolls_builds_store() {
        let mut lunch = SubPoll::new("lunch", "Lunch", "Where to eat", true);
        lunch.add_option("pizza", "Pizza").unwrap();
        lunch.add_option("sushi", "Sushi").unwrap();

        let mut store = PollStore::from_subpolls(vec![lunch]).unwrap();
        store.vote("lunch", "sushi").unwrap();

        assert_eq!(store.subpoll("lunch").unwrap().voted(), Some("sushi"));
    }

    #[test]
    fn test_snapshot_shape() {
        let mut store = PollStore::seeded();
        store.vote("1", "3").unwrap();

        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["subpolls"]["1"]["voted"], "3");
        assert!(json["subpolls"]["2"]["voted"].is_null());
        assert_eq!(json["subpolls"]["2"]["isOpen"], false);
        assert_eq!(json["subpolls"]["1"]["options"]["4"]["id"], "4");
        assert!(json.get("option_check").is_none());
    }
}
