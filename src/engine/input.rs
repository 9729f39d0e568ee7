use crate::engine::config::Config;
use crate::engine::store::{DefaultStore, MemoryStore};
use crate::game::input::{ActionEvent, GameplayAction};
use crate::game::OffsetType;
use std::collections::HashSet;
use std::mem::swap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: String,
    pub action: GameplayAction,
}

pub type KeyBindingStore = MemoryStore<KeyBinding>;

impl KeyBinding {
    pub fn new(key: &str, action: GameplayAction) -> Self {
        Self {
            key: normalize_key(key),
            action,
        }
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_uppercase()
}

pub fn default_key_bindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("D", GameplayAction::LeftRim),
        KeyBinding::new("F", GameplayAction::LeftCentre),
        KeyBinding::new("J", GameplayAction::RightCentre),
        KeyBinding::new("K", GameplayAction::RightRim),
    ]
}

/// One binding per action, the `[keys]` table of the config overrides the defaults.
pub fn load_key_bindings(cfg: &Config) -> anyhow::Result<KeyBindingStore> {
    let mut store = MemoryStore::new(default_key_bindings(), |a: &KeyBinding, b| {
        a.action == b.action
    });
    for (action, key) in cfg.get_str_entries("keys") {
        let action = action.parse::<GameplayAction>()?;
        let key = normalize_key(&key);
        if key.is_empty() {
            anyhow::bail!("Empty key bound to {:?}", action);
        }
        store.write_matching(|x| x.action == action, |x| x.key = key);
    }
    Ok(store)
}

pub fn action_for_key(store: &impl DefaultStore<KeyBinding>, key: &str) -> Option<GameplayAction> {
    let key = normalize_key(key);
    store.get(|x| x.key == key).map(|x| x.action)
}

#[derive(Debug, Clone)]
pub struct RawKeyEvent {
    pub key: String,
    pub pressed: bool,
    pub time: OffsetType,
}

/// Buffers raw key events between frames.
#[derive(Default)]
pub struct FrameInputs {
    cur_temp_input: Vec<RawKeyEvent>,
    cur_frame_input: Vec<RawKeyEvent>,
    pressing: HashSet<String>,
}

impl FrameInputs {
    pub fn process(&mut self, key: &str, pressed: bool, time: OffsetType) {
        self.cur_temp_input.push(RawKeyEvent {
            key: normalize_key(key),
            pressed,
            time,
        });
    }

    /// Take the events buffered since the last frame as gameplay actions.
    ///
    /// A press of a key that is still held (key repeat) is dropped, unbound keys are ignored.
    pub fn swap_frame(
        &mut self,
        bindings: &impl DefaultStore<KeyBinding>,
    ) -> Vec<(ActionEvent, OffsetType)> {
        swap(&mut self.cur_frame_input, &mut self.cur_temp_input);
        self.cur_temp_input.clear();

        let mut actions = Vec::with_capacity(self.cur_frame_input.len());
        for event in self.cur_frame_input.drain(..) {
            if event.pressed {
                if !self.pressing.insert(event.key.clone()) {
                    continue;
                }
            } else if !self.pressing.remove(&event.key) {
                continue;
            }
            if let Some(action) = action_for_key(bindings, &event.key) {
                actions.push((
                    ActionEvent {
                        action,
                        pressed: event.pressed,
                    },
                    event.time,
                ));
            }
        }
        actions
    }

    pub fn is_pressing(&self, key: &str) -> bool {
        self.pressing.contains(&normalize_key(key))
    }
}
