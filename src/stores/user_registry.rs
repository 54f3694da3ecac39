use crate::core::error::RegistryError;
use crate::models::user::{default_users, UserRecord};
use crate::validation::payload::{NewUser, UserCommand, UserPatch};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Largest id a record may hold; the counter must always fit one past it
pub const MAX_USER_ID: u32 = u32::MAX - 1;

#[derive(Debug)]
struct Slot {
    /// Insertion sequence, used to list records in the order they were added
    seq: u64,
    record: UserRecord,
}

/// Result of a successful registry mutation
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub message: String,
    pub record: UserRecord,
    /// State of the record before an update
    pub previous: Option<UserRecord>,
    /// Registry contents after the mutation
    pub all_users: Vec<UserRecord>,
}

/// In-memory user registry
///
/// Lives for the lifetime of the process and is rebuilt from its seed on
/// every start. Separate processes hold separate registries.
pub struct UserRegistry {
    users: DashMap<u32, Slot>,
    next_id: AtomicU32,
    next_seq: AtomicU64,
}

impl UserRegistry {
    /// Create a registry holding `seed` in order. Later duplicates of an id are skipped.
    pub fn new(seed: Vec<UserRecord>) -> Self {
        let registry = Self {
            users: DashMap::with_capacity(seed.len()),
            next_id: AtomicU32::new(1),
            next_seq: AtomicU64::new(0),
        };

        for record in seed {
            let id = record.id;
            if id == 0 || id > MAX_USER_ID {
                tracing::warn!(user_id = id, "Skipping seed record with out-of-range id");
                continue;
            }
            if let Entry::Vacant(slot) = registry.users.entry(id) {
                slot.insert(Slot {
                    seq: registry.next_seq.fetch_add(1, Ordering::Relaxed),
                    record,
                });
                registry.bump_next_id(id);
            } else {
                tracing::warn!(user_id = id, "Skipping duplicate seed record");
            }
        }

        registry
    }

    pub fn with_defaults() -> Self {
        Self::new(default_users())
    }

    /// All records in insertion order
    pub fn list(&self) -> Vec<UserRecord> {
        let mut entries: Vec<(u64, UserRecord)> = self
            .users
            .iter()
            .map(|entry| (entry.value().seq, entry.value().record.clone()))
            .collect();

        entries.sort_unstable_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, record)| record).collect()
    }

    pub fn get(&self, id: u32) -> Option<UserRecord> {
        self.users.get(&id).map(|slot| slot.record.clone())
    }

    /// Legacy lookup by username, see [`UserRecord::username`]
    pub fn find_by_username(&self, username: &str) -> Option<UserRecord> {
        let wanted = username.to_lowercase();
        self.list().into_iter().find(|user| user.username() == wanted)
    }

    pub fn apply(&self, command: UserCommand) -> Result<ActionOutcome, RegistryError> {
        match command {
            UserCommand::Add(new_user) => self.add(new_user),
            UserCommand::Update(patch) => self.update(patch),
            UserCommand::Delete { id } => self.delete(id),
        }
    }

    fn add(&self, new_user: NewUser) -> Result<ActionOutcome, RegistryError> {
        let id = match new_user.id {
            Some(id) if id > MAX_USER_ID => {
                return Err(RegistryError::Validation(format!(
                    "User ID must be between 1 and {}",
                    MAX_USER_ID
                )));
            }
            Some(id) => id,
            None => self.allocate_id()?,
        };

        let record = UserRecord {
            id,
            name: new_user.name,
            status: new_user.status,
            device_model: new_user.device_model,
        };

        // Shard lock must be released before listing
        match self.users.entry(id) {
            Entry::Occupied(_) => {
                return Err(RegistryError::Validation(format!(
                    "User with ID {} already exists",
                    id
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(Slot {
                    seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                    record: record.clone(),
                });
            }
        }
        self.bump_next_id(id);

        Ok(ActionOutcome {
            message: format!("User '{}' added successfully", record.name),
            record,
            previous: None,
            all_users: self.list(),
        })
    }

    fn update(&self, patch: UserPatch) -> Result<ActionOutcome, RegistryError> {
        let (record, previous) = {
            let mut slot = self
                .users
                .get_mut(&patch.id)
                .ok_or(RegistryError::NotFound(patch.id))?;

            let previous = slot.record.clone();

            if let Some(name) = patch.name {
                slot.record.name = name;
            }
            if let Some(status) = patch.status {
                slot.record.status = status;
            }
            if let Some(device_model) = patch.device_model {
                slot.record.device_model = device_model;
            }

            (slot.record.clone(), previous)
        };

        Ok(ActionOutcome {
            message: format!("User '{}' updated successfully", record.name),
            record,
            previous: Some(previous),
            all_users: self.list(),
        })
    }

    fn delete(&self, id: u32) -> Result<ActionOutcome, RegistryError> {
        let (_, slot) = self.users.remove(&id).ok_or(RegistryError::NotFound(id))?;

        Ok(ActionOutcome {
            message: format!("User '{}' deleted successfully", slot.record.name),
            record: slot.record,
            previous: None,
            all_users: self.list(),
        })
    }

    /// Hand out the next generated id, refusing once the id space is used up
    fn allocate_id(&self) -> Result<u32, RegistryError> {
        self.next_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |next| {
                if next > MAX_USER_ID {
                    None
                } else {
                    next.checked_add(1)
                }
            })
            .map_err(|_| RegistryError::Validation("No user IDs left to assign".to_string()))
    }

    /// Keep the id counter ahead of every id ever stored. `id` is at most `MAX_USER_ID`.
    fn bump_next_id(&self, id: u32) {
        self.next_id.fetch_max(id + 1, Ordering::Relaxed);
    }

    /// Id the next add without an explicit id will receive
    pub fn next_id(&self) -> u32 {
        self.next_id.load(Ordering::Relaxed)
    }

    /// False once every id up to `MAX_USER_ID` has been handed out
    pub fn can_assign_ids(&self) -> bool {
        self.next_id() <= MAX_USER_ID
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
