use crate::error::StoreError;
use crate::model::{
    Attendance, Book, BookCopy, BookReport, Chapter, LoanRecord, Member, TrainingEvent,
};
use crate::seed;
use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Keyed blob persistence consumed by [`Store`].
///
/// Each entity collection lives under one string key as a JSON array.
/// `read` returning `None` means the key has never been written; on the
/// collection keys that is the first-run signal that triggers seeding.
pub trait Storage {
    fn read(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn write(&mut self, key: &str, value: &Value) -> Result<(), StoreError>;
}

/// One JSON file per key inside a directory.
///
/// Writes go to a `.tmp` file first, sync, then rename: if the process
/// dies mid-write the previous value survives intact.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open or create the storage directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(FileStorage { dir })
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let contents = match fs::read_to_string(self.slot_path(key)) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        // A corrupt slot is treated as missing so the store can reseed it.
        match serde_json::from_str(&contents) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!("slot '{key}' holds invalid JSON ({err}), treating as missing");
                Ok(None)
            }
        }
    }

    fn write(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        let path = self.slot_path(key);
        let tmp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(value)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_data()?;
        drop(file);

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

/// In-memory storage, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, Value>,
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.slots.insert(key.to_string(), value.clone());
        Ok(())
    }
}

pub(crate) mod keys {
    pub const CHAPTERS: &str = "chapters";
    pub const MEMBERS: &str = "members";
    pub const EVENTS: &str = "events";
    pub const ATTENDANCES: &str = "attendances";
    pub const BOOKS: &str = "books";
    pub const COPIES: &str = "copies";
    pub const LOANS: &str = "loans";
    pub const REPORTS: &str = "reports";
    pub const SESSION: &str = "session";
}

/// The entity store: exclusive owner of every record collection.
///
/// All collections are held in memory and written through to the backing
/// [`Storage`] on every mutation; there is no partial-write mode. Derived
/// views take read-only borrows; mutations go through the handler methods
/// defined in the circulation, training, and directory modules, which
/// check their preconditions before touching any state.
pub struct Store {
    storage: Box<dyn Storage>,
    pub chapters: Vec<Chapter>,
    pub members: Vec<Member>,
    pub events: Vec<TrainingEvent>,
    pub attendances: Vec<Attendance>,
    pub books: Vec<Book>,
    pub copies: Vec<BookCopy>,
    pub loans: Vec<LoanRecord>,
    pub reports: Vec<BookReport>,
    /// Phone number of the logged-in member, persisted across reloads.
    pub session: Option<String>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("chapters", &self.chapters.len())
            .field("members", &self.members.len())
            .field("events", &self.events.len())
            .field("attendances", &self.attendances.len())
            .field("books", &self.books.len())
            .field("copies", &self.copies.len())
            .field("loans", &self.loans.len())
            .field("reports", &self.reports.len())
            .field("session", &self.session)
            .finish()
    }
}

impl Store {
    /// Open the store over the given storage, loading every collection.
    ///
    /// A collection whose key is absent (or unreadable) is populated from
    /// the seed data and written back, so the first run leaves a complete
    /// layout behind.
    ///
    /// # Errors
    ///
    /// Returns an error only if the storage itself fails; missing or
    /// corrupt slots are handled by reseeding.
    pub fn open(storage: impl Storage + 'static) -> Result<Self, StoreError> {
        let mut storage: Box<dyn Storage> = Box::new(storage);

        if storage.read(keys::MEMBERS)?.is_none() {
            info!("no member records found, seeding initial data");
        }

        let seeds = seed::initial();
        let chapters = load_or_seed(storage.as_mut(), keys::CHAPTERS, seeds.chapters)?;
        let members = load_or_seed(storage.as_mut(), keys::MEMBERS, seeds.members)?;
        let events = load_or_seed(storage.as_mut(), keys::EVENTS, seeds.events)?;
        let attendances = load_or_seed(storage.as_mut(), keys::ATTENDANCES, seeds.attendances)?;
        let books = load_or_seed(storage.as_mut(), keys::BOOKS, seeds.books)?;
        let copies = load_or_seed(storage.as_mut(), keys::COPIES, seeds.copies)?;
        let loans = load_or_seed(storage.as_mut(), keys::LOANS, seeds.loans)?;
        let reports = load_or_seed(storage.as_mut(), keys::REPORTS, seeds.reports)?;

        let session = match storage.read(keys::SESSION)? {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|err| {
                warn!("session slot is unreadable ({err}), clearing");
                None
            }),
            None => None,
        };

        Ok(Store {
            storage,
            chapters,
            members,
            events,
            attendances,
            books,
            copies,
            loans,
            reports,
            session,
        })
    }

    pub fn chapter_name(&self, chapter_id: &str) -> Option<&str> {
        self.chapters
            .iter()
            .find(|c| c.chapter_id == chapter_id)
            .map(|c| c.name.as_str())
    }

    pub fn member(&self, phone: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.phone == phone)
    }

    pub fn book(&self, book_id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.book_id == book_id)
    }

    pub fn event(&self, event_id: &str) -> Option<&TrainingEvent> {
        self.events.iter().find(|e| e.event_id == event_id)
    }

    pub(crate) fn save_chapters(&mut self) -> Result<(), StoreError> {
        persist(self.storage.as_mut(), keys::CHAPTERS, &self.chapters)
    }

    pub(crate) fn save_members(&mut self) -> Result<(), StoreError> {
        persist(self.storage.as_mut(), keys::MEMBERS, &self.members)
    }

    pub(crate) fn save_events(&mut self) -> Result<(), StoreError> {
        persist(self.storage.as_mut(), keys::EVENTS, &self.events)
    }

    pub(crate) fn save_attendances(&mut self) -> Result<(), StoreError> {
        persist(self.storage.as_mut(), keys::ATTENDANCES, &self.attendances)
    }

    pub(crate) fn save_books(&mut self) -> Result<(), StoreError> {
        persist(self.storage.as_mut(), keys::BOOKS, &self.books)
    }

    pub(crate) fn save_copies(&mut self) -> Result<(), StoreError> {
        persist(self.storage.as_mut(), keys::COPIES, &self.copies)
    }

    pub(crate) fn save_loans(&mut self) -> Result<(), StoreError> {
        persist(self.storage.as_mut(), keys::LOANS, &self.loans)
    }

    pub(crate) fn save_reports(&mut self) -> Result<(), StoreError> {
        persist(self.storage.as_mut(), keys::REPORTS, &self.reports)
    }

    pub(crate) fn save_session(&mut self) -> Result<(), StoreError> {
        let value = serde_json::to_value(&self.session)?;
        self.storage.write(keys::SESSION, &value)
    }

    /// Next registration number for a new copy: one past the current
    /// numeric maximum, zero-padded to six digits.
    pub(crate) fn next_registration_number(&self) -> u32 {
        self.copies
            .iter()
            .filter_map(|c| c.registration_number.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// Smallest `{prefix}{n}` not already taken. Records are never renumbered,
/// so scanning from 1 stays cheap at this data size.
pub(crate) fn fresh_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    let mut n: u64 = 1;
    loop {
        let candidate = format!("{prefix}{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn load_or_seed<T: Serialize + DeserializeOwned>(
    storage: &mut dyn Storage,
    key: &str,
    seed: Vec<T>,
) -> Result<Vec<T>, StoreError> {
    if let Some(value) = storage.read(key)? {
        match serde_json::from_value(value) {
            Ok(rows) => return Ok(rows),
            Err(err) => warn!("slot '{key}' does not decode ({err}), reseeding"),
        }
    }
    persist(storage, key, &seed)?;
    Ok(seed)
}

fn persist<T: Serialize>(
    storage: &mut dyn Storage,
    key: &str,
    rows: &[T],
) -> Result<(), StoreError> {
    let value = serde_json::to_value(rows)?;
    storage.write(key, &value)?;
    debug!("slot '{key}' written ({} rows)", rows.len());
    Ok(())
}
