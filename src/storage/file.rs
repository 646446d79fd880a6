//! JSON-file-based storage backend.
//!
//! Persists the whole order sequence as one `orders.json` file under a
//! configurable directory (default: `$XDG_DATA_HOME/changemoney-rs/`).

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::error::{ChangeMoneyError, Result};
use crate::models::{Order, OrderId, OrderStatus};

/// Application name used for the XDG data directory.
const APP_NAME: &str = "changemoney-rs";

/// File holding the persisted order sequence.
const ORDERS_FILE: &str = "orders.json";

/// Sentinel file used for cross-process file locking.
const LOCK_FILE: &str = "storage.lock";

/// File-backed store that persists the order sequence as JSON.
///
/// Every mutation is a read-modify-write of the whole array, made
/// atomic on disk by writing to a temp file and renaming. A missing
/// file reads as the empty sequence; clearing writes the literal `[]`.
///
/// # Concurrency
///
/// Thread safety within a single process is provided by an in-process
/// [`Mutex`]. Cross-process safety is achieved via an advisory file
/// lock on `storage.lock` (using [`std::fs::File::lock`] /
/// [`std::fs::File::lock_shared`]). This is the single-writer
/// serialization point: without it, two writers doing read-modify-write
/// would silently lose one of the updates.
///
/// # File layout
///
/// ```text
/// <dir>/
///   storage.lock          (cross-process lock sentinel)
///   orders.json
/// ```
#[derive(Debug)]
pub struct FileStore {
    /// Directory containing the order file and lock sentinel.
    dir: PathBuf,
    /// Mutex serializing concurrent in-process access.
    lock: Mutex<()>,
    /// Sentinel file for cross-process advisory locking.
    lock_file: fs::File,
}

impl FileStore {
    /// Creates a new file store rooted at the given directory.
    ///
    /// Creates the directory (and parents) if it does not exist. Also
    /// opens (or creates) the `storage.lock` sentinel file used for
    /// cross-process advisory locking.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the lock
    /// file cannot be opened.
    #[inline]
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).map_err(storage_io_error)?;
        let lock_file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(dir.join(LOCK_FILE))
            .map_err(storage_io_error)?;
        Ok(Self {
            dir,
            lock: Mutex::new(()),
            lock_file,
        })
    }

    /// Returns the default XDG-compliant data directory for this
    /// application.
    ///
    /// On Linux: `$XDG_DATA_HOME/changemoney-rs/` (typically
    /// `~/.local/share/changemoney-rs/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform data directory cannot be
    /// determined.
    #[inline]
    pub fn default_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|data_path| data_path.join(APP_NAME))
            .ok_or_else(|| {
                ChangeMoneyError::Storage("could not determine platform data directory".into())
            })
    }

    // ── Private helpers ─────────────────────────────────────────────

    /// Returns the full path for a given file name.
    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Acquires an in-process mutex guard and a shared (read) file
    /// lock, executes `op`, then releases the file lock.
    fn with_shared_lock<R, F: FnOnce() -> Result<R>>(&self, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        self.lock_file.lock_shared().map_err(storage_io_error)?;
        let result = op();
        // Only surface the unlock error when the operation succeeded;
        // otherwise the original error is more useful.
        if let Err(err) = self.lock_file.unlock()
            && result.is_ok()
        {
            return Err(storage_io_error(err));
        }
        result
    }

    /// Acquires an in-process mutex guard and an exclusive (write)
    /// file lock, executes `op`, then releases the file lock.
    fn with_exclusive_lock<R, F: FnOnce() -> Result<R>>(&self, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        self.lock_file.lock().map_err(storage_io_error)?;
        let result = op();
        if let Err(err) = self.lock_file.unlock()
            && result.is_ok()
        {
            return Err(storage_io_error(err));
        }
        result
    }

    /// Reads and deserializes the order file. Returns an empty `Vec`
    /// if the file does not exist yet; corrupt contents surface as a
    /// serialization error rather than an empty sequence.
    fn read_orders(&self) -> Result<Vec<Order>> {
        let path = self.path(ORDERS_FILE);
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(ChangeMoneyError::from),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(storage_io_error(err)),
        }
    }

    /// Atomically writes the serialized order file (write-to-tmp then
    /// rename).
    fn write_orders(&self, orders: &[Order]) -> Result<()> {
        let path = self.path(ORDERS_FILE);
        let tmp_path = self.path(&format!("{ORDERS_FILE}.tmp"));
        let json = serde_json::to_string_pretty(orders).map_err(ChangeMoneyError::from)?;
        fs::write(&tmp_path, json).map_err(storage_io_error)?;
        fs::rename(&tmp_path, &path).map_err(storage_io_error)?;
        Ok(())
    }

    /// Appends one order under the exclusive lock.
    fn append_order(&self, order: Order) -> Result<()> {
        self.with_exclusive_lock(|| {
            let mut orders = self.read_orders()?;
            orders.push(order);
            self.write_orders(&orders)
        })
    }

    /// Applies a status change under the exclusive lock.
    fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        updated_at: String,
    ) -> Result<Order> {
        self.with_exclusive_lock(|| {
            let mut orders = self.read_orders()?;
            let updated = super::update_order(&mut orders, id, status, updated_at)?;
            self.write_orders(&orders)?;
            Ok(updated)
        })
    }

    /// Replaces the persisted sequence with the literal empty array.
    fn clear_orders(&self) -> Result<()> {
        self.with_exclusive_lock(|| self.write_orders(&[]))
    }
}

// ── Free-standing helpers ───────────────────────────────────────────────

/// Wraps an I/O error into a [`ChangeMoneyError::Storage`].
fn storage_io_error(err: std::io::Error) -> ChangeMoneyError {
    ChangeMoneyError::Storage(Box::new(err))
}

/// Wraps a mutex poison error into a [`ChangeMoneyError::Storage`].
fn lock_poison_error<T>(err: &std::sync::PoisonError<T>) -> ChangeMoneyError {
    ChangeMoneyError::Storage(err.to_string().into())
}

// ── BlockingOrderStore implementation ───────────────────────────────────

#[cfg(feature = "blocking")]
impl super::BlockingOrderStore for FileStore {
    #[inline]
    fn orders(&self) -> Result<Vec<Order>> {
        self.with_shared_lock(|| self.read_orders())
    }

    #[inline]
    fn append(&self, order: Order) -> Result<()> {
        self.append_order(order)
    }

    #[inline]
    fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        updated_at: String,
    ) -> Result<Order> {
        self.update_order_status(id, status, updated_at)
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        self.clear_orders()
    }
}

// ── OrderStore (async) implementation ───────────────────────────────────

#[cfg(feature = "async")]
impl super::OrderStore for FileStore {
    #[inline]
    fn orders(&self) -> impl Future<Output = Result<Vec<Order>>> + Send {
        core::future::ready(self.with_shared_lock(|| self.read_orders()))
    }

    #[inline]
    fn append(&self, order: Order) -> impl Future<Output = Result<()>> + Send {
        core::future::ready(self.append_order(order))
    }

    #[inline]
    fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        updated_at: String,
    ) -> impl Future<Output = Result<Order>> + Send {
        core::future::ready(self.update_order_status(id, status, updated_at))
    }

    #[inline]
    fn clear(&self) -> impl Future<Output = Result<()>> + Send {
        core::future::ready(self.clear_orders())
    }
}
