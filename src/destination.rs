use crate::{
    close::Close,
    error::{LogError, Result},
};
use parking_lot::Mutex;
use std::{
    fmt,
    fs::File,
    io::{self, Write},
    path::Path,
    sync::Arc,
};
use uuid::Uuid;

/// Identity of the byte stream behind a [`Destination`].
///
/// Two destinations with the same id write to the same place, so a logger
/// refuses to attach both of them.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct DestinationId(pub Uuid);

impl DestinationId {
    pub const STDERR: DestinationId = DestinationId(Uuid::from_u128(2));
    pub const STDOUT: DestinationId = DestinationId(Uuid::from_u128(1));

    pub fn new() -> Self {
        DestinationId(Uuid::new_v4())
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DestinationId {
    fn default() -> Self {
        Self::new()
    }
}

type SharedWriter = Arc<Mutex<Option<Box<dyn Write + Send>>>>;

/// A shared, write-only byte stream that sinks print whole lines to.
///
/// Cloning a destination yields another handle to the same stream with the
/// same [`DestinationId`]. The stream is owned by the caller: the logger
/// never closes it, [`Destination::close`] does.
#[derive(Clone)]
pub struct Destination {
    id: DestinationId,
    name: Arc<str>,
    writer: SharedWriter,
}

impl Destination {
    pub fn new<W>(writer: W, name: impl Into<String>) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::with_id(DestinationId::new(), writer, name)
    }

    /// The process's standard error stream.
    pub fn stderr() -> Self {
        Self::with_id(DestinationId::STDERR, io::stderr(), "stderr")
    }

    /// The process's standard output stream.
    pub fn stdout() -> Self {
        Self::with_id(DestinationId::STDOUT, io::stdout(), "stdout")
    }

    /// Creates (or truncates) the file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        Ok(Self::new(file, path.display().to_string()))
    }

    fn with_id<W>(id: DestinationId, writer: W, name: impl Into<String>) -> Self
    where
        W: Write + Send + 'static,
    {
        let name: String = name.into();
        let writer: Box<dyn Write + Send> = Box::new(writer);
        Self {
            id,
            name: name.into(),
            writer: Arc::new(Mutex::new(Some(writer))),
        }
    }

    pub fn id(&self) -> DestinationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_closed(&self) -> bool {
        self.writer.lock().is_none()
    }

    /// Writes `buf` in full under a single lock acquisition and flushes.
    pub fn write_line(&self, buf: &[u8]) -> io::Result<()> {
        let mut guard = self.writer.lock();
        let Some(writer) = guard.as_mut() else {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                format!("write {}: destination closed", self.name),
            ));
        };
        writer.write_all(buf)?;
        writer.flush()
    }

    /// Flushes and releases the underlying stream.
    ///
    /// Every clone of this destination observes the close.
    pub fn close(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .take()
            .ok_or_else(|| LogError::AlreadyClosed(self.name.to_string()))?;
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Destination")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl Close for Destination {
    type Error = LogError;

    fn close(&mut self) -> Result<()> {
        Destination::close(self)
    }
}
