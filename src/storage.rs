use crate::session::{Access, Session, SessionError};
use anyhow::Context;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub trait SessionStore {
    /// Charge la session courante, `None` si personne n'est connecté.
    fn load(&self) -> anyhow::Result<Option<Session>>;
    /// Sauvegarde de manière atomique.
    fn save(&self, session: &Session) -> anyhow::Result<()>;
    /// Déconnexion : supprime la session (idempotent).
    fn clear(&self) -> anyhow::Result<()>;

    /// Charge la session et vérifie le niveau d'accès demandé.
    fn require(&self, access: Access) -> Result<Session, SessionError> {
        let session = self.load()?.ok_or(SessionError::NotLoggedIn)?;
        session.authorize(access)?;
        Ok(session)
    }
}

/// Session persistée dans un fichier JSON local.
pub struct JsonSessionStore {
    path: PathBuf,
}

impl JsonSessionStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for JsonSessionStore {
    fn load(&self) -> anyhow::Result<Option<Session>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()))
            }
        };
        let session: Session =
            serde_json::from_slice(&data).with_context(|| "parsing session file")?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(session)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", self.path.display())),
        }
    }
}
