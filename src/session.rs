use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use failure::Error;

use crate::messages::LoginResponse;

pub const TOKEN_KEY: &str = "jwt";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const EXPIRES_KEY: &str = "expira";
pub const DISPLAY_NAME_KEY: &str = "nombreAdmin";
pub const USERNAME_KEY: &str = "usuario";

#[derive(Fail, Debug, PartialEq)]
pub enum SessionError {
    #[fail(display = "Not logged in, run `login` first")]
    NotAuthenticated,
}

/// Persistent key/value storage for session data. The file backed implementation is what the
/// clis use, tests use `MemoryStorage`.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
    fn remove(&mut self, key: &str) -> Result<(), Error>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> MemoryStorage {
        Default::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Error> {
        self.values.remove(key);
        Ok(())
    }
}

/// Storage backed by a json object on disk. Every mutation rewrites the file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open the storage at `path`. A missing file is an empty store, it'll be created on the first
    /// write.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<FileStorage, Error> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let mut fh = File::open(&path)?;
            let mut contents = String::new();
            fh.read_to_string(&mut contents)?;
            serde_json::from_str(&contents)
                .map_err(|e| format_err!("Couldn't parse session file {:?}: {}", &path, e))?
        } else {
            BTreeMap::new()
        };

        Ok(FileStorage { path, values })
    }

    fn persist(&self) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.values)?)?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.values.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<(), Error> {
        if self.values.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

#[derive(RedactedDebug, Clone, PartialEq)]
pub struct AccessToken {
    #[redacted]
    token: String,
}

impl AccessToken {
    pub fn new(token: String) -> AccessToken {
        AccessToken { token }
    }

    pub fn as_authorization_header(&self) -> String {
        format!("Bearer {}", &self.token)
    }
}

/// The session threaded into the client. Read once out of storage, and never written back by
/// anything but login/logout.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: AccessToken,
    pub display_name: Option<String>,
}

impl Session {
    pub fn new(token: &str, display_name: Option<&str>) -> Session {
        Session {
            token: AccessToken::new(token.to_string()),
            display_name: display_name.map(|s| s.to_string()),
        }
    }

    pub fn from_storage(storage: &dyn SessionStorage) -> Result<Session, SessionError> {
        match storage.get(TOKEN_KEY) {
            Some(ref token) if !token.is_empty() => Ok(Session {
                token: AccessToken::new(token.clone()),
                display_name: storage.get(DISPLAY_NAME_KEY),
            }),
            _ => Err(SessionError::NotAuthenticated),
        }
    }

    /// Persist everything the login call handed back.
    pub fn store_login(storage: &mut dyn SessionStorage, login: &LoginResponse) -> Result<Session, Error> {
        storage.set(TOKEN_KEY, &login.token)?;
        if let Some(refresh) = &login.refresh_token {
            storage.set(REFRESH_TOKEN_KEY, refresh)?;
        }
        if let Some(expires) = &login.expires {
            let expires = match expires {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            storage.set(EXPIRES_KEY, &expires)?;
        }
        if let Some(name) = &login.display_name {
            storage.set(DISPLAY_NAME_KEY, name)?;
        }
        if let Some(username) = &login.username {
            storage.set(USERNAME_KEY, username)?;
        }
        info!("Stored session for {:?}", &login.username);

        Ok(Session::new(&login.token, login.display_name.as_ref().map(|s| s.as_str())))
    }

    pub fn clear(storage: &mut dyn SessionStorage) -> Result<(), Error> {
        for key in &[TOKEN_KEY, DISPLAY_NAME_KEY, USERNAME_KEY] {
            storage.remove(key)?;
        }
        Ok(())
    }

    /// The name to greet the user with.
    pub fn greeting_name(&self) -> &str {
        self.display_name.as_ref().map(|s| s.as_str()).unwrap_or("Usuario")
    }
}
