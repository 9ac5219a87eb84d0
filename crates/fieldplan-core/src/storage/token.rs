//! Thin wrapper around the OS keyring for the scheduling-service API token.
//!
//! The token is opaque to this crate; it is stored once via the CLI and
//! attached as a bearer credential by the API client.

use crate::error::StorageError;

const SERVICE: &str = "fieldplan";
const TOKEN_KEY: &str = "api_token";

pub fn get() -> Result<Option<String>, StorageError> {
    let entry = keyring::Entry::new(SERVICE, TOKEN_KEY)?;
    match entry.get_password() {
        Ok(token) => Ok(Some(token)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn set(token: &str) -> Result<(), StorageError> {
    let entry = keyring::Entry::new(SERVICE, TOKEN_KEY)?;
    entry.set_password(token)?;
    Ok(())
}

pub fn delete() -> Result<(), StorageError> {
    let entry = keyring::Entry::new(SERVICE, TOKEN_KEY)?;
    match entry.delete_credential() {
        Ok(()) => Ok(()),
        Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
