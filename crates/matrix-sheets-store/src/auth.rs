//! Username/password checks against a store

use matrix_sheets_core::User;

use crate::error::StoreResult;
use crate::password::PasswordDigest;
use crate::store::MatrixStore;

/// Create a user whose password is stored as a salted digest
pub fn register_user<S: MatrixStore + ?Sized>(
    store: &S,
    username: &str,
    password: &str,
) -> StoreResult<User> {
    store.create_user(username, PasswordDigest::new(password))
}

/// Return the user if `password` matches, `None` for an unknown user or a
/// wrong password
pub fn authenticate<S: MatrixStore + ?Sized>(
    store: &S,
    username: &str,
    password: &str,
) -> StoreResult<Option<User>> {
    let Some((user, digest)) = store.user_credentials(username)? else {
        tracing::debug!(username, "Unknown user");
        return Ok(None);
    };

    if digest.verify(password) {
        Ok(Some(user))
    } else {
        tracing::debug!(username, "Password mismatch");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[test]
    fn test_authenticate() {
        let store = MemoryStore::new();
        let nate = register_user(&store, "nate", "123baby").unwrap();

        assert_eq!(authenticate(&store, "nate", "123baby").unwrap(), Some(nate));
        assert_eq!(authenticate(&store, "nate", "wrong").unwrap(), None);
        assert_eq!(authenticate(&store, "nobody", "123baby").unwrap(), None);
    }
}
