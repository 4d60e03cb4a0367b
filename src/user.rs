//! Fixed-size user table addressed by user ID.

use core::fmt;

use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::types::PasswordSize;

/// Highest addressable user ID. User ID 0 is reserved.
pub const UID_MAX: u8 = 1;

/// Number of user IDs whose names cannot be changed.
pub const FIXED_NAME_COUNT: u8 = 1;

/// Maximum user name length in bytes.
pub const NAME_MAX: usize = 16;

/// Password storage width (the 20-byte class).
pub const PASSWORD_MAX: usize = 20;

/// Channel access mask given to the seeded user: every channel.
pub const DEFAULT_CHANNEL_ACCESS: u8 = 0xFF;

/// Name of the user seeded into user ID 1.
pub const DEFAULT_USER_NAME: &str = "admin";

/// Password of the user seeded into user ID 1.
pub const DEFAULT_USER_PASSWORD: &[u8] = b"admin";

/// A single user slot.
///
/// The stored password is wiped when overwritten and when the record is dropped.
#[derive(Clone)]
pub struct UserRecord {
    uid: u8,
    name: String,
    password: [u8; PASSWORD_MAX],
    password_size: PasswordSize,
    channel_access: u8,
}

impl UserRecord {
    /// Create a user record, validating name and password sizes.
    pub fn new(uid: u8, name: &str, password: &[u8]) -> Result<Self> {
        check_uid(uid)?;
        if name.len() > NAME_MAX {
            return Err(Error::InvalidDataField("user name longer than 16 bytes"));
        }
        if !name.bytes().all(|b| b.is_ascii_graphic() || b == b' ') {
            return Err(Error::InvalidDataField("user name is not printable ASCII"));
        }
        if password.len() > PASSWORD_MAX {
            return Err(Error::InvalidDataField("password longer than 20 bytes"));
        }

        let password_size = if password.len() > PasswordSize::Bytes16.byte_len() {
            PasswordSize::Bytes20
        } else {
            PasswordSize::Bytes16
        };

        let mut record = Self {
            uid,
            name: name.to_owned(),
            password: [0u8; PASSWORD_MAX],
            password_size,
            channel_access: DEFAULT_CHANNEL_ACCESS,
        };
        record.password[..password.len()].copy_from_slice(password);
        Ok(record)
    }

    fn seed() -> Self {
        let mut record = Self::unnamed(1);
        record.name = DEFAULT_USER_NAME.to_owned();
        record.password[..DEFAULT_USER_PASSWORD.len()].copy_from_slice(DEFAULT_USER_PASSWORD);
        record.channel_access = DEFAULT_CHANNEL_ACCESS;
        record
    }

    fn unnamed(uid: u8) -> Self {
        Self {
            uid,
            name: String::new(),
            password: [0u8; PASSWORD_MAX],
            password_size: PasswordSize::Bytes16,
            channel_access: 0,
        }
    }

    /// User ID (1..=UID_MAX).
    pub fn uid(&self) -> u8 {
        self.uid
    }

    /// User name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stored password bytes, sized by the recorded size class.
    pub fn password(&self) -> &[u8] {
        &self.password[..self.password_size.byte_len()]
    }

    /// Size class recorded by the last password write.
    pub fn password_size(&self) -> PasswordSize {
        self.password_size
    }

    /// Channel access bitmask.
    pub fn channel_access(&self) -> u8 {
        self.channel_access
    }

    fn store_password(&mut self, size: PasswordSize, bytes: &[u8]) {
        self.password.zeroize();
        let n = bytes.len().min(size.byte_len());
        self.password[..n].copy_from_slice(&bytes[..n]);
        self.password_size = size;
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("uid", &self.uid)
            .field("name", &self.name)
            .field("password", &"<secret>")
            .field("password_size", &self.password_size)
            .field("channel_access", &format_args!("{:#04x}", self.channel_access))
            .finish()
    }
}

impl Drop for UserRecord {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

fn check_uid(uid: u8) -> Result<()> {
    if uid == 0 || uid > UID_MAX {
        return Err(Error::ParameterOutOfRange("user id outside 1..=UID_MAX"));
    }
    Ok(())
}

const SLOTS: usize = UID_MAX as usize + 1;

/// User records indexed directly by user ID. Slot 0 is never populated.
#[derive(Debug, Clone, Default)]
pub struct UserTable {
    slots: [Option<UserRecord>; SLOTS],
}

impl UserTable {
    /// A table with no users.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A table holding the default `admin` user.
    pub fn seeded() -> Self {
        Self::with_user(UserRecord::seed())
    }

    /// A table seeded with a single user.
    pub fn with_user(record: UserRecord) -> Self {
        let mut table = Self::empty();
        let uid = usize::from(record.uid);
        table.slots[uid] = Some(record);
        table
    }

    /// Record for `uid`, if the slot is addressable and populated.
    pub fn get(&self, uid: u8) -> Option<&UserRecord> {
        if check_uid(uid).is_err() {
            return None;
        }
        self.slots[usize::from(uid)].as_ref()
    }

    /// Overwrite the password stored for `uid`.
    ///
    /// Callers validate the payload before calling; this only fails on an
    /// unaddressable user ID, in which case the table is untouched.
    pub fn set_password(&mut self, uid: u8, size: PasswordSize, bytes: &[u8]) -> Result<()> {
        check_uid(uid)?;
        self.slots[usize::from(uid)]
            .get_or_insert_with(|| UserRecord::unnamed(uid))
            .store_password(size, bytes);
        Ok(())
    }

    /// Iterate over populated records in user-ID order.
    pub fn iter(&self) -> impl Iterator<Item = &UserRecord> {
        self.slots.iter().flatten()
    }
}
