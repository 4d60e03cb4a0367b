use std::sync::{Arc, Mutex};
use std::time::Instant;

use rand::RngCore;

use crate::commands;
use crate::error::{Error, Result};
use crate::protocol::{decode_lan_request, encode_lan_response};
use crate::types::{CompletionCode, Request, Response};
use crate::user::{DEFAULT_USER_NAME, DEFAULT_USER_PASSWORD, UserRecord, UserTable};

/// Device ID reported by `Get Device ID`.
pub const DEFAULT_DEVICE_ID: u8 = 12;

/// Device revision byte: provides device SDRs, revision 0.
pub const DEFAULT_DEVICE_REVISION: u8 = 0x80;

/// IANA enterprise number reported by `Get Channel Info` (LS byte first).
pub const DEFAULT_MANUFACTURER_IANA: u32 = 0x00_1BF2;

/// `Get Device GUID` payload length.
pub const DEVICE_GUID_LEN: usize = 15;

/// Identity values the device commands report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIdentity {
    /// Device ID (payload byte 0 of `Get Device ID`).
    pub device_id: u8,
    /// Device revision (payload byte 1 of `Get Device ID`).
    pub device_revision: u8,
    /// GUID bytes returned by `Get Device GUID`.
    pub device_guid: [u8; DEVICE_GUID_LEN],
    /// IANA enterprise number, 3 bytes LS first.
    pub manufacturer_iana: [u8; 3],
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        let iana = DEFAULT_MANUFACTURER_IANA.to_le_bytes();
        Self {
            device_id: DEFAULT_DEVICE_ID,
            device_revision: DEFAULT_DEVICE_REVISION,
            device_guid: [0u8; DEVICE_GUID_LEN],
            manufacturer_iana: [iana[0], iana[1], iana[2]],
        }
    }
}

/// App network-function dispatcher together with the BMC state its
/// commands read and write.
///
/// Requests are processed one at a time through `&mut self`; use
/// [`SharedAppHandler`] when several host threads dispatch concurrently.
#[derive(Debug, Clone)]
pub struct AppHandler {
    pub(crate) identity: DeviceIdentity,
    pub(crate) users: UserTable,
}

impl Default for AppHandler {
    fn default() -> Self {
        Self {
            identity: DeviceIdentity::default(),
            users: UserTable::seeded(),
        }
    }
}

/// Builder for [`AppHandler`].
#[derive(Debug)]
pub struct AppHandlerBuilder {
    identity: DeviceIdentity,
    manufacturer_iana: u32,
    user_name: String,
    user_password: Vec<u8>,
}

impl Default for AppHandlerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppHandlerBuilder {
    /// Create a builder with the simulator's default identity and user.
    pub fn new() -> Self {
        Self {
            identity: DeviceIdentity::default(),
            manufacturer_iana: DEFAULT_MANUFACTURER_IANA,
            user_name: DEFAULT_USER_NAME.to_owned(),
            user_password: DEFAULT_USER_PASSWORD.to_vec(),
        }
    }

    /// Set the device ID.
    pub fn device_id(mut self, device_id: u8) -> Self {
        self.identity.device_id = device_id;
        self
    }

    /// Set the device revision byte (bit 7: device provides SDRs).
    pub fn device_revision(mut self, revision: u8) -> Self {
        self.identity.device_revision = revision;
        self
    }

    /// Set fixed GUID bytes for `Get Device GUID`.
    pub fn device_guid(mut self, guid: [u8; DEVICE_GUID_LEN]) -> Self {
        self.identity.device_guid = guid;
        self
    }

    /// Generate a random GUID once; it stays stable for the handler's lifetime.
    pub fn random_device_guid(mut self) -> Self {
        rand::rng().fill_bytes(&mut self.identity.device_guid);
        self
    }

    /// Set the IANA enterprise number reported by `Get Channel Info`.
    pub fn manufacturer_iana(mut self, iana: u32) -> Self {
        self.manufacturer_iana = iana;
        self
    }

    /// Set the name and password of the user seeded into user ID 1.
    pub fn default_user(mut self, name: impl AsRef<str>, password: impl AsRef<[u8]>) -> Self {
        self.user_name = name.as_ref().to_owned();
        self.user_password = password.as_ref().to_vec();
        self
    }

    /// Validate the configuration and build the [`AppHandler`].
    pub fn build(self) -> Result<AppHandler> {
        if self.manufacturer_iana > 0x00FF_FFFF {
            return Err(Error::InvalidArgument(
                "manufacturer IANA number must fit in 3 bytes",
            ));
        }
        let iana = self.manufacturer_iana.to_le_bytes();

        let record = UserRecord::new(1, &self.user_name, &self.user_password)?;

        Ok(AppHandler {
            identity: DeviceIdentity {
                manufacturer_iana: [iana[0], iana[1], iana[2]],
                ..self.identity
            },
            users: UserTable::with_user(record),
        })
    }
}

impl AppHandler {
    /// Create an [`AppHandlerBuilder`].
    pub fn builder() -> AppHandlerBuilder {
        AppHandlerBuilder::new()
    }

    /// Device identity reported by this handler.
    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    /// Current user table.
    pub fn users(&self) -> &UserTable {
        &self.users
    }

    /// Dispatch one App network-function request.
    ///
    /// `response` is reset to the envelope defaults (network function + 1,
    /// echoed command and LUN, completion code OK, no data) before the
    /// command handler runs. The handler's result is returned unchanged;
    /// callers must check it as well as the completion code.
    pub fn handle(&mut self, request: &Request, response: &mut Response) -> Result<()> {
        let started = Instant::now();
        *response = Response::for_request(request);
        crate::debug::dump_hex("app request", request.cmd, &request.data);

        let result = match commands::lookup(request.cmd) {
            Some(handler) => handler(self, request, response),
            None => {
                response.completion_code = CompletionCode::InvalidCommand.as_u8();
                Err(Error::InvalidCommand { cmd: request.cmd })
            }
        };

        crate::debug::dump_hex("app response", response.cmd, &response.data);
        crate::observe::record_command(
            request.netfn,
            request.cmd,
            started.elapsed(),
            response.completion_code,
            &result,
        );
        result
    }

    /// Dispatch a request and return the populated response with the result.
    pub fn dispatch(&mut self, request: &Request) -> (Response, Result<()>) {
        let mut response = Response::default();
        let result = self.handle(request, &mut response);
        (response, result)
    }

    /// Handle one IPMI LAN request message and return the response message.
    ///
    /// Only framing errors are returned; command failures travel in the
    /// response's completion code.
    pub fn handle_lan_message(&mut self, msg: &[u8]) -> Result<Vec<u8>> {
        let (header, request) = decode_lan_request(msg)?;
        let (response, _result) = self.dispatch(&request);
        Ok(encode_lan_response(&header, &response))
    }
}

/// A cloneable, thread-safe [`AppHandler`].
///
/// One lock covers each whole request, so a `Get User Access` can never
/// observe a half-written `Set User Password`.
#[derive(Debug, Clone)]
pub struct SharedAppHandler {
    inner: Arc<Mutex<AppHandler>>,
}

impl From<AppHandler> for SharedAppHandler {
    fn from(handler: AppHandler) -> Self {
        Self {
            inner: Arc::new(Mutex::new(handler)),
        }
    }
}

impl SharedAppHandler {
    /// Wrap a handler for shared use.
    pub fn new(handler: AppHandler) -> Self {
        handler.into()
    }

    /// Dispatch a request under the handler lock. See [`AppHandler::handle`].
    pub fn handle(&self, request: &Request, response: &mut Response) -> Result<()> {
        match self.inner.lock() {
            Ok(mut handler) => handler.handle(request, response),
            Err(_) => {
                *response = Response::for_request(request);
                response.completion_code = CompletionCode::Unspecified.as_u8();
                Err(Error::Protocol("handler state poisoned"))
            }
        }
    }

    /// Dispatch a request and return the populated response with the result.
    pub fn dispatch(&self, request: &Request) -> (Response, Result<()>) {
        let mut response = Response::default();
        let result = self.handle(request, &mut response);
        (response, result)
    }

    /// Handle one IPMI LAN request message under the handler lock.
    pub fn handle_lan_message(&self, msg: &[u8]) -> Result<Vec<u8>> {
        let mut handler = self
            .inner
            .lock()
            .map_err(|_| Error::Protocol("handler state poisoned"))?;
        handler.handle_lan_message(msg)
    }

    /// Run `f` against the current user table.
    pub fn with_users<R>(&self, f: impl FnOnce(&UserTable) -> R) -> Result<R> {
        let handler = self
            .inner
            .lock()
            .map_err(|_| Error::Protocol("handler state poisoned"))?;
        Ok(f(&handler.users))
    }
}
