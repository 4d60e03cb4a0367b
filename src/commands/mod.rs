//! App network-function command handlers and the command table.
//!
//! Each handler owns its completion code: it validates the request, builds
//! the payload in a local buffer and attaches it to the response only on
//! success.

use crate::error::{Error, Result};
use crate::handler::AppHandler;
use crate::types::{Request, Response};

mod channel;
mod device;
mod user;

/// App network-function command numbers handled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AppCommand {
    /// `Get Device ID` (20.1).
    GetDeviceId = 0x01,
    /// `Cold Reset` (20.2).
    ColdReset = 0x02,
    /// `Warm Reset` (20.3).
    WarmReset = 0x03,
    /// `Get Self Test Results` (20.4).
    GetSelfTestResults = 0x04,
    /// `Get Device GUID` (20.8).
    GetDeviceGuid = 0x08,
    /// `Get Channel Access` (22.23).
    GetChannelAccess = 0x41,
    /// `Get Channel Info` (22.24).
    GetChannelInfo = 0x42,
    /// `Set User Access` (22.26).
    SetUserAccess = 0x43,
    /// `Get User Access` (22.27).
    GetUserAccess = 0x44,
    /// `Set User Name` (22.28).
    SetUserName = 0x45,
    /// `Get User Name` (22.29).
    GetUserName = 0x46,
    /// `Set User Password` (22.30).
    SetUserPassword = 0x47,
}

impl AppCommand {
    /// Raw command number.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for AppCommand {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        let cmd = match value {
            0x01 => Self::GetDeviceId,
            0x02 => Self::ColdReset,
            0x03 => Self::WarmReset,
            0x04 => Self::GetSelfTestResults,
            0x08 => Self::GetDeviceGuid,
            0x41 => Self::GetChannelAccess,
            0x42 => Self::GetChannelInfo,
            0x43 => Self::SetUserAccess,
            0x44 => Self::GetUserAccess,
            0x45 => Self::SetUserName,
            0x46 => Self::GetUserName,
            0x47 => Self::SetUserPassword,
            cmd => return Err(Error::InvalidCommand { cmd }),
        };
        Ok(cmd)
    }
}

pub(crate) type HandlerFn = fn(&mut AppHandler, &Request, &mut Response) -> Result<()>;

const COMMAND_TABLE: [(AppCommand, HandlerFn); 12] = [
    (AppCommand::GetChannelAccess, channel::get_channel_access),
    (AppCommand::GetChannelInfo, channel::get_channel_info),
    (AppCommand::GetDeviceId, device::get_device_id),
    (AppCommand::ColdReset, device::reset),
    (AppCommand::WarmReset, device::reset),
    (AppCommand::GetSelfTestResults, device::self_test),
    (AppCommand::GetDeviceGuid, device::get_device_guid),
    (AppCommand::GetUserAccess, user::get_user_access),
    (AppCommand::SetUserAccess, user::unimplemented),
    (AppCommand::SetUserName, user::unimplemented),
    (AppCommand::GetUserName, user::unimplemented),
    (AppCommand::SetUserPassword, user::set_user_password),
];

/// Handler registered for a raw command number.
pub(crate) fn lookup(cmd: u8) -> Option<HandlerFn> {
    COMMAND_TABLE
        .iter()
        .find(|(command, _)| command.as_u8() == cmd)
        .map(|&(_, handler)| handler)
}

/// Zeroed payload buffer of `len` bytes; allocation failure is reported
/// instead of aborting.
pub(crate) fn alloc_payload(len: usize) -> Result<Vec<u8>> {
    let mut payload = Vec::new();
    payload
        .try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailure)?;
    payload.resize(len, 0);
    Ok(payload)
}

/// Commit a handler outcome to the response.
///
/// The payload is attached only on success; on failure the completion code
/// is set and the response carries no data.
pub(crate) fn respond(response: &mut Response, outcome: Result<Vec<u8>>) -> Result<()> {
    match outcome {
        Ok(payload) => {
            response.data = payload;
            Ok(())
        }
        Err(err) => {
            response.completion_code = err.completion_code().as_u8();
            response.data.clear();
            Err(err)
        }
    }
}
