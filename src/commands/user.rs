use crate::channel::is_valid_channel;
use crate::commands::{alloc_payload, respond};
use crate::error::{Error, Result};
use crate::handler::AppHandler;
use crate::types::{PasswordSize, Request, Response};
use crate::user::{FIXED_NAME_COUNT, UID_MAX};

/// User enabled, IPMB messaging on one channel.
const USER_ACCESS_ENABLED: u8 = 0x40 | 0x02;

/// Legacy channel-access byte reported for every user.
const USER_ACCESS_LIMITS: u8 = 0x64;

/// Request header bytes preceding the password in `Set User Password`.
const PASSWORD_HEADER_LEN: usize = 2;

/// `Get User Access` (22.27).
///
/// The response is populated with a normal completion code, yet the handler
/// reports [`Error::UnconfirmedResponse`]. Callers that trust the completion
/// code get a usable answer; callers that trust the result see a failure.
pub(crate) fn get_user_access(
    _bmc: &mut AppHandler,
    request: &Request,
    response: &mut Response,
) -> Result<()> {
    respond(response, user_access_payload(&request.data))?;
    Err(Error::UnconfirmedResponse)
}

fn user_access_payload(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() != 2 {
        return Err(Error::bad_length("2", data.len()));
    }
    if !is_valid_channel(data[0] & 0x0F) {
        return Err(Error::ParameterOutOfRange("unknown channel number"));
    }

    // Not checked against the table; every user ID reports the same access.
    #[cfg(feature = "tracing")]
    tracing::debug!(uid = data[1] & 0x3F, "get user access");

    let mut payload = alloc_payload(4)?;
    payload[0] = UID_MAX & 0x3F;
    payload[1] = USER_ACCESS_ENABLED;
    payload[2] = FIXED_NAME_COUNT & 0x3F;
    payload[3] = USER_ACCESS_LIMITS;
    Ok(payload)
}

/// `Set User Access`, `Set User Name` and `Get User Name`: not supported by
/// this BMC.
pub(crate) fn unimplemented(
    _bmc: &mut AppHandler,
    request: &Request,
    response: &mut Response,
) -> Result<()> {
    respond(response, Err(Error::InvalidCommand { cmd: request.cmd }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PasswordOperation {
    DisableUser,
    EnableUser,
    SetPassword,
    TestPassword,
}

impl PasswordOperation {
    fn from_byte(byte: u8) -> Result<Self> {
        match byte & 0x03 {
            0 => Ok(Self::DisableUser),
            1 => Ok(Self::EnableUser),
            2 => Ok(Self::SetPassword),
            3 => Ok(Self::TestPassword),
            _ => Err(Error::InvalidDataField("unknown password operation")),
        }
    }
}

/// `Set User Password` (22.30).
///
/// Only the "set password" operation is implemented; the table is written
/// only after the whole request has been validated.
pub(crate) fn set_user_password(
    bmc: &mut AppHandler,
    request: &Request,
    response: &mut Response,
) -> Result<()> {
    let outcome = apply_password_request(bmc, request).map(|()| Vec::new());
    respond(response, outcome)
}

fn apply_password_request(bmc: &mut AppHandler, request: &Request) -> Result<()> {
    let data = &request.data;
    if data.len() < PASSWORD_HEADER_LEN {
        return Err(Error::bad_length("at least 2", data.len()));
    }

    let size = PasswordSize::from_flag(data[0]);
    let uid = data[0] & 0x1F;
    let operation = PasswordOperation::from_byte(data[1])?;

    if uid == 0 || uid > UID_MAX {
        return Err(Error::ParameterOutOfRange("user id outside 1..=UID_MAX"));
    }

    match operation {
        PasswordOperation::SetPassword => {}
        PasswordOperation::DisableUser
        | PasswordOperation::EnableUser
        | PasswordOperation::TestPassword => {
            return Err(Error::InvalidCommand { cmd: request.cmd });
        }
    }

    let max_len = PASSWORD_HEADER_LEN + size.byte_len();
    if data.len() <= PASSWORD_HEADER_LEN || data.len() > max_len {
        let expected = match size {
            PasswordSize::Bytes16 => "3..=18",
            PasswordSize::Bytes20 => "3..=22",
        };
        return Err(Error::bad_length(expected, data.len()));
    }

    bmc.users.set_password(uid, size, &data[PASSWORD_HEADER_LEN..])?;

    #[cfg(feature = "tracing")]
    tracing::info!(uid, ?size, "user password updated");
    Ok(())
}
