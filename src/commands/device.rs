use crate::commands::{AppCommand, alloc_payload, respond};
use crate::error::{Error, Result};
use crate::handler::AppHandler;
use crate::types::{Request, Response};

/// `Get Device ID` response length.
const DEVICE_ID_LEN: usize = 14;

/// Device support bits: every capability asserted.
const DEVICE_SUPPORT_ALL: u8 = 0xFF;

/// Canned self-test result: 57h (device error), FRU internal use area flagged.
const SELF_TEST_RESULT: [u8; 2] = [0x57, 0x04];

/// `Get Device ID` (20.1).
///
/// Minor firmware revision, IPMI version, manufacturer/product IDs and the
/// auxiliary firmware revision are reported as zero.
pub(crate) fn get_device_id(
    bmc: &mut AppHandler,
    _request: &Request,
    response: &mut Response,
) -> Result<()> {
    let outcome = alloc_payload(DEVICE_ID_LEN).map(|mut payload| {
        payload[0] = bmc.identity.device_id;
        payload[1] = bmc.identity.device_revision;
        // [7] = 0: device available, [6:0]: major firmware revision.
        payload[2] = 0x00;
        payload[5] = DEVICE_SUPPORT_ALL;
        payload
    });
    respond(response, outcome)
}

/// `Get Device GUID` (20.8).
pub(crate) fn get_device_guid(
    bmc: &mut AppHandler,
    _request: &Request,
    response: &mut Response,
) -> Result<()> {
    let guid = bmc.identity.device_guid;
    let outcome = alloc_payload(guid.len()).map(|mut payload| {
        payload.copy_from_slice(&guid);
        payload
    });
    respond(response, outcome)
}

/// `Cold Reset` (20.2) and `Warm Reset` (20.3). Nothing is reset.
pub(crate) fn reset(
    _bmc: &mut AppHandler,
    request: &Request,
    response: &mut Response,
) -> Result<()> {
    let outcome = match AppCommand::try_from(request.cmd) {
        Ok(AppCommand::ColdReset | AppCommand::WarmReset) => {
            #[cfg(feature = "tracing")]
            tracing::info!(cmd = request.cmd, "bmc reset requested");
            Ok(Vec::new())
        }
        _ => Err(Error::InvalidCommand { cmd: request.cmd }),
    };
    respond(response, outcome)
}

/// `Get Self Test Results` (20.4).
pub(crate) fn self_test(
    _bmc: &mut AppHandler,
    _request: &Request,
    response: &mut Response,
) -> Result<()> {
    let outcome = alloc_payload(SELF_TEST_RESULT.len()).map(|mut payload| {
        payload.copy_from_slice(&SELF_TEST_RESULT);
        payload
    });
    respond(response, outcome)
}
