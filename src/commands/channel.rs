use crate::channel::{SYSTEM_INTERFACE, normalize_channel, resolve_channel, resolve_request_channel};
use crate::commands::{alloc_payload, respond};
use crate::error::{Error, Result};
use crate::handler::AppHandler;
use crate::types::{Request, Response};

/// `Get Channel Access` (22.23).
///
/// The volatile/non-volatile selector is validated but both report the same
/// static settings.
pub(crate) fn get_channel_access(
    _bmc: &mut AppHandler,
    request: &Request,
    response: &mut Response,
) -> Result<()> {
    respond(response, channel_access_payload(&request.data))
}

fn channel_access_payload(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() != 2 {
        return Err(Error::bad_length("2", data.len()));
    }

    // Only bits [7:6] select the access set; 00b and 11b are reserved.
    let access = data[1] | 0x3F;
    if access == 0x3F || access == 0xFF {
        return Err(Error::InvalidDataField("unsupported channel access selector"));
    }

    let mut payload = alloc_payload(2)?;
    let channel = resolve_request_channel(data[0])
        .ok_or(Error::InvalidDataField("unknown channel number"))?;

    payload[0] = channel.capabilities;
    payload[1] = channel.privilege_level;
    Ok(payload)
}

/// `Get Channel Info` (22.24).
pub(crate) fn get_channel_info(
    bmc: &mut AppHandler,
    request: &Request,
    response: &mut Response,
) -> Result<()> {
    respond(response, channel_info_payload(bmc, &request.data))
}

fn channel_info_payload(bmc: &AppHandler, data: &[u8]) -> Result<Vec<u8>> {
    if data.len() != 1 {
        return Err(Error::bad_length("1", data.len()));
    }

    let mut payload = alloc_payload(9)?;
    let number = normalize_channel(data[0]);

    #[cfg(feature = "tracing")]
    tracing::debug!(channel = number, "get channel info");

    let channel =
        resolve_channel(number).ok_or(Error::InvalidDataField("unknown channel number"))?;

    payload[0] = number;
    payload[1] = channel.medium_type;
    payload[2] = channel.protocol_type;
    payload[3] = channel.session_support;
    payload[4..7].copy_from_slice(&bmc.identity.manufacturer_iana);
    // Auxiliary channel info does not apply to the system interface.
    if number == SYSTEM_INTERFACE {
        payload[7] = 0xFF;
        payload[8] = 0xFF;
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::AppCommand;
    use crate::types::CompletionCode;

    fn run(cmd: AppCommand, data: &[u8]) -> (Response, Result<()>) {
        let mut bmc = AppHandler::default();
        let request = Request::app(cmd.as_u8(), data);
        let mut response = Response::default();
        let result = match cmd {
            AppCommand::GetChannelAccess => get_channel_access(&mut bmc, &request, &mut response),
            _ => get_channel_info(&mut bmc, &request, &mut response),
        };
        (response, result)
    }

    #[test]
    fn channel_access_requires_two_bytes() {
        for data in [&[][..], &[0x01][..], &[0x01, 0x40, 0x00][..]] {
            let (response, result) = run(AppCommand::GetChannelAccess, data);
            assert!(matches!(result, Err(Error::BadRequestLength { .. })));
            assert_eq!(
                response.completion_code,
                CompletionCode::RequestDataLengthInvalid.as_u8()
            );
            assert!(response.data.is_empty());
        }
    }

    #[test]
    fn channel_access_rejects_reserved_selectors() {
        for selector in [0x00, 0x15, 0xC0, 0xFF] {
            let (response, result) = run(AppCommand::GetChannelAccess, &[0x0E, selector]);
            assert!(matches!(result, Err(Error::InvalidDataField(_))));
            assert_eq!(
                response.completion_code,
                CompletionCode::InvalidDataField.as_u8()
            );
        }
    }

    #[test]
    fn channel_access_reports_lan_settings() {
        for selector in [0x40, 0x80] {
            let (response, result) = run(AppCommand::GetChannelAccess, &[0x01, selector]);
            assert!(result.is_ok());
            assert_eq!(response.data, vec![0xC2, 0xF5]);
        }
    }

    #[test]
    fn channel_access_unknown_channel_is_invalid_field() {
        let (response, result) = run(AppCommand::GetChannelAccess, &[0x07, 0x40]);
        assert!(matches!(result, Err(Error::InvalidDataField(_))));
        assert!(response.data.is_empty());
    }

    #[test]
    fn channel_info_for_system_interface() {
        for raw in [0xFF, 0x0F, 0x0E] {
            let (response, result) = run(AppCommand::GetChannelInfo, &[raw]);
            assert!(result.is_ok());
            assert_eq!(
                response.data,
                vec![0xFF, 0x0C, 0x05, 0x00, 0xF2, 0x1B, 0x00, 0xFF, 0xFF]
            );
        }
    }

    #[test]
    fn channel_info_for_lan() {
        let (response, result) = run(AppCommand::GetChannelInfo, &[0x01]);
        assert!(result.is_ok());
        assert_eq!(
            response.data,
            vec![0xF1, 0x04, 0x02, 0x80, 0xF2, 0x1B, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn channel_info_errors() {
        let (response, result) = run(AppCommand::GetChannelInfo, &[0x01, 0x02]);
        assert!(matches!(result, Err(Error::BadRequestLength { .. })));
        assert!(response.data.is_empty());

        let (response, result) = run(AppCommand::GetChannelInfo, &[0x0A]);
        assert!(matches!(result, Err(Error::InvalidDataField(_))));
        assert_eq!(
            response.completion_code,
            CompletionCode::InvalidDataField.as_u8()
        );
    }
}
