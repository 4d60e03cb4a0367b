use ipmi_bmc_app::{
    AppCommand, AppHandler, CHANNELS, CompletionCode, Error, NETFN_APP, PasswordSize, Request,
    Response, UID_MAX, resolve_channel, result_code,
};

fn dispatch(handler: &mut AppHandler, cmd: AppCommand, data: &[u8]) -> (Response, i32) {
    let mut response = Response::default();
    let result = handler.handle(&Request::app(cmd.as_u8(), data), &mut response);
    (response, result_code(&result))
}

#[test]
fn channel_catalogue_resolution() {
    for number in 0xF0..=0xFF_u8 {
        let entry = &CHANNELS[usize::from(number - 0xF0)];
        let resolved = resolve_channel(number);
        if entry.protocol_type == 0xFF {
            assert!(resolved.is_none(), "reserved channel {number:#04x} resolved");
        } else {
            let resolved = resolved.expect("assigned channel");
            assert_eq!(resolved.protocol_type, entry.protocol_type);
            assert_eq!(resolved.medium_type, entry.medium_type);
            assert_eq!(resolved.session_support, entry.session_support);
            assert_eq!(resolved.capabilities, entry.capabilities);
            assert_eq!(resolved.privilege_level, entry.privilege_level);
        }
    }
}

#[test]
fn get_channel_access_wrong_length() {
    let mut handler = AppHandler::default();
    for data in [&[][..], &[0x01][..], &[0x01, 0x40, 0x00][..]] {
        let (response, rc) = dispatch(&mut handler, AppCommand::GetChannelAccess, data);
        assert_eq!(rc, -1);
        assert_eq!(
            response.completion_code,
            CompletionCode::RequestDataLengthInvalid.as_u8()
        );
        assert!(response.data.is_empty());
    }
}

#[test]
fn get_channel_access_rejects_selector_3f() {
    let mut handler = AppHandler::default();
    let (response, rc) = dispatch(&mut handler, AppCommand::GetChannelAccess, &[0x0E, 0x00]);
    assert_eq!(rc, -1);
    assert_eq!(response.completion_code, 0xCC);
    assert!(response.data.is_empty());
}

#[test]
fn get_channel_access_current_channel() {
    let mut handler = AppHandler::default();
    let (response, rc) = dispatch(&mut handler, AppCommand::GetChannelAccess, &[0x0E, 0x40]);
    assert_eq!(rc, 0);
    assert_eq!(response.data, vec![0x00, 0x00]);
}

#[test]
fn get_channel_info_system_interface() {
    let mut handler = AppHandler::default();
    let (response, rc) = dispatch(&mut handler, AppCommand::GetChannelInfo, &[0xFF]);
    assert_eq!(rc, 0);
    assert_eq!(response.netfn, NETFN_APP + 1);
    assert_eq!(response.cmd, 0x42);
    assert_eq!(response.data.len(), 9);
    assert_eq!(response.data[0], 0xFF);
    assert_eq!(&response.data[7..9], &[0xFF, 0xFF]);
}

#[test]
fn get_channel_info_is_idempotent() {
    let mut handler = AppHandler::default();
    let first = dispatch(&mut handler, AppCommand::GetChannelInfo, &[0x02]);
    let second = dispatch(&mut handler, AppCommand::GetChannelInfo, &[0x02]);
    assert_eq!(first, second);
    assert_eq!(
        first.0.data,
        vec![0xF2, 0x05, 0x02, 0x40, 0xF2, 0x1B, 0x00, 0x00, 0x00]
    );
}

#[test]
fn get_device_id_layout() {
    let mut handler = AppHandler::default();
    let (response, rc) = dispatch(&mut handler, AppCommand::GetDeviceId, &[]);
    assert_eq!(rc, 0);
    assert_eq!(
        response.data,
        vec![12, 0x80, 0x00, 0, 0, 0xFF, 0, 0, 0, 0, 0, 0, 0, 0]
    );
}

#[test]
fn get_device_guid_is_fifteen_zero_bytes() {
    let mut handler = AppHandler::default();
    let (response, rc) = dispatch(&mut handler, AppCommand::GetDeviceGuid, &[]);
    assert_eq!(rc, 0);
    assert_eq!(response.data, vec![0u8; 15]);
}

#[test]
fn resets_and_self_test() {
    let mut handler = AppHandler::default();
    for cmd in [AppCommand::ColdReset, AppCommand::WarmReset] {
        let (response, rc) = dispatch(&mut handler, cmd, &[]);
        assert_eq!(rc, 0);
        assert_eq!(response.completion_code, 0x00);
        assert!(response.data.is_empty());
    }

    let (response, rc) = dispatch(&mut handler, AppCommand::GetSelfTestResults, &[]);
    assert_eq!(rc, 0);
    assert_eq!(response.data, vec![0x57, 0x04]);
}

#[test]
fn get_user_access_quirk() {
    let mut handler = AppHandler::default();
    let mut response = Response::default();
    let result = handler.handle(
        &Request::app(AppCommand::GetUserAccess.as_u8(), &[0x01, 0x01]),
        &mut response,
    );
    assert!(matches!(result, Err(Error::UnconfirmedResponse)));
    assert_eq!(response.completion_code, 0x00);
    assert_eq!(response.data, vec![UID_MAX, 0x42, 0x01, 0x64]);
}

#[test]
fn user_name_and_access_setters_are_rejected() {
    let mut handler = AppHandler::default();
    for cmd in [
        AppCommand::SetUserAccess,
        AppCommand::SetUserName,
        AppCommand::GetUserName,
    ] {
        let (response, rc) = dispatch(&mut handler, cmd, &[0x01, 0x02, 0x03]);
        assert_eq!(rc, -1);
        assert_eq!(response.completion_code, 0xC1);
        assert!(response.data.is_empty());
    }
}

#[test]
fn set_user_password_out_of_range_uid() {
    let mut handler = AppHandler::default();
    let before = handler.users().get(1).expect("admin").password().to_vec();

    for uid in [0x00, UID_MAX + 1, 0x1F] {
        let (response, rc) = dispatch(
            &mut handler,
            AppCommand::SetUserPassword,
            &[uid, 0x02, b'n', b'e', b'w'],
        );
        assert_eq!(rc, -1);
        assert_eq!(
            response.completion_code,
            CompletionCode::ParameterOutOfRange.as_u8()
        );
    }

    let after = handler.users().get(1).expect("admin").password().to_vec();
    assert_eq!(before, after);
}

#[test]
fn set_user_password_length_boundary() {
    let mut handler = AppHandler::default();

    let mut data = vec![0x01, 0x02];
    data.extend((0..17).map(|i| b'a' + i));
    assert_eq!(data.len(), 19);
    let (response, rc) = dispatch(&mut handler, AppCommand::SetUserPassword, &data);
    assert_eq!(rc, -1);
    assert_eq!(response.completion_code, 0xC7);

    data.truncate(18);
    let (response, rc) = dispatch(&mut handler, AppCommand::SetUserPassword, &data);
    assert_eq!(rc, 0);
    assert_eq!(response.completion_code, 0x00);
    assert!(response.data.is_empty());

    let record = handler.users().get(1).expect("admin");
    assert_eq!(record.password(), &data[2..18]);
    assert_eq!(record.password_size(), PasswordSize::Bytes16);
}

#[test]
fn unknown_command_dispatch() {
    let mut handler = AppHandler::default();
    let mut response = Response::default();
    let result = handler.handle(&Request::app(0x99, &[]), &mut response);
    assert_eq!(result_code(&result), -1);
    assert_eq!(response.completion_code, 0xC1);
    assert_eq!(response.netfn, NETFN_APP + 1);
    assert_eq!(response.cmd, 0x99);
    assert!(response.data.is_empty());
}
