use ipmi_bmc_app::{AppCommand, AppHandler, Request, result_code};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example:
    //   IPMI_DEBUG=1 cargo run --example simulate_app_commands
    let mut handler = AppHandler::builder()
        .default_user("admin", "changeme")
        .random_device_guid()
        .build()?;

    let requests = [
        (AppCommand::GetDeviceId, vec![]),
        (AppCommand::GetDeviceGuid, vec![]),
        (AppCommand::GetSelfTestResults, vec![]),
        (AppCommand::GetChannelInfo, vec![0x0E]),
        (AppCommand::GetChannelAccess, vec![0x01, 0x80]),
        (AppCommand::GetUserAccess, vec![0x01, 0x01]),
        (AppCommand::SetUserPassword, b"\x01\x02password".to_vec()),
        (AppCommand::SetUserName, vec![0x01]),
    ];

    for (cmd, data) in requests {
        let (response, result) = handler.dispatch(&Request::app(cmd.as_u8(), &data));
        println!(
            "{cmd:?}: cc={:#04x} rc={} data={:02x?}",
            response.completion_code,
            result_code(&result),
            response.data
        );
    }

    Ok(())
}
