use std::time::Duration;

#[cfg(any(feature = "metrics", test))]
use crate::error::Error;
use crate::error::Result;

pub(crate) fn record_command(
    netfn: u8,
    cmd: u8,
    elapsed: Duration,
    completion_code: u8,
    result: &Result<()>,
) {
    let _ = (netfn, cmd, elapsed, completion_code);

    #[cfg(feature = "metrics")]
    {
        let outcome = if result.is_ok() { "ok" } else { "err" };
        metrics::counter!(
            "ipmi_app_commands_total",
            "cmd" => format!("{cmd:#04x}"),
            "outcome" => outcome
        )
        .increment(1);
        metrics::histogram!("ipmi_app_command_seconds").record(elapsed.as_secs_f64());
        if let Err(err) = result {
            metrics::counter!("ipmi_app_command_errors_total", "kind" => error_kind(err))
                .increment(1);
        }
    }

    #[cfg(feature = "tracing")]
    {
        match result {
            Ok(()) => tracing::debug!(
                netfn,
                cmd,
                completion_code,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                "app command handled"
            ),
            Err(err) => tracing::warn!(
                netfn,
                cmd,
                completion_code,
                error = %err,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                "app command failed"
            ),
        }
    }

    #[cfg(not(feature = "tracing"))]
    let _ = result;
}

#[cfg(any(feature = "metrics", test))]
fn error_kind(err: &Error) -> &'static str {
    match err {
        Error::BadRequestLength { .. } => "bad_request_length",
        Error::InvalidDataField(_) => "invalid_data_field",
        Error::ParameterOutOfRange(_) => "parameter_out_of_range",
        Error::InvalidCommand { .. } => "invalid_command",
        Error::AllocationFailure => "allocation_failure",
        Error::UnconfirmedResponse => "unconfirmed_response",
        Error::InvalidArgument(_) => "invalid_argument",
        Error::Protocol(_) => "protocol",
    }
}
