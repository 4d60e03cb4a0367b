#![deny(unsafe_code)]
#![warn(missing_docs)]

//! App network-function command handler for a simulated IPMI BMC.
//!
//! The crate implements the responder side of:
//! - Get Device ID, Get Device GUID, Cold/Warm Reset, Get Self Test Results
//! - Get Channel Access and Get Channel Info over a static channel catalogue
//! - Get User Access and Set User Password against a small user table
//!
//! A host hands each parsed request to [`AppHandler::handle`] (or a raw LAN
//! message to [`AppHandler::handle_lan_message`]) and relays the populated
//! [`Response`]. Sessions, authentication and sockets stay with the host.

mod channel;
mod commands;
mod debug;
mod error;
mod handler;
mod observe;
mod protocol;
mod types;
mod user;

pub use crate::channel::{
    CHANNELS, ChannelEntry, SYSTEM_INTERFACE, is_valid_channel, normalize_channel,
    resolve_channel, resolve_request_channel,
};
pub use crate::commands::AppCommand;
pub use crate::error::{Error, Result, result_code};
pub use crate::handler::{
    AppHandler, AppHandlerBuilder, DEFAULT_DEVICE_ID, DEFAULT_DEVICE_REVISION,
    DEFAULT_MANUFACTURER_IANA, DEVICE_GUID_LEN, DeviceIdentity, SharedAppHandler,
};
pub use crate::protocol::{LanHeader, decode_lan_request, encode_lan_response};
pub use crate::types::{CompletionCode, NETFN_APP, PasswordSize, Request, Response};
pub use crate::user::{
    DEFAULT_CHANNEL_ACCESS, DEFAULT_USER_NAME, DEFAULT_USER_PASSWORD, FIXED_NAME_COUNT, NAME_MAX,
    PASSWORD_MAX, UID_MAX, UserRecord, UserTable,
};
