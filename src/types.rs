use core::fmt;

/// App network function (requests). Responses use `NETFN_APP + 1`.
pub const NETFN_APP: u8 = 0x06;

/// IPMI completion codes produced by this handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CompletionCode {
    /// Command completed normally.
    Ok = 0x00,
    /// Invalid or unsupported command.
    InvalidCommand = 0xC1,
    /// Request data length invalid.
    RequestDataLengthInvalid = 0xC7,
    /// Parameter out of range.
    ParameterOutOfRange = 0xC9,
    /// Invalid data field in request.
    InvalidDataField = 0xCC,
    /// Unspecified error.
    Unspecified = 0xFF,
}

impl CompletionCode {
    /// Raw completion code byte.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Stored password width selected by bit 7 of `Set User Password` request data byte 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordSize {
    /// 16-byte password (IPMI v1.5 compatible).
    #[default]
    Bytes16,
    /// 20-byte password (IPMI v2.0).
    Bytes20,
}

impl PasswordSize {
    pub(crate) fn from_flag(byte: u8) -> Self {
        if byte & 0x80 != 0 {
            Self::Bytes20
        } else {
            Self::Bytes16
        }
    }

    /// Number of password bytes for this size class.
    pub fn byte_len(self) -> usize {
        match self {
            Self::Bytes16 => 16,
            Self::Bytes20 => 20,
        }
    }
}

/// A parsed IPMI request addressed to this network function.
#[derive(Clone, PartialEq, Eq)]
pub struct Request {
    /// Network function of the request.
    pub netfn: u8,
    /// Command number.
    pub cmd: u8,
    /// Logical unit number (2 bits).
    pub lun: u8,
    /// Request data bytes.
    pub data: Vec<u8>,
}

impl Request {
    /// Build an App network-function request on LUN 0.
    pub fn app(cmd: u8, data: &[u8]) -> Self {
        Self {
            netfn: NETFN_APP,
            cmd,
            lun: 0,
            data: data.to_vec(),
        }
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("netfn", &format_args!("{:#04x}", self.netfn))
            .field("cmd", &format_args!("{:#04x}", self.cmd))
            .field("lun", &self.lun)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// The response record populated by the dispatcher and its handlers.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// Network function (request value + 1).
    pub netfn: u8,
    /// Echoed command number.
    pub cmd: u8,
    /// Echoed logical unit number.
    pub lun: u8,
    /// IPMI completion code.
    pub completion_code: u8,
    /// Payload bytes after the completion code.
    pub data: Vec<u8>,
}

impl Response {
    pub(crate) fn for_request(request: &Request) -> Self {
        Self {
            netfn: request.netfn.wrapping_add(1),
            cmd: request.cmd,
            lun: request.lun,
            completion_code: CompletionCode::Ok.as_u8(),
            data: Vec::new(),
        }
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("netfn", &format_args!("{:#04x}", self.netfn))
            .field("cmd", &format_args!("{:#04x}", self.cmd))
            .field("lun", &self.lun)
            .field(
                "completion_code",
                &format_args!("{:#04x}", self.completion_code),
            )
            .field("data_len", &self.data.len())
            .finish()
    }
}
