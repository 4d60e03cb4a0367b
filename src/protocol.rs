//! Responder-side IPMI LAN message codec.
//!
//! Converts between the byte layout of an IPMI LAN message (as carried in an
//! RMCP/RMCP+ payload) and [`Request`]/[`Response`] records. Session
//! wrapping and socket I/O belong to the host.

use crate::error::{Error, Result};
use crate::types::{Request, Response};

/// Smallest request message: header, command and checksum 2, no data.
const MIN_REQUEST_LEN: usize = 7;

/// Addressing fields of a request that the response must mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanHeader {
    /// Responder slave address (this BMC, normally 0x20).
    pub rs_addr: u8,
    /// Requester address (normally 0x81 for a remote console).
    pub rq_addr: u8,
    /// Requester sequence number (6 bits).
    pub rq_seq: u8,
    /// Requester LUN (2 bits).
    pub rq_lun: u8,
}

/// Standard 2's complement checksum used by IPMI messages.
fn ipmi_checksum(bytes: &[u8]) -> u8 {
    let sum = bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    (!sum).wrapping_add(1)
}

fn sums_to_zero(bytes: &[u8]) -> bool {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b)) == 0
}

/// Decode and validate an IPMI LAN request message.
pub fn decode_lan_request(msg: &[u8]) -> Result<(LanHeader, Request)> {
    if msg.len() < MIN_REQUEST_LEN {
        return Err(Error::Protocol("IPMI request too short"));
    }

    // rsAddr, netFn/rsLUN, checksum1.
    if !sums_to_zero(&msg[..3]) {
        return Err(Error::Protocol("invalid IPMI checksum1"));
    }
    // rqAddr .. checksum2.
    if !sums_to_zero(&msg[3..]) {
        return Err(Error::Protocol("invalid IPMI checksum2"));
    }

    let netfn_lun = msg[1];
    let rq_seq_lun = msg[4];

    // Response netFn is request netFn + 1 and must still fit in 6 bits.
    if (netfn_lun >> 2) & 0x01 != 0 {
        return Err(Error::Protocol("IPMI request netFn must be even"));
    }

    let header = LanHeader {
        rs_addr: msg[0],
        rq_addr: msg[3],
        rq_seq: rq_seq_lun >> 2,
        rq_lun: rq_seq_lun & 0x03,
    };
    let request = Request {
        netfn: netfn_lun >> 2,
        cmd: msg[5],
        lun: netfn_lun & 0x03,
        data: msg[6..msg.len() - 1].to_vec(),
    };

    Ok((header, request))
}

/// Encode the response message for a request decoded with [`decode_lan_request`].
pub fn encode_lan_response(header: &LanHeader, response: &Response) -> Vec<u8> {
    let netfn_lun = (response.netfn << 2) | (header.rq_lun & 0x03);
    let rq_seq_lun = ((header.rq_seq & 0x3F) << 2) | (response.lun & 0x03);

    let mut msg = Vec::with_capacity(8 + response.data.len());
    msg.push(header.rq_addr);
    msg.push(netfn_lun);
    let csum1 = ipmi_checksum(&msg[..2]);
    msg.push(csum1);

    msg.push(header.rs_addr);
    msg.push(rq_seq_lun);
    msg.push(response.cmd);
    msg.push(response.completion_code);
    msg.extend_from_slice(&response.data);

    let csum2 = ipmi_checksum(&msg[3..]);
    msg.push(csum2);
    msg
}
