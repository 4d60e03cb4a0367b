/// Whether payload hex dumps were requested through `IPMI_DEBUG`.
pub(crate) fn enabled() -> bool {
    std::env::var("IPMI_DEBUG")
        .map(|v| !v.is_empty())
        .unwrap_or(false)
}

pub(crate) fn dump_hex(label: &str, cmd: u8, bytes: &[u8]) {
    if !enabled() {
        return;
    }
    let out = format_hex(label, cmd, bytes);

    #[cfg(feature = "tracing")]
    tracing::trace!("{out}");

    #[cfg(not(feature = "tracing"))]
    eprintln!("{out}");
}

fn format_hex(label: &str, cmd: u8, bytes: &[u8]) -> String {
    let mut out = String::with_capacity(label.len() + bytes.len() * 3 + 16);
    out.push_str(label);
    out.push_str(&format!(" cmd={cmd:#04x} ("));
    out.push_str(&bytes.len().to_string());
    out.push_str("):");
    for b in bytes {
        out.push(' ');
        out.push_str(&format!("{b:02x}"));
    }
    out
}
