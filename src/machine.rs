//! Machine identity.
//!
//! The local host name and host address are facts about the running process
//! that do not change while it runs. They are computed at most once, on first
//! use, and shared read-only afterwards.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::OnceLock;

static IDENTITY: OnceLock<MachineIdentity> = OnceLock::new();

/// Host name and address of the machine we are running on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineIdentity {
    /// Host name as reported by the operating system.
    pub host_name: String,
    /// Textual form of the most likely LAN address.
    pub host_address: String,
    /// Canonical (fully qualified) host name; the host name when the
    /// resolver has nothing better.
    pub fqdn: String,
}

impl MachineIdentity {
    /// Build an identity from known values (for testing and templates).
    pub fn new(host_name: impl Into<String>, host_address: impl Into<String>) -> Self {
        let host_name = host_name.into();
        Self {
            fqdn: host_name.clone(),
            host_name,
            host_address: host_address.into(),
        }
    }

    /// Set the canonical host name, builder style.
    pub fn with_fqdn(mut self, fqdn: impl Into<String>) -> Self {
        self.fqdn = fqdn.into();
        self
    }

    /// Probe the operating system for the current identity.
    ///
    /// Prefer [`identity`], which caches the result for the whole process.
    pub fn detect() -> Self {
        let host_name = platform_host_name().unwrap_or_else(|| "localhost".to_string());
        let host_address = pick_address(&interface_addresses())
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
            .to_string();

        let fqdn = canonical_name(&host_name).unwrap_or_else(|| host_name.clone());

        tracing::debug!(
            "Detected machine identity {}:{} ({})",
            host_name,
            host_address,
            fqdn
        );

        Self {
            host_name,
            host_address,
            fqdn,
        }
    }

    /// Merge of host name and address, e.g. `build-01.corp:10.4.3.121`.
    pub fn machine_id(&self) -> String {
        format!("{}:{}", self.host_name, self.host_address)
    }

    /// Case-insensitive comparison against the host name or the address.
    pub fn is_named(&self, host: &str) -> bool {
        !host.is_empty()
            && (self.host_name.eq_ignore_ascii_case(host)
                || self.host_address.eq_ignore_ascii_case(host))
    }
}

/// The process-wide machine identity, computed on first call.
pub fn identity() -> &'static MachineIdentity {
    IDENTITY.get_or_init(MachineIdentity::detect)
}

/// Choose the address most likely to be this machine's LAN address.
///
/// A private (site-local) IPv4 address wins outright; failing that the first
/// non-loopback address of any family is used.
pub fn pick_address(candidates: &[IpAddr]) -> Option<IpAddr> {
    let site_local = candidates.iter().find(|addr| match addr {
        IpAddr::V4(v4) => v4.is_private(),
        IpAddr::V6(_) => false,
    });

    site_local
        .or_else(|| {
            candidates
                .iter()
                .find(|addr| !addr.is_loopback() && !addr.is_unspecified())
        })
        .copied()
}

#[cfg(unix)]
fn platform_host_name() -> Option<String> {
    let mut buf = [0u8; 256];
    // SAFETY: the buffer is valid for `buf.len()` bytes and gethostname
    // writes at most that many, NUL-terminating when there is room.
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast::<libc::c_char>(), buf.len()) };
    if rc != 0 {
        return None;
    }

    let end = buf.iter().position(|b| *b == 0).unwrap_or(buf.len());
    let name = String::from_utf8_lossy(&buf[..end]).trim().to_string();
    (!name.is_empty()).then_some(name)
}

#[cfg(windows)]
fn platform_host_name() -> Option<String> {
    std::env::var("COMPUTERNAME")
        .ok()
        .filter(|name| !name.is_empty())
}

#[cfg(not(any(unix, windows)))]
fn platform_host_name() -> Option<String> {
    None
}

#[cfg(unix)]
fn canonical_name(host_name: &str) -> Option<String> {
    use std::ffi::{CStr, CString};

    let node = CString::new(host_name).ok()?;
    // SAFETY: an all-zero addrinfo is the documented "no hints" value.
    let mut hints: libc::addrinfo = unsafe { std::mem::zeroed() };
    hints.ai_flags = libc::AI_CANONNAME;
    hints.ai_family = libc::AF_UNSPEC;

    let mut result: *mut libc::addrinfo = std::ptr::null_mut();
    // SAFETY: node and hints outlive the call; result is freed below.
    let rc = unsafe { libc::getaddrinfo(node.as_ptr(), std::ptr::null(), &hints, &mut result) };
    if rc != 0 || result.is_null() {
        tracing::debug!("No canonical name for {}", host_name);
        return None;
    }

    // SAFETY: result is the non-null head returned by getaddrinfo; with
    // AI_CANONNAME the first entry carries the canonical name, if any.
    let canon = unsafe {
        let name = (*result).ai_canonname;
        (!name.is_null()).then(|| CStr::from_ptr(name).to_string_lossy().into_owned())
    };
    // SAFETY: result came from a successful getaddrinfo and is freed once.
    unsafe { libc::freeaddrinfo(result) };

    canon.filter(|name| !name.is_empty())
}

#[cfg(not(unix))]
fn canonical_name(_host_name: &str) -> Option<String> {
    None
}

#[cfg(unix)]
fn interface_addresses() -> Vec<IpAddr> {
    use std::net::Ipv6Addr;

    let mut addrs = Vec::new();
    let mut head: *mut libc::ifaddrs = std::ptr::null_mut();

    // SAFETY: getifaddrs allocates a linked list owned by us until the
    // matching freeifaddrs call below.
    if unsafe { libc::getifaddrs(&mut head) } != 0 {
        tracing::debug!("getifaddrs failed; no interface addresses available");
        return addrs;
    }

    let mut cursor = head;
    while !cursor.is_null() {
        // SAFETY: cursor is a non-null node of the list returned above.
        let entry = unsafe { &*cursor };
        if !entry.ifa_addr.is_null() {
            // SAFETY: ifa_addr is non-null and points at a sockaddr whose
            // concrete layout is selected by sa_family.
            let family = i32::from(unsafe { (*entry.ifa_addr).sa_family });
            if family == libc::AF_INET {
                let sin = unsafe { &*(entry.ifa_addr as *const libc::sockaddr_in) };
                addrs.push(IpAddr::V4(Ipv4Addr::from(u32::from_be(
                    sin.sin_addr.s_addr,
                ))));
            } else if family == libc::AF_INET6 {
                let sin6 = unsafe { &*(entry.ifa_addr as *const libc::sockaddr_in6) };
                addrs.push(IpAddr::V6(Ipv6Addr::from(sin6.sin6_addr.s6_addr)));
            }
        }
        cursor = entry.ifa_next;
    }

    // SAFETY: head came from a successful getifaddrs and is freed once.
    unsafe { libc::freeifaddrs(head) };
    addrs
}

#[cfg(not(unix))]
fn interface_addresses() -> Vec<IpAddr> {
    Vec::new()
}
