//! Randomized request profiles.
//!
//! Each outbound search request presents a user agent drawn from a corpus of
//! real browser strings, a plausible public client address in
//! `X-Forwarded-For`, and the accept headers a desktop browser would send.

use rand::Rng;
use std::net::Ipv4Addr;

pub const USER_AGENT: &str = "User-Agent";
pub const ACCEPT: &str = "Accept";
pub const ACCEPT_ENCODING: &str = "Accept-Encoding";
pub const ACCEPT_LANGUAGE: &str = "Accept-Language";
pub const X_FORWARDED_FOR: &str = "X-Forwarded-For";
pub const CONNECTION: &str = "Connection";

const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_ENCODING_VALUE: &str = "gzip, deflate";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9,id-ID;q=0.8";
const CONNECTION_VALUE: &str = "keep-alive";

/// Browser user agents seen in the wild.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36 Edg/137.0.0.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:139.0) Gecko/20100101 Firefox/139.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36 OPR/121.0.0.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.5 Safari/605.1.15",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.7; rv:139.0) Gecko/20100101 Firefox/139.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:139.0) Gecko/20100101 Firefox/139.0",
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 18_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.5 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (iPad; CPU OS 18_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.5 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Mobile Safari/537.36",
    "Mozilla/5.0 (Linux; Android 14; SM-S921B) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Mobile Safari/537.36",
    "Mozilla/5.0 (Linux; Android 13; SM-A546E) AppleWebKit/537.36 (KHTML, like Gecko) SamsungBrowser/27.0 Chrome/125.0.0.0 Mobile Safari/537.36",
    "Mozilla/5.0 (Android 14; Mobile; rv:139.0) Gecko/139.0 Firefox/139.0",
];

/// Headers for one outbound request. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestProfile {
    headers: Vec<(&'static str, String)>,
}

impl RequestProfile {
    /// A profile carrying only a fixed user agent.
    pub fn fixed(user_agent: impl Into<String>) -> Self {
        Self { headers: vec![(USER_AGENT, user_agent.into())] }
    }

    /// Look up a header value by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn user_agent(&self) -> &str {
        self.get(USER_AGENT).unwrap_or_default()
    }

    /// The spoofed client address, or an empty string for fixed profiles.
    pub fn spoofed_ip(&self) -> &str {
        self.get(X_FORWARDED_FOR).unwrap_or_default()
    }

    /// All headers in the order a browser would send them.
    pub fn headers(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.headers.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Generates randomized request profiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileGenerator;

impl ProfileGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate a profile using the thread-local RNG.
    pub fn generate(&self) -> RequestProfile {
        self.generate_with(&mut rand::thread_rng())
    }

    /// Generate a profile from the given RNG.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> RequestProfile {
        let user_agent = USER_AGENTS[rng.gen_range(0..USER_AGENTS.len())];
        let ip = random_public_ipv4(rng);

        RequestProfile {
            headers: vec![
                (USER_AGENT, user_agent.to_string()),
                (ACCEPT, ACCEPT_VALUE.to_string()),
                (ACCEPT_ENCODING, ACCEPT_ENCODING_VALUE.to_string()),
                (ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE.to_string()),
                (X_FORWARDED_FOR, ip.to_string()),
                (CONNECTION, CONNECTION_VALUE.to_string()),
            ],
        }
    }
}

/// Draw addresses until one is publicly routable.
fn random_public_ipv4<R: Rng + ?Sized>(rng: &mut R) -> Ipv4Addr {
    loop {
        let ip = Ipv4Addr::from(rng.r#gen::<u32>());
        if is_public_ipv4(ip) {
            return ip;
        }
    }
}

/// Check if an IPv4 address is globally routable unicast.
///
/// This rejects:
/// - "This network" (0.0.0.0/8)
/// - RFC 1918 private ranges (10/8, 172.16/12, 192.168/16)
/// - Shared address space (100.64/10)
/// - Loopback (127/8) and link-local (169.254/16)
/// - IETF protocol assignments (192.0.0/24)
/// - Documentation ranges (192.0.2/24, 198.51.100/24, 203.0.113/24)
/// - Benchmarking (198.18/15)
/// - Multicast (224/4), reserved (240/4) and broadcast
pub fn is_public_ipv4(ip: Ipv4Addr) -> bool {
    let [a, b, c, _] = ip.octets();

    !(a == 0
        || ip.is_private()
        || (a == 100 && (b & 0xc0) == 64)
        || ip.is_loopback()
        || ip.is_link_local()
        || (a == 192 && b == 0 && c == 0)
        || ip.is_documentation()
        || (a == 198 && (b & 0xfe) == 18)
        || ip.is_multicast()
        || a >= 240)
}
