//! Turn a raw URL string into a [`FeatureVector`].

use super::signals::{SignalProvider, SimulatedSignals};
use super::vector::FeatureVector;
use regex::Regex;
use std::sync::{Arc, OnceLock};
use tracing::warn;
use url::Host;

/// Top-level domains commonly handed out for free and abused by phishing kits.
pub const SUSPICIOUS_TLDS: &[&str] = &[".tk", ".ml", ".ga", ".cf", ".gq", ".top", ".xyz"];

/// Brands frequently impersonated in phishing domains.
pub const COMMON_BRANDS: &[&str] = &[
    "paypal",
    "apple",
    "microsoft",
    "amazon",
    "google",
    "facebook",
    "netflix",
];

/// Substrings in the raw URL that hint at an open redirect.
const REDIRECT_MARKERS: &[&str] = &["redirect", "forward"];

/// Extracts features from URLs. Cheap to clone; the signal provider is shared.
#[derive(Clone)]
pub struct FeatureExtractor {
    signals: Arc<dyn SignalProvider>,
}

impl FeatureExtractor {
    /// Extractor backed by the given signal provider.
    pub fn new(signals: Arc<dyn SignalProvider>) -> Self {
        Self { signals }
    }

    /// Extractor using [`SimulatedSignals`], seeded when `seed` is given.
    pub fn simulated(seed: Option<u64>) -> Self {
        Self::new(Arc::new(SimulatedSignals::from_seed(seed)))
    }

    /// Extract the feature vector for `url`.
    ///
    /// Never fails. If the URL cannot be split into scheme and network
    /// location, only `url_length` is filled in and every other field stays 0.
    pub fn extract(&self, url: &str) -> FeatureVector {
        let mut features = FeatureVector {
            url_length: saturating_u32(url.chars().count()),
            ..FeatureVector::default()
        };

        let parts = match UrlParts::split(url) {
            Ok(parts) => parts,
            Err(e) => {
                warn!(url, error = %e, "could not parse URL, using default features");
                return features;
            }
        };
        let domain = parts.domain.as_str();

        features.domain_length = saturating_u32(domain.chars().count());
        features.has_https = flag(parts.scheme == "https");
        features.dots_count = saturating_u32(domain.matches('.').count());
        features.has_at = flag(url.contains('@'));
        features.has_ip = flag(looks_like_ip(domain));
        features.suspicious_tld = flag(has_suspicious_tld(domain));
        features.prefix_suffix = flag(has_brand_prefix_suffix(domain));
        features.redirects = flag(REDIRECT_MARKERS.iter().any(|m| url.contains(m)));

        let signals = self
            .signals
            .page_signals(url, features.looks_suspicious());
        features.domain_age_days = signals.domain_age_days;
        features.has_form = signals.has_form;
        features.has_iframe = signals.has_iframe;

        features
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::simulated(None)
    }
}

impl std::fmt::Debug for FeatureExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureExtractor").finish_non_exhaustive()
    }
}

/// Network location rejected while splitting.
#[derive(Debug, thiserror::Error)]
enum SplitError {
    #[error("unbalanced brackets in network location {0:?}")]
    UnbalancedBrackets(String),

    #[error("bracketed host {0:?} is neither IPv6 nor IPvFuture")]
    InvalidBracketedHost(String),
}

/// Scheme and network location of a URL, split without normalization.
#[derive(Debug, Default, PartialEq, Eq)]
struct UrlParts {
    /// Lowercased scheme, empty when the input has none.
    scheme: String,
    /// Raw text between `//` and the next `/`, `?` or `#`.
    domain: String,
}

impl UrlParts {
    /// Split the way `urllib.parse.urlsplit` does: a scheme up to the first
    /// `:`, then an optional `//netloc`. Hosts, ports and case are kept as
    /// written; only malformed brackets are rejected.
    fn split(raw: &str) -> Result<Self, SplitError> {
        let cleaned: String = raw
            .trim_start_matches(|c: char| c <= ' ')
            .chars()
            .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
            .collect();

        let (scheme, rest) = match cleaned.split_once(':') {
            Some((head, tail)) if is_scheme(head) => (head.to_ascii_lowercase(), tail),
            _ => (String::new(), cleaned.as_str()),
        };

        let domain = match rest.strip_prefix("//") {
            Some(after) => {
                let end = after.find(['/', '?', '#']).unwrap_or(after.len());
                &after[..end]
            }
            None => "",
        };
        check_brackets(domain)?;

        Ok(Self {
            scheme,
            domain: domain.to_string(),
        })
    }
}

/// ASCII letter followed by letters, digits, `+`, `-` or `.`.
fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn ip_future_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\Av[a-fA-F0-9]+\..+\z").expect("IPvFuture regex is valid"))
}

/// Brackets must pair up and enclose an IPv6 or IPvFuture literal.
fn check_brackets(netloc: &str) -> Result<(), SplitError> {
    let open = netloc.contains('[');
    let close = netloc.contains(']');
    if open != close {
        return Err(SplitError::UnbalancedBrackets(netloc.to_string()));
    }
    if !open {
        return Ok(());
    }

    let inside = netloc
        .split_once('[')
        .map(|(_, tail)| tail.split_once(']').map_or(tail, |(host, _)| host))
        .unwrap_or_default();
    let valid = if inside.starts_with('v') {
        ip_future_re().is_match(inside)
    } else {
        let unscoped = inside.split_once('%').map_or(inside, |(addr, _)| addr);
        matches!(Host::parse(&format!("[{unscoped}]")), Ok(Host::Ipv6(_)))
    };
    if valid {
        Ok(())
    } else {
        Err(SplitError::InvalidBracketedHost(inside.to_string()))
    }
}

fn dotted_quad_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+\.\d+\.\d+\.\d+").expect("dotted quad regex is valid"))
}

/// Domain is an IPv4 literal (including shorthand such as `127.1` or hex
/// parts), or contains something shaped like a dotted quad.
pub fn looks_like_ip(domain: &str) -> bool {
    matches!(Host::parse(domain), Ok(Host::Ipv4(_))) || dotted_quad_re().is_match(domain)
}

/// Domain contains one of [`SUSPICIOUS_TLDS`].
pub fn has_suspicious_tld(domain: &str) -> bool {
    SUSPICIOUS_TLDS.iter().any(|tld| domain.contains(tld))
}

/// Domain embeds a known brand but is not that brand's own `.com` domain.
///
/// This is a plain, case-sensitive substring test: look-alikes such as
/// `faceb00k` or `amaz0n` are not caught.
pub fn has_brand_prefix_suffix(domain: &str) -> bool {
    COMMON_BRANDS.iter().any(|brand| {
        domain.contains(brand)
            && !domain.starts_with(&format!("www.{brand}."))
            && domain != format!("{brand}.com")
    })
}

fn flag(b: bool) -> u32 {
    u32::from(b)
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
