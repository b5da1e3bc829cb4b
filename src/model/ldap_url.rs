//! LDAP URLs (RFC 4516), as carried by referrals and search continuation
//! references.

use memchr::{memchr, memrchr};
use std::{fmt, str};
use thiserror::Error;

use super::dn::{Dn, DnError};

// -----------------------------------------------------------------------------
// ----- LdapUrl ---------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LdapUrl {
    raw: String,
    pub scheme: Scheme,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub dn: Dn,
    pub attributes: Vec<String>,
    pub scope: Option<UrlScope>,
    pub filter: Option<String>,
    pub extensions: Vec<UrlExtension>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scheme {
    #[default]
    Ldap,
    Ldaps,
    Ldapi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlScope {
    Base,
    One,
    Sub,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlExtension {
    pub critical: bool,
    pub name: String,
    pub value: Option<String>,
}

// -----------------------------------------------------------------------------
// ----- LdapUrl: Static -------------------------------------------------------

impl LdapUrl {
    /// Placeholder for a zero-length URL on the wire.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn parse(input: &str) -> Result<Self, UrlError> {
        let sep = input.find("://").ok_or(UrlError::MissingScheme)?;
        let scheme = match input[..sep].to_ascii_lowercase().as_str() {
            "ldap" => Scheme::Ldap,
            "ldaps" => Scheme::Ldaps,
            "ldapi" => Scheme::Ldapi,
            other => return Err(UrlError::UnsupportedScheme(other.to_string())),
        };

        let rest = &input[sep + 3..];
        let bytes = rest.as_bytes();
        let (hostport, path) = match memchr(b'/', bytes) {
            Some(slash) => (&rest[..slash], Some(&rest[slash + 1..])),
            None => (rest, None),
        };

        let (host, port) = split_hostport(hostport, scheme)?;

        let mut url = Self {
            raw: input.to_string(),
            scheme,
            host,
            port,
            ..Default::default()
        };

        let Some(path) = path else {
            return Ok(url);
        };

        let parts = split_query(path)?;

        if let Some(dn) = parts.first() {
            let dn = percent_decode(dn)?;
            url.dn = Dn::from_bytes(&dn).map_err(UrlError::InvalidDn)?;
        }

        if let Some(attrs) = parts.get(1) {
            url.attributes = decode_list(attrs)?
                .into_iter()
                .filter(|a| !a.is_empty())
                .collect();
        }

        if let Some(scope) = parts.get(2) {
            url.scope = match decode_str(scope)?.to_ascii_lowercase().as_str() {
                "" => None,
                "base" => Some(UrlScope::Base),
                "one" => Some(UrlScope::One),
                "sub" => Some(UrlScope::Sub),
                other => return Err(UrlError::InvalidScope(other.to_string())),
            };
        }

        if let Some(filter) = parts.get(3) {
            let filter = decode_str(filter)?;
            url.filter = (!filter.is_empty()).then_some(filter);
        }

        if let Some(exts) = parts.get(4) {
            url.extensions = parse_extensions(exts)?;
        }

        Ok(url)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, UrlError> {
        let input = str::from_utf8(bytes).map_err(|_| UrlError::InvalidUtf8)?;
        Self::parse(input)
    }
}

// -----------------------------------------------------------------------------
// ----- LdapUrl: Public -------------------------------------------------------

impl LdapUrl {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for LdapUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// -----------------------------------------------------------------------------
// ----- Private Utils ---------------------------------------------------------

fn split_hostport(hostport: &str, scheme: Scheme) -> Result<(Option<String>, Option<u16>), UrlError> {
    if hostport.is_empty() {
        return Ok((None, None));
    }

    // ldapi hosts are percent-encoded socket paths, no port
    if scheme == Scheme::Ldapi {
        return Ok((Some(decode_str(hostport)?), None));
    }

    let bytes = hostport.as_bytes();
    let port_sep = match (bytes[0], memrchr(b']', bytes)) {
        (b'[', Some(close)) => match bytes.get(close + 1) {
            None => None,
            Some(b':') => Some(close + 1),
            Some(_) => return Err(UrlError::InvalidHost(hostport.to_string())),
        },
        (b'[', None) => return Err(UrlError::InvalidHost(hostport.to_string())),
        _ => memrchr(b':', bytes),
    };

    let (host, port) = match port_sep {
        Some(colon) => (&hostport[..colon], Some(&hostport[colon + 1..])),
        None => (hostport, None),
    };

    let port = match port {
        None | Some("") => None,
        Some(p) => Some(
            p.parse::<u16>()
                .map_err(|_| UrlError::InvalidPort(p.to_string()))?,
        ),
    };

    let host = (!host.is_empty()).then(|| host.to_string());
    Ok((host, port))
}

fn split_query(path: &str) -> Result<Vec<&str>, UrlError> {
    let mut parts = Vec::with_capacity(5);
    let mut rest = path;

    while let Some(q) = memchr(b'?', rest.as_bytes()) {
        parts.push(&rest[..q]);
        rest = &rest[q + 1..];
    }
    parts.push(rest);

    if parts.len() > 5 {
        return Err(UrlError::TooManyParts);
    }

    Ok(parts)
}

fn decode_list(raw: &str) -> Result<Vec<String>, UrlError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',').map(decode_str).collect()
}

fn parse_extensions(raw: &str) -> Result<Vec<UrlExtension>, UrlError> {
    let mut out = Vec::new();

    for ext in raw.split(',') {
        if ext.is_empty() {
            return Err(UrlError::InvalidExtension(raw.to_string()));
        }

        let (critical, ext) = match ext.strip_prefix('!') {
            Some(stripped) => (true, stripped),
            None => (false, ext),
        };

        let (name, value) = match memchr(b'=', ext.as_bytes()) {
            Some(eq) => (&ext[..eq], Some(decode_str(&ext[eq + 1..])?)),
            None => (ext, None),
        };

        if name.is_empty() {
            return Err(UrlError::InvalidExtension(raw.to_string()));
        }

        out.push(UrlExtension {
            critical,
            name: decode_str(name)?,
            value,
        });
    }

    Ok(out)
}

fn decode_str(raw: &str) -> Result<String, UrlError> {
    let bytes = percent_decode(raw)?;
    String::from_utf8(bytes).map_err(|_| UrlError::InvalidUtf8)
}

fn percent_decode(raw: &str) -> Result<Vec<u8>, UrlError> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        let hex = bytes
            .get(i + 1..i + 3)
            .and_then(|h| str::from_utf8(h).ok())
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .ok_or(UrlError::InvalidPercentEncoding(i))?;
        out.push(hex);
        i += 3;
    }

    Ok(out)
}

// -----------------------------------------------------------------------------
// ----- Errors ----------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("invalid dn: {0}")]
    InvalidDn(#[from] DnError),

    #[error("invalid extension list '{0}'")]
    InvalidExtension(String),

    #[error("invalid host '{0}'")]
    InvalidHost(String),

    #[error("invalid percent encoding at {0}")]
    InvalidPercentEncoding(usize),

    #[error("invalid port '{0}'")]
    InvalidPort(String),

    #[error("invalid scope '{0}'")]
    InvalidScope(String),

    #[error("not valid utf8")]
    InvalidUtf8,

    #[error("missing scheme")]
    MissingScheme,

    #[error("too many '?' separated parts")]
    TooManyParts,

    #[error("unsupported scheme '{0}'")]
    UnsupportedScheme(String),
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
