use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;
use tokio::fs;

use crate::binary_attributes::BinaryAttributes;
use crate::decoder::DecoderConfig;

// -----------------------------------------------------------------------------
// ----- Settings --------------------------------------------------------------

/// Contents of the optional settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub max_pdu_size: Option<usize>,
    pub binary_attributes: BinaryAttributes,
}

// -----------------------------------------------------------------------------
// ----- Settings: Static ------------------------------------------------------

impl Settings {
    pub async fn from_file_async(path: &Path) -> Result<Settings, SettingsError> {
        let raw = fs::read_to_string(path)
            .await
            .map_err(|e| SettingsError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Settings, SettingsError> {
        let doc: SettingsFile = toml::from_str(raw).map_err(|e| SettingsError::Toml { source: e })?;

        if doc.decoder.max_pdu_size == Some(0) {
            return Err(SettingsError::InvalidField("decoder.max_pdu_size".into()));
        }
        if doc.binary_attributes.names.iter().any(|n| n.trim().is_empty()) {
            return Err(SettingsError::InvalidField("binary_attributes.names".into()));
        }

        let names = doc.binary_attributes.names.iter().map(|n| n.trim());
        let binary_attributes = if doc.binary_attributes.extend_defaults {
            BinaryAttributes::with_names(names)
        } else {
            BinaryAttributes::from_names(names)
        };

        Ok(Settings {
            max_pdu_size: doc.decoder.max_pdu_size,
            binary_attributes,
        })
    }
}

// -----------------------------------------------------------------------------
// ----- Settings: Public ------------------------------------------------------

impl Settings {
    pub fn decoder_config(&self) -> DecoderConfig {
        let config =
            DecoderConfig::default().with_binary_attributes(Arc::new(self.binary_attributes.clone()));

        match self.max_pdu_size {
            Some(limit) => config.with_max_pdu_size(limit),
            None => config,
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Internal: On-disk format ----------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    #[serde(default)]
    decoder: DecoderSection,

    #[serde(default)]
    binary_attributes: BinaryAttributesSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DecoderSection {
    #[serde(default)]
    max_pdu_size: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct BinaryAttributesSection {
    #[serde(default = "default_true")]
    extend_defaults: bool,

    #[serde(default)]
    names: Vec<String>,
}

impl Default for BinaryAttributesSection {
    fn default() -> Self {
        Self {
            extend_defaults: true,
            names: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

// -----------------------------------------------------------------------------
// ----- Errors ----------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid or missing field '{0}'")]
    InvalidField(String),

    #[error("read error for {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("toml parse error: {source}")]
    Toml { source: toml::de::Error },
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_attributes::BinaryAttributeDetector;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_tmp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn loads_file() {
        let toml = r#"
            [decoder]
            max_pdu_size = 2097152

            [binary_attributes]
            names = ["objectGUID", "objectSid"]
        "#;

        let tmp = write_tmp(toml);
        let settings = Settings::from_file_async(tmp.path()).await.unwrap();

        assert_eq!(settings.max_pdu_size, Some(2_097_152));
        assert!(settings.binary_attributes.is_binary("objectguid"));
        assert!(settings.binary_attributes.is_binary("userPassword"));
        assert!(!settings.binary_attributes.is_binary("cn"));

        let config = settings.decoder_config();
        assert_eq!(config.max_pdu_size, Some(2_097_152));
        assert!(config.binary_attributes.is_binary("objectSid"));
    }

    #[tokio::test]
    async fn replaces_defaults() {
        let toml = r#"
            [binary_attributes]
            extend_defaults = false
            names = ["photo"]
        "#;

        let tmp = write_tmp(toml);
        let settings = Settings::from_file_async(tmp.path()).await.unwrap();

        assert_eq!(settings.max_pdu_size, None);
        assert!(settings.binary_attributes.is_binary("photo"));
        assert!(!settings.binary_attributes.is_binary("userPassword"));
        assert!(settings.binary_attributes.is_binary("cn;binary"));
    }

    #[tokio::test]
    async fn missing_file() {
        let err = Settings::from_file_async(Path::new("/nonexistent/ldapcrab.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn empty_file_is_defaults() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn rejects_bad_values() {
        let zero = Settings::parse("[decoder]\nmax_pdu_size = 0\n").unwrap_err();
        assert!(matches!(zero, SettingsError::InvalidField(f) if f == "decoder.max_pdu_size"));

        let blank = Settings::parse("[binary_attributes]\nnames = [\"jpegPhoto\", \" \"]\n");
        assert!(matches!(blank, Err(SettingsError::InvalidField(_))));

        let unknown = Settings::parse("[decoder]\nmax_pdu = 10\n");
        assert!(matches!(unknown, Err(SettingsError::Toml { .. })));
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
