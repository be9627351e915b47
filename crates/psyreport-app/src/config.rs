use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";

/// Runtime configuration, read once at startup.
///
/// | variable | meaning |
/// |---|---|
/// | `PSYREPORT_REGION` (or `AWS_REGION`) | Bedrock region |
/// | `PSYREPORT_MODEL_ID` | Converse model / inference profile ID |
/// | `PSYREPORT_AWS_PROFILE` | named AWS profile |
/// | `AWS_ACCESS_KEY_ID` + `AWS_SECRET_ACCESS_KEY` (+ `AWS_SESSION_TOKEN`) | inline key |
/// | `PSYREPORT_OUTPUT_DIR` | where reports are saved |
///
/// A profile wins over an inline key; with neither, the SDK default chain is
/// used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub region: String,
    pub model_id: String,
    pub credentials: CredentialSource,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialSource {
    Inline {
        access_key_id: String,
        secret_access_key: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        session_token: Option<String>,
    },
    Profile {
        profile_name: String,
    },
    DefaultChain,
}

/// Redacted config info safe to log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigInfo {
    pub region: String,
    pub model_id: String,
    pub credential_type: String,
    pub profile_name: Option<String>,
    pub access_key_hint: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup. Blank values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let region = get("PSYREPORT_REGION")
            .or_else(|| get("AWS_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        let model_id = get("PSYREPORT_MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());

        let credentials = match (
            get("PSYREPORT_AWS_PROFILE"),
            get("AWS_ACCESS_KEY_ID"),
            get("AWS_SECRET_ACCESS_KEY"),
        ) {
            (Some(profile_name), _, _) => CredentialSource::Profile { profile_name },
            (None, Some(access_key_id), Some(secret_access_key)) => CredentialSource::Inline {
                access_key_id,
                secret_access_key,
                session_token: get("AWS_SESSION_TOKEN"),
            },
            (None, Some(_), None) => {
                return Err(eyre::eyre!(
                    "AWS_ACCESS_KEY_ID is set but AWS_SECRET_ACCESS_KEY is not"
                ));
            }
            (None, None, Some(_)) => {
                return Err(eyre::eyre!(
                    "AWS_SECRET_ACCESS_KEY is set but AWS_ACCESS_KEY_ID is not"
                ));
            }
            (None, None, None) => CredentialSource::DefaultChain,
        };

        Ok(Self {
            region,
            model_id,
            credentials,
            output_dir: get("PSYREPORT_OUTPUT_DIR").map(PathBuf::from),
        })
    }

    /// Where reports go when no directory is given explicitly: the configured
    /// directory, else the user's documents folder, else the working directory.
    pub fn default_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(dirs::document_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn config_info(config: &AppConfig) -> ConfigInfo {
    let (credential_type, profile_name, access_key_hint) = match &config.credentials {
        CredentialSource::Inline {
            access_key_id,
            session_token,
            ..
        } => {
            let cred_type = if session_token.is_some() {
                "temporary".to_string()
            } else {
                "inline".to_string()
            };
            let hint = redact_access_key(access_key_id);
            (cred_type, None, Some(hint))
        }
        CredentialSource::Profile { profile_name } => {
            ("profile".to_string(), Some(profile_name.clone()), None)
        }
        CredentialSource::DefaultChain => ("default_chain".to_string(), None, None),
    };

    ConfigInfo {
        region: config.region.clone(),
        model_id: config.model_id.clone(),
        credential_type,
        profile_name,
        access_key_hint,
    }
}

fn redact_access_key(key: &str) -> String {
    if key.len() <= 8 || !key.is_ascii() {
        return "****".to_string();
    }
    let prefix = &key[..4];
    let suffix = &key[key.len() - 4..];
    format!("{prefix}...{suffix}")
}
