//! Per-provider model allow-lists
//!
//! `<PROVIDER>_ALLOWED_MODELS` holds a comma separated list of names. A user
//! request passes when either the name they typed or the canonical model it
//! resolves to is listed, so allowing a canonical name also allows all of its
//! aliases, while allowing one alias allows only that alias.

use super::capabilities::ProviderType;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelRestrictions {
    /// Lowercased allowed names; `None` means unrestricted
    allowed: Option<HashSet<String>>,
}

impl ModelRestrictions {
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Restrict to the given names. An empty list means unrestricted.
    pub fn allow<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed: HashSet<String> = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();

        if allowed.is_empty() {
            Self::unrestricted()
        } else {
            Self {
                allowed: Some(allowed),
            }
        }
    }

    /// Parse a comma separated allow-list
    pub fn parse(value: &str) -> Self {
        Self::allow(value.split(','))
    }

    pub fn env_var(provider: ProviderType) -> String {
        format!("{}_ALLOWED_MODELS", provider.env_prefix())
    }

    pub fn from_env(provider: ProviderType) -> Self {
        let var = Self::env_var(provider);
        match std::env::var(&var) {
            Ok(value) => {
                let restrictions = Self::parse(&value);
                if let Some(names) = restrictions.allowed_models() {
                    tracing::info!("{} restricts {} to: {}", var, provider, names.join(", "));
                }
                restrictions
            }
            Err(_) => Self::unrestricted(),
        }
    }

    pub fn is_restricted(&self) -> bool {
        self.allowed.is_some()
    }

    /// Whether a request for `original`, resolving to `canonical`, may proceed
    pub fn is_allowed(&self, original: &str, canonical: &str) -> bool {
        match &self.allowed {
            None => true,
            Some(allowed) => {
                allowed.contains(&original.to_lowercase())
                    || allowed.contains(&canonical.to_lowercase())
            }
        }
    }

    /// Allowed names in sorted order, `None` when unrestricted
    pub fn allowed_models(&self) -> Option<Vec<&str>> {
        self.allowed.as_ref().map(|allowed| {
            let mut names: Vec<&str> = allowed.iter().map(String::as_str).collect();
            names.sort_unstable();
            names
        })
    }
}
