//! Session context: the selected system, agent mode and company profile.
//!
//! The context is created during selection, lives for the whole browsing
//! session, and is read-only to the turn orchestrator.

use crate::error::{Result, RoiError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Conversation style chosen for the session.
///
/// The remote agent knows the guided mode as `beginner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentMode {
    /// Step-by-step collection, one question at a time.
    #[serde(rename = "beginner", alias = "guided")]
    Guided,
    /// Bulk submission of a filled-in template.
    Expert,
}

impl AgentMode {
    /// Value sent as `user_type` to the agent turn endpoint.
    pub fn wire_name(self) -> &'static str {
        match self {
            AgentMode::Guided => "beginner",
            AgentMode::Expert => "expert",
        }
    }

    /// Name shown for the assistant in this mode.
    pub fn agent_display_name(self) -> &'static str {
        match self {
            AgentMode::Guided => "ROI First Assistant",
            AgentMode::Expert => "GPT ROI First",
        }
    }
}

impl fmt::Display for AgentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentMode::Guided => write!(f, "guided"),
            AgentMode::Expert => write!(f, "expert"),
        }
    }
}

impl FromStr for AgentMode {
    type Err = RoiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guided" | "beginner" => Ok(AgentMode::Guided),
            "expert" => Ok(AgentMode::Expert),
            other => Err(RoiError::invalid_input(format!("unknown agent mode '{other}'"))),
        }
    }
}

/// Company size buckets offered during agent selection.
pub const COMPANY_SIZES: &[&str] = &["1-50", "51-200", "201-500", "501-1000", "1000+"];

/// Sector codes with their display labels.
pub const SECTORS: &[(&str, &str)] = &[
    ("tecnologia", "Technology"),
    ("finanzas", "Finance"),
    ("salud", "Health"),
    ("manufactura", "Manufacturing"),
    ("retail", "Retail"),
    ("servicios", "Services"),
    ("educacion", "Education"),
    ("otro", "Other"),
];

const MAX_SECONDARY_SECTORS: usize = 2;

/// Company attributes captured before the conversation starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    pub size: String,
    pub sector: String,
    #[serde(default)]
    pub secondary_sectors: Vec<String>,
}

impl CompanyProfile {
    /// Builds a validated profile.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the name is blank, the size or a sector is
    /// not a known code, more than two secondary sectors are given, or a
    /// secondary sector repeats the primary or another secondary sector.
    pub fn new(
        name: impl Into<String>,
        size: impl Into<String>,
        sector: impl Into<String>,
        secondary_sectors: Vec<String>,
    ) -> Result<Self> {
        let profile = Self {
            name: name.into(),
            size: size.into(),
            sector: sector.into(),
            secondary_sectors,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Checks the profile against the selection rules.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(RoiError::invalid_input("company name is required"));
        }
        if !COMPANY_SIZES.contains(&self.size.as_str()) {
            return Err(RoiError::invalid_input(format!(
                "unknown company size '{}'",
                self.size
            )));
        }
        ensure_known_sector(&self.sector)?;

        if self.secondary_sectors.len() > MAX_SECONDARY_SECTORS {
            return Err(RoiError::invalid_input(format!(
                "at most {MAX_SECONDARY_SECTORS} secondary sectors are allowed"
            )));
        }
        for (index, secondary) in self.secondary_sectors.iter().enumerate() {
            ensure_known_sector(secondary)?;
            if *secondary == self.sector {
                return Err(RoiError::invalid_input(format!(
                    "secondary sector '{secondary}' repeats the primary sector"
                )));
            }
            if self.secondary_sectors[..index].contains(secondary) {
                return Err(RoiError::invalid_input(format!(
                    "secondary sector '{secondary}' is listed twice"
                )));
            }
        }
        Ok(())
    }
}

fn ensure_known_sector(code: &str) -> Result<()> {
    if SECTORS.iter().any(|(value, _)| *value == code) {
        Ok(())
    } else {
        Err(RoiError::invalid_input(format!("unknown sector '{code}'")))
    }
}

/// The session-scoped selection the conversation runs under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Identifier of the selected process/system (e.g. `order_to_cash`).
    pub system_id: String,
    pub agent_mode: AgentMode,
    pub company_profile: Option<CompanyProfile>,
}

impl SessionContext {
    pub fn new(system_id: impl Into<String>, agent_mode: AgentMode) -> Self {
        Self {
            system_id: system_id.into(),
            agent_mode,
            company_profile: None,
        }
    }

    pub fn with_company_profile(mut self, profile: CompanyProfile) -> Self {
        self.company_profile = Some(profile);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(secondary: &[&str]) -> Result<CompanyProfile> {
        CompanyProfile::new(
            "Acme",
            "51-200",
            "finanzas",
            secondary.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_agent_mode_wire_names() {
        assert_eq!(AgentMode::Guided.wire_name(), "beginner");
        assert_eq!(AgentMode::Expert.wire_name(), "expert");
        assert_eq!(
            serde_json::to_string(&AgentMode::Guided).unwrap(),
            "\"beginner\""
        );
        let parsed: AgentMode = serde_json::from_str("\"guided\"").unwrap();
        assert_eq!(parsed, AgentMode::Guided);
    }

    #[test]
    fn test_agent_mode_from_str() {
        assert_eq!("Expert".parse::<AgentMode>().unwrap(), AgentMode::Expert);
        assert_eq!("beginner".parse::<AgentMode>().unwrap(), AgentMode::Guided);
        assert!("novice".parse::<AgentMode>().is_err());
    }

    #[test]
    fn test_profile_accepts_two_distinct_secondaries() {
        let profile = profile(&["salud", "retail"]).unwrap();
        assert_eq!(profile.secondary_sectors.len(), 2);
    }

    #[test]
    fn test_profile_rejects_invalid_values() {
        assert!(profile(&["salud", "retail", "otro"]).is_err());
        assert!(profile(&["finanzas"]).is_err());
        assert!(profile(&["salud", "salud"]).is_err());
        assert!(profile(&["mining"]).is_err());
        assert!(CompanyProfile::new("  ", "51-200", "finanzas", vec![]).is_err());
        assert!(CompanyProfile::new("Acme", "2-3", "finanzas", vec![]).is_err());
    }
}
