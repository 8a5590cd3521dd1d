//! Navigation targets of the business-case flow.

use std::fmt;

/// Screen the front-end should show next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// System selection list. Target of every precondition redirect.
    BusinessCase,
    /// System overview, also where calculation results are shown.
    Overview { system: String },
    AgentSelection { system: String },
    Chat { system: String },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::BusinessCase => "/roi-business-case".to_string(),
            Route::Overview { system } => format!("/roi-business-case/{system}/overview"),
            Route::AgentSelection { system } => {
                format!("/roi-business-case/{system}/select-agent")
            }
            Route::Chat { system } => format!("/roi-business-case/{system}/chat"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
