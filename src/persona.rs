use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The three fixed audience segments newsletters are tailored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Founders,
    Creatives,
    Operations,
}

impl Persona {
    pub const ALL: [Persona; 3] = [Persona::Founders, Persona::Creatives, Persona::Operations];

    pub fn key(&self) -> &'static str {
        match self {
            Persona::Founders => "founders",
            Persona::Creatives => "creatives",
            Persona::Operations => "operations",
        }
    }

    /// Capitalized label for dashboard display.
    pub fn title(&self) -> &'static str {
        match self {
            Persona::Founders => "Founders",
            Persona::Creatives => "Creatives",
            Persona::Operations => "Operations",
        }
    }
}

impl Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_str(self.key())
    }
}
