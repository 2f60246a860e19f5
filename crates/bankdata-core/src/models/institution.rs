use serde::{Deserialize, Serialize};

/// A bank supported by the API in a given country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Institution {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bic: Option<String>,
}

impl Institution {
    pub fn display_bic(&self) -> &str {
        match self.bic.as_deref() {
            Some(bic) if !bic.is_empty() => bic,
            _ => "-",
        }
    }
}
