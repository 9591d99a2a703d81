use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, NonEmptyString, TypeConstraintError};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub last_name: String,
    pub first_name: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Client {
    /// Label shown in client pickers: `"<last> <first> (<id>)"`.
    ///
    /// A missing first name still leaves its separating space in place.
    pub fn display_label(&self) -> String {
        format!(
            "{} {} ({})",
            self.last_name,
            self.first_name.as_deref().unwrap_or_default(),
            self.id
        )
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewClient {
    pub last_name: NonEmptyString,
    pub first_name: Option<String>,
}

impl NewClient {
    pub fn try_new(
        last_name: impl Into<String>,
        first_name: Option<String>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            last_name: NonEmptyString::new(last_name)?,
            first_name: first_name
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
    }
}
