//! Affiliate agent entity and its draft form.

use serde::{Deserialize, Serialize};

use super::attachment::ImageAttachment;
use super::error::{ValidationError, require_non_blank, require_non_negative};
use super::id::EntityId;
use super::ports::MultipartForm;
use super::status::Status;

/// An affiliate partner with optional per-currency conversion rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Server-assigned identifier.
    pub id: EntityId,
    /// Display name.
    pub agent_name: String,
    /// Image URL, when one has been uploaded.
    #[serde(default)]
    pub agent_image: Option<String>,
    /// Activation state.
    pub status: Status,
    /// US dollar rate, when configured.
    #[serde(default)]
    pub usd_rate: Option<f64>,
    /// Euro rate, when configured.
    #[serde(default)]
    pub euro_rate: Option<f64>,
    /// Australian dollar rate, when configured.
    #[serde(default)]
    pub aud_rate: Option<f64>,
    /// Canadian dollar rate, when configured.
    #[serde(default)]
    pub cad_rate: Option<f64>,
}

/// Fields submitted when creating or updating an agent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentDraft {
    /// Required display name.
    pub agent_name: String,
    /// Optional image to upload.
    pub agent_image: Option<ImageAttachment>,
    /// US dollar rate.
    pub usd_rate: Option<f64>,
    /// Euro rate.
    pub euro_rate: Option<f64>,
    /// Australian dollar rate.
    pub aud_rate: Option<f64>,
    /// Canadian dollar rate.
    pub cad_rate: Option<f64>,
}

impl AgentDraft {
    /// Draft with the given name and nothing else.
    #[must_use]
    pub fn named(agent_name: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            ..Self::default()
        }
    }

    /// Check required fields and rate sanity.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Required`] for a blank name, or
    /// [`ValidationError::InvalidNumber`] for a negative or non-finite rate.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("agent_name", &self.agent_name)?;
        for (field, rate) in [
            ("usd_rate", self.usd_rate),
            ("euro_rate", self.euro_rate),
            ("aud_rate", self.aud_rate),
            ("cad_rate", self.cad_rate),
        ] {
            if let Some(rate) = rate {
                require_non_negative(field, rate)?;
            }
        }
        Ok(())
    }

    /// Render the draft as the multipart form the API expects.
    ///
    /// Unset rates are omitted rather than sent as empties, matching the
    /// remote API's treatment of absent fields.
    #[must_use]
    pub fn to_form(&self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .field("agent_name", self.agent_name.clone())
            .opt_field("usd_rate", self.usd_rate.map(|r| r.to_string()))
            .opt_field("euro_rate", self.euro_rate.map(|r| r.to_string()))
            .opt_field("aud_rate", self.aud_rate.map(|r| r.to_string()))
            .opt_field("cad_rate", self.cad_rate.map(|r| r.to_string()));
        if let Some(image) = &self.agent_image {
            form = form.file(image.to_part("agent_image"));
        }
        form
    }
}

#[cfg(test)]
mod tests {
    //! Covers rate validation and multipart rendering.
    use rstest::rstest;

    use super::AgentDraft;
    use crate::domain::error::ValidationError;

    #[rstest]
    fn blank_name_fails_validation() {
        let error = AgentDraft::named(" ").validate().expect_err("rejected");
        assert_eq!(error, ValidationError::Required {
            field: "agent_name"
        });
    }

    #[rstest]
    #[case(-0.5)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn bad_rates_fail_validation(#[case] rate: f64) {
        let mut draft = AgentDraft::named("PartnerCo");
        draft.euro_rate = Some(rate);
        let error = draft.validate().expect_err("rejected");
        assert_eq!(error, ValidationError::InvalidNumber {
            field: "euro_rate"
        });
    }

    #[rstest]
    fn form_includes_only_set_rates() {
        let mut draft = AgentDraft::named("PartnerCo");
        draft.usd_rate = Some(1.07);
        let form = draft.to_form();

        assert_eq!(form.field_value("agent_name"), Some("PartnerCo"));
        assert_eq!(form.field_value("usd_rate"), Some("1.07"));
        assert_eq!(form.field_value("euro_rate"), None);
        assert_eq!(form.field_value("cad_rate"), None);
    }
}
