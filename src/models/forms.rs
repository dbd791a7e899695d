use serde::{Deserialize, Deserializer, Serialize};

/// Contact form submission as received from the client.
///
/// Missing fields decode as empty strings so the presence check can name
/// them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub email: String,
    #[serde(default, deserialize_with = "text")]
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsletterForm {
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub email: String,
}

/// A new recipe idea. `prompt` is the free-text description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeIdeaForm {
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, deserialize_with = "text")]
    pub prompt: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteRequest {
    #[serde(rename = "promptId", default, deserialize_with = "text")]
    pub prompt_id: String,
}

/// A form string where `null` means the same as an absent field.
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Structured outcome returned by every write operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_vote_count: Option<u64>,
}

impl ActionResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
            new_vote_count: None,
        }
    }

    pub fn voted(new_vote_count: u64) -> Self {
        Self {
            new_vote_count: Some(new_vote_count),
            ..Self::ok()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            new_vote_count: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vote_response_uses_camel_case() {
        let value = serde_json::to_value(ActionResponse::voted(5)).unwrap();
        assert_eq!(value, json!({ "success": true, "newVoteCount": 5 }));
    }

    #[test]
    fn test_missing_fields_decode_as_empty() {
        let form: ContactForm = serde_json::from_value(json!({ "name": "Ada" })).unwrap();
        assert_eq!(form.name, "Ada");
        assert!(form.email.is_empty());
        assert!(form.message.is_empty());

        let vote: VoteRequest = serde_json::from_value(json!({ "promptId": "p-1" })).unwrap();
        assert_eq!(vote.prompt_id, "p-1");
    }

    #[test]
    fn test_null_fields_decode_as_empty() {
        let form: RecipeIdeaForm =
            serde_json::from_value(json!({ "title": null, "prompt": "x" })).unwrap();
        assert!(form.title.is_empty());
        assert_eq!(form.prompt, "x");
    }
}
