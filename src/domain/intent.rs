//! Intent request/response models
//!
//! `Request` and `Response` are what the intent handlers see. The
//! `Service*` types mirror the assistant platform's JSON envelope and are
//! converted at the HTTP boundary.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Slot carrying the spoken project name
pub const APPLICATION_NAME_SLOT: &str = "ApplicationName";

/// Response envelope version expected by the assistant platform
pub const RESPONSE_VERSION: &str = "1.0";

/// Intent request, already parsed and authenticated
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Request {
    pub session_application_id: String,
    pub intent_name: String,
    /// Culture code, e.g. "de-DE"
    pub locale: String,
    /// Spoken project name
    pub slot_value: String,
}

/// Intent response: one text used both as card body and speech
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub speech_text: String,
    pub card_title: String,
    pub card_body: String,
    pub should_end_session: bool,
}

impl Response {
    /// Single-turn speech response with a matching card
    pub fn speech(card_title: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            speech_text: text.clone(),
            card_title: card_title.into(),
            card_body: text,
            should_end_session: true,
        }
    }
}

// ========== Wire format ==========

/// Inbound request envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceRequest {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub session: Session,
    #[serde(rename = "request", default)]
    pub request_body: RequestBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub application: Application,
    #[serde(default)]
    pub new: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Application {
    #[serde(rename = "applicationId", default)]
    pub application_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(rename = "type", default)]
    pub request_type: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub intent: Intent,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Intent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub name: String,
    /// Absent when the platform could not fill the slot
    #[serde(default)]
    pub value: Option<String>,
}

impl From<ServiceRequest> for Request {
    fn from(request: ServiceRequest) -> Self {
        let body = request.request_body;
        let slot_value = body
            .intent
            .slots
            .get(APPLICATION_NAME_SLOT)
            .and_then(|slot| slot.value.clone())
            .unwrap_or_default();

        Self {
            session_application_id: request.session.application.application_id,
            intent_name: body.intent.name,
            locale: body.locale,
            slot_value,
        }
    }
}

/// Outbound response envelope
#[derive(Debug, Clone, Serialize)]
pub struct ServiceResponse {
    pub version: String,
    #[serde(rename = "response")]
    pub response_body: ResponseBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub output_speech: OutputSpeech,
    pub card: Card,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub speech_type: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub card_type: String,
    pub title: String,
    pub content: String,
}

impl From<Response> for ServiceResponse {
    fn from(response: Response) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            response_body: ResponseBody {
                output_speech: OutputSpeech {
                    speech_type: "PlainText".to_string(),
                    text: response.speech_text,
                },
                card: Card {
                    card_type: "Simple".to_string(),
                    title: response.card_title,
                    content: response.card_body,
                },
                should_end_session: response.should_end_session,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_REQUEST: &str = r#"{
        "version": "1.0",
        "session": {
            "sessionId": "SessionId.1",
            "application": { "applicationId": "amzn1.ask.skill.test" },
            "attributes": {},
            "user": { "userId": "amzn1.ask.account.test" },
            "new": true
        },
        "request": {
            "type": "IntentRequest",
            "requestId": "EdwRequestId.1",
            "locale": "de-DE",
            "timestamp": "2017-01-01T12:00:00Z",
            "intent": {
                "name": "Deployment",
                "slots": {
                    "ApplicationName": { "name": "ApplicationName", "value": "Ak7.IO" }
                }
            }
        }
    }"#;

    #[test]
    fn test_service_request_into_request() {
        let wire: ServiceRequest = serde_json::from_str(SAMPLE_REQUEST).unwrap();
        let request = Request::from(wire);

        assert_eq!(request.session_application_id, "amzn1.ask.skill.test");
        assert_eq!(request.intent_name, "Deployment");
        assert_eq!(request.locale, "de-DE");
        assert_eq!(request.slot_value, "Ak7.IO");
    }

    #[test]
    fn test_missing_slot_value_is_empty() {
        let wire: ServiceRequest = serde_json::from_str(
            r#"{"request": {"intent": {"name": "Deployment", "slots": {"ApplicationName": {"name": "ApplicationName"}}}}}"#,
        )
        .unwrap();
        let request = Request::from(wire);

        assert_eq!(request.intent_name, "Deployment");
        assert_eq!(request.slot_value, "");
    }

    #[test]
    fn test_service_response_shape() {
        let response = Response::speech("Deploy", "done");
        let json = serde_json::to_value(ServiceResponse::from(response)).unwrap();

        assert_eq!(json["version"], "1.0");
        assert_eq!(json["response"]["outputSpeech"]["type"], "PlainText");
        assert_eq!(json["response"]["outputSpeech"]["text"], "done");
        assert_eq!(json["response"]["card"]["type"], "Simple");
        assert_eq!(json["response"]["card"]["title"], "Deploy");
        assert_eq!(json["response"]["card"]["content"], "done");
        assert_eq!(json["response"]["shouldEndSession"], true);
    }
}
