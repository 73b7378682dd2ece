use baraja_catalog::{CardId, Deck, DeckCardRow, DeckId, NewDeck, UserId};
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::time::Duration;

use crate::api::DeckApi;
use crate::error::ClientError;
use crate::settings::Settings;

const UNKNOWN_SERVER_ERROR: &str = "Unknown server error";

/// HTTP client for the deck service.
///
/// Every call is a single request; nothing is retried.
#[derive(Debug, Clone)]
pub struct DeckClient {
    http: reqwest::Client,
    base_url: String,
}

/// Deck body as the service accepts it on create and update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeckPayload<'a> {
    name: &'a str,
    user_id: UserId,
    sleeve_path: Option<&'a str>,
}

impl<'a> From<&'a NewDeck> for DeckPayload<'a> {
    fn from(deck: &'a NewDeck) -> Self {
        Self {
            name: &deck.name,
            user_id: deck.owner_id,
            sleeve_path: deck.sleeve_path.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddCardPayload<'a> {
    variacion_imagen: Option<&'a str>,
}

impl DeckClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        Self::new(
            &settings.api_base_url,
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let resp = request.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        log::debug!("HTTP {} ({} bytes)", status, text.len());
        parse_body(status, &text)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        log::debug!("GET {}", url);
        self.send(self.http.get(url)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        log::debug!("DELETE {}", url);
        self.send(self.http.delete(url)).await
    }
}

impl DeckApi for DeckClient {
    async fn list_decks(&self) -> Result<Vec<Deck>, ClientError> {
        self.get("/barajas").await
    }

    async fn get_deck(&self, id: DeckId) -> Result<Deck, ClientError> {
        self.get(&format!("/barajas/{}", id)).await
    }

    async fn list_decks_by_owner(&self, owner_id: UserId) -> Result<Vec<Deck>, ClientError> {
        self.get(&format!("/usuarios/{}/barajas", owner_id)).await
    }

    async fn create_deck(&self, deck: &NewDeck) -> Result<Deck, ClientError> {
        let url = self.url("/barajas");
        log::debug!("POST {}", url);
        self.send(self.http.post(url).json(&DeckPayload::from(deck)))
            .await
    }

    async fn update_deck(&self, id: DeckId, deck: &NewDeck) -> Result<Deck, ClientError> {
        let url = self.url(&format!("/barajas/{}", id));
        log::debug!("PUT {}", url);
        self.send(self.http.put(url).json(&DeckPayload::from(deck)))
            .await
    }

    async fn delete_deck(&self, id: DeckId) -> Result<serde_json::Value, ClientError> {
        self.delete(&format!("/barajas/{}", id)).await
    }

    async fn add_card(
        &self,
        deck_id: DeckId,
        card_id: CardId,
        variation: Option<&str>,
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.url(&format!("/barajas/{}/cartas/{}", deck_id, card_id));
        log::debug!("POST {}", url);
        let body = AddCardPayload {
            variacion_imagen: variation,
        };
        self.send(self.http.post(url).json(&body)).await
    }

    async fn remove_card(
        &self,
        deck_id: DeckId,
        card_id: CardId,
    ) -> Result<serde_json::Value, ClientError> {
        self.delete(&format!("/barajas/{}/cartas/{}", deck_id, card_id))
            .await
    }

    async fn list_cards(&self, deck_id: DeckId) -> Result<Vec<DeckCardRow>, ClientError> {
        self.get(&format!("/barajas/{}/cartas", deck_id)).await
    }
}

/// Turn a response status and body into a parsed value or a transport error.
///
/// An empty success body parses as JSON `null`.
pub(crate) fn parse_body<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<T, ClientError> {
    if !status.is_success() {
        return Err(ClientError::Transport {
            status: status.as_u16(),
            message: error_message(status, body),
        });
    }
    let body = if body.trim().is_empty() { "null" } else { body };
    Ok(serde_json::from_str(body)?)
}

/// Message for an error response: the body's `message` when it has one,
/// the status when the body is JSON without one, and a generic message when
/// the body is not JSON at all.
pub fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("message")
            .and_then(serde_json::Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP error: {}", status.as_u16())),
        Err(_) => UNKNOWN_SERVER_ERROR.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_message_is_used() {
        let msg = error_message(StatusCode::NOT_FOUND, r#"{"message": "Baraja no encontrada"}"#);
        assert_eq!(msg, "Baraja no encontrada");
    }

    #[test]
    fn json_body_without_message_reports_status() {
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error": true}"#),
            "HTTP error: 500"
        );
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, r#"{"message": ""}"#),
            "HTTP error: 400"
        );
    }

    #[test]
    fn non_json_body_is_unknown_error() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>"),
            UNKNOWN_SERVER_ERROR
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, ""), UNKNOWN_SERVER_ERROR);
    }

    #[test]
    fn error_status_becomes_transport_error() {
        let err = parse_body::<Vec<Deck>>(StatusCode::NOT_FOUND, r#"{"message": "gone"}"#)
            .unwrap_err();
        match err {
            ClientError::Transport { status, ref message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "gone");
            }
            ref other => panic!("expected transport error, got {other:?}"),
        }
        assert!(err.is_transport());
        assert_eq!(err.server_message(), Some("gone"));
    }

    #[test]
    fn success_body_is_parsed() {
        let decks: Vec<Deck> = parse_body(
            StatusCode::OK,
            r#"[{"IdBaraja": 1, "IdUsuario": 10, "NombreBaraja": "Starter", "RutaSleeve": null, "cantidadCartas": 3}]"#,
        )
        .unwrap();
        assert_eq!(decks.len(), 1);
        assert_eq!(decks[0].name, "Starter");
        assert_eq!(decks[0].card_count, Some(3));
    }

    #[test]
    fn card_count_as_text_is_parsed() {
        let decks: Vec<Deck> = parse_body(
            StatusCode::OK,
            r#"[{"IdBaraja": 1, "IdUsuario": 10, "NombreBaraja": "Starter", "RutaSleeve": null, "cantidadcartas": "3"},
                {"IdBaraja": 2, "IdUsuario": 10, "NombreBaraja": "Empty", "RutaSleeve": null, "cantidadcartas": null}]"#,
        )
        .unwrap();
        assert_eq!(decks[0].card_count, Some(3));
        assert_eq!(decks[1].card_count, None);
    }

    #[test]
    fn non_numeric_card_count_is_rejected() {
        let err = parse_body::<Vec<Deck>>(
            StatusCode::OK,
            r#"[{"IdBaraja": 1, "IdUsuario": 10, "NombreBaraja": "Starter", "cantidadcartas": "many"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Json(_)));
    }

    #[test]
    fn empty_success_body_is_null() {
        let value: serde_json::Value = parse_body(StatusCode::NO_CONTENT, "").unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn malformed_success_body_is_json_error() {
        let err = parse_body::<Deck>(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, ClientError::Json(_)));
        assert!(!err.is_transport());
    }

    #[test]
    fn deck_payload_uses_service_field_names() {
        let deck = NewDeck {
            owner_id: 10,
            name: "Starter".to_string(),
            sleeve_path: None,
        };
        let json = serde_json::to_value(DeckPayload::from(&deck)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Starter", "userId": 10, "sleevePath": null})
        );

        let body = serde_json::to_value(AddCardPayload {
            variacion_imagen: Some("foil"),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"variacionImagen": "foil"}));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = DeckClient::new("http://localhost:3030/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3030/api");
        assert_eq!(client.url("/barajas"), "http://localhost:3030/api/barajas");
    }
}
