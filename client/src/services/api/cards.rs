//! # Card Endpoints
//!
//! Expense cards and the summary derived from them. Writes go through
//! [`CardDraft`], which validates raw form input before anything is sent.

use serde_json::Value;
use shared::{CardPayload, CardStatus, ExpenseCard, ExpenseType, Summary};

use super::client::{ApiClient, RequestOptions};
use crate::core::error::{ClientError, Result};
use crate::utils::constants::{INVALID_EXPENSE_TYPE, INVALID_STATUS};
use crate::utils::validation::{validate_card_value, validate_due_date, validate_urgency};

/// List filters. Empty values are the same as no filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilters {
    pub status: Option<String>,
    pub expense_type: Option<String>,
}

impl CardFilters {
    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }

    /// Query parameters for the present, non-empty filters only
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        [("status", &self.status), ("expense_type", &self.expense_type)]
            .into_iter()
            .filter_map(|(key, value)| {
                let value = value.as_deref()?.trim();
                (!value.is_empty()).then(|| (key.to_string(), value.to_string()))
            })
            .collect()
    }
}

/// Card form input exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDraft {
    pub title: String,
    pub urgency: String,
    pub expense_type: String,
    pub value: String,
    pub due_date: String,
    /// Empty means `pendente`
    pub status: String,
}

impl CardDraft {
    /// Prefill a draft from an existing card, for editing.
    ///
    /// A status this client cannot send back is left empty.
    pub fn from_card(card: &ExpenseCard) -> Self {
        let status = match card.status {
            CardStatus::Unknown => String::new(),
            known => known.as_str().to_string(),
        };
        Self {
            title: card.title.clone(),
            urgency: card.urgency.to_string(),
            expense_type: card.expense_type.as_str().to_string(),
            value: card.value.to_string(),
            due_date: card.due_date.format("%Y-%m-%d").to_string(),
            status,
        }
    }

    /// Validate every field and build the request body.
    ///
    /// The value is checked first, so a bad amount is reported even when
    /// other fields are also wrong.
    pub fn to_payload(&self) -> Result<CardPayload> {
        let value = validate_card_value(&self.value)?;
        let urgency = validate_urgency(&self.urgency)?;
        let expense_type = self
            .expense_type
            .parse::<ExpenseType>()
            .map_err(|_| ClientError::validation(INVALID_EXPENSE_TYPE))?;
        let due_date = validate_due_date(&self.due_date)?;
        let status = if self.status.trim().is_empty() {
            CardStatus::default()
        } else {
            self.status
                .parse::<CardStatus>()
                .map_err(|_| ClientError::validation(INVALID_STATUS))?
        };

        Ok(CardPayload {
            title: self.title.trim().to_string(),
            urgency,
            expense_type,
            value,
            due_date,
            status,
        })
    }
}

#[tracing::instrument(skip(client))]
pub async fn get_summary(client: &ApiClient) -> Result<Summary> {
    client.request("/cards/summary", RequestOptions::get()).await
}

#[tracing::instrument(skip(client))]
pub async fn list_cards(client: &ApiClient, filters: &CardFilters) -> Result<Vec<ExpenseCard>> {
    let options = RequestOptions::get().query(filters.query_pairs());
    client.request("/cards", options).await
}

#[tracing::instrument(skip(client))]
pub async fn get_card(client: &ApiClient, id: i64) -> Result<ExpenseCard> {
    client
        .request(&format!("/cards/{}", id), RequestOptions::get())
        .await
}

#[tracing::instrument(skip(client, draft))]
pub async fn create_card(client: &ApiClient, draft: &CardDraft) -> Result<ExpenseCard> {
    let payload = draft.to_payload()?;
    let options = RequestOptions::post().json(&payload)?;
    let card: ExpenseCard = client.request("/cards", options).await?;
    tracing::info!(card_id = card.id, "Card created");
    Ok(card)
}

#[tracing::instrument(skip(client, draft))]
pub async fn update_card(client: &ApiClient, id: i64, draft: &CardDraft) -> Result<ExpenseCard> {
    let payload = draft.to_payload()?;
    let options = RequestOptions::patch().json(&payload)?;
    client.request(&format!("/cards/{}", id), options).await
}

/// Delete a card. Deleting it again is a normal 404 `RequestFailed`.
#[tracing::instrument(skip(client))]
pub async fn delete_card(client: &ApiClient, id: i64) -> Result<()> {
    client
        .request::<Value>(&format!("/cards/{}", id), RequestOptions::delete())
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::Session;
    use crate::core::testing::{MockBackend, MockReply, TEST_BASE};
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn api(backend: &Arc<MockBackend>) -> ApiClient {
        let (tx, _rx) = async_channel::unbounded();
        ApiClient::with_backend(backend.clone(), TEST_BASE, Arc::new(Session::new(tx)))
    }

    fn draft(value: &str) -> CardDraft {
        CardDraft {
            title: "  Aluguel ".to_string(),
            urgency: "1".to_string(),
            expense_type: "casa".to_string(),
            value: value.to_string(),
            due_date: "2025-03-10".to_string(),
            status: String::new(),
        }
    }

    fn card_json(id: i64, value: f64) -> Value {
        json!({
            "id": id,
            "title": "Aluguel",
            "urgency": 1,
            "expense_type": "casa",
            "value": value,
            "due_date": "2025-03-10",
            "status": "pendente",
            "percentage": 0.0,
            "user_id": 1
        })
    }

    #[test]
    fn test_filter_query_pairs() {
        let filters = CardFilters {
            status: Some("pendente".to_string()),
            expense_type: Some(String::new()),
        };
        assert_eq!(
            filters.query_pairs(),
            vec![("status".to_string(), "pendente".to_string())]
        );
        assert!(CardFilters::default().is_empty());
    }

    #[test]
    fn test_draft_to_payload() {
        let payload = draft("1500,00").to_payload().unwrap();
        assert_eq!(payload.title, "Aluguel");
        assert_eq!(payload.value, 1500.0);
        assert_eq!(payload.status, CardStatus::Pendente);
        assert_eq!(payload.expense_type, ExpenseType::Casa);

        let bad_type = CardDraft {
            expense_type: "viagem".to_string(),
            ..draft("10")
        };
        assert_eq!(bad_type.to_payload().unwrap_err().message(), INVALID_EXPENSE_TYPE);
    }

    #[tokio::test]
    async fn test_non_positive_values_rejected_locally() {
        let backend = Arc::new(MockBackend::new());
        backend.on(Method::POST, "/cards", MockReply::json(201, card_json(1, 0.01)));
        let api = api(&backend);

        assert!(create_card(&api, &draft("0")).await.unwrap_err().is_validation());
        assert!(update_card(&api, 1, &draft("-5")).await.unwrap_err().is_validation());
        assert!(backend.requests().is_empty());

        let card = create_card(&api, &draft("0.01")).await.unwrap();
        assert_eq!(card.value, 0.01);
        assert_eq!(backend.calls(), vec!["POST /cards"]);
    }

    #[tokio::test]
    async fn test_list_sends_only_present_filters() {
        let backend = Arc::new(MockBackend::new());
        backend.on(Method::GET, "/cards", MockReply::json(200, json!([card_json(1, 10.0)])));
        let api = api(&backend);

        let filters = CardFilters {
            status: Some("pendente".to_string()),
            expense_type: None,
        };
        let cards = list_cards(&api, &filters).await.unwrap();

        assert_eq!(cards.len(), 1);
        assert_eq!(backend.calls(), vec!["GET /cards?status=pendente"]);
    }

    #[tokio::test]
    async fn test_second_delete_is_not_found() {
        let backend = Arc::new(MockBackend::new());
        backend.on(Method::DELETE, "/cards/4", MockReply::empty(204));
        backend.on(
            Method::DELETE,
            "/cards/4",
            MockReply::json(404, json!({"detail": "Card não encontrado"})),
        );
        let api = api(&backend);

        assert_eq!(delete_card(&api, 4).await, Ok(()));
        assert_eq!(
            delete_card(&api, 4).await,
            Err(ClientError::RequestFailed {
                status: 404,
                message: "Card não encontrado".to_string()
            })
        );
    }

    #[test]
    fn test_draft_from_card_with_unknown_status() {
        let mut card: ExpenseCard = serde_json::from_value(card_json(3, 80.0)).unwrap();
        card.status = CardStatus::Unknown;

        let draft = CardDraft::from_card(&card);

        assert_eq!(draft.status, "");
        assert_eq!(draft.to_payload().unwrap().status, CardStatus::Pendente);
    }
}
