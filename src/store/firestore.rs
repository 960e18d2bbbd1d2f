use reqwest::StatusCode;
use serde_json::{Value, json};
use tracing::debug;

use super::error::StoreError;
use super::model::{
    BuyerProfile, ListingCandidate, ListingPage, Location, PageCursor, SellerProfile,
};
use super::{DocumentStore, LISTINGS_COLLECTION, USERS_COLLECTION};
use crate::constants::DEFAULT_PRICE_PER_UNIT;

/// Firestore REST client for the marketplace database.
#[derive(Clone)]
pub struct FirestoreStore {
    client: reqwest::Client,
    documents_url: String,
    bearer_token: Option<String>,
}

impl FirestoreStore {
    /// Creates a store client for `base_url` (e.g. `https://firestore.googleapis.com`)
    /// and `project`, optionally attaching an OAuth bearer token to every request.
    pub fn new(base_url: &str, project: &str, bearer_token: Option<String>) -> Self {
        let documents_url = format!(
            "{}/v1/projects/{}/databases/(default)/documents",
            base_url.trim_end_matches('/'),
            project
        );

        Self {
            client: reqwest::Client::new(),
            documents_url,
            bearer_token,
        }
    }

    /// Returns the documents endpoint this client talks to.
    pub fn documents_url(&self) -> &str {
        &self.documents_url
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Builds the paginated candidate-scan request; the cursor rides in a
    /// query parameter so reqwest percent-encodes whatever the token holds.
    pub(super) fn listings_request(
        &self,
        page_size: usize,
        cursor: Option<&PageCursor>,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.documents_url, LISTINGS_COLLECTION);
        let mut request = self
            .client
            .get(url)
            .query(&[("pageSize", page_size.to_string())]);
        if let Some(PageCursor(token)) = cursor {
            request = request.query(&[("pageToken", token.as_str())]);
        }
        request
    }

    async fn get_json(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<Option<Value>, StoreError> {
        let response = self
            .request(request)
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                message,
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| StoreError::DecodeFailed {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        Ok(Some(body))
    }
}

impl DocumentStore for FirestoreStore {
    async fn fetch_buyer(&self, uid: &str) -> Result<Option<BuyerProfile>, StoreError> {
        let endpoint = format!("{USERS_COLLECTION}:runQuery(uid)");
        let url = format!("{}:runQuery", self.documents_url);

        let query = json!({
            "structuredQuery": {
                "from": [{ "collectionId": USERS_COLLECTION }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": "uid" },
                        "op": "EQUAL",
                        "value": { "stringValue": uid }
                    }
                },
                "limit": 1
            }
        });

        let response = self
            .request(self.client.post(&url).json(&query))
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed {
                endpoint: endpoint.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint,
                message,
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| StoreError::DecodeFailed {
                endpoint: endpoint.clone(),
                message: e.to_string(),
            })?;

        // runQuery answers with an array of result wrappers; an empty match
        // still yields one element without a `document` key.
        let document = body
            .as_array()
            .and_then(|results| results.iter().find_map(|r| r.get("document")));

        let Some(document) = document else {
            debug!(uid, "No buyer profile matched");
            return Ok(None);
        };

        Ok(Some(BuyerProfile {
            uid: uid.to_string(),
            location: decode_user_location(document),
        }))
    }

    async fn fetch_seller(&self, seller_id: &str) -> Result<Option<SellerProfile>, StoreError> {
        let endpoint = format!("{USERS_COLLECTION}/{seller_id}");
        let url = format!("{}/{}/{}", self.documents_url, USERS_COLLECTION, seller_id);

        let Some(document) = self.get_json(self.client.get(url), &endpoint).await? else {
            return Ok(None);
        };

        let location = document
            .get("fields")
            .and_then(|fields| fields.get("location"))
            .map(location_from_value);

        Ok(Some(SellerProfile {
            seller_id: seller_id.to_string(),
            location,
        }))
    }

    async fn fetch_listings_page(
        &self,
        page_size: usize,
        cursor: Option<PageCursor>,
    ) -> Result<ListingPage, StoreError> {
        let endpoint = LISTINGS_COLLECTION.to_string();
        let request = self.listings_request(page_size, cursor.as_ref());

        let Some(body) = self.get_json(request, &endpoint).await? else {
            return Ok(ListingPage::default());
        };

        let documents = body
            .get("documents")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let mut candidates = Vec::with_capacity(documents.len());
        for document in &documents {
            candidates.push(decode_listing(document)?);
        }

        let next = body
            .get("nextPageToken")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(|t| PageCursor(t.to_string()));

        debug!(
            page_len = candidates.len(),
            has_next = next.is_some(),
            "Fetched listings page"
        );

        Ok(ListingPage { candidates, next })
    }
}

/// Extracts the document id from a Firestore resource name.
fn document_id(document: &Value) -> String {
    document
        .get("name")
        .and_then(Value::as_str)
        .and_then(|name| name.rsplit('/').next())
        .unwrap_or("<unnamed>")
        .to_string()
}

fn fields<'a>(document: &'a Value) -> Option<&'a Value> {
    document.get("fields")
}

/// Reads a `stringValue` field.
fn string_field(document: &Value, name: &str) -> Option<String> {
    fields(document)?
        .get(name)?
        .get("stringValue")?
        .as_str()
        .map(|s| s.to_string())
}

/// Decodes one Firestore typed scalar into an f32, if it is numeric-shaped.
///
/// Firestore encodes integers as JSON strings (`{"integerValue": "42"}`), so
/// both representations are accepted. A `stringValue` must parse as a number.
fn numeric_value(value: &Value) -> Option<f32> {
    if let Some(d) = value.get("doubleValue") {
        return d.as_f64().map(|d| d as f32).or_else(|| {
            d.as_str().and_then(|s| s.parse::<f32>().ok())
        });
    }
    if let Some(i) = value.get("integerValue") {
        return i
            .as_i64()
            .map(|i| i as f32)
            .or_else(|| i.as_str().and_then(|s| s.parse::<f32>().ok()));
    }
    if let Some(s) = value.get("stringValue") {
        return s.as_str().and_then(|s| s.trim().parse::<f32>().ok());
    }
    None
}

/// Decodes a user `location` field, which is either a structured map or a
/// legacy bare string.
pub(super) fn location_from_value(value: &Value) -> Location {
    if let Some(s) = value.get("stringValue").and_then(Value::as_str) {
        return Location::from_legacy_string(s);
    }

    let Some(map_fields) = value.get("mapValue").and_then(|m| m.get("fields")) else {
        return Location::default();
    };

    let get = |name: &str| -> String {
        map_fields
            .get(name)
            .and_then(|f| f.get("stringValue"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Location {
        address: get("address"),
        city: get("city"),
        province: get("province"),
    }
}

fn decode_user_location(document: &Value) -> Location {
    fields(document)
        .and_then(|f| f.get("location"))
        .map(location_from_value)
        .unwrap_or_default()
}

/// Decodes one `embeddings` document into a [`ListingCandidate`].
///
/// A missing embedding or an unparseable price is a [`StoreError::MalformedDocument`],
/// which is fatal for the request that hit it.
pub(super) fn decode_listing(document: &Value) -> Result<ListingCandidate, StoreError> {
    let id = document_id(document);

    let embedding_value = fields(document)
        .and_then(|f| f.get("embedding"))
        .ok_or_else(|| StoreError::MalformedDocument {
            id: id.clone(),
            reason: "missing 'embedding' field".to_string(),
        })?;

    let embedding = embedding_value
        .get("arrayValue")
        .and_then(|a| a.get("values"))
        .and_then(Value::as_array)
        .and_then(|values| values.iter().map(numeric_value).collect::<Option<Vec<f32>>>())
        .ok_or_else(|| StoreError::MalformedDocument {
            id: id.clone(),
            reason: "'embedding' is not a numeric array".to_string(),
        })?;

    let price_per_unit = match fields(document).and_then(|f| f.get("pricePerUnit")) {
        None => DEFAULT_PRICE_PER_UNIT,
        Some(value) => numeric_value(value).ok_or_else(|| StoreError::MalformedDocument {
            id: id.clone(),
            reason: "'pricePerUnit' is not coercible to a number".to_string(),
        })?,
    };

    Ok(ListingCandidate {
        listing_id: string_field(document, "listingId"),
        crop_name: string_field(document, "cropName").unwrap_or_default(),
        price_per_unit,
        embedding,
        seller_id: string_field(document, "farmerId"),
    })
}
