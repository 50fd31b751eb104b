// Rust guideline compliant 2026-10-12

//! Core data models for App Store Connect documents.
//!
//! The API speaks JSON:API: every payload is a document whose `data` member
//! holds one resource or a list of resources. Attribute types only declare the
//! fields this client reads; everything else is ignored on decode.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A typed JSON:API resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource<A> {
    /// Resource type, e.g. `builds`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Resource identifier.
    pub id: String,
    /// Typed attributes.
    #[serde(default)]
    pub attributes: A,
    /// Raw relationships object, decoded on demand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<serde_json::Value>,
}

impl<A: Default> Resource<A> {
    /// Creates a resource with the given ID and default attributes.
    #[must_use]
    pub fn new(kind: &str, id: &str) -> Self {
        Self {
            kind: kind.to_string(),
            id: id.to_string(),
            attributes: A::default(),
            relationships: None,
        }
    }
}

impl<A> Resource<A> {
    /// Returns the ID of a to-one relationship.
    ///
    /// # Arguments
    ///
    /// * `key` - Relationship name, e.g. `build`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidResponse` if the relationship is absent or has a
    /// blank ID, and `Error::Json` if the relationships object is not a map of
    /// to-one references.
    pub fn relationship_id(&self, key: &str) -> Result<String> {
        let missing = || Error::InvalidResponse(format!("missing {} relationship", key));
        let relationships = self.relationships.as_ref().ok_or_else(missing)?;

        let references: std::collections::HashMap<String, RelationshipReference> =
            serde_json::from_value(relationships.clone())?;
        let reference = references.get(key).ok_or_else(missing)?;

        let id = reference
            .data
            .as_ref()
            .map(|data| data.id.trim())
            .unwrap_or_default();
        if id.is_empty() {
            return Err(Error::InvalidResponse(format!(
                "missing {} relationship id",
                key
            )));
        }
        Ok(id.to_string())
    }
}

/// Type and ID of a related resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// Resource type.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Resource identifier.
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct RelationshipReference {
    #[serde(default)]
    data: Option<ResourceIdentifier>,
}

/// Pagination links of a list document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    /// Link to the current page.
    #[serde(rename = "self", default, skip_serializing_if = "String::is_empty")]
    pub self_link: String,
    /// Link to the next page; empty, null or absent on the last page.
    #[serde(default, deserialize_with = "null_as_default")]
    pub next: String,
}

impl PageLinks {
    /// Returns the next page link, or `None` on the terminal page.
    #[must_use]
    pub fn next_url(&self) -> Option<&str> {
        let next = self.next.trim();
        (!next.is_empty()).then_some(next)
    }
}

/// A document holding a single resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de> + Default"))]
pub struct Document<A> {
    /// The resource.
    pub data: Resource<A>,
}

/// A document holding one page of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de> + Default"))]
pub struct ListDocument<A> {
    /// Resources on this page, in server order.
    #[serde(default = "Vec::new")]
    pub data: Vec<Resource<A>>,
    /// Pagination links.
    #[serde(default)]
    pub links: PageLinks,
}

/// Decodes an explicit `null` as the field's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Decodes a JSON body into a document type.
///
/// # Errors
///
/// Returns `Error::Json` if the body does not match `T`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}

/// Error document returned by the API on failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorDocument {
    /// Individual errors.
    #[serde(default)]
    pub errors: Vec<ApiErrorItem>,
}

/// One entry of an error document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiErrorItem {
    /// HTTP status as a string.
    pub status: String,
    /// Machine-readable code.
    pub code: String,
    /// Short summary.
    pub title: String,
    /// Detailed explanation.
    pub detail: String,
}

impl ApiErrorDocument {
    /// Builds a single-line message from the first error entry.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        let first = self.errors.first()?;
        match (first.title.trim(), first.detail.trim()) {
            ("", "") => None,
            (title, "") => Some(title.to_string()),
            ("", detail) => Some(detail.to_string()),
            (title, detail) => Some(format!("{}: {}", title, detail)),
        }
    }
}

/// App attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppAttributes {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bundle_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sku: String,
}

/// Build attributes. `version` is the build number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildAttributes {
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub processing_state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uploaded_date: String,
}

/// Pre-release version attributes; `version` is the marketing version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreReleaseVersionAttributes {
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub platform: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildBetaDetailAttributes {
    #[serde(deserialize_with = "null_as_default")]
    pub internal_build_state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub external_build_state: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BetaAppReviewSubmissionAttributes {
    #[serde(deserialize_with = "null_as_default")]
    pub beta_review_state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub submitted_date: String,
}

/// App Store version attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppStoreVersionAttributes {
    #[serde(deserialize_with = "null_as_default")]
    pub version_string: String,
    #[serde(deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(deserialize_with = "null_as_default")]
    pub app_store_state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub app_version_state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_date: String,
}

impl AppStoreVersionAttributes {
    /// Returns the effective state, preferring `appVersionState` over the
    /// legacy `appStoreState`.
    #[must_use]
    pub fn resolved_state(&self) -> &str {
        let state = self.app_version_state.trim();
        if state.is_empty() {
            self.app_store_state.trim()
        } else {
            state
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhasedReleaseAttributes {
    #[serde(deserialize_with = "null_as_default")]
    pub phased_release_state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub current_day_number: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_pause_duration: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewSubmissionAttributes {
    #[serde(deserialize_with = "null_as_default", rename = "state")]
    pub submission_state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub submitted_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub platform: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VersionLocalizationAttributes {
    #[serde(deserialize_with = "null_as_default")]
    pub locale: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub keywords: String,
    #[serde(deserialize_with = "null_as_default")]
    pub whats_new: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScreenshotSetAttributes {
    #[serde(deserialize_with = "null_as_default")]
    pub screenshot_display_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScreenshotAttributes {
    #[serde(deserialize_with = "null_as_default")]
    pub file_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub file_size: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppInfoLocalizationAttributes {
    #[serde(deserialize_with = "null_as_default")]
    pub locale: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subtitle: String,
    #[serde(deserialize_with = "null_as_default", rename = "privacyPolicyUrl")]
    pub privacy_policy_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InAppPurchaseAttributes {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub in_app_purchase_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriptionGroupAttributes {
    #[serde(deserialize_with = "null_as_default")]
    pub reference_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriptionAttributes {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subscription_period: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_document_without_links_is_terminal() {
        let doc: ListDocument<serde_json::Value> =
            decode(br#"{"data":[{"type":"bundleIds","id":"b-1"}]}"#).unwrap();
        assert_eq!(doc.data.len(), 1);
        assert!(doc.links.next_url().is_none());
    }

    #[test]
    fn test_null_attributes_decode_as_empty() {
        let doc: ListDocument<VersionLocalizationAttributes> = decode(
            br#"{"data":[{"type":"appStoreVersionLocalizations","id":"loc-1",
                "attributes":{"locale":"en-US","description":null,"keywords":"a","whatsNew":null}}],
                "links":{"self":"https://api.appstoreconnect.apple.com/v1/x","next":null}}"#,
        )
        .unwrap();
        let attrs = &doc.data[0].attributes;
        assert_eq!(attrs.description, "");
        assert_eq!(attrs.keywords, "a");
        assert_eq!(attrs.whats_new, "");
        assert!(doc.links.next_url().is_none());

        let doc: Document<PhasedReleaseAttributes> = decode(
            br#"{"data":{"type":"appStoreVersionPhasedReleases","id":"p-1",
                "attributes":{"phasedReleaseState":"ACTIVE","currentDayNumber":null}}}"#,
        )
        .unwrap();
        assert_eq!(doc.data.attributes.current_day_number, 0);
    }

    #[test]
    fn test_blank_next_is_terminal() {
        let links = PageLinks {
            self_link: String::new(),
            next: "   ".to_string(),
        };
        assert!(links.next_url().is_none());
    }

    #[test]
    fn test_relationship_id() {
        let doc: ListDocument<BuildBetaDetailAttributes> = decode(
            br#"{"data":[{"type":"buildBetaDetails","id":"d-1",
                "attributes":{"externalBuildState":"IN_BETA_TESTING"},
                "relationships":{"build":{"data":{"type":"builds","id":"build-1"}}}}]}"#,
        )
        .unwrap();
        assert_eq!(doc.data[0].relationship_id("build").unwrap(), "build-1");
        assert!(doc.data[0].relationship_id("app").is_err());
    }

    #[test]
    fn test_resolved_state_falls_back() {
        let attrs = AppStoreVersionAttributes {
            app_store_state: "READY_FOR_SALE".to_string(),
            ..Default::default()
        };
        assert_eq!(attrs.resolved_state(), "READY_FOR_SALE");
    }

    #[test]
    fn test_error_summary() {
        let doc: ApiErrorDocument = decode(
            br#"{"errors":[{"status":"404","code":"NOT_FOUND","title":"The specified resource does not exist","detail":"There is no resource of type 'builds'"}]}"#,
        )
        .unwrap();
        assert_eq!(
            doc.summary().unwrap(),
            "The specified resource does not exist: There is no resource of type 'builds'"
        );
    }
}
