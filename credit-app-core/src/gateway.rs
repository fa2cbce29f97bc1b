//! Account gateway — session identity in, account snapshot out, and
//! balance/history back to the store.
//!
//! The gateway exposes exactly the two operations the ledger needs.
//! Store errors never escape as panics; they become `LookupFailed` or
//! `PersistFailed`.

use std::sync::Arc;

use async_trait::async_trait;
use credit_core::{CreditError, Credits, Role, UserAccount};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::store::{Document, DocumentStore};

/// Authenticated principal, as supplied by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    /// Provider-side user id.
    pub uid: String,
    /// Contact identifier used to find the account record.
    pub contact: String,
}

/// Boundary between the ledger policy and the remote store.
#[async_trait]
pub trait AccountGateway: Send + Sync {
    /// Resolve `identity` to its account. `Ok(None)` means no record.
    async fn fetch_current_user(
        &self,
        identity: &SessionIdentity,
    ) -> Result<Option<UserAccount>, CreditError>;

    /// Write balance and history for `user_id`. Nothing else on the
    /// record is touched; repeating a write is harmless.
    async fn persist(
        &self,
        user_id: &str,
        balance: Credits,
        redeemed_codes: &[String],
    ) -> Result<(), CreditError>;
}

/// [`AccountGateway`] over any [`DocumentStore`].
pub struct StoreGateway<S> {
    store: Arc<S>,
    config: AppConfig,
}

impl<S: DocumentStore> StoreGateway<S> {
    pub fn new(store: Arc<S>, config: AppConfig) -> Self {
        Self { store, config }
    }

    fn decode(&self, doc: &Document) -> Result<UserAccount, String> {
        let balance: Credits = required_field(&doc.fields, &self.config.balance_field)?;
        let profile: String = required_field(&doc.fields, &self.config.role_field)?;
        let redeemed_codes: Vec<String> = match doc.fields.get(&self.config.codes_field) {
            None | Some(Value::Null) => Vec::new(),
            Some(v) => Vec::<String>::deserialize(v)
                .map_err(|e| format!("field {}: {e}", self.config.codes_field))?,
        };
        Ok(UserAccount {
            id: doc.id.clone(),
            balance,
            role: Role::from_profile(&profile),
            redeemed_codes,
        })
    }
}

/// Read a field that every account record carries. Absent or `null`
/// is an error, never a default.
fn required_field<T>(fields: &Map<String, Value>, name: &str) -> Result<T, String>
where
    T: DeserializeOwned,
{
    match fields.get(name) {
        None | Some(Value::Null) => Err(format!("missing field {name}")),
        Some(v) => T::deserialize(v).map_err(|e| format!("field {name}: {e}")),
    }
}

#[async_trait]
impl<S: DocumentStore> AccountGateway for StoreGateway<S> {
    async fn fetch_current_user(
        &self,
        identity: &SessionIdentity,
    ) -> Result<Option<UserAccount>, CreditError> {
        let contact = Value::String(identity.contact.clone());
        let docs = self
            .store
            .find_by_field(&self.config.collection, &self.config.contact_field, &contact)
            .await
            .map_err(|e| CreditError::LookupFailed(e.to_string()))?;

        let Some(doc) = docs.first() else {
            debug!(uid = %identity.uid, "no account record for session");
            return Ok(None);
        };
        if docs.len() > 1 {
            warn!(
                uid = %identity.uid,
                matches = docs.len(),
                chosen = %doc.id,
                "multiple account records share a contact; using the first"
            );
        }

        let account = self.decode(doc).map_err(|e| {
            warn!(account = %doc.id, error = %e, "account record does not match store layout");
            CreditError::LookupFailed(format!("malformed record {}: {e}", doc.id))
        })?;
        debug!(
            account = %account.id,
            balance = account.balance,
            redemptions = account.redeemed_codes.len(),
            "account loaded"
        );
        Ok(Some(account))
    }

    async fn persist(
        &self,
        user_id: &str,
        balance: Credits,
        redeemed_codes: &[String],
    ) -> Result<(), CreditError> {
        let mut fields = Map::new();
        fields.insert(self.config.balance_field.clone(), Value::from(balance));
        fields.insert(
            self.config.codes_field.clone(),
            Value::from(redeemed_codes.to_vec()),
        );

        self.store
            .update_fields(&self.config.collection, user_id, fields)
            .await
            .map_err(|e| {
                warn!(account = %user_id, error = %e, "persist failed");
                CreditError::PersistFailed(e.to_string())
            })?;
        debug!(account = %user_id, balance, "account persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!("fixture must be an object"),
        }
    }

    fn identity(contact: &str) -> SessionIdentity {
        SessionIdentity {
            uid: "uid-1".into(),
            contact: contact.into(),
        }
    }

    async fn gateway_with(
        docs: &[(&str, Value)],
    ) -> (Arc<MemoryDocumentStore>, StoreGateway<MemoryDocumentStore>) {
        let store = Arc::new(MemoryDocumentStore::new());
        for (id, fields) in docs {
            store.insert("users", id, obj(fields.clone())).await;
        }
        let gw = StoreGateway::new(store.clone(), AppConfig::default());
        (store, gw)
    }

    #[tokio::test]
    async fn fetch_decodes_production_record() {
        let record = json!({
            "correo": "ana@x.io",
            "nombre": "Ana",
            "credito": 50,
            "perfil": "admin",
            "codes": ["A"]
        });
        let (_, gw) = gateway_with(&[("doc-1", record)]).await;
        let user = gw
            .fetch_current_user(&identity("ana@x.io"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, "doc-1");
        assert_eq!(user.balance, 50);
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.redeemed_codes, vec!["A"]);
    }

    #[tokio::test]
    async fn fetch_tolerates_missing_codes() {
        let record = json!({
            "correo": "ana@x.io",
            "credito": 0,
            "perfil": "usuario",
            "codes": null
        });
        let (_, gw) = gateway_with(&[("doc-1", record)]).await;
        let user = gw
            .fetch_current_user(&identity("ana@x.io"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.balance, 0);
        assert_eq!(user.role, Role::Standard);
        assert!(user.redeemed_codes.is_empty());
    }

    #[tokio::test]
    async fn fetch_missing_balance_or_role_is_lookup_failure() {
        for record in [
            json!({"correo": "ana@x.io", "perfil": "admin", "codes": []}),
            json!({"correo": "ana@x.io", "credito": 50, "codes": []}),
            json!({"correo": "ana@x.io", "credito": null, "perfil": "admin"}),
            // Record written under another layout.
            json!({"correo": "ana@x.io", "credits": 50, "role": "admin"}),
        ] {
            let (_, gw) = gateway_with(&[("doc-1", record.clone())]).await;
            let err = gw
                .fetch_current_user(&identity("ana@x.io"))
                .await
                .unwrap_err();
            assert_eq!(err.code(), "LOOKUP_FAILED", "record {record} must not load");
        }
    }

    #[tokio::test]
    async fn fetch_without_record_is_none() {
        let (_, gw) = gateway_with(&[]).await;
        let user = gw
            .fetch_current_user(&identity("nobody@x.io"))
            .await
            .unwrap();
        assert_eq!(user, None);
    }

    #[tokio::test]
    async fn fetch_malformed_record_is_lookup_failure() {
        let record = json!({"correo": "ana@x.io", "credito": "lots", "perfil": "admin"});
        let (_, gw) = gateway_with(&[("doc-1", record)]).await;
        let err = gw
            .fetch_current_user(&identity("ana@x.io"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "LOOKUP_FAILED");
    }

    #[tokio::test]
    async fn fetch_duplicate_contact_picks_first_id() {
        let (_, gw) = gateway_with(&[
            ("doc-b", json!({"correo": "ana@x.io", "credito": 2, "perfil": "usuario"})),
            ("doc-a", json!({"correo": "ana@x.io", "credito": 1, "perfil": "usuario"})),
        ])
        .await;
        let user = gw
            .fetch_current_user(&identity("ana@x.io"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, "doc-a");
    }

    #[tokio::test]
    async fn persist_is_partial_and_idempotent() {
        let record = json!({
            "correo": "ana@x.io",
            "nombre": "Ana",
            "credito": 0,
            "codes": [],
            "perfil": "usuario"
        });
        let (store, gw) = gateway_with(&[("doc-1", record)]).await;
        let codes = vec!["A".to_string()];
        gw.persist("doc-1", 10, &codes).await.unwrap();
        let first = store.get("users", "doc-1").await.unwrap();
        gw.persist("doc-1", 10, &codes).await.unwrap();
        let second = store.get("users", "doc-1").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.fields["credito"], json!(10));
        assert_eq!(second.fields["codes"], json!(["A"]));
        assert_eq!(second.fields["nombre"], json!("Ana"));
        assert_eq!(second.fields["perfil"], json!("usuario"));
        assert_eq!(second.fields.len(), 5, "persist must not add fields");
    }

    #[tokio::test]
    async fn persist_unknown_account_fails() {
        let (_, gw) = gateway_with(&[]).await;
        let err = gw.persist("ghost", 10, &[]).await.unwrap_err();
        assert!(matches!(err, CreditError::PersistFailed(_)));
    }
}
