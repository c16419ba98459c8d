use std::sync::Arc;

use medfin_core::constants::{LOAN_AMOUNT_KEY, SELECTED_PURPOSE_KEY, TOKEN_KEYS, USER_KEY};
use medfin_core::models::{PurposeSelection, UserProfile};

use crate::{SessionStore, StoreError, StoreResult};

/// Typed view over the session store for the keys the portal actually uses.
///
/// This is the single session object passed down through the composition
/// root; components never read ambient storage keys directly.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Bearer token, checked across the legacy key names, newest first.
    pub async fn bearer_token(&self) -> StoreResult<Option<String>> {
        for key in TOKEN_KEYS {
            if let Some(token) = self.store.get(key).await? {
                if !token.is_empty() {
                    return Ok(Some(token));
                }
            }
        }
        Ok(None)
    }

    /// Store the token under the current key and clear the legacy ones.
    pub async fn set_bearer_token(&self, token: &str) -> StoreResult<()> {
        self.store.set(TOKEN_KEYS[0], token).await?;
        for key in &TOKEN_KEYS[1..] {
            self.store.remove(key).await?;
        }
        Ok(())
    }

    pub async fn user_profile(&self) -> StoreResult<Option<UserProfile>> {
        match self.store.get(USER_KEY).await? {
            Some(raw) => {
                let profile = serde_json::from_str(&raw)
                    .map_err(|e| StoreError::Corrupt(format!("user profile: {}", e)))?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    pub async fn set_user_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        let raw = serde_json::to_string(profile)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        self.store.set(USER_KEY, &raw).await
    }

    pub async fn loan_amount(&self) -> StoreResult<Option<String>> {
        self.store.get(LOAN_AMOUNT_KEY).await
    }

    pub async fn set_loan_amount(&self, amount: &str) -> StoreResult<()> {
        self.store.set(LOAN_AMOUNT_KEY, amount).await
    }

    pub async fn selected_purpose(&self) -> StoreResult<Option<PurposeSelection>> {
        match self.store.get(SELECTED_PURPOSE_KEY).await? {
            Some(raw) => {
                let selection = serde_json::from_str(&raw)
                    .map_err(|e| StoreError::Corrupt(format!("selected purpose: {}", e)))?;
                Ok(Some(selection))
            }
            None => Ok(None),
        }
    }

    pub async fn set_selected_purpose(&self, selection: &PurposeSelection) -> StoreResult<()> {
        let raw = serde_json::to_string(selection)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        self.store.set(SELECTED_PURPOSE_KEY, &raw).await
    }

    /// Log out: drop the token and profile, keep scheme selections.
    pub async fn clear_auth(&self) -> StoreResult<()> {
        for key in TOKEN_KEYS {
            self.store.remove(key).await?;
        }
        self.store.remove(USER_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    fn session() -> Session {
        Session::new(Arc::new(MemoryStore::new()))
    }

    fn profile() -> UserProfile {
        UserProfile {
            id: None,
            full_name: "Anwar Ali".to_string(),
            cnic: "3520212345671".to_string(),
            email: "anwar@example.com".to_string(),
            phone: Some("03001234567".to_string()),
            father_name: None,
            city: None,
            address: None,
        }
    }

    #[tokio::test]
    async fn test_token_checked_across_legacy_keys() {
        let store = Arc::new(MemoryStore::new());
        let session = Session::new(store.clone());

        // An old portal build wrote the token under "accessToken".
        store.set("accessToken", "legacy-token").await.unwrap();
        assert_eq!(
            session.bearer_token().await.unwrap(),
            Some("legacy-token".to_string())
        );

        // The current key wins over legacy ones.
        store.set("authToken", "current-token").await.unwrap();
        assert_eq!(
            session.bearer_token().await.unwrap(),
            Some("current-token".to_string())
        );
    }

    #[tokio::test]
    async fn test_set_bearer_token_clears_legacy_keys() {
        let store = Arc::new(MemoryStore::new());
        let session = Session::new(store.clone());

        store.set("token", "old").await.unwrap();
        session.set_bearer_token("new").await.unwrap();

        assert_eq!(store.get("token").await.unwrap(), None);
        assert_eq!(
            session.bearer_token().await.unwrap(),
            Some("new".to_string())
        );
    }

    #[tokio::test]
    async fn test_profile_round_trip() {
        let session = session();
        assert!(session.user_profile().await.unwrap().is_none());

        session.set_user_profile(&profile()).await.unwrap();
        let loaded = session.user_profile().await.unwrap().unwrap();
        assert_eq!(loaded, profile());
    }

    #[tokio::test]
    async fn test_purpose_selection_round_trip() {
        use medfin_core::models::Scheme;

        let session = session();
        let selection = PurposeSelection::new(&Scheme::Nurses.purposes()[0]);
        session.set_selected_purpose(&selection).await.unwrap();
        assert_eq!(
            session.selected_purpose().await.unwrap(),
            Some(selection)
        );
    }

    #[tokio::test]
    async fn test_clear_auth_keeps_selections() {
        let session = session();
        session.set_bearer_token("tok").await.unwrap();
        session.set_user_profile(&profile()).await.unwrap();
        session.set_loan_amount("1500000").await.unwrap();

        session.clear_auth().await.unwrap();

        assert!(session.bearer_token().await.unwrap().is_none());
        assert!(session.user_profile().await.unwrap().is_none());
        assert_eq!(
            session.loan_amount().await.unwrap(),
            Some("1500000".to_string())
        );
    }
}
