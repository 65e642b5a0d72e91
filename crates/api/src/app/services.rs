//! Service construction: stores and services wired from configuration.

use std::sync::Arc;

use oficina_auth::{AuthService, FsCredentialStore, TokenKeys, TokenService};
use oficina_store::{DocumentStore, FsDocumentStore, StoreError};

use crate::config::Config;

/// Everything the handlers need, shared via an `Extension`.
pub struct AppServices {
    pub auth: AuthService,
    pub documents: Arc<dyn DocumentStore>,
    pub tokens: Arc<TokenService>,
}

/// Wire the filesystem-backed stores and services beneath `config.data_dir`.
pub fn build_services(config: &Config) -> Result<AppServices, StoreError> {
    let tokens = Arc::new(TokenService::new(TokenKeys::from_secret(
        config.jwt_secret.as_bytes(),
    )));

    let credentials = Arc::new(FsCredentialStore::new(config.credentials_path())?);
    let documents: Arc<dyn DocumentStore> =
        Arc::new(FsDocumentStore::new(config.documents_dir())?);

    let auth = AuthService::new(credentials, tokens.clone(), documents.clone());

    Ok(AppServices {
        auth,
        documents,
        tokens,
    })
}
