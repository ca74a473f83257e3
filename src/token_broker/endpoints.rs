use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use oauth2::TokenResponse;
use oauth2::basic::{BasicErrorResponse, BasicTokenResponse};
use serde::Serialize;
use tracing::info;

use super::credentials::ServiceAccountKey;
use crate::error::TokenError;
use crate::utils::logging::body_preview;

/// RFC 7523 grant type for exchanging a signed JWT for an access token.
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime; Google caps it at one hour.
const ASSERTION_TTL_SECS: i64 = 3600;

#[derive(Debug, Serialize)]
pub(crate) struct AssertionClaims<'a> {
    pub iss: &'a str,
    pub scope: &'a str,
    pub aud: &'a str,
    pub iat: i64,
    pub exp: i64,
}

/// Stateless Google token endpoint calls for service accounts.
pub(crate) struct ServiceAccountEndpoints;

impl ServiceAccountEndpoints {
    /// Sign an RS256 assertion for `scope` with the account's private key.
    pub(crate) fn sign_assertion(
        key: &ServiceAccountKey,
        scope: &str,
    ) -> Result<String, TokenError> {
        let iat = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &key.client_email,
            scope,
            aud: &key.token_uri,
            iat,
            exp: iat + ASSERTION_TTL_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid.clone_from(&key.private_key_id);

        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
        Ok(jsonwebtoken::encode(&header, &claims, &encoding_key)?)
    }

    /// Exchange a signed assertion for a bearer token at the key's `token_uri`.
    pub(crate) async fn exchange_assertion(
        key: &ServiceAccountKey,
        assertion: &str,
        http_client: &reqwest::Client,
    ) -> Result<String, TokenError> {
        let resp = http_client
            .post(key.token_uri.as_str())
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let bytes = resp.bytes().await?;
            if let Ok(error) = serde_json::from_slice::<BasicErrorResponse>(&bytes) {
                return Err(TokenError::Rejected(error));
            }
            return Err(TokenError::UpstreamStatus {
                status,
                body: body_preview(&bytes),
            });
        }

        let token: BasicTokenResponse = resp.json().await?;
        info!(
            client_email = %key.client_email,
            expires_in = ?token.expires_in(),
            "Service account access token issued"
        );
        Ok(token.access_token().secret().clone())
    }
}
