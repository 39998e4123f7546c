//! OAuth 1.0a request signing (HMAC-SHA1), as required by X's user-context
//! endpoints.

use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use xwriting_core::Credentials;

use crate::{ApiError, Result};

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 encoding: only `A-Za-z0-9-._~` pass through unchanged.
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Sort by key then value, encode both, join as `k=v&k=v`.
pub fn normalized_params(params: &[(String, String)]) -> String {
    let mut items: Vec<&(String, String)> = params.iter().collect();
    items.sort();
    items
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn signature_base_string(method: &str, url: &str, params: &[(String, String)]) -> String {
    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(url),
        percent_encode(&normalized_params(params))
    )
}

/// Base64 HMAC-SHA1 of `base` keyed by `enc(consumer_secret)&enc(token_secret)`.
pub fn sign(base: &str, consumer_secret: &str, token_secret: &str) -> Result<String> {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| ApiError::Signing(e.to_string()))?;
    mac.update(base.as_bytes());
    Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

/// Build the `Authorization` header value with a fixed nonce and timestamp.
pub fn oauth1_header_with(
    method: &str,
    url: &str,
    query: &[(String, String)],
    credentials: &Credentials,
    nonce: &str,
    timestamp: i64,
) -> Result<String> {
    let (Some(consumer_key), Some(consumer_secret), Some(token), Some(token_secret)) = (
        credentials.api_key.as_deref(),
        credentials.api_key_secret.as_deref(),
        credentials.access_token.as_deref(),
        credentials.access_token_secret.as_deref(),
    ) else {
        return Err(ApiError::MissingCredentials);
    };

    let mut oauth_params: Vec<(String, String)> = vec![
        ("oauth_consumer_key".into(), consumer_key.into()),
        ("oauth_nonce".into(), nonce.into()),
        ("oauth_signature_method".into(), "HMAC-SHA1".into()),
        ("oauth_timestamp".into(), timestamp.to_string()),
        ("oauth_token".into(), token.into()),
        ("oauth_version".into(), "1.0".into()),
    ];

    let mut sig_params = query.to_vec();
    sig_params.extend(oauth_params.iter().cloned());
    let base = signature_base_string(method, url, &sig_params);
    oauth_params.push(("oauth_signature".into(), sign(&base, consumer_secret, token_secret)?));
    oauth_params.sort();

    let header = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!("OAuth {header}"))
}

/// Build the `Authorization` header value with a fresh nonce and the current time.
pub fn oauth1_header(
    method: &str,
    url: &str,
    query: &[(String, String)],
    credentials: &Credentials,
) -> Result<String> {
    let nonce = hex::encode(rand::random::<[u8; 16]>());
    let timestamp = chrono::Utc::now().timestamp();
    oauth1_header_with(method, url, query, credentials, &nonce, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oauth_creds() -> Credentials {
        Credentials {
            api_key: Some("ck".into()),
            api_key_secret: Some("cs".into()),
            access_token: Some("tk".into()),
            access_token_secret: Some("ts".into()),
            bearer_token: None,
        }
    }

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(percent_encode("a-b._~"), "a-b._~");
        assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(percent_encode("An encoded string!"), "An%20encoded%20string%21");
        assert_eq!(percent_encode("(x) -is:reply"), "%28x%29%20-is%3Areply");
    }

    #[test]
    fn normalizes_sorted_by_key_then_value() {
        let params = vec![
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "z z".to_string()),
            ("a".to_string(), "y".to_string()),
        ];
        assert_eq!(normalized_params(&params), "a=y&a=z%20z&b=2");
    }

    #[test]
    fn base_string_layout() {
        let params = vec![("user.fields".to_string(), "id".to_string())];
        assert_eq!(
            signature_base_string("get", "https://api.x.com/2/users/me", &params),
            "GET&https%3A%2F%2Fapi.x.com%2F2%2Fusers%2Fme&user.fields%3Did"
        );
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // Worked example from the X developer docs ("Creating a signature").
    const DOC_URL: &str = "https://api.twitter.com/1.1/statuses/update.json";
    const DOC_CONSUMER_SECRET: &str = "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw";
    const DOC_TOKEN_SECRET: &str = "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE";
    const DOC_SIGNATURE: &str = "hCtSmYh+iHYCEqBWrE7C7hYmtUk=";

    fn doc_query() -> Vec<(String, String)> {
        pairs(&[
            ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
            ("include_entities", "true"),
        ])
    }

    fn doc_creds() -> Credentials {
        Credentials {
            api_key: Some("xvz1evFS4wEEPTGEFPHBog".into()),
            api_key_secret: Some(DOC_CONSUMER_SECRET.into()),
            access_token: Some("370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".into()),
            access_token_secret: Some(DOC_TOKEN_SECRET.into()),
            bearer_token: None,
        }
    }

    const DOC_NONCE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
    const DOC_TIMESTAMP: i64 = 1_318_622_958;

    #[test]
    fn signature_matches_published_example() {
        let mut params = doc_query();
        params.extend(pairs(&[
            ("oauth_consumer_key", "xvz1evFS4wEEPTGEFPHBog"),
            ("oauth_nonce", DOC_NONCE),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1318622958"),
            ("oauth_token", "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb"),
            ("oauth_version", "1.0"),
        ]));
        let base = signature_base_string("POST", DOC_URL, &params);
        assert!(base.starts_with(
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&include_entities%3Dtrue%26oauth_consumer_key"
        ));
        assert_eq!(
            sign(&base, DOC_CONSUMER_SECRET, DOC_TOKEN_SECRET).unwrap(),
            DOC_SIGNATURE
        );
    }

    #[test]
    fn header_carries_published_signature() {
        let header = oauth1_header_with(
            "POST",
            DOC_URL,
            &doc_query(),
            &doc_creds(),
            DOC_NONCE,
            DOC_TIMESTAMP,
        )
        .unwrap();
        assert!(header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
    }

    #[test]
    fn header_is_sorted_and_signed() {
        let query = vec![("max_results".to_string(), "5".to_string())];
        let url = "https://api.x.com/2/users/1/tweets";
        let header =
            oauth1_header_with("GET", url, &query, &oauth_creds(), "abc123", 1_700_000_000).unwrap();

        assert!(header.starts_with("OAuth oauth_consumer_key=\"ck\", oauth_nonce=\"abc123\""));
        assert!(header.contains("oauth_timestamp=\"1700000000\""));
        assert!(header.ends_with("oauth_version=\"1.0\""));

        assert!(header.contains("oauth_signature=\""));
    }

    #[test]
    fn fresh_nonce_per_header() {
        let a = oauth1_header("GET", "https://x", &[], &oauth_creds()).unwrap();
        let b = oauth1_header("GET", "https://x", &[], &oauth_creds()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn missing_oauth_vars_rejected() {
        let creds = Credentials {
            bearer_token: Some("b".into()),
            ..Credentials::default()
        };
        assert!(matches!(
            oauth1_header("GET", "https://x", &[], &creds),
            Err(ApiError::MissingCredentials)
        ));
    }
}
