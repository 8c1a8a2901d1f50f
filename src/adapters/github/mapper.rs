//! Map GitHub REST responses to domain entities and request results.

use crate::domain::{ErrorKind, License, Repo, RequestResult};
use reqwest::StatusCode;
use serde::Deserialize;

/// `GET /user`
#[derive(Debug, Deserialize)]
pub struct UserDto {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct OwnerDto {
    pub login: String,
}

/// Element of `GET /user/repos`.
#[derive(Debug, Deserialize)]
pub struct RepoDto {
    pub name: String,
    pub owner: OwnerDto,
    pub description: Option<String>,
    pub language: Option<String>,
}

/// `GET /repos/{owner}/{repo}/license`
#[derive(Debug, Deserialize)]
pub struct LicenseEnvelope {
    pub license: Option<License>,
}

/// GitHub error body: `{"message": "...", "documentation_url": "..."}`
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Extract the `message` field of an error body, if any.
pub fn api_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

/// Classify a non-success HTTP response.
///
/// * 401 → Unauthorized; always carries a message (body message or status reason).
/// * 5xx → ServerNotResponding.
/// * anything else → Other with the body message, if present.
pub fn classify_status<T>(status: StatusCode, body: &str) -> RequestResult<T> {
    let message = api_message(body);
    if status == StatusCode::UNAUTHORIZED {
        let reason = message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unauthorized")
                .to_string()
        });
        return RequestResult::error_with_message(ErrorKind::Unauthorized, reason);
    }
    if status.is_server_error() {
        return RequestResult::Error {
            kind: ErrorKind::ServerNotResponding,
            message: None,
            cause: None,
        };
    }
    RequestResult::Error {
        kind: ErrorKind::Other,
        message,
        cause: None,
    }
}

/// Classify a transport or decoding failure.
pub fn classify_transport<T>(err: reqwest::Error) -> RequestResult<T> {
    let kind = if err.is_timeout() {
        ErrorKind::ServerNotResponding
    } else if err.is_connect() {
        ErrorKind::ConnectionError
    } else {
        ErrorKind::Other
    };
    RequestResult::Error {
        kind,
        message: None,
        cause: Some(anyhow::Error::new(err)),
    }
}

pub fn repo_to_domain(dto: RepoDto) -> Repo {
    let color = dto.language.as_deref().and_then(language_color);
    Repo {
        name: dto.name,
        owner: dto.owner.login,
        description: dto.description.unwrap_or_default(),
        language: dto.language.unwrap_or_default(),
        color,
    }
}

/// ARGB display color for well-known languages (GitHub linguist palette).
pub fn language_color(language: &str) -> Option<u32> {
    let rgb = match language {
        "Rust" => 0xDEA584,
        "Kotlin" => 0xA97BFF,
        "Java" => 0xB07219,
        "Python" => 0x3572A5,
        "JavaScript" => 0xF1E05A,
        "TypeScript" => 0x3178C6,
        "Go" => 0x00ADD8,
        "C" => 0x555555,
        "C++" => 0xF34B7D,
        "C#" => 0x178600,
        "Swift" => 0xF05138,
        "Dart" => 0x00B4AB,
        "Ruby" => 0x701516,
        "Shell" => 0x89E051,
        _ => return None,
    };
    Some(0xFF00_0000 | rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_and_message<T>(result: RequestResult<T>) -> (ErrorKind, Option<String>) {
        match result {
            RequestResult::Error { kind, message, .. } => (kind, message),
            RequestResult::Success(_) => panic!("expected error"),
        }
    }

    #[test]
    fn unauthorized_uses_body_message() {
        let body = r#"{"message":"Bad credentials","documentation_url":"https://docs.github.com"}"#;
        let (kind, message) =
            kind_and_message(classify_status::<()>(StatusCode::UNAUTHORIZED, body));
        assert_eq!(kind, ErrorKind::Unauthorized);
        assert_eq!(message.as_deref(), Some("Bad credentials"));
    }

    #[test]
    fn unauthorized_always_has_a_message() {
        let (kind, message) = kind_and_message(classify_status::<()>(StatusCode::UNAUTHORIZED, ""));
        assert_eq!(kind, ErrorKind::Unauthorized);
        assert_eq!(message.as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn server_errors_are_not_responding() {
        for status in [
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
            StatusCode::GATEWAY_TIMEOUT,
        ] {
            let (kind, _) = kind_and_message(classify_status::<()>(status, "<html>"));
            assert_eq!(kind, ErrorKind::ServerNotResponding, "{}", status);
        }
    }

    #[test]
    fn other_statuses_keep_body_message() {
        let (kind, message) = kind_and_message(classify_status::<()>(
            StatusCode::FORBIDDEN,
            r#"{"message":"API rate limit exceeded"}"#,
        ));
        assert_eq!(kind, ErrorKind::Other);
        assert_eq!(message.as_deref(), Some("API rate limit exceeded"));

        let (kind, message) =
            kind_and_message(classify_status::<()>(StatusCode::IM_A_TEAPOT, "nope"));
        assert_eq!(kind, ErrorKind::Other);
        assert_eq!(message, None);
    }

    #[test]
    fn repo_dto_maps_nulls_to_empty_strings() {
        let json = r#"[
            {"name":"crate","owner":{"login":"alice"},"description":null,"language":"Rust"},
            {"name":"notes","owner":{"login":"bob"},"description":"misc","language":null}
        ]"#;
        let repos: Vec<Repo> = serde_json::from_str::<Vec<RepoDto>>(json)
            .unwrap()
            .into_iter()
            .map(repo_to_domain)
            .collect();

        assert_eq!(
            repos[0],
            Repo {
                name: "crate".into(),
                owner: "alice".into(),
                description: String::new(),
                language: "Rust".into(),
                color: Some(0xFFDEA584),
            }
        );
        assert_eq!(repos[1].description, "misc");
        assert_eq!(repos[1].language, "");
        assert_eq!(repos[1].color, None);
    }

    #[test]
    fn license_envelope_reads_spdx_id() {
        let json = r#"{"name":"LICENSE","license":{"key":"mit","spdx_id":"MIT"}}"#;
        let envelope: LicenseEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.license.and_then(|l| l.name).as_deref(), Some("MIT"));
    }
}
