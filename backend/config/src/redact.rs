//! Config redaction: produce loggable config snapshots by masking secrets.

use serde_json::Value;

/// Keys whose string values are secrets.
static SENSITIVE_KEYS: &[&str] = &["token", "apiKey", "api_key", "apikey", "secret", "password"];

/// Redact a config JSON value, replacing sensitive strings with a short hint.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn redact_string(s: &str, key: &str) -> Value {
    if !is_sensitive_key(key) || s.is_empty() {
        return Value::String(s.to_string());
    }
    // Unresolved `${VAR}` references are not secrets.
    if s.starts_with("${") {
        return Value::String(s.to_string());
    }
    let hint: String = s.chars().take(4).collect();
    if s.chars().count() > 8 {
        Value::String(format!("{hint}***"))
    } else {
        Value::String("***".to_string())
    }
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) => redact_string(s, key),
        Value::Array(arr) => Value::Array(arr.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                result.insert(k.clone(), redact_recursive(v, k));
            }
            Value::Object(result)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn redacts_discord_token() {
        let v = json!({ "discord": { "token": "MTIzNDU2Nzg5.abcdef.ghijkl" } });
        let token = redact(&v)["discord"]["token"].as_str().unwrap().to_string();
        assert_eq!(token, "MTIz***");
    }

    #[test]
    fn redacts_short_api_key_entirely() {
        let v = json!({ "ocr": { "remote": { "apiKey": "K8123" } } });
        assert_eq!(redact(&v)["ocr"]["remote"]["apiKey"], "***");
    }

    #[test]
    fn keeps_env_references_and_plain_values() {
        let v = json!({ "discord": { "token": "${DISCORD_TOKEN}" }, "logging": { "level": "debug" } });
        let redacted = redact(&v);
        assert_eq!(redacted["discord"]["token"], "${DISCORD_TOKEN}");
        assert_eq!(redacted["logging"]["level"], "debug");
    }
}
