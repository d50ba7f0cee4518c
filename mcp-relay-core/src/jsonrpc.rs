//! JSON-RPC 2.0 message classification.
//!
//! The relay never interprets payload semantics; its diagnostics just want to
//! name the method and correlation id crossing the bridge. Classification is
//! therefore deliberately shallow: it borrows an already-parsed
//! `serde_json::Value`, extracts the two fields the logs care about, and
//! gives up (`None`) on anything that is not a single JSON-RPC 2.0 envelope.
//! The payload forwards either way; nothing downstream branches on the result.

use serde_json::Value;

/// JSON-RPC 2.0 correlation id: integer, string, or an explicit `null`.
///
/// An explicit `null` id is distinct from a missing `id` field, which marks a
/// notification. Floats, booleans, arrays, and objects are not valid ids and
/// leave the message unclassified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JsonRpcId {
    Number(i64),
    String(String),
    Null,
}

impl std::fmt::Display for JsonRpcId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonRpcId::Number(n) => write!(f, "{n}"),
            JsonRpcId::String(s) => write!(f, "{s}"),
            JsonRpcId::Null => write!(f, "null"),
        }
    }
}

/// What kind of JSON-RPC 2.0 message a parsed value is, by which of `id` and
/// `method` it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonRpcMessageKind {
    /// Carries both fields: a request expecting a reply.
    Request { id: JsonRpcId, method: String },
    /// Carries only `id`: a reply to an earlier request.
    Response { id: JsonRpcId },
    /// Carries only `method`: fire-and-forget.
    Notification { method: String },
}

impl JsonRpcMessageKind {
    /// Classify a parsed value, or `None` when it is not an envelope the
    /// relay can label: wrong or missing `"jsonrpc"` version, an id of an
    /// invalid type, a non-string `method`, or neither field present. Batch
    /// arrays fall out of the same check, since arrays have no `"jsonrpc"`
    /// key.
    pub fn classify(value: &Value) -> Option<Self> {
        if value.get("jsonrpc")?.as_str()? != "2.0" {
            return None;
        }

        let id = match value.get("id") {
            None => None,
            Some(Value::Number(n)) => Some(JsonRpcId::Number(n.as_i64()?)),
            Some(Value::String(s)) => Some(JsonRpcId::String(s.clone())),
            Some(Value::Null) => Some(JsonRpcId::Null),
            Some(_) => return None,
        };

        let method = match value.get("method") {
            None => None,
            Some(Value::String(m)) => Some(m.clone()),
            Some(_) => return None,
        };

        match (id, method) {
            (Some(id), Some(method)) => Some(Self::Request { id, method }),
            (Some(id), None) => Some(Self::Response { id }),
            (None, Some(method)) => Some(Self::Notification { method }),
            (None, None) => None,
        }
    }

    /// The method name for requests and notifications, `"response"` otherwise.
    ///
    /// Used as the `method` field of structured diagnostics.
    pub fn method_label(&self) -> &str {
        match self {
            JsonRpcMessageKind::Request { method, .. } => method.as_str(),
            JsonRpcMessageKind::Notification { method } => method.as_str(),
            JsonRpcMessageKind::Response { .. } => "response",
        }
    }

    /// The correlation id, if this kind carries one.
    pub fn id(&self) -> Option<&JsonRpcId> {
        match self {
            JsonRpcMessageKind::Request { id, .. } | JsonRpcMessageKind::Response { id } => {
                Some(id)
            }
            JsonRpcMessageKind::Notification { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_has_both_fields() {
        let val = json!({"jsonrpc": "2.0", "id": 1, "method": "search", "params": {}});
        assert_eq!(
            JsonRpcMessageKind::classify(&val),
            Some(JsonRpcMessageKind::Request {
                id: JsonRpcId::Number(1),
                method: "search".to_string(),
            })
        );
    }

    #[test]
    fn test_response_has_id_only() {
        let val = json!({"jsonrpc": "2.0", "id": 1, "result": {"content": []}});
        assert_eq!(
            JsonRpcMessageKind::classify(&val),
            Some(JsonRpcMessageKind::Response {
                id: JsonRpcId::Number(1),
            })
        );
    }

    #[test]
    fn test_notification_has_method_only() {
        let val = json!({"jsonrpc": "2.0", "method": "initialized"});
        assert_eq!(
            JsonRpcMessageKind::classify(&val),
            Some(JsonRpcMessageKind::Notification {
                method: "initialized".to_string(),
            })
        );
    }

    #[test]
    fn test_error_response_is_a_response() {
        let val = json!({
            "jsonrpc": "2.0",
            "id": 5,
            "error": {"code": -32600, "message": "Invalid Request"}
        });
        assert_eq!(
            JsonRpcMessageKind::classify(&val),
            Some(JsonRpcMessageKind::Response {
                id: JsonRpcId::Number(5),
            })
        );
    }

    #[test]
    fn test_missing_version_unclassified() {
        let val = json!({"id": 1, "method": "x"});
        assert_eq!(JsonRpcMessageKind::classify(&val), None);
    }

    #[test]
    fn test_wrong_version_unclassified() {
        let val = json!({"jsonrpc": "1.0", "id": 1, "method": "x"});
        assert_eq!(JsonRpcMessageKind::classify(&val), None);
    }

    #[test]
    fn test_neither_field_unclassified() {
        let val = json!({"jsonrpc": "2.0", "result": "orphan"});
        assert_eq!(JsonRpcMessageKind::classify(&val), None);
    }

    #[test]
    fn test_string_id() {
        let val = json!({"jsonrpc": "2.0", "id": "abc-123", "method": "ping"});
        assert_eq!(
            JsonRpcMessageKind::classify(&val),
            Some(JsonRpcMessageKind::Request {
                id: JsonRpcId::String("abc-123".to_string()),
                method: "ping".to_string(),
            })
        );
    }

    #[test]
    fn test_null_id_is_a_response() {
        // null id with no method is a response, unusual but valid.
        let val = json!({"jsonrpc": "2.0", "id": null, "result": "ok"});
        assert_eq!(
            JsonRpcMessageKind::classify(&val),
            Some(JsonRpcMessageKind::Response { id: JsonRpcId::Null })
        );
    }

    #[test]
    fn test_invalid_id_types_unclassified() {
        for id in [json!(true), json!(1.5), json!([1]), json!({"n": 1})] {
            let val = json!({"jsonrpc": "2.0", "id": id, "method": "x"});
            assert_eq!(JsonRpcMessageKind::classify(&val), None, "id was {val}");
        }
    }

    #[test]
    fn test_non_string_method_unclassified() {
        let val = json!({"jsonrpc": "2.0", "id": 1, "method": 42});
        assert_eq!(JsonRpcMessageKind::classify(&val), None);
    }

    #[test]
    fn test_batch_array_unclassified() {
        let val = json!([{"jsonrpc": "2.0", "id": 1, "method": "x"}]);
        assert_eq!(JsonRpcMessageKind::classify(&val), None);
    }

    #[test]
    fn test_method_label() {
        let req = JsonRpcMessageKind::Request {
            id: JsonRpcId::Number(1),
            method: "search".to_string(),
        };
        assert_eq!(req.method_label(), "search");

        let note = JsonRpcMessageKind::Notification {
            method: "initialized".to_string(),
        };
        assert_eq!(note.method_label(), "initialized");

        let resp = JsonRpcMessageKind::Response {
            id: JsonRpcId::Number(1),
        };
        assert_eq!(resp.method_label(), "response");
    }

    #[test]
    fn test_id_accessor() {
        let req = JsonRpcMessageKind::Request {
            id: JsonRpcId::String("a".to_string()),
            method: "m".to_string(),
        };
        assert_eq!(req.id(), Some(&JsonRpcId::String("a".to_string())));

        let note = JsonRpcMessageKind::Notification {
            method: "m".to_string(),
        };
        assert_eq!(note.id(), None);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(JsonRpcId::Number(42).to_string(), "42");
        assert_eq!(JsonRpcId::String("req-1".to_string()).to_string(), "req-1");
        assert_eq!(JsonRpcId::Null.to_string(), "null");
    }
}
