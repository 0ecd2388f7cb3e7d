use serde_json::Value;

/// Fields worth printing on their own, most specific first.
const PRIORITY_KEYS: [&str; 4] = ["query", "deleted", "id", "price"];

/// Print just the key answer: the share query, a scenario id, or the price.
/// Row lists print one answer per line.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result_obj {
        Value::Array(items) => {
            for item in items {
                println!("{}", pick(item));
            }
        }
        Value::Object(map) if map.contains_key("rows") => {
            if let Some(Value::Array(rows)) = map.get("rows") {
                for row in rows {
                    println!("{}", pick(row));
                }
            }
        }
        other => println!("{}", pick(other)),
    }
}

fn pick(value: &Value) -> String {
    let Value::Object(map) = value else {
        return format_minimal(value);
    };
    PRIORITY_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|val| !val.is_null())
        .map(format_minimal)
        .or_else(|| {
            map.iter()
                .next()
                .map(|(key, val)| format!("{}: {}", key, format_minimal(val)))
        })
        .unwrap_or_default()
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pick_prefers_query_then_id_then_price() {
        assert_eq!(pick(&json!({"params": {}, "query": "face=1000"})), "face=1000");
        assert_eq!(pick(&json!({"price": 990.5, "id": "17"})), "17");
        assert_eq!(pick(&json!({"yield_pct": 6.0, "price": 925.5})), "925.5");
    }

    #[test]
    fn test_pick_falls_back_to_first_field() {
        assert_eq!(pick(&json!({"alpha": 1})), "alpha: 1");
        assert_eq!(pick(&json!("plain")), "plain");
    }
}
