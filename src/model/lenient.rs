//! Deserializers for numeric columns that may arrive as JSON numbers, as
//! numeric text (Postgres `numeric` through PostgREST), or not at all.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Any finite number or numeric string; null, absent and garbage become `None`.
pub fn amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        NumberOrText::Number(n) => Some(n),
        NumberOrText::Text(s) => s.trim().parse::<f64>().ok(),
    })
    .filter(|n| n.is_finite()))
}

/// Non-negative whole count; anything else becomes `None`.
pub fn count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = amount(deserializer)?;
    Ok(parsed
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "super::amount")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "super::count")]
        qty: Option<u32>,
    }

    fn row(json: &str) -> Row {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn numbers_and_text_both_parse() {
        let r = row(r#"{"price": 12.5, "qty": 3}"#);
        assert_eq!(r.price, Some(12.5));
        assert_eq!(r.qty, Some(3));

        let r = row(r#"{"price": " 99.90 ", "qty": "2"}"#);
        assert_eq!(r.price, Some(99.9));
        assert_eq!(r.qty, Some(2));
    }

    #[test]
    fn missing_null_and_garbage_are_none() {
        let r = row("{}");
        assert_eq!(r.price, None);
        assert_eq!(r.qty, None);

        let r = row(r#"{"price": null, "qty": "two"}"#);
        assert_eq!(r.price, None);
        assert_eq!(r.qty, None);

        let r = row(r#"{"price": "NaN", "qty": 1.5}"#);
        assert_eq!(r.price, None);
        assert_eq!(r.qty, None);
    }
}
