use crate::core::fields::{CURRENCY_SYMBOL_KEY, NUMERIC_FIELDS};
use crate::core::params::InputParameters;
use serde_json::{Map, Number, Value};

/// Flat key-value record handed to the persistence collaborator.
pub type SnapshotRecord = Map<String, Value>;

/// Converts [`InputParameters`] to and from a flat snapshot record.
///
/// Decoding never fails: each known key falls back to the supplied default
/// when it is missing or not well typed, unknown keys are ignored, and a
/// record that is not a JSON object at all yields the defaults unchanged.
///
/// # Examples
///
/// ```
/// use trade_digitisation_engine::core::params::InputParameters;
/// use trade_digitisation_engine::snapshot::codec::SnapshotCodec;
///
/// let defaults = InputParameters::default();
/// let edited = defaults.with_value("termExtension", 45.0).unwrap();
///
/// let record = SnapshotCodec::encode(&edited);
/// assert_eq!(SnapshotCodec::decode(&record, &defaults), edited);
/// ```
pub struct SnapshotCodec;

impl SnapshotCodec {
    /// One entry per field. Non-finite numbers are stored as 0.
    pub fn encode(params: &InputParameters) -> SnapshotRecord {
        let mut record = SnapshotRecord::new();
        for spec in NUMERIC_FIELDS {
            let number = Number::from_f64((spec.get)(params)).unwrap_or_else(|| Number::from(0));
            record.insert(spec.key.to_string(), Value::Number(number));
        }
        record.insert(
            CURRENCY_SYMBOL_KEY.to_string(),
            Value::String(params.currency_symbol.clone()),
        );
        record
    }

    /// Encode straight to JSON text.
    pub fn encode_to_string(params: &InputParameters) -> String {
        Value::Object(Self::encode(params)).to_string()
    }

    /// Field-by-field decode over `defaults`.
    pub fn decode(record: &SnapshotRecord, defaults: &InputParameters) -> InputParameters {
        let mut params = defaults.clone();

        for spec in NUMERIC_FIELDS {
            match record.get(spec.key) {
                None => {}
                Some(Value::Number(n)) => match n.as_f64().filter(|v| v.is_finite()) {
                    Some(value) => (spec.set)(&mut params, value),
                    None => log::warn!("Snapshot value for '{}' out of range, using default", spec.key),
                },
                Some(other) => {
                    log::warn!("Snapshot value for '{}' is not a number ({}), using default", spec.key, other)
                }
            }
        }

        match record.get(CURRENCY_SYMBOL_KEY) {
            None => {}
            Some(Value::String(symbol)) => params.currency_symbol = symbol.clone(),
            Some(other) => log::warn!(
                "Snapshot value for '{}' is not a string ({}), using default",
                CURRENCY_SYMBOL_KEY,
                other
            ),
        }

        params
    }

    /// Decode any JSON value; anything but an object yields `defaults`.
    pub fn decode_value(value: &Value, defaults: &InputParameters) -> InputParameters {
        match value {
            Value::Object(record) => Self::decode(record, defaults),
            _ => {
                log::warn!("Snapshot is not a JSON object, using defaults");
                defaults.clone()
            }
        }
    }

    /// Decode JSON text; unparsable text yields `defaults`.
    pub fn decode_str(text: &str, defaults: &InputParameters) -> InputParameters {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::decode_value(&value, defaults),
            Err(e) => {
                log::warn!("Corrupt snapshot ({}), using defaults", e);
                defaults.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn edited() -> InputParameters {
        InputParameters {
            annual_volume_mm: 350.0,
            early_payment_discount: 2.25,
            customs_filings: 420.0,
            net_debt: -25_000_000.0,
            currency_symbol: "€".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_encode_has_every_field() {
        let record = SnapshotCodec::encode(&InputParameters::default());
        assert_eq!(record.len(), NUMERIC_FIELDS.len() + 1);
        assert_eq!(record["annualVolumeMM"], json!(200.0));
        assert_eq!(record["currencySymbol"], json!("$"));
    }

    #[test]
    fn test_encode_non_finite_as_zero() {
        let params = InputParameters {
            scf_rate: f64::NAN,
            ..Default::default()
        };
        let record = SnapshotCodec::encode(&params);
        assert_eq!(record["scfRate"].as_f64(), Some(0.0));
    }

    #[test]
    fn test_round_trip() {
        let params = edited();
        let record = SnapshotCodec::encode(&params);
        assert_eq!(SnapshotCodec::decode(&record, &InputParameters::default()), params);
    }

    #[test]
    fn test_round_trip_through_text() {
        let params = edited().with_value("scfRate", 6.123_456_789_012_345).unwrap();
        let text = SnapshotCodec::encode_to_string(&params);
        assert_eq!(SnapshotCodec::decode_str(&text, &InputParameters::default()), params);
    }

    #[test]
    fn test_empty_record_gives_defaults() {
        let defaults = edited();
        assert_eq!(SnapshotCodec::decode(&SnapshotRecord::new(), &defaults), defaults);
    }

    #[test]
    fn test_partial_record_from_older_version() {
        let value = json!({ "annualVolumeMM": 500, "digitisationPct": 80 });
        let params = SnapshotCodec::decode_value(&value, &InputParameters::default());
        assert_eq!(params.annual_volume_mm, 500.0);
        assert_eq!(params.digitisation_pct, 80.0);
        assert_eq!(params.trade_efficiency_pct, 40.0);
        assert_eq!(params.currency_symbol, "$");
    }

    #[test]
    fn test_ill_typed_values_fall_back_per_field() {
        let value = json!({
            "termExtension": "45",
            "scfRate": null,
            "apHeadcount": 20,
            "currencySymbol": 5,
            "legacyPlatformFee": 1000
        });
        let defaults = InputParameters::default();
        let params = SnapshotCodec::decode_value(&value, &defaults);
        assert_eq!(params.term_extension, defaults.term_extension);
        assert_eq!(params.scf_rate, defaults.scf_rate);
        assert_eq!(params.ap_headcount, 20.0);
        assert_eq!(params.currency_symbol, "$");
    }

    #[test]
    fn test_corrupt_text_gives_defaults() {
        let defaults = edited();
        assert_eq!(SnapshotCodec::decode_str("{not json", &defaults), defaults);
        assert_eq!(SnapshotCodec::decode_str("[1, 2, 3]", &defaults), defaults);
        assert_eq!(SnapshotCodec::decode_str("", &defaults), defaults);
    }
}
