use serde::de::{Deserialize, Deserializer, Error as DeserializeError, Unexpected, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt::{self};

use super::term::{Symbol, Term};

impl Serialize for Term {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{}", self))
    }
}

struct TermVisitor {}

impl TermVisitor {
    fn new() -> Self {
        Self {}
    }
}

impl<'de> Visitor<'de> for TermVisitor {
    type Value = Term;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("Expecting a string with an atom or a parenthesized term such as (cell 1 2 b).")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: DeserializeError,
    {
        v.parse::<Term>()
            .map_err(|_| DeserializeError::invalid_value(Unexpected::Str(v), &self))
    }
}

impl<'de> Deserialize<'de> for Term {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(TermVisitor::new())
    }
}

impl Serialize for Symbol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Symbol::from)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_term_ser_json() {
        let term = "(cell 1 2 b)".parse::<Term>().unwrap();

        assert_eq!(json!(term), "(cell 1 2 b)");
    }

    #[test]
    fn test_term_deser_atom() {
        assert_eq!(
            serde_json::from_str::<Term>("\"noop\"").unwrap(),
            Term::atom("noop")
        );
    }

    #[test]
    fn test_term_deser_invalid() {
        assert!(serde_json::from_str::<Term>("\"(cell 1 2\"").is_err());
    }

    #[test]
    fn test_symbol_ser_deser_json() {
        let symbol = Symbol::new("cell");

        assert_eq!(json!(symbol), "cell");
        assert_eq!(serde_json::from_str::<Symbol>("\"cell\"").unwrap(), symbol);
    }
}
