use super::data_type::DataType;
use serde::{Deserialize, Serialize};

/// Metadata for one column of the request, addressed by its ordinal `index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub data_type: DataType,
    pub index: usize,
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_modifiers: Option<Vec<i32>>,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, data_type: DataType, index: usize) -> Self {
        Self {
            name: name.into(),
            data_type,
            index,
            type_name: data_type.postgres_name().to_string(),
            type_modifiers: None,
        }
    }

    pub fn with_type_modifiers(mut self, modifiers: Vec<i32>) -> Self {
        self.type_modifiers = Some(modifiers);
        self
    }

    /// Declared width of a fixed-width column, e.g. `3` for `CHAR(3)`.
    pub fn width(&self) -> Option<usize> {
        self.type_modifiers
            .as_ref()
            .and_then(|modifiers| modifiers.first())
            .and_then(|width| usize::try_from(*width).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_from_type_modifiers() {
        let column = ColumnDescriptor::new("code", DataType::Bpchar, 0).with_type_modifiers(vec![3]);
        assert_eq!(column.width(), Some(3));
        assert_eq!(column.type_name, "bpchar");

        let unbounded = ColumnDescriptor::new("code", DataType::Bpchar, 0);
        assert_eq!(unbounded.width(), None);

        let negative = ColumnDescriptor::new("code", DataType::Bpchar, 0).with_type_modifiers(vec![-1]);
        assert_eq!(negative.width(), None);
    }

    #[test]
    fn test_deserialize_without_modifiers() {
        let json = r#"{"name":"id","data_type":"Integer","index":0,"type_name":"int4"}"#;
        let column: ColumnDescriptor = serde_json::from_str(json).unwrap();

        assert_eq!(column, ColumnDescriptor::new("id", DataType::Integer, 0));
        assert_eq!(serde_json::to_string(&column).unwrap(), json);
    }
}
