use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

/// Column and literal types understood by the push-down compiler.
///
/// Each variant maps to the object identifier (OID) the query engine uses on
/// the wire, so `DataType::from_oid(23)` is `Integer`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    Bytea,
    Bigint,
    Smallint,
    Integer,
    Text,
    Json,
    Real,
    Float8,
    Bpchar,
    Varchar,
    Date,
    Time,
    Timestamp,
    TimestampWithTimeZone,
    Numeric,
    Uuid,
    Jsonb,

    BoolArray,
    ByteaArray,
    Int2Array,
    Int4Array,
    Int8Array,
    Float4Array,
    Float8Array,
    TextArray,
    BpcharArray,
    VarcharArray,
    DateArray,
    TimeArray,
    TimestampArray,
    TimestampWithTimeZoneArray,
    NumericArray,
    UuidArray,
}

lazy_static! {
    static ref OID_MAP: HashMap<u32, DataType> = build_oid_map();
    static ref POSTGRES_TYPE_MAP: HashMap<&'static str, DataType> = build_postgres_type_map();
}

const ALL_TYPES: [DataType; 34] = [
    DataType::Boolean,
    DataType::Bytea,
    DataType::Bigint,
    DataType::Smallint,
    DataType::Integer,
    DataType::Text,
    DataType::Json,
    DataType::Real,
    DataType::Float8,
    DataType::Bpchar,
    DataType::Varchar,
    DataType::Date,
    DataType::Time,
    DataType::Timestamp,
    DataType::TimestampWithTimeZone,
    DataType::Numeric,
    DataType::Uuid,
    DataType::Jsonb,
    DataType::BoolArray,
    DataType::ByteaArray,
    DataType::Int2Array,
    DataType::Int4Array,
    DataType::Int8Array,
    DataType::Float4Array,
    DataType::Float8Array,
    DataType::TextArray,
    DataType::BpcharArray,
    DataType::VarcharArray,
    DataType::DateArray,
    DataType::TimeArray,
    DataType::TimestampArray,
    DataType::TimestampWithTimeZoneArray,
    DataType::NumericArray,
    DataType::UuidArray,
];

impl DataType {
    pub fn oid(&self) -> u32 {
        match self {
            DataType::Boolean => 16,
            DataType::Bytea => 17,
            DataType::Bigint => 20,
            DataType::Smallint => 21,
            DataType::Integer => 23,
            DataType::Text => 25,
            DataType::Json => 114,
            DataType::Real => 700,
            DataType::Float8 => 701,
            DataType::Bpchar => 1042,
            DataType::Varchar => 1043,
            DataType::Date => 1082,
            DataType::Time => 1083,
            DataType::Timestamp => 1114,
            DataType::TimestampWithTimeZone => 1184,
            DataType::Numeric => 1700,
            DataType::Uuid => 2950,
            DataType::Jsonb => 3802,
            DataType::BoolArray => 1000,
            DataType::ByteaArray => 1001,
            DataType::Int2Array => 1005,
            DataType::Int4Array => 1007,
            DataType::TextArray => 1009,
            DataType::BpcharArray => 1014,
            DataType::VarcharArray => 1015,
            DataType::Int8Array => 1016,
            DataType::Float4Array => 1021,
            DataType::Float8Array => 1022,
            DataType::TimestampArray => 1115,
            DataType::DateArray => 1182,
            DataType::TimeArray => 1183,
            DataType::TimestampWithTimeZoneArray => 1185,
            DataType::NumericArray => 1231,
            DataType::UuidArray => 2951,
        }
    }

    pub fn from_oid(oid: u32) -> Option<Self> {
        OID_MAP.get(&oid).copied()
    }

    /// Resolves a Postgres type name (`int4`, `character varying`, `_text`,
    /// `bpchar[]`) or a numeric OID given as text.
    pub fn from_postgres_type(type_name: &str) -> Result<Self, String> {
        let trimmed = type_name.trim();
        if let Ok(oid) = trimmed.parse::<u32>() {
            return Self::from_oid(oid).ok_or_else(|| format!("Unknown type OID: {oid}"));
        }

        if let Some(base) = Self::normalize_postgres_array_type(trimmed) {
            return POSTGRES_TYPE_MAP
                .get(base.as_str())
                .and_then(|element| element.array_type())
                .ok_or_else(|| format!("Unknown Postgres array type: {type_name}"));
        }

        let normalized = Self::normalize_type_name(trimmed);
        POSTGRES_TYPE_MAP
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| format!("Unknown Postgres column type: {type_name}"))
    }

    pub fn postgres_name(&self) -> &'static str {
        match self {
            DataType::Boolean => "bool",
            DataType::Bytea => "bytea",
            DataType::Bigint => "int8",
            DataType::Smallint => "int2",
            DataType::Integer => "int4",
            DataType::Text => "text",
            DataType::Json => "json",
            DataType::Real => "float4",
            DataType::Float8 => "float8",
            DataType::Bpchar => "bpchar",
            DataType::Varchar => "varchar",
            DataType::Date => "date",
            DataType::Time => "time",
            DataType::Timestamp => "timestamp",
            DataType::TimestampWithTimeZone => "timestamptz",
            DataType::Numeric => "numeric",
            DataType::Uuid => "uuid",
            DataType::Jsonb => "jsonb",
            DataType::BoolArray => "bool[]",
            DataType::ByteaArray => "bytea[]",
            DataType::Int2Array => "int2[]",
            DataType::Int4Array => "int4[]",
            DataType::Int8Array => "int8[]",
            DataType::Float4Array => "float4[]",
            DataType::Float8Array => "float8[]",
            DataType::TextArray => "text[]",
            DataType::BpcharArray => "bpchar[]",
            DataType::VarcharArray => "varchar[]",
            DataType::DateArray => "date[]",
            DataType::TimeArray => "time[]",
            DataType::TimestampArray => "timestamp[]",
            DataType::TimestampWithTimeZoneArray => "timestamptz[]",
            DataType::NumericArray => "numeric[]",
            DataType::UuidArray => "uuid[]",
        }
    }

    pub fn is_array(&self) -> bool {
        self.element_type().is_some()
    }

    /// The element type of an array type, `None` for scalars.
    pub fn element_type(&self) -> Option<DataType> {
        let element = match self {
            DataType::BoolArray => DataType::Boolean,
            DataType::ByteaArray => DataType::Bytea,
            DataType::Int2Array => DataType::Smallint,
            DataType::Int4Array => DataType::Integer,
            DataType::Int8Array => DataType::Bigint,
            DataType::Float4Array => DataType::Real,
            DataType::Float8Array => DataType::Float8,
            DataType::TextArray => DataType::Text,
            DataType::BpcharArray => DataType::Bpchar,
            DataType::VarcharArray => DataType::Varchar,
            DataType::DateArray => DataType::Date,
            DataType::TimeArray => DataType::Time,
            DataType::TimestampArray => DataType::Timestamp,
            DataType::TimestampWithTimeZoneArray => DataType::TimestampWithTimeZone,
            DataType::NumericArray => DataType::Numeric,
            DataType::UuidArray => DataType::Uuid,
            _ => return None,
        };
        Some(element)
    }

    pub fn array_type(&self) -> Option<DataType> {
        ALL_TYPES
            .iter()
            .find(|candidate| candidate.element_type() == Some(*self))
            .copied()
    }

    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            DataType::Smallint | DataType::Integer | DataType::Bigint
        )
    }

    pub fn is_text(&self) -> bool {
        matches!(self, DataType::Text | DataType::Varchar | DataType::Bpchar)
    }

    fn normalize_type_name(type_name: &str) -> String {
        type_name.trim().to_lowercase()
    }

    fn normalize_postgres_array_type(type_name: &str) -> Option<String> {
        let base = if let Some(base) = type_name.strip_prefix('_') {
            base
        } else if let Some(base) = type_name.strip_suffix("[]") {
            base
        } else {
            return None;
        };

        let base = base.trim();
        if base.is_empty() {
            None
        } else {
            Some(Self::normalize_type_name(base))
        }
    }
}

impl TryFrom<&str> for DataType {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        DataType::from_postgres_type(s)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.postgres_name())
    }
}

fn build_oid_map() -> HashMap<u32, DataType> {
    ALL_TYPES
        .iter()
        .map(|data_type| (data_type.oid(), *data_type))
        .collect()
}

fn build_postgres_type_map() -> HashMap<&'static str, DataType> {
    use DataType::*;

    let entries = [
        ("bool", Boolean),
        ("boolean", Boolean),
        ("bytea", Bytea),
        ("int8", Bigint),
        ("bigint", Bigint),
        ("int2", Smallint),
        ("smallint", Smallint),
        ("int4", Integer),
        ("int", Integer),
        ("integer", Integer),
        ("text", Text),
        ("json", Json),
        ("float4", Real),
        ("real", Real),
        ("float8", Float8),
        ("double precision", Float8),
        ("bpchar", Bpchar),
        ("char", Bpchar),
        ("character", Bpchar),
        ("varchar", Varchar),
        ("character varying", Varchar),
        ("date", Date),
        ("time", Time),
        ("time without time zone", Time),
        ("timestamp", Timestamp),
        ("timestamp without time zone", Timestamp),
        ("timestamptz", TimestampWithTimeZone),
        ("timestamp with time zone", TimestampWithTimeZone),
        ("numeric", Numeric),
        ("decimal", Numeric),
        ("uuid", Uuid),
        ("jsonb", Jsonb),
    ];

    let mut map = HashMap::new();
    for (name, data_type) in entries {
        map.insert(name, data_type);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oid_round_trip_for_every_type() {
        for data_type in ALL_TYPES {
            assert_eq!(DataType::from_oid(data_type.oid()), Some(data_type));
        }
        assert_eq!(DataType::from_oid(99999), None);
    }

    #[test]
    fn test_from_postgres_type_names() {
        assert_eq!(DataType::try_from("int4"), Ok(DataType::Integer));
        assert_eq!(
            DataType::try_from("Character Varying"),
            Ok(DataType::Varchar)
        );
        assert_eq!(DataType::try_from("_text"), Ok(DataType::TextArray));
        assert_eq!(DataType::try_from("bpchar[]"), Ok(DataType::BpcharArray));
        assert_eq!(DataType::try_from("1042"), Ok(DataType::Bpchar));
        assert!(DataType::try_from("geometry").is_err());
    }

    #[test]
    fn test_array_element_types() {
        assert_eq!(DataType::Int8Array.element_type(), Some(DataType::Bigint));
        assert_eq!(DataType::Bigint.array_type(), Some(DataType::Int8Array));
        assert!(DataType::TextArray.is_array());
        assert!(!DataType::Text.is_array());
        assert_eq!(DataType::Json.array_type(), None);
    }
}
