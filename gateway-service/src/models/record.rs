use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// variant order is the column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Id,
    Author,
    Title,
    Publisher,
    Year,
    Pages,
    Language,
    Size,
    Extension,
    Mirror1,
    Mirror2,
    Mirror3,
    Mirror4,
    Mirror5,
    Edit,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown column: {0}")]
pub struct UnknownField(pub String);

impl Field {
    pub const ALL: [Field; 15] = [
        Field::Id,
        Field::Author,
        Field::Title,
        Field::Publisher,
        Field::Year,
        Field::Pages,
        Field::Language,
        Field::Size,
        Field::Extension,
        Field::Mirror1,
        Field::Mirror2,
        Field::Mirror3,
        Field::Mirror4,
        Field::Mirror5,
        Field::Edit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "ID",
            Field::Author => "Author",
            Field::Title => "Title",
            Field::Publisher => "Publisher",
            Field::Year => "Year",
            Field::Pages => "Pages",
            Field::Language => "Language",
            Field::Size => "Size",
            Field::Extension => "Extension",
            Field::Mirror1 => "Mirror_1",
            Field::Mirror2 => "Mirror_2",
            Field::Mirror3 => "Mirror_3",
            Field::Mirror4 => "Mirror_4",
            Field::Mirror5 => "Mirror_5",
            Field::Edit => "Edit",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<Field, String>);

impl Record {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        name.parse().ok().and_then(|field| self.get(field))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V: Into<String>> FromIterator<(Field, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (Field, V)>>(iter: I) -> Self {
        Record(
            iter.into_iter()
                .map(|(field, value)| (field, value.into()))
                .collect(),
        )
    }
}
