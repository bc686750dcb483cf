// src/scraper/normalize.rs

use crate::domain::sentinel;

/// Typed pieces of the card's property-information block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    pub property_type: String,
    pub bedrooms: String,
    pub bathrooms: String,
}

impl Default for PropertyInfo {
    fn default() -> Self {
        Self {
            property_type: sentinel::PROPERTY_TYPE.to_string(),
            bedrooms: sentinel::BEDROOMS.to_string(),
            bathrooms: sentinel::BATHROOMS.to_string(),
        }
    }
}

/// Splits the block positionally: line 0 is the property type, lines 1 and 2
/// the bedroom and bathroom counts. Counts are only taken when all three
/// lines are there; a one- or two-line block yields just the type.
pub fn normalize_property_info(block: &str) -> PropertyInfo {
    let mut info = PropertyInfo::default();

    if block == sentinel::PROPERTY_INFO {
        return info;
    }

    let lines: Vec<&str> = block.lines().collect();

    if let Some(first) = lines.first() {
        info.property_type = first.to_string();
    }

    if let [_, bedrooms, bathrooms, ..] = lines.as_slice() {
        info.bedrooms = format!("{bedrooms} bedrooms");
        info.bathrooms = format!("{bathrooms} bathrooms");
    }

    info
}
