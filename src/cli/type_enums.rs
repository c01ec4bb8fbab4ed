use el_hornito::schemas::user_settings::EquipmentCategory;
use std::fmt;
use std::str::FromStr;

/// A single `--equipment CATEGORY:ITEM` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentEntry {
    pub category: EquipmentCategory,
    pub item: String,
}

/// Implementation of string parsing for EquipmentEntry.
/// Allows converting `basic:oven` style arguments to a typed entry.
impl FromStr for EquipmentEntry {
    type Err = String;

    /// Parses a `CATEGORY:ITEM` string.
    ///
    /// # Arguments
    /// * `s` - The string to parse; the category is case-insensitive, the item is kept as written.
    ///
    /// # Returns
    /// * `Ok(EquipmentEntry)` if the category is known and the item is non-empty
    /// * `Err(String)` with error message otherwise
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((category, item)) = s.split_once(':') else {
            return Err(format!(
                "Invalid equipment '{s}'. Expected CATEGORY:ITEM, e.g. basic:oven"
            ));
        };
        let item = item.trim();
        if item.is_empty() {
            return Err(format!("Invalid equipment '{s}'. The item name is empty"));
        }
        Ok(EquipmentEntry {
            category: category.trim().parse()?,
            item: item.to_string(),
        })
    }
}

/// Implementation of display formatting for EquipmentEntry.
impl fmt::Display for EquipmentEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.category, self.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_category_and_item() {
        let entry: EquipmentEntry = "Baking:stand mixer".parse().unwrap();
        assert_eq!(entry.category, EquipmentCategory::Baking);
        assert_eq!(entry.item, "stand mixer");
    }

    #[test]
    fn item_may_contain_colons() {
        let entry: EquipmentEntry = "other:timer: digital".parse().unwrap();
        assert_eq!(entry.category, EquipmentCategory::Other);
        assert_eq!(entry.item, "timer: digital");
    }

    #[test]
    fn rejects_malformed_entries() {
        assert!("oven".parse::<EquipmentEntry>().is_err());
        assert!("basic:".parse::<EquipmentEntry>().is_err());
        assert!("garage:hammer".parse::<EquipmentEntry>().is_err());
    }
}
