use serde::{Deserialize, Serialize};

/// Reward tier. Serialized with the labels used in the reward table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, utoipa::ToSchema)]
pub enum Rarity {
    #[serde(rename = "稀有")]
    Common,
    #[serde(rename = "超激稀有")]
    SuperRare,
}

impl Rarity {
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "稀有",
            Rarity::SuperRare => "超激稀有",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct GachaResult {
    pub character: String,
    pub image: String,
    pub rarity: Rarity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GachaRow {
    #[serde(rename = "角色")]
    pub character: String,
    #[serde(rename = "圖片")]
    pub image: String,
    // Kept as text: rows carrying other labels simply never match a draw.
    #[serde(rename = "稀有度")]
    pub rarity: String,
}

impl GachaRow {
    pub fn is(&self, rarity: Rarity) -> bool {
        self.rarity == rarity.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_serializes_as_table_label() {
        let result = GachaResult {
            character: "貓咪".to_string(),
            image: "/static/cat.png".to_string(),
            rarity: Rarity::SuperRare,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["rarity"], "超激稀有");
        assert_eq!(json["character"], "貓咪");
    }

    #[test]
    fn test_row_matching() {
        let row = GachaRow {
            character: "狗".to_string(),
            image: "dog.png".to_string(),
            rarity: "稀有".to_string(),
        };
        assert!(row.is(Rarity::Common));
        assert!(!row.is(Rarity::SuperRare));
    }
}
