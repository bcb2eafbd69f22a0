use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Service type requested at the front desk.
///
/// Closed set: each category owns a fixed prefix letter and display color,
/// and new categories are a code change, not data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ServiceCategory {
    #[serde(rename = "protocolo")]
    Protocol,
    #[serde(rename = "certidao")]
    Certificate,
    #[serde(rename = "alvara")]
    License,
    #[serde(rename = "iptu")]
    PropertyTax,
    #[serde(rename = "outros")]
    Other,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 5] = [
        ServiceCategory::Protocol,
        ServiceCategory::Certificate,
        ServiceCategory::License,
        ServiceCategory::PropertyTax,
        ServiceCategory::Other,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ServiceCategory::Protocol => "protocolo",
            ServiceCategory::Certificate => "certidao",
            ServiceCategory::License => "alvara",
            ServiceCategory::PropertyTax => "iptu",
            ServiceCategory::Other => "outros",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceCategory::Protocol => "Protocolo",
            ServiceCategory::Certificate => "Certidão",
            ServiceCategory::License => "Alvará",
            ServiceCategory::PropertyTax => "IPTU",
            ServiceCategory::Other => "Outros",
        }
    }

    pub fn prefix(&self) -> char {
        match self {
            ServiceCategory::Protocol => 'P',
            ServiceCategory::Certificate => 'C',
            ServiceCategory::License => 'A',
            ServiceCategory::PropertyTax => 'I',
            ServiceCategory::Other => 'O',
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ServiceCategory::Protocol => "bg-blue-500",
            ServiceCategory::Certificate => "bg-green-500",
            ServiceCategory::License => "bg-purple-500",
            ServiceCategory::PropertyTax => "bg-amber-500",
            ServiceCategory::Other => "bg-gray-500",
        }
    }

    /// Ticket number for the given sequence value, e.g. `P001`
    pub fn ticket_number(&self, seq: u64) -> String {
        format!("{}{:03}", self.prefix(), seq)
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_prefixes_are_distinct() {
        let prefixes: HashSet<char> = ServiceCategory::ALL.iter().map(|c| c.prefix()).collect();
        assert_eq!(prefixes.len(), ServiceCategory::ALL.len());
    }

    #[test]
    fn test_ticket_number_format() {
        assert_eq!(ServiceCategory::Protocol.ticket_number(1), "P001");
        assert_eq!(ServiceCategory::PropertyTax.ticket_number(42), "I042");
        assert_eq!(ServiceCategory::Other.ticket_number(1000), "O1000");
    }

    #[test]
    fn test_serde_uses_category_id() {
        for category in ServiceCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.id()));
        }
        assert!(serde_json::from_str::<ServiceCategory>("\"passport\"").is_err());
    }
}
