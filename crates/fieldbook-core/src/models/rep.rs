//! Representative records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::query::{Queryable, SortField, SortValue};

/// A field sales representative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Representative {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub territory: String,
    pub join_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating a representative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RepresentativeDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub territory: String,
    pub join_date: NaiveDate,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl RepresentativeDraft {
    pub(crate) fn into_record(self, id: String, now: DateTime<Utc>) -> Representative {
        Representative {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            territory: self.territory,
            join_date: self.join_date,
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a representative
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct RepresentativePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub territory: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

impl RepresentativePatch {
    pub(crate) fn apply(self, rep: &mut Representative) {
        if let Some(name) = self.name {
            rep.name = name;
        }
        if let Some(email) = self.email {
            rep.email = email;
        }
        if let Some(phone) = self.phone {
            rep.phone = phone;
        }
        if let Some(territory) = self.territory {
            rep.territory = territory;
        }
        if let Some(join_date) = self.join_date {
            rep.join_date = join_date;
        }
        if let Some(is_active) = self.is_active {
            rep.is_active = is_active;
        }
    }
}

impl Queryable for Representative {
    // Representatives carry no status and do not reference another
    // representative; those predicates exclude them when set.

    fn sort_value(&self, field: SortField) -> Option<SortValue> {
        match field {
            SortField::Date => Some(SortValue::Date(self.join_date)),
            SortField::Name => Some(SortValue::Text(self.name.clone())),
            SortField::CreatedAt => Some(SortValue::Instant(self.created_at)),
            SortField::UpdatedAt => Some(SortValue::Instant(self.updated_at)),
            SortField::Status | SortField::TotalAmount | SortField::Target => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults_to_active() {
        let draft: RepresentativeDraft = serde_json::from_str(
            r#"{
                "name": "Dana Reyes",
                "email": "dana.reyes@example.com",
                "phone": "+1-555-0148",
                "territory": "East District",
                "joinDate": "2024-06-01"
            }"#,
        )
        .unwrap();
        assert!(draft.is_active);
    }

    #[test]
    fn test_serialization_round_trip() {
        let rep = RepresentativeDraft {
            name: "Dana Reyes".to_string(),
            email: "dana.reyes@example.com".to_string(),
            phone: "+1-555-0148".to_string(),
            territory: "East District".to_string(),
            join_date: "2024-06-01".parse().unwrap(),
            is_active: true,
        }
        .into_record("r1".to_string(), Utc::now());

        let json = serde_json::to_string(&rep).unwrap();
        assert!(json.contains("\"joinDate\""));
        assert!(json.contains("\"isActive\""));

        let back: Representative = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rep);
    }
}
