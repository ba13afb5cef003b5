use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::impl_record;
use crate::ids::ContactId;
use crate::query::{cmp_option, cmp_text, Searchable, Sortable};

/// A client or vendor contact in the CRM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl_record!(Contact, ContactId, "contacts");

impl Searchable for Contact {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.first_name.as_str(), self.last_name.as_str(), self.email.as_str()];
        if let Some(company) = &self.company {
            fields.push(company);
        }
        fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactSortKey {
    Name,
    Company,
    CreatedAt,
}

impl Sortable for Contact {
    type SortKey = ContactSortKey;

    fn compare_by(&self, other: &Self, key: ContactSortKey) -> Ordering {
        match key {
            ContactSortKey::Name => cmp_text(&self.last_name, &other.last_name)
                .then_with(|| cmp_text(&self.first_name, &other.first_name)),
            ContactSortKey::Company => cmp_option(
                &self.company.as_deref().map(str::to_lowercase),
                &other.company.as_deref().map(str::to_lowercase),
            ),
            ContactSortKey::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{filter_by_search, sort_records, SortSpec};
    use chrono::TimeZone;

    fn contact(first: &str, last: &str, company: Option<&str>) -> Contact {
        Contact {
            id: ContactId::generate(),
            first_name: first.into(),
            last_name: last.into(),
            email: format!("{}@example.com", first.to_lowercase()),
            phone: None,
            company: company.map(Into::into),
            created_at: Utc.with_ymd_and_hms(2025, 1, 5, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn searches_name_email_and_company() {
        let contacts = vec![
            contact("Ada", "Stone", Some("Northwall Homes")),
            contact("Ben", "Okafor", None),
        ];
        assert_eq!(filter_by_search(contacts.clone(), "northwall").len(), 1);
        assert_eq!(filter_by_search(contacts.clone(), "BEN@").len(), 1);
        assert_eq!(filter_by_search(contacts, "stone")[0].first_name, "Ada");
    }

    #[test]
    fn sorts_by_last_name_and_puts_missing_company_last() {
        let mut contacts = vec![
            contact("Ben", "Okafor", None),
            contact("Ada", "Stone", Some("Acme")),
            contact("Cy", "adams", Some("Zed")),
        ];
        sort_records(&mut contacts, SortSpec::asc(ContactSortKey::Name));
        assert_eq!(contacts[0].last_name, "adams");
        sort_records(&mut contacts, SortSpec::asc(ContactSortKey::Company));
        assert_eq!(contacts[2].last_name, "Okafor");
        assert_eq!(contacts[0].full_name(), "Ada Stone");
    }
}
