//! Phone and address per client, kept only in this browser.

use gloo::storage::{LocalStorage, Storage};
use shared::{ClientContact, ClientSummary};
use std::collections::HashMap;

pub const KEY_CONTACTS: &str = "clientContacts";

pub type ContactBook = HashMap<String, ClientContact>;

pub fn load_all() -> ContactBook {
    LocalStorage::get(KEY_CONTACTS).unwrap_or_default()
}

/// Store the contact for one client; blank fields are saved as missing
pub fn save_contact(client_name: &str, contact: ClientContact) -> Result<(), String> {
    let mut book = load_all();
    book.insert(client_name.trim().to_string(), normalize(contact));
    LocalStorage::set(KEY_CONTACTS, &book).map_err(|e| format!("Failed to save contact: {}", e))
}

fn normalize(contact: ClientContact) -> ClientContact {
    let clean = |value: Option<String>| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    ClientContact {
        phone: clean(contact.phone),
        address: clean(contact.address),
    }
}

/// Attach stored contacts to the summaries returned by the backend
pub fn merge(summaries: Vec<ClientSummary>, book: &ContactBook) -> Vec<ClientSummary> {
    summaries
        .into_iter()
        .map(|summary| match book.get(&summary.name) {
            Some(contact) => summary.with_contact(contact.clone()),
            None => summary,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str) -> ClientSummary {
        ClientSummary {
            name: name.to_string(),
            appointment_count: 1,
            last_appointment_date: "2025-06-01".to_string(),
            phone: None,
            address: None,
        }
    }

    #[test]
    fn test_merge_attaches_known_contacts() {
        let mut book = ContactBook::new();
        book.insert(
            "Ana".to_string(),
            ClientContact {
                phone: Some("555-0101".to_string()),
                address: None,
            },
        );

        let merged = merge(vec![summary("Ana"), summary("Luis")], &book);
        assert_eq!(merged[0].phone.as_deref(), Some("555-0101"));
        assert_eq!(merged[1].phone, None);
    }

    #[test]
    fn test_normalize_drops_blank_fields() {
        let contact = normalize(ClientContact {
            phone: Some("   ".to_string()),
            address: Some(" Calle 5 #12 ".to_string()),
        });
        assert_eq!(contact.phone, None);
        assert_eq!(contact.address.as_deref(), Some("Calle 5 #12"));
    }
}
