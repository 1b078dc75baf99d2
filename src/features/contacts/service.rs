use serde::Serialize;

use crate::core::error::Result;
use crate::core::resource::ResourceService;
use crate::features::contacts::model::{Contact, ContactFlag, ContactType};
use crate::features::contacts::params::ContactParams;
use crate::shared::constants::MAX_PAGE_SIZE;
use crate::shared::params::{PageParams, SortOrder};

pub type ContactService = ResourceService<Contact>;

/// Contacts of one type, in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactGroup {
    #[serde(rename = "type")]
    pub contact_type: ContactType,
    pub contacts: Vec<Contact>,
}

impl ResourceService<Contact> {
    /// Active contacts grouped by type, groups in `ContactType` order
    pub async fn grouped(&self) -> Result<Vec<ContactGroup>> {
        let params = ContactParams {
            page: PageParams {
                sort_by: Some("order".to_string()),
                sort_order: Some(SortOrder::Asc),
                ..PageParams::new(1, MAX_PAGE_SIZE)
            },
            is_active: Some(true),
            ..Default::default()
        };
        let page = self.list(&params).await?;
        Ok(group_contacts(&page.data))
    }

    pub async fn set_active(&self, id: &str, active: bool) -> Result<Option<Contact>> {
        self.set_flag(id, ContactFlag::Active, active).await
    }
}

/// Empty groups are left out; ties on `order` keep backend order
pub fn group_contacts(contacts: &[Contact]) -> Vec<ContactGroup> {
    ContactType::ALL
        .iter()
        .filter_map(|t| {
            let mut members: Vec<Contact> = contacts
                .iter()
                .filter(|c| c.contact_type == *t)
                .cloned()
                .collect();
            if members.is_empty() {
                return None;
            }
            members.sort_by_key(|c| c.order);
            Some(ContactGroup {
                contact_type: *t,
                contacts: members,
            })
        })
        .collect()
}
