use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::resource::{Resource, ResourceFlag};
use crate::features::contacts::dtos::{CreateContactDto, UpdateContactDto};
use crate::features::contacts::params::ContactParams;
use crate::shared::json::{self, JsonObject};
use crate::shared::types::ListShape;
use crate::shared::wire::{wire_enum, WireEnum};

wire_enum! {
    /// Office or institution a contact belongs to, in directory order
    pub enum ContactType {
        KepalaDesa => "KEPALA_DESA",
        SekretarisDesa => "SEKRETARIS_DESA",
        KaurKeuangan => "KAUR_KEUANGAN",
        KaurUmum => "KAUR_UMUM",
        KaurPerencanaan => "KAUR_PERENCANAAN",
        KasiPemerintahan => "KASI_PEMERINTAHAN",
        KasiKesejahteraan => "KASI_KESEJAHTERAAN",
        KasiPelayanan => "KASI_PELAYANAN",
        KepalaDusun => "KEPALA_DUSUN",
        Bpd => "BPD",
        Lpmd => "LPMD",
        Pkk => "PKK",
        KarangTaruna => "KARANG_TARUNA",
        Posyandu => "POSYANDU",
        Darurat => "DARURAT",
        Lainnya => "LAINNYA",
    }
}

impl Default for ContactType {
    fn default() -> Self {
        ContactType::Lainnya
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub position: String,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "type")]
    pub contact_type: ContactType,
    pub is_active: bool,
    /// Display order within the directory, ascending
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactFlag {
    Active,
}

impl ResourceFlag for ContactFlag {
    fn segment(&self) -> &'static str {
        "activate"
    }

    fn field(&self) -> &'static str {
        "isActive"
    }
}

impl Resource for Contact {
    const NAME: &'static str = "contacts";
    const PATH: &'static str = "/contacts";
    const LIST_SHAPE: ListShape = ListShape {
        list_keys: &["contacts"],
        meta_keys: &["pagination"],
    };
    const SINGULAR_KEYS: &'static [&'static str] = &["contact"];

    type Params = ContactParams;
    type Flag = ContactFlag;
    type CreateDto = CreateContactDto;
    type UpdateDto = UpdateContactDto;

    fn from_json(obj: &JsonObject) -> Option<Self> {
        Some(Self {
            id: json::id(obj)?,
            name: json::string_or_default(obj, &["name"]),
            position: json::string_or_default(obj, &["position", "jabatan", "title"]),
            department: json::non_empty_string(obj, &["department", "division"]),
            phone: json::non_empty_string(obj, &["phone", "phoneNumber"]),
            whatsapp: json::non_empty_string(obj, &["whatsapp"]),
            email: json::non_empty_string(obj, &["email"]),
            address: json::non_empty_string(obj, &["address"]),
            contact_type: json::string(obj, &["type", "contactType", "category"])
                .and_then(|t| ContactType::from_wire(&t))
                .unwrap_or_default(),
            is_active: json::bool_or(obj, &["isActive", "active"], true),
            order: json::i32_or(obj, &["order", "sortOrder"], 0),
            created_at: json::datetime(obj, &["createdAt", "created_at"]).unwrap_or_default(),
            updated_at: json::datetime(obj, &["updatedAt", "updated_at"]).unwrap_or_default(),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sixteen_contact_types() {
        assert_eq!(ContactType::ALL.len(), 16);
        assert_eq!(ContactType::from_wire("kepala desa"), Some(ContactType::KepalaDesa));
        assert_eq!(ContactType::from_wire("karang-taruna"), Some(ContactType::KarangTaruna));
    }

    #[test]
    fn test_contact_from_json() {
        let contact = Contact::from_json(
            json!({
                "id": 7,
                "name": "Budi Santoso",
                "jabatan": "Kepala Dusun I",
                "type": "KEPALA_DUSUN",
                "order": "3",
                "phone": ""
            })
            .as_object()
            .unwrap(),
        )
        .unwrap();

        assert_eq!(contact.id, "7");
        assert_eq!(contact.position, "Kepala Dusun I");
        assert_eq!(contact.contact_type, ContactType::KepalaDusun);
        assert_eq!(contact.order, 3);
        assert_eq!(contact.phone, None);
        assert!(contact.is_active);

        let value = serde_json::to_value(&contact).unwrap();
        assert_eq!(value["type"], "KEPALA_DUSUN");
    }

    #[test]
    fn test_unknown_type_falls_back() {
        let contact = Contact::from_json(json!({"id": "c1", "type": "RT"}).as_object().unwrap())
            .unwrap();
        assert_eq!(contact.contact_type, ContactType::Lainnya);
    }
}
