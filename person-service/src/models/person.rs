use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// A person as persisted in the collection. Every stored record has an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub occupation: String,
    pub address: String,
}

/// Insert shape. The store assigns `_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub occupation: String,
    pub address: String,
}

impl NewPerson {
    pub fn with_id(self, id: ObjectId) -> Person {
        Person {
            id,
            name: self.name,
            occupation: self.occupation,
            address: self.address,
        }
    }
}

/// Field replacements for a partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonChanges {
    pub name: Option<String>,
    pub occupation: Option<String>,
    pub address: Option<String>,
}

impl PersonChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.occupation.is_none() && self.address.is_none()
    }

    /// The `$set` payload holding only the provided fields.
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(name) = &self.name {
            set.insert("name", name.as_str());
        }
        if let Some(occupation) = &self.occupation {
            set.insert("occupation", occupation.as_str());
        }
        if let Some(address) = &self.address {
            set.insert("address", address.as_str());
        }
        doc! { "$set": set }
    }

    pub fn apply_to(&self, person: &mut Person) {
        if let Some(name) = &self.name {
            person.name = name.clone();
        }
        if let Some(occupation) = &self.occupation {
            person.occupation = occupation.clone();
        }
        if let Some(address) = &self.address {
            person.address = address.clone();
        }
    }
}
