use crate::models::{NewPerson, Person, PersonChanges};
use crate::utils::identifier;
use serde::{Deserialize, Serialize};

/// Body of `POST /person`. Any client-supplied `id` is ignored.
#[derive(Debug, Deserialize)]
pub struct CreatePersonRequest {
    pub name: String,
    pub occupation: String,
    pub address: String,
}

impl From<CreatePersonRequest> for NewPerson {
    fn from(req: CreatePersonRequest) -> Self {
        Self {
            name: req.name,
            occupation: req.occupation,
            address: req.address,
        }
    }
}

/// Body of `PATCH /persons/{person_id}`. Absent and `null` fields are skipped.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePersonRequest {
    pub name: Option<String>,
    pub occupation: Option<String>,
    pub address: Option<String>,
}

impl From<UpdatePersonRequest> for PersonChanges {
    fn from(req: UpdatePersonRequest) -> Self {
        Self {
            name: req.name,
            occupation: req.occupation,
            address: req.address,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonResponse {
    pub id: String,
    pub name: String,
    pub occupation: String,
    pub address: String,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            id: identifier::encode(&person.id),
            name: person.name,
            occupation: person.occupation,
            address: person.address,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PersonCollection {
    pub persons: Vec<PersonResponse>,
}

impl From<Vec<Person>> for PersonCollection {
    fn from(persons: Vec<Person>) -> Self {
        Self {
            persons: persons.into_iter().map(PersonResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatePersonResponse {
    pub message: String,
    pub person: PersonResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
