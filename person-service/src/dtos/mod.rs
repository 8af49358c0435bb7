pub mod person;

pub use person::{
    CreatePersonRequest, MessageResponse, PersonCollection, PersonResponse, UpdatePersonRequest,
    UpdatePersonResponse,
};
