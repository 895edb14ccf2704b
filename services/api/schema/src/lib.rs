//! sea-orm entities for tables owned by the API service.

pub mod users;
