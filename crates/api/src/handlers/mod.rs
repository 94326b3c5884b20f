pub mod activity_profile;
pub mod compound;
pub mod import;
pub mod kinase;
