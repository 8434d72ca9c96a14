pub mod donation;
pub mod health;
pub mod inquiry_json;
pub mod inquiry_upload;
