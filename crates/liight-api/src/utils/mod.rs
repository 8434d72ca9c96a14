pub mod data_url;
pub mod inquiry;
pub mod upload;
