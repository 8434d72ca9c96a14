//! Domain models shared between the intake client and the HTTP API.

pub mod donation;
pub mod inquiry;

pub use donation::{
    format_amount, mask_phone_number, BillingInfo, CardDetails, DonationFrequency, DonationRequest, DonorInfo, MobileMoneyDetails,
    PaymentInfo, PaymentMethod,
};
pub use inquiry::{ApiMessage, InquiryJsonRequest, InquiryResponse, UploadedFileInfo};
