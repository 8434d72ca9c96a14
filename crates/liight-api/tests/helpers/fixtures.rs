//! Request fixtures.

use axum_test::multipart::{MultipartForm, Part};
use base64::{engine::general_purpose::STANDARD, Engine as _};

pub fn minimal_pdf() -> Vec<u8> {
    b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\ntrailer\n<< /Root 1 0 R >>\n%%EOF\n"
        .to_vec()
}

pub fn pdf_part(bytes: Vec<u8>, file_name: &str) -> Part {
    Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_type("application/pdf")
}

/// Complete inquiry form with the given file part.
pub fn inquiry_form(file: Option<Part>) -> MultipartForm {
    let form = MultipartForm::new()
        .add_text("fullName", "Ada Lovelace")
        .add_text("email", "ada@example.com")
        .add_text("organizationType", "Nonprofit")
        .add_text("projectDetails", "Community library mural");
    match file {
        Some(part) => form.add_part("pdfFile", part),
        None => form,
    }
}

pub fn pdf_data_url(bytes: &[u8]) -> String {
    format!("data:application/pdf;base64,{}", STANDARD.encode(bytes))
}
