use axum::extract::Multipart;

use lexclass_core::models::document::DocumentUpload;

use crate::error::ApiError;

/// Multipart field carrying the uploaded PDF.
pub const DOCUMENT_FIELD: &str = "document";
/// Multipart field carrying the selected characteristic.
pub const CHARACTERISTIC_FIELD: &str = "characteristic";

/// The submitted classification form.
#[derive(Debug, Default)]
pub struct ClassifyForm {
    pub document: Option<DocumentUpload>,
    pub characteristic: Option<String>,
}

impl ClassifyForm {
    /// Read the form from a multipart body. Unknown fields are ignored.
    ///
    /// Browsers send an empty, unnamed file part when nothing was chosen;
    /// that counts as no document.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = ClassifyForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some(DOCUMENT_FIELD) => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await?;
                    if filename.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    let filename = if filename.is_empty() {
                        "document.pdf".to_string()
                    } else {
                        filename
                    };
                    form.document = Some(DocumentUpload::new(filename, bytes.to_vec()));
                }
                Some(CHARACTERISTIC_FIELD) => {
                    form.characteristic = Some(field.text().await?);
                }
                _ => {}
            }
        }

        Ok(form)
    }
}
