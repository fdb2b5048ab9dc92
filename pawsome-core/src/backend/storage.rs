//! Photo uploads to the `dog-images` bucket.

use std::path::Path;

use super::error::UploadError;
use super::tables::check;
use super::Backend;

/// Bucket holding dog profile photos.
pub const IMAGE_BUCKET: &str = "dog-images";

/// An image picked for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Reads an image from disk, keeping its file name.
    pub fn open(path: &Path) -> Result<Self, UploadError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or(UploadError::MissingName)?
            .to_string();
        let bytes = std::fs::read(path)?;
        Ok(Self { name, bytes })
    }

    /// Text after the last `.`, or the whole name when there is none.
    pub fn extension(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    fn content_type(&self) -> String {
        mime_guess::from_path(&self.name)
            .first_or_octet_stream()
            .to_string()
    }
}

/// Object key `{user_id}/{random}.{ext}` for a new upload.
pub(crate) fn object_path(user_id: &str, file: &ImageFile) -> String {
    format!("{}/{}.{}", user_id, uuid::Uuid::new_v4(), file.extension())
}

fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

impl Backend {
    /// Public URL of an object in the image bucket.
    pub fn public_url(&self, path: &str) -> String {
        self.endpoint(&format!(
            "/storage/v1/object/public/{}/{}",
            IMAGE_BUCKET,
            encode_path(path)
        ))
    }

    /// Uploads a dog photo under the user's folder and returns its public URL.
    pub async fn upload_dog_image(
        &self,
        file: &ImageFile,
        user_id: &str,
    ) -> Result<String, UploadError> {
        let path = object_path(user_id, file);
        let url = self.endpoint(&format!(
            "/storage/v1/object/{}/{}",
            IMAGE_BUCKET,
            encode_path(&path)
        ));

        tracing::debug!(%path, bytes = file.bytes.len(), "uploading dog image");

        let request = self
            .http
            .post(url)
            .header("Content-Type", file.content_type())
            .header("x-upsert", "false")
            .body(file.bytes.clone());

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(super::BackendError::from)?;
        check(response).await?;

        Ok(self.public_url(&path))
    }
}
