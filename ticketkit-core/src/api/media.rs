//! Event media endpoints: multipart image uploads, listing and removal.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::path_segment;
use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{Event, MediaKind, MediaListing};

/// One file to upload: its name as sent in the form and its raw bytes.
#[derive(Debug, Clone)]
pub struct MediaFile {
    /// File name reported to the server.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl MediaFile {
    /// Builds an upload from a name and raw bytes.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    fn into_part(self) -> Part {
        Part::bytes(self.bytes).file_name(self.file_name)
    }
}

#[derive(Deserialize)]
struct EventMediaResponse {
    media: MediaListing,
}

fn media_endpoint(event_id: &str) -> String {
    format!("/media/events/{}", path_segment(event_id))
}

impl ApiClient {
    /// Replaces the event's poster image. Returns the updated event.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error; an expired token surfaces directly
    /// since multipart bodies are not replayed.
    pub async fn upload_poster(&self, event_id: &str, file: MediaFile) -> Result<Event> {
        let form = Form::new().part("poster", file.into_part());
        self.send_multipart(&format!("{}/poster", media_endpoint(event_id)), form)
            .await
    }

    /// Replaces the event's listing thumbnail. Returns the updated event.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn upload_thumbnail(&self, event_id: &str, file: MediaFile) -> Result<Event> {
        let form = Form::new().part("thumbnail", file.into_part());
        self.send_multipart(&format!("{}/thumbnail", media_endpoint(event_id)), form)
            .await
    }

    /// Appends images to the event's gallery. Returns the updated event.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn upload_gallery_images(
        &self,
        event_id: &str,
        files: Vec<MediaFile>,
    ) -> Result<Event> {
        let mut form = Form::new();
        for file in files {
            form = form.part("gallery", file.into_part());
        }
        self.send_multipart(&format!("{}/gallery", media_endpoint(event_id)), form)
            .await
    }

    /// Replaces the event's QR code image. Returns the updated event.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn upload_qr_code(&self, event_id: &str, file: MediaFile) -> Result<Event> {
        let form = Form::new().part("qrcode", file.into_part());
        self.send_multipart(&format!("{}/qrcode", media_endpoint(event_id)), form)
            .await
    }

    /// Detaches one media URL from the event. Returns the updated event.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn delete_media(&self, event_id: &str, url: &str, kind: MediaKind) -> Result<Event> {
        self.delete_with_body(
            &media_endpoint(event_id),
            &serde_json::json!({ "url": url, "mediaType": kind.to_string() }),
        )
        .await
    }

    /// Lists the media currently attached to the event.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error.
    pub async fn event_media(&self, event_id: &str) -> Result<MediaListing> {
        let response: EventMediaResponse = self
            .get(&format!("{}/list", media_endpoint(event_id)))
            .await?;
        Ok(response.media)
    }
}
