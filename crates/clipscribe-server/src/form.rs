use std::collections::HashMap;

use axum::extract::Multipart;
use clipscribe_storage::AudioFile;

/// Content type assumed for file parts that declare none
const UNKNOWN_CONTENT_TYPE: &str = "application/octet-stream";

/// Multipart form read into memory
///
/// Parts with a filename are kept as files, all others as text.
#[derive(Debug, Default)]
pub(crate) struct Form {
    files: HashMap<String, AudioFile>,
    fields: HashMap<String, String>,
}

impl Form {
    pub(crate) async fn read(mut multipart: Multipart) -> crate::error::Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match field.file_name().map(str::to_owned) {
                Some(filename) => {
                    let content_type = field.content_type().unwrap_or(UNKNOWN_CONTENT_TYPE).to_owned();
                    let bytes = field.bytes().await?;

                    form.files.insert(
                        name,
                        AudioFile {
                            bytes,
                            filename,
                            content_type,
                        },
                    );
                }
                None => {
                    let text = field.text().await?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    pub(crate) fn take_file(&mut self, name: &str) -> Option<AudioFile> {
        self.files.remove(name)
    }

    /// Text field, `None` when absent or blank
    pub(crate) fn take_text(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name).filter(|value| !value.trim().is_empty())
    }
}
