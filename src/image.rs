use std::path::{Path, PathBuf};

use log::{error, info, warn};
use reqwest::Client;

use crate::error::Error;

const WIKIPEDIA_FILE_PAGE: &str = "http://en.wikipedia.org/wiki/File:";
const WIKIMEDIA_COMMONS: &str = "https://upload.wikimedia.org/wikipedia/commons/c/cc/";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
    Bmp,
    WebP,
    Tiff,
}

impl ImageKind {
    /// Detect the image format from the first bytes of a file.
    ///
    /// Returns `None` if the data is not an image in one of the known formats.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polymath::image::ImageKind;
    /// assert_eq!(ImageKind::sniff(b"\x89PNG\r\n\x1a\n...."), Some(ImageKind::Png));
    /// assert_eq!(ImageKind::sniff(b"<!DOCTYPE html>"), None);
    /// ```
    pub fn sniff(data: &[u8]) -> Option<Self> {
        match data {
            [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n', ..] => Some(ImageKind::Png),
            [0xff, 0xd8, 0xff, ..] => Some(ImageKind::Jpeg),
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(ImageKind::Gif),
            [b'B', b'M', ..] => Some(ImageKind::Bmp),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => {
                Some(ImageKind::WebP)
            }
            [b'I', b'I', 0x2a, 0x00, ..] | [b'M', b'M', 0x00, 0x2a, ..] => Some(ImageKind::Tiff),
            _ => None,
        }
    }
}

/// Get the url of the actual image file from a Wikipedia file page.
///
/// Wolfram|Alpha often links to the description page of an image rather than the image itself.
///
/// # Examples
///
/// ```
/// # use polymath::image::wikipedia_image_url;
/// assert_eq!(
///     wikipedia_image_url("http://en.wikipedia.org/wiki/File:Lemur.jpg"),
///     "https://upload.wikimedia.org/wikipedia/commons/c/cc/Lemur.jpg"
/// );
/// ```
pub fn wikipedia_image_url(url: &str) -> String {
    url.replace(WIKIPEDIA_FILE_PAGE, WIKIMEDIA_COMMONS)
}

/// Whether a url points to a Wikipedia file page instead of an image.
pub fn is_wikipedia_file_page(url: &str) -> bool {
    url.contains("wikipedia.org/wiki/File:")
}

/// Download an image and save it to a file.
///
/// The file type can vary, so it is best not to pass a path with a fixed extension.
///
/// Returns the path to the saved image, or `None` if the download did not contain a valid image.
///
/// # Arguments
///
/// * `client`: The client to download the image with.
/// * `url`: Where to download the image from.
/// * `file_path`: Where to save the image.
pub async fn save_image(
    client: &Client,
    url: &str,
    file_path: &Path,
) -> Result<Option<PathBuf>, Error> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        warn!("Image download failed with {}", response.status());

        return Ok(None);
    }
    let data = response.bytes().await?;

    let Some(kind) = ImageKind::sniff(&data) else {
        error!("Downloaded file from {url} was not a valid image");

        return Ok(None);
    };

    if let Some(parent) = file_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(file_path, &data).await?;
    info!(
        "Image ({kind:?}) successfully downloaded to {}",
        file_path.display()
    );

    Ok(Some(file_path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const JPEG: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

    fn http() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    #[test]
    fn sniff_formats() {
        assert_eq!(ImageKind::sniff(JPEG), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::sniff(b"GIF89a\x01\x00"), Some(ImageKind::Gif));
        assert_eq!(
            ImageKind::sniff(b"RIFF\x24\x00\x00\x00WEBPVP8 "),
            Some(ImageKind::WebP)
        );
        assert_eq!(ImageKind::sniff(b"MM\x00\x2a"), Some(ImageKind::Tiff));
        assert_eq!(ImageKind::sniff(b""), None);
    }

    #[test]
    fn other_urls_are_unchanged() {
        assert!(!is_wikipedia_file_page("https://example.com/lemur.png"));
        assert_eq!(
            wikipedia_image_url("https://example.com/lemur.png"),
            "https://example.com/lemur.png"
        );
    }

    #[tokio::test]
    async fn valid_image_is_saved() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lemur"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(JPEG))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("images/answer");

        let saved = save_image(&http(), &format!("{}/lemur", server.uri()), &file_path)
            .await
            .unwrap();

        assert_eq!(saved, Some(file_path.clone()));
        assert_eq!(std::fs::read(file_path).unwrap(), JPEG);
    }

    #[tokio::test]
    async fn html_page_is_not_saved() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("answer");

        let saved = save_image(&http(), &server.uri(), &file_path).await.unwrap();

        assert_eq!(saved, None);
        assert!(!file_path.exists());
    }
}
