//! Loading source images for edit requests.

use std::path::Path;

use studio_genai_types::images::SourceImage;

use crate::error::{Error, Result};

/// 内联请求允许的最大图片大小（20 MiB）。
pub const MAX_INLINE_IMAGE_BYTES: u64 = 20 * 1024 * 1024;

/// 从文件读取源图片，mime 类型按扩展名推断。
///
/// # Errors
/// 路径不是文件、文件过大、无法识别为图片或读取失败时返回错误。
pub async fn read_source_image(path: impl AsRef<Path>) -> Result<SourceImage> {
    read_source_image_with_mime(path, None).await
}

/// 从文件读取源图片，可显式指定 mime 类型。
///
/// # Errors
/// 路径不是文件、文件过大、无法识别为图片或读取失败时返回错误。
pub async fn read_source_image_with_mime(
    path: impl AsRef<Path>,
    mime_type: Option<&str>,
) -> Result<SourceImage> {
    let path = path.as_ref();
    let metadata = tokio::fs::metadata(path).await?;
    if !metadata.is_file() {
        return Err(Error::InvalidRequest {
            message: format!("{} is not a valid file path", path.display()),
        });
    }
    if metadata.len() > MAX_INLINE_IMAGE_BYTES {
        return Err(Error::InvalidRequest {
            message: format!(
                "{} is {} bytes, larger than the {MAX_INLINE_IMAGE_BYTES} byte inline limit",
                path.display(),
                metadata.len()
            ),
        });
    }

    let mime_type = match mime_type {
        Some(value) => value.to_string(),
        None => mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    };
    if !mime_type.starts_with("image/") {
        return Err(Error::InvalidRequest {
            message: format!("{} is not an image ({mime_type})", path.display()),
        });
    }

    let data = tokio::fs::read(path).await?;
    tracing::debug!(path = %path.display(), bytes = data.len(), %mime_type, "loaded source image");
    Ok(SourceImage::new(data, mime_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn reads_bytes_and_guesses_mime() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("portrait.jpg");
        tokio::fs::write(&path, [0xFF, 0xD8, 0xFF]).await.unwrap();

        let image = read_source_image(&path).await.unwrap();
        assert_eq!(image.data, vec![0xFF, 0xD8, 0xFF]);
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn explicit_mime_overrides_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("upload.bin");
        tokio::fs::write(&path, [1, 2, 3]).await.unwrap();

        let image = read_source_image_with_mime(&path, Some("image/webp"))
            .await
            .unwrap();
        assert_eq!(image.mime_type, "image/webp");
    }

    #[tokio::test]
    async fn non_image_files_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        tokio::fs::write(&path, "hello").await.unwrap();

        let err = read_source_image(&path).await.unwrap_err();
        assert!(matches!(err, Error::InvalidRequest { .. }));
    }

    #[tokio::test]
    async fn directories_and_missing_files_error() {
        let dir = tempdir().unwrap();
        let err = read_source_image(dir.path()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidRequest { .. }));

        let err = read_source_image(dir.path().join("missing.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
