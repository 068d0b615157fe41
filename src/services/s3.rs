use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use chrono::Utc;
use reqwest::Url;
use tokio::sync::OnceCell;

use crate::config::StorageConfig;
use crate::error::UploadError;

use super::object_store::{ObjectStore, UploadRequest, storage_key};

const CREDENTIALS_SOURCE: &str = "knowledge-base-config";

/// S3 bucket writer. The SDK client is built on the first upload so missing
/// settings only surface when the user actually attaches a file.
pub struct S3ObjectStore {
    config: StorageConfig,
    client: OnceCell<aws_sdk_s3::Client>,
}

impl S3ObjectStore {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    async fn client(&self, region: &str) -> &aws_sdk_s3::Client {
        self.client
            .get_or_init(|| build_client(&self.config, region))
            .await
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload(&self, request: UploadRequest) -> Result<String, UploadError> {
        let region = self
            .config
            .region
            .as_deref()
            .ok_or(UploadError::MissingConfig("AWS_REGION"))?;
        let bucket = self
            .config
            .bucket
            .as_deref()
            .ok_or(UploadError::MissingConfig("S3_BUCKET_NAME"))?;

        let key = storage_key(&request.file_name, Utc::now());
        log::info!(
            "Uploading {} ({} bytes, {}) to s3://{bucket}/{key}",
            request.file_name,
            request.body.len(),
            request.content_type
        );

        self.client(region)
            .await
            .put_object()
            .bucket(bucket)
            .key(&key)
            .content_type(request.content_type)
            .body(ByteStream::from(request.body))
            .send()
            .await
            .map_err(|err| UploadError::Provider {
                message: DisplayErrorContext(&err).to_string(),
                source: Box::new(err),
            })?;

        Ok(object_location(
            bucket,
            region,
            self.config.endpoint_url.as_deref(),
            &key,
        ))
    }
}

async fn build_client(config: &StorageConfig, region: &str) -> aws_sdk_s3::Client {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));
    if let (Some(access_key), Some(secret_key)) =
        (&config.access_key_id, &config.secret_access_key)
    {
        loader = loader.credentials_provider(Credentials::new(
            access_key.clone(),
            secret_key.clone(),
            None,
            None,
            CREDENTIALS_SOURCE,
        ));
    }
    let shared = loader.load().await;

    let mut builder = aws_sdk_s3::config::Builder::from(&shared);
    if let Some(endpoint) = &config.endpoint_url {
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }
    aws_sdk_s3::Client::from_conf(builder.build())
}

/// Public URL of a stored object: virtual-hosted AWS style, or path style
/// under a custom endpoint.
pub fn object_location(bucket: &str, region: &str, endpoint: Option<&str>, key: &str) -> String {
    let (base, prefix) = match endpoint {
        Some(endpoint) => (endpoint.trim_end_matches('/').to_string(), Some(bucket)),
        None => (format!("https://{bucket}.s3.{region}.amazonaws.com"), None),
    };

    let encoded = Url::parse(&base).ok().and_then(|mut url| {
        {
            let mut segments = url.path_segments_mut().ok()?;
            segments.pop_if_empty();
            segments.extend(prefix);
            segments.extend(key.split('/'));
        }
        Some(url.to_string())
    });

    encoded.unwrap_or_else(|| match prefix {
        Some(bucket) => format!("{base}/{bucket}/{key}"),
        None => format!("{base}/{key}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aws_location_is_virtual_hosted() {
        assert_eq!(
            object_location("kb-files", "us-east-1", None, "uploads/1700-report.pdf"),
            "https://kb-files.s3.us-east-1.amazonaws.com/uploads/1700-report.pdf"
        );
    }

    #[test]
    fn location_escapes_file_names() {
        assert_eq!(
            object_location("kb-files", "eu-west-1", None, "uploads/1700-q3 report.pdf"),
            "https://kb-files.s3.eu-west-1.amazonaws.com/uploads/1700-q3%20report.pdf"
        );
    }

    #[test]
    fn custom_endpoint_uses_path_style() {
        assert_eq!(
            object_location(
                "kb-files",
                "us-east-1",
                Some("http://localhost:9000/"),
                "uploads/1-a.txt"
            ),
            "http://localhost:9000/kb-files/uploads/1-a.txt"
        );
    }

    #[tokio::test]
    async fn missing_bucket_fails_at_first_upload() {
        let store = S3ObjectStore::new(StorageConfig {
            region: Some("us-east-1".into()),
            ..StorageConfig::default()
        });
        let err = store
            .upload(UploadRequest::new("report.pdf", vec![0u8; 4]))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::MissingConfig("S3_BUCKET_NAME")));
    }

    #[tokio::test]
    async fn missing_region_fails_before_bucket() {
        let store = S3ObjectStore::new(StorageConfig::default());
        let err = store
            .upload(UploadRequest::new("report.pdf", Vec::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::MissingConfig("AWS_REGION")));
    }
}
