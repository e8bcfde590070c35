//! S3 transfer operations
//!
//! Thin wrapper over the AWS SDK for the bucket operations the pipeline
//! needs: upload, download, listing, and existence checks.

use std::path::Path;

use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use tracing::info;

use crate::utils::error::{HarvestError, Result};

/// Manager for S3 operations against one bucket
#[derive(Debug, Clone)]
pub struct S3Manager {
    bucket: String,
    client: aws_sdk_s3::Client,
}

impl S3Manager {
    /// Create a manager for `bucket` in `region`, with credentials resolved
    /// from the environment the way the AWS SDK does.
    pub async fn new(bucket: impl Into<String>, region: impl Into<String>) -> Result<Self> {
        let bucket = bucket.into();
        if bucket.trim().is_empty() {
            return Err(HarvestError::Config("bucket name cannot be empty".to_string()));
        }

        let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.into()))
            .load()
            .await;

        Ok(Self {
            bucket,
            client: aws_sdk_s3::Client::new(&aws_config),
        })
    }

    /// Bucket this manager operates on
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Upload a local file to `key`
    pub async fn upload_file(&self, local_path: &Path, key: &str) -> Result<()> {
        let body = ByteStream::from_path(local_path).await.map_err(|e| {
            HarvestError::NotFound(format!("cannot read {}: {}", local_path.display(), e))
        })?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| HarvestError::Storage(format!("S3 upload error: {}", e)))?;

        info!(
            "Uploaded {} to s3://{}/{}",
            local_path.display(),
            self.bucket,
            key
        );
        Ok(())
    }

    /// Download `key` to a local path, creating parent directories as needed
    pub async fn download_file(&self, key: &str, local_path: &Path) -> Result<()> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    HarvestError::NotFound(format!("S3 object not found: {}", key))
                } else {
                    HarvestError::Storage(format!("S3 download error: {}", service_error))
                }
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| HarvestError::Storage(format!("S3 download error: {}", e)))?;

        if let Some(parent) = local_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(local_path, data.into_bytes()).await?;

        info!(
            "Downloaded s3://{}/{} to {}",
            self.bucket,
            key,
            local_path.display()
        );
        Ok(())
    }

    /// Keys in the bucket under `prefix`
    pub async fn list_objects(&self, prefix: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .send()
            .await
            .map_err(|e| HarvestError::Storage(format!("S3 list error: {}", e)))?;

        Ok(response
            .contents()
            .iter()
            .filter_map(|object| object.key().map(str::to_string))
            .collect())
    }

    /// Whether `key` exists in the bucket
    pub async fn object_exists(&self, key: &str) -> Result<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_not_found() {
                    Ok(false)
                } else {
                    Err(HarvestError::Storage(format!("S3 head error: {}", service_error)))
                }
            }
        }
    }
}
