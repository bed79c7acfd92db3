//! MinIO/S3-compatible storage client
//!
//! Uses rust-s3 for object uploads. The bucket gets an anonymous read policy
//! so the photo URLs stored on reports can be fetched directly by browsers.

use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{Client, Url};
use s3::creds::Credentials;
use s3::{Bucket, BucketConfiguration, Region};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use super::{ObjectStorage, StorageError};
use crate::core::config::StorageConfig;
use crate::core::error::AppError;

type HmacSha256 = Hmac<Sha256>;

pub struct MinIOStorage {
    bucket: Box<Bucket>,
    region: Region,
    credentials: Credentials,
    endpoint: String,
    public_endpoint: String,
    access_key: String,
    secret_key: String,
    region_name: String,
    http_client: Client,
}

impl MinIOStorage {
    /// Connect to the bucket, creating it and its public read policy when missing
    pub async fn new(config: StorageConfig) -> Result<Self, AppError> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Failed to create MinIO credentials: {}", e)))?;

        let region = Region::Custom {
            region: config.region.clone(),
            endpoint: config.endpoint.clone(),
        };

        let mut bucket = Bucket::new(&config.bucket, region.clone(), credentials.clone())
            .map_err(|e| AppError::Internal(format!("Failed to create MinIO bucket: {}", e)))?;

        // MinIO wants http://endpoint/bucket rather than http://bucket.endpoint
        bucket.set_path_style();

        let http_client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let storage = Self {
            bucket,
            region,
            credentials,
            endpoint: config.endpoint,
            public_endpoint: config.public_endpoint,
            access_key: config.access_key,
            secret_key: config.secret_key,
            region_name: config.region,
            http_client,
        };

        storage.ensure_bucket_exists().await?;
        storage.set_public_read_policy().await?;

        info!(
            "MinIO storage ready: endpoint={}, bucket={}",
            storage.endpoint,
            storage.bucket.name()
        );

        Ok(storage)
    }

    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }

    async fn ensure_bucket_exists(&self) -> Result<(), AppError> {
        let created = Bucket::create_with_path_style(
            &self.bucket.name(),
            self.region.clone(),
            self.credentials.clone(),
            BucketConfiguration::default(),
        )
        .await;

        match created {
            Ok(_) => {
                info!("Bucket '{}' created", self.bucket.name());
                Ok(())
            }
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("BucketAlreadyOwnedByYou")
                    || error_str.contains("BucketAlreadyExists")
                    || error_str.contains("already own it")
                {
                    debug!("Bucket '{}' already exists", self.bucket.name());
                } else {
                    warn!(
                        "Could not create bucket '{}': {}. Assuming it exists.",
                        self.bucket.name(),
                        e
                    );
                }
                Ok(())
            }
        }
    }

    /// Allow anonymous GetObject on every key of the photo bucket
    async fn set_public_read_policy(&self) -> Result<(), AppError> {
        let bucket_name = self.bucket.name();

        let policy = json!({
            "Version": "2012-10-17",
            "Statement": [
                {
                    "Effect": "Allow",
                    "Principal": {"AWS": "*"},
                    "Action": ["s3:GetObject"],
                    "Resource": [format!("arn:aws:s3:::{bucket_name}/*")]
                }
            ]
        })
        .to_string();

        if let Err(e) = self.put_bucket_policy(&bucket_name, &policy).await {
            // Startup continues; the policy can be applied by hand
            warn!(
                "Failed to set bucket policy for '{}': {}. \
                Run: mc anonymous set download minio/{}",
                bucket_name, e, bucket_name
            );
            return Ok(());
        }

        info!("Public read policy applied to bucket '{}'", bucket_name);
        Ok(())
    }

    /// PUT ?policy signed with AWS Signature v4 (rust-s3 has no policy API)
    async fn put_bucket_policy(&self, bucket_name: &str, policy: &str) -> Result<(), AppError> {
        let now = Utc::now();
        let date_stamp = now.format("%Y%m%d").to_string();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();

        let host_header = host_header(&self.endpoint)?;
        let url = format!("{}/{}?policy", self.endpoint, bucket_name);
        let payload_hash = hex::encode(Sha256::digest(policy.as_bytes()));

        let signed_headers = "host;x-amz-content-sha256;x-amz-date";
        let canonical_request = format!(
            "PUT\n/{}\npolicy=\nhost:{}\nx-amz-content-sha256:{}\nx-amz-date:{}\n\n{}\n{}",
            bucket_name, host_header, payload_hash, amz_date, signed_headers, payload_hash
        );

        let credential_scope = format!("{}/{}/s3/aws4_request", date_stamp, self.region_name);
        let string_to_sign = format!(
            "AWS4-HMAC-SHA256\n{}\n{}\n{}",
            amz_date,
            credential_scope,
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );

        let signature = sign_v4(
            &self.secret_key,
            &date_stamp,
            &self.region_name,
            &string_to_sign,
        )?;

        let authorization = format!(
            "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
            self.access_key, credential_scope, signed_headers, signature
        );

        let response = self
            .http_client
            .put(&url)
            .header("Host", &host_header)
            .header("x-amz-date", &amz_date)
            .header("x-amz-content-sha256", &payload_hash)
            .header("Authorization", &authorization)
            .header("Content-Type", "application/json")
            .body(policy.to_string())
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to send policy request: {}", e)))?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(AppError::Internal(format!(
            "Failed to set bucket policy: {} - {}",
            status, body
        )))
    }
}

#[async_trait]
impl ObjectStorage for MinIOStorage {
    async fn upload(
        &self,
        path: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.bucket
            .put_object_with_content_type(path, data, content_type)
            .await
            .map_err(|e| StorageError::Upload {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        debug!(
            "Uploaded '{}' ({} bytes) to bucket '{}'",
            path,
            data.len(),
            self.bucket.name()
        );
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        public_object_url(&self.public_endpoint, &self.bucket.name(), path)
    }
}

/// `{endpoint}/{bucket}/{key}` with each key segment percent-encoded
fn public_object_url(endpoint: &str, bucket: &str, path: &str) -> String {
    let encoded = path
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, encoded)
}

fn host_header(endpoint: &str) -> Result<String, AppError> {
    let url = Url::parse(endpoint)
        .map_err(|e| AppError::Internal(format!("Invalid endpoint URL: {}", e)))?;
    let host = url
        .host_str()
        .ok_or_else(|| AppError::Internal("Endpoint URL has no host".to_string()))?;
    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

fn sign_v4(
    secret_key: &str,
    date_stamp: &str,
    region: &str,
    string_to_sign: &str,
) -> Result<String, AppError> {
    let k_date = hmac_sha256(
        format!("AWS4{}", secret_key).as_bytes(),
        date_stamp.as_bytes(),
    )?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, b"s3")?;
    let k_signing = hmac_sha256(&k_service, b"aws4_request")?;
    Ok(hex::encode(hmac_sha256(
        &k_signing,
        string_to_sign.as_bytes(),
    )?))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, AppError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| AppError::Internal(format!("HMAC key error: {}", e)))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_object_url() {
        let url = public_object_url(
            "http://localhost:9000/",
            "report-images",
            "user-1/1700000000000-0.jpg",
        );
        assert_eq!(
            url,
            "http://localhost:9000/report-images/user-1/1700000000000-0.jpg"
        );
    }

    #[test]
    fn test_public_object_url_encodes_segments() {
        let url = public_object_url("https://cdn.example", "b", "a b/c.png");
        assert_eq!(url, "https://cdn.example/b/a%20b/c.png");
    }

    #[test]
    fn test_host_header_keeps_port() {
        assert_eq!(
            host_header("http://minio:9000").unwrap(),
            "minio:9000".to_string()
        );
        assert_eq!(
            host_header("https://s3.example.com").unwrap(),
            "s3.example.com".to_string()
        );
        assert!(host_header("not a url").is_err());
    }

    #[test]
    fn test_sign_v4_is_deterministic_hex() {
        let a = sign_v4("secret", "20240101", "us-east-1", "payload").unwrap();
        let b = sign_v4("secret", "20240101", "us-east-1", "payload").unwrap();
        let c = sign_v4("other", "20240101", "us-east-1", "payload").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }
}
