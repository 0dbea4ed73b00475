use super::{BlobStore, ObjectMeta};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::{BehaviorVersion, Credentials};
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::primitives::DateTime as SmithyDateTime;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use url::Url;

pub struct S3Store {
    client: S3Client,
    bucket: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct S3Settings {
    pub endpoint: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub use_path_style: bool,
}

impl S3Settings {
    /// Parse a `key=value` pair, `;`-separated connection string, e.g.
    /// `endpoint=http://localhost:9000;region=us-east-1;access_key_id=AK;secret_access_key=SK`.
    pub fn parse(connection_string: &str) -> Result<Self> {
        let mut endpoint = None;
        let mut region = None;
        let mut access_key_id = None;
        let mut secret_access_key = None;
        let mut use_path_style = true;

        for segment in connection_string.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let (key, value) = segment
                .split_once('=')
                .with_context(|| format!("malformed connection string segment: {segment}"))?;
            match key.trim() {
                "endpoint" => endpoint = Some(value.to_string()),
                "region" => region = Some(value.to_string()),
                "access_key_id" => access_key_id = Some(value.to_string()),
                "secret_access_key" => secret_access_key = Some(value.to_string()),
                "use_path_style" => {
                    use_path_style = value
                        .trim()
                        .parse()
                        .context("use_path_style must be true or false")?
                }
                other => bail!("unknown connection string key: {other}"),
            }
        }

        let endpoint = endpoint.context("connection string is missing endpoint")?;
        Url::parse(&endpoint).context("endpoint is not a valid URL")?;

        Ok(Self {
            endpoint,
            region: region.context("connection string is missing region")?,
            access_key_id: access_key_id.unwrap_or_default(),
            secret_access_key: secret_access_key.unwrap_or_default(),
            use_path_style,
        })
    }
}

impl S3Store {
    pub async fn connect(settings: &S3Settings, bucket: &str) -> Result<Self> {
        let creds = Credentials::new(
            &settings.access_key_id,
            &settings.secret_access_key,
            None,
            None,
            "media-gateway",
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .endpoint_url(&settings.endpoint)
            .credentials_provider(creds)
            .force_path_style(settings.use_path_style)
            .build();

        Ok(Self {
            client: S3Client::from_conf(s3_config),
            bucket: bucket.to_string(),
        })
    }
}

#[async_trait]
impl BlobStore for S3Store {
    async fn exists(&self, name: &str) -> Result<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(name)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(err)) if err.err().is_not_found() => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn get(&self, name: &str) -> Result<Option<(Bytes, Option<String>)>> {
        match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(name)
            .send()
            .await
        {
            Ok(response) => {
                let content_type = response.content_type().map(str::to_string);
                let data = response.body.collect().await?.into_bytes();
                Ok(Some((data, content_type)))
            }
            Err(SdkError::ServiceError(err)) if err.err().is_no_such_key() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn put(&self, name: &str, data: Bytes, content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(name)
            .content_type(content_type)
            .body(data.into())
            .send()
            .await?;
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        // S3 reports success for absent keys; callers that need a
        // not-found answer check existence first.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(name)
            .send()
            .await?;
        Ok(true)
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectMeta>> {
        let mut objects = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix);
            if let Some(token) = continuation.take() {
                request = request.continuation_token(token);
            }

            let response = request.send().await?;
            for object in response.contents() {
                let Some(name) = object.key() else { continue };
                objects.push(ObjectMeta {
                    name: name.to_string(),
                    size: object.size().unwrap_or(0).max(0) as u64,
                    // Listings do not carry the content-type attribute
                    content_type: None,
                    last_modified: object.last_modified().and_then(to_chrono),
                });
            }

            match response.next_continuation_token() {
                Some(token) if response.is_truncated().unwrap_or(false) => {
                    continuation = Some(token.to_string());
                }
                _ => break,
            }
        }

        Ok(objects)
    }
}

fn to_chrono(timestamp: &SmithyDateTime) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}
