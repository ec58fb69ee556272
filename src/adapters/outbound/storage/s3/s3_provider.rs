use object_store::{
    aws::{AmazonS3Builder, AmazonS3ConfigKey},
    ObjectStore as ApacheObjectStore,
};
use serde_json::Value;
use std::{str::FromStr, sync::Arc};

use crate::{
    adapters::outbound::storage::apache_object_store_adapter::StoreProvider,
    domain::{
        config::S3Args,
        errors::{ConfigError, StorageError, StorageResult},
    },
};

/// Builds S3 stores from the opaque client arguments.
///
/// Arguments are validated once when the provider is created; building a
/// store for a bucket only applies them. Besides the object_store option
/// names, the AWS SDK spellings `credentials`, `use_path_style_endpoint`
/// and `version` are understood.
#[derive(Debug, Clone)]
pub struct S3StoreProvider {
    options: Vec<(AmazonS3ConfigKey, String)>,
    allow_http: bool,
}

impl S3StoreProvider {
    pub fn from_args(args: &S3Args) -> Result<Self, ConfigError> {
        let mut options = Vec::new();
        let mut allow_http = false;

        for (key, value) in args.iter() {
            match key.as_str() {
                // API version selector of the AWS SDKs, nothing to configure
                "version" => {}
                "credentials" => {
                    let credentials = value.as_object().ok_or_else(|| ConfigError::InvalidArgs {
                        key: key.clone(),
                        message: "expected an object with key/secret".to_string(),
                    })?;

                    for (field, config_key) in [
                        ("key", AmazonS3ConfigKey::AccessKeyId),
                        ("secret", AmazonS3ConfigKey::SecretAccessKey),
                        ("token", AmazonS3ConfigKey::Token),
                    ] {
                        let name = format!("credentials.{}", field);
                        if let Some(value) = credentials.get(field) {
                            if let Some(value) = scalar(&name, value)? {
                                options.push((config_key, value));
                            }
                        }
                    }
                }
                "use_path_style_endpoint" => {
                    let path_style = value.as_bool().ok_or_else(|| ConfigError::InvalidArgs {
                        key: key.clone(),
                        message: "expected a boolean".to_string(),
                    })?;
                    options.push((
                        AmazonS3ConfigKey::VirtualHostedStyleRequest,
                        (!path_style).to_string(),
                    ));
                }
                _ => {
                    let config_key =
                        AmazonS3ConfigKey::from_str(key).map_err(|e| ConfigError::InvalidArgs {
                            key: key.clone(),
                            message: e.to_string(),
                        })?;

                    let Some(value) = scalar(key, value)? else {
                        continue;
                    };

                    if config_key == AmazonS3ConfigKey::Endpoint && value.starts_with("http://") {
                        allow_http = true;
                    }
                    options.push((config_key, value));
                }
            }
        }

        Ok(Self {
            options,
            allow_http,
        })
    }

    pub fn allows_http(&self) -> bool {
        self.allow_http
    }
}

impl StoreProvider for S3StoreProvider {
    fn build(&self, bucket: &str) -> StorageResult<Arc<dyn ApacheObjectStore>> {
        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);

        for (key, value) in &self.options {
            builder = builder.with_config(key.clone(), value);
        }

        if self.allow_http {
            builder = builder.with_allow_http(true);
        }

        let store = builder.build().map_err(|e| StorageError::Configuration {
            message: format!("Failed to build S3 store for bucket '{}': {}", bucket, e),
        })?;

        Ok(Arc::new(store))
    }
}

/// Render a scalar JSON value as a config string; `null` means "not set"
fn scalar(key: &str, value: &Value) -> Result<Option<String>, ConfigError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(_) | Value::Object(_) => Err(ConfigError::InvalidArgs {
            key: key.to_string(),
            message: "expected a string, number or boolean".to_string(),
        }),
    }
}
