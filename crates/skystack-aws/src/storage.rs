//! Storage bucket manager
//!
//! Bucket names double as hostnames when the stack has a domain, so a
//! bucket `site` in stage `test` becomes `site-test.example.com`.

use crate::error::Result;
use crate::PROVIDER;
use serde::{Deserialize, Serialize};
use serde_json::json;
use skystack_core::{stage_domain, stage_name, Resource, StackProps, Synth};

const RESOURCE: &str = "bucket";

/// Configuration entry for one bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketProps {
    pub id: String,

    /// Logical bucket name; defaults to the scoped id
    #[serde(default)]
    pub bucket_name: Option<String>,

    /// Serve the bucket as a static website
    #[serde(default)]
    pub website: bool,

    #[serde(default)]
    pub versioned: bool,
}

/// Handle to a created bucket
#[derive(Debug, Clone)]
pub struct Bucket {
    pub scoped_id: String,
    pub bucket_name: String,
    pub bucket_arn: String,
}

impl Bucket {
    /// Website endpoint of the bucket, when hosting is enabled
    pub fn website_domain(&self, region: &str) -> String {
        format!("{}.s3-website-{}.amazonaws.com", self.bucket_name, region)
    }
}

/// Manager for storage buckets
pub struct StorageManager {
    props: StackProps,
}

impl StorageManager {
    pub fn new(props: StackProps) -> Self {
        Self { props }
    }

    pub fn create_bucket(&self, id: &str, synth: &mut Synth, bucket: &BucketProps) -> Result<Bucket> {
        let logical = bucket.bucket_name.as_deref().unwrap_or(id);
        let physical = match &self.props.domain_name {
            Some(domain) => stage_domain(logical, &self.props.stage, domain),
            None => stage_name(logical, &self.props.stage),
        };
        let arn = format!("arn:aws:s3:::{physical}");

        let mut properties = json!({
            "bucketName": physical,
            "region": self.props.region,
            "versioned": bucket.versioned,
        });
        if bucket.website {
            properties["website"] = json!({
                "indexDocument": "index.html",
                "errorDocument": "error.html",
            });
        }

        synth.add_resource(id, Resource::new(PROVIDER, RESOURCE, properties))?;
        synth.add_output(id, "bucketName", physical.clone())?;
        synth.add_output(id, "bucketArn", arn.clone())?;

        tracing::info!(scoped_id = id, bucket = %physical, "Created bucket");
        Ok(Bucket {
            scoped_id: id.to_string(),
            bucket_name: physical,
            bucket_arn: arn,
        })
    }
}
